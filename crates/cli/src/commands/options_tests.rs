use super::*;
use mirrorset_fs::FileRecord;

fn names(set: &Snapshot) -> Vec<&str> {
    set.iter().filter_map(|r| r.name()).collect()
}

fn compare_opts(ignore_time: bool, ignore_size: bool, only_newer: bool) -> CompareOptions {
    CompareOptions {
        precision: Precision::Seconds(1),
        loose_precision: Precision::Infinite,
        ignore_time,
        ignore_size,
        only_newer,
    }
}

fn filter_opts(
    include: Option<&str>,
    exclude: Option<&str>,
    glob_include: &[&str],
    glob_exclude: &[&str],
) -> FilterOptions {
    FilterOptions {
        include: include.map(str::to_owned),
        exclude: exclude.map(str::to_owned),
        glob_include: glob_include.iter().map(|s| s.to_string()).collect(),
        glob_exclude: glob_exclude.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn comparator_maps_flags() {
    let cases: &[((bool, bool, bool), IgnoreFlags)] = &[
        ((false, false, false), IgnoreFlags::empty()),
        ((true, false, false), IgnoreFlags::DATE),
        ((false, true, false), IgnoreFlags::SIZE),
        (
            (false, false, true),
            IgnoreFlags::DATE_IF_OLDER.union(IgnoreFlags::SIZE_IF_OLDER),
        ),
    ];

    for ((t, s, n), expected) in cases {
        let cmp = compare_opts(*t, *s, *n).comparator();
        assert_eq!(cmp.ignore, *expected, "flags {:?}", (t, s, n));
        assert_eq!(cmp.precision, Precision::Seconds(1));
        assert_eq!(cmp.loose_precision, Precision::Infinite);
    }
}

#[test]
fn sort_key_maps_to_sort_order() {
    assert_eq!(SortOrder::from(SortKey::Name), SortOrder::ByName);
    assert_eq!(SortOrder::from(SortKey::Size), SortOrder::BySize);
    assert_eq!(SortOrder::from(SortKey::Dirs), SortOrder::DirsFirst);
}

#[test]
fn filter_applies_regex_then_globs() {
    let mut set: Snapshot = ["a.rs", "b.rs", "c.txt", "gen.rs"]
        .into_iter()
        .map(FileRecord::new)
        .collect();

    let opts = filter_opts(Some(r"\.rs$"), None, &[], &["gen.*"]);
    let removed = opts.apply(&mut set).expect("apply filters");

    assert_eq!(removed, 2);
    assert_eq!(names(&set), vec!["a.rs", "b.rs"]);
}

#[test]
fn filter_without_options_keeps_everything() {
    let mut set: Snapshot = ["a", "b"].into_iter().map(FileRecord::new).collect();
    let removed = filter_opts(None, None, &[], &[])
        .apply(&mut set)
        .expect("apply filters");
    assert_eq!(removed, 0);
    assert_eq!(set.len(), 2);
}

#[test]
fn invalid_patterns_are_reported() {
    let mut set = Snapshot::new();
    assert!(filter_opts(Some("("), None, &[], &[]).apply(&mut set).is_err());
    assert!(filter_opts(None, None, &["{a,b"], &[]).apply(&mut set).is_err());
}

#[test]
fn load_snapshot_scans_one_level() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    std::fs::write(tmp.path().join("b"), b"b").expect("write b");
    std::fs::write(tmp.path().join("a"), b"a").expect("write a");
    std::fs::create_dir(tmp.path().join("sub")).expect("create sub");
    std::fs::write(tmp.path().join("sub").join("deep"), b"d").expect("write deep");

    let set = load_snapshot(tmp.path(), false).expect("load");
    assert_eq!(names(&set), vec!["a", "b", "sub"]);
    assert!(load_snapshot(&tmp.path().join("missing"), false).is_err());
}
