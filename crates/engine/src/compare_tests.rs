use super::*;
use mirrorset_fs::FileKind;

fn file(name: &str, date: i64, size: u64) -> FileRecord {
    let mut rec = FileRecord::new(name);
    rec.set_kind(FileKind::Normal);
    rec.set_date(date);
    rec.set_size(size);
    rec
}

fn exact() -> Comparator {
    Comparator::new(
        Precision::Seconds(0),
        Precision::Seconds(0),
        IgnoreFlags::empty(),
    )
}

#[test]
fn identical_files_are_same() {
    assert!(exact().same(&file("f", 100, 10), &file("f", 100, 10)));
}

#[test]
fn different_names_are_never_same() {
    assert!(!exact().same(&file("a", 100, 10), &file("b", 100, 10)));
}

#[test]
fn kind_mismatch_is_not_same() {
    let mut link = FileRecord::new("f");
    link.set_symlink("x");
    assert!(!exact().same(&file("f", 1, 1), &link));
}

#[test]
fn directories_are_never_same() {
    let mut a = file("d", 100, 4096);
    a.set_kind(FileKind::Directory);
    let mut b = file("d", 100, 4096);
    b.set_kind(FileKind::Directory);

    let loose = Comparator::new(
        Precision::Infinite,
        Precision::Infinite,
        IgnoreFlags::all(),
    );
    assert!(!exact().same(&a, &b));
    assert!(!loose.same(&a, &b));

    // One side being a directory of known kind is enough.
    let mut unknown = FileRecord::new("d");
    unknown.set_size(4096);
    assert!(!exact().same(&a, &unknown));
    assert!(!exact().same(&unknown, &a));
}

#[test]
fn symlink_targets_decide_alone() {
    let mut a = FileRecord::new("l");
    a.set_symlink("target");
    a.set_date(1);
    a.set_size(6);
    let mut b = FileRecord::new("l");
    b.set_symlink("target");
    b.set_date(99_999);
    b.set_size(600);

    assert!(exact().same(&a, &b), "dates and sizes of links are ignored");

    b.set_symlink("elsewhere");
    assert!(!exact().same(&a, &b));
}

#[test]
fn date_window_is_inclusive() {
    let cmp = Comparator::new(
        Precision::Seconds(2),
        Precision::Seconds(0),
        IgnoreFlags::empty(),
    );
    assert!(cmp.same(&file("f", 100, 1), &file("f", 102, 1)));
    assert!(cmp.same(&file("f", 102, 1), &file("f", 100, 1)));
    assert!(!cmp.same(&file("f", 100, 1), &file("f", 103, 1)));
}

#[test]
fn coarse_date_uses_loose_window() {
    let cmp = Comparator::new(
        Precision::Seconds(0),
        Precision::Seconds(60),
        IgnoreFlags::empty(),
    );
    let mut coarse = FileRecord::new("f");
    coarse.set_date_coarse(120);
    coarse.set_size(1);

    assert!(cmp.same(&file("f", 150, 1), &coarse));
    assert!(!cmp.same(&file("f", 181, 1), &coarse));
    assert!(!cmp.same(&file("f", 150, 1), &file("f", 151, 1)));
}

#[test]
fn infinite_window_ignores_any_difference() {
    let cmp = Comparator::new(
        Precision::Infinite,
        Precision::Infinite,
        IgnoreFlags::empty(),
    );
    assert!(cmp.same(&file("f", 0, 1), &file("f", i64::MAX, 1)));
}

#[test]
fn size_mismatch_is_not_same_unless_ignored() {
    assert!(!exact().same(&file("f", 1, 1), &file("f", 1, 2)));

    let cmp = Comparator::new(
        Precision::Seconds(0),
        Precision::Seconds(0),
        IgnoreFlags::SIZE,
    );
    assert!(cmp.same(&file("f", 1, 1), &file("f", 1, 2)));
}

#[test]
fn ignored_date_skips_date_check() {
    let cmp = Comparator::new(
        Precision::Seconds(0),
        Precision::Seconds(0),
        IgnoreFlags::DATE,
    );
    assert!(cmp.same(&file("f", 1, 5), &file("f", 9, 5)));
}

#[test]
fn unknown_fields_do_not_rule_out() {
    let mut bare = FileRecord::new("f");
    assert!(exact().same(&bare, &file("f", 1, 1)));

    bare.set_size(2);
    assert!(!exact().same(&bare, &file("f", 1, 1)));
}

#[test]
fn if_older_flags_make_the_relation_asymmetric() {
    let older = file("f", 100, 10);
    let newer = file("f", 200, 20);

    let cmp = Comparator::new(
        Precision::Seconds(0),
        Precision::Seconds(0),
        IgnoreFlags::DATE_IF_OLDER | IgnoreFlags::SIZE_IF_OLDER,
    );

    // Left side older: both checks are skipped.
    assert!(cmp.same(&older, &newer));
    // Left side newer: both checks apply.
    assert!(!cmp.same(&newer, &older));
    assert_ne!(cmp.same(&older, &newer), cmp.same(&newer, &older));
}

#[test]
fn size_if_older_needs_both_dates() {
    let cmp = Comparator::new(
        Precision::Infinite,
        Precision::Infinite,
        IgnoreFlags::SIZE_IF_OLDER,
    );
    let mut undated = FileRecord::new("f");
    undated.set_size(1);

    assert!(!cmp.same(&undated, &file("f", 200, 2)));
    assert!(cmp.same(&file("f", 100, 1), &file("f", 200, 2)));
}

#[test]
fn same_as_matches_comparator() {
    let a = file("f", 100, 10);
    let b = file("f", 101, 10);
    assert!(same_as(
        &a,
        &b,
        Precision::Seconds(1),
        Precision::Seconds(1),
        IgnoreFlags::empty()
    ));
    assert!(!same_as(
        &a,
        &b,
        Precision::Seconds(0),
        Precision::Seconds(0),
        IgnoreFlags::empty()
    ));
}

#[test]
fn default_comparator_uses_runtime_defaults() {
    let cmp = Comparator::default();
    assert_eq!(cmp.precision, Precision::Seconds(DEFAULT_TIME_PRECISION_SECS));
    assert_eq!(
        cmp.loose_precision,
        Precision::Seconds(DEFAULT_LOOSE_TIME_PRECISION_SECS)
    );
    assert!(cmp.ignore.is_empty());
}

#[test]
fn precision_parses_cases() {
    let cases: &[(&str, Option<Precision>)] = &[
        ("0", Some(Precision::Seconds(0))),
        ("30", Some(Precision::Seconds(30))),
        ("30s", Some(Precision::Seconds(30))),
        ("2m", Some(Precision::Seconds(120))),
        ("1h", Some(Precision::Seconds(3600))),
        ("1D", Some(Precision::Seconds(86_400))),
        (" 5 ", Some(Precision::Seconds(5))),
        ("inf", Some(Precision::Infinite)),
        ("Infinity", Some(Precision::Infinite)),
        ("never", Some(Precision::Infinite)),
        ("", None),
        ("m", None),
        ("-1", None),
        ("5w", None),
        ("1.5h", None),
    ];

    for (input, expected) in cases {
        let got = input.parse::<Precision>().ok();
        assert_eq!(got, *expected, "parse {:?}", input);
    }
}

#[test]
fn precision_display_round_trips_through_parse() {
    for p in [Precision::Seconds(42), Precision::Infinite] {
        assert_eq!(p.to_string().parse::<Precision>(), Ok(p));
    }
}
