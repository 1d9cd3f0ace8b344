use super::*;
use mirrorset_fs::Fields;

fn names(set: &Snapshot) -> Vec<&str> {
    set.iter().filter_map(|r| r.name()).collect()
}

fn file(name: &str, date: i64, size: u64) -> FileRecord {
    let mut rec = FileRecord::new(name);
    rec.set_kind(FileKind::Normal);
    rec.set_date(date);
    rec.set_size(size);
    rec
}

#[test]
fn insert_keeps_names_sorted_in_any_order() {
    let orders: &[&[&str]] = &[
        &["a", "b", "c"],
        &["c", "b", "a"],
        &["b", "a", "c"],
        &["b", "c", "a"],
    ];

    for order in orders {
        let set: Snapshot = order.iter().map(|n| FileRecord::new(*n)).collect();
        assert_eq!(names(&set), vec!["a", "b", "c"], "inserted as {:?}", order);
    }
}

#[test]
fn insert_reports_position_and_rejects_nameless() {
    let mut set = Snapshot::new();
    assert_eq!(set.insert(FileRecord::new("m")), InsertOutcome::Added(0));
    assert_eq!(set.insert(FileRecord::new("a")), InsertOutcome::Added(0));
    assert_eq!(set.insert(FileRecord::new("z")), InsertOutcome::Added(2));
    assert_eq!(set.insert(FileRecord::new("m")), InsertOutcome::Merged(1));
    assert_eq!(set.insert(FileRecord::default()), InsertOutcome::Rejected);
    assert_eq!(set.len(), 3);
}

#[test]
fn duplicate_insert_merges_first_value_wins() {
    let mut set = Snapshot::new();

    let mut first = FileRecord::new("f");
    first.set_size(10);
    set.insert(first);

    let mut second = FileRecord::new("f");
    second.set_size(20);
    second.set_mode(0o755);
    set.insert(second);

    assert_eq!(set.len(), 1);
    let rec = set.find_by_name("f").expect("merged entry");
    assert_eq!(rec.size(), Some(10));
    assert_eq!(rec.mode(), Some(0o755));
    assert_eq!(rec.defined(), Fields::NAME | Fields::SIZE | Fields::MODE);
}

#[test]
fn find_by_name_is_exact() {
    let set: Snapshot = ["ab", "abc", "b"].into_iter().map(FileRecord::new).collect();
    assert!(set.contains("abc"));
    assert!(set.find_by_name("a").is_none());
    assert!(set.find_by_name("abcd").is_none());
    assert!(set.find_by_name("").is_none());
}

#[test]
fn remove_shifts_cursor_back_when_past_removed() {
    let mut set: Snapshot = ["a", "b", "c", "d"].into_iter().map(FileRecord::new).collect();
    set.next();
    set.next();
    assert_eq!(set.curr().and_then(|r| r.name()), Some("c"));

    let removed = set.remove(0);
    assert_eq!(removed.name(), Some("a"));
    assert_eq!(set.cursor(), 1);
    assert_eq!(set.curr().and_then(|r| r.name()), Some("c"));

    // Removing at or after the cursor leaves it in place.
    set.remove(1);
    assert_eq!(set.cursor(), 1);
    assert_eq!(set.curr().and_then(|r| r.name()), Some("d"));
}

#[test]
#[should_panic(expected = "out of range")]
fn remove_out_of_range_panics() {
    let mut set: Snapshot = ["a"].into_iter().map(FileRecord::new).collect();
    set.remove(1);
}

#[test]
fn cursor_walks_to_the_end_and_stops() {
    let mut set: Snapshot = ["a", "b"].into_iter().map(FileRecord::new).collect();
    assert_eq!(set.curr().and_then(|r| r.name()), Some("a"));
    assert_eq!(set.next().and_then(|r| r.name()), Some("b"));
    assert!(set.next().is_none());
    assert!(set.next().is_none());
    assert_eq!(set.cursor(), 2);

    set.rewind();
    assert_eq!(set.curr().and_then(|r| r.name()), Some("a"));
}

#[test]
fn at_returns_none_out_of_range() {
    let set: Snapshot = ["a"].into_iter().map(FileRecord::new).collect();
    assert!(set.at(0).is_some());
    assert!(set.at(1).is_none());
    assert!(Snapshot::new().at(0).is_none());
}

#[test]
fn merge_from_fills_and_copies() {
    let mut local: Snapshot = [file("f1", 100, 10)].into_iter().collect();
    local.insert(FileRecord::new("f2"));

    let remote: Snapshot = [file("f2", 200, 20), file("f3", 300, 30)]
        .into_iter()
        .collect();

    local.merge_from(&remote);

    assert_eq!(names(&local), vec!["f1", "f2", "f3"]);
    assert_eq!(local.find_by_name("f2").and_then(|r| r.size()), Some(20));
    assert_eq!(local.find_by_name("f3").and_then(|r| r.size()), Some(30));
    // The source is untouched.
    assert_eq!(remote.len(), 2);
}

#[test]
fn merge_names_adds_bare_records_only_for_new_names() {
    let mut set: Snapshot = [file("a", 1, 1)].into_iter().collect();
    set.merge_names(["c", "a", "b"]);

    assert_eq!(names(&set), vec!["a", "b", "c"]);
    assert_eq!(set.find_by_name("a").and_then(|r| r.size()), Some(1));
    assert_eq!(
        set.find_by_name("b").map(|r| r.defined()),
        Some(Fields::NAME)
    );
}

#[test]
fn count_by_kind_partitions_all_entries() {
    let mut dir = FileRecord::new("d");
    dir.set_kind(FileKind::Directory);
    let mut link = FileRecord::new("l");
    link.set_symlink("t");

    let set: Snapshot = [dir, link, file("f", 1, 1), FileRecord::new("u")]
        .into_iter()
        .collect();

    let counts = set.count_by_kind();
    assert_eq!(
        counts,
        KindCounts {
            dirs: 1,
            files: 1,
            symlinks: 1,
            unknown: 1,
        }
    );
    assert_eq!(counts.total(), set.len());
}

#[test]
fn clone_is_deep_and_drops_sort_view() {
    let mut set: Snapshot = [file("a", 1, 5), file("b", 1, 50)].into_iter().collect();
    set.sort(crate::SortOrder::BySize, false);

    let mut copy = set.clone();
    assert!(!copy.is_sorted_view());
    assert_eq!(names(&copy), vec!["a", "b"]);

    copy.insert(FileRecord::new("c"));
    assert_eq!(copy.len(), 3);
    assert_eq!(set.len(), 2);
    assert_eq!(names(&set), vec!["b", "a"]);
}

#[test]
fn clear_resets_everything() {
    let mut set: Snapshot = ["a", "b"].into_iter().map(FileRecord::new).collect();
    set.next();
    set.sort(crate::SortOrder::DirsFirst, false);
    set.clear();

    assert!(set.is_empty());
    assert!(!set.is_sorted_view());
    assert_eq!(set.cursor(), 0);
    set.insert(FileRecord::new("x"));
    assert_eq!(set.len(), 1);
}
