use super::*;
use crate::doc::{Element, ElementKind, PageSize};

fn doc_at(x: i32) -> Document {
    let mut doc = Document::new(PageSize::Letter);
    let mut element = Element::new(ElementKind::TextInput, x, 0, 100, 50);
    element.id = uuid::Uuid::from_u128(1);
    doc.insert(element).unwrap();
    doc
}

fn x_of(doc: &Document) -> i32 {
    doc.elements()[0].x
}

// =============================================================
// Snapshot
// =============================================================

#[test]
fn snapshot_restores_full_document() {
    let mut doc = doc_at(40);
    doc.elements_mut()[0].is_selected = true;
    doc.merge_payload(&uuid::Uuid::from_u128(1), &serde_json::json!({"label": "Name"}));
    let restored = Snapshot::capture(&doc).unwrap().restore().unwrap();
    assert_eq!(restored, doc);
}

#[test]
fn snapshot_rejects_garbage() {
    let err = Snapshot::from_json("{not json").restore().unwrap_err();
    assert!(matches!(err, HistoryError::Decode(_)));
}

#[test]
fn snapshot_rejects_duplicate_ids() {
    let doc = doc_at(0);
    let mut value = serde_json::to_value(&doc).unwrap();
    let element = value["elements"][0].clone();
    value["elements"].as_array_mut().unwrap().push(element);
    let err = Snapshot::from_json(value.to_string()).restore().unwrap_err();
    assert!(matches!(err, HistoryError::Invalid(DocError::DuplicateId(_))));
}

// =============================================================
// record / undo / redo
// =============================================================

#[test]
fn empty_history_is_a_no_op() {
    let mut history = History::default();
    assert!(history.undo(&doc_at(0)).unwrap().is_none());
    assert!(history.redo().unwrap().is_none());
    assert_eq!((history.undo_count(), history.redo_count()), (0, 0));
}

#[test]
fn undo_twice_then_redo() {
    let mut history = History::default();
    for x in [10, 20, 30] {
        history.record(&doc_at(x)).unwrap();
    }
    let current = doc_at(40);

    let c = history.undo(&current).unwrap().unwrap();
    assert_eq!(x_of(&c), 30);
    let b = history.undo(&c).unwrap().unwrap();
    assert_eq!(x_of(&b), 20);
    let redone = history.redo().unwrap().unwrap();
    assert_eq!(x_of(&redone), 30);
}

#[test]
fn redo_after_undo_returns_current() {
    let mut history = History::default();
    history.record(&doc_at(10)).unwrap();
    let current = doc_at(99);
    history.undo(&current).unwrap();
    assert_eq!(history.redo().unwrap().unwrap(), current);
}

#[test]
fn record_clears_redo() {
    let mut history = History::default();
    history.record(&doc_at(10)).unwrap();
    history.record(&doc_at(20)).unwrap();
    history.undo(&doc_at(30)).unwrap();
    assert!(history.can_redo());
    history.record(&doc_at(25)).unwrap();
    assert_eq!(history.redo_count(), 0);
    assert!(!history.can_redo());
}

#[test]
fn undo_count_is_bounded() {
    let mut history = History::default();
    for n in 1..=120 {
        history.record(&doc_at(n)).unwrap();
        assert_eq!(history.undo_count(), usize::try_from(n).unwrap().min(50));
    }
}

#[test]
fn eviction_drops_oldest() {
    let mut history = History::new(3);
    for x in [1, 2, 3, 4, 5] {
        history.record(&doc_at(x)).unwrap();
    }
    let mut current = doc_at(6);
    let mut seen = Vec::new();
    while let Some(doc) = history.undo(&current).unwrap() {
        seen.push(x_of(&doc));
        current = doc;
    }
    assert_eq!(seen, vec![5, 4, 3]);
}

#[test]
fn redo_stack_is_bounded() {
    let mut history = History::new(60);
    for x in 0..60 {
        history.record(&doc_at(x)).unwrap();
    }
    let mut history = History { max_depth: 5, ..history };
    let mut current = doc_at(100);
    for _ in 0..10 {
        current = history.undo(&current).unwrap().unwrap();
    }
    assert_eq!(history.redo_count(), 5);
}

#[test]
fn clear_empties_both_stacks() {
    let mut history = History::default();
    history.record(&doc_at(1)).unwrap();
    history.record(&doc_at(2)).unwrap();
    history.undo(&doc_at(3)).unwrap();
    history.clear();
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn zero_depth_keeps_one_entry() {
    let mut history = History::new(0);
    history.record(&doc_at(1)).unwrap();
    history.record(&doc_at(2)).unwrap();
    assert_eq!(history.undo_count(), 1);
}

// =============================================================
// Corrupt snapshots
// =============================================================

#[test]
fn corrupt_undo_leaves_stacks_unchanged() {
    let mut history = History::default();
    history.record(&doc_at(1)).unwrap();
    history.push_snapshot(Snapshot::from_json("garbage"));
    let err = history.undo(&doc_at(2)).unwrap_err();
    assert!(matches!(err, HistoryError::Decode(_)));
    assert_eq!((history.undo_count(), history.redo_count()), (2, 0));
}

#[test]
fn corrupt_redo_leaves_stacks_unchanged() {
    let mut history = History::default();
    history.record(&doc_at(1)).unwrap();
    history.undo(&doc_at(2)).unwrap();
    history.redo.push_back(Snapshot::from_json("[]"));
    let err = history.redo().unwrap_err();
    assert!(matches!(err, HistoryError::Decode(_)));
    assert_eq!((history.undo_count(), history.redo_count()), (0, 2));
}
