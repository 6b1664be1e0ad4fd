use super::*;
use crate::doc::{Document, Element, ElementKind, PageSize};
use crate::geometry::Point;
use crate::hit::ResizeHandle;

fn doc_with_one() -> (Document, ElementId) {
    let mut doc = Document::new(PageSize::Letter);
    let id = doc.insert(Element::new(ElementKind::Checkbox, 10, 10, 100, 50)).unwrap();
    (doc, id)
}

#[test]
fn modifiers_default_is_empty() {
    let m = Modifiers::default();
    assert!(!m.command());
    assert!(!m.toggles_selection());
}

#[test]
fn ctrl_or_meta_is_command() {
    assert!(Modifiers { ctrl: true, ..Modifiers::default() }.command());
    assert!(Modifiers { meta: true, ..Modifiers::default() }.command());
    assert!(!Modifiers { alt: true, ..Modifiers::default() }.command());
}

#[test]
fn shift_toggles_selection() {
    assert!(Modifiers { shift: true, ..Modifiers::default() }.toggles_selection());
    assert!(Modifiers { ctrl: true, ..Modifiers::default() }.toggles_selection());
}

#[test]
fn key_is_case_insensitive() {
    assert!(Key("Z".into()).is("z"));
    assert!(Key("Escape".into()).is("escape"));
    assert!(!Key("Delete".into()).is("Backspace"));
}

#[test]
fn gesture_default_is_idle() {
    let g = Gesture::default();
    assert!(g.is_idle());
    assert_eq!(g.target(), None);
    assert_eq!(g.name(), "idle");
}

#[test]
fn gesture_target_and_name() {
    let (doc, id) = doc_with_one();
    let p = Point::new(20.0, 20.0);

    let drag = Gesture::Dragging(DragState::start(&doc, &id, p).unwrap());
    assert_eq!((drag.target(), drag.name()), (Some(id), "drag"));

    let resize = Gesture::Resizing(ResizeState::start(&doc, &id, ResizeHandle::Se, p).unwrap());
    assert_eq!((resize.target(), resize.name()), (Some(id), "resize"));

    let rotate = Gesture::Rotating(RotateState::start(&doc, &id, p).unwrap());
    assert_eq!((rotate.target(), rotate.name()), (Some(id), "rotate"));
    assert!(!rotate.is_idle());
}

#[test]
fn gesture_cancel_and_changed_dispatch() {
    let (mut doc, id) = doc_with_one();
    let state = DragState::start(&doc, &id, Point::new(20.0, 20.0)).unwrap();
    let gesture = Gesture::Dragging(state.clone());
    assert!(!gesture.changed(&doc));

    state.update(&mut doc, Point::new(220.0, 220.0), &crate::config::EditorConfig::default());
    assert!(gesture.changed(&doc));

    gesture.cancel(&mut doc);
    assert_eq!(doc.get(&id).unwrap().rect(), crate::geometry::Rect::new(10, 10, 100, 50));
    assert!(!Gesture::Idle.changed(&doc));
}
