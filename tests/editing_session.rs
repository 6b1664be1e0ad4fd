//! End-to-end editing sessions driven through `EngineCore` the way a host
//! page drives it: pointer events in client coordinates, keys, and commands.

use formcanvas::doc::{Document, ElementId, ElementKind, PageSize};
use formcanvas::engine::{Action, EngineCore};
use formcanvas::geometry::{Point, Rect, clamp_to_canvas, snap_to_grid};
use formcanvas::history::History;
use formcanvas::input::{Button, Key, Modifiers};

// =============================================================
// Helpers
// =============================================================

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn add(core: &mut EngineCore, x: i32, y: i32, w: i32, h: i32) -> ElementId {
    core.add_element(ElementKind::TextInput, x, y, w, h).unwrap();
    core.selection()[0]
}

fn gesture(core: &mut EngineCore, from: Point, path: &[Point], modifiers: Modifiers) -> Vec<Action> {
    core.on_pointer_down(from, Button::Primary, modifiers);
    for p in path {
        core.on_pointer_move(*p, modifiers);
    }
    let end = path.last().copied().unwrap_or(from);
    core.on_pointer_up(end, Button::Primary, modifiers)
}

fn rect_of(core: &EngineCore, id: &ElementId) -> Rect {
    core.element(id).unwrap().rect()
}

fn assert_inside_canvas(doc: &Document) {
    for e in doc.elements() {
        assert!(e.x >= 0 && e.x <= doc.canvas_width() - e.width, "x out of canvas: {e:?}");
        assert!(e.y >= 0 && e.y <= doc.canvas_height() - e.height, "y out of canvas: {e:?}");
    }
}

/// Small deterministic generator so property loops are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next_in(&mut self, lo: i32, hi: i32) -> i32 {
        self.0 = self.0.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        let span = u64::try_from(hi - lo).unwrap() + 1;
        lo + i32::try_from((self.0 >> 33) % span).unwrap()
    }
}

// =============================================================
// Scenarios
// =============================================================

#[test]
fn scenario_a_grid_snap_on_drag() {
    let mut core = EngineCore::new();
    let id = add(&mut core, 0, 0, 100, 50);
    // grab at the element's origin so the raw target equals the pointer
    gesture(&mut core, pt(0.0, 10.0), &[pt(53.0, 212.0)], Modifiers::default());
    assert_eq!(rect_of(&core, &id), Rect::new(56, 200, 100, 50));
}

#[test]
fn scenario_b_center_guide() {
    let mut core = EngineCore::new();
    let id = add(&mut core, 0, 0, 100, 50);
    gesture(&mut core, pt(0.0, 10.0), &[pt(200.0, 10.0), pt(361.0, 10.0)], Modifiers::default());
    assert_eq!(rect_of(&core, &id).x, 358);
}

#[test]
fn scenario_c_history_order() {
    let doc_at = |x: i32| {
        let mut doc = Document::new(PageSize::Letter);
        let mut e = formcanvas::doc::Element::new(ElementKind::Label, x, 0, 100, 50);
        e.id = uuid::Uuid::from_u128(7);
        doc.insert(e).unwrap();
        doc
    };
    let mut history = History::default();
    history.record(&doc_at(10)).unwrap();
    history.record(&doc_at(20)).unwrap();
    history.record(&doc_at(30)).unwrap();

    let c = history.undo(&doc_at(40)).unwrap().unwrap();
    assert_eq!(c, doc_at(30));
    let b = history.undo(&c).unwrap().unwrap();
    assert_eq!(b, doc_at(20));
    assert_eq!(history.redo().unwrap().unwrap(), doc_at(30));
}

#[test]
fn scenario_d_resize_se() {
    let mut core = EngineCore::new();
    let id = add(&mut core, 10, 10, 100, 50);
    // grid snap puts the new element at (8, 8)
    let start = rect_of(&core, &id);
    let se = pt(f64::from(start.right()), f64::from(start.bottom()));
    gesture(&mut core, se, &[pt(se.x + 20.0, se.y + 10.0)], Modifiers::default());
    assert_eq!(rect_of(&core, &id), Rect::new(start.x, start.y, 120, 60));
}

#[test]
fn scenario_e_click_selection() {
    let mut core = EngineCore::new();
    let one = add(&mut core, 0, 0, 100, 50);
    let two = add(&mut core, 200, 200, 100, 50);
    let ctrl = Modifiers { ctrl: true, ..Modifiers::default() };

    gesture(&mut core, pt(50.0, 25.0), &[], Modifiers::default());
    assert_eq!(core.selection(), vec![one]);
    gesture(&mut core, pt(250.0, 225.0), &[], ctrl);
    assert_eq!(core.selection(), vec![one, two]);
    gesture(&mut core, pt(600.0, 800.0), &[], Modifiers::default());
    assert!(core.selection().is_empty());
}

// =============================================================
// Properties
// =============================================================

#[test]
fn snap_is_idempotent() {
    for grid in [1, 2, 5, 8, 10, 16, 25] {
        for tenth in -5000..5000 {
            let v = f64::from(tenth) / 10.0;
            let once = snap_to_grid(v, grid);
            assert_eq!(snap_to_grid(f64::from(once), grid), once, "v={v} grid={grid}");
        }
    }
}

#[test]
fn clamp_never_goes_negative() {
    let mut rng = Lcg(42);
    for _ in 0..2000 {
        let (w, h) = (rng.next_in(1, 2000), rng.next_in(1, 2000));
        let (x, y) = clamp_to_canvas(rng.next_in(-3000, 3000), rng.next_in(-3000, 3000), w, h, 816, 1056);
        assert!(x >= 0 && y >= 0);
        if w <= 816 {
            assert!(x + w <= 816);
        }
        if h <= 1056 {
            assert!(y + h <= 1056);
        }
    }
}

#[test]
fn committed_gestures_stay_inside_canvas() {
    let mut core = EngineCore::new();
    let ids: Vec<ElementId> = (0..4).map(|i| add(&mut core, i * 150, i * 200, 100, 60)).collect();
    let mut rng = Lcg(7);

    for step in 0..200 {
        let id = ids[step % ids.len()];
        let r = rect_of(&core, &id);
        let inside = pt(f64::from(r.x) + f64::from(r.width) / 2.0, f64::from(r.y) + f64::from(r.height) / 2.0);
        let target = pt(f64::from(rng.next_in(-400, 1400)), f64::from(rng.next_in(-400, 1600)));
        core.clear_selection();
        gesture(&mut core, inside, &[target], Modifiers::default());
        assert_inside_canvas(core.document());

        // resize from the bottom-right handle of the now selected element
        let r = rect_of(&core, &id);
        let se = pt(f64::from(r.right()), f64::from(r.bottom()));
        let target = pt(f64::from(rng.next_in(-400, 1400)), f64::from(rng.next_in(-400, 1600)));
        gesture(&mut core, se, &[target], Modifiers::default());
        assert_inside_canvas(core.document());
        assert_eq!(core.document().len(), ids.len());
    }
}

#[test]
fn history_is_bounded() {
    let mut core = EngineCore::new();
    for n in 1..=80 {
        add(&mut core, 0, 0, 100, 50);
        assert_eq!(core.undo_count(), n.min(50));
    }
}

#[test]
fn undo_then_redo_restores_document() {
    let mut core = EngineCore::new();
    let id = add(&mut core, 0, 0, 100, 50);
    gesture(&mut core, pt(50.0, 25.0), &[pt(300.0, 400.0)], Modifiers::default());
    let committed = core.document().clone();

    core.undo().unwrap();
    assert_ne!(core.document(), &committed);
    core.redo().unwrap();
    assert_eq!(core.document(), &committed);
    assert!(core.element(&id).is_some());
}

#[test]
fn new_commit_clears_redo() {
    let mut core = EngineCore::new();
    add(&mut core, 0, 0, 100, 50);
    add(&mut core, 200, 200, 100, 50);
    core.undo().unwrap();
    assert_eq!(core.redo_count(), 1);
    add(&mut core, 400, 400, 100, 50);
    assert_eq!(core.redo_count(), 0);
}

#[test]
fn gestures_preserve_element_count() {
    let mut core = EngineCore::new();
    add(&mut core, 0, 0, 100, 50);
    let id = add(&mut core, 200, 200, 100, 50);
    // drag, resize from the se corner, rotate from the grip
    gesture(&mut core, pt(250.0, 225.0), &[pt(260.0, 240.0)], Modifiers::default());
    let r = rect_of(&core, &id);
    gesture(
        &mut core,
        pt(f64::from(r.right()), f64::from(r.bottom())),
        &[pt(500.0, 500.0)],
        Modifiers::default(),
    );
    let r = rect_of(&core, &id);
    let grip = pt(r.center().x, f64::from(r.y) - 24.0);
    gesture(&mut core, grip, &[pt(900.0, 900.0)], Modifiers::default());
    assert_eq!(core.document().len(), 2);
    assert!(core.element(&id).unwrap().rotation > 0.0);
}

#[test]
fn full_keyboard_session() {
    let mut core = EngineCore::new();
    let ctrl = Modifiers { ctrl: true, ..Modifiers::default() };
    let key = |k: &str| Key(k.to_owned());

    add(&mut core, 0, 0, 100, 50);
    core.on_key_down(&key("d"), ctrl).unwrap();
    core.on_key_down(&key("a"), ctrl).unwrap();
    assert_eq!(core.selection().len(), 2);
    core.on_key_down(&key("Delete"), Modifiers::default()).unwrap();
    assert!(core.document().is_empty());
    core.on_key_down(&key("z"), ctrl).unwrap();
    assert_eq!(core.document().len(), 2);
    core.on_key_down(&key("y"), ctrl).unwrap();
    assert!(core.document().is_empty());
}
