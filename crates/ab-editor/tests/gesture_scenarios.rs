//! Integration tests: pointer gestures and shortcuts through the editor.

use ab_core::{Axis, ElementId, ElementSpec, Geom, Guideline, Selection, ShapeKind};
use ab_editor::{Editor, EditorConfig, Modifiers, Outcome};
use pretty_assertions::assert_eq;

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn drag(ed: &mut Editor, from: (f64, f64), to: (f64, f64)) -> Outcome {
    ed.pointer_down(from.0, from.1, Modifiers::NONE);
    ed.pointer_move(to.0, to.1, Modifiers::NONE);
    ed.pointer_up(to.0, to.1, Modifiers::NONE)
}

fn geom(ed: &Editor, id: ElementId) -> Geom {
    ed.document().get(id).unwrap().geom()
}

// ─── Click vs drag ───────────────────────────────────────────────────────

#[test]
fn small_wiggle_is_a_click() {
    init_logs();
    let mut ed = Editor::default();
    let a = ed.add_shape(ShapeKind::Rectangle).unwrap();
    ed.select(Selection::None);
    let len = ed.history_len();

    assert_eq!(drag(&mut ed, (150.0, 150.0), (153.0, 153.0)), Outcome::Redraw);
    assert_eq!(ed.selection(), &Selection::Single(a));
    assert_eq!(geom(&ed, a), Geom::new(100.0, 100.0, 100.0, 100.0));
    assert_eq!(ed.history_len(), len);
}

#[test]
fn drag_commits_one_history_entry() {
    let mut ed = Editor::default();
    let a = ed.add_shape(ShapeKind::Rectangle).unwrap();
    let len = ed.history_len();

    ed.pointer_down(150.0, 150.0, Modifiers::NONE);
    for step in 1..=10 {
        ed.pointer_move(150.0 + f64::from(step) * 5.0, 150.0, Modifiers::NONE);
    }
    assert_eq!(ed.history_len(), len);
    assert_eq!(ed.pointer_up(200.0, 150.0, Modifiers::NONE), Outcome::Commit);

    assert_eq!(ed.history_len(), len + 1);
    assert_eq!(geom(&ed, a).x, 150.0);
}

#[test]
fn multi_drag_moves_every_selected_root() {
    let mut ed = Editor::default();
    let a = ed
        .add_element(ElementSpec::shape(ShapeKind::Rectangle).at(100.0, 100.0))
        .unwrap();
    let b = ed
        .add_element(ElementSpec::shape(ShapeKind::Circle).at(400.0, 300.0))
        .unwrap();
    let c = ed
        .add_element(ElementSpec::shape(ShapeKind::Star).at(600.0, 50.0))
        .unwrap();

    // Click a, shift-click b.
    ed.pointer_down(150.0, 150.0, Modifiers::NONE);
    ed.pointer_up(150.0, 150.0, Modifiers::NONE);
    ed.pointer_down(450.0, 350.0, Modifiers::SHIFT);
    ed.pointer_up(450.0, 350.0, Modifiers::SHIFT);
    assert_eq!(ed.selection(), &Selection::from_ids([a, b]));

    drag(&mut ed, (450.0, 350.0), (480.0, 330.0));
    assert_eq!(geom(&ed, a), Geom::new(130.0, 80.0, 100.0, 100.0));
    assert_eq!(geom(&ed, b), Geom::new(430.0, 280.0, 100.0, 100.0));
    assert_eq!(geom(&ed, c), Geom::new(600.0, 50.0, 100.0, 100.0));
}

#[test]
fn dragging_an_unselected_element_selects_it_alone() {
    let mut ed = Editor::default();
    let a = ed.add_element(ElementSpec::shape(ShapeKind::Rectangle).at(0.0, 0.0)).unwrap();
    let b = ed.add_element(ElementSpec::shape(ShapeKind::Rectangle).at(300.0, 0.0)).unwrap();
    ed.select(Selection::Single(a));

    drag(&mut ed, (350.0, 50.0), (360.0, 60.0));
    assert_eq!(ed.selection(), &Selection::Single(b));
    assert_eq!(geom(&ed, a).x, 0.0);
    assert_eq!(geom(&ed, b).x, 310.0);
}

// ─── Guides ──────────────────────────────────────────────────────────────

fn guide_setup(config: EditorConfig) -> (Editor, ElementId) {
    let mut ed = Editor::new(config);
    ed.add_element(ElementSpec::shape(ShapeKind::Rectangle).at(150.0, 300.0))
        .unwrap();
    let moving = ed
        .add_element(ElementSpec::shape(ShapeKind::Rectangle).at(300.0, 20.0).sized(50.0, 50.0))
        .unwrap();
    (ed, moving)
}

#[test]
fn guide_appears_while_left_edges_align() {
    init_logs();
    let (mut ed, moving) = guide_setup(EditorConfig::default());

    ed.pointer_down(320.0, 40.0, Modifiers::NONE);
    ed.pointer_move(172.0, 40.0, Modifiers::NONE);
    assert_eq!(geom(&ed, moving).x, 152.0);
    assert!(ed.guides().contains(&Guideline {
        axis: Axis::Vertical,
        position: 150.0
    }));
    assert_eq!(ed.overlay().guides, ed.guides().to_vec());

    ed.pointer_move(240.0, 40.0, Modifiers::NONE);
    assert!(ed.guides().is_empty());

    ed.pointer_move(172.0, 40.0, Modifiers::NONE);
    ed.pointer_up(172.0, 40.0, Modifiers::NONE);
    assert!(ed.guides().is_empty());
    // Snapping is off by default: the element stays where it was dropped.
    assert_eq!(geom(&ed, moving).x, 152.0);
}

#[test]
fn snapping_lands_exactly_on_the_guide() {
    let config = EditorConfig {
        snap_to_guides: true,
        ..EditorConfig::default()
    };
    let (mut ed, moving) = guide_setup(config);

    drag(&mut ed, (320.0, 40.0), (172.0, 40.0));
    assert_eq!(geom(&ed, moving).x, 150.0);
}

#[test]
fn clamp_on_drop_when_bounded() {
    let config = EditorConfig {
        clamp_to_artboard: true,
        ..EditorConfig::default()
    };
    let mut ed = Editor::new(config);
    let a = ed.add_shape(ShapeKind::Rectangle).unwrap();

    ed.pointer_down(150.0, 150.0, Modifiers::NONE);
    ed.pointer_move(50.0, 50.0, Modifiers::NONE);
    // Live position may leave the artboard.
    assert_eq!(geom(&ed, a).x, 0.0);
    ed.pointer_move(-50.0, 50.0, Modifiers::NONE);
    assert_eq!(geom(&ed, a).x, -100.0);
    ed.pointer_up(-50.0, 50.0, Modifiers::NONE);
    assert_eq!(geom(&ed, a), Geom::new(0.0, 0.0, 100.0, 100.0));
}

// ─── Aborts ──────────────────────────────────────────────────────────────

#[test]
fn deleting_the_dragged_element_ends_the_gesture() {
    init_logs();
    let mut ed = Editor::default();
    let a = ed.add_shape(ShapeKind::Rectangle).unwrap();
    let b = ed.add_element(ElementSpec::text("stays").at(500.0, 400.0)).unwrap();
    ed.select(Selection::Single(a));

    ed.pointer_down(150.0, 150.0, Modifiers::NONE);
    ed.pointer_move(200.0, 150.0, Modifiers::NONE);
    assert!(ed.delete(a));
    assert_eq!(ed.gesture_name(), "idle");
    let len = ed.history_len();
    let snapshot = ed.document().clone();

    assert_eq!(ed.pointer_move(260.0, 150.0, Modifiers::NONE), Outcome::Unchanged);
    assert_eq!(ed.pointer_up(260.0, 150.0, Modifiers::NONE), Outcome::Unchanged);
    assert_eq!(ed.history_len(), len);
    assert_eq!(ed.document(), &snapshot);
    assert!(ed.document().contains(b));

    // The deleted element comes back where it was before the drag.
    assert!(ed.undo());
    assert_eq!(geom(&ed, a), Geom::new(100.0, 100.0, 100.0, 100.0));
}

#[test]
fn deleting_one_of_several_dragged_elements_restores_the_rest() {
    let mut ed = Editor::default();
    let a = ed.add_shape(ShapeKind::Rectangle).unwrap();
    let b = ed
        .add_element(ElementSpec::shape(ShapeKind::Rectangle).at(400.0, 100.0))
        .unwrap();
    ed.select(Selection::from_ids([a, b]));

    ed.pointer_down(150.0, 150.0, Modifiers::NONE);
    ed.pointer_move(250.0, 150.0, Modifiers::NONE);
    assert_eq!(geom(&ed, b).x, 500.0);
    assert!(ed.delete(a));
    assert_eq!(geom(&ed, b).x, 400.0);
    ed.pointer_up(250.0, 150.0, Modifiers::NONE);
    assert_eq!(geom(&ed, b).x, 400.0);

    assert!(ed.undo());
    assert_eq!(geom(&ed, a).x, 100.0);
    assert_eq!(geom(&ed, b).x, 400.0);
    assert!(ed.redo());
    assert!(!ed.document().contains(a));
    assert_eq!(geom(&ed, b).x, 400.0);
}

#[test]
fn deleting_during_resize_keeps_the_start_size() {
    let mut ed = Editor::default();
    let other = ed
        .add_element(ElementSpec::shape(ShapeKind::Circle).at(500.0, 400.0))
        .unwrap();
    let a = ed.add_shape(ShapeKind::Rectangle).unwrap();

    // South-east grip of (100, 100, 100 × 100).
    ed.pointer_down(200.0, 200.0, Modifiers::NONE);
    ed.pointer_move(250.0, 260.0, Modifiers::NONE);
    assert_eq!(ed.gesture_name(), "resizing");
    assert_eq!(geom(&ed, a), Geom::new(100.0, 100.0, 150.0, 160.0));

    assert!(ed.delete(other));
    assert_eq!(geom(&ed, a), Geom::new(100.0, 100.0, 100.0, 100.0));
    assert_eq!(ed.pointer_up(250.0, 260.0, Modifiers::NONE), Outcome::Unchanged);

    assert!(ed.undo());
    assert!(ed.redo());
    assert_eq!(geom(&ed, a), Geom::new(100.0, 100.0, 100.0, 100.0));
    assert!(!ed.document().contains(other));
}

#[test]
fn deleting_during_rotate_keeps_the_start_angle() {
    let mut ed = Editor::default();
    let other = ed
        .add_element(ElementSpec::shape(ShapeKind::Circle).at(500.0, 400.0))
        .unwrap();
    let s = ed.add_shape(ShapeKind::Pentagon).unwrap();

    ed.pointer_down(150.0, 70.0, Modifiers::NONE);
    ed.pointer_move(50.0, 50.0, Modifiers::NONE);
    assert_eq!(ed.gesture_name(), "rotating");
    assert!(ed.document().get(s).unwrap().rotation > 0.0);

    assert!(ed.delete(other));
    assert_eq!(ed.document().get(s).unwrap().rotation, 0.0);
    ed.pointer_up(50.0, 50.0, Modifiers::NONE);

    assert!(ed.undo());
    assert!(ed.redo());
    assert_eq!(ed.document().get(s).unwrap().rotation, 0.0);
}

#[test]
fn escape_cancels_and_restores() {
    let mut ed = Editor::default();
    let a = ed.add_shape(ShapeKind::Rectangle).unwrap();
    let len = ed.history_len();

    ed.pointer_down(150.0, 150.0, Modifiers::NONE);
    ed.pointer_move(300.0, 300.0, Modifiers::NONE);
    assert!(ed.key("Escape", Modifiers::NONE));
    ed.pointer_up(300.0, 300.0, Modifiers::NONE);

    assert_eq!(geom(&ed, a), Geom::new(100.0, 100.0, 100.0, 100.0));
    assert!(ed.selection().is_empty());
    assert_eq!(ed.history_len(), len);
}

// ─── Resize / rotate ─────────────────────────────────────────────────────

#[test]
fn text_resize_scales_the_font() {
    let mut ed = Editor::default();
    let t = ed.add_text("Wedding").unwrap();

    // South-east grip of (100, 100, 200 × 40).
    assert_eq!(drag(&mut ed, (300.0, 140.0), (400.0, 160.0)), Outcome::Commit);
    let el = ed.document().get(t).unwrap();
    assert_eq!(el.geom(), Geom::new(100.0, 100.0, 300.0, 60.0));
    assert_eq!(el.font_size(), Some(36.0));
}

#[test]
fn image_resize_is_free_and_floored() {
    let mut ed = Editor::default();
    let img = ed.add_image("photo.jpg").unwrap();

    // East grip of (100, 100, 200 × 150).
    drag(&mut ed, (300.0, 175.0), (350.0, 200.0));
    assert_eq!(geom(&ed, img), Geom::new(100.0, 100.0, 250.0, 150.0));

    // West grip dragged far past the east edge.
    drag(&mut ed, (100.0, 175.0), (900.0, 175.0));
    assert_eq!(geom(&ed, img), Geom::new(330.0, 100.0, 20.0, 150.0));
}

#[test]
fn group_resize_scales_children() {
    let mut ed = Editor::default();
    let a = ed
        .add_element(ElementSpec::shape(ShapeKind::Rectangle).at(100.0, 100.0).sized(100.0, 100.0))
        .unwrap();
    let b = ed
        .add_element(ElementSpec::shape(ShapeKind::Rectangle).at(200.0, 200.0).sized(100.0, 100.0))
        .unwrap();
    ed.select(Selection::from_ids([a, b]));
    let g = ed.group_selection().unwrap();
    assert_eq!(geom(&ed, g), Geom::new(100.0, 100.0, 200.0, 200.0));

    // South-east grip, doubled.
    drag(&mut ed, (300.0, 300.0), (500.0, 500.0));
    assert_eq!(geom(&ed, g), Geom::new(100.0, 100.0, 400.0, 400.0));
    assert_eq!(geom(&ed, b), Geom::new(200.0, 200.0, 200.0, 200.0));
    assert_eq!(ed.document().absolute_geom(b), Some(Geom::new(300.0, 300.0, 200.0, 200.0)));
}

#[test]
fn rotation_is_normalised() {
    let mut ed = Editor::default();
    let s = ed.add_shape(ShapeKind::Pentagon).unwrap();

    // Rotate grip sits 30 above the top edge centre (150, 100).
    assert_eq!(drag(&mut ed, (150.0, 70.0), (50.0, 50.0)), Outcome::Commit);
    let r = ed.document().get(s).unwrap().rotation;
    assert!((r - 315.0).abs() < 1e-9, "{r}");
}

// ─── Marquee ─────────────────────────────────────────────────────────────

#[test]
fn marquee_and_shift_marquee() {
    let mut ed = Editor::default();
    let a = ed.add_element(ElementSpec::shape(ShapeKind::Rectangle).at(0.0, 0.0)).unwrap();
    let b = ed.add_element(ElementSpec::shape(ShapeKind::Rectangle).at(200.0, 0.0)).unwrap();
    let c = ed.add_element(ElementSpec::shape(ShapeKind::Rectangle).at(0.0, 300.0)).unwrap();

    drag(&mut ed, (150.0, 150.0), (350.0, 50.0));
    assert_eq!(ed.selection(), &Selection::Single(b));

    ed.pointer_down(150.0, 250.0, Modifiers::SHIFT);
    ed.pointer_move(50.0, 350.0, Modifiers::SHIFT);
    assert_eq!(ed.marquee(), Some(Geom::new(50.0, 250.0, 100.0, 100.0)));
    ed.pointer_up(50.0, 350.0, Modifiers::SHIFT);
    assert_eq!(ed.selection(), &Selection::from_ids([b, c]));
    assert!(!ed.selection().contains(a));
}

// ─── Grouping ────────────────────────────────────────────────────────────

#[test]
fn group_drag_then_ungroup() {
    init_logs();
    let mut ed = Editor::default();
    let img = ed.add_image("card.png").unwrap();
    let txt = ed.add_text("Dear guest").unwrap();
    ed.select_all();
    let g = ed.group_selection().unwrap();
    assert_eq!(ed.selection(), &Selection::Single(g));
    assert_eq!(geom(&ed, g), Geom::new(100.0, 100.0, 200.0, 150.0));

    // A click on a grouped child picks the group.
    ed.select(Selection::None);
    ed.pointer_down(150.0, 200.0, Modifiers::NONE);
    ed.pointer_up(150.0, 200.0, Modifiers::NONE);
    assert_eq!(ed.selection(), &Selection::Single(g));

    drag(&mut ed, (150.0, 200.0), (160.0, 210.0));
    assert_eq!(geom(&ed, g), Geom::new(110.0, 110.0, 200.0, 150.0));
    assert_eq!(geom(&ed, img), Geom::new(0.0, 0.0, 200.0, 150.0));

    let children = ed.ungroup_selection().unwrap();
    assert_eq!(children, vec![img, txt]);
    assert_eq!(ed.selection(), &Selection::from_ids([img, txt]));
    assert_eq!(geom(&ed, img), Geom::new(110.0, 110.0, 200.0, 150.0));
    assert_eq!(geom(&ed, txt), Geom::new(110.0, 110.0, 200.0, 40.0));
    assert!(!ed.document().contains(g));
}

#[test]
fn grouping_needs_two_elements() {
    let mut ed = Editor::default();
    ed.add_image("one.png").unwrap();
    let len = ed.history_len();
    let err = ed.group_selection().unwrap_err();
    assert_eq!(err.code(), "E_CONSTRAINT");
    assert_eq!(ed.history_len(), len);
    assert_eq!(ed.ungroup_selection().unwrap_err().code(), "E_CONSTRAINT");
}

// ─── Commands and shortcuts ──────────────────────────────────────────────

#[test]
fn image_load_fits_and_ignores_stale_ids() {
    init_logs();
    let mut ed = Editor::default();
    let img = ed.add_image("big.jpg").unwrap();
    let len = ed.history_len();

    assert!(ed.image_loaded(img, 1200.0, 800.0));
    assert_eq!(geom(&ed, img), Geom::new(100.0, 100.0, 300.0, 200.0));
    assert_eq!(ed.history_len(), len + 1);
    assert!(!ed.image_loaded(img, 1200.0, 800.0));

    ed.delete(img);
    let len = ed.history_len();
    assert!(!ed.image_loaded(img, 640.0, 480.0));
    assert_eq!(ed.history_len(), len);
}

#[test]
fn keyboard_shortcuts_drive_commands() {
    let mut ed = Editor::default();
    let a = ed.add_shape(ShapeKind::Rectangle).unwrap();
    let b = ed
        .add_element(ElementSpec::shape(ShapeKind::Circle).at(300.0, 300.0))
        .unwrap();

    assert!(ed.key("a", Modifiers::CTRL));
    assert_eq!(ed.selection(), &Selection::from_ids([a, b]));

    assert!(ed.key("g", Modifiers::CTRL));
    let g = ed.selection().single().unwrap();
    assert!(ed.document().get(g).unwrap().is_group());

    assert!(ed.key("G", Modifiers::new(true, false, false, true)));
    assert_eq!(ed.selection(), &Selection::from_ids([a, b]));

    assert!(ed.key("ArrowRight", Modifiers::SHIFT));
    assert_eq!(geom(&ed, a).x, 110.0);
    assert!(ed.key("ArrowUp", Modifiers::NONE));
    assert_eq!(geom(&ed, b).y, 299.0);

    assert!(ed.key("Delete", Modifiers::NONE));
    assert!(ed.document().is_empty());
    assert!(ed.key("z", Modifiers::CTRL));
    assert_eq!(ed.document().len(), 2);
    assert!(ed.key("y", Modifiers::CTRL));
    assert!(ed.document().is_empty());
    assert!(!ed.key("q", Modifiers::NONE));
}

#[test]
fn duplicate_offsets_and_selects_copies() {
    let mut ed = Editor::default();
    let a = ed.add_shape(ShapeKind::Triangle).unwrap();
    assert!(ed.key("d", Modifiers::CTRL));

    let copy = ed.selection().single().unwrap();
    assert_ne!(copy, a);
    assert_eq!(geom(&ed, copy), Geom::new(120.0, 120.0, 100.0, 100.0));
    assert!(ed.document().get(copy).unwrap().z_index > ed.document().get(a).unwrap().z_index);
}

#[test]
fn layer_shortcuts_reorder_selection() {
    let mut ed = Editor::default();
    let a = ed.add_shape(ShapeKind::Rectangle).unwrap();
    let b = ed.add_shape(ShapeKind::Rectangle).unwrap();
    let c = ed.add_shape(ShapeKind::Rectangle).unwrap();
    let order = |ed: &Editor| -> Vec<ElementId> { ed.document().paint_order().iter().map(|e| e.id).collect() };

    ed.select(Selection::Single(a));
    assert!(ed.key("]", Modifiers::CTRL));
    assert_eq!(order(&ed), vec![b, a, c]);
    assert!(ed.key("}", Modifiers::new(true, true, false, false)));
    assert_eq!(order(&ed), vec![b, c, a]);
    assert!(!ed.key("]", Modifiers::CTRL));

    ed.select(Selection::from_ids([c, a]));
    assert!(ed.key("[", Modifiers::new(true, true, false, false)));
    assert_eq!(order(&ed), vec![c, a, b]);
}

#[test]
fn artboard_resize_rescales_and_undoes() {
    let mut ed = Editor::default();
    let a = ed.add_shape(ShapeKind::Ellipse).unwrap();
    ed.resize_artboard(400, 300).unwrap();
    assert_eq!(geom(&ed, a), Geom::new(50.0, 50.0, 50.0, 50.0));
    ed.undo();
    assert_eq!(geom(&ed, a), Geom::new(100.0, 100.0, 100.0, 100.0));
    assert_eq!(ed.document().artboard.width, 800);
}
