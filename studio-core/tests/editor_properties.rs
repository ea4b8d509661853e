//! Editor Property Tests
//!
//! Exercises the editor through its public API:
//! - Undo/redo round trips over random edit sequences, including drags,
//!   patches and whole-document replacement
//! - At most one history entry per action
//! - Move reversibility and clamping
//! - Duplicate and reorder invariants

use proptest::prelude::*;
use studio_core::{
    CanvasInteraction, Document, Editor, Element, ElementId, ElementPatch, ElementType,
    ReorderDirection, Transform,
};

#[derive(Debug, Clone)]
enum Op {
    Add(ElementType),
    MoveFirst(i16, i16),
    DeleteFirst,
    DuplicateSelected,
    ToggleLockedFirst,
    ReorderFirst(bool),
    ResizeFirst(u16, u16),
    RotateFirst(i16),
    OpacityFirst(u8),
    PatchFirst(u16),
    ReplaceAll(u8),
    DragFirst(i16, i16),
}

fn arb_element_type() -> impl Strategy<Value = ElementType> {
    prop_oneof![
        Just(ElementType::Text),
        Just(ElementType::Rectangle),
        Just(ElementType::Circle),
        Just(ElementType::Image),
        Just(ElementType::Background),
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_element_type().prop_map(Op::Add),
        (-200i16..200, -200i16..200).prop_map(|(dx, dy)| Op::MoveFirst(dx, dy)),
        Just(Op::DeleteFirst),
        Just(Op::DuplicateSelected),
        Just(Op::ToggleLockedFirst),
        any::<bool>().prop_map(Op::ReorderFirst),
        (1u16..400, 1u16..400).prop_map(|(w, h)| Op::ResizeFirst(w, h)),
        (-360i16..360).prop_map(Op::RotateFirst),
        (0u8..=100).prop_map(Op::OpacityFirst),
        (0u16..500).prop_map(Op::PatchFirst),
        (0u8..4).prop_map(Op::ReplaceAll),
        (-100i16..100, -100i16..100).prop_map(|(dx, dy)| Op::DragFirst(dx, dy)),
    ]
}

fn first_id(editor: &Editor) -> Option<ElementId> {
    editor.document().elements().first().map(|e| e.id.clone())
}

fn apply(editor: &mut Editor, op: &Op) {
    match op {
        Op::Add(t) => {
            editor.add_element(*t);
        }
        Op::MoveFirst(dx, dy) => {
            if let Some(id) = first_id(editor) {
                editor.move_by(&id, f32::from(*dx), f32::from(*dy));
            }
        }
        Op::DeleteFirst => {
            if let Some(id) = first_id(editor) {
                editor.delete(&id);
            }
        }
        Op::DuplicateSelected => {
            editor.duplicate_selected();
        }
        Op::ToggleLockedFirst => {
            if let Some(id) = first_id(editor) {
                editor.toggle_locked(&id);
            }
        }
        Op::ReorderFirst(up) => {
            if let Some(id) = first_id(editor) {
                let direction = if *up {
                    ReorderDirection::Up
                } else {
                    ReorderDirection::Down
                };
                editor.reorder(&id, direction);
            }
        }
        Op::ResizeFirst(w, h) => {
            if let Some(id) = first_id(editor) {
                editor.resize(&id, f32::from(*w), f32::from(*h));
            }
        }
        Op::RotateFirst(degrees) => {
            if let Some(id) = first_id(editor) {
                editor.rotate(&id, f32::from(*degrees));
            }
        }
        Op::OpacityFirst(percent) => {
            if let Some(id) = first_id(editor) {
                editor.set_opacity(&id, f32::from(*percent) / 100.0);
            }
        }
        Op::PatchFirst(v) => {
            if let Some(id) = first_id(editor) {
                let patch = ElementPatch {
                    x: Some(f32::from(*v)),
                    content: Some(format!("Text {v}")),
                    fill: Some("#123456".to_string()),
                    ..ElementPatch::default()
                };
                editor.update_element(&id, &patch);
            }
        }
        Op::ReplaceAll(n) => {
            let elements = (0..*n)
                .map(|i| placed(&format!("r{i}"), f32::from(i) * 50.0, 0.0, i32::from(i)))
                .collect();
            editor
                .replace_all(elements)
                .expect("generated elements are valid");
        }
        Op::DragFirst(dx, dy) => {
            let Some(t) = editor.document().elements().first().map(|e| e.transform) else {
                return;
            };
            let (cx, cy) = (t.x + t.width / 2.0, t.y + t.height / 2.0);
            let mut canvas = CanvasInteraction::new();
            if canvas.pointer_down(editor, cx, cy).is_some() {
                canvas.pointer_move(editor, cx + f32::from(*dx) / 2.0, cy + f32::from(*dy) / 2.0);
                canvas.pointer_up(editor, cx + f32::from(*dx), cy + f32::from(*dy));
            }
        }
    }
}

fn placed(id: &str, x: f32, y: f32, z: i32) -> Element {
    Element::new(ElementType::Rectangle.default_kind())
        .with_id(id)
        .with_transform(Transform {
            x,
            y,
            width: 40.0,
            height: 40.0,
            rotation: 0.0,
            z_index: z,
        })
}

proptest! {
    #[test]
    fn prop_undo_then_redo_restores_document(
        ops in prop::collection::vec(arb_op(), 0..20)
    ) {
        let mut editor = Editor::default();
        for op in &ops {
            apply(&mut editor, op);
        }

        let before = editor.document().clone();
        if editor.undo() {
            prop_assert!(editor.redo());
            prop_assert_eq!(editor.document(), &before);
        } else {
            prop_assert_eq!(editor.history().len(), 1);
            prop_assert_eq!(editor.document(), &before);
        }
    }

    #[test]
    fn prop_each_action_commits_at_most_once(
        ops in prop::collection::vec(arb_op(), 0..20)
    ) {
        let mut editor = Editor::default();
        for op in &ops {
            let before = editor.document().clone();
            let entries = editor.history().len();
            apply(&mut editor, op);

            let added = editor.history().len() - entries;
            prop_assert!(added <= 1, "{:?} added {} entries", op, added);
            if added == 0 {
                prop_assert_eq!(editor.document(), &before);
            }
        }
    }

    #[test]
    fn prop_undo_to_baseline_is_idempotent(
        ops in prop::collection::vec(arb_op(), 0..12)
    ) {
        let mut editor = Editor::default();
        for op in &ops {
            apply(&mut editor, op);
        }
        while editor.undo() {}

        prop_assert!(editor.document().is_empty());
        prop_assert!(!editor.undo());
        prop_assert!(editor.document().is_empty());
    }

    #[test]
    fn prop_redo_at_newest_is_idempotent(
        ops in prop::collection::vec(arb_op(), 0..12)
    ) {
        let mut editor = Editor::default();
        for op in &ops {
            apply(&mut editor, op);
        }
        let newest = editor.document().clone();
        let entries = editor.history().len();

        prop_assert!(!editor.redo());
        prop_assert!(!editor.redo());
        prop_assert_eq!(editor.document(), &newest);
        prop_assert_eq!(editor.history().len(), entries);
    }

    #[test]
    fn prop_move_is_reversible_unless_clamped(
        x in 0i16..500, y in 0i16..500,
        dx in -300i16..300, dy in -300i16..300,
    ) {
        let (x, y, dx, dy) = (f32::from(x), f32::from(y), f32::from(dx), f32::from(dy));
        let mut editor = Editor::with_document(Document::with_elements(
            800.0,
            600.0,
            vec![placed("e", x, y, 0)],
        ));
        let id = ElementId::from("e");

        editor.move_by(&id, dx, dy);
        let moved = editor.get_element(&id).expect("element").transform;
        prop_assert!(moved.x >= 0.0 && moved.y >= 0.0);

        editor.move_by(&id, -dx, -dy);
        let back = editor.get_element(&id).expect("element").transform;
        if x + dx >= 0.0 && y + dy >= 0.0 {
            prop_assert_eq!((back.x, back.y), (x, y));
        }
    }

    #[test]
    fn prop_duplicate_is_offset_copy(
        t in arb_element_type(),
    ) {
        let mut editor = Editor::default();
        let original_id = editor.add_element(t);
        let original = editor.get_element(&original_id).cloned().expect("original");

        let copy_id = editor.duplicate(&original_id).expect("copy");
        prop_assert_ne!(&copy_id, &original_id);

        let copy = editor.get_element(&copy_id).expect("copy");
        prop_assert_eq!(&copy.kind, &original.kind);
        prop_assert_eq!(copy.transform.x, original.transform.x + 20.0);
        prop_assert_eq!(copy.transform.y, original.transform.y + 20.0);
        prop_assert_eq!(editor.get_element(&original_id), Some(&original));
    }
}

#[test]
fn reorder_up_then_down_restores_order() {
    let mut editor = Editor::with_document(Document::with_elements(
        800.0,
        600.0,
        vec![placed("a", 0.0, 0.0, 0), placed("b", 10.0, 10.0, 1)],
    ));
    let order = |editor: &Editor| -> Vec<String> {
        editor
            .list_elements()
            .into_iter()
            .map(|e| e.id.to_string())
            .collect()
    };
    assert_eq!(order(&editor), ["a", "b"]);

    assert!(editor.reorder(&"a".into(), ReorderDirection::Up));
    assert_eq!(order(&editor), ["b", "a"]);
    assert!(editor.reorder(&"a".into(), ReorderDirection::Down));
    assert_eq!(order(&editor), ["a", "b"]);
}

#[test]
fn move_clamps_at_canvas_origin() {
    let mut editor = Editor::with_document(Document::with_elements(
        800.0,
        600.0,
        vec![placed("t1", 10.0, 10.0, 0)],
    ));
    editor.move_by(&"t1".into(), -50.0, -50.0);
    let t = editor.get_element(&"t1".into()).expect("t1").transform;
    assert_eq!((t.x, t.y), (0.0, 0.0));
}

#[test]
fn replace_all_with_incomplete_element_is_rejected_whole() {
    let mut editor = Editor::with_document(Document::with_elements(
        800.0,
        600.0,
        vec![placed("keep", 10.0, 10.0, 0)],
    ));
    let before = editor.document().clone();

    let payload = serde_json::json!([
        {"id": "n1", "type": "text", "content": "Hi", "x": 1, "y": 1, "width": 10, "height": 10},
        {"id": "n2", "type": "circle", "y": 1, "width": 10, "height": 10}
    ]);
    assert!(editor.replace_all_json(&payload).is_err());
    assert_eq!(editor.document(), &before);
    assert!(editor.last_error().is_some());
}
