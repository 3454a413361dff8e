use egui::{Color32, Pos2, Rect, pos2, vec2};
use sketch_pad::input::Gesture;
use sketch_pad::transform::{MAX_SCALE, MIN_SCALE};
use sketch_pad::{CanvasHost, CanvasTool, DrawingStore, StrokeKind, ToolKind, ToolState};

fn draw_line(canvas: &mut CanvasHost, from: Pos2, to: Pos2) {
    canvas.begin_stroke(from);
    canvas.extend_stroke(pos2((from.x + to.x) / 2.0, (from.y + to.y) / 2.0));
    canvas.extend_stroke(to);
    canvas.end_stroke();
}

#[test]
fn test_draw_undo_redo_clear() {
    let mut canvas = CanvasHost::new();
    draw_line(&mut canvas, pos2(0.0, 0.0), pos2(50.0, 50.0));
    draw_line(&mut canvas, pos2(10.0, 80.0), pos2(90.0, 80.0));
    assert_eq!(canvas.document().strokes().len(), 2);

    canvas.undo();
    assert_eq!(canvas.document().strokes().len(), 1);
    assert!(canvas.can_redo());

    canvas.redo();
    assert_eq!(canvas.document().strokes().len(), 2);

    canvas.clear();
    assert!(canvas.document().is_empty());

    // Clearing is undoable
    canvas.undo();
    assert_eq!(canvas.document().strokes().len(), 2);
}

#[test]
fn test_new_stroke_drops_redo_history() {
    let mut canvas = CanvasHost::new();
    draw_line(&mut canvas, pos2(0.0, 0.0), pos2(10.0, 10.0));
    canvas.undo();
    assert!(canvas.can_redo());

    draw_line(&mut canvas, pos2(5.0, 5.0), pos2(30.0, 5.0));
    assert!(!canvas.can_redo());
    assert_eq!(canvas.document().strokes().len(), 1);
}

#[test]
fn test_tool_selection_shapes_new_strokes() {
    let mut tools = ToolState::default();
    let mut canvas = CanvasHost::new();

    tools.select_kind(ToolKind::Marker);
    tools.select_color(Color32::BLUE);
    canvas.set_tool(tools.set_width(12.0));
    draw_line(&mut canvas, pos2(0.0, 0.0), pos2(40.0, 0.0));

    canvas.set_tool(tools.select_kind(ToolKind::Eraser));
    assert_eq!(canvas.tool(), CanvasTool::Eraser);
    draw_line(&mut canvas, pos2(20.0, -10.0), pos2(20.0, 10.0));

    let strokes = canvas.document().strokes();
    assert_eq!(strokes[0].color(), Color32::BLUE);
    assert_eq!(strokes[0].width(), 12.0);
    assert!(!strokes[0].is_eraser());
    assert!(strokes[1].is_eraser());
    assert_eq!(strokes[1].kind(), StrokeKind::Erase);

    // Erasing leaves the drawing bounds alone
    assert_eq!(canvas.document().bounds(), strokes[0].bounds());
}

#[test]
fn test_gestures_respect_scale_limits() {
    let mut canvas = CanvasHost::new();

    canvas.apply_gesture(Gesture::Pinch { ratio: 2.0 });
    canvas.apply_gesture(Gesture::Pinch { ratio: 2.0 });
    assert_eq!(canvas.transform().scale(), MAX_SCALE);

    for _ in 0..10 {
        canvas.apply_gesture(Gesture::Pinch { ratio: 0.5 });
    }
    assert_eq!(canvas.transform().scale(), MIN_SCALE);

    canvas.apply_gesture(Gesture::Rotate { angle: 0.3 });
    canvas.apply_gesture(Gesture::Pan { delta: vec2(15.0, -5.0) });
    assert_eq!(canvas.transform().rotation(), 0.3);
    assert_eq!(canvas.transform().translation(), vec2(15.0, -5.0));

    canvas.reset_view();
    assert!(canvas.transform().is_identity());
}

#[test]
fn test_transformed_input_maps_back_to_canvas() {
    let mut canvas = CanvasHost::new();
    canvas.apply_gesture(Gesture::Pinch { ratio: 1.5 });
    canvas.apply_gesture(Gesture::Rotate { angle: std::f32::consts::FRAC_PI_4 });
    canvas.apply_gesture(Gesture::Pan { delta: vec2(40.0, 10.0) });

    let rect = Rect::from_min_size(pos2(0.0, 60.0), vec2(800.0, 600.0));
    let point = pos2(123.0, 321.0);
    let screen = canvas.transform().canvas_to_screen(point, rect);
    let back = canvas.transform().screen_to_canvas(screen, rect);
    assert!((back - point).length() < 1e-3);
}

#[test]
fn test_save_then_reload_into_fresh_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = DrawingStore::open(dir.path());

    let mut canvas = CanvasHost::new();
    draw_line(&mut canvas, pos2(0.0, 0.0), pos2(100.0, 60.0));
    let record = store.save(canvas.document(), "Sketch A").unwrap();

    let mut other = CanvasHost::new();
    draw_line(&mut other, pos2(5.0, 5.0), pos2(6.0, 6.0));
    other.replace_document(store.load(&record).unwrap());

    assert_eq!(other.document(), canvas.document());
    // Loading starts a fresh history
    assert!(!other.can_undo());
    assert!(!other.can_redo());
}
