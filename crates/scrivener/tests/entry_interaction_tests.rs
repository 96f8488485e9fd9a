//! Integration tests driving an entry through a canvas, the way a host does.

use scrivener::Object;
use scrivener::platform::{Clipboard, MemoryClipboard};
use scrivener::render::{MonospaceMeasurer, Point, Size, TextMeasurer, TextStyle};
use scrivener::widget::events::{
    Key, KeyPressEvent, KeyReleaseEvent, KeyboardModifiers, MouseButton, MouseDoubleClickEvent,
    MouseMoveEvent, MousePressEvent, MouseReleaseEvent,
};
use scrivener::widget::widgets::{CursorPosition, Entry};
use scrivener::widget::{Canvas, WidgetContext, WidgetEvent, shared};

const TEXT_SIZE: f32 = 14.0;
const PADDING: f32 = 4.0;

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn canvas_with(entry: Entry) -> Canvas {
    let mut canvas = Canvas::new();
    canvas.resize(Size::new(320.0, 120.0));
    canvas.set_content(Box::new(entry));
    canvas
}

fn entry(canvas: &Canvas) -> &Entry {
    canvas.content_as::<Entry>().expect("canvas content is an entry")
}

fn entry_mut(canvas: &mut Canvas) -> &mut Entry {
    canvas.content_as_mut::<Entry>().expect("canvas content is an entry")
}

/// The point just after `before` on `row`, vertically centred in the row.
fn click_position(before: &str, row: usize) -> Point {
    let measurer = MonospaceMeasurer::default();
    let x = measurer.measure(before, TEXT_SIZE, TextStyle::REGULAR).width + PADDING;
    let row_height = measurer.measure("M", TEXT_SIZE, TextStyle::REGULAR).height;
    let y = PADDING + row as f32 * row_height + row_height / 2.0;
    Point::new(x, y)
}

fn mouse_down(canvas: &mut Canvas, at: Point, button: MouseButton) {
    canvas.dispatch(WidgetEvent::MousePress(MousePressEvent::new(
        button,
        at,
        KeyboardModifiers::NONE,
    )));
}

fn mouse_up(canvas: &mut Canvas, at: Point, button: MouseButton) {
    canvas.dispatch(WidgetEvent::MouseRelease(MouseReleaseEvent::new(
        button,
        at,
        KeyboardModifiers::NONE,
    )));
}

fn drag(canvas: &mut Canvas, to: Point) {
    canvas.dispatch(WidgetEvent::MouseMove(MouseMoveEvent::new(to, KeyboardModifiers::NONE)));
}

fn tap(canvas: &mut Canvas, at: Point) {
    mouse_down(canvas, at, MouseButton::Left);
    mouse_up(canvas, at, MouseButton::Left);
}

fn double_tap(canvas: &mut Canvas, at: Point) {
    tap(canvas, at);
    canvas.dispatch(WidgetEvent::DoubleClick(MouseDoubleClickEvent::new(
        MouseButton::Left,
        at,
        KeyboardModifiers::NONE,
    )));
}

fn key_down(canvas: &mut Canvas, key: Key) -> bool {
    canvas.dispatch(WidgetEvent::KeyPress(KeyPressEvent::key(key, KeyboardModifiers::NONE)))
}

fn key_up(canvas: &mut Canvas, key: Key) -> bool {
    canvas.dispatch(WidgetEvent::KeyRelease(KeyReleaseEvent::new(key, KeyboardModifiers::NONE)))
}

fn type_key(canvas: &mut Canvas, key: Key) {
    key_down(canvas, key);
    key_up(canvas, key);
}

#[test]
fn test_tap_focuses_entry() {
    setup();
    let ctx = WidgetContext::default();
    let mut canvas = canvas_with(Entry::new(&ctx).with_text("Hello"));
    let id = entry(&canvas).object_id();

    tap(&mut canvas, click_position("He", 0));
    assert_eq!(canvas.focused(), Some(id));
    assert_eq!(entry(&canvas).cursor(), CursorPosition::new(0, 2));

    mouse_down(&mut canvas, Point::new(500.0, 500.0), MouseButton::Left);
    assert_eq!(canvas.focused(), None);
}

#[test]
fn test_double_tap_selects_word_or_whitespace() {
    setup();
    let ctx = WidgetContext::default();
    let mut canvas = canvas_with(
        Entry::multi_line(&ctx).with_text("The quick brown fox\njumped    over the lazy dog\n"),
    );

    double_tap(&mut canvas, click_position("The qui", 0));
    assert_eq!(entry(&canvas).selected_text(), "quick");

    // Halfway across the space after "quick" still lands before the space.
    let space = MonospaceMeasurer::default()
        .measure(" ", TEXT_SIZE, TextStyle::REGULAR)
        .width;
    let at = click_position("The quick", 0);
    double_tap(&mut canvas, Point::new(at.x + space / 2.0, at.y));
    assert_eq!(entry(&canvas).selected_text(), " ");

    double_tap(&mut canvas, click_position("jumped  ", 1));
    assert_eq!(entry(&canvas).selected_text(), "    ");
}

#[test]
fn test_double_tap_after_last_row() {
    setup();
    let ctx = WidgetContext::default();
    let mut canvas = canvas_with(Entry::multi_line(&ctx).with_text("A\nB\n"));
    let id = entry(&canvas).object_id();

    let below = Point::new(14.0, 56.0);
    tap(&mut canvas, below);
    assert_eq!(canvas.focused(), Some(id));
    assert_eq!(entry(&canvas).cursor(), CursorPosition::new(2, 0));

    canvas.dispatch(WidgetEvent::DoubleClick(MouseDoubleClickEvent::new(
        MouseButton::Left,
        below,
        KeyboardModifiers::NONE,
    )));
    assert_eq!(entry(&canvas).selected_text(), "");
}

#[test]
fn test_drag_select() {
    setup();
    let ctx = WidgetContext::default();
    let mut canvas = canvas_with(Entry::multi_line(&ctx).with_text(
        "The quick brown fox jumped\nover the lazy dog\nThe quick\nbrown fox\njumped over the lazy dog\n",
    ));

    let mut at = click_position("ove", 1);
    let mut end = click_position("over the laz", 1);
    end.x += 2.0;

    mouse_down(&mut canvas, at, MouseButton::Left);
    assert!(entry(&canvas).is_selecting());
    while at.x < end.x {
        drag(&mut canvas, at);
        at.x += 1.0;
    }
    mouse_up(&mut canvas, at, MouseButton::Left);

    let entry = entry(&canvas);
    assert!(!entry.is_selecting());
    assert_eq!(entry.selected_text(), "r the laz");
    assert_eq!(entry.cursor(), CursorPosition::new(1, 12));
}

#[test]
fn test_drag_continues_outside_the_entry() {
    setup();
    let ctx = WidgetContext::default();
    let mut canvas = canvas_with(Entry::new(&ctx).with_text("abcdef"));

    mouse_down(&mut canvas, click_position("a", 0), MouseButton::Left);
    drag(&mut canvas, Point::new(900.0, 10.0));
    mouse_up(&mut canvas, Point::new(900.0, 10.0), MouseButton::Left);
    assert_eq!(entry(&canvas).selected_text(), "bcdef");
}

#[test]
fn test_click_and_drag_below_text() {
    setup();
    let ctx = WidgetContext::default();
    let mut canvas = canvas_with(Entry::multi_line(&ctx).with_text("A\nB\n"));

    let at = Point::new(14.0, 56.0);
    mouse_down(&mut canvas, at, MouseButton::Left);
    drag(&mut canvas, Point::new(15.0, 56.0));
    mouse_up(&mut canvas, at, MouseButton::Left);

    assert!(!entry(&canvas).is_selecting());
    assert_eq!(entry(&canvas).selection(), None);
}

#[test]
fn test_mouse_up_without_down_is_ignored() {
    setup();
    let ctx = WidgetContext::default();
    let mut canvas = canvas_with(Entry::new(&ctx).with_text("abc"));
    entry_mut(&mut canvas).select_all();

    mouse_up(&mut canvas, click_position("a", 0), MouseButton::Left);
    drag(&mut canvas, click_position("ab", 0));
    assert_eq!(entry(&canvas).selected_text(), "abc");
}

#[test]
fn test_secondary_press_keeps_selection() {
    setup();
    let ctx = WidgetContext::default();
    let mut canvas = canvas_with(Entry::multi_line(&ctx).with_text("Ahnj\nBuki\n"));
    entry_mut(&mut canvas).select_all();
    assert_eq!(entry(&canvas).selected_text(), "Ahnj\nBuki\n");

    let at = click_position("Ah", 0);
    mouse_down(&mut canvas, at, MouseButton::Right);
    mouse_up(&mut canvas, at, MouseButton::Right);
    assert_eq!(entry(&canvas).selected_text(), "Ahnj\nBuki\n");

    mouse_down(&mut canvas, at, MouseButton::Left);
    mouse_up(&mut canvas, at, MouseButton::Left);
    assert_eq!(entry(&canvas).selected_text(), "");
}

#[test]
fn test_shift_arrows_then_erase_selection() {
    setup();
    let ctx = WidgetContext::default();
    let mut canvas = canvas_with(Entry::multi_line(&ctx).with_text("Testing\nTesting\nTesting"));
    let id = entry(&canvas).object_id();
    assert!(canvas.focus(id));
    entry_mut(&mut canvas).set_cursor(CursorPosition::new(1, 2));

    key_down(&mut canvas, Key::ShiftLeft);
    for _ in 0..3 {
        type_key(&mut canvas, Key::ArrowRight);
    }
    assert_eq!(entry(&canvas).selected_text(), "sti");

    assert!(entry_mut(&mut canvas).erase_selection());
    let entry = entry(&canvas);
    assert_eq!(entry.text(), "Testing\nTeng\nTesting");
    assert_eq!(entry.selection(), None);
    assert_eq!(entry.cursor(), CursorPosition::new(1, 2));
}

#[test]
fn test_releasing_shift_stops_extending() {
    setup();
    let ctx = WidgetContext::default();
    let mut canvas = canvas_with(Entry::new(&ctx).with_text("abcdef"));
    let id = entry(&canvas).object_id();
    canvas.focus(id);

    key_down(&mut canvas, Key::ShiftRight);
    type_key(&mut canvas, Key::ArrowRight);
    key_up(&mut canvas, Key::ShiftRight);
    type_key(&mut canvas, Key::ArrowRight);

    assert_eq!(entry(&canvas).selection(), None);
    assert_eq!(entry(&canvas).cursor(), CursorPosition::new(0, 1));
}

#[test]
fn test_shift_press_then_drag_extends_selection() {
    setup();
    let ctx = WidgetContext::default();
    let mut canvas = canvas_with(Entry::multi_line(&ctx).with_text("Testing\nTesting\nTesting"));

    tap(&mut canvas, click_position("Te", 0));
    key_down(&mut canvas, Key::ShiftLeft);
    mouse_down(&mut canvas, click_position("Test", 1), MouseButton::Left);
    assert_eq!(entry(&canvas).selected_text(), "sting\nTest");

    drag(&mut canvas, click_position("Testi", 2));
    mouse_up(&mut canvas, click_position("Testi", 2), MouseButton::Left);
    key_up(&mut canvas, Key::ShiftLeft);

    let entry = entry(&canvas);
    assert_eq!(entry.selected_text(), "sting\nTesting\nTesti");
    assert_eq!(entry.cursor(), CursorPosition::new(2, 5));
    assert!(!entry.is_selecting());
}

#[test]
fn test_paste_from_clipboard() {
    setup();
    let ctx = WidgetContext::default();
    let mut entry = Entry::new(&ctx);
    let mut clipboard = MemoryClipboard::with_content("test");

    assert!(entry.paste_from_clipboard(&mut clipboard));
    assert_eq!(entry.text(), "test");
    assert_eq!(entry.cursor(), CursorPosition::new(0, 4));
}

#[test]
fn test_ctrl_v_uses_context_clipboard() {
    setup();
    let ctx = WidgetContext::default().with_clipboard(shared(MemoryClipboard::with_content("one\ntwo")));
    let mut canvas = canvas_with(Entry::new(&ctx));
    tap(&mut canvas, Point::new(10.0, 10.0));

    canvas.dispatch(WidgetEvent::KeyPress(KeyPressEvent::key(Key::V, KeyboardModifiers::CTRL)));
    assert_eq!(entry(&canvas).text(), "one two");

    canvas.dispatch(WidgetEvent::KeyPress(KeyPressEvent::key(Key::A, KeyboardModifiers::CTRL)));
    canvas.dispatch(WidgetEvent::KeyPress(KeyPressEvent::key(Key::C, KeyboardModifiers::CTRL)));
    assert_eq!(ctx.clipboard.lock().content().ok().as_deref(), Some("one two"));
}

#[test]
fn test_keys_without_focus_reach_canvas_hook() {
    setup();
    let ctx = WidgetContext::default();
    let mut canvas = canvas_with(Entry::new(&ctx));
    let seen = std::sync::Arc::new(parking_lot::Mutex::new(Vec::new()));
    let sink = seen.clone();
    canvas.set_on_key_down(move |event| sink.lock().push(event.key));

    canvas.dispatch(WidgetEvent::KeyPress(KeyPressEvent::typed("x")));
    assert_eq!(entry(&canvas).text(), "");
    assert_eq!(seen.lock().len(), 1);

    tap(&mut canvas, Point::new(10.0, 10.0));
    canvas.dispatch(WidgetEvent::KeyPress(KeyPressEvent::typed("x")));
    assert_eq!(entry(&canvas).text(), "x");
    assert_eq!(seen.lock().len(), 1);

    // The entry ignores Tab, but it holds focus, so the hook stays quiet.
    assert!(!key_down(&mut canvas, Key::Tab));
    assert_eq!(seen.lock().len(), 1);

    mouse_down(&mut canvas, Point::new(500.0, 500.0), MouseButton::Left);
    assert_eq!(canvas.focused(), None);
    assert!(key_down(&mut canvas, Key::Tab));
    assert_eq!(*seen.lock(), vec![Key::Unknown(0), Key::Tab]);
}

#[test]
fn test_edits_request_refresh() {
    setup();
    let ctx = WidgetContext::default();
    let mut canvas = canvas_with(Entry::new(&ctx));
    let id = entry(&canvas).object_id();
    canvas.focus(id);
    canvas.take_refreshes();

    canvas.dispatch(WidgetEvent::KeyPress(KeyPressEvent::typed("a")));
    assert_eq!(canvas.take_refreshes(), vec![id]);
    assert!(canvas.take_refreshes().is_empty());
}

#[test]
fn test_focus_out_ends_drag() {
    setup();
    let ctx = WidgetContext::default();
    let mut canvas = canvas_with(Entry::new(&ctx).with_text("abc"));

    mouse_down(&mut canvas, click_position("a", 0), MouseButton::Left);
    drag(&mut canvas, click_position("abc", 0));
    assert!(entry(&canvas).is_selecting());

    canvas.unfocus();
    assert!(!entry(&canvas).is_selecting());
    assert_eq!(entry(&canvas).selected_text(), "bc");
}
