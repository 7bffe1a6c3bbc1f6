//! View-level routing: focus exclusivity, nested coordinate remapping and
//! popup event grabs, driven through the public event-pump entry points.

use std::cell::RefCell;
use std::rc::Rc;

use trellis_core::{
    CursorIcon, EventArgs, EventKind, KeyEvent, Key, PointerButton, PointerEventKind, Vec2, View,
    Widget, WidgetId,
};
use trellis_widgets::{Button, ComboBox, Panel, TabPanel, TextInput, ToggleButton};

fn press(view: &mut View, x: f32, y: f32) -> CursorIcon {
    view.process_pointer_event(
        PointerEventKind::Down(PointerButton::Primary),
        Vec2::new(x, y),
    )
}

fn count_focused(view: &View) -> usize {
    fn walk(w: &dyn Widget, n: &mut usize) {
        if w.core().is_focused() {
            *n += 1;
        }
        w.for_each_child(&mut |c| walk(c, n));
    }
    let mut n = 0;
    for el in view.elements() {
        walk(el.as_ref(), &mut n);
    }
    n
}

fn is_focused(view: &View, id: WidgetId) -> bool {
    fn walk(w: &dyn Widget, id: WidgetId, hit: &mut bool) {
        if w.core().id() == id {
            *hit = w.core().is_focused();
        }
        w.for_each_child(&mut |c| walk(c, id, hit));
    }
    let mut hit = false;
    for el in view.elements() {
        walk(el.as_ref(), id, &mut hit);
    }
    hit
}

#[test]
fn at_most_one_widget_holds_focus() {
    let mut view = View::new();
    let a = TextInput::new(0.0, 0.0, 100.0, 24.0);
    let b = TextInput::new(0.0, 40.0, 100.0, 24.0);
    let (a_id, b_id) = (a.core().id(), b.core().id());
    view.add(Box::new(a));
    view.add(Box::new(b));

    press(&mut view, 10.0, 10.0);
    assert!(is_focused(&view, a_id));
    assert_eq!(count_focused(&view), 1);

    press(&mut view, 10.0, 50.0);
    assert!(is_focused(&view, b_id));
    assert!(!is_focused(&view, a_id));
    assert_eq!(count_focused(&view), 1);

    press(&mut view, 500.0, 500.0);
    assert_eq!(count_focused(&view), 0);
}

#[test]
fn focus_handoff_fires_blur_then_focus() {
    let mut view = View::new();
    let mut a = Button::new("a", 0.0, 0.0, 60.0, 20.0);
    let mut b = Button::new("b", 0.0, 40.0, 60.0, 20.0);
    let events = Rc::new(RefCell::new(Vec::new()));
    let e = events.clone();
    a.core_mut().on(EventKind::Focus, move |_| e.borrow_mut().push("a:focus"));
    let e = events.clone();
    a.core_mut().on(EventKind::Blur, move |_| e.borrow_mut().push("a:blur"));
    let e = events.clone();
    b.core_mut().on(EventKind::Focus, move |_| e.borrow_mut().push("b:focus"));
    let e = events.clone();
    b.core_mut().on(EventKind::Blur, move |_| e.borrow_mut().push("b:blur"));
    let (a_id, b_id) = (a.core().id(), b.core().id());
    view.add(Box::new(a));
    view.add(Box::new(b));

    press(&mut view, 10.0, 50.0); // focus B
    press(&mut view, 10.0, 10.0); // press inside A while B is focused
    assert!(is_focused(&view, a_id));
    assert!(!is_focused(&view, b_id));
    assert_eq!(*events.borrow(), vec!["b:focus", "a:focus", "b:blur"]);
}

#[test]
fn overlapping_widgets_resolve_to_the_newest_focus() {
    // Both buttons cover the press point; declaration order processes the
    // first one first, so the second holds the newest focus stamp and wins.
    let mut view = View::new();
    let a = Button::new("a", 0.0, 0.0, 100.0, 40.0);
    let b = Button::new("b", 0.0, 0.0, 100.0, 40.0);
    let (a_id, b_id) = (a.core().id(), b.core().id());
    view.add(Box::new(a));
    view.add(Box::new(b));

    press(&mut view, 10.0, 10.0);
    assert!(!is_focused(&view, a_id));
    assert!(is_focused(&view, b_id));
    assert_eq!(count_focused(&view), 1);
}

#[test]
fn focus_revocation_commits_the_editor() {
    let mut view = View::new();
    let mut input = TextInput::new(0.0, 0.0, 100.0, 24.0);
    let committed = Rc::new(RefCell::new(Vec::new()));
    let c = committed.clone();
    input.core_mut().on(EventKind::Change, move |args| {
        if let EventArgs::Text(t) = args {
            c.borrow_mut().push(t.clone());
        }
    });
    view.add(Box::new(input));
    view.add(Box::new(TextInput::new(0.0, 40.0, 100.0, 24.0)));

    press(&mut view, 10.0, 10.0);
    view.process_key_event(KeyEvent::down(Key::Character('z')));
    press(&mut view, 10.0, 50.0); // focus moves to the second editor
    assert_eq!(*committed.borrow(), vec!["z".to_string()]);
}

#[test]
fn events_remap_through_two_container_levels() {
    // Panel at (50, 50) holds a tab panel at content (10, 10); the active
    // tab holds a toggle at content (5, 5). Screen x = 50+10+5, screen
    // y = 50+10+24+5 with the 24px header row.
    let mut tabs = TabPanel::new(10.0, 10.0, 200.0, 150.0);
    let toggle = ToggleButton::new("t", 5.0, 5.0, 40.0, 20.0);
    let toggle_id = toggle.core().id();
    tabs.add_tab("one", Box::new(toggle));
    let mut panel = Panel::new(50.0, 50.0, 300.0, 250.0);
    panel.add(Box::new(tabs));

    let mut view = View::new();
    view.add(Box::new(panel));

    press(&mut view, 70.0, 92.0);
    assert!(is_focused(&view, toggle_id));
    assert_eq!(count_focused(&view), 1);

    // Same offset logic on the way out: a miss inside the tab body.
    press(&mut view, 70.0, 200.0);
    assert!(!is_focused(&view, toggle_id));
}

#[test]
fn tab_switch_blurs_the_hidden_editor() {
    // An editor focused in tab 0 must not keep focus once tab 1 is shown:
    // the header press commits it and releases focus, so a later press on
    // empty body has nothing stale to contend with.
    let mut editor = TextInput::new(5.0, 5.0, 100.0, 24.0);
    let editor_id = editor.core().id();
    let committed = Rc::new(RefCell::new(Vec::new()));
    let c = committed.clone();
    editor.core_mut().on(EventKind::Change, move |args| {
        if let EventArgs::Text(t) = args {
            c.borrow_mut().push(t.clone());
        }
    });
    let mut tabs = TabPanel::new(0.0, 0.0, 300.0, 200.0);
    tabs.add_tab("one", Box::new(editor));
    tabs.add_tab("two", Box::new(TextInput::new(5.0, 5.0, 100.0, 24.0)));
    let mut view = View::new();
    view.add(Box::new(tabs));

    press(&mut view, 10.0, 34.0); // content (5..105, 5..29) under the header
    view.process_key_event(KeyEvent::down(Key::Character('z')));
    assert!(is_focused(&view, editor_id));

    press(&mut view, 100.0, 10.0); // second tab's header
    assert!(!is_focused(&view, editor_id));
    assert_eq!(count_focused(&view), 0);
    assert_eq!(*committed.borrow(), vec!["z".to_string()]);

    press(&mut view, 200.0, 150.0); // empty body of the new tab
    assert_eq!(count_focused(&view), 0);
}

#[test]
fn open_popup_grabs_event_delivery() {
    let mut view = View::new();
    let combo = ComboBox::new(0.0, 0.0, 80.0, 20.0, vec!["x".into(), "y".into()]);
    let toggle = ToggleButton::new("t", 200.0, 0.0, 60.0, 20.0);
    let toggle_id = toggle.core().id();
    view.add(Box::new(combo));
    view.add(Box::new(toggle));

    press(&mut view, 10.0, 10.0); // open the popup; grab applies now

    // This press lands on the toggle, but the grab routes it to the combo
    // box, which dismisses its popup instead.
    press(&mut view, 210.0, 10.0);
    assert!(!is_focused(&view, toggle_id));

    // Grab released: the toggle is reachable again.
    press(&mut view, 210.0, 10.0);
    assert!(is_focused(&view, toggle_id));
}

#[test]
fn dispatch_reports_the_focused_cursor() {
    let mut view = View::new();
    view.add(Box::new(TextInput::new(0.0, 0.0, 100.0, 24.0)));
    assert_eq!(press(&mut view, 10.0, 10.0), CursorIcon::IBeam);
    assert_eq!(press(&mut view, 500.0, 500.0), CursorIcon::Default);
}
