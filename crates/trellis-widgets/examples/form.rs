//! Headless form demo: builds a view, drives it with synthetic input and
//! prints what the widgets report. Run with `RUST_LOG=debug` to watch the
//! router's focus and grab decisions.

use trellis_core::{
    EventArgs, EventKind, Key, KeyEvent, PointerButton, PointerEventKind, TextFilter, Vec2, View,
    Widget,
};
use trellis_widgets::{Checkbox, ComboBox, Label, Slider, TextInput};

fn main() {
    env_logger::init();

    let mut view = View::new();

    view.add(Box::new(Label::new("Ticket form", 10.0, 10.0)));

    let mut name = TextInput::new(10.0, 40.0, 200.0, 24.0);
    name.core_mut().on(EventKind::Change, |args| {
        if let EventArgs::Text(t) = args {
            println!("name committed: {t:?}");
        }
    });
    view.add(Box::new(name));

    let code_filter = match TextFilter::new("^[A-Z][0-9]+$") {
        Ok(f) => f,
        Err(e) => {
            eprintln!("bad filter: {e}");
            return;
        }
    };
    let mut code = TextInput::new(10.0, 80.0, 200.0, 24.0).with_filter(code_filter);
    code.core_mut().on(EventKind::Change, |args| {
        if let EventArgs::Text(t) = args {
            println!("code committed: {t:?}");
        }
    });
    view.add(Box::new(code));

    let mut urgency = Slider::new(10.0, 120.0, 200.0, 20.0, 0.0, 10.0);
    urgency.core_mut().on(EventKind::Change, |args| {
        if let EventArgs::Value(v) = args {
            println!("urgency: {v:.1}");
        }
    });
    view.add(Box::new(urgency));

    let mut agree = Checkbox::new("accept terms", 10.0, 160.0, 16.0);
    agree.core_mut().on(EventKind::Change, |args| {
        if let EventArgs::Toggled(v) = args {
            println!("terms accepted: {v}");
        }
    });
    view.add(Box::new(agree));

    let mut queue = ComboBox::new(
        10.0,
        200.0,
        120.0,
        20.0,
        vec!["bugs".into(), "features".into(), "support".into()],
    );
    queue.core_mut().on(EventKind::Change, |args| {
        if let EventArgs::Text(t) = args {
            println!("queue: {t}");
        }
    });
    view.add(Box::new(queue));

    // Type a name, then commit it with Enter.
    click(&mut view, 20.0, 50.0);
    type_str(&mut view, "ada");
    view.process_key_event(KeyEvent::down(Key::Enter));

    // An invalid ticket code is cleared on commit.
    click(&mut view, 20.0, 90.0);
    type_str(&mut view, "nope");
    view.process_key_event(KeyEvent::down(Key::Enter));

    // Drag the urgency slider most of the way up.
    view.process_pointer_event(
        PointerEventKind::Down(PointerButton::Primary),
        Vec2::new(20.0, 130.0),
    );
    view.process_pointer_event(PointerEventKind::Move, Vec2::new(180.0, 130.0));
    view.process_pointer_event(
        PointerEventKind::Up(PointerButton::Primary),
        Vec2::new(180.0, 130.0),
    );

    // Toggle the checkbox and pick a queue from the popup.
    click(&mut view, 15.0, 165.0);
    click(&mut view, 20.0, 210.0); // open
    click(&mut view, 20.0, 245.0); // second item

    let mut scene = trellis_core::Scene::default();
    view.paint(&mut scene);
    println!("painted {} scene nodes", scene.nodes.len());
}

fn click(view: &mut View, x: f32, y: f32) {
    view.process_pointer_event(
        PointerEventKind::Down(PointerButton::Primary),
        Vec2::new(x, y),
    );
    view.process_pointer_event(
        PointerEventKind::Up(PointerButton::Primary),
        Vec2::new(x, y),
    );
}

fn type_str(view: &mut View, s: &str) {
    for c in s.chars() {
        view.process_key_event(KeyEvent::down(Key::Character(c)));
    }
}
