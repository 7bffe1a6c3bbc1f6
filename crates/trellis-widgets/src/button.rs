use trellis_core::{
    CursorIcon, EventArgs, EventCtx, EventKind, InputEvent, Scene, Style, Vec2, Widget, WidgetCore,
};

/// Push button. Behavior lives in `Click` listeners; the widget itself only
/// tracks hover feedback.
pub struct Button {
    core: WidgetCore,
    text: String,
    style: Style,
}

impl Button {
    pub fn new(text: impl Into<String>, x: f32, y: f32, width: f32, height: f32) -> Self {
        Button {
            core: WidgetCore::new(x, y, width, height).with_cursor(CursorIcon::Hand),
            text: text.into(),
            style: Style::default(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }
}

impl Widget for Button {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn handle_event(&mut self, ctx: &mut EventCtx, event: &InputEvent) {
        match event {
            InputEvent::Pointer(p) => {
                let was_hovered = self.core.is_hovered();
                self.core.process_pointer(p);
                if self.core.is_hovered() != was_hovered {
                    ctx.request_repaint();
                }
            }
            InputEvent::Key(k) => self.core.process_key(k),
        }
    }

    fn paint(&self, scene: &mut Scene) {
        let rect = self.core.rect();
        let bg = if self.core.is_hovered() {
            self.style.focused_background()
        } else {
            self.style.background
        };
        scene.rect(rect, bg, self.style.corner_radius);
        scene.border(rect, self.style.outline, 1.0, self.style.corner_radius);
        scene.text(
            rect.origin() + Vec2::new(8.0, rect.h / 2.0 - 8.0),
            &self.text,
            self.style.foreground,
        );
    }
}

/// Two-state button; flips on `Click` and reports the new state through
/// `Change`.
pub struct ToggleButton {
    core: WidgetCore,
    text: String,
    style: Style,
    toggled: bool,
}

impl ToggleButton {
    pub fn new(text: impl Into<String>, x: f32, y: f32, width: f32, height: f32) -> Self {
        ToggleButton {
            core: WidgetCore::new(x, y, width, height).with_cursor(CursorIcon::Hand),
            text: text.into(),
            style: Style::default(),
            toggled: false,
        }
    }

    pub fn is_toggled(&self) -> bool {
        self.toggled
    }

    pub fn set_toggled(&mut self, toggled: bool) {
        if self.toggled != toggled {
            self.toggled = toggled;
            self.core
                .emit(EventKind::Change, &EventArgs::Toggled(toggled));
        }
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }
}

impl Widget for ToggleButton {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn handle_event(&mut self, ctx: &mut EventCtx, event: &InputEvent) {
        match event {
            InputEvent::Pointer(p) => {
                let out = self.core.process_pointer(p);
                if out.clicked {
                    self.toggled = !self.toggled;
                    self.core
                        .emit(EventKind::Change, &EventArgs::Toggled(self.toggled));
                    ctx.request_repaint();
                }
            }
            InputEvent::Key(k) => self.core.process_key(k),
        }
    }

    fn paint(&self, scene: &mut Scene) {
        let rect = self.core.rect();
        let bg = if self.toggled {
            self.style.selection
        } else if self.core.is_hovered() {
            self.style.focused_background()
        } else {
            self.style.background
        };
        scene.rect(rect, bg, self.style.corner_radius);
        scene.border(rect, self.style.outline, 1.0, self.style.corner_radius);
        scene.text(
            rect.origin() + Vec2::new(8.0, rect.h / 2.0 - 8.0),
            &self.text,
            self.style.foreground,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use trellis_core::{PointerButton, PointerEventKind, RepaintFlag};

    fn press(ctx: &mut EventCtx, w: &mut dyn Widget, x: f32, y: f32) {
        w.handle_event(
            ctx,
            &InputEvent::Pointer(trellis_core::PointerEvent::new(
                PointerEventKind::Down(PointerButton::Primary),
                Vec2::new(x, y),
            )),
        );
    }

    #[test]
    fn toggle_flips_and_reports() {
        let mut ctx = EventCtx::new(RepaintFlag::new());
        let mut b = ToggleButton::new("t", 0.0, 0.0, 60.0, 20.0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        b.core_mut().on(EventKind::Change, move |args| {
            if let EventArgs::Toggled(v) = args {
                s.borrow_mut().push(*v);
            }
        });

        press(&mut ctx, &mut b, 10.0, 10.0);
        press(&mut ctx, &mut b, 10.0, 10.0);
        assert!(!b.is_toggled());
        assert_eq!(*seen.borrow(), vec![true, false]);

        press(&mut ctx, &mut b, 200.0, 200.0); // outside, no flip
        assert_eq!(seen.borrow().len(), 2);
    }
}
