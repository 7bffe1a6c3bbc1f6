use trellis_core::{
    CursorIcon, EventArgs, EventCtx, EventKind, InputEvent, Rect, Scene, Style, Widget, WidgetCore,
};

use crate::label::Label;

const LABEL_GAP: f32 = 6.0;

/// Checkbox with an attached text label. The label is a real child widget,
/// so the checkbox is both a leaf control and a (single-child) container.
pub struct Checkbox {
    core: WidgetCore,
    label: Label,
    style: Style,
    checked: bool,
}

impl Checkbox {
    pub fn new(text: impl Into<String>, x: f32, y: f32, size: f32) -> Self {
        let label = Label::new(text, x + size + LABEL_GAP, y + size / 2.0 - 8.0);
        Checkbox {
            core: WidgetCore::new(x, y, size, size).with_cursor(CursorIcon::Hand),
            label,
            style: Style::default(),
            checked: false,
        }
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        if self.checked != checked {
            self.checked = checked;
            self.core
                .emit(EventKind::Change, &EventArgs::Toggled(checked));
        }
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }
}

impl Widget for Checkbox {
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
                    self.checked = !self.checked;
                    self.core
                        .emit(EventKind::Change, &EventArgs::Toggled(self.checked));
                    ctx.request_repaint();
                }
            }
            InputEvent::Key(k) => self.core.process_key(k),
        }
    }

    fn paint(&self, scene: &mut Scene) {
        let rect = self.core.rect();
        scene.rect(rect, self.style.background, self.style.corner_radius);
        scene.border(rect, self.style.outline, 1.0, self.style.corner_radius);
        if self.checked {
            let inset = rect.w * 0.25;
            scene.rect(
                Rect::new(
                    rect.x + inset,
                    rect.y + inset,
                    rect.w - 2.0 * inset,
                    rect.h - 2.0 * inset,
                ),
                self.style.selection,
                0.0,
            );
        }
        self.label.paint(scene);
    }

    fn for_each_child(&self, f: &mut dyn FnMut(&dyn Widget)) {
        f(&self.label);
    }

    fn for_each_child_mut(&mut self, f: &mut dyn FnMut(&mut dyn Widget)) {
        f(&mut self.label);
    }
}
