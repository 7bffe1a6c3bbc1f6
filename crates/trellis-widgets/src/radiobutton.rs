use std::cell::Cell;
use std::rc::Rc;

use trellis_core::{
    CursorIcon, EventArgs, EventCtx, EventKind, InputEvent, Scene, Style, Vec2, Widget, WidgetCore,
    WidgetId,
};

use crate::label::Label;

const LABEL_GAP: f32 = 6.0;

/// Shared selection slot for a set of radio buttons. Cloning the group hands
/// another button the same slot; at most one button id occupies it.
#[derive(Clone, Default)]
pub struct RadioGroup {
    selected: Rc<Cell<Option<WidgetId>>>,
}

impl RadioGroup {
    pub fn new() -> Self {
        RadioGroup::default()
    }

    /// Id of the checked button, if any.
    pub fn selected(&self) -> Option<WidgetId> {
        self.selected.get()
    }

    pub fn clear(&self) {
        self.selected.set(None);
    }
}

/// One option out of a [`RadioGroup`]. Checking a button unchecks whichever
/// group member held the slot before; the checked state is read from the
/// group, so siblings never need to be walked.
pub struct RadioButton {
    core: WidgetCore,
    label: Label,
    style: Style,
    group: RadioGroup,
}

impl RadioButton {
    pub fn new(text: impl Into<String>, group: &RadioGroup, x: f32, y: f32, size: f32) -> Self {
        let label = Label::new(text, x + size + LABEL_GAP, y + size / 2.0 - 8.0);
        RadioButton {
            core: WidgetCore::new(x, y, size, size).with_cursor(CursorIcon::Hand),
            label,
            style: Style::default(),
            group: group.clone(),
        }
    }

    pub fn is_checked(&self) -> bool {
        self.group.selected() == Some(self.core.id())
    }

    pub fn set_checked(&mut self, checked: bool) {
        if checked == self.is_checked() {
            return;
        }
        if checked {
            self.group.selected.set(Some(self.core.id()));
        } else {
            self.group.selected.set(None);
        }
        self.core
            .emit(EventKind::Change, &EventArgs::Toggled(checked));
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

impl Widget for RadioButton {
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
                if out.clicked && !self.is_checked() {
                    self.group.selected.set(Some(self.core.id()));
                    self.core
                        .emit(EventKind::Change, &EventArgs::Toggled(true));
                    ctx.request_repaint();
                }
            }
            InputEvent::Key(k) => self.core.process_key(k),
        }
    }

    fn paint(&self, scene: &mut Scene) {
        let rect = self.core.rect();
        let center = Vec2::new(rect.x + rect.w / 2.0, rect.y + rect.h / 2.0);
        let bg = if self.core.is_hovered() {
            self.style.background.scaled(1.3)
        } else {
            self.style.background
        };
        // No stroked-circle primitive; the ring is two stacked fills.
        scene.circle(center, rect.w / 2.0, self.style.outline);
        scene.circle(center, rect.w / 2.0 - 1.5, bg);
        if self.is_checked() {
            scene.circle(center, rect.w / 4.0, self.style.foreground);
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use trellis_core::{PointerButton, PointerEvent, PointerEventKind, RepaintFlag};

    fn click(ctx: &mut EventCtx, rb: &mut RadioButton, x: f32, y: f32) {
        rb.handle_event(
            ctx,
            &InputEvent::Pointer(PointerEvent::new(
                PointerEventKind::Down(PointerButton::Primary),
                Vec2::new(x, y),
            )),
        );
    }

    #[test]
    fn checking_one_button_unchecks_the_rest_of_the_group() {
        let mut ctx = EventCtx::new(RepaintFlag::new());
        let group = RadioGroup::new();
        let mut a = RadioButton::new("a", &group, 0.0, 0.0, 16.0);
        let mut b = RadioButton::new("b", &group, 0.0, 30.0, 16.0);

        click(&mut ctx, &mut a, 8.0, 8.0);
        assert!(a.is_checked());
        assert!(!b.is_checked());
        assert_eq!(group.selected(), Some(a.core().id()));

        click(&mut ctx, &mut b, 8.0, 38.0);
        assert!(!a.is_checked());
        assert!(b.is_checked());
    }

    #[test]
    fn re_clicking_the_checked_button_emits_nothing() {
        let mut ctx = EventCtx::new(RepaintFlag::new());
        let group = RadioGroup::new();
        let mut a = RadioButton::new("a", &group, 0.0, 0.0, 16.0);
        let changes = Rc::new(RefCell::new(0));
        let c = changes.clone();
        a.core_mut().on(EventKind::Change, move |_| *c.borrow_mut() += 1);

        click(&mut ctx, &mut a, 8.0, 8.0);
        click(&mut ctx, &mut a, 8.0, 8.0);
        assert!(a.is_checked());
        assert_eq!(*changes.borrow(), 1);
    }
}
