use trellis_core::{
    CursorIcon, EventArgs, EventCtx, EventKind, InputEvent, PointerEvent, Rect, Scene, Style,
    Vec2, Widget, WidgetCore,
};

/// Drop-down selector. The closed control shows the selected item; opening
/// paints an item list below it and grabs the view's event delivery so no
/// other widget sees input until the popup is dismissed. Any press that is
/// not on an item closes the popup and releases the grab.
pub struct ComboBox {
    core: WidgetCore,
    style: Style,
    items: Vec<String>,
    selected: usize,
    open: bool,
}

impl ComboBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32, items: Vec<String>) -> Self {
        debug_assert!(!items.is_empty());
        ComboBox {
            core: WidgetCore::new(x, y, width, height).with_cursor(CursorIcon::Hand),
            style: Style::default(),
            items,
            selected: 0,
            open: false,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> &str {
        &self.items[self.selected]
    }

    pub fn set_selected(&mut self, index: usize) {
        if index < self.items.len() && index != self.selected {
            self.selected = index;
            self.core.emit(
                EventKind::Change,
                &EventArgs::Text(self.items[index].clone()),
            );
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn popup_rect(&self) -> Rect {
        let r = self.core.rect();
        Rect::new(r.x, r.y + r.h, r.w, r.h * self.items.len() as f32)
    }

    /// Item index under the pointer while the popup is open.
    fn item_hit(&self, pos: Vec2) -> Option<usize> {
        let popup = self.popup_rect();
        if !popup.contains(pos) {
            return None;
        }
        let idx = ((pos.y - popup.y) / self.core.rect().h) as usize;
        (idx < self.items.len()).then_some(idx)
    }

    fn close(&mut self, ctx: &mut EventCtx) {
        self.open = false;
        ctx.release_events();
        ctx.request_repaint();
    }

    fn popup_press(&mut self, ctx: &mut EventCtx, p: &PointerEvent) {
        if let Some(idx) = self.item_hit(p.position) {
            let changed = idx != self.selected;
            self.selected = idx;
            if changed {
                self.core.emit(
                    EventKind::Change,
                    &EventArgs::Text(self.items[idx].clone()),
                );
            }
        }
        self.close(ctx);
    }
}

impl Widget for ComboBox {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn handle_event(&mut self, ctx: &mut EventCtx, event: &InputEvent) {
        // A stale grab can outlive the popup when focus is revoked from
        // outside; give it back before processing anything else.
        if !self.open && ctx.grab_holder() == Some(self.core.id()) {
            ctx.release_events();
        }

        let InputEvent::Pointer(p) = event else {
            if let InputEvent::Key(k) = event {
                self.core.process_key(k);
            }
            return;
        };

        if self.open {
            if p.is_primary_down() {
                self.popup_press(ctx, p);
            }
            return;
        }

        let out = self.core.process_pointer(p);
        if out.clicked {
            self.open = true;
            ctx.grab_events(self.core.id());
            ctx.request_repaint();
        }
    }

    fn paint(&self, scene: &mut Scene) {
        let rect = self.core.rect();
        scene.rect(rect, self.style.background, self.style.corner_radius);
        scene.border(rect, self.style.outline, 1.0, self.style.corner_radius);
        scene.text(
            rect.origin() + Vec2::new(6.0, rect.h / 2.0 - 8.0),
            self.selected_item(),
            self.style.foreground,
        );
        // Drop arrow.
        let ax = rect.x + rect.w - 14.0;
        let ay = rect.y + rect.h / 2.0;
        scene.line(
            Vec2::new(ax, ay - 2.0),
            Vec2::new(ax + 4.0, ay + 3.0),
            self.style.foreground,
            1.0,
        );
        scene.line(
            Vec2::new(ax + 4.0, ay + 3.0),
            Vec2::new(ax + 8.0, ay - 2.0),
            self.style.foreground,
            1.0,
        );

        if self.open {
            let popup = self.popup_rect();
            scene.rect(popup, self.style.background, 0.0);
            for (i, item) in self.items.iter().enumerate() {
                let row = Rect::new(popup.x, popup.y + i as f32 * rect.h, popup.w, rect.h);
                if i == self.selected {
                    scene.rect(row, self.style.selection, 0.0);
                }
                scene.text(
                    row.origin() + Vec2::new(6.0, rect.h / 2.0 - 8.0),
                    item,
                    self.style.foreground,
                );
            }
            scene.border(popup, self.style.outline, 1.0, 0.0);
        }
    }

    fn blur(&mut self) {
        self.open = false;
        self.core.un_focus();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use trellis_core::{PointerButton, PointerEventKind, RepaintFlag};

    fn items() -> Vec<String> {
        vec!["red".into(), "green".into(), "blue".into()]
    }

    fn press(ctx: &mut EventCtx, cb: &mut ComboBox, x: f32, y: f32) {
        cb.handle_event(
            ctx,
            &InputEvent::Pointer(PointerEvent::new(
                PointerEventKind::Down(PointerButton::Primary),
                Vec2::new(x, y),
            )),
        );
    }

    #[test]
    fn open_pick_close() {
        let mut ctx = EventCtx::new(RepaintFlag::new());
        let mut cb = ComboBox::new(0.0, 0.0, 80.0, 20.0, items());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        cb.core_mut().on(EventKind::Change, move |args| {
            if let EventArgs::Text(t) = args {
                s.borrow_mut().push(t.clone());
            }
        });

        press(&mut ctx, &mut cb, 10.0, 10.0);
        assert!(cb.is_open());

        // Second item row spans y in [40, 60).
        press(&mut ctx, &mut cb, 10.0, 45.0);
        assert!(!cb.is_open());
        assert_eq!(cb.selected_item(), "green");
        assert_eq!(*seen.borrow(), vec!["green".to_string()]);
    }

    #[test]
    fn press_outside_items_dismisses_without_change() {
        let mut ctx = EventCtx::new(RepaintFlag::new());
        let mut cb = ComboBox::new(0.0, 0.0, 80.0, 20.0, items());
        press(&mut ctx, &mut cb, 10.0, 10.0);
        press(&mut ctx, &mut cb, 300.0, 300.0);
        assert!(!cb.is_open());
        assert_eq!(cb.selected(), 0);
    }
}
