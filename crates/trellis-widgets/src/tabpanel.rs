use trellis_core::{
    EventCtx, InputEvent, PointerEventKind, Rect, Scene, Style, Vec2, Widget, WidgetCore,
};

const HEADER_HEIGHT: f32 = 24.0;
const TAB_WIDTH: f32 = 96.0;

struct Tab {
    title: String,
    content: Box<dyn Widget>,
}

/// Tabbed container. A row of headers selects the active tab; input is
/// forwarded only to the active tab's content, translated below the header
/// row, while the container capability exposes every tab's content (so
/// focus arbitration sees inactive editors too).
pub struct TabPanel {
    core: WidgetCore,
    style: Style,
    tabs: Vec<Tab>,
    active: usize,
}

impl TabPanel {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        TabPanel {
            core: WidgetCore::new(x, y, width, height),
            style: Style::default(),
            tabs: Vec::new(),
            active: 0,
        }
    }

    pub fn add_tab(&mut self, title: impl Into<String>, content: Box<dyn Widget>) {
        self.tabs.push(Tab {
            title: title.into(),
            content,
        });
    }

    pub fn active_tab(&self) -> usize {
        self.active
    }

    pub fn set_active_tab(&mut self, index: usize) {
        if index < self.tabs.len() && index != self.active {
            if let Some(prev) = self.tabs.get_mut(self.active) {
                trellis_core::blur_subtree(prev.content.as_mut());
            }
            self.active = index;
        }
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn header_rect(&self) -> Rect {
        let r = self.core.rect();
        Rect::new(r.x, r.y, r.w, HEADER_HEIGHT)
    }

    /// Header index under the pointer, if any.
    fn header_hit(&self, pos: Vec2) -> Option<usize> {
        if !self.header_rect().contains(pos) {
            return None;
        }
        let idx = ((pos.x - self.core.rect().x) / TAB_WIDTH) as usize;
        (idx < self.tabs.len()).then_some(idx)
    }

    /// Screen-to-content translation for the tab body.
    fn content_delta(&self) -> Vec2 {
        -(self.core.rect().origin() + Vec2::new(0.0, HEADER_HEIGHT))
    }
}

impl Widget for TabPanel {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn handle_event(&mut self, ctx: &mut EventCtx, event: &InputEvent) {
        if let InputEvent::Pointer(p) = event {
            if matches!(p.kind, PointerEventKind::Down(_)) {
                if let Some(idx) = self.header_hit(p.position) {
                    if idx != self.active {
                        log::debug!("tab {} -> {}", self.active, idx);
                        if let Some(prev) = self.tabs.get_mut(self.active) {
                            trellis_core::blur_subtree(prev.content.as_mut());
                        }
                        self.active = idx;
                        ctx.request_repaint();
                    }
                    return; // header presses never reach the content
                }
            }
        }

        let delta = self.content_delta();
        let Some(tab) = self.tabs.get_mut(self.active) else {
            return;
        };
        if !tab.content.core().is_visible() || !ctx.allows(tab.content.as_ref()) {
            return;
        }
        let forwarded = match event {
            InputEvent::Pointer(p) => InputEvent::Pointer(p.translated(delta)),
            InputEvent::Key(k) => InputEvent::Key(*k),
        };
        tab.content.handle_event(ctx, &forwarded);
    }

    fn paint(&self, scene: &mut Scene) {
        let rect = self.core.rect();
        scene.rect(rect, self.style.background, 0.0);
        for (i, tab) in self.tabs.iter().enumerate() {
            let header = Rect::new(
                rect.x + i as f32 * TAB_WIDTH,
                rect.y,
                TAB_WIDTH,
                HEADER_HEIGHT,
            );
            let bg = if i == self.active {
                self.style.selection
            } else {
                self.style.background
            };
            scene.rect(header, bg, 0.0);
            scene.border(header, self.style.outline, 1.0, 0.0);
            scene.text(
                header.origin() + Vec2::new(6.0, 4.0),
                &tab.title,
                self.style.foreground,
            );
        }
        if let Some(tab) = self.tabs.get(self.active) {
            let body = Rect::new(rect.x, rect.y + HEADER_HEIGHT, rect.w, rect.h - HEADER_HEIGHT);
            scene.push_clip(body);
            scene.push_translate(body.origin());
            tab.content.paint(scene);
            scene.pop_translate();
            scene.pop_clip();
        }
        scene.border(rect, self.style.outline, 1.0, 0.0);
    }

    fn for_each_child(&self, f: &mut dyn FnMut(&dyn Widget)) {
        for tab in self.tabs.iter() {
            f(tab.content.as_ref());
        }
    }

    fn for_each_child_mut(&mut self, f: &mut dyn FnMut(&mut dyn Widget)) {
        for tab in self.tabs.iter_mut() {
            f(tab.content.as_mut());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::ToggleButton;
    use trellis_core::{PointerButton, PointerEvent, RepaintFlag};

    fn press(x: f32, y: f32) -> InputEvent {
        InputEvent::Pointer(PointerEvent::new(
            PointerEventKind::Down(PointerButton::Primary),
            Vec2::new(x, y),
        ))
    }

    #[test]
    fn header_press_selects_tab() {
        let mut ctx = EventCtx::new(RepaintFlag::new());
        let mut tp = TabPanel::new(0.0, 0.0, 300.0, 200.0);
        tp.add_tab("one", Box::new(ToggleButton::new("a", 0.0, 0.0, 40.0, 20.0)));
        tp.add_tab("two", Box::new(ToggleButton::new("b", 0.0, 0.0, 40.0, 20.0)));
        assert_eq!(tp.active_tab(), 0);

        tp.handle_event(&mut ctx, &press(100.0, 10.0)); // second header
        assert_eq!(tp.active_tab(), 1);

        tp.handle_event(&mut ctx, &press(290.0, 10.0)); // past the headers
        assert_eq!(tp.active_tab(), 1);
    }

    #[test]
    fn content_gets_translated_events_only_when_active() {
        let mut ctx = EventCtx::new(RepaintFlag::new());
        let mut tp = TabPanel::new(50.0, 50.0, 300.0, 200.0);
        tp.add_tab("one", Box::new(ToggleButton::new("a", 10.0, 10.0, 40.0, 20.0)));
        tp.add_tab("two", Box::new(ToggleButton::new("b", 10.0, 10.0, 40.0, 20.0)));

        // Screen (75, 94) = content (25, 20): inside both tabs' buttons,
        // but only tab 0 is active.
        tp.handle_event(&mut ctx, &press(75.0, 94.0));
        let mut focused = Vec::new();
        tp.for_each_child(&mut |c| focused.push(c.core().is_focused()));
        assert_eq!(focused, vec![true, false]);
    }
}
