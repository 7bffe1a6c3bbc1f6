use trellis_core::{
    EventArgs, EventCtx, EventKind, InputEvent, PointerEventKind, Rect, Scene, Style, Vec2, Widget,
    WidgetCore,
};

use crate::scrollbar::VerticalScrollbar;

const SCROLLBAR_WIDTH: f32 = 12.0;
const ROW_HEIGHT: f32 = 26.0;
const PAD: f32 = 5.0;

/// Scrollable list of text items. A primary press on a row selects it and
/// emits `Change` carrying the item's text; rows past the viewport are
/// reached through the integrated vertical scrollbar.
pub struct ListPanel {
    core: WidgetCore,
    style: Style,
    items: Vec<String>,
    selected: Option<usize>,
    scrollbar: VerticalScrollbar,
}

impl ListPanel {
    pub fn new(x: f32, y: f32, width: f32, height: f32, items: Vec<String>) -> Self {
        let mut scrollbar =
            VerticalScrollbar::new(x + width - SCROLLBAR_WIDTH, y, SCROLLBAR_WIDTH, height, height);
        scrollbar.core_mut().set_visible(false);
        let mut panel = ListPanel {
            core: WidgetCore::new(x, y, width, height),
            style: Style::default(),
            items,
            selected: None,
            scrollbar,
        };
        panel.refresh();
        panel
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Replace the item list. Clears the selection and resizes the
    /// scrollbar for the new extent.
    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
        self.selected = None;
        self.refresh();
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.selected.and_then(|i| self.items.get(i)).map(String::as_str)
    }

    pub fn scrollbar(&self) -> &VerticalScrollbar {
        &self.scrollbar
    }

    pub fn scrollbar_mut(&mut self) -> &mut VerticalScrollbar {
        &mut self.scrollbar
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn content_height(&self) -> f32 {
        PAD * 2.0 + ROW_HEIGHT * self.items.len() as f32
    }

    fn overflow(&self) -> f32 {
        (self.content_height() - self.core.height()).max(0.0)
    }

    fn scroll_y(&self) -> f32 {
        self.scrollbar.ratio() * self.overflow()
    }

    fn refresh(&mut self) {
        let h = self.core.height();
        let content = self.content_height();
        let scrollable = content > h;
        self.scrollbar.core_mut().set_visible(scrollable);
        if scrollable {
            let handle = (h / content * h).max(16.0);
            self.scrollbar.set_handle_height(handle.min(h));
        }
    }

    /// Row index under a screen-space point, if it lands on one.
    fn row_hit(&self, pos: Vec2) -> Option<usize> {
        let rect = self.core.rect();
        let mut body_w = rect.w;
        if self.scrollbar.core().is_visible() {
            body_w -= SCROLLBAR_WIDTH;
        }
        if !Rect::new(rect.x, rect.y, body_w, rect.h).contains(pos) {
            return None;
        }
        let local = pos.y - rect.y - PAD + self.scroll_y();
        if local < 0.0 {
            return None;
        }
        let idx = (local / ROW_HEIGHT) as usize;
        (idx < self.items.len()).then_some(idx)
    }
}

impl Widget for ListPanel {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn handle_event(&mut self, ctx: &mut EventCtx, event: &InputEvent) {
        if self.scrollbar.core().is_visible() && ctx.allows(&self.scrollbar) {
            self.scrollbar.handle_event(ctx, event);
        }

        if let InputEvent::Pointer(p) = event {
            if p.is_primary_down() {
                if let Some(idx) = self.row_hit(p.position) {
                    self.selected = Some(idx);
                    self.core
                        .emit(EventKind::Change, &EventArgs::Text(self.items[idx].clone()));
                    ctx.request_repaint();
                }
            } else if matches!(p.kind, PointerEventKind::Move) {
                self.core.process_pointer(p);
            }
        }
    }

    fn paint(&self, scene: &mut Scene) {
        let rect = self.core.rect();
        scene.rect(rect, self.style.background, self.style.corner_radius);
        scene.push_clip(rect);
        let top = rect.y + PAD - self.scroll_y();
        for (i, item) in self.items.iter().enumerate() {
            let row_y = top + i as f32 * ROW_HEIGHT;
            if row_y + ROW_HEIGHT < rect.y || row_y > rect.y + rect.h {
                continue;
            }
            if self.selected == Some(i) {
                scene.rect(
                    Rect::new(rect.x, row_y, rect.w, ROW_HEIGHT),
                    self.style.selection,
                    0.0,
                );
            }
            scene.text(
                Vec2::new(rect.x + PAD * 2.0, row_y + 4.0),
                item,
                self.style.foreground,
            );
        }
        scene.pop_clip();
        if self.scrollbar.core().is_visible() {
            self.scrollbar.paint(scene);
        }
        scene.border(rect, self.style.outline, 1.0, self.style.corner_radius);
    }

    fn for_each_child(&self, f: &mut dyn FnMut(&dyn Widget)) {
        f(&self.scrollbar);
    }

    fn for_each_child_mut(&mut self, f: &mut dyn FnMut(&mut dyn Widget)) {
        f(&mut self.scrollbar);
    }
}
