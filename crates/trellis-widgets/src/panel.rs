use trellis_core::{
    EventCtx, InputEvent, Scene, Style, Vec2, Widget, WidgetCore,
};

use crate::scrollbar::VerticalScrollbar;

const SCROLLBAR_WIDTH: f32 = 12.0;

/// Scrollable container. Children live in content coordinates with their
/// origin at the panel's top-left; pointer events are forwarded as
/// translated copies and painting is clipped to the panel rect. When the
/// content is taller than the panel a vertical scrollbar appears at the
/// right edge.
pub struct Panel {
    core: WidgetCore,
    style: Style,
    children: Vec<Box<dyn Widget>>,
    scrollbar: VerticalScrollbar,
    content_height: f32,
}

impl Panel {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        let mut scrollbar =
            VerticalScrollbar::new(x + width - SCROLLBAR_WIDTH, y, SCROLLBAR_WIDTH, height, height);
        scrollbar.core_mut().set_visible(false);
        Panel {
            core: WidgetCore::new(x, y, width, height),
            style: Style::default(),
            children: Vec::new(),
            scrollbar,
            content_height: 0.0,
        }
    }

    pub fn add(&mut self, child: Box<dyn Widget>) {
        self.children.push(child);
        self.update_content_extent();
    }

    pub fn children(&self) -> &[Box<dyn Widget>] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut self.children
    }

    /// Recompute the content extent and the scrollbar geometry. `add`
    /// and event dispatch call this; callers that move or resize children
    /// between events can invoke it directly.
    pub fn relayout(&mut self) {
        self.update_content_extent();
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    pub fn scrollbar(&self) -> &VerticalScrollbar {
        &self.scrollbar
    }

    /// Current scroll offset in content pixels.
    pub fn scroll_y(&self) -> f32 {
        self.scrollbar.ratio() * self.overflow()
    }

    fn overflow(&self) -> f32 {
        (self.content_height - self.core.height()).max(0.0)
    }

    fn update_content_extent(&mut self) {
        self.content_height = self
            .children
            .iter()
            .map(|c| {
                let r = c.core().rect();
                r.y + r.h
            })
            .fold(0.0, f32::max);
        let h = self.core.height();
        let scrollable = self.content_height > h;
        self.scrollbar.core_mut().set_visible(scrollable);
        if scrollable {
            // Handle length proportional to the visible fraction.
            let handle = (h / self.content_height * h).max(16.0);
            self.scrollbar.set_handle_height(handle.min(h));
        }
    }

    /// Screen-to-content translation for child event forwarding.
    fn child_delta(&self) -> Vec2 {
        -self.core.rect().origin() + Vec2::new(0.0, self.scroll_y())
    }
}

impl Widget for Panel {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn handle_event(&mut self, ctx: &mut EventCtx, event: &InputEvent) {
        // Children may have moved or resized since the last dispatch.
        self.update_content_extent();

        // The scrollbar lives in screen coordinates; give it the raw event.
        if self.scrollbar.core().is_visible() && ctx.allows(&self.scrollbar) {
            self.scrollbar.handle_event(ctx, event);
        }

        let forwarded = match event {
            InputEvent::Pointer(p) => InputEvent::Pointer(p.translated(self.child_delta())),
            InputEvent::Key(k) => InputEvent::Key(*k),
        };
        for child in self.children.iter_mut() {
            if child.core().is_visible() && ctx.allows(child.as_ref()) {
                child.handle_event(ctx, &forwarded);
            }
        }
    }

    fn paint(&self, scene: &mut Scene) {
        let rect = self.core.rect();
        scene.rect(rect, self.style.background, self.style.corner_radius);
        scene.push_clip(rect);
        scene.push_translate(rect.origin() - Vec2::new(0.0, self.scroll_y()));
        for child in self.children.iter() {
            if child.core().is_visible() {
                child.paint(scene);
            }
        }
        scene.pop_translate();
        scene.pop_clip();
        if self.scrollbar.core().is_visible() {
            self.scrollbar.paint(scene);
        }
        scene.border(rect, self.style.outline, 1.0, self.style.corner_radius);
    }

    fn for_each_child(&self, f: &mut dyn FnMut(&dyn Widget)) {
        f(&self.scrollbar);
        for child in self.children.iter() {
            f(child.as_ref());
        }
    }

    fn for_each_child_mut(&mut self, f: &mut dyn FnMut(&mut dyn Widget)) {
        f(&mut self.scrollbar);
        for child in self.children.iter_mut() {
            f(child.as_mut());
        }
    }
}
