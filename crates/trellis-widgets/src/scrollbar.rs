use trellis_core::{
    CursorIcon, DragState, EventArgs, EventCtx, EventKind, InputEvent, PointerEvent,
    PointerEventKind, Rect, Scene, Style, Vec2, Widget, WidgetCore,
};

/// Shared handle-on-track state for both scrollbar orientations. `ratio`
/// is the handle position normalized to `[0, 1]` over the usable track
/// (track length minus handle length); `Change` carries it as a value.
struct ScrollCore {
    core: WidgetCore,
    style: Style,
    handle_len: f32,
    ratio: f32,
    drag: DragState,
}

impl ScrollCore {
    fn new(core: WidgetCore, handle_len: f32) -> Self {
        ScrollCore {
            core,
            style: Style::default(),
            handle_len: handle_len.max(0.0),
            ratio: 0.0,
            drag: DragState::default(),
        }
    }

    /// Usable travel in pixels along `axis_len`; `None` when the handle
    /// covers the whole track (content fits, interaction disabled).
    fn usable(&self, axis_len: f32) -> Option<f32> {
        let usable = axis_len - self.handle_len;
        if usable <= 0.0 { None } else { Some(usable) }
    }

    fn set_ratio(&mut self, ratio: f32) {
        self.ratio = ratio.clamp(0.0, 1.0);
    }

    /// One pointer event along the given axis; `axis_pos` extracts the
    /// dragged coordinate. Returns true when the ratio changed.
    fn pointer(
        &mut self,
        ctx: &mut EventCtx,
        p: &PointerEvent,
        axis_len: f32,
        axis_pos: impl Fn(Vec2) -> f32,
    ) -> bool {
        let out = self.core.process_pointer(p);
        match p.kind {
            PointerEventKind::Down(_) => {
                if out.clicked && self.usable(axis_len).is_some() {
                    self.drag.begin(p.position, Vec2::new(self.ratio, 0.0));
                }
                false
            }
            PointerEventKind::Move => {
                let (Some(session), Some(usable)) = (self.drag.session(), self.usable(axis_len))
                else {
                    return false;
                };
                if !self.core.is_focused() {
                    return false;
                }
                let delta = (axis_pos(p.position) - axis_pos(session.start_pointer)) as f64;
                let raw = session.start_value.x as f64 + delta / usable as f64;
                self.ratio = (raw as f32).clamp(0.0, 1.0);
                self.core
                    .emit(EventKind::Change, &EventArgs::Value(self.ratio as f64));
                ctx.request_repaint();
                true
            }
            PointerEventKind::Up(_) => {
                if self.drag.is_active() {
                    self.drag.end();
                    self.core.un_focus();
                    ctx.request_repaint();
                }
                false
            }
        }
    }
}

/// Vertical scrollbar: the handle travels the track top to bottom.
pub struct VerticalScrollbar {
    inner: ScrollCore,
}

impl VerticalScrollbar {
    pub fn new(x: f32, y: f32, width: f32, height: f32, handle_height: f32) -> Self {
        VerticalScrollbar {
            inner: ScrollCore::new(
                WidgetCore::new(x, y, width, height).with_cursor(CursorIcon::ResizeV),
                handle_height,
            ),
        }
    }

    pub fn ratio(&self) -> f32 {
        self.inner.ratio
    }

    pub fn set_ratio(&mut self, ratio: f32) {
        self.inner.set_ratio(ratio);
    }

    pub fn set_handle_height(&mut self, handle_height: f32) {
        self.inner.handle_len = handle_height.max(0.0);
    }

    /// False when the handle fills the track and dragging is disabled.
    pub fn is_scrollable(&self) -> bool {
        self.inner.usable(self.inner.core.height()).is_some()
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.inner.style
    }
}

impl Widget for VerticalScrollbar {
    fn core(&self) -> &WidgetCore {
        &self.inner.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.inner.core
    }

    fn handle_event(&mut self, ctx: &mut EventCtx, event: &InputEvent) {
        match event {
            InputEvent::Pointer(p) => {
                let h = self.inner.core.height();
                self.inner.pointer(ctx, p, h, |v| v.y);
            }
            InputEvent::Key(k) => self.inner.core.process_key(k),
        }
    }

    fn paint(&self, scene: &mut Scene) {
        let rect = self.inner.core.rect();
        scene.rect(rect, self.inner.style.background, 0.0);
        if let Some(usable) = self.inner.usable(rect.h) {
            let handle = Rect::new(
                rect.x,
                rect.y + self.inner.ratio * usable,
                rect.w,
                self.inner.handle_len,
            );
            scene.rect(handle, self.inner.style.foreground, self.inner.style.corner_radius);
        }
        scene.border(rect, self.inner.style.outline, 1.0, 0.0);
    }
}

/// Horizontal scrollbar: same machine, x axis.
pub struct HorizontalScrollbar {
    inner: ScrollCore,
}

impl HorizontalScrollbar {
    pub fn new(x: f32, y: f32, width: f32, height: f32, handle_width: f32) -> Self {
        HorizontalScrollbar {
            inner: ScrollCore::new(
                WidgetCore::new(x, y, width, height).with_cursor(CursorIcon::ResizeH),
                handle_width,
            ),
        }
    }

    pub fn ratio(&self) -> f32 {
        self.inner.ratio
    }

    pub fn set_ratio(&mut self, ratio: f32) {
        self.inner.set_ratio(ratio);
    }

    pub fn set_handle_width(&mut self, handle_width: f32) {
        self.inner.handle_len = handle_width.max(0.0);
    }

    pub fn is_scrollable(&self) -> bool {
        self.inner.usable(self.inner.core.width()).is_some()
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.inner.style
    }
}

impl Widget for HorizontalScrollbar {
    fn core(&self) -> &WidgetCore {
        &self.inner.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.inner.core
    }

    fn handle_event(&mut self, ctx: &mut EventCtx, event: &InputEvent) {
        match event {
            InputEvent::Pointer(p) => {
                let w = self.inner.core.width();
                self.inner.pointer(ctx, p, w, |v| v.x);
            }
            InputEvent::Key(k) => self.inner.core.process_key(k),
        }
    }

    fn paint(&self, scene: &mut Scene) {
        let rect = self.inner.core.rect();
        scene.rect(rect, self.inner.style.background, 0.0);
        if let Some(usable) = self.inner.usable(rect.w) {
            let handle = Rect::new(
                rect.x + self.inner.ratio * usable,
                rect.y,
                self.inner.handle_len,
                rect.h,
            );
            scene.rect(handle, self.inner.style.foreground, self.inner.style.corner_radius);
        }
        scene.border(rect, self.inner.style.outline, 1.0, 0.0);
    }
}
