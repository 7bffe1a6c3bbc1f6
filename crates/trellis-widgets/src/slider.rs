use trellis_core::{
    CursorIcon, DragState, EventArgs, EventCtx, EventKind, InputEvent, PointerEventKind, Scene,
    Style, Vec2, Widget, WidgetCore,
};

/// Horizontal value slider over `[min, max]`.
///
/// The handle is a circle of radius `height / 2`; its center travels the
/// track minus one radius at each end, so the value maps linearly onto
/// `width - 2 * radius` pixels. A drag snapshots the value on press and
/// applies the pointer delta scaled by that mapping, clamped to the range,
/// reporting `Change` once per motion event.
pub struct Slider {
    core: WidgetCore,
    style: Style,
    min: f32,
    max: f32,
    value: f32,
    drag: DragState,
}

impl Slider {
    pub fn new(x: f32, y: f32, width: f32, height: f32, min: f32, max: f32) -> Self {
        debug_assert!(max > min);
        Slider {
            core: WidgetCore::new(x, y, width, height).with_cursor(CursorIcon::ResizeH),
            style: Style::default(),
            min,
            max,
            value: min,
            drag: DragState::default(),
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn set_value(&mut self, value: f32) {
        self.value = value.clamp(self.min, self.max);
    }

    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn handle_radius(&self) -> f32 {
        self.core.height() / 2.0
    }

    /// Value change per pixel of pointer travel; `None` when the track is
    /// too short to drag. Computed in f64 so a full-track drag lands exactly
    /// on the range endpoint after the f32 round-trip.
    fn sensitivity(&self) -> Option<f64> {
        let usable = self.core.width() - 2.0 * self.handle_radius();
        if usable <= 0.0 {
            return None;
        }
        Some((self.max - self.min) as f64 / usable as f64)
    }

    /// Handle center in widget coordinates.
    fn handle_center(&self) -> Vec2 {
        let rect = self.core.rect();
        let r = self.handle_radius();
        let usable = (rect.w - 2.0 * r).max(0.0);
        let t = (self.value - self.min) / (self.max - self.min);
        Vec2::new(rect.x + r + t * usable, rect.y + rect.h / 2.0)
    }
}

impl Widget for Slider {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn handle_event(&mut self, ctx: &mut EventCtx, event: &InputEvent) {
        let InputEvent::Pointer(p) = event else {
            if let InputEvent::Key(k) = event {
                self.core.process_key(k);
            }
            return;
        };
        let out = self.core.process_pointer(p);
        match p.kind {
            PointerEventKind::Down(_) => {
                if out.clicked && self.sensitivity().is_some() {
                    self.drag.begin(p.position, Vec2::new(self.value, 0.0));
                }
            }
            PointerEventKind::Move => {
                let (Some(session), Some(sensitivity)) = (self.drag.session(), self.sensitivity())
                else {
                    return;
                };
                if !self.core.is_focused() {
                    return;
                }
                let delta = (p.position.x - session.start_pointer.x) as f64;
                let raw = session.start_value.x as f64 + delta * sensitivity;
                self.value = (raw as f32).clamp(self.min, self.max);
                self.core
                    .emit(EventKind::Change, &EventArgs::Value(self.value as f64));
                ctx.request_repaint();
            }
            PointerEventKind::Up(_) => {
                if self.drag.is_active() {
                    self.drag.end();
                    self.core.un_focus();
                    ctx.request_repaint();
                }
            }
        }
    }

    fn paint(&self, scene: &mut Scene) {
        let rect = self.core.rect();
        let mid = rect.y + rect.h / 2.0;
        let center = self.handle_center();
        scene.line(
            Vec2::new(rect.x, mid),
            Vec2::new(rect.x + rect.w, mid),
            self.style.outline,
            2.0,
        );
        scene.line(
            Vec2::new(rect.x, mid),
            center,
            self.style.selection,
            2.0,
        );
        scene.circle(center, self.handle_radius(), self.style.foreground);
    }
}
