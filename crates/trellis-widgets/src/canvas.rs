use std::rc::Rc;

use trellis_core::{
    CursorIcon, DragState, EventCtx, InputEvent, PointerEventKind, Rect, Scene, Style, Vec2,
    Widget, WidgetCore,
};

/// Draw callback: receives the scene (already clipped to the canvas), the
/// canvas rect in screen coordinates and the current pan offset.
pub type Painter = Rc<dyn Fn(&mut Scene, Rect, Vec2)>;

/// Pannable drawing region. Dragging with the primary button shifts a 2D
/// offset by the pointer delta times `sensitivity`; what the offset means
/// is up to the painter.
pub struct Canvas {
    core: WidgetCore,
    style: Style,
    offset: Vec2,
    sensitivity: f32,
    drag: DragState,
    painter: Option<Painter>,
}

impl Canvas {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Canvas {
            core: WidgetCore::new(x, y, width, height).with_cursor(CursorIcon::Move),
            style: Style::default(),
            offset: Vec2::ZERO,
            sensitivity: 1.0,
            drag: DragState::default(),
            painter: None,
        }
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity;
    }

    pub fn set_painter(&mut self, painter: Painter) {
        self.painter = Some(painter);
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }
}

impl Widget for Canvas {
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
                if out.clicked {
                    self.drag.begin(p.position, self.offset);
                }
            }
            PointerEventKind::Move => {
                if let Some(session) = self.drag.session() {
                    if self.core.is_focused() {
                        self.offset = session.value(p.position, self.sensitivity);
                        ctx.request_repaint();
                    }
                }
            }
            PointerEventKind::Up(_) => {
                if self.drag.is_active() {
                    self.drag.end();
                    self.core.un_focus();
                }
            }
        }
    }

    fn paint(&self, scene: &mut Scene) {
        let rect = self.core.rect();
        scene.push_clip(rect);
        scene.rect(rect, self.style.background, 0.0);
        if let Some(painter) = &self.painter {
            painter(scene, rect, self.offset);
        }
        scene.pop_clip();
        scene.border(rect, self.style.outline, 1.0, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::{PointerButton, PointerEvent, RepaintFlag};

    #[test]
    fn drag_pans_by_scaled_delta() {
        let mut ctx = EventCtx::new(RepaintFlag::new());
        let mut c = Canvas::new(0.0, 0.0, 100.0, 100.0);
        c.set_sensitivity(0.5);
        let feed = |ctx: &mut EventCtx, c: &mut Canvas, kind, x, y| {
            c.handle_event(
                ctx,
                &InputEvent::Pointer(PointerEvent::new(kind, Vec2::new(x, y))),
            );
        };
        feed(&mut ctx, &mut c, PointerEventKind::Down(PointerButton::Primary), 50.0, 50.0);
        feed(&mut ctx, &mut c, PointerEventKind::Move, 70.0, 30.0);
        assert_eq!(c.offset(), Vec2::new(10.0, -10.0));

        feed(&mut ctx, &mut c, PointerEventKind::Up(PointerButton::Primary), 70.0, 30.0);
        feed(&mut ctx, &mut c, PointerEventKind::Move, 200.0, 200.0);
        assert_eq!(c.offset(), Vec2::new(10.0, -10.0)); // drag ended
    }
}
