use trellis_core::{EventCtx, InputEvent, Scene, Style, Widget, WidgetCore};

/// Static text. Ignores input entirely.
pub struct Label {
    core: WidgetCore,
    text: String,
    style: Style,
}

impl Label {
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Label {
            core: WidgetCore::new(x, y, 0.0, 0.0),
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

impl Widget for Label {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn handle_event(&mut self, _ctx: &mut EventCtx, _event: &InputEvent) {}

    fn paint(&self, scene: &mut Scene) {
        scene.text(self.core.rect().origin(), &self.text, self.style.foreground);
    }
}
