use trellis_core::{
    EventArgs, EventCtx, EventKind, InputEvent, Rect, Scene, Style, Widget, WidgetCore,
};

use crate::label::Label;

/// Horizontal progress bar with a formatted overlay label. The format
/// string replaces `@` with the value and `#` with the percentage.
pub struct ProgressBar {
    core: WidgetCore,
    label: Label,
    style: Style,
    min: f32,
    max: f32,
    value: f32,
    format: String,
}

impl ProgressBar {
    pub fn new(x: f32, y: f32, width: f32, height: f32, min: f32, max: f32, value: f32) -> Self {
        let mut bar = ProgressBar {
            core: WidgetCore::new(x, y, width, height),
            label: Label::new("", x, y),
            style: Style::default(),
            min,
            max,
            value: value.clamp(min, max),
            format: "@ (#%)".to_string(),
        };
        bar.refresh_label();
        bar
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn set_value(&mut self, value: f32) {
        let clamped = value.clamp(self.min, self.max);
        if clamped != self.value {
            self.value = clamped;
            self.refresh_label();
            self.core
                .emit(EventKind::Change, &EventArgs::Value(clamped as f64));
        }
    }

    /// Fraction of the range covered, in `[0, 100]`.
    pub fn percent(&self) -> f32 {
        if self.max > self.min {
            (self.value - self.min) / (self.max - self.min) * 100.0
        } else {
            0.0
        }
    }

    pub fn set_label_format(&mut self, format: impl Into<String>) {
        self.format = format.into();
        self.refresh_label();
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn refresh_label(&mut self) {
        let text = self
            .format
            .replace('#', &format!("{:.0}", self.percent()))
            .replace('@', &format!("{:.2}", self.value));
        // Roughly centered; text layout happens at render time.
        let rect = self.core.rect();
        let approx_w = text.len() as f32 * 8.0;
        self.label
            .core_mut()
            .set_x(rect.x + (rect.w - approx_w) / 2.0);
        self.label.core_mut().set_y(rect.y + rect.h / 2.0 - 8.0);
        self.label.set_text(text);
    }
}

impl Widget for ProgressBar {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn handle_event(&mut self, _ctx: &mut EventCtx, event: &InputEvent) {
        // Display only; hover tracking keeps the cursor reporting honest.
        if let InputEvent::Pointer(p) = event {
            self.core.process_pointer(p);
        }
    }

    fn paint(&self, scene: &mut Scene) {
        let rect = self.core.rect();
        scene.rect(rect, self.style.background, self.style.corner_radius);
        let fill = rect.w * self.percent() / 100.0;
        if fill > 0.0 {
            scene.rect(
                Rect::new(rect.x, rect.y, fill, rect.h),
                self.style.selection,
                self.style.corner_radius,
            );
        }
        scene.border(rect, self.style.outline, 1.0, self.style.corner_radius);
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
    use std::rc::Rc;

    #[test]
    fn value_clamps_to_the_range_and_emits_change() {
        let mut bar = ProgressBar::new(0.0, 0.0, 200.0, 20.0, 0.0, 50.0, 10.0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        bar.core_mut().on(EventKind::Change, move |args| {
            if let EventArgs::Value(v) = args {
                s.borrow_mut().push(*v);
            }
        });

        bar.set_value(25.0);
        assert_eq!(bar.percent(), 50.0);
        bar.set_value(90.0);
        assert_eq!(bar.value(), 50.0);
        bar.set_value(60.0); // still clamped to 50, no change
        assert_eq!(*seen.borrow(), vec![25.0, 50.0]);
    }

    #[test]
    fn label_follows_the_format_string() {
        let mut bar = ProgressBar::new(0.0, 0.0, 200.0, 20.0, 0.0, 100.0, 25.0);
        assert_eq!(bar.label().text(), "25.00 (25%)");

        bar.set_label_format("#% done");
        bar.set_value(80.0);
        assert_eq!(bar.label().text(), "80% done");
    }

    #[test]
    fn degenerate_range_reports_zero_percent() {
        let bar = ProgressBar::new(0.0, 0.0, 200.0, 20.0, 5.0, 5.0, 5.0);
        assert_eq!(bar.percent(), 0.0);
    }
}
