use trellis_core::{
    Caret, CaretBlinker, CursorIcon, Direction, EventArgs, EventCtx, EventKind, InputEvent, Key,
    KeyEvent, KeyEventKind, Modifiers, MonospaceMeasure, PointerButton, PointerEventKind, Scene,
    Style, TextFilter, TextMeasure, TextModel, Vec2, Widget, WidgetCore,
};

const PAD: f32 = 5.0;

/// Single-line text editor.
///
/// The buffer lives in a [`TextModel`] pinned to one row (Enter commits
/// instead of inserting a newline). Focus starts the caret blinker; losing
/// focus by any route (outside press, Enter, router revocation) runs the
/// commit path: an optional [`TextFilter`] mismatch clears the text, and
/// `Change` always reports the final buffer.
pub struct TextInput {
    core: WidgetCore,
    style: Style,
    model: TextModel,
    measure: Box<dyn TextMeasure>,
    filter: Option<TextFilter>,
    blinker: Option<CaretBlinker>,
    selecting: bool,
}

impl TextInput {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        TextInput {
            core: WidgetCore::new(x, y, width, height).with_cursor(CursorIcon::IBeam),
            style: Style::default(),
            model: TextModel::new(),
            measure: Box::new(MonospaceMeasure::default()),
            filter: None,
            blinker: None,
            selecting: false,
        }
    }

    pub fn with_filter(mut self, filter: TextFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn text(&self) -> String {
        self.model.text()
    }

    pub fn set_text(&mut self, text: &str) {
        debug_assert!(!text.contains('\n'));
        self.model.set_text(text);
    }

    pub fn set_measure(&mut self, measure: Box<dyn TextMeasure>) {
        self.measure = measure;
    }

    pub fn set_filter(&mut self, filter: Option<TextFilter>) {
        self.filter = filter;
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    pub fn model(&self) -> &TextModel {
        &self.model
    }

    fn local(&self, pos: Vec2) -> Vec2 {
        pos - self.core.rect().origin() - Vec2::new(PAD, PAD)
    }

    /// Filter check, `Change` with the final text, selection cleared.
    fn commit(&mut self) {
        if let Some(filter) = &self.filter {
            if !filter.matches(&self.model.text()) {
                log::debug!("input rejected by filter {:?}", filter.as_str());
                self.model.set_text("");
            }
        }
        self.core
            .emit(EventKind::Change, &EventArgs::Text(self.model.text()));
        self.model.clear_selection();
    }

    fn finish_edit(&mut self) {
        self.selecting = false;
        self.blinker = None;
        self.commit();
    }

    fn caret_touched(&self, ctx: &EventCtx) {
        if let Some(blinker) = &self.blinker {
            blinker.reset();
        }
        ctx.request_repaint();
    }

    fn handle_key(&mut self, ctx: &mut EventCtx, k: &KeyEvent) {
        self.core.process_key(k);
        if !self.core.is_focused() || k.kind != KeyEventKind::Down {
            return;
        }
        let extend = k.modifiers.contains(Modifiers::SHIFT);
        match k.key {
            Key::Character(c) if k.modifiers.contains(Modifiers::CTRL) => {
                if c == 'a' {
                    self.model.select_all();
                    self.caret_touched(ctx);
                }
            }
            Key::Character(c) if !c.is_control() => {
                self.model.insert_char(c);
                self.caret_touched(ctx);
            }
            Key::Backspace => {
                self.model.delete_backward();
                self.caret_touched(ctx);
            }
            Key::Delete => {
                self.model.delete_forward();
                self.caret_touched(ctx);
            }
            Key::ArrowLeft => {
                self.model.move_caret(Direction::Left, extend);
                self.caret_touched(ctx);
            }
            Key::ArrowRight => {
                self.model.move_caret(Direction::Right, extend);
                self.caret_touched(ctx);
            }
            Key::Home => {
                self.model.move_to(Caret::new(0, 0), extend);
                self.caret_touched(ctx);
            }
            Key::End => {
                self.model.move_to(Caret::new(0, self.model.line(0).len()), extend);
                self.caret_touched(ctx);
            }
            Key::Enter | Key::Escape => {
                self.finish_edit();
                self.core.un_focus();
                ctx.request_repaint();
            }
            _ => {}
        }
    }
}

impl Widget for TextInput {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn handle_event(&mut self, ctx: &mut EventCtx, event: &InputEvent) {
        let p = match event {
            InputEvent::Pointer(p) => p,
            InputEvent::Key(k) => {
                self.handle_key(ctx, k);
                return;
            }
        };
        let out = self.core.process_pointer(p);
        if out.focus_gained {
            self.blinker = Some(CaretBlinker::spawn(ctx.repaint_flag()));
        }
        match p.kind {
            PointerEventKind::Down(PointerButton::Primary) if out.inside => {
                let local = self.local(p.position);
                self.model
                    .caret_to_point(self.measure.as_ref(), local, self.measure.line_height());
                self.selecting = true;
                self.caret_touched(ctx);
            }
            PointerEventKind::Move if self.selecting && self.core.is_focused() => {
                let local = self.local(p.position);
                self.model
                    .extend_to_point(self.measure.as_ref(), local, self.measure.line_height());
                self.caret_touched(ctx);
            }
            PointerEventKind::Up(_) => {
                self.selecting = false;
            }
            _ => {}
        }
        if out.focus_lost {
            self.finish_edit();
            ctx.request_repaint();
        }
    }

    fn paint(&self, scene: &mut Scene) {
        let rect = self.core.rect();
        let focused = self.core.is_focused();
        let bg = if focused {
            self.style.focused_background()
        } else {
            self.style.background
        };
        scene.rect(rect, bg, self.style.corner_radius);
        scene.border(
            rect,
            self.style.outline,
            if focused { 2.0 } else { 1.0 },
            self.style.corner_radius,
        );

        let origin = rect.origin() + Vec2::new(PAD, PAD);
        scene.push_clip(rect);
        let lh = self.measure.line_height();
        for sel in self.model.selection_rects(lh, self.measure.as_ref()) {
            scene.rect(sel.translated(origin), self.style.selection, 0.0);
        }
        scene.text(origin, self.model.line(0), self.style.foreground);
        if focused && self.blinker.as_ref().is_some_and(CaretBlinker::phase) {
            let caret = self.model.caret_position(self.measure.as_ref()) + origin;
            scene.line(caret, caret + Vec2::new(0.0, lh), self.style.foreground, 1.0);
        }
        scene.pop_clip();
    }

    fn blur(&mut self) {
        if self.core.is_focused() {
            self.finish_edit();
            self.core.un_focus();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use trellis_core::{PointerEvent, RepaintFlag};

    fn press(ctx: &mut EventCtx, w: &mut TextInput, x: f32, y: f32) {
        w.handle_event(
            ctx,
            &InputEvent::Pointer(PointerEvent::new(
                PointerEventKind::Down(PointerButton::Primary),
                Vec2::new(x, y),
            )),
        );
    }

    fn type_str(ctx: &mut EventCtx, w: &mut TextInput, s: &str) {
        for c in s.chars() {
            w.handle_event(ctx, &InputEvent::Key(KeyEvent::down(Key::Character(c))));
        }
    }

    fn changes(w: &mut TextInput) -> Rc<RefCell<Vec<String>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        w.core_mut().on(EventKind::Change, move |args| {
            if let EventArgs::Text(t) = args {
                s.borrow_mut().push(t.clone());
            }
        });
        seen
    }

    #[test]
    fn typing_requires_focus() {
        let mut ctx = EventCtx::new(RepaintFlag::new());
        let mut input = TextInput::new(0.0, 0.0, 200.0, 24.0);
        type_str(&mut ctx, &mut input, "no");
        assert_eq!(input.text(), "");

        press(&mut ctx, &mut input, 10.0, 10.0);
        type_str(&mut ctx, &mut input, "yes");
        assert_eq!(input.text(), "yes");
    }

    #[test]
    fn enter_commits_and_blurs() {
        let mut ctx = EventCtx::new(RepaintFlag::new());
        let mut input = TextInput::new(0.0, 0.0, 200.0, 24.0);
        let seen = changes(&mut input);
        press(&mut ctx, &mut input, 10.0, 10.0);
        type_str(&mut ctx, &mut input, "hi");
        input.handle_event(&mut ctx, &InputEvent::Key(KeyEvent::down(Key::Enter)));
        assert!(!input.core().is_focused());
        assert_eq!(*seen.borrow(), vec!["hi".to_string()]);
    }

    #[test]
    fn filter_mismatch_clears_on_commit() {
        let mut ctx = EventCtx::new(RepaintFlag::new());
        let mut input = TextInput::new(0.0, 0.0, 200.0, 24.0)
            .with_filter(TextFilter::new("^[A-Z][0-9]+$").unwrap());
        let seen = changes(&mut input);

        press(&mut ctx, &mut input, 10.0, 10.0);
        type_str(&mut ctx, &mut input, "A12");
        input.handle_event(&mut ctx, &InputEvent::Key(KeyEvent::down(Key::Enter)));
        assert_eq!(input.text(), "A12");

        press(&mut ctx, &mut input, 10.0, 10.0);
        input.handle_event(
            &mut ctx,
            &InputEvent::Key(KeyEvent::down_with(Key::Character('a'), Modifiers::CTRL)),
        );
        type_str(&mut ctx, &mut input, "bad");
        input.handle_event(&mut ctx, &InputEvent::Key(KeyEvent::down(Key::Enter)));
        assert_eq!(input.text(), "");
        assert_eq!(*seen.borrow(), vec!["A12".to_string(), "".to_string()]);
    }

    #[test]
    fn outside_press_runs_the_commit_path() {
        let mut ctx = EventCtx::new(RepaintFlag::new());
        let mut input = TextInput::new(0.0, 0.0, 200.0, 24.0);
        let seen = changes(&mut input);
        press(&mut ctx, &mut input, 10.0, 10.0);
        type_str(&mut ctx, &mut input, "x");
        press(&mut ctx, &mut input, 500.0, 500.0);
        assert!(!input.core().is_focused());
        assert_eq!(*seen.borrow(), vec!["x".to_string()]);
    }

    #[test]
    fn pointer_press_places_the_caret() {
        let mut ctx = EventCtx::new(RepaintFlag::new());
        let mut input = TextInput::new(0.0, 0.0, 200.0, 24.0);
        press(&mut ctx, &mut input, 10.0, 10.0);
        type_str(&mut ctx, &mut input, "hello");
        // Monospace 8px, 5px padding: boundary after "he" is at x = 5 + 16.
        press(&mut ctx, &mut input, 21.0, 10.0);
        assert_eq!(input.model().caret(), Caret::new(0, 2));
    }

    #[test]
    fn focus_starts_the_blinker() {
        let mut ctx = EventCtx::new(RepaintFlag::new());
        let mut input = TextInput::new(0.0, 0.0, 200.0, 24.0);
        assert!(input.blinker.is_none());
        press(&mut ctx, &mut input, 10.0, 10.0);
        assert!(input.blinker.is_some());
        input.blur();
        assert!(input.blinker.is_none());
    }
}
