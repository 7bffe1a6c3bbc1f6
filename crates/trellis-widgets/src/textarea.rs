use trellis_core::{
    Caret, CaretBlinker, CursorIcon, Direction, EventArgs, EventCtx, EventKind, InputEvent, Key,
    KeyEvent, KeyEventKind, Modifiers, MonospaceMeasure, PointerButton, PointerEventKind, Scene,
    Style, TextFilter, TextMeasure, TextModel, Vec2, Widget, WidgetCore,
};

const PAD: f32 = 5.0;

/// Multi-line text editor. Enter inserts a line break; commit happens on
/// blur only. Vertical scrolling follows the caret and the visible window
/// is what `TextModel::visible_lines` reports for the inner height.
pub struct TextArea {
    core: WidgetCore,
    style: Style,
    model: TextModel,
    measure: Box<dyn TextMeasure>,
    filter: Option<TextFilter>,
    blinker: Option<CaretBlinker>,
    selecting: bool,
}

impl TextArea {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        TextArea {
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

    fn viewport_h(&self) -> f32 {
        (self.core.height() - 2.0 * PAD).max(0.0)
    }

    fn page_rows(&self) -> usize {
        ((self.viewport_h() / self.measure.line_height().max(1.0)) as usize).max(1)
    }

    fn local(&self, pos: Vec2) -> Vec2 {
        pos - self.core.rect().origin() - Vec2::new(PAD, PAD)
    }

    fn commit(&mut self) {
        if let Some(filter) = &self.filter {
            if !filter.matches(&self.model.text()) {
                log::debug!("area rejected by filter {:?}", filter.as_str());
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

    fn caret_touched(&mut self, ctx: &EventCtx) {
        self.model
            .scroll_to_caret(self.viewport_h(), self.measure.as_ref());
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
            Key::Enter => {
                self.model.newline();
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
            Key::ArrowUp => {
                self.model.move_caret(Direction::Up, extend);
                self.caret_touched(ctx);
            }
            Key::ArrowDown => {
                self.model.move_caret(Direction::Down, extend);
                self.caret_touched(ctx);
            }
            Key::PageUp => {
                for _ in 0..self.page_rows() {
                    self.model.move_caret(Direction::Up, extend);
                }
                self.caret_touched(ctx);
            }
            Key::PageDown => {
                for _ in 0..self.page_rows() {
                    self.model.move_caret(Direction::Down, extend);
                }
                self.caret_touched(ctx);
            }
            Key::Home => {
                let row = self.model.caret().row;
                self.model.move_to(Caret::new(row, 0), extend);
                self.caret_touched(ctx);
            }
            Key::End => {
                let row = self.model.caret().row;
                let len = self.model.line(row).len();
                self.model.move_to(Caret::new(row, len), extend);
                self.caret_touched(ctx);
            }
            Key::Escape => {
                self.finish_edit();
                self.core.un_focus();
                ctx.request_repaint();
            }
            _ => {}
        }
    }
}

impl Widget for TextArea {
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
                    .caret_to_point(self.measure.as_ref(), local, self.viewport_h());
                self.selecting = true;
                self.caret_touched(ctx);
            }
            PointerEventKind::Move if self.selecting && self.core.is_focused() => {
                let local = self.local(p.position);
                self.model
                    .extend_to_point(self.measure.as_ref(), local, self.viewport_h());
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
        let lh = self.measure.line_height();
        scene.push_clip(rect);
        for sel in self.model.selection_rects(self.viewport_h(), self.measure.as_ref()) {
            scene.rect(sel.translated(origin), self.style.selection, 0.0);
        }
        for row in self.model.visible_lines(self.viewport_h(), self.measure.as_ref()) {
            let y = (row - self.model.scroll_row()) as f32 * lh;
            scene.text(
                origin + Vec2::new(0.0, y),
                self.model.line(row),
                self.style.foreground,
            );
        }
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
    use trellis_core::{PointerEvent, RepaintFlag};

    fn press(ctx: &mut EventCtx, w: &mut TextArea, x: f32, y: f32) {
        w.handle_event(
            ctx,
            &InputEvent::Pointer(PointerEvent::new(
                PointerEventKind::Down(PointerButton::Primary),
                Vec2::new(x, y),
            )),
        );
    }

    fn key(ctx: &mut EventCtx, w: &mut TextArea, k: Key) {
        w.handle_event(ctx, &InputEvent::Key(KeyEvent::down(k)));
    }

    #[test]
    fn enter_inserts_newline_instead_of_committing() {
        let mut ctx = EventCtx::new(RepaintFlag::new());
        let mut area = TextArea::new(0.0, 0.0, 200.0, 100.0);
        press(&mut ctx, &mut area, 10.0, 10.0);
        key(&mut ctx, &mut area, Key::Character('a'));
        key(&mut ctx, &mut area, Key::Enter);
        key(&mut ctx, &mut area, Key::Character('b'));
        assert!(area.core().is_focused());
        assert_eq!(area.text(), "a\nb");
    }

    #[test]
    fn caret_scrolls_into_view() {
        let mut ctx = EventCtx::new(RepaintFlag::new());
        // Inner height 32px = 2 monospace rows.
        let mut area = TextArea::new(0.0, 0.0, 200.0, 42.0);
        press(&mut ctx, &mut area, 10.0, 10.0);
        for _ in 0..4 {
            key(&mut ctx, &mut area, Key::Enter);
        }
        // Caret on row 4; two visible rows -> scroll_row 3.
        assert_eq!(area.model().caret().row, 4);
        assert_eq!(area.model().scroll_row(), 3);
        for _ in 0..4 {
            key(&mut ctx, &mut area, Key::ArrowUp);
        }
        assert_eq!(area.model().scroll_row(), 0);
    }

    #[test]
    fn drag_selects_across_rows() {
        let mut ctx = EventCtx::new(RepaintFlag::new());
        let mut area = TextArea::new(0.0, 0.0, 200.0, 100.0);
        area.set_text("abcd\nefgh");
        // Press at row 0 col 1 (x = 5 + 8), drag to row 1 col 3 (x = 5 + 24).
        press(&mut ctx, &mut area, 13.0, 8.0);
        area.handle_event(
            &mut ctx,
            &InputEvent::Pointer(PointerEvent::new(
                PointerEventKind::Move,
                Vec2::new(29.0, 24.0),
            )),
        );
        let (start, end) = area.model().selection_range().unwrap();
        assert_eq!(start, Caret::new(0, 1));
        assert_eq!(end, Caret::new(1, 3));
    }

    #[test]
    fn blur_commits_through_the_filter() {
        let mut ctx = EventCtx::new(RepaintFlag::new());
        let mut area = TextArea::new(0.0, 0.0, 200.0, 100.0)
            .with_filter(TextFilter::new("^ok$").unwrap());
        press(&mut ctx, &mut area, 10.0, 10.0);
        for c in "nope".chars() {
            key(&mut ctx, &mut area, Key::Character(c));
        }
        area.blur();
        assert_eq!(area.text(), "");
        assert!(!area.core().is_focused());
    }
}
