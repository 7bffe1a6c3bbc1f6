use trellis_core::{
    EventArgs, EventCtx, EventKind, InputEvent, Rect, Scene, Style, Vec2, Widget, WidgetCore,
};

use crate::scrollbar::{HorizontalScrollbar, VerticalScrollbar};

const SCROLLBAR_WIDTH: f32 = 12.0;
const HEADER_HEIGHT: f32 = 26.0;
const ROW_HEIGHT: f32 = 22.0;
const CELL_PAD: f32 = 10.0;
const CHAR_WIDTH: f32 = 8.0;

/// Grid of text cells under a fixed header row. Columns are sized to their
/// widest cell and stretched to an equal split when everything fits; both
/// axes scroll when the content overflows. A primary press on a body row
/// selects it and emits `Change` with the row index.
pub struct Table {
    core: WidgetCore,
    style: Style,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<f32>,
    selected: Option<usize>,
    v_scroll: VerticalScrollbar,
    h_scroll: HorizontalScrollbar,
}

impl Table {
    pub fn new(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        let mut v_scroll =
            VerticalScrollbar::new(x + width - SCROLLBAR_WIDTH, y, SCROLLBAR_WIDTH, height, height);
        v_scroll.core_mut().set_visible(false);
        let mut h_scroll = HorizontalScrollbar::new(
            x,
            y + height - SCROLLBAR_WIDTH,
            width - SCROLLBAR_WIDTH,
            SCROLLBAR_WIDTH,
            width - SCROLLBAR_WIDTH,
        );
        h_scroll.core_mut().set_visible(false);
        let mut table = Table {
            core: WidgetCore::new(x, y, width, height),
            style: Style::default(),
            headers,
            rows,
            col_widths: Vec::new(),
            selected: None,
            v_scroll,
            h_scroll,
        };
        table.refresh();
        table
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Replace the body rows. Clears the selection and resizes columns
    /// and scrollbars for the new content.
    pub fn set_rows(&mut self, rows: Vec<Vec<String>>) {
        self.rows = rows;
        self.selected = None;
        self.refresh();
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&[String]> {
        self.selected.and_then(|i| self.rows.get(i)).map(Vec::as_slice)
    }

    pub fn column_widths(&self) -> &[f32] {
        &self.col_widths
    }

    pub fn vertical_scrollbar(&self) -> &VerticalScrollbar {
        &self.v_scroll
    }

    pub fn horizontal_scrollbar(&self) -> &HorizontalScrollbar {
        &self.h_scroll
    }

    pub fn vertical_scrollbar_mut(&mut self) -> &mut VerticalScrollbar {
        &mut self.v_scroll
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn body_width(&self) -> f32 {
        self.core.width() - SCROLLBAR_WIDTH
    }

    fn content_width(&self) -> f32 {
        self.col_widths.iter().sum()
    }

    fn content_height(&self) -> f32 {
        HEADER_HEIGHT + ROW_HEIGHT * self.rows.len() as f32
    }

    fn scroll_x(&self) -> f32 {
        self.h_scroll.ratio() * (self.content_width() - self.body_width()).max(0.0)
    }

    fn scroll_y(&self) -> f32 {
        self.v_scroll.ratio() * (self.content_height() - self.core.height()).max(0.0)
    }

    fn refresh(&mut self) {
        // Widest cell per column wins; equal split when the natural
        // widths all fit the viewport.
        self.col_widths = self
            .headers
            .iter()
            .map(|h| h.len() as f32 * CHAR_WIDTH + CELL_PAD)
            .collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(self.col_widths.len()) {
                let w = cell.len() as f32 * CHAR_WIDTH + CELL_PAD;
                if w > self.col_widths[i] {
                    self.col_widths[i] = w;
                }
            }
        }
        let body_w = self.body_width();
        if self.content_width() <= body_w && !self.col_widths.is_empty() {
            let even = body_w / self.col_widths.len() as f32;
            self.col_widths.fill(even);
        }

        let h = self.core.height();
        let content_h = self.content_height();
        let v_scrollable = content_h > h;
        self.v_scroll.core_mut().set_visible(v_scrollable);
        if v_scrollable {
            let handle = (h / content_h * h).max(16.0);
            self.v_scroll.set_handle_height(handle.min(h));
        }

        let content_w = self.content_width();
        let h_scrollable = content_w > body_w;
        self.h_scroll.core_mut().set_visible(h_scrollable);
        if h_scrollable {
            let handle = (body_w / content_w * body_w).max(16.0);
            self.h_scroll.set_handle_width(handle.min(body_w));
        }
    }

    /// Body row index under a screen-space point, if any.
    fn row_hit(&self, pos: Vec2) -> Option<usize> {
        let rect = self.core.rect();
        let mut body_h = rect.h - HEADER_HEIGHT;
        if self.h_scroll.core().is_visible() {
            body_h -= SCROLLBAR_WIDTH;
        }
        let body = Rect::new(rect.x, rect.y + HEADER_HEIGHT, self.body_width(), body_h);
        if !body.contains(pos) {
            return None;
        }
        let local = pos.y - body.y + self.scroll_y();
        let idx = (local / ROW_HEIGHT) as usize;
        (idx < self.rows.len()).then_some(idx)
    }
}

impl Widget for Table {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn handle_event(&mut self, ctx: &mut EventCtx, event: &InputEvent) {
        if self.v_scroll.core().is_visible() && ctx.allows(&self.v_scroll) {
            self.v_scroll.handle_event(ctx, event);
        }
        if self.h_scroll.core().is_visible() && ctx.allows(&self.h_scroll) {
            self.h_scroll.handle_event(ctx, event);
        }

        if let InputEvent::Pointer(p) = event {
            if p.is_primary_down() {
                if let Some(idx) = self.row_hit(p.position) {
                    self.selected = Some(idx);
                    self.core
                        .emit(EventKind::Change, &EventArgs::Value(idx as f64));
                    ctx.request_repaint();
                }
            } else {
                self.core.process_pointer(p);
            }
        }
    }

    fn paint(&self, scene: &mut Scene) {
        let rect = self.core.rect();
        scene.rect(rect, self.style.background, self.style.corner_radius);
        scene.push_clip(rect);

        let scroll_x = self.scroll_x();
        let top = rect.y + HEADER_HEIGHT - self.scroll_y();
        for (j, row) in self.rows.iter().enumerate() {
            let row_y = top + j as f32 * ROW_HEIGHT;
            if row_y + ROW_HEIGHT < rect.y + HEADER_HEIGHT || row_y > rect.y + rect.h {
                continue;
            }
            if self.selected == Some(j) {
                scene.rect(
                    Rect::new(rect.x, row_y, self.body_width(), ROW_HEIGHT),
                    self.style.selection,
                    0.0,
                );
            }
            let mut cell_x = rect.x - scroll_x;
            for (i, cell) in row.iter().enumerate().take(self.col_widths.len()) {
                scene.text(
                    Vec2::new(cell_x + CELL_PAD / 2.0, row_y + 3.0),
                    cell,
                    self.style.foreground,
                );
                cell_x += self.col_widths[i];
            }
        }

        // Header painted last so scrolled rows slide underneath it.
        let header = Rect::new(rect.x, rect.y, rect.w, HEADER_HEIGHT);
        scene.rect(header, self.style.background.scaled(1.3), 0.0);
        let mut cell_x = rect.x - scroll_x;
        for (i, title) in self.headers.iter().enumerate() {
            scene.text(
                Vec2::new(cell_x + CELL_PAD / 2.0, rect.y + 5.0),
                title,
                self.style.foreground,
            );
            cell_x += self.col_widths[i];
            scene.line(
                Vec2::new(cell_x, rect.y),
                Vec2::new(cell_x, rect.y + rect.h),
                self.style.outline,
                1.0,
            );
        }
        scene.pop_clip();

        if self.v_scroll.core().is_visible() {
            self.v_scroll.paint(scene);
        }
        if self.h_scroll.core().is_visible() {
            self.h_scroll.paint(scene);
        }
        scene.border(rect, self.style.outline, 1.0, self.style.corner_radius);
    }

    fn for_each_child(&self, f: &mut dyn FnMut(&dyn Widget)) {
        f(&self.v_scroll);
        f(&self.h_scroll);
    }

    fn for_each_child_mut(&mut self, f: &mut dyn FnMut(&mut dyn Widget)) {
        f(&mut self.v_scroll);
        f(&mut self.h_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use trellis_core::{PointerButton, PointerEvent, PointerEventKind, RepaintFlag};

    fn sample(rows: usize) -> Table {
        let body = (0..rows)
            .map(|i| vec![format!("row {i}"), "x".to_string()])
            .collect();
        Table::new(
            0.0,
            0.0,
            212.0,
            150.0,
            vec!["name".into(), "val".into()],
            body,
        )
    }

    fn press(ctx: &mut EventCtx, table: &mut Table, x: f32, y: f32) {
        table.handle_event(
            ctx,
            &InputEvent::Pointer(PointerEvent::new(
                PointerEventKind::Down(PointerButton::Primary),
                Vec2::new(x, y),
            )),
        );
    }

    #[test]
    fn columns_split_evenly_when_the_content_fits() {
        let table = sample(3);
        // Natural widths (50, 34) fit the 200px body, so both stretch.
        assert_eq!(table.column_widths(), &[100.0, 100.0]);
        assert!(!table.horizontal_scrollbar().core().is_visible());
    }

    #[test]
    fn wide_content_keeps_natural_widths_and_scrolls() {
        let long = "a cell far wider than the whole table viewport";
        let mut table = sample(2);
        table.set_rows(vec![vec![long.into(), "x".into()]]);
        assert!(table.column_widths()[0] > table.column_widths()[1]);
        assert!(table.horizontal_scrollbar().core().is_visible());
    }

    #[test]
    fn clicking_a_body_row_selects_it_and_reports_the_index() {
        let mut ctx = EventCtx::new(RepaintFlag::new());
        let mut table = sample(4);
        let picked = Rc::new(RefCell::new(Vec::new()));
        let p = picked.clone();
        table.core_mut().on(EventKind::Change, move |args| {
            if let EventArgs::Value(v) = args {
                p.borrow_mut().push(*v);
            }
        });

        // Header occupies y < 26; row 1 spans [48, 70).
        press(&mut ctx, &mut table, 10.0, 10.0);
        assert_eq!(table.selected(), None);
        press(&mut ctx, &mut table, 10.0, 50.0);
        assert_eq!(table.selected(), Some(1));
        assert_eq!(*picked.borrow(), vec![1.0]);
        assert_eq!(table.selected_row().map(|r| r[0].as_str()), Some("row 1"));
    }

    #[test]
    fn scrolled_clicks_resolve_against_the_shifted_rows() {
        let mut ctx = EventCtx::new(RepaintFlag::new());
        let mut table = sample(20);
        assert!(table.vertical_scrollbar().core().is_visible());

        // Content is 466px against a 150px viewport; full scroll shifts
        // the body up by 316px, so y = 50 lands 340px into it: row 15.
        table.vertical_scrollbar_mut().set_ratio(1.0);
        press(&mut ctx, &mut table, 10.0, 50.0);
        assert_eq!(table.selected(), Some(15));
    }
}
