//! # View and event router
//!
//! A `View` owns the top-level widgets of one screen and routes raw input
//! through them. Dispatch rules:
//!
//! - Events are offered to every visible top-level widget in declaration
//!   order, unless a popup holds the event grab
//!   (`set_filter_process_only`), in which case only the grabbing widget's
//!   subtree sees events until the grab is released.
//! - Containers forward pointer events to children as *translated copies*
//!   (`PointerEvent::translated`), composing for arbitrary nesting depth.
//! - After a primary press, the router enforces the single-focus invariant:
//!   the most recently focused node keeps focus, every other focused node
//!   is revoked through `Widget::blur` (so editors run their commit path).
//! - Dispatch returns the cursor of the focused node, else the view
//!   default, for the windowing collaborator to apply.

use crate::blink::RepaintFlag;
use crate::input::{InputEvent, KeyEvent, PointerEvent, PointerEventKind};
use crate::node::{CursorIcon, Widget, WidgetId, subtree_contains};
use crate::scene::Scene;
use crate::Vec2;

/// Per-dispatch context threaded through `Widget::handle_event`.
pub struct EventCtx {
    repaint: RepaintFlag,
    filter: Option<WidgetId>,
    filter_change: Option<Option<WidgetId>>,
}

impl EventCtx {
    pub fn new(repaint: RepaintFlag) -> Self {
        EventCtx {
            repaint,
            filter: None,
            filter_change: None,
        }
    }

    fn with_filter(repaint: RepaintFlag, filter: Option<WidgetId>) -> Self {
        EventCtx {
            repaint,
            filter,
            filter_change: None,
        }
    }

    /// Ask the owning view to repaint; safe to call from any widget.
    pub fn request_repaint(&self) {
        self.repaint.request();
    }

    /// Shared flag for background tasks (caret blinkers).
    pub fn repaint_flag(&self) -> RepaintFlag {
        self.repaint.clone()
    }

    /// True when events may be delivered into `w`'s subtree under the
    /// current grab. Containers consult this before forwarding.
    pub fn allows(&self, w: &dyn Widget) -> bool {
        match self.filter {
            None => true,
            Some(id) => subtree_contains(w, id),
        }
    }

    /// Widget currently holding the event grab, if any.
    pub fn grab_holder(&self) -> Option<WidgetId> {
        self.filter
    }

    /// Grab exclusive event delivery for `id`'s subtree (open popup).
    /// Takes effect after the current dispatch completes.
    pub fn grab_events(&mut self, id: WidgetId) {
        self.filter_change = Some(Some(id));
    }

    /// Release the grab (popup dismissed).
    pub fn release_events(&mut self) {
        self.filter_change = Some(None);
    }
}

pub struct View {
    elements: Vec<Box<dyn Widget>>,
    filter: Option<WidgetId>,
    default_cursor: CursorIcon,
    repaint: RepaintFlag,
}

impl View {
    pub fn new() -> Self {
        Self::with_repaint(RepaintFlag::new())
    }

    /// Build a view around an app-owned repaint flag so background tasks
    /// and the main loop share one hand-off point.
    pub fn with_repaint(repaint: RepaintFlag) -> Self {
        View {
            elements: Vec::new(),
            filter: None,
            default_cursor: CursorIcon::Default,
            repaint,
        }
    }

    pub fn add(&mut self, widget: Box<dyn Widget>) {
        self.elements.push(widget);
    }

    pub fn elements(&self) -> &[Box<dyn Widget>] {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut self.elements
    }

    pub fn set_default_cursor(&mut self, cursor: CursorIcon) {
        self.default_cursor = cursor;
    }

    /// Restrict event delivery to one widget's subtree (transient popups).
    pub fn set_filter_process_only(&mut self, id: WidgetId) {
        log::debug!("event grab -> {id:?}");
        self.filter = Some(id);
    }

    pub fn clear_filter(&mut self) {
        if self.filter.is_some() {
            log::debug!("event grab released");
        }
        self.filter = None;
    }

    pub fn repaint_flag(&self) -> RepaintFlag {
        self.repaint.clone()
    }

    pub fn request_repaint(&self) {
        self.repaint.request();
    }

    /// Consume the pending repaint request, if any (main loop).
    pub fn take_repaint(&self) -> bool {
        self.repaint.take()
    }

    /// Entry point for the external event pump: one pointer event, fully
    /// processed. Returns the cursor the window should show.
    pub fn process_pointer_event(&mut self, kind: PointerEventKind, position: Vec2) -> CursorIcon {
        self.dispatch(&InputEvent::Pointer(PointerEvent::new(kind, position)))
    }

    /// Entry point for the external event pump: one key event.
    pub fn process_key_event(&mut self, event: KeyEvent) -> CursorIcon {
        self.dispatch(&InputEvent::Key(event))
    }

    fn dispatch(&mut self, event: &InputEvent) -> CursorIcon {
        let mut ctx = EventCtx::with_filter(self.repaint.clone(), self.filter);
        for el in self.elements.iter_mut() {
            if el.core().is_visible() && ctx.allows(el.as_ref()) {
                el.handle_event(&mut ctx, event);
            }
        }

        // A primary press may have granted focus while an older holder kept
        // its flag (e.g. the press landed outside neither widget). Enforce
        // exclusivity centrally: newest focus wins, the rest are revoked.
        if matches!(
            event,
            InputEvent::Pointer(p) if p.is_primary_down()
        ) {
            self.enforce_single_focus();
        }

        if let Some(change) = ctx.filter_change.take() {
            match change {
                Some(id) => self.set_filter_process_only(id),
                None => self.clear_filter(),
            }
        }

        let mut cursor = None;
        for el in self.elements.iter() {
            if cursor.is_none() {
                cursor = focused_cursor(el.as_ref());
            }
        }
        cursor.unwrap_or(self.default_cursor)
    }

    fn enforce_single_focus(&mut self) {
        let mut newest = 0u64;
        for el in self.elements.iter() {
            newest = newest.max(max_focus_stamp(el.as_ref()));
        }
        if newest == 0 {
            return;
        }
        for el in self.elements.iter_mut() {
            revoke_focus_except(el.as_mut(), newest);
        }
    }

    /// Paint all visible widgets in declaration order.
    pub fn paint(&self, scene: &mut Scene) {
        for el in self.elements.iter() {
            if el.core().is_visible() {
                el.paint(scene);
            }
        }
    }
}

impl Default for View {
    fn default() -> Self {
        Self::new()
    }
}

fn focused_cursor(w: &dyn Widget) -> Option<CursorIcon> {
    if w.core().is_focused() {
        return Some(w.core().cursor());
    }
    let mut found = None;
    w.for_each_child(&mut |c| {
        if found.is_none() {
            found = focused_cursor(c);
        }
    });
    found
}

fn max_focus_stamp(w: &dyn Widget) -> u64 {
    let mut stamp = if w.core().is_focused() {
        w.core().focus_stamp()
    } else {
        0
    };
    w.for_each_child(&mut |c| {
        stamp = stamp.max(max_focus_stamp(c));
    });
    stamp
}

fn revoke_focus_except(w: &mut dyn Widget, keep: u64) {
    if w.core().is_focused() && w.core().focus_stamp() != keep {
        log::debug!("focus revoked from {:?}", w.core().id());
        w.blur();
    }
    w.for_each_child_mut(&mut |c| revoke_focus_except(c, keep));
}
