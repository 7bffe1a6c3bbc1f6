//! # Widget nodes
//!
//! `WidgetCore` is the state every interactive element owns: anchored
//! geometry with a cached bounding rect, visibility, hover/focus flags, a
//! preferred cursor, and the per-instance event registry. Concrete widgets
//! embed one core and implement the `Widget` trait around it.
//!
//! Holding children is a capability, not a subtype: any widget may override
//! `for_each_child` / `for_each_child_mut` to expose an ordered sequence of
//! children (a checkbox exposes its label; a panel exposes its content).
//! Parents own children exclusively; nothing in the tree points back up.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::events::{EventArgs, EventKind, EventRegistry, ListenerId};
use crate::geometry::{Anchor, Rect, resolve_rect};
use crate::input::InputEvent;
use crate::scene::Scene;
use crate::view::EventCtx;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorIcon {
    #[default]
    Default,
    Hand,
    IBeam,
    ResizeH,
    ResizeV,
    Move,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WidgetId(u64);

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);
static FOCUS_CLOCK: AtomicU64 = AtomicU64::new(1);

pub struct WidgetCore {
    id: WidgetId,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    anchor_x: Anchor,
    anchor_y: Anchor,
    rect: Rect,
    visible: bool,
    hovered: bool,
    focused: bool,
    focus_stamp: u64,
    cursor: CursorIcon,
    events: EventRegistry,
    // interaction state, driven by `process_pointer`
    pub(crate) mouse_inside: bool,
    pub(crate) last_click: Option<std::time::Instant>,
}

impl WidgetCore {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        let mut core = WidgetCore {
            id: WidgetId(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed)),
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
            anchor_x: Anchor::default(),
            anchor_y: Anchor::default(),
            rect: Rect::default(),
            visible: true,
            hovered: false,
            focused: false,
            focus_stamp: 0,
            cursor: CursorIcon::default(),
            events: EventRegistry::default(),
            mouse_inside: false,
            last_click: None,
        };
        core.update_rect();
        core
    }

    pub fn with_cursor(mut self, cursor: CursorIcon) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn set_x(&mut self, x: f32) {
        self.x = x;
        self.update_rect();
    }

    pub fn set_y(&mut self, y: f32) {
        self.y = y;
        self.update_rect();
    }

    pub fn set_width(&mut self, width: f32) {
        if width >= 0.0 {
            self.width = width;
            self.update_rect();
        }
    }

    pub fn set_height(&mut self, height: f32) {
        if height >= 0.0 {
            self.height = height;
            self.update_rect();
        }
    }

    pub fn set_anchor_x(&mut self, anchor: Anchor) {
        self.anchor_x = anchor;
        self.update_rect();
    }

    pub fn set_anchor_y(&mut self, anchor: Anchor) {
        self.anchor_y = anchor;
        self.update_rect();
    }

    fn update_rect(&mut self) {
        self.rect = resolve_rect(
            self.x,
            self.y,
            self.width,
            self.height,
            self.anchor_x,
            self.anchor_y,
        );
    }

    /// Cached bounding box; recomputed by every geometry setter.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub(crate) fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub(crate) fn focus_stamp(&self) -> u64 {
        self.focus_stamp
    }

    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: CursorIcon) {
        self.cursor = cursor;
    }

    /// Grant focus; emits `Focus` when the flag actually flips.
    pub fn focus(&mut self) {
        if !self.focused {
            self.focused = true;
            self.focus_stamp = FOCUS_CLOCK.fetch_add(1, Ordering::Relaxed);
            log::trace!("widget {:?} focused", self.id);
            self.events.emit(EventKind::Focus, &EventArgs::None);
        }
    }

    /// Revoke focus; emits `Blur` when the flag actually flips.
    pub fn un_focus(&mut self) {
        if self.focused {
            self.focused = false;
            log::trace!("widget {:?} blurred", self.id);
            self.events.emit(EventKind::Blur, &EventArgs::None);
        }
    }

    pub fn on(&mut self, kind: EventKind, listener: impl Fn(&EventArgs) + 'static) -> ListenerId {
        self.events.on(kind, listener)
    }

    pub fn off(&mut self, kind: EventKind, id: ListenerId) -> bool {
        self.events.off(kind, id)
    }

    pub fn emit(&self, kind: EventKind, args: &EventArgs) {
        self.events.emit(kind, args);
    }

    pub fn listeners(&self) -> &EventRegistry {
        &self.events
    }
}

pub trait Widget {
    fn core(&self) -> &WidgetCore;
    fn core_mut(&mut self) -> &mut WidgetCore;

    /// One fully-processed input event in this widget's coordinate space.
    fn handle_event(&mut self, ctx: &mut EventCtx, event: &InputEvent);

    fn paint(&self, scene: &mut Scene);

    /// Child capability: widgets with children visit them in order.
    fn for_each_child(&self, _f: &mut dyn FnMut(&dyn Widget)) {}
    fn for_each_child_mut(&mut self, _f: &mut dyn FnMut(&mut dyn Widget)) {}

    /// Revoke focus from outside (router arbitration). Widgets with teardown
    /// tied to focus (blink tasks, commit-on-blur) override this.
    fn blur(&mut self) {
        self.core_mut().un_focus();
    }
}

/// Blur every focused widget in `w`'s subtree, `w` included. Containers
/// hiding a branch of the tree call this so an editor in the hidden branch
/// commits and releases focus instead of holding it unreachably.
pub fn blur_subtree(w: &mut dyn Widget) {
    if w.core().is_focused() {
        w.blur();
    }
    w.for_each_child_mut(&mut |c| blur_subtree(c));
}

/// Depth-first search for `id` in `w`'s subtree.
pub fn subtree_contains(w: &dyn Widget, id: WidgetId) -> bool {
    if w.core().id() == id {
        return true;
    }
    let mut found = false;
    w.for_each_child(&mut |c| {
        if !found {
            found = subtree_contains(c, id);
        }
    });
    found
}
