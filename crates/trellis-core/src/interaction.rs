//! # Interaction state machine
//!
//! Every interactive widget runs the same small protocol over incoming
//! pointer events: hover enter/leave tracking, click/right-click emission,
//! focus on primary press inside, blur on primary press outside. Widgets
//! call `WidgetCore::process_pointer` from `handle_event` and react to the
//! returned `PointerOutcome` for their own behavior (toggle, begin drag,
//! place caret).
//!
//! Drag-capable widgets (slider, scrollbars, pannable canvas) additionally
//! keep a `DragState`: a snapshot of the pointer position and the dragged
//! value taken on press, consumed on every motion, discarded on release.

use std::time::{Duration, Instant};

use crate::Vec2;
use crate::events::{EventArgs, EventKind};
use crate::input::{KeyEvent, KeyEventKind, PointerButton, PointerEvent, PointerEventKind};
use crate::node::WidgetCore;

const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(300);

/// What the shared protocol decided for one pointer event.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerOutcome {
    /// Pointer position is inside the widget's rect.
    pub inside: bool,
    /// Primary button went down inside the rect.
    pub clicked: bool,
    /// This event granted focus.
    pub focus_gained: bool,
    /// This event revoked focus (primary press outside).
    pub focus_lost: bool,
}

impl WidgetCore {
    /// Apply the shared hover/click/focus protocol to one pointer event.
    pub fn process_pointer(&mut self, ev: &PointerEvent) -> PointerOutcome {
        let mut out = PointerOutcome::default();
        let inside = self.rect().contains(ev.position);
        out.inside = inside;

        // Hover tracking on every pointer event.
        if inside && !self.mouse_inside {
            self.mouse_inside = true;
            self.set_hovered(true);
            self.emit(EventKind::MouseEnter, &EventArgs::Pointer(*ev));
        } else if !inside && self.mouse_inside {
            self.mouse_inside = false;
            self.set_hovered(false);
            self.emit(EventKind::MouseLeave, &EventArgs::Pointer(*ev));
        }

        match ev.kind {
            PointerEventKind::Down(button) => {
                if inside {
                    self.emit(EventKind::MouseDown, &EventArgs::Pointer(*ev));
                    match button {
                        PointerButton::Primary => {
                            out.clicked = true;
                            self.emit(EventKind::Click, &EventArgs::Pointer(*ev));
                            let now = Instant::now();
                            if self
                                .last_click
                                .is_some_and(|t| now.duration_since(t) < DOUBLE_CLICK_WINDOW)
                            {
                                self.last_click = None;
                                self.emit(EventKind::DoubleClick, &EventArgs::Pointer(*ev));
                            } else {
                                self.last_click = Some(now);
                            }
                            if !self.is_focused() {
                                self.focus();
                                out.focus_gained = true;
                            }
                        }
                        PointerButton::Secondary => {
                            self.emit(EventKind::RightClick, &EventArgs::Pointer(*ev));
                        }
                        PointerButton::Tertiary => {}
                    }
                } else if button == PointerButton::Primary && self.is_focused() {
                    self.un_focus();
                    out.focus_lost = true;
                }
            }
            PointerEventKind::Up(_) => {
                if inside {
                    self.emit(EventKind::MouseUp, &EventArgs::Pointer(*ev));
                }
            }
            PointerEventKind::Move => {
                if inside {
                    self.emit(EventKind::MouseMove, &EventArgs::Pointer(*ev));
                    self.emit(EventKind::Hover, &EventArgs::Pointer(*ev));
                }
            }
        }
        out
    }

    /// Key events reach listeners only while the widget holds focus.
    pub fn process_key(&self, ev: &KeyEvent) {
        if !self.is_focused() {
            return;
        }
        let kind = match ev.kind {
            KeyEventKind::Down => EventKind::KeyDown,
            KeyEventKind::Up => EventKind::KeyUp,
        };
        self.emit(kind, &EventArgs::Key(*ev));
    }
}

/// Snapshot captured when a drag begins; lives for one press-drag-release.
#[derive(Clone, Copy, Debug)]
pub struct DragSession {
    pub start_pointer: Vec2,
    pub start_value: Vec2,
}

impl DragSession {
    /// Dragged value for the current pointer position.
    pub fn value(&self, pointer: Vec2, sensitivity: f32) -> Vec2 {
        self.start_value + (pointer - self.start_pointer) * sensitivity
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DragState {
    session: Option<DragSession>,
}

impl DragState {
    pub fn begin(&mut self, pointer: Vec2, value: Vec2) {
        self.session = Some(DragSession {
            start_pointer: pointer,
            start_value: value,
        });
    }

    pub fn session(&self) -> Option<DragSession> {
        self.session
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn end(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn move_to(x: f32, y: f32) -> PointerEvent {
        PointerEvent::new(PointerEventKind::Move, Vec2::new(x, y))
    }

    fn press(x: f32, y: f32) -> PointerEvent {
        PointerEvent::new(
            PointerEventKind::Down(PointerButton::Primary),
            Vec2::new(x, y),
        )
    }

    #[test]
    fn hover_enter_then_leave() {
        let mut core = WidgetCore::new(10.0, 10.0, 50.0, 20.0);
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = log.clone();
        core.on(EventKind::MouseEnter, move |_| l.borrow_mut().push("enter"));
        let l = log.clone();
        core.on(EventKind::MouseLeave, move |_| l.borrow_mut().push("leave"));

        core.process_pointer(&move_to(20.0, 15.0));
        assert!(core.is_hovered());
        core.process_pointer(&move_to(20.0, 16.0)); // still inside, no re-enter
        core.process_pointer(&move_to(200.0, 200.0));
        assert!(!core.is_hovered());
        assert_eq!(*log.borrow(), vec!["enter", "leave"]);
    }

    #[test]
    fn primary_press_inside_focuses_outside_blurs() {
        let mut core = WidgetCore::new(0.0, 0.0, 40.0, 40.0);
        let out = core.process_pointer(&press(5.0, 5.0));
        assert!(out.clicked && out.focus_gained);
        assert!(core.is_focused());

        // A second press inside does not re-grant focus.
        let out = core.process_pointer(&press(6.0, 6.0));
        assert!(out.clicked && !out.focus_gained);

        let out = core.process_pointer(&press(100.0, 100.0));
        assert!(out.focus_lost);
        assert!(!core.is_focused());
    }

    #[test]
    fn key_events_require_focus() {
        let mut core = WidgetCore::new(0.0, 0.0, 40.0, 40.0);
        let hits = Rc::new(RefCell::new(0));
        let h = hits.clone();
        core.on(EventKind::KeyDown, move |_| *h.borrow_mut() += 1);

        core.process_key(&KeyEvent::down(crate::input::Key::Enter));
        assert_eq!(*hits.borrow(), 0);
        core.focus();
        core.process_key(&KeyEvent::down(crate::input::Key::Enter));
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn drag_session_tracks_delta() {
        let mut drag = DragState::default();
        drag.begin(Vec2::new(100.0, 0.0), Vec2::new(30.0, 0.0));
        let s = drag.session().unwrap();
        assert_eq!(s.value(Vec2::new(140.0, 0.0), 1.0).x, 70.0);
        assert_eq!(s.value(Vec2::new(60.0, 0.0), 0.5).x, 10.0);
        drag.end();
        assert!(!drag.is_active());
    }
}
