//! # Typed event registry
//!
//! Every widget carries one `EventRegistry`: a map from `EventKind` to an
//! ordered list of listeners. This replaces per-widget `set_x_evt` setters
//! with a single mechanism shared by all widgets:
//!
//! ```rust
//! use trellis_core::events::*;
//!
//! let mut reg = EventRegistry::default();
//! let id = reg.on(EventKind::Click, |_| println!("clicked"));
//! reg.emit(EventKind::Click, &EventArgs::None);
//! reg.off(EventKind::Click, id);
//! ```
//!
//! Listeners run in registration order. `emit` clones the listener list
//! before invoking it, so a listener may register or remove listeners
//! without invalidating the running dispatch.

use smallvec::SmallVec;
use std::collections::HashMap;
use std::rc::Rc;

use crate::input::{KeyEvent, PointerEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    DoubleClick,
    RightClick,
    MouseDown,
    MouseUp,
    MouseMove,
    MouseEnter,
    MouseLeave,
    KeyDown,
    KeyUp,
    Focus,
    Blur,
    Change,
    Hover,
}

/// Payload delivered to listeners.
#[derive(Clone, Debug)]
pub enum EventArgs {
    None,
    Pointer(PointerEvent),
    Key(KeyEvent),
    Text(String),
    Value(f64),
    Toggled(bool),
}

pub type Listener = Rc<dyn Fn(&EventArgs)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListenerId(u64);

#[derive(Default)]
pub struct EventRegistry {
    next_id: u64,
    slots: HashMap<EventKind, SmallVec<[(ListenerId, Listener); 2]>>,
}

impl EventRegistry {
    pub fn on(&mut self, kind: EventKind, listener: impl Fn(&EventArgs) + 'static) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.slots
            .entry(kind)
            .or_default()
            .push((id, Rc::new(listener)));
        id
    }

    /// Removes one listener; false if it was not registered for `kind`.
    pub fn off(&mut self, kind: EventKind, id: ListenerId) -> bool {
        match self.slots.get_mut(&kind) {
            Some(list) => {
                let before = list.len();
                list.retain(|(lid, _)| *lid != id);
                list.len() != before
            }
            None => false,
        }
    }

    pub fn clear(&mut self, kind: Option<EventKind>) {
        match kind {
            Some(k) => {
                self.slots.remove(&k);
            }
            None => self.slots.clear(),
        }
    }

    pub fn emit(&self, kind: EventKind, args: &EventArgs) {
        let listeners: SmallVec<[Listener; 2]> = match self.slots.get(&kind) {
            Some(list) => list.iter().map(|(_, l)| l.clone()).collect(),
            None => return,
        };
        for l in listeners {
            l(args);
        }
    }

    pub fn has_listeners(&self, kind: EventKind) -> bool {
        self.slots.get(&kind).is_some_and(|l| !l.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn listeners_run_in_registration_order() {
        let mut reg = EventRegistry::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let seen = seen.clone();
            reg.on(EventKind::Click, move |_| seen.borrow_mut().push(i));
        }
        reg.emit(EventKind::Click, &EventArgs::None);
        assert_eq!(*seen.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn off_removes_only_the_target() {
        let mut reg = EventRegistry::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s1 = seen.clone();
        let a = reg.on(EventKind::Change, move |_| s1.borrow_mut().push("a"));
        let s2 = seen.clone();
        reg.on(EventKind::Change, move |_| s2.borrow_mut().push("b"));

        assert!(reg.off(EventKind::Change, a));
        assert!(!reg.off(EventKind::Change, a));
        reg.emit(EventKind::Change, &EventArgs::None);
        assert_eq!(*seen.borrow(), vec!["b"]);
    }

    #[test]
    fn emit_without_listeners_is_a_noop() {
        let reg = EventRegistry::default();
        reg.emit(EventKind::Blur, &EventArgs::None);
    }

    #[test]
    fn clear_one_kind_keeps_the_rest() {
        let mut reg = EventRegistry::default();
        reg.on(EventKind::Click, |_| {});
        reg.on(EventKind::Change, |_| {});
        reg.clear(Some(EventKind::Click));
        assert!(!reg.has_listeners(EventKind::Click));
        assert!(reg.has_listeners(EventKind::Change));
    }
}
