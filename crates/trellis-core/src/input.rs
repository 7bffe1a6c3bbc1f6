use crate::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,   // Left mouse, touch
    Secondary, // Right mouse
    Tertiary,  // Middle mouse
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEventKind {
    Down(PointerButton),
    Up(PointerButton),
    Move,
}

/// A pointer event in some coordinate space. Containers hand their children
/// a `translated` copy rather than mutating a shared event in place.
#[derive(Clone, Copy, Debug)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: Vec2,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Vec2) -> Self {
        PointerEvent { kind, position }
    }

    pub fn translated(&self, delta: Vec2) -> PointerEvent {
        PointerEvent {
            kind: self.kind,
            position: self.position + delta,
        }
    }

    pub fn is_primary_down(&self) -> bool {
        matches!(self.kind, PointerEventKind::Down(PointerButton::Primary))
    }
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL  = 1 << 1;
        const ALT   = 1 << 2;
        const META  = 1 << 3;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Character(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEventKind {
    Down,
    Up,
}

#[derive(Clone, Copy, Debug)]
pub struct KeyEvent {
    pub kind: KeyEventKind,
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn down(key: Key) -> Self {
        KeyEvent {
            kind: KeyEventKind::Down,
            key,
            modifiers: Modifiers::empty(),
        }
    }

    pub fn down_with(key: Key, modifiers: Modifiers) -> Self {
        KeyEvent {
            kind: KeyEventKind::Down,
            key,
            modifiers,
        }
    }

    pub fn up(key: Key) -> Self {
        KeyEvent {
            kind: KeyEventKind::Up,
            key,
            modifiers: Modifiers::empty(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Key(KeyEvent),
}
