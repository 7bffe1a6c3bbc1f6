//! # trellis-core
//!
//! Retained-mode widget core: geometry and anchored layout, pointer/key
//! input types, a per-widget listener registry, hit-testing and focus
//! interaction, the view-level event router, the text editing engine, and
//! the paint list the host renderer consumes.
//!
//! The crate is renderer-agnostic. Widgets describe themselves as
//! [`SceneNode`] lists and measure text through the [`TextMeasure`]
//! collaborator; hosts drain the [`RepaintFlag`] to drive frames.

pub mod blink;
pub mod error;
pub mod events;
pub mod geometry;
pub mod input;
pub mod interaction;
pub mod node;
pub mod scene;
pub mod style;
pub mod text;
pub mod view;

pub use blink::{BLINK_INTERVAL, CaretBlinker, RepaintFlag};
pub use error::TextFilterError;
pub use events::{EventArgs, EventKind, EventRegistry, Listener, ListenerId};
pub use geometry::{Anchor, Rect, Vec2};
pub use input::{
    InputEvent, Key, KeyEvent, KeyEventKind, Modifiers, PointerButton, PointerEvent,
    PointerEventKind,
};
pub use interaction::{DragSession, DragState, PointerOutcome};
pub use node::{CursorIcon, Widget, WidgetCore, WidgetId, blur_subtree, subtree_contains};
pub use scene::{Scene, SceneNode};
pub use style::{Color, Style};
pub use text::{Caret, Direction, MonospaceMeasure, TextFilter, TextMeasure, TextModel};
pub use view::{EventCtx, View};
