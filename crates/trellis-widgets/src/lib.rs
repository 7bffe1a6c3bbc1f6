//! # trellis-widgets
//!
//! Concrete controls built on [`trellis_core`]: labels, buttons, toggles,
//! radio buttons, sliders, progress bars, scrollbars, a pannable canvas,
//! scrollable panels and item lists, tab panels, tables, single- and
//! multi-line text editors, and a combo box with a popup list.
//!
//! Every widget embeds a [`trellis_core::WidgetCore`], runs pointer input
//! through the shared interaction machine and paints itself into a
//! [`trellis_core::Scene`].

pub mod button;
pub mod canvas;
pub mod checkbox;
pub mod combobox;
pub mod label;
pub mod listpanel;
pub mod panel;
pub mod progressbar;
pub mod radiobutton;
pub mod scrollbar;
pub mod slider;
pub mod table;
pub mod tabpanel;
pub mod textarea;
pub mod textinput;

pub use button::{Button, ToggleButton};
pub use canvas::Canvas;
pub use checkbox::Checkbox;
pub use combobox::ComboBox;
pub use label::Label;
pub use listpanel::ListPanel;
pub use panel::Panel;
pub use progressbar::ProgressBar;
pub use radiobutton::{RadioButton, RadioGroup};
pub use scrollbar::{HorizontalScrollbar, VerticalScrollbar};
pub use slider::Slider;
pub use table::Table;
pub use tabpanel::TabPanel;
pub use textarea::TextArea;
pub use textinput::TextInput;
