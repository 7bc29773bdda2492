pub mod buttons;
pub mod handler;

pub use buttons::{ControlButton, ControlPad};
pub use handler::{InputHandler, KeyAction};
