//! On-screen direction buttons
//!
//! The renderer lays out a four-button pad and hands back a [`ControlPad`]
//! describing where each button was drawn, which mouse clicks are then
//! hit-tested against.

use ratatui::layout::Rect;

use crate::game::Heading;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlButton {
    Up,
    Down,
    Left,
    Right,
}

impl ControlButton {
    pub const ALL: [ControlButton; 4] = [
        ControlButton::Up,
        ControlButton::Down,
        ControlButton::Left,
        ControlButton::Right,
    ];

    pub fn heading(self) -> Heading {
        match self {
            ControlButton::Up => Heading::Up,
            ControlButton::Down => Heading::Down,
            ControlButton::Left => Heading::Left,
            ControlButton::Right => Heading::Right,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ControlButton::Up => "▲",
            ControlButton::Down => "▼",
            ControlButton::Left => "◀",
            ControlButton::Right => "▶",
        }
    }
}

/// Screen rectangles of the buttons drawn in the last frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlPad {
    buttons: Vec<(ControlButton, Rect)>,
}

impl ControlPad {
    pub fn new(buttons: impl IntoIterator<Item = (ControlButton, Rect)>) -> Self {
        Self {
            buttons: buttons.into_iter().collect(),
        }
    }

    pub fn area_of(&self, button: ControlButton) -> Option<Rect> {
        self.buttons
            .iter()
            .find(|(candidate, _)| *candidate == button)
            .map(|(_, area)| *area)
    }

    /// The button under the terminal cell at (`column`, `row`), if any
    pub fn hit(&self, column: u16, row: u16) -> Option<ControlButton> {
        self.buttons
            .iter()
            .find(|(_, area)| {
                column >= area.x
                    && column < area.x.saturating_add(area.width)
                    && row >= area.y
                    && row < area.y.saturating_add(area.height)
            })
            .map(|(button, _)| *button)
    }
}
