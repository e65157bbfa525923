//! Input events from the front panel
//!
//! Buttons and the rotary encoder are reduced to one event type before
//! they reach the UI layer, so there is exactly one dispatch path instead
//! of a handler registration per button.

/// Front panel buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Back,
    Mid,
    Ok,
    Menu,
}

impl Button {
    /// All buttons, in UI key order
    pub const ALL: [Button; 4] = [Button::Back, Button::Mid, Button::Ok, Button::Menu];

    /// Key index handed to the UI layer (0 = Back ... 3 = Menu)
    pub fn index(self) -> u8 {
        match self {
            Button::Back => 0,
            Button::Mid => 1,
            Button::Ok => 2,
            Button::Menu => 3,
        }
    }

    /// Look up a button by its key index
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

/// What the user did with a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonAction {
    /// Short press, reported on release
    Press,
    /// Held past the hold threshold, reported while still down
    Hold,
}

/// A single button event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    pub button: Button,
    pub action: ButtonAction,
}

impl ButtonEvent {
    pub const fn new(button: Button, action: ButtonAction) -> Self {
        Self { button, action }
    }
}

/// Discrete input event delivered to the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Button press or hold
    Button(ButtonEvent),
    /// Encoder moved by `delta` detents since the last observation
    ///
    /// Several detents between two reads are coalesced into one event.
    Encoder { delta: i32 },
}

impl InputEvent {
    /// Returns true if this is a rotation event
    pub fn is_rotation(&self) -> bool {
        matches!(self, InputEvent::Encoder { .. })
    }

    /// Returns true if this is a button event
    pub fn is_button(&self) -> bool {
        matches!(self, InputEvent::Button(_))
    }

    /// Returns the rotation as a signed delta (0 for button events)
    pub fn rotation_delta(&self) -> i32 {
        match self {
            InputEvent::Encoder { delta } => *delta,
            InputEvent::Button(_) => 0,
        }
    }
}

impl From<ButtonEvent> for InputEvent {
    fn from(event: ButtonEvent) -> Self {
        InputEvent::Button(event)
    }
}
