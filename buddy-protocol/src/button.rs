//! Control pad buttons of the Bluefruit Connect app

/// Button identities sent in `!B` packets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Numbered button 1
    Button1,
    /// Numbered button 2
    Button2,
    /// Numbered button 3
    Button3,
    /// Numbered button 4
    Button4,
    /// Arrow up
    Up,
    /// Arrow down
    Down,
    /// Arrow left
    Left,
    /// Arrow right
    Right,
}

// Wire format values (ASCII digits)
const BUTTON_1: u8 = b'1';
const BUTTON_2: u8 = b'2';
const BUTTON_3: u8 = b'3';
const BUTTON_4: u8 = b'4';
const BUTTON_UP: u8 = b'5';
const BUTTON_DOWN: u8 = b'6';
const BUTTON_LEFT: u8 = b'7';
const BUTTON_RIGHT: u8 = b'8';

impl Button {
    /// All buttons in wire order
    pub const ALL: [Button; 8] = [
        Button::Button1,
        Button::Button2,
        Button::Button3,
        Button::Button4,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
    ];

    /// Parse a button from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            BUTTON_1 => Some(Button::Button1),
            BUTTON_2 => Some(Button::Button2),
            BUTTON_3 => Some(Button::Button3),
            BUTTON_4 => Some(Button::Button4),
            BUTTON_UP => Some(Button::Up),
            BUTTON_DOWN => Some(Button::Down),
            BUTTON_LEFT => Some(Button::Left),
            BUTTON_RIGHT => Some(Button::Right),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            Button::Button1 => BUTTON_1,
            Button::Button2 => BUTTON_2,
            Button::Button3 => BUTTON_3,
            Button::Button4 => BUTTON_4,
            Button::Up => BUTTON_UP,
            Button::Down => BUTTON_DOWN,
            Button::Left => BUTTON_LEFT,
            Button::Right => BUTTON_RIGHT,
        }
    }
}
