//! Scancode definitions and modifier flags as they appear in capture logs

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Represents a physical key scancode (Linux input event codes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub u8);

impl KeyCode {
    pub const KEY_1: KeyCode = KeyCode(2);
    pub const KEY_2: KeyCode = KeyCode(3);
    pub const KEY_3: KeyCode = KeyCode(4);
    pub const KEY_4: KeyCode = KeyCode(5);
    pub const KEY_5: KeyCode = KeyCode(6);
    pub const KEY_6: KeyCode = KeyCode(7);
    pub const KEY_7: KeyCode = KeyCode(8);
    pub const KEY_8: KeyCode = KeyCode(9);
    pub const KEY_9: KeyCode = KeyCode(10);
    pub const KEY_0: KeyCode = KeyCode(11);
    pub const KEY_MINUS: KeyCode = KeyCode(12);
    pub const KEY_Q: KeyCode = KeyCode(16);
    pub const KEY_W: KeyCode = KeyCode(17);
    pub const KEY_E: KeyCode = KeyCode(18);
    pub const KEY_R: KeyCode = KeyCode(19);
    pub const KEY_T: KeyCode = KeyCode(20);
    pub const KEY_Y: KeyCode = KeyCode(21);
    pub const KEY_U: KeyCode = KeyCode(22);
    pub const KEY_I: KeyCode = KeyCode(23);
    pub const KEY_O: KeyCode = KeyCode(24);
    pub const KEY_P: KeyCode = KeyCode(25);
    pub const KEY_RIGHTBRACE: KeyCode = KeyCode(27);
    pub const KEY_ENTER: KeyCode = KeyCode(28);
    pub const KEY_A: KeyCode = KeyCode(30);
    pub const KEY_S: KeyCode = KeyCode(31);
    pub const KEY_D: KeyCode = KeyCode(32);
    pub const KEY_F: KeyCode = KeyCode(33);
    pub const KEY_G: KeyCode = KeyCode(34);
    pub const KEY_H: KeyCode = KeyCode(35);
    pub const KEY_J: KeyCode = KeyCode(36);
    pub const KEY_K: KeyCode = KeyCode(37);
    pub const KEY_L: KeyCode = KeyCode(38);
    /// ABNT2 places the cedilla where US layouts have the semicolon
    pub const KEY_CEDILLA: KeyCode = KeyCode(39);
    pub const KEY_GRAVE: KeyCode = KeyCode(41);
    pub const KEY_BACKSLASH: KeyCode = KeyCode(43);
    pub const KEY_Z: KeyCode = KeyCode(44);
    pub const KEY_X: KeyCode = KeyCode(45);
    pub const KEY_C: KeyCode = KeyCode(46);
    pub const KEY_V: KeyCode = KeyCode(47);
    pub const KEY_B: KeyCode = KeyCode(48);
    pub const KEY_N: KeyCode = KeyCode(49);
    pub const KEY_M: KeyCode = KeyCode(50);
    pub const KEY_COMMA: KeyCode = KeyCode(51);
    pub const KEY_DOT: KeyCode = KeyCode(52);
    pub const KEY_SEMICOLON: KeyCode = KeyCode(53);
    pub const KEY_SPACE: KeyCode = KeyCode(57);
    pub const KEY_102ND: KeyCode = KeyCode(86);
    pub const KEY_RO: KeyCode = KeyCode(89);
    pub const KEY_EQUAL: KeyCode = KeyCode(117);

    pub fn new(code: u8) -> Self {
        Self(code)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    pub fn is_enter(&self) -> bool {
        *self == Self::KEY_ENTER
    }
}

impl From<u8> for KeyCode {
    fn from(code: u8) -> Self {
        Self(code)
    }
}

bitflags! {
    /// Modifier state recorded by the capture agent alongside each key.
    ///
    /// Unknown bits are retained so a flag byte survives a round trip
    /// unchanged.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const CAPS = 0x01;
        const SHIFT = 0x02;
        const ALTGR = 0x04;
    }
}

/// One logical (flags, scancode) pair from the capture stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPair {
    /// Modifier flags active when the key was pressed
    pub flags: Modifiers,
    /// The physical key
    pub scancode: KeyCode,
}

impl KeyPair {
    pub fn new(flags: u8, scancode: u8) -> Self {
        Self {
            flags: Modifiers::from_bits_retain(flags),
            scancode: KeyCode(scancode),
        }
    }

    /// Pair with no modifiers set
    pub fn plain(scancode: KeyCode) -> Self {
        Self {
            flags: Modifiers::empty(),
            scancode,
        }
    }

    pub fn with_flags(scancode: KeyCode, flags: Modifiers) -> Self {
        Self { flags, scancode }
    }

    /// Raw flag byte, including any bits outside the known modifiers
    pub fn flag_bits(&self) -> u8 {
        self.flags.bits()
    }
}
