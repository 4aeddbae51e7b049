//! Keyboard layout tables
//!
//! A layout table maps each scancode to the four glyphs it can produce:
//! unmodified, with shift, with capslock and with AltGr. The built-in table
//! matches the Brazilian ABNT2 keyboard the capture agent was written for.
//! Alternate tables can be loaded from TOML files:
//!
//! ```toml
//! [[key]]
//! code = 30
//! normal = "a"
//! shift = "A"
//! capslock = "A"
//! ```
//!
//! Glyphs left out of a `[[key]]` entry default to the empty string.

use super::keymap::{KeyCode, KeyPair, Modifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

/// Error type for layout table operations
#[derive(Debug, Error)]
pub enum LayoutError {
    /// IO error reading or writing a layout file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Failed to parse a layout file
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize a layout table
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// A glyph holds more than one character
    #[error("scancode {code}: glyph {glyph:?} must be at most one character")]
    InvalidGlyph { code: u8, glyph: String },
}

/// The four glyphs a key produces under each modifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glyphs {
    #[serde(default)]
    pub normal: String,
    #[serde(default)]
    pub shift: String,
    #[serde(default)]
    pub capslock: String,
    #[serde(default)]
    pub altgr: String,
}

impl Glyphs {
    pub fn new(normal: &str, shift: &str, capslock: &str, altgr: &str) -> Self {
        Self {
            normal: normal.to_string(),
            shift: shift.to_string(),
            capslock: capslock.to_string(),
            altgr: altgr.to_string(),
        }
    }

    /// Pick the glyph for the given modifier state.
    ///
    /// Exactly one glyph is chosen; capslock wins over shift, which wins
    /// over AltGr.
    pub fn select(&self, flags: Modifiers) -> &str {
        if flags.contains(Modifiers::CAPS) {
            &self.capslock
        } else if flags.contains(Modifiers::SHIFT) {
            &self.shift
        } else if flags.contains(Modifiers::ALTGR) {
            &self.altgr
        } else {
            &self.normal
        }
    }

    fn validate(&self, code: KeyCode) -> Result<(), LayoutError> {
        for glyph in [&self.normal, &self.shift, &self.capslock, &self.altgr] {
            if glyph.chars().count() > 1 {
                return Err(LayoutError::InvalidGlyph {
                    code: code.as_u8(),
                    glyph: glyph.clone(),
                });
            }
        }
        Ok(())
    }
}

/// On-disk form of a single `[[key]]` entry
#[derive(Debug, Serialize, Deserialize)]
struct KeyEntry {
    code: u8,
    #[serde(default)]
    normal: String,
    #[serde(default)]
    shift: String,
    #[serde(default)]
    capslock: String,
    #[serde(default)]
    altgr: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LayoutFile {
    #[serde(rename = "key", default)]
    keys: Vec<KeyEntry>,
}

/// Immutable mapping from scancode to glyphs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutTable {
    keys: HashMap<KeyCode, Glyphs>,
}

impl Default for LayoutTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LayoutTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            keys: HashMap::new(),
        }
    }

    /// Copy of the built-in ABNT2 table
    pub fn builtin() -> Self {
        BUILTIN_LAYOUT.clone()
    }

    /// Add or replace the glyphs for a key
    pub fn insert(&mut self, code: KeyCode, glyphs: Glyphs) -> Result<(), LayoutError> {
        glyphs.validate(code)?;
        self.keys.insert(code, glyphs);
        Ok(())
    }

    pub fn get(&self, code: KeyCode) -> Option<&Glyphs> {
        self.keys.get(&code)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Glyph for a key pair, or `None` if the scancode isn't in the table.
    ///
    /// A known key may still resolve to an empty glyph.
    pub fn resolve(&self, pair: &KeyPair) -> Option<&str> {
        self.get(pair.scancode).map(|glyphs| glyphs.select(pair.flags))
    }

    /// Parse a table from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, LayoutError> {
        let file: LayoutFile = toml::from_str(contents)?;
        let mut table = Self::new();
        for entry in file.keys {
            let glyphs = Glyphs {
                normal: entry.normal,
                shift: entry.shift,
                capslock: entry.capslock,
                altgr: entry.altgr,
            };
            table.insert(KeyCode(entry.code), glyphs)?;
        }
        Ok(table)
    }

    /// Load a table from a TOML file
    pub fn load_from(path: &Path) -> Result<Self, LayoutError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Serialize the table to TOML, ordered by scancode
    pub fn to_toml_string(&self) -> Result<String, LayoutError> {
        let mut codes: Vec<&KeyCode> = self.keys.keys().collect();
        codes.sort();

        let keys = codes
            .into_iter()
            .map(|code| {
                let glyphs = &self.keys[code];
                KeyEntry {
                    code: code.as_u8(),
                    normal: glyphs.normal.clone(),
                    shift: glyphs.shift.clone(),
                    capslock: glyphs.capslock.clone(),
                    altgr: glyphs.altgr.clone(),
                }
            })
            .collect();

        Ok(toml::to_string_pretty(&LayoutFile { keys })?)
    }

    /// Save the table to a TOML file
    pub fn save_to(&self, path: &Path) -> Result<(), LayoutError> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

/// Static layout table for the ABNT2 keyboard
static BUILTIN_LAYOUT: LazyLock<LayoutTable> = LazyLock::new(|| {
    let entries: &[(KeyCode, &str, &str, &str, &str)] = &[
        // Number row
        (KeyCode::KEY_0, "0", ")", "0", ""),
        (KeyCode::KEY_1, "1", "!", "1", ""),
        (KeyCode::KEY_2, "2", "@", "2", ""),
        (KeyCode::KEY_3, "3", "#", "3", ""),
        (KeyCode::KEY_4, "4", "$", "4", ""),
        (KeyCode::KEY_5, "5", "%", "5", ""),
        // Shift+6 is a dead key (diaeresis) on ABNT2
        (KeyCode::KEY_6, "6", " ", "6", ""),
        (KeyCode::KEY_7, "7", "&", "7", ""),
        (KeyCode::KEY_8, "8", "*", "8", ""),
        (KeyCode::KEY_9, "9", "(", "9", ""),
        (KeyCode::KEY_MINUS, "-", "_", "-", ""),
        (KeyCode::KEY_EQUAL, "=", "+", "=", ""),
        // Letters
        (KeyCode::KEY_A, "a", "A", "A", ""),
        (KeyCode::KEY_B, "b", "B", "B", ""),
        (KeyCode::KEY_C, "c", "C", "C", ""),
        (KeyCode::KEY_D, "d", "D", "D", ""),
        (KeyCode::KEY_E, "e", "E", "E", ""),
        (KeyCode::KEY_F, "f", "F", "F", ""),
        (KeyCode::KEY_G, "g", "G", "G", ""),
        (KeyCode::KEY_H, "h", "H", "H", ""),
        (KeyCode::KEY_I, "i", "I", "I", ""),
        (KeyCode::KEY_J, "j", "J", "J", ""),
        (KeyCode::KEY_K, "k", "K", "K", ""),
        (KeyCode::KEY_L, "l", "L", "L", ""),
        (KeyCode::KEY_M, "m", "M", "M", ""),
        (KeyCode::KEY_N, "n", "N", "N", ""),
        (KeyCode::KEY_O, "o", "O", "O", ""),
        (KeyCode::KEY_P, "p", "P", "P", ""),
        (KeyCode::KEY_Q, "q", "Q", "Q", "/"),
        (KeyCode::KEY_R, "r", "R", "R", ""),
        (KeyCode::KEY_S, "s", "S", "S", ""),
        (KeyCode::KEY_T, "t", "T", "T", ""),
        (KeyCode::KEY_U, "u", "U", "U", ""),
        (KeyCode::KEY_V, "v", "V", "V", ""),
        (KeyCode::KEY_W, "w", "W", "W", "?"),
        (KeyCode::KEY_X, "x", "X", "X", ""),
        (KeyCode::KEY_Y, "y", "Y", "Y", ""),
        (KeyCode::KEY_Z, "z", "Z", "Z", ""),
        (KeyCode::KEY_CEDILLA, "ç", "", "Ç", ""),
        // Punctuation
        (KeyCode::KEY_SPACE, " ", " ", " ", ""),
        (KeyCode::KEY_COMMA, ",", "<", ",", ""),
        (KeyCode::KEY_DOT, ".", ">", ".", ""),
        (KeyCode::KEY_SEMICOLON, ";", ":", ";", ""),
        (KeyCode::KEY_RO, "/", "?", "/", ""),
        (KeyCode::KEY_GRAVE, "'", "\"", "'", ""),
        (KeyCode::KEY_102ND, "\\", "|", "\\", ""),
        (KeyCode::KEY_RIGHTBRACE, "[", "{", "[", ""),
        (KeyCode::KEY_BACKSLASH, "]", "}", "]", ""),
        (KeyCode::KEY_ENTER, "\n", "\n", "\n", "\n"),
    ];

    let keys = entries
        .iter()
        .map(|&(code, normal, shift, capslock, altgr)| {
            (code, Glyphs::new(normal, shift, capslock, altgr))
        })
        .collect();

    LayoutTable { keys }
});
