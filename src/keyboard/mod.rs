//! Scancodes, modifier flags and layout tables

pub mod keymap;
pub mod layout;

pub use keymap::{KeyCode, KeyPair, Modifiers};
pub use layout::{Glyphs, LayoutError, LayoutTable};
