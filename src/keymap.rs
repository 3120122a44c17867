//! Keyboard shortcuts.
//!
//! Keys are named the way browsers report `KeyboardEvent.key`.

use crate::zoom::Zoom;

/// A reader action bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Navigate(i32),
    FirstPage,
    LastPage,
    ToggleView,
    ToggleMenu,
    ToggleToc,
    /// Close both the menu and the TOC.
    CloseAll,
    ZoomIn,
    ZoomOut,
    SetZoom(Zoom),
    /// Open the menu with the page-number field focused.
    GoTo,
}

impl Command {
    /// The command bound to `key`, if any.
    pub fn from_key(key: &str) -> Option<Self> {
        let command = match key {
            "ArrowLeft" => Command::Navigate(-1),
            "ArrowRight" => Command::Navigate(1),
            "Home" => Command::FirstPage,
            "End" => Command::LastPage,
            "v" | "V" => Command::ToggleView,
            "m" | "M" => Command::ToggleMenu,
            "t" | "T" => Command::ToggleToc,
            "g" | "G" => Command::GoTo,
            "Escape" => Command::CloseAll,
            "+" | "=" => Command::ZoomIn,
            "-" | "_" => Command::ZoomOut,
            "0" => Command::SetZoom(Zoom::DEFAULT),
            // 1..=8 pick zoom levels in ascending order
            digit if digit.len() == 1 => {
                let n = digit.chars().next()?.to_digit(10)?;
                Command::SetZoom(Zoom::from_index((n as usize).checked_sub(1)?)?)
            }
            _ => return None,
        };
        Some(command)
    }
}
