//! Colour-directive code table.
//!
//! Message bodies may carry two-character escapes (`&` + code) that switch the
//! active foreground colour. Codes are case-insensitive; `S` restores the
//! default text colour. An unmapped code is not an error — the renderer prints
//! the code character literally.

use crate::console::settings::COLOR_TEXT_DEFAULT;
use crossterm::style::Color;

/// Foreground colour for a directive code, or `None` when the code is unmapped.
pub fn colour_for(code: char) -> Option<Color> {
    match code.to_ascii_uppercase() {
        '0' => Some(Color::Black),
        '1' => Some(Color::DarkBlue),
        '2' => Some(Color::DarkGreen),
        '3' => Some(Color::DarkCyan),
        '4' => Some(Color::DarkRed),
        '5' => Some(Color::DarkMagenta),
        '6' => Some(Color::DarkYellow),
        '7' => Some(Color::Grey),
        '8' => Some(Color::DarkGrey),
        '9' => Some(Color::Blue),
        'A' => Some(Color::Green),
        'B' => Some(Color::Cyan),
        'C' => Some(Color::Red),
        'D' => Some(Color::Magenta),
        'E' => Some(Color::Yellow),
        'F' => Some(Color::White),
        'S' => Some(COLOR_TEXT_DEFAULT),
        _ => None,
    }
}
