//! Builders for the ANSI control sequences escline writes around the
//! input region.
//!
//! Each builder returns the formatted sequence as a value rather than
//! writing it to a sink; the caller decides where the bytes go.

/// Clears the entire screen (`ESC[2J`).
#[must_use]
pub const fn clear_screen() -> &'static str {
    "\x1b[2J"
}

/// Clears from the cursor to the end of the screen (`ESC[0J`).
#[must_use]
pub const fn clear_screen_from_cursor() -> &'static str {
    "\x1b[0J"
}

/// Clears from the cursor to the end of the line (`ESC[K`).
#[must_use]
pub const fn clear_line() -> &'static str {
    "\x1b[K"
}

/// Saves the current cursor position (`ESC7`).
#[must_use]
pub const fn save_cursor() -> &'static str {
    "\x1b7"
}

/// Restores the most recently saved cursor position (`ESC8`).
#[must_use]
pub const fn load_cursor() -> &'static str {
    "\x1b8"
}

/// Moves the cursor to (`line`, `column`) with `ESC[<line>;<column>H`.
///
/// Coordinates are 1-based on real terminals; values are formatted as given.
#[must_use]
pub fn move_cursor(line: u16, column: u16) -> String {
    format!("\x1b[{line};{column}H")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fixed_sequences() {
        assert_eq!(clear_screen(), "\x1b[2J");
        assert_eq!(clear_screen_from_cursor(), "\x1b[0J");
        assert_eq!(clear_line(), "\x1b[K");
        assert_eq!(save_cursor(), "\x1b7");
        assert_eq!(load_cursor(), "\x1b8");
    }

    #[test]
    fn move_cursor_formats_coordinates() {
        assert_eq!(move_cursor(24, 1), "\x1b[24;1H");
        assert_eq!(move_cursor(0, 0), "\x1b[0;0H");
    }
}
