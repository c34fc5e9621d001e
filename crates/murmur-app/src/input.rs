//! Terminal-agnostic keyboard input.

/// Keyboard input abstraction.
///
/// Decouples application logic from terminal libraries (crossterm, termion,
/// etc.) so key handling is testable without a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character (`q` quits, `L` logs out, space plays audio).
    Char(char),
    /// Enter/Return key (expand or collapse the selected summary).
    Enter,
    /// Tab key (cycle rooms).
    Tab,
    /// Escape key (quit).
    Esc,
    /// Up arrow key (select older entry).
    Up,
    /// Down arrow key (select newer entry).
    Down,
}
