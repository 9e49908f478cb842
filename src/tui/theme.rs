//! TUI style constants.
//!
//! Color semantics:
//! - Bold: the word under review
//! - Cyan: the candidate being decided on, key hints
//! - Green: accepted synonyms in the summary
//! - Dim: progress counters, help descriptions

use ratatui::style::{Color, Modifier, Style};

/// The word whose synonyms are being reviewed.
pub const STYLE_WORD: Style = Style::new().add_modifier(Modifier::BOLD);

/// The candidate synonym awaiting a decision.
pub const STYLE_CANDIDATE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Keybinding hints.
pub const STYLE_KEY: Style = Style::new().fg(Color::Cyan);

/// Accepted synonyms.
pub const STYLE_ACCEPTED: Style = Style::new().fg(Color::Green);

/// De-emphasized text.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Counts and other important figures.
pub const STYLE_IMPORTANT: Style = Style::new().add_modifier(Modifier::BOLD);

/// Title lines.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emphasis_styles_are_bold() {
        assert!(STYLE_WORD.add_modifier.contains(Modifier::BOLD));
        assert!(STYLE_CANDIDATE.add_modifier.contains(Modifier::BOLD));
        assert!(STYLE_IMPORTANT.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn semantic_styles_have_expected_colors() {
        assert_eq!(STYLE_CANDIDATE.fg, Some(Color::Cyan));
        assert_eq!(STYLE_ACCEPTED.fg, Some(Color::Green));
        assert_eq!(STYLE_DIM.fg, Some(Color::DarkGray));
    }
}
