//! Prompt icons
//!
//! Each icon is a symbol plus the color spec it is usually drawn in. The
//! symbol is what the icon helpers emit; the color is for callers that want
//! to style the glyph themselves.

use serde::{Deserialize, Serialize};

/// A single prompt icon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    /// Text emitted by the icon helper
    pub symbol: String,
    /// Style spec understood by [`crate::color::color_code`]
    pub color: String,
}

impl Icon {
    pub fn new(symbol: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            color: color.into(),
        }
    }
}

/// The full set of icons exposed to templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconSet {
    /// Hint that more detailed help is available on request
    pub help_input: Icon,
    /// Shown before an error
    pub error: Icon,
    /// Shown before detailed help text
    pub help: Icon,
    /// Shown before a question message
    pub question: Icon,
    /// Prepended to a selected multi-select option
    pub marked_option: Icon,
    /// Prepended to an unselected multi-select option
    pub unmarked_option: Icon,
    /// Prepended to the option that currently has focus
    pub select_focus: Icon,
}

impl IconSet {
    /// ASCII icons that render on any terminal
    pub fn plain() -> Self {
        Self {
            help_input: Icon::new("?", "cyan"),
            error: Icon::new("X", "red"),
            help: Icon::new("????", "cyan"),
            question: Icon::new("?", "green+hb"),
            marked_option: Icon::new("[x]", "green"),
            unmarked_option: Icon::new("[ ]", "default+hb"),
            select_focus: Icon::new(">", "cyan"),
        }
    }

    /// Unicode icons; not every terminal font has these glyphs
    pub fn fancy() -> Self {
        // The question icon has no fancier form
        let mut icons = Self::plain();
        icons.error.symbol = "✘".to_string();
        icons.help.symbol = "ⓘ".to_string();
        icons.marked_option.symbol = "◉".to_string();
        icons.unmarked_option.symbol = "◯".to_string();
        icons.select_focus.symbol = "❯".to_string();
        icons
    }

    pub fn for_style(fancy: bool) -> Self {
        if fancy { Self::fancy() } else { Self::plain() }
    }

    /// Icons paired with the helper name templates use to reference them
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Icon)> {
        [
            ("HelpInputIcon", &self.help_input),
            ("ErrorIcon", &self.error),
            ("HelpIcon", &self.help),
            ("QuestionIcon", &self.question),
            ("MarkedOptionIcon", &self.marked_option),
            ("UnmarkedOptionIcon", &self.unmarked_option),
            ("SelectFocusIcon", &self.select_focus),
        ]
        .into_iter()
    }
}

impl Default for IconSet {
    fn default() -> Self {
        Self::plain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_icons() {
        let icons = IconSet::plain();
        assert_eq!(icons.error, Icon::new("X", "red"));
        assert_eq!(icons.question.color, "green+hb");
        assert_eq!(icons.unmarked_option.symbol, "[ ]");
    }

    #[test]
    fn test_fancy_keeps_question_and_colors() {
        let plain = IconSet::plain();
        let fancy = IconSet::fancy();
        assert_eq!(fancy.question, plain.question);
        assert_eq!(fancy.help_input, plain.help_input);
        assert_eq!(fancy.select_focus.symbol, "❯");
        assert_eq!(fancy.select_focus.color, plain.select_focus.color);
    }

    #[test]
    fn test_iter_names() {
        let names: Vec<_> = IconSet::default().iter().map(|(name, _)| name).collect();
        assert_eq!(names.len(), 7);
        assert!(names.contains(&"SelectFocusIcon"));
        assert!(names.contains(&"HelpInputIcon"));
    }

    #[test]
    fn test_for_style() {
        assert_eq!(IconSet::for_style(false), IconSet::plain());
        assert_eq!(IconSet::for_style(true), IconSet::fancy());
    }
}
