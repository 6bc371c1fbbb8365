//! ANSI color codes for the `color` template helper
//!
//! Style specs look like `fg+attrs:bg+attrs`, e.g. `red`, `green+hb`,
//! `white:blue`, `208+u`. Attributes: `b` bold, `B` blink, `u` underline,
//! `i` inverse, `s` strikethrough, `h` high intensity. Color names are the
//! ones `colored::Color` parses, plus `default` and 256-color indices.
//!
//! Unrecognized specs produce an empty string: a bad color must never stop a
//! prompt from being displayed.

use colored::Color;
use tracing::debug;

/// Resets every attribute
pub const RESET: &str = "\x1b[0m";

/// Foreground-only attributes, in emission order
const ATTRIBUTES: [(char, &str); 5] = [('b', "1"), ('B', "5"), ('u', "4"), ('i', "7"), ('s', "9")];

/// Whether the `color` helper emits escape codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Enabled,
    Disabled,
}

impl ColorMode {
    pub fn from_disabled(disabled: bool) -> Self {
        if disabled { Self::Disabled } else { Self::Enabled }
    }

    /// Escape code for `spec`, or empty when colors are off
    pub fn code(&self, spec: &str) -> String {
        match self {
            Self::Enabled => color_code(spec),
            Self::Disabled => String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ground {
    Fore,
    Back,
}

/// Translate a style spec into an ANSI escape sequence
pub fn color_code(spec: &str) -> String {
    let spec = spec.trim();
    match spec {
        "" | "off" => return String::new(),
        "reset" => return RESET.to_string(),
        _ => {}
    }

    let (fore, back) = match spec.split_once(':') {
        Some((fore, back)) => (fore, Some(back)),
        None => (spec, None),
    };

    let mut codes = Vec::new();
    let parsed = push_layer(&mut codes, fore, Ground::Fore)
        .and_then(|_| back.map_or(Some(()), |back| push_layer(&mut codes, back, Ground::Back)));

    if parsed.is_none() || codes.is_empty() {
        debug!(%spec, "color_code: unrecognized style, emitting nothing");
        return String::new();
    }

    format!("\x1b[{}m", codes.join(";"))
}

fn push_layer(codes: &mut Vec<String>, layer: &str, ground: Ground) -> Option<()> {
    let (name, attrs) = layer.split_once('+').unwrap_or((layer, ""));

    if ground == Ground::Fore {
        for (flag, code) in ATTRIBUTES {
            if attrs.contains(flag) {
                codes.push(code.to_string());
            }
        }
    }

    if name.is_empty() {
        return Some(());
    }

    codes.push(color_number(name, attrs.contains('h'), ground)?);
    Some(())
}

fn color_number(name: &str, bright: bool, ground: Ground) -> Option<String> {
    if name == "default" {
        return Some(match ground {
            Ground::Fore => "39".to_string(),
            Ground::Back => "49".to_string(),
        });
    }

    if let Ok(index) = name.parse::<u8>() {
        let prefix = match ground {
            Ground::Fore => 38,
            Ground::Back => 48,
        };
        return Some(format!("{};5;{}", prefix, index));
    }

    let color: Color = name.parse().ok()?;
    let color = if bright { brighten(color) } else { color };
    let code = match ground {
        Ground::Fore => color.to_fg_str(),
        Ground::Back => color.to_bg_str(),
    };
    Some(code.into_owned())
}

fn brighten(color: Color) -> Color {
    match color {
        Color::Black => Color::BrightBlack,
        Color::Red => Color::BrightRed,
        Color::Green => Color::BrightGreen,
        Color::Yellow => Color::BrightYellow,
        Color::Blue => Color::BrightBlue,
        Color::Magenta => Color::BrightMagenta,
        Color::Cyan => Color::BrightCyan,
        Color::White => Color::BrightWhite,
        other => other,
    }
}
