//! Composable terminal text decoration.
//!
//! [`StyleSpan`] wraps an [`owo_colors::Style`] together with an `enabled`
//! switch, so a whole theme can be turned into a no-op when color output is
//! off. Every decoration method returns a new span; spans are `Copy`.

use std::sync::LazyLock;

use owo_colors::{OwoColorize, Style};
use regex::Regex;

use crate::error::TintError;

/// Matches ANSI SGR sequences (`ESC [ … m`).
static ANSI_SGR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;]*m").expect("ANSI SGR regex is a compile-time constant")
});

/// An immutable text-decoration descriptor.
///
/// Wrapping empty text, wrapping while disabled, or wrapping with no
/// decorations returns the input unchanged.
#[derive(Debug, Clone, Copy)]
pub struct StyleSpan {
    style: Style,
    enabled: bool,
    plain: bool,
}

impl Default for StyleSpan {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleSpan {
    /// An enabled span with no decorations.
    pub fn new() -> Self {
        Self {
            style: Style::new(),
            enabled: true,
            plain: true,
        }
    }

    /// A disabled span; decorations can still be added but `wrap` is a no-op.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// True when no decoration has been added.
    pub fn is_plain(&self) -> bool {
        self.plain
    }

    fn with(mut self, f: impl FnOnce(Style) -> Style) -> Self {
        self.style = f(self.style);
        self.plain = false;
        self
    }

    #[must_use]
    pub fn bold(self) -> Self {
        self.with(Style::bold)
    }
    #[must_use]
    pub fn dim(self) -> Self {
        self.with(Style::dimmed)
    }
    #[must_use]
    pub fn italic(self) -> Self {
        self.with(Style::italic)
    }
    #[must_use]
    pub fn underline(self) -> Self {
        self.with(Style::underline)
    }
    #[must_use]
    pub fn inverse(self) -> Self {
        self.with(Style::reversed)
    }
    #[must_use]
    pub fn strikethrough(self) -> Self {
        self.with(Style::strikethrough)
    }

    #[must_use]
    pub fn black(self) -> Self {
        self.with(Style::black)
    }
    #[must_use]
    pub fn red(self) -> Self {
        self.with(Style::red)
    }
    #[must_use]
    pub fn green(self) -> Self {
        self.with(Style::green)
    }
    #[must_use]
    pub fn yellow(self) -> Self {
        self.with(Style::yellow)
    }
    #[must_use]
    pub fn blue(self) -> Self {
        self.with(Style::blue)
    }
    #[must_use]
    pub fn magenta(self) -> Self {
        self.with(Style::magenta)
    }
    #[must_use]
    pub fn cyan(self) -> Self {
        self.with(Style::cyan)
    }
    #[must_use]
    pub fn white(self) -> Self {
        self.with(Style::white)
    }
    /// Same code as [`bright_black`](Self::bright_black).
    #[must_use]
    pub fn gray(self) -> Self {
        self.with(Style::bright_black)
    }

    #[must_use]
    pub fn bright_black(self) -> Self {
        self.with(Style::bright_black)
    }
    #[must_use]
    pub fn bright_red(self) -> Self {
        self.with(Style::bright_red)
    }
    #[must_use]
    pub fn bright_green(self) -> Self {
        self.with(Style::bright_green)
    }
    #[must_use]
    pub fn bright_yellow(self) -> Self {
        self.with(Style::bright_yellow)
    }
    #[must_use]
    pub fn bright_blue(self) -> Self {
        self.with(Style::bright_blue)
    }
    #[must_use]
    pub fn bright_magenta(self) -> Self {
        self.with(Style::bright_magenta)
    }
    #[must_use]
    pub fn bright_cyan(self) -> Self {
        self.with(Style::bright_cyan)
    }
    #[must_use]
    pub fn bright_white(self) -> Self {
        self.with(Style::bright_white)
    }

    #[must_use]
    pub fn on_black(self) -> Self {
        self.with(Style::on_black)
    }
    #[must_use]
    pub fn on_red(self) -> Self {
        self.with(Style::on_red)
    }
    #[must_use]
    pub fn on_green(self) -> Self {
        self.with(Style::on_green)
    }
    #[must_use]
    pub fn on_yellow(self) -> Self {
        self.with(Style::on_yellow)
    }
    #[must_use]
    pub fn on_blue(self) -> Self {
        self.with(Style::on_blue)
    }
    #[must_use]
    pub fn on_magenta(self) -> Self {
        self.with(Style::on_magenta)
    }
    #[must_use]
    pub fn on_cyan(self) -> Self {
        self.with(Style::on_cyan)
    }
    #[must_use]
    pub fn on_white(self) -> Self {
        self.with(Style::on_white)
    }

    /// 24-bit foreground color.
    #[must_use]
    pub fn rgb(self, r: u8, g: u8, b: u8) -> Self {
        self.with(|s| s.truecolor(r, g, b))
    }

    /// 24-bit background color.
    #[must_use]
    pub fn on_rgb(self, r: u8, g: u8, b: u8) -> Self {
        self.with(|s| s.on_truecolor(r, g, b))
    }

    /// Foreground from `#RRGGBB`. An unparsable value leaves the span unchanged.
    #[must_use]
    pub fn hex(self, hex: &str) -> Self {
        match parse_hex_color(hex) {
            Some((r, g, b)) => self.rgb(r, g, b),
            None => self,
        }
    }

    /// Background from `#RRGGBB`. An unparsable value leaves the span unchanged.
    #[must_use]
    pub fn on_hex(self, hex: &str) -> Self {
        match parse_hex_color(hex) {
            Some((r, g, b)) => self.on_rgb(r, g, b),
            None => self,
        }
    }

    /// Wrap `text` in this span's on/off escape sequences.
    pub fn wrap(&self, text: &str) -> String {
        if !self.enabled || self.plain || text.is_empty() {
            return text.to_string();
        }
        text.style(self.style).to_string()
    }

    /// Parse a style spec such as `"black on_cyan bold"` or `"on_#40E0D0"`.
    ///
    /// Tokens are whitespace-separated and case-insensitive: effects (`bold`,
    /// `dim`, `italic`, `underline`, `inverse`, `strikethrough`), colors,
    /// `bright_` colors, `on_` backgrounds and `#RRGGBB` hex values.
    pub fn parse(spec: &str) -> Result<Self, TintError> {
        let mut span = Self::new();
        for token in spec.split_whitespace() {
            let token = token.to_lowercase();
            span = match token.strip_prefix("on_") {
                Some(bg) => span.apply_background(bg),
                None => span.apply_foreground(&token),
            }
            .ok_or_else(|| TintError::Style(spec.to_string()))?;
        }
        Ok(span)
    }

    fn apply_foreground(self, token: &str) -> Option<Self> {
        if token.starts_with('#') {
            let (r, g, b) = parse_hex_color(token)?;
            return Some(self.rgb(r, g, b));
        }
        Some(match token {
            "bold" => self.bold(),
            "dim" | "dimmed" => self.dim(),
            "italic" => self.italic(),
            "underline" => self.underline(),
            "inverse" | "reversed" => self.inverse(),
            "strikethrough" => self.strikethrough(),
            "black" => self.black(),
            "red" => self.red(),
            "green" => self.green(),
            "yellow" => self.yellow(),
            "blue" => self.blue(),
            "magenta" | "purple" => self.magenta(),
            "cyan" => self.cyan(),
            "white" => self.white(),
            "gray" | "grey" | "bright_black" => self.bright_black(),
            "bright_red" => self.bright_red(),
            "bright_green" => self.bright_green(),
            "bright_yellow" => self.bright_yellow(),
            "bright_blue" => self.bright_blue(),
            "bright_magenta" => self.bright_magenta(),
            "bright_cyan" => self.bright_cyan(),
            "bright_white" => self.bright_white(),
            _ => return None,
        })
    }

    fn apply_background(self, token: &str) -> Option<Self> {
        if token.starts_with('#') {
            let (r, g, b) = parse_hex_color(token)?;
            return Some(self.on_rgb(r, g, b));
        }
        Some(match token {
            "black" => self.on_black(),
            "red" => self.on_red(),
            "green" => self.on_green(),
            "yellow" => self.on_yellow(),
            "blue" => self.on_blue(),
            "magenta" | "purple" => self.on_magenta(),
            "cyan" => self.on_cyan(),
            "white" => self.on_white(),
            _ => return None,
        })
    }
}

/// Parse `#RRGGBB` (the `#` is optional) into its components.
fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let h = hex.trim();
    let h = h.strip_prefix('#').unwrap_or(h);
    if h.len() != 6 || !h.is_ascii() {
        return None;
    }
    let v = u32::from_str_radix(h, 16).ok()?;
    let [_, r, g, b] = v.to_be_bytes();
    Some((r, g, b))
}

/// Remove ANSI SGR sequences from `s`.
pub fn strip_ansi(s: &str) -> String {
    ANSI_SGR.replace_all(s, "").into_owned()
}
