//! Themes: semantic log roles mapped to [`StyleSpan`]s.
//!
//! Three presets ship with the crate. They are plain data; nothing in the
//! pipeline special-cases a preset.

use std::fmt::Display;

use clap::ValueEnum;
use serde::Deserialize;

use crate::style::StyleSpan;

/// Styles for every role the renderer and built-in processors use.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub time_key: StyleSpan,
    pub time_value: StyleSpan,
    pub msg_key: StyleSpan,
    /// Level badge styles.
    pub debug: StyleSpan,
    pub info: StyleSpan,
    pub warn: StyleSpan,
    pub error: StyleSpan,
    /// Fallback style for `err` / `error` fields.
    pub err_key: StyleSpan,
    /// Style for the `player` field.
    pub player_key: StyleSpan,
    /// Style for the `world` field.
    pub world_key: StyleSpan,
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_preset()
    }
}

impl Theme {
    /// The standard 16-color theme with a turquoise info badge.
    pub fn default_preset() -> Self {
        let s = StyleSpan::new;
        Self {
            time_key: s().gray(),
            time_value: s().bright_blue(),
            msg_key: s().bright_white(),
            debug: s().black().on_cyan().bold(),
            info: s().black().on_hex("#40E0D0").bold(),
            warn: s().black().on_yellow().bold(),
            error: s().white().on_red().bold(),
            err_key: s().white().on_red().bold(),
            player_key: s().bright_cyan(),
            world_key: s().magenta(),
        }
    }

    /// Cold, blue-toned truecolor theme.
    pub fn nord() -> Self {
        let s = StyleSpan::new;
        Self {
            time_key: s().hex("#81A1C1"),
            time_value: s().hex("#88C0D0"),
            msg_key: s().hex("#ECEFF4").bold(),
            debug: s().black().on_hex("#88C0D0").bold(),
            info: s().black().on_hex("#8FBCBB").bold(),
            warn: s().black().on_hex("#EBCB8B").bold(),
            error: s().hex("#ECEFF4").on_hex("#BF616A").bold(),
            err_key: s().hex("#ECEFF4").on_hex("#D08770").bold(),
            player_key: s().hex("#B48EAD"),
            world_key: s().hex("#5E81AC"),
        }
    }

    /// Warm, sunset-toned truecolor theme.
    pub fn sunset() -> Self {
        let s = StyleSpan::new;
        Self {
            time_key: s().hex("#F8C8DC"),
            time_value: s().hex("#F4A261"),
            msg_key: s().hex("#FFF1E6"),
            debug: s().black().on_hex("#9BF6FF").bold(),
            info: s().black().on_hex("#70E0C0").bold(),
            warn: s().black().on_hex("#FFD166").bold(),
            error: s().hex("#FFF1E6").on_hex("#FF6B6B").bold(),
            err_key: s().hex("#FFF1E6").on_hex("#FF8FA3").bold(),
            player_key: s().hex("#CDB4DB"),
            world_key: s().hex("#A0C4FF"),
        }
    }

    /// Set the enabled flag on every role.
    #[must_use]
    pub fn with_enabled(self, enabled: bool) -> Self {
        Self {
            time_key: self.time_key.with_enabled(enabled),
            time_value: self.time_value.with_enabled(enabled),
            msg_key: self.msg_key.with_enabled(enabled),
            debug: self.debug.with_enabled(enabled),
            info: self.info.with_enabled(enabled),
            warn: self.warn.with_enabled(enabled),
            error: self.error.with_enabled(enabled),
            err_key: self.err_key.with_enabled(enabled),
            player_key: self.player_key.with_enabled(enabled),
            world_key: self.world_key.with_enabled(enabled),
        }
    }

    /// Field styles carried by the theme itself, keyed by field name.
    pub fn field_styles(&self) -> [(&'static str, StyleSpan); 2] {
        [("player", self.player_key), ("world", self.world_key)]
    }
}

/// Name of a built-in theme preset, as accepted by `--theme` and the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Default,
    Nord,
    Sunset,
}

impl ThemeName {
    pub fn theme(self) -> Theme {
        match self {
            Self::Default => Theme::default_preset(),
            Self::Nord => Theme::nord(),
            Self::Sunset => Theme::sunset(),
        }
    }
}

/// Ad-hoc styling helpers for console output that is not a log line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Palette {
    pub theme: Theme,
}

impl Palette {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn success(&self, v: impl Display) -> String {
        self.theme.info.bold().wrap(&v.to_string())
    }

    pub fn info(&self, v: impl Display) -> String {
        self.theme.info.wrap(&v.to_string())
    }

    pub fn warn(&self, v: impl Display) -> String {
        self.theme.warn.bold().wrap(&v.to_string())
    }

    pub fn error(&self, v: impl Display) -> String {
        self.theme.error.bold().wrap(&v.to_string())
    }

    pub fn debug(&self, v: impl Display) -> String {
        self.theme.debug.wrap(&v.to_string())
    }

    pub fn muted(&self, v: impl Display) -> String {
        self.theme.time_key.wrap(&v.to_string())
    }

    /// `key=value` with the key and value in the theme's message-key and
    /// time-value colors.
    pub fn kv(&self, key: &str, value: impl Display) -> String {
        format!(
            "{}={}",
            self.theme.msg_key.wrap(key),
            self.theme.time_value.wrap(&value.to_string())
        )
    }
}
