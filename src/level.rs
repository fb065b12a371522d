//! Log severity levels for the structured handlers.
//!
//! Four levels, matching what the `key=value` text format emits and what the
//! renderer knows how to badge. Parsing accepts the common aliases used by
//! other logging frameworks; `trace` folds into debug and `fatal` into error.

use std::fmt;

use serde::Deserialize;

/// Canonical log level enumeration, ordered by severity for `>=` filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Level {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl Level {
    /// Uppercase name as written in text log lines (`level=INFO`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    /// Parse a string into a [`Level`], case-insensitive.
    ///
    /// Returns `None` for unrecognized strings.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" | "trc" | "debug" | "dbg" => Some(Self::Debug),
            "info" | "inf" | "information" => Some(Self::Info),
            "warn" | "warning" | "wrn" => Some(Self::Warn),
            "error" | "err" | "fatal" | "critical" | "crit" | "panic" => Some(Self::Error),
            _ => None,
        }
    }

    pub const fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Debug => log::LevelFilter::Trace,
            Self::Info => log::LevelFilter::Info,
            Self::Warn => log::LevelFilter::Warn,
            Self::Error => log::LevelFilter::Error,
        }
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace | log::Level::Debug => Self::Debug,
            log::Level::Info => Self::Info,
            log::Level::Warn => Self::Warn,
            log::Level::Error => Self::Error,
        }
    }
}

impl TryFrom<String> for Level {
    type Error = String;

    fn try_from(s: String) -> Result<Self, String> {
        Self::from_str_loose(&s).ok_or_else(|| {
            format!("invalid level '{s}': expected one of debug, info, warn, error")
        })
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_loose_basic() {
        assert_eq!(Level::from_str_loose("info"), Some(Level::Info));
        assert_eq!(Level::from_str_loose("INFO"), Some(Level::Info));
        assert_eq!(Level::from_str_loose("Warning"), Some(Level::Warn));
        assert_eq!(Level::from_str_loose("error"), Some(Level::Error));
        assert_eq!(Level::from_str_loose("debug"), Some(Level::Debug));
    }

    #[test]
    fn test_from_str_loose_folded_aliases() {
        assert_eq!(Level::from_str_loose("trace"), Some(Level::Debug));
        assert_eq!(Level::from_str_loose("fatal"), Some(Level::Error));
        assert_eq!(Level::from_str_loose(" crit "), Some(Level::Error));
    }

    #[test]
    fn test_from_str_loose_unknown() {
        assert_eq!(Level::from_str_loose("verbose"), None);
        assert_eq!(Level::from_str_loose(""), None);
    }

    #[test]
    fn test_level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
    }

    #[test]
    fn test_from_log_level() {
        assert_eq!(Level::from(log::Level::Trace), Level::Debug);
        assert_eq!(Level::from(log::Level::Warn), Level::Warn);
    }

    #[test]
    fn test_display_uppercase() {
        assert_eq!(Level::Warn.to_string(), "WARN");
    }

    #[test]
    fn test_deserialize_from_string() {
        #[derive(Deserialize)]
        struct Wrapper {
            level: Level,
        }
        let w: Wrapper = toml::from_str(r#"level = "Warning""#).unwrap();
        assert_eq!(w.level, Level::Warn);
        assert!(toml::from_str::<Wrapper>(r#"level = "loud""#).is_err());
    }
}
