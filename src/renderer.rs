//! Turns a processed [`LogRecord`] into the final display line.
//!
//! The default layout is a single space-joined line:
//! ```text
//! <time> <LEVEL BADGE> <message> key=value bare_value …
//! ```
//! Empty scalars are skipped, there are no trailing separators.

use crate::parser::LogRecord;
use crate::profile::Profile;
use crate::theme::Theme;

/// Renders a fully processed record.
///
/// Closures `Fn(&LogRecord) -> String` implement this directly.
pub trait Renderer: Send + Sync {
    fn render(&self, record: &LogRecord) -> String;
}

impl<F> Renderer for F
where
    F: Fn(&LogRecord) -> String + Send + Sync,
{
    fn render(&self, record: &LogRecord) -> String {
        self(record)
    }
}

/// The built-in renderer, driven by a [`Theme`] and a [`Profile`].
#[derive(Debug, Clone)]
pub struct DefaultRenderer {
    theme: Theme,
    profile: Profile,
}

impl DefaultRenderer {
    pub fn new(theme: Theme, profile: Profile) -> Self {
        Self { theme, profile }
    }

    /// Uppercase the level, abbreviate it through the profile, and wrap it in
    /// the matching badge style.
    fn level_badge(&self, level: &str) -> String {
        let upper = level.to_uppercase();
        let label = self.profile.level_label(&upper);
        let style = match upper.as_str() {
            "DEBUG" => self.theme.debug,
            "WARN" => self.theme.warn,
            "ERROR" => self.theme.error,
            _ => self.theme.info,
        };
        style.wrap(label)
    }
}

impl Renderer for DefaultRenderer {
    fn render(&self, record: &LogRecord) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(3 + record.fields.len());

        if !record.time.is_empty() {
            parts.push(self.theme.time_value.dim().wrap(&record.time));
        }
        if !record.level.is_empty() {
            parts.push(self.level_badge(&record.level));
        }
        if !record.message.is_empty() {
            parts.push(record.message.clone());
        }

        for field in &record.fields {
            let value = match field.style {
                Some(style) => style.wrap(field.effective_value()),
                None => field.effective_value().to_string(),
            };
            let show_key = field.show_key && !self.profile.hides_key(&field.key);
            if show_key {
                parts.push(format!("{}={value}", field.key));
            } else {
                parts.push(value);
            }
        }

        parts.join(" ")
    }
}
