//! Rendering policy: which keys to hide, how to abbreviate levels.

use std::collections::HashMap;

/// Governs how the default renderer lays out a record.
///
/// Missing `hide_keys` entries mean "show the key"; missing `level_labels`
/// entries mean "use the full uppercased level name".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub hide_keys: HashMap<String, bool>,
    /// Uppercased level name → short label.
    pub level_labels: HashMap<String, String>,
    /// `hide_keys` only applies in compact mode.
    pub compact: bool,
}

impl Default for Profile {
    fn default() -> Self {
        let hide_keys = ["time", "level", "msg", "err", "error", "player", "world"]
            .into_iter()
            .map(|k| (k.to_string(), true))
            .collect();
        let level_labels = [
            ("DEBUG", "DBG"),
            ("INFO", "INF"),
            ("WARN", "WRN"),
            ("ERROR", "ERR"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self {
            hide_keys,
            level_labels,
            compact: true,
        }
    }
}

impl Profile {
    /// A profile that hides nothing and uses full level names.
    pub fn verbose() -> Self {
        Self {
            hide_keys: HashMap::new(),
            level_labels: HashMap::new(),
            compact: false,
        }
    }

    /// Whether compact mode suppresses `key`.
    pub fn hides_key(&self, key: &str) -> bool {
        self.compact && self.hide_keys.get(key).copied().unwrap_or(false)
    }

    /// Short label for an uppercased level, or the level itself.
    pub fn level_label<'a>(&'a self, upper: &'a str) -> &'a str {
        self.level_labels.get(upper).map_or(upper, String::as_str)
    }
}
