//! `key=value` log line parser.
//!
//! Turns one raw line into a [`LogRecord`]: the first `time`, `level` and
//! `msg` tokens fill the scalar slots, everything else becomes an ordered
//! [`RecordField`]. Parsing never fails; anything unrecognisable is skipped.

use crate::style::StyleSpan;
use crate::tokenizer::tokenize;

/// One displayable `key=value` pair of a record.
#[derive(Debug, Clone)]
pub struct RecordField {
    pub key: String,
    /// Raw value as it appeared in the line (quotes included).
    pub value: String,
    /// Replaces `value` when rendering; `value` itself is kept intact.
    pub display_value: Option<String>,
    pub show_key: bool,
    pub style: Option<StyleSpan>,
}

impl RecordField {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            display_value: None,
            show_key: true,
            style: None,
        }
    }

    /// `display_value` if set, otherwise `value`.
    pub fn effective_value(&self) -> &str {
        self.display_value.as_deref().unwrap_or(&self.value)
    }

    pub fn is_styled(&self) -> bool {
        self.style.is_some()
    }
}

/// The structured decomposition of one raw log line.
///
/// Field order is first-seen token order and drives render order.
#[derive(Debug, Clone, Default)]
pub struct LogRecord {
    pub raw: String,
    pub time: String,
    pub level: String,
    pub message: String,
    pub fields: Vec<RecordField>,
}

impl LogRecord {
    pub fn field(&self, key: &str) -> Option<&RecordField> {
        self.fields.iter().find(|f| f.key == key)
    }
}

/// Parse a single `key=value` line into a [`LogRecord`].
pub fn parse_line(line: &str) -> LogRecord {
    let mut record = LogRecord {
        raw: line.to_string(),
        ..LogRecord::default()
    };
    let (mut seen_time, mut seen_level, mut seen_msg) = (false, false, false);

    for token in tokenize(line) {
        let Some((key, value)) = token.split_once('=') else {
            continue;
        };
        if key.is_empty() {
            continue;
        }
        match key {
            "time" if !seen_time => {
                seen_time = true;
                record.time = value.to_string();
            }
            "level" if !seen_level => {
                seen_level = true;
                record.level = value.trim_matches('"').to_string();
            }
            "msg" if !seen_msg => {
                seen_msg = true;
                record.message = value.to_string();
            }
            _ => record.fields.push(RecordField::new(key, value)),
        }
    }
    record
}
