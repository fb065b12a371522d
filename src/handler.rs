//! Structured logging handlers.
//!
//! A [`Handler`] receives a [`Record`] and decides on its own whether and how
//! to write it. [`TextHandler`] is the standard sink: it writes one
//! `key=value` line per record, which is exactly the format
//! [`parse_line`](crate::parser::parse_line) reads back.

use std::fmt::{self, Display, Write as _};
use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::TintError;
use crate::level::Level;

/// A single structured attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub key: String,
    pub value: String,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Display) -> Self {
        Self {
            key: key.into(),
            value: value.to_string(),
        }
    }
}

/// Shorthand for [`Attr::new`].
pub fn attr(key: impl Into<String>, value: impl Display) -> Attr {
    Attr::new(key, value)
}

/// One log event as handed to handlers.
#[derive(Debug, Clone)]
pub struct Record {
    pub time: jiff::Zoned,
    pub level: Level,
    pub message: String,
    pub attrs: Vec<Attr>,
}

impl Record {
    /// A record stamped with the current local time.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            time: jiff::Zoned::now(),
            level,
            message: message.into(),
            attrs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.attrs.extend(attrs);
        self
    }
}

/// The capability set every sink exposes.
pub trait Handler: Send + Sync {
    /// Whether a record at `level` would be written.
    fn enabled(&self, level: Level) -> bool;

    fn handle(&self, record: &Record) -> Result<(), TintError>;

    /// A handler that adds `attrs` to every record.
    fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn Handler>;

    /// A handler that qualifies every following attribute key with `name`.
    fn with_group(&self, name: &str) -> Arc<dyn Handler>;
}

/// Writes records as `key=value` lines to a shared [`Write`] sink.
///
/// Clones made through [`with_attrs`](Handler::with_attrs) and
/// [`with_group`](Handler::with_group) share the same sink and lock.
pub struct TextHandler<W> {
    out: Arc<Mutex<W>>,
    min_level: Level,
    /// Already-encoded ` key=value` pairs from `with_attrs`.
    preformatted: String,
    /// `group.` prefixes accumulated from `with_group`.
    prefix: String,
}

impl<W> fmt::Debug for TextHandler<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextHandler")
            .field("min_level", &self.min_level)
            .field("preformatted", &self.preformatted)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl<W> Clone for TextHandler<W> {
    fn clone(&self) -> Self {
        Self {
            out: Arc::clone(&self.out),
            min_level: self.min_level,
            preformatted: self.preformatted.clone(),
            prefix: self.prefix.clone(),
        }
    }
}

impl<W: Write + Send + 'static> TextHandler<W> {
    pub fn new(out: W, min_level: Level) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
            min_level,
            preformatted: String::new(),
            prefix: String::new(),
        }
    }

    /// Run `f` with exclusive access to the sink.
    pub fn with_sink<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.out.lock())
    }

    /// Encode a record as one line, newline included.
    pub fn format(&self, record: &Record) -> String {
        let mut line = String::with_capacity(128);
        let _ = write!(
            line,
            "time={} level={} msg=",
            record.time.strftime("%Y-%m-%dT%H:%M:%S%.3f%:z"),
            record.level
        );
        push_value(&mut line, &record.message);
        line.push_str(&self.preformatted);
        for attr in &record.attrs {
            push_attr(&mut line, &self.prefix, attr);
        }
        line.push('\n');
        line
    }
}

impl<W: Write + Send + 'static> Handler for TextHandler<W> {
    fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    fn handle(&self, record: &Record) -> Result<(), TintError> {
        if !self.enabled(record.level) {
            return Ok(());
        }
        let line = self.format(record);
        let mut out = self.out.lock();
        out.write_all(line.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn Handler> {
        let mut next = self.clone();
        for attr in attrs {
            push_attr(&mut next.preformatted, &self.prefix, attr);
        }
        Arc::new(next)
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        let mut next = self.clone();
        if !name.is_empty() {
            next.prefix.push_str(name);
            next.prefix.push('.');
        }
        Arc::new(next)
    }
}

fn push_attr(out: &mut String, prefix: &str, attr: &Attr) {
    out.push(' ');
    out.push_str(prefix);
    out.push_str(&attr.key);
    out.push('=');
    push_value(out, &attr.value);
}

/// Append `value`, quoting it when the tokenizer would otherwise split or
/// misread it.
fn push_value(out: &mut String, value: &str) {
    if needs_quoting(value) {
        let _ = write!(out, "{value:?}");
    } else {
        out.push_str(value);
    }
}

fn needs_quoting(value: &str) -> bool {
    value.is_empty()
        || value
            .chars()
            .any(|c| c == ' ' || c == '=' || c == '"' || c.is_control())
}
