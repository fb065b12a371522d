//! Deliver one write to several independent sinks.
//!
//! Sinks are attempted serially in registration order. A failing sink never
//! stops delivery to the others; the first error seen is what the caller
//! gets back once every sink has been tried.

use std::io::{self, Write};
use std::sync::Arc;

use crate::error::TintError;
use crate::handler::{Attr, Handler, Record};
use crate::level::Level;

/// A [`Handler`] that forwards to every wrapped handler.
#[derive(Clone, Default)]
pub struct Fanout {
    handlers: Vec<Arc<dyn Handler>>,
}

impl Fanout {
    pub fn new(handlers: Vec<Arc<dyn Handler>>) -> Self {
        Self { handlers }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Handler for Fanout {
    /// True if any sink wants the level; each sink still filters on its own.
    fn enabled(&self, level: Level) -> bool {
        self.handlers.iter().any(|h| h.enabled(level))
    }

    fn handle(&self, record: &Record) -> Result<(), TintError> {
        let mut first_err = None;
        for handler in &self.handlers {
            if let Err(e) = handler.handle(record) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn Handler> {
        Arc::new(Self::new(
            self.handlers.iter().map(|h| h.with_attrs(attrs)).collect(),
        ))
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        Arc::new(Self::new(
            self.handlers.iter().map(|h| h.with_group(name)).collect(),
        ))
    }
}

/// The same isolation for raw byte sinks.
///
/// Every write is offered in full to each sink (`write_all`), so all sinks see
/// the same bytes; the reported length is always the whole input unless a
/// sink failed.
#[derive(Default)]
pub struct FanoutWriter {
    sinks: Vec<Box<dyn Write + Send>>,
}

impl FanoutWriter {
    pub fn new(sinks: Vec<Box<dyn Write + Send>>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: impl Write + Send + 'static) {
        self.sinks.push(Box::new(sink));
    }
}

impl Write for FanoutWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut first_err = None;
        for sink in &mut self.sinks {
            if let Err(e) = sink.write_all(data) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(data.len()), Err)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut first_err = None;
        for sink in &mut self.sinks {
            if let Err(e) = sink.flush() {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}
