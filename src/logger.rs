//! Logger front-end and setup.
//!
//! [`LoggerConfig::build`] wires the whole system together: it swaps a fresh
//! [`Pipeline`] into a [`SharedPipeline`], opens the append-only log file,
//! and puts a colorizing console handler and a raw file handler behind one
//! [`Fanout`]. The resulting [`Logger`] can be used directly or installed as
//! the process-wide [`log`] backend.

use std::cell::Cell;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use crate::console::enable_console_ansi;
use crate::error::TintError;
use crate::fanout::Fanout;
use crate::handler::{Attr, Handler, Record, TextHandler};
use crate::level::Level;
use crate::pipeline::{Pipeline, SharedPipeline};
use crate::processor::{FieldStyler, FieldTransformer, Processor};
use crate::profile::Profile;
use crate::renderer::Renderer;
use crate::rotate::rotate_and_compress;
use crate::theme::Theme;
use crate::writer::ColorizingWriter;

/// Default path of the append-only log file.
pub const DEFAULT_LOG_FILE: &str = "server.log";
/// Default directory for rotated archives.
pub const DEFAULT_ARCHIVE_DIR: &str = "logs";

/// Everything [`LoggerConfig::build`] needs.
pub struct LoggerConfig {
    pub log_file: PathBuf,
    pub archive_dir: PathBuf,
    /// Minimum level for both sinks.
    pub level: Level,
    pub theme: Theme,
    pub profile: Profile,
    pub styler: Option<Arc<dyn FieldStyler>>,
    pub transformer: Option<Arc<dyn FieldTransformer>>,
    /// Extra processors, run after the built-ins in this order.
    pub processors: Vec<Box<dyn Processor>>,
    pub renderer: Option<Box<dyn Renderer>>,
    /// Emit ANSI styling on the console.
    pub color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            archive_dir: PathBuf::from(DEFAULT_ARCHIVE_DIR),
            level: Level::Info,
            theme: Theme::default_preset(),
            profile: Profile::default(),
            styler: None,
            transformer: None,
            processors: Vec::new(),
            renderer: None,
            color: true,
        }
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("log_file", &self.log_file)
            .field("archive_dir", &self.archive_dir)
            .field("level", &self.level)
            .field("profile", &self.profile)
            .field("processors", &self.processors.len())
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

impl LoggerConfig {
    /// Split into the pipeline this config describes and where records go.
    ///
    /// With color off, styles returned by the styler are disabled as well.
    fn into_parts(self) -> (Pipeline, Sinks) {
        let Self {
            log_file,
            archive_dir,
            level,
            theme,
            profile,
            mut styler,
            transformer,
            processors,
            renderer,
            color,
        } = self;
        if !color && let Some(inner) = styler.take() {
            let plain = move |key: &str, value: &str| {
                inner
                    .style_field(key, value)
                    .map(|style| style.with_enabled(false))
            };
            styler = Some(Arc::new(plain));
        }
        let pipeline = Pipeline::builder()
            .theme(theme.with_enabled(color))
            .profile(profile)
            .shared_styler(styler)
            .shared_transformer(transformer)
            .processors(processors)
            .boxed_renderer(renderer)
            .build();
        let sinks = Sinks {
            log_file,
            archive_dir,
            level,
        };
        (pipeline, sinks)
    }

    /// Set up logging to stdout and the log file with a new pipeline handle.
    pub fn build(self) -> Result<Logger, TintError> {
        self.build_with(io::stdout(), &SharedPipeline::default())
    }

    /// Set up logging to `console` and the log file, swapping this config's
    /// pipeline into `shared`.
    ///
    /// Every clone of `shared` sees the new pipeline, so this is also how a
    /// running system is reconfigured.
    pub fn build_with<W>(
        self,
        console: W,
        shared: &SharedPipeline,
    ) -> Result<Logger, TintError>
    where
        W: Write + Send + 'static,
    {
        enable_console_ansi();
        let (pipeline, sinks) = self.into_parts();
        shared.replace(pipeline);

        fs::create_dir_all(&sinks.archive_dir).map_err(|e| {
            TintError::Config(format!(
                "cannot create archive dir {}: {e}",
                sinks.archive_dir.display()
            ))
        })?;
        let file = File::options()
            .create(true)
            .append(true)
            .open(&sinks.log_file)
            .map_err(|e| {
                TintError::Config(format!("cannot open {}: {e}", sinks.log_file.display()))
            })?;

        let console = ColorizingWriter::new(console, shared.clone());
        let handlers: Vec<Arc<dyn Handler>> = vec![
            Arc::new(TextHandler::new(console, sinks.level)),
            Arc::new(TextHandler::new(file, sinks.level)),
        ];
        log::debug!("logging to {}", sinks.log_file.display());

        Ok(Logger {
            handler: Arc::new(Fanout::new(handlers)),
            pipeline: shared.clone(),
            log_file: sinks.log_file,
            archive_dir: sinks.archive_dir,
        })
    }
}

/// The non-pipeline half of a [`LoggerConfig`].
struct Sinks {
    log_file: PathBuf,
    archive_dir: PathBuf,
    level: Level,
}

/// Front-end for emitting records through a handler.
#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
    pipeline: SharedPipeline,
    log_file: PathBuf,
    archive_dir: PathBuf,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("log_file", &self.log_file)
            .field("archive_dir", &self.archive_dir)
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// A logger over an arbitrary handler, using the default file locations
    /// for [`rotate`](Self::rotate).
    pub fn new(handler: Arc<dyn Handler>, pipeline: SharedPipeline) -> Self {
        Self {
            handler,
            pipeline,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            archive_dir: PathBuf::from(DEFAULT_ARCHIVE_DIR),
        }
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// The pipeline handle the console writer colorizes with.
    pub fn pipeline(&self) -> &SharedPipeline {
        &self.pipeline
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.handler.enabled(level)
    }

    /// Emit a record if any sink wants `level`.
    ///
    /// Field hooks run while the console sink is locked. A record logged from
    /// inside a hook, on the same thread, is dropped.
    pub fn log(&self, level: Level, message: &str, attrs: &[Attr]) -> Result<(), TintError> {
        if !self.handler.enabled(level) {
            return Ok(());
        }
        let Some(_guard) = EmitGuard::enter() else {
            return Ok(());
        };
        let record = Record::new(level, message).with_attrs(attrs.iter().cloned());
        self.handler.handle(&record)
    }

    pub fn debug(&self, message: &str, attrs: &[Attr]) -> Result<(), TintError> {
        self.log(Level::Debug, message, attrs)
    }

    pub fn info(&self, message: &str, attrs: &[Attr]) -> Result<(), TintError> {
        self.log(Level::Info, message, attrs)
    }

    pub fn warn(&self, message: &str, attrs: &[Attr]) -> Result<(), TintError> {
        self.log(Level::Warn, message, attrs)
    }

    pub fn error(&self, message: &str, attrs: &[Attr]) -> Result<(), TintError> {
        self.log(Level::Error, message, attrs)
    }

    /// A logger whose records all carry `attrs`.
    #[must_use]
    pub fn with_attrs(&self, attrs: &[Attr]) -> Self {
        Self {
            handler: self.handler.with_attrs(attrs),
            ..self.clone()
        }
    }

    /// A logger whose attribute keys are qualified with `name`.
    #[must_use]
    pub fn with_group(&self, name: &str) -> Self {
        Self {
            handler: self.handler.with_group(name),
            ..self.clone()
        }
    }

    /// Rotate this logger's file into its archive directory.
    ///
    /// Nothing stops other threads from logging meanwhile; records written
    /// during the copy can be lost to the truncation.
    pub fn rotate(&self) -> Result<Option<PathBuf>, TintError> {
        Ok(rotate_and_compress(&self.log_file, &self.archive_dir)?)
    }

    /// Register this logger as the global [`log`] backend.
    pub fn install_global(&self, max_level: Level) -> Result<(), TintError> {
        log::set_boxed_logger(Box::new(LogBridge::new(self.clone())))?;
        log::set_max_level(max_level.to_level_filter());
        Ok(())
    }
}

thread_local! {
    static EMITTING: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as inside [`Logger::log`].
struct EmitGuard;

impl EmitGuard {
    fn enter() -> Option<Self> {
        EMITTING.with(|flag| (!flag.replace(true)).then_some(Self))
    }
}

impl Drop for EmitGuard {
    fn drop(&mut self) {
        EMITTING.with(|flag| flag.set(false));
    }
}

/// Adapts a [`Logger`] to the [`log`] facade.
///
/// Key-values attached with `log::info!(key = value; "...")` become
/// attributes.
#[derive(Debug, Clone)]
pub struct LogBridge {
    logger: Logger,
}

impl LogBridge {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.logger.enabled(metadata.level().into())
    }

    fn log(&self, record: &log::Record<'_>) {
        let level = Level::from(record.level());
        if !self.logger.enabled(level) {
            return;
        }
        let mut collector = AttrCollector::default();
        let _ = record.key_values().visit(&mut collector);
        let message = record.args().to_string();
        // log::Log has no error channel; a failing sink only loses this record.
        let _ = self.logger.log(level, &message, &collector.0);
    }

    fn flush(&self) {}
}

#[derive(Default)]
struct AttrCollector(Vec<Attr>);

impl<'kvs> log::kv::VisitSource<'kvs> for AttrCollector {
    fn visit_pair(
        &mut self,
        key: log::kv::Key<'kvs>,
        value: log::kv::Value<'kvs>,
    ) -> Result<(), log::kv::Error> {
        self.0.push(Attr::new(key.as_str(), value));
        Ok(())
    }
}
