//! `tintlog` — Colorize `key=value` log lines and manage the file they live in.
//!
//! The core is a [`Pipeline`]: a line is tokenized and parsed into a
//! [`LogRecord`], run through an ordered chain of processors (value
//! transforms, field styles, the error-field fallback, then any extras), and
//! rendered with a [`Theme`] and a [`Profile`]. Around it sit a structured
//! [`Logger`] that writes plain lines to a file and colorized lines to the
//! console through one [`Fanout`], and [`rotate_and_compress`] for gzip
//! archiving.
//!
//! # Example
//!
//! ```
//! use tintlog::{Pipeline, Theme, strip_ansi};
//!
//! let pipeline = Pipeline::builder().theme(Theme::nord()).build();
//! let out = pipeline.colorize("time=12:00 level=info msg=hello port=8080");
//!
//! assert!(out.contains("\x1b["));
//! assert_eq!(strip_ansi(&out), "12:00 INF hello port=8080");
//! ```

pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod fanout;
pub mod handler;
pub mod level;
pub mod logger;
pub mod parser;
pub mod pipeline;
pub mod processor;
pub mod profile;
pub mod renderer;
pub mod rotate;
pub mod style;
pub mod theme;
pub mod tokenizer;
pub mod writer;

// Re-export primary API types for convenience.
pub use config::Config;
pub use error::{RotateError, TintError};
pub use fanout::{Fanout, FanoutWriter};
pub use handler::{Attr, Handler, Record, TextHandler, attr};
pub use level::Level;
pub use logger::{LogBridge, Logger, LoggerConfig};
pub use parser::{LogRecord, RecordField, parse_line};
pub use pipeline::{Pipeline, PipelineBuilder, SharedPipeline};
pub use processor::{FieldStyler, FieldTransformer, Processor};
pub use profile::Profile;
pub use renderer::{DefaultRenderer, Renderer};
pub use rotate::rotate_and_compress;
pub use style::{StyleSpan, strip_ansi};
pub use theme::{Palette, Theme, ThemeName};
pub use tokenizer::tokenize;
pub use writer::ColorizingWriter;
