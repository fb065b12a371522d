//! The colorizing pipeline: parse → processors → render.
//!
//! A [`Pipeline`] is immutable once built. Reconfiguring means building a new
//! one and swapping it into the [`SharedPipeline`] handle that every writer
//! reads from.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::parser::{LogRecord, parse_line};
use crate::processor::{
    ErrorFieldProcessor, FieldStyler, FieldTransformer, Processor, StyleProcessor,
    TransformProcessor,
};
use crate::profile::Profile;
use crate::renderer::{DefaultRenderer, Renderer};
use crate::theme::Theme;

/// An ordered processor chain plus a renderer.
pub struct Pipeline {
    processors: Vec<Box<dyn Processor>>,
    renderer: Box<dyn Renderer>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("processors", &self.processors.len())
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Run the processor chain over `record`.
    pub fn process(&self, record: &mut LogRecord) {
        for processor in &self.processors {
            processor.process(record);
        }
    }

    /// Turn one raw log line into its colorized form.
    pub fn colorize(&self, line: &str) -> String {
        let mut record = parse_line(line);
        self.process(&mut record);
        self.renderer.render(&record)
    }
}

/// Assembles a [`Pipeline`].
///
/// The built-in processor order is fixed regardless of the order the setters
/// are called in: transform, style, error-field fallback, then extras in
/// registration order.
#[derive(Default)]
pub struct PipelineBuilder {
    theme: Theme,
    profile: Profile,
    styler: Option<Arc<dyn FieldStyler>>,
    transformer: Option<Arc<dyn FieldTransformer>>,
    extras: Vec<Box<dyn Processor>>,
    renderer: Option<Box<dyn Renderer>>,
}

impl PipelineBuilder {
    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    #[must_use]
    pub fn styler(mut self, styler: impl FieldStyler + 'static) -> Self {
        self.styler = Some(Arc::new(styler));
        self
    }

    #[must_use]
    pub fn transformer(mut self, transformer: impl FieldTransformer + 'static) -> Self {
        self.transformer = Some(Arc::new(transformer));
        self
    }

    /// Set or clear the styler from an already shared hook.
    #[must_use]
    pub fn shared_styler(mut self, styler: Option<Arc<dyn FieldStyler>>) -> Self {
        self.styler = styler;
        self
    }

    #[must_use]
    pub fn shared_transformer(mut self, transformer: Option<Arc<dyn FieldTransformer>>) -> Self {
        self.transformer = transformer;
        self
    }

    /// Append an extra processor; extras run after the built-ins.
    #[must_use]
    pub fn processor(mut self, processor: impl Processor + 'static) -> Self {
        self.extras.push(Box::new(processor));
        self
    }

    #[must_use]
    pub fn processors(mut self, processors: impl IntoIterator<Item = Box<dyn Processor>>) -> Self {
        self.extras.extend(processors);
        self
    }

    /// Replace the default renderer.
    #[must_use]
    pub fn renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    #[must_use]
    pub fn boxed_renderer(mut self, renderer: Option<Box<dyn Renderer>>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn build(self) -> Pipeline {
        let mut processors: Vec<Box<dyn Processor>> = Vec::with_capacity(3 + self.extras.len());
        processors.push(Box::new(TransformProcessor::new(self.transformer)));
        processors.push(Box::new(StyleProcessor::new(self.styler)));
        processors.push(Box::new(ErrorFieldProcessor::new(self.theme.err_key)));
        processors.extend(self.extras);

        let renderer = self
            .renderer
            .unwrap_or_else(|| Box::new(DefaultRenderer::new(self.theme, self.profile)));

        Pipeline {
            processors,
            renderer,
        }
    }
}

/// Shared, swappable handle to the active [`Pipeline`].
///
/// Cloning the handle shares the same slot. Readers hold the lock only long
/// enough to clone the inner `Arc`, so colorizing never blocks a swap.
#[derive(Clone, Default)]
pub struct SharedPipeline {
    inner: Arc<RwLock<Arc<Pipeline>>>,
}

impl fmt::Debug for SharedPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedPipeline").field(&*self.current()).finish()
    }
}

impl SharedPipeline {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(pipeline))),
        }
    }

    /// The pipeline active right now.
    pub fn current(&self) -> Arc<Pipeline> {
        Arc::clone(&self.inner.read())
    }

    /// Swap in a new pipeline, returning the previous one.
    pub fn replace(&self, pipeline: Pipeline) -> Arc<Pipeline> {
        let next = Arc::new(pipeline);
        std::mem::replace(&mut *self.inner.write(), next)
    }

    /// Colorize `line` with the currently active pipeline.
    pub fn colorize(&self, line: &str) -> String {
        self.current().colorize(line)
    }
}
