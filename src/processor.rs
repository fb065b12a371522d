//! Record processors and the field hooks they call.
//!
//! A [`Pipeline`](crate::pipeline::Pipeline) runs its processors in a fixed
//! order: [`TransformProcessor`], [`StyleProcessor`], [`ErrorFieldProcessor`],
//! then any caller-supplied extras. Processors never fail; a missing hook is
//! simply a no-op.
//!
//! Behind a [`Logger`](crate::logger::Logger), hooks run while the console
//! sink is locked; a record the hook itself logs is dropped.

use std::collections::HashMap;
use std::sync::Arc;

use crate::parser::LogRecord;
use crate::style::StyleSpan;

/// Mutates a record in place.
pub trait Processor: Send + Sync {
    fn process(&self, record: &mut LogRecord);
}

impl<F> Processor for F
where
    F: Fn(&mut LogRecord) + Send + Sync,
{
    fn process(&self, record: &mut LogRecord) {
        self(record);
    }
}

/// Picks a style for a field from its key and effective value.
///
/// Closures `Fn(&str, &str) -> Option<StyleSpan>` implement this directly.
pub trait FieldStyler: Send + Sync {
    fn style_field(&self, key: &str, value: &str) -> Option<StyleSpan>;
}

impl<F> FieldStyler for F
where
    F: Fn(&str, &str) -> Option<StyleSpan> + Send + Sync,
{
    fn style_field(&self, key: &str, value: &str) -> Option<StyleSpan> {
        self(key, value)
    }
}

/// Computes a display value for a field from its key and raw value.
///
/// Closures `Fn(&str, &str) -> Option<String>` implement this directly.
pub trait FieldTransformer: Send + Sync {
    fn transform_field(&self, key: &str, value: &str) -> Option<String>;
}

impl<F> FieldTransformer for F
where
    F: Fn(&str, &str) -> Option<String> + Send + Sync,
{
    fn transform_field(&self, key: &str, value: &str) -> Option<String> {
        self(key, value)
    }
}

/// Styles fields by key from a fixed table, ignoring values.
#[derive(Debug, Clone, Default)]
pub struct StaticFieldStyles(pub HashMap<String, StyleSpan>);

impl StaticFieldStyles {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, style: StyleSpan) -> Self {
        self.0.insert(key.into(), style);
        self
    }
}

impl FieldStyler for StaticFieldStyles {
    fn style_field(&self, key: &str, _value: &str) -> Option<StyleSpan> {
        self.0.get(key).copied()
    }
}

/// Replaces known values of known keys from a fixed table.
///
/// Values are matched with surrounding double quotes trimmed, so `"a b"` and
/// `a b` hit the same entry.
#[derive(Debug, Clone, Default)]
pub struct StaticFieldTransform(pub HashMap<String, HashMap<String, String>>);

impl StaticFieldTransform {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        display: impl Into<String>,
    ) -> Self {
        self.0
            .entry(key.into())
            .or_default()
            .insert(value.into(), display.into());
        self
    }
}

impl FieldTransformer for StaticFieldTransform {
    fn transform_field(&self, key: &str, value: &str) -> Option<String> {
        self.0.get(key)?.get(value.trim_matches('"')).cloned()
    }
}

/// Sets `display_value` on every field the transformer accepts.
#[derive(Clone, Default)]
pub struct TransformProcessor {
    transformer: Option<Arc<dyn FieldTransformer>>,
}

impl TransformProcessor {
    pub fn new(transformer: Option<Arc<dyn FieldTransformer>>) -> Self {
        Self { transformer }
    }
}

impl Processor for TransformProcessor {
    fn process(&self, record: &mut LogRecord) {
        let Some(transformer) = &self.transformer else {
            return;
        };
        for field in &mut record.fields {
            if let Some(out) = transformer.transform_field(&field.key, &field.value) {
                field.display_value = Some(out);
            }
        }
    }
}

/// Sets `style` on every field the styler accepts.
#[derive(Clone, Default)]
pub struct StyleProcessor {
    styler: Option<Arc<dyn FieldStyler>>,
}

impl StyleProcessor {
    pub fn new(styler: Option<Arc<dyn FieldStyler>>) -> Self {
        Self { styler }
    }
}

impl Processor for StyleProcessor {
    fn process(&self, record: &mut LogRecord) {
        let Some(styler) = &self.styler else {
            return;
        };
        for field in &mut record.fields {
            if let Some(style) = styler.style_field(&field.key, field.effective_value()) {
                field.style = Some(style);
            }
        }
    }
}

/// Gives unstyled `err` / `error` fields the theme's error-key style.
#[derive(Debug, Clone, Copy)]
pub struct ErrorFieldProcessor {
    err_style: StyleSpan,
}

impl ErrorFieldProcessor {
    pub fn new(err_style: StyleSpan) -> Self {
        Self { err_style }
    }
}

impl Processor for ErrorFieldProcessor {
    fn process(&self, record: &mut LogRecord) {
        for field in &mut record.fields {
            if field.style.is_none() && matches!(field.key.as_str(), "err" | "error") {
                field.style = Some(self.err_style);
            }
        }
    }
}
