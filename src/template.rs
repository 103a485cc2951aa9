//! Templates and replacement values
//!
//! A [`Template`] wraps one source, which is text or any value convertible
//! to text. Tokenization is computed on demand and never stored; the source
//! is never mutated. Resolution batches the template together with its
//! replacements into a [`TemplateCollection`](crate::TemplateCollection)
//! so mutually referencing replacements resolve in a single call.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::collection::TemplateCollection;
use crate::error::ResolveError;
use crate::resolver::Resolved;
use crate::stringify::{Stringify, StringifyError};
use crate::tokenizer::{self, TokenizedForm};

/// Collection key reserved for the template being resolved. Empty braces
/// never parse as a parameter, so the key cannot collide with any
/// caller-visible token name.
pub(crate) const RESERVED_KEY: &str = "{{}}";

/// The source backing a template: plain text, or a value that converts to
/// text on demand.
#[derive(Clone)]
pub enum TemplateSource {
    Text(String),
    Value(Arc<dyn Stringify + Send + Sync>),
}

impl TemplateSource {
    /// Convert the source to text. Identity for the text case.
    pub fn stringify(&self) -> Result<String, StringifyError> {
        match self {
            TemplateSource::Text(text) => Ok(text.clone()),
            TemplateSource::Value(value) => value.stringify(),
        }
    }
}

impl fmt::Debug for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSource::Text(text) => f.debug_tuple("Text").field(text).finish(),
            TemplateSource::Value(_) => f.write_str("Value(..)"),
        }
    }
}

/// A template with `{{name}}` placeholder parameters.
///
/// Identity is by instance; equality is deliberately not defined.
#[derive(Debug, Clone)]
pub struct Template {
    source: TemplateSource,
}

impl Template {
    /// Create a template from text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            source: TemplateSource::Text(text.into()),
        }
    }

    /// Create a template from a value that converts to text on demand.
    pub fn from_value(value: Arc<dyn Stringify + Send + Sync>) -> Self {
        Self {
            source: TemplateSource::Value(value),
        }
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Stringify the raw source without resolving any parameters.
    /// Idempotent; the source is never mutated.
    pub fn source_text(&self) -> Result<String, StringifyError> {
        self.source.stringify()
    }

    /// Tokenize the current source into literal and parameter pieces.
    ///
    /// Computed fresh on every call. The only failure mode is a source
    /// that cannot be stringified.
    pub fn extract_tokens(&self) -> Result<TokenizedForm, StringifyError> {
        Ok(tokenizer::tokenize(&self.source_text()?))
    }

    /// Resolve the template's parameters against `replacements` and return
    /// the generated string.
    ///
    /// Replacement values may themselves contain parameters; every value
    /// joins the same resolution batch, so tokens in replacements resolve
    /// against the full replacement set in this one call. Tokens with no
    /// replacement are kept literally in the output.
    pub fn resolve(&self, replacements: &Replacements) -> Result<String, ResolveError> {
        let mut collection = TemplateCollection::new();
        collection.insert(RESERVED_KEY, self.clone());
        collection.merge(
            replacements
                .present()
                .map(|(name, replacement)| {
                    (
                        tokenizer::parameter_text(name),
                        replacement.clone().into_template(),
                    )
                })
                .collect(),
        );

        let mut resolved = collection.resolve_parameters()?;
        // The reserved key was inserted above and every member survives
        // resolution, so the entry is always present.
        let tree = resolved
            .remove(RESERVED_KEY)
            .unwrap_or(Resolved::Text(String::new()));
        Ok(tree.flatten())
    }
}

impl From<&str> for Template {
    fn from(text: &str) -> Self {
        Template::new(text)
    }
}

impl From<String> for Template {
    fn from(text: String) -> Self {
        Template::new(text)
    }
}

/// A replacement value for one token: text, or a template whose own
/// parameters resolve within the same batch.
#[derive(Debug, Clone)]
pub enum Replacement {
    Text(String),
    Template(Template),
}

impl Replacement {
    pub fn into_template(self) -> Template {
        match self {
            Replacement::Text(text) => Template::new(text),
            Replacement::Template(template) => template,
        }
    }
}

impl From<&str> for Replacement {
    fn from(text: &str) -> Self {
        Replacement::Text(text.to_string())
    }
}

impl From<String> for Replacement {
    fn from(text: String) -> Self {
        Replacement::Text(text)
    }
}

impl From<Template> for Replacement {
    fn from(template: Template) -> Self {
        Replacement::Template(template)
    }
}

/// Errors that can occur when loading a replacements file
#[derive(Debug, Error)]
pub enum ReplacementsError {
    #[error("failed to read replacements file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("failed to parse replacements TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// TOML structure for deserializing replacement files
#[derive(Deserialize)]
struct TomlReplacements {
    replacements: BTreeMap<String, String>,
}

/// Replacement values keyed by bare token name (no braces).
///
/// An entry may be recorded with no value; such entries are dropped before
/// resolution, leaving the token unresolved exactly as if the name had
/// never been supplied.
#[derive(Debug, Clone, Default)]
pub struct Replacements {
    entries: BTreeMap<String, Option<Replacement>>,
}

impl Replacements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load replacements from a TOML file with a `[replacements]` table.
    pub fn from_file(path: &Path) -> Result<Self, ReplacementsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load replacements from a TOML string with a `[replacements]` table.
    pub fn from_toml_str(content: &str) -> Result<Self, ReplacementsError> {
        let parsed: TomlReplacements = toml::from_str(content)?;
        Ok(parsed.replacements.into_iter().collect())
    }

    /// Add a replacement value for `name`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Replacement>) -> Self {
        self.insert(name, value);
        self
    }

    /// Record `name` with no value.
    pub fn without(mut self, name: impl Into<String>) -> Self {
        self.insert_absent(name);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Replacement>) {
        self.entries.insert(name.into(), Some(value.into()));
    }

    /// Record a name with no value. The entry is dropped at resolution
    /// time, so the token stays unresolved in the output.
    pub fn insert_absent(&mut self, name: impl Into<String>) {
        self.entries.insert(name.into(), None);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entries that actually carry a value.
    pub(crate) fn present(&self) -> impl Iterator<Item = (&str, &Replacement)> {
        self.entries
            .iter()
            .filter_map(|(name, value)| value.as_ref().map(|v| (name.as_str(), v)))
    }
}

impl<N: Into<String>, V: Into<Replacement>> FromIterator<(N, V)> for Replacements {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut replacements = Replacements::new();
        for (name, value) in iter {
            replacements.insert(name, value);
        }
        replacements
    }
}
