//! Named collections of templates
//!
//! A [`TemplateCollection`] is a unique-keyed mapping from name to
//! [`Template`]. Keys are template names, full `{{name}}` token texts for
//! replacement entries, or the reserved root key. Backed by a `BTreeMap`
//! so iteration and token extraction are deterministic.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::ResolveError;
use crate::resolver::{self, Resolved};
use crate::stringify::StringifyError;
use crate::template::Template;
use crate::tokenizer::{Piece, TokenizedForm};

#[derive(Debug, Clone, Default)]
pub struct TemplateCollection {
    templates: BTreeMap<String, Template>,
}

impl TemplateCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a template under `name`, replacing any existing entry.
    pub fn insert(&mut self, name: impl Into<String>, template: Template) {
        self.templates.insert(name.into(), template);
    }

    /// Merge another collection into this one. Existing entries win on key
    /// conflict; only names not yet present are added.
    pub fn merge(&mut self, other: TemplateCollection) {
        for (name, template) in other.templates {
            self.templates.entry(name).or_insert(template);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(|name| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Template)> {
        self.templates
            .iter()
            .map(|(name, template)| (name.as_str(), template))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Extract the union of distinct `{{name}}` tokens across all member
    /// templates.
    ///
    /// A whole-template token counts as a one-element list; literal pieces
    /// contribute nothing. Each distinct token appears exactly once, in key
    /// order.
    pub fn extract_unique_tokens(&self) -> Result<BTreeSet<String>, StringifyError> {
        let mut tokens = BTreeSet::new();
        for template in self.templates.values() {
            match template.extract_tokens()? {
                TokenizedForm::Parameter(token) => {
                    tokens.insert(token);
                }
                TokenizedForm::Text(_) => {}
                TokenizedForm::Pieces(pieces) => {
                    for piece in pieces {
                        if let Piece::Parameter(token) = piece {
                            tokens.insert(token);
                        }
                    }
                }
            }
        }
        Ok(tokens)
    }

    /// Resolve every member's parameters in one coordinated pass.
    ///
    /// Each member's tokens are substituted with the resolution of the
    /// template registered under that token's text; tokens with no such
    /// member fall back to an identity entry and stay literal. Returns the
    /// name-to-tree mapping for every member, identity entries included.
    /// The collection itself is not mutated.
    pub fn resolve_parameters(&self) -> Result<BTreeMap<String, Resolved>, ResolveError> {
        resolver::resolve_collection(self)
    }
}

impl<N: Into<String>> FromIterator<(N, Template)> for TemplateCollection {
    fn from_iter<I: IntoIterator<Item = (N, Template)>>(iter: I) -> Self {
        let mut collection = TemplateCollection::new();
        for (name, template) in iter {
            collection.insert(name, template);
        }
        collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut collection = TemplateCollection::new();
        collection.insert("greeting", Template::new("Hello {{name}}"));

        assert!(collection.contains("greeting"));
        assert_eq!(collection.len(), 1);
        let template = collection.get("greeting").expect("Should be present");
        assert_eq!(template.source_text().unwrap(), "Hello {{name}}");
    }

    #[test]
    fn test_merge_preserves_existing_entries() {
        let mut collection = TemplateCollection::new();
        collection.insert("a", Template::new("original"));

        let mut incoming = TemplateCollection::new();
        incoming.insert("a", Template::new("overwritten"));
        incoming.insert("b", Template::new("added"));

        collection.merge(incoming);
        assert_eq!(collection.len(), 2);
        assert_eq!(
            collection.get("a").unwrap().source_text().unwrap(),
            "original"
        );
        assert_eq!(collection.get("b").unwrap().source_text().unwrap(), "added");
    }

    #[test]
    fn test_extract_unique_tokens_across_members() {
        let collection: TemplateCollection = [
            ("first", Template::new("a{{x}}b{{y}}c")),
            ("second", Template::new("{{x}}")),
            ("third", Template::new("no tokens here")),
        ]
        .into_iter()
        .collect();

        let tokens = collection.extract_unique_tokens().expect("Should extract");
        let tokens: Vec<&str> = tokens.iter().map(|token| token.as_str()).collect();
        assert_eq!(tokens, vec!["{{x}}", "{{y}}"]);
    }

    #[test]
    fn test_extract_unique_tokens_empty_collection() {
        let collection = TemplateCollection::new();
        assert!(collection.extract_unique_tokens().unwrap().is_empty());
    }
}
