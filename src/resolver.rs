//! Parameter resolution across a collection of templates
//!
//! Resolution runs in one coordinated pass over a collection: every
//! distinct token gains an identity fallback entry, every member is
//! tokenized into a transient working set, and each parameter slot is then
//! expanded recursively against that working set. Correctness of nested
//! resolution relies on every transitively referenced template being a
//! member of the collection before the pass runs; `Template::resolve`
//! guarantees this by batching the root template with all replacements.

use std::collections::BTreeMap;

use crate::collection::TemplateCollection;
use crate::error::ResolveError;
use crate::template::Template;
use crate::tokenizer::{Piece, TokenizedForm};

/// A resolved template value: plain text, or a nested sequence mirroring
/// the substitutions that produced it.
///
/// The tree has no fixed depth bound; it collapses to a string via
/// [`flatten`](Resolved::flatten).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Text(String),
    Seq(Vec<Resolved>),
}

impl Resolved {
    /// Collapse the tree into a single string by depth-first,
    /// left-to-right concatenation.
    pub fn flatten(&self) -> String {
        let mut out = String::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut String) {
        match self {
            Resolved::Text(text) => out.push_str(text),
            Resolved::Seq(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }
}

/// Transient state for one resolution pass. Built per call and discarded;
/// the source collection is never mutated.
struct ResolutionContext {
    /// Tokenized form of every member, keyed by member name.
    forms: BTreeMap<String, TokenizedForm>,
    /// Tokens currently being expanded, outermost first.
    resolving: Vec<String>,
}

impl ResolutionContext {
    fn is_resolving(&self, token: &str) -> bool {
        self.resolving.iter().any(|entry| entry == token)
    }

    fn chain(&self, token: &str) -> String {
        let mut parts: Vec<&str> = self.resolving.iter().map(String::as_str).collect();
        parts.push(token);
        parts.join(" -> ")
    }
}

pub(crate) fn resolve_collection(
    collection: &TemplateCollection,
) -> Result<BTreeMap<String, Resolved>, ResolveError> {
    let tokens = collection.extract_unique_tokens()?;

    // Register an identity template for every distinct token, without
    // overwriting explicit members: unresolved and self-referential names
    // resolve to themselves. Membership grows here once, never during the
    // substitution below.
    let mut members = collection.clone();
    members.merge(
        tokens
            .into_iter()
            .map(|token| (token.clone(), Template::new(token)))
            .collect(),
    );

    let mut forms = BTreeMap::new();
    for (name, template) in members.iter() {
        forms.insert(name.to_string(), template.extract_tokens()?);
    }

    let mut ctx = ResolutionContext {
        forms,
        resolving: Vec::new(),
    };

    let names: Vec<String> = ctx.forms.keys().cloned().collect();
    let mut resolved = BTreeMap::new();
    for name in names {
        let form = ctx.forms[&name].clone();
        resolved.insert(name, expand_form(&form, &mut ctx)?);
    }
    Ok(resolved)
}

fn expand_form(
    form: &TokenizedForm,
    ctx: &mut ResolutionContext,
) -> Result<Resolved, ResolveError> {
    match form {
        TokenizedForm::Text(text) => Ok(Resolved::Text(text.clone())),
        TokenizedForm::Parameter(token) => expand_token(token, ctx),
        TokenizedForm::Pieces(pieces) => {
            let mut items = Vec::with_capacity(pieces.len());
            for piece in pieces {
                match piece {
                    Piece::Literal(text) => items.push(Resolved::Text(text.clone())),
                    Piece::Parameter(token) => items.push(expand_token(token, ctx)?),
                }
            }
            Ok(Resolved::Seq(items))
        }
    }
}

fn expand_token(token: &str, ctx: &mut ResolutionContext) -> Result<Resolved, ResolveError> {
    let form = match ctx.forms.get(token) {
        Some(form) => form.clone(),
        // No replacement and no identity fallback. Unreachable given the
        // fallback registration above; the token stays literal.
        None => return Ok(Resolved::Text(token.to_string())),
    };

    // Identity fixpoint: the token maps to its own text, so it stays
    // literal rather than recursing forever.
    if matches!(&form, TokenizedForm::Parameter(inner) if inner == token) {
        return Ok(Resolved::Text(token.to_string()));
    }

    if ctx.is_resolving(token) {
        return Err(ResolveError::CircularReference {
            chain: ctx.chain(token),
        });
    }

    ctx.resolving.push(token.to_string());
    let result = expand_form(&form, ctx);
    ctx.resolving.pop();
    result
}
