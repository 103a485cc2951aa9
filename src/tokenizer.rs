//! Tokenizer for `{{name}}` placeholder templates using logos
//!
//! A template source splits into literal runs and parameter tokens. A
//! parameter is `{{` followed by one or more non-brace characters and a
//! closing `}}`; anything else, including stray braces, is literal text.

use logos::Logos;

/// Raw lexemes over a template source. The alphabet is total: every input
/// character is covered by exactly one pattern, so lexing never fails.
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
enum RawPiece {
    /// A `{{name}}` parameter token. The inner text never contains braces.
    #[regex(r"\{\{[^{}]+\}\}")]
    Parameter,

    /// A run of non-brace characters.
    #[regex(r"[^{}]+")]
    Text,

    /// A brace that is not part of a well-formed parameter.
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
}

/// One piece of a split template: literal text or a parameter token.
///
/// Parameter pieces keep the full `{{name}}` text so unresolved tokens can
/// round-trip into output unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    Literal(String),
    Parameter(String),
}

/// The tokenized form of a template source.
///
/// The whole-source parameter case is kept distinct from the pieces case:
/// a template that consists of exactly one token resolves through that
/// token directly, without a surrounding sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizedForm {
    /// The entire source is a single `{{name}}` parameter.
    Parameter(String),
    /// The source contains no parameters at all.
    Text(String),
    /// Interleaved literal and parameter pieces, at least one parameter.
    Pieces(Vec<Piece>),
}

/// Test whether an entire string is a single `{{name}}` parameter.
///
/// The inner name must be non-empty and free of braces, so `{{}}` is not a
/// parameter (it serves as a reserved collection key for exactly that
/// reason).
pub fn is_parameter(text: &str) -> bool {
    let inner = match text.strip_prefix("{{").and_then(|rest| rest.strip_suffix("}}")) {
        Some(inner) => inner,
        None => return false,
    };
    !inner.is_empty() && !inner.contains('{') && !inner.contains('}')
}

/// Wrap a bare token name in parameter braces: `x` becomes `{{x}}`.
pub fn parameter_text(name: &str) -> String {
    format!("{{{{{name}}}}}")
}

/// Split a template source into its tokenized form.
///
/// Pure and total. Adjacent non-parameter lexemes coalesce into single
/// literal pieces, so concatenating all pieces reproduces the input
/// exactly.
pub fn tokenize(source: &str) -> TokenizedForm {
    if is_parameter(source) {
        return TokenizedForm::Parameter(source.to_string());
    }

    let mut pieces = Vec::new();
    let mut literal = String::new();
    let mut lexer = RawPiece::lexer(source);
    while let Some(lexeme) = lexer.next() {
        match lexeme {
            Ok(RawPiece::Parameter) => {
                if !literal.is_empty() {
                    pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                }
                pieces.push(Piece::Parameter(lexer.slice().to_string()));
            }
            // Text, stray braces, and (unreachable) lex errors are all
            // literal content.
            _ => literal.push_str(lexer.slice()),
        }
    }

    if pieces.is_empty() {
        return TokenizedForm::Text(source.to_string());
    }
    if !literal.is_empty() {
        pieces.push(Piece::Literal(literal));
    }
    TokenizedForm::Pieces(pieces)
}
