//! subweave - recursive `{{placeholder}}` substitution across batches of templates
//!
//! Templates carry `{{name}}` parameter tokens. Replacement values may
//! themselves be templates with further tokens; all of them join one
//! resolution batch, so mutually referencing templates resolve in a single
//! call. Unresolved tokens are kept literally in the output.
//!
//! # Example
//!
//! ```rust
//! use subweave::{resolve, Replacements};
//!
//! let replacements = Replacements::new()
//!     .with("name", "world")
//!     .with("greeting", "Hello {{name}}");
//!
//! let text = resolve("{{greeting}}!", &replacements).unwrap();
//! assert_eq!(text, "Hello world!");
//! ```

pub mod collection;
pub mod error;
pub mod resolver;
pub mod stringify;
pub mod template;
pub mod tokenizer;

pub use collection::TemplateCollection;
pub use error::ResolveError;
pub use resolver::Resolved;
pub use stringify::{Stringify, StringifyError};
pub use template::{Replacement, Replacements, ReplacementsError, Template, TemplateSource};
pub use tokenizer::{is_parameter, tokenize, Piece, TokenizedForm};

/// Resolve a template source against a set of replacements.
///
/// This is the main entry point for the library. Equivalent to building a
/// [`Template`] and calling [`Template::resolve`].
///
/// # Example
///
/// ```rust
/// use subweave::{resolve, Replacements};
///
/// let text = resolve(
///     "dear {{title}} {{surname}},",
///     &Replacements::new().with("title", "Dr").with("surname", "Jones"),
/// )
/// .unwrap();
/// assert_eq!(text, "dear Dr Jones,");
/// ```
pub fn resolve(source: &str, replacements: &Replacements) -> Result<String, ResolveError> {
    Template::new(source).resolve(replacements)
}
