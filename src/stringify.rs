//! Stringifier boundary for template sources
//!
//! Template sources are either plain text or values that know how to
//! convert themselves to text. The conversion can fail; the failure aborts
//! the whole resolution call rather than being recovered.

use thiserror::Error;

/// A template source could not be converted to text.
#[derive(Debug, Clone, Error)]
#[error("cannot convert template source to text: {reason}")]
pub struct StringifyError {
    reason: String,
}

impl StringifyError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Conversion of a template source to text.
pub trait Stringify {
    fn stringify(&self) -> Result<String, StringifyError>;
}

impl Stringify for String {
    fn stringify(&self) -> Result<String, StringifyError> {
        Ok(self.clone())
    }
}

impl Stringify for &str {
    fn stringify(&self) -> Result<String, StringifyError> {
        Ok((*self).to_string())
    }
}
