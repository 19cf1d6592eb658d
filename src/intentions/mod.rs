mod dict_constructor_to_literal;

pub use dict_constructor_to_literal::DictConstructorToLiteral;
use thiserror::Error;

use crate::document::Document;

#[derive(Debug, Error)]
pub enum IntentionError {
    /// The synthesized replacement did not parse back as the expected
    /// literal, or the patched document no longer parsed. The document is
    /// left untouched.
    #[error("malformed replacement: {0}")]
    MalformedReplacement(String),
}

/// A user-invocable, context-sensitive source transformation offered at a
/// cursor position.
pub trait Intention {
    /// Label grouping related intentions in a host menu.
    fn family_name(&self) -> &'static str;

    /// Label for this intention.
    fn text(&self) -> &'static str;

    /// Whether the intention applies at the given byte offset. Purely
    /// observational; safe to call arbitrarily often and out of order.
    fn is_available(&self, document: &Document, offset: usize) -> bool;

    /// Apply the intention at the given byte offset. Re-locates the target
    /// itself rather than trusting a prior availability check; if nothing
    /// applicable is found, returns `Ok(false)` and leaves the document
    /// untouched.
    fn apply(&self, document: &mut Document, offset: usize) -> Result<bool, IntentionError>;
}
