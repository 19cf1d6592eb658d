//! Rewrite Python `dict(...)` constructor calls as dict literals.
//!
//! The library exposes a single intention, [`DictConstructorToLiteral`],
//! behind the generic [`Intention`] code-action contract: `is_available`
//! answers "does this rule apply at this offset?" and `apply` performs the
//! rewrite against a [`Document`].

pub mod ast;
pub mod autofix;
pub mod cli;
pub mod document;
pub mod intentions;
pub mod logging;
mod python;
pub mod semantic;
pub mod source_code;

pub use document::Document;
pub use intentions::{DictConstructorToLiteral, Intention, IntentionError};
