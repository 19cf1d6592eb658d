use rustpython_ast::Location;

use crate::source_code::Locator;

/// A single replacement of a source range with new content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fix {
    pub content: String,
    pub location: Location,
    pub end_location: Location,
}

impl Fix {
    pub fn replacement(content: String, start: Location, end: Location) -> Self {
        Self {
            content,
            location: start,
            end_location: end,
        }
    }
}

/// Apply a fix to a source document, returning the patched contents.
pub fn apply_fix(fix: &Fix, locator: &Locator) -> String {
    let mut output = String::with_capacity(locator.contents().len() + fix.content.len());
    output.push_str(locator.slice_source_code_until(fix.location));
    output.push_str(&fix.content);
    output.push_str(locator.slice_source_code_at(fix.end_location));
    output
}
