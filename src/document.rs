use rustpython_ast::{Stmt, Suite};
use rustpython_parser::error::ParseError;
use rustpython_parser::parser;

use crate::autofix::{self, Fix};
use crate::source_code::Locator;

/// A source file and its parse tree. The tree is only ever replaced together
/// with the contents, so the two cannot drift apart.
pub struct Document {
    contents: String,
    ast: Suite,
    path: String,
}

impl Document {
    pub fn parse(contents: &str, path: &str) -> Result<Self, ParseError> {
        let ast = parser::parse_program(contents, path)?;
        Ok(Document {
            contents: contents.to_string(),
            ast,
            path: path.to_string(),
        })
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn ast(&self) -> &[Stmt] {
        &self.ast
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Apply a fix to the document. The patched contents must reparse; on
    /// failure the document is left untouched.
    pub fn apply_fix(&mut self, fix: &Fix) -> Result<(), ParseError> {
        let locator = Locator::new(&self.contents);
        let contents = autofix::apply_fix(fix, &locator);
        let ast = parser::parse_program(&contents, &self.path)?;
        self.contents = contents;
        self.ast = ast;
        Ok(())
    }
}
