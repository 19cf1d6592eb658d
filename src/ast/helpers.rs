use rustpython_ast::{Expr, ExprKind, Location, Stmt};

use crate::ast::types::Range;
use crate::ast::visitor::{self, Visitor};

struct CallFinder<'a> {
    location: Location,
    call: Option<&'a Expr>,
}

impl<'a> Visitor<'a> for CallFinder<'a> {
    fn visit_expr(&mut self, expr: &'a Expr) {
        if matches!(&expr.node, ExprKind::Call { .. })
            && Range::from_located(expr).contains(self.location)
        {
            // Children are visited afterwards, so a deeper enclosing call
            // overwrites this one.
            self.call = Some(expr);
        }
        visitor::walk_expr(self, expr);
    }
}

/// Return the innermost call expression whose range contains `location`, if
/// any.
pub fn enclosing_call(suite: &[Stmt], location: Location) -> Option<&Expr> {
    let mut finder = CallFinder {
        location,
        call: None,
    };
    for stmt in suite {
        finder.visit_stmt(stmt);
    }
    finder.call
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use rustpython_ast::ExprKind;
    use rustpython_parser::parser;

    use crate::ast::helpers::enclosing_call;
    use crate::source_code::Locator;

    fn callee_at(contents: &str, offset: usize) -> Option<String> {
        let suite = parser::parse_program(contents, "<filename>").unwrap();
        let locator = Locator::new(contents);
        enclosing_call(&suite, locator.locate(offset)).and_then(|call| {
            let ExprKind::Call { func, .. } = &call.node else {
                return None;
            };
            match &func.node {
                ExprKind::Name { id, .. } => Some(id.clone()),
                _ => None,
            }
        })
    }

    #[test]
    fn finds_enclosing_call() -> Result<()> {
        let contents = "x = dict(a=1)\n";
        //              0123456789
        assert_eq!(callee_at(contents, 4), Some("dict".to_string()));
        assert_eq!(callee_at(contents, 9), Some("dict".to_string()));
        assert_eq!(callee_at(contents, 12), Some("dict".to_string()));
        // Past the closing paren.
        assert_eq!(callee_at(contents, 13), None);
        // On the assignment target.
        assert_eq!(callee_at(contents, 0), None);
        Ok(())
    }

    #[test]
    fn finds_innermost_call() -> Result<()> {
        let contents = "x = dict(a=foo(1), b=2)\n";
        //              0         1         2
        //              0123456789012345678901234
        assert_eq!(callee_at(contents, 15), Some("foo".to_string()));
        assert_eq!(callee_at(contents, 21), Some("dict".to_string()));
        assert_eq!(callee_at(contents, 5), Some("dict".to_string()));
        Ok(())
    }

    #[test]
    fn finds_calls_in_nested_scopes() -> Result<()> {
        let contents = "def f():\n    return dict(a=1)\n";
        assert_eq!(callee_at(contents, 25), Some("dict".to_string()));
        Ok(())
    }
}
