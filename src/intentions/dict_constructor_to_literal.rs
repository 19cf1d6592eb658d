use itertools::Itertools;
use log::debug;
use rustpython_ast::{Expr, ExprKind, Keyword};
use rustpython_parser::parser;

use crate::ast::helpers::enclosing_call;
use crate::ast::types::Range;
use crate::autofix::Fix;
use crate::document::Document;
use crate::intentions::{Intention, IntentionError};
use crate::semantic::{PyType, SemanticModel, TypeEvalContext};
use crate::source_code::Locator;

/// Convert a `dict(...)` constructor call whose arguments are all keyword
/// arguments into the equivalent dict literal.
///
/// For instance, `dict()` becomes `{}`, and `dict(a=3, b=5)` becomes
/// `{'a' : 3,'b' : 5}`. Calls with positional or unpacking arguments
/// (`dict(foo)`, `dict(*foo)`, `dict(**foo)`) are left alone, as are calls
/// to anything named `dict` other than the builtin.
pub struct DictConstructorToLiteral;

/// The innermost call at `offset`, if it is a convertible `dict(...)` call.
fn convertible_call<'a>(
    document: &'a Document,
    offset: usize,
) -> Option<(&'a Expr, &'a [Keyword])> {
    let locator = Locator::new(document.contents());
    let call = enclosing_call(document.ast(), locator.locate(offset))?;
    let ExprKind::Call {
        func,
        args,
        keywords,
    } = &call.node
    else {
        return None;
    };
    let ExprKind::Name { id, .. } = &func.node else {
        return None;
    };
    if id != "dict" {
        return None;
    }
    let model = SemanticModel::from_suite(document.ast());
    if !TypeEvalContext::fast(&model)
        .type_of(call)
        .map_or(false, PyType::is_builtin_dict)
    {
        // A local variable or user function named `dict` shadows the builtin.
        return None;
    }
    // Only `name=value` pairs convert: positional arguments and `*` unpacking
    // live in `args`, and `**` unpacking is a keyword without a name.
    if !args.is_empty() {
        return None;
    }
    if !keywords.iter().all(|keyword| keyword.node.arg.is_some()) {
        return None;
    }
    Some((call, keywords))
}

/// Synthesize the literal source, copying each value verbatim.
fn literal_text(keywords: &[Keyword], locator: &Locator) -> String {
    let entries = keywords
        .iter()
        .filter_map(|keyword| {
            let name = keyword.node.arg.as_deref()?;
            let value =
                locator.slice_source_code_range(&Range::from_located(&keyword.node.value));
            Some(format!("'{name}' : {value}"))
        })
        .join(",");
    format!("{{{entries}}}")
}

/// Require that synthesized text parses back as a dict literal.
fn validated(text: String) -> Result<String, IntentionError> {
    let expr = parser::parse_expression(&text, "<replacement>")
        .map_err(|err| IntentionError::MalformedReplacement(err.to_string()))?;
    if !matches!(&expr.node, ExprKind::Dict { .. }) {
        return Err(IntentionError::MalformedReplacement(format!(
            "`{text}` is not a dict literal"
        )));
    }
    Ok(text)
}

impl Intention for DictConstructorToLiteral {
    fn family_name(&self) -> &'static str {
        "Convert dict constructor to dict literal"
    }

    fn text(&self) -> &'static str {
        "Convert dict constructor to dict literal"
    }

    fn is_available(&self, document: &Document, offset: usize) -> bool {
        convertible_call(document, offset).is_some()
    }

    fn apply(&self, document: &mut Document, offset: usize) -> Result<bool, IntentionError> {
        let fix = {
            let Some((call, keywords)) = convertible_call(document, offset) else {
                return Ok(false);
            };
            let locator = Locator::new(document.contents());
            let content = validated(literal_text(keywords, &locator))?;
            Fix::replacement(content, call.location, call.end_location.unwrap())
        };
        debug!("Replacing `dict(...)` call at {:?}", fix.location);
        document
            .apply_fix(&fix)
            .map_err(|err| IntentionError::MalformedReplacement(err.to_string()))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use anyhow::Result;
    use test_case::test_case;

    use crate::document::Document;
    use crate::intentions::{DictConstructorToLiteral, Intention};

    fn document(contents: &str) -> Result<Document> {
        Ok(Document::parse(contents, "<filename>")?)
    }

    #[test_case("x = dict()", 5, true ; "empty constructor")]
    #[test_case("x = dict(a=3, b=5)", 5, true ; "keyword arguments")]
    #[test_case("x = dict(a=3, b=5)", 16, true ; "offset on an argument")]
    #[test_case("x = dict(foo)", 5, false ; "positional argument")]
    #[test_case("x = dict(*foo)", 5, false ; "star unpacking")]
    #[test_case("x = dict(**foo)", 5, false ; "double star unpacking")]
    #[test_case("x = dict(a=1, **foo)", 5, false ; "mixed keyword and unpacking")]
    #[test_case("x = list(a=1)", 5, false ; "different callee")]
    #[test_case("x = d.dict(a=1)", 8, false ; "attribute callee")]
    #[test_case("x = 1 + 2", 4, false ; "no enclosing call")]
    #[test_case("x = dict(a=1)", 13, false ; "offset past the call")]
    #[test_case("dict = foo\nx = dict(a=1)", 16, false ; "shadowed by assignment")]
    #[test_case("def dict(**kw):\n    pass\nx = dict(a=1)", 30, false ; "shadowed by def")]
    #[test_case("x = dict(a=foo(1), b=2)", 16, false ; "offset in nested non-dict call")]
    fn availability(contents: &str, offset: usize, expected: bool) -> Result<()> {
        let document = document(contents)?;
        assert_eq!(
            DictConstructorToLiteral.is_available(&document, offset),
            expected
        );
        Ok(())
    }

    #[test]
    fn availability_has_no_side_effects() -> Result<()> {
        let document = document("x = dict(a=3)")?;
        for _ in 0..3 {
            assert!(DictConstructorToLiteral.is_available(&document, 5));
        }
        assert_eq!(document.contents(), "x = dict(a=3)");
        Ok(())
    }

    #[test_case("x = dict()", 5, "x = {}" ; "empty literal")]
    #[test_case("x = dict(a=3, b=5)", 5, "x = {'a' : 3,'b' : 5}" ; "two entries")]
    #[test_case(
        "x = dict(a=foo(1,2), b=[1,2])",
        5,
        "x = {'a' : foo(1,2),'b' : [1,2]}"
        ; "nested expressions verbatim"
    )]
    #[test_case(
        "x = dict(a={'nested': 1})",
        5,
        "x = {'a' : {'nested': 1}}"
        ; "nested dict literal value"
    )]
    #[test_case(
        "result = dict(key=value) + tail",
        10,
        "result = {'key' : value} + tail"
        ; "call in a larger expression"
    )]
    fn apply(contents: &str, offset: usize, expected: &str) -> Result<()> {
        let mut document = document(contents)?;
        assert!(DictConstructorToLiteral.apply(&mut document, offset)?);
        assert_eq!(document.contents(), expected);
        Ok(())
    }

    #[test]
    fn apply_preserves_argument_order() -> Result<()> {
        let mut document = document("x = dict(b=2, a=1, c=3)")?;
        assert!(DictConstructorToLiteral.apply(&mut document, 5)?);
        assert_eq!(document.contents(), "x = {'b' : 2,'a' : 1,'c' : 3}");
        Ok(())
    }

    #[test]
    fn apply_where_nothing_matches_is_a_no_op() -> Result<()> {
        let mut document = document("x = dict(foo)")?;
        assert!(!DictConstructorToLiteral.apply(&mut document, 5)?);
        assert_eq!(document.contents(), "x = dict(foo)");
        Ok(())
    }

    #[test]
    fn reapplying_after_success_is_meaningless() -> Result<()> {
        let mut document = document("x = dict(a=1)")?;
        assert!(DictConstructorToLiteral.apply(&mut document, 5)?);
        // The call expression no longer exists.
        assert!(!DictConstructorToLiteral.is_available(&document, 5));
        assert!(!DictConstructorToLiteral.apply(&mut document, 5)?);
        Ok(())
    }

    #[test]
    fn round_trip_reparses_to_equivalent_entries() -> Result<()> {
        let mut document = document("x = dict(a=3, b=5)")?;
        assert!(DictConstructorToLiteral.apply(&mut document, 5)?);
        // The rewritten document parses, and the literal carries the same
        // entries in the same order.
        let reparsed = Document::parse(document.contents(), "<filename>")?;
        use rustpython_ast::{ExprKind, StmtKind};
        let StmtKind::Assign { value, .. } = &reparsed.ast()[0].node else {
            panic!("expected assignment");
        };
        let ExprKind::Dict { keys, values } = &value.node else {
            panic!("expected dict literal");
        };
        assert_eq!(keys.len(), 2);
        assert_eq!(values.len(), 2);
        Ok(())
    }

    #[test]
    fn fixture() -> Result<()> {
        let path = Path::new("./resources/test/fixtures/dict_constructor_to_literal.py");
        let contents = fs::read_to_string(path)?;
        let mut document = Document::parse(&contents, &path.to_string_lossy())?;
        // Apply at every `dict(` site until nothing more converts.
        loop {
            let offsets: Vec<usize> = document
                .contents()
                .match_indices("dict(")
                .map(|(offset, _)| offset)
                .collect();
            let mut applied = false;
            for offset in offsets {
                if DictConstructorToLiteral.apply(&mut document, offset)? {
                    applied = true;
                    break;
                }
            }
            if !applied {
                break;
            }
        }
        insta::assert_snapshot!("dict_constructor_to_literal", document.contents());
        Ok(())
    }
}
