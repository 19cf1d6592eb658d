//! Best-effort name and type resolution.
//!
//! The model is built fresh from a document's parse tree and collects every
//! name bound anywhere in the module (assignments, defs, imports, parameters,
//! pattern captures). A builtin is considered shadowed if any such binding
//! uses its name, regardless of scope. When the model is unsure, a rewrite
//! declines rather than misfires.

use rustc_hash::FxHashSet;
use rustpython_ast::{
    Alias, Excepthandler, ExcepthandlerKind, Expr, ExprContext, ExprKind, Pattern, PatternKind,
    Stmt, StmtKind,
};
use rustpython_parser::ast::{Arg, Constant};

use crate::ast::visitor::{self, Visitor};
use crate::python::builtins::BUILTINS;

#[derive(Default)]
struct BindingCollector {
    bound: FxHashSet<String>,
}

impl<'a> Visitor<'a> for BindingCollector {
    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        match &stmt.node {
            StmtKind::FunctionDef { name, .. }
            | StmtKind::AsyncFunctionDef { name, .. }
            | StmtKind::ClassDef { name, .. } => {
                self.bound.insert(name.clone());
            }
            _ => {}
        }
        visitor::walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'a Expr) {
        if let ExprKind::Name { id, ctx } = &expr.node {
            if matches!(ctx, ExprContext::Store) {
                self.bound.insert(id.clone());
            }
        }
        visitor::walk_expr(self, expr);
    }

    fn visit_arg(&mut self, arg: &'a Arg) {
        self.bound.insert(arg.node.arg.clone());
        visitor::walk_arg(self, arg);
    }

    fn visit_alias(&mut self, alias: &'a Alias) {
        let name = alias.node.asname.as_ref().unwrap_or(&alias.node.name);
        // `import a.b` binds `a`; a star import binds nothing resolvable here.
        if name != "*" {
            if let Some(first) = name.split('.').next() {
                self.bound.insert(first.to_string());
            }
        }
    }

    fn visit_excepthandler(&mut self, excepthandler: &'a Excepthandler) {
        let ExcepthandlerKind::ExceptHandler { name, .. } = &excepthandler.node;
        if let Some(name) = name {
            self.bound.insert(name.clone());
        }
        visitor::walk_excepthandler(self, excepthandler);
    }

    fn visit_pattern(&mut self, pattern: &'a Pattern) {
        match &pattern.node {
            PatternKind::MatchStar { name } | PatternKind::MatchAs { name, .. } => {
                if let Some(name) = name {
                    self.bound.insert(name.clone());
                }
            }
            PatternKind::MatchMapping { rest, .. } => {
                if let Some(rest) = rest {
                    self.bound.insert(rest.clone());
                }
            }
            _ => {}
        }
        visitor::walk_pattern(self, pattern);
    }
}

pub struct SemanticModel {
    bound: FxHashSet<String>,
}

impl SemanticModel {
    pub fn from_suite(suite: &[Stmt]) -> Self {
        let mut collector = BindingCollector::default();
        for stmt in suite {
            collector.visit_stmt(stmt);
        }
        SemanticModel {
            bound: collector.bound,
        }
    }

    /// Whether `name` refers to the builtin of that name: the builtin must
    /// exist, and no binding in the module may shadow it.
    pub fn is_builtin(&self, name: &str) -> bool {
        BUILTINS.contains(&name) && !self.bound.contains(name)
    }
}

/// The type a builtin value or constructor call evaluates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PyType {
    Bool,
    Bytes,
    Dict,
    Float,
    Int,
    List,
    NoneType,
    Set,
    Str,
    Tuple,
}

impl PyType {
    pub fn is_builtin_dict(self) -> bool {
        matches!(self, PyType::Dict)
    }
}

/// Best-effort expression typing over a `SemanticModel`, at the speed
/// suitable for availability checks that run on every keystroke.
pub struct TypeEvalContext<'a> {
    model: &'a SemanticModel,
}

impl<'a> TypeEvalContext<'a> {
    pub fn fast(model: &'a SemanticModel) -> Self {
        TypeEvalContext { model }
    }

    pub fn type_of(&self, expr: &Expr) -> Option<PyType> {
        match &expr.node {
            ExprKind::Dict { .. } | ExprKind::DictComp { .. } => Some(PyType::Dict),
            ExprKind::List { .. } | ExprKind::ListComp { .. } => Some(PyType::List),
            ExprKind::Set { .. } | ExprKind::SetComp { .. } => Some(PyType::Set),
            ExprKind::Tuple { .. } => Some(PyType::Tuple),
            ExprKind::JoinedStr { .. } => Some(PyType::Str),
            ExprKind::Constant { value, .. } => match value {
                Constant::None => Some(PyType::NoneType),
                Constant::Bool(..) => Some(PyType::Bool),
                Constant::Str(..) => Some(PyType::Str),
                Constant::Bytes(..) => Some(PyType::Bytes),
                Constant::Int(..) => Some(PyType::Int),
                Constant::Float(..) => Some(PyType::Float),
                Constant::Tuple(..) => Some(PyType::Tuple),
                _ => None,
            },
            ExprKind::Call { func, .. } => {
                let ExprKind::Name { id, .. } = &func.node else {
                    return None;
                };
                if !self.model.is_builtin(id) {
                    return None;
                }
                match id.as_str() {
                    "bool" => Some(PyType::Bool),
                    "bytes" => Some(PyType::Bytes),
                    "dict" => Some(PyType::Dict),
                    "float" => Some(PyType::Float),
                    "int" => Some(PyType::Int),
                    "list" => Some(PyType::List),
                    "set" => Some(PyType::Set),
                    "str" => Some(PyType::Str),
                    "tuple" => Some(PyType::Tuple),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}
