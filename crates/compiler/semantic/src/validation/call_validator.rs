//! # Call Validator
//!
//! Checks call targets. Built-ins are checked for their fixed arity; any
//! other unqualified callee must name a function or struct declared in the
//! file, a name imported by a `use`, or one of the configured known
//! functions. Module qualified calls and method calls are left alone, and
//! user functions are not arity-checked.

use move_ide_diagnostics::Diagnostic;
use move_ide_parser::ast::{CallExpr, PathExpr};
use move_ide_parser::{NodeId, SyntaxKind};

use crate::analyzer::AnalysisContext;
use crate::builtins::is_builtin_function_name;
use crate::validation::Validator;

pub struct CallValidator;

impl Validator for CallValidator {
    fn kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::CallExpr]
    }

    fn validate(&self, ctx: &AnalysisContext<'_>, node: NodeId) -> Vec<Diagnostic> {
        let tree = ctx.tree();
        let Some(call) = CallExpr::cast(tree, node) else {
            return Vec::new();
        };
        let Some(callee) = call.callee().and_then(|callee| PathExpr::cast(tree, callee)) else {
            return Vec::new();
        };
        if callee.is_qualified() {
            return Vec::new();
        }
        let Some(name) = call.callee_name() else {
            return Vec::new();
        };

        if let Some(builtin) = is_builtin_function_name(&name) {
            let found = call.arguments().len();
            if found != builtin.arity() {
                return vec![Diagnostic::arity_mismatch(
                    &name,
                    builtin.arity(),
                    found,
                    tree.span(node),
                )];
            }
            return Vec::new();
        }

        if !ctx.config().unresolved_function_errors || ctx.is_callable(&name) {
            return Vec::new();
        }
        vec![Diagnostic::unresolved_function(&name, tree.span(callee.node()))]
    }
}
