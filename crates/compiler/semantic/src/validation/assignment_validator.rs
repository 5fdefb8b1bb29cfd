//! # Assignment Validator
//!
//! Reports `lhs = rhs` when the value type cannot be stored in the target.
//! `let` initializers are not checked.

use move_ide_diagnostics::{Diagnostic, DiagnosticCode};
use move_ide_parser::ast::AssignExpr;
use move_ide_parser::{NodeId, SyntaxKind};

use crate::analyzer::AnalysisContext;
use crate::infer::is_untyped_integer_literal;
use crate::types::is_assignable;
use crate::validation::Validator;

pub struct AssignmentValidator;

impl Validator for AssignmentValidator {
    fn kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::AssignExpr]
    }

    fn validate(&self, ctx: &AnalysisContext<'_>, node: NodeId) -> Vec<Diagnostic> {
        let tree = ctx.tree();
        let Some(assign) = AssignExpr::cast(tree, node) else {
            return Vec::new();
        };
        let (Some(lhs), Some(rhs)) = (assign.lhs(), assign.rhs()) else {
            return Vec::new();
        };
        let target = ctx.infer(lhs);
        let value = ctx.infer(rhs);
        if target.is_integer() && is_untyped_integer_literal(tree, rhs) {
            return Vec::new();
        }
        if is_assignable(&value, &target) {
            return Vec::new();
        }
        vec![Diagnostic::error(
            DiagnosticCode::InvalidAssignment,
            format!("Cannot assign value of type '{value}' to '{target}'"),
        )
        .with_location(tree.span(node))
        .with_related_span(tree.span(lhs), format!("target has type '{target}'"))]
    }
}
