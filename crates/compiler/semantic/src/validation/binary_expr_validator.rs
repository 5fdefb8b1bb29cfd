//! # Binary Expression Validator
//!
//! Operand checks for arithmetic, comparison and logical operators.
//! Equality, bitwise and shift operators are not checked. An operand of
//! unknown type suppresses every check on its expression.

use move_ide_diagnostics::{Diagnostic, DiagnosticCode};
use move_ide_parser::ast::BinaryExpr;
use move_ide_parser::{NodeId, SyntaxKind, TokenKind};

use crate::analyzer::AnalysisContext;
use crate::infer::is_untyped_integer_literal;
use crate::types::MoveType;
use crate::validation::Validator;

pub struct BinaryExprValidator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OperatorClass {
    Arithmetic,
    Comparison,
    Logical,
}

const fn classify(op: TokenKind) -> Option<OperatorClass> {
    match op {
        TokenKind::Plus
        | TokenKind::Minus
        | TokenKind::Star
        | TokenKind::Slash
        | TokenKind::Percent => Some(OperatorClass::Arithmetic),
        TokenKind::Less | TokenKind::Greater | TokenKind::LessEq | TokenKind::GreaterEq => {
            Some(OperatorClass::Comparison)
        }
        TokenKind::AmpAmp | TokenKind::PipePipe => Some(OperatorClass::Logical),
        _ => None,
    }
}

impl Validator for BinaryExprValidator {
    fn kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::BinaryExpr]
    }

    fn validate(&self, ctx: &AnalysisContext<'_>, node: NodeId) -> Vec<Diagnostic> {
        let tree = ctx.tree();
        let Some(expr) = BinaryExpr::cast(tree, node) else {
            return Vec::new();
        };
        let (Some(op), Some(lhs), Some(rhs)) = (expr.op(), expr.lhs(), expr.rhs()) else {
            return Vec::new();
        };
        let Some(class) = classify(op) else {
            return Vec::new();
        };
        let lhs_ty = ctx.infer(lhs);
        let rhs_ty = ctx.infer(rhs);
        if lhs_ty.is_unknown() || rhs_ty.is_unknown() {
            return Vec::new();
        }

        let span = tree.span(node);
        let operand_note = |operand: NodeId, ty: &MoveType| {
            (tree.span(operand), format!("this operand has type '{ty}'"))
        };
        let mismatch = |code, expected: &str, accepts: fn(&MoveType) -> bool| {
            let mut diagnostic = Diagnostic::error(
                code,
                format!(
                    "Operator '{op}' requires {expected} operands, found '{lhs_ty}' and '{rhs_ty}'"
                ),
            )
            .with_location(span);
            for (operand, ty) in [(lhs, &lhs_ty), (rhs, &rhs_ty)] {
                if !accepts(ty) {
                    let (span, note) = operand_note(operand, ty);
                    diagnostic = diagnostic.with_related_span(span, note);
                }
            }
            vec![diagnostic]
        };

        match class {
            OperatorClass::Arithmetic | OperatorClass::Comparison => {
                if !lhs_ty.is_numeric() || !rhs_ty.is_numeric() {
                    return mismatch(DiagnosticCode::NonNumericOperand, "numeric", |ty| {
                        ty.is_numeric()
                    });
                }
                let literal_side =
                    is_untyped_integer_literal(tree, lhs) || is_untyped_integer_literal(tree, rhs);
                if class == OperatorClass::Arithmetic
                    && ctx.config().width_mismatch_warnings
                    && !literal_side
                    && lhs_ty != rhs_ty
                {
                    return vec![Diagnostic::warning(
                        DiagnosticCode::NumericWidthMismatch,
                        format!(
                            "Operands of '{op}' have different integer types '{lhs_ty}' and '{rhs_ty}'"
                        ),
                    )
                    .with_location(span)];
                }
                Vec::new()
            }
            OperatorClass::Logical => {
                if lhs_ty != MoveType::Bool || rhs_ty != MoveType::Bool {
                    return mismatch(DiagnosticCode::NonBoolOperand, "bool", |ty| {
                        *ty == MoveType::Bool
                    });
                }
                Vec::new()
            }
        }
    }
}
