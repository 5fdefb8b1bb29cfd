//! # Validator Trait and Registry
//!
//! This module defines the trait for semantic validators and provides
//! a registry that dispatches each syntax node to the validators interested
//! in its kind.

use move_ide_diagnostics::{Diagnostic, DiagnosticCollection};
use move_ide_parser::{NodeId, SyntaxKind};

use crate::analyzer::AnalysisContext;
use crate::validation::{AssignmentValidator, BinaryExprValidator, CallValidator};

/// Trait for semantic validators
pub trait Validator {
    /// Node kinds this validator wants to see
    fn kinds(&self) -> &'static [SyntaxKind];

    /// Check one node of a kind listed in [`kinds`](Self::kinds)
    fn validate(&self, ctx: &AnalysisContext<'_>, node: NodeId) -> Vec<Diagnostic>;

    /// Get the name of this validator (for debugging/logging)
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Registry for managing multiple validators
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: Vec<Box<dyn Validator>>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validator to the registry
    pub fn add_validator<V: Validator + 'static>(mut self, validator: V) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Run the validators registered for the kind of `node`, in registration
    /// order
    pub fn validate_node(&self, ctx: &AnalysisContext<'_>, node: NodeId) -> Vec<Diagnostic> {
        let kind = ctx.tree().kind(node);
        let mut diagnostics = Vec::new();
        for validator in &self.validators {
            if validator.kinds().contains(&kind) {
                let found = validator.validate(ctx, node);
                if !found.is_empty() {
                    tracing::debug!(
                        validator = validator.name(),
                        ?node,
                        count = found.len(),
                        "validator reported diagnostics"
                    );
                }
                diagnostics.extend(found);
            }
        }
        diagnostics
    }

    /// Run all validators over every node of the tree, in pre-order
    pub fn validate_all(&self, ctx: &AnalysisContext<'_>) -> DiagnosticCollection {
        let tree = ctx.tree();
        let mut collection = DiagnosticCollection::new();
        for node in tree.descendants(tree.root()) {
            collection.extend(self.validate_node(ctx, node));
        }
        collection
    }

    /// Get the number of registered validators
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

/// Create the registry with the call, operator and assignment checks
pub fn create_default_registry() -> ValidatorRegistry {
    ValidatorRegistry::new()
        .add_validator(CallValidator)
        .add_validator(BinaryExprValidator)
        .add_validator(AssignmentValidator)
}
