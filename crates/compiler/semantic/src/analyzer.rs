//! # Semantic Analyzer
//!
//! Walks a syntax tree and runs the registered validators on every node.
//! Analysis is read-only: it never fails and running it twice on the same
//! tree yields the same diagnostics in the same order.

use move_ide_diagnostics::{Diagnostic, DiagnosticCollection};
use move_ide_parser::ast::{Function, Struct, UseStatement};
use move_ide_parser::{NodeId, SyntaxTree};
use rustc_hash::FxHashSet;

use crate::cache::TypeCache;
use crate::infer::InferenceContext;
use crate::types::MoveType;
use crate::validation::{create_default_registry, ValidatorRegistry};

/// Knobs for the semantic checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Warn when arithmetic mixes integer widths
    pub width_mismatch_warnings: bool,
    /// Report calls to names that resolve to nothing in the file
    pub unresolved_function_errors: bool,
    /// Extra callable names, e.g. framework natives
    pub known_functions: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            width_mismatch_warnings: true,
            unresolved_function_errors: true,
            known_functions: Vec::new(),
        }
    }
}

/// What validators may ask about the tree being analyzed
pub struct AnalysisContext<'a> {
    tree: &'a SyntaxTree,
    config: &'a AnalyzerConfig,
    types: InferenceContext<'a>,
    callable: FxHashSet<String>,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(tree: &'a SyntaxTree, config: &'a AnalyzerConfig) -> Self {
        Self::build(tree, config, InferenceContext::new(tree))
    }

    pub fn with_cache(
        tree: &'a SyntaxTree,
        config: &'a AnalyzerConfig,
        cache: &'a TypeCache,
    ) -> Self {
        Self::build(tree, config, InferenceContext::with_cache(tree, cache))
    }

    fn build(tree: &'a SyntaxTree, config: &'a AnalyzerConfig, types: InferenceContext<'a>) -> Self {
        let mut callable: FxHashSet<String> = config.known_functions.iter().cloned().collect();
        for node in tree.descendants(tree.root()) {
            if let Some(function) = Function::cast(tree, node) {
                callable.extend(function.name().map(str::to_string));
            } else if let Some(decl) = Struct::cast(tree, node) {
                // Positional struct packs look like calls
                callable.extend(decl.name().map(str::to_string));
            } else if let Some(use_stmt) = UseStatement::cast(tree, node) {
                // Module imports and `Self` only make qualified calls possible
                callable.extend(
                    use_stmt
                        .members()
                        .iter()
                        .filter(|member| member.name != "Self")
                        .map(|member| member.local_name().to_string()),
                );
            }
        }
        Self {
            tree,
            config,
            types,
            callable,
        }
    }

    pub const fn tree(&self) -> &'a SyntaxTree {
        self.tree
    }

    pub const fn config(&self) -> &'a AnalyzerConfig {
        self.config
    }

    pub fn infer(&self, node: NodeId) -> MoveType {
        self.types.infer(node)
    }

    /// Whether an unqualified call to `name` resolves to something: a
    /// function or struct declared in the file, an imported member, or a
    /// configured known function
    pub fn is_callable(&self, name: &str) -> bool {
        self.callable.contains(name)
    }
}

/// A tree paired with the validators to run on it
pub struct Analyzer<'a> {
    ctx: AnalysisContext<'a>,
    registry: ValidatorRegistry,
}

impl<'a> Analyzer<'a> {
    pub fn new(tree: &'a SyntaxTree, config: &'a AnalyzerConfig) -> Self {
        Self {
            ctx: AnalysisContext::new(tree, config),
            registry: create_default_registry(),
        }
    }

    pub fn with_cache(
        tree: &'a SyntaxTree,
        config: &'a AnalyzerConfig,
        cache: &'a TypeCache,
    ) -> Self {
        Self {
            ctx: AnalysisContext::with_cache(tree, config, cache),
            registry: create_default_registry(),
        }
    }

    /// Replace the default validators
    pub fn with_registry(mut self, registry: ValidatorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Diagnostics for one node, without descending into its children
    pub fn check_node(&self, node: NodeId) -> Vec<Diagnostic> {
        self.registry.validate_node(&self.ctx, node)
    }

    /// Diagnostics for the whole tree, in pre-order of the nodes they
    /// belong to
    pub fn analyze(&self) -> DiagnosticCollection {
        let _span = tracing::debug_span!("analyze", nodes = self.ctx.tree.len()).entered();
        self.registry.validate_all(&self.ctx)
    }
}

/// Run every default validator over `tree`
pub fn analyze(tree: &SyntaxTree, config: &AnalyzerConfig) -> DiagnosticCollection {
    Analyzer::new(tree, config).analyze()
}

/// Run the default validators on a single node
pub fn check_node(tree: &SyntaxTree, node: NodeId, config: &AnalyzerConfig) -> Vec<Diagnostic> {
    Analyzer::new(tree, config).check_node(node)
}
