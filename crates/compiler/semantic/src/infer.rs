//! # Type Inference
//!
//! Best-effort, purely local inference over the syntax tree. Every node has
//! a type; nodes the rules do not cover, and names that resolve to nothing
//! visible in the file, are [`MoveType::Unknown`].
//!
//! Names are looked up through `let` bindings earlier in the enclosing
//! blocks, the parameters of the enclosing function and the constants of the
//! enclosing module. Chains of bindings are followed up to
//! [`MAX_INFERENCE_DEPTH`] steps.

use std::cell::Cell;

use move_ide_parser::ast::{
    CallExpr, CastExpr, Constant, Function, LetStmt, Module, Param, PathExpr, Script, Struct,
    StructField, UnaryExpr, VectorLit,
};
use move_ide_parser::{NodeId, SyntaxKind, SyntaxTree, TokenKind};

use crate::builtins::{is_builtin_function_name, BuiltinFn};
use crate::cache::TypeCache;
use crate::type_parser::parse_type;
use crate::types::MoveType;

pub const MAX_INFERENCE_DEPTH: usize = 64;

/// Inference state for one tree
pub struct InferenceContext<'a> {
    tree: &'a SyntaxTree,
    cache: Option<&'a TypeCache>,
    depth: Cell<usize>,
}

/// Infer the type of `node` without a cache
pub fn infer_type(tree: &SyntaxTree, node: NodeId) -> MoveType {
    InferenceContext::new(tree).infer(node)
}

/// Infer the type of `node` with a prepared context
pub fn infer_type_with(ctx: &InferenceContext<'_>, node: NodeId) -> MoveType {
    ctx.infer(node)
}

/// Whether `node` is an integer literal without a width suffix, looking
/// through parentheses. Such literals take the width their context needs.
pub fn is_untyped_integer_literal(tree: &SyntaxTree, node: NodeId) -> bool {
    let mut node = node;
    while tree.kind(node) == SyntaxKind::ParenExpr {
        match expr_children(tree, node).next() {
            Some(inner) => node = inner,
            None => return false,
        }
    }
    if tree.kind(node) != SyntaxKind::Literal {
        return false;
    }
    tree.significant_children(node).next().is_some_and(|token| {
        matches!(
            tree.token_kind(token),
            Some(TokenKind::IntegerLiteral | TokenKind::HexLiteral)
        ) && MoveType::from_int_suffix(tree.text(token)).is_none()
    })
}

fn expr_children(tree: &SyntaxTree, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    tree.children(node)
        .iter()
        .copied()
        .filter(|&child| tree.kind(child).is_expr())
}

impl<'a> InferenceContext<'a> {
    pub fn new(tree: &'a SyntaxTree) -> Self {
        Self {
            tree,
            cache: None,
            depth: Cell::new(0),
        }
    }

    pub fn with_cache(tree: &'a SyntaxTree, cache: &'a TypeCache) -> Self {
        Self {
            tree,
            cache: Some(cache),
            depth: Cell::new(0),
        }
    }

    pub const fn tree(&self) -> &'a SyntaxTree {
        self.tree
    }

    /// Parse annotation text, through the cache when there is one
    pub fn parse_type(&self, text: &str) -> MoveType {
        match self.cache {
            Some(cache) => cache.parse_type(text),
            None => parse_type(text),
        }
    }

    fn annotation(&self, type_node: Option<NodeId>) -> MoveType {
        type_node.map_or(MoveType::Unknown, |node| {
            self.parse_type(self.tree.text(node))
        })
    }

    pub fn infer(&self, node: NodeId) -> MoveType {
        let depth = self.depth.get();
        if depth >= MAX_INFERENCE_DEPTH {
            return MoveType::Unknown;
        }
        self.depth.set(depth + 1);
        let ty = self.infer_node(node);
        self.depth.set(depth);
        ty
    }

    fn infer_node(&self, node: NodeId) -> MoveType {
        let tree = self.tree;
        match tree.kind(node) {
            SyntaxKind::Token(kind) => self.infer_token(node, kind),
            SyntaxKind::Literal => tree
                .significant_children(node)
                .next()
                .and_then(|token| {
                    MoveType::of_literal(tree.token_kind(token)?, tree.text(token))
                })
                .unwrap_or(MoveType::Unknown),
            SyntaxKind::PathExpr => self.infer_path(node),
            SyntaxKind::ParenExpr => self.first_expr(node),
            SyntaxKind::BinaryExpr => self.infer_binary(node),
            SyntaxKind::UnaryExpr => self.infer_unary(node),
            SyntaxKind::CastExpr => {
                self.annotation(CastExpr::cast(tree, node).and_then(|cast| cast.type_node()))
            }
            SyntaxKind::VectorLit => self.infer_vector(node),
            SyntaxKind::CallExpr => self.infer_call(node),
            SyntaxKind::StructLit => tree
                .child_of_kind(node, SyntaxKind::PathExpr)
                .map_or(MoveType::Unknown, |path| self.parse_type(tree.text(path))),
            SyntaxKind::Block => self.infer_block(node),
            SyntaxKind::IfExpr => expr_children(tree, node)
                .nth(1)
                .map_or(MoveType::Unknown, |then| self.infer(then)),
            SyntaxKind::FieldExpr => self.infer_field(node),
            SyntaxKind::IndexExpr => {
                let base = self.first_expr(node);
                match base.strip_references() {
                    MoveType::Vector(element) => (**element).clone(),
                    _ => MoveType::Unknown,
                }
            }
            SyntaxKind::AssignExpr | SyntaxKind::WhileExpr => MoveType::Void,
            SyntaxKind::Param => {
                self.annotation(Param::cast(tree, node).and_then(|param| param.type_node()))
            }
            SyntaxKind::Field => self.annotation(
                StructField::cast(tree, node).and_then(|field| field.type_node()),
            ),
            SyntaxKind::Const => self.annotation(
                Constant::cast(tree, node).and_then(|constant| constant.type_node()),
            ),
            SyntaxKind::LetStmt => match LetStmt::cast(tree, node) {
                Some(stmt) => self.let_type(stmt),
                None => MoveType::Unknown,
            },
            kind if kind.is_type() => self.parse_type(tree.text(node)),
            _ => MoveType::Unknown,
        }
    }

    fn first_expr(&self, node: NodeId) -> MoveType {
        expr_children(self.tree, node)
            .next()
            .map_or(MoveType::Unknown, |inner| self.infer(inner))
    }

    fn infer_token(&self, node: NodeId, kind: TokenKind) -> MoveType {
        let tree = self.tree;
        let text = tree.text(node);
        if let Some(ty) = MoveType::of_literal(kind, text) {
            return ty;
        }
        if !kind.is_name_like() {
            return MoveType::Unknown;
        }
        if let Some(parent) = tree.parent(node) {
            match tree.kind(parent) {
                SyntaxKind::Param | SyntaxKind::Field | SyntaxKind::Const => {
                    return self.infer(parent);
                }
                SyntaxKind::Pattern => {
                    if let Some(stmt) = tree
                        .ancestor_of_kind(node, SyntaxKind::LetStmt)
                        .and_then(|stmt| LetStmt::cast(tree, stmt))
                    {
                        return self.binding_type(stmt, node);
                    }
                }
                SyntaxKind::PathExpr => return self.infer(parent),
                // A struct name inside an annotation is the type it spells.
                kind if kind.is_type() => {
                    return MoveType::from_primitive_name(text)
                        .unwrap_or_else(|| self.infer(parent));
                }
                _ => {}
            }
        }
        MoveType::from_primitive_name(text).unwrap_or(MoveType::Unknown)
    }

    fn let_type(&self, stmt: LetStmt<'_>) -> MoveType {
        if let Some(annotation) = stmt.type_annotation() {
            return self.annotation(Some(annotation));
        }
        stmt.initializer()
            .map_or(MoveType::Unknown, |init| self.infer(init))
    }

    /// Type of one bound name; destructuring patterns are not modelled
    fn binding_type(&self, stmt: LetStmt<'_>, binding: NodeId) -> MoveType {
        let is_whole_pattern = stmt
            .pattern()
            .is_some_and(|pattern| self.tree.parent(binding) == Some(pattern));
        if is_whole_pattern {
            self.let_type(stmt)
        } else {
            MoveType::Unknown
        }
    }

    fn infer_path(&self, node: NodeId) -> MoveType {
        let tree = self.tree;
        let Some(path) = PathExpr::cast(tree, node) else {
            return MoveType::Unknown;
        };
        if path.is_qualified() {
            return MoveType::Unknown;
        }
        let segments = path.segments();
        let [name] = segments.as_slice() else {
            return MoveType::Unknown;
        };
        if let Some(ty) = self.local_binding(node, name) {
            return ty;
        }
        if let Some(param) = tree
            .ancestor_of_kind(node, SyntaxKind::Function)
            .and_then(|function| Function::cast(tree, function))
            .and_then(|function| {
                function
                    .parameters()
                    .into_iter()
                    .find(|param| param.name() == Some(*name))
            })
        {
            return self.annotation(param.type_node());
        }
        if let Some(constant) = enclosing_constants(tree, node)
            .into_iter()
            .find(|constant| constant.name() == Some(*name))
        {
            return self.annotation(constant.type_node());
        }
        MoveType::from_primitive_name(name).unwrap_or(MoveType::Unknown)
    }

    /// The type of the latest `let` binding of `name` that precedes `usage`
    /// in an enclosing block
    fn local_binding(&self, usage: NodeId, name: &str) -> Option<MoveType> {
        let tree = self.tree;
        let usage_start = tree.span(usage).start;
        for block in tree
            .ancestors(usage)
            .filter(|&node| tree.kind(node) == SyntaxKind::Block)
        {
            let found = tree
                .children(block)
                .iter()
                .rev()
                .filter(|&&stmt| tree.span(stmt).end <= usage_start)
                .filter_map(|&stmt| LetStmt::cast(tree, stmt))
                .find_map(|stmt| {
                    stmt.bindings()
                        .into_iter()
                        .find(|&binding| tree.text(binding) == name)
                        .map(|binding| (stmt, binding))
                });
            if let Some((stmt, binding)) = found {
                return Some(self.binding_type(stmt, binding));
            }
        }
        None
    }

    fn infer_binary(&self, node: NodeId) -> MoveType {
        let tree = self.tree;
        let mut operands = expr_children(tree, node);
        let (Some(lhs), rhs) = (operands.next(), operands.next()) else {
            return MoveType::Unknown;
        };
        let op = tree
            .significant_children(node)
            .find_map(|child| tree.token_kind(child));
        match op {
            Some(
                TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Percent
                | TokenKind::Amp
                | TokenKind::Pipe
                | TokenKind::Caret,
            ) => {
                let lhs_ty = self.infer(lhs);
                if is_untyped_integer_literal(tree, lhs) {
                    if let Some(rhs_ty) = rhs.map(|rhs| self.infer(rhs)) {
                        if rhs_ty.is_integer() {
                            return rhs_ty;
                        }
                    }
                }
                lhs_ty
            }
            Some(TokenKind::Shl | TokenKind::Shr) => self.infer(lhs),
            Some(
                TokenKind::EqEq
                | TokenKind::Neq
                | TokenKind::Less
                | TokenKind::Greater
                | TokenKind::LessEq
                | TokenKind::GreaterEq
                | TokenKind::AmpAmp
                | TokenKind::PipePipe
                | TokenKind::EqEqGreater,
            ) => MoveType::Bool,
            _ => MoveType::Unknown,
        }
    }

    fn infer_unary(&self, node: NodeId) -> MoveType {
        let Some(unary) = UnaryExpr::cast(self.tree, node) else {
            return MoveType::Unknown;
        };
        let operand = || {
            unary
                .operand()
                .map_or(MoveType::Unknown, |operand| self.infer(operand))
        };
        match unary.op() {
            Some(TokenKind::Bang) => MoveType::Bool,
            Some(TokenKind::Amp) => MoveType::reference(unary.is_mut_ref(), operand()),
            Some(TokenKind::Star) => match operand() {
                MoveType::Reference { inner, .. } => *inner,
                _ => MoveType::Unknown,
            },
            Some(TokenKind::Move | TokenKind::Copy | TokenKind::Minus) => operand(),
            _ => MoveType::Unknown,
        }
    }

    fn infer_vector(&self, node: NodeId) -> MoveType {
        let Some(vector) = VectorLit::cast(self.tree, node) else {
            return MoveType::Unknown;
        };
        if let Some(element) = vector.element_type() {
            return MoveType::vector(self.annotation(Some(element)));
        }
        let element = vector
            .elements()
            .first()
            .map_or(MoveType::Unknown, |&first| self.infer(first));
        MoveType::vector(element)
    }

    fn infer_call(&self, node: NodeId) -> MoveType {
        let tree = self.tree;
        let Some(call) = CallExpr::cast(tree, node) else {
            return MoveType::Unknown;
        };
        let Some(name) = call.callee_name() else {
            return MoveType::Unknown;
        };
        match is_builtin_function_name(&name) {
            Some(BuiltinFn::Exists) => return MoveType::Bool,
            Some(BuiltinFn::Freeze) => {
                let arg = call.arguments().first().map(|&arg| self.infer(arg));
                return match arg {
                    Some(MoveType::Reference { inner, .. }) => MoveType::Reference {
                        mutable: false,
                        inner,
                    },
                    _ => MoveType::Unknown,
                };
            }
            Some(BuiltinFn::Assert) => return MoveType::Void,
            Some(_) => return MoveType::Unknown,
            None => {}
        }
        match find_function(tree, node, &name) {
            Some(function) => match function.return_type_text() {
                Some(text) => self.parse_type(text),
                None => MoveType::Void,
            },
            None => MoveType::Unknown,
        }
    }

    fn infer_block(&self, node: NodeId) -> MoveType {
        let tree = self.tree;
        let last = tree
            .significant_children(node)
            .filter(|&child| !tree.kind(child).is_token())
            .last();
        match last {
            Some(tail) if tree.kind(tail).is_expr() => self.infer(tail),
            _ => MoveType::Void,
        }
    }

    fn infer_field(&self, node: NodeId) -> MoveType {
        let tree = self.tree;
        let Some(field_name) = tree
            .significant_children(node)
            .filter(|&child| tree.token_kind(child).is_some_and(TokenKind::is_name_like))
            .last()
            .map(|token| tree.text(token))
        else {
            return MoveType::Unknown;
        };
        let base = self.first_expr(node);
        let MoveType::Struct { name, .. } = base.strip_references() else {
            return MoveType::Unknown;
        };
        tree.descendants(tree.root())
            .filter_map(|node| Struct::cast(tree, node))
            .filter(|decl| decl.name() == Some(name.as_str()))
            .flat_map(|decl| decl.fields())
            .find(|field| field.name() == Some(field_name))
            .map_or(MoveType::Unknown, |field| self.annotation(field.type_node()))
    }
}

/// Constants of the module or script enclosing `node`
fn enclosing_constants<'t>(tree: &'t SyntaxTree, node: NodeId) -> Vec<Constant<'t>> {
    for ancestor in tree.ancestors(node) {
        if let Some(module) = Module::cast(tree, ancestor) {
            return module.constants();
        }
        if let Some(script) = Script::cast(tree, ancestor) {
            return script.constants();
        }
    }
    Vec::new()
}

/// The function a call by `name` refers to: first in the enclosing module,
/// then anywhere in the file. `m::f` looks in the module named `m`.
fn find_function<'t>(tree: &'t SyntaxTree, from: NodeId, name: &str) -> Option<Function<'t>> {
    let (module, name) = match name.rsplit_once("::") {
        Some((module, name)) => (Some(module.rsplit("::").next().unwrap_or(module)), name),
        None => (None, name),
    };
    let all_modules = || {
        tree.descendants(tree.root())
            .filter_map(|node| Module::cast(tree, node))
    };
    if let Some(module) = module {
        return all_modules()
            .filter(|m| m.name() == Some(module))
            .flat_map(|m| m.functions())
            .find(|function| function.name() == Some(name));
    }
    let enclosing = tree
        .ancestor_of_kind(from, SyntaxKind::Module)
        .and_then(|node| Module::cast(tree, node))
        .and_then(|m| m.functions().into_iter().find(|f| f.name() == Some(name)));
    enclosing.or_else(|| {
        tree.descendants(tree.root())
            .filter_map(|node| Function::cast(tree, node))
            .find(|function| function.name() == Some(name))
    })
}
