//! # Typed Node Views
//!
//! Thin, copyable handles over [`SyntaxTree`] nodes. A view is created with
//! `cast`, which checks the node kind, and every accessor re-reads the tree
//! with a filtered child traversal. Views never own data and never panic on
//! a tree produced by the parser: missing optional children read as `None`
//! or as empty collections.

use crate::lexer::TokenKind;
use crate::syntax_kind::SyntaxKind;
use crate::tree::{NodeId, SyntaxTree};

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name<'a> {
            tree: &'a SyntaxTree,
            node: NodeId,
        }

        impl<'a> $name<'a> {
            pub const KIND: SyntaxKind = SyntaxKind::$kind;

            pub fn cast(tree: &'a SyntaxTree, node: NodeId) -> Option<Self> {
                (tree.kind(node) == Self::KIND).then_some(Self { tree, node })
            }

            pub const fn node(&self) -> NodeId {
                self.node
            }

            pub const fn tree(&self) -> &'a SyntaxTree {
                self.tree
            }

            pub fn text(&self) -> &'a str {
                self.tree.text(self.node)
            }
        }
    };
}

// ---- Helpers ---------------------------------------------------------------

/// Direct children that are nodes of the given kind, cast to a view
fn children_as<'a, T>(
    tree: &'a SyntaxTree,
    node: NodeId,
    cast: fn(&'a SyntaxTree, NodeId) -> Option<T>,
) -> Vec<T> {
    tree.children(node)
        .iter()
        .filter_map(|&child| cast(tree, child))
        .collect()
}

/// The first name-like leaf that directly follows a `keyword` leaf
fn name_after(tree: &SyntaxTree, node: NodeId, keyword: TokenKind) -> Option<NodeId> {
    let mut seen_keyword = false;
    for child in tree.significant_children(node) {
        let Some(kind) = tree.token_kind(child) else {
            continue;
        };
        if seen_keyword {
            return kind.is_name_like().then_some(child);
        }
        seen_keyword = kind == keyword;
    }
    None
}

/// Text of the leaf right after the `keyword` leaf, whatever its kind
fn token_after<'a>(tree: &'a SyntaxTree, node: NodeId, keyword: TokenKind) -> Option<&'a str> {
    tree.significant_children(node)
        .skip_while(|&child| tree.token_kind(child) != Some(keyword))
        .nth(1)
        .filter(|&child| tree.kind(child).is_token())
        .map(|child| tree.text(child))
}

/// The first name-like leaf among the direct children
fn first_name(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    tree.significant_children(node)
        .find(|&child| tree.token_kind(child).is_some_and(TokenKind::is_name_like))
}

fn first_type_child(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    tree.children(node)
        .iter()
        .copied()
        .find(|&child| tree.kind(child).is_type())
}

fn expr_children(tree: &SyntaxTree, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    tree.children(node)
        .iter()
        .copied()
        .filter(|&child| tree.kind(child).is_expr())
}

/// Leaf children preceding the first occurrence of `keyword`
fn tokens_before(tree: &SyntaxTree, node: NodeId, keyword: TokenKind) -> Vec<TokenKind> {
    tree.significant_children(node)
        .filter_map(|child| tree.token_kind(child))
        .take_while(|&kind| kind != keyword)
        .collect()
}

/// Segment texts of a path-like node, skipping `::`
fn segments(tree: &SyntaxTree, node: NodeId) -> Vec<&str> {
    tree.significant_children(node)
        .filter(|&child| {
            tree.token_kind(child)
                .is_some_and(|kind| kind != TokenKind::ColonColon && kind != TokenKind::Bang)
        })
        .map(|child| tree.text(child))
        .collect()
}

// ---- Declarations ----------------------------------------------------------

ast_node!(
    /// The root of a parsed file
    SourceFileView => File
);

impl<'a> SourceFileView<'a> {
    pub fn new(tree: &'a SyntaxTree) -> Self {
        Self {
            tree,
            node: tree.root(),
        }
    }

    /// Modules at the top level and inside `address` blocks
    pub fn modules(&self) -> Vec<Module<'a>> {
        let mut modules = Vec::new();
        for &child in self.tree.children(self.node) {
            match self.tree.kind(child) {
                SyntaxKind::Module => modules.extend(Module::cast(self.tree, child)),
                SyntaxKind::AddressBlock => {
                    modules.extend(children_as(self.tree, child, Module::cast));
                }
                _ => {}
            }
        }
        modules
    }

    pub fn scripts(&self) -> Vec<Script<'a>> {
        children_as(self.tree, self.node, Script::cast)
    }

    /// Top-level `use` declarations
    pub fn uses(&self) -> Vec<UseStatement<'a>> {
        children_as(self.tree, self.node, UseStatement::cast)
    }

    /// Every function of every module and script in the file
    pub fn all_functions(&self) -> Vec<Function<'a>> {
        let mut functions: Vec<_> = self
            .modules()
            .iter()
            .flat_map(Module::functions)
            .collect();
        functions.extend(self.scripts().iter().flat_map(Script::functions));
        functions
    }
}

ast_node!(
    /// `module 0x1::name { ... }`
    Module => Module
);

impl<'a> Module<'a> {
    pub fn name_node(&self) -> Option<NodeId> {
        match self.tree.child_token(self.node, TokenKind::ColonColon) {
            Some(_) => name_after(self.tree, self.node, TokenKind::ColonColon),
            None => name_after(self.tree, self.node, TokenKind::Module),
        }
    }

    pub fn name(&self) -> Option<&'a str> {
        self.name_node().map(|node| self.tree.text(node))
    }

    /// The address written before `::`, or the one of the enclosing
    /// `address` block.
    pub fn address(&self) -> Option<&'a str> {
        if self.tree.child_token(self.node, TokenKind::ColonColon).is_some() {
            return token_after(self.tree, self.node, TokenKind::Module);
        }
        let block = self.tree.parent(self.node)?;
        if self.tree.kind(block) != SyntaxKind::AddressBlock {
            return None;
        }
        token_after(self.tree, block, TokenKind::Address)
    }

    /// `address::name`, or just the name when no address is known
    pub fn qualified_name(&self) -> Option<String> {
        let name = self.name()?;
        Some(match self.address() {
            Some(address) => format!("{address}::{name}"),
            None => name.to_string(),
        })
    }

    pub fn functions(&self) -> Vec<Function<'a>> {
        children_as(self.tree, self.node, Function::cast)
    }

    pub fn structs(&self) -> Vec<Struct<'a>> {
        children_as(self.tree, self.node, Struct::cast)
    }

    pub fn constants(&self) -> Vec<Constant<'a>> {
        children_as(self.tree, self.node, Constant::cast)
    }

    pub fn uses(&self) -> Vec<UseStatement<'a>> {
        children_as(self.tree, self.node, UseStatement::cast)
    }

    pub fn friends(&self) -> Vec<Friend<'a>> {
        children_as(self.tree, self.node, Friend::cast)
    }

    pub fn attributes(&self) -> Vec<Attribute<'a>> {
        children_as(self.tree, self.node, Attribute::cast)
    }
}

ast_node!(
    /// `script { ... }`
    Script => Script
);

impl<'a> Script<'a> {
    pub fn functions(&self) -> Vec<Function<'a>> {
        children_as(self.tree, self.node, Function::cast)
    }

    pub fn constants(&self) -> Vec<Constant<'a>> {
        children_as(self.tree, self.node, Constant::cast)
    }

    pub fn uses(&self) -> Vec<UseStatement<'a>> {
        children_as(self.tree, self.node, UseStatement::cast)
    }
}

/// Function visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Private,
    Public,
    /// `public(friend)`
    Friend,
    /// `public(package)`
    Package,
    /// `public(script)`
    Script,
}

ast_node!(Function => Function);

impl<'a> Function<'a> {
    pub fn name_node(&self) -> Option<NodeId> {
        name_after(self.tree, self.node, TokenKind::Fun)
    }

    pub fn name(&self) -> Option<&'a str> {
        self.name_node().map(|node| self.tree.text(node))
    }

    pub fn parameters(&self) -> Vec<Param<'a>> {
        self.tree
            .child_of_kind(self.node, SyntaxKind::ParamList)
            .map(|list| children_as(self.tree, list, Param::cast))
            .unwrap_or_default()
    }

    /// The type node of the declared return type
    pub fn return_type(&self) -> Option<NodeId> {
        let ret = self.tree.child_of_kind(self.node, SyntaxKind::RetType)?;
        first_type_child(self.tree, ret)
    }

    pub fn return_type_text(&self) -> Option<&'a str> {
        self.return_type().map(|node| self.tree.text(node))
    }

    pub fn body(&self) -> Option<NodeId> {
        self.tree.child_of_kind(self.node, SyntaxKind::Block)
    }

    fn modifiers(&self) -> Vec<TokenKind> {
        tokens_before(self.tree, self.node, TokenKind::Fun)
    }

    pub fn visibility(&self) -> Visibility {
        let Some(public) = self.tree.child_token(self.node, TokenKind::Public) else {
            return Visibility::Private;
        };
        let mut after = self
            .tree
            .significant_children(self.node)
            .skip_while(|&child| child != public)
            .skip(1);
        if after.next().and_then(|c| self.tree.token_kind(c)) != Some(TokenKind::LParen) {
            return Visibility::Public;
        }
        match after.next().map(|c| self.tree.text(c)) {
            Some("friend") => Visibility::Friend,
            Some("package") => Visibility::Package,
            Some("script") => Visibility::Script,
            _ => Visibility::Public,
        }
    }

    pub fn is_public(&self) -> bool {
        self.visibility() != Visibility::Private
    }

    pub fn is_entry(&self) -> bool {
        self.modifiers().contains(&TokenKind::Entry)
    }

    pub fn is_native(&self) -> bool {
        self.modifiers().contains(&TokenKind::Native)
    }

    pub fn is_inline(&self) -> bool {
        self.modifiers().contains(&TokenKind::Inline)
    }

    pub fn type_params(&self) -> Vec<&'a str> {
        type_param_names(self.tree, self.node)
    }

    /// Resource types named in the `acquires` clause
    pub fn acquires(&self) -> Vec<String> {
        self.tree
            .child_of_kind(self.node, SyntaxKind::Acquires)
            .map(|clause| {
                self.tree
                    .children_of_kind(clause, SyntaxKind::Path)
                    .map(|path| self.tree.compact_text(path))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn attributes(&self) -> Vec<Attribute<'a>> {
        children_as(self.tree, self.node, Attribute::cast)
    }

    /// Whether the function carries `#[test]`
    pub fn is_test(&self) -> bool {
        self.attributes()
            .iter()
            .any(|attribute| attribute.names().contains(&"test"))
    }
}

fn type_param_names(tree: &SyntaxTree, node: NodeId) -> Vec<&str> {
    let Some(params) = tree.child_of_kind(node, SyntaxKind::TypeParams) else {
        return Vec::new();
    };
    tree.children_of_kind(params, SyntaxKind::TypeParam)
        .filter_map(|param| {
            tree.significant_children(param)
                .find(|&c| tree.token_kind(c) != Some(TokenKind::Phantom))
                .filter(|&c| tree.token_kind(c).is_some_and(TokenKind::is_name_like))
                .map(|c| tree.text(c))
        })
        .collect()
}

ast_node!(
    /// `#[name, name(args)]`
    Attribute => Attribute
);

impl<'a> Attribute<'a> {
    /// Top-level attribute names, e.g. `["test", "expected_failure"]`
    pub fn names(&self) -> Vec<&'a str> {
        let mut names = Vec::new();
        let mut open = 0usize;
        let mut expect_name = true;
        for child in self.tree.significant_children(self.node) {
            match self.tree.token_kind(child) {
                Some(TokenKind::LParen) => open += 1,
                Some(TokenKind::RParen) => open = open.saturating_sub(1),
                Some(TokenKind::Comma) if open == 0 => expect_name = true,
                Some(kind) if open == 0 && expect_name && kind.is_name_like() => {
                    names.push(self.tree.text(child));
                    expect_name = false;
                }
                _ => {}
            }
        }
        names
    }
}

ast_node!(Param => Param);

impl<'a> Param<'a> {
    pub fn name_node(&self) -> Option<NodeId> {
        first_name(self.tree, self.node)
    }

    pub fn name(&self) -> Option<&'a str> {
        self.name_node().map(|node| self.tree.text(node))
    }

    pub fn type_node(&self) -> Option<NodeId> {
        first_type_child(self.tree, self.node)
    }

    pub fn type_text(&self) -> Option<&'a str> {
        self.type_node().map(|node| self.tree.text(node))
    }
}

ast_node!(Struct => Struct);

impl<'a> Struct<'a> {
    pub fn name_node(&self) -> Option<NodeId> {
        name_after(self.tree, self.node, TokenKind::Struct)
    }

    pub fn name(&self) -> Option<&'a str> {
        self.name_node().map(|node| self.tree.text(node))
    }

    pub fn fields(&self) -> Vec<StructField<'a>> {
        self.tree
            .child_of_kind(self.node, SyntaxKind::FieldList)
            .map(|list| children_as(self.tree, list, StructField::cast))
            .unwrap_or_default()
    }

    /// Declared abilities, in source order
    pub fn abilities(&self) -> Vec<&'a str> {
        self.tree
            .children_of_kind(self.node, SyntaxKind::Abilities)
            .flat_map(|abilities| {
                self.tree.significant_children(abilities).filter(|&c| {
                    self.tree
                        .token_kind(c)
                        .is_some_and(|k| k != TokenKind::Has && k != TokenKind::Comma)
                })
            })
            .map(|c| self.tree.text(c))
            .collect()
    }

    pub fn has_ability(&self, ability: &str) -> bool {
        self.abilities().contains(&ability)
    }

    pub fn is_native(&self) -> bool {
        tokens_before(self.tree, self.node, TokenKind::Struct).contains(&TokenKind::Native)
    }

    pub fn type_params(&self) -> Vec<&'a str> {
        type_param_names(self.tree, self.node)
    }
}

ast_node!(StructField => Field);

impl<'a> StructField<'a> {
    pub fn name_node(&self) -> Option<NodeId> {
        first_name(self.tree, self.node)
    }

    pub fn name(&self) -> Option<&'a str> {
        self.name_node().map(|node| self.tree.text(node))
    }

    pub fn type_node(&self) -> Option<NodeId> {
        first_type_child(self.tree, self.node)
    }

    pub fn type_text(&self) -> Option<&'a str> {
        self.type_node().map(|node| self.tree.text(node))
    }
}

ast_node!(Constant => Const);

impl<'a> Constant<'a> {
    pub fn name_node(&self) -> Option<NodeId> {
        name_after(self.tree, self.node, TokenKind::Const)
    }

    pub fn name(&self) -> Option<&'a str> {
        self.name_node().map(|node| self.tree.text(node))
    }

    pub fn type_node(&self) -> Option<NodeId> {
        first_type_child(self.tree, self.node)
    }

    pub fn type_text(&self) -> Option<&'a str> {
        self.type_node().map(|node| self.tree.text(node))
    }

    /// The initializer expression
    pub fn value(&self) -> Option<NodeId> {
        expr_children(self.tree, self.node).next()
    }
}

/// One imported member of a `use` declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UseMember<'a> {
    pub name: &'a str,
    pub name_node: NodeId,
    pub alias: Option<&'a str>,
}

impl UseMember<'_> {
    /// The name the member is visible under
    pub fn local_name(&self) -> &str {
        self.alias.unwrap_or(self.name)
    }
}

ast_node!(
    /// `use a::m;`, `use a::m::X as Y;`, `use a::m::{X, Self};`
    UseStatement => Use
);

impl<'a> UseStatement<'a> {
    fn path(&self) -> Option<NodeId> {
        self.tree.child_of_kind(self.node, SyntaxKind::Path)
    }

    fn group(&self) -> Option<NodeId> {
        self.tree.child_of_kind(self.node, SyntaxKind::UseGroup)
    }

    fn path_segments(&self) -> Vec<&'a str> {
        self.path()
            .map(|path| segments(self.tree, path))
            .unwrap_or_default()
    }

    /// Whether the path names a module member rather than a module
    fn imports_member(&self) -> bool {
        self.group().is_none() && self.path_segments().len() >= 3
    }

    /// The alias after `as` outside of a member group
    fn alias(&self) -> Option<&'a str> {
        name_after(self.tree, self.node, TokenKind::As).map(|node| self.tree.text(node))
    }

    /// `0x1::coin` for `use 0x1::coin::{Coin, mint};`
    pub fn module_path(&self) -> String {
        let segments = self.path_segments();
        if self.imports_member() {
            segments[..segments.len() - 1].join("::")
        } else {
            segments.join("::")
        }
    }

    /// Last segment of [`module_path`](Self::module_path)
    pub fn module_name(&self) -> Option<String> {
        self.module_path().rsplit("::").next().map(str::to_string)
    }

    pub fn members(&self) -> Vec<UseMember<'a>> {
        if let Some(group) = self.group() {
            return self
                .tree
                .children_of_kind(group, SyntaxKind::UseMember)
                .filter_map(|member| {
                    let name_node = first_name(self.tree, member)?;
                    let alias = name_after(self.tree, member, TokenKind::As)
                        .map(|node| self.tree.text(node));
                    Some(UseMember {
                        name: self.tree.text(name_node),
                        name_node,
                        alias,
                    })
                })
                .collect();
        }
        if !self.imports_member() {
            return Vec::new();
        }
        let Some(path) = self.path() else {
            return Vec::new();
        };
        let last = self
            .tree
            .significant_children(path)
            .filter(|&c| self.tree.token_kind(c).is_some_and(TokenKind::is_name_like))
            .last();
        last.map(|name_node| UseMember {
            name: self.tree.text(name_node),
            name_node,
            alias: self.alias(),
        })
        .into_iter()
        .collect()
    }

    /// Alias of an imported module (`use 0x1::coin as c;`)
    pub fn module_alias(&self) -> Option<&'a str> {
        if self.group().is_some() || self.imports_member() {
            return None;
        }
        self.alias()
    }

    /// Every name this declaration brings into scope
    pub fn imported_names(&self) -> Vec<String> {
        let module_name = self.module_name().unwrap_or_default();
        if self.group().is_some() {
            return self
                .members()
                .iter()
                .map(|member| match (member.name, member.alias) {
                    (_, Some(alias)) => alias.to_string(),
                    ("Self", None) => module_name.clone(),
                    (name, None) => name.to_string(),
                })
                .collect();
        }
        if self.imports_member() {
            return self
                .members()
                .iter()
                .map(|member| member.local_name().to_string())
                .collect();
        }
        vec![self
            .module_alias()
            .map_or(module_name, str::to_string)]
    }
}

ast_node!(
    /// `friend 0x1::other;`
    Friend => Friend
);

impl Friend<'_> {
    pub fn path(&self) -> Option<String> {
        self.tree
            .child_of_kind(self.node, SyntaxKind::Path)
            .map(|path| self.tree.compact_text(path))
    }
}

// ---- Statements and expressions --------------------------------------------

ast_node!(
    /// `let pattern: T = init;`
    LetStmt => LetStmt
);

impl<'a> LetStmt<'a> {
    pub fn pattern(&self) -> Option<NodeId> {
        self.tree.child_of_kind(self.node, SyntaxKind::Pattern)
    }

    /// Identifier leaves introduced by the pattern
    pub fn bindings(&self) -> Vec<NodeId> {
        let Some(pattern) = self.pattern() else {
            return Vec::new();
        };
        self.tree
            .descendants(pattern)
            .filter(|&node| self.tree.kind(node) == SyntaxKind::Pattern)
            .filter_map(|node| simple_binding(self.tree, node))
            .collect()
    }

    pub fn binding_names(&self) -> Vec<&'a str> {
        self.bindings()
            .into_iter()
            .map(|node| self.tree.text(node))
            .collect()
    }

    pub fn type_annotation(&self) -> Option<NodeId> {
        first_type_child(self.tree, self.node)
    }

    pub fn initializer(&self) -> Option<NodeId> {
        expr_children(self.tree, self.node).next()
    }
}

/// The bound name of a `x` or `mut x` pattern
fn simple_binding(tree: &SyntaxTree, pattern: NodeId) -> Option<NodeId> {
    let children: Vec<_> = tree.significant_children(pattern).collect();
    let name = match children.as_slice() {
        [name] => *name,
        [prefix, name] if tree.token_kind(*prefix) == Some(TokenKind::Mut) => *name,
        _ => return None,
    };
    tree.token_kind(name)
        .is_some_and(TokenKind::is_name_like)
        .then_some(name)
}

ast_node!(Literal => Literal);

impl<'a> Literal<'a> {
    fn token(&self) -> Option<NodeId> {
        self.tree.significant_children(self.node).next()
    }

    pub fn token_kind(&self) -> Option<TokenKind> {
        self.token().and_then(|token| self.tree.token_kind(token))
    }
}

ast_node!(
    /// `a`, `coin::mint`, `assert!`
    PathExpr => PathExpr
);

impl<'a> PathExpr<'a> {
    pub fn segments(&self) -> Vec<&'a str> {
        segments(self.tree, self.node)
    }

    /// The leaf of the last segment
    pub fn name_node(&self) -> Option<NodeId> {
        self.tree
            .significant_children(self.node)
            .filter(|&c| self.tree.token_kind(c).is_some_and(TokenKind::is_name_like))
            .last()
    }

    pub fn is_qualified(&self) -> bool {
        self.tree
            .child_token(self.node, TokenKind::ColonColon)
            .is_some()
    }
}

ast_node!(CallExpr => CallExpr);

impl<'a> CallExpr<'a> {
    pub fn callee(&self) -> Option<NodeId> {
        self.tree
            .children(self.node)
            .first()
            .copied()
            .filter(|&c| !self.tree.kind(c).is_token())
    }

    /// Callee text without trivia, e.g. `coin::mint` or `assert!`
    pub fn callee_name(&self) -> Option<String> {
        let callee = self.callee()?;
        let path = PathExpr::cast(self.tree, callee)?;
        let mut name = path.segments().join("::");
        if self.tree.child_token(callee, TokenKind::Bang).is_some() {
            name.push('!');
        }
        Some(name)
    }

    pub fn arg_list(&self) -> Option<NodeId> {
        self.tree.child_of_kind(self.node, SyntaxKind::ArgList)
    }

    /// Argument expressions with a non-empty span
    pub fn arguments(&self) -> Vec<NodeId> {
        self.arg_list()
            .map(|list| {
                expr_children(self.tree, list)
                    .filter(|&arg| {
                        let span = self.tree.span(arg);
                        span.start < span.end
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

ast_node!(BinaryExpr => BinaryExpr);

impl<'a> BinaryExpr<'a> {
    pub fn lhs(&self) -> Option<NodeId> {
        expr_children(self.tree, self.node).next()
    }

    pub fn rhs(&self) -> Option<NodeId> {
        expr_children(self.tree, self.node).nth(1)
    }

    pub fn op_node(&self) -> Option<NodeId> {
        self.tree
            .significant_children(self.node)
            .find(|&c| self.tree.kind(c).is_token())
    }

    pub fn op(&self) -> Option<TokenKind> {
        self.op_node().and_then(|node| self.tree.token_kind(node))
    }
}

ast_node!(AssignExpr => AssignExpr);

impl AssignExpr<'_> {
    pub fn lhs(&self) -> Option<NodeId> {
        expr_children(self.tree, self.node).next()
    }

    pub fn rhs(&self) -> Option<NodeId> {
        expr_children(self.tree, self.node).nth(1)
    }
}

ast_node!(UnaryExpr => UnaryExpr);

impl UnaryExpr<'_> {
    pub fn op(&self) -> Option<TokenKind> {
        self.tree
            .significant_children(self.node)
            .next()
            .and_then(|node| self.tree.token_kind(node))
    }

    /// `&mut e`
    pub fn is_mut_ref(&self) -> bool {
        self.op() == Some(TokenKind::Amp)
            && self.tree.child_token(self.node, TokenKind::Mut).is_some()
    }

    pub fn operand(&self) -> Option<NodeId> {
        expr_children(self.tree, self.node).next()
    }
}

ast_node!(CastExpr => CastExpr);

impl CastExpr<'_> {
    pub fn expr(&self) -> Option<NodeId> {
        expr_children(self.tree, self.node).next()
    }

    pub fn type_node(&self) -> Option<NodeId> {
        first_type_child(self.tree, self.node)
    }
}

ast_node!(VectorLit => VectorLit);

impl VectorLit<'_> {
    pub fn elements(&self) -> Vec<NodeId> {
        expr_children(self.tree, self.node).collect()
    }

    /// The explicit element type of `vector<T>[...]`
    pub fn element_type(&self) -> Option<NodeId> {
        let args = self.tree.child_of_kind(self.node, SyntaxKind::TypeArgs)?;
        first_type_child(self.tree, args)
    }
}
