//! # Name Resolution
//!
//! Maps identifier leaves to the declarations they may refer to, and a
//! declaration back to the identifiers that mention it. Resolution is by
//! exact name within a single file:
//!
//! 1. members (functions, structs, constants) of the enclosing module or
//!    script,
//! 2. names brought in by `use` declarations anywhere in the file,
//! 3. when neither matches, members of every module and script in the file.
//!
//! A qualified path `m::name` looks `name` up in the module `m` only, and a
//! path segment followed by `::` refers to a module.

use move_ide_parser::ast::{Module, SourceFileView, UseStatement};
use move_ide_parser::{NodeId, SyntaxKind, SyntaxTree, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Module,
    Function,
    Struct,
    Constant,
    /// A module member imported by `use`
    Import,
    /// A module imported by `use`, possibly through `Self`
    ModuleImport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    /// The declaring node: a module, function, struct, constant or `use`
    pub node: NodeId,
    /// The identifier leaf that introduces the name
    pub name_node: NodeId,
}

impl Declaration {
    fn new(tree: &SyntaxTree, kind: DeclarationKind, node: NodeId, name_node: NodeId) -> Self {
        Self {
            kind,
            name: tree.text(name_node).to_string(),
            node,
            name_node,
        }
    }
}

/// Position of an identifier inside a `a::b::c` path
struct PathPosition<'t> {
    qualifier: Option<&'t str>,
    followed_by_segment: bool,
}

fn path_position<'t>(tree: &'t SyntaxTree, leaf: NodeId) -> PathPosition<'t> {
    let unqualified = PathPosition {
        qualifier: None,
        followed_by_segment: false,
    };
    let Some(parent) = tree.parent(leaf) else {
        return unqualified;
    };
    if !matches!(
        tree.kind(parent),
        SyntaxKind::PathExpr | SyntaxKind::PathType | SyntaxKind::Path
    ) {
        return unqualified;
    }
    let segments: Vec<NodeId> = tree
        .significant_children(parent)
        .filter(|&child| {
            tree.token_kind(child)
                .is_some_and(|kind| kind.is_name_like() || kind == TokenKind::HexLiteral)
        })
        .collect();
    let Some(index) = segments.iter().position(|&segment| segment == leaf) else {
        return unqualified;
    };
    PathPosition {
        qualifier: index
            .checked_sub(1)
            .map(|previous| tree.text(segments[previous])),
        followed_by_segment: index + 1 < segments.len(),
    }
}

fn name_leaf(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    match tree.kind(node) {
        SyntaxKind::Token(kind) if kind.is_name_like() => Some(node),
        SyntaxKind::PathExpr | SyntaxKind::PathType | SyntaxKind::Path => tree
            .significant_children(node)
            .filter(|&child| tree.token_kind(child).is_some_and(TokenKind::is_name_like))
            .last(),
        _ => None,
    }
}

/// Declarations of the functions, structs and constants of a module or
/// script node named `name`
fn members_named(tree: &SyntaxTree, container: NodeId, name: &str) -> Vec<Declaration> {
    let mut found = Vec::new();
    for &child in tree.children(container) {
        let kind = match tree.kind(child) {
            SyntaxKind::Function => DeclarationKind::Function,
            SyntaxKind::Struct => DeclarationKind::Struct,
            SyntaxKind::Const => DeclarationKind::Constant,
            _ => continue,
        };
        let keyword = match kind {
            DeclarationKind::Function => TokenKind::Fun,
            DeclarationKind::Struct => TokenKind::Struct,
            _ => TokenKind::Const,
        };
        let name_node = tree
            .significant_children(child)
            .skip_while(|&leaf| tree.token_kind(leaf) != Some(keyword))
            .nth(1)
            .filter(|&leaf| tree.token_kind(leaf).is_some_and(TokenKind::is_name_like));
        if let Some(name_node) = name_node {
            if tree.text(name_node) == name {
                found.push(Declaration::new(tree, kind, child, name_node));
            }
        }
    }
    found
}

/// The leaf after `as` among the direct children of `node`
fn alias_leaf(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    tree.significant_children(node)
        .skip_while(|&leaf| tree.token_kind(leaf) != Some(TokenKind::As))
        .nth(1)
        .filter(|&leaf| tree.token_kind(leaf).is_some_and(TokenKind::is_name_like))
}

/// Every name a `use` declaration introduces
fn use_declarations(tree: &SyntaxTree, use_stmt: UseStatement<'_>) -> Vec<Declaration> {
    let use_node = use_stmt.node();
    let members = use_stmt.members();
    if members.is_empty() {
        let name_node = alias_leaf(tree, use_node).or_else(|| {
            tree.child_of_kind(use_node, SyntaxKind::Path)
                .and_then(|path| name_leaf(tree, path))
        });
        return name_node
            .map(|name_node| {
                Declaration::new(tree, DeclarationKind::ModuleImport, use_node, name_node)
            })
            .into_iter()
            .collect();
    }
    members
        .into_iter()
        .map(|member| {
            let holder = match tree.parent(member.name_node) {
                Some(parent) if tree.kind(parent) == SyntaxKind::UseMember => parent,
                _ => use_node,
            };
            let name_node = alias_leaf(tree, holder).unwrap_or(member.name_node);
            let mut declaration =
                Declaration::new(tree, DeclarationKind::Import, use_node, name_node);
            if member.name == "Self" {
                declaration.kind = DeclarationKind::ModuleImport;
                if member.alias.is_none() {
                    declaration.name = use_stmt.module_name().unwrap_or_default();
                }
            }
            declaration
        })
        .collect()
}

fn all_uses(tree: &SyntaxTree) -> impl Iterator<Item = UseStatement<'_>> {
    tree.descendants(tree.root())
        .filter_map(move |node| UseStatement::cast(tree, node))
}

/// Modules declared in the file under `name`, and imports of that name
fn resolve_module(tree: &SyntaxTree, name: &str) -> Vec<Declaration> {
    let mut found: Vec<Declaration> = SourceFileView::new(tree)
        .modules()
        .into_iter()
        .filter_map(|module| {
            let name_node = module.name_node()?;
            (tree.text(name_node) == name)
                .then(|| Declaration::new(tree, DeclarationKind::Module, module.node(), name_node))
        })
        .collect();
    found.extend(
        all_uses(tree)
            .flat_map(|use_stmt| use_declarations(tree, use_stmt))
            .filter(|decl| decl.kind == DeclarationKind::ModuleImport && decl.name == name),
    );
    found
}

/// The declarations `identifier` may refer to, in lookup order
pub fn resolve(tree: &SyntaxTree, identifier: NodeId) -> Vec<Declaration> {
    let Some(leaf) = name_leaf(tree, identifier) else {
        return Vec::new();
    };
    let name = tree.text(leaf);
    let position = path_position(tree, leaf);

    if position.followed_by_segment {
        return resolve_module(tree, name);
    }
    if let Some(qualifier) = position.qualifier {
        let modules = SourceFileView::new(tree).modules();
        let mut found: Vec<Declaration> = modules
            .iter()
            .filter(|module| module.name() == Some(qualifier))
            .flat_map(|module| members_named(tree, module.node(), name))
            .collect();
        // `0x1::coin` names the module `coin` at address `0x1`
        found.extend(
            modules
                .iter()
                .filter(|module| module.name() == Some(name) && module.address() == Some(qualifier))
                .filter_map(|module| {
                    let name_node = module.name_node()?;
                    Some(Declaration::new(
                        tree,
                        DeclarationKind::Module,
                        module.node(),
                        name_node,
                    ))
                }),
        );
        return found;
    }

    let mut found = Vec::new();
    if let Some(container) = tree
        .ancestors(leaf)
        .find(|&node| matches!(tree.kind(node), SyntaxKind::Module | SyntaxKind::Script))
    {
        found.extend(members_named(tree, container, name));
    }
    found.extend(
        all_uses(tree)
            .flat_map(|use_stmt| use_declarations(tree, use_stmt))
            .filter(|decl| decl.name == name),
    );
    if found.is_empty() {
        let file = SourceFileView::new(tree);
        let containers = file
            .modules()
            .into_iter()
            .map(|module| module.node())
            .chain(file.scripts().into_iter().map(|script| script.node()));
        for container in containers {
            found.extend(members_named(tree, container, name));
        }
    }
    tracing::trace!(name, found = found.len(), "resolved identifier");
    found
}

/// Identifier leaves whose text is the declared name, including those in
/// `use` declarations. The declaration's own name leaf is not included.
pub fn find_usages(tree: &SyntaxTree, declaration: &Declaration) -> Vec<NodeId> {
    tree.tokens()
        .filter(|&token| token != declaration.name_node)
        .filter(|&token| tree.token_kind(token).is_some_and(TokenKind::is_name_like))
        .filter(|&token| tree.text(token) == declaration.name)
        .collect()
}

/// The declaration whose name leaf is `leaf`, if `leaf` introduces a name
fn declared_by(tree: &SyntaxTree, leaf: NodeId) -> Option<Declaration> {
    let parent = tree.parent(leaf)?;
    match tree.kind(parent) {
        SyntaxKind::Module => {
            let module = Module::cast(tree, parent)?;
            (module.name_node() == Some(leaf))
                .then(|| Declaration::new(tree, DeclarationKind::Module, parent, leaf))
        }
        SyntaxKind::Function | SyntaxKind::Struct | SyntaxKind::Const => {
            let container = tree.parent(parent)?;
            members_named(tree, container, tree.text(leaf))
                .into_iter()
                .find(|decl| decl.name_node == leaf)
        }
        _ => {
            let use_node = tree.ancestor_of_kind(leaf, SyntaxKind::Use)?;
            let use_stmt = UseStatement::cast(tree, use_node)?;
            use_declarations(tree, use_stmt)
                .into_iter()
                .find(|decl| decl.name_node == leaf)
        }
    }
}

/// The declaration under the cursor: the one introduced at `offset`, or
/// the first one the identifier at `offset` resolves to. An offset just
/// past the end of an identifier counts as on it.
pub fn declaration_at(tree: &SyntaxTree, offset: usize) -> Option<Declaration> {
    let is_name = |token: &NodeId| tree.token_kind(*token).is_some_and(TokenKind::is_name_like);
    let leaf = tree
        .token_at_offset(offset)
        .filter(is_name)
        .or_else(|| {
            offset
                .checked_sub(1)
                .and_then(|before| tree.token_at_offset(before))
                .filter(is_name)
        })?;
    declared_by(tree, leaf).or_else(|| resolve(tree, leaf).into_iter().next())
}
