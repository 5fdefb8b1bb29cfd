//! # Concrete Syntax Tree
//!
//! An immutable arena of syntax nodes. Every node records its kind, its span,
//! its parent and its ordered children; leaves hold exactly one token. Trivia
//! (whitespace, comments) and unrecognized characters are leaves too, so the
//! leaves of a tree tile its source text exactly.
//!
//! Trees are built once per parse through [`TreeBuilder`] and never mutated
//! afterwards. All traversals are iterative, so arbitrarily deep trees can be
//! walked without growing the call stack.

use crate::lexer::TokenKind;
use crate::syntax_kind::SyntaxKind;
use chumsky::span::SimpleSpan;
use index_vec::IndexVec;
use std::fmt::Write as _;

index_vec::define_index_type! {
    /// Handle to a node inside a [`SyntaxTree`]
    pub struct NodeId = usize;

    MAX_INDEX = usize::MAX;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub kind: SyntaxKind,
    pub span: SimpleSpan<usize>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    text: String,
    nodes: IndexVec<NodeId, NodeData>,
}

impl SyntaxTree {
    /// The `File` node. The builder always creates it first.
    pub fn root(&self) -> NodeId {
        NodeId::from_usize(0)
    }

    pub fn source(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, node: NodeId) -> &NodeData {
        &self.nodes[node]
    }

    pub fn kind(&self, node: NodeId) -> SyntaxKind {
        self.nodes[node].kind
    }

    pub fn span(&self, node: NodeId) -> SimpleSpan<usize> {
        self.nodes[node].span
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node].children
    }

    /// The token kind of a leaf, `None` for interior nodes
    pub fn token_kind(&self, node: NodeId) -> Option<TokenKind> {
        self.kind(node).token_kind()
    }

    /// Source text covered by `node`, including interior trivia
    pub fn text(&self, node: NodeId) -> &str {
        let span = self.span(node);
        self.text.get(span.start..span.end).unwrap_or_default()
    }

    /// Concatenated text of the non-trivia leaves under `node`
    pub fn compact_text(&self, node: NodeId) -> String {
        self.descendants(node)
            .filter(|&id| self.token_kind(id).is_some_and(|k| !k.is_trivia()))
            .map(|id| self.text(id))
            .collect()
    }

    /// Every leaf of the tree in source order
    pub fn tokens(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter_enumerated()
            .filter(|(_, data)| data.kind.is_token())
            .map(|(id, _)| id)
    }

    /// Children of `node` that are not trivia leaves
    pub fn significant_children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(node)
            .iter()
            .copied()
            .filter(|&child| !self.kind(child).is_trivia() && !self.is_bad_character(child))
    }

    /// First direct child of the given kind
    pub fn child_of_kind(&self, node: NodeId, kind: SyntaxKind) -> Option<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .find(|&child| self.kind(child) == kind)
    }

    /// All direct children of the given kind
    pub fn children_of_kind(
        &self,
        node: NodeId,
        kind: SyntaxKind,
    ) -> impl Iterator<Item = NodeId> + '_ {
        self.children(node)
            .iter()
            .copied()
            .filter(move |&child| self.kind(child) == kind)
    }

    /// First direct leaf child holding a token of `kind`
    pub fn child_token(&self, node: NodeId, kind: TokenKind) -> Option<NodeId> {
        self.child_of_kind(node, SyntaxKind::Token(kind))
    }

    /// First leaf of `kind` anywhere under `node`, in source order
    pub fn first_token_of_kind(&self, node: NodeId, kind: TokenKind) -> Option<NodeId> {
        self.descendants(node)
            .find(|&id| self.kind(id) == SyntaxKind::Token(kind))
    }

    /// Pre-order traversal of `node` and everything below it
    pub fn descendants(&self, node: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![node],
        }
    }

    /// Strict ancestors of `node`, nearest first
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(node), move |&id| self.parent(id))
    }

    /// Nearest strict ancestor of the given kind
    pub fn ancestor_of_kind(&self, node: NodeId, kind: SyntaxKind) -> Option<NodeId> {
        self.ancestors(node).find(|&id| self.kind(id) == kind)
    }

    /// The leaf whose span contains `offset`.
    ///
    /// An offset at the very end of the text maps to the last leaf.
    pub fn token_at_offset(&self, offset: usize) -> Option<NodeId> {
        let mut last = None;
        for token in self.tokens() {
            let span = self.span(token);
            if span.start <= offset && offset < span.end {
                return Some(token);
            }
            last = Some(token);
        }
        if offset == self.text.len() {
            last
        } else {
            None
        }
    }

    /// Indented listing of the tree, one node per line
    pub fn debug_dump(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(self.root(), 0usize)];
        while let Some((node, depth)) = stack.pop() {
            let data = &self.nodes[node];
            let _ = write!(
                out,
                "{:indent$}{}@{}..{}",
                "",
                data.kind,
                data.span.start,
                data.span.end,
                indent = depth * 2
            );
            if data.kind.is_token() {
                let _ = write!(out, " {:?}", self.text(node));
            }
            out.push('\n');
            for &child in data.children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }

    fn is_bad_character(&self, node: NodeId) -> bool {
        self.kind(node) == SyntaxKind::Token(TokenKind::BadCharacter)
    }
}

/// Iterator returned by [`SyntaxTree::descendants`]
pub struct Descendants<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(node).iter().rev().copied());
        Some(node)
    }
}

/// Position in the child list of the currently open node, used to wrap
/// already-built children into a node started later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    parent: Option<NodeId>,
    child_index: usize,
}

/// Event-style construction of a [`SyntaxTree`].
///
/// Nodes are opened with [`start_node`](Self::start_node), filled with
/// tokens and child nodes, and closed with [`finish_node`](Self::finish_node).
/// Spans are computed on close from the children.
#[derive(Debug)]
pub struct TreeBuilder {
    text: String,
    nodes: IndexVec<NodeId, NodeData>,
    stack: Vec<(NodeId, usize)>,
    offset: usize,
}

impl TreeBuilder {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            nodes: IndexVec::new(),
            stack: Vec::new(),
            offset: 0,
        }
    }

    fn push_node(&mut self, kind: SyntaxKind, span: SimpleSpan<usize>) -> NodeId {
        let parent = self.stack.last().map(|&(id, _)| id);
        let id = self.nodes.push(NodeData {
            kind,
            span,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.push(id);
        }
        id
    }

    /// Open a node as the last child of the current node
    pub fn start_node(&mut self, kind: SyntaxKind) -> NodeId {
        let span = SimpleSpan::from(self.offset..self.offset);
        let id = self.push_node(kind, span);
        self.stack.push((id, self.offset));
        id
    }

    /// Append a leaf to the current node
    pub fn token(&mut self, kind: TokenKind, span: SimpleSpan<usize>) -> NodeId {
        debug_assert!(span.start >= self.offset, "tokens must arrive in order");
        self.offset = span.end;
        self.push_node(SyntaxKind::Token(kind), span)
    }

    /// Close the current node
    pub fn finish_node(&mut self) {
        let Some((id, start)) = self.stack.pop() else {
            debug_assert!(false, "finish_node without a matching start_node");
            return;
        };
        let children = &self.nodes[id].children;
        let span = match (children.first(), children.last()) {
            (Some(&first), Some(&last)) => {
                SimpleSpan::from(self.nodes[first].span.start..self.nodes[last].span.end)
            }
            _ => SimpleSpan::from(start..start),
        };
        self.nodes[id].span = span;
    }

    pub fn checkpoint(&self) -> Checkpoint {
        let parent = self.stack.last().map(|&(id, _)| id);
        let child_index = parent.map_or(0, |id| self.nodes[id].children.len());
        Checkpoint {
            parent,
            child_index,
        }
    }

    /// Open a node that adopts every child added to the current node since
    /// `checkpoint` was taken.
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) -> NodeId {
        let current = self.stack.last().map(|&(id, _)| id);
        debug_assert_eq!(current, checkpoint.parent, "checkpoint from another node");
        let Some(parent) = current else {
            return self.start_node(kind);
        };

        let index = checkpoint
            .child_index
            .min(self.nodes[parent].children.len());
        let adopted = self.nodes[parent].children.split_off(index);
        let start = adopted
            .first()
            .map_or(self.offset, |&first| self.nodes[first].span.start);

        let id = self.nodes.push(NodeData {
            kind,
            span: SimpleSpan::from(start..start),
            parent: Some(parent),
            children: adopted.clone(),
        });
        for child in adopted {
            self.nodes[child].parent = Some(id);
        }
        self.nodes[parent].children.push(id);
        self.stack.push((id, start));
        id
    }

    /// Change the kind of a node that is still open
    pub fn retag(&mut self, node: NodeId, kind: SyntaxKind) {
        self.nodes[node].kind = kind;
    }

    pub fn finish(mut self) -> SyntaxTree {
        while !self.stack.is_empty() {
            debug_assert!(false, "unclosed node at end of build");
            self.finish_node();
        }
        SyntaxTree {
            text: self.text,
            nodes: self.nodes,
        }
    }
}
