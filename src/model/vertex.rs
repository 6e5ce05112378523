//! Vertex module for phylogenetic tree representation.

use crate::model::tree::VertexIndex;
use std::fmt;
use std::ops::Deref;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (node) in a rooted, ordered phylogenetic tree.
///
/// A vertex is either:
/// - **Internal**: parsed with a parenthesised child list, has an ordered
///   list of children and optionally a label (e.g. a clade name or support value)
/// - **Leaf**: parsed without children, carries the taxon label
///
/// The variant records how a vertex was parsed. Whether it is a leaf is a
/// property of the current tree: an `Internal` vertex whose children have
/// all been detached has no children and thus counts as leaf.
///
/// # Invariants
/// - `index` is the position of the vertex in the tree arena
/// - `parent` is `None` for the root and for vertices detached from the tree
/// - `children` of an internal vertex all have this vertex as parent
#[derive(PartialEq, Debug, Clone)]
pub enum Vertex {
    /// Internal vertex (root or inner vertex with children)
    Internal {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Index of the parent vertex
        parent: Option<VertexIndex>,
        /// Indices of the child vertices, in input order
        children: Vec<VertexIndex>,
        /// Optional label
        label: Option<String>,
        /// Distance to parent node
        branch_length: Option<BranchLength>,
    },
    /// Leaf vertex (taxon)
    Leaf {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Index of the parent vertex
        parent: Option<VertexIndex>,
        /// Taxon label; `None` if the leaf was unnamed in the input
        label: Option<String>,
        /// Distance to parent node
        branch_length: Option<BranchLength>,
    },
}

impl Vertex {
    /// Creates a new internal vertex without parent.
    pub fn new_internal(
        index: VertexIndex,
        children: Vec<VertexIndex>,
        label: Option<String>,
        branch_length: Option<BranchLength>,
    ) -> Self {
        Vertex::Internal {
            index,
            parent: None,
            children,
            label,
            branch_length,
        }
    }

    /// Creates a new leaf vertex without parent.
    pub fn new_leaf(
        index: VertexIndex,
        label: Option<String>,
        branch_length: Option<BranchLength>,
    ) -> Self {
        Vertex::Leaf {
            index,
            parent: None,
            label,
            branch_length,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        match self {
            Vertex::Internal { index, .. } | Vertex::Leaf { index, .. } => *index,
        }
    }

    /// Returns the index of the parent, or `None` for the root or a detached vertex.
    pub fn parent(&self) -> Option<VertexIndex> {
        match self {
            Vertex::Internal { parent, .. } | Vertex::Leaf { parent, .. } => *parent,
        }
    }

    /// Returns `true` if this vertex has a parent set.
    pub fn has_parent(&self) -> bool {
        self.parent().is_some()
    }

    pub(crate) fn set_parent(&mut self, new_parent: Option<VertexIndex>) {
        match self {
            Vertex::Internal { parent, .. } | Vertex::Leaf { parent, .. } => *parent = new_parent,
        }
    }

    /// Returns the children of this vertex; empty for leaves.
    pub fn children(&self) -> &[VertexIndex] {
        match self {
            Vertex::Internal { children, .. } => children,
            Vertex::Leaf { .. } => &[],
        }
    }

    /// Returns mutable access to the child list, or `None` for leaves.
    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<VertexIndex>> {
        match self {
            Vertex::Internal { children, .. } => Some(children),
            Vertex::Leaf { .. } => None,
        }
    }

    /// Returns the label of this vertex, if any.
    pub fn label(&self) -> Option<&str> {
        match self {
            Vertex::Internal { label, .. } | Vertex::Leaf { label, .. } => label.as_deref(),
        }
    }

    /// Replaces the label of this vertex.
    pub fn set_label(&mut self, new_label: String) {
        match self {
            Vertex::Internal { label, .. } | Vertex::Leaf { label, .. } => {
                *label = Some(new_label)
            }
        }
    }

    /// Returns the branch length (distance to parent), if set.
    pub fn branch_length(&self) -> Option<BranchLength> {
        match self {
            Vertex::Internal { branch_length, .. } | Vertex::Leaf { branch_length, .. } => {
                *branch_length
            }
        }
    }

    /// Returns whether this vertex has a [BranchLength].
    pub fn has_branch_length(&self) -> bool {
        self.branch_length().is_some()
    }

    /// Returns `true` if this vertex currently has no children.
    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }

    /// Returns `true` if this vertex currently has at least one child.
    pub fn is_internal(&self) -> bool {
        !self.is_leaf()
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree, enforced finite.
///
/// Negative values are accepted, since distance-based reference trees
/// (e.g. neighbour joining) occasionally contain them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length.
    ///
    /// # Panics
    /// Panics if `length` is not finite.
    pub fn new(length: f64) -> Self {
        assert!(length.is_finite(), "Branch length must be finite, got {}", length);
        BranchLength(length)
    }

    /// Creates a new branch length, or `None` if `length` is not finite.
    pub fn try_new(length: f64) -> Option<Self> {
        length.is_finite().then_some(BranchLength(length))
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for BranchLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
