//! Provides the tree representation.
//!
//! Provides core data structures for representing phylogenetic trees:
//! * [PhyloTree] - rooted, ordered, N-ary tree using the arena pattern
//! * [VertexIndex] as type used to index vertices in tree
//! * [PreOrderIter] for depth-first, left-to-right traversal

use crate::model::vertex::{BranchLength, Vertex};
use crate::newick;

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A rooted phylogenetic tree represented using the arena pattern on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by
/// [VertexIndex], so no vertex holds a reference to another one.
///
/// # Structure
/// - All vertices ever added stay in the arena; removing a vertex from the
///   tree only detaches it from its parent, after which it is unreachable.
/// - Counts, traversals and the Newick writer only consider vertices
///   reachable from the root.
/// - Children are ordered; the order is the order of the input.
/// - A tree without root is empty.
///
/// # Construction
/// Bottom-up: add leaves, then internal vertices over their children,
/// and finally mark the last vertex as root with [`PhyloTree::set_root`].
///
/// ```
/// use otuprune::model::PhyloTree;
///
/// let mut tree = PhyloTree::new();
/// let human = tree.add_leaf(Some("9606".to_string()), None);
/// let mouse = tree.add_leaf(Some("10090".to_string()), None);
/// let root = tree.add_internal(vec![human, mouse], None, None);
/// tree.set_root(root);
///
/// assert_eq!(tree.num_leaves(), 2);
/// assert_eq!(tree.to_newick(), "(9606,10090);");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PhyloTree {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,

    /// Index of the root of this tree; `None` while under construction or once emptied
    root_index: Option<VertexIndex>,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl PhyloTree {
    /// Creates a new, empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty tree with room for `num_vertices` vertices.
    pub fn with_capacity(num_vertices: usize) -> Self {
        PhyloTree {
            vertices: Vec::with_capacity(num_vertices),
            root_index: None,
        }
    }

    /// Adds a leaf to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `label` - Taxon label of the leaf, if any
    /// * `branch_length` - Length of incoming branch, i.e. distance to parent
    pub fn add_leaf(
        &mut self,
        label: Option<String>,
        branch_length: Option<BranchLength>,
    ) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices
            .push(Vertex::new_leaf(index, label, branch_length));
        index
    }

    /// Adds an internal vertex over the given children, assigning a unique
    /// index, which gets returned. The children get the new vertex as parent.
    ///
    /// # Panics
    /// Panics if a child index is out of bounds.
    pub fn add_internal(
        &mut self,
        children: Vec<VertexIndex>,
        label: Option<String>,
        branch_length: Option<BranchLength>,
    ) -> VertexIndex {
        let index = self.vertices.len();
        for &child in &children {
            self[child].set_parent(Some(index));
        }
        self.vertices
            .push(Vertex::new_internal(index, children, label, branch_length));

        index
    }

    /// Marks the vertex at `index` as root of the tree.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn set_root(&mut self, index: VertexIndex) {
        self[index].set_parent(None);
        self.root_index = Some(index);
    }

    /// Returns a reference to the root vertex, or `None` if the tree is empty.
    pub fn root(&self) -> Option<&Vertex> {
        self.root_index.map(|index| &self[index])
    }

    /// Returns the index of the root, or `None` if the tree is empty.
    pub fn root_index(&self) -> Option<VertexIndex> {
        self.root_index
    }

    /// Returns `true` if the tree has no root (nothing left to traverse).
    pub fn is_empty(&self) -> bool {
        self.root_index.is_none()
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self[index]
    }

    /// Returns a mutable reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex_mut(&mut self, index: VertexIndex) -> &mut Vertex {
        &mut self[index]
    }

    /// Returns the number of leaves (vertices without children) in this tree.
    pub fn num_leaves(&self) -> usize {
        self.pre_order_iter().filter(|v| v.is_leaf()).count()
    }

    /// Returns the number of vertices with at least one child in this tree.
    pub fn num_internal(&self) -> usize {
        self.pre_order_iter().filter(|v| v.is_internal()).count()
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.pre_order_iter().count()
    }

    /// Returns the indices of all current leaves in depth-first,
    /// left-to-right order.
    ///
    /// A leaf is any reachable vertex without children, including an
    /// internal vertex whose children have all been detached. The returned
    /// vector is a snapshot: it stays valid while leaves are removed from
    /// the tree, and vertices that lose their last child afterwards are
    /// not added to it.
    pub fn leaves(&self) -> Vec<VertexIndex> {
        self.pre_order_iter()
            .filter(|v| v.is_leaf())
            .map(|v| v.index())
            .collect()
    }

    /// Returns the labels of all current leaves in depth-first, left-to-right
    /// order. Unlabelled leaves are reported as empty string.
    pub fn leaf_labels(&self) -> Vec<&str> {
        self.pre_order_iter()
            .filter(|v| v.is_leaf())
            .map(|v| v.label().unwrap_or_default())
            .collect()
    }

    /// Detaches the vertex at `index` (and with it its subtree) from its parent.
    /// The parent's other children keep their order. Detaching the root
    /// empties the tree.
    ///
    /// # Returns
    /// The index of the former parent, or `None` if the vertex had none.
    pub fn detach(&mut self, index: VertexIndex) -> Option<VertexIndex> {
        if self.root_index == Some(index) {
            self.root_index = None;
            return None;
        }

        let parent = self[index].parent()?;
        if let Some(siblings) = self[parent].children_mut() {
            siblings.retain(|&sibling| sibling != index);
        }
        self[index].set_parent(None);

        Some(parent)
    }

    /// Removes the non-root vertex at `index` from the tree, putting its
    /// children in its place (same position in the parent's child list).
    ///
    /// # Returns
    /// `false` (and leaves the tree unchanged) if the vertex has no parent.
    pub fn splice_out(&mut self, index: VertexIndex) -> bool {
        let Some(parent) = self[index].parent() else {
            return false;
        };

        let children = self[index]
            .children_mut()
            .map(std::mem::take)
            .unwrap_or_default();
        for &child in &children {
            self[child].set_parent(Some(parent));
        }

        if let Some(siblings) = self[parent].children_mut() {
            if let Some(position) = siblings.iter().position(|&sibling| sibling == index) {
                siblings.splice(position..=position, children);
            }
        }
        self[index].set_parent(None);

        true
    }

    /// Validates the structure and all index references of the reachable tree.
    ///
    /// Checks:
    /// - Root index (if set) is within bounds and the root has no parent
    /// - All reachable vertex indices match their position in the arena
    /// - All child indices are valid and point back to correct parent
    /// - No vertex is reachable twice
    ///
    /// An empty tree is valid.
    pub fn is_valid(&self) -> bool {
        let Some(root_index) = self.root_index else {
            return true;
        };
        if root_index >= self.vertices.len() || self[root_index].has_parent() {
            return false;
        }

        let mut seen = vec![false; self.vertices.len()];
        let mut stack = vec![root_index];
        while let Some(index) = stack.pop() {
            if seen[index] {
                return false;
            }
            seen[index] = true;

            let vertex = &self[index];
            if vertex.index() != index {
                return false;
            }

            for &child in vertex.children() {
                if child >= self.vertices.len() || self[child].parent() != Some(index) {
                    return false;
                }
                stack.push(child);
            }
        }

        true
    }

    /// Convenience method to convert this tree to a Newick string.
    pub fn to_newick(&self) -> String {
        newick::to_newick(self)
    }
}

impl std::ops::Index<VertexIndex> for PhyloTree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

impl std::ops::IndexMut<VertexIndex> for PhyloTree {
    fn index_mut(&mut self, index: VertexIndex) -> &mut Self::Output {
        &mut self.vertices[index]
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl PhyloTree {
    /// Returns an iterator over the tree in pre-order (parents before children),
    /// visiting children left to right.
    ///
    /// # Example
    /// ```
    /// use otuprune::newick::parse_str;
    ///
    /// let tree = parse_str("((9606,10090)Euarchontoglires,7955)Vertebrata;").unwrap();
    /// let labels: Vec<_> = tree.pre_order_iter().filter_map(|v| v.label()).collect();
    /// assert_eq!(labels, ["Vertebrata", "Euarchontoglires", "9606", "10090", "7955"]);
    /// ```
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// Uses an explicit stack, so deep (caterpillar-like) trees do not overflow.
pub struct PreOrderIter<'a> {
    tree: &'a PhyloTree,
    stack: Vec<VertexIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a PhyloTree) -> Self {
        PreOrderIter {
            tree,
            stack: tree.root_index.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];

        self.stack.extend(vertex.children().iter().rev());

        Some(vertex)
    }
}
