//! Data model for rooted phylogenetic trees.
//!
//! # Tree representation
//! Trees are represented by [PhyloTree], which uses the arena pattern to store
//! [Vertex] nodes, referenced by [VertexIndex]. Each vertex is either
//! `Internal` (ordered list of children, optional label) or `Leaf`
//! (taxon label). Any vertex may carry a [BranchLength].
//!
//! # Mutation
//! Vertices are never moved or dropped from the arena. Removing a vertex
//! from the tree ([`PhyloTree::detach`], [`PhyloTree::splice_out`]) rewires
//! parent and child indices, so indices taken before a removal stay valid.

pub mod tree;
pub mod vertex;

pub use tree::PhyloTree;
pub use tree::VertexIndex;
pub use vertex::BranchLength;
pub use vertex::Vertex;
