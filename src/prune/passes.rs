//! The filter and rename passes over the leaves of a tree.
//!
//! Both passes take a snapshot of the current leaves (depth-first,
//! left-to-right) before mutating the tree and evaluate every leaf of the
//! snapshot exactly once. A vertex that loses its last child during a pass
//! is not evaluated by that pass, but it is a leaf for the next one: its
//! label then has to be a taxid like any other leaf label.

use crate::model::{PhyloTree, VertexIndex};
use crate::prune::PruneError;
use crate::table::TaxId;
use log::debug;
use std::collections::{HashMap, HashSet};

/// How a leaf is removed from the tree.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DeletionMode {
    /// Only detach the leaf from its parent. The parent may be left with a
    /// single child, or with none and thus become a leaf itself.
    #[default]
    Detach,

    /// Detach the leaf, then tidy up its ancestors: a non-root parent left
    /// with a single child is replaced by that child, a non-root parent left
    /// without children is removed as well (repeating upwards). The root is
    /// never removed.
    CollapseUnary,
}

/// Removes every leaf whose label, parsed as integer, is not in `tax_ids`,
/// using [DeletionMode::Detach].
///
/// # Returns
/// The number of removed leaves.
///
/// # Errors
/// [PruneError::NonNumericLabel] for the first leaf whose label is not an
/// integer; leaves before it may already have been removed.
pub fn filter_leaves(tree: &mut PhyloTree, tax_ids: &HashSet<TaxId>) -> Result<usize, PruneError> {
    filter_leaves_with(tree, tax_ids, DeletionMode::default())
}

/// Like [filter_leaves], with the given [DeletionMode].
pub fn filter_leaves_with(
    tree: &mut PhyloTree,
    tax_ids: &HashSet<TaxId>,
    mode: DeletionMode,
) -> Result<usize, PruneError> {
    let mut removed = 0;
    for leaf in tree.leaves() {
        let tax_id = leaf_tax_id(tree, leaf)?;
        if !tax_ids.contains(&tax_id) {
            debug!("Removing leaf {tax_id}: not in mapping table");
            remove_leaf(tree, leaf, mode);
            removed += 1;
        }
    }

    Ok(removed)
}

/// Renames every leaf to the OTU label its taxid maps to; leaves whose
/// taxid has no entry are removed, using [DeletionMode::Detach].
///
/// Labels of vertices that still have children are not touched.
///
/// # Returns
/// The number of removed leaves.
///
/// # Errors
/// [PruneError::NonNumericLabel] for the first leaf whose label is not an
/// integer; leaves before it may already have been renamed or removed.
pub fn rename_leaves(
    tree: &mut PhyloTree,
    otu_map: &HashMap<TaxId, String>,
) -> Result<usize, PruneError> {
    rename_leaves_with(tree, otu_map, DeletionMode::default())
}

/// Like [rename_leaves], with the given [DeletionMode].
pub fn rename_leaves_with(
    tree: &mut PhyloTree,
    otu_map: &HashMap<TaxId, String>,
    mode: DeletionMode,
) -> Result<usize, PruneError> {
    let mut removed = 0;
    for leaf in tree.leaves() {
        let tax_id = leaf_tax_id(tree, leaf)?;
        match otu_map.get(&tax_id) {
            Some(otu) => tree[leaf].set_label(otu.clone()),
            None => {
                debug!("Removing leaf {tax_id}: no OTU label");
                remove_leaf(tree, leaf, mode);
                removed += 1;
            }
        }
    }

    Ok(removed)
}

/// Parses the label of the leaf at `index` as taxid.
/// Surrounding whitespace is ignored; a missing label counts as empty.
fn leaf_tax_id(tree: &PhyloTree, index: VertexIndex) -> Result<TaxId, PruneError> {
    let label = tree[index].label().unwrap_or_default();
    label
        .trim()
        .parse::<TaxId>()
        .map_err(|source| PruneError::NonNumericLabel {
            label: label.to_string(),
            vertex: index,
            source,
        })
}

fn remove_leaf(tree: &mut PhyloTree, leaf: VertexIndex, mode: DeletionMode) {
    let parent = tree.detach(leaf);
    if let (DeletionMode::CollapseUnary, Some(parent)) = (mode, parent) {
        collapse_upwards(tree, parent);
    }
}

fn collapse_upwards(tree: &mut PhyloTree, mut index: VertexIndex) {
    // The root has no parent and thus ends the loop
    while let Some(parent) = tree[index].parent() {
        match tree[index].children().len() {
            0 => {
                tree.detach(index);
                index = parent;
            }
            1 => {
                tree.splice_out(index);
                return;
            }
            _ => return,
        }
    }
}
