//! Pruning a taxid-labelled tree to the taxa of a mapping table and
//! relabelling the surviving leaves with their OTU labels.
//!
//! # Passes
//! 1. **Filter** ([filter_leaves]): remove every leaf whose taxid is not in
//!    the table.
//! 2. **Rename** ([rename_leaves]): replace every leaf's taxid by its OTU
//!    label; remove leaves without OTU label. This includes internal
//!    vertices emptied by the filter pass.
//!
//! Each pass evaluates the leaves present when it starts, once each, in
//! depth-first left-to-right order. By default ([DeletionMode::Detach])
//! nothing else changes: internal vertices left with a single child stay
//! in the tree, and those left without children become leaves.
//!
//! # Entry points
//! * [process] - both passes with default settings, consuming and returning the tree
//! * [TreePruner] - configurable, reports what was removed

mod lookup;
mod passes;

pub use lookup::TaxidLookup;
pub use passes::{
    DeletionMode, filter_leaves, filter_leaves_with, rename_leaves, rename_leaves_with,
};

use crate::model::{PhyloTree, VertexIndex};
use crate::table::OtuRow;
use log::{info, warn};
use std::num::ParseIntError;
use thiserror::Error;

// =#========================================================================#=
// PRUNE ERROR
// =#========================================================================$=
/// Errors of the filter and rename passes.
#[derive(Error, Debug)]
pub enum PruneError {
    /// A leaf label is not the decimal form of an integer taxid.
    #[error("Leaf label '{label}' is not an integer taxid")]
    NonNumericLabel {
        label: String,
        vertex: VertexIndex,
        #[source]
        source: ParseIntError,
    },
}

// =#========================================================================#=
// PRUNE REPORT
// =#========================================================================$=
/// Leaf counts of a pruning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PruneReport {
    /// Leaves before the filter pass
    pub leaves_before: usize,
    /// Leaves removed by the filter pass
    pub filtered: usize,
    /// Leaves removed by the rename pass for lack of an OTU label
    pub unmapped: usize,
    /// Leaves after the rename pass, all carrying OTU labels
    pub leaves_after: usize,
}

// =#========================================================================#=
// TREE PRUNER
// =#========================================================================$=
/// Runs the filter pass and then the rename pass on a tree.
///
/// # Configuration
/// * [`with_deletion_mode(mode)`](Self::with_deletion_mode) - how leaves are
///   removed, default [DeletionMode::Detach]
///
/// # Example
/// ```
/// use otuprune::newick::parse_str;
/// use otuprune::prune::{DeletionMode, TreePruner};
/// use otuprune::table::OtuRow;
///
/// let rows = [OtuRow::new(9606, "OTU_1"), OtuRow::new(7955, "OTU_2")];
/// let mut tree = parse_str("((9606,10090),7955);")?;
///
/// let report = TreePruner::from_rows(&rows)
///     .with_deletion_mode(DeletionMode::CollapseUnary)
///     .prune(&mut tree)?;
///
/// assert_eq!(report.filtered, 1);
/// assert_eq!(tree.to_newick(), "(OTU_1,OTU_2);");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct TreePruner {
    lookup: TaxidLookup,
    mode: DeletionMode,
}

impl TreePruner {
    /// Creates a pruner over the given lookup structures.
    pub fn new(lookup: TaxidLookup) -> Self {
        Self {
            lookup,
            mode: DeletionMode::default(),
        }
    }

    /// Creates a pruner from mapping table rows.
    pub fn from_rows(rows: &[OtuRow]) -> Self {
        Self::new(TaxidLookup::from_rows(rows))
    }

    /// Sets how leaves are removed.
    pub fn with_deletion_mode(mut self, mode: DeletionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the lookup structures.
    pub fn lookup(&self) -> &TaxidLookup {
        &self.lookup
    }

    /// Filters and renames the leaves of `tree` in place.
    ///
    /// # Errors
    /// [PruneError::NonNumericLabel] if a leaf label is not an integer. The
    /// tree is then partially processed and should be discarded.
    pub fn prune(&self, tree: &mut PhyloTree) -> Result<PruneReport, PruneError> {
        let leaves_before = tree.num_leaves();

        let filtered = filter_leaves_with(tree, self.lookup.tax_ids(), self.mode)?;
        info!("Removed {filtered} of {leaves_before} leaves with taxid not in mapping table");

        let unmapped = rename_leaves_with(tree, self.lookup.otu_map(), self.mode)?;
        if unmapped > 0 {
            warn!("Removed {unmapped} leaves without OTU label");
        }

        let leaves_after = tree.num_leaves();
        info!("Renamed {leaves_after} leaves to OTU labels");

        Ok(PruneReport {
            leaves_before,
            filtered,
            unmapped,
            leaves_after,
        })
    }
}

/// Filters and renames the leaves of `tree` according to the mapping table
/// `rows`, returning the same tree.
///
/// # Errors
/// [PruneError::NonNumericLabel] if any leaf label, in either pass, is not an
/// integer.
///
/// # Example
/// ```
/// use otuprune::newick::parse_str;
/// use otuprune::prune::process;
/// use otuprune::table::OtuRow;
///
/// let rows = [OtuRow::new(9606, "OTU_1"), OtuRow::new(10090, "OTU_2")];
/// let tree = process(parse_str("(9606,10090,7955);")?, &rows)?;
///
/// assert_eq!(tree.leaf_labels(), ["OTU_1", "OTU_2"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn process(mut tree: PhyloTree, rows: &[OtuRow]) -> Result<PhyloTree, PruneError> {
    TreePruner::from_rows(rows).prune(&mut tree)?;
    Ok(tree)
}
