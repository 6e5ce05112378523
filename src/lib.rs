//! Otuprune prunes a phylogenetic reference tree to the taxa of a
//! taxid-to-OTU mapping table and relabels the surviving leaves.
//!
//! The reference tree is a Newick tree whose leaves are labelled with
//! integer taxonomy identifiers (taxids). The mapping table lists, per
//! taxon of interest, its taxid and the label of the operational
//! taxonomic unit (OTU) it belongs to. Pruning runs two passes:
//! 1. Remove every leaf whose taxid is not in the table.
//! 2. Rename every remaining leaf to its OTU label.
//!
//! Core functionality provided:
//! - [newick]: N-ary Newick parser and writer, preserving labels exactly
//! - [table]: Loader for the delimited mapping table
//! - [prune]: The two passes ([process], [prune::TreePruner])
//! - [model]: Arena-based tree model ([model::PhyloTree])
//!
//! Internal vertices left with one child by a removal stay in the tree by
//! default, and those left without children become leaves for the rename
//! pass; see [prune::DeletionMode] to collapse them instead.
//!
//! # Usage
//! File to file:
//! ```no_run
//! use otuprune::prune_tree_file;
//!
//! let report = prune_tree_file("reference.nwk", "taxid_to_emOTU.csv", "otus.nwk")?;
//! println!("{} leaves left", report.leaves_after);
//! # Ok::<(), otuprune::Error>(())
//! ```
//!
//! In memory:
//! ```
//! use otuprune::newick::parse_str;
//! use otuprune::process;
//! use otuprune::table::OtuRow;
//!
//! let tree = parse_str("((9606:0.1,9598:0.1):0.2,10090:0.3);")?;
//! let rows = [OtuRow::new(9606, "Hominidae"), OtuRow::new(9598, "Hominidae")];
//!
//! let tree = process(tree, &rows)?;
//! assert_eq!(tree.to_newick(), "((Hominidae:0.1,Hominidae:0.1):0.2);");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod model;
pub mod newick;
pub mod parser;
pub mod prune;
pub mod table;

pub use crate::error::Error;
pub use crate::prune::{PruneReport, process};

use crate::prune::TreePruner;
use log::info;
use std::path::Path;

// ============================================================================
// Quick File API
// ============================================================================
/// Reads the Newick tree at `tree_path` and the mapping table at
/// `table_path`, prunes and relabels the tree, and writes it to
/// `output_path` in Newick format.
///
/// The output file is only created once both passes have succeeded.
///
/// # Errors
/// See [Error]; nothing is written if any step before writing fails.
pub fn prune_tree_file<T, M, O>(
    tree_path: T,
    table_path: M,
    output_path: O,
) -> Result<PruneReport, Error>
where
    T: AsRef<Path>,
    M: AsRef<Path>,
    O: AsRef<Path>,
{
    let tree_path = tree_path.as_ref();
    let table_path = table_path.as_ref();
    let output_path = output_path.as_ref();

    let mut tree = newick::parse_file(tree_path).map_err(|source| Error::Tree {
        path: tree_path.to_path_buf(),
        source,
    })?;
    info!(
        "Read reference tree with {} leaves from '{}'",
        tree.num_leaves(),
        tree_path.display()
    );

    let rows = table::read_file(table_path).map_err(|source| Error::Table {
        path: table_path.to_path_buf(),
        source,
    })?;
    let pruner = TreePruner::from_rows(&rows);
    info!(
        "Read {} rows with {} distinct taxids from '{}'",
        rows.len(),
        pruner.lookup().len(),
        table_path.display()
    );

    let report = pruner.prune(&mut tree)?;

    newick::write_newick_file(output_path, &tree).map_err(|source| Error::Write {
        path: output_path.to_path_buf(),
        source,
    })?;

    Ok(report)
}
