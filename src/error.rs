//! Crate-level error of the file-to-file pruning API.

use crate::parser::ParsingError;
use crate::prune::PruneError;
use crate::table::TableError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors of [prune_tree_file](crate::prune_tree_file), naming the file involved.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read tree from '{}'", .path.display())]
    Tree {
        path: PathBuf,
        #[source]
        source: ParsingError,
    },
    #[error("Failed to read mapping table from '{}'", .path.display())]
    Table {
        path: PathBuf,
        #[source]
        source: TableError,
    },
    #[error("Failed to prune tree")]
    Prune(#[from] PruneError),
    #[error("Failed to write tree to '{}'", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
