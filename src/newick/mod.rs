//! Newick format parser and writer for phylogenetic trees.
//!
//! This module provides [NewickParser] to parse a Newick string into a
//! [PhyloTree], and [to_newick]/[write_newick_file] to serialize it back.
//!
//! # Quick API
//! * [`parse_file`] - parses the single tree in a file
//! * [`parse_str`] - parses a single string
//!
//! # Format
//! The (rooted, N-ary) Newick format has the following grammar:
//! * `tree ::= vertex ';'`
//! * `vertex ::= internal_vertex | leaf`
//! * `internal_vertex ::= '(' vertex (',' vertex)* ')' [label] [branch_length]`
//! * `leaf ::= [label] [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Whitespace can occur between elements,
//!   just not within an unquoted label or a branch_length
//! * Labels in single quotes may contain any character; `''` stands for `'`
//! * Comments are square brackets and can occur anywhere whitespace is allowed;
//!   they are skipped and not written back

mod defs;
pub mod parser;
pub mod writer;

pub use parser::NewickParser;
pub use writer::{to_newick, write_newick_file};

use crate::model::PhyloTree;
use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses the single Newick tree contained in the file at `path`.
///
/// Only whitespace and comments may follow the terminating `;`.
///
/// # Errors
/// Returns a [ParsingError] if the file cannot be read or does not contain
/// exactly one valid Newick tree.
///
/// # Example
/// ```no_run
/// use otuprune::newick::parse_file;
///
/// let tree = parse_file("species_reference.nwk")?;
/// println!("Reference tree has {} leaves", tree.num_leaves());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<PhyloTree, ParsingError> {
    let mut byte_parser = ByteParser::from_file(path)?;
    NewickParser::new().parse_single(&mut byte_parser)
}

/// Parses a single Newick string to obtain a [PhyloTree].
///
/// # Example
/// ```
/// use otuprune::newick::parse_str;
///
/// let tree = parse_str("((9606:0.1,10090:0.2)Euarchontoglires:0.3,7955:0.4);")?;
/// assert_eq!(tree.num_leaves(), 3);
/// assert_eq!(tree.leaf_labels(), ["9606", "10090", "7955"]);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<PhyloTree, ParsingError> {
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    NewickParser::new().parse_single(&mut byte_parser)
}
