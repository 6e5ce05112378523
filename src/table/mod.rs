//! Loader for the taxid-to-OTU mapping table.
//!
//! The mapping table is a delimited text file (CSV by default) with a
//! header row naming at least the columns `tax_id` (integer taxonomy
//! identifier) and `emOTU` (OTU label). Any further columns are ignored.
//!
//! ```text
//! tax_id,emOTU,comment
//! 9606,OTU_1,human
//! 10090,OTU_2,"mouse, house"
//! ```
//!
//! Rows are returned as [OtuRow]s in file order; the order matters for
//! duplicate taxids, where the later row wins in the rename lookup.
//!
//! # Quick API
//! * [`read_file`] - reads a table with default columns, choosing the
//!   delimiter by file extension
//!
//! # Full API
//! Configure an [OtuTableReader] for other delimiters or column names.

pub mod reader;

pub use reader::OtuTableReader;

use crate::parser::ParsingError;
use std::num::ParseIntError;
use std::path::Path;
use thiserror::Error;

/// Integer taxonomy identifier.
pub type TaxId = i64;

/// Default name of the taxid column
pub const DEFAULT_TAX_ID_COLUMN: &str = "tax_id";

/// Default name of the OTU label column
pub const DEFAULT_OTU_COLUMN: &str = "emOTU";

// =#========================================================================#=
// OTU ROW
// =#========================================================================$=
/// One row of the mapping table: a taxid and the OTU label it maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtuRow {
    pub tax_id: TaxId,
    pub otu: String,
}

impl OtuRow {
    /// Creates a new row.
    pub fn new(tax_id: TaxId, otu: impl Into<String>) -> Self {
        Self {
            tax_id,
            otu: otu.into(),
        }
    }
}

// =#========================================================================#=
// TABLE ERROR
// =#========================================================================$=
/// Errors that can occur while loading the mapping table.
///
/// Row numbers count data rows (1-based), excluding the header and blank lines.
#[derive(Error, Debug)]
pub enum TableError {
    /// Reading the file failed, or a record is malformed (e.g. unclosed quote)
    #[error(transparent)]
    Parsing(#[from] ParsingError),
    #[error("Table is empty, expected a header row")]
    Empty,
    #[error("Table is missing required column '{0}'")]
    MissingColumn(String),
    #[error("Row {row} has no value for column '{column}'")]
    MissingField { row: usize, column: String },
    #[error("Row {row}: tax_id '{value}' is not an integer")]
    InvalidTaxId {
        row: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("Row {row} has an empty OTU label")]
    EmptyOtu { row: usize },
}

// ============================================================================
// QUICK API (pub)
// ============================================================================
/// Reads the mapping table at `path` with the default column names
/// (`tax_id`, `emOTU`).
///
/// Files ending in `.tsv` or `.tab` are read tab-separated, all others
/// comma-separated.
///
/// # Example
/// ```no_run
/// use otuprune::table::read_file;
///
/// let rows = read_file("taxid_to_emOTU.csv")?;
/// println!("{} taxa of interest", rows.len());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<OtuRow>, TableError> {
    OtuTableReader::for_path(&path).read_file(&path)
}
