//! Delimited-text reader for the mapping table.

use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;
use crate::table::{DEFAULT_OTU_COLUMN, DEFAULT_TAX_ID_COLUMN, OtuRow, TableError, TaxId};
use log::debug;
use std::path::Path;

/// Quote character for fields containing delimiters or line breaks
const FIELD_QUOTE: u8 = b'"';

/// Byte order mark some spreadsheet tools put in front of the header
const BOM: char = '\u{feff}';

// =#========================================================================#=
// OTU TABLE READER
// =#========================================================================$=
/// Reader (configuration) for the delimited taxid-to-OTU mapping table.
///
/// Records follow the usual CSV conventions: fields may be enclosed in
/// double quotes (then containing delimiters and line breaks, with `""`
/// standing for `"`), lines end with `\n` or `\r\n`, blank lines are
/// skipped. The taxid field is trimmed before being parsed as integer;
/// the OTU field is kept verbatim.
///
/// # Configuration
/// * [`with_delimiter(delimiter)`](Self::with_delimiter) - default `,`
/// * [`with_tax_id_column(name)`](Self::with_tax_id_column) - default `tax_id`
/// * [`with_otu_column(name)`](Self::with_otu_column) - default `emOTU`
///
/// # Example
/// ```
/// use otuprune::table::{OtuRow, OtuTableReader};
///
/// let input = "taxon\totu\n9606\tPrimates\n10090\tRodents\n";
/// let rows = OtuTableReader::new()
///     .with_delimiter(b'\t')
///     .with_tax_id_column("taxon")
///     .with_otu_column("otu")
///     .read_str(input)?;
///
/// assert_eq!(rows, [OtuRow::new(9606, "Primates"), OtuRow::new(10090, "Rodents")]);
/// # Ok::<(), otuprune::table::TableError>(())
/// ```
#[derive(Debug, Clone)]
pub struct OtuTableReader {
    delimiter: u8,
    tax_id_column: String,
    otu_column: String,
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl OtuTableReader {
    /// Creates a reader for comma-separated tables with default column names.
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            tax_id_column: DEFAULT_TAX_ID_COLUMN.to_string(),
            otu_column: DEFAULT_OTU_COLUMN.to_string(),
        }
    }

    /// Creates a reader with default column names and a delimiter chosen by
    /// the file extension of `path`: tab for `.tsv` and `.tab`, comma otherwise.
    pub fn for_path<P: AsRef<Path>>(path: P) -> Self {
        let is_tab_separated = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("tsv") || ext.eq_ignore_ascii_case("tab"));

        let reader = Self::new();
        if is_tab_separated {
            reader.with_delimiter(b'\t')
        } else {
            reader
        }
    }

    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the name of the column holding the taxids.
    pub fn with_tax_id_column(mut self, name: impl Into<String>) -> Self {
        self.tax_id_column = name.into();
        self
    }

    /// Sets the name of the column holding the OTU labels.
    pub fn with_otu_column(mut self, name: impl Into<String>) -> Self {
        self.otu_column = name.into();
        self
    }

    /// Returns the configured field delimiter.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }
}

impl Default for OtuTableReader {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// API Reading (pub)
// ============================================================================
impl OtuTableReader {
    /// Reads all rows of the table file at `path`, in file order.
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<OtuRow>, TableError> {
        let mut byte_parser = ByteParser::from_file(path)?;
        self.read(&mut byte_parser)
    }

    /// Reads all rows of the table given as string, in input order.
    pub fn read_str(&self, input: &str) -> Result<Vec<OtuRow>, TableError> {
        let mut byte_parser = ByteParser::for_str(input);
        self.read(&mut byte_parser)
    }

    /// Reads the header and all rows from the given [ByteParser].
    ///
    /// # Errors
    /// * [TableError::Empty] if there is no header row
    /// * [TableError::MissingColumn] if a configured column is not in the header
    /// * [TableError::MissingField], [TableError::InvalidTaxId],
    ///   [TableError::EmptyOtu] for malformed rows
    /// * [TableError::Parsing] for malformed records (e.g. unclosed quote)
    pub fn read<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
    ) -> Result<Vec<OtuRow>, TableError> {
        let header = self.next_non_blank_record(parser)?.ok_or(TableError::Empty)?;
        let tax_id_position = self.column_position(&header, &self.tax_id_column)?;
        let otu_position = self.column_position(&header, &self.otu_column)?;

        let mut rows = Vec::new();
        let mut row = 0;
        while let Some(record) = self.next_non_blank_record(parser)? {
            row += 1;

            let tax_id_field = self.field(&record, tax_id_position, &self.tax_id_column, row)?;
            let tax_id = tax_id_field
                .trim()
                .parse::<TaxId>()
                .map_err(|source| TableError::InvalidTaxId {
                    row,
                    value: tax_id_field.to_string(),
                    source,
                })?;

            let otu = self.field(&record, otu_position, &self.otu_column, row)?;
            if otu.is_empty() {
                return Err(TableError::EmptyOtu { row });
            }

            rows.push(OtuRow::new(tax_id, otu));
        }

        debug!("Read {} rows from mapping table", rows.len());
        Ok(rows)
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl OtuTableReader {
    /// Returns the position of column `name` in the header.
    fn column_position(&self, header: &[String], name: &str) -> Result<usize, TableError> {
        header
            .iter()
            .position(|column| column.trim_start_matches(BOM) == name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    /// Returns the field at `position` of the record.
    fn field<'r>(
        &self,
        record: &'r [String],
        position: usize,
        column: &str,
        row: usize,
    ) -> Result<&'r str, TableError> {
        record
            .get(position)
            .map(String::as_str)
            .ok_or_else(|| TableError::MissingField {
                row,
                column: column.to_string(),
            })
    }

    /// Parses records until a non-blank one is found, returns `None` at EOF.
    fn next_non_blank_record<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
    ) -> Result<Option<Vec<String>>, ParsingError> {
        while let Some(record) = self.parse_record(parser)? {
            let is_blank = record.len() == 1 && record[0].is_empty();
            if !is_blank {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    /// Parses one record (line) into its fields, consuming the line end.
    /// Returns `None` at EOF.
    fn parse_record<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
    ) -> Result<Option<Vec<String>>, ParsingError> {
        if parser.is_eof() {
            return Ok(None);
        }

        let field_delimiters = [self.delimiter, b'\n', b'\r'];
        let mut fields = Vec::new();
        loop {
            // Unquoted fields end at a delimiter, a line end or EOF
            let field = if parser.peek() == Some(FIELD_QUOTE) {
                self.parse_quoted_field(parser)?
            } else {
                parser.parse_unquoted_label(&field_delimiters)?
            };
            fields.push(field);

            if !parser.consume_if(self.delimiter) {
                break;
            }
        }

        // Line end: "\n" or "\r\n"
        parser.consume_if(b'\r');
        parser.consume_if(b'\n');

        Ok(Some(fields))
    }

    /// Parses a `"`-quoted field, which has to be followed by a delimiter,
    /// a line end or EOF.
    fn parse_quoted_field<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
    ) -> Result<String, ParsingError> {
        let field = parser.parse_quoted(FIELD_QUOTE)?;

        match parser.peek() {
            None | Some(b'\r') | Some(b'\n') => Ok(field),
            Some(b) if b == self.delimiter => Ok(field),
            Some(b) => Err(ParsingError::invalid_record(
                parser,
                format!("Unexpected '{}' after closing quote", char::from(b)),
            )),
        }
    }
}
