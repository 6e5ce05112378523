//! Structs and logic to parse Newick strings.
//!
//! This module provides the [NewickParser] struct, which parses a single
//! rooted N-ary Newick tree into a [PhyloTree].

use crate::model::{BranchLength, PhyloTree, VertexIndex};
use crate::newick::defs::{DEFAULT_NUM_VERTICES_GUESS, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================$=
/// Parser for rooted N-ary Newick trees.
///
/// Leaf labels and internal labels are kept exactly as written (quoted
/// labels are unquoted, `''` becomes `'`); empty labels become `None`.
/// Comments are skipped.
///
/// # Configuration
/// * [`with_num_vertices(num_vertices)`](Self::with_num_vertices)
///     - Expected number of vertices, used to pre-allocate the arena.
///
/// # Parsing
/// * [`parse_str`](Self::parse_str) - Parse the next tree, up to its `;`
/// * [`parse_single`](Self::parse_single) - Parse a tree that must be the
///   only content of the input
///
/// # Example
/// ```
/// use otuprune::newick::NewickParser;
/// use otuprune::parser::byte_parser::ByteParser;
///
/// let input = "(('Homo sapiens':1.0,9598:1.0):0.5,10090:1.5,10116:1.5);";
/// let mut byte_parser = ByteParser::for_str(input);
/// let tree = NewickParser::new().parse_str(&mut byte_parser).unwrap();
///
/// assert_eq!(tree.num_leaves(), 4);
/// assert_eq!(tree.root().unwrap().children().len(), 3);
/// ```
pub struct NewickParser {
    num_vertices: usize,
    tree: PhyloTree,
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl NewickParser {
    /// Creates a new [NewickParser] with default settings.
    pub fn new() -> Self {
        Self {
            num_vertices: DEFAULT_NUM_VERTICES_GUESS,
            tree: PhyloTree::new(),
        }
    }

    /// Sets the expected number of vertices of the parsed tree.
    ///
    /// This allows pre-allocation of the arena.
    pub fn with_num_vertices(mut self, num_vertices: usize) -> Self {
        self.num_vertices = num_vertices;
        self
    }
}

impl Default for NewickParser {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl NewickParser {
    /// Parses a single Newick tree from the given [ByteParser], consuming
    /// everything up to and including the terminating `;`.
    ///
    /// # Returns
    /// * `Ok(PhyloTree)` - The parsed tree
    /// * `Err(ParsingError)` - If the Newick format is invalid
    pub fn parse_str<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<PhyloTree, ParsingError> {
        self.tree = PhyloTree::with_capacity(self.num_vertices);

        parser.skip_comment_and_whitespace()?;
        if parser.is_eof() {
            return Err(ParsingError::unexpected_eof(parser));
        }

        let root_index = self.parse_vertex(parser)?;

        // Consume the terminating semicolon
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b';') {
            let next_char = parser.peek().map(char::from);
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected ';' at end of tree but found {:?}", next_char),
            ));
        }

        self.tree.set_root(root_index);
        Ok(std::mem::take(&mut self.tree))
    }

    /// Parses a single Newick tree from the given [ByteParser] and checks that
    /// nothing but whitespace and comments follows it.
    ///
    /// # Errors
    /// Besides the errors of [`parse_str`](Self::parse_str), returns a
    /// `TrailingContent` error if more content follows the tree.
    pub fn parse_single<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<PhyloTree, ParsingError> {
        let tree = self.parse_str(parser)?;

        parser.skip_comment_and_whitespace()?;
        if !parser.is_eof() {
            return Err(ParsingError::trailing_content(parser));
        }

        Ok(tree)
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl NewickParser {
    /// Parses a vertex (either internal vertex or leaf) and returns its index:
    /// - Skips leading comments and whitespace
    /// - Dispatches to `parse_internal_vertex` if starts with `(`, otherwise `parse_leaf`
    fn parse_vertex<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<VertexIndex, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if parser.peek_is(b'(') {
            self.parse_internal_vertex(parser)
        } else {
            self.parse_leaf(parser)
        }
    }

    /// Parses internal vertex, adds it to tree, and returns its index:
    /// - `(child, ..., child)[label][:branch_length]`
    fn parse_internal_vertex<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<VertexIndex, ParsingError> {
        let children = self.parse_children(parser)?;
        let label = self.parse_optional_label(parser)?;
        let branch_length = self.parse_branch_length(parser)?;

        Ok(self.tree.add_internal(children, label, branch_length))
    }

    /// Parses the parenthesised child list `(child, ..., child)` and returns
    /// the child indices in input order.
    ///
    /// Expects parser at opening `(`.
    fn parse_children<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<Vec<VertexIndex>, ParsingError> {
        if !parser.consume_if(b'(') {
            let next_char = parser.peek().map(char::from);
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected '(' before children but found {:?}", next_char),
            ));
        }

        let mut children = Vec::new();
        loop {
            children.push(self.parse_vertex(parser)?);

            parser.skip_comment_and_whitespace()?;
            if parser.consume_if(b',') {
                continue;
            }
            if parser.consume_if(b')') {
                break;
            }

            return match parser.peek() {
                None => Err(ParsingError::unexpected_eof(parser)),
                Some(b) => Err(ParsingError::invalid_newick_string(
                    parser,
                    format!("Expected ',' or ')' after child but found '{}'", char::from(b)),
                )),
            };
        }

        Ok(children)
    }

    /// Parses leaf vertex and adds it to tree:
    /// - `[label][:branch_length]`
    fn parse_leaf<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<VertexIndex, ParsingError> {
        let label = self.parse_optional_label(parser)?;
        let branch_length = self.parse_branch_length(parser)?;

        Ok(self.tree.add_leaf(label, branch_length))
    }

    /// Parses a (possibly quoted) label; returns `None` for an empty label.
    fn parse_optional_label<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<Option<String>, ParsingError> {
        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        Ok((!label.is_empty()).then_some(label))
    }

    /// Parses optional branch length `[:number]`:
    /// - Skips comments/whitespace before and after `:`
    /// - Supports scientific notation (e.g., `1.5e-10`)
    ///
    /// # Returns
    /// - `Ok(Some(branch_length))` if found a branch length and was able to parse it
    /// - `Ok(None)` if no branch length found
    /// - [ParsingError] if it couldn't parse branch length value
    fn parse_branch_length<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<Option<BranchLength>, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b':') {
            return Ok(None);
        }
        parser.skip_comment_and_whitespace()?;

        let mut branch_length_str = String::new();
        while let Some(b) = parser.peek() {
            // Valid characters for a float: digits, '.', '-', '+', 'e', 'E'
            if b.is_ascii_digit() || b == b'.' || b == b'-' || b == b'+' || b == b'e' || b == b'E' {
                branch_length_str.push(b as char);
                parser.next_byte();
            } else {
                break; // Hit a delimiter like ',', ')', ';', or whitespace
            }
        }

        branch_length_str
            .parse::<f64>()
            .ok()
            .and_then(BranchLength::try_new)
            .map(Some)
            .ok_or_else(|| {
                ParsingError::invalid_newick_string(
                    parser,
                    format!("Invalid branch length: '{}'", branch_length_str),
                )
            })
    }
}
