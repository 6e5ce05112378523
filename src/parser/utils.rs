//! Utility functions for label escaping in Newick output.
//!
//! Labels are stored unescaped in the tree model. When writing, a label
//! is quoted only if it would otherwise not read back as the same label.
//! The label content itself is never altered (in particular, spaces are
//! not turned into underscores and underscores are kept as they are).

/// Characters that end or break an unquoted Newick label.
const SPECIAL_CHARS: &[char] = &[' ', ',', ';', '\t', '\n', '\r', '(', ')', ':', '[', ']', '\''];

/// Checks whether a label has to be enclosed in single quotes to be written
/// to a Newick string verbatim.
///
/// # Examples
/// ```
/// # use otuprune::parser::utils::needs_quoting;
/// assert_eq!(needs_quoting("9606"), false);
/// assert_eq!(needs_quoting("OTU_17"), false);
/// assert_eq!(needs_quoting("OTU_1 (clade X)"), true);
/// assert_eq!(needs_quoting("Baillon's_Crake"), true);
/// ```
pub fn needs_quoting(label: &str) -> bool {
    label.chars().any(|c| SPECIAL_CHARS.contains(&c))
}

/// Escapes a label for use in a Newick string.
///
/// Labels containing whitespace or Newick punctuation are wrapped in single
/// quotes, with internal single quotes doubled. Other labels are returned
/// as they are.
///
/// # Examples
/// ```
/// # use otuprune::parser::utils::escape_label;
/// assert_eq!(escape_label("Pukeko"), "Pukeko");
/// assert_eq!(escape_label("Australasian_Swamphen"), "Australasian_Swamphen");
/// assert_eq!(escape_label("Australasian Swamphen"), "'Australasian Swamphen'");
/// assert_eq!(escape_label("OTU_1 (clade X)"), "'OTU_1 (clade X)'");
/// assert_eq!(escape_label("Baillon's Crake"), "'Baillon''s Crake'");
/// ```
pub fn escape_label(label: &str) -> String {
    if !needs_quoting(label) {
        return label.to_string();
    }

    format!("'{}'", label.replace('\'', "''"))
}
