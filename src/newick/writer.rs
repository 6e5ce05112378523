//! Newick format writing for [PhyloTree].

use crate::model::{BranchLength, PhyloTree, VertexIndex};
use crate::parser::utils::escape_label;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Estimated characters per vertex: label, branch length and punctuation
const CHARS_PER_VERTEX_GUESS: usize = 16;

/// Writes the given tree to a file in Newick format, followed by a newline.
///
/// The file is created (or truncated) only once the Newick string has been
/// built completely.
///
/// # Errors
/// Returns an I/O error if creating or writing the file fails.
pub fn write_newick_file<P: AsRef<Path>>(path: P, tree: &PhyloTree) -> io::Result<()> {
    let newick = to_newick(tree);

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(newick.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Returns the Newick representation of this tree with closing semicolon.
///
/// - Leaves: escaped label followed by `:branch_length` if set
/// - Internal vertices: `(child,...,child)` followed by escaped label and
///   `:branch_length` if set
/// - An internal vertex without any remaining child is written like a leaf,
///   i.e. only its label and branch length
/// - An empty tree is written as `;`
///
/// Labels are escaped with [escape_label]: labels with whitespace or Newick
/// punctuation are single-quoted, the content itself is never changed.
///
/// # Example
/// ```
/// use otuprune::newick::{parse_str, to_newick};
///
/// let mut tree = parse_str("((9606:1,10090:2)Euarchontoglires:0.5,7955:2.5);").unwrap();
/// let human = tree.leaves()[0];
/// tree.vertex_mut(human).set_label("OTU_1 (clade X)".to_string());
///
/// assert_eq!(
///     to_newick(&tree),
///     "(('OTU_1 (clade X)':1,10090:2)Euarchontoglires:0.5,7955:2.5);"
/// );
/// ```
pub fn to_newick(tree: &PhyloTree) -> String {
    // Helper for adding label and branch length
    fn build_newick_label_and_length(
        newick: &mut String,
        label: Option<&str>,
        branch_length: Option<BranchLength>,
    ) {
        if let Some(label) = label {
            newick.push_str(&escape_label(label));
        }
        if let Some(branch_length) = branch_length {
            newick.push(':');
            newick.push_str(&branch_length.to_string());
        }
    }

    // Recursive helper for building the Newick string
    fn build_newick(tree: &PhyloTree, newick: &mut String, index: VertexIndex) {
        let vertex = &tree[index];
        let children = vertex.children();

        if !children.is_empty() {
            newick.push('(');
            for (i, &child) in children.iter().enumerate() {
                if i > 0 {
                    newick.push(',');
                }
                build_newick(tree, newick, child);
            }
            newick.push(')');
        }

        build_newick_label_and_length(newick, vertex.label(), vertex.branch_length());
    }

    let mut newick = String::with_capacity(tree.num_vertices() * CHARS_PER_VERTEX_GUESS);

    if let Some(root_index) = tree.root_index() {
        build_newick(tree, &mut newick, root_index);
    }
    newick.push(';');

    newick
}
