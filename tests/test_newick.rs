use otuprune::model::BranchLength;
use otuprune::newick::{NewickParser, parse_file, parse_str, to_newick, write_newick_file};
use otuprune::parser::ParsingErrorType;
use otuprune::parser::byte_parser::ByteParser;
use pretty_assertions::assert_eq;
use std::path::Path;

// --- TESTS NEWICK STRING PARSING ---
#[test]
fn test_basic_tree() {
    let newick = "((9606:1.0,9598:2.0):3.0,10090:4.0):0.5;";
    let mut parser = ByteParser::for_str(newick);
    let tree = NewickParser::new().parse_str(&mut parser).unwrap();

    // Test counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 2);
    assert_eq!(tree.num_vertices(), 5);
    assert!(tree.is_valid());

    // Test relationships
    // - Root has children (internal, 10090)
    let root = tree.root().unwrap();
    let root_index = root.index();
    assert_eq!(root.branch_length(), Some(BranchLength::new(0.5)));
    let root_children = root.children();
    assert_eq!(root_children.len(), 2);

    // - Internal vertex has children (9606, 9598)
    let internal = tree.vertex(root_children[0]);
    assert!(internal.is_internal());
    assert_eq!(internal.parent(), Some(root_index));
    assert_eq!(internal.branch_length(), Some(BranchLength::new(3.0)));

    let leaf_human = tree.vertex(internal.children()[0]);
    let leaf_chimp = tree.vertex(internal.children()[1]);
    let leaf_mouse = tree.vertex(root_children[1]);
    assert!(leaf_human.is_leaf());
    assert_eq!(leaf_human.label(), Some("9606"));
    assert_eq!(leaf_chimp.label(), Some("9598"));
    assert_eq!(leaf_mouse.label(), Some("10090"));
    assert_eq!(leaf_mouse.parent(), Some(root_index));
    assert_eq!(*leaf_chimp.branch_length().unwrap(), 2.0);
}

#[test]
fn test_multifurcation_keeps_child_order() {
    let tree = parse_str("(7955,(10116,10090,10141),9606,9913);").unwrap();

    assert_eq!(tree.root().unwrap().children().len(), 4);
    assert_eq!(
        tree.leaf_labels(),
        ["7955", "10116", "10090", "10141", "9606", "9913"]
    );
}

#[test]
fn test_internal_labels() {
    let tree = parse_str("((9606,9598)Hominini:0.1,(10090,10116)'Murinae sp.':0.2)100;").unwrap();

    let labels: Vec<_> = tree
        .pre_order_iter()
        .filter(|v| v.is_internal())
        .map(|v| v.label())
        .collect();
    assert_eq!(labels, [Some("100"), Some("Hominini"), Some("Murinae sp.")]);
}

#[test]
fn test_unnamed_vertices() {
    let tree = parse_str("((,9606),:0.5);").unwrap();

    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.leaf_labels(), ["", "9606", ""]);
    assert!(tree.root().unwrap().label().is_none());
}

#[test]
fn test_single_leaf_tree() {
    let tree = parse_str("9606;").unwrap();

    assert_eq!(tree.num_leaves(), 1);
    assert!(tree.root().unwrap().is_leaf());
}

#[test]
fn test_tree_with_quoted_labels() {
    let newick = "(('Taxon one':1.5,'Second''s taxon':2.5):3.0,'3rd (Taxon)':4.0):0.0;";
    let tree = parse_str(newick).unwrap();

    assert_eq!(
        tree.leaf_labels(),
        ["Taxon one", "Second's taxon", "3rd (Taxon)"]
    );
}

#[test]
fn test_tree_with_scientific_notation() {
    let tree = parse_str("((A:1e-5,B:2.5E+3):1.0e2,C:3.14E-10):0.0;").unwrap();

    let leaf_b = tree.leaves()[1];
    assert_eq!(*tree[leaf_b].branch_length().unwrap(), 2500.0);
}

#[test]
fn test_negative_branch_length() {
    let tree = parse_str("(9606:-0.01,9598:0.3);").unwrap();
    let human = tree.leaves()[0];
    assert_eq!(*tree[human].branch_length().unwrap(), -0.01);
}

#[test]
fn test_newick_with_comments() {
    let newick_with_comment = "[A tree of] (([Shags!]A[Great Commentoran]:0.33,B[Pied Commentoran]:0.33):1.87,C:[King Commentoran]2.2)[The end.];";
    let tree = parse_str(newick_with_comment).unwrap();

    assert_eq!(tree.leaf_labels(), ["A", "B", "C"]);
}

#[test]
fn test_newick_across_lines() {
    let newick = "(\n  (9606:1,\n   9598:1):2,\n  10090:3\n);\n";
    let tree = parse_str(newick).unwrap();
    assert_eq!(tree.num_leaves(), 3);
}

// --- TESTS DEALING WITH CORRUPT NEWICK STRINGS ---
#[test]
fn test_missing_semicolon() {
    let err = parse_str("((A:1.0,B:2.0):3.0,C:4.0):0.5").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidNewickString(_)));
}

#[test]
fn test_missing_comma() {
    assert!(parse_str("((A:1.0 B:2.0):3.0,C:4.0):0.5;").is_err());
}

#[test]
fn test_unmatched_parentheses() {
    let err = parse_str("((A:1.0,B:2.0):3.0,C:4.0").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnexpectedEOF);
}

#[test]
fn test_invalid_branch_length() {
    assert!(parse_str("((A:1.0,B:abc):3.0,C:4.0):0.5;").is_err());
    assert!(parse_str("((A:1.0,B:1e999):3.0,C:4.0):0.5;").is_err());
}

#[test]
fn test_empty_input() {
    let err = parse_str("  [nothing here]\n").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnexpectedEOF);
}

#[test]
fn test_trailing_content() {
    let err = parse_str("(A,B);(C,D);").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::TrailingContent);

    assert!(parse_str("(A,B); [trailing comment]\n").is_ok());
}

#[test]
fn test_parse_str_stops_after_semicolon() {
    let mut parser = ByteParser::for_str("(A,B);(C,D);");
    let mut newick_parser = NewickParser::new().with_num_vertices(3);

    let first = newick_parser.parse_str(&mut parser).unwrap();
    let second = newick_parser.parse_str(&mut parser).unwrap();

    assert_eq!(first.leaf_labels(), ["A", "B"]);
    assert_eq!(second.leaf_labels(), ["C", "D"]);
    assert!(parser.is_eof());
}

#[test]
fn test_error_reports_position() {
    let err = parse_str("(9606,10090;").unwrap_err();
    assert_eq!(err.position(), 11);
    assert!(err.to_string().contains("at position 11"));
}

// --- TESTS WRITING ---
#[test]
fn test_round_trip() {
    let newick = "((9606:0.5,9598:0.5)Hominini:1,(10090:0.25,10116:0.25,10141:1):1.25)root;";
    let tree = parse_str(newick).unwrap();
    assert_eq!(to_newick(&tree), newick);
}

#[test]
fn test_round_trip_quoted_labels() {
    let newick = "('OTU_1 (clade X)','Baillon''s Crake',OTU_2,'a,b');";
    let tree = parse_str(newick).unwrap();

    assert_eq!(
        tree.leaf_labels(),
        ["OTU_1 (clade X)", "Baillon's Crake", "OTU_2", "a,b"]
    );
    assert_eq!(to_newick(&tree), newick);
}

#[test]
fn test_comments_are_dropped_on_write() {
    let tree = parse_str("[&R] (A[x]:1,B:2)[y];").unwrap();
    assert_eq!(tree.to_newick(), "(A:1,B:2);");
}

#[test]
fn test_write_childless_internal_vertex_as_label() {
    let mut tree = parse_str("((9606,9598)Hominini:0.1,10090);").unwrap();
    for leaf in tree.leaves().into_iter().take(2) {
        tree.detach(leaf);
    }

    assert_eq!(tree.to_newick(), "(Hominini:0.1,10090);");
}

#[test]
fn test_write_empty_tree() {
    let mut tree = parse_str("9606;").unwrap();
    let root = tree.root_index().unwrap();
    tree.detach(root);

    assert!(tree.is_empty());
    assert_eq!(tree.to_newick(), ";");
}

// --- TESTS WHOLE FILES ---
#[test]
fn test_parsing_newick_file() {
    let path = Path::new("tests").join("fixtures").join("mammals.nwk");
    let tree = parse_file(path).unwrap();

    assert_eq!(tree.num_leaves(), 9);
    assert_eq!(tree.root().unwrap().label(), Some("root"));
    assert!(tree.is_valid());
}

#[test]
fn test_parsing_missing_file() {
    let err = parse_file(Path::new("tests").join("fixtures").join("missing.nwk")).unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::IoError(_)));
}

#[test]
fn test_write_and_read_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.nwk");
    let tree = parse_str("(('OTU 1':1,OTU_2:2):0.5,OTU_3:2.5);").unwrap();

    write_newick_file(&path, &tree).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, "(('OTU 1':1,OTU_2:2):0.5,OTU_3:2.5);\n");
    assert_eq!(parse_file(&path).unwrap().leaf_labels(), ["OTU 1", "OTU_2", "OTU_3"]);
}
