use otuprune::parser::ParsingErrorType;
use otuprune::table::{OtuRow, OtuTableReader, TableError, read_file};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

fn read_csv(input: &str) -> Result<Vec<OtuRow>, TableError> {
    OtuTableReader::new().read_str(input)
}

#[test]
fn test_basic_table() {
    let rows = read_csv("tax_id,emOTU\n9606,OTU_1\n10090,OTU_2\n").unwrap();
    assert_eq!(rows, [OtuRow::new(9606, "OTU_1"), OtuRow::new(10090, "OTU_2")]);
}

#[test]
fn test_column_order_and_extra_columns() {
    let input = "name,emOTU,rank,tax_id\nhuman,OTU_1,species,9606\nmouse,OTU_2,species,10090";
    let rows = read_csv(input).unwrap();
    assert_eq!(rows, [OtuRow::new(9606, "OTU_1"), OtuRow::new(10090, "OTU_2")]);
}

#[test]
fn test_keeps_file_order_and_duplicates() {
    let rows = read_csv("tax_id,emOTU\n9606,OTU_A\n10090,OTU_2\n9606,OTU_B\n").unwrap();
    assert_eq!(
        rows,
        [
            OtuRow::new(9606, "OTU_A"),
            OtuRow::new(10090, "OTU_2"),
            OtuRow::new(9606, "OTU_B"),
        ]
    );
}

#[test]
fn test_header_only() {
    assert!(read_csv("tax_id,emOTU\n").unwrap().is_empty());
}

#[test]
fn test_quoted_fields() {
    let input = "tax_id,emOTU,comment\n\"9606\",\"OTU_1 (clade X)\",\"human, modern\"\n10090,\"OTU \"\"2\"\"\",\"spans\ntwo lines\"\n";
    let rows = read_csv(input).unwrap();
    assert_eq!(
        rows,
        [OtuRow::new(9606, "OTU_1 (clade X)"), OtuRow::new(10090, "OTU \"2\"")]
    );
}

#[test]
fn test_line_endings_and_blank_lines() {
    let input = "\r\ntax_id,emOTU\r\n9606,OTU_1\r\n\r\n\n10090,OTU_2";
    let rows = read_csv(input).unwrap();
    assert_eq!(rows, [OtuRow::new(9606, "OTU_1"), OtuRow::new(10090, "OTU_2")]);
}

#[test]
fn test_byte_order_mark() {
    let rows = read_csv("\u{feff}tax_id,emOTU\n9606,OTU_1\n").unwrap();
    assert_eq!(rows, [OtuRow::new(9606, "OTU_1")]);
}

#[test]
fn test_tax_id_is_trimmed_otu_is_not() {
    let rows = read_csv("tax_id,emOTU\n 9606 , OTU_1\n").unwrap();
    assert_eq!(rows, [OtuRow::new(9606, " OTU_1")]);
}

#[test]
fn test_negative_tax_id() {
    let rows = read_csv("tax_id,emOTU\n-1,unassigned\n").unwrap();
    assert_eq!(rows, [OtuRow::new(-1, "unassigned")]);
}

#[test]
fn test_tab_separated() {
    let reader = OtuTableReader::new().with_delimiter(b'\t');
    let rows = reader.read_str("tax_id\temOTU\n9606\tOTU 1, human\n").unwrap();
    assert_eq!(rows, [OtuRow::new(9606, "OTU 1, human")]);
}

#[test]
fn test_custom_columns() {
    let reader = OtuTableReader::new()
        .with_tax_id_column("taxid")
        .with_otu_column("cluster");
    let rows = reader.read_str("cluster,taxid\nC7,9606\n").unwrap();
    assert_eq!(rows, [OtuRow::new(9606, "C7")]);
}

#[test]
fn test_delimiter_by_extension() {
    assert_eq!(OtuTableReader::for_path("map.tsv").delimiter(), b'\t');
    assert_eq!(OtuTableReader::for_path("map.TAB").delimiter(), b'\t');
    assert_eq!(OtuTableReader::for_path("map.csv").delimiter(), b',');
    assert_eq!(OtuTableReader::for_path("map").delimiter(), b',');
}

#[test]
fn test_quote_characters_inside_unquoted_field() {
    let rows = read_csv("tax_id,emOTU\n9606,OTU \"1\"\t(human)\n").unwrap();
    assert_eq!(rows, [OtuRow::new(9606, "OTU \"1\"\t(human)")]);
}

// --- TESTS DEALING WITH CORRUPT TABLES ---
#[test]
fn test_empty_table() {
    assert!(matches!(read_csv(""), Err(TableError::Empty)));
    assert!(matches!(read_csv("\n\r\n"), Err(TableError::Empty)));
}

#[test]
fn test_missing_column() {
    let err = read_csv("tax_id,otu\n9606,OTU_1\n").unwrap_err();
    assert!(matches!(&err, TableError::MissingColumn(column) if column == "emOTU"));
    assert_eq!(err.to_string(), "Table is missing required column 'emOTU'");
}

#[test]
fn test_missing_field() {
    let err = read_csv("tax_id,emOTU\n9606,OTU_1\n10090\n").unwrap_err();
    assert!(matches!(
        &err,
        TableError::MissingField { row: 2, column } if column == "emOTU"
    ));
}

#[test]
fn test_invalid_tax_id() {
    let err = read_csv("tax_id,emOTU\n9606,OTU_1\nHomo_sapiens,OTU_2\n").unwrap_err();
    assert!(matches!(
        &err,
        TableError::InvalidTaxId { row: 2, value, .. } if value == "Homo_sapiens"
    ));

    assert!(matches!(
        read_csv("tax_id,emOTU\n96.06,OTU_1\n"),
        Err(TableError::InvalidTaxId { row: 1, .. })
    ));
}

#[test]
fn test_empty_otu() {
    assert!(matches!(
        read_csv("tax_id,emOTU\n9606,\n"),
        Err(TableError::EmptyOtu { row: 1 })
    ));
}

#[test]
fn test_unclosed_quote() {
    let err = read_csv("tax_id,emOTU\n9606,\"OTU_1\n").unwrap_err();
    assert!(matches!(
        &err,
        TableError::Parsing(e) if e.kind() == &ParsingErrorType::UnexpectedEOF
    ));
}

#[test]
fn test_content_after_quoted_field() {
    let err = read_csv("tax_id,emOTU\n9606,\"OTU\"_1\n").unwrap_err();
    assert!(matches!(
        &err,
        TableError::Parsing(e) if e.kind()
            == &ParsingErrorType::InvalidRecord("Unexpected '_' after closing quote".to_string())
    ));
}

// --- TESTS WHOLE FILES ---
#[test]
fn test_read_fixture() {
    let rows = read_file(Path::new("tests").join("fixtures").join("mammals_otu.csv")).unwrap();

    assert_eq!(rows.len(), 5);
    assert_eq!(rows[4], OtuRow::new(9913, "OTU_4 (clade X)"));
}

#[test]
fn test_read_tsv_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("map.tsv");
    fs::write(&path, "tax_id\temOTU\n9606\tOTU,1\n").unwrap();

    assert_eq!(read_file(&path).unwrap(), [OtuRow::new(9606, "OTU,1")]);
}

#[test]
fn test_missing_file() {
    let err = read_file(Path::new("tests").join("fixtures").join("missing.csv")).unwrap_err();
    assert!(matches!(
        &err,
        TableError::Parsing(e) if matches!(e.kind(), ParsingErrorType::IoError(_))
    ));
}
