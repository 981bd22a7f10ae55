use datawrapper::api::DataTable;
use datawrapper::error::ChartError;
use indexmap::IndexMap;
use serde_json::{Value, json};

fn strings(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|cell| (*cell).to_owned()).collect()
}

#[test]
fn csv_round_trip_preserves_cells() {
    let table = DataTable::new(
        strings(&["Party", "Share, %", "Note"]),
        vec![
            strings(&["SPD", "25.7", "said \"hello\""]),
            strings(&["Greens", "14.8", ""]),
        ],
    )
    .expect("table");

    let csv = table.to_csv().expect("csv");
    assert!(csv.starts_with("Party,\"Share, %\",Note"));
    assert!(csv.contains("\"said \"\"hello\"\"\""));

    let parsed = DataTable::from_csv(&csv).expect("parse");
    assert_eq!(parsed, table);
    assert_eq!(parsed.column("Share, %"), Some(vec!["25.7", "14.8"]));
}

#[test]
fn ragged_rows_are_rejected() {
    let err = DataTable::new(strings(&["a", "b"]), vec![strings(&["1"])]).expect_err("ragged");
    assert!(matches!(err, ChartError::InvalidData(_)));

    assert!(DataTable::from_csv("a,b\n1,2,3\n").is_err());

    let mut table = DataTable::new(strings(&["a"]), Vec::new()).expect("table");
    assert!(table.push_row(strings(&["1", "2"])).is_err());
    table.push_row(strings(&["1"])).expect("row");
    assert_eq!(table.rows().len(), 1);
}

#[test]
fn header_only_table_counts_as_empty() {
    let table = DataTable::from_csv("Year,Value\n").expect("parse");
    assert_eq!(table.columns(), ["Year", "Value"]);
    assert!(table.is_empty());
    assert_eq!(table.column("Missing"), None);
}

#[test]
fn records_fill_missing_cells() {
    let records: Vec<IndexMap<String, Value>> = vec![
        [("year".to_owned(), json!(2020)), ("value".to_owned(), json!(1.5))]
            .into_iter()
            .collect(),
        [("year".to_owned(), json!(2021)), ("label".to_owned(), json!("peak"))]
            .into_iter()
            .collect(),
        [("value".to_owned(), Value::Null)].into_iter().collect(),
    ];

    let table = DataTable::from_records(&records).expect("table");
    assert_eq!(table.columns(), ["year", "value", "label"]);
    assert_eq!(table.rows()[0], strings(&["2020", "1.5", ""]));
    assert_eq!(table.rows()[1], strings(&["2021", "", "peak"]));
    assert_eq!(table.rows()[2], strings(&["", "", ""]));
}
