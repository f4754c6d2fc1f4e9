//! Document model integration tests
//!
//! Serialization round-trips, compatibility with the web editor's stored
//! JSON shape, and mutator flows driven through the public API.

use std::collections::BTreeMap;

use fior_engine::document::{
    Filter, Operator, Order, Predicate, RandomSelect, Randomize, RowItem, Search, SortBy,
};
use fior_engine::key::Key;
use fior_engine::storage::{decode_document, encode_document};
use fior_engine::FiorData;

fn full_document() -> FiorData {
    let mut data = FiorData::new();
    let column = data.add_column(data.next_column_name());
    data.set_column_playlists(column, vec!["PL1".to_string(), "PL2".to_string()])
        .unwrap();
    data.add_row(
        column,
        RowItem::Filter {
            not: false,
            filter: Filter::Search(Search {
                cols: vec![Key::Title, Key::ChannelTitle],
                search: "live".to_string(),
                regex: false,
            }),
            index: 0,
        },
    )
    .unwrap();
    data.add_row(
        column,
        RowItem::Filter {
            not: true,
            filter: Filter::Predicate(Predicate {
                cols: Some(BTreeMap::from([(Key::Duration, true)])),
                operator: Operator::Gt,
                value: "PT10M0S".to_string(),
            }),
            index: 0,
        },
    )
    .unwrap();
    data.add_row(
        column,
        RowItem::Filter {
            not: false,
            filter: Filter::RandomSelect(RandomSelect {
                select_count: 25,
                rng_seed: "abc123".to_string(),
            }),
            index: 0,
        },
    )
    .unwrap();
    data.add_row(
        column,
        RowItem::Order {
            rev: false,
            order: Order::SortBy(SortBy {
                cols: vec![Key::PublishedAt, Key::Index],
            }),
            index: 0,
        },
    )
    .unwrap();
    data.add_row(
        column,
        RowItem::Order {
            rev: true,
            order: Order::Randomize(Randomize {
                rng_seed: "xyz".to_string(),
            }),
            index: 0,
        },
    )
    .unwrap();
    data
}

#[test]
fn document_round_trips_through_json() {
    let data = full_document();
    let encoded = encode_document(&data).unwrap();
    let decoded = decode_document(&encoded);
    assert_eq!(decoded, data);
}

#[test]
fn add_row_assigns_sequential_indexes() {
    let data = full_document();
    let column = data.columns.values().next().unwrap();
    let mut indexes: Vec<usize> = column.rows.values().map(|row| row.index()).collect();
    indexes.sort_unstable();
    assert_eq!(indexes, vec![0, 1, 2, 3, 4]);
}

#[test]
fn ordered_rows_follow_indexes() {
    let data = full_document();
    let column = data.columns.values().next().unwrap();
    let ordered = column.ordered_rows();
    let indexes: Vec<usize> = ordered.iter().map(|(_, row)| row.index()).collect();
    assert_eq!(indexes, vec![0, 1, 2, 3, 4]);
    assert!(matches!(
        ordered[0].1,
        RowItem::Filter {
            filter: Filter::Search(_),
            ..
        }
    ));
    assert!(matches!(
        ordered[4].1,
        RowItem::Order {
            order: Order::Randomize(_),
            ..
        }
    ));
}

#[test]
fn editor_documents_load_unchanged() {
    // shape as written by the web editor to localStorage
    let raw = r#"{
      "columns": {
        "4be0643f-1d98-573b-97cd-ca98a65347dd": {
          "name": "fior-0",
          "records": ["PLabc"],
          "rows": {
            "6fa459ea-ee8a-3ca4-894e-db77e160355e": {
              "filter": { "cols": ["title"], "search": "mix", "regex": false },
              "index": 0
            },
            "886313e1-3b8a-5372-9b90-0c9aee199e5d": {
              "not": true,
              "filter": { "cols": { "duration": true }, "operator": "<", "value": "PT1H0M0S" },
              "index": 1
            },
            "c1d9f50f-86d4-4cd1-8106-6b8d5f1c7fe3": {
              "filter": { "selectCount": 10, "rngSeed": "seed" },
              "index": 2
            },
            "b4f9e1c2-0d67-4f2f-8c3a-9e2f5a6d7b81": {
              "order": { "cols": ["published_at"] },
              "index": 3
            },
            "b5d1f8a3-2c4e-4a6b-9d0f-1e3a5c7b9d2f": {
              "rev": true,
              "order": { "rngSeed": "other" },
              "index": 4
            }
          },
          "index": 0
        }
      }
    }"#;
    let data = decode_document(raw);
    let column = data.columns.values().next().expect("one column");
    assert_eq!(column.name, "fior-0");
    assert_eq!(column.records, vec!["PLabc"]);
    let ordered = column.ordered_rows();
    assert_eq!(ordered.len(), 5);
    match ordered[1].1 {
        RowItem::Filter {
            not,
            filter: Filter::Predicate(check),
            ..
        } => {
            assert!(*not);
            assert_eq!(check.operator, Operator::Lt);
            assert_eq!(check.value, "PT1H0M0S");
        }
        other => panic!("expected an exclude check row, got {other:?}"),
    }
    match ordered[2].1 {
        RowItem::Filter {
            filter: Filter::RandomSelect(select),
            ..
        } => {
            assert_eq!(select.select_count, 10);
            assert_eq!(select.rng_seed, "seed");
        }
        other => panic!("expected a random select row, got {other:?}"),
    }
    match ordered[4].1 {
        RowItem::Order {
            rev,
            order: Order::Randomize(random),
            ..
        } => {
            assert!(*rev);
            assert_eq!(random.rng_seed, "other");
        }
        other => panic!("expected a randomize row, got {other:?}"),
    }

    // and it re-encodes to an equivalent document
    let reencoded = decode_document(&encode_document(&data).unwrap());
    assert_eq!(reencoded, data);
}

#[test]
fn delete_flows_keep_indexes_contiguous() {
    let mut data = full_document();
    let column = *data.columns.keys().next().unwrap();
    let victim = data
        .columns
        .get(&column)
        .unwrap()
        .ordered_rows()
        .get(2)
        .map(|(id, _)| *id)
        .unwrap();
    data.delete_row(column, victim).unwrap();
    let rows = data.columns.get(&column).unwrap().ordered_rows();
    let indexes: Vec<usize> = rows.iter().map(|(_, row)| row.index()).collect();
    assert_eq!(indexes, vec![0, 1, 2, 3]);

    let second = data.add_column("fior-9");
    data.delete_column(column).unwrap();
    assert_eq!(data.columns[&second].index, 0);
}

#[test]
fn rename_and_playlist_set_round_trip() {
    let mut data = FiorData::new();
    let column = data.add_column("fior-0");
    data.rename_column(column, "weekly mix").unwrap();
    data.set_column_playlists(column, vec!["PL9".to_string()])
        .unwrap();
    let decoded = decode_document(&encode_document(&data).unwrap());
    assert_eq!(decoded.columns[&column].name, "weekly mix");
    assert_eq!(decoded.columns[&column].records, vec!["PL9"]);
}
