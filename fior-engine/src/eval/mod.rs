//! Pipeline evaluation
//!
//! Pure, synchronous application of a column's rows to playlist item
//! sequences. Evaluation never mutates its inputs and never fails:
//! malformed rows degrade to no-ops or non-matches per evaluator.

mod filter;
mod order;

use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use crate::document::{Filter, FiorColumn, FiorData, Order, RowItem};
use crate::model::{PlaylistData, PlaylistItem};

/// Result of one column evaluation: playlist id -> transformed items.
pub type ColumnOutput = HashMap<String, Vec<PlaylistItem>>;

/// Evaluate the named columns of `data` independently against
/// `playlists`. Column ids absent from the document are skipped.
pub fn evaluate_document(
    data: &FiorData,
    columns: &[Uuid],
    playlists: &PlaylistData,
) -> HashMap<Uuid, ColumnOutput> {
    let mut output = HashMap::new();
    for id in columns {
        if let Some(column) = data.columns.get(id) {
            output.insert(*id, evaluate_column(column, playlists));
        }
    }
    output
}

/// Run a column's rows, in index order, against every playlist the
/// column is associated with, threading each row's output into the next.
/// Playlists missing from `playlists` are silently skipped.
pub fn evaluate_column(column: &FiorColumn, playlists: &PlaylistData) -> ColumnOutput {
    let rows = column.ordered_rows();
    debug!(column = %column.name, rows = rows.len(), "evaluating column");
    let mut output = ColumnOutput::new();
    for playlist_id in &column.records {
        let Some((_, items)) = playlists.get(playlist_id) else {
            continue;
        };
        let mut items = items.clone();
        for (_, row) in &rows {
            items = run_row(row, items);
        }
        output.insert(playlist_id.clone(), items);
    }
    output
}

/// Apply one row to the current sequence.
fn run_row(row: &RowItem, items: Vec<PlaylistItem>) -> Vec<PlaylistItem> {
    match row {
        RowItem::Filter { not, filter, .. } => match filter {
            Filter::Search(search) => filter::run_search(search, *not, items),
            Filter::Predicate(check) => filter::run_predicate(check, *not, items),
            Filter::RandomSelect(random) => filter::run_random_select(random, *not, items),
        },
        RowItem::Order { rev, order: op, .. } => match op {
            Order::SortBy(sort) => order::run_sort_by(sort, *rev, items),
            Order::Randomize(random) => order::run_randomize(random, *rev, items),
        },
    }
}
