//! Pipeline document model and structural mutators
//!
//! A document is a set of named columns; each column is an ordered
//! pipeline of filter/order rows plus the playlists it applies to. Row
//! and column maps are keyed by UUID; execution and display order come
//! from the `index` fields, never from map iteration order, and every
//! structural delete renumbers the survivors back to a contiguous 0..n-1
//! range.
//!
//! Rows serialize untagged, so documents written by the web editor
//! (`{"filter": {...}}` / `{"order": {...}}` rows) load unchanged.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::key::Key;

/// Comparison operator of a check row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">=")]
    Ge,
}

impl Operator {
    /// Whether an ordering of lhs relative to rhs satisfies the operator.
    pub fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Ne => ordering != Ordering::Equal,
            Operator::Lt => ordering == Ordering::Less,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Le => ordering != Ordering::Greater,
            Operator::Ge => ordering != Ordering::Less,
        }
    }
}

/// Substring or regex search over the stringified values of `cols`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Search {
    pub cols: Vec<Key>,
    pub search: String,
    pub regex: bool,
}

/// Typed comparison of selected keys against a literal operand.
///
/// `cols` maps key -> selected; only `true` entries participate. The
/// editor guarantees every entry shares one value kind (an isolated key
/// set), so the evaluator coerces the literal once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    pub cols: Option<BTreeMap<Key, bool>>,
    pub operator: Operator,
    pub value: String,
}

/// Deterministic pseudo-random subset of a fixed size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomSelect {
    pub select_count: i64,
    pub rng_seed: String,
}

/// Multi-key ascending composite sort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortBy {
    pub cols: Vec<Key>,
}

/// Full pseudo-random permutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Randomize {
    pub rng_seed: String,
}

/// Filter row payloads: operations that keep or drop items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Filter {
    Search(Search),
    RandomSelect(RandomSelect),
    Predicate(Predicate),
}

/// Order row payloads: operations that rearrange items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Order {
    SortBy(SortBy),
    Randomize(Randomize),
}

/// One pipeline step: a filter with optional exclusion, or an order with
/// optional reversal. `index` is the step's position in the column's
/// execution order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowItem {
    Filter {
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        not: bool,
        filter: Filter,
        index: usize,
    },
    Order {
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        rev: bool,
        order: Order,
        index: usize,
    },
}

impl RowItem {
    /// Position within the column's pipeline.
    pub fn index(&self) -> usize {
        match self {
            RowItem::Filter { index, .. } | RowItem::Order { index, .. } => *index,
        }
    }

    fn set_index(&mut self, new_index: usize) {
        match self {
            RowItem::Filter { index, .. } | RowItem::Order { index, .. } => *index = new_index,
        }
    }
}

/// A named pipeline of rows plus the playlists it applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiorColumn {
    pub name: String,
    /// Playlist ids this column evaluates against
    pub records: Vec<String>,
    pub rows: HashMap<Uuid, RowItem>,
    /// Display/execution position among the document's columns
    pub index: usize,
}

impl FiorColumn {
    /// Empty column with no rows and no playlist associations.
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        FiorColumn {
            name: name.into(),
            records: Vec::new(),
            rows: HashMap::new(),
            index,
        }
    }

    /// Rows in execution order: by `index`, row id breaking ties so a
    /// document with duplicate indexes still evaluates deterministically.
    pub fn ordered_rows(&self) -> Vec<(Uuid, &RowItem)> {
        let mut rows: Vec<(Uuid, &RowItem)> = self.rows.iter().map(|(id, r)| (*id, r)).collect();
        rows.sort_by_key(|(id, row)| (row.index(), *id));
        rows
    }

    fn renumber_rows(&mut self) {
        let order: Vec<Uuid> = self.ordered_rows().into_iter().map(|(id, _)| id).collect();
        for (i, id) in order.into_iter().enumerate() {
            if let Some(row) = self.rows.get_mut(&id) {
                row.set_index(i);
            }
        }
    }
}

/// The persisted pipeline document: every column the user has defined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FiorData {
    pub columns: HashMap<Uuid, FiorColumn>,
}

impl FiorData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty column with the next ordinal index.
    pub fn add_column(&mut self, name: impl Into<String>) -> Uuid {
        let id = Uuid::new_v4();
        let index = self.columns.len();
        self.columns.insert(id, FiorColumn::new(name, index));
        id
    }

    /// First unused "fior-N" name, the editor's default for new columns.
    pub fn next_column_name(&self) -> String {
        let mut taken: Vec<usize> = self
            .columns
            .values()
            .filter_map(|col| col.name.strip_prefix("fior-"))
            .filter_map(|n| n.parse().ok())
            .collect();
        taken.sort_unstable();
        let mut free = self.columns.len();
        for (i, n) in taken.iter().enumerate() {
            if *n != i {
                free = i;
                break;
            }
        }
        format!("fior-{free}")
    }

    /// Remove a column and renumber the survivors to 0..n-1.
    pub fn delete_column(&mut self, column: Uuid) -> Result<()> {
        self.columns
            .remove(&column)
            .ok_or(Error::ColumnNotFound(column))?;
        self.renumber_columns();
        Ok(())
    }

    pub fn rename_column(&mut self, column: Uuid, name: impl Into<String>) -> Result<()> {
        self.column_mut(column)?.name = name.into();
        Ok(())
    }

    /// Replace the set of playlists the column evaluates against.
    pub fn set_column_playlists(&mut self, column: Uuid, records: Vec<String>) -> Result<()> {
        self.column_mut(column)?.records = records;
        Ok(())
    }

    /// Append a row to the column with the next ordinal index.
    pub fn add_row(&mut self, column: Uuid, mut row: RowItem) -> Result<Uuid> {
        let col = self.column_mut(column)?;
        let id = Uuid::new_v4();
        row.set_index(col.rows.len());
        col.rows.insert(id, row);
        Ok(id)
    }

    /// Remove a row and renumber the column's survivors to 0..n-1.
    pub fn delete_row(&mut self, column: Uuid, row: Uuid) -> Result<()> {
        let col = self.column_mut(column)?;
        col.rows.remove(&row).ok_or(Error::RowNotFound(row))?;
        col.renumber_rows();
        Ok(())
    }

    /// Flip a filter row's exclude flag; returns the new state.
    pub fn toggle_not(&mut self, column: Uuid, row: Uuid) -> Result<bool> {
        match self.row_mut(column, row)? {
            RowItem::Filter { not, .. } => {
                *not = !*not;
                Ok(*not)
            }
            RowItem::Order { .. } => Err(Error::InvalidToggle("`not` applies to filter rows only")),
        }
    }

    /// Flip an order row's reverse flag; returns the new state.
    pub fn toggle_rev(&mut self, column: Uuid, row: Uuid) -> Result<bool> {
        match self.row_mut(column, row)? {
            RowItem::Order { rev, .. } => {
                *rev = !*rev;
                Ok(*rev)
            }
            RowItem::Filter { .. } => Err(Error::InvalidToggle("`rev` applies to order rows only")),
        }
    }

    /// Flip a search row's regex flag; returns the new state.
    ///
    /// Enabling regex on a non-empty search text requires the text to be
    /// a valid pattern. The evaluator fail-soft-validates independently,
    /// so documents edited elsewhere still evaluate.
    pub fn toggle_regex(&mut self, column: Uuid, row: Uuid) -> Result<bool> {
        match self.row_mut(column, row)? {
            RowItem::Filter {
                filter: Filter::Search(search),
                ..
            } => {
                if !search.regex && !search.search.is_empty() {
                    regex::Regex::new(&search.search)
                        .map_err(|err| Error::InvalidPattern(err.to_string()))?;
                }
                search.regex = !search.regex;
                Ok(search.regex)
            }
            _ => Err(Error::InvalidToggle("`regex` applies to search rows only")),
        }
    }

    fn renumber_columns(&mut self) {
        let mut order: Vec<(usize, Uuid)> = self
            .columns
            .iter()
            .map(|(id, col)| (col.index, *id))
            .collect();
        order.sort_unstable();
        for (i, (_, id)) in order.into_iter().enumerate() {
            if let Some(col) = self.columns.get_mut(&id) {
                col.index = i;
            }
        }
    }

    fn column_mut(&mut self, column: Uuid) -> Result<&mut FiorColumn> {
        self.columns
            .get_mut(&column)
            .ok_or(Error::ColumnNotFound(column))
    }

    fn row_mut(&mut self, column: Uuid, row: Uuid) -> Result<&mut RowItem> {
        self.column_mut(column)?
            .rows
            .get_mut(&row)
            .ok_or(Error::RowNotFound(row))
    }
}
