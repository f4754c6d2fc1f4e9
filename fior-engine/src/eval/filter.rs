//! Filter evaluators: search, check, and random subset selection
//!
//! All three are stable filters: kept items preserve their relative
//! input order, and `not` swaps the kept and excluded sets.

use regex::Regex;
use tracing::warn;

use crate::coerce;
use crate::document::{Predicate, RandomSelect, Search};
use crate::key::Key;
use crate::model::PlaylistItem;
use crate::rng::SeededRng;

/// Stable filter with `not` swapping kept and excluded items. The
/// predicate sees each item's position in the current sequence.
fn keep<F>(items: Vec<PlaylistItem>, not: bool, mut matches: F) -> Vec<PlaylistItem>
where
    F: FnMut(&PlaylistItem, usize) -> bool,
{
    items
        .into_iter()
        .enumerate()
        .filter(|(index, item)| matches(item, *index) != not)
        .map(|(_, item)| item)
        .collect()
}

/// Substring/regex search across the stringified values of the selected
/// columns, OR semantics. An empty column set or empty needle is a
/// deliberate no-op, and a pattern that fails to compile skips the row.
pub(super) fn run_search(
    search: &Search,
    not: bool,
    items: Vec<PlaylistItem>,
) -> Vec<PlaylistItem> {
    if search.cols.is_empty() || search.search.is_empty() {
        return items;
    }
    let pattern = if search.regex {
        // The raw text compiles; only haystacks get normalized.
        match Regex::new(&search.search) {
            Ok(re) => Some(re),
            Err(err) => {
                warn!(%err, "search pattern failed to compile, skipping row");
                return items;
            }
        }
    } else {
        None
    };
    let needle = coerce::normalize(&search.search);
    let matches = |item: &PlaylistItem, index: usize| {
        search.cols.iter().any(|key| {
            let haystack = coerce::normalize(&key.field_text(item, index));
            match &pattern {
                Some(re) => re.is_match(&haystack),
                None => haystack.contains(&needle),
            }
        })
    };
    keep(items, not, matches)
}

/// Typed comparison of the selected keys against the literal operand, OR
/// semantics. No selected keys or an empty literal is a no-op; a literal
/// or field that fails to coerce never matches.
pub(super) fn run_predicate(
    check: &Predicate,
    not: bool,
    items: Vec<PlaylistItem>,
) -> Vec<PlaylistItem> {
    let keys: Vec<Key> = check
        .cols
        .as_ref()
        .map(|cols| {
            cols.iter()
                .filter(|(_, selected)| **selected)
                .map(|(key, _)| *key)
                .collect()
        })
        .unwrap_or_default();
    let Some(first) = keys.first() else {
        return items;
    };
    if check.value.is_empty() {
        return items;
    }
    // All selected keys share one kind (enforced at edit time), so the
    // literal coerces once against the first key's kind.
    let kind = first.kind();
    let Some(operand) = coerce::literal(kind, &check.value) else {
        // Nothing matches, so `not` keeps everything.
        warn!(value = %check.value, "check value failed to coerce, matching nothing");
        return keep(items, not, |_, _| false);
    };
    let matches = |item: &PlaylistItem, index: usize| {
        keys.iter().any(|key| {
            coerce::field(item, *key, index)
                .and_then(|value| value.compare(&operand))
                .is_some_and(|ordering| check.operator.accepts(ordering))
        })
    };
    keep(items, not, matches)
}

/// Seeded random subset of `select_count` items with input order
/// restored; `not` keeps the complement instead. Degenerate counts
/// (zero, negative, or at least the sequence length) are a no-op.
pub(super) fn run_random_select(
    random: &RandomSelect,
    not: bool,
    items: Vec<PlaylistItem>,
) -> Vec<PlaylistItem> {
    if random.select_count <= 0 || random.select_count >= items.len() as i64 {
        return items;
    }
    let count = random.select_count as usize;
    let mut rng = SeededRng::from_seed_str(&random.rng_seed);
    let mut paired: Vec<(usize, PlaylistItem)> = items.into_iter().enumerate().collect();
    rng.shuffle(&mut paired);
    let mut taken = if not {
        paired.split_off(count)
    } else {
        paired.truncate(count);
        paired
    };
    taken.sort_by_key(|(index, _)| *index);
    taken.into_iter().map(|(_, item)| item).collect()
}
