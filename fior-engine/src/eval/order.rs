//! Order evaluators: composite multi-key sort and seeded randomization

use std::cmp::Ordering;

use crate::coerce::{self, Coerced};
use crate::document::{Randomize, SortBy};
use crate::key::Key;
use crate::model::PlaylistItem;
use crate::rng::SeededRng;

/// Composite ascending sort over the listed keys.
///
/// For each item pair the keys contribute, in order, a signed delta to a
/// running score (score x 10 + delta); the sign of the final score
/// decides the pair and `rev` flips it. The sort is stable, so pairs
/// scoring zero keep their input order.
pub(super) fn run_sort_by(sort: &SortBy, rev: bool, items: Vec<PlaylistItem>) -> Vec<PlaylistItem> {
    if sort.cols.is_empty() {
        return items;
    }
    merge_sort_by(items, |a, b| {
        let mut score = 0.0f64;
        for key in &sort.cols {
            score = score * 10.0 + key_delta(*key, a, b);
        }
        if rev {
            score = -score;
        }
        if score < 0.0 {
            Ordering::Less
        } else if score > 0.0 {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    })
}

/// Bottom-up stable merge sort.
///
/// `slice::sort_by` requires a strict total order and reserves the right
/// to panic when the comparator breaks it; the index key's fixed delta
/// does exactly that (both `cmp(a, b)` and `cmp(b, a)` can report
/// `Greater`). This merge never inspects a pair twice, so any comparator
/// yields some permutation without panicking.
fn merge_sort_by<F>(mut items: Vec<PlaylistItem>, mut cmp: F) -> Vec<PlaylistItem>
where
    F: FnMut(&PlaylistItem, &PlaylistItem) -> Ordering,
{
    let len = items.len();
    let mut width = 1;
    while width < len {
        let mut merged = Vec::with_capacity(len);
        let mut start = 0;
        while start < len {
            let mid = usize::min(start + width, len);
            let end = usize::min(start + 2 * width, len);
            let (mut left, mut right) = (start, mid);
            while left < mid && right < end {
                // Equal takes the left run first, keeping the sort stable.
                if cmp(&items[left], &items[right]) == Ordering::Greater {
                    merged.push(items[right].clone());
                    right += 1;
                } else {
                    merged.push(items[left].clone());
                    left += 1;
                }
            }
            merged.extend_from_slice(&items[left..mid]);
            merged.extend_from_slice(&items[right..end]);
            start = end;
        }
        items = merged;
        width *= 2;
    }
    items
}

/// Per-key contribution to the composite score for one item pair.
///
/// Dates contribute their instant difference in milliseconds, durations
/// their difference in seconds, numbers their numeric difference, and
/// strings the sign of their normalized lexicographic comparison. A pair
/// that fails to coerce contributes nothing.
fn key_delta(key: Key, a: &PlaylistItem, b: &PlaylistItem) -> f64 {
    if key == Key::Index {
        // The web editor contributes a fixed +1 for the index key,
        // regardless of the pair. Kept as observed; see DESIGN.md.
        return 1.0;
    }
    match (coerce::field(a, key, 0), coerce::field(b, key, 0)) {
        (Some(Coerced::Instant(x)), Some(Coerced::Instant(y))) => {
            (x.timestamp_millis() - y.timestamp_millis()) as f64
        }
        (Some(Coerced::Number(x)), Some(Coerced::Number(y))) => x - y,
        (Some(Coerced::Text(x)), Some(Coerced::Text(y))) => match x.cmp(&y) {
            Ordering::Less => -1.0,
            Ordering::Equal => 0.0,
            Ordering::Greater => 1.0,
        },
        _ => 0.0,
    }
}

/// Seeded full permutation; `rev` additionally reverses the result.
pub(super) fn run_randomize(
    random: &Randomize,
    rev: bool,
    mut items: Vec<PlaylistItem>,
) -> Vec<PlaylistItem> {
    let mut rng = SeededRng::from_seed_str(&random.rng_seed);
    rng.shuffle(&mut items);
    if rev {
        items.reverse();
    }
    items
}
