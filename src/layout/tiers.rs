//! Connectivity ranking and tier partitioning.

use crate::schema::{Schema, Table};
use std::cmp::Reverse;

/// Tier sizes for `n` tables, innermost first.
///
/// The pattern is `[n]`, `[2, n-2]`, `[2, 4, n-6]` or `[2, 4, 6, n-12]`
/// depending on `n`. Sizes are capped by the tables left to place and empty
/// tiers are dropped, so the result always sums to `n`.
pub fn tier_sizes(n: usize) -> Vec<usize> {
    let pattern = if n <= 2 {
        vec![n]
    } else if n <= 6 {
        vec![2, n - 2]
    } else if n <= 10 {
        vec![2, 4, n - 6]
    } else {
        vec![2, 4, 6, n.saturating_sub(12)]
    };

    let mut remaining = n;
    let mut sizes = Vec::with_capacity(pattern.len());
    for size in pattern {
        let size = size.min(remaining);
        if size == 0 {
            continue;
        }
        remaining -= size;
        sizes.push(size);
    }
    sizes
}

/// Tables sorted by descending connectivity; ties keep schema order.
pub fn rank_by_connectivity(schema: &Schema) -> Vec<&Table> {
    let mut ranked: Vec<&Table> = schema.tables().iter().collect();
    // sort_by_key is stable
    ranked.sort_by_key(|t| Reverse(schema.connectivity(&t.name)));
    ranked
}

/// Split `items` into consecutive slices of the given sizes.
pub fn partition<'a, T>(items: &'a [T], sizes: &[usize]) -> Vec<&'a [T]> {
    let mut tiers = Vec::with_capacity(sizes.len());
    let mut start = 0;
    for &size in sizes {
        let end = (start + size).min(items.len());
        tiers.push(&items[start..end]);
        start = end;
    }
    tiers
}
