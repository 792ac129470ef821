//! Dense ranking and zero-safe ratio primitives.
//!
//! Ranks are recomputed per request for every (metric, scope) pair; a
//! scope's ranks are never derived from another scope's, because the
//! value universe changes shape between scopes.

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::hash::Hash;

/// Computes dense ranks over a value per entity, descending by default
/// (1 = best).
///
/// Equal values share a rank and the next distinct value gets the
/// previous rank plus one, with no gaps: values `[50, 50, 30]` rank
/// `[1, 1, 2]`. Zero is a valid, rankable value: callers must include
/// every comparable entity even when its value is 0, otherwise everyone
/// else's rank silently shifts.
#[must_use]
pub fn dense_rank<K>(values: &[(K, Decimal)]) -> HashMap<K, u32>
where
    K: Eq + Hash + Clone,
{
    let mut distinct: Vec<Decimal> = values.iter().map(|(_, v)| *v).collect();
    distinct.sort_unstable_by(|a, b| b.cmp(a));
    distinct.dedup();

    let rank_by_value: HashMap<Decimal, u32> = distinct
        .into_iter()
        .enumerate()
        .map(|(i, v)| (v, i as u32 + 1))
        .collect();

    values
        .iter()
        .map(|(k, v)| (k.clone(), rank_by_value[v]))
        .collect()
}

/// Computes dense ranks ascending (1 = smallest value).
#[must_use]
pub fn dense_rank_ascending<K>(values: &[(K, Decimal)]) -> HashMap<K, u32>
where
    K: Eq + Hash + Clone,
{
    let negated: Vec<(K, Decimal)> = values.iter().map(|(k, v)| (k.clone(), -*v)).collect();
    dense_rank(&negated)
}

/// A percentage ratio with the division-by-zero policy of the ranking
/// engine: a denominator at or below zero yields 0, never an error.
///
/// Used for ETR (earnings / revenue) and ETD (earnings / deposits).
#[must_use]
pub fn ratio_pct(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        numerator / denominator * Decimal::ONE_HUNDRED
    }
}

/// Looks up one entity's rank, defaulting to 1.
///
/// The default covers the empty-scope policy: when a scope has no
/// comparable entities (or ranking was skipped), every participant ranks
/// 1.
#[must_use]
pub fn rank_of<K>(ranks: &HashMap<K, u32>, key: &K) -> u32
where
    K: Eq + Hash,
{
    ranks.get(key).copied().unwrap_or(1)
}
