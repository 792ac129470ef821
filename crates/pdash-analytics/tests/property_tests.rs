//! Property-based tests for pdash-analytics.
//!
//! These verify structural invariants of ranking, classification, and
//! progression scoring over generated inputs.

use proptest::prelude::*;
use rust_decimal::Decimal;

use pdash_analytics::prelude::*;
use pdash_core::prelude::*;

fn arb_value() -> impl Strategy<Value = Decimal> {
    // Cents-granular values across the interesting range, negatives
    // included (revenue can be a loss).
    (-1_000_000i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #[test]
    fn dense_ranks_have_no_gaps_and_ties_share(values in prop::collection::vec(arb_value(), 1..40)) {
        let entities: Vec<(String, Decimal)> = values
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("E{i}"), *v))
            .collect();

        let ranks = dense_rank(&entities);

        // Every entity ranked, best rank is 1.
        prop_assert_eq!(ranks.len(), entities.len());
        let max_rank = *ranks.values().max().unwrap();
        prop_assert!(ranks.values().any(|&r| r == 1));

        // No gaps: every rank from 1 to max occurs.
        for rank in 1..=max_rank {
            prop_assert!(ranks.values().any(|&r| r == rank));
        }

        // Equal values share a rank; distinct values never do.
        for (a, va) in &entities {
            for (b, vb) in &entities {
                if va == vb {
                    prop_assert_eq!(ranks[a], ranks[b]);
                } else {
                    prop_assert_ne!(ranks[a], ranks[b]);
                }
                // Descending: larger value, better rank.
                if va > vb {
                    prop_assert!(ranks[a] < ranks[b]);
                }
            }
        }

        // The distinct rank count equals the distinct value count.
        let mut distinct = values.clone();
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(max_rank as usize, distinct.len());
    }

    #[test]
    fn classification_is_monotone_in_earnings(a in arb_value(), b in arb_value()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        // Higher earnings can never classify to a worse tier.
        prop_assert!(Tier::classify(hi) <= Tier::classify(lo));
    }

    #[test]
    fn transition_scores_are_antisymmetric(from in 0usize..5, to in 0usize..5) {
        let from = Tier::ALL[from];
        let to = Tier::ALL[to];
        prop_assert_eq!(transition_score(from, to), -transition_score(to, from));
        if from == to {
            prop_assert_eq!(transition_score(from, to), 0);
        }
    }

    #[test]
    fn ratio_pct_never_panics_and_zero_denominator_yields_zero(
        num in arb_value(),
        den in arb_value(),
    ) {
        let ratio = ratio_pct(num, den);
        if den <= Decimal::ZERO {
            prop_assert_eq!(ratio, Decimal::ZERO);
        } else {
            prop_assert_eq!(ratio, num / den * Decimal::ONE_HUNDRED);
        }
    }

    #[test]
    fn monthly_net_equals_sum_of_landing_scores(
        earnings in prop::collection::vec(0i64..10_000, 2..8),
    ) {
        // One partner with a random earnings path; the per-month weighted
        // net must equal the raw sum of that month's transition scores.
        let records: Vec<PartnerMonthRecord> = earnings
            .iter()
            .enumerate()
            .map(|(i, e)| {
                PartnerMonthRecord::new("P1", Month::from_ymd(2025, i as u32 + 1).unwrap())
                    .with_country("Kenya")
                    .with_earnings(Decimal::from(*e))
            })
            .collect();
        let store = PartnerDataStore::load(records);
        let refs: Vec<&PartnerMonthRecord> = store.records().iter().collect();
        let transitions = track_transitions(&refs);

        let report = monthly_progression(&transitions, ProgressionFilter::default());
        for row in &report.monthly {
            let landing: i64 = transitions
                .iter()
                .filter(|t| t.month == row.month)
                .map(|t| t.score)
                .sum();
            prop_assert_eq!(row.weighted_net_movement, landing);
            prop_assert_eq!(
                row.weighted_net_movement,
                row.positive_score + row.negative_score
            );
        }
    }
}
