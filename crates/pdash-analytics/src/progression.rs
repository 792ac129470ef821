//! Month-over-month tier progression tracking and movement scoring.
//!
//! Transitions are scored from a fixed, asymmetric table (not derivable
//! by formula). The per-month net score is the *weighted* sum of
//! transition scores landing in that month, which is not the same as
//! positive count minus negative count.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pdash_core::types::{Month, PartnerMonthRecord, Tier};

/// Score for a (from, to) tier movement.
///
/// The table is hardcoded exactly: climbing several tiers at once scores
/// the sum of the single steps, Inactive transitions carry their own
/// weights, and every downgrade mirrors its upgrade with the sign
/// flipped. Pairs not in the table (including same-to-same) score 0.
#[must_use]
pub fn transition_score(from: Tier, to: Tier) -> i64 {
    use Tier::{Bronze, Gold, Inactive, Platinum, Silver};
    match (from, to) {
        (Bronze, Silver) => 1,
        (Silver, Gold) => 2,
        (Gold, Platinum) => 5,
        (Platinum, Gold) => -5,
        (Gold, Silver) => -2,
        (Silver, Bronze) => -1,
        (Bronze, Gold) => 3,
        (Silver, Platinum) => 7,
        (Bronze, Platinum) => 8,
        (Platinum, Silver) => -7,
        (Gold, Bronze) => -3,
        (Platinum, Bronze) => -8,
        (Inactive, Bronze) => 1,
        (Inactive, Silver) => 3,
        (Inactive, Gold) => 6,
        (Inactive, Platinum) => 11,
        (Bronze, Inactive) => -1,
        (Silver, Inactive) => -3,
        (Gold, Inactive) => -6,
        (Platinum, Inactive) => -11,
        _ => 0,
    }
}

/// One partner's tier movement between two consecutive recorded months.
///
/// The transition is attributed to the month it lands in (the later of
/// the two records).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierTransition {
    /// The partner that moved.
    pub partner_id: String,

    /// The partner's country at the landing month.
    pub country: Option<String>,

    /// The month the movement landed in.
    pub month: Month,

    /// Tier before the movement.
    pub from_tier: Tier,

    /// Tier after the movement.
    pub to_tier: Tier,

    /// Movement score from the fixed table.
    pub score: i64,
}

/// Walks every partner's records in chronological order and emits one
/// transition per consecutive month pair, including zero-score pairs.
#[must_use]
pub fn track_transitions(records: &[&PartnerMonthRecord]) -> Vec<TierTransition> {
    // The store keeps records sorted by (partner, month); filtered
    // subsets preserve that order, so consecutive same-partner rows are
    // chronologically adjacent.
    let mut transitions = Vec::new();
    for pair in records.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);
        if prev.partner_id != curr.partner_id {
            continue;
        }
        transitions.push(TierTransition {
            partner_id: curr.partner_id.clone(),
            country: curr.country.clone(),
            month: curr.month,
            from_tier: prev.tier,
            to_tier: curr.tier,
            score: transition_score(prev.tier, curr.tier),
        });
    }
    transitions
}

/// Optional from/to tier filters applied before scoring.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ProgressionFilter {
    /// Keep only transitions leaving this tier.
    pub from_tier: Option<Tier>,

    /// Keep only transitions entering this tier.
    pub to_tier: Option<Tier>,
}

impl ProgressionFilter {
    /// Returns true if the transition passes both filters.
    #[must_use]
    pub fn matches(&self, transition: &TierTransition) -> bool {
        self.from_tier.map_or(true, |t| transition.from_tier == t)
            && self.to_tier.map_or(true, |t| transition.to_tier == t)
    }
}

/// Movement direction selector for detail queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementDirection {
    /// Upgrades (score > 0).
    Positive,
    /// Downgrades (score < 0).
    Negative,
}

impl MovementDirection {
    fn matches(self, score: i64) -> bool {
        match self {
            MovementDirection::Positive => score > 0,
            MovementDirection::Negative => score < 0,
        }
    }
}

/// One month's movement summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyMovement {
    /// The month movements landed in.
    pub month: Month,

    /// Count of upgrades.
    pub positive_movements: usize,

    /// Count of downgrades.
    pub negative_movements: usize,

    /// Summed upgrade scores.
    pub positive_score: i64,

    /// Summed downgrade scores (negative).
    pub negative_score: i64,

    /// positive_score + negative_score: the weighted net, not the count
    /// difference.
    pub weighted_net_movement: i64,

    /// Partners with at least one scored movement this month.
    pub partners_with_movement: usize,
}

/// Dataset-level movement summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressionSummary {
    /// Summed upgrade scores across all months.
    pub total_positive_score: i64,

    /// Summed downgrade scores across all months.
    pub total_negative_score: i64,

    /// Weighted net across all months.
    pub weighted_net_movement: i64,

    /// Months with at least one scored movement.
    pub total_months: usize,

    /// Weighted net divided by the months covered.
    pub avg_monthly_net_movement: Decimal,
}

/// The tier progression report: per-month summaries, most recent first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionReport {
    /// Monthly movement rows, most recent month first.
    pub monthly: Vec<MonthlyMovement>,

    /// Dataset summary.
    pub summary: ProgressionSummary,
}

/// Builds the monthly progression report from tracked transitions.
#[must_use]
pub fn monthly_progression(
    transitions: &[TierTransition],
    filter: ProgressionFilter,
) -> ProgressionReport {
    let mut by_month: BTreeMap<Month, MonthlyMovement> = BTreeMap::new();

    for transition in transitions.iter().filter(|t| filter.matches(t)) {
        let entry = by_month
            .entry(transition.month)
            .or_insert_with(|| MonthlyMovement {
                month: transition.month,
                positive_movements: 0,
                negative_movements: 0,
                positive_score: 0,
                negative_score: 0,
                weighted_net_movement: 0,
                partners_with_movement: 0,
            });

        if transition.score > 0 {
            entry.positive_movements += 1;
            entry.positive_score += transition.score;
            entry.partners_with_movement += 1;
        } else if transition.score < 0 {
            entry.negative_movements += 1;
            entry.negative_score += transition.score;
            entry.partners_with_movement += 1;
        }
    }

    // Months where every movement scored zero carry no signal.
    by_month.retain(|_, m| m.partners_with_movement > 0);

    let mut summary = ProgressionSummary::default();
    let mut monthly: Vec<MonthlyMovement> = by_month
        .into_values()
        .map(|mut movement| {
            movement.weighted_net_movement = movement.positive_score + movement.negative_score;
            summary.total_positive_score += movement.positive_score;
            summary.total_negative_score += movement.negative_score;
            movement
        })
        .collect();
    monthly.reverse(); // most recent first

    summary.weighted_net_movement = summary.total_positive_score + summary.total_negative_score;
    summary.total_months = monthly.len();
    summary.avg_monthly_net_movement = if monthly.is_empty() {
        Decimal::ZERO
    } else {
        Decimal::from(summary.weighted_net_movement) / Decimal::from(monthly.len() as i64)
    };

    ProgressionReport { monthly, summary }
}

/// The individual movements landing in one month, filtered by direction,
/// sorted strongest first.
#[must_use]
pub fn movement_details(
    transitions: &[TierTransition],
    month: Month,
    direction: MovementDirection,
    filter: ProgressionFilter,
) -> Vec<TierTransition> {
    let mut details: Vec<TierTransition> = transitions
        .iter()
        .filter(|t| t.month == month && filter.matches(t) && direction.matches(t.score))
        .cloned()
        .collect();

    match direction {
        MovementDirection::Positive => details.sort_by(|a, b| b.score.cmp(&a.score)),
        MovementDirection::Negative => details.sort_by(|a, b| a.score.cmp(&b.score)),
    }
    details
}

/// One country's movement totals for a month and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryMovement {
    /// Rank by requested-direction score, 1 = strongest.
    pub rank: u32,

    /// The country.
    pub country: String,

    /// All scored movements for the country that month, both directions.
    pub partners_with_movement: usize,

    /// True net movement for the country that month (both directions).
    pub net_movement: i64,

    /// Summed score of the requested direction only.
    pub score: i64,
}

/// Per-country movement totals for one month and direction, ranked.
///
/// Ranking orders by the requested direction's score (descending for
/// positive, ascending for negative so the worst comes first), but each
/// row reports the country's total movement count and its both-direction
/// net, so the breakdown stays comparable across directions.
#[must_use]
pub fn movement_by_country(
    transitions: &[TierTransition],
    month: Month,
    direction: MovementDirection,
    filter: ProgressionFilter,
) -> Vec<CountryMovement> {
    let landed: Vec<&TierTransition> = transitions
        .iter()
        .filter(|t| t.month == month && filter.matches(t) && t.score != 0)
        .collect();

    let mut totals: BTreeMap<&str, (usize, i64)> = BTreeMap::new();
    let mut directional: BTreeMap<&str, i64> = BTreeMap::new();

    for transition in &landed {
        let Some(country) = transition.country.as_deref() else {
            continue;
        };
        let entry = totals.entry(country).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += transition.score;

        if direction.matches(transition.score) {
            *directional.entry(country).or_insert(0) += transition.score;
        }
    }

    let mut rows: Vec<CountryMovement> = directional
        .into_iter()
        .map(|(country, score)| {
            let (all_movements, net) = totals[country];
            CountryMovement {
                rank: 0,
                country: country.to_string(),
                partners_with_movement: all_movements,
                net_movement: net,
                score,
            }
        })
        .collect();

    match direction {
        MovementDirection::Positive => rows.sort_by(|a, b| b.score.cmp(&a.score)),
        MovementDirection::Negative => rows.sort_by(|a, b| a.score.cmp(&b.score)),
    }
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i as u32 + 1;
    }
    rows
}
