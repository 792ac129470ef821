//! Tier breakdown with percentage-of-total fields.
//!
//! Percentages are computed over *active* tiers only: Inactive is
//! excluded from every denominator and always reports 0.0 for every
//! percentage field, even though its absolute totals are still reported.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pdash_core::store::PartnerDataStore;
use pdash_core::types::{Month, PartnerMonthRecord, Tier};

use crate::rank::ratio_pct;
use crate::rollup::{
    entity_totals, group_by_month_tier, rollup_partners, rollups_by_tier, GroupTotals,
};

/// One tier's all-time totals with shares of the active-tier whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierSummary {
    /// The tier.
    pub tier: Tier,

    /// Partners currently in this tier.
    pub partner_count: usize,

    /// Summed commission of those partners.
    pub total_earnings: Decimal,

    /// Summed company revenue.
    pub total_revenue: Decimal,

    /// Summed deposits.
    pub total_deposits: Decimal,

    /// Active client headcount (per-partner last values, summed).
    pub active_clients: i64,

    /// Summed new client activations.
    pub new_clients: i64,

    /// Share of active-tier earnings, 0 for Inactive.
    pub earnings_percentage: Decimal,

    /// Share of active-tier revenue, 0 for Inactive.
    pub revenue_percentage: Decimal,

    /// Share of active-tier deposits, 0 for Inactive.
    pub deposits_percentage: Decimal,

    /// Share of active-tier client headcount, 0 for Inactive.
    pub clients_percentage: Decimal,

    /// Share of active-tier partner count, 0 for Inactive.
    pub partner_percentage: Decimal,
}

/// Dataset totals reported alongside the tier rows.
///
/// The partner count spans every tier including Inactive; the financial
/// totals cover active tiers only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TierBreakdownTotals {
    /// All partners, Inactive included.
    pub total_partners: usize,

    /// Active-tier commission.
    pub total_earnings: Decimal,

    /// Active-tier company revenue.
    pub total_revenue: Decimal,

    /// Active-tier deposits.
    pub total_deposits: Decimal,

    /// Active-tier client headcount.
    pub total_active_clients: i64,
}

/// The full tier breakdown report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierBreakdown {
    /// Per-tier rows in display order (Platinum first); only tiers with
    /// at least one partner appear.
    pub tiers: Vec<TierSummary>,

    /// Dataset totals.
    pub totals: TierBreakdownTotals,

    /// Per-(month, current tier) totals over partners who actually earned
    /// that month.
    pub monthly: BTreeMap<Month, BTreeMap<Tier, GroupTotals>>,
}

/// Computes the tier breakdown over the whole dataset.
#[must_use]
pub fn tier_breakdown(store: &PartnerDataStore) -> TierBreakdown {
    let refs: Vec<&PartnerMonthRecord> = store.records().iter().collect();
    let rollups = rollup_partners(&refs, store);
    let by_tier = rollups_by_tier(&rollups);

    // Active-tier denominators.
    let mut denom = TierBreakdownTotals::default();
    for (tier, group) in &by_tier {
        denom.total_partners += group.len();
        if !tier.is_active() {
            continue;
        }
        let totals = entity_totals(group);
        denom.total_earnings += totals.total_earnings;
        denom.total_revenue += totals.company_revenue;
        denom.total_deposits += totals.total_deposits;
        denom.total_active_clients += totals.active_clients;
    }
    let active_partners: usize = by_tier
        .iter()
        .filter(|(t, _)| t.is_active())
        .map(|(_, g)| g.len())
        .sum();

    let mut tiers = Vec::new();
    for tier in Tier::ALL {
        let Some(group) = by_tier.get(&tier) else {
            continue;
        };
        let totals = entity_totals(group);

        let (earnings_pct, revenue_pct, deposits_pct, clients_pct, partner_pct) =
            if tier.is_active() {
                (
                    ratio_pct(totals.total_earnings, denom.total_earnings),
                    ratio_pct(totals.company_revenue, denom.total_revenue),
                    ratio_pct(totals.total_deposits, denom.total_deposits),
                    ratio_pct(
                        Decimal::from(totals.active_clients),
                        Decimal::from(denom.total_active_clients),
                    ),
                    ratio_pct(
                        Decimal::from(group.len()),
                        Decimal::from(active_partners),
                    ),
                )
            } else {
                (
                    Decimal::ZERO,
                    Decimal::ZERO,
                    Decimal::ZERO,
                    Decimal::ZERO,
                    Decimal::ZERO,
                )
            };

        tiers.push(TierSummary {
            tier,
            partner_count: group.len(),
            total_earnings: totals.total_earnings,
            total_revenue: totals.company_revenue,
            total_deposits: totals.total_deposits,
            active_clients: totals.active_clients,
            new_clients: totals.new_active_clients,
            earnings_percentage: earnings_pct,
            revenue_percentage: revenue_pct,
            deposits_percentage: deposits_pct,
            clients_percentage: clients_pct,
            partner_percentage: partner_pct,
        });
    }

    let monthly = group_by_month_tier(&refs, store, true);

    TierBreakdown {
        tiers,
        totals: denom,
        monthly,
    }
}
