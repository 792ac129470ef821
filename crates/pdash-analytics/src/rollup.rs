//! Aggregation reducers over partner-month records.
//!
//! Two layers:
//!
//! - [`PartnerRollup`]: one row per partner across all months, applying
//!   the per-field semantics (flows sum; `active_clients` takes the last
//!   known value; country/tier/app-dev take the latest).
//! - [`GroupTotals`]: totals for an arbitrary group of records (a month, a
//!   (month, tier) cell, ...) with unique partner counting.
//!
//! Grouping by tier always uses the partner's *current* tier (the tier
//! of their most recent month anywhere in the dataset) joined back onto
//! every historical row. A partner's January earnings count toward
//! whatever tier they ended the dataset in.

use std::collections::{BTreeMap, HashMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pdash_core::store::PartnerDataStore;
use pdash_core::types::{Month, PartnerMonthRecord, Tier};

use crate::rank::ratio_pct;

/// One partner's all-time totals with per-field reduction semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerRollup {
    /// Stable partner identifier.
    pub partner_id: String,

    /// Current tier (latest month's tier).
    pub tier: Tier,

    /// Latest known country.
    pub country: Option<String>,

    /// Summed commission across all months.
    pub total_earnings: Decimal,

    /// Summed company revenue across all months.
    pub company_revenue: Decimal,

    /// Summed deposits across all months.
    pub total_deposits: Decimal,

    /// Last known active client headcount.
    pub active_clients: i64,

    /// Summed new client activations.
    pub new_active_clients: i64,

    /// Summed traded volume.
    pub volume_usd: Decimal,

    /// Latest known API-developer flag.
    pub is_app_dev: bool,

    /// Number of months the partner has records for.
    pub months: usize,
}

/// Reduces records to one rollup per partner.
///
/// Records must be in per-partner chronological order (the store's
/// ordering) so that last-value fields resolve to the latest month.
#[must_use]
pub fn rollup_partners(records: &[&PartnerMonthRecord], store: &PartnerDataStore) -> Vec<PartnerRollup> {
    let mut by_partner: BTreeMap<&str, PartnerRollup> = BTreeMap::new();

    for record in records {
        let entry = by_partner
            .entry(record.partner_id.as_str())
            .or_insert_with(|| PartnerRollup {
                partner_id: record.partner_id.clone(),
                tier: store
                    .current_tier(&record.partner_id)
                    .unwrap_or(record.tier),
                country: None,
                total_earnings: Decimal::ZERO,
                company_revenue: Decimal::ZERO,
                total_deposits: Decimal::ZERO,
                active_clients: 0,
                new_active_clients: 0,
                volume_usd: Decimal::ZERO,
                is_app_dev: false,
                months: 0,
            });

        entry.total_earnings += record.total_earnings;
        entry.company_revenue += record.company_revenue;
        entry.total_deposits += record.total_deposits;
        entry.new_active_clients += record.new_active_clients;
        entry.volume_usd += record.volume_usd;
        entry.months += 1;
        // Last-value fields: records arrive month-ascending per partner.
        entry.active_clients = record.active_clients;
        entry.country = record.country.clone();
        entry.is_app_dev = record.is_app_dev;
    }

    by_partner.into_values().collect()
}

/// Totals for one group of records.
///
/// `partner_count` uses set semantics, so duplicate ingestion of a
/// partner's row cannot inflate it. `active_clients` here is a plain sum
/// over the group's rows; partners are independent, their headcounts
/// add; last-value reduction across months happens in
/// [`rollup_partners`], not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTotals {
    /// Unique partners in the group.
    pub partner_count: usize,

    /// Summed commission.
    pub total_earnings: Decimal,

    /// Summed company revenue.
    pub company_revenue: Decimal,

    /// Summed deposits.
    pub total_deposits: Decimal,

    /// Summed active client headcount.
    pub active_clients: i64,

    /// Summed new client activations.
    pub new_active_clients: i64,

    /// Summed traded volume.
    pub volume_usd: Decimal,
}

impl GroupTotals {
    /// Earnings-to-revenue ratio as a percentage; 0 when revenue is not
    /// positive.
    #[must_use]
    pub fn etr_ratio(&self) -> Decimal {
        ratio_pct(self.total_earnings, self.company_revenue)
    }

    /// Earnings-to-deposit ratio as a percentage; 0 when deposits are not
    /// positive.
    #[must_use]
    pub fn etd_ratio(&self) -> Decimal {
        ratio_pct(self.total_earnings, self.total_deposits)
    }

    /// Returns true if no partners contributed to this group.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.partner_count == 0
    }
}

/// Aggregates a group of records into totals.
#[must_use]
pub fn aggregate_group(records: &[&PartnerMonthRecord]) -> GroupTotals {
    let mut totals = GroupTotals::default();
    let mut partners: HashSet<&str> = HashSet::new();

    for record in records {
        partners.insert(record.partner_id.as_str());
        totals.total_earnings += record.total_earnings;
        totals.company_revenue += record.company_revenue;
        totals.total_deposits += record.total_deposits;
        totals.active_clients += record.active_clients;
        totals.new_active_clients += record.new_active_clients;
        totals.volume_usd += record.volume_usd;
    }

    totals.partner_count = partners.len();
    totals
}

/// Groups records by month and aggregates each group.
#[must_use]
pub fn group_by_month(records: &[&PartnerMonthRecord]) -> BTreeMap<Month, GroupTotals> {
    let mut grouped: BTreeMap<Month, Vec<&PartnerMonthRecord>> = BTreeMap::new();
    for record in records {
        grouped.entry(record.month).or_default().push(record);
    }

    grouped
        .into_iter()
        .map(|(month, group)| (month, aggregate_group(&group)))
        .collect()
}

/// Groups records by (month, current tier) and aggregates each cell.
///
/// With `active_only`, rows with no earnings that month are dropped
/// before grouping: the "was actually active this month" view, as
/// opposed to "holds this tier".
#[must_use]
pub fn group_by_month_tier(
    records: &[&PartnerMonthRecord],
    store: &PartnerDataStore,
    active_only: bool,
) -> BTreeMap<Month, BTreeMap<Tier, GroupTotals>> {
    let mut grouped: BTreeMap<Month, BTreeMap<Tier, Vec<&PartnerMonthRecord>>> = BTreeMap::new();

    for record in records {
        if active_only && record.total_earnings <= Decimal::ZERO {
            continue;
        }
        let tier = store
            .current_tier(&record.partner_id)
            .unwrap_or(record.tier);
        grouped
            .entry(record.month)
            .or_default()
            .entry(tier)
            .or_default()
            .push(record);
    }

    grouped
        .into_iter()
        .map(|(month, tiers)| {
            let cells = tiers
                .into_iter()
                .map(|(tier, group)| (tier, aggregate_group(&group)))
                .collect();
            (month, cells)
        })
        .collect()
}

/// All-time totals for one entity, built from per-partner rollups so that
/// last-value fields follow the cross-month rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityTotals {
    /// Unique partners.
    pub partners: usize,

    /// Partners whose current tier is not Inactive.
    pub active_partners: usize,

    /// Summed commission.
    pub total_earnings: Decimal,

    /// Summed company revenue.
    pub company_revenue: Decimal,

    /// Summed deposits.
    pub total_deposits: Decimal,

    /// Active client headcount (per-partner last values, summed).
    pub active_clients: i64,

    /// Summed new client activations.
    pub new_active_clients: i64,

    /// Summed traded volume.
    pub volume_usd: Decimal,
}

impl EntityTotals {
    /// Earnings-to-revenue ratio as a percentage; 0 when revenue is not
    /// positive.
    #[must_use]
    pub fn etr_ratio(&self) -> Decimal {
        ratio_pct(self.total_earnings, self.company_revenue)
    }

    /// Earnings-to-deposit ratio as a percentage; 0 when deposits are not
    /// positive.
    #[must_use]
    pub fn etd_ratio(&self) -> Decimal {
        ratio_pct(self.total_earnings, self.total_deposits)
    }
}

/// Sums per-partner rollups into entity totals.
#[must_use]
pub fn entity_totals(rollups: &[PartnerRollup]) -> EntityTotals {
    let mut totals = EntityTotals {
        partners: rollups.len(),
        ..EntityTotals::default()
    };

    for rollup in rollups {
        if rollup.tier.is_active() {
            totals.active_partners += 1;
        }
        totals.total_earnings += rollup.total_earnings;
        totals.company_revenue += rollup.company_revenue;
        totals.total_deposits += rollup.total_deposits;
        totals.active_clients += rollup.active_clients;
        totals.new_active_clients += rollup.new_active_clients;
        totals.volume_usd += rollup.volume_usd;
    }

    totals
}

/// Per-tier partner rollups, keyed by current tier.
#[must_use]
pub fn rollups_by_tier(rollups: &[PartnerRollup]) -> HashMap<Tier, Vec<PartnerRollup>> {
    let mut by_tier: HashMap<Tier, Vec<PartnerRollup>> = HashMap::new();
    for rollup in rollups {
        by_tier.entry(rollup.tier).or_default().push(rollup.clone());
    }
    by_tier
}
