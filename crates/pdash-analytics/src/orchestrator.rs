//! The analytics orchestrator.
//!
//! Composes classification, aggregation, and ranking into per-request
//! reports for one target entity (a country or a region), scanning every
//! comparable entity of the same kind. One generic algorithm serves both
//! entity kinds; the kind only decides how records group and what the
//! comparison universe is.
//!
//! Everything is recomputed per request from the injected store. Each
//! ranking scope (overall, per-month, per-tier, per-(tier, month)) gets
//! its own full dense-rank computation over the same universe; ranks are
//! never derived from another scope's ranks.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pdash_core::error::{AnalyticsError, AnalyticsResult};
use pdash_core::regions::{all_regions, normalize_entity_name, EntityKind};
use pdash_core::store::PartnerDataStore;
use pdash_core::types::{Month, PartnerMonthRecord, Tier};

use crate::overview::{partner_overview, PartnerOverview};
use crate::progression::{
    monthly_progression, movement_by_country, movement_details, track_transitions,
    CountryMovement, MovementDirection, ProgressionFilter, ProgressionReport, TierTransition,
};
use crate::rank::{dense_rank, rank_of};
use crate::rollup::{
    aggregate_group, entity_totals, group_by_month_tier, rollup_partners, EntityTotals,
    GroupTotals, PartnerRollup,
};
use crate::tiers::{tier_breakdown, TierBreakdown};

/// An analytics request naming one target entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsRequest {
    /// Whether the target (and its comparison universe) is a country or a
    /// region.
    pub kind: EntityKind,

    /// The entity name as received; `+`-encoded spaces are decoded before
    /// lookup.
    pub name: String,

    /// When false ("fast mode"), the expensive cross-entity ranking scan
    /// is skipped and every rank field defaults to 1.
    pub include_rankings: bool,
}

impl AnalyticsRequest {
    /// A country request with rankings included.
    #[must_use]
    pub fn country(name: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::Country,
            name: name.into(),
            include_rankings: true,
        }
    }

    /// A region request with rankings included.
    #[must_use]
    pub fn region(name: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::Region,
            name: name.into(),
            include_rankings: true,
        }
    }

    /// Switches the request to fast mode.
    #[must_use]
    pub fn without_rankings(mut self) -> Self {
        self.include_rankings = false;
        self
    }
}

/// Scope selector for progression queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressionScope {
    /// The whole dataset.
    Global,
    /// One country's partners.
    Country(String),
}

/// The target's dense ranks for the overall summary scope.
///
/// Defaults to 1 everywhere: the value for fast mode, unknown entities,
/// and empty comparison scopes alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRanks {
    /// Rank by unique partner count.
    pub partners_rank: u32,
    /// Rank by active partner count.
    pub active_partners_rank: u32,
    /// Rank by company revenue.
    pub revenue_rank: u32,
    /// Rank by partner earnings.
    pub earnings_rank: u32,
    /// Rank by deposits.
    pub deposits_rank: u32,
    /// Rank by active client headcount.
    pub clients_rank: u32,
    /// Rank by earnings-to-revenue ratio.
    pub etr_rank: u32,
    /// Rank by earnings-to-deposit ratio.
    pub etd_rank: u32,
    /// Rank by average monthly revenue.
    pub avg_monthly_revenue_rank: u32,
    /// Rank by average monthly earnings.
    pub avg_monthly_earnings_rank: u32,
    /// Rank by average monthly deposits.
    pub avg_monthly_deposits_rank: u32,
    /// Rank by average monthly new clients.
    pub avg_monthly_new_clients_rank: u32,
}

impl Default for SummaryRanks {
    fn default() -> Self {
        Self {
            partners_rank: 1,
            active_partners_rank: 1,
            revenue_rank: 1,
            earnings_rank: 1,
            deposits_rank: 1,
            clients_rank: 1,
            etr_rank: 1,
            etd_rank: 1,
            avg_monthly_revenue_rank: 1,
            avg_monthly_earnings_rank: 1,
            avg_monthly_deposits_rank: 1,
            avg_monthly_new_clients_rank: 1,
        }
    }
}

/// The target entity's all-time totals with summary ranks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySummary {
    /// The target entity name (normalized).
    pub entity: String,

    /// Unique partners.
    pub total_partners: usize,

    /// Partners whose current tier is not Inactive.
    pub total_active_partners: usize,

    /// Summed company revenue.
    pub total_company_revenue: Decimal,

    /// Summed partner earnings.
    pub total_partner_earnings: Decimal,

    /// Summed deposits.
    pub total_deposits: Decimal,

    /// Active client headcount (per-partner last values, summed).
    pub total_active_clients: i64,

    /// Summed new client activations.
    pub total_new_clients: i64,

    /// Dense ranks against every other same-kind entity.
    #[serde(flatten)]
    pub ranks: SummaryRanks,
}

/// The target's cross-entity ranks for one month, ignoring tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRanks {
    /// Rank by unique partner count.
    pub partners_rank: u32,
    /// Rank by earnings.
    pub earnings_rank: u32,
    /// Rank by revenue.
    pub revenue_rank: u32,
    /// Rank by deposits.
    pub deposits_rank: u32,
    /// Rank by active client headcount.
    pub active_clients_rank: u32,
    /// Rank by new clients.
    pub new_clients_rank: u32,
    /// Rank by traded volume.
    pub volume_rank: u32,
}

impl Default for MonthRanks {
    fn default() -> Self {
        Self {
            partners_rank: 1,
            earnings_rank: 1,
            revenue_rank: 1,
            deposits_rank: 1,
            active_clients_rank: 1,
            new_clients_rank: 1,
            volume_rank: 1,
        }
    }
}

/// The target's cross-entity ranks for a tier-restricted scope (all-time
/// or one month).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierScopeRanks {
    /// Rank by unique partner count.
    pub partners_rank: u32,
    /// Rank by earnings.
    pub earnings_rank: u32,
    /// Rank by revenue.
    pub revenue_rank: u32,
    /// Rank by deposits.
    pub deposits_rank: u32,
    /// Rank by active client headcount.
    pub active_clients_rank: u32,
    /// Rank by new clients.
    pub new_clients_rank: u32,
    /// Rank by traded volume.
    pub volume_rank: u32,
    /// Rank by earnings-to-revenue ratio.
    pub etr_rank: u32,
    /// Rank by earnings-to-deposit ratio.
    pub etd_rank: u32,
}

impl Default for TierScopeRanks {
    fn default() -> Self {
        Self {
            partners_rank: 1,
            earnings_rank: 1,
            revenue_rank: 1,
            deposits_rank: 1,
            active_clients_rank: 1,
            new_clients_rank: 1,
            volume_rank: 1,
            etr_rank: 1,
            etd_rank: 1,
        }
    }
}

/// The tier-scoped ranks carried inside a monthly cell, field names
/// prefixed to coexist with the month-level ranks under serde flattening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCellRanks {
    /// Tier-scoped rank by unique partner count.
    pub tier_partners_rank: u32,
    /// Tier-scoped rank by earnings.
    pub tier_earnings_rank: u32,
    /// Tier-scoped rank by revenue.
    pub tier_revenue_rank: u32,
    /// Tier-scoped rank by deposits.
    pub tier_deposits_rank: u32,
    /// Tier-scoped rank by active client headcount.
    pub tier_active_clients_rank: u32,
    /// Tier-scoped rank by new clients.
    pub tier_new_clients_rank: u32,
    /// Tier-scoped rank by traded volume.
    pub tier_volume_rank: u32,
}

impl From<&TierScopeRanks> for TierCellRanks {
    fn from(ranks: &TierScopeRanks) -> Self {
        Self {
            tier_partners_rank: ranks.partners_rank,
            tier_earnings_rank: ranks.earnings_rank,
            tier_revenue_rank: ranks.revenue_rank,
            tier_deposits_rank: ranks.deposits_rank,
            tier_active_clients_rank: ranks.active_clients_rank,
            tier_new_clients_rank: ranks.new_clients_rank,
            tier_volume_rank: ranks.volume_rank,
        }
    }
}

/// One (month, current tier) cell of the target's monthly breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierCell {
    /// Unique partners in the cell.
    pub count: usize,

    /// Summed earnings.
    pub earnings: Decimal,

    /// Summed revenue.
    pub revenue: Decimal,

    /// Summed deposits.
    pub deposits: Decimal,

    /// Summed active client headcount.
    pub active_clients: i64,

    /// Summed new clients.
    pub new_clients: i64,

    /// Summed traded volume.
    pub volume: Decimal,

    /// Whole-month cross-entity ranks (same for every tier of the month);
    /// absent in fast mode.
    #[serde(flatten)]
    pub month_ranks: Option<MonthRanks>,

    /// (month, tier) cross-entity ranks; absent in fast mode.
    #[serde(flatten)]
    pub tier_ranks: Option<TierCellRanks>,
}

impl TierCell {
    fn from_totals(totals: &GroupTotals) -> Self {
        Self {
            count: totals.partner_count,
            earnings: totals.total_earnings,
            revenue: totals.company_revenue,
            deposits: totals.total_deposits,
            active_clients: totals.active_clients,
            new_clients: totals.new_active_clients,
            volume: totals.volume_usd,
            month_ranks: None,
            tier_ranks: None,
        }
    }
}

/// The composite analytics report for one target entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityAnalytics {
    /// The target entity name (normalized).
    pub entity: String,

    /// The entity kind of this report.
    pub kind: EntityKind,

    /// All-time totals and summary ranks.
    pub summary: EntitySummary,

    /// Per-month, per-current-tier cells. Month keys iterate oldest
    /// first; `available_months` carries the display order.
    pub monthly_tier_data: BTreeMap<Month, BTreeMap<Tier, TierCell>>,

    /// Per-tier all-time ranks against the comparison universe.
    pub tier_entity_rankings: BTreeMap<Tier, TierScopeRanks>,

    /// Whole-month ranks, scope-first view of what the cells carry.
    pub monthly_rankings: BTreeMap<Month, MonthRanks>,

    /// (tier, month) ranks, scope-first view of what the cells carry.
    pub tier_monthly_rankings: BTreeMap<Tier, BTreeMap<Month, TierScopeRanks>>,

    /// Month labels with data for the target, most recent first.
    pub available_months: Vec<String>,
}

/// Composes the analytics components into per-request reports.
///
/// Borrowing the store keeps the orchestrator stateless: nothing is
/// cached between requests.
pub struct AnalyticsOrchestrator<'a> {
    store: &'a PartnerDataStore,
}

impl<'a> AnalyticsOrchestrator<'a> {
    /// Creates an orchestrator over a loaded store.
    #[must_use]
    pub fn new(store: &'a PartnerDataStore) -> Self {
        Self { store }
    }

    /// Dataset-wide overview statistics.
    pub fn overview(&self) -> AnalyticsResult<PartnerOverview> {
        self.store.ensure_loaded()?;
        Ok(partner_overview(self.store))
    }

    /// Dataset-wide tier breakdown with percentage fields.
    pub fn tier_breakdown(&self) -> AnalyticsResult<TierBreakdown> {
        self.store.ensure_loaded()?;
        Ok(tier_breakdown(self.store))
    }

    /// Tier progression report for one country or the whole dataset.
    pub fn progression(
        &self,
        scope: &ProgressionScope,
        filter: ProgressionFilter,
    ) -> AnalyticsResult<ProgressionReport> {
        let transitions = self.scoped_transitions(scope)?;
        Ok(monthly_progression(&transitions, filter))
    }

    /// Individual movements landing in one month, strongest first.
    pub fn movement_details(
        &self,
        scope: &ProgressionScope,
        month_label: &str,
        direction: MovementDirection,
        filter: ProgressionFilter,
    ) -> AnalyticsResult<Vec<TierTransition>> {
        let month = Month::parse_label(month_label)?;
        let transitions = self.scoped_transitions(scope)?;
        Ok(movement_details(&transitions, month, direction, filter))
    }

    /// Per-country movement breakdown for one month and direction.
    pub fn movement_by_country(
        &self,
        month_label: &str,
        direction: MovementDirection,
        filter: ProgressionFilter,
    ) -> AnalyticsResult<Vec<CountryMovement>> {
        let month = Month::parse_label(month_label)?;
        let transitions = self.scoped_transitions(&ProgressionScope::Global)?;
        Ok(movement_by_country(&transitions, month, direction, filter))
    }

    /// The composite analytics report for one target entity.
    ///
    /// Unknown entities produce a fully-formed zero-valued report with
    /// every rank defaulted to 1, never an error, so callers need no
    /// special case for "no data yet".
    pub fn entity_analytics(&self, request: &AnalyticsRequest) -> AnalyticsResult<EntityAnalytics> {
        self.store.ensure_loaded()?;
        let name = normalize_entity_name(&request.name);
        log::debug!(
            "entity analytics: kind={:?} name={name} rankings={}",
            request.kind,
            request.include_rankings
        );

        let groups = self.entity_groups(request.kind);
        let target_records: Vec<&PartnerMonthRecord> =
            groups.get(&name).cloned().unwrap_or_default();

        let target_rollups = rollup_partners(&target_records, self.store);
        let totals = entity_totals(&target_rollups);
        let cells_raw = group_by_month_tier(&target_records, self.store, false);
        let target_months: Vec<Month> = cells_raw.keys().copied().collect();
        let available_months: Vec<String> =
            target_months.iter().rev().map(Month::label).collect();

        let mut summary = EntitySummary {
            entity: name.clone(),
            total_partners: totals.partners,
            total_active_partners: totals.active_partners,
            total_company_revenue: totals.company_revenue,
            total_partner_earnings: totals.total_earnings,
            total_deposits: totals.total_deposits,
            total_active_clients: totals.active_clients,
            total_new_clients: totals.new_active_clients,
            ranks: SummaryRanks::default(),
        };

        let mut monthly_rankings = BTreeMap::new();
        let mut tier_entity_rankings = BTreeMap::new();
        let mut tier_monthly_rankings = BTreeMap::new();

        // A known entity with no records (a region nobody sells into yet)
        // still participates in every scope at value 0; only an entity
        // outside the comparison universe gets the defaulted ranks.
        if request.include_rankings && groups.contains_key(&name) {
            summary.ranks = self.summary_ranks(&groups, &name);
            monthly_rankings = self.monthly_ranks(&groups, &target_months, &name);
            if monthly_rankings.len() != target_months.len() {
                return Err(AnalyticsError::computation(
                    "monthly rank scopes do not cover the target's months",
                ));
            }
            tier_entity_rankings = self.tier_ranks(&groups, &name);
            tier_monthly_rankings = self.tier_month_ranks(&groups, &target_months, &name);
        }

        let mut monthly_tier_data: BTreeMap<Month, BTreeMap<Tier, TierCell>> = BTreeMap::new();
        for (month, tiers) in cells_raw {
            let mut row = BTreeMap::new();
            for (tier, cell_totals) in tiers {
                let mut cell = TierCell::from_totals(&cell_totals);
                cell.month_ranks = monthly_rankings.get(&month).cloned();
                cell.tier_ranks = tier_monthly_rankings
                    .get(&tier)
                    .and_then(|months: &BTreeMap<Month, TierScopeRanks>| months.get(&month))
                    .map(TierCellRanks::from);
                row.insert(tier, cell);
            }
            monthly_tier_data.insert(month, row);
        }

        Ok(EntityAnalytics {
            entity: name,
            kind: request.kind,
            summary,
            monthly_tier_data,
            tier_entity_rankings,
            monthly_rankings,
            tier_monthly_rankings,
            available_months,
        })
    }

    /// Groups every record under its entity of the given kind.
    ///
    /// Countries compare against the countries present in the data; rows
    /// with no country are skipped. Regions compare against the full
    /// static region list, so regions with no data participate with empty
    /// groups (and therefore zero values) instead of vanishing from the
    /// rank universe.
    fn entity_groups(&self, kind: EntityKind) -> BTreeMap<String, Vec<&'a PartnerMonthRecord>> {
        let mut groups: BTreeMap<String, Vec<&'a PartnerMonthRecord>> = BTreeMap::new();

        if kind == EntityKind::Region {
            for region in all_regions() {
                groups.insert(region.to_string(), Vec::new());
            }
        }

        for record in self.store.records() {
            let key = match kind {
                EntityKind::Country => record.country.clone(),
                EntityKind::Region => record.region.clone(),
            };
            if let Some(key) = key {
                groups.entry(key).or_default().push(record);
            }
        }

        groups
    }

    fn scoped_transitions(&self, scope: &ProgressionScope) -> AnalyticsResult<Vec<TierTransition>> {
        self.store.ensure_loaded()?;
        let records: Vec<&PartnerMonthRecord> = match scope {
            ProgressionScope::Global => self.store.records().iter().collect(),
            ProgressionScope::Country(name) => {
                let name = normalize_entity_name(name);
                self.store
                    .records()
                    .iter()
                    .filter(|r| r.country.as_deref() == Some(name.as_str()))
                    .collect()
            }
        };
        Ok(track_transitions(&records))
    }

    fn summary_ranks(
        &self,
        groups: &BTreeMap<String, Vec<&PartnerMonthRecord>>,
        target: &str,
    ) -> SummaryRanks {
        let entities: Vec<(String, EntityTotals)> = groups
            .iter()
            .map(|(name, records)| {
                let rollups = rollup_partners(records, self.store);
                (name.clone(), entity_totals(&rollups))
            })
            .collect();

        // Shared across every entity so averages cannot reshuffle ranks
        // between entities with different coverage.
        let months = Decimal::from(self.store.months().len());
        let target = &target.to_string();

        SummaryRanks {
            partners_rank: rank_of(
                &metric_ranks(&entities, |t| Decimal::from(t.partners)),
                target,
            ),
            active_partners_rank: rank_of(
                &metric_ranks(&entities, |t| Decimal::from(t.active_partners)),
                target,
            ),
            revenue_rank: rank_of(&metric_ranks(&entities, |t| t.company_revenue), target),
            earnings_rank: rank_of(&metric_ranks(&entities, |t| t.total_earnings), target),
            deposits_rank: rank_of(&metric_ranks(&entities, |t| t.total_deposits), target),
            clients_rank: rank_of(
                &metric_ranks(&entities, |t| Decimal::from(t.active_clients)),
                target,
            ),
            etr_rank: rank_of(&metric_ranks(&entities, EntityTotals::etr_ratio), target),
            etd_rank: rank_of(&metric_ranks(&entities, EntityTotals::etd_ratio), target),
            avg_monthly_revenue_rank: rank_of(
                &metric_ranks(&entities, |t| t.company_revenue / months),
                target,
            ),
            avg_monthly_earnings_rank: rank_of(
                &metric_ranks(&entities, |t| t.total_earnings / months),
                target,
            ),
            avg_monthly_deposits_rank: rank_of(
                &metric_ranks(&entities, |t| t.total_deposits / months),
                target,
            ),
            avg_monthly_new_clients_rank: rank_of(
                &metric_ranks(&entities, |t| Decimal::from(t.new_active_clients) / months),
                target,
            ),
        }
    }

    fn monthly_ranks(
        &self,
        groups: &BTreeMap<String, Vec<&PartnerMonthRecord>>,
        months: &[Month],
        target: &str,
    ) -> BTreeMap<Month, MonthRanks> {
        let target = &target.to_string();
        let mut out = BTreeMap::new();

        for &month in months {
            let entities: Vec<(String, GroupTotals)> = groups
                .iter()
                .map(|(name, records)| {
                    let subset: Vec<&PartnerMonthRecord> = records
                        .iter()
                        .copied()
                        .filter(|r| r.month == month)
                        .collect();
                    (name.clone(), aggregate_group(&subset))
                })
                .collect();

            out.insert(
                month,
                MonthRanks {
                    partners_rank: rank_of(
                        &metric_ranks(&entities, |t| Decimal::from(t.partner_count)),
                        target,
                    ),
                    earnings_rank: rank_of(
                        &metric_ranks(&entities, |t| t.total_earnings),
                        target,
                    ),
                    revenue_rank: rank_of(
                        &metric_ranks(&entities, |t| t.company_revenue),
                        target,
                    ),
                    deposits_rank: rank_of(
                        &metric_ranks(&entities, |t| t.total_deposits),
                        target,
                    ),
                    active_clients_rank: rank_of(
                        &metric_ranks(&entities, |t| Decimal::from(t.active_clients)),
                        target,
                    ),
                    new_clients_rank: rank_of(
                        &metric_ranks(&entities, |t| Decimal::from(t.new_active_clients)),
                        target,
                    ),
                    volume_rank: rank_of(&metric_ranks(&entities, |t| t.volume_usd), target),
                },
            );
        }

        out
    }

    fn tier_ranks(
        &self,
        groups: &BTreeMap<String, Vec<&PartnerMonthRecord>>,
        target: &str,
    ) -> BTreeMap<Tier, TierScopeRanks> {
        let rollups_by_entity: Vec<(String, Vec<PartnerRollup>)> = groups
            .iter()
            .map(|(name, records)| (name.clone(), rollup_partners(records, self.store)))
            .collect();

        let mut out = BTreeMap::new();
        for tier in Tier::ALL {
            let entities: Vec<(String, EntityTotals)> = rollups_by_entity
                .iter()
                .map(|(name, rollups)| {
                    let tier_rollups: Vec<PartnerRollup> = rollups
                        .iter()
                        .filter(|r| r.tier == tier)
                        .cloned()
                        .collect();
                    (name.clone(), entity_totals(&tier_rollups))
                })
                .collect();

            out.insert(tier, tier_scope_ranks_over_totals(&entities, target));
        }
        out
    }

    fn tier_month_ranks(
        &self,
        groups: &BTreeMap<String, Vec<&PartnerMonthRecord>>,
        months: &[Month],
        target: &str,
    ) -> BTreeMap<Tier, BTreeMap<Month, TierScopeRanks>> {
        let mut out: BTreeMap<Tier, BTreeMap<Month, TierScopeRanks>> = BTreeMap::new();

        for tier in Tier::ALL {
            let mut per_month = BTreeMap::new();
            for &month in months {
                let entities: Vec<(String, GroupTotals)> = groups
                    .iter()
                    .map(|(name, records)| {
                        let subset: Vec<&PartnerMonthRecord> = records
                            .iter()
                            .copied()
                            .filter(|r| {
                                r.month == month
                                    && self
                                        .store
                                        .current_tier(&r.partner_id)
                                        .unwrap_or(r.tier)
                                        == tier
                            })
                            .collect();
                        (name.clone(), aggregate_group(&subset))
                    })
                    .collect();

                per_month.insert(month, tier_scope_ranks_over_groups(&entities, target));
            }
            out.insert(tier, per_month);
        }

        out
    }
}

/// Dense ranks for one metric extracted from per-entity values.
fn metric_ranks<T, F>(entities: &[(String, T)], metric: F) -> HashMap<String, u32>
where
    F: Fn(&T) -> Decimal,
{
    let values: Vec<(String, Decimal)> = entities
        .iter()
        .map(|(name, value)| (name.clone(), metric(value)))
        .collect();
    dense_rank(&values)
}

fn tier_scope_ranks_over_totals(
    entities: &[(String, EntityTotals)],
    target: &str,
) -> TierScopeRanks {
    let target = &target.to_string();
    TierScopeRanks {
        partners_rank: rank_of(
            &metric_ranks(entities, |t| Decimal::from(t.partners)),
            target,
        ),
        earnings_rank: rank_of(&metric_ranks(entities, |t| t.total_earnings), target),
        revenue_rank: rank_of(&metric_ranks(entities, |t| t.company_revenue), target),
        deposits_rank: rank_of(&metric_ranks(entities, |t| t.total_deposits), target),
        active_clients_rank: rank_of(
            &metric_ranks(entities, |t| Decimal::from(t.active_clients)),
            target,
        ),
        new_clients_rank: rank_of(
            &metric_ranks(entities, |t| Decimal::from(t.new_active_clients)),
            target,
        ),
        volume_rank: rank_of(&metric_ranks(entities, |t| t.volume_usd), target),
        etr_rank: rank_of(&metric_ranks(entities, EntityTotals::etr_ratio), target),
        etd_rank: rank_of(&metric_ranks(entities, EntityTotals::etd_ratio), target),
    }
}

fn tier_scope_ranks_over_groups(
    entities: &[(String, GroupTotals)],
    target: &str,
) -> TierScopeRanks {
    let target = &target.to_string();
    TierScopeRanks {
        partners_rank: rank_of(
            &metric_ranks(entities, |t| Decimal::from(t.partner_count)),
            target,
        ),
        earnings_rank: rank_of(&metric_ranks(entities, |t| t.total_earnings), target),
        revenue_rank: rank_of(&metric_ranks(entities, |t| t.company_revenue), target),
        deposits_rank: rank_of(&metric_ranks(entities, |t| t.total_deposits), target),
        active_clients_rank: rank_of(
            &metric_ranks(entities, |t| Decimal::from(t.active_clients)),
            target,
        ),
        new_clients_rank: rank_of(
            &metric_ranks(entities, |t| Decimal::from(t.new_active_clients)),
            target,
        ),
        volume_rank: rank_of(&metric_ranks(entities, |t| t.volume_usd), target),
        etr_rank: rank_of(&metric_ranks(entities, GroupTotals::etr_ratio), target),
        etd_rank: rank_of(&metric_ranks(entities, GroupTotals::etd_ratio), target),
    }
}
