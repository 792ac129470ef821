//! The immutable-after-load partner dataset.
//!
//! [`PartnerDataStore`] owns the full partner-month table for the life of
//! the process. Loading performs the one-time backfill (per-month tier
//! classification, the cumulative-zero Inactive override, and region
//! rederivation) and precomputes the lookups every request needs
//! (months, countries, current tier per partner). After that the store is
//! read-only and is injected into the analytics engine rather than
//! accessed as ambient global state.

use std::collections::{BTreeSet, HashMap};

use rust_decimal::Decimal;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::regions::region_for_country;
use crate::types::{Month, PartnerMonthRecord, Tier};

/// The loaded partner-month dataset with derived indexes.
#[derive(Debug, Clone, Default)]
pub struct PartnerDataStore {
    records: Vec<PartnerMonthRecord>,
    months: Vec<Month>,
    countries: Vec<String>,
    current_tiers: HashMap<String, Tier>,
}

impl PartnerDataStore {
    /// Loads the dataset, applying the tier backfill and building derived
    /// indexes.
    ///
    /// Each record's tier is classified from that month's earnings; then
    /// partners whose earnings sum to exactly zero across every month are
    /// forced to Inactive on all records (transient swings that net to
    /// zero count as never having been active). Regions are rederived
    /// from the static country table, overriding whatever the input rows
    /// carried.
    #[must_use]
    pub fn load(mut records: Vec<PartnerMonthRecord>) -> Self {
        // Deterministic per-partner chronological order for all
        // downstream walks and last-value reductions.
        records.sort_by(|a, b| {
            a.partner_id
                .cmp(&b.partner_id)
                .then(a.month.cmp(&b.month))
        });

        let mut cumulative: HashMap<String, Decimal> = HashMap::new();
        for record in &records {
            *cumulative
                .entry(record.partner_id.clone())
                .or_insert(Decimal::ZERO) += record.total_earnings;
        }

        for record in &mut records {
            record.tier = Tier::classify(record.total_earnings);
            if cumulative
                .get(&record.partner_id)
                .is_some_and(Decimal::is_zero)
            {
                record.tier = Tier::Inactive;
            }
            record.region = record
                .country
                .as_deref()
                .and_then(region_for_country)
                .map(str::to_string);
        }

        let months: Vec<Month> = records
            .iter()
            .map(|r| r.month)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let countries: Vec<String> = records
            .iter()
            .filter_map(|r| r.country.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        // Records are month-ascending per partner, so the last write per
        // partner is the latest month's tier.
        let mut current_tiers = HashMap::new();
        for record in &records {
            current_tiers.insert(record.partner_id.clone(), record.tier);
        }

        let inactive = current_tiers.values().filter(|t| !t.is_active()).count();
        log::info!(
            "loaded {} partner-month records: {} partners ({} inactive), {} countries, {} months",
            records.len(),
            current_tiers.len(),
            inactive,
            countries.len(),
            months.len()
        );

        Self {
            records,
            months,
            countries,
            current_tiers,
        }
    }

    /// All records, sorted by (partner, month).
    #[must_use]
    pub fn records(&self) -> &[PartnerMonthRecord] {
        &self.records
    }

    /// Returns true if no records are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of partner-month records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Distinct months, oldest first.
    #[must_use]
    pub fn months(&self) -> &[Month] {
        &self.months
    }

    /// Distinct months, most recent first (the display order).
    #[must_use]
    pub fn months_desc(&self) -> Vec<Month> {
        self.months.iter().rev().copied().collect()
    }

    /// Distinct countries present in the data, sorted. Rows with no
    /// country are not represented here.
    #[must_use]
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Number of distinct partners.
    #[must_use]
    pub fn partner_count(&self) -> usize {
        self.current_tiers.len()
    }

    /// A partner's current tier: the tier of their most recent month.
    ///
    /// This is the tier used for all cross-month grouping: a partner's
    /// entire history is bucketed under their latest tier.
    #[must_use]
    pub fn current_tier(&self, partner_id: &str) -> Option<Tier> {
        self.current_tiers.get(partner_id).copied()
    }

    /// Fails fast with [`AnalyticsError::NoDataAvailable`] on an empty
    /// store.
    pub fn ensure_loaded(&self) -> AnalyticsResult<()> {
        if self.is_empty() {
            Err(AnalyticsError::NoDataAvailable)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn month(m: u32) -> Month {
        Month::from_ymd(2025, m).unwrap()
    }

    fn record(partner: &str, m: u32, earnings: Decimal) -> PartnerMonthRecord {
        PartnerMonthRecord::new(partner, month(m))
            .with_country("Kenya")
            .with_earnings(earnings)
    }

    #[test]
    fn test_load_classifies_each_month() {
        let store = PartnerDataStore::load(vec![
            record("P1", 1, dec!(50)),
            record("P1", 2, dec!(2000)),
        ]);

        let tiers: Vec<Tier> = store.records().iter().map(|r| r.tier).collect();
        assert_eq!(tiers, vec![Tier::Bronze, Tier::Gold]);
        assert_eq!(store.current_tier("P1"), Some(Tier::Gold));
    }

    #[test]
    fn test_cumulative_zero_override() {
        // Swings that net to exactly zero: every month becomes Inactive.
        let store = PartnerDataStore::load(vec![
            record("P1", 1, dec!(500)),
            record("P1", 2, dec!(-500)),
            record("P2", 1, dec!(500)),
        ]);

        for r in store.records().iter().filter(|r| r.partner_id == "P1") {
            assert_eq!(r.tier, Tier::Inactive);
        }
        assert_eq!(store.current_tier("P1"), Some(Tier::Inactive));
        assert_eq!(store.current_tier("P2"), Some(Tier::Silver));
    }

    #[test]
    fn test_nonzero_cumulative_keeps_monthly_tiers() {
        let store = PartnerDataStore::load(vec![
            record("P1", 1, dec!(500)),
            record("P1", 2, dec!(-499)),
        ]);

        let tiers: Vec<Tier> = store.records().iter().map(|r| r.tier).collect();
        assert_eq!(tiers, vec![Tier::Silver, Tier::Inactive]);
    }

    #[test]
    fn test_region_rederived_from_country() {
        let store = PartnerDataStore::load(vec![record("P1", 1, dec!(10))]);
        assert_eq!(
            store.records()[0].region.as_deref(),
            Some("Africa EN (Eastern)")
        );
    }

    #[test]
    fn test_derived_indexes() {
        let store = PartnerDataStore::load(vec![
            record("P1", 3, dec!(10)),
            record("P1", 1, dec!(10)),
            record("P2", 2, dec!(10)).with_country("Ghana"),
        ]);

        assert_eq!(store.months(), &[month(1), month(2), month(3)]);
        assert_eq!(store.months_desc(), vec![month(3), month(2), month(1)]);
        assert_eq!(store.countries(), &["Ghana".to_string(), "Kenya".to_string()]);
        assert_eq!(store.partner_count(), 2);
    }

    #[test]
    fn test_ensure_loaded() {
        let empty = PartnerDataStore::default();
        assert_eq!(
            empty.ensure_loaded(),
            Err(AnalyticsError::NoDataAvailable)
        );

        let store = PartnerDataStore::load(vec![record("P1", 1, dec!(10))]);
        assert!(store.ensure_loaded().is_ok());
    }
}
