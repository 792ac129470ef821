//! Dataset-wide partner overview statistics.
//!
//! Financial totals and country rankings here cover active partners only;
//! the tier distribution keeps Inactive visible so the denominator of
//! "active vs. total" stays inspectable.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pdash_core::store::PartnerDataStore;
use pdash_core::types::{PartnerMonthRecord, Tier};

use crate::rollup::{rollup_partners, PartnerRollup};

/// How many countries the overview lists.
const TOP_COUNTRY_LIMIT: usize = 5;

/// A country with its active partner count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCount {
    /// The country.
    pub country: String,

    /// Active partners whose latest country this is.
    pub partners: usize,
}

/// A tier with its partner count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCount {
    /// The tier.
    pub tier: Tier,

    /// Partners currently in this tier.
    pub partners: usize,
}

/// Dataset-wide overview statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerOverview {
    /// Partners whose current tier is not Inactive.
    pub active_partners: usize,

    /// All partners, Inactive included.
    pub total_partners: usize,

    /// Summed earnings of active partners.
    pub total_revenue: Decimal,

    /// Summed deposits of active partners.
    pub total_deposits: Decimal,

    /// Active client headcount of active partners (last values, summed).
    pub total_active_clients: i64,

    /// Summed new client activations of active partners.
    pub total_new_clients: i64,

    /// Average earnings per active partner; 0 when there are none.
    pub avg_earnings_per_partner: Decimal,

    /// Top countries by active partner count, largest first.
    pub top_countries: Vec<CountryCount>,

    /// Partner counts per tier in display order, Inactive included;
    /// only tiers with partners appear.
    pub tier_distribution: Vec<TierCount>,

    /// Active partners flagged as API developers.
    pub api_developers: usize,
}

/// Computes the overview over the whole dataset.
#[must_use]
pub fn partner_overview(store: &PartnerDataStore) -> PartnerOverview {
    let refs: Vec<&PartnerMonthRecord> = store.records().iter().collect();
    let rollups = rollup_partners(&refs, store);
    let active: Vec<&PartnerRollup> = rollups.iter().filter(|r| r.tier.is_active()).collect();

    let mut total_revenue = Decimal::ZERO;
    let mut total_deposits = Decimal::ZERO;
    let mut total_active_clients = 0i64;
    let mut total_new_clients = 0i64;
    let mut api_developers = 0usize;
    let mut country_counts: HashMap<&str, usize> = HashMap::new();

    for rollup in &active {
        total_revenue += rollup.total_earnings;
        total_deposits += rollup.total_deposits;
        total_active_clients += rollup.active_clients;
        total_new_clients += rollup.new_active_clients;
        if rollup.is_app_dev {
            api_developers += 1;
        }
        if let Some(country) = rollup.country.as_deref() {
            *country_counts.entry(country).or_insert(0) += 1;
        }
    }

    let mut top_countries: Vec<CountryCount> = country_counts
        .into_iter()
        .map(|(country, partners)| CountryCount {
            country: country.to_string(),
            partners,
        })
        .collect();
    top_countries.sort_by(|a, b| b.partners.cmp(&a.partners).then(a.country.cmp(&b.country)));
    top_countries.truncate(TOP_COUNTRY_LIMIT);

    let mut tier_counts: HashMap<Tier, usize> = HashMap::new();
    for rollup in &rollups {
        *tier_counts.entry(rollup.tier).or_insert(0) += 1;
    }
    let tier_distribution: Vec<TierCount> = Tier::ALL
        .into_iter()
        .filter_map(|tier| {
            tier_counts.get(&tier).map(|&partners| TierCount {
                tier,
                partners,
            })
        })
        .collect();

    let avg_earnings_per_partner = if active.is_empty() {
        Decimal::ZERO
    } else {
        total_revenue / Decimal::from(active.len())
    };

    PartnerOverview {
        active_partners: active.len(),
        total_partners: rollups.len(),
        total_revenue,
        total_deposits,
        total_active_clients,
        total_new_clients,
        avg_earnings_per_partner,
        top_countries,
        tier_distribution,
        api_developers,
    }
}
