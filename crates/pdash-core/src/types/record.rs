//! The partner-month record, the single input row type of the system.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Month, Tier};

/// One row per (partner, month): a partner's activity in one calendar
/// month.
///
/// Records arrive already cleaned (numeric coercion done, missing metrics
/// zero-filled) and are immutable after the store's one-time tier
/// backfill. All metric fields except `active_clients` are monthly flows
/// and safe to sum across months; `active_clients` is a point-in-time
/// headcount with last-known-value semantics across months (it still sums
/// across partners within one month).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerMonthRecord {
    /// Stable partner identifier.
    pub partner_id: String,

    /// The calendar month this row describes.
    pub month: Month,

    /// Partner's country, when known.
    pub country: Option<String>,

    /// Region, a pure function of `country`; rederived at load.
    pub region: Option<String>,

    /// Partner commission for the month.
    pub total_earnings: Decimal,

    /// Company revenue attributable to the partner. May be negative (a
    /// loss for the company).
    pub company_revenue: Decimal,

    /// Client deposits for the month.
    pub total_deposits: Decimal,

    /// Point-in-time active client headcount. Not additive across months.
    pub active_clients: i64,

    /// Clients newly activated this month. Additive across months.
    pub new_active_clients: i64,

    /// Traded volume in USD.
    pub volume_usd: Decimal,

    /// Whether the partner integrates via the developer API.
    pub is_app_dev: bool,

    /// Performance tier. Defaults to Bronze pre-classification and is
    /// rewritten by the store's backfill.
    pub tier: Tier,
}

impl PartnerMonthRecord {
    /// Creates a record with zeroed metrics for the given partner and
    /// month.
    #[must_use]
    pub fn new(partner_id: impl Into<String>, month: Month) -> Self {
        Self {
            partner_id: partner_id.into(),
            month,
            country: None,
            region: None,
            total_earnings: Decimal::ZERO,
            company_revenue: Decimal::ZERO,
            total_deposits: Decimal::ZERO,
            active_clients: 0,
            new_active_clients: 0,
            volume_usd: Decimal::ZERO,
            is_app_dev: false,
            tier: Tier::default(),
        }
    }

    /// Sets the country.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Sets monthly earnings.
    #[must_use]
    pub fn with_earnings(mut self, earnings: Decimal) -> Self {
        self.total_earnings = earnings;
        self
    }

    /// Sets monthly company revenue.
    #[must_use]
    pub fn with_revenue(mut self, revenue: Decimal) -> Self {
        self.company_revenue = revenue;
        self
    }

    /// Sets monthly deposits.
    #[must_use]
    pub fn with_deposits(mut self, deposits: Decimal) -> Self {
        self.total_deposits = deposits;
        self
    }

    /// Sets the active client headcount.
    #[must_use]
    pub fn with_active_clients(mut self, clients: i64) -> Self {
        self.active_clients = clients;
        self
    }

    /// Sets the new active client count.
    #[must_use]
    pub fn with_new_clients(mut self, clients: i64) -> Self {
        self.new_active_clients = clients;
        self
    }

    /// Sets the traded volume.
    #[must_use]
    pub fn with_volume(mut self, volume: Decimal) -> Self {
        self.volume_usd = volume;
        self
    }

    /// Marks the partner as an API developer.
    #[must_use]
    pub fn with_app_dev(mut self, is_app_dev: bool) -> Self {
        self.is_app_dev = is_app_dev;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_record_defaults() {
        let month = Month::from_ymd(2025, 7).unwrap();
        let record = PartnerMonthRecord::new("P001", month);

        assert_eq!(record.partner_id, "P001");
        assert_eq!(record.tier, Tier::Bronze);
        assert!(record.country.is_none());
        assert!(record.total_earnings.is_zero());
        assert!(!record.is_app_dev);
    }

    #[test]
    fn test_builder_setters() {
        let month = Month::from_ymd(2025, 7).unwrap();
        let record = PartnerMonthRecord::new("P001", month)
            .with_country("Kenya")
            .with_earnings(dec!(1250.50))
            .with_revenue(dec!(-30))
            .with_active_clients(12)
            .with_app_dev(true);

        assert_eq!(record.country.as_deref(), Some("Kenya"));
        assert_eq!(record.total_earnings, dec!(1250.50));
        assert_eq!(record.company_revenue, dec!(-30));
        assert_eq!(record.active_clients, 12);
        assert!(record.is_app_dev);
    }
}
