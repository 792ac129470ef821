//! Integration tests for pdash-analytics.
//!
//! These tests verify end-to-end behavior over small but realistic
//! datasets: classification at load, aggregation under current-tier
//! grouping, and full-report ranking semantics.

use pdash_analytics::prelude::*;
use pdash_core::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// =============================================================================
// TEST FIXTURES
// =============================================================================

fn month(m: u32) -> Month {
    Month::from_ymd(2025, m).unwrap()
}

fn record(partner: &str, country: &str, m: u32, earnings: Decimal) -> PartnerMonthRecord {
    PartnerMonthRecord::new(partner, month(m))
        .with_country(country)
        .with_earnings(earnings)
}

/// Two countries over three months: Kenya has one Gold partner earning
/// 2000/mo, Ghana one Silver partner earning 200/mo.
fn two_country_store() -> PartnerDataStore {
    let mut records = Vec::new();
    for m in 1..=3 {
        records.push(
            record("KE1", "Kenya", m, dec!(2000))
                .with_revenue(dec!(4000))
                .with_deposits(dec!(10000))
                .with_active_clients(20)
                .with_new_clients(2)
                .with_volume(dec!(50000)),
        );
        records.push(
            record("GH1", "Ghana", m, dec!(200))
                .with_revenue(dec!(1000))
                .with_deposits(dec!(2000))
                .with_active_clients(5)
                .with_new_clients(1)
                .with_volume(dec!(8000)),
        );
    }
    PartnerDataStore::load(records)
}

// =============================================================================
// END-TO-END SCENARIOS
// =============================================================================

#[test]
fn gold_scope_ranks_include_countries_without_gold_partners() {
    // Country A: Gold partner earning 2000/mo for 3 months. Country B:
    // Silver partner earning 200/mo. Ranking earnings for tier=Gold must
    // place A first and keep B in the universe at value 0, rank 2.
    let store = two_country_store();
    let orchestrator = AnalyticsOrchestrator::new(&store);

    let kenya = orchestrator
        .entity_analytics(&AnalyticsRequest::country("Kenya"))
        .unwrap();
    let ghana = orchestrator
        .entity_analytics(&AnalyticsRequest::country("Ghana"))
        .unwrap();

    assert_eq!(kenya.tier_entity_rankings[&Tier::Gold].earnings_rank, 1);
    assert_eq!(ghana.tier_entity_rankings[&Tier::Gold].earnings_rank, 2);
}

#[test]
fn current_tier_grouping_buckets_history_under_latest_tier() {
    // Bronze(Jan), Gold(Feb), Gold(Mar): all three months' earnings must
    // appear under Gold, none under Bronze.
    let store = PartnerDataStore::load(vec![
        record("P1", "Kenya", 1, dec!(50)),
        record("P1", "Kenya", 2, dec!(2000)),
        record("P1", "Kenya", 3, dec!(2000)),
    ]);
    let orchestrator = AnalyticsOrchestrator::new(&store);
    let report = orchestrator
        .entity_analytics(&AnalyticsRequest::country("Kenya"))
        .unwrap();

    let mut gold_earnings = Decimal::ZERO;
    for cells in report.monthly_tier_data.values() {
        assert!(!cells.contains_key(&Tier::Bronze));
        gold_earnings += cells[&Tier::Gold].earnings;
    }
    assert_eq!(gold_earnings, dec!(4050));
}

#[test]
fn inactive_override_applies_to_transient_swings() {
    // +300, -300 nets to zero: every month Inactive even though the first
    // month alone would classify Silver.
    let store = PartnerDataStore::load(vec![
        record("P1", "Kenya", 1, dec!(300)),
        record("P1", "Kenya", 2, dec!(-300)),
    ]);

    for r in store.records() {
        assert_eq!(r.tier, Tier::Inactive);
    }

    let orchestrator = AnalyticsOrchestrator::new(&store);
    let overview = orchestrator.overview().unwrap();
    assert_eq!(overview.active_partners, 0);
    assert_eq!(overview.total_partners, 1);
}

#[test]
fn full_report_shape_matches_contract() {
    let store = two_country_store();
    let orchestrator = AnalyticsOrchestrator::new(&store);
    let report = orchestrator
        .entity_analytics(&AnalyticsRequest::country("Kenya"))
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();

    // Month map keys use the "Mon YYYY" label format.
    let monthly = json["monthly_tier_data"].as_object().unwrap();
    assert!(monthly.contains_key("Jan 2025"));
    let cell = &monthly["Jan 2025"]["Gold"];
    for field in [
        "count",
        "earnings",
        "revenue",
        "deposits",
        "active_clients",
        "new_clients",
        "volume",
        // Flattened rank groups live beside the metrics.
        "earnings_rank",
        "tier_earnings_rank",
    ] {
        assert!(!cell[field].is_null(), "missing cell field {field}");
    }

    // Summary carries the flattened rank fields.
    let summary = json["summary"].as_object().unwrap();
    assert!(summary.contains_key("earnings_rank"));
    assert!(summary.contains_key("avg_monthly_new_clients_rank"));

    // Tier map keys are tier labels.
    assert!(json["tier_entity_rankings"].as_object().unwrap().contains_key("Gold"));

    assert_eq!(
        report.available_months,
        vec!["Mar 2025", "Feb 2025", "Jan 2025"]
    );
}

#[test]
fn fast_mode_defaults_ranks_without_dropping_data() {
    let store = two_country_store();
    let orchestrator = AnalyticsOrchestrator::new(&store);

    let full = orchestrator
        .entity_analytics(&AnalyticsRequest::country("Kenya"))
        .unwrap();
    let fast = orchestrator
        .entity_analytics(&AnalyticsRequest::country("Kenya").without_rankings())
        .unwrap();

    assert_eq!(
        full.summary.total_partner_earnings,
        fast.summary.total_partner_earnings
    );
    assert_eq!(full.available_months, fast.available_months);
    assert_eq!(fast.summary.ranks, SummaryRanks::default());
    assert!(fast.monthly_rankings.is_empty());
    assert!(fast.tier_monthly_rankings.is_empty());
}

#[test]
fn unknown_region_gets_zero_report_not_error() {
    let store = two_country_store();
    let orchestrator = AnalyticsOrchestrator::new(&store);

    let report = orchestrator
        .entity_analytics(&AnalyticsRequest::region("Narnia"))
        .unwrap();
    assert_eq!(report.summary.total_partners, 0);
    assert_eq!(report.summary.ranks, SummaryRanks::default());
    assert!(report.monthly_tier_data.is_empty());
}

#[test]
fn region_and_country_views_agree_on_single_country_region() {
    // "LATAM - Colombia" contains exactly Colombia, so the region totals
    // must equal the country totals.
    let store = PartnerDataStore::load(vec![
        record("CO1", "Colombia", 1, dec!(700)).with_deposits(dec!(1500)),
        record("CO1", "Colombia", 2, dec!(900)).with_deposits(dec!(500)),
        record("KE1", "Kenya", 1, dec!(2000)),
    ]);
    let orchestrator = AnalyticsOrchestrator::new(&store);

    let country = orchestrator
        .entity_analytics(&AnalyticsRequest::country("Colombia"))
        .unwrap();
    let region = orchestrator
        .entity_analytics(&AnalyticsRequest::region("LATAM - Colombia"))
        .unwrap();

    assert_eq!(
        country.summary.total_partner_earnings,
        region.summary.total_partner_earnings
    );
    assert_eq!(country.summary.total_deposits, region.summary.total_deposits);
    assert_eq!(country.available_months, region.available_months);
}

#[test]
fn monthly_average_ranks_follow_totals_with_shared_denominator() {
    let store = two_country_store();
    let orchestrator = AnalyticsOrchestrator::new(&store);
    let report = orchestrator
        .entity_analytics(&AnalyticsRequest::country("Ghana"))
        .unwrap();

    assert_eq!(report.summary.ranks.earnings_rank, 2);
    assert_eq!(report.summary.ranks.avg_monthly_earnings_rank, 2);
    assert_eq!(report.summary.ranks.deposits_rank, 2);
    assert_eq!(report.summary.ranks.avg_monthly_deposits_rank, 2);
}

#[test]
fn etr_rank_recovers_from_negative_revenue() {
    // Kenya's revenue is negative, so its ETR is defined as 0 and Ghana
    // wins the ETR scope.
    let store = PartnerDataStore::load(vec![
        record("KE1", "Kenya", 1, dec!(2000)).with_revenue(dec!(-100)),
        record("GH1", "Ghana", 1, dec!(200)).with_revenue(dec!(1000)),
    ]);
    let orchestrator = AnalyticsOrchestrator::new(&store);

    let kenya = orchestrator
        .entity_analytics(&AnalyticsRequest::country("Kenya"))
        .unwrap();
    let ghana = orchestrator
        .entity_analytics(&AnalyticsRequest::country("Ghana"))
        .unwrap();

    assert_eq!(ghana.summary.ranks.etr_rank, 1);
    assert_eq!(kenya.summary.ranks.etr_rank, 2);
    // Revenue itself still ranks by raw value.
    assert_eq!(ghana.summary.ranks.revenue_rank, 1);
    assert_eq!(kenya.summary.ranks.revenue_rank, 2);
}

#[test]
fn progression_end_to_end() {
    // P1 climbs Bronze->Silver->Gold, P2 drops Gold->Inactive in Feb.
    let store = PartnerDataStore::load(vec![
        record("P1", "Kenya", 1, dec!(50)),
        record("P1", "Kenya", 2, dec!(200)),
        record("P1", "Kenya", 3, dec!(2000)),
        record("P2", "Ghana", 1, dec!(1500)),
        record("P2", "Ghana", 2, Decimal::ZERO),
        record("P2", "Ghana", 3, Decimal::ZERO),
    ]);
    let orchestrator = AnalyticsOrchestrator::new(&store);

    let report = orchestrator
        .progression(&ProgressionScope::Global, ProgressionFilter::default())
        .unwrap();

    // Feb: +1 (P1) and -6 (P2) = -5; Mar: +2 (P1).
    assert_eq!(report.monthly.len(), 2);
    assert_eq!(report.monthly[0].month.label(), "Mar 2025");
    assert_eq!(report.monthly[0].weighted_net_movement, 2);
    assert_eq!(report.monthly[1].weighted_net_movement, -5);
    assert_eq!(report.summary.weighted_net_movement, -3);

    let details = orchestrator
        .movement_details(
            &ProgressionScope::Global,
            "Feb 2025",
            MovementDirection::Negative,
            ProgressionFilter::default(),
        )
        .unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].partner_id, "P2");
    assert_eq!(details[0].score, -6);

    let countries = orchestrator
        .movement_by_country("Feb 2025", MovementDirection::Positive, ProgressionFilter::default())
        .unwrap();
    assert_eq!(countries.len(), 1);
    assert_eq!(countries[0].country, "Kenya");
    assert_eq!(countries[0].rank, 1);
}

#[test]
fn tier_breakdown_percentages_exclude_inactive() {
    let store = PartnerDataStore::load(vec![
        record("P1", "Kenya", 1, dec!(6000)),
        record("P2", "Kenya", 1, dec!(2000)),
        record("P3", "Ghana", 1, Decimal::ZERO).with_deposits(dec!(400)),
    ]);
    let orchestrator = AnalyticsOrchestrator::new(&store);
    let breakdown = orchestrator.tier_breakdown().unwrap();

    let platinum = breakdown
        .tiers
        .iter()
        .find(|t| t.tier == Tier::Platinum)
        .unwrap();
    assert_eq!(platinum.earnings_percentage, dec!(75));

    let inactive = breakdown
        .tiers
        .iter()
        .find(|t| t.tier == Tier::Inactive)
        .unwrap();
    assert_eq!(inactive.total_deposits, dec!(400));
    assert_eq!(inactive.deposits_percentage, Decimal::ZERO);
}

#[test]
fn duplicate_ingestion_cannot_inflate_partner_counts() {
    // The same row ingested twice: unique-count semantics hold the
    // partner count at 1 even though sums double.
    let store = PartnerDataStore::load(vec![
        record("P1", "Kenya", 1, dec!(500)),
        record("P1", "Kenya", 1, dec!(500)),
        record("GH1", "Ghana", 1, dec!(100)),
    ]);
    let orchestrator = AnalyticsOrchestrator::new(&store);
    let report = orchestrator
        .entity_analytics(&AnalyticsRequest::country("Kenya"))
        .unwrap();

    assert_eq!(report.summary.total_partners, 1);
    let jan = &report.monthly_tier_data[&month(1)];
    let cell = jan.values().next().unwrap();
    assert_eq!(cell.count, 1);
    assert_eq!(cell.earnings, dec!(1000));
}
