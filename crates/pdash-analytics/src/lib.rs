//! # PDash Analytics
//!
//! The tier classification and multi-dimensional ranking engine for
//! partner performance data.
//!
//! This crate consolidates the calculation logic of PDash:
//!
//! - **Ranking**: dense cross-entity ranks (ties share a rank, no gaps)
//!   computed independently per (metric, scope) pair
//! - **Aggregation**: per-partner rollups and grouped reducers over
//!   monthly, tier, and (month, tier) keys
//! - **Tiers**: the tier breakdown with active-only percentage fields
//! - **Progression**: month-over-month tier movement scoring from the
//!   fixed transition table
//! - **Orchestration**: per-request report composition for one target
//!   country or region against its full comparison universe
//!
//! ## Architecture
//!
//! `pdash-analytics` depends on `pdash-core` for types and the data
//! store, but `pdash-core` does NOT depend on this crate. Every function
//! here is pure over the injected store: no I/O, no caching, each request
//! recomputed from scratch.
//!
//! ## Usage
//!
//! ```rust
//! use pdash_analytics::prelude::*;
//! use pdash_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let store = PartnerDataStore::load(vec![
//!     PartnerMonthRecord::new("P1", Month::from_ymd(2025, 7).unwrap())
//!         .with_country("Kenya")
//!         .with_earnings(dec!(2000)),
//! ]);
//!
//! let orchestrator = AnalyticsOrchestrator::new(&store);
//! let report = orchestrator
//!     .entity_analytics(&AnalyticsRequest::country("Kenya"))?;
//! assert_eq!(report.summary.ranks.earnings_rank, 1);
//! # Ok::<(), AnalyticsError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod orchestrator;
pub mod overview;
pub mod progression;
pub mod rank;
pub mod rollup;
pub mod tiers;

// Re-export the shared error type
pub use pdash_core::error::{AnalyticsError, AnalyticsResult};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use pdash_analytics::prelude::*;
/// ```
pub mod prelude {
    pub use crate::orchestrator::{
        AnalyticsOrchestrator, AnalyticsRequest, EntityAnalytics, EntitySummary, MonthRanks,
        ProgressionScope, SummaryRanks, TierCell, TierCellRanks, TierScopeRanks,
    };
    pub use crate::overview::{partner_overview, CountryCount, PartnerOverview, TierCount};
    pub use crate::progression::{
        monthly_progression, movement_by_country, movement_details, track_transitions,
        transition_score, CountryMovement, MonthlyMovement, MovementDirection, ProgressionFilter,
        ProgressionReport, ProgressionSummary, TierTransition,
    };
    pub use crate::rank::{dense_rank, dense_rank_ascending, rank_of, ratio_pct};
    pub use crate::rollup::{
        aggregate_group, entity_totals, group_by_month, group_by_month_tier, rollup_partners,
        rollups_by_tier, EntityTotals, GroupTotals, PartnerRollup,
    };
    pub use crate::tiers::{tier_breakdown, TierBreakdown, TierBreakdownTotals, TierSummary};

    pub use pdash_core::error::{AnalyticsError, AnalyticsResult};
}
