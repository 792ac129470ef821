//! # PDash Core
//!
//! Core types and the data store for the PDash partner analytics library.
//!
//! This crate provides the foundational building blocks used throughout
//! PDash:
//!
//! - **Types**: the `Month` aggregation grain, the `Tier` scale, and the
//!   `PartnerMonthRecord` input row
//! - **Regions**: the static region/country mapping and entity resolution
//! - **Store**: the immutable-after-load `PartnerDataStore`, which applies
//!   the one-time tier backfill and is injected into the analytics engine
//!
//! ## Design Philosophy
//!
//! - **Explicit ownership**: the dataset is loaded once into a store that
//!   is passed around, never reached for as global state
//! - **One rule per concern**: tier classification, current-tier lookup,
//!   and region membership each live in exactly one place
//!
//! ## Example
//!
//! ```rust
//! use pdash_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let records = vec![
//!     PartnerMonthRecord::new("P1", Month::from_ymd(2025, 7).unwrap())
//!         .with_country("Kenya")
//!         .with_earnings(dec!(1500)),
//! ];
//! let store = PartnerDataStore::load(records);
//! assert_eq!(store.current_tier("P1"), Some(Tier::Gold));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod regions;
pub mod store;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::regions::{
        all_regions, countries_for_region, normalize_entity_name, region_for_country, EntityKind,
    };
    pub use crate::store::PartnerDataStore;
    pub use crate::types::{Month, PartnerMonthRecord, Tier};
}

// Re-export commonly used types at crate root
pub use error::{AnalyticsError, AnalyticsResult};
pub use regions::EntityKind;
pub use store::PartnerDataStore;
pub use types::{Month, PartnerMonthRecord, Tier};
