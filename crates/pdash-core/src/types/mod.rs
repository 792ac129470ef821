//! Core domain types for partner analytics.

mod month;
mod record;
mod tier;

pub use month::Month;
pub use record::PartnerMonthRecord;
pub use tier::Tier;
