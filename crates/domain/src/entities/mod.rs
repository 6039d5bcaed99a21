//! Domain entities

mod usage_record;

pub use usage_record::UsageRecord;
