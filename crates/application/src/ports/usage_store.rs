//! Usage store port - append-only persistence for transaction records

use async_trait::async_trait;
use domain::UsageRecord;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for persisting usage records
///
/// Insert-only: the core never updates or deletes a record.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UsageStorePort: Send + Sync {
    /// Persist one usage record
    async fn insert(&self, record: UsageRecord) -> Result<(), ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::LanguagePair;

    #[tokio::test]
    async fn mock_usage_store_inserts() {
        let mut mock = MockUsageStorePort::new();
        mock.expect_insert().times(1).returning(|_| Ok(()));

        let record = UsageRecord::new(
            None,
            "hola",
            "hello",
            LanguagePair::parse("es", "en").unwrap(),
            None,
            None,
            None,
            100,
            0.0,
            true,
            false,
        );
        mock.insert(record).await.unwrap();
    }
}
