//! Persistence of marshalled cached routes.

mod dynamo;
mod memory;

pub use {dynamo::DynamoRouteStore, memory::InMemoryRouteStore};

/// Partition key attribute, holding a [`crate::PairKey`].
pub const PARTITION_KEY: &str = "pairTradeTypeChainId";
/// Sort key attribute, holding a full [`crate::TimelineKey`].
pub const SORT_KEY: &str = "protocolsBucketBlockNumber";
/// Binary attribute holding the UTF-8 JSON payload.
pub const PAYLOAD: &str = "item";
/// Absolute expiry in epoch seconds, swept by the store's native TTL.
pub const EXPIRES_AT: &str = "ttl";

/// A single stored write.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CachedRoutesItem {
    pub partition_key: String,
    pub sort_key: String,
    pub payload: Vec<u8>,
    pub expires_at: i64,
}

/// Key-value storage for cached routes.
///
/// Writes replace whole items; there are no transactions or cross item
/// guarantees.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait RouteStore: Send + Sync {
    /// Returns the payload with the greatest sort key in `partition_key`
    /// that starts with `sort_key_prefix`.
    async fn latest(
        &self,
        partition_key: &str,
        sort_key_prefix: &str,
    ) -> anyhow::Result<Option<Vec<u8>>>;

    /// Inserts or replaces the item with the same partition and sort key.
    async fn put(&self, item: CachedRoutesItem) -> anyhow::Result<()>;
}
