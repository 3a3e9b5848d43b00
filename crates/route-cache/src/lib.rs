//! Read-through cache for swap route computations.
//!
//! Route results produced by the router are bucketed by trade size. Each
//! bucket carries a [`domain::caching::CacheMode`] that tells the router
//! whether a cached result may be served, only compared against a live
//! computation, or ignored entirely. Results are persisted in a key-value
//! store keyed by token pair and by (protocols, bucket, block), and expire
//! through the store's native TTL.

pub mod domain;
pub mod infra;
pub mod util;

pub use {
    domain::{
        caching::{Bucket, CacheMode, CachingStrategy, PairKey, StrategyRegistry, TimelineKey},
        provider::RouteCachingProvider,
    },
    infra::storage::{DynamoRouteStore, InMemoryRouteStore, RouteStore},
};
