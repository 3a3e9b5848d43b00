//! Logging of route cache decisions.

use crate::{
    domain::{
        CachedRoutes,
        caching::{Bucket, CachingStrategy, PairKey},
        eth,
    },
    infra::dto,
};

pub fn no_strategy(key: &PairKey) {
    tracing::trace!(%key, "no caching strategy for pair");
}

pub fn no_bucket(strategy: &CachingStrategy, amount: &eth::TokenAmount) {
    tracing::debug!(
        strategy = %strategy.readable_key(),
        amount = %amount.to_exact(),
        "amount outside of all caching buckets"
    );
}

pub fn bucket_disabled(strategy: &CachingStrategy, bucket: &Bucket) {
    tracing::trace!(
        strategy = %strategy.readable_key(),
        bucket = bucket.id(),
        "bucket is in darkmode"
    );
}

pub fn cache_hit(partition_key: &str, sort_key_prefix: &str, routes: &CachedRoutes) {
    tracing::debug!(
        partition_key,
        sort_key_prefix,
        block_number = routes.block_number,
        routes = routes.routes.len(),
        "cached routes hit"
    );
}

pub fn cache_miss(partition_key: &str, sort_key_prefix: &str) {
    tracing::debug!(partition_key, sort_key_prefix, "cached routes miss");
}

pub fn read_failed(partition_key: &str, err: &anyhow::Error) {
    tracing::warn!(partition_key, ?err, "failed to read cached routes");
}

pub fn malformed_payload(partition_key: &str, err: &dto::Error) {
    tracing::warn!(partition_key, ?err, "discarding malformed cached routes");
}

pub fn too_many_splits(routes: &CachedRoutes, bucket: &Bucket) {
    tracing::debug!(
        splits = routes.routes.len(),
        max_splits = ?bucket.max_splits,
        bucket = bucket.id(),
        "not caching routes with too many splits"
    );
}

pub fn stored(partition_key: &str, sort_key: &str, expires_at: i64) {
    tracing::debug!(partition_key, sort_key, expires_at, "stored cached routes");
}

pub fn store_failed(partition_key: &str, err: &anyhow::Error) {
    tracing::warn!(partition_key, ?err, "failed to store cached routes");
}
