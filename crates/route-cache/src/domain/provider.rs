//! The integration point between the router and the route cache.
//!
//! Every failure on this path (missing policy, storage errors, malformed
//! payloads) is logged and reported as a miss. A slow or broken cache costs
//! latency at worst, never a failed quote.

use {
    crate::{
        domain::{
            CachedRoutes,
            caching::{Bucket, CacheMode, PairKey, StrategyRegistry, TimelineKey},
            eth,
            route::Protocol,
        },
        infra::{
            config::Arguments,
            dto,
            observe,
            storage::{CachedRoutesItem, DynamoRouteStore, RouteStore},
        },
    },
    std::{sync::Arc, time::Duration},
};

pub struct RouteCachingProvider {
    store: Arc<dyn RouteStore>,
    registry: Arc<StrategyRegistry>,
    time_to_live: Duration,
}

impl RouteCachingProvider {
    /// Creates a provider. `time_to_live` is the wall clock lifetime of
    /// written entries, enforced by the store's TTL.
    pub fn new(
        store: Arc<dyn RouteStore>,
        registry: Arc<StrategyRegistry>,
        time_to_live: Duration,
    ) -> Self {
        Self {
            store,
            registry,
            time_to_live,
        }
    }

    /// Creates a provider backed by DynamoDB.
    pub async fn from_arguments(args: &Arguments, registry: Arc<StrategyRegistry>) -> Self {
        tracing::info!("route cache configuration:\n{args}");
        let store = DynamoRouteStore::from_env(args).await;
        Self::new(Arc::new(store), registry, args.cached_routes_time_to_live)
    }

    /// The cache mode for a quote request. `amount` is the amount of the
    /// traded token; `quote_token` is the other side of the trade.
    pub fn cache_mode(
        &self,
        chain_id: eth::ChainId,
        amount: &eth::TokenAmount,
        quote_token: &eth::Token,
        trade_type: eth::TradeType,
        protocols: &[Protocol],
    ) -> CacheMode {
        let mode = self
            .request_bucket(chain_id, amount, quote_token, trade_type)
            .map(|bucket| bucket.cache_mode)
            .unwrap_or_default();
        tracing::trace!(%mode, ?protocols, "resolved cache mode");
        mode
    }

    /// The number of blocks routes computed for this request stay fresh, or 0
    /// if the request is not cached.
    pub fn blocks_to_live(
        &self,
        chain_id: eth::ChainId,
        amount: &eth::TokenAmount,
        quote_token: &eth::Token,
        trade_type: eth::TradeType,
    ) -> u64 {
        self.request_bucket(chain_id, amount, quote_token, trade_type)
            .map(|bucket| bucket.blocks_to_live)
            .unwrap_or_default()
    }

    /// Looks up the most recently cached routes for the request's pair,
    /// bucket and protocols.
    pub async fn get_cached_route(
        &self,
        chain_id: eth::ChainId,
        amount: &eth::TokenAmount,
        quote_token: &eth::Token,
        trade_type: eth::TradeType,
        protocols: &[Protocol],
    ) -> Option<CachedRoutes> {
        let (key, bucket) = self.request_key(chain_id, amount, quote_token, trade_type);
        let bucket = bucket?;
        let partition_key = key.to_string();
        let sort_key_prefix = match TimelineKey::new(protocols.iter().copied(), bucket.id()) {
            Ok(timeline) => timeline.partial_key(),
            Err(err) => {
                tracing::debug!(?err, "cannot build cached routes sort key");
                return None;
            }
        };

        let payload = match self.store.latest(&partition_key, &sort_key_prefix).await {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                observe::cache_miss(&partition_key, &sort_key_prefix);
                return None;
            }
            Err(err) => {
                observe::read_failed(&partition_key, &err);
                return None;
            }
        };
        match dto::unmarshal(&payload) {
            Ok(routes) => {
                observe::cache_hit(&partition_key, &sort_key_prefix, &routes);
                Some(routes)
            }
            Err(err) => {
                observe::malformed_payload(&partition_key, &err);
                None
            }
        }
    }

    /// Stores freshly computed routes if their pair and `amount` fall into a
    /// caching bucket. Returns whether the routes were written.
    pub async fn set_cached_route(&self, routes: &CachedRoutes, amount: &eth::TokenAmount) -> bool {
        let key = PairKey::from(routes);
        let Some(bucket) = self.bucket(&key, amount) else {
            return false;
        };
        if !bucket.accepts_splits(routes.routes.len()) {
            observe::too_many_splits(routes, bucket);
            return false;
        }

        let partition_key = key.to_string();
        let sort_key = match TimelineKey::new(routes.protocols_covered.iter().copied(), bucket.id())
            .and_then(|timeline| timeline.at_block(routes.block_number).full_key())
        {
            Ok(sort_key) => sort_key,
            Err(err) => {
                tracing::debug!(?err, "cannot build cached routes sort key");
                return false;
            }
        };
        let payload = match dto::marshal(routes) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(?err, "failed to marshal cached routes");
                return false;
            }
        };
        let expires_at = self.expires_at();

        let item = CachedRoutesItem {
            partition_key,
            sort_key,
            payload,
            expires_at,
        };
        let (partition_key, sort_key) = (item.partition_key.clone(), item.sort_key.clone());
        match self.store.put(item).await {
            Ok(()) => {
                observe::stored(&partition_key, &sort_key, expires_at);
                true
            }
            Err(err) => {
                observe::store_failed(&partition_key, &err);
                false
            }
        }
    }

    /// Resolves the bucket for a request given as traded amount plus quote
    /// token.
    fn request_bucket(
        &self,
        chain_id: eth::ChainId,
        amount: &eth::TokenAmount,
        quote_token: &eth::Token,
        trade_type: eth::TradeType,
    ) -> Option<&Bucket> {
        self.request_key(chain_id, amount, quote_token, trade_type).1
    }

    /// The partition key of a request and its bucket, if any.
    fn request_key(
        &self,
        chain_id: eth::ChainId,
        amount: &eth::TokenAmount,
        quote_token: &eth::Token,
        trade_type: eth::TradeType,
    ) -> (PairKey, Option<&Bucket>) {
        let (token_in, token_out) = match trade_type {
            eth::TradeType::ExactInput => (amount.token.address, quote_token.address),
            eth::TradeType::ExactOutput => (quote_token.address, amount.token.address),
        };
        let key = PairKey::new(token_in, token_out, trade_type, chain_id);
        let bucket = self.bucket(&key, amount);
        (key, bucket)
    }

    /// Resolves strategy and bucket. Darkmode buckets resolve to `None`, as
    /// the cache must not be touched for them.
    fn bucket(&self, key: &PairKey, amount: &eth::TokenAmount) -> Option<&Bucket> {
        let Some(strategy) = self.registry.lookup(key) else {
            observe::no_strategy(key);
            return None;
        };
        let Some(bucket) = strategy.caching_bucket(amount) else {
            observe::no_bucket(strategy, amount);
            return None;
        };
        if bucket.cache_mode == CacheMode::Darkmode {
            observe::bucket_disabled(strategy, bucket);
            return None;
        }
        Some(bucket)
    }

    fn expires_at(&self) -> i64 {
        let time_to_live = i64::try_from(self.time_to_live.as_secs()).unwrap_or(i64::MAX);
        chrono::Utc::now().timestamp().saturating_add(time_to_live)
    }
}
