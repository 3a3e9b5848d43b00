use {
    super::bucket::Bucket,
    crate::domain::eth,
    itertools::Itertools as _,
    num::BigRational,
};

/// The ordered buckets configured for one token pair, trade type and chain.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CachingStrategy {
    /// Human readable pair label, e.g. `WETH/USDC`.
    pub pair: String,
    pub trade_type: eth::TradeType,
    pub chain_id: eth::ChainId,
    buckets: Vec<Bucket>,
}

impl CachingStrategy {
    /// Creates a strategy. Bucket thresholds must be strictly ascending.
    pub fn new(
        pair: impl Into<String>,
        trade_type: eth::TradeType,
        chain_id: eth::ChainId,
        buckets: Vec<Bucket>,
    ) -> Result<Self, InvalidStrategy> {
        if buckets.is_empty() {
            return Err(InvalidStrategy::NoBuckets);
        }
        if let Some((a, b)) = buckets
            .iter()
            .tuple_windows()
            .find(|(a, b)| a.threshold >= b.threshold)
        {
            return Err(InvalidStrategy::NotAscending(a.threshold, b.threshold));
        }
        Ok(Self {
            pair: pair.into(),
            trade_type,
            chain_id,
            buckets,
        })
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Finds the bucket for a trade amount in whole token units.
    ///
    /// Bucket `i` covers `[threshold_i, threshold_i+1)`. Amounts below the
    /// first threshold or at/above the last one are not cached, so the last
    /// bucket only closes the final range.
    pub fn caching_bucket(&self, amount: &eth::TokenAmount) -> Option<&Bucket> {
        self.bucket_for(&amount.to_exact())
    }

    pub fn bucket_for(&self, amount: &BigRational) -> Option<&Bucket> {
        self.buckets
            .iter()
            .tuple_windows()
            .find(|(lower, upper)| {
                let lower = BigRational::from_integer(lower.threshold.into());
                let upper = BigRational::from_integer(upper.threshold.into());
                &lower <= amount && amount < &upper
            })
            .map(|(lower, _)| lower)
    }

    /// A label for logging, e.g. `WETH/USDC/EXACT_INPUT/1`.
    pub fn readable_key(&self) -> String {
        format!("{}/{}/{}", self.pair, self.trade_type, self.chain_id)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InvalidStrategy {
    #[error("caching strategy needs at least one bucket")]
    NoBuckets,
    #[error("bucket thresholds must be strictly ascending, found {0} before {1}")]
    NotAscending(u64, u64),
}
