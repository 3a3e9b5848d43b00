use {
    super::{key::PairKey, strategy::CachingStrategy},
    crate::domain::eth,
    std::collections::HashMap,
};

/// Caching strategies by pair key.
///
/// Built once at startup and shared read-only, so lookups need no locking.
#[derive(Clone, Debug, Default)]
pub struct StrategyRegistry {
    strategies: HashMap<PairKey, CachingStrategy>,
}

impl StrategyRegistry {
    pub fn new(
        entries: impl IntoIterator<Item = (PairKey, CachingStrategy)>,
    ) -> Result<Self, InvalidRegistry> {
        let mut strategies = HashMap::new();
        for (key, strategy) in entries {
            if key.trade_type() != strategy.trade_type || key.chain_id() != strategy.chain_id {
                return Err(InvalidRegistry::Mismatch(key.to_string()));
            }
            if strategies.insert(key, strategy).is_some() {
                return Err(InvalidRegistry::Duplicate(key.to_string()));
            }
        }
        Ok(Self { strategies })
    }

    /// The strategies the router ships with.
    pub fn builtin() -> Self {
        Self::new(super::builtin::strategies()).expect("builtin caching strategies are valid")
    }

    pub fn get(&self, key: &PairKey) -> Option<&CachingStrategy> {
        self.strategies.get(key)
    }

    /// Finds the strategy for a trade. Exact input trades without a strategy
    /// for the exact pair fall back to a wildcard entry for the input token.
    pub fn resolve(
        &self,
        token_in: eth::H160,
        token_out: eth::H160,
        trade_type: eth::TradeType,
        chain_id: eth::ChainId,
    ) -> Option<&CachingStrategy> {
        self.lookup(&PairKey::new(token_in, token_out, trade_type, chain_id))
    }

    /// Like [`Self::resolve`], for a key that is already built.
    pub fn lookup(&self, key: &PairKey) -> Option<&CachingStrategy> {
        self.get(key)
            .or_else(|| key.to_wildcard().and_then(|wildcard| self.get(&wildcard)))
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InvalidRegistry {
    #[error("duplicate caching strategy for {0}")]
    Duplicate(String),
    #[error("caching strategy does not match the trade type or chain of key {0}")]
    Mismatch(String),
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::domain::{
            caching::{Bucket, CacheMode},
            eth::{ChainId, H160, TradeType},
        },
    };

    const A: H160 = H160([0xaa; 20]);
    const B: H160 = H160([0xbb; 20]);
    const C: H160 = H160([0xcc; 20]);

    fn strategy(pair: &str, trade_type: TradeType, mode: CacheMode) -> CachingStrategy {
        CachingStrategy::new(
            pair,
            trade_type,
            ChainId::Mainnet,
            vec![Bucket::new(1, 2, mode), Bucket::new(10, 2, mode)],
        )
        .unwrap()
    }

    fn registry() -> StrategyRegistry {
        StrategyRegistry::new([
            (
                PairKey::new(A, B, TradeType::ExactInput, ChainId::Mainnet),
                strategy("A/B", TradeType::ExactInput, CacheMode::Livemode),
            ),
            (
                PairKey::wildcard(A, ChainId::Mainnet),
                strategy("A/*", TradeType::ExactInput, CacheMode::Tapcompare),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn exact_pair_wins_over_wildcard() {
        let registry = registry();
        let strategy = registry
            .resolve(A, B, TradeType::ExactInput, ChainId::Mainnet)
            .unwrap();
        assert_eq!(strategy.pair, "A/B");
    }

    #[test]
    fn wildcard_matches_any_output_token() {
        let registry = registry();
        for token_out in [C, H160([0x01; 20]), H160::zero()] {
            let strategy = registry
                .resolve(A, token_out, TradeType::ExactInput, ChainId::Mainnet)
                .unwrap();
            assert_eq!(strategy.pair, "A/*");
        }
    }

    #[test]
    fn wildcard_only_applies_to_exact_input_on_its_chain() {
        let registry = registry();
        assert!(
            registry
                .resolve(A, C, TradeType::ExactOutput, ChainId::Mainnet)
                .is_none()
        );
        assert!(
            registry
                .resolve(A, C, TradeType::ExactInput, ChainId::Base)
                .is_none()
        );
        assert!(
            registry
                .resolve(C, A, TradeType::ExactInput, ChainId::Mainnet)
                .is_none()
        );
    }

    #[test]
    fn rejects_duplicates_and_mismatches() {
        let key = PairKey::new(A, B, TradeType::ExactInput, ChainId::Mainnet);
        assert!(matches!(
            StrategyRegistry::new([
                (key, strategy("A/B", TradeType::ExactInput, CacheMode::Livemode)),
                (key, strategy("A/B", TradeType::ExactInput, CacheMode::Tapcompare)),
            ]),
            Err(InvalidRegistry::Duplicate(_))
        ));
        assert!(matches!(
            StrategyRegistry::new([(
                key,
                strategy("A/B", TradeType::ExactOutput, CacheMode::Livemode)
            )]),
            Err(InvalidRegistry::Mismatch(_))
        ));
    }

    #[test]
    fn builtin_registry_is_valid() {
        let registry = StrategyRegistry::builtin();
        assert!(!registry.is_empty());
        assert_eq!(
            registry.len(),
            super::super::builtin::strategies().len()
        );
    }
}
