//! The caching strategies deployed with the router. Changing them requires a
//! release.

use {
    super::{Bucket, CacheMode, CachingStrategy, PairKey},
    crate::domain::eth::{ChainId, H160, TradeType},
    hex_literal::hex,
};

mod mainnet {
    use super::H160;

    pub const WETH: H160 = H160(super::hex!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"));
    pub const USDC: H160 = H160(super::hex!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"));
    pub const USDT: H160 = H160(super::hex!("dac17f958d2ee523a2206206994597c13d831ec7"));
    pub const DAI: H160 = H160(super::hex!("6b175474e89094c44da98b954eedeac495271d0f"));
    pub const WBTC: H160 = H160(super::hex!("2260fac5e5542a773aa44fbcfedf7c193bc2c599"));
}

mod optimism {
    use super::H160;

    pub const WETH: H160 = H160(super::hex!("4200000000000000000000000000000000000006"));
    pub const USDC: H160 = H160(super::hex!("0b2c639c533813f4aa9d7837caf62653d097ff85"));
}

/// Fibonacci-spaced buckets from 1 to 55 whole units.
fn fibonacci(blocks_to_live: u64, mode: CacheMode) -> Vec<Bucket> {
    [1, 2, 3, 5, 8, 13, 21, 34, 55]
        .into_iter()
        .map(|threshold| Bucket::new(threshold, blocks_to_live, mode))
        .collect()
}

/// Buckets for stablecoin-denominated amounts.
fn stable(blocks_to_live: u64, mode: CacheMode) -> Vec<Bucket> {
    [100, 500, 1_000, 2_000, 5_000, 10_000, 50_000, 100_000, 500_000]
        .into_iter()
        .map(|threshold| Bucket::new(threshold, blocks_to_live, mode))
        .collect()
}

fn entry(
    pair: &str,
    key: PairKey,
    buckets: Vec<Bucket>,
) -> (PairKey, CachingStrategy) {
    let strategy = CachingStrategy::new(pair, key.trade_type(), key.chain_id(), buckets)
        .expect("builtin buckets are ascending");
    (key, strategy)
}

pub(super) fn strategies() -> Vec<(PairKey, CachingStrategy)> {
    use {ChainId::*, TradeType::*};

    vec![
        entry(
            "WETH/USDC",
            PairKey::new(mainnet::WETH, mainnet::USDC, ExactInput, Mainnet),
            fibonacci(1, CacheMode::Tapcompare),
        ),
        entry(
            "WETH/USDC",
            PairKey::new(mainnet::WETH, mainnet::USDC, ExactOutput, Mainnet),
            stable(1, CacheMode::Tapcompare),
        ),
        entry(
            "USDC/WETH",
            PairKey::new(mainnet::USDC, mainnet::WETH, ExactInput, Mainnet),
            stable(2, CacheMode::Livemode),
        ),
        entry(
            "USDC/WETH",
            PairKey::new(mainnet::USDC, mainnet::WETH, ExactOutput, Mainnet),
            fibonacci(1, CacheMode::Tapcompare),
        ),
        entry(
            "USDT/WETH",
            PairKey::new(mainnet::USDT, mainnet::WETH, ExactInput, Mainnet),
            stable(2, CacheMode::Tapcompare),
        ),
        entry(
            "DAI/USDC",
            PairKey::new(mainnet::DAI, mainnet::USDC, ExactInput, Mainnet),
            stable(5, CacheMode::Livemode)
                .into_iter()
                .map(|bucket| bucket.with_max_splits(2))
                .collect(),
        ),
        entry(
            "WBTC/*",
            PairKey::wildcard(mainnet::WBTC, Mainnet),
            fibonacci(1, CacheMode::Tapcompare),
        ),
        entry(
            "WETH/USDC",
            PairKey::new(optimism::WETH, optimism::USDC, ExactInput, Optimism),
            fibonacci(2, CacheMode::Tapcompare),
        ),
        entry(
            "USDC/WETH",
            PairKey::new(optimism::USDC, optimism::WETH, ExactInput, Optimism),
            stable(2, CacheMode::Tapcompare),
        ),
    ]
}

#[cfg(test)]
pub(crate) mod addresses {
    pub use super::mainnet::{USDC, WBTC, WETH};
}
