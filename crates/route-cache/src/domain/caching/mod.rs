//! Caching policy: which quotes get cached, for how long, and under which
//! storage keys.

mod bucket;
mod builtin;
mod key;
mod registry;
mod strategy;

pub use {
    bucket::{Bucket, CacheMode},
    key::{InvalidKey, PairKey, TimelineKey, TokenOut},
    registry::{InvalidRegistry, StrategyRegistry},
    strategy::{CachingStrategy, InvalidStrategy},
};

#[cfg(test)]
pub(crate) use builtin::addresses as builtin_addresses;
