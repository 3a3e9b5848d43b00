//! Storage key encodings.
//!
//! Items are stored under a partition key identifying the token pair, trade
//! type and chain ([`PairKey`]) and a sort key identifying the protocols,
//! bucket and block the routes were computed for ([`TimelineKey`]).

use {
    crate::{
        domain::{CachedRoutes, eth, route::Protocol},
        util::conv,
    },
    itertools::Itertools as _,
    std::{collections::BTreeSet, fmt},
};

/// The output token of a [`PairKey`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TokenOut {
    Token(eth::H160),
    /// Matches any output token. Only used for registry lookups.
    Any,
}

const WILDCARD: &str = "*";

/// Identifies a token pair, trade type and chain.
///
/// Addresses are held as bytes and printed as lower-case hex, so keys built
/// from differently cased input are equal and serialize identically.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct PairKey {
    token_in: eth::H160,
    token_out: TokenOut,
    trade_type: eth::TradeType,
    chain_id: eth::ChainId,
}

impl PairKey {
    pub fn new(
        token_in: eth::H160,
        token_out: eth::H160,
        trade_type: eth::TradeType,
        chain_id: eth::ChainId,
    ) -> Self {
        Self {
            token_in,
            token_out: TokenOut::Token(token_out),
            trade_type,
            chain_id,
        }
    }

    /// A key matching any output token of an exact input trade.
    pub fn wildcard(token_in: eth::H160, chain_id: eth::ChainId) -> Self {
        Self {
            token_in,
            token_out: TokenOut::Any,
            trade_type: eth::TradeType::ExactInput,
            chain_id,
        }
    }

    /// Builds a key from untrusted parts. `token_out` may be `*`.
    pub fn parse(
        token_in: &str,
        token_out: &str,
        trade_type: eth::TradeType,
        chain_id: u64,
    ) -> Result<Self, InvalidKey> {
        let token_in =
            conv::parse_address(token_in).ok_or_else(|| InvalidKey::Address(token_in.to_owned()))?;
        let chain_id = eth::ChainId::try_from(chain_id).map_err(|err| InvalidKey::Chain(err.0))?;
        if token_out == WILDCARD {
            if trade_type != eth::TradeType::ExactInput {
                return Err(InvalidKey::WildcardTradeType(trade_type));
            }
            return Ok(Self::wildcard(token_in, chain_id));
        }
        let token_out = conv::parse_address(token_out)
            .ok_or_else(|| InvalidKey::Address(token_out.to_owned()))?;
        Ok(Self::new(token_in, token_out, trade_type, chain_id))
    }

    /// The wildcard fallback for this key, if the trade type allows one.
    pub fn to_wildcard(&self) -> Option<Self> {
        (self.trade_type == eth::TradeType::ExactInput && self.token_out != TokenOut::Any)
            .then(|| Self::wildcard(self.token_in, self.chain_id))
    }

    pub fn is_wildcard(&self) -> bool {
        self.token_out == TokenOut::Any
    }

    pub fn token_in(&self) -> eth::H160 {
        self.token_in
    }

    pub fn token_out(&self) -> TokenOut {
        self.token_out
    }

    pub fn trade_type(&self) -> eth::TradeType {
        self.trade_type
    }

    pub fn chain_id(&self) -> eth::ChainId {
        self.chain_id
    }
}

impl From<&CachedRoutes> for PairKey {
    fn from(routes: &CachedRoutes) -> Self {
        Self::new(
            routes.token_in.address,
            routes.token_out.address,
            routes.trade_type,
            routes.chain_id,
        )
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token_out = match &self.token_out {
            TokenOut::Token(address) => conv::format_address(address),
            TokenOut::Any => WILDCARD.to_owned(),
        };
        write!(
            f,
            "{}/{}/{}/{}",
            conv::format_address(&self.token_in),
            token_out,
            self.trade_type,
            self.chain_id,
        )
    }
}

/// Identifies a write within a pair's partition: the protocols the routes
/// were computed with, the bucket, and optionally the block.
///
/// The partial form (without block) is a literal prefix of every full form
/// with the same protocols and bucket, so the newest entry is found with a
/// descending prefix scan.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TimelineKey {
    protocols: BTreeSet<Protocol>,
    bucket: u64,
    block_number: Option<u64>,
}

const SEPARATOR: char = '#';
/// Wide enough for any `u64`, so string order matches numeric order.
const BLOCK_DIGITS: usize = 20;

impl TimelineKey {
    pub fn new(
        protocols: impl IntoIterator<Item = Protocol>,
        bucket: u64,
    ) -> Result<Self, InvalidKey> {
        let protocols: BTreeSet<_> = protocols.into_iter().collect();
        if protocols.is_empty() {
            return Err(InvalidKey::NoProtocols);
        }
        Ok(Self {
            protocols,
            bucket,
            block_number: None,
        })
    }

    pub fn at_block(mut self, block_number: u64) -> Self {
        self.block_number = Some(block_number);
        self
    }

    pub fn block_number(&self) -> Option<u64> {
        self.block_number
    }

    /// The sort key prefix shared by all writes for these protocols and
    /// bucket.
    pub fn partial_key(&self) -> String {
        format!(
            "{}{SEPARATOR}{}{SEPARATOR}",
            self.protocols.iter().join(","),
            self.bucket
        )
    }

    /// The sort key of a single write.
    pub fn full_key(&self) -> Result<String, InvalidKey> {
        let block_number = self.block_number.ok_or(InvalidKey::NoBlockNumber)?;
        Ok(format!(
            "{}{block_number:0width$}",
            self.partial_key(),
            width = BLOCK_DIGITS
        ))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InvalidKey {
    #[error("invalid token address {0:?}")]
    Address(String),
    #[error("unsupported chain id {0}")]
    Chain(u64),
    #[error("wildcard output token is only supported for EXACT_INPUT, got {0}")]
    WildcardTradeType(eth::TradeType),
    #[error("timeline key needs at least one protocol")]
    NoProtocols,
    #[error("timeline key has no block number")]
    NoBlockNumber,
}
