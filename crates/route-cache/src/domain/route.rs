use {
    crate::domain::eth::{self, H160, U256},
    std::cmp::Ordering,
};

/// The liquidity protocols a route can traverse.
///
/// The derived ordering is the canonical order protocols are listed in
/// storage keys.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Protocol {
    V2,
    V3,
    Mixed,
}

/// A concentrated liquidity (Uniswap V3 style) pool snapshot.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub token0: eth::Token,
    pub token1: eth::Token,
    /// Fee tier in hundredths of a basis point, e.g. 3000 for 0.3%.
    pub fee: u32,
    pub sqrt_ratio_x96: U256,
    pub liquidity: u128,
    pub tick_current: i32,
}

impl Pool {
    /// Creates a pool snapshot. The tokens may be passed in either order and
    /// are stored sorted by address.
    pub fn new(
        token_a: eth::Token,
        token_b: eth::Token,
        fee: u32,
        sqrt_ratio_x96: U256,
        liquidity: u128,
        tick_current: i32,
    ) -> Result<Self, InvalidRoute> {
        let (token0, token1) = sort_tokens(token_a, token_b)?;
        Ok(Self {
            token0,
            token1,
            fee,
            sqrt_ratio_x96,
            liquidity,
            tick_current,
        })
    }

    pub fn involves(&self, token: &eth::Token) -> bool {
        self.token0.same_as(token) || self.token1.same_as(token)
    }
}

/// A constant product (Uniswap V2 style) pair snapshot.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pair {
    pub reserve0: eth::TokenAmount,
    pub reserve1: eth::TokenAmount,
}

impl Pair {
    /// Creates a pair snapshot from its two reserves, sorted by token address.
    pub fn new(
        reserve_a: eth::TokenAmount,
        reserve_b: eth::TokenAmount,
    ) -> Result<Self, InvalidRoute> {
        match compare_tokens(&reserve_a.token, &reserve_b.token)? {
            Ordering::Less => Ok(Self {
                reserve0: reserve_a,
                reserve1: reserve_b,
            }),
            _ => Ok(Self {
                reserve0: reserve_b,
                reserve1: reserve_a,
            }),
        }
    }

    pub fn token0(&self) -> &eth::Token {
        &self.reserve0.token
    }

    pub fn token1(&self) -> &eth::Token {
        &self.reserve1.token
    }

    pub fn involves(&self, token: &eth::Token) -> bool {
        self.token0().same_as(token) || self.token1().same_as(token)
    }
}

/// A single step of a route.
#[derive(Clone, Debug, Eq, PartialEq, derive_more::From)]
pub enum Hop {
    Pool(Pool),
    Pair(Pair),
}

impl Hop {
    pub fn involves(&self, token: &eth::Token) -> bool {
        match self {
            Hop::Pool(pool) => pool.involves(token),
            Hop::Pair(pair) => pair.involves(token),
        }
    }
}

/// A path from an input token to an output token.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Route {
    V2 {
        input: eth::Token,
        output: eth::Token,
        pairs: Vec<Pair>,
    },
    V3 {
        input: eth::Token,
        output: eth::Token,
        pools: Vec<Pool>,
    },
    /// A route interleaving V2 pairs and V3 pools.
    Mixed {
        input: eth::Token,
        output: eth::Token,
        hops: Vec<Hop>,
    },
}

impl Route {
    pub fn v2(
        input: eth::Token,
        output: eth::Token,
        pairs: Vec<Pair>,
    ) -> Result<Self, InvalidRoute> {
        let route = Self::V2 {
            input,
            output,
            pairs,
        };
        route.validate()?;
        Ok(route)
    }

    pub fn v3(
        input: eth::Token,
        output: eth::Token,
        pools: Vec<Pool>,
    ) -> Result<Self, InvalidRoute> {
        let route = Self::V3 {
            input,
            output,
            pools,
        };
        route.validate()?;
        Ok(route)
    }

    pub fn mixed(
        input: eth::Token,
        output: eth::Token,
        hops: Vec<Hop>,
    ) -> Result<Self, InvalidRoute> {
        let route = Self::Mixed {
            input,
            output,
            hops,
        };
        route.validate()?;
        Ok(route)
    }

    pub fn protocol(&self) -> Protocol {
        match self {
            Route::V2 { .. } => Protocol::V2,
            Route::V3 { .. } => Protocol::V3,
            Route::Mixed { .. } => Protocol::Mixed,
        }
    }

    pub fn input(&self) -> &eth::Token {
        match self {
            Route::V2 { input, .. } | Route::V3 { input, .. } | Route::Mixed { input, .. } => input,
        }
    }

    pub fn output(&self) -> &eth::Token {
        match self {
            Route::V2 { output, .. } | Route::V3 { output, .. } | Route::Mixed { output, .. } => {
                output
            }
        }
    }

    /// The hops of the route in swap order.
    pub fn hops(&self) -> Vec<Hop> {
        match self {
            Route::V2 { pairs, .. } => pairs.iter().cloned().map(Hop::Pair).collect(),
            Route::V3 { pools, .. } => pools.iter().cloned().map(Hop::Pool).collect(),
            Route::Mixed { hops, .. } => hops.clone(),
        }
    }

    fn validate(&self) -> Result<(), InvalidRoute> {
        let hops = self.hops();
        let (Some(first), Some(last)) = (hops.first(), hops.last()) else {
            return Err(InvalidRoute::Empty);
        };
        if !first.involves(self.input()) || !last.involves(self.output()) {
            return Err(InvalidRoute::Disconnected);
        }
        Ok(())
    }
}

/// A route together with the share of the trade it carries.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CachedRoute {
    pub route: Route,
    /// Percentage of the total amount, in (0, 100].
    pub percent: u8,
}

impl CachedRoute {
    pub fn new(route: Route, percent: u8) -> Result<Self, InvalidRoute> {
        if percent == 0 || percent > 100 {
            return Err(InvalidRoute::Percent(percent));
        }
        Ok(Self { route, percent })
    }

    pub fn protocol(&self) -> Protocol {
        self.route.protocol()
    }
}

fn compare_tokens(a: &eth::Token, b: &eth::Token) -> Result<Ordering, InvalidRoute> {
    if a.chain_id != b.chain_id {
        return Err(InvalidRoute::ChainMismatch);
    }
    match a.address.cmp(&b.address) {
        Ordering::Equal => Err(InvalidRoute::IdenticalTokens(a.address)),
        ordering => Ok(ordering),
    }
}

fn sort_tokens(a: eth::Token, b: eth::Token) -> Result<(eth::Token, eth::Token), InvalidRoute> {
    match compare_tokens(&a, &b)? {
        Ordering::Less => Ok((a, b)),
        _ => Ok((b, a)),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InvalidRoute {
    #[error("route has no hops")]
    Empty,
    #[error("route hops do not connect the input and output tokens")]
    Disconnected,
    #[error("pool tokens must be distinct, got {0:?} twice")]
    IdenticalTokens(H160),
    #[error("pool tokens are on different chains")]
    ChainMismatch,
    #[error("route percent {0} outside of (0, 100]")]
    Percent(u8),
    #[error("route percents sum to {0}, expected 100")]
    PercentSum(u32),
    #[error("no routes to cache")]
    NoRoutes,
}
