use {
    super::{
        Error,
        serialize::DecimalU256,
        token::{Token, TokenAmount},
    },
    crate::domain::route,
    primitive_types::U256,
    serde::{Deserialize, Serialize},
    serde_with::{DisplayFromStr, serde_as},
};

#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub token0: Token,
    pub token1: Token,
    pub fee: u32,
    #[serde_as(as = "DecimalU256")]
    pub sqrt_ratio_x96: U256,
    #[serde_as(as = "DisplayFromStr")]
    pub liquidity: u128,
    pub tick_current: i32,
}

impl Pool {
    pub fn from_domain(pool: &route::Pool) -> Self {
        Self {
            token0: Token::from_domain(&pool.token0),
            token1: Token::from_domain(&pool.token1),
            fee: pool.fee,
            sqrt_ratio_x96: pool.sqrt_ratio_x96,
            liquidity: pool.liquidity,
            tick_current: pool.tick_current,
        }
    }

    pub fn into_domain(self) -> Result<route::Pool, Error> {
        Ok(route::Pool::new(
            self.token0.into_domain()?,
            self.token1.into_domain()?,
            self.fee,
            self.sqrt_ratio_x96,
            self.liquidity,
            self.tick_current,
        )?)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pair {
    pub reserve0: TokenAmount,
    pub reserve1: TokenAmount,
}

impl Pair {
    pub fn from_domain(pair: &route::Pair) -> Self {
        Self {
            reserve0: TokenAmount::from_domain(&pair.reserve0),
            reserve1: TokenAmount::from_domain(&pair.reserve1),
        }
    }

    pub fn into_domain(self) -> Result<route::Pair, Error> {
        Ok(route::Pair::new(
            self.reserve0.into_domain()?,
            self.reserve1.into_domain()?,
        )?)
    }
}

/// A hop of a mixed route, tagged with its own kind.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Hop {
    #[serde(rename = "v3-pool")]
    Pool(Pool),
    #[serde(rename = "v2-pair")]
    Pair(Pair),
}

impl Hop {
    pub fn from_domain(hop: &route::Hop) -> Self {
        match hop {
            route::Hop::Pool(pool) => Self::Pool(Pool::from_domain(pool)),
            route::Hop::Pair(pair) => Self::Pair(Pair::from_domain(pair)),
        }
    }

    pub fn into_domain(self) -> Result<route::Hop, Error> {
        Ok(match self {
            Self::Pool(pool) => route::Hop::Pool(pool.into_domain()?),
            Self::Pair(pair) => route::Hop::Pair(pair.into_domain()?),
        })
    }
}

/// A route tagged with its protocol. Single protocol routes list their hops
/// untagged; mixed routes tag every hop.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "protocol", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Route {
    V2 {
        input: Token,
        output: Token,
        pairs: Vec<Pair>,
    },
    V3 {
        input: Token,
        output: Token,
        pools: Vec<Pool>,
    },
    Mixed {
        input: Token,
        output: Token,
        hops: Vec<Hop>,
    },
}

impl Route {
    pub fn from_domain(route: &route::Route) -> Self {
        match route {
            route::Route::V2 {
                input,
                output,
                pairs,
            } => Self::V2 {
                input: Token::from_domain(input),
                output: Token::from_domain(output),
                pairs: pairs.iter().map(Pair::from_domain).collect(),
            },
            route::Route::V3 {
                input,
                output,
                pools,
            } => Self::V3 {
                input: Token::from_domain(input),
                output: Token::from_domain(output),
                pools: pools.iter().map(Pool::from_domain).collect(),
            },
            route::Route::Mixed {
                input,
                output,
                hops,
            } => Self::Mixed {
                input: Token::from_domain(input),
                output: Token::from_domain(output),
                hops: hops.iter().map(Hop::from_domain).collect(),
            },
        }
    }

    /// Rebuilds the route through its validating constructors, so routes
    /// without hops or with disconnected hops are rejected.
    pub fn into_domain(self) -> Result<route::Route, Error> {
        let route = match self {
            Self::V2 {
                input,
                output,
                pairs,
            } => route::Route::v2(
                input.into_domain()?,
                output.into_domain()?,
                pairs
                    .into_iter()
                    .map(Pair::into_domain)
                    .collect::<Result<_, _>>()?,
            ),
            Self::V3 {
                input,
                output,
                pools,
            } => route::Route::v3(
                input.into_domain()?,
                output.into_domain()?,
                pools
                    .into_iter()
                    .map(Pool::into_domain)
                    .collect::<Result<_, _>>()?,
            ),
            Self::Mixed {
                input,
                output,
                hops,
            } => route::Route::mixed(
                input.into_domain()?,
                output.into_domain()?,
                hops.into_iter()
                    .map(Hop::into_domain)
                    .collect::<Result<_, _>>()?,
            ),
        };
        Ok(route?)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CachedRoute {
    pub route: Route,
    pub percent: u8,
}

impl CachedRoute {
    pub fn from_domain(route: &route::CachedRoute) -> Self {
        Self {
            route: Route::from_domain(&route.route),
            percent: route.percent,
        }
    }

    pub fn into_domain(self) -> Result<route::CachedRoute, Error> {
        Ok(route::CachedRoute::new(
            self.route.into_domain()?,
            self.percent,
        )?)
    }
}

