//! Storage representation of cached routes.
//!
//! Domain values are converted into these serde types before being written
//! as UTF-8 JSON. Every amount is kept as a pair of decimal integer strings,
//! so decoding reproduces the written value exactly.

mod route;
mod serialize;
mod token;

pub use {
    route::{CachedRoute, Hop, Pair, Pool, Route},
    token::{Amount, Token, TokenAmount},
};
use {
    crate::domain::{self, eth, route::Protocol},
    serde::{Deserialize, Serialize},
    serde_with::{DisplayFromStr, serde_as},
};

#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedRoutes {
    pub routes: Vec<CachedRoute>,
    pub chain_id: u64,
    pub token_in: Token,
    pub token_out: Token,
    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub protocols_covered: Vec<Protocol>,
    pub block_number: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub trade_type: eth::TradeType,
    pub original_amount: String,
    pub blocks_to_live: u64,
}

impl CachedRoutes {
    pub fn from_domain(routes: &domain::CachedRoutes) -> Self {
        Self {
            routes: routes.routes.iter().map(CachedRoute::from_domain).collect(),
            chain_id: routes.chain_id.id(),
            token_in: Token::from_domain(&routes.token_in),
            token_out: Token::from_domain(&routes.token_out),
            protocols_covered: routes.protocols_covered.iter().copied().collect(),
            block_number: routes.block_number,
            trade_type: routes.trade_type,
            original_amount: routes.original_amount.clone(),
            blocks_to_live: routes.blocks_to_live,
        }
    }

    /// Rebuilds the domain value. Route percents are checked individually;
    /// their sum is the producer's responsibility and is not re-derived here.
    pub fn into_domain(self) -> Result<domain::CachedRoutes, Error> {
        if self.routes.is_empty() {
            return Err(domain::route::InvalidRoute::NoRoutes.into());
        }
        Ok(domain::CachedRoutes {
            routes: self
                .routes
                .into_iter()
                .map(CachedRoute::into_domain)
                .collect::<Result<_, _>>()?,
            chain_id: self.chain_id.try_into()?,
            token_in: self.token_in.into_domain()?,
            token_out: self.token_out.into_domain()?,
            protocols_covered: self.protocols_covered.into_iter().collect(),
            block_number: self.block_number,
            trade_type: self.trade_type,
            original_amount: self.original_amount,
            blocks_to_live: self.blocks_to_live,
        })
    }
}

/// Encodes cached routes as UTF-8 JSON bytes.
pub fn marshal(routes: &domain::CachedRoutes) -> Result<Vec<u8>, Error> {
    Ok(serde_json::to_vec(&CachedRoutes::from_domain(routes))?)
}

/// Decodes cached routes from UTF-8 JSON bytes.
pub fn unmarshal(bytes: &[u8]) -> Result<domain::CachedRoutes, Error> {
    let json = std::str::from_utf8(bytes)?;
    serde_json::from_str::<CachedRoutes>(json)?.into_domain()
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cached routes payload is not UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("malformed cached routes payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Chain(#[from] eth::UnknownChain),
    #[error(transparent)]
    Amount(#[from] eth::InvalidAmount),
    #[error(transparent)]
    Route(#[from] domain::route::InvalidRoute),
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::domain::{
            cached_routes::testing::cached_routes,
            route::{self as domain_route, testing::*},
        },
        serde_json::json,
    };

    fn v3(a: &eth::Token, b: &eth::Token) -> domain::CachedRoutes {
        single(domain_route::Route::v3(a.clone(), b.clone(), vec![pool(a, b)]).unwrap())
    }

    fn payload() -> serde_json::Value {
        serde_json::to_value(CachedRoutes::from_domain(&cached_routes(1))).unwrap()
    }

    fn round_trip(routes: &domain::CachedRoutes) -> domain::CachedRoutes {
        unmarshal(&marshal(routes).unwrap()).unwrap()
    }

    fn single(route: domain_route::Route) -> domain::CachedRoutes {
        let mut routes = cached_routes(19_000_000);
        routes.routes = vec![domain_route::CachedRoute::new(route, 100).unwrap()];
        routes
    }

    #[test]
    fn round_trips_split_routes() {
        let routes = cached_routes(19_000_000);
        assert_eq!(round_trip(&routes), routes);
    }

    #[test]
    fn round_trips_every_route_kind() {
        let (a, b, c) = (token(1, 18), token(2, 6), token(3, 8));
        for route in [
            domain_route::Route::v2(a.clone(), c.clone(), vec![pair(&a, &b), pair(&b, &c)])
                .unwrap(),
            domain_route::Route::v3(a.clone(), c.clone(), vec![pool(&a, &b), pool(&b, &c)])
                .unwrap(),
            domain_route::Route::mixed(
                a.clone(),
                c.clone(),
                vec![pool(&a, &b).into(), pair(&b, &c).into()],
            )
            .unwrap(),
        ] {
            let routes = single(route);
            assert_eq!(round_trip(&routes), routes);
        }
    }

    #[test]
    fn round_trips_boundary_values() {
        let (a, b) = (token(1, 0), token(2, 255));
        let pool = domain_route::Pool::new(
            a.clone(),
            b.clone(),
            100,
            eth::U256::MAX,
            u128::MAX,
            i32::MIN,
        )
        .unwrap();
        let pair = domain_route::Pair::new(
            eth::TokenAmount::from_raw(a.clone(), 0),
            eth::TokenAmount::new(
                b.clone(),
                eth::RationalAmount::new(
                    "340282366920938463463374607431768211455000000000000".parse().unwrap(),
                    "-3".parse().unwrap(),
                )
                .unwrap(),
            ),
        )
        .unwrap();
        let route = domain_route::Route::mixed(a, b, vec![pool.into(), pair.into()]).unwrap();
        let mut routes = single(route);
        routes.block_number = u64::MAX;
        routes.blocks_to_live = 0;
        assert_eq!(round_trip(&routes), routes);
    }

    #[test]
    fn payload_shape() {
        let (a, b) = (token(1, 18), token(2, 6));
        let routes = v3(&a, &b);
        let json: serde_json::Value =
            serde_json::from_slice(&marshal(&routes).unwrap()).unwrap();

        assert_eq!(json["tradeType"], "EXACT_INPUT");
        assert_eq!(json["blockNumber"], 19_000_000);
        assert_eq!(json["protocolsCovered"], json!(["V2", "V3", "MIXED"]));
        let route = &json["routes"][0];
        assert_eq!(route["percent"], 100);
        assert_eq!(route["route"]["protocol"], "V3");
        assert_eq!(
            route["route"]["pools"][0]["sqrtRatioX96"],
            "79228162514264337593543950336"
        );
        assert_eq!(
            route["route"]["pools"][0]["liquidity"],
            "1000000000000000000"
        );
    }

    #[test]
    fn mixed_hops_are_tagged() {
        // `b` sorts before `a`, so the pair's first reserve is `b`'s
        let (a, b, c) = (token(2, 18), token(1, 6), token(3, 8));
        let routes = single(
            domain_route::Route::mixed(
                a.clone(),
                c.clone(),
                vec![pair(&a, &b).into(), pool(&b, &c).into()],
            )
            .unwrap(),
        );
        let json: serde_json::Value =
            serde_json::from_slice(&marshal(&routes).unwrap()).unwrap();
        let hops = &json["routes"][0]["route"]["hops"];
        assert_eq!(hops[0]["type"], "v2-pair");
        assert_eq!(hops[0]["reserve0"]["numerator"], "2000000");
        assert_eq!(
            hops[0]["reserve0"]["token"]["address"],
            format!("0x{}", "01".repeat(20))
        );
        assert_eq!(hops[1]["type"], "v3-pool");
    }

    #[test]
    fn rejects_hops_of_the_wrong_kind() {
        let (a, b) = (token(1, 18), token(2, 6));
        let routes = v3(&a, &b);
        let mut json = serde_json::to_value(CachedRoutes::from_domain(&routes)).unwrap();
        json["routes"][0]["route"]["protocol"] = json!("V2");
        assert!(unmarshal(json.to_string().as_bytes()).is_err());

        json["routes"][0]["route"]["protocol"] = json!("V4");
        assert!(unmarshal(json.to_string().as_bytes()).is_err());
    }

    #[test]
    fn rejects_malformed_payloads() {
        let bytes = marshal(&cached_routes(1)).unwrap();
        let payloads: [&[u8]; 5] = [
            &bytes[..bytes.len() / 2],
            b"",
            b"null",
            b"{}",
            &[0xff, 0xfe, 0xfd],
        ];
        for payload in payloads {
            assert!(unmarshal(payload).is_err());
        }
    }

    #[test]
    fn rejects_out_of_range_percent() {
        let mut json = payload();
        json["routes"][0]["percent"] = json!(0);
        assert!(matches!(
            unmarshal(json.to_string().as_bytes()),
            Err(Error::Route(domain_route::InvalidRoute::Percent(0)))
        ));
    }

    #[test]
    fn rejects_routes_without_hops() {
        let mut json = payload();
        json["routes"][0]["route"]["pools"] = json!([]);
        assert!(matches!(
            unmarshal(json.to_string().as_bytes()),
            Err(Error::Route(domain_route::InvalidRoute::Empty))
        ));

        let mut json = payload();
        json["routes"][1]["route"]["hops"] = json!([]);
        assert!(matches!(
            unmarshal(json.to_string().as_bytes()),
            Err(Error::Route(domain_route::InvalidRoute::Empty))
        ));
    }

    #[test]
    fn rejects_disconnected_hops() {
        let mut json = payload();
        // drop the DAI -> WETH pool, leaving USDC -> DAI only
        json["routes"][1]["route"]["hops"]
            .as_array_mut()
            .unwrap()
            .pop();
        assert!(matches!(
            unmarshal(json.to_string().as_bytes()),
            Err(Error::Route(domain_route::InvalidRoute::Disconnected))
        ));
    }

    #[test]
    fn rejects_pools_with_identical_tokens() {
        let mut json = payload();
        let token0 = json["routes"][0]["route"]["pools"][0]["token0"].clone();
        json["routes"][0]["route"]["pools"][0]["token1"] = token0;
        assert!(matches!(
            unmarshal(json.to_string().as_bytes()),
            Err(Error::Route(domain_route::InvalidRoute::IdenticalTokens(_)))
        ));
    }

    #[test]
    fn rejects_empty_route_list() {
        let mut json = payload();
        json["routes"] = json!([]);
        assert!(matches!(
            unmarshal(json.to_string().as_bytes()),
            Err(Error::Route(domain_route::InvalidRoute::NoRoutes))
        ));
    }

    #[test]
    fn percent_sum_is_not_rederived() {
        let mut json = payload();
        json["routes"][0]["percent"] = json!(10);
        let routes = unmarshal(json.to_string().as_bytes()).unwrap();
        assert_eq!(routes.routes[0].percent, 10);
    }
}
