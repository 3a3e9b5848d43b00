use {
    crate::domain::{
        eth,
        route::{CachedRoute, InvalidRoute, Protocol},
    },
    std::collections::BTreeSet,
};

/// The routes the router computed for one quote request, as of a block.
///
/// This is the payload that gets cached. A quote may be split across several
/// routes; their percents add up to 100.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CachedRoutes {
    pub routes: Vec<CachedRoute>,
    pub chain_id: eth::ChainId,
    pub token_in: eth::Token,
    pub token_out: eth::Token,
    pub protocols_covered: BTreeSet<Protocol>,
    pub block_number: u64,
    pub trade_type: eth::TradeType,
    /// The request amount in whole units, as the router received it.
    pub original_amount: String,
    pub blocks_to_live: u64,
}

impl CachedRoutes {
    /// Assembles the payload for a freshly computed quote, checking that the
    /// route percents account for the whole trade.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        routes: Vec<CachedRoute>,
        chain_id: eth::ChainId,
        token_in: eth::Token,
        token_out: eth::Token,
        protocols_covered: BTreeSet<Protocol>,
        block_number: u64,
        trade_type: eth::TradeType,
        original_amount: String,
        blocks_to_live: u64,
    ) -> Result<Self, InvalidRoute> {
        if routes.is_empty() {
            return Err(InvalidRoute::NoRoutes);
        }
        let total: u32 = routes.iter().map(|route| u32::from(route.percent)).sum();
        if total != 100 {
            return Err(InvalidRoute::PercentSum(total));
        }
        Ok(Self {
            routes,
            chain_id,
            token_in,
            token_out,
            protocols_covered,
            block_number,
            trade_type,
            original_amount,
            blocks_to_live,
        })
    }

    /// Whether the routes can still be used at `current_block`. Optimistic
    /// reads accept routes of any age.
    pub fn not_expired(&self, current_block: u64, optimistic: bool) -> bool {
        optimistic || current_block.saturating_sub(self.block_number) <= self.blocks_to_live
    }

    /// The protocols actually used by the cached routes.
    pub fn protocols_used(&self) -> BTreeSet<Protocol> {
        self.routes.iter().map(CachedRoute::protocol).collect()
    }
}


#[cfg(test)]
mod tests {
    use {
        super::{testing::cached_routes, *},
        maplit::btreeset,
    };

    #[test]
    fn percents_must_sum_to_100() {
        let routes = cached_routes(1);
        let mut short = routes.routes.clone();
        short.pop();
        let result = CachedRoutes::new(
            short,
            routes.chain_id,
            routes.token_in.clone(),
            routes.token_out.clone(),
            routes.protocols_covered.clone(),
            1,
            routes.trade_type,
            routes.original_amount.clone(),
            routes.blocks_to_live,
        );
        assert!(matches!(result, Err(InvalidRoute::PercentSum(60))));

        let result = CachedRoutes::new(
            vec![],
            routes.chain_id,
            routes.token_in.clone(),
            routes.token_out.clone(),
            routes.protocols_covered.clone(),
            1,
            routes.trade_type,
            routes.original_amount.clone(),
            routes.blocks_to_live,
        );
        assert!(matches!(result, Err(InvalidRoute::NoRoutes)));
    }

    #[test]
    fn expiry_is_measured_in_blocks() {
        let routes = cached_routes(100);
        assert!(routes.not_expired(100, false));
        assert!(routes.not_expired(102, false));
        assert!(!routes.not_expired(103, false));
        assert!(routes.not_expired(1_000, true));
        // a lagging node never sees cached routes as expired
        assert!(routes.not_expired(99, false));
    }

    #[test]
    fn protocols_used_by_routes() {
        assert_eq!(
            cached_routes(1).protocols_used(),
            btreeset! { Protocol::V3, Protocol::Mixed }
        );
    }
}
