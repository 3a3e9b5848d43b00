use {
    crate::util::conv,
    num::{BigInt, BigRational, Zero},
    std::fmt,
};

pub use primitive_types::{H160, U256};

/// Chains the router quotes on.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, strum::EnumIter)]
pub enum ChainId {
    Mainnet,
    Optimism,
    Bnb,
    Unichain,
    Polygon,
    ZkSync,
    WorldChain,
    Base,
    Arbitrum,
    Celo,
    Avalanche,
    Blast,
    Zora,
    Sepolia,
}

impl ChainId {
    pub fn id(self) -> u64 {
        match self {
            Self::Mainnet => 1,
            Self::Optimism => 10,
            Self::Bnb => 56,
            Self::Unichain => 130,
            Self::Polygon => 137,
            Self::ZkSync => 324,
            Self::WorldChain => 480,
            Self::Base => 8453,
            Self::Arbitrum => 42161,
            Self::Celo => 42220,
            Self::Avalanche => 43114,
            Self::Blast => 81457,
            Self::Zora => 7777777,
            Self::Sepolia => 11155111,
        }
    }
}

impl TryFrom<u64> for ChainId {
    type Error = UnknownChain;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        <Self as strum::IntoEnumIterator>::iter()
            .find(|chain| chain.id() == id)
            .ok_or(UnknownChain(id))
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown chain id {0}")]
pub struct UnknownChain(pub u64);

/// Direction of a quote: which side of the trade the requested amount fixes.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeType {
    ExactInput,
    ExactOutput,
}

/// An ERC20 token as seen by the router.
///
/// The address is stored as raw bytes, so tokens parsed from differently
/// cased hex strings compare equal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    pub chain_id: ChainId,
    pub address: H160,
    pub decimals: u8,
    pub symbol: Option<String>,
    pub name: Option<String>,
}

impl Token {
    pub fn new(chain_id: ChainId, address: H160, decimals: u8) -> Self {
        Self {
            chain_id,
            address,
            decimals,
            symbol: None,
            name: None,
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Whether both tokens refer to the same contract, ignoring metadata.
    pub fn same_as(&self, other: &Token) -> bool {
        self.chain_id == other.chain_id && self.address == other.address
    }
}

/// An exact rational number.
///
/// Equality is structural: `1/2` and `2/4` are different amounts, which is
/// what makes storage round-trips exact.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RationalAmount {
    numerator: BigInt,
    denominator: BigInt,
}

impl RationalAmount {
    pub fn new(numerator: BigInt, denominator: BigInt) -> Result<Self, InvalidAmount> {
        if denominator.is_zero() {
            return Err(InvalidAmount::ZeroDenominator);
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self {
            numerator: value.into(),
            denominator: BigInt::from(1_u8),
        }
    }

    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    pub fn to_ratio(&self) -> BigRational {
        BigRational::new(self.numerator.clone(), self.denominator.clone())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InvalidAmount {
    #[error("amount denominator must not be zero")]
    ZeroDenominator,
}

/// An amount of a token, expressed in the token's smallest unit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenAmount {
    pub token: Token,
    pub amount: RationalAmount,
}

impl TokenAmount {
    pub fn new(token: Token, amount: RationalAmount) -> Self {
        Self { token, amount }
    }

    /// Creates an amount from an integer count of the token's smallest unit.
    pub fn from_raw(token: Token, raw: impl Into<BigInt>) -> Self {
        Self::new(token, RationalAmount::from_integer(raw))
    }

    /// The amount in whole token units, e.g. `1.5` for 1_500_000 raw USDC.
    pub fn to_exact(&self) -> BigRational {
        conv::to_whole_units(
            self.amount.numerator(),
            self.amount.denominator(),
            self.token.decimals,
        )
        .expect("denominator is validated on construction")
    }
}
