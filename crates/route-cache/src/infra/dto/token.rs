use {
    super::Error,
    crate::domain::eth,
    num::BigInt,
    primitive_types::H160,
    serde::{Deserialize, Serialize},
    serde_with::{DisplayFromStr, serde_as},
};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub chain_id: u64,
    pub address: H160,
    pub decimals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Token {
    pub fn from_domain(token: &eth::Token) -> Self {
        Self {
            chain_id: token.chain_id.id(),
            address: token.address,
            decimals: token.decimals,
            symbol: token.symbol.clone(),
            name: token.name.clone(),
        }
    }

    pub fn into_domain(self) -> Result<eth::Token, Error> {
        Ok(eth::Token {
            chain_id: self.chain_id.try_into()?,
            address: self.address,
            decimals: self.decimals,
            symbol: self.symbol,
            name: self.name,
        })
    }
}

/// An exact rational, numerator and denominator as decimal strings.
#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Amount {
    #[serde_as(as = "DisplayFromStr")]
    pub numerator: BigInt,
    #[serde_as(as = "DisplayFromStr")]
    pub denominator: BigInt,
}

impl Amount {
    pub fn from_domain(amount: &eth::RationalAmount) -> Self {
        Self {
            numerator: amount.numerator().clone(),
            denominator: amount.denominator().clone(),
        }
    }

    pub fn into_domain(self) -> Result<eth::RationalAmount, Error> {
        Ok(eth::RationalAmount::new(self.numerator, self.denominator)?)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenAmount {
    pub token: Token,
    #[serde(flatten)]
    pub amount: Amount,
}

impl TokenAmount {
    pub fn from_domain(amount: &eth::TokenAmount) -> Self {
        Self {
            token: Token::from_domain(&amount.token),
            amount: Amount::from_domain(&amount.amount),
        }
    }

    pub fn into_domain(self) -> Result<eth::TokenAmount, Error> {
        Ok(eth::TokenAmount::new(
            self.token.into_domain()?,
            self.amount.into_domain()?,
        ))
    }
}
