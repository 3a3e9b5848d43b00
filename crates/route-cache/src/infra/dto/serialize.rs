//! serde_with adapters for values without a lossless string form of their
//! own.

use {
    primitive_types::U256,
    serde::{Deserialize, Deserializer, Serializer, de},
    serde_with::{DeserializeAs, SerializeAs},
};

/// Serializes a `U256` as a decimal string. `U256::from_str` parses hex, so
/// `DisplayFromStr` would not round-trip.
pub struct DecimalU256;

impl SerializeAs<U256> for DecimalU256 {
    fn serialize_as<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }
}

impl<'de> DeserializeAs<'de, U256> for DecimalU256 {
    fn deserialize_as<D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let value = String::deserialize(deserializer)?;
        U256::from_dec_str(&value)
            .map_err(|err| de::Error::custom(format!("invalid decimal U256 {value:?}: {err:?}")))
    }
}
