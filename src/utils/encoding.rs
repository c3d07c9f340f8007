use std::{fmt::Display, str::FromStr};

use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{DeserializeAs, SerializeAs};

const HEX_PREFIX: &str = "0x";

/// `serde_with` adapter for hex encoded values that must carry the `0x` prefix.
///
/// Width checks are left to the target type's `FromStr`, so fixed-size alloy
/// types (`B256`, `Address`, `FixedBytes<N>`) reject values of the wrong length.
pub struct HexPrefixed;

impl<T> SerializeAs<T> for HexPrefixed
where
    T: Serialize,
{
    fn serialize_as<S>(source: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        source.serialize(serializer)
    }
}

impl<'de, T> DeserializeAs<'de, T> for HexPrefixed
where
    T: FromStr,
    T::Err: Display,
{
    fn deserialize_as<D>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;

        parse_prefixed_hex(&value).map_err(D::Error::custom)
    }
}

pub fn parse_prefixed_hex<T>(value: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    if !value.starts_with(HEX_PREFIX) {
        return Err("hex string without 0x prefix".to_string());
    }

    value
        .parse::<T>()
        .map_err(|err| format!("invalid hex string: {err}"))
}
