pub mod anamnesis;
pub mod anthropometry;
pub mod clinical;
pub mod dietary;
pub mod evolution;
pub mod history;
pub mod identity;
pub mod intervention;
pub mod record;

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// Deserialize an optional value where older files wrote `""` for unset.
pub(crate) fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Deserialize a map whose values may be blank strings, dropping those.
pub(crate) fn map_skip_blank<'de, D, K, V>(deserializer: D) -> Result<BTreeMap<K, V>, D::Error>
where
    D: Deserializer<'de>,
    K: Deserialize<'de> + Ord,
    V: FromStr,
    V::Err: Display,
{
    let raw = BTreeMap::<K, String>::deserialize(deserializer)?;
    let mut out = BTreeMap::new();
    for (key, value) in raw {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        out.insert(key, value.parse().map_err(serde::de::Error::custom)?);
    }
    Ok(out)
}
