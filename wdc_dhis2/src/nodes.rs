//! DHIS2 objects as returned by the API, and the rows built from them.

mod user;

pub use user::{FlatUserRow, NamedRef, RawUserRecord, UserCredentials};

use anyhow::Context;
use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::rest::get_json_from_path;

/// Deserialize every element of the array found at `path`.
pub(crate) fn to_node_list<T: DeserializeOwned>(
    val: &serde_json::Value,
    path: &[&str],
) -> Result<Vec<T>, FetchError> {
    let list = get_json_from_path(val, path)
        .and_then(|v| {
            v.as_array()
                .ok_or_else(|| anyhow::anyhow!("expected `{}` to be an array", path.join(".")))
        })
        .map_err(|e| FetchError::Parse(e.to_string()))?;

    list.iter()
        .enumerate()
        .map(|(i, v)| {
            serde_json::from_value::<T>(v.to_owned())
                .with_context(|| format!("parsing {}[{i}]", path.join(".")))
                .map_err(|e| FetchError::Parse(format!("{e:#}")))
        })
        .collect()
}
