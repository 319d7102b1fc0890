//! Wire types of the listing API of the marketplace
//!
//! The marketplace emits `null` for unset strings, so optional fields decode
//! both an absent key and `null` to their default.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Response of `/api/2.0/<category>`
///
/// The themes endpoint also returns its packages under `plugins`. The key is
/// required: a body without it is not a listing.
#[derive(Debug, Deserialize)]
pub struct ListingResponse {
    pub plugins: Vec<ApiPackage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPackage {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub versions: Vec<ApiPackageVersion>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_downloadable: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_theme: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub homepage: String,
}

/// One published release of a package
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPackageVersion {
    /// Release label, e.g. "4.2.1"
    pub name: String,
    /// Download path relative to the marketplace base URL
    #[serde(default, deserialize_with = "null_as_default")]
    pub download: String,
    #[serde(default)]
    pub license: Option<IndexMap<String, Value>>,
    /// Either `[]`, `{}` or a requirement mapping; converted during evaluation
    #[serde(default)]
    pub requires: Value,
}

impl ApiPackageVersion {
    pub fn license_name(&self) -> String {
        self.license
            .as_ref()
            .and_then(|license| license.get("name"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
