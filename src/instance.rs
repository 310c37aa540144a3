//! Instance records decoded from the locator's JSON output.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

use crate::options::Sku;

/// Catalog details the locator nests under `catalog`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Catalog {
    #[serde(deserialize_with = "null_as_default")]
    pub product_display_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub product_line_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub product_semantic_version: String,
}

/// Reads an explicit `null` as the type's default, like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One installed Visual Studio instance.
///
/// The locator defines the schema, so every field is optional and unknown
/// fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisualStudioInstance {
    #[serde(deserialize_with = "null_as_default")]
    pub instance_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub installation_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub installation_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub installation_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub channel_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub product_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_prerelease: bool,
    pub catalog: Option<Catalog>,
    #[serde(deserialize_with = "null_as_default")]
    pub properties: BTreeMap<String, serde_json::Value>,
}

impl VisualStudioInstance {
    /// Release channel name, the last segment of `channelId`
    /// (`VisualStudio.17.Preview` is `Preview`).
    pub fn channel(&self) -> Option<&str> {
        self.channel_id
            .rsplit('.')
            .next()
            .filter(|s| !s.is_empty())
    }

    pub fn sku(&self) -> Option<Sku> {
        Sku::from_product_id(&self.product_id)
    }

    /// The user-assigned nickname stored in the instance properties.
    pub fn nickname(&self) -> Option<&str> {
        self.properties
            .get("nickname")
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// A one-line label for lists: display name, version and nickname.
    pub fn label(&self) -> String {
        let name = if self.display_name.is_empty() {
            self.installation_name.as_str()
        } else {
            self.display_name.as_str()
        };
        let version = self
            .catalog
            .as_ref()
            .map(|c| c.product_display_version.as_str())
            .filter(|v| !v.is_empty())
            .unwrap_or(self.installation_version.as_str());

        let mut label = name.to_string();
        if !version.is_empty() {
            label.push_str(&format!(" ({version})"));
        }
        if let Some(nickname) = self.nickname() {
            label.push_str(&format!(" [{nickname}]"));
        }
        label
    }
}

/// Decodes the full locator output as a JSON array of instances.
pub fn decode_instances(json: &str) -> serde_json::Result<Vec<VisualStudioInstance>> {
    serde_json::from_str(json)
}
