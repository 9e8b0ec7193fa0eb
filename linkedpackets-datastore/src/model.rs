use std::collections::HashMap;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::datastore::Datastore;

/// A JSON record stored under a key rendered from `KEY_TEMPLATE`, for
/// example `/linkedpackets/link_enabled/${port_id}/${channel_id}`.
#[async_trait]
pub trait Model: Sized + Serialize + DeserializeOwned + Send + Sync {
    const KEY_TEMPLATE: &'static str;

    /// Filled in for fields absent from a stored record.
    const DEFAULTS: &'static [(&'static str, serde_json::Value)] = &[];

    fn key_params(&self) -> HashMap<String, String>;

    fn key(&self) -> Result<String> {
        render_key(Self::KEY_TEMPLATE, &self.key_params())
    }

    fn decode(json: &str) -> Result<Self> {
        let mut value: serde_json::Value =
            serde_json::from_str(json).with_context(|| format!("{} is not valid JSON", Self::KEY_TEMPLATE))?;
        let object = value
            .as_object_mut()
            .ok_or_else(|| anyhow!("{} record must be a JSON object", Self::KEY_TEMPLATE))?;
        for (field, default) in Self::DEFAULTS {
            object
                .entry(field.to_string())
                .or_insert_with(|| default.clone());
        }
        serde_json::from_value(value).with_context(|| format!("malformed {} record", Self::KEY_TEMPLATE))
    }

    fn encode(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize record")
    }

    async fn save(&self, datastore: &Datastore) -> Result<()> {
        let key = self.key()?;
        datastore
            .put(&key, self.encode()?.as_bytes())
            .await
            .with_context(|| format!("Failed to save {}", key))
    }

    async fn find(datastore: &Datastore, params: &HashMap<String, String>) -> Result<Option<Self>> {
        let key = render_key(Self::KEY_TEMPLATE, params)?;
        match datastore.get_string(&key).await? {
            Some(json) => Ok(Some(Self::decode(&json)?)),
            None => Ok(None),
        }
    }

    async fn exists(datastore: &Datastore, params: &HashMap<String, String>) -> Result<bool> {
        let key = render_key(Self::KEY_TEMPLATE, params)?;
        Ok(datastore.contains(&key).await?)
    }
}

/// Substitutes every `${name}` in `template`. Values may not contain `/`,
/// so one parameter never spans several key segments.
pub fn render_key(template: &str, params: &HashMap<String, String>) -> Result<String> {
    let placeholder = Regex::new(r"\$\{(\w+)\}")?;
    let mut key = String::with_capacity(template.len());
    let mut rest = 0;
    for caps in placeholder.captures_iter(template) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value = params
            .get(name.as_str())
            .ok_or_else(|| anyhow!("missing {} for {}", name.as_str(), template))?;
        if value.is_empty() || value.contains('/') {
            bail!("invalid {} {:?} for {}", name.as_str(), value, template);
        }
        key.push_str(&template[rest..whole.start()]);
        key.push_str(value);
        rest = whole.end();
    }
    key.push_str(&template[rest..]);
    Ok(key)
}
