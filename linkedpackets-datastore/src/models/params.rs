use crate::model::Model;
use crate::Datastore;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Module parameters. No tunables are defined yet; the record exists so the
/// authority-gated update path and the params query have a stable shape.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Params {}

#[async_trait]
impl Model for Params {
    const KEY_TEMPLATE: &'static str = "/linkedpackets/params";

    fn key_params(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}

impl Params {
    pub fn validate(&self) -> Result<()> {
        Ok(())
    }

    pub async fn load(datastore: &Datastore) -> Result<Option<Self>> {
        Self::find(datastore, &HashMap::new()).await
    }
}
