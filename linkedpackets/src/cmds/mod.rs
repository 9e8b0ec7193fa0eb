pub mod create_id;
pub mod query;
pub mod start_link;
pub mod stop_link;
pub mod update_params;

use anyhow::{anyhow, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use linkedpackets_datastore::Datastore;
use linkedpackets_middleware::Keeper;

use crate::config::Config;
use crate::logging;

/// Options shared by every command that touches the datastore.
#[derive(Debug, Args)]
pub struct ConfigOpts {
    #[clap(long, env = "LINKEDPACKETS_CONFIG")]
    config: Option<PathBuf>,

    /// Overrides `storage_path` from the config file.
    #[clap(long)]
    storage_path: Option<PathBuf>,

    /// Overrides `log_level` from the config file.
    #[clap(long)]
    log_level: Option<String>,
}

impl ConfigOpts {
    pub fn load(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(storage_path) = &self.storage_path {
            config.storage_path = Some(storage_path.clone());
        }
        if let Some(log_level) = &self.log_level {
            config.log_level = Some(log_level.clone());
        }
        logging::init_logging(config.logs_path.clone(), config.logs_enabled, config.log_level.clone())?;
        Ok(config)
    }

    pub fn open_keeper(&self) -> Result<Keeper> {
        let config = self.load()?;
        let datastore = Datastore::open(&config.storage_path()?)?;
        log::debug!("opened datastore at {}", datastore.path().display());
        Ok(Keeper::new(Arc::new(datastore), config.authority()?)?)
    }

    /// Opens the datastore without taking the write lock.
    pub fn open_keeper_readonly(&self) -> Result<Keeper> {
        let config = self.load()?;
        let storage_path = config.storage_path()?;
        if !storage_path.exists() {
            return Err(anyhow!("No datastore found at {}", storage_path.display()));
        }
        let datastore = Datastore::open_read_only(&storage_path)?;
        log::debug!("opened datastore at {} (read-only)", datastore.path().display());
        Ok(Keeper::new(Arc::new(datastore), config.authority()?)?)
    }
}
