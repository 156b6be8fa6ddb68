//! Client builder that assembles the runtime from configuration.

use std::sync::Arc;

use anyhow::{Context, Result};

use runtime::{FileStateRepository, Runtime};

use crate::{Client, ClientConfig};

/// Builder for constructing a [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the Client.
    ///
    /// Loads content, opens the save directory and starts the runtime,
    /// resuming the session's save slot when one exists.
    pub async fn build(self) -> Result<Client> {
        let config = self.config;

        let catalog = Arc::new(config.load_catalog()?);
        let save_dir = config.resolve_save_dir()?;
        let repository = FileStateRepository::new(&save_dir)
            .with_context(|| format!("cannot open save directory {}", save_dir.display()))?;

        let runtime = Runtime::builder()
            .catalog(catalog.clone())
            .config(config.runtime_config())
            .repository(Arc::new(repository))
            .build()
            .await?;

        if let Some(day) = config.day {
            let previous = runtime.handle().set_day(day).await?;
            tracing::info!("Day set from {} to {}", previous, day);
        }

        Ok(Client {
            runtime,
            catalog,
            session_id: config.session_id,
        })
    }
}
