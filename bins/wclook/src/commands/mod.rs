//! Subcommand implementations.

pub mod list;
pub mod maps;
pub mod show;

use anyhow::Context;
use wclook_catalog::{CatalogClient, ClientConfig};

/// Build the catalog client from environment configuration.
pub fn catalog_client() -> anyhow::Result<CatalogClient> {
    let config = ClientConfig::from_env().context("invalid catalog configuration")?;
    CatalogClient::with_config(config).context("failed to build catalog client")
}
