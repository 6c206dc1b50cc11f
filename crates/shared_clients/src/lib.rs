pub mod error;
pub mod gravitino;
pub mod version;

use crate::error::CatalogClientError;
use async_trait::async_trait;
use common::types::{Catalog, CatalogChange, Column, Fileset};
use std::ops::Deref;
use std::time::Duration;

pub use gravitino::{RestCatalogClient, RestConnector};

/// Remote calls the CLI needs from the catalog service, scoped to one
/// metalake.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn load_catalog(&self, catalog: &str) -> Result<Catalog, CatalogClientError>;

    async fn load_fileset(
        &self,
        catalog: &str,
        schema: &str,
        fileset: &str,
    ) -> Result<Fileset, CatalogClientError>;

    /// Columns of a table, in table order.
    async fn load_table_columns(
        &self,
        catalog: &str,
        schema: &str,
        table: &str,
    ) -> Result<Vec<Column>, CatalogClientError>;

    async fn alter_catalog(
        &self,
        catalog: &str,
        changes: &[CatalogChange],
    ) -> Result<Catalog, CatalogClientError>;

    /// Release the handle. Called once, by [`ScopedClient`].
    fn close(&mut self);
}

/// Produces a client handle bound to a metalake.
#[async_trait]
pub trait CatalogConnector: Send + Sync {
    async fn connect(&self, metalake: &str) -> Result<Box<dyn CatalogService>, CatalogClientError>;
}

#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub url: String,
    /// Skip the client/server version comparison.
    pub ignore_versions: bool,
    pub timeout: Duration,
}

impl ConnectOptions {
    pub fn new(url: impl Into<String>, ignore_versions: bool) -> Self {
        Self {
            url: url.into(),
            ignore_versions,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Owns a client handle and closes it when dropped, so every exit path of a
/// command releases it exactly once.
pub struct ScopedClient {
    inner: Box<dyn CatalogService>,
}

impl ScopedClient {
    pub fn new(inner: Box<dyn CatalogService>) -> Self {
        Self { inner }
    }
}

impl Deref for ScopedClient {
    type Target = dyn CatalogService;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

impl Drop for ScopedClient {
    fn drop(&mut self) {
        self.inner.close();
    }
}
