use async_trait::async_trait;
use common::types::{Catalog, CatalogChange, CatalogType, Column, Fileset};
use parking_lot::RwLock;
use shared_clients::error::{CatalogClientError, NotFoundKind};
use shared_clients::{CatalogConnector, CatalogService};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

type SchemaKey = (String, String);
type EntityKey = (String, String, String);

#[derive(Default)]
struct State {
    metalakes: HashSet<String>,
    catalogs: HashMap<String, Catalog>,
    schemas: HashSet<SchemaKey>,
    filesets: HashMap<EntityKey, Fileset>,
    tables: HashMap<EntityKey, Vec<Column>>,
    connect_failure: Option<String>,
    call_failure: Option<String>,
    connections: usize,
    closes: usize,
    applied: Vec<(String, CatalogChange)>,
}

/// In-memory stand-in for the catalog service.
///
/// Lookups fail from the outside in, the way the real service does: an
/// unknown catalog is reported before an unknown schema, and so on. Clones
/// share state, so a test can keep one copy to inspect after handing another
/// to the code under test.
#[derive(Clone, Default)]
pub struct FakeCatalog {
    inner: Arc<RwLock<State>>,
}

impl FakeCatalog {
    pub fn new(metalake: &str) -> Self {
        let fake = Self::default();
        fake.inner.write().metalakes.insert(metalake.to_string());
        fake
    }

    pub fn with_catalog(self, catalog: Catalog) -> Self {
        self.inner
            .write()
            .catalogs
            .insert(catalog.name.clone(), catalog);
        self
    }

    pub fn with_schema(self, catalog: &str, schema: &str) -> Self {
        self.inner
            .write()
            .schemas
            .insert((catalog.to_string(), schema.to_string()));
        self
    }

    pub fn with_fileset(self, catalog: &str, schema: &str, fileset: Fileset) -> Self {
        let key = (catalog.to_string(), schema.to_string(), fileset.name.clone());
        self.inner.write().filesets.insert(key, fileset);
        self
    }

    pub fn with_table(self, catalog: &str, schema: &str, table: &str, columns: Vec<Column>) -> Self {
        let key = (catalog.to_string(), schema.to_string(), table.to_string());
        self.inner.write().tables.insert(key, columns);
        self
    }

    /// Every connect attempt fails with an unexpected error carrying `message`.
    pub fn failing_connect(self, message: &str) -> Self {
        self.inner.write().connect_failure = Some(message.to_string());
        self
    }

    /// Every remote call after connecting fails with `message`.
    pub fn failing_calls(self, message: &str) -> Self {
        self.inner.write().call_failure = Some(message.to_string());
        self
    }

    pub fn connections(&self) -> usize {
        self.inner.read().connections
    }

    pub fn closes(&self) -> usize {
        self.inner.read().closes
    }

    /// Changes applied through `alter_catalog`, in order.
    pub fn applied_changes(&self) -> Vec<(String, CatalogChange)> {
        self.inner.read().applied.clone()
    }

    pub fn catalog(&self, name: &str) -> Option<Catalog> {
        self.inner.read().catalogs.get(name).cloned()
    }
}

/// Shorthand for a catalog with the given properties.
pub fn catalog_with_properties(name: &str, properties: &[(&str, &str)]) -> Catalog {
    Catalog {
        name: name.to_string(),
        catalog_type: CatalogType::Fileset,
        provider: Some("hadoop".to_string()),
        comment: None,
        properties: Some(
            properties
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
        ),
    }
}

#[async_trait]
impl CatalogConnector for FakeCatalog {
    async fn connect(&self, metalake: &str) -> Result<Box<dyn CatalogService>, CatalogClientError> {
        let mut state = self.inner.write();
        if let Some(message) = &state.connect_failure {
            return Err(CatalogClientError::failed_to_connect(message.clone()));
        }
        if !state.metalakes.contains(metalake) {
            return Err(CatalogClientError::not_found(
                NotFoundKind::Metalake,
                format!("Metalake {metalake} does not exist"),
            ));
        }
        state.connections += 1;
        Ok(Box::new(FakeClient {
            state: self.inner.clone(),
            closed: false,
        }))
    }
}

struct FakeClient {
    state: Arc<RwLock<State>>,
    closed: bool,
}

impl FakeClient {
    fn check(&self, state: &State) -> Result<(), CatalogClientError> {
        if self.closed {
            return Err(CatalogClientError::unexpected("client already closed"));
        }
        match &state.call_failure {
            Some(message) => Err(CatalogClientError::unexpected(message.clone())),
            None => Ok(()),
        }
    }

    fn require_schema(state: &State, catalog: &str, schema: &str) -> Result<(), CatalogClientError> {
        if !state.catalogs.contains_key(catalog) {
            return Err(CatalogClientError::not_found(
                NotFoundKind::Catalog,
                format!("Catalog {catalog} does not exist"),
            ));
        }
        if !state
            .schemas
            .contains(&(catalog.to_string(), schema.to_string()))
        {
            return Err(CatalogClientError::not_found(
                NotFoundKind::Schema,
                format!("Schema {catalog}.{schema} does not exist"),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogService for FakeClient {
    async fn load_catalog(&self, catalog: &str) -> Result<Catalog, CatalogClientError> {
        let state = self.state.read();
        self.check(&state)?;
        state.catalogs.get(catalog).cloned().ok_or_else(|| {
            CatalogClientError::not_found(
                NotFoundKind::Catalog,
                format!("Catalog {catalog} does not exist"),
            )
        })
    }

    async fn load_fileset(
        &self,
        catalog: &str,
        schema: &str,
        fileset: &str,
    ) -> Result<Fileset, CatalogClientError> {
        let state = self.state.read();
        self.check(&state)?;
        Self::require_schema(&state, catalog, schema)?;
        let key = (catalog.to_string(), schema.to_string(), fileset.to_string());
        state.filesets.get(&key).cloned().ok_or_else(|| {
            CatalogClientError::not_found(
                NotFoundKind::Fileset,
                format!("Fileset {catalog}.{schema}.{fileset} does not exist"),
            )
        })
    }

    async fn load_table_columns(
        &self,
        catalog: &str,
        schema: &str,
        table: &str,
    ) -> Result<Vec<Column>, CatalogClientError> {
        let state = self.state.read();
        self.check(&state)?;
        Self::require_schema(&state, catalog, schema)?;
        let key = (catalog.to_string(), schema.to_string(), table.to_string());
        state.tables.get(&key).cloned().ok_or_else(|| {
            CatalogClientError::not_found(
                NotFoundKind::Table,
                format!("Table {catalog}.{schema}.{table} does not exist"),
            )
        })
    }

    async fn alter_catalog(
        &self,
        catalog: &str,
        changes: &[CatalogChange],
    ) -> Result<Catalog, CatalogClientError> {
        let mut state = self.state.write();
        self.check(&state)?;

        let Some(entry) = state.catalogs.get_mut(catalog) else {
            return Err(CatalogClientError::not_found(
                NotFoundKind::Catalog,
                format!("Catalog {catalog} does not exist"),
            ));
        };
        for change in changes {
            match change {
                CatalogChange::RemoveProperty { property } => {
                    if let Some(props) = entry.properties.as_mut() {
                        props.remove(property);
                    }
                }
                CatalogChange::SetProperty { property, value } => {
                    entry
                        .properties
                        .get_or_insert_with(BTreeMap::new)
                        .insert(property.clone(), value.clone());
                }
                CatalogChange::UpdateComment { new_comment } => {
                    entry.comment = Some(new_comment.clone());
                }
                CatalogChange::Rename { new_name } => {
                    entry.name = new_name.clone();
                }
            }
        }
        let updated = entry.clone();
        state
            .applied
            .extend(changes.iter().map(|c| (catalog.to_string(), c.clone())));
        Ok(updated)
    }

    fn close(&mut self) {
        self.closed = true;
        self.state.write().closes += 1;
    }
}
