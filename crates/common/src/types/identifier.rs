use std::fmt::{self, Display};

/// `metalake.catalog`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogIdentifier {
    metalake: String,
    catalog: String,
}

impl CatalogIdentifier {
    pub fn new(metalake: impl Into<String>, catalog: impl Into<String>) -> Self {
        Self {
            metalake: metalake.into(),
            catalog: catalog.into(),
        }
    }

    pub fn metalake(&self) -> &str {
        &self.metalake
    }

    pub fn catalog(&self) -> &str {
        &self.catalog
    }
}

impl Display for CatalogIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.metalake, self.catalog)
    }
}

/// Fully qualified name of a schema-level entity (table or fileset):
/// `metalake.catalog.schema.name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameIdentifier {
    catalog: CatalogIdentifier,
    schema: String,
    name: String,
}

impl NameIdentifier {
    pub fn new(
        metalake: impl Into<String>,
        catalog: impl Into<String>,
        schema: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            catalog: CatalogIdentifier::new(metalake, catalog),
            schema: schema.into(),
            name: name.into(),
        }
    }

    pub fn metalake(&self) -> &str {
        self.catalog.metalake()
    }

    pub fn catalog(&self) -> &str {
        self.catalog.catalog()
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for NameIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.catalog, self.schema, self.name)
    }
}
