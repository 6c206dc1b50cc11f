use common::error::messages::{MALFORMED_NAME, MISSING_ARGUMENTS, MISSING_METALAKE};
use common::error::CliError;
use common::types::{CatalogIdentifier, NameIdentifier};

const CATALOG_SEGMENTS: &[&str] = &["catalog"];
const TABLE_SEGMENTS: &[&str] = &["catalog", "schema", "table"];
const FILESET_SEGMENTS: &[&str] = &["catalog", "schema", "fileset"];

/// Resolves `--name` (a dotted path below the metalake) together with the
/// metalake chosen by flag, environment or config file.
#[derive(Debug, Clone, Copy)]
pub struct FullName<'a> {
    metalake: Option<&'a str>,
    name: &'a str,
}

impl<'a> FullName<'a> {
    pub fn new(metalake: Option<&'a str>, name: &'a str) -> Self {
        Self { metalake, name }
    }

    pub fn catalog(&self) -> Result<CatalogIdentifier, CliError> {
        let metalake = self.metalake()?;
        let parts = self.split(CATALOG_SEGMENTS)?;
        Ok(CatalogIdentifier::new(metalake, parts[0]))
    }

    pub fn table(&self) -> Result<NameIdentifier, CliError> {
        self.schema_entity(TABLE_SEGMENTS)
    }

    pub fn fileset(&self) -> Result<NameIdentifier, CliError> {
        self.schema_entity(FILESET_SEGMENTS)
    }

    fn schema_entity(&self, expected: &[&str]) -> Result<NameIdentifier, CliError> {
        let metalake = self.metalake()?;
        let parts = self.split(expected)?;
        Ok(NameIdentifier::new(metalake, parts[0], parts[1], parts[2]))
    }

    fn metalake(&self) -> Result<&'a str, CliError> {
        self.metalake
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| CliError::usage(MISSING_METALAKE))
    }

    /// Split into exactly `expected.len()` non-empty segments.
    fn split(&self, expected: &[&str]) -> Result<Vec<&'a str>, CliError> {
        let name = self.name.trim();
        let parts: Vec<&'a str> = if name.is_empty() {
            Vec::new()
        } else {
            name.split('.').collect()
        };

        if parts.len() < expected.len() && parts.iter().all(|p| !p.is_empty()) {
            let missing = expected[parts.len()..].join(", ");
            return Err(CliError::usage(format!("{MISSING_ARGUMENTS} {missing}")));
        }
        if parts.len() != expected.len() || parts.iter().any(|p| p.is_empty()) {
            return Err(CliError::usage(MALFORMED_NAME));
        }
        Ok(parts)
    }
}
