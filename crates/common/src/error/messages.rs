//! Fixed user-facing error lines.

pub const UNKNOWN_METALAKE: &str = "Unknown metalake name.";
pub const UNKNOWN_CATALOG: &str = "Unknown catalog name.";
pub const UNKNOWN_SCHEMA: &str = "Unknown schema name.";
pub const UNKNOWN_FILESET: &str = "Unknown fileset name.";
pub const UNKNOWN_TABLE: &str = "Unknown table name.";

pub const NO_CATALOG_PROPERTIES: &str = "No properties found for the catalog.";
pub const NO_TABLE_COLUMNS: &str = "No columns found for the specified table.";

pub const MISSING_METALAKE: &str = "Missing --metalake option.";
pub const MISSING_ARGUMENTS: &str = "Missing required argument(s):";
pub const MALFORMED_NAME: &str = "Malformed entity name.";
