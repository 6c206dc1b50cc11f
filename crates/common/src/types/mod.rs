pub mod catalog;
pub mod column;
pub mod fileset;
pub mod identifier;

pub use catalog::{Catalog, CatalogChange, CatalogType};
pub use column::{Column, DataType};
pub use fileset::{Fileset, FilesetType};
pub use identifier::{CatalogIdentifier, NameIdentifier};
