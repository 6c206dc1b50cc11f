use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogType {
    Relational,
    Fileset,
    Messaging,
    Model,
    #[serde(other)]
    Unsupported,
}

impl Display for CatalogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CatalogType::Relational => "relational",
            CatalogType::Fileset => "fileset",
            CatalogType::Messaging => "messaging",
            CatalogType::Model => "model",
            CatalogType::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

/// Catalog as returned by the service. Properties may be absent altogether.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub name: String,
    #[serde(rename = "type")]
    pub catalog_type: CatalogType,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub properties: Option<BTreeMap<String, String>>,
}

/// A single change in an `alter catalog` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "@type", rename_all = "camelCase")]
pub enum CatalogChange {
    Rename {
        #[serde(rename = "newName")]
        new_name: String,
    },
    UpdateComment {
        #[serde(rename = "newComment")]
        new_comment: String,
    },
    SetProperty {
        property: String,
        value: String,
    },
    RemoveProperty {
        property: String,
    },
}

impl CatalogChange {
    pub fn remove_property(property: impl Into<String>) -> Self {
        CatalogChange::RemoveProperty {
            property: property.into(),
        }
    }
}
