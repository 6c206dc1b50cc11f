use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_LOCATION_NAME: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilesetType {
    Managed,
    #[serde(other)]
    External,
}

impl FilesetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilesetType::Managed => "managed",
            FilesetType::External => "external",
        }
    }
}

/// Fileset as returned by the service.
///
/// Older servers send a single `storageLocation`; newer ones send a map of
/// named `storageLocations` where `default` is the primary one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fileset {
    pub name: String,
    #[serde(rename = "type")]
    pub fileset_type: FilesetType,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub storage_location: Option<String>,
    #[serde(default)]
    pub storage_locations: BTreeMap<String, String>,
    #[serde(default)]
    pub properties: Option<BTreeMap<String, String>>,
}

impl Fileset {
    pub fn new(
        name: impl Into<String>,
        fileset_type: FilesetType,
        comment: Option<&str>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            fileset_type,
            comment: comment.map(str::to_owned),
            storage_location: Some(location.into()),
            storage_locations: BTreeMap::new(),
            properties: None,
        }
    }

    pub fn location(&self) -> Option<&str> {
        self.storage_location
            .as_deref()
            .or_else(|| {
                self.storage_locations
                    .get(DEFAULT_LOCATION_NAME)
                    .map(String::as_str)
            })
            .or_else(|| self.storage_locations.values().next().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_single_storage_location() {
        let fileset: Fileset = serde_json::from_value(json!({
            "name": "fs1",
            "type": "managed",
            "comment": "demo",
            "storageLocation": "/data/fs1"
        }))
        .unwrap();

        assert_eq!(fileset.fileset_type, FilesetType::Managed);
        assert_eq!(fileset.location(), Some("/data/fs1"));
    }

    #[test]
    fn prefers_default_named_location() {
        let fileset: Fileset = serde_json::from_value(json!({
            "name": "fs1",
            "type": "external",
            "storageLocations": {"backup": "s3://b/fs1", "default": "hdfs://a/fs1"}
        }))
        .unwrap();

        assert_eq!(fileset.location(), Some("hdfs://a/fs1"));
        assert_eq!(fileset.comment, None);
    }

    #[test]
    fn unrecognised_type_is_external() {
        let fileset: Fileset = serde_json::from_value(json!({
            "name": "fs1",
            "type": "virtual",
            "storageLocation": "/x"
        }))
        .unwrap();
        assert_eq!(fileset.fileset_type.as_str(), "external");
    }
}
