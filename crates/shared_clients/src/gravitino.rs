//! REST client for a Gravitino-compatible catalog service.

use crate::error::{CatalogClientError, ErrorResponse};
use crate::version::{check_compatible, CLIENT_VERSION};
use crate::{CatalogConnector, CatalogService, ConnectOptions};
use async_trait::async_trait;
use common::types::{Catalog, CatalogChange, Column, Fileset};
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

const ACCEPT_VERSION: &str = "application/vnd.gravitino.v1+json";

#[derive(Deserialize)]
struct VersionResponse {
    version: VersionInfo,
}

#[derive(Deserialize)]
struct VersionInfo {
    version: String,
}

#[derive(Deserialize)]
struct MetalakeResponse {
    metalake: MetalakeInfo,
}

#[derive(Deserialize)]
struct MetalakeInfo {
    name: String,
}

#[derive(Deserialize)]
struct CatalogResponse {
    catalog: Catalog,
}

#[derive(Deserialize)]
struct FilesetResponse {
    fileset: Fileset,
}

#[derive(Deserialize)]
struct TableResponse {
    table: TableInfo,
}

#[derive(Deserialize)]
struct TableInfo {
    #[serde(default)]
    columns: Vec<Column>,
}

#[derive(Serialize)]
struct CatalogUpdatesRequest<'a> {
    updates: &'a [CatalogChange],
}

/// Client handle bound to one metalake.
#[derive(Debug)]
pub struct RestCatalogClient {
    http: Client,
    base_url: Url,
    metalake: String,
    closed: bool,
}

impl RestCatalogClient {
    /// Build a client, compare versions unless told not to, and make sure the
    /// metalake exists.
    pub async fn connect(
        options: &ConnectOptions,
        metalake: &str,
    ) -> Result<Self, CatalogClientError> {
        let base_url = Url::parse(&options.url).map_err(|err| {
            CatalogClientError::failed_to_connect(format!(
                "Invalid server URL '{}': {err}",
                options.url
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogClientError::failed_to_connect(format!(
                "Invalid server URL '{}'",
                options.url
            )));
        }

        let http = Client::builder().timeout(options.timeout).build()?;
        let client = Self {
            http,
            base_url,
            metalake: metalake.to_string(),
            closed: false,
        };

        if options.ignore_versions {
            debug!("skipping client/server version check");
        } else {
            let server = client.server_version().await?;
            check_compatible(CLIENT_VERSION, &server)?;
            debug!(client = CLIENT_VERSION, server = %server, "versions are compatible");
        }

        let url = client.endpoint(&["api", "metalakes", metalake])?;
        let found: MetalakeResponse = client.execute(client.http.get(url)).await?;
        debug!(metalake = %found.metalake.name, "connected to catalog service");

        Ok(client)
    }

    pub fn metalake(&self) -> &str {
        &self.metalake
    }

    pub async fn server_version(&self) -> Result<String, CatalogClientError> {
        let url = self.endpoint(&["api", "version"])?;
        let response: VersionResponse = self.execute(self.http.get(url)).await?;
        Ok(response.version.version)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogClientError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                CatalogClientError::failed_to_connect(format!(
                    "Invalid server URL '{}'",
                    self.base_url
                ))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    fn catalog_endpoint(&self, catalog: &str, rest: &[&str]) -> Result<Url, CatalogClientError> {
        let mut segments = vec!["api", "metalakes", self.metalake.as_str(), "catalogs", catalog];
        segments.extend_from_slice(rest);
        self.endpoint(&segments)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, CatalogClientError> {
        if self.closed {
            return Err(CatalogClientError::unexpected(
                "catalog client has already been closed",
            ));
        }

        let response = request.header(ACCEPT, ACCEPT_VERSION).send().await?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "catalog service response");

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(error) => Err(error.into_error(status)),
            Err(_) => Err(CatalogClientError::unexpected(format!(
                "request failed with status {}: {}",
                status.as_u16(),
                body.trim()
            ))),
        }
    }
}

#[async_trait]
impl CatalogService for RestCatalogClient {
    async fn load_catalog(&self, catalog: &str) -> Result<Catalog, CatalogClientError> {
        let url = self.catalog_endpoint(catalog, &[])?;
        let response: CatalogResponse = self.execute(self.http.get(url)).await?;
        Ok(response.catalog)
    }

    async fn load_fileset(
        &self,
        catalog: &str,
        schema: &str,
        fileset: &str,
    ) -> Result<Fileset, CatalogClientError> {
        let url = self.catalog_endpoint(catalog, &["schemas", schema, "filesets", fileset])?;
        let response: FilesetResponse = self.execute(self.http.get(url)).await?;
        Ok(response.fileset)
    }

    async fn load_table_columns(
        &self,
        catalog: &str,
        schema: &str,
        table: &str,
    ) -> Result<Vec<Column>, CatalogClientError> {
        let url = self.catalog_endpoint(catalog, &["schemas", schema, "tables", table])?;
        let response: TableResponse = self.execute(self.http.get(url)).await?;
        Ok(response.table.columns)
    }

    async fn alter_catalog(
        &self,
        catalog: &str,
        changes: &[CatalogChange],
    ) -> Result<Catalog, CatalogClientError> {
        let url = self.catalog_endpoint(catalog, &[])?;
        let body = CatalogUpdatesRequest { updates: changes };
        let response: CatalogResponse = self.execute(self.http.put(url).json(&body)).await?;
        Ok(response.catalog)
    }

    fn close(&mut self) {
        if !self.closed {
            debug!(metalake = %self.metalake, "closing catalog client");
            self.closed = true;
        }
    }
}

/// Connects [`RestCatalogClient`]s with fixed options.
#[derive(Debug, Clone)]
pub struct RestConnector {
    options: ConnectOptions,
}

impl RestConnector {
    pub fn new(options: ConnectOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl CatalogConnector for RestConnector {
    async fn connect(&self, metalake: &str) -> Result<Box<dyn CatalogService>, CatalogClientError> {
        let client = RestCatalogClient::connect(&self.options, metalake).await?;
        Ok(Box::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotFoundKind;
    use common::types::{DataType, FilesetType};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_metalake(server: &MockServer, name: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/api/metalakes/{name}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "metalake": {"name": name, "comment": null, "properties": {}}
            })))
            .mount(server)
            .await;
    }

    async fn connect(server: &MockServer, metalake: &str) -> RestCatalogClient {
        let options = ConnectOptions::new(server.uri(), true);
        RestCatalogClient::connect(&options, metalake)
            .await
            .expect("client should connect")
    }

    fn not_found(exception: &str, message: &str) -> ResponseTemplate {
        ResponseTemplate::new(404).set_body_json(json!({
            "code": 1003,
            "type": exception,
            "message": message
        }))
    }

    #[tokio::test]
    async fn connect_reports_unknown_metalake() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/metalakes/nope"))
            .respond_with(not_found("NoSuchMetalakeException", "Metalake nope does not exist"))
            .mount(&server)
            .await;

        let options = ConnectOptions::new(server.uri(), true);
        let err = RestCatalogClient::connect(&options, "nope").await.unwrap_err();
        assert_eq!(err.not_found_kind(), Some(NotFoundKind::Metalake));
    }

    #[tokio::test]
    async fn connect_checks_server_version() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/version"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "version": {"version": "0.0.1", "compileDate": "", "gitCommit": ""}
            })))
            .mount(&server)
            .await;
        mount_metalake(&server, "lake1").await;

        let options = ConnectOptions::new(server.uri(), false);
        let err = RestCatalogClient::connect(&options, "lake1").await.unwrap_err();
        assert!(matches!(err, CatalogClientError::VersionMismatch { .. }));
    }

    #[tokio::test]
    async fn connect_accepts_newer_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/version"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "version": {"version": "99.0.0-SNAPSHOT"}
            })))
            .expect(1)
            .mount(&server)
            .await;
        mount_metalake(&server, "lake1").await;

        let options = ConnectOptions::new(server.uri(), false);
        let client = RestCatalogClient::connect(&options, "lake1").await.unwrap();
        assert_eq!(client.metalake(), "lake1");
    }

    #[tokio::test]
    async fn loads_catalog_with_accept_header() {
        let server = MockServer::start().await;
        mount_metalake(&server, "lake1").await;
        Mock::given(method("GET"))
            .and(path("/api/metalakes/lake1/catalogs/cat1"))
            .and(header("accept", ACCEPT_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "catalog": {
                    "name": "cat1",
                    "type": "relational",
                    "provider": "hive",
                    "comment": "warehouse",
                    "properties": {"metastore.uris": "thrift://hms:9083"}
                }
            })))
            .mount(&server)
            .await;

        let client = connect(&server, "lake1").await;
        let catalog = client.load_catalog("cat1").await.unwrap();
        assert_eq!(catalog.provider.as_deref(), Some("hive"));
        assert_eq!(
            catalog.properties.unwrap()["metastore.uris"],
            "thrift://hms:9083"
        );
    }

    #[tokio::test]
    async fn fileset_lookup_maps_schema_not_found() {
        let server = MockServer::start().await;
        mount_metalake(&server, "lake1").await;
        Mock::given(method("GET"))
            .and(path("/api/metalakes/lake1/catalogs/cat1/schemas/missing/filesets/fs1"))
            .respond_with(not_found("NoSuchSchemaException", "Schema missing does not exist"))
            .mount(&server)
            .await;

        let client = connect(&server, "lake1").await;
        let err = client.load_fileset("cat1", "missing", "fs1").await.unwrap_err();
        assert_eq!(err.not_found_kind(), Some(NotFoundKind::Schema));
        assert_eq!(err.message(), "Schema missing does not exist");
    }

    #[tokio::test]
    async fn loads_fileset() {
        let server = MockServer::start().await;
        mount_metalake(&server, "lake1").await;
        Mock::given(method("GET"))
            .and(path("/api/metalakes/lake1/catalogs/cat1/schemas/sch1/filesets/fs1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "fileset": {
                    "name": "fs1",
                    "type": "managed",
                    "comment": "demo",
                    "storageLocation": "/data/fs1",
                    "properties": {}
                }
            })))
            .mount(&server)
            .await;

        let client = connect(&server, "lake1").await;
        let fileset = client.load_fileset("cat1", "sch1", "fs1").await.unwrap();
        assert_eq!(fileset.fileset_type, FilesetType::Managed);
        assert_eq!(fileset.location(), Some("/data/fs1"));
    }

    #[tokio::test]
    async fn loads_table_columns_in_order() {
        let server = MockServer::start().await;
        mount_metalake(&server, "lake1").await;
        Mock::given(method("GET"))
            .and(path("/api/metalakes/lake1/catalogs/cat1/schemas/sch1/tables/orders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "table": {
                    "name": "orders",
                    "columns": [
                        {"name": "id", "type": "long", "nullable": false, "autoIncrement": true},
                        {"name": "items", "type": {"type": "list", "elementType": "string", "containsNull": true}, "comment": "line items"}
                    ]
                }
            })))
            .mount(&server)
            .await;

        let client = connect(&server, "lake1").await;
        let columns = client.load_table_columns("cat1", "sch1", "orders").await.unwrap();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].name, "id");
        assert!(columns[0].auto_increment);
        assert_eq!(
            columns[1].data_type,
            Some(DataType::List(Box::new(DataType::primitive("string"))))
        );
    }

    #[tokio::test]
    async fn unreadable_column_type_does_not_fail_the_listing() {
        let server = MockServer::start().await;
        mount_metalake(&server, "lake1").await;
        Mock::given(method("GET"))
            .and(path("/api/metalakes/lake1/catalogs/cat1/schemas/sch1/tables/shapes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "table": {
                    "name": "shapes",
                    "columns": [
                        {"name": "id", "type": "integer"},
                        {"name": "geom", "type": {"type": "geometry"}}
                    ]
                }
            })))
            .mount(&server)
            .await;

        let client = connect(&server, "lake1").await;
        let columns = client.load_table_columns("cat1", "sch1", "shapes").await.unwrap();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].data_type, Some(DataType::primitive("integer")));
        assert_eq!(columns[1].name, "geom");
        assert_eq!(columns[1].data_type, None);
    }

    #[tokio::test]
    async fn unrecognised_error_body_keeps_server_message() {
        let server = MockServer::start().await;
        mount_metalake(&server, "lake1").await;
        Mock::given(method("PUT"))
            .and(path("/api/metalakes/lake1/catalogs/cat1"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "code": 1004,
                "type": "CatalogInUseException",
                "message": "Catalog cat1 is in use"
            })))
            .mount(&server)
            .await;

        let client = connect(&server, "lake1").await;
        let changes = [CatalogChange::remove_property("owner")];
        let err = client.alter_catalog("cat1", &changes).await.unwrap_err();
        assert_eq!(err.not_found_kind(), None);
        assert_eq!(err.message(), "Catalog cat1 is in use");
    }

    #[tokio::test]
    async fn alter_catalog_sends_remove_property() {
        let server = MockServer::start().await;
        mount_metalake(&server, "lake1").await;
        Mock::given(method("PUT"))
            .and(path("/api/metalakes/lake1/catalogs/cat1"))
            .and(body_json(json!({
                "updates": [{"@type": "removeProperty", "property": "owner"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "catalog": {"name": "cat1", "type": "fileset", "provider": "hadoop", "properties": {}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = connect(&server, "lake1").await;
        let changes = [CatalogChange::remove_property("owner")];
        let catalog = client.alter_catalog("cat1", &changes).await.unwrap();
        assert_eq!(catalog.name, "cat1");
    }

    #[tokio::test]
    async fn non_json_error_body_is_unexpected() {
        let server = MockServer::start().await;
        mount_metalake(&server, "lake1").await;
        Mock::given(method("GET"))
            .and(path("/api/metalakes/lake1/catalogs/cat1"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = connect(&server, "lake1").await;
        let err = client.load_catalog("cat1").await.unwrap_err();
        assert_eq!(err.not_found_kind(), None);
        assert_eq!(err.message(), "request failed with status 502: bad gateway");
    }

    #[tokio::test]
    async fn closed_client_refuses_requests() {
        let server = MockServer::start().await;
        mount_metalake(&server, "lake1").await;

        let mut client = connect(&server, "lake1").await;
        client.close();
        let err = client.load_catalog("cat1").await.unwrap_err();
        assert!(matches!(err, CatalogClientError::UnexpectedError { .. }));
    }

    #[tokio::test]
    async fn rejects_unusable_url() {
        let options = ConnectOptions::new("not a url", true);
        let err = RestCatalogClient::connect(&options, "lake1").await.unwrap_err();
        assert!(matches!(err, CatalogClientError::FailedToConnect { .. }));
    }
}
