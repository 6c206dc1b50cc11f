use crate::commands::output::{CommandOutput, Printer};
use crate::commands::{catalog, column, fileset};
use common::error::CliError;
use common::types::{CatalogIdentifier, NameIdentifier};
use log::{debug, info};
use shared_clients::error::{CatalogClientError, NotFoundKind};
use shared_clients::{CatalogConnector, ScopedClient};
use std::io::Write;

/// One fully-resolved command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    CatalogDetails(CatalogIdentifier),
    ListCatalogProperties(CatalogIdentifier),
    RemoveCatalogProperty {
        catalog: CatalogIdentifier,
        property: String,
    },
    DescribeFileset(NameIdentifier),
    ListColumns(NameIdentifier),
}

impl Operation {
    pub fn metalake(&self) -> &str {
        match self {
            Operation::CatalogDetails(ident) | Operation::ListCatalogProperties(ident) => {
                ident.metalake()
            }
            Operation::RemoveCatalogProperty { catalog, .. } => catalog.metalake(),
            Operation::DescribeFileset(ident) | Operation::ListColumns(ident) => ident.metalake(),
        }
    }

    /// Not-found kinds this command reports with their own message, outermost
    /// first. Anything else becomes a generic failure.
    pub fn recognised(&self) -> &'static [NotFoundKind] {
        match self {
            Operation::CatalogDetails(_)
            | Operation::ListCatalogProperties(_)
            | Operation::RemoveCatalogProperty { .. } => catalog::LOOKUP_FAILURES,
            Operation::DescribeFileset(_) => fileset::LOOKUP_FAILURES,
            Operation::ListColumns(_) => column::LOOKUP_FAILURES,
        }
    }

    fn qualified_name(&self) -> String {
        match self {
            Operation::CatalogDetails(ident) | Operation::ListCatalogProperties(ident) => {
                ident.to_string()
            }
            Operation::RemoveCatalogProperty { catalog, .. } => catalog.to_string(),
            Operation::DescribeFileset(ident) | Operation::ListColumns(ident) => ident.to_string(),
        }
    }
}

/// Map a client failure onto the user-facing taxonomy.
///
/// A not-found kind listed in `recognised` gets its fixed message; the table
/// message is decorated with the dotted name. Everything else keeps the
/// service's message verbatim.
pub fn translate(
    err: CatalogClientError,
    recognised: &[NotFoundKind],
    qualified_name: &str,
) -> CliError {
    debug!("catalog client error raised at {}: {}", err.origin(), err);

    match err.not_found_kind() {
        Some(kind) if recognised.contains(&kind) => match kind {
            NotFoundKind::Metalake => CliError::UnknownMetalake,
            NotFoundKind::Catalog => CliError::UnknownCatalog,
            NotFoundKind::Schema => CliError::UnknownSchema,
            NotFoundKind::Fileset => CliError::UnknownFileset,
            NotFoundKind::Table => CliError::unknown_table(qualified_name),
        },
        _ => CliError::generic(err.message()),
    }
}

/// Runs a single [`Operation`]: connect, call, translate, print.
pub struct CommandDispatcher<C> {
    connector: C,
    printer: Printer,
}

impl<C: CatalogConnector> CommandDispatcher<C> {
    pub fn new(connector: C, printer: Printer) -> Self {
        Self { connector, printer }
    }

    pub async fn dispatch<W: Write>(&self, operation: Operation, out: &mut W) -> Result<(), CliError> {
        let output = self.execute(&operation).await?;
        self.printer.print(&output, out)?;
        Ok(())
    }

    /// Everything up to printing. The client is closed before this returns,
    /// whichever way it returns.
    pub async fn execute(&self, operation: &Operation) -> Result<CommandOutput, CliError> {
        info!("running {:?}", operation);

        let handle = self
            .connector
            .connect(operation.metalake())
            .await
            .map_err(|err| translate(err, operation.recognised(), &operation.qualified_name()))?;
        let client = ScopedClient::new(handle);

        match operation {
            Operation::CatalogDetails(ident) => catalog::details(&*client, ident).await,
            Operation::ListCatalogProperties(ident) => {
                catalog::list_properties(&*client, ident).await
            }
            Operation::RemoveCatalogProperty { catalog, property } => {
                catalog::remove_property(&*client, catalog, property).await
            }
            Operation::DescribeFileset(ident) => fileset::describe(&*client, ident).await,
            Operation::ListColumns(ident) => column::list(&*client, ident).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::OutputFormat;
    use common::types::{Column, DataType, Fileset, FilesetType};
    use test_utils::{catalog_with_properties, FakeCatalog};

    fn dispatcher(fake: &FakeCatalog) -> CommandDispatcher<FakeCatalog> {
        CommandDispatcher::new(fake.clone(), Printer::new(OutputFormat::Plain, false))
    }

    async fn run(fake: &FakeCatalog, op: Operation) -> (Result<(), CliError>, String) {
        let mut out = Vec::new();
        let result = dispatcher(fake).dispatch(op, &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    fn populated() -> FakeCatalog {
        FakeCatalog::new("lake1")
            .with_catalog(catalog_with_properties("cat1", &[("owner", "ops")]))
            .with_schema("cat1", "sch1")
            .with_fileset(
                "cat1",
                "sch1",
                Fileset::new("fs1", FilesetType::Managed, Some("demo"), "/data/fs1"),
            )
            .with_table(
                "cat1",
                "sch1",
                "orders",
                vec![Column::new("id", Some(DataType::primitive("long")))],
            )
    }

    #[test]
    fn translate_respects_recognised_kinds() {
        let err = CatalogClientError::not_found(NotFoundKind::Table, "Table t does not exist");
        let mapped = translate(err, &[NotFoundKind::Metalake], "lake1.cat1.sch1.t");
        assert_eq!(mapped.to_string(), "Table t does not exist");

        let err = CatalogClientError::not_found(NotFoundKind::Table, "Table t does not exist");
        let mapped = translate(err, column::LOOKUP_FAILURES, "lake1.cat1.sch1.t");
        assert_eq!(mapped.to_string(), "Unknown table name. lake1.cat1.sch1.t");
    }

    #[tokio::test]
    async fn describe_fileset_end_to_end() {
        let fake = populated();
        let op = Operation::DescribeFileset(NameIdentifier::new("lake1", "cat1", "sch1", "fs1"));

        let (result, out) = run(&fake, op).await;
        result.unwrap();
        assert_eq!(out, "fs1,managed,demo,/data/fs1\n");
        assert_eq!(fake.closes(), 1);
    }

    #[tokio::test]
    async fn each_level_reports_its_own_message() {
        let cases = [
            (NameIdentifier::new("nolake", "cat1", "sch1", "fs1"), "Unknown metalake name."),
            (NameIdentifier::new("lake1", "nocat", "sch1", "fs1"), "Unknown catalog name."),
            (NameIdentifier::new("lake1", "cat1", "nosch", "fs1"), "Unknown schema name."),
            (NameIdentifier::new("lake1", "cat1", "sch1", "nofs"), "Unknown fileset name."),
        ];

        for (ident, expected) in cases {
            let (result, out) = run(&populated(), Operation::DescribeFileset(ident)).await;
            assert_eq!(result.unwrap_err().to_string(), expected);
            assert!(out.is_empty());
        }

        let cases = [
            (NameIdentifier::new("nolake", "cat1", "sch1", "t"), "Unknown metalake name."),
            (NameIdentifier::new("lake1", "nocat", "sch1", "t"), "Unknown catalog name."),
            (NameIdentifier::new("lake1", "cat1", "nosch", "t"), "Unknown schema name."),
            (
                NameIdentifier::new("lake1", "cat1", "sch1", "missing"),
                "Unknown table name. lake1.cat1.sch1.missing",
            ),
        ];

        for (ident, expected) in cases {
            let (result, out) = run(&populated(), Operation::ListColumns(ident)).await;
            assert_eq!(result.unwrap_err().to_string(), expected);
            assert!(out.is_empty());
        }
    }

    fn catalog_operations(metalake: &str, catalog: &str) -> Vec<Operation> {
        let ident = CatalogIdentifier::new(metalake, catalog);
        vec![
            Operation::CatalogDetails(ident.clone()),
            Operation::ListCatalogProperties(ident.clone()),
            Operation::RemoveCatalogProperty {
                catalog: ident,
                property: "owner".into(),
            },
        ]
    }

    #[tokio::test]
    async fn catalog_commands_report_each_level() {
        let cases = [
            ("nolake", "cat1", "Unknown metalake name.", 0),
            ("lake1", "nocat", "Unknown catalog name.", 1),
        ];

        for (metalake, catalog, expected, closes) in cases {
            for op in catalog_operations(metalake, catalog) {
                let fake = populated();
                let (result, out) = run(&fake, op.clone()).await;
                assert_eq!(result.unwrap_err().to_string(), expected, "{op:?}");
                assert!(out.is_empty(), "{op:?}");
                assert_eq!(fake.closes(), closes, "{op:?}");
            }
        }
    }

    #[tokio::test]
    async fn catalog_commands_pass_other_failures_through() {
        for op in catalog_operations("lake1", "cat1") {
            let fake = populated().failing_calls("Catalog cat1 is in use");
            let (result, out) = run(&fake, op.clone()).await;
            let err = result.unwrap_err();
            assert!(matches!(err, CliError::Generic(_)), "{op:?}");
            assert_eq!(err.to_string(), "Catalog cat1 is in use", "{op:?}");
            assert!(out.is_empty(), "{op:?}");
            assert_eq!(fake.closes(), 1, "{op:?}");
        }
    }

    #[tokio::test]
    async fn remove_property_closes_client_once_on_both_paths() {
        let fake = populated();
        let op = Operation::RemoveCatalogProperty {
            catalog: CatalogIdentifier::new("lake1", "cat1"),
            property: "owner".into(),
        };
        let (result, out) = run(&fake, op).await;
        result.unwrap();
        assert_eq!(out, "owner property removed.\n");
        assert_eq!(fake.closes(), 1);

        let fake = populated();
        let op = Operation::RemoveCatalogProperty {
            catalog: CatalogIdentifier::new("lake1", "nocat"),
            property: "owner".into(),
        };
        let (result, out) = run(&fake, op).await;
        assert_eq!(result.unwrap_err().to_string(), "Unknown catalog name.");
        assert!(out.is_empty());
        assert_eq!(fake.closes(), 1);
    }

    #[tokio::test]
    async fn connect_failure_is_generic_and_opens_nothing() {
        let fake = populated().failing_connect("Connection refused");
        let op = Operation::ListCatalogProperties(CatalogIdentifier::new("lake1", "cat1"));

        let (result, out) = run(&fake, op).await;
        let err = result.unwrap_err();
        assert!(matches!(err, CliError::Generic(_)));
        assert_eq!(err.to_string(), "Connection refused");
        assert!(out.is_empty());
        assert_eq!(fake.connections(), 0);
        assert_eq!(fake.closes(), 0);
    }

    #[tokio::test]
    async fn failing_call_still_closes_client() {
        let fake = populated().failing_calls("internal server error");
        let op = Operation::ListColumns(NameIdentifier::new("lake1", "cat1", "sch1", "orders"));

        let (result, _) = run(&fake, op).await;
        assert_eq!(result.unwrap_err().to_string(), "internal server error");
        assert_eq!(fake.connections(), 1);
        assert_eq!(fake.closes(), 1);
    }
}
