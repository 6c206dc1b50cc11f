use crate::commands::dispatcher::{translate, Operation};
use crate::commands::name::FullName;
use crate::commands::output::{CommandOutput, Rows};
use clap::{Args, Subcommand};
use common::error::messages::NO_TABLE_COLUMNS;
use common::error::CliError;
use common::types::{Column, NameIdentifier};
use shared_clients::error::NotFoundKind;
use shared_clients::CatalogService;

pub const LOOKUP_FAILURES: &[NotFoundKind] = &[
    NotFoundKind::Metalake,
    NotFoundKind::Catalog,
    NotFoundKind::Schema,
    NotFoundKind::Table,
];

const HEADER: &[&str] = &["name", "datatype", "comment", "nullable"];
const HEADER_WITH_AUTO_INCREMENT: &[&str] =
    &["name", "datatype", "comment", "nullable", "auto_increment"];

#[derive(Debug, Args)]
pub struct TableNameArgs {
    /// Table as catalog.schema.table
    #[arg(long, value_name = "NAME")]
    pub name: String,
}

#[derive(Debug, Subcommand)]
pub enum ColumnSubcommand {
    /// List the columns of a table
    List(TableNameArgs),
}

impl ColumnSubcommand {
    pub fn into_operation(self, metalake: Option<&str>) -> Result<Operation, CliError> {
        match self {
            ColumnSubcommand::List(args) => Ok(Operation::ListColumns(
                FullName::new(metalake, &args.name).table()?,
            )),
        }
    }
}

pub async fn list(
    client: &dyn CatalogService,
    ident: &NameIdentifier,
) -> Result<CommandOutput, CliError> {
    let columns = client
        .load_table_columns(ident.catalog(), ident.schema(), ident.name())
        .await
        .map_err(|err| translate(err, LOOKUP_FAILURES, &ident.to_string()))?;

    if columns.is_empty() {
        return Err(CliError::EmptyResult(NO_TABLE_COLUMNS));
    }
    Ok(CommandOutput::Rows(column_rows(&columns)))
}

/// The `auto_increment` column appears only when at least one column uses it.
fn column_rows(columns: &[Column]) -> Rows {
    let with_auto_increment = columns.iter().any(|c| c.auto_increment);
    let header = if with_auto_increment {
        HEADER_WITH_AUTO_INCREMENT
    } else {
        HEADER
    };

    let rows = columns
        .iter()
        .map(|column| {
            let mut row = vec![
                column.name.clone(),
                column
                    .data_type
                    .as_ref()
                    .map(|t| t.simple_string())
                    .unwrap_or_else(|| "UNKNOWN".to_string()),
                column.comment.clone().unwrap_or_else(|| "N/A".to_string()),
                column.nullable.to_string(),
            ];
            if with_auto_increment {
                let flag = if column.auto_increment { "true" } else { "" };
                row.push(flag.to_string());
            }
            row
        })
        .collect();

    Rows::new(header, rows).with_plain_header()
}
