use crate::commands::dispatcher::{translate, Operation};
use crate::commands::name::FullName;
use crate::commands::output::{CommandOutput, Rows};
use clap::{Args, Subcommand};
use common::error::CliError;
use common::types::NameIdentifier;
use shared_clients::error::NotFoundKind;
use shared_clients::CatalogService;

pub const LOOKUP_FAILURES: &[NotFoundKind] = &[
    NotFoundKind::Metalake,
    NotFoundKind::Catalog,
    NotFoundKind::Schema,
    NotFoundKind::Fileset,
];

#[derive(Debug, Args)]
pub struct FilesetNameArgs {
    /// Fileset as catalog.schema.fileset
    #[arg(long, value_name = "NAME")]
    pub name: String,
}

#[derive(Debug, Subcommand)]
pub enum FilesetSubcommand {
    /// Show a fileset's name, type, comment and location
    Details(FilesetNameArgs),
}

impl FilesetSubcommand {
    pub fn into_operation(self, metalake: Option<&str>) -> Result<Operation, CliError> {
        match self {
            FilesetSubcommand::Details(args) => Ok(Operation::DescribeFileset(
                FullName::new(metalake, &args.name).fileset()?,
            )),
        }
    }
}

pub async fn describe(
    client: &dyn CatalogService,
    ident: &NameIdentifier,
) -> Result<CommandOutput, CliError> {
    let fileset = client
        .load_fileset(ident.catalog(), ident.schema(), ident.name())
        .await
        .map_err(|err| translate(err, LOOKUP_FAILURES, &ident.to_string()))?;

    let location = fileset.location().unwrap_or_default().to_string();
    let row = vec![
        fileset.name,
        fileset.fileset_type.as_str().to_string(),
        fileset.comment.unwrap_or_else(|| "null".to_string()),
        location,
    ];
    Ok(CommandOutput::Rows(Rows::new(
        &["name", "type", "comment", "location"],
        vec![row],
    )))
}
