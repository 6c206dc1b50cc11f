use crate::commands::dispatcher::{translate, Operation};
use crate::commands::name::FullName;
use crate::commands::output::{CommandOutput, Rows};
use clap::{Args, Subcommand};
use common::error::messages::{MISSING_ARGUMENTS, NO_CATALOG_PROPERTIES};
use common::error::CliError;
use common::types::{CatalogChange, CatalogIdentifier};
use log::debug;
use shared_clients::error::NotFoundKind;
use shared_clients::CatalogService;

pub const LOOKUP_FAILURES: &[NotFoundKind] = &[NotFoundKind::Metalake, NotFoundKind::Catalog];

#[derive(Debug, Args)]
pub struct CatalogNameArgs {
    /// Catalog name
    #[arg(long, value_name = "CATALOG")]
    pub name: String,
}

#[derive(Debug, Args)]
pub struct RemovePropertyArgs {
    /// Catalog name
    #[arg(long, value_name = "CATALOG")]
    pub name: String,

    /// Property to remove
    #[arg(long, value_name = "KEY")]
    pub property: String,
}

#[derive(Debug, Subcommand)]
pub enum CatalogSubcommand {
    /// Show a catalog's name, type, provider and comment
    Details(CatalogNameArgs),
    /// List a catalog's properties as key,value
    Properties(CatalogNameArgs),
    /// Remove a property from a catalog
    Remove(RemovePropertyArgs),
}

impl CatalogSubcommand {
    pub fn into_operation(self, metalake: Option<&str>) -> Result<Operation, CliError> {
        match self {
            CatalogSubcommand::Details(args) => Ok(Operation::CatalogDetails(
                FullName::new(metalake, &args.name).catalog()?,
            )),
            CatalogSubcommand::Properties(args) => Ok(Operation::ListCatalogProperties(
                FullName::new(metalake, &args.name).catalog()?,
            )),
            CatalogSubcommand::Remove(args) => {
                let catalog = FullName::new(metalake, &args.name).catalog()?;
                if args.property.trim().is_empty() {
                    return Err(CliError::usage(format!("{MISSING_ARGUMENTS} property")));
                }
                Ok(Operation::RemoveCatalogProperty {
                    catalog,
                    property: args.property,
                })
            }
        }
    }
}

pub async fn details(
    client: &dyn CatalogService,
    ident: &CatalogIdentifier,
) -> Result<CommandOutput, CliError> {
    let catalog = client
        .load_catalog(ident.catalog())
        .await
        .map_err(|err| translate(err, LOOKUP_FAILURES, &ident.to_string()))?;

    let row = vec![
        catalog.name,
        catalog.catalog_type.to_string(),
        catalog.provider.unwrap_or_default(),
        catalog.comment.unwrap_or_else(|| "null".to_string()),
    ];
    Ok(CommandOutput::Rows(Rows::new(
        &["name", "type", "provider", "comment"],
        vec![row],
    )))
}

pub async fn list_properties(
    client: &dyn CatalogService,
    ident: &CatalogIdentifier,
) -> Result<CommandOutput, CliError> {
    let catalog = client
        .load_catalog(ident.catalog())
        .await
        .map_err(|err| translate(err, LOOKUP_FAILURES, &ident.to_string()))?;

    let properties = catalog.properties.unwrap_or_default();
    if properties.is_empty() {
        return Err(CliError::EmptyResult(NO_CATALOG_PROPERTIES));
    }
    debug!("catalog {} has {} properties", ident, properties.len());

    let rows = properties.into_iter().map(|(k, v)| vec![k, v]).collect();
    Ok(CommandOutput::Rows(Rows::new(&["key", "value"], rows)))
}

pub async fn remove_property(
    client: &dyn CatalogService,
    ident: &CatalogIdentifier,
    property: &str,
) -> Result<CommandOutput, CliError> {
    client
        .alter_catalog(ident.catalog(), &[CatalogChange::remove_property(property)])
        .await
        .map_err(|err| translate(err, LOOKUP_FAILURES, &ident.to_string()))?;

    Ok(CommandOutput::Confirmation(format!(
        "{property} property removed."
    )))
}
