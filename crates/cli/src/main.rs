mod commands;

use crate::commands::catalog::CatalogSubcommand;
use crate::commands::column::ColumnSubcommand;
use crate::commands::fileset::FilesetSubcommand;
use crate::commands::{CommandDispatcher, Operation, Printer};
use clap::{ArgAction, Args, Parser, Subcommand};
use common::config::loader::read_config;
use common::config::settings::{Settings, SettingsOverrides};
use common::config::OutputFormat;
use common::error::CliError;
use log::debug;
use logging::init_logger;
use shared_clients::{ConnectOptions, RestConnector};
use std::path::PathBuf;
use tokio::runtime::Builder;

#[derive(Parser)]
#[command(name = "gcli", version, about = "Command line client for a Gravitino catalog service")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Cmd,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Catalog service URL
    #[arg(long, env = "GRAVITINO_URL", global = true)]
    pub url: Option<String>,

    /// Metalake the command runs against
    #[arg(long, short = 'm', env = "GRAVITINO_METALAKE", global = true)]
    pub metalake: Option<String>,

    /// Skip the client/server version check
    #[arg(long, env = "GRAVITINO_IGNORE", global = true)]
    pub ignore: bool,

    /// Output format: plain or table
    #[arg(long, short = 'o', value_name = "FORMAT", global = true)]
    pub output: Option<OutputFormat>,

    /// Suppress confirmation messages
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    #[arg(
        long = "config",
        short = 'c',
        alias = "config-path",
        help = "path to config file",
        global = true
    )]
    pub config_path: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl GlobalArgs {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            url: self.url.clone(),
            metalake: self.metalake.clone(),
            ignore_versions: self.ignore,
            output: self.output,
            quiet: self.quiet,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Inspect or modify catalogs
    #[command(subcommand)]
    Catalog(CatalogSubcommand),
    /// Inspect filesets
    #[command(subcommand)]
    Fileset(FilesetSubcommand),
    /// Inspect table columns
    #[command(subcommand)]
    Column(ColumnSubcommand),
}

impl Cmd {
    fn into_operation(self, metalake: Option<&str>) -> Result<Operation, CliError> {
        match self {
            Cmd::Catalog(cmd) => cmd.into_operation(metalake),
            Cmd::Fileset(cmd) => cmd.into_operation(metalake),
            Cmd::Column(cmd) => cmd.into_operation(metalake),
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let file = read_config(cli.global.config_path.as_deref())?;
    let settings = Settings::resolve(cli.global.overrides(), file);
    debug!(
        "resolved settings: url={} metalake={:?} ignore_versions={}",
        settings.url, settings.metalake, settings.ignore_versions
    );

    let operation = cli.command.into_operation(settings.metalake.as_deref())?;

    let connector = RestConnector::new(ConnectOptions::new(
        settings.url.clone(),
        settings.ignore_versions,
    ));
    let dispatcher = CommandDispatcher::new(
        connector,
        Printer::new(settings.output, settings.quiet),
    );

    let runtime = Builder::new_current_thread().enable_all().build()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    runtime.block_on(dispatcher.dispatch(operation, &mut out))
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.global.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{e}");
        std::process::exit(e.exit_code());
    }
}
