// Command routing and dispatch

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use themekit_themes::{EnvAppearance, SystemAppearance};

use crate::{
    commands::{Command, CurrentCommand, ListCommand, PickCommand, ResetCommand, SetCommand},
    error::CliResult,
    session::ThemeSession,
};

/// themekit - pick, inspect and persist the application theme
#[derive(Parser, Debug)]
#[command(name = "themekit")]
#[command(bin_name = "themekit")]
#[command(about = "Pick, inspect and persist the application theme")]
#[command(version)]
#[command(author = "Themekit Contributors")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Registry file (YAML, TOML or JSON); defaults to themes.yaml in the config directory
    #[arg(long, global = true, value_name = "PATH")]
    pub registry: Option<PathBuf>,

    /// Preferences file holding the stored selection
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// How the `system` theme resolves
    #[arg(long, global = true, value_enum, default_value_t = AppearanceArg::Auto)]
    pub appearance: AppearanceArg,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List reserved and custom theme names
    List,

    /// Restore the stored selection and print its palette
    Current,

    /// Select a theme and persist it
    Set {
        /// Theme name (dark, light, system or a custom palette)
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Forget the stored selection
    Reset,

    /// Choose a theme in an interactive dialog
    Pick,
}

/// System appearance source for `system`
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppearanceArg {
    /// Read THEMEKIT_APPEARANCE on every resolution
    #[default]
    Auto,
    Dark,
    Light,
}

impl SystemAppearance for AppearanceArg {
    fn is_dark(&self) -> bool {
        match self {
            AppearanceArg::Auto => EnvAppearance.is_dark(),
            AppearanceArg::Dark => true,
            AppearanceArg::Light => false,
        }
    }
}

/// Dispatches parsed arguments to their command handlers
pub struct CommandRouter;

impl CommandRouter {
    pub async fn execute(cli: &Cli) -> CliResult<()> {
        let session = ThemeSession::open(cli)?;
        tracing::debug!("Using preferences at {}", session.storage_path().display());

        match &cli.command {
            Commands::List => ListCommand::new(session).execute().await,
            Commands::Current => CurrentCommand::new(session).execute().await,
            Commands::Set { name } => SetCommand::new(session, name.clone()).execute().await,
            Commands::Reset => ResetCommand::new(session).execute().await,
            Commands::Pick => PickCommand::new(session).execute().await,
        }
    }
}
