//! themekit command-line interface
//!
//! Inspect the theme registry, restore and change the persisted selection,
//! and pick a theme from an interactive terminal dialog.

pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
pub mod router;
pub mod session;

pub use error::{CliError, CliResult};
pub use router::{AppearanceArg, Cli, CommandRouter, Commands};
pub use session::ThemeSession;
