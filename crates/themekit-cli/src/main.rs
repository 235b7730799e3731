// themekit CLI entry point

use clap::Parser;
use themekit_cli::{logging, router::CommandRouter, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    CommandRouter::execute(&cli).await.map_err(|e| {
        tracing::debug!("{}", e.technical_details());
        anyhow::anyhow!(e.user_message())
    })
}
