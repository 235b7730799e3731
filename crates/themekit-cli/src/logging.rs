// Logging setup for the themekit binary

use tracing::Level;

/// Max level for the given verbosity flags; quiet wins over verbose
pub fn level_for(verbose: bool, quiet: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Install the fmt subscriber, writing to stderr so stdout stays clean
pub fn init_logging(verbose: bool, quiet: bool) {
    let result = tracing_subscriber::fmt()
        .with_max_level(level_for(verbose, quiet))
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();

    if let Err(e) = result {
        eprintln!("Warning: logging already initialized: {}", e);
    }
}
