// CLI errors and their user-facing messages

use themekit_storage::StorageError;
use themekit_themes::ThemeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Theme error: {0}")]
    Theme(#[from] ThemeError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::InvalidArgument { message } => {
                format!("Invalid argument: {}\n\nRun 'themekit --help' for usage information.", message)
            }
            CliError::Theme(ThemeError::NotFound(name)) => {
                format!(
                    "Theme '{}' is not registered.\n\nRun 'themekit list' to see the available themes.",
                    name
                )
            }
            CliError::Theme(e) => format!("Theme error: {}", e),
            CliError::Storage(e) => {
                format!("Storage error: {}\n\nCheck the --store path or THEMEKIT_HOME.", e)
            }
            CliError::Terminal(msg) => format!("Terminal error: {}", msg),
            CliError::Io(e) => format!("File operation failed: {}", e),
        }
    }

    /// Get technical details for verbose mode
    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_suggests_list() {
        let err = CliError::from(ThemeError::NotFound("teal".to_string()));
        let message = err.user_message();
        assert!(message.contains("'teal'"));
        assert!(message.contains("themekit list"));
    }

    #[test]
    fn test_storage_message_mentions_store_flag() {
        let err = CliError::from(StorageError::unavailable("offline"));
        assert!(err.user_message().contains("--store"));
    }
}
