// Command handlers for the themekit CLI

pub mod current;
pub mod list;
pub mod pick;
pub mod reset;
pub mod set;

pub use current::CurrentCommand;
pub use list::ListCommand;
pub use pick::PickCommand;
pub use reset::ResetCommand;
pub use set::SetCommand;

use crate::error::CliResult;

/// Trait for command handlers
#[async_trait::async_trait]
pub trait Command: Send + Sync {
    /// Execute the command
    async fn execute(&self) -> CliResult<()>;
}
