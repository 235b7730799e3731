// Forget the stored selection

use super::Command;
use crate::{error::CliResult, output::OutputStyle, session::ThemeSession};

pub struct ResetCommand {
    session: ThemeSession,
}

impl ResetCommand {
    pub fn new(session: ThemeSession) -> Self {
        Self { session }
    }
}

#[async_trait::async_trait]
impl Command for ResetCommand {
    async fn execute(&self) -> CliResult<()> {
        self.session.store().clear_selection().await?;

        let style = OutputStyle::default();
        let message = match self.session.store().registry().default_theme() {
            Some(default) => format!("Stored theme cleared, '{}' applies on next start", default),
            None => "Stored theme cleared".to_string(),
        };
        println!("{}", style.success(&message));
        Ok(())
    }
}
