// Select and persist a theme by name

use super::Command;
use crate::{error::CliResult, output::OutputStyle, session::ThemeSession};

pub struct SetCommand {
    session: ThemeSession,
    name: String,
}

impl SetCommand {
    pub fn new(session: ThemeSession, name: String) -> Self {
        Self { session, name }
    }
}

#[async_trait::async_trait]
impl Command for SetCommand {
    async fn execute(&self) -> CliResult<()> {
        self.session.store().set_theme_persisted(&self.name).await?;
        println!(
            "{}",
            OutputStyle::default().success(&format!("Theme set to '{}'", self.name))
        );
        Ok(())
    }
}
