// Restore the stored selection and print the active palette

use themekit_themes::Palette;

use super::Command;
use crate::{error::CliResult, output::OutputStyle, session::ThemeSession};

pub struct CurrentCommand {
    session: ThemeSession,
}

impl CurrentCommand {
    pub fn new(session: ThemeSession) -> Self {
        Self { session }
    }

    /// Describe the outcome of a restore
    pub fn lines(
        stored: Option<&str>,
        default: Option<&str>,
        palette: Option<&Palette>,
        style: &OutputStyle,
    ) -> Vec<String> {
        let Some(palette) = palette else {
            return vec![style.info("No theme selected")];
        };

        let title = match (stored, default) {
            (Some(name), _) => format!("Theme: {}", name),
            (None, Some(name)) => format!("Theme: {} {}", name, style.note("(default)")),
            (None, None) => "Theme".to_string(),
        };

        let mut lines = vec![style.header(&title)];
        lines.extend(palette.iter().map(|(key, value)| style.entry(key, value)));
        lines
    }
}

#[async_trait::async_trait]
impl Command for CurrentCommand {
    async fn execute(&self) -> CliResult<()> {
        let store = self.session.store();
        let stored = self.session.stored_name().await?;
        let palette = store.restore().await?;
        let registry = store.registry();

        for line in Self::lines(
            stored.as_deref(),
            registry.default_theme(),
            palette.as_deref(),
            &OutputStyle::default(),
        ) {
            println!("{}", line);
        }
        Ok(())
    }
}
