// List the names the registry resolves

use themekit_themes::{ThemeMode, ThemeRegistry};

use super::Command;
use crate::{error::CliResult, output::OutputStyle, session::ThemeSession};

pub struct ListCommand {
    session: ThemeSession,
}

impl ListCommand {
    pub fn new(session: ThemeSession) -> Self {
        Self { session }
    }

    /// One line per name, reserved names first
    pub fn lines(registry: &ThemeRegistry, style: &OutputStyle) -> Vec<String> {
        let mut lines = vec![style.header("Themes")];
        let custom = registry.custom_palettes();

        for name in registry.names() {
            let mut notes = Vec::new();
            if ThemeMode::from_name(&name).is_some() {
                notes.push("built-in");
            }
            if custom.iter().any(|entry| entry.name == name) {
                notes.push("custom");
            }
            if registry.default_theme() == Some(name.as_str()) {
                notes.push("default");
            }
            lines.push(format!("  {} {}", name, style.note(&format!("({})", notes.join(", ")))));
        }
        lines
    }
}

#[async_trait::async_trait]
impl Command for ListCommand {
    async fn execute(&self) -> CliResult<()> {
        let registry = self.session.store().registry();
        for line in Self::lines(&registry, &OutputStyle::default()) {
            println!("{}", line);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use themekit_themes::{NamedPalette, Palette};

    use super::*;

    #[test]
    fn test_lines_mark_origin_and_default() {
        let registry = ThemeRegistry::new(
            Palette::new().with("backgroundColor", "#000000"),
            Palette::new().with("backgroundColor", "#ffffff"),
        )
        .with_default_theme("ocean")
        .with_custom_list(vec![
            NamedPalette::new("ocean", Palette::new().with("backgroundColor", "#003366")),
            NamedPalette::new("dark", Palette::new().with("backgroundColor", "#111111")),
        ]);

        let lines = ListCommand::lines(&registry, &OutputStyle::plain());

        assert_eq!(lines[0], "Themes");
        assert_eq!(lines[1], "  dark (built-in, custom)");
        assert_eq!(lines[2], "  light (built-in)");
        assert_eq!(lines[3], "  system (built-in)");
        assert_eq!(lines[4], "  ocean (custom, default)");
        assert_eq!(lines.len(), 5);
    }
}
