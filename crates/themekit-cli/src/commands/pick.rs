// Interactive theme picker

use std::io::{self, Stdout};

use ratatui::{
    backend::{Backend, CrosstermBackend},
    crossterm::{
        event::{self, Event},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use themekit_themes::{DialogAction, DialogColors, ThemeDialog};

use super::Command;
use crate::{
    error::{CliError, CliResult},
    output::OutputStyle,
    session::ThemeSession,
};

pub struct PickCommand {
    session: ThemeSession,
}

impl PickCommand {
    pub fn new(session: ThemeSession) -> Self {
        Self { session }
    }
}

#[async_trait::async_trait]
impl Command for PickCommand {
    async fn execute(&self) -> CliResult<()> {
        let store = self.session.store();
        let active = match store.restore().await {
            Ok(active) => active,
            Err(e) => {
                tracing::warn!("Ignoring stored theme: {}", e);
                None
            }
        };

        let mut dialog = ThemeDialog::new();
        if let Some(palette) = &active {
            dialog.set_colors(DialogColors::from_palette(palette));
        }

        let choice = {
            let mut session = TerminalSession::enter()?;
            run_dialog(session.terminal(), &mut dialog, event::read)?
        };

        let style = OutputStyle::default();
        let Some(index) = choice else {
            println!("{}", style.info("No theme selected"));
            return Ok(());
        };

        let name = chosen_name(&mut dialog, index)?;
        // awaited so the write lands before the process exits
        store.set_theme_persisted(&name).await?;
        println!("{}", style.success(&format!("Theme set to '{}'", name)));
        Ok(())
    }
}

/// Close the dialog on the option at `index` and return its theme name
pub fn chosen_name(dialog: &mut ThemeDialog, index: usize) -> CliResult<String> {
    dialog
        .choose(
            index,
            |name| name.to_string(),
            || tracing::debug!("Theme dialog closed"),
        )
        .ok_or_else(|| CliError::InvalidArgument {
            message: format!("no theme option at index {}", index),
        })
}

/// Show the dialog until an option is chosen or it is dismissed
///
/// Returns the chosen option index, or `None` when dismissed.
pub fn run_dialog<B, E>(
    terminal: &mut Terminal<B>,
    dialog: &mut ThemeDialog,
    mut next_event: E,
) -> io::Result<Option<usize>>
where
    B: Backend,
    E: FnMut() -> io::Result<Event>,
{
    dialog.show();
    loop {
        terminal.draw(|frame| frame.render_widget(&*dialog, frame.area()))?;

        if let Event::Key(key) = next_event()? {
            match dialog.handle_key(key) {
                DialogAction::Select(index) => return Ok(Some(index)),
                DialogAction::Close => {
                    dialog.hide();
                    return Ok(None);
                }
                DialogAction::None => {}
            }
        }
    }
}

/// Raw-mode alternate screen, restored on drop
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn enter() -> CliResult<Self> {
        enable_raw_mode().map_err(|e| CliError::Terminal(e.to_string()))?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(CliError::Terminal(e.to_string()));
        }

        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }

    fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            tracing::warn!("Failed to disable raw mode: {}", e);
        }
        if let Err(e) = execute!(self.terminal.backend_mut(), LeaveAlternateScreen) {
            tracing::warn!("Failed to leave alternate screen: {}", e);
        }
        let _ = self.terminal.show_cursor();
    }
}
