//! Theme selection dialog
//!
//! Modal dialog offering the three reserved themes. Picking an option calls
//! the supplied setter with the theme name and then the close callback; the
//! dialog never offers custom palette names.
//!
//! # Examples
//!
//! ```ignore
//! let mut dialog = ThemeDialog::new().with_palette(&palette);
//! dialog.show();
//! frame.render_widget(&dialog, frame.area());
//!
//! if let DialogAction::Select(index) = dialog.handle_key(key) {
//!     dialog.choose(index, |name| store.set_theme(name), || close_requested = true);
//! }
//! ```

use ratatui::{
    buffer::Buffer,
    crossterm::event::{KeyCode, KeyEvent, KeyEventKind},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::types::{Palette, ThemeMode};

pub const DIALOG_TITLE: &str = "Select Your Preferred Theme";

/// One selectable entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeOption {
    pub label: &'static str,
    pub value: ThemeMode,
}

pub const THEME_OPTIONS: [ThemeOption; 3] = [
    ThemeOption {
        label: "Dark Theme",
        value: ThemeMode::Dark,
    },
    ThemeOption {
        label: "Light Theme",
        value: ThemeMode::Light,
    },
    ThemeOption {
        label: "System Default",
        value: ThemeMode::System,
    },
];

const HANDLE_WIDTH: u16 = 6;
const OPTION_HEIGHT: u16 = 3;
/// handle, gap, title, gap, options, bottom padding, borders
const DIALOG_HEIGHT: u16 = 1 + 1 + 1 + 1 + OPTION_HEIGHT * THEME_OPTIONS.len() as u16 + 1 + 2;

/// Colors the dialog is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogColors {
    pub background: Color,
    pub text: Color,
    pub stroke: Color,
}

impl Default for DialogColors {
    fn default() -> Self {
        Self {
            background: Color::Rgb(0xff, 0xff, 0xff),
            text: Color::Rgb(0x00, 0x00, 0x00),
            stroke: Color::Rgb(0xc0, 0xe6, 0xba),
        }
    }
}

impl DialogColors {
    /// Take colors from a palette's conventional keys, keeping defaults for
    /// keys that are missing or unparseable
    pub fn from_palette(palette: &Palette) -> Self {
        let defaults = Self::default();
        let pick = |value: Option<&str>, fallback: Color| {
            value
                .and_then(|value| value.parse::<Color>().ok())
                .unwrap_or(fallback)
        };

        Self {
            background: pick(palette.background_color(), defaults.background),
            text: pick(palette.text_color(), defaults.text),
            stroke: pick(palette.stroke_color(), defaults.stroke),
        }
    }
}

/// Outcome of a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    /// Nothing for the host to do
    None,
    /// The user dismissed the dialog
    Close,
    /// The user picked the option at this index
    Select(usize),
}

/// Theme picker state and rendering
#[derive(Debug, Clone)]
pub struct ThemeDialog {
    visible: bool,
    selected: usize,
    colors: DialogColors,
}

impl ThemeDialog {
    /// Create a hidden dialog with default colors
    pub fn new() -> Self {
        Self {
            visible: false,
            selected: 0,
            colors: DialogColors::default(),
        }
    }

    pub fn with_colors(mut self, colors: DialogColors) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_palette(self, palette: &Palette) -> Self {
        self.with_colors(DialogColors::from_palette(palette))
    }

    pub fn colors(&self) -> DialogColors {
        self.colors
    }

    pub fn set_colors(&mut self, colors: DialogColors) {
        self.colors = colors;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            self.show();
        } else {
            self.hide();
        }
    }

    pub fn show(&mut self) {
        self.visible = true;
        self.selected = 0;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Index of the highlighted option
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % THEME_OPTIONS.len();
    }

    pub fn select_previous(&mut self) {
        self.selected = (self.selected + THEME_OPTIONS.len() - 1) % THEME_OPTIONS.len();
    }

    /// Translate a key press into a dialog action
    pub fn handle_key(&mut self, key: KeyEvent) -> DialogAction {
        if !self.visible || key.kind == KeyEventKind::Release {
            return DialogAction::None;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
                self.select_previous();
                DialogAction::None
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.select_next();
                DialogAction::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => DialogAction::Select(self.selected),
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                self.selected = index;
                DialogAction::Select(index)
            }
            KeyCode::Esc | KeyCode::Char('q') => DialogAction::Close,
            _ => DialogAction::None,
        }
    }

    /// Apply the option at `index`: `set_theme` with its name, then `on_close`
    ///
    /// Returns `None` without calling anything when `index` is out of range.
    pub fn choose<T>(
        &mut self,
        index: usize,
        set_theme: impl FnOnce(&str) -> T,
        on_close: impl FnOnce(),
    ) -> Option<T> {
        let option = THEME_OPTIONS.get(index)?;
        let result = set_theme(option.value.as_str());
        on_close();
        self.hide();
        Some(result)
    }

    /// Area the dialog occupies inside `area`
    pub fn dialog_area(area: Rect) -> Rect {
        let width = ((u32::from(area.width) * 4 / 5) as u16)
            .max(area.width.min(24))
            .min(area.width);
        let height = DIALOG_HEIGHT.min(area.height);
        Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        }
    }

    fn option_line(&self, index: usize, option: &ThemeOption) -> Line<'static> {
        let style = if index == self.selected {
            Style::default()
                .fg(self.colors.text)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.colors.text)
        };
        Line::from(Span::styled(option.label, style))
    }
}

impl Default for ThemeDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &ThemeDialog {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.visible || area.is_empty() {
            return;
        }

        let dialog_area = ThemeDialog::dialog_area(area);
        Clear.render(dialog_area, buf);

        let frame = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.colors.stroke))
            .style(Style::default().bg(self.colors.background));
        let inner = frame.inner(dialog_area);
        frame.render(dialog_area, buf);

        let mut constraints = vec![
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ];
        constraints.extend(THEME_OPTIONS.iter().map(|_| Constraint::Length(OPTION_HEIGHT)));
        constraints.push(Constraint::Min(0));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        // drag handle
        Paragraph::new(Line::from(Span::styled(
            "━".repeat(HANDLE_WIDTH as usize),
            Style::default().fg(self.colors.stroke),
        )))
        .alignment(Alignment::Center)
        .render(rows[0], buf);

        Paragraph::new(Line::from(Span::styled(
            DIALOG_TITLE,
            Style::default()
                .fg(self.colors.text)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(rows[2], buf);

        for (index, option) in THEME_OPTIONS.iter().enumerate() {
            let row = rows[4 + index];
            let area = Rect {
                x: row.x + 1,
                width: row.width.saturating_sub(2),
                ..row
            };

            let mut border_style = Style::default().fg(self.colors.stroke);
            if index == self.selected {
                border_style = border_style.add_modifier(Modifier::BOLD);
            }
            let border_set = if index == self.selected {
                ratatui::symbols::border::THICK
            } else {
                ratatui::symbols::border::ROUNDED
            };

            Paragraph::new(self.option_line(index, option))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_set(border_set)
                        .border_style(border_style),
                )
                .render(area, buf);
        }
    }
}
