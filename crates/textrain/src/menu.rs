//! Document selection list.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, List, ListState, Paragraph},
};

/// List of documents with a highlighted entry.
#[derive(Debug, Default)]
pub struct DocumentMenu {
    names: Vec<String>,
    state: ListState,
}

impl DocumentMenu {
    /// Build a menu with the first entry highlighted.
    pub fn new(names: Vec<String>) -> Self {
        let mut state = ListState::default();
        if !names.is_empty() {
            state.select(Some(0));
        }
        Self { names, state }
    }

    /// Name of the highlighted document.
    pub fn selected(&self) -> Option<&str> {
        self.state
            .selected()
            .and_then(|i| self.names.get(i))
            .map(String::as_str)
    }

    /// Move the highlight down, wrapping to the top.
    pub fn next(&mut self) {
        if self.names.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < self.names.len() => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    /// Move the highlight up, wrapping to the bottom.
    pub fn previous(&mut self) {
        if self.names.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => self.names.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    /// Render the list and its help line into `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, accent: Color) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // List
            Constraint::Length(1), // Help text
        ])
        .split(area);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(Line::from(" textrain ").bold().fg(accent))
            .title_bottom(Line::from(" pick a document ").dark_gray());

        if self.names.is_empty() {
            let empty = Paragraph::new("no documents found".dark_gray()).block(block);
            frame.render_widget(empty, chunks[0]);
        } else {
            let list = List::new(self.names.iter().map(String::as_str))
                .block(block)
                .highlight_style(Style::new().fg(accent).add_modifier(Modifier::BOLD))
                .highlight_symbol("> ");
            frame.render_stateful_widget(list, chunks[0], &mut self.state);
        }

        let help = Line::from(vec![
            "enter".bold().fg(accent),
            " rain  ".dark_gray(),
            "↑/↓".bold().fg(accent),
            " move  ".dark_gray(),
            "q".bold().fg(accent),
            " quit".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[1]);
    }
}
