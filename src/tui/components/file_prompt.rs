//! # File Prompt Component
//!
//! Overlay asking for the path of a file to attach, opened from the chat with
//! Ctrl+O. The path is checked by the caller; a rejected path keeps the
//! prompt open with the error shown under the input.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::centered_rect;
use crate::tui::components::compose_bar::{ComposeBar, ComposeEvent};
use crate::tui::event::TuiEvent;

const ACCEPTED_HINT: &str = "Images, vidéos, audio, PDF, DOC, DOCX";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePromptEvent {
    Submit(String),
    Dismiss,
}

pub struct FilePromptState {
    pub input: ComposeBar,
    pub error: Option<String>,
}

impl Default for FilePromptState {
    fn default() -> Self {
        Self::new()
    }
}

impl FilePromptState {
    pub fn new() -> Self {
        Self {
            input: ComposeBar::new(" Chemin du fichier ", "~/Documents/exercice.png"),
            error: None,
        }
    }

    /// Show why the submitted path was refused.
    pub fn reject(&mut self, reason: String) {
        self.error = Some(reason);
    }
}

impl EventHandler for FilePromptState {
    type Event = FilePromptEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Escape | TuiEvent::AttachFile => Some(FilePromptEvent::Dismiss),
            _ => match self.input.handle_event(event)? {
                ComposeEvent::Submit(path) => Some(FilePromptEvent::Submit(path.trim().to_string())),
                ComposeEvent::ContentChanged => {
                    self.error = None;
                    None
                }
            },
        }
    }
}

pub struct FilePrompt<'a> {
    state: &'a mut FilePromptState,
}

impl<'a> FilePrompt<'a> {
    pub fn new(state: &'a mut FilePromptState) -> Self {
        Self { state }
    }
}

impl<'a> Component for FilePrompt<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(area.width.saturating_sub(8).min(70), 7, area);
        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Joindre un fichier ")
            .title_bottom(Line::from(" Entrée joindre  Esc annuler ").centered());
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [input_area, message_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).areas(inner);
        self.state.input.render(frame, input_area);

        let message = match &self.state.error {
            Some(error) => Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
            None => Paragraph::new(ACCEPTED_HINT).style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(message, message_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn submit_returns_trimmed_path() {
        let mut state = FilePromptState::new();
        state.input.insert_str("  /tmp/a.png ");
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(FilePromptEvent::Submit("/tmp/a.png".to_string()))
        );
    }

    #[test]
    fn typing_clears_error() {
        let mut state = FilePromptState::new();
        state.reject("Fichier introuvable".to_string());
        state.handle_event(&TuiEvent::InputChar('x'));
        assert_eq!(state.error, None);
    }

    #[test]
    fn escape_dismisses() {
        let mut state = FilePromptState::new();
        assert_eq!(
            state.handle_event(&TuiEvent::Escape),
            Some(FilePromptEvent::Dismiss)
        );
    }

    #[test]
    fn renders_error_instead_of_hint() {
        let mut state = FilePromptState::new();
        let backend = TestBackend::new(80, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| FilePrompt::new(&mut state).render(f, f.area()))
            .unwrap();
        assert!(buffer_text(terminal.backend().buffer()).contains("PDF"));

        state.reject("Type non pris en charge".to_string());
        terminal
            .draw(|f| FilePrompt::new(&mut state).render(f, f.area()))
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Type non pris en charge"));
        assert!(!text.contains("PDF"));
    }
}
