//! # ComposeBar Component
//!
//! Single-line text field used for the chat compose box and the home search
//! box.
//!
//! ## Responsibilities
//!
//! - Capture text input, paste and emoji insertion at the cursor
//! - Handle editing (backspace, delete, left/right, home/end)
//! - Emit `Submit` on Enter when the text is not blank, then clear itself
//! - Show a placeholder while empty
//!
//! The buffer is internal state. Title, placeholder and focus are props.
//! Horizontal scrolling keeps the cursor visible when the text is wider
//! than the box; widths are measured with `unicode-width` so emoji count
//! as two columns.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Border (2) + padding (2)
const HORIZONTAL_OVERHEAD: u16 = 4;

#[derive(Debug, Clone, PartialEq)]
pub enum ComposeEvent {
    /// Enter on non-blank text. The buffer has already been cleared.
    Submit(String),
    ContentChanged,
}

pub struct ComposeBar {
    pub buffer: String,
    pub title: String,
    pub placeholder: String,
    pub focused: bool,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
}

impl ComposeBar {
    pub fn new(title: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            title: title.into(),
            placeholder: placeholder.into(),
            focused: true,
            cursor: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Insert text at the cursor. Newlines become spaces.
    pub fn insert_str(&mut self, text: &str) {
        let flat = text.replace(['\r', '\n'], " ");
        self.buffer.insert_str(self.cursor, &flat);
        self.cursor += flat.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// The slice of the buffer to draw and the cursor column inside it.
    fn viewport(&self, inner_width: u16) -> (&str, u16) {
        let inner = inner_width as usize;
        let before = &self.buffer[..self.cursor];
        let mut start = 0;
        // Drop leading chars until the cursor fits (leave one column for it)
        while inner > 0 && before[start..].width() >= inner {
            start = next_char_boundary(&self.buffer, start);
        }
        let visible = &self.buffer[start..];
        let cursor_col = before[start..].width() as u16;
        (visible, cursor_col)
    }
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

impl Component for ComposeBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(ratatui::widgets::Padding::horizontal(1))
            .title(self.title.clone());

        let inner_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(self.placeholder.clone()).style(Style::default().fg(Color::DarkGray))
        } else {
            let (visible, _) = self.viewport(inner_width);
            Paragraph::new(visible.to_string())
        };
        frame.render_widget(paragraph.block(block), area);

        if self.focused && area.height >= 3 {
            let (_, col) = self.viewport(inner_width);
            frame.set_cursor_position((area.x + 2 + col, area.y + 1));
        }
    }
}

impl EventHandler for ComposeBar {
    type Event = ComposeEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(ComposeEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.insert_str(text);
                Some(ComposeEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(ComposeEvent::ContentChanged)
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                Some(ComposeEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                ComposeEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                ComposeEvent::ContentChanged
            }),
            TuiEvent::CursorHome => (self.cursor != 0).then(|| {
                self.cursor = 0;
                ComposeEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor != self.buffer.len()).then(|| {
                self.cursor = self.buffer.len();
                ComposeEvent::ContentChanged
            }),
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                Some(ComposeEvent::Submit(text))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn bar() -> ComposeBar {
        ComposeBar::new("Message", "Tapez votre réponse...")
    }

    #[test]
    fn typing_and_backspace() {
        let mut input = bar();
        input.handle_event(&TuiEvent::InputChar('a'));
        input.handle_event(&TuiEvent::InputChar('é'));
        assert_eq!(input.buffer, "aé");
        assert_eq!(input.cursor(), 3);
        assert_eq!(
            input.handle_event(&TuiEvent::Backspace),
            Some(ComposeEvent::ContentChanged)
        );
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn submit_clears_buffer() {
        let mut input = bar();
        input.insert_str("bonjour");
        match input.handle_event(&TuiEvent::Submit) {
            Some(ComposeEvent::Submit(text)) => assert_eq!(text, "bonjour"),
            other => panic!("Expected Submit, got {:?}", other),
        }
        assert!(input.buffer.is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn blank_submit_is_swallowed() {
        let mut input = bar();
        input.insert_str("   ");
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.buffer, "   ");
    }

    #[test]
    fn insert_at_cursor_middle() {
        let mut input = bar();
        input.insert_str("ab");
        input.handle_event(&TuiEvent::CursorLeft);
        input.insert_str("😀");
        assert_eq!(input.buffer, "a😀b");
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "😀b");
    }

    #[test]
    fn paste_flattens_newlines() {
        let mut input = bar();
        input.handle_event(&TuiEvent::Paste("un\ndeux".to_string()));
        assert_eq!(input.buffer, "un deux");
    }

    #[test]
    fn viewport_keeps_cursor_visible() {
        let mut input = bar();
        input.insert_str("abcdefghij");
        let (visible, col) = input.viewport(4);
        assert!(col < 4);
        assert!(visible.ends_with('j'));
    }

    #[test]
    fn renders_placeholder_when_empty() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut input = bar();
        terminal.draw(|f| input.render(f, f.area())).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Tapez votre réponse..."));
        assert!(text.contains("Message"));
    }
}
