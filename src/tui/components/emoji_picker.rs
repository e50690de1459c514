//! # Emoji Picker Component
//!
//! Overlay grid of the fixed emoji set, opened from the chat with Ctrl+E.
//! Arrow keys move, Enter inserts the glyph into the compose box and closes
//! the picker, Esc (or Ctrl+E again) closes it without inserting.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `EmojiPickerState` lives in `TuiState` while the picker is open
//! - `EmojiPicker` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};

use crate::core::fixtures::EMOJIS;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::centered_rect;
use crate::tui::event::TuiEvent;

pub const COLUMNS: usize = 10;
/// " 😀 " : one space each side of a double-width glyph
const CELL_WIDTH: u16 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmojiEvent {
    Picked(&'static str),
    Dismiss,
}

/// Persistent state for the emoji picker overlay.
#[derive(Debug, Default)]
pub struct EmojiPickerState {
    pub selected: usize,
}

impl EmojiPickerState {
    pub fn new() -> Self {
        Self::default()
    }

    fn rows() -> usize {
        EMOJIS.len().div_ceil(COLUMNS)
    }

    fn move_to(&mut self, row: isize, col: isize) {
        let row = row.clamp(0, Self::rows() as isize - 1) as usize;
        let col = col.clamp(0, COLUMNS as isize - 1) as usize;
        self.selected = (row * COLUMNS + col).min(EMOJIS.len() - 1);
    }

    fn position(&self) -> (isize, isize) {
        ((self.selected / COLUMNS) as isize, (self.selected % COLUMNS) as isize)
    }
}

impl EventHandler for EmojiPickerState {
    type Event = EmojiEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let (row, col) = self.position();
        match event {
            TuiEvent::Escape | TuiEvent::ToggleEmoji => Some(EmojiEvent::Dismiss),
            TuiEvent::Submit => Some(EmojiEvent::Picked(EMOJIS[self.selected])),
            TuiEvent::CursorUp => {
                self.move_to(row - 1, col);
                None
            }
            TuiEvent::CursorDown => {
                self.move_to(row + 1, col);
                None
            }
            TuiEvent::CursorLeft => {
                self.move_to(row, col - 1);
                None
            }
            TuiEvent::CursorRight => {
                self.move_to(row, col + 1);
                None
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the emoji picker overlay.
pub struct EmojiPicker<'a> {
    state: &'a EmojiPickerState,
}

impl<'a> EmojiPicker<'a> {
    pub fn new(state: &'a EmojiPickerState) -> Self {
        Self { state }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        EMOJIS
            .chunks(COLUMNS)
            .enumerate()
            .map(|(row, glyphs)| {
                let spans: Vec<Span> = glyphs
                    .iter()
                    .enumerate()
                    .map(|(col, glyph)| {
                        let style = if row * COLUMNS + col == self.state.selected {
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::REVERSED)
                        } else {
                            Style::default()
                        };
                        Span::styled(format!(" {} ", glyph), style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

impl<'a> Component for EmojiPicker<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = CELL_WIDTH * COLUMNS as u16 + 2;
        let height = EmojiPickerState::rows() as u16 + 2;
        let overlay = centered_rect(width, height, area);
        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Emoji ")
            .title_bottom(Line::from(" Entrée insérer  Esc fermer ").centered());
        frame.render_widget(Paragraph::new(self.lines()).block(block), overlay);
    }
}
