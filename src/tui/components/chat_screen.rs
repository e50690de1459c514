//! # ChatScreen Component
//!
//! Lesson or student conversation: header, a static video placeholder, the
//! scrollable message list and the compose bar, with a key hint underneath.
//!
//! ```text
//! ╭ Introduction à React ─────────────────╮
//! │ Leçon interactive • 15 min            │
//! ╰───────────────────────────────────────╯
//!  ▶ Vidéo de la leçon            15 min
//!  ...messages...
//! ╭ Message ──────────────────────────────╮
//! │ Tapez votre réponse...                │
//! ╰───────────────────────────────────────╯
//!  Entrée envoyer · Ctrl+E emoji · ...
//! ```
//!
//! The emoji and file overlays are drawn on top by the caller.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::chat::ChatSession;
use crate::tui::component::Component;
use crate::tui::components::compose_bar::ComposeBar;
use crate::tui::components::message_list::{MessageList, MessageListState};

pub struct ChatScreen<'a> {
    pub session: &'a ChatSession,
    pub list: &'a mut MessageListState,
    pub compose: &'a mut ComposeBar,
}

pub fn hint(teacher_view: bool) -> &'static str {
    if teacher_view {
        "Entrée envoyer · Ctrl+Y valider · Ctrl+N refuser · Ctrl+E emoji · Ctrl+O fichier · Esc retour"
    } else {
        "Entrée envoyer · Ctrl+E emoji · Ctrl+O fichier · PgUp/PgDn défiler · Esc retour"
    }
}

impl<'a> Component for ChatScreen<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};
        let [header_area, video_area, list_area, compose_area, hint_area] =
            Layout::vertical([Length(3), Length(1), Min(0), Length(3), Length(1)]).areas(area);

        let header = Paragraph::new(self.session.header_subtitle())
            .style(Style::default().fg(Color::Gray))
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Green))
                    .title(Span::styled(
                        format!(" {} ", self.session.header_title()),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    )),
            );
        frame.render_widget(header, header_area);

        let [play_area, duration_area] =
            Layout::horizontal([Min(0), Length(12)]).areas(video_area);
        frame.render_widget(
            Line::from(Span::styled(
                " ▶ Vidéo de la leçon",
                Style::default().fg(Color::White).bg(Color::Black),
            )),
            play_area,
        );
        frame.render_widget(
            Line::from(self.session.lesson.duration.as_str())
                .right_aligned()
                .style(Style::default().fg(Color::DarkGray)),
            duration_area,
        );

        MessageList::new(self.list, self.session).render(frame, list_area);
        self.compose.render(frame, compose_area);

        frame.render_widget(
            Line::from(hint(self.session.teacher_view)).style(Style::default().fg(Color::DarkGray)),
            hint_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chat::LessonInfo;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(session: &ChatSession) -> String {
        let mut list = MessageListState::new();
        let mut compose = ComposeBar::new(" Message ", "Tapez votre réponse...");
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                ChatScreen {
                    session,
                    list: &mut list,
                    compose: &mut compose,
                }
                .render(f, f.area())
            })
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn student_chat_shows_header_seed_and_placeholder() {
        let session = ChatSession::new(
            1,
            LessonInfo {
                title: "Introduction à React".into(),
                duration: "15 min".into(),
            },
            false,
            None,
        );
        let text = render(&session);
        assert!(text.contains("Introduction à React"));
        assert!(text.contains("Leçon interactive • 15 min"));
        assert!(text.contains("Vidéo de la leçon"));
        assert!(text.contains("exercice-1.png"));
        assert!(text.contains("Tapez votre réponse..."));
        assert!(!text.contains("Ctrl+Y"));
    }

    #[test]
    fn teacher_chat_shows_validation_hint() {
        let session = ChatSession::new(
            2,
            LessonInfo {
                title: "Discussion avec Marie Dupont".into(),
                duration: "En cours".into(),
            },
            true,
            Some("Marie Dupont".into()),
        );
        let text = render(&session);
        assert!(text.contains("Discussion avec Marie Dupont"));
        assert!(text.contains("Vue Professeur"));
        assert!(text.contains("Ctrl+Y valider"));
    }
}
