//! Messages screen: static list of conversations with avatar, last message,
//! timestamp, unread badge and online dot.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem};

use crate::core::model::Conversation;
use crate::tui::component::Component;
use crate::tui::components::list_cursor::ListCursor;

pub struct ConversationList<'a> {
    pub conversations: &'a [Conversation],
    pub cursor: &'a mut ListCursor,
}

fn conversation_item(conversation: &Conversation) -> ListItem<'static> {
    let presence = if conversation.online {
        Span::styled("● ", Style::default().fg(Color::Green))
    } else {
        Span::styled("○ ", Style::default().fg(Color::DarkGray))
    };
    let mut header = vec![
        presence,
        Span::styled(
            format!("[{}] ", conversation.avatar),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            conversation.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", conversation.timestamp),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if conversation.unread > 0 {
        header.push(Span::styled(
            format!("  {} ", conversation.unread),
            Style::default().fg(Color::White).bg(Color::Green),
        ));
    }
    ListItem::new(vec![
        Line::from(header),
        Line::from(Span::styled(
            format!("      {}", conversation.last_message),
            Style::default().fg(Color::DarkGray),
        )),
    ])
}

impl<'a> Component for ConversationList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.clamp(self.conversations.len());
        let items: Vec<ListItem> = self.conversations.iter().map(conversation_item).collect();
        let list = List::new(items)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(" Messages "),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, area, &mut self.cursor.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{buffer_text, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn lists_conversations_with_unread_counts() {
        let app = test_app();
        let mut cursor = ListCursor::new();
        let backend = TestBackend::new(80, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                ConversationList {
                    conversations: &app.conversations,
                    cursor: &mut cursor,
                }
                .render(f, f.area())
            })
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("[M] Prof. Martin"));
        assert!(text.contains("Formation React - Groupe"));
        assert!(text.contains("Rappel: exercice à rendre demain"));
        assert!(text.contains("● "));
    }
}
