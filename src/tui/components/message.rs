use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::core::model::{ChatMessage, MessageKind};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders one chat bubble.
///
/// # Design
///
/// `Message` is a **transient component**: it's created fresh each frame with
/// the message and the few props that change its look. It holds no state.
///
/// # Styling
///
/// - **System** (dark gray, italic): full-width centered notice, no border
/// - **Exercise** (yellow): assignment with its attachment
/// - **User** (green) / **Teacher** (blue): conversation bubbles
///
/// Outgoing bubbles (the viewer's own messages) are pushed to the right,
/// incoming ones to the left, like a messaging app.
///
/// # Height Calculation
///
/// Text is pre-wrapped with `textwrap` and rendered line by line, so
/// [`calculate_height`](Self::calculate_height) always agrees with what is
/// drawn and `MessageList` can lay out the scroll canvas without rendering.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub message: &'a ChatMessage,
    /// Chat is shown to the teacher (changes outgoing side and hints).
    pub teacher_view: bool,
    /// Next message the teacher validation keys act on.
    pub is_pending: bool,
}

impl<'a> Message<'a> {
    pub fn new(message: &'a ChatMessage, teacher_view: bool, is_pending: bool) -> Self {
        Self {
            message,
            teacher_view,
            is_pending,
        }
    }

    fn is_outgoing(message: &ChatMessage, teacher_view: bool) -> bool {
        match message.kind {
            MessageKind::User => !teacher_view,
            MessageKind::Teacher => teacher_view,
            MessageKind::System | MessageKind::Exercise => false,
        }
    }

    /// Where the bubble sits inside a row of the given area.
    pub fn bubble_rect(message: &ChatMessage, teacher_view: bool, area: Rect) -> Rect {
        if matches!(message.kind, MessageKind::System) {
            return area;
        }
        let width = (area.width.saturating_mul(4) / 5).max(area.width.min(HORIZONTAL_OVERHEAD + 1));
        let x = if Self::is_outgoing(message, teacher_view) {
            area.x + area.width - width
        } else {
            area.x
        };
        Rect::new(x, area.y, width, area.height)
    }

    fn footer(message: &ChatMessage, teacher_view: bool) -> Option<String> {
        match (message.validated, message.can_validate) {
            (Some(true), _) => Some("✓ Exercice validé".to_string()),
            (Some(false), _) => Some("✗ Exercice refusé".to_string()),
            (None, true) if teacher_view => Some("Ctrl+Y valider · Ctrl+N refuser".to_string()),
            (None, true) => Some("⏳ En attente de validation".to_string()),
            (None, false) => None,
        }
    }

    /// All text lines of the bubble body before wrapping.
    fn raw_lines(message: &ChatMessage, teacher_view: bool) -> Vec<String> {
        let mut lines = vec![message.content.trim().to_string()];
        if let Some(attachment) = &message.attachment {
            lines.push(format!("{} {}", attachment.kind.icon(), attachment.file_name));
        }
        if let Some(footer) = Self::footer(message, teacher_view) {
            lines.push(footer);
        }
        lines
    }

    fn wrapped_lines(message: &ChatMessage, teacher_view: bool, content_width: u16) -> Vec<String> {
        let options = textwrap::Options::new(content_width.max(1) as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);
        Self::raw_lines(message, teacher_view)
            .iter()
            .flat_map(|line| {
                let wrapped = textwrap::wrap(line, &options);
                if wrapped.is_empty() {
                    vec![String::new()]
                } else {
                    wrapped.into_iter().map(|l| l.into_owned()).collect()
                }
            })
            .collect()
    }

    /// Calculate the height required for this message in a row of `width` columns.
    pub fn calculate_height(message: &ChatMessage, teacher_view: bool, width: u16) -> u16 {
        let row = Rect::new(0, 0, width, 1);
        let bubble = Self::bubble_rect(message, teacher_view, row);
        if matches!(message.kind, MessageKind::System) {
            return Self::wrapped_lines(message, teacher_view, width).len().max(1) as u16;
        }
        let content_width = bubble.width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Degenerate case: terminal too narrow for borders + padding.
            return 1;
        }
        let lines = Self::wrapped_lines(message, teacher_view, content_width);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }

    fn title(&self) -> String {
        let label = match self.message.kind {
            MessageKind::Exercise => "📝 Exercice".to_string(),
            MessageKind::User if self.teacher_view => self
                .message
                .author
                .clone()
                .unwrap_or_else(|| "Élève".to_string()),
            MessageKind::User | MessageKind::Teacher if Self::is_outgoing(self.message, self.teacher_view) => {
                "Vous".to_string()
            }
            MessageKind::Teacher => self
                .message
                .author
                .clone()
                .unwrap_or_else(|| "Professeur".to_string()),
            MessageKind::User | MessageKind::System => String::new(),
        };
        format!(" {} · {} ", label, self.message.time_label())
    }
}

pub fn kind_style(kind: MessageKind) -> Style {
    match kind {
        MessageKind::System => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
        MessageKind::Exercise => Style::default().fg(Color::Yellow),
        MessageKind::User => Style::default().fg(Color::Green),
        MessageKind::Teacher => Style::default().fg(Color::Blue),
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = kind_style(self.message.kind);

        if matches!(self.message.kind, MessageKind::System) {
            let lines: Vec<Line> = Self::wrapped_lines(self.message, self.teacher_view, area.width)
                .into_iter()
                .map(Line::from)
                .collect();
            Paragraph::new(lines)
                .style(style)
                .alignment(Alignment::Center)
                .render(area, buf);
            return;
        }

        let bubble = Self::bubble_rect(self.message, self.teacher_view, area);
        let border_style = if self.is_pending {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            style.add_modifier(Modifier::DIM)
        };

        let block = Block::bordered()
            .title(self.title())
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));
        let inner = block.inner(bubble);
        block.render(bubble, buf);

        let content_width = bubble.width.saturating_sub(HORIZONTAL_OVERHEAD);
        let lines: Vec<Line> = Self::wrapped_lines(self.message, self.teacher_view, content_width)
            .into_iter()
            .map(Line::from)
            .collect();
        Paragraph::new(lines).style(style).render(inner, buf);
    }
}

impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::AttachmentKind;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn msg(kind: MessageKind, content: &str) -> ChatMessage {
        ChatMessage::new(1, kind, content)
    }

    // ==========================================================================
    // calculate_height tests
    // ==========================================================================

    #[test]
    fn system_message_has_no_border_overhead() {
        let m = msg(MessageKind::System, "Bienvenue");
        assert_eq!(Message::calculate_height(&m, false, 80), 1);
    }

    #[test]
    fn single_line_bubble() {
        let m = msg(MessageKind::User, "Bonjour");
        assert_eq!(Message::calculate_height(&m, false, 80), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn attachment_and_footer_add_lines() {
        let m = msg(MessageKind::User, "Photo envoyée")
            .with_attachment(AttachmentKind::Image, "a.png")
            .validatable();
        // content + attachment + "awaiting validation" footer
        assert_eq!(Message::calculate_height(&m, false, 80), 3 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn long_text_wraps_inside_bubble() {
        // Width 15 → bubble 12 → content 8
        let m = msg(MessageKind::Teacher, "abcdefghijklmnop");
        assert_eq!(Message::calculate_height(&m, false, 15), 2 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn zero_width_is_degenerate() {
        let m = msg(MessageKind::User, "x");
        assert_eq!(Message::calculate_height(&m, false, 0), 1);
    }

    // ==========================================================================
    // Layout and rendering
    // ==========================================================================

    #[test]
    fn outgoing_side_depends_on_view() {
        let area = Rect::new(0, 0, 50, 3);
        let user = msg(MessageKind::User, "x");
        assert_eq!(Message::bubble_rect(&user, false, area).x, 10);
        assert_eq!(Message::bubble_rect(&user, true, area).x, 0);
        let teacher = msg(MessageKind::Teacher, "x");
        assert_eq!(Message::bubble_rect(&teacher, true, area).x, 10);
    }

    #[test]
    fn footer_reflects_validation_state() {
        let mut m = msg(MessageKind::User, "x").validatable();
        assert_eq!(
            Message::footer(&m, true).as_deref(),
            Some("Ctrl+Y valider · Ctrl+N refuser")
        );
        m.validated = Some(false);
        m.can_validate = false;
        assert_eq!(Message::footer(&m, true).as_deref(), Some("✗ Exercice refusé"));
        assert_eq!(Message::footer(&msg(MessageKind::User, "x"), false), None);
    }

    #[test]
    fn renders_author_and_attachment() {
        let m = msg(MessageKind::Teacher, "Excellente réponse")
            .with_author("Dr. Sophie")
            .with_attachment(AttachmentKind::File, "corrige.pdf");
        let height = Message::calculate_height(&m, false, 60);
        let backend = TestBackend::new(60, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| f.render_widget(Message::new(&m, false, false), f.area()))
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Dr. Sophie"));
        assert!(text.contains("Excellente réponse"));
        assert!(text.contains("corrige.pdf"));
    }

    #[test]
    fn style_per_kind() {
        assert_eq!(kind_style(MessageKind::User).fg, Some(Color::Green));
        assert_eq!(kind_style(MessageKind::Teacher).fg, Some(Color::Blue));
        assert_eq!(kind_style(MessageKind::Exercise).fg, Some(Color::Yellow));
        assert!(
            kind_style(MessageKind::System)
                .add_modifier
                .contains(Modifier::ITALIC)
        );
    }
}
