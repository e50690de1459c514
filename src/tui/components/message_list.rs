//! # MessageList Component
//!
//! Scrollable view of a chat session's messages.
//!
//! ## Responsibilities
//!
//! - Display the session's messages as bubbles
//! - Keep the newest message in view whenever the list changes
//! - Let the user scroll back through history
//! - Cache bubble heights so only changed rows are measured again
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and `&'a ChatSession` (props).
//!
//! Since `Component::render` takes `&mut self`, we can safely mutate the state
//! (including layout cache and scroll state) during the render pass, aligning
//! with Ratatui's `StatefulWidget` pattern.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::chat::ChatSession;
use crate::core::model::ChatMessage;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    /// Scroll offset and view state
    pub scroll_state: ScrollViewState,
    /// Cached layout measurements
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Session revision seen on the previous frame
    seen: Option<(u64, u64)>,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
            seen: None,
        }
    }

    /// Re-pin to the bottom when the session changed since the last frame.
    /// Returns whether it did.
    pub fn follow_changes(&mut self, session_id: u64, revision: u64) -> bool {
        let current = Some((session_id, revision));
        if self.seen == current {
            return false;
        }
        self.seen = current;
        self.stick_to_bottom = true;
        true
    }

    fn max_offset(&self) -> u16 {
        let total: u16 = self.layout.heights.iter().sum();
        total.saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll once the user has scrolled back to the end.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub session: &'a ChatSession,
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut MessageListState, session: &'a ChatSession) -> Self {
        Self { state, session }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let messages = &self.session.messages;
        let teacher_view = self.session.teacher_view;
        let pending = self.session.pending_validation();

        self.state
            .follow_changes(self.session.id, self.session.revision);

        // 1. Refresh heights for rows that changed since the last frame
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(self.session.id, content_width, messages);
        layout.heights.truncate(reusable);
        layout.keys.truncate(reusable);
        for message in messages.iter().skip(reusable) {
            layout
                .heights
                .push(Message::calculate_height(message, teacher_view, content_width));
            layout.keys.push(RowKey::of(message));
        }
        layout.rebuild_prefix_heights();
        layout.session_id = self.session.id;
        layout.content_width = content_width;

        let total_height: u16 = self.state.layout.heights.iter().sum();

        // 2. Clamp and pick the rows worth drawing
        self.state.viewport_height = area.height;
        if self.state.stick_to_bottom {
            let bottom = self.state.max_offset();
            self.state.scroll_state.set_offset(Position { x: 0, y: bottom });
        } else {
            self.state.clamp_scroll();
        }
        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible bubbles into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };
        for i in visible_range {
            let message = &messages[i];
            let height = self.state.layout.heights[i];
            let rect = Rect::new(0, y_offset, content_width, height);
            let is_pending = pending == Some(message.id);
            scroll_view.render_widget(Message::new(message, teacher_view, is_pending), rect);
            y_offset += height;
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// EventHandler is implemented on `MessageListState` rather than `MessageList`
/// because `MessageList` is recreated each frame, while the scroll position
/// must survive between frames.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
                None
            }
            _ => None,
        }
    }
}

/// The parts of a message that change its measured height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowKey {
    id: u64,
    validated: Option<bool>,
    can_validate: bool,
}

impl RowKey {
    pub fn of(message: &ChatMessage) -> Self {
        Self {
            id: message.id,
            validated: message.validated,
            can_validate: message.can_validate,
        }
    }
}

/// Cached layout measurements
#[derive(Default)]
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    keys: Vec<RowKey>,
    session_id: u64,
    content_width: u16,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of leading rows whose cached height is still valid.
    pub fn reusable_count(
        &self,
        session_id: u64,
        content_width: u16,
        messages: &[ChatMessage],
    ) -> usize {
        if self.session_id != session_id || self.content_width != content_width {
            return 0;
        }
        self.keys
            .iter()
            .zip(messages)
            .take_while(|(key, message)| **key == RowKey::of(message))
            .count()
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc += h;
                Some(*acc)
            })
            .collect();
    }

    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chat::{LessonInfo, ScheduledEvent};
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn session() -> ChatSession {
        ChatSession::new(
            7,
            LessonInfo {
                title: "Introduction à React".into(),
                duration: "15 min".into(),
            },
            false,
            None,
        )
    }

    fn filled(cache: &mut LayoutCache, session_id: u64, width: u16, messages: &[ChatMessage]) {
        cache.heights = messages.iter().map(|_| 3).collect();
        cache.keys = messages.iter().map(RowKey::of).collect();
        cache.session_id = session_id;
        cache.content_width = width;
    }

    #[test]
    fn cache_reuses_unchanged_rows() {
        let mut chat = session();
        let mut cache = LayoutCache::new();
        filled(&mut cache, chat.id, 80, &chat.messages);
        assert_eq!(cache.reusable_count(chat.id, 80, &chat.messages), 2);

        chat.send_message("bonjour");
        assert_eq!(cache.reusable_count(chat.id, 80, &chat.messages), 2);
        assert_eq!(cache.reusable_count(chat.id, 40, &chat.messages), 0);
        assert_eq!(cache.reusable_count(chat.id + 1, 80, &chat.messages), 0);
    }

    #[test]
    fn validation_invalidates_from_edited_row() {
        let mut chat = ChatSession::new(
            3,
            LessonInfo {
                title: "Discussion avec Marie Dupont".into(),
                duration: "En cours".into(),
            },
            true,
            Some("Marie Dupont".into()),
        );
        let mut cache = LayoutCache::new();
        filled(&mut cache, chat.id, 80, &chat.messages);
        let id = chat.pending_validation().unwrap();
        chat.validate_exercise(id, false);
        assert_eq!(cache.reusable_count(chat.id, 80, &chat.messages), 2);
    }

    #[test]
    fn visible_range_covers_viewport() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![4; 10];
        cache.rebuild_prefix_heights();
        let range = cache.visible_range(20, 8);
        assert!(range.start <= 5 && range.end >= 7);
        assert!(range.end <= 10);
    }

    #[test]
    fn follow_changes_repins_once_per_revision() {
        let mut state = MessageListState::new();
        assert!(state.follow_changes(1, 0));
        state.stick_to_bottom = false;
        assert!(!state.follow_changes(1, 0));
        assert!(!state.stick_to_bottom);
        assert!(state.follow_changes(1, 1));
        assert!(state.stick_to_bottom);
    }

    #[test]
    fn scrolling_up_detaches_from_bottom() {
        let mut state = MessageListState::new();
        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
        state.handle_event(&TuiEvent::ScrollDown);
        // Empty content: any offset is the bottom
        assert!(state.stick_to_bottom);
    }

    #[test]
    fn newest_message_visible_after_reply() {
        let mut chat = session();
        for i in 0..6 {
            chat.send_message(&format!("message {i}"));
        }
        chat.apply(ScheduledEvent::TeacherReply {
            author: "Clara Design".into(),
        });

        let mut state = MessageListState::new();
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| MessageList::new(&mut state, &chat).render(f, f.area()))
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Clara Design"));
        assert!(!text.contains("Bienvenue"));
    }
}
