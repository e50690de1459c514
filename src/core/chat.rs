//! # Chat Session
//!
//! State of one open ChatScreen: the ordered message list plus what is needed
//! to extend it. Operations never perform I/O; the ones that need a deferred
//! follow-up return a [`ScheduledEvent`] that the caller arms as a timer and
//! feeds back through [`ChatSession::apply`] when it fires.
//!
//! Message ids come from a per-session counter, so they stay unique and
//! strictly increasing no matter how replies and unlocks interleave.

use log::debug;

use crate::core::fixtures;
use crate::core::model::{AttachmentKind, ChatMessage, MessageKind};

/// What the chat header shows about the lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonInfo {
    pub title: String,
    pub duration: String,
}

/// A follow-up to append once its timer fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduledEvent {
    /// Simulated counterpart reply in student view.
    TeacherReply { author: String },
    /// Next exercise, unlocked by a positive validation.
    NextExercise,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    /// Distinguishes this session from earlier ones so late timers can be dropped.
    pub id: u64,
    pub lesson: LessonInfo,
    pub teacher_view: bool,
    pub student_name: Option<String>,
    pub messages: Vec<ChatMessage>,
    /// Bumped on every change to `messages`, including in-place edits.
    pub revision: u64,
    next_id: u64,
}

impl ChatSession {
    pub fn new(
        id: u64,
        lesson: LessonInfo,
        teacher_view: bool,
        student_name: Option<String>,
    ) -> Self {
        let messages = fixtures::seed_messages(teacher_view, student_name.as_deref(), 1);
        let next_id = messages.last().map(|m| m.id + 1).unwrap_or(1);
        Self {
            id,
            lesson,
            teacher_view,
            student_name,
            messages,
            revision: 0,
            next_id,
        }
    }

    /// Header title: the lesson, or the student in teacher view.
    pub fn header_title(&self) -> &str {
        &self.lesson.title
    }

    pub fn header_subtitle(&self) -> String {
        if self.teacher_view {
            format!("Vue Professeur • {}", self.lesson.duration)
        } else {
            format!("Leçon interactive • {}", self.lesson.duration)
        }
    }

    fn outgoing_kind(&self) -> MessageKind {
        if self.teacher_view {
            MessageKind::Teacher
        } else {
            MessageKind::User
        }
    }

    fn push(&mut self, build: impl FnOnce(u64) -> ChatMessage) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(build(id));
        self.revision += 1;
        id
    }

    /// Append the composed text. Blank text is ignored.
    ///
    /// In student view the returned event is the counterpart reply to schedule.
    pub fn send_message(&mut self, text: &str) -> Option<ScheduledEvent> {
        if text.trim().is_empty() {
            return None;
        }
        let kind = self.outgoing_kind();
        let id = self.push(|id| ChatMessage::new(id, kind, text));
        debug!("Chat {}: appended {:?} message {}", self.id, kind, id);

        if self.teacher_view {
            return None;
        }
        let author = fixtures::pick_reply_author(&mut rand::thread_rng()).to_string();
        Some(ScheduledEvent::TeacherReply { author })
    }

    /// Record a teacher decision on a submitted exercise.
    ///
    /// Unknown ids and messages that are not awaiting validation are ignored.
    /// A positive decision returns the next-exercise unlock to schedule.
    pub fn validate_exercise(&mut self, id: u64, is_valid: bool) -> Option<ScheduledEvent> {
        let message = self
            .messages
            .iter_mut()
            .find(|m| m.id == id && m.can_validate)?;
        message.validated = Some(is_valid);
        message.can_validate = false;
        self.revision += 1;
        debug!("Chat {}: message {} validated={}", self.id, id, is_valid);

        is_valid.then_some(ScheduledEvent::NextExercise)
    }

    /// Append a message carrying a picked file. Returns the new message id.
    pub fn attach_file(&mut self, file_name: &str, media_type: &str) -> u64 {
        let kind = self.outgoing_kind();
        let attachment = AttachmentKind::from_media_type(media_type);
        let can_validate = !self.teacher_view;
        let content = match attachment {
            AttachmentKind::Image => "Photo envoyée",
            AttachmentKind::Video => "Vidéo envoyée",
            AttachmentKind::File => "Fichier envoyé",
        };
        self.push(|id| {
            let mut message = ChatMessage::new(id, kind, content).with_attachment(attachment, file_name);
            message.can_validate = can_validate;
            message
        })
    }

    /// Append the follow-up for a fired timer.
    pub fn apply(&mut self, event: ScheduledEvent) -> u64 {
        match event {
            ScheduledEvent::TeacherReply { author } => self.push(|id| {
                ChatMessage::new(id, MessageKind::Teacher, fixtures::TEACHER_REPLY).with_author(author)
            }),
            ScheduledEvent::NextExercise => {
                self.push(|id| ChatMessage::new(id, MessageKind::Exercise, fixtures::NEXT_EXERCISE))
            }
        }
    }

    /// Most recent message still awaiting a teacher decision.
    pub fn pending_validation(&self) -> Option<u64> {
        if !self.teacher_view {
            return None;
        }
        self.messages
            .iter()
            .rev()
            .find(|m| m.can_validate)
            .map(|m| m.id)
    }
}
