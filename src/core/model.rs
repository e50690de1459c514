//! # Domain Records
//!
//! Fixture record types shown by the screens. Everything here is read-only
//! demo data except [`ChatMessage`], whose validation fields are mutated by
//! the teacher action.

use chrono::{DateTime, Local};

// ============================================================================
// Courses
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Lesson {
    pub id: u32,
    pub title: String,
    pub completed: bool,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub last_message: String,
    pub timestamp: String,
    pub unread: u32,
    pub lessons: Vec<Lesson>,
}

impl Level {
    pub fn completed_count(&self) -> usize {
        self.lessons.iter().filter(|l| l.completed).count()
    }

    /// "3 leçons" / "1 leçon"
    pub fn lesson_count_label(&self) -> String {
        let n = self.lessons.len();
        format!("{} leçon{}", n, if n > 1 { "s" } else { "" })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Formation {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub progress: u8,
    pub students: u32,
    pub rating: f32,
    /// The current user teaches this formation: selecting it opens the roster.
    pub is_teacher: bool,
    pub levels: Vec<Level>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: u32,
    pub name: String,
    pub avatar: String,
    pub last_message: String,
    pub timestamp: String,
    pub unread: u32,
    pub progress: u8,
}

// ============================================================================
// Shop
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    Formations,
    Livres,
    Materiel,
    Services,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::All,
        Category::Formations,
        Category::Livres,
        Category::Materiel,
        Category::Services,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Formations => "formations",
            Category::Livres => "livres",
            Category::Materiel => "materiel",
            Category::Services => "services",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::All => "Tout",
            Category::Formations => "Formations",
            Category::Livres => "Livres",
            Category::Materiel => "Matériel",
            Category::Services => "Services",
        }
    }

    /// Parse a category id. Unknown ids yield `None`.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductKind {
    Formation,
    Product,
    Service,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub category: Category,
    pub price: u32,
    pub original_price: Option<u32>,
    pub rating: f32,
    pub reviews: u32,
    pub author: String,
    pub description: String,
    pub kind: ProductKind,
}

impl Product {
    /// Rounded discount percentage when an original price is set.
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price?;
        if original == 0 || original <= self.price {
            return None;
        }
        let pct = (original - self.price) as f32 / original as f32 * 100.0;
        Some(pct.round() as u32)
    }

    pub fn call_to_action(&self) -> &'static str {
        match self.kind {
            ProductKind::Formation => "S'inscrire",
            ProductKind::Product | ProductKind::Service => "Ajouter au panier",
        }
    }

    /// Five-star row with `floor(rating)` filled stars.
    pub fn star_row(&self) -> String {
        let filled = (self.rating.floor() as usize).min(5);
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
    }
}

// ============================================================================
// Home feed, messages, profile
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoKind {
    Promo,
    Educational,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub duration: String,
    pub kind: VideoKind,
    pub likes: u32,
    pub comments: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: u32,
    pub author: String,
    pub content: String,
    pub has_image: bool,
    pub likes: u32,
    pub comments: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    pub id: u32,
    pub name: String,
    pub last_message: String,
    pub timestamp: String,
    pub unread: u32,
    pub avatar: char,
    pub online: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileStat {
    pub label: String,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub initials: String,
    pub name: String,
    pub email: String,
    pub member_since: String,
    pub stats: Vec<ProfileStat>,
    /// (formation label, percent)
    pub progress: Vec<(String, u8)>,
    pub menu: Vec<String>,
}

// ============================================================================
// Chat
// ============================================================================

/// Who or what produced a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    System,
    Exercise,
    User,
    Teacher,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Video,
    File,
}

impl AttachmentKind {
    /// Classify by declared media type prefix.
    pub fn from_media_type(media_type: &str) -> Self {
        if media_type.starts_with("image/") {
            AttachmentKind::Image
        } else if media_type.starts_with("video/") {
            AttachmentKind::Video
        } else {
            AttachmentKind::File
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            AttachmentKind::Image => "🖼",
            AttachmentKind::Video => "🎬",
            AttachmentKind::File => "📄",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub kind: AttachmentKind,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub kind: MessageKind,
    pub content: String,
    pub timestamp: DateTime<Local>,
    pub attachment: Option<Attachment>,
    pub author: Option<String>,
    /// `None` until a teacher validates or rejects the message.
    pub validated: Option<bool>,
    pub can_validate: bool,
}

impl ChatMessage {
    pub fn new(id: u64, kind: MessageKind, content: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            content: content.into(),
            timestamp: Local::now(),
            attachment: None,
            author: None,
            validated: None,
            can_validate: false,
        }
    }

    pub fn with_attachment(mut self, kind: AttachmentKind, file_name: impl Into<String>) -> Self {
        self.attachment = Some(Attachment {
            kind,
            file_name: file_name.into(),
        });
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn validatable(mut self) -> Self {
        self.can_validate = true;
        self
    }

    /// "14:32" style label.
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}
