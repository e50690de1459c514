//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields:
//! - `NavBar`: route tabs and status line
//! - `Message`: a single chat bubble
//! - `NotFound`: the 404 screen
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `ComposeBar`: single-line text input (chat compose, home search)
//! - `MessageList`: scrollable chat history with layout caching
//! - `EmojiPicker` / `FilePrompt`: chat overlays
//!
//! Screens (`HomeFeed`, `ShopCatalog`, `CourseBrowser`, `ChatScreen`,
//! `ConversationList`, `ProfileView`) borrow their data from `App` and
//! their cursor from `TuiState` for one frame.
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as props, not by reaching into global
//! state, so each can be rendered alone against a `TestBackend`.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs               (this file)
//! ├── nav_bar.rs           (route tabs + status)
//! ├── list_cursor.rs       (selection shared by list screens)
//! ├── compose_bar.rs       (text input)
//! ├── message.rs           (chat bubble)
//! ├── message_list.rs      (scrollable chat history)
//! ├── emoji_picker.rs      (overlay)
//! ├── file_prompt.rs       (overlay)
//! ├── home_feed.rs         (Accueil)
//! ├── shop_catalog.rs      (Shop)
//! ├── course_browser.rs    (Cours list frames)
//! ├── chat_screen.rs       (Cours chat frames)
//! ├── conversation_list.rs (Messages)
//! ├── profile_view.rs      (Profil)
//! └── not_found.rs         (unknown paths)
//! ```

use ratatui::layout::Rect;

pub mod chat_screen;
pub mod compose_bar;
pub mod conversation_list;
pub mod course_browser;
pub mod emoji_picker;
pub mod file_prompt;
pub mod home_feed;
pub mod list_cursor;
pub mod message;
pub mod message_list;
pub mod nav_bar;
pub mod not_found;
pub mod profile_view;
pub mod shop_catalog;

pub use chat_screen::ChatScreen;
pub use compose_bar::{ComposeBar, ComposeEvent};
pub use conversation_list::ConversationList;
pub use course_browser::CourseBrowser;
pub use emoji_picker::{EmojiEvent, EmojiPicker, EmojiPickerState};
pub use file_prompt::{FilePrompt, FilePromptEvent, FilePromptState};
pub use home_feed::HomeFeed;
pub use list_cursor::ListCursor;
pub use message_list::{MessageList, MessageListState};
pub use nav_bar::NavBar;
pub use not_found::NotFound;
pub use profile_view::ProfileView;
pub use shop_catalog::ShopCatalog;

/// A `width` x `height` rect centered in `outer`, shrunk to fit.
pub fn centered_rect(width: u16, height: u16, outer: Rect) -> Rect {
    let width = width.min(outer.width);
    let height = height.min(outer.height);
    Rect::new(
        outer.x + (outer.width - width) / 2,
        outer.y + (outer.height - height) / 2,
        width,
        height,
    )
}
