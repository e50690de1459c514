//! # Application State
//!
//! Core state for the tutoring app. Domain logic only - no TUI types.
//! Presentation state (list cursors, scroll offsets, overlays) lives in `tui`.
//!
//! ```text
//! App
//! ├── route: Route                  // top-level screen
//! ├── home_tab / search_query       // HomeFeed
//! ├── category: Category            // ShopCatalog filter
//! ├── course_nav: CourseNav         // Cours drill-down stack
//! ├── chat: Option<ChatSession>     // open ChatScreen, if any
//! ├── status_message: String        // status bar text
//! ├── reply_delay / unlock_delay    // simulated timers
//! └── fixtures                      // formations, students, products, ...
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::time::Duration;

use crate::core::chat::ChatSession;
use crate::core::config::ResolvedConfig;
use crate::core::fixtures;
use crate::core::model::{
    Category, Conversation, Formation, Post, Product, Profile, Student, Video,
};
use crate::core::navigation::{CourseNav, CourseScreen, Route};

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(2000);
pub const DEFAULT_UNLOCK_DELAY: Duration = Duration::from_millis(1000);

/// Sub-view of the HomeFeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HomeTab {
    #[default]
    Videos,
    Posts,
    Search,
}

impl HomeTab {
    pub const ALL: [HomeTab; 3] = [HomeTab::Videos, HomeTab::Posts, HomeTab::Search];

    pub fn label(&self) -> &'static str {
        match self {
            HomeTab::Videos => "videos",
            HomeTab::Posts => "posts",
            HomeTab::Search => "rechercher",
        }
    }

    pub fn next(self) -> Self {
        match self {
            HomeTab::Videos => HomeTab::Posts,
            HomeTab::Posts => HomeTab::Search,
            HomeTab::Search => HomeTab::Videos,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            HomeTab::Videos => HomeTab::Search,
            HomeTab::Posts => HomeTab::Videos,
            HomeTab::Search => HomeTab::Posts,
        }
    }
}

pub struct App {
    pub route: Route,
    /// Path that produced `route`, shown on the NotFound screen.
    pub requested_path: String,
    pub home_tab: HomeTab,
    pub search_query: String,
    pub category: Category,
    pub course_nav: CourseNav,
    pub chat: Option<ChatSession>,
    pub status_message: String,
    pub reply_delay: Duration,
    pub unlock_delay: Duration,
    pub formations: Vec<Formation>,
    pub students: Vec<Student>,
    pub products: Vec<Product>,
    pub videos: Vec<Video>,
    pub posts: Vec<Post>,
    pub conversations: Vec<Conversation>,
    pub profile: Profile,
    next_session_id: u64,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            route: Route::default(),
            requested_path: Route::default().path().to_string(),
            home_tab: HomeTab::default(),
            search_query: String::new(),
            category: Category::default(),
            course_nav: CourseNav::new(),
            chat: None,
            status_message: String::from("Bienvenue !"),
            reply_delay: DEFAULT_REPLY_DELAY,
            unlock_delay: DEFAULT_UNLOCK_DELAY,
            formations: fixtures::formations(),
            students: fixtures::students(),
            products: fixtures::products(),
            videos: fixtures::videos(),
            posts: fixtures::posts(),
            conversations: fixtures::conversations(),
            profile: fixtures::profile(),
            next_session_id: 1,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            route: Route::from_path(&config.start_route),
            requested_path: config.start_route.clone(),
            reply_delay: config.reply_delay,
            unlock_delay: config.unlock_delay,
            ..Self::new()
        }
    }

    pub fn allocate_session_id(&mut self) -> u64 {
        let id = self.next_session_id;
        self.next_session_id += 1;
        id
    }

    pub fn current_course_screen(&self) -> CourseScreen {
        self.course_nav.current()
    }

    /// Chat session, if it belongs to `session`.
    pub fn chat_for(&mut self, session: u64) -> Option<&mut ChatSession> {
        self.chat.as_mut().filter(|chat| chat.id == session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Bienvenue !");
        assert_eq!(app.route, Route::Home);
        assert_eq!(app.category, Category::All);
        assert_eq!(app.current_course_screen(), CourseScreen::Catalog);
        assert!(app.chat.is_none());
    }

    #[test]
    fn session_ids_increase() {
        let mut app = test_app();
        let a = app.allocate_session_id();
        let b = app.allocate_session_id();
        assert!(b > a);
    }

    #[test]
    fn home_tabs_cycle() {
        assert_eq!(HomeTab::Search.next(), HomeTab::Videos);
        assert_eq!(HomeTab::Videos.prev(), HomeTab::Search);
    }
}
