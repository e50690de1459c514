//! # Navigation
//!
//! Two layers:
//!
//! - [`Route`]: the top-level screen, addressed by path like a browser URL.
//! - [`CourseNav`]: the drill-down inside the Cours route, kept as an explicit
//!   stack of typed frames so "back" always returns to the frame that opened
//!   the current one.
//!
//! ```text
//! Catalog ─┬─ Formation ── Level ── LessonChat
//!          └─ TeacherRoster ── StudentChat
//! ```
//!
//! Frames hold indices into the fixture lists owned by `App`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Shop,
    Cours,
    Messages,
    Profil,
    NotFound,
}

impl Route {
    /// Tabs shown in the navigation bar, in display order.
    pub const TABS: [Route; 5] = [
        Route::Home,
        Route::Shop,
        Route::Cours,
        Route::Messages,
        Route::Profil,
    ];

    pub fn from_path(path: &str) -> Self {
        match path.trim() {
            "/" => Route::Home,
            "/shop" => Route::Shop,
            "/cours" => Route::Cours,
            "/messages" => Route::Messages,
            "/profil" => Route::Profil,
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Shop => "/shop",
            Route::Cours => "/cours",
            Route::Messages => "/messages",
            Route::Profil => "/profil",
            Route::NotFound => "*",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::Home => "Accueil",
            Route::Shop => "Shop",
            Route::Cours => "Cours",
            Route::Messages => "Messages",
            Route::Profil => "Profil",
            Route::NotFound => "404",
        }
    }

    /// Tab at a zero-based position in the bar.
    pub fn tab(index: usize) -> Option<Self> {
        Self::TABS.get(index).copied()
    }

    /// Next tab in the bar, wrapping. NotFound moves to the first tab.
    pub fn next(self) -> Self {
        match Self::TABS.iter().position(|r| *r == self) {
            Some(i) => Self::TABS[(i + 1) % Self::TABS.len()],
            None => Self::TABS[0],
        }
    }

    pub fn prev(self) -> Self {
        match Self::TABS.iter().position(|r| *r == self) {
            Some(i) => Self::TABS[(i + Self::TABS.len() - 1) % Self::TABS.len()],
            None => Self::TABS[0],
        }
    }
}

/// One frame of the Cours drill-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseScreen {
    Catalog,
    Formation { formation: usize },
    Level { formation: usize, level: usize },
    LessonChat { formation: usize, level: usize, lesson: usize },
    TeacherRoster { formation: usize },
    StudentChat { formation: usize, student: usize },
}

impl CourseScreen {
    pub fn is_chat(&self) -> bool {
        matches!(
            self,
            CourseScreen::LessonChat { .. } | CourseScreen::StudentChat { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseNav {
    /// Never empty: the bottom frame is always `Catalog`.
    stack: Vec<CourseScreen>,
}

impl Default for CourseNav {
    fn default() -> Self {
        Self::new()
    }
}

impl CourseNav {
    pub fn new() -> Self {
        Self {
            stack: vec![CourseScreen::Catalog],
        }
    }

    pub fn current(&self) -> CourseScreen {
        self.stack.last().copied().unwrap_or(CourseScreen::Catalog)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn push(&mut self, screen: CourseScreen) {
        self.stack.push(screen);
    }

    /// Pop the current frame. Returns the popped frame, or `None` on the catalog.
    pub fn back(&mut self) -> Option<CourseScreen> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    /// Frames from the catalog to the current one, for breadcrumbs.
    pub fn frames(&self) -> &[CourseScreen] {
        &self.stack
    }
}
