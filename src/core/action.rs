//! # Actions
//!
//! Everything that can happen in the app becomes an `Action`.
//! User picks a formation? That's `Action::OpenFormation(index)`.
//! A reply timer fires? That's `Action::TimerFired { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an [`Effect`] describing any I/O the adapter must do
//! (arm a timer, cancel timers, quit). No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use std::time::Duration;

use log::{debug, info};

use crate::core::chat::{ChatSession, LessonInfo, ScheduledEvent};
use crate::core::model::Category;
use crate::core::navigation::{CourseScreen, Route};
use crate::core::state::{App, HomeTab};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(Route),
    SetHomeTab(HomeTab),
    SetSearchQuery(String),
    SetCategory(Category),
    /// Index into `App::formations`.
    OpenFormation(usize),
    /// Index into the current formation's levels.
    OpenLevel(usize),
    /// Index into the current level's lessons.
    OpenLesson(usize),
    /// Index into `App::students`.
    OpenStudent(usize),
    Back,
    SendMessage(String),
    ValidateExercise { id: u64, is_valid: bool },
    AttachFile { file_name: String, media_type: String },
    TimerFired { session: u64, event: ScheduledEvent },
    Quit,
}

/// A timer the adapter must arm, tied to the chat session that requested it.
#[derive(Debug, Clone, PartialEq)]
pub struct Scheduled {
    pub session: u64,
    pub delay: Duration,
    pub event: ScheduledEvent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    Schedule(Scheduled),
    /// The chat screen was disposed: abort its pending timers.
    CancelTimers,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,
        Action::Navigate(route) => {
            debug!("Navigate {} -> {}", app.route.path(), route.path());
            app.route = route;
            app.requested_path = route.path().to_string();
            app.status_message = route.label().to_string();
            Effect::None
        }
        Action::SetHomeTab(tab) => {
            app.home_tab = tab;
            Effect::None
        }
        Action::SetSearchQuery(query) => {
            app.search_query = query;
            Effect::None
        }
        Action::SetCategory(category) => {
            app.category = category;
            app.status_message = format!("Catégorie : {}", category.label());
            Effect::None
        }
        Action::OpenFormation(index) => open_formation(app, index),
        Action::OpenLevel(index) => open_level(app, index),
        Action::OpenLesson(index) => open_lesson(app, index),
        Action::OpenStudent(index) => open_student(app, index),
        Action::Back => back(app),
        Action::SendMessage(text) => {
            let Some(chat) = app.chat.as_mut() else {
                return Effect::None;
            };
            let session = chat.id;
            match chat.send_message(&text) {
                Some(event) => Effect::Schedule(Scheduled {
                    session,
                    delay: app.reply_delay,
                    event,
                }),
                None => Effect::None,
            }
        }
        Action::ValidateExercise { id, is_valid } => {
            let Some(chat) = app.chat.as_mut() else {
                return Effect::None;
            };
            if !chat.teacher_view {
                return Effect::None;
            }
            let session = chat.id;
            let scheduled = chat.validate_exercise(id, is_valid);
            app.status_message = if is_valid {
                "Exercice validé".to_string()
            } else {
                "Exercice refusé".to_string()
            };
            match scheduled {
                Some(event) => Effect::Schedule(Scheduled {
                    session,
                    delay: app.unlock_delay,
                    event,
                }),
                None => Effect::None,
            }
        }
        Action::AttachFile {
            file_name,
            media_type,
        } => {
            if let Some(chat) = app.chat.as_mut() {
                chat.attach_file(&file_name, &media_type);
                app.status_message = format!("Fichier joint : {}", file_name);
            }
            Effect::None
        }
        Action::TimerFired { session, event } => {
            match app.chat_for(session) {
                Some(chat) => {
                    let id = chat.apply(event);
                    debug!("Chat {}: timer appended message {}", session, id);
                }
                None => debug!("Dropping timer for disposed chat {}", session),
            }
            Effect::None
        }
    }
}

fn open_formation(app: &mut App, index: usize) -> Effect {
    if app.current_course_screen() != CourseScreen::Catalog {
        return Effect::None;
    }
    let Some(formation) = app.formations.get(index) else {
        return Effect::None;
    };
    let screen = if formation.is_teacher {
        CourseScreen::TeacherRoster { formation: index }
    } else {
        CourseScreen::Formation { formation: index }
    };
    info!("Opening formation '{}' as {:?}", formation.title, screen);
    app.course_nav.push(screen);
    Effect::None
}

fn open_level(app: &mut App, index: usize) -> Effect {
    let CourseScreen::Formation { formation } = app.current_course_screen() else {
        return Effect::None;
    };
    if app.formations[formation].levels.get(index).is_none() {
        return Effect::None;
    }
    app.course_nav.push(CourseScreen::Level {
        formation,
        level: index,
    });
    Effect::None
}

fn open_lesson(app: &mut App, index: usize) -> Effect {
    let CourseScreen::Level { formation, level } = app.current_course_screen() else {
        return Effect::None;
    };
    let Some(lesson) = app.formations[formation].levels[level].lessons.get(index) else {
        return Effect::None;
    };
    let info = LessonInfo {
        title: lesson.title.clone(),
        duration: lesson.duration.clone(),
    };
    info!("Opening lesson '{}'", info.title);
    let session = app.allocate_session_id();
    app.chat = Some(ChatSession::new(session, info, false, None));
    app.course_nav.push(CourseScreen::LessonChat {
        formation,
        level,
        lesson: index,
    });
    Effect::None
}

fn open_student(app: &mut App, index: usize) -> Effect {
    let CourseScreen::TeacherRoster { formation } = app.current_course_screen() else {
        return Effect::None;
    };
    let Some(student) = app.students.get(index) else {
        return Effect::None;
    };
    let name = student.name.clone();
    let info = LessonInfo {
        title: format!("Discussion avec {}", name),
        duration: "En cours".to_string(),
    };
    info!("Opening teacher chat with '{}'", name);
    let session = app.allocate_session_id();
    app.chat = Some(ChatSession::new(session, info, true, Some(name)));
    app.course_nav.push(CourseScreen::StudentChat {
        formation,
        student: index,
    });
    Effect::None
}

fn back(app: &mut App) -> Effect {
    match app.course_nav.back() {
        Some(screen) if screen.is_chat() => {
            if let Some(chat) = app.chat.take() {
                debug!("Disposing chat {}", chat.id);
            }
            Effect::CancelTimers
        }
        _ => Effect::None,
    }
}
