//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm, and the
//! only one that performs side effects requested by `update()` (arming and
//! cancelling chat timers, quitting).
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 250ms waiting for input and
//! only redraws after an event, a resize, or a timer action.
//!
//! ## Screen Disposal
//!
//! Leaving a chat (`Effect::CancelTimers`) aborts its pending timers and
//! drops the chat-only presentation state: overlays, compose text and
//! scroll position. A timer that still slips through is ignored by the core
//! because its session id no longer matches.

pub mod component;
pub mod components;
pub mod event;
pub mod timers;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::attachment;
use crate::core::config::ResolvedConfig;
use crate::core::navigation::{CourseScreen, Route};
use crate::core::state::{App, HomeTab};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ComposeBar, ComposeEvent, EmojiEvent, EmojiPickerState, FilePromptEvent, FilePromptState,
    ListCursor, MessageListState, course_browser, home_feed,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::timers::ChatTimers;

const COMPOSE_TITLE: &str = " Message ";
const COMPOSE_PLACEHOLDER: &str = "Tapez votre réponse...";

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // List cursors, one per screen
    pub home_cursor: ListCursor,
    pub shop_cursor: ListCursor,
    /// One cursor per frame of the Cours stack
    pub course_cursors: Vec<ListCursor>,
    pub conversation_cursor: ListCursor,
    pub profile_cursor: ListCursor,
    pub search: ComposeBar,
    // Chat screen
    pub message_list: MessageListState,
    pub compose: ComposeBar,
    pub emoji_picker: Option<EmojiPickerState>,
    pub file_prompt: Option<FilePromptState>,
    pub timers: ChatTimers,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            home_cursor: ListCursor::new(),
            shop_cursor: ListCursor::new(),
            course_cursors: vec![ListCursor::new()],
            conversation_cursor: ListCursor::new(),
            profile_cursor: ListCursor::new(),
            search: ComposeBar::new(" Rechercher ", "Titre d'une vidéo ou d'un produit"),
            message_list: MessageListState::new(),
            compose: ComposeBar::new(COMPOSE_TITLE, COMPOSE_PLACEHOLDER),
            emoji_picker: None,
            file_prompt: None,
            timers: ChatTimers::new(),
        }
    }

    /// Keep one cursor per Cours frame: new frames start on their first row,
    /// popped frames give back the cursor of the frame below.
    pub fn sync_course_cursors(&mut self, depth: usize) {
        self.course_cursors.truncate(depth.max(1));
        while self.course_cursors.len() < depth {
            self.course_cursors.push(ListCursor::new());
        }
    }

    pub fn course_cursor(&mut self) -> &mut ListCursor {
        if self.course_cursors.is_empty() {
            self.course_cursors.push(ListCursor::new());
        }
        let last = self.course_cursors.len() - 1;
        &mut self.course_cursors[last]
    }

    /// Fresh chat presentation for a newly opened session.
    fn reset_chat(&mut self) {
        self.message_list = MessageListState::new();
        self.compose = ComposeBar::new(COMPOSE_TITLE, COMPOSE_PLACEHOLDER);
        self.emoji_picker = None;
        self.file_prompt = None;
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,                        // Cursor for the compose and search boxes
            SetCursorStyle::SteadyBlock, // Non-blinking: draw() resets the blink timer
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

/// Run `update` and perform the effect it asks for. Returns true on quit.
fn dispatch(app: &mut App, tui: &mut TuiState, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    let chat_before = app.chat.as_ref().map(|chat| chat.id);
    let effect = update(app, action);

    if app.chat.as_ref().map(|chat| chat.id) != chat_before && app.chat.is_some() {
        tui.reset_chat();
    }
    tui.sync_course_cursors(app.course_nav.depth());

    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::Schedule(scheduled) => {
            tui.timers.schedule(scheduled, tx.clone());
            false
        }
        Effect::CancelTimers => {
            tui.timers.cancel_all();
            tui.reset_chat();
            false
        }
    }
}

/// Translate one terminal event for the current screen. Returns true on quit.
pub fn handle_event(
    app: &mut App,
    tui: &mut TuiState,
    event: TuiEvent,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match event {
        TuiEvent::Resize => return false,
        TuiEvent::ForceQuit => return dispatch(app, tui, Action::Quit, tx),
        _ => {}
    }

    let on_chat = app.route == Route::Cours && app.current_course_screen().is_chat();

    // Overlays take every key while open
    if on_chat && let Some(picker) = tui.emoji_picker.as_mut() {
        match picker.handle_event(&event) {
            Some(EmojiEvent::Picked(glyph)) => {
                tui.compose.insert_str(glyph);
                tui.emoji_picker = None;
            }
            Some(EmojiEvent::Dismiss) => tui.emoji_picker = None,
            None => {}
        }
        return false;
    }
    if on_chat && let Some(prompt) = tui.file_prompt.as_mut() {
        match prompt.handle_event(&event) {
            Some(FilePromptEvent::Submit(path)) => match attachment::pick(&path) {
                Ok(picked) => {
                    tui.file_prompt = None;
                    return dispatch(
                        app,
                        tui,
                        Action::AttachFile {
                            file_name: picked.file_name,
                            media_type: picked.media_type,
                        },
                        tx,
                    );
                }
                Err(e) => {
                    warn!("Attachment refused: {}", e);
                    app.status_message = format!("Fichier refusé : {}", e);
                    prompt.reject(e.to_string());
                }
            },
            Some(FilePromptEvent::Dismiss) => tui.file_prompt = None,
            None => {}
        }
        return false;
    }

    // Navigation shell
    match event {
        TuiEvent::SwitchTab(index) => {
            return match Route::tab(index) {
                Some(route) => dispatch(app, tui, Action::Navigate(route), tx),
                None => false,
            };
        }
        TuiEvent::NextTab => {
            let route = app.route.next();
            return dispatch(app, tui, Action::Navigate(route), tx);
        }
        TuiEvent::PrevTab => {
            let route = app.route.prev();
            return dispatch(app, tui, Action::Navigate(route), tx);
        }
        _ => {}
    }

    match app.route {
        Route::Home => handle_home(app, tui, event, tx),
        Route::Shop => handle_shop(app, tui, event, tx),
        Route::Cours if on_chat => handle_chat(app, tui, event, tx),
        Route::Cours => handle_course_list(app, tui, event, tx),
        Route::Messages => {
            move_cursor(&mut tui.conversation_cursor, &event, app.conversations.len());
            false
        }
        Route::Profil => {
            move_cursor(&mut tui.profile_cursor, &event, app.profile.menu.len());
            false
        }
        Route::NotFound => match event {
            TuiEvent::Submit | TuiEvent::Escape => dispatch(app, tui, Action::Navigate(Route::Home), tx),
            _ => false,
        },
    }
}

/// Up/Down/PageUp/PageDown on a list. Returns whether the event was a move.
fn move_cursor(cursor: &mut ListCursor, event: &TuiEvent, len: usize) -> bool {
    let delta = match event {
        TuiEvent::CursorUp | TuiEvent::ScrollUp => -1,
        TuiEvent::CursorDown | TuiEvent::ScrollDown => 1,
        TuiEvent::ScrollPageUp => -5,
        TuiEvent::ScrollPageDown => 5,
        TuiEvent::CursorHome => -(len as isize),
        TuiEvent::CursorEnd => len as isize,
        _ => return false,
    };
    cursor.move_by(delta, len);
    true
}

fn handle_home(app: &mut App, tui: &mut TuiState, event: TuiEvent, tx: &mpsc::Sender<Action>) -> bool {
    let rows = home_feed::row_count(
        app.home_tab,
        &app.videos,
        &app.posts,
        &app.products,
        &app.search_query,
    );
    if matches!(
        event,
        TuiEvent::CursorUp | TuiEvent::CursorDown | TuiEvent::ScrollUp | TuiEvent::ScrollDown
    ) {
        move_cursor(&mut tui.home_cursor, &event, rows);
        return false;
    }

    if app.home_tab == HomeTab::Search {
        if matches!(event, TuiEvent::Escape) {
            tui.home_cursor = ListCursor::new();
            return dispatch(app, tui, Action::SetHomeTab(HomeTab::Videos), tx);
        }
        return match tui.search.handle_event(&event) {
            Some(ComposeEvent::ContentChanged) => {
                tui.home_cursor = ListCursor::new();
                let query = tui.search.buffer.clone();
                dispatch(app, tui, Action::SetSearchQuery(query), tx)
            }
            // The query is live; Enter keeps the text in the box
            Some(ComposeEvent::Submit(text)) => {
                tui.search.insert_str(&text);
                false
            }
            None => false,
        };
    }

    let tab = match event {
        TuiEvent::CursorRight => app.home_tab.next(),
        TuiEvent::CursorLeft => app.home_tab.prev(),
        TuiEvent::InputChar('/') => HomeTab::Search,
        _ => return false,
    };
    tui.home_cursor = ListCursor::new();
    dispatch(app, tui, Action::SetHomeTab(tab), tx)
}

fn handle_shop(app: &mut App, tui: &mut TuiState, event: TuiEvent, tx: &mpsc::Sender<Action>) -> bool {
    let category = match event {
        TuiEvent::CursorRight => app.category.next(),
        TuiEvent::CursorLeft => app.category.prev(),
        _ => {
            let rows = crate::core::catalog::filter_products(&app.products, app.category).len();
            move_cursor(&mut tui.shop_cursor, &event, rows);
            return false;
        }
    };
    tui.shop_cursor = ListCursor::new();
    dispatch(app, tui, Action::SetCategory(category), tx)
}

fn handle_course_list(
    app: &mut App,
    tui: &mut TuiState,
    event: TuiEvent,
    tx: &mpsc::Sender<Action>,
) -> bool {
    let screen = app.current_course_screen();
    let rows = course_browser::row_count(screen, &app.formations, &app.students);
    if move_cursor(tui.course_cursor(), &event, rows) {
        return false;
    }
    match event {
        TuiEvent::Submit | TuiEvent::CursorRight if rows > 0 => {
            let index = tui.course_cursor().selected();
            let action = match screen {
                CourseScreen::Catalog => Action::OpenFormation(index),
                CourseScreen::Formation { .. } => Action::OpenLevel(index),
                CourseScreen::Level { .. } => Action::OpenLesson(index),
                CourseScreen::TeacherRoster { .. } => Action::OpenStudent(index),
                CourseScreen::LessonChat { .. } | CourseScreen::StudentChat { .. } => return false,
            };
            dispatch(app, tui, action, tx)
        }
        TuiEvent::Escape | TuiEvent::Backspace | TuiEvent::CursorLeft => {
            dispatch(app, tui, Action::Back, tx)
        }
        _ => false,
    }
}

fn handle_chat(app: &mut App, tui: &mut TuiState, event: TuiEvent, tx: &mpsc::Sender<Action>) -> bool {
    match event {
        TuiEvent::Escape => dispatch(app, tui, Action::Back, tx),
        TuiEvent::ToggleEmoji => {
            tui.emoji_picker = Some(EmojiPickerState::new());
            false
        }
        TuiEvent::AttachFile => {
            tui.file_prompt = Some(FilePromptState::new());
            false
        }
        TuiEvent::ValidateOk | TuiEvent::ValidateReject => {
            let Some(id) = app.chat.as_ref().and_then(|chat| chat.pending_validation()) else {
                return false;
            };
            let is_valid = matches!(event, TuiEvent::ValidateOk);
            dispatch(app, tui, Action::ValidateExercise { id, is_valid }, tx)
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::CursorUp
        | TuiEvent::CursorDown => {
            let scroll = match event {
                TuiEvent::CursorUp => TuiEvent::ScrollUp,
                TuiEvent::CursorDown => TuiEvent::ScrollDown,
                other => other,
            };
            tui.message_list.handle_event(&scroll);
            false
        }
        _ => match tui.compose.handle_event(&event) {
            Some(ComposeEvent::Submit(text)) => dispatch(app, tui, Action::SendMessage(text), tx),
            _ => false,
        },
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();
    info!(
        "Starting on {} (reply delay {:?}, unlock delay {:?})",
        config.start_route, app.reply_delay, app.unlock_delay
    );

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from timer tasks
    let (tx, rx) = mpsc::channel();
    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(250));

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&mut app, &mut tui, event, &tx) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Timer actions (simulated replies, exercise unlocks)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(&mut app, &mut tui, action, &tx) {
                should_quit = true;
            }
        }
        if should_quit {
            break;
        }
    }

    tui.timers.cancel_all();
    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chat::ScheduledEvent;
    use crate::core::model::{Category, MessageKind};
    use crate::test_support::test_app;

    fn setup() -> (App, TuiState, mpsc::Sender<Action>, mpsc::Receiver<Action>) {
        let (tx, rx) = mpsc::channel();
        (test_app(), TuiState::new(), tx, rx)
    }

    fn press(app: &mut App, tui: &mut TuiState, tx: &mpsc::Sender<Action>, events: &[TuiEvent]) {
        for event in events {
            handle_event(app, tui, event.clone(), tx);
        }
    }

    fn type_text(app: &mut App, tui: &mut TuiState, tx: &mpsc::Sender<Action>, text: &str) {
        for c in text.chars() {
            handle_event(app, tui, TuiEvent::InputChar(c), tx);
        }
    }

    #[test]
    fn function_keys_switch_routes() {
        let (mut app, mut tui, tx, _rx) = setup();
        press(&mut app, &mut tui, &tx, &[TuiEvent::SwitchTab(2)]);
        assert_eq!(app.route, Route::Cours);
        press(&mut app, &mut tui, &tx, &[TuiEvent::PrevTab, TuiEvent::PrevTab]);
        assert_eq!(app.route, Route::Home);
        press(&mut app, &mut tui, &tx, &[TuiEvent::SwitchTab(9)]);
        assert_eq!(app.route, Route::Home);
    }

    #[test]
    fn force_quit_quits() {
        let (mut app, mut tui, tx, _rx) = setup();
        assert!(handle_event(&mut app, &mut tui, TuiEvent::ForceQuit, &tx));
    }

    #[test]
    fn shop_arrows_cycle_categories() {
        let (mut app, mut tui, tx, _rx) = setup();
        press(&mut app, &mut tui, &tx, &[TuiEvent::SwitchTab(1), TuiEvent::CursorRight]);
        assert_eq!(app.category, Category::Formations);
        press(&mut app, &mut tui, &tx, &[TuiEvent::CursorLeft, TuiEvent::CursorLeft]);
        assert_eq!(app.category, Category::Services);
    }

    #[test]
    fn home_search_updates_query_live() {
        let (mut app, mut tui, tx, _rx) = setup();
        press(&mut app, &mut tui, &tx, &[TuiEvent::InputChar('/')]);
        assert_eq!(app.home_tab, HomeTab::Search);
        type_text(&mut app, &mut tui, &tx, "react");
        assert_eq!(app.search_query, "react");
        press(&mut app, &mut tui, &tx, &[TuiEvent::Escape]);
        assert_eq!(app.home_tab, HomeTab::Videos);
    }

    #[test]
    fn course_cursors_follow_the_stack() {
        let (mut app, mut tui, tx, _rx) = setup();
        press(
            &mut app,
            &mut tui,
            &tx,
            &[TuiEvent::SwitchTab(2), TuiEvent::CursorDown, TuiEvent::Submit],
        );
        assert_eq!(
            app.current_course_screen(),
            CourseScreen::TeacherRoster { formation: 1 }
        );
        assert_eq!(tui.course_cursors.len(), 2);
        assert_eq!(tui.course_cursor().selected(), 0);

        press(&mut app, &mut tui, &tx, &[TuiEvent::Escape]);
        assert_eq!(app.current_course_screen(), CourseScreen::Catalog);
        assert_eq!(tui.course_cursors.len(), 1);
        // The catalog cursor is still on the formation that was opened
        assert_eq!(tui.course_cursor().selected(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn student_chat_round_trip_with_reply_timer() {
        let (mut app, mut tui, tx, rx) = setup();
        press(
            &mut app,
            &mut tui,
            &tx,
            &[
                TuiEvent::SwitchTab(2),
                TuiEvent::Submit,
                TuiEvent::Submit,
                TuiEvent::Submit,
            ],
        );
        assert!(app.current_course_screen().is_chat());
        type_text(&mut app, &mut tui, &tx, "ma réponse");
        press(&mut app, &mut tui, &tx, &[TuiEvent::Submit]);

        let chat = app.chat.as_ref().unwrap();
        assert_eq!(chat.messages.last().unwrap().kind, MessageKind::User);
        assert!(tui.compose.buffer.is_empty());
        assert_eq!(tui.timers.pending(), 1);

        tokio::time::sleep(Duration::from_millis(2001)).await;
        let action = rx.try_recv().unwrap();
        dispatch(&mut app, &mut tui, action, &tx);
        let last = app.chat.as_ref().unwrap().messages.last().unwrap();
        assert_eq!(last.kind, MessageKind::Teacher);
    }

    #[tokio::test(start_paused = true)]
    async fn leaving_chat_cancels_pending_reply() {
        let (mut app, mut tui, tx, rx) = setup();
        press(
            &mut app,
            &mut tui,
            &tx,
            &[
                TuiEvent::SwitchTab(2),
                TuiEvent::Submit,
                TuiEvent::Submit,
                TuiEvent::Submit,
            ],
        );
        type_text(&mut app, &mut tui, &tx, "bonjour");
        press(&mut app, &mut tui, &tx, &[TuiEvent::Submit, TuiEvent::Escape]);

        assert!(app.chat.is_none());
        assert_eq!(
            app.current_course_screen(),
            CourseScreen::Level {
                formation: 0,
                level: 0
            }
        );
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn teacher_validation_unlocks_next_exercise() {
        let (mut app, mut tui, tx, rx) = setup();
        press(
            &mut app,
            &mut tui,
            &tx,
            &[
                TuiEvent::SwitchTab(2),
                TuiEvent::CursorDown,
                TuiEvent::Submit,
                TuiEvent::Submit,
                TuiEvent::ValidateOk,
            ],
        );
        let chat = app.chat.as_ref().unwrap();
        assert!(chat.teacher_view);
        assert_eq!(chat.pending_validation(), None);

        tokio::time::sleep(Duration::from_millis(1001)).await;
        match rx.try_recv() {
            Ok(action @ Action::TimerFired {
                event: ScheduledEvent::NextExercise,
                ..
            }) => {
                dispatch(&mut app, &mut tui, action, &tx);
            }
            other => panic!("Expected NextExercise timer, got {:?}", other),
        }
        let last = app.chat.as_ref().unwrap().messages.last().unwrap();
        assert_eq!(last.kind, MessageKind::Exercise);
    }

    #[test]
    fn emoji_picker_inserts_into_compose() {
        let (mut app, mut tui, tx, _rx) = setup();
        press(
            &mut app,
            &mut tui,
            &tx,
            &[
                TuiEvent::SwitchTab(2),
                TuiEvent::Submit,
                TuiEvent::Submit,
                TuiEvent::Submit,
                TuiEvent::ToggleEmoji,
                TuiEvent::CursorRight,
                TuiEvent::Submit,
            ],
        );
        assert!(tui.emoji_picker.is_none());
        assert_eq!(tui.compose.buffer, crate::core::fixtures::EMOJIS[1]);
        // Still on the chat, nothing was sent
        assert_eq!(app.chat.as_ref().unwrap().messages.len(), 2);
    }

    #[test]
    fn refused_attachment_keeps_prompt_open() {
        let (mut app, mut tui, tx, _rx) = setup();
        press(
            &mut app,
            &mut tui,
            &tx,
            &[
                TuiEvent::SwitchTab(2),
                TuiEvent::Submit,
                TuiEvent::Submit,
                TuiEvent::Submit,
                TuiEvent::AttachFile,
            ],
        );
        type_text(&mut app, &mut tui, &tx, "/definitely/not/here.png");
        press(&mut app, &mut tui, &tx, &[TuiEvent::Submit]);
        let prompt = tui.file_prompt.as_ref().unwrap();
        assert!(prompt.error.is_some());
        assert_eq!(app.chat.as_ref().unwrap().messages.len(), 2);

        press(&mut app, &mut tui, &tx, &[TuiEvent::Escape]);
        assert!(tui.file_prompt.is_none());
        assert!(app.chat.is_some());
    }

    #[test]
    fn not_found_enter_goes_home() {
        let (mut app, mut tui, tx, _rx) = setup();
        app.route = Route::NotFound;
        press(&mut app, &mut tui, &tx, &[TuiEvent::Submit]);
        assert_eq!(app.route, Route::Home);
    }
}
