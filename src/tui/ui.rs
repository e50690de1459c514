use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;

use crate::core::navigation::{CourseScreen, Route};
use crate::core::state::{App, HomeTab};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    ChatScreen, ConversationList, CourseBrowser, EmojiPicker, FilePrompt, HomeFeed, NavBar,
    NotFound, ProfileView, ShopCatalog,
};

/// Key hint for the current screen, shown on the last line.
pub fn screen_hint(app: &App) -> &'static str {
    match app.route {
        Route::Home if app.home_tab == HomeTab::Search => {
            "Tapez pour chercher · ↑↓ résultats · Esc quitter la recherche · F1-F5 onglets"
        }
        Route::Home => "←→ videos/posts · / rechercher · ↑↓ parcourir · F1-F5 onglets · Ctrl+C quitter",
        Route::Shop => "←→ catégorie · ↑↓ parcourir · F1-F5 onglets · Ctrl+C quitter",
        Route::Cours => match app.current_course_screen() {
            CourseScreen::Catalog => "↑↓ choisir · Entrée ouvrir · F1-F5 onglets · Ctrl+C quitter",
            _ => "↑↓ choisir · Entrée ouvrir · Esc retour · F1-F5 onglets",
        },
        Route::Messages | Route::Profil => "↑↓ parcourir · F1-F5 onglets · Ctrl+C quitter",
        Route::NotFound => "Entrée accueil · F1-F5 onglets · Ctrl+C quitter",
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [nav_area, body_area, hint_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());

    NavBar::new(app.route, app.status_message.clone()).render(frame, nav_area);

    let on_chat = app.route == Route::Cours && app.current_course_screen().is_chat();
    if on_chat && let Some(session) = app.chat.as_ref() {
        // The chat draws its own hint line
        let area = Rect {
            height: body_area.height + hint_area.height,
            ..body_area
        };
        ChatScreen {
            session,
            list: &mut tui.message_list,
            compose: &mut tui.compose,
        }
        .render(frame, area);

        if let Some(picker) = tui.emoji_picker.as_ref() {
            EmojiPicker::new(picker).render(frame, area);
        }
        if let Some(prompt) = tui.file_prompt.as_mut() {
            FilePrompt::new(prompt).render(frame, area);
        }
        return;
    }

    draw_body(frame, body_area, app, tui);
    frame.render_widget(
        Line::from(screen_hint(app)).style(Style::default().fg(Color::DarkGray)),
        hint_area,
    );
}

fn draw_body(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    match app.route {
        Route::Home => {
            tui.search.focused = app.home_tab == HomeTab::Search;
            HomeFeed {
                tab: app.home_tab,
                videos: &app.videos,
                posts: &app.posts,
                products: &app.products,
                query: &app.search_query,
                cursor: &mut tui.home_cursor,
                search: &mut tui.search,
            }
            .render(frame, area)
        }
        Route::Shop => ShopCatalog {
            products: &app.products,
            category: app.category,
            cursor: &mut tui.shop_cursor,
        }
        .render(frame, area),
        Route::Cours => {
            let screen = app.current_course_screen();
            CourseBrowser {
                screen,
                formations: &app.formations,
                students: &app.students,
                cursor: tui.course_cursor(),
            }
            .render(frame, area)
        }
        Route::Messages => ConversationList {
            conversations: &app.conversations,
            cursor: &mut tui.conversation_cursor,
        }
        .render(frame, area),
        Route::Profil => ProfileView {
            profile: &app.profile,
            cursor: &mut tui.profile_cursor,
        }
        .render(frame, area),
        Route::NotFound => NotFound {
            path: &app.requested_path,
        }
        .render(frame, area),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::{buffer_text, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(110, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn home_screen_has_nav_and_hint() {
        let app = test_app();
        let text = draw(&app, &mut TuiState::new());
        assert!(text.contains("Accueil"));
        assert!(text.contains("Bienvenue !"));
        assert!(text.contains("/ rechercher"));
    }

    #[test]
    fn each_route_draws_its_screen() {
        let mut app = test_app();
        let mut tui = TuiState::new();

        update(&mut app, Action::Navigate(Route::Shop));
        assert!(draw(&app, &mut tui).contains("Coaching Personnel 1h"));

        update(&mut app, Action::Navigate(Route::Cours));
        assert!(draw(&app, &mut tui).contains("Mes formations"));

        update(&mut app, Action::Navigate(Route::Messages));
        assert!(draw(&app, &mut tui).contains("Formation React - Groupe"));

        update(&mut app, Action::Navigate(Route::Profil));
        assert!(draw(&app, &mut tui).contains("John Doe"));
    }

    #[test]
    fn unknown_path_draws_not_found() {
        let mut app = test_app();
        app.route = Route::from_path("/nulle-part");
        app.requested_path = "/nulle-part".to_string();
        let text = draw(&app, &mut TuiState::new());
        assert!(text.contains("404"));
        assert!(text.contains("/nulle-part"));
    }

    #[test]
    fn chat_replaces_global_hint_and_shows_overlay() {
        let mut app = test_app();
        update(&mut app, Action::Navigate(Route::Cours));
        update(&mut app, Action::OpenFormation(0));
        update(&mut app, Action::OpenLevel(0));
        update(&mut app, Action::OpenLesson(0));

        let mut tui = TuiState::new();
        let text = draw(&app, &mut tui);
        assert!(text.contains("Leçon interactive"));
        assert!(text.contains("Ctrl+E emoji"));
        assert!(!text.contains("Entrée ouvrir"));

        tui.file_prompt = Some(crate::tui::components::FilePromptState::new());
        assert!(draw(&app, &mut tui).contains("Joindre un fichier"));
    }
}
