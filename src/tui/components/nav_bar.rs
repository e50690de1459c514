//! # NavBar Component
//!
//! Top line of every screen: the five route tabs with the active one
//! highlighted, followed by the status message.
//!
//! ## Conditional Formatting
//!
//! 1. **Known route**: the matching tab is reversed + bold.
//! 2. **NotFound**: no tab is highlighted.
//! 3. **Status message**: appended after a separator when non-empty.
//!
//! Stateless: every field is a prop.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::navigation::Route;
use crate::tui::component::Component;

pub struct NavBar {
    pub route: Route,
    pub status_message: String,
}

impl NavBar {
    pub fn new(route: Route, status_message: String) -> Self {
        Self {
            route,
            status_message,
        }
    }

    fn line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, tab) in Route::TABS.iter().enumerate() {
            let label = format!(" F{} {} ", i + 1, tab.label());
            let style = if *tab == self.route {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(label, style));
        }
        if !self.status_message.is_empty() {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(
                self.status_message.clone(),
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    }
}

impl Component for NavBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.line(), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(bar: &mut NavBar) -> String {
        let backend = TestBackend::new(100, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| bar.render(f, f.area())).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn shows_all_tab_labels() {
        let text = render(&mut NavBar::new(Route::Home, String::new()));
        for label in ["Accueil", "Shop", "Cours", "Messages", "Profil"] {
            assert!(text.contains(label), "missing {label}");
        }
        assert!(!text.contains('|'));
    }

    #[test]
    fn status_follows_separator() {
        let text = render(&mut NavBar::new(Route::Shop, "Catégorie : Livres".to_string()));
        assert!(text.contains("| Catégorie : Livres"));
    }

    #[test]
    fn active_tab_is_highlighted() {
        let bar = NavBar::new(Route::Cours, String::new());
        let line = bar.line();
        let active: Vec<&Span> = line
            .spans
            .iter()
            .filter(|s| s.style.add_modifier.contains(Modifier::REVERSED))
            .collect();
        assert_eq!(active.len(), 1);
        assert!(active[0].content.contains("Cours"));

        let line = NavBar::new(Route::NotFound, String::new()).line();
        assert!(
            line.spans
                .iter()
                .all(|s| !s.style.add_modifier.contains(Modifier::REVERSED))
        );
    }
}
