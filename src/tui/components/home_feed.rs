//! # HomeFeed Component
//!
//! The Accueil screen: a row of sub-tabs (`videos`, `posts`, `rechercher`)
//! above the matching list. The search tab puts a query box over the results.
//!
//! Data comes from `App` as props; the list cursor and the query box are
//! persistent TUI state borrowed for the frame.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, Paragraph};

use crate::core::catalog::{self, SearchHit};
use crate::core::model::{Post, Product, Video, VideoKind};
use crate::core::state::HomeTab;
use crate::tui::component::Component;
use crate::tui::components::compose_bar::ComposeBar;
use crate::tui::components::list_cursor::ListCursor;

pub struct HomeFeed<'a> {
    pub tab: HomeTab,
    pub videos: &'a [Video],
    pub posts: &'a [Post],
    pub products: &'a [Product],
    pub query: &'a str,
    pub cursor: &'a mut ListCursor,
    pub search: &'a mut ComposeBar,
}

/// Rows on the current tab, so the event loop can bound the cursor.
pub fn row_count(tab: HomeTab, videos: &[Video], posts: &[Post], products: &[Product], query: &str) -> usize {
    match tab {
        HomeTab::Videos => videos.len(),
        HomeTab::Posts => posts.len(),
        HomeTab::Search => catalog::search(query, videos, products).len(),
    }
}

fn tab_line(active: HomeTab) -> Line<'static> {
    let spans: Vec<Span> = HomeTab::ALL
        .iter()
        .map(|tab| {
            let style = if *tab == active {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Span::styled(format!(" {} ", tab.label()), style)
        })
        .collect();
    Line::from(spans)
}

fn video_item(video: &Video) -> ListItem<'static> {
    let tag = match video.kind {
        VideoKind::Promo => Span::styled(" Promo · S'inscrire ", Style::default().fg(Color::Magenta)),
        VideoKind::Educational => Span::styled(" Éducatif ", Style::default().fg(Color::Cyan)),
    };
    ListItem::new(vec![
        Line::from(vec![
            Span::styled(
                format!("▶ {}", video.title),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            tag,
        ]),
        Line::from(Span::styled(
            format!(
                "  {} · {} · ♥ {} · 💬 {}",
                video.author, video.duration, video.likes, video.comments
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ])
}

fn post_item(post: &Post) -> ListItem<'static> {
    let mut lines = vec![
        Line::from(Span::styled(
            post.author.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("  {}", post.content)),
    ];
    if post.has_image {
        lines.push(Line::from(Span::styled(
            "  🖼 image",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(Span::styled(
        format!("  ♥ {} · 💬 {}", post.likes, post.comments),
        Style::default().fg(Color::DarkGray),
    )));
    ListItem::new(lines)
}

fn hit_item(hit: &SearchHit) -> ListItem<'static> {
    let kind = match hit {
        SearchHit::Video(_) => "Vidéo",
        SearchHit::Product(_) => "Produit",
    };
    ListItem::new(Line::from(vec![
        Span::styled(format!("[{}] ", kind), Style::default().fg(Color::Cyan)),
        Span::raw(hit.title().to_string()),
        Span::styled(
            format!(" · {}", hit.author()),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
}

fn highlight() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

impl<'a> Component for HomeFeed<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [tabs_area, body_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
        frame.render_widget(tab_line(self.tab), tabs_area);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));

        match self.tab {
            HomeTab::Videos => {
                self.cursor.clamp(self.videos.len());
                let items: Vec<ListItem> = self.videos.iter().map(video_item).collect();
                let list = List::new(items)
                    .block(block.title(" Vidéos "))
                    .highlight_style(highlight());
                frame.render_stateful_widget(list, body_area, &mut self.cursor.list_state);
            }
            HomeTab::Posts => {
                self.cursor.clamp(self.posts.len());
                let items: Vec<ListItem> = self.posts.iter().map(post_item).collect();
                let list = List::new(items)
                    .block(block.title(" Publications "))
                    .highlight_style(highlight());
                frame.render_stateful_widget(list, body_area, &mut self.cursor.list_state);
            }
            HomeTab::Search => {
                let [query_area, results_area] =
                    Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(body_area);
                self.search.render(frame, query_area);

                let hits = catalog::search(self.query, self.videos, self.products);
                if self.query.trim().is_empty() {
                    let hint = Paragraph::new("Tapez un titre de vidéo ou de produit")
                        .style(Style::default().fg(Color::DarkGray))
                        .block(block);
                    frame.render_widget(hint, results_area);
                } else if hits.is_empty() {
                    let empty = Paragraph::new(format!("Aucun résultat pour « {} »", self.query.trim()))
                        .style(Style::default().fg(Color::DarkGray))
                        .block(block);
                    frame.render_widget(empty, results_area);
                } else {
                    self.cursor.clamp(hits.len());
                    let items: Vec<ListItem> = hits.iter().map(hit_item).collect();
                    let list = List::new(items)
                        .block(block.title(format!(" {} résultat(s) ", hits.len())))
                        .highlight_style(highlight());
                    frame.render_stateful_widget(list, results_area, &mut self.cursor.list_state);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{buffer_text, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(tab: HomeTab, query: &str) -> String {
        let app = test_app();
        let mut cursor = ListCursor::new();
        let mut search = ComposeBar::new(" Rechercher ", "Titre...");
        search.insert_str(query);
        let backend = TestBackend::new(90, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                HomeFeed {
                    tab,
                    videos: &app.videos,
                    posts: &app.posts,
                    products: &app.products,
                    query,
                    cursor: &mut cursor,
                    search: &mut search,
                }
                .render(f, f.area())
            })
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn videos_tab_lists_fixture_titles() {
        let app = test_app();
        let text = render(HomeTab::Videos, "");
        assert!(text.contains(&app.videos[0].title));
        assert!(text.contains("rechercher"));
    }

    #[test]
    fn posts_tab_shows_authors() {
        let app = test_app();
        let text = render(HomeTab::Posts, "");
        assert!(text.contains(&app.posts[0].author));
    }

    #[test]
    fn blank_search_shows_hint() {
        let text = render(HomeTab::Search, "");
        assert!(text.contains("Tapez un titre"));
    }

    #[test]
    fn unmatched_search_says_so() {
        let text = render(HomeTab::Search, "zzzz");
        assert!(text.contains("Aucun résultat"));
    }

    #[test]
    fn row_count_follows_tab() {
        let app = test_app();
        assert_eq!(
            row_count(HomeTab::Videos, &app.videos, &app.posts, &app.products, ""),
            app.videos.len()
        );
        assert_eq!(
            row_count(HomeTab::Search, &app.videos, &app.posts, &app.products, ""),
            0
        );
    }
}
