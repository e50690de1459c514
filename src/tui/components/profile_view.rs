//! # ProfileView Component
//!
//! Profil screen: identity card, statistics, per-formation progress gauges
//! and the settings menu. Only the menu is selectable.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Gauge, List, ListItem, Paragraph};

use crate::core::model::Profile;
use crate::tui::component::Component;
use crate::tui::components::list_cursor::ListCursor;

pub struct ProfileView<'a> {
    pub profile: &'a Profile,
    pub cursor: &'a mut ListCursor,
}

fn block(title: &str) -> Block<'static> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", title))
}

impl<'a> Component for ProfileView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};
        let profile = self.profile;
        let progress_height = profile.progress.len() as u16 + 2;
        let [card_area, stats_area, progress_area, menu_area] = Layout::vertical([
            Length(5),
            Length(profile.stats.len().div_ceil(2) as u16 + 2),
            Length(progress_height),
            Min(0),
        ])
        .areas(area);

        let card = Paragraph::new(vec![
            Line::from(vec![
                Span::styled(
                    format!(" {} ", profile.initials),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(
                    profile.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                profile.email.clone(),
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                profile.member_since.clone(),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(block("Profil"));
        frame.render_widget(card, card_area);

        let stat_lines: Vec<Line> = profile
            .stats
            .chunks(2)
            .map(|pair| {
                let spans: Vec<Span> = pair
                    .iter()
                    .flat_map(|stat| {
                        [
                            Span::styled(
                                format!("{:>4} ", stat.value),
                                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                            ),
                            Span::styled(format!("{:<28}", stat.label), Style::default().fg(Color::Gray)),
                        ]
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();
        frame.render_widget(Paragraph::new(stat_lines).block(block("Statistiques")), stats_area);

        let progress_block = block("Progression");
        let inner = progress_block.inner(progress_area);
        frame.render_widget(progress_block, progress_area);
        let rows = Layout::vertical(vec![Length(1); profile.progress.len()]).split(inner);
        for ((name, percent), row) in profile.progress.iter().zip(rows.iter()) {
            let [label_area, gauge_area] = Layout::horizontal([Length(20), Min(0)]).areas(*row);
            frame.render_widget(Line::from(name.as_str()), label_area);
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(Color::Green).bg(Color::DarkGray))
                .percent(u16::from((*percent).min(100)));
            frame.render_widget(gauge, gauge_area);
        }

        self.cursor.clamp(profile.menu.len());
        let items: Vec<ListItem> = profile
            .menu
            .iter()
            .map(|entry| ListItem::new(format!("{}  ›", entry)))
            .collect();
        let menu = List::new(items)
            .block(block("Menu"))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(menu, menu_area, &mut self.cursor.list_state);
    }
}
