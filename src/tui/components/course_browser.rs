//! # CourseBrowser Component
//!
//! Draws the list frames of the Cours drill-down: the formation catalog, a
//! formation's levels, a level's lessons, and the teacher's student roster.
//! Chat frames are drawn by `ChatScreen` instead.
//!
//! The frame to draw is a prop (`CourseScreen`), so this component holds no
//! navigation state. Enter and Esc are translated into actions by the event
//! loop; the component only owns how each frame looks.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, Paragraph};

use crate::core::model::{Formation, Lesson, Level, Student};
use crate::core::navigation::CourseScreen;
use crate::tui::component::Component;
use crate::tui::components::list_cursor::ListCursor;

const BAR_WIDTH: usize = 20;

pub struct CourseBrowser<'a> {
    pub screen: CourseScreen,
    pub formations: &'a [Formation],
    pub students: &'a [Student],
    pub cursor: &'a mut ListCursor,
}

/// Number of selectable rows on a list frame (0 for chat frames).
pub fn row_count(screen: CourseScreen, formations: &[Formation], students: &[Student]) -> usize {
    match screen {
        CourseScreen::Catalog => formations.len(),
        CourseScreen::Formation { formation } => {
            formations.get(formation).map_or(0, |f| f.levels.len())
        }
        CourseScreen::Level { formation, level } => formations
            .get(formation)
            .and_then(|f| f.levels.get(level))
            .map_or(0, |l| l.lessons.len()),
        CourseScreen::TeacherRoster { .. } => students.len(),
        CourseScreen::LessonChat { .. } | CourseScreen::StudentChat { .. } => 0,
    }
}

/// Text progress bar, e.g. `█████░░░░░ 50%`.
pub fn progress_bar(percent: u8, width: usize) -> String {
    let percent = percent.min(100) as usize;
    let filled = percent * width / 100;
    format!(
        "{}{} {}%",
        "█".repeat(filled),
        "░".repeat(width - filled),
        percent
    )
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn unread_badge(unread: u32) -> Span<'static> {
    if unread == 0 {
        Span::raw("")
    } else {
        Span::styled(
            format!(" ({}) ", unread),
            Style::default().fg(Color::White).bg(Color::Red),
        )
    }
}

fn formation_item(formation: &Formation) -> ListItem<'static> {
    let role = if formation.is_teacher {
        Span::styled(" Professeur ", Style::default().fg(Color::Magenta))
    } else {
        Span::raw("")
    };
    ListItem::new(vec![
        Line::from(vec![Span::styled(formation.title.clone(), bold()), role]),
        Line::from(Span::styled(
            format!(
                "  {} · ★ {:.1} · {} étudiants",
                formation.author, formation.rating, formation.students
            ),
            dim(),
        )),
        Line::from(Span::styled(
            format!("  {}", progress_bar(formation.progress, BAR_WIDTH)),
            Style::default().fg(Color::Green),
        )),
    ])
}

fn level_item(level: &Level) -> ListItem<'static> {
    ListItem::new(vec![
        Line::from(vec![
            Span::styled(level.name.clone(), bold()),
            Span::styled(format!("  {}", level.timestamp), dim()),
            Span::raw(" "),
            unread_badge(level.unread),
        ]),
        Line::from(Span::styled(
            format!(
                "  {} · {} · {}/{} terminées",
                level.description,
                level.lesson_count_label(),
                level.completed_count(),
                level.lessons.len()
            ),
            dim(),
        )),
        Line::from(Span::styled(format!("  {}", level.last_message), dim())),
    ])
}

fn lesson_item(lesson: &Lesson) -> ListItem<'static> {
    let (mark, style) = if lesson.completed {
        ("✓", Style::default().fg(Color::Green))
    } else {
        ("○", Style::default())
    };
    ListItem::new(Line::from(vec![
        Span::styled(format!("{} {}", mark, lesson.title), style),
        Span::styled(format!("  {}", lesson.duration), dim()),
    ]))
}

fn student_item(student: &Student) -> ListItem<'static> {
    ListItem::new(vec![
        Line::from(vec![
            Span::raw(format!("{} ", student.avatar)),
            Span::styled(student.name.clone(), bold()),
            Span::styled(format!("  {}", student.timestamp), dim()),
            Span::raw(" "),
            unread_badge(student.unread),
        ]),
        Line::from(Span::styled(format!("  {}", student.last_message), dim())),
        Line::from(Span::styled(
            format!("  {}", progress_bar(student.progress, BAR_WIDTH)),
            Style::default().fg(Color::Green),
        )),
    ])
}

impl<'a> CourseBrowser<'a> {
    /// Block title and rows for the current frame. `None` when the frame
    /// indices no longer point at fixture data.
    fn frame_content(&self) -> Option<(String, Vec<ListItem<'static>>)> {
        match self.screen {
            CourseScreen::Catalog => Some((
                " Mes formations ".to_string(),
                self.formations.iter().map(formation_item).collect(),
            )),
            CourseScreen::Formation { formation } => {
                let formation = self.formations.get(formation)?;
                Some((
                    format!(" {} ", formation.title),
                    formation.levels.iter().map(level_item).collect(),
                ))
            }
            CourseScreen::Level { formation, level } => {
                let formation = self.formations.get(formation)?;
                let level = formation.levels.get(level)?;
                Some((
                    format!(" {} › {} ", formation.title, level.name),
                    level.lessons.iter().map(lesson_item).collect(),
                ))
            }
            CourseScreen::TeacherRoster { formation } => {
                let formation = self.formations.get(formation)?;
                Some((
                    format!(" {} · Mes étudiants ", formation.title),
                    self.students.iter().map(student_item).collect(),
                ))
            }
            CourseScreen::LessonChat { .. } | CourseScreen::StudentChat { .. } => None,
        }
    }
}

impl<'a> Component for CourseBrowser<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(dim());

        let Some((title, items)) = self.frame_content() else {
            let empty = Paragraph::new("Contenu indisponible").style(dim()).block(block);
            frame.render_widget(empty, area);
            return;
        };

        self.cursor.clamp(items.len());
        let list = List::new(items)
            .block(block.title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("› ");
        frame.render_stateful_widget(list, area, &mut self.cursor.list_state);
    }
}
