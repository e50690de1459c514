//! # ShopCatalog Component
//!
//! Category chips over the filtered product list. Each row shows price,
//! discount, rating and the call-to-action matching the product kind.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, Paragraph};

use crate::core::catalog;
use crate::core::model::{Category, Product};
use crate::tui::component::Component;
use crate::tui::components::list_cursor::ListCursor;

pub struct ShopCatalog<'a> {
    pub products: &'a [Product],
    pub category: Category,
    pub cursor: &'a mut ListCursor,
}

fn category_line(active: Category) -> Line<'static> {
    let spans: Vec<Span> = Category::ALL
        .iter()
        .map(|category| {
            let style = if *category == active {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Span::styled(format!(" {} ", category.label()), style)
        })
        .flat_map(|chip| [chip, Span::raw(" ")])
        .collect();
    Line::from(spans)
}

fn product_item(product: &Product) -> ListItem<'static> {
    let mut price = vec![Span::styled(
        format!("{} €", product.price),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )];
    if let Some(original) = product.original_price {
        price.push(Span::styled(
            format!(" {} €", original),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
        ));
    }
    if let Some(discount) = product.discount_percent() {
        price.push(Span::styled(
            format!(" -{}%", discount),
            Style::default().fg(Color::Red),
        ));
    }
    price.push(Span::styled(
        format!("  [{}]", product.call_to_action()),
        Style::default().fg(Color::Cyan),
    ));

    ListItem::new(vec![
        Line::from(Span::styled(
            product.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("  {} · {}", product.author, product.description),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(product.star_row(), Style::default().fg(Color::Yellow)),
            Span::styled(
                format!(" {:.1} ({} avis)", product.rating, product.reviews),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from([vec![Span::raw("  ")], price].concat()),
        Line::default(),
    ])
}

impl<'a> Component for ShopCatalog<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [chips_area, list_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
        frame.render_widget(category_line(self.category), chips_area);

        let visible = catalog::filter_products(self.products, self.category);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" Shop · {} ", self.category.label()));

        if visible.is_empty() {
            let empty = Paragraph::new("Aucun produit dans cette catégorie")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, list_area);
            return;
        }

        self.cursor.clamp(visible.len());
        let items: Vec<ListItem> = visible.into_iter().map(product_item).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, list_area, &mut self.cursor.list_state);
    }
}
