//! Pure queries over the fixture lists: shop filtering and home search.

use crate::core::model::{Category, Product, Video};

/// Products in `category`, or all of them for [`Category::All`]. Order is preserved.
pub fn filter_products(products: &[Product], category: Category) -> Vec<&Product> {
    products
        .iter()
        .filter(|p| category == Category::All || p.category == category)
        .collect()
}

/// A single search hit, borrowed from the fixture it matched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchHit<'a> {
    Video(&'a Video),
    Product(&'a Product),
}

impl SearchHit<'_> {
    pub fn title(&self) -> &str {
        match self {
            SearchHit::Video(v) => &v.title,
            SearchHit::Product(p) => &p.name,
        }
    }

    pub fn author(&self) -> &str {
        match self {
            SearchHit::Video(v) => &v.author,
            SearchHit::Product(p) => &p.author,
        }
    }
}

/// Case-insensitive title search. A blank query matches nothing.
pub fn search<'a>(query: &str, videos: &'a [Video], products: &'a [Product]) -> Vec<SearchHit<'a>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let videos = videos
        .iter()
        .filter(|v| v.title.to_lowercase().contains(&needle))
        .map(SearchHit::Video);
    let products = products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .map(SearchHit::Product);
    videos.chain(products).collect()
}
