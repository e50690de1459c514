//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::state::App;

/// Creates a test App with fixture data and default delays.
pub fn test_app() -> App {
    App::new()
}

/// Collects every rendered cell of a test terminal into one string.
pub fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    buffer.content().iter().map(|c| c.symbol()).collect()
}
