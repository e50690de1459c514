//! Selection cursor shared by the list screens (catalog, roster, shop, ...).

use ratatui::widgets::ListState;

/// Persistent selection for one list. Lives in `TuiState`; the list length
/// is a prop passed on every move so the cursor never points past the end.
#[derive(Debug, Default, Clone)]
pub struct ListCursor {
    pub list_state: ListState,
}

impl ListCursor {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self { list_state }
    }

    pub fn selected(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    pub fn select(&mut self, index: usize) {
        self.list_state.select(Some(index));
    }

    /// Move by `delta` rows, saturating at both ends.
    pub fn move_by(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let current = self.selected().min(len - 1) as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.list_state.select(Some(next as usize));
    }

    /// Pull the cursor back inside `0..len` after the list shrank.
    pub fn clamp(&mut self, len: usize) {
        self.move_by(0, len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_first_row() {
        assert_eq!(ListCursor::new().selected(), 0);
    }

    #[test]
    fn movement_saturates() {
        let mut cursor = ListCursor::new();
        cursor.move_by(-1, 3);
        assert_eq!(cursor.selected(), 0);
        cursor.move_by(5, 3);
        assert_eq!(cursor.selected(), 2);
        cursor.move_by(-1, 3);
        assert_eq!(cursor.selected(), 1);
    }

    #[test]
    fn clamp_after_shrink() {
        let mut cursor = ListCursor::new();
        cursor.select(4);
        cursor.clamp(2);
        assert_eq!(cursor.selected(), 1);
        cursor.clamp(0);
        assert_eq!(cursor.list_state.selected(), None);
    }
}
