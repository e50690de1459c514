use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable screen or widget.
///
/// Components receive their data as props (struct fields, usually borrowed
/// from `App`), may hold presentation state through `&mut` references, and
/// draw themselves into a `Frame` within a given `Rect`.
///
/// `render` takes `&mut self` so list cursors and scroll offsets can be
/// clamped while drawing, as ratatui's `StatefulWidget` does.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A stateful component that turns terminal events into higher-level events.
pub trait EventHandler {
    /// The type of high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
