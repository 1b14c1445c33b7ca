use crossterm::event::Event as CrosstermEvent;

#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// A frame should be drawn now.
    Render,
    /// Terminal input.
    Crossterm(CrosstermEvent),
}
