//! Shared screen state types.

/// Loading state shared by the screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Initial data has not arrived yet.
    #[default]
    Loading,
    /// Initial data is loaded and nothing is in flight.
    Ready,
    /// A further page is being fetched while the loaded data stays visible.
    LoadingMore,
}

impl LoadState {
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }
}
