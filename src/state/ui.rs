//! UI interaction state

/// Active top-level view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    Fleet,
    Detail,
}

impl Default for ActiveView {
    fn default() -> Self {
        ActiveView::Fleet
    }
}

/// UI state: active view, status-bar error, refresh bookkeeping
#[derive(Debug, Default)]
pub struct UiState {
    pub active_view: ActiveView,

    /// Error message shown in the status bar
    pub error_message: Option<String>,

    /// A store write failed; the next refresh must reconcile local state
    pub reconcile_pending: bool,

    /// Refetch the fleet from the store on the next frame
    pub refresh_requested: bool,
}

impl UiState {
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn has_error(&self) -> bool {
        self.error_message.is_some()
    }

    pub fn request_refresh(&mut self) {
        self.refresh_requested = true;
    }
}
