//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the one widget store for the process. The store is built explicitly
//! in `main` and handed in here; there is no global instance.

use std::sync::Arc;

use crate::services::widget::WidgetStore;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the store is Arc-wrapped.
#[derive(Clone, Default)]
pub struct AppState {
    pub widgets: Arc<WidgetStore>,
}

impl AppState {
    #[must_use]
    pub fn new(widgets: WidgetStore) -> Self {
        Self { widgets: Arc::new(widgets) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
