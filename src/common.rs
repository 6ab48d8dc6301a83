use std::sync::Arc;

use tracing::info;

use crate::preferences::PreferenceStore;
use crate::theme::{ThemeState, Viewport, ViewportState};

/// Process-wide presentation state: color scheme and viewport.
pub struct CommonState {
    pub theme: ThemeState,
    pub viewport: ViewportState,
}

impl CommonState {
    pub async fn init(
        store: Arc<dyn PreferenceStore>,
        prefers_dark: bool,
        viewport: Viewport,
    ) -> Self {
        let theme = ThemeState::init(store, prefers_dark).await;
        let viewport = ViewportState::init(viewport);

        info!("Common state initialized");
        Self { theme, viewport }
    }
}
