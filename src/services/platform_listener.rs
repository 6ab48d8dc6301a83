use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::common::CommonState;
use crate::platform::PlatformReceivers;

/// Applies platform notifications to the common state until the signal
/// senders are dropped.
pub struct PlatformListener {
    common: Arc<Mutex<CommonState>>,
    signals: PlatformReceivers,
}

impl PlatformListener {
    pub fn new(common: Arc<Mutex<CommonState>>, signals: PlatformReceivers) -> Self {
        Self { common, signals }
    }

    pub async fn start(mut self) {
        info!("Starting platform listener");

        loop {
            tokio::select! {
                changed = self.signals.prefers_dark.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let prefers_dark = *self.signals.prefers_dark.borrow_and_update();
                    let effective = self
                        .common
                        .lock()
                        .await
                        .theme
                        .system_preference_changed(prefers_dark);
                    debug!("System prefers dark: {} (effective {})", prefers_dark, effective.as_str());
                }
                changed = self.signals.viewport.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let viewport = *self.signals.viewport.borrow_and_update();
                    self.common.lock().await.viewport.resize(viewport);
                    debug!("Viewport resized to {}x{}", viewport.width, viewport.height);
                }
            }
        }

        info!("Platform listener stopped");
    }
}
