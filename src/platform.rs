use tokio::sync::watch;

use crate::theme::Viewport;

/// Platform-side notifications: the "prefers dark" media query and window
/// resizes. The presentation layer reports them here and the platform
/// listener applies them to the common state.
pub struct PlatformSignals {
    prefers_dark: watch::Sender<bool>,
    viewport: watch::Sender<Viewport>,
}

pub struct PlatformReceivers {
    pub prefers_dark: watch::Receiver<bool>,
    pub viewport: watch::Receiver<Viewport>,
}

impl PlatformSignals {
    pub fn new(prefers_dark: bool, viewport: Viewport) -> (Self, PlatformReceivers) {
        let (prefers_dark_tx, prefers_dark_rx) = watch::channel(prefers_dark);
        let (viewport_tx, viewport_rx) = watch::channel(viewport);

        let signals = Self {
            prefers_dark: prefers_dark_tx,
            viewport: viewport_tx,
        };
        let receivers = PlatformReceivers {
            prefers_dark: prefers_dark_rx,
            viewport: viewport_rx,
        };
        (signals, receivers)
    }

    /// Notifies only when the value actually flips, like a media query
    /// change event.
    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        self.prefers_dark.send_if_modified(|current| {
            if *current == prefers_dark {
                return false;
            }
            *current = prefers_dark;
            true
        });
    }

    /// Every resize is delivered, even with unchanged dimensions.
    pub fn resize(&self, viewport: Viewport) {
        self.viewport.send_replace(viewport);
    }

    pub fn prefers_dark(&self) -> bool {
        *self.prefers_dark.borrow()
    }

    pub fn viewport(&self) -> Viewport {
        *self.viewport.borrow()
    }
}
