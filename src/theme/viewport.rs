use serde::{Deserialize, Serialize};
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Last reported viewport size.
pub struct ViewportState {
    published: watch::Sender<Viewport>,
}

impl ViewportState {
    pub fn init(initial: Viewport) -> Self {
        let (published, _) = watch::channel(initial);
        Self { published }
    }

    pub fn resize(&self, viewport: Viewport) {
        self.published.send_replace(viewport);
    }

    pub fn current(&self) -> Viewport {
        *self.published.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Viewport> {
        self.published.subscribe()
    }
}
