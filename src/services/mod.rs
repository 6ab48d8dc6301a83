pub mod loader;
pub mod platform_listener;

pub use loader::{DataLoader, LoadStats};
pub use platform_listener::PlatformListener;
