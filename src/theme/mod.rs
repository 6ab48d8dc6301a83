pub mod viewport;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::preferences::{COLOR_KEY, PreferenceStore};

pub use viewport::{Viewport, ViewportState};

/// The user's choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    Dark,
    #[default]
    Auto,
}

impl ColorScheme {
    /// Anything other than `"light"` or `"dark"` (including nothing) is auto.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => ColorScheme::Dark,
            Some("light") => ColorScheme::Light,
            _ => ColorScheme::Auto,
        }
    }

    /// Value written to the preference store. Auto is stored as absence.
    pub fn stored_value(self) -> Option<&'static str> {
        match self {
            ColorScheme::Light => Some("light"),
            ColorScheme::Dark => Some("dark"),
            ColorScheme::Auto => None,
        }
    }

    pub fn resolve(self, prefers_dark: bool) -> ColorMode {
        match self {
            ColorScheme::Light => ColorMode::Light,
            ColorScheme::Dark => ColorMode::Dark,
            ColorScheme::Auto if prefers_dark => ColorMode::Dark,
            ColorScheme::Auto => ColorMode::Light,
        }
    }
}

/// The resolved scheme everything renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Light,
    Dark,
}

impl ColorMode {
    /// Name of the root-level class styling keys off.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }
}

/// Color scheme state. The effective mode is published on a watch channel
/// after every transition; subscribers see the new value immediately.
pub struct ThemeState {
    color: ColorScheme,
    prefers_dark: bool,
    store: Arc<dyn PreferenceStore>,
    published: watch::Sender<ColorMode>,
}

impl ThemeState {
    pub async fn init(store: Arc<dyn PreferenceStore>, prefers_dark: bool) -> Self {
        let color = match store.get(COLOR_KEY).await {
            Ok(stored) => ColorScheme::from_stored(stored.as_deref()),
            Err(e) => {
                warn!("Failed to read color preference, using auto: {}", e);
                ColorScheme::Auto
            }
        };

        let effective = color.resolve(prefers_dark);
        let (published, _) = watch::channel(effective);
        info!("Theme initialized: {:?} (effective {})", color, effective.as_str());

        Self {
            color,
            prefers_dark,
            store,
            published,
        }
    }

    /// Persists the choice (auto clears the stored entry) and republishes.
    pub async fn set_color(&mut self, color: ColorScheme) -> Result<ColorMode, AppError> {
        match color.stored_value() {
            Some(value) => self.store.set(COLOR_KEY, value).await?,
            None => self.store.remove(COLOR_KEY).await?,
        }

        self.color = color;
        let effective = self.apply();
        info!("Color scheme set to {:?} (effective {})", color, effective.as_str());
        Ok(effective)
    }

    /// OS preference notification. Only changes the effective mode in auto.
    pub fn system_preference_changed(&mut self, prefers_dark: bool) -> ColorMode {
        self.prefers_dark = prefers_dark;
        if self.color != ColorScheme::Auto {
            debug!("Ignoring system preference change while {:?}", self.color);
        }
        self.apply()
    }

    pub fn color(&self) -> ColorScheme {
        self.color
    }

    pub fn prefers_dark(&self) -> bool {
        self.prefers_dark
    }

    pub fn effective(&self) -> ColorMode {
        self.color.resolve(self.prefers_dark)
    }

    pub fn subscribe(&self) -> watch::Receiver<ColorMode> {
        self.published.subscribe()
    }

    fn apply(&self) -> ColorMode {
        let effective = self.effective();
        self.published.send_if_modified(|current| {
            if *current == effective {
                return false;
            }
            *current = effective;
            true
        });
        effective
    }
}
