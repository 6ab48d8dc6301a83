use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::color::ColorAssigner;
use crate::common::CommonState;
use crate::platform::PlatformSignals;
use crate::preferences::PreferenceStore;
use crate::services::{DataLoader, PlatformListener};
use crate::source::TimetableSource;
use crate::store::TimetableData;
use crate::theme::Viewport;

#[derive(Clone)]
pub struct AppState {
    pub data: Arc<RwLock<TimetableData>>,
    pub common: Arc<Mutex<CommonState>>,
    pub colors: ColorAssigner,
    pub platform: Arc<PlatformSignals>,
    pub loader: Arc<DataLoader>,
    pub preferences: Arc<dyn PreferenceStore>,
}

impl AppState {
    /// Startup sequence: load the timetable (a failed fetch leaves it empty),
    /// then initialize theme and viewport. The returned listener must be
    /// spawned to follow platform notifications.
    pub async fn initialize(
        source: Arc<dyn TimetableSource>,
        preferences: Arc<dyn PreferenceStore>,
        prefers_dark: bool,
        viewport: Viewport,
    ) -> (Self, PlatformListener) {
        let loader = Arc::new(DataLoader::new(source));
        let data = loader.load_or_empty().await;

        let common = CommonState::init(preferences.clone(), prefers_dark, viewport).await;
        let colors = ColorAssigner::new(common.theme.subscribe());
        let common = Arc::new(Mutex::new(common));

        let (platform, receivers) = PlatformSignals::new(prefers_dark, viewport);
        let listener = PlatformListener::new(common.clone(), receivers);

        let state = Self {
            data: Arc::new(RwLock::new(data)),
            common,
            colors,
            platform: Arc::new(platform),
            loader,
            preferences,
        };

        (state, listener)
    }
}
