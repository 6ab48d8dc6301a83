use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use crate::error::AppError;
use crate::source::TimetableSource;
use crate::store::TimetableData;

pub struct DataLoader {
    source: Arc<dyn TimetableSource>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub week: i32,
    pub teachers: usize,
    pub rooms: usize,
    pub classes: usize,
    pub events: usize,
}

impl LoadStats {
    pub fn of(data: &TimetableData) -> Self {
        Self {
            week: data.week.week,
            teachers: data.directory.teachers().len(),
            rooms: data.directory.rooms().len(),
            classes: data.directory.classes().len(),
            events: data.grid.len(),
        }
    }
}

impl DataLoader {
    pub fn new(source: Arc<dyn TimetableSource>) -> Self {
        Self { source }
    }

    /// One fetch, one fresh snapshot.
    pub async fn load(&self) -> Result<(TimetableData, LoadStats), AppError> {
        info!("Fetching timetable data...");
        let response = self.source.fetch_all().await?;

        let data = TimetableData::from_response(response);
        let stats = LoadStats::of(&data);
        info!(
            "Loaded week {} - {} teachers, {} rooms, {} classes, {} events",
            stats.week, stats.teachers, stats.rooms, stats.classes, stats.events
        );

        Ok((data, stats))
    }

    /// Like [`load`](Self::load), but a failed fetch is logged and yields an
    /// empty snapshot so the client stays usable.
    pub async fn load_or_empty(&self) -> TimetableData {
        match self.load().await {
            Ok((data, _)) => data,
            Err(e) => {
                error!("Failed to load timetable data: {}", e);
                TimetableData::default()
            }
        }
    }
}
