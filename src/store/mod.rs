pub mod directory;
pub mod grid;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::models::{Event, HourOffset, WeekContext};
use crate::source::AllResponse;

pub use directory::{Directory, KeyedTable};
pub use grid::EventGrid;

/// One loaded snapshot. Replaced as a whole on every successful fetch.
#[derive(Debug, Clone, Default)]
pub struct TimetableData {
    pub directory: Directory,
    pub week: WeekContext,
    pub grid: EventGrid,
}

impl TimetableData {
    /// Builds the snapshot from a fetched envelope. Missing sections become
    /// empty; records that do not decode are skipped with a warning.
    pub fn from_response(response: AllResponse) -> Self {
        let teachers = decode_items(response.teachers, "teacher");
        let rooms = decode_items(response.rooms, "room");
        let classes = decode_items(response.classes, "class");
        let directory = Directory::new(teachers, rooms, classes);

        let week_payload = response.week.unwrap_or_default();

        let dates = week_payload
            .dates
            .unwrap_or_default()
            .iter()
            .filter_map(|raw| {
                let parsed = parse_date(raw);
                if parsed.is_none() {
                    warn!("Skipping unparsable week date: {}", raw);
                }
                parsed
            })
            .collect();

        let hour_offsets: Vec<HourOffset> = decode_items(week_payload.hour_offsets, "hour offset");
        let week = WeekContext {
            week: week_payload.week.unwrap_or(0),
            dates,
            hour_offsets,
        };

        let misaligned = week.misaligned_periods();
        if !misaligned.is_empty() {
            warn!("Hour offsets out of order for periods {:?}", misaligned);
        }

        let events: Vec<Event> = decode_items(week_payload.events, "event");
        let grid = EventGrid::from_events(events);

        Self { directory, week, grid }
    }
}

fn decode_items<T: DeserializeOwned>(items: Option<Vec<Value>>, kind: &str) -> Vec<T> {
    let mut decoded = Vec::new();

    for (index, item) in items.unwrap_or_default().into_iter().enumerate() {
        match serde_json::from_value::<T>(item) {
            Ok(value) => decoded.push(value),
            Err(e) => {
                warn!("Failed to parse {} at index {}: {}", kind, index, e);
            }
        }
    }

    decoded
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (its date part is used).
fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        chrono::DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.date_naive())
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::PeriodFlag;

    fn build(value: Value) -> TimetableData {
        let response: AllResponse = serde_json::from_value(value).unwrap();
        TimetableData::from_response(response)
    }

    #[test]
    fn test_single_canceled_event_scenario() {
        let data = build(json!({
            "teachers": [{ "key": "t1", "short": "AB", "fullName": "Anna Berg", "initials": "AB" }],
            "week": {
                "week": 5,
                "events": [{
                    "dayIndex": 1,
                    "periodIndex": 2,
                    "classKey": "c1",
                    "title": { "long": "Math", "short": "Ma" },
                    "flags": ["CANCELED"]
                }],
                "hourOffsets": []
            }
        }));

        assert_eq!(data.directory.teachers().len(), 1);
        assert!(data.directory.teacher("t1").is_some());
        assert_eq!(data.week.week, 5);

        let cell = data.grid.cell(1, 2);
        assert_eq!(cell.len(), 1);
        assert!(cell[0].has_flag(PeriodFlag::Canceled));
        assert_eq!(data.grid.len(), 1);
        assert!(data.grid.cell(0, 0).is_empty());
        assert!(data.grid.cell(1, 1).is_empty());
    }

    #[test]
    fn test_empty_envelope_defaults() {
        let data = build(json!({}));

        assert!(data.directory.teachers().is_empty());
        assert!(data.directory.rooms().is_empty());
        assert!(data.directory.classes().is_empty());
        assert_eq!(data.week, WeekContext::default());
        assert!(data.grid.is_empty());
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let data = build(json!({
            "rooms": [
                { "key": "r1", "display": "101", "id": 1 },
                { "key": "r2" }
            ],
            "week": {
                "week": 3,
                "dates": ["2024-03-04", "not a date", "2024-03-05T00:00:00.000Z"],
                "events": [
                    { "dayIndex": -1, "periodIndex": 0, "classKey": "c1", "title": { "long": "X", "short": "X" }, "flags": [] },
                    { "dayIndex": 0, "periodIndex": 0, "classKey": "c1", "title": { "long": "Y", "short": "Y" }, "flags": ["CLUB", "SOMETHING_NEW"] }
                ],
                "hourOffsets": [{ "startOffset": 0, "endOffset": 45 }, { "startOffset": "x" }]
            }
        }));

        assert_eq!(data.directory.rooms().len(), 1);
        assert_eq!(
            data.week.dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            ]
        );
        assert_eq!(data.week.hour_offsets.len(), 1);
        assert_eq!(data.grid.len(), 1);

        let event = &data.grid.cell(0, 0)[0];
        assert!(event.has_flag(PeriodFlag::Club));
        assert!(event.has_flag(PeriodFlag::Unknown));
    }

    #[test]
    fn test_optional_references_decode() {
        let data = build(json!({
            "week": {
                "week": 1,
                "events": [{
                    "dayIndex": 0,
                    "periodIndex": 3,
                    "classKey": "c1",
                    "title": { "long": "English", "short": "En" },
                    "flags": ["SUBSTITUTE", "HALFTIME"],
                    "teacherKey": "t9",
                    "classroomKey": "r4"
                }],
                "hourOffsets": []
            }
        }));

        let event = &data.grid.cell(0, 3)[0];
        assert_eq!(event.teacher_key.as_deref(), Some("t9"));
        assert_eq!(event.classroom_key.as_deref(), Some("r4"));
        assert!(event.has_flag(PeriodFlag::Substitute));
        assert!(event.has_flag(PeriodFlag::HalfTime));
        assert_eq!(data.directory.teacher_label("t9"), "t9");
    }
}
