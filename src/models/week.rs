use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Start and end of one period, in minutes from the start of the school day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourOffset {
    pub start_offset: i32,
    pub end_offset: i32,
}

impl HourOffset {
    pub fn duration_minutes(&self) -> i32 {
        self.end_offset.saturating_sub(self.start_offset)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekContext {
    pub week: i32,
    pub dates: Vec<NaiveDate>,
    pub hour_offsets: Vec<HourOffset>,
}

impl WeekContext {
    pub fn date_for_day(&self, day_index: u32) -> Option<NaiveDate> {
        self.dates.get(day_index as usize).copied()
    }

    pub fn offset_for_period(&self, period_index: u32) -> Option<HourOffset> {
        self.hour_offsets.get(period_index as usize).copied()
    }

    /// Indices of periods whose offsets break ordering: `end <= start`, or a
    /// start earlier than the previous period's start.
    pub fn misaligned_periods(&self) -> Vec<usize> {
        let mut bad = Vec::new();
        let mut previous_start: Option<i32> = None;

        for (index, offset) in self.hour_offsets.iter().enumerate() {
            let out_of_order = previous_start.is_some_and(|start| offset.start_offset < start);
            if offset.end_offset <= offset.start_offset || out_of_order {
                bad.push(index);
            }
            previous_start = Some(offset.start_offset);
        }

        bad
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset(start: i32, end: i32) -> HourOffset {
        HourOffset { start_offset: start, end_offset: end }
    }

    #[test]
    fn test_lookup_outside_range_is_none() {
        let week = WeekContext {
            week: 5,
            dates: vec![NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()],
            hour_offsets: vec![offset(0, 45)],
        };

        assert_eq!(week.date_for_day(0), NaiveDate::from_ymd_opt(2024, 3, 4));
        assert_eq!(week.date_for_day(3), None);
        assert_eq!(week.offset_for_period(0), Some(offset(0, 45)));
        assert_eq!(week.offset_for_period(1), None);
        assert_eq!(week.offset_for_period(0).unwrap().duration_minutes(), 45);
    }

    #[test]
    fn test_duration_saturates_on_extreme_offsets() {
        assert_eq!(offset(i32::MIN, i32::MAX).duration_minutes(), i32::MAX);
        assert_eq!(offset(i32::MAX, i32::MIN).duration_minutes(), i32::MIN);
        assert_eq!(offset(50, 95).duration_minutes(), 45);
    }

    #[test]
    fn test_misaligned_periods() {
        let week = WeekContext {
            week: 1,
            dates: Vec::new(),
            hour_offsets: vec![offset(0, 45), offset(50, 95), offset(40, 40), offset(100, 145)],
        };

        assert_eq!(week.misaligned_periods(), vec![2]);
    }

    #[test]
    fn test_serializes_camel_case() {
        let week = WeekContext {
            week: 2,
            dates: vec![NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()],
            hour_offsets: vec![offset(0, 45)],
        };

        let json = serde_json::to_value(&week).unwrap();
        assert_eq!(json["hourOffsets"][0]["startOffset"], 0);
        assert_eq!(json["dates"][0], "2024-01-08");
    }
}
