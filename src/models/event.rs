use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Status tags attached to a period. An event may carry several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PeriodFlag {
    Substitute,
    Replacement,
    Canceled,
    NotDone,
    Event,
    OfficeHours,
    HalfTime,
    Club,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTitle {
    pub long: String,
    pub short: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub day_index: u32,
    pub period_index: u32,
    pub class_key: String,
    pub title: EventTitle,
    #[serde(default)]
    pub flags: BTreeSet<PeriodFlag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classroom_key: Option<String>,
}

impl Event {
    pub fn has_flag(&self, flag: PeriodFlag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn is_canceled(&self) -> bool {
        self.has_flag(PeriodFlag::Canceled)
    }
}
