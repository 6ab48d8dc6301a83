use std::collections::BTreeMap;

use crate::models::Event;

/// Events bucketed by `(day_index, period_index)`.
///
/// Sparse: only cells that received an event exist. Within a cell, events
/// keep the order in which they were pushed.
#[derive(Debug, Clone, Default)]
pub struct EventGrid {
    days: BTreeMap<u32, BTreeMap<u32, Vec<Event>>>,
    len: usize,
}

impl EventGrid {
    pub fn from_events(events: impl IntoIterator<Item = Event>) -> Self {
        let mut grid = Self::default();
        for event in events {
            grid.push(event);
        }
        grid
    }

    pub fn push(&mut self, event: Event) {
        self.days
            .entry(event.day_index)
            .or_default()
            .entry(event.period_index)
            .or_default()
            .push(event);
        self.len += 1;
    }

    /// Events in one cell. Unpopulated cells are empty, never an error.
    pub fn cell(&self, day_index: u32, period_index: u32) -> &[Event] {
        self.days
            .get(&day_index)
            .and_then(|periods| periods.get(&period_index))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Populated cells of one day as `(period_index, events)`.
    pub fn day(&self, day_index: u32) -> impl Iterator<Item = (u32, &[Event])> {
        self.days
            .get(&day_index)
            .into_iter()
            .flat_map(|periods| periods.iter().map(|(period, events)| (*period, events.as_slice())))
    }

    /// Every populated cell as `(day_index, period_index, events)`, by day then period.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, &[Event])> {
        self.days.iter().flat_map(|(day, periods)| {
            periods
                .iter()
                .map(move |(period, events)| (*day, *period, events.as_slice()))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.cells().flat_map(|(_, _, events)| events.iter())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
