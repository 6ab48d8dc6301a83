use std::cmp::Ordering;
use std::collections::HashMap;

use icu::collator::{Collator, CollatorOptions};
use icu::locid::locale;
use tracing::warn;

use crate::models::{Class, Room, Teacher};

/// Key-unique table that remembers first-insertion order, so sorted views
/// break ties the same way on every call.
#[derive(Debug, Clone)]
pub struct KeyedTable<T> {
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for KeyedTable<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> KeyedTable<T> {
    /// Inserts or replaces. A replaced record keeps its original position.
    pub fn insert(&mut self, key: String, value: T) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot] = value,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(value);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&slot| &self.entries[slot])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

/// Teachers, rooms and classes from one payload.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    teachers: KeyedTable<Teacher>,
    rooms: KeyedTable<Room>,
    classes: KeyedTable<Class>,
}

impl Directory {
    pub fn new(
        teachers: impl IntoIterator<Item = Teacher>,
        rooms: impl IntoIterator<Item = Room>,
        classes: impl IntoIterator<Item = Class>,
    ) -> Self {
        let mut directory = Self::default();
        for teacher in teachers {
            directory.teachers.insert(teacher.key.clone(), teacher);
        }
        for room in rooms {
            directory.rooms.insert(room.key.clone(), room);
        }
        for class in classes {
            directory.classes.insert(class.key.clone(), class);
        }
        directory
    }

    pub fn teachers(&self) -> &KeyedTable<Teacher> {
        &self.teachers
    }

    pub fn rooms(&self) -> &KeyedTable<Room> {
        &self.rooms
    }

    pub fn classes(&self) -> &KeyedTable<Class> {
        &self.classes
    }

    pub fn teacher(&self, key: &str) -> Option<&Teacher> {
        self.teachers.get(key)
    }

    pub fn room(&self, key: &str) -> Option<&Room> {
        self.rooms.get(key)
    }

    pub fn class(&self, key: &str) -> Option<&Class> {
        self.classes.get(key)
    }

    /// Teachers ordered by abbreviation.
    pub fn sorted_teachers(&self) -> Vec<&Teacher> {
        let mut teachers: Vec<&Teacher> = self.teachers.values().collect();
        let collator = NameCollator::new();
        teachers.sort_by(|a, b| collator.compare(&a.short, &b.short));
        teachers
    }

    /// Rooms ordered by the number in `display`. Rooms without a leading
    /// number go last, in insertion order.
    pub fn sorted_rooms(&self) -> Vec<&Room> {
        let mut rooms: Vec<&Room> = self.rooms.values().collect();
        rooms.sort_by(|a, b| numeric_cmp(room_number(&a.display), room_number(&b.display)));
        rooms
    }

    pub fn sorted_classes(&self) -> Vec<&Class> {
        let mut classes: Vec<&Class> = self.classes.values().collect();
        let collator = NameCollator::new();
        classes.sort_by(|a, b| collator.compare(&a.display, &b.display));
        classes
    }

    pub fn teacher_label<'a>(&'a self, key: &'a str) -> &'a str {
        self.teacher(key).map_or(key, |t| t.short.as_str())
    }

    pub fn room_label<'a>(&'a self, key: &'a str) -> &'a str {
        self.room(key).map_or(key, |r| r.display.as_str())
    }

    pub fn class_label<'a>(&'a self, key: &'a str) -> &'a str {
        self.class(key).map_or(key, |c| c.display.as_str())
    }
}

/// Collation for teacher abbreviations and class labels. Uses Slovenian
/// rules (č, š, ž are letters of their own after c, s, z; other accents are
/// secondary), lowercase before uppercase on a tie.
pub struct NameCollator {
    collator: Option<Collator>,
}

impl NameCollator {
    pub fn new() -> Self {
        match Collator::try_new(&locale!("sl").into(), CollatorOptions::new()) {
            Ok(collator) => Self {
                collator: Some(collator),
            },
            Err(e) => {
                warn!("Collation data unavailable, sorting by folded case: {:?}", e);
                Self { collator: None }
            }
        }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => folded_cmp(a, b),
        }
    }
}

impl Default for NameCollator {
    fn default() -> Self {
        Self::new()
    }
}

fn folded_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Leading integer of a room label: optional whitespace, optional sign,
/// then digits. Anything after the digits is ignored.
pub fn room_number(display: &str) -> Option<f64> {
    let trimmed = display.trim_start();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    digits.parse::<f64>().ok().map(|n| sign * n)
}

fn numeric_cmp(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
