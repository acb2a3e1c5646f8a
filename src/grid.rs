//! The weekly slot grid.
//!
//! A sparse map from [`SlotKey`] (teacher, day, period) to [`Slot`]. At most
//! one slot exists per key — the grid's central invariant: a teacher cannot
//! be in two places at once. Occupancy indices (class occupancy per time
//! cell, lesson counts per class/subject pair, per-teacher loads) are
//! maintained incrementally on every mutation and are never a separate
//! source of truth: they are rebuildable from the slot map alone, and grid
//! equality compares only the slot map.
//!
//! # Wire format
//!
//! The grid serializes as a map from the string key
//! `"{teacherId}-{day}-{period}"` to the slot record. Collaborators (drag
//! targets, audit logging) rely on this exact key format.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Identity of one grid cell: a teacher at a (day, period).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey {
    /// Occupying teacher (or staff member, for waiting duty).
    pub teacher_id: String,
    /// Day identifier, one of the configured active days.
    pub day: String,
    /// 1-based period number.
    pub period: u32,
}

impl SlotKey {
    /// Creates a slot key.
    pub fn new(teacher_id: impl Into<String>, day: impl Into<String>, period: u32) -> Self {
        Self {
            teacher_id: teacher_id.into(),
            day: day.into(),
            period,
        }
    }

    /// The same time cell for a different teacher.
    pub fn for_teacher(&self, teacher_id: impl Into<String>) -> Self {
        Self::new(teacher_id, self.day.clone(), self.period)
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.teacher_id, self.day, self.period)
    }
}

/// What occupies a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    /// A subject lesson for a class.
    Lesson,
    /// Waiting duty during otherwise idle time.
    Waiting,
}

/// One teacher's occupation of one (day, period).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Occupying teacher.
    pub teacher_id: String,
    /// Taught subject. Always present on lessons, never on waiting duty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    /// Receiving class. Always present on lessons, never on waiting duty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
    /// Lesson or waiting duty. Serialized as `type` on the wire.
    #[serde(rename = "type")]
    pub kind: SlotKind,
}

impl Slot {
    /// Creates a lesson slot.
    pub fn lesson(
        teacher_id: impl Into<String>,
        subject_id: impl Into<String>,
        class_id: impl Into<String>,
    ) -> Self {
        Self {
            teacher_id: teacher_id.into(),
            subject_id: Some(subject_id.into()),
            class_id: Some(class_id.into()),
            kind: SlotKind::Lesson,
        }
    }

    /// Creates a waiting-duty slot.
    pub fn waiting(teacher_id: impl Into<String>) -> Self {
        Self {
            teacher_id: teacher_id.into(),
            subject_id: None,
            class_id: None,
            kind: SlotKind::Waiting,
        }
    }

    /// Whether this is a lesson slot.
    pub fn is_lesson(&self) -> bool {
        self.kind == SlotKind::Lesson
    }

    /// The slot reassigned to another teacher, keys aside.
    pub fn reassigned(&self, teacher_id: impl Into<String>) -> Self {
        let mut slot = self.clone();
        slot.teacher_id = teacher_id.into();
        slot
    }
}

/// A teacher's current grid load, split by slot kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Lesson slots held.
    pub lessons: u32,
    /// Waiting slots held.
    pub waiting: u32,
}

impl LoadSummary {
    /// Lessons plus waiting.
    pub fn total(&self) -> u32 {
        self.lessons + self.waiting
    }
}

/// The sparse weekly grid with incrementally maintained indices.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    slots: HashMap<SlotKey, Slot>,
    /// (day, period, class) → key of the lesson that class receives then.
    class_index: HashMap<(String, u32, String), SlotKey>,
    /// (class, subject) → lesson count.
    lesson_counts: HashMap<(String, String), u32>,
    /// (teacher, day) → occupied periods that day, any kind.
    daily_loads: HashMap<(String, String), u32>,
    /// teacher → weekly load split.
    loads: HashMap<String, LoadSummary>,
}

impl Grid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the slot at a key.
    pub fn get(&self, key: &SlotKey) -> Option<&Slot> {
        self.slots.get(key)
    }

    /// Whether a key is occupied.
    pub fn contains(&self, key: &SlotKey) -> bool {
        self.slots.contains_key(key)
    }

    /// Inserts a slot, returning the displaced slot if the key was occupied.
    pub fn put(&mut self, key: SlotKey, slot: Slot) -> Option<Slot> {
        let displaced = self.remove(&key);
        self.index(&key, &slot);
        self.slots.insert(key, slot);
        displaced
    }

    /// Removes and returns the slot at a key.
    pub fn remove(&mut self, key: &SlotKey) -> Option<Slot> {
        let slot = self.slots.remove(key)?;
        self.unindex(key, &slot);
        Some(slot)
    }

    /// Lesson count for a (class, subject) pair.
    pub fn count_assigned(&self, class_id: &str, subject_id: &str) -> u32 {
        self.lesson_counts
            .get(&(class_id.to_string(), subject_id.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Occupied periods (any kind) for a teacher on a day.
    pub fn daily_load(&self, teacher_id: &str, day: &str) -> u32 {
        self.daily_loads
            .get(&(teacher_id.to_string(), day.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Weekly load split for a teacher.
    pub fn teacher_load(&self, teacher_id: &str) -> LoadSummary {
        self.loads.get(teacher_id).copied().unwrap_or_default()
    }

    /// Key of the lesson a class receives at (day, period), if any.
    pub fn class_at(&self, day: &str, period: u32, class_id: &str) -> Option<&SlotKey> {
        self.class_index
            .get(&(day.to_string(), period, class_id.to_string()))
    }

    /// Iterates over all occupied cells.
    pub fn iter(&self) -> impl Iterator<Item = (&SlotKey, &Slot)> {
        self.slots.iter()
    }

    /// Iterates over one teacher's occupied cells.
    pub fn teacher_slots<'a>(
        &'a self,
        teacher_id: &'a str,
    ) -> impl Iterator<Item = (&'a SlotKey, &'a Slot)> {
        self.slots.iter().filter(move |(k, _)| k.teacher_id == teacher_id)
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the grid is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn index(&mut self, key: &SlotKey, slot: &Slot) {
        if let (SlotKind::Lesson, Some(class_id)) = (slot.kind, &slot.class_id) {
            self.class_index.insert(
                (key.day.clone(), key.period, class_id.clone()),
                key.clone(),
            );
            if let Some(subject_id) = &slot.subject_id {
                *self
                    .lesson_counts
                    .entry((class_id.clone(), subject_id.clone()))
                    .or_insert(0) += 1;
            }
        }
        *self
            .daily_loads
            .entry((key.teacher_id.clone(), key.day.clone()))
            .or_insert(0) += 1;
        let load = self.loads.entry(key.teacher_id.clone()).or_default();
        match slot.kind {
            SlotKind::Lesson => load.lessons += 1,
            SlotKind::Waiting => load.waiting += 1,
        }
    }

    fn unindex(&mut self, key: &SlotKey, slot: &Slot) {
        if let (SlotKind::Lesson, Some(class_id)) = (slot.kind, &slot.class_id) {
            let cell = (key.day.clone(), key.period, class_id.clone());
            // Only drop the entry if it still points at this key.
            if self.class_index.get(&cell) == Some(key) {
                self.class_index.remove(&cell);
            }
            if let Some(subject_id) = &slot.subject_id {
                if let Some(n) = self
                    .lesson_counts
                    .get_mut(&(class_id.clone(), subject_id.clone()))
                {
                    *n = n.saturating_sub(1);
                }
            }
        }
        if let Some(n) = self
            .daily_loads
            .get_mut(&(key.teacher_id.clone(), key.day.clone()))
        {
            *n = n.saturating_sub(1);
        }
        if let Some(load) = self.loads.get_mut(&key.teacher_id) {
            match slot.kind {
                SlotKind::Lesson => load.lessons = load.lessons.saturating_sub(1),
                SlotKind::Waiting => load.waiting = load.waiting.saturating_sub(1),
            }
        }
    }
}

/// Grids are equal when they hold the same slots; indices are derived.
impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.slots == other.slots
    }
}

impl Eq for Grid {}

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for (key, slot) in &self.slots {
            map.serialize_entry(&key.to_string(), slot)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let raw = HashMap::<String, Slot>::deserialize(deserializer)?;
        let mut grid = Grid::new();
        for (key, slot) in raw {
            // The key embeds the teacher id; day and period are whatever
            // remains after stripping it. Day identifiers may themselves
            // contain dashes, so the period is split off from the right.
            let rest = key
                .strip_prefix(&slot.teacher_id)
                .and_then(|r| r.strip_prefix('-'))
                .ok_or_else(|| {
                    D::Error::custom(format!(
                        "slot key '{key}' does not start with teacher id '{}'",
                        slot.teacher_id
                    ))
                })?;
            let (day, period) = rest
                .rsplit_once('-')
                .ok_or_else(|| D::Error::custom(format!("slot key '{key}' has no period")))?;
            let period: u32 = period.parse().map_err(|_| {
                D::Error::custom(format!("slot key '{key}' has a non-numeric period"))
            })?;
            let teacher_id = slot.teacher_id.clone();
            grid.put(SlotKey::new(teacher_id, day, period), slot);
        }
        Ok(grid)
    }
}
