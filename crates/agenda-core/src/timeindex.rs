//! Day/week/month bucket maps backing the view queries.
//!
//! A task's bucket in every granularity is derived only from its start
//! instant in UTC, never from its full span: a task running Friday through
//! Monday is listed under Friday's day, week, and month buckets alone. This
//! mirrors the behavior of the systems this core replaces and is kept as
//! documented behavior rather than "fixed", since widening it would change
//! observable query results.

use chrono::{DateTime, Datelike, Utc};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Calendar date of the start instant, in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(pub chrono::NaiveDate);

/// ISO-8601 week of the start instant: weeks begin on Monday and week 1 is
/// the week containing the year's first Thursday. Chosen as the one fixed,
/// deterministic rule replacing the locale-dependent week numbering of the
/// original systems; note the ISO week-year can differ from the calendar
/// year around January 1st.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekKey {
    pub year: i32,
    pub week: u32,
}

/// Calendar (year, month) of the start instant, in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl DayKey {
    pub fn of(instant: DateTime<Utc>) -> Self {
        DayKey(instant.date_naive())
    }
}

impl WeekKey {
    pub fn of(instant: DateTime<Utc>) -> Self {
        let iso = instant.iso_week();
        WeekKey {
            year: iso.year(),
            week: iso.week(),
        }
    }
}

impl MonthKey {
    pub fn of(instant: DateTime<Utc>) -> Self {
        MonthKey {
            year: instant.year(),
            month: instant.month(),
        }
    }
}

/// Three independent bucket maps kept consistent with the task map by the
/// store. Buckets hold insertion-ordered task ids; view-level sorting is
/// applied by the caller.
#[derive(Debug, Default)]
pub struct TimeIndex {
    by_day: BTreeMap<DayKey, Vec<Uuid>>,
    by_week: BTreeMap<WeekKey, Vec<Uuid>>,
    by_month: BTreeMap<MonthKey, Vec<Uuid>>,
}

impl TimeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the task into its day, week, and month bucket. The caller
    /// must not insert the same id twice without removing it first.
    pub fn insert(&mut self, id: Uuid, start_at: DateTime<Utc>) {
        self.by_day.entry(DayKey::of(start_at)).or_default().push(id);
        self.by_week
            .entry(WeekKey::of(start_at))
            .or_default()
            .push(id);
        self.by_month
            .entry(MonthKey::of(start_at))
            .or_default()
            .push(id);
    }

    /// Removes the task from the buckets derived from `start_at`, dropping
    /// buckets that become empty.
    pub fn remove(&mut self, id: Uuid, start_at: DateTime<Utc>) {
        fn drop_from<K: Ord>(map: &mut BTreeMap<K, Vec<Uuid>>, key: K, id: Uuid) {
            if let Some(bucket) = map.get_mut(&key) {
                bucket.retain(|entry| *entry != id);
                if bucket.is_empty() {
                    map.remove(&key);
                }
            }
        }
        drop_from(&mut self.by_day, DayKey::of(start_at), id);
        drop_from(&mut self.by_week, WeekKey::of(start_at), id);
        drop_from(&mut self.by_month, MonthKey::of(start_at), id);
    }

    pub fn day_tasks(&self, key: DayKey) -> &[Uuid] {
        self.by_day.get(&key).map_or(&[], Vec::as_slice)
    }

    pub fn week_tasks(&self, key: WeekKey) -> &[Uuid] {
        self.by_week.get(&key).map_or(&[], Vec::as_slice)
    }

    pub fn month_tasks(&self, key: MonthKey) -> &[Uuid] {
        self.by_month.get(&key).map_or(&[], Vec::as_slice)
    }

    /// Number of day buckets an id appears in. Diagnostic invariant hook:
    /// for every stored task this is exactly one.
    #[cfg(test)]
    fn day_occurrences(&self, id: Uuid) -> usize {
        self.by_day
            .values()
            .filter(|bucket| bucket.contains(&id))
            .count()
    }
}
