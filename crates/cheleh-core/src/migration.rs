//! Load-time migration of persisted habit records.
//!
//! Early records carry no `startDate`. For those the start is backdated
//! by one day per marked slot, assuming the record was filled without
//! gaps up to today. The migrated habit is what gets saved next, so the
//! backfill runs at most once per record.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::error::ValidationError;
use crate::habit::{non_empty_stages, Habit, Stage};

/// A habit as found in storage, before migration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitRecord {
    pub id: String,
    pub title: String,
    #[serde(alias = "initialBite")]
    pub starting_commitment: String,
    #[serde(alias = "finalBite")]
    pub target_commitment: String,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "non_empty_stages")]
    pub stages: Vec<Stage>,
}

impl HabitRecord {
    /// True when the record needs its start date synthesized.
    ///
    /// A zero timestamp counts as missing.
    pub fn needs_backfill(&self) -> bool {
        self.start_date.map_or(true, |d| d.timestamp_millis() == 0)
    }

    /// Convert into a habit, backfilling `start_date` when missing.
    pub fn into_habit(self, now: DateTime<Utc>) -> Result<Habit, ValidationError> {
        let start_date = if self.needs_backfill() {
            backfilled_start(&self.stages, now)
        } else {
            self.start_date.unwrap_or(now)
        };
        let Self {
            id,
            title,
            starting_commitment,
            target_commitment,
            stages,
            ..
        } = self;
        Habit::from_parts(id, title, starting_commitment, target_commitment, start_date, stages)
    }
}

/// `now - (marked days across all stages)` days.
pub fn backfilled_start(stages: &[Stage], now: DateTime<Utc>) -> DateTime<Utc> {
    let total_filled: usize = stages.iter().map(Stage::marked_count).sum();
    now - Duration::days(total_filled as i64)
}

/// Outcome of a migration pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub total: usize,
    pub migrated: usize,
}

/// Migrate every record, preserving order.
pub fn migrate_records(
    records: Vec<HabitRecord>,
    now: DateTime<Utc>,
) -> Result<(Vec<Habit>, MigrationReport), ValidationError> {
    let mut report = MigrationReport {
        total: records.len(),
        migrated: 0,
    };
    let habits = records
        .into_iter()
        .map(|record| {
            if record.needs_backfill() {
                report.migrated += 1;
            }
            record.into_habit(now)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok((habits, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn days(marked: usize) -> Vec<serde_json::Value> {
        (0..40)
            .map(|i| if i < marked { json!("standard") } else { json!(null) })
            .collect()
    }

    fn record(start_date: Option<i64>, marked: &[usize]) -> HabitRecord {
        let stages: Vec<_> = marked
            .iter()
            .enumerate()
            .map(|(i, n)| {
                json!({
                    "id": format!("s{i}"),
                    "primaryCommitment": "a",
                    "reducedCommitment": "b",
                    "days": days(*n),
                })
            })
            .collect();
        let mut value = json!({
            "id": "h1",
            "title": "Push-ups",
            "startingCommitment": "1",
            "targetCommitment": "50",
            "stages": stages,
        });
        if let Some(ms) = start_date {
            value["startDate"] = json!(ms);
        }
        serde_json::from_value(value).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 20, 18, 0, 0).unwrap()
    }

    #[test]
    fn five_marked_days_backdate_five_days() {
        let habit = record(None, &[5]).into_habit(now()).unwrap();
        assert_eq!(habit.start_date, now() - Duration::days(5));
    }

    #[test]
    fn counts_marks_across_all_stages() {
        let habit = record(None, &[40, 7]).into_habit(now()).unwrap();
        assert_eq!(habit.start_date, now() - Duration::days(47));
    }

    #[test]
    fn existing_start_date_is_kept() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let habit = record(Some(start.timestamp_millis()), &[5]).into_habit(now()).unwrap();
        assert_eq!(habit.start_date, start);
    }

    #[test]
    fn zero_start_date_is_treated_as_missing() {
        let habit = record(Some(0), &[2]).into_habit(now()).unwrap();
        assert_eq!(habit.start_date, now() - Duration::days(2));
    }

    #[test]
    fn report_counts_only_backfilled_records() {
        let records = vec![record(None, &[1]), record(Some(1_700_000_000_000), &[3])];
        let (habits, report) = migrate_records(records, now()).unwrap();
        assert_eq!(habits.len(), 2);
        assert_eq!(report, MigrationReport { total: 2, migrated: 1 });
    }

    #[test]
    fn migrated_habit_does_not_migrate_again() {
        let habit = record(None, &[5]).into_habit(now()).unwrap();
        let blob = serde_json::to_string(&habit).unwrap();
        let reloaded: HabitRecord = serde_json::from_str(&blob).unwrap();
        assert!(!reloaded.needs_backfill());
        let later = now() + Duration::days(10);
        assert_eq!(reloaded.into_habit(later).unwrap().start_date, habit.start_date);
    }
}
