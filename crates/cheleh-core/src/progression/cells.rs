//! Per-cell view of a stage and per-habit summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::engine::ProgressionEngine;
use super::window::global_index;
use crate::error::ProgressionError;
use crate::habit::{DayStatus, Habit, StageTally, STAGE_LENGTH};

/// How a day cell relates to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    /// Carries a mark.
    Filled,
    /// Unmarked and already in the past.
    Missed,
    /// Unmarked and today.
    Today,
    /// Unmarked and not reached yet.
    Upcoming,
}

/// One of the 40 cells of a stage as seen at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    pub day_index: usize,
    pub global_index: usize,
    pub status: DayStatus,
    pub kind: CellKind,
    pub editable: bool,
}

/// Snapshot of a habit's standing for list views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitSummary {
    pub id: String,
    pub title: String,
    /// 1-based number of the current stage.
    pub stage_number: usize,
    pub filled: usize,
    pub progress_percent: u8,
    pub stage_complete: bool,
    pub current_global_day: usize,
    pub tally: StageTally,
}

impl ProgressionEngine {
    /// Classify every cell of one stage.
    pub fn day_cells(
        &self,
        habit: &Habit,
        stage_index: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<DayCell>, ProgressionError> {
        let stage = habit
            .stage(stage_index)
            .ok_or(ProgressionError::StageOutOfRange {
                index: stage_index,
                len: habit.stages().len(),
            })?;
        let frontier = self.frontier(habit, now);

        Ok((0..STAGE_LENGTH)
            .map(|day_index| {
                let global = global_index(stage_index, day_index);
                let status = stage.days[day_index];
                let kind = if status.is_set() {
                    CellKind::Filled
                } else if global < frontier.current_day {
                    CellKind::Missed
                } else if global == frontier.current_day {
                    CellKind::Today
                } else {
                    CellKind::Upcoming
                };
                DayCell {
                    day_index,
                    global_index: global,
                    status,
                    kind,
                    editable: frontier.allows(global),
                }
            })
            .collect())
    }

    pub fn summary(&self, habit: &Habit, now: DateTime<Utc>) -> HabitSummary {
        let stage = habit.current_stage();
        HabitSummary {
            id: habit.id.clone(),
            title: habit.title.clone(),
            stage_number: habit.current_stage_index() + 1,
            filled: stage.filled_count(),
            progress_percent: stage.progress_percent(),
            stage_complete: stage.is_complete(),
            current_global_day: self.current_global_day(habit, now),
            tally: stage.tally(),
        }
    }
}
