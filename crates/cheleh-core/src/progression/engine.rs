//! Progression engine implementation.
//!
//! Every operation borrows a [`Habit`] and returns a new value; nothing
//! is mutated in place and the engine keeps no state besides the
//! [`Calendar`] that defines where one day ends.
//!
//! ## Transitions
//!
//! ```text
//! set_day_status   one slot inside the editable window
//! add_stage        last stage complete -> append a blank stage
//! reset_on_defeat  keep stage 0 (blanked), start_date = now
//! edit_habit_and_stage  text fields only
//! ```

use chrono::{DateTime, Utc};

use super::edit::HabitEdit;
use super::window::{global_index, Frontier};
use crate::clock::Calendar;
use crate::error::ProgressionError;
use crate::habit::{Commitments, DayStatus, Habit, Stage, STAGE_LENGTH};

/// Pure rules over a habit and the current instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressionEngine {
    calendar: Calendar,
}

impl ProgressionEngine {
    /// Engine using the system's local day boundary.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_calendar(calendar: Calendar) -> Self {
        Self { calendar }
    }

    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Days since the habit started, clamped at zero.
    pub fn current_global_day(&self, habit: &Habit, now: DateTime<Utc>) -> usize {
        self.calendar.days_since(habit.start_date, now).max(0) as usize
    }

    pub fn frontier(&self, habit: &Habit, now: DateTime<Utc>) -> Frontier {
        Frontier::new(self.current_global_day(habit, now), habit)
    }

    /// Index of the stage new marks go into.
    pub fn current_stage_index(habit: &Habit) -> usize {
        habit.current_stage_index()
    }

    /// Rounded completion of the current stage.
    pub fn stage_progress_percent(habit: &Habit) -> u8 {
        habit.current_stage().progress_percent()
    }

    pub fn is_stage_complete(stage: &Stage) -> bool {
        stage.is_complete()
    }

    /// Stage and day of today's slot, if the habit already has a stage for it.
    pub fn today_slot(&self, habit: &Habit, now: DateTime<Utc>) -> Option<(usize, usize)> {
        let (stage_index, day_index) = super::window::slot_of(self.current_global_day(habit, now));
        habit.stage(stage_index).map(|_| (stage_index, day_index))
    }

    /// Check bounds and the editable window; returns the slot's global index.
    pub fn check_editable(
        &self,
        habit: &Habit,
        stage_index: usize,
        day_index: usize,
        now: DateTime<Utc>,
    ) -> Result<usize, ProgressionError> {
        let len = habit.stages().len();
        if stage_index >= len {
            return Err(ProgressionError::StageOutOfRange {
                index: stage_index,
                len,
            });
        }
        if day_index >= STAGE_LENGTH {
            return Err(ProgressionError::DayOutOfRange {
                index: day_index,
                len: STAGE_LENGTH,
            });
        }

        let global = global_index(stage_index, day_index);
        let frontier = self.frontier(habit, now);
        if !frontier.allows(global) {
            return Err(ProgressionError::NotEditable {
                global_index: global,
                current_day: frontier.current_day,
                last_filled: frontier.last_filled,
            });
        }
        Ok(global)
    }

    pub fn can_edit(
        &self,
        habit: &Habit,
        stage_index: usize,
        day_index: usize,
        now: DateTime<Utc>,
    ) -> bool {
        self.check_editable(habit, stage_index, day_index, now).is_ok()
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Replace one day's status. `DayStatus::Unset` clears the mark.
    pub fn set_day_status(
        &self,
        habit: &Habit,
        stage_index: usize,
        day_index: usize,
        status: DayStatus,
        now: DateTime<Utc>,
    ) -> Result<Habit, ProgressionError> {
        self.check_editable(habit, stage_index, day_index, now)?;

        let mut next = habit.clone();
        if let Some(stage) = next.stage_mut(stage_index) {
            stage.days[day_index] = status;
        }
        Ok(next)
    }

    /// Append a blank stage once the last one is fully marked.
    pub fn add_stage(
        &self,
        habit: &Habit,
        commitments: Commitments,
    ) -> Result<Habit, ProgressionError> {
        let last = habit.current_stage();
        if !last.is_complete() {
            return Err(ProgressionError::StageIncomplete {
                stage_index: habit.current_stage_index(),
                filled: last.marked_count(),
            });
        }
        let commitments = commitments.validated()?;

        let mut next = habit.clone();
        next.push_stage(Stage::new(commitments));
        Ok(next)
    }

    /// Restart from a blank first stage dated `now`.
    ///
    /// Every later stage is discarded; stage 0 keeps its id and
    /// commitments.
    pub fn reset_on_defeat(&self, habit: &Habit, now: DateTime<Utc>) -> Habit {
        let mut next = habit.clone();
        next.truncate_to_first_stage();
        if let Some(first) = next.stage_mut(0) {
            *first = first.blanked();
        }
        next.start_date = now;
        next
    }

    /// Replace descriptive text on the habit and one stage.
    pub fn edit_habit_and_stage(
        &self,
        habit: &Habit,
        edit: HabitEdit,
    ) -> Result<Habit, ProgressionError> {
        edit.apply(habit)
    }
}
