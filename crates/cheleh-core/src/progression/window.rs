//! The editability frontier.
//!
//! A single window spans the whole habit: a slot may be edited only if
//! it is not in the future and not before the most recently marked slot.
//! The most recent mark itself stays editable so a mis-tap can be fixed.

use serde::{Deserialize, Serialize};

use crate::habit::{Habit, STAGE_LENGTH};

/// Position of `(stage_index, day_index)` on the habit-wide day axis.
pub fn global_index(stage_index: usize, day_index: usize) -> usize {
    stage_index * STAGE_LENGTH + day_index
}

/// Inverse of [`global_index`].
pub fn slot_of(global: usize) -> (usize, usize) {
    (global / STAGE_LENGTH, global % STAGE_LENGTH)
}

/// Highest global index whose slot is marked, if any.
pub fn last_filled_global_index(habit: &Habit) -> Option<usize> {
    habit
        .stages()
        .iter()
        .enumerate()
        .rev()
        .find_map(|(stage_index, stage)| {
            stage
                .days
                .iter()
                .rposition(|d| d.is_set())
                .map(|day_index| global_index(stage_index, day_index))
        })
}

/// Bounds of the editable window at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frontier {
    /// `max(0, days since start)`.
    pub current_day: usize,
    /// Most recently marked slot; `None` when nothing is marked.
    pub last_filled: Option<usize>,
}

impl Frontier {
    pub fn new(current_day: usize, habit: &Habit) -> Self {
        Self {
            current_day,
            last_filled: last_filled_global_index(habit),
        }
    }

    /// `g <= current_day && g >= last_filled`.
    pub fn allows(&self, global: usize) -> bool {
        global <= self.current_day && self.last_filled.map_or(true, |last| global >= last)
    }
}
