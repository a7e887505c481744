//! Descriptive-field edits on a habit and one of its stages.

use crate::error::ProgressionError;
use crate::habit::{optional, required, Habit};

/// What to do with a stage's optional minimal commitment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MinimalEdit {
    #[default]
    Keep,
    /// Replace it; a blank value clears it.
    Set(String),
    Clear,
}

/// Field replacements for [`ProgressionEngine::edit_habit_and_stage`].
///
/// `None` leaves a field unchanged.
///
/// [`ProgressionEngine::edit_habit_and_stage`]: super::ProgressionEngine::edit_habit_and_stage
#[derive(Debug, Clone, Default)]
pub struct HabitEdit {
    pub title: Option<String>,
    pub starting_commitment: Option<String>,
    pub target_commitment: Option<String>,
    pub stage_index: usize,
    pub primary_commitment: Option<String>,
    pub reduced_commitment: Option<String>,
    pub minimal_commitment: MinimalEdit,
}

impl HabitEdit {
    pub fn for_stage(stage_index: usize) -> Self {
        Self {
            stage_index,
            ..Self::default()
        }
    }

    /// Apply to a copy of `habit`. Days and start date are never touched.
    pub(crate) fn apply(self, habit: &Habit) -> Result<Habit, ProgressionError> {
        let len = habit.stages().len();
        let mut next = habit.clone();

        if let Some(title) = self.title {
            next.title = required("title", title)?;
        }
        if let Some(starting) = self.starting_commitment {
            next.starting_commitment = required("startingCommitment", starting)?;
        }
        if let Some(target) = self.target_commitment {
            next.target_commitment = required("targetCommitment", target)?;
        }

        let stage = next
            .stage_mut(self.stage_index)
            .ok_or(ProgressionError::StageOutOfRange {
                index: self.stage_index,
                len,
            })?;
        if let Some(primary) = self.primary_commitment {
            stage.primary_commitment = required("primaryCommitment", primary)?;
        }
        if let Some(reduced) = self.reduced_commitment {
            stage.reduced_commitment = required("reducedCommitment", reduced)?;
        }
        match self.minimal_commitment {
            MinimalEdit::Keep => {}
            MinimalEdit::Set(minimal) => stage.minimal_commitment = optional(Some(minimal)),
            MinimalEdit::Clear => stage.minimal_commitment = None,
        }

        Ok(next)
    }
}
