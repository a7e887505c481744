//! Habit model: an ordered chain of stages plus identity metadata.

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::stage::{required, Commitments, Stage};
use crate::error::ValidationError;

/// Everything needed to create a habit with its first stage.
#[derive(Debug, Clone, Default)]
pub struct HabitDraft {
    pub title: String,
    pub starting_commitment: String,
    pub target_commitment: String,
    pub primary_commitment: String,
    pub reduced_commitment: String,
    pub minimal_commitment: Option<String>,
}

/// A tracked habit.
///
/// `stages` is never empty; it is only reachable through accessors so
/// that invariant holds for every value of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub title: String,
    #[serde(alias = "initialBite")]
    pub starting_commitment: String,
    #[serde(alias = "finalBite")]
    pub target_commitment: String,
    /// Instant of day 0, stored as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_date: DateTime<Utc>,
    #[serde(deserialize_with = "non_empty_stages")]
    stages: Vec<Stage>,
}

impl Habit {
    /// Create a habit whose single blank stage starts at `now`.
    pub fn new(draft: HabitDraft, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        let title = required("title", draft.title)?;
        let starting_commitment = required("startingCommitment", draft.starting_commitment)?;
        let target_commitment = required("targetCommitment", draft.target_commitment)?;
        let commitments = Commitments {
            primary: draft.primary_commitment,
            reduced: draft.reduced_commitment,
            minimal: draft.minimal_commitment,
        }
        .validated()?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            title,
            starting_commitment,
            target_commitment,
            start_date: now,
            stages: vec![Stage::new(commitments)],
        })
    }

    /// Assemble a habit from parts, rejecting an empty stage list.
    pub fn from_parts(
        id: String,
        title: String,
        starting_commitment: String,
        target_commitment: String,
        start_date: DateTime<Utc>,
        stages: Vec<Stage>,
    ) -> Result<Self, ValidationError> {
        if stages.is_empty() {
            return Err(ValidationError::EmptyField("stages"));
        }
        Ok(Self {
            id,
            title,
            starting_commitment,
            target_commitment,
            start_date,
            stages,
        })
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn stage(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }

    pub(crate) fn stage_mut(&mut self, index: usize) -> Option<&mut Stage> {
        self.stages.get_mut(index)
    }

    pub(crate) fn push_stage(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    /// Drop every stage after the first.
    pub(crate) fn truncate_to_first_stage(&mut self) {
        self.stages.truncate(1);
    }

    /// Index of the last (active) stage.
    pub fn current_stage_index(&self) -> usize {
        self.stages.len() - 1
    }

    pub fn current_stage(&self) -> &Stage {
        &self.stages[self.current_stage_index()]
    }

    /// Marked days across every stage.
    pub fn marked_count(&self) -> usize {
        self.stages.iter().map(Stage::marked_count).sum()
    }
}

pub(crate) fn non_empty_stages<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Stage>, D::Error> {
    let stages = Vec::<Stage>::deserialize(deserializer)?;
    if stages.is_empty() {
        return Err(de::Error::invalid_length(0, &"at least one stage"));
    }
    Ok(stages)
}
