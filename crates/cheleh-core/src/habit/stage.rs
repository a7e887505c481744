//! Stage model: one 40-day commitment period.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::day::DayStatus;
use crate::error::ValidationError;

/// Number of days in every stage.
pub const STAGE_LENGTH: usize = 40;

/// The three effort descriptors ("bites") of a stage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Commitments {
    pub primary: String,
    pub reduced: String,
    pub minimal: Option<String>,
}

impl Commitments {
    pub fn new(
        primary: impl Into<String>,
        reduced: impl Into<String>,
        minimal: Option<String>,
    ) -> Self {
        Self {
            primary: primary.into(),
            reduced: reduced.into(),
            minimal,
        }
    }

    /// Trim all descriptors and reject empty required ones.
    ///
    /// A blank minimal descriptor becomes `None`.
    pub fn validated(self) -> Result<Self, ValidationError> {
        Ok(Self {
            primary: required("primaryCommitment", self.primary)?,
            reduced: required("reducedCommitment", self.reduced)?,
            minimal: optional(self.minimal),
        })
    }
}

pub(crate) fn required(field: &'static str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Counts of each status within a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StageTally {
    pub standard: usize,
    pub special: usize,
    pub emergency: usize,
    pub unset: usize,
}

/// A 40-day commitment period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub id: String,
    #[serde(alias = "chelehBite")]
    pub primary_commitment: String,
    #[serde(alias = "specialBite")]
    pub reduced_commitment: String,
    #[serde(default, alias = "emergencyBite", skip_serializing_if = "Option::is_none")]
    pub minimal_commitment: Option<String>,
    #[serde(with = "fixed_days")]
    pub days: [DayStatus; STAGE_LENGTH],
}

impl Stage {
    /// A blank stage with a fresh identifier.
    pub fn new(commitments: Commitments) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), commitments)
    }

    pub fn with_id(id: impl Into<String>, commitments: Commitments) -> Self {
        Self {
            id: id.into(),
            primary_commitment: commitments.primary,
            reduced_commitment: commitments.reduced,
            minimal_commitment: commitments.minimal,
            days: [DayStatus::Unset; STAGE_LENGTH],
        }
    }

    pub fn commitments(&self) -> Commitments {
        Commitments {
            primary: self.primary_commitment.clone(),
            reduced: self.reduced_commitment.clone(),
            minimal: self.minimal_commitment.clone(),
        }
    }

    /// True when every slot carries a mark.
    pub fn is_complete(&self) -> bool {
        self.days.iter().all(|d| d.is_set())
    }

    /// Lowest unset index, or [`STAGE_LENGTH`] when the stage is full.
    pub fn first_unset_index(&self) -> usize {
        self.days
            .iter()
            .position(|d| !d.is_set())
            .unwrap_or(STAGE_LENGTH)
    }

    /// Number of leading marked days.
    ///
    /// Marks after a skipped day are not counted; see [`Stage::marked_count`].
    pub fn filled_count(&self) -> usize {
        self.first_unset_index()
    }

    /// Number of marked days wherever they sit.
    pub fn marked_count(&self) -> usize {
        self.days.iter().filter(|d| d.is_set()).count()
    }

    /// True when no mark appears after the first unset slot.
    pub fn is_contiguous(&self) -> bool {
        let first_unset = self.first_unset_index();
        self.days[first_unset..].iter().all(|d| !d.is_set())
    }

    /// Display progress, `round(filled / 40 * 100)`.
    pub fn progress_percent(&self) -> u8 {
        (self.filled_count() as f64 / STAGE_LENGTH as f64 * 100.0).round() as u8
    }

    pub fn tally(&self) -> StageTally {
        self.days.iter().fold(StageTally::default(), |mut t, d| {
            match d {
                DayStatus::Unset => t.unset += 1,
                DayStatus::Standard => t.standard += 1,
                DayStatus::Special => t.special += 1,
                DayStatus::Emergency => t.emergency += 1,
            }
            t
        })
    }

    /// Copy of this stage with every day cleared.
    pub fn blanked(&self) -> Self {
        Self {
            days: [DayStatus::Unset; STAGE_LENGTH],
            ..self.clone()
        }
    }
}

/// serde for `[DayStatus; 40]`; any other length is rejected.
mod fixed_days {
    use super::*;

    pub fn serialize<S: Serializer>(
        days: &[DayStatus; STAGE_LENGTH],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(STAGE_LENGTH))?;
        for day in days {
            seq.serialize_element(day)?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<[DayStatus; STAGE_LENGTH], D::Error> {
        let days = Vec::<DayStatus>::deserialize(deserializer)?;
        let len = days.len();
        days.try_into().map_err(|_| {
            de::Error::invalid_length(len, &"exactly 40 day entries")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage_with(filled: usize) -> Stage {
        let mut stage = Stage::new(Commitments::new("20 pages", "5 pages", None));
        for day in stage.days.iter_mut().take(filled) {
            *day = DayStatus::Standard;
        }
        stage
    }

    #[test]
    fn fresh_stage_is_blank() {
        let stage = stage_with(0);
        assert_eq!(stage.days.len(), STAGE_LENGTH);
        assert_eq!(stage.first_unset_index(), 0);
        assert!(!stage.is_complete());
        assert_eq!(stage.progress_percent(), 0);
    }

    #[test]
    fn full_stage_is_complete() {
        let stage = stage_with(40);
        assert!(stage.is_complete());
        assert_eq!(stage.first_unset_index(), STAGE_LENGTH);
        assert_eq!(stage.progress_percent(), 100);
    }

    #[test]
    fn progress_rounds_half_up() {
        assert_eq!(stage_with(1).progress_percent(), 3); // 2.5
        assert_eq!(stage_with(3).progress_percent(), 8); // 7.5
        assert_eq!(stage_with(20).progress_percent(), 50);
    }

    #[test]
    fn gap_is_not_contiguous() {
        let mut stage = stage_with(2);
        stage.days[5] = DayStatus::Special;
        assert!(!stage.is_contiguous());
        assert_eq!(stage.first_unset_index(), 2);
        assert_eq!(stage.marked_count(), 3);
    }

    #[test]
    fn progress_after_a_gap_counts_the_leading_run() {
        let mut stage = stage_with(1);
        stage.days[3] = DayStatus::Standard;
        assert_eq!(stage.filled_count(), 1);
        assert_eq!(stage.progress_percent(), 3);
        assert!(!stage.is_complete());
    }

    #[test]
    fn tally_counts_each_status() {
        let mut stage = stage_with(3);
        stage.days[3] = DayStatus::Emergency;
        stage.days[4] = DayStatus::Special;
        let tally = stage.tally();
        assert_eq!(tally.standard, 3);
        assert_eq!(tally.special, 1);
        assert_eq!(tally.emergency, 1);
        assert_eq!(tally.unset, 35);
    }

    #[test]
    fn commitments_trim_and_drop_blank_minimal() {
        let c = Commitments::new(" run 5k ", "run 2k", Some("   ".into()))
            .validated()
            .unwrap();
        assert_eq!(c.primary, "run 5k");
        assert_eq!(c.minimal, None);
    }

    #[test]
    fn commitments_require_primary_and_reduced() {
        let err = Commitments::new("", "x", None).validated().unwrap_err();
        assert_eq!(err, ValidationError::EmptyField("primaryCommitment"));
        let err = Commitments::new("x", " ", None).validated().unwrap_err();
        assert_eq!(err, ValidationError::EmptyField("reducedCommitment"));
    }

    #[test]
    fn wire_format_uses_camel_case_and_omits_absent_minimal() {
        let json = serde_json::to_value(stage_with(1)).unwrap();
        assert_eq!(json["primaryCommitment"], "20 pages");
        assert!(json.get("minimalCommitment").is_none());
        assert_eq!(json["days"].as_array().unwrap().len(), 40);
        assert_eq!(json["days"][0], "standard");
        assert!(json["days"][1].is_null());
    }

    #[test]
    fn rejects_wrong_day_count() {
        let json = r#"{"id":"s","primaryCommitment":"a","reducedCommitment":"b","days":[null,null]}"#;
        assert!(serde_json::from_str::<Stage>(json).is_err());
    }

    #[test]
    fn accepts_legacy_bite_names() {
        let days = vec![serde_json::Value::Null; 40];
        let json = serde_json::json!({
            "id": "stage-1",
            "chelehBite": "10 pushups",
            "specialBite": "3 pushups",
            "emergencyBite": "1 pushup",
            "days": days,
        });
        let stage: Stage = serde_json::from_value(json).unwrap();
        assert_eq!(stage.primary_commitment, "10 pushups");
        assert_eq!(stage.minimal_commitment.as_deref(), Some("1 pushup"));
    }
}
