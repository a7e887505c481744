mod day;
#[allow(clippy::module_inception)]
mod habit;
mod stage;

pub use day::DayStatus;
pub use habit::{Habit, HabitDraft};
pub use stage::{Commitments, Stage, StageTally, STAGE_LENGTH};

pub(crate) use habit::non_empty_stages;
pub(crate) use stage::{optional, required};
