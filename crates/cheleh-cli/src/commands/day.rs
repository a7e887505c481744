//! Day marking commands for CLI.

use clap::Subcommand;
use cheleh_core::{DayStatus, Stage, STAGE_LENGTH};

use super::{index_arg, Session};

#[derive(Subcommand)]
pub enum DayAction {
    /// Set or clear one day of a stage
    Set {
        /// Habit id or 1-based position
        habit: String,
        /// Stage number (1-based)
        stage: usize,
        /// Day number within the stage (1-40)
        day: usize,
        /// standard, special, emergency or clear
        status: DayStatus,
    },
    /// Mark today's day
    Today {
        /// Habit id or 1-based position
        habit: String,
        /// standard, special, emergency or clear
        status: DayStatus,
    },
}

pub fn run(action: DayAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;

    let (id, stage_index, day_index, status) = match action {
        DayAction::Set {
            habit,
            stage,
            day,
            status,
        } => (
            session.habit_id(&habit)?,
            index_arg("stage", stage)?,
            index_arg("day", day)?,
            status,
        ),
        DayAction::Today { habit, status } => {
            let id = session.habit_id(&habit)?;
            let current = session.book.resolve(&id)?;
            let (stage_index, day_index) = session
                .engine
                .today_slot(current, session.now)
                .ok_or("today falls in a stage that has not been added yet")?;
            (id, stage_index, day_index, status)
        }
    };

    let engine = session.engine;
    let now = session.now;
    let updated = session.book.apply(&id, |h| {
        engine.set_day_status(h, stage_index, day_index, status, now)
    })?;
    println!(
        "{}",
        outcome_line(&updated.stages()[stage_index], stage_index, day_index, status)
    );
    session.save()?;
    Ok(())
}

/// Progress uses the same leading-run count as `habit list`.
fn outcome_line(stage: &Stage, stage_index: usize, day_index: usize, status: DayStatus) -> String {
    format!(
        "stage {} day {}: {} ({}/{})",
        stage_index + 1,
        day_index + 1,
        status,
        stage.filled_count(),
        STAGE_LENGTH
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cheleh_core::Commitments;

    #[test]
    fn outcome_counts_only_the_leading_run() {
        let mut stage = Stage::new(Commitments::new("10", "5", None));
        stage.days[0] = DayStatus::Standard;
        stage.days[3] = DayStatus::Special;
        assert_eq!(
            outcome_line(&stage, 0, 3, DayStatus::Special),
            "stage 1 day 4: special (1/40)"
        );
    }
}
