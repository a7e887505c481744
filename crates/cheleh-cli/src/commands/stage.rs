//! Stage commands for CLI.

use clap::Subcommand;
use cheleh_core::Commitments;

use super::Session;

#[derive(Subcommand)]
pub enum StageAction {
    /// Start the next 40-day stage once the current one is complete
    Add {
        /// Habit id or 1-based position
        habit: String,
        /// Full effort for the new stage
        #[arg(long)]
        primary: String,
        /// Light effort for the new stage
        #[arg(long)]
        reduced: String,
        /// Bare-minimum effort for the new stage
        #[arg(long)]
        minimal: Option<String>,
    },
}

pub fn run(action: StageAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;

    match action {
        StageAction::Add {
            habit,
            primary,
            reduced,
            minimal,
        } => {
            let id = session.habit_id(&habit)?;
            let engine = session.engine;
            let commitments = Commitments::new(primary, reduced, minimal);
            let updated = session
                .book
                .apply(&id, |h| engine.add_stage(h, commitments))?;
            println!(
                "Stage {} added to {}",
                updated.stages().len(),
                updated.title
            );
            session.save()?;
        }
    }
    Ok(())
}
