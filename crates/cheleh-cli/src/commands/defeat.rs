//! Defeat: restart a habit from a blank first stage.

use cheleh_core::ProgressionError;

use super::{require_yes, Session};

pub fn run(habit: String, yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    require_yes(yes, "resetting a habit")?;
    let mut session = Session::open()?;

    let id = session.habit_id(&habit)?;
    let engine = session.engine;
    let now = session.now;
    let updated = session
        .book
        .apply(&id, |h| Ok::<_, ProgressionError>(engine.reset_on_defeat(h, now)))?;
    println!("{} restarted from day 1", updated.title);
    session.save()?;
    Ok(())
}
