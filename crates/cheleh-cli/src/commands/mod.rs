pub mod completions;
pub mod config;
pub mod day;
pub mod defeat;
pub mod habit;
pub mod stage;

use chrono::{DateTime, Utc};
use cheleh_core::{Clock, Config, HabitBook, HabitStore, ProgressionEngine, SystemClock};

/// Loaded state shared by the habit-touching commands.
pub struct Session {
    pub engine: ProgressionEngine,
    pub store: HabitStore,
    pub book: HabitBook,
    pub now: DateTime<Utc>,
}

impl Session {
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load()?;
        let store = HabitStore::open(&config)?;
        let now = SystemClock.now();
        let book = store.load_book(now)?;
        tracing::debug!(key = store.key(), habits = book.len(), "session opened");
        Ok(Self {
            engine: ProgressionEngine::with_calendar(config.calendar()),
            store,
            book,
            now,
        })
    }

    /// Id of the habit named by `selector` (id or 1-based position).
    pub fn habit_id(&self, selector: &str) -> Result<String, Box<dyn std::error::Error>> {
        Ok(self.book.resolve(selector)?.id.clone())
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.store.save_book(&self.book)?;
        Ok(())
    }
}

/// Convert a 1-based position from the command line to an index.
pub fn index_arg(what: &str, number: usize) -> Result<usize, Box<dyn std::error::Error>> {
    number
        .checked_sub(1)
        .ok_or_else(|| format!("{what} numbers start at 1").into())
}

/// Refuse destructive actions unless confirmed.
pub fn require_yes(yes: bool, action: &str) -> Result<(), Box<dyn std::error::Error>> {
    if yes {
        Ok(())
    } else {
        Err(format!("{action} is irreversible; pass --yes to confirm").into())
    }
}
