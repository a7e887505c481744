//! Application state container for the habit list.
//!
//! The host owns one `HabitBook` and routes every engine transition
//! through [`HabitBook::apply`], which replaces the stored habit only
//! when the transition succeeds. Mutations are applied one at a time
//! against the latest stored value.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::habit::Habit;

/// Ordered collection of habits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitBook {
    habits: Vec<Habit>,
}

impl HabitBook {
    pub fn new(habits: Vec<Habit>) -> Self {
        Self { habits }
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn into_habits(self) -> Vec<Habit> {
        self.habits
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Find a habit by exact id, or by its 1-based position in the list.
    pub fn resolve(&self, selector: &str) -> Result<&Habit> {
        if let Some(habit) = self.get(selector) {
            return Ok(habit);
        }
        selector
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.habits.get(i))
            .ok_or_else(|| CoreError::HabitNotFound(selector.to_string()))
    }

    /// Append a new habit.
    pub fn add(&mut self, habit: Habit) {
        tracing::debug!(habit_id = %habit.id, title = %habit.title, "habit added");
        self.habits.push(habit);
    }

    /// Replace the habit with the same id.
    pub fn replace(&mut self, habit: Habit) -> Result<()> {
        let slot = self
            .habits
            .iter_mut()
            .find(|h| h.id == habit.id)
            .ok_or_else(|| CoreError::HabitNotFound(habit.id.clone()))?;
        *slot = habit;
        Ok(())
    }

    /// Remove and return a habit.
    pub fn remove(&mut self, id: &str) -> Result<Habit> {
        let index = self
            .habits
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| CoreError::HabitNotFound(id.to_string()))?;
        tracing::debug!(habit_id = %id, "habit removed");
        Ok(self.habits.remove(index))
    }

    /// Run one transition against the stored habit.
    ///
    /// On success the stored value is replaced and a reference to it is
    /// returned; on failure the stored value is left as it was.
    pub fn apply<F, E>(&mut self, id: &str, transition: F) -> Result<&Habit>
    where
        F: FnOnce(&Habit) -> std::result::Result<Habit, E>,
        E: Into<CoreError>,
    {
        let slot = self
            .habits
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| CoreError::HabitNotFound(id.to_string()))?;

        match transition(&*slot) {
            Ok(next) => {
                *slot = next;
                tracing::debug!(habit_id = %id, "habit updated");
                Ok(&*slot)
            }
            Err(err) => {
                let err: CoreError = err.into();
                tracing::debug!(habit_id = %id, error = %err, "transition rejected");
                Err(err)
            }
        }
    }
}
