mod cells;
mod edit;
mod engine;
mod window;

pub use cells::{CellKind, DayCell, HabitSummary};
pub use edit::{HabitEdit, MinimalEdit};
pub use engine::ProgressionEngine;
pub use window::{global_index, last_filled_global_index, slot_of, Frontier};
