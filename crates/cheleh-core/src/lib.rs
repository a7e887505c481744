//! # Cheleh Core Library
//!
//! This library provides the core logic for Cheleh, a tracker for long-running
//! habits built from 40-day commitment periods ("stages"). Every operation is
//! available through the standalone `cheleh` CLI, which is a thin layer over
//! this crate.
//!
//! ## Architecture
//!
//! - **Progression Engine**: pure rules over a habit and the current instant.
//!   It decides which day cells are editable, when a stage is complete, and
//!   how stages are appended or reset
//! - **Models**: day statuses, 40-slot stages and habits
//! - **Migration**: one-time start-date backfill for legacy records
//! - **Storage**: SQLite key-value blob and TOML configuration
//!
//! ## Key Components
//!
//! - [`ProgressionEngine`]: day-frontier and stage rules
//! - [`Habit`]: habit model with its stages
//! - [`HabitBook`]: the habit list owned by the host
//! - [`HabitStore`]: load/save of the habit list
//! - [`Config`]: application configuration management

pub mod book;
pub mod clock;
pub mod error;
pub mod habit;
pub mod migration;
pub mod progression;
pub mod storage;

pub use book::HabitBook;
pub use clock::{Calendar, Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, DatabaseError, ProgressionError, ValidationError};
pub use habit::{Commitments, DayStatus, Habit, HabitDraft, Stage, StageTally, STAGE_LENGTH};
pub use migration::{HabitRecord, MigrationReport};
pub use progression::{CellKind, DayCell, HabitEdit, HabitSummary, MinimalEdit, ProgressionEngine};
pub use storage::{Config, Database, HabitStore, Theme};
