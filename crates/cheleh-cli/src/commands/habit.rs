//! Habit management commands for CLI.

use clap::Subcommand;
use cheleh_core::{Habit, HabitDraft, HabitEdit, MinimalEdit};
use serde_json::json;

use super::{index_arg, require_yes, Session};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a new habit with its first stage
    Add {
        /// Habit title
        title: String,
        /// Smallest effort the habit starts from
        #[arg(long)]
        starting: String,
        /// Effort the habit eventually aims for
        #[arg(long)]
        target: String,
        /// Full effort for the first stage
        #[arg(long)]
        primary: String,
        /// Light effort for the first stage
        #[arg(long)]
        reduced: String,
        /// Bare-minimum effort for the first stage
        #[arg(long)]
        minimal: Option<String>,
    },
    /// List habits with their current stage
    List,
    /// Show the day grid of one stage
    Show {
        /// Habit id or 1-based position
        habit: String,
        /// Stage number (1-based, default: current stage)
        #[arg(long)]
        stage: Option<usize>,
    },
    /// Edit descriptive text of a habit and one of its stages
    Edit {
        /// Habit id or 1-based position
        habit: String,
        /// Stage number to edit (1-based, default: current stage)
        #[arg(long)]
        stage: Option<usize>,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New starting effort
        #[arg(long)]
        starting: Option<String>,
        /// New target effort
        #[arg(long)]
        target: Option<String>,
        /// New full effort for the stage
        #[arg(long)]
        primary: Option<String>,
        /// New light effort for the stage
        #[arg(long)]
        reduced: Option<String>,
        /// New bare-minimum effort for the stage
        #[arg(long, conflicts_with = "clear_minimal")]
        minimal: Option<String>,
        /// Remove the stage's bare-minimum effort
        #[arg(long)]
        clear_minimal: bool,
    },
    /// Delete a habit and all of its history
    Delete {
        /// Habit id or 1-based position
        habit: String,
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;

    match action {
        HabitAction::Add {
            title,
            starting,
            target,
            primary,
            reduced,
            minimal,
        } => {
            let habit = Habit::new(
                HabitDraft {
                    title,
                    starting_commitment: starting,
                    target_commitment: target,
                    primary_commitment: primary,
                    reduced_commitment: reduced,
                    minimal_commitment: minimal,
                },
                session.now,
            )?;
            println!("Habit created: {}", habit.id);
            println!("{}", serde_json::to_string_pretty(&habit)?);
            session.book.add(habit);
            session.save()?;
        }
        HabitAction::List => {
            let summaries: Vec<_> = session
                .book
                .habits()
                .iter()
                .map(|h| session.engine.summary(h, session.now))
                .collect();
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        HabitAction::Show { habit, stage } => {
            let habit = session.book.resolve(&habit)?;
            let stage_index = match stage {
                Some(n) => index_arg("stage", n)?,
                None => habit.current_stage_index(),
            };
            let cells = session.engine.day_cells(habit, stage_index, session.now)?;
            let stage = &habit.stages()[stage_index];
            let view = json!({
                "summary": session.engine.summary(habit, session.now),
                "stage": {
                    "number": stage_index + 1,
                    "id": stage.id,
                    "primaryCommitment": stage.primary_commitment,
                    "reducedCommitment": stage.reduced_commitment,
                    "minimalCommitment": stage.minimal_commitment,
                    "complete": stage.is_complete(),
                    "tally": stage.tally(),
                },
                "cells": cells,
            });
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        HabitAction::Edit {
            habit,
            stage,
            title,
            starting,
            target,
            primary,
            reduced,
            minimal,
            clear_minimal,
        } => {
            let id = session.habit_id(&habit)?;
            let stage_index = match stage {
                Some(n) => index_arg("stage", n)?,
                None => session.book.resolve(&id)?.current_stage_index(),
            };
            let minimal_commitment = match (minimal, clear_minimal) {
                (_, true) => MinimalEdit::Clear,
                (Some(text), false) => MinimalEdit::Set(text),
                (None, false) => MinimalEdit::Keep,
            };
            let edit = HabitEdit {
                title,
                starting_commitment: starting,
                target_commitment: target,
                stage_index,
                primary_commitment: primary,
                reduced_commitment: reduced,
                minimal_commitment,
            };

            let engine = session.engine;
            let updated = session
                .book
                .apply(&id, |h| engine.edit_habit_and_stage(h, edit))?;
            println!("{}", serde_json::to_string_pretty(updated)?);
            session.save()?;
        }
        HabitAction::Delete { habit, yes } => {
            require_yes(yes, "deleting a habit")?;
            let id = session.habit_id(&habit)?;
            let removed = session.book.remove(&id)?;
            session.save()?;
            println!("Habit deleted: {} ({})", removed.title, removed.id);
        }
    }
    Ok(())
}
