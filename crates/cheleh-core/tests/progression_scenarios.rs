//! Multi-day scenarios driven through the habit book with a frozen clock.

use chrono::{TimeZone, Utc};
use cheleh_core::{
    Calendar, Clock, Commitments, CoreError, DayStatus, FixedClock, Habit, HabitBook, HabitDraft,
    ProgressionEngine, ProgressionError, STAGE_LENGTH,
};

fn engine() -> ProgressionEngine {
    ProgressionEngine::with_calendar(Calendar::utc())
}

fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2024, 1, 15, 21, 30, 0).unwrap())
}

fn draft() -> HabitDraft {
    HabitDraft {
        title: "Read".into(),
        starting_commitment: "1 page".into(),
        target_commitment: "1 chapter".into(),
        primary_commitment: "10 pages".into(),
        reduced_commitment: "5 pages".into(),
        minimal_commitment: Some("1 page".into()),
    }
}

fn next_commitments() -> Commitments {
    Commitments::new("20 pages", "10 pages", None)
}

/// Mark today's slot, then advance the clock one day.
fn mark_today(book: &mut HabitBook, id: &str, clock: &mut FixedClock, status: DayStatus) {
    let engine = engine();
    let now = clock.now();
    let (stage, day) = engine
        .today_slot(book.get(id).unwrap(), now)
        .expect("today has a stage");
    book.apply(id, |h| engine.set_day_status(h, stage, day, status, now))
        .unwrap();
    clock.advance_days(1);
}

#[test]
fn forty_consecutive_days_complete_a_stage() {
    let engine = engine();
    let mut clock = clock();
    let habit = Habit::new(draft(), clock.now()).unwrap();
    let id = habit.id.clone();
    let mut book = HabitBook::new(vec![habit]);

    for day in 0..STAGE_LENGTH {
        let h = book.get(&id).unwrap();
        assert!(!h.current_stage().is_complete(), "complete early at day {day}");
        assert_eq!(engine.current_global_day(h, clock.now()), day);
        let status = DayStatus::MARKS[day % 3];
        let now = clock.now();
        book.apply(&id, |h| engine.set_day_status(h, 0, day, status, now))
            .unwrap();
        if day + 1 < STAGE_LENGTH {
            clock.advance_days(1);
        }
    }

    let now = clock.now();
    let h = book.get(&id).unwrap();
    assert!(h.current_stage().is_complete());
    assert_eq!(ProgressionEngine::stage_progress_percent(h), 100);
    assert_eq!(engine.current_global_day(h, now), 39);

    book.apply(&id, |h| engine.add_stage(h, next_commitments()))
        .unwrap();
    let h = book.get(&id).unwrap();
    assert_eq!(h.stages().len(), 2);
    assert_eq!(ProgressionEngine::current_stage_index(h), 1);
    assert!(!engine.can_edit(h, 1, 0, now));

    clock.advance_days(1);
    assert!(engine.can_edit(book.get(&id).unwrap(), 1, 0, clock.now()));
}

#[test]
fn add_stage_is_refused_until_the_last_day_is_marked() {
    let engine = engine();
    let mut clock = clock();
    let habit = Habit::new(draft(), clock.now()).unwrap();
    let id = habit.id.clone();
    let mut book = HabitBook::new(vec![habit]);

    for _ in 0..STAGE_LENGTH - 1 {
        mark_today(&mut book, &id, &mut clock, DayStatus::Standard);
    }

    let before = book.get(&id).unwrap().clone();
    let err = book
        .apply(&id, |h| engine.add_stage(h, next_commitments()))
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::Progression(ProgressionError::StageIncomplete { filled: 39, .. })
    ));
    assert_eq!(book.get(&id).unwrap(), &before);

    mark_today(&mut book, &id, &mut clock, DayStatus::Special);
    assert!(book
        .apply(&id, |h| engine.add_stage(h, next_commitments()))
        .is_ok());
}

#[test]
fn defeat_after_two_full_stages_and_a_partial_one() {
    let engine = engine();
    let mut clock = clock();
    let habit = Habit::new(draft(), clock.now()).unwrap();
    let first_stage_id = habit.stages()[0].id.clone();
    let id = habit.id.clone();
    let mut book = HabitBook::new(vec![habit]);

    for stage in 0..2 {
        for _ in 0..STAGE_LENGTH {
            mark_today(&mut book, &id, &mut clock, DayStatus::Standard);
        }
        assert!(book.get(&id).unwrap().stages()[stage].is_complete());
        book.apply(&id, |h| engine.add_stage(h, next_commitments()))
            .unwrap();
    }
    for _ in 0..12 {
        mark_today(&mut book, &id, &mut clock, DayStatus::Emergency);
    }

    let h = book.get(&id).unwrap();
    assert_eq!(h.stages().len(), 3);
    assert_eq!(h.marked_count(), 92);

    let reset_at = clock.now();
    book.apply(&id, |h| {
        Ok::<_, ProgressionError>(engine.reset_on_defeat(h, reset_at))
    })
    .unwrap();

    let h = book.get(&id).unwrap();
    assert_eq!(h.stages().len(), 1);
    assert_eq!(h.stages()[0].id, first_stage_id);
    assert!(h.stages()[0].days.iter().all(|d| !d.is_set()));
    assert_eq!(h.start_date, reset_at);
    assert_eq!(engine.current_global_day(h, reset_at), 0);
    assert!(engine.can_edit(h, 0, 0, reset_at));
    assert!(!engine.can_edit(h, 0, 1, reset_at));
}

#[test]
fn missed_days_stay_editable_until_a_later_day_is_marked() {
    let engine = engine();
    let mut clock = clock();
    let habit = Habit::new(draft(), clock.now()).unwrap();
    let id = habit.id.clone();
    let mut book = HabitBook::new(vec![habit]);

    mark_today(&mut book, &id, &mut clock, DayStatus::Standard);
    clock.advance_days(2);
    let now = clock.now();
    let h = book.get(&id).unwrap();
    assert_eq!(engine.current_global_day(h, now), 3);
    assert!(engine.can_edit(h, 0, 1, now));
    assert!(engine.can_edit(h, 0, 2, now));

    book.apply(&id, |h| engine.set_day_status(h, 0, 3, DayStatus::Special, now))
        .unwrap();
    let h = book.get(&id).unwrap();
    assert!(!engine.can_edit(h, 0, 1, now));
    assert!(!engine.can_edit(h, 0, 2, now));
    assert!(engine.can_edit(h, 0, 3, now));

    let summary = engine.summary(h, now);
    assert_eq!(summary.filled, 1);
    assert_eq!(summary.progress_percent, 3);
    assert!(!summary.stage_complete);
    assert_eq!(h.stages()[0].marked_count(), 2);
}

#[test]
fn edits_to_different_habits_are_independent() {
    let engine = engine();
    let clock = clock();
    let now = clock.now();
    let a = Habit::new(draft(), now).unwrap();
    let b = Habit::new(draft(), now).unwrap();
    let (a_id, b_id) = (a.id.clone(), b.id.clone());
    let mut book = HabitBook::new(vec![a, b]);

    book.apply(&a_id, |h| engine.set_day_status(h, 0, 0, DayStatus::Standard, now))
        .unwrap();
    assert_eq!(book.get(&a_id).unwrap().marked_count(), 1);
    assert_eq!(book.get(&b_id).unwrap().marked_count(), 0);
}
