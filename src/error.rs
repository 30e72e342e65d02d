//! Error types for the timetable solver.
//!
//! Only rejected input and broken internal invariants are errors. Solver
//! outcomes (infeasible, timed out) are reported through [`crate::data::Status`].

use thiserror::Error;

/// Input that must be rejected before any model is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("duplicate module code: {0}")]
    DuplicateModule(String),

    #[error("duplicate hall name: {0}")]
    DuplicateHall(String),

    #[error("module {0} must have a positive number of students")]
    NonPositiveStudents(String),

    #[error("module {0} must have a positive duration")]
    NonPositiveDuration(String),

    #[error("hall {0} must have a positive capacity")]
    NonPositiveCapacity(String),

    #[error("module {code} lasts {duration} slots but a day only has {slots_per_day}")]
    DurationExceedsDay {
        code: String,
        duration: u32,
        slots_per_day: u32,
    },

    #[error("at least one hall is required")]
    NoHalls,

    #[error("the calendar has no days or no slots")]
    EmptyCalendar,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Top-level error of a timetable run.
#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("rejected input: {0}")]
    Input(#[from] InputError),

    /// A decoded timetable broke a guarantee the model is supposed to enforce.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}
