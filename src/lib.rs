//! Conflict-free exam and class timetabling as an integer program.
//!
//! Modules are placed on a (day, slot) grid across halls under capacity and
//! no-double-booking rules. Three model shapes are supported, see
//! [`data::Variant`]. The model is solved with HiGHS and decoded back into one
//! [`data::TimetableEntry`] per module.

pub mod builder;
pub mod config;
pub mod data;
pub mod decode;
pub mod diagnostics;
pub mod encoding;
pub mod error;
pub mod model;
pub mod server;
pub mod solver;
pub mod timetable;
pub mod validate;

pub use data::{Calendar, Hall, Module, Status, TimetableEntry, TimetableResult, Variant};
pub use error::{InputError, TimetableError};
pub use timetable::{TimetableRequest, solve_timetable, solve_with};
