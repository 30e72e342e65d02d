use crate::data::{Calendar, Variant};
use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const WEEK: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub const DEFAULT_TIME_BUDGET_SECONDS: f64 = 60.0;
pub const DEFAULT_WORKER_COUNT: u32 = 8;

/// Resolved parameters of one run.
///
/// Callers send a [`ConfigOverrides`]; missing fields fall back to the
/// defaults of the selected [`Variant`] (see [`SolverConfig::for_variant`]).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverConfig {
    pub days: Vec<String>,
    pub slots_per_day: u32,
    pub time_budget_seconds: f64,
    pub worker_count: u32,
}

/// Partial config as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    pub days: Option<Vec<String>>,
    pub slots_per_day: Option<u32>,
    pub time_budget_seconds: Option<f64>,
    pub worker_count: Option<u32>,
}

impl SolverConfig {
    /// Exams run over two weeks with a morning and an afternoon sitting;
    /// classes over one week of eight slots.
    pub fn for_variant(variant: Variant) -> Self {
        let (days, slots_per_day) = if variant.is_exam() {
            let two_weeks: Vec<String> = WEEK
                .iter()
                .map(|d| d.to_string())
                .chain(WEEK.iter().map(|d| format!("{d}2")))
                .collect();
            (two_weeks, 2)
        } else {
            (WEEK.iter().map(|d| d.to_string()).collect::<Vec<_>>(), 8)
        };
        Self {
            days,
            slots_per_day,
            time_budget_seconds: DEFAULT_TIME_BUDGET_SECONDS,
            worker_count: DEFAULT_WORKER_COUNT,
        }
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(days) = overrides.days {
            self.days = days;
        }
        if let Some(slots) = overrides.slots_per_day {
            self.slots_per_day = slots;
        }
        if let Some(budget) = overrides.time_budget_seconds {
            self.time_budget_seconds = budget;
        }
        if let Some(workers) = overrides.worker_count {
            self.worker_count = workers;
        }
        self
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if self.days.is_empty() || self.slots_per_day == 0 {
            return Err(InputError::EmptyCalendar);
        }
        let mut seen = HashSet::new();
        for day in &self.days {
            if !seen.insert(day.as_str()) {
                return Err(InputError::InvalidConfig(format!("duplicate day label {day}")));
            }
        }
        if !self.time_budget_seconds.is_finite() || self.time_budget_seconds <= 0.0 {
            return Err(InputError::InvalidConfig(format!(
                "time budget must be a positive number of seconds, got {}",
                self.time_budget_seconds
            )));
        }
        if self.worker_count == 0 {
            return Err(InputError::InvalidConfig("worker count must be positive".into()));
        }
        Ok(())
    }

    pub fn calendar(&self) -> Calendar {
        Calendar::new(self.days.clone(), self.slots_per_day)
    }
}
