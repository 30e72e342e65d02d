//! End-to-end run: validate, build, solve, decode.

use crate::builder::ModelBuilder;
use crate::config::{ConfigOverrides, SolverConfig};
use crate::data::{Hall, Module, Status, TimetableResult, Variant};
use crate::decode::{Decoder, expand_slots};
use crate::diagnostics;
use crate::error::TimetableError;
use crate::solver::{HighsSolver, SolveOptions, SolveStatus, Solver};
use crate::validate::validate_input;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Everything a caller supplies for one run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableRequest {
    pub variant: Variant,
    pub modules: Vec<Module>,
    pub halls: Vec<Hall>,
    #[serde(default)]
    pub config: ConfigOverrides,
}

impl TimetableRequest {
    pub fn config(&self) -> SolverConfig {
        SolverConfig::for_variant(self.variant).with_overrides(self.config.clone())
    }
}

/// Solves `request` with HiGHS.
pub fn solve_timetable(request: &TimetableRequest) -> Result<TimetableResult, TimetableError> {
    solve_with(
        &HighsSolver,
        request.variant,
        &request.modules,
        &request.halls,
        &request.config(),
    )
}

/// Runs the whole pipeline against any [`Solver`].
///
/// Input violations are errors; every solver outcome, including a time-out,
/// comes back as a [`TimetableResult`] status.
pub fn solve_with<S: Solver>(
    solver: &S,
    variant: Variant,
    modules: &[Module],
    halls: &[Hall],
    config: &SolverConfig,
) -> Result<TimetableResult, TimetableError> {
    config.validate()?;
    let calendar = config.calendar();
    validate_input(modules, halls, &calendar, variant)?;

    let diag = diagnostics::compute(modules, halls, &calendar, variant);
    diagnostics::report(&diag, variant);

    if modules.is_empty() {
        info!("Nothing to schedule.");
        let mut result = TimetableResult::empty(Status::Optimal);
        result.diagnostics = Some(diag);
        return Ok(result);
    }

    let built = ModelBuilder::new(modules, halls, &calendar, variant).build();
    let outcome = solver.solve(&built.model, &SolveOptions::from(config));

    // a time-limited point is only trusted once it passes every constraint
    let (status, values) = match (outcome.status, outcome.values) {
        (SolveStatus::Feasible, Some(values)) if !built.model.evaluate(&values) => {
            let violated = built.model.violated_constraints(&values);
            warn!(
                "Time-limited point violates {} constraint(s); reporting no solution.",
                violated.len()
            );
            if let Some(&first) = violated.first() {
                debug!("First violated constraint: {}", built.model.describe(first));
            }
            (SolveStatus::Unknown, None)
        }
        (status, Some(values)) if status.has_solution() => (status, Some(values)),
        (status, _) if status.has_solution() => (SolveStatus::Unknown, None),
        (status, _) => (status, None),
    };

    let mut result = match values {
        Some(values) => {
            let timetable = Decoder::new(&built.index, modules, halls, &calendar).decode(&values)?;
            let expanded_slots = match variant {
                Variant::DurationClass => expand_slots(&timetable),
                _ => Vec::new(),
            };
            let mut result = TimetableResult::empty(outward_status(status));
            result.objective = built.model.objective_value(&values);
            result.timetable = timetable;
            result.expanded_slots = expanded_slots;
            result
        }
        None => {
            let mut result = TimetableResult::empty(Status::NoSolution);
            result.reason = Some(no_solution_reason(status).to_string());
            result
        }
    };
    info!(
        "Run finished: {} with {} entries in {:.2?}.",
        result.status,
        result.timetable.len(),
        outcome.elapsed
    );
    result.diagnostics = Some(diag);
    Ok(result)
}

fn outward_status(status: SolveStatus) -> Status {
    match status {
        SolveStatus::Optimal => Status::Optimal,
        SolveStatus::Feasible => Status::Feasible,
        SolveStatus::Infeasible | SolveStatus::Unknown => Status::NoSolution,
    }
}

fn no_solution_reason(status: SolveStatus) -> &'static str {
    match status {
        SolveStatus::Infeasible => "infeasible",
        _ => "unknown",
    }
}
