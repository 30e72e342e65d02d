use crate::config::SolverConfig;
use crate::model::{Domain, LinearConstraint, LinearExpr, Model, Relation};
use good_lp::solvers::SolutionStatus;
use good_lp::{
    Expression, ProblemVariables, ResolutionError, Solution, SolverModel, Variable, constraint,
    default_solver, variable,
};
use log::{info, trace, warn};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

/// Knobs handed to the backend for one blocking solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOptions {
    pub time_budget_seconds: f64,
    pub worker_count: u32,
    pub random_seed: i32,
}

impl From<&SolverConfig> for SolveOptions {
    fn from(config: &SolverConfig) -> Self {
        Self {
            time_budget_seconds: config.time_budget_seconds,
            worker_count: config.worker_count,
            random_seed: 1234,
        }
    }
}

/// Terminal state of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Proven optimal (or, without an objective, any feasible point).
    Optimal,
    /// A feasible point found before the budget ran out, optimality unproven.
    Feasible,
    /// Proven to have no feasible point.
    Infeasible,
    /// No feasible point and no proof either way.
    Unknown,
}

impl SolveStatus {
    pub fn has_solution(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    /// Integer value of every model variable, indexed by `VarId`.
    pub values: Option<Vec<i64>>,
    pub elapsed: Duration,
}

impl SolveOutcome {
    pub fn without_solution(status: SolveStatus, elapsed: Duration) -> Self {
        Self {
            status,
            values: None,
            elapsed,
        }
    }
}

/// A backend able to solve a [`Model`]. Blocks until done or out of budget.
pub trait Solver {
    fn solve(&self, model: &Model, options: &SolveOptions) -> SolveOutcome;
}

/// HiGHS through `good_lp`.
///
/// HiGHS starts one thread scheduler per process and refuses a later solve
/// asking for a different thread count, so the first solve pins it.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighsSolver;

static HIGHS_THREADS: OnceLock<u32> = OnceLock::new();

/// Thread count to hand HiGHS: the first request wins, later ones are clamped.
fn pin_threads(pinned: &OnceLock<u32>, requested: u32) -> u32 {
    let threads = *pinned.get_or_init(|| requested);
    if threads != requested {
        warn!(
            "HiGHS is already running with {} thread(s); ignoring a request for {}.",
            threads, requested
        );
    }
    threads
}

impl Solver for HighsSolver {
    fn solve(&self, model: &Model, options: &SolveOptions) -> SolveOutcome {
        let start_time = Instant::now();
        let threads = pin_threads(&HIGHS_THREADS, options.worker_count);
        let mut problem = ProblemVariables::new();
        let vars: Vec<Variable> = model
            .vars()
            .iter()
            .map(|def| match def.domain {
                Domain::Binary => problem.add(variable().binary().name(def.name.clone())),
                Domain::Integer { lo, hi } => problem.add(
                    variable()
                        .integer()
                        .min(lo as f64)
                        .max(hi as f64)
                        .name(def.name.clone()),
                ),
            })
            .collect();

        let objective = model
            .objective()
            .map(|o| to_expression(o, &vars))
            .unwrap_or_else(|| to_expression(&LinearExpr::new(), &vars));

        let mut solver_model = problem
            .minimise(objective)
            .using(default_solver)
            .set_option("threads", threads as i32)
            .set_option("time_limit", options.time_budget_seconds)
            .set_option("random_seed", options.random_seed)
            .set_option("log_to_console", "false");

        for c in model.constraints() {
            solver_model.add_constraint(to_constraint(c, &vars));
        }

        info!(
            "Starting HiGHS on {} variables and {} constraints (budget {:.1}s, {} workers)...",
            model.num_vars(),
            model.num_constraints(),
            options.time_budget_seconds,
            threads
        );
        let solution = match solver_model.solve() {
            Ok(s) => s,
            Err(ResolutionError::Infeasible) => {
                info!("Model proven infeasible in {:.2?}", start_time.elapsed());
                return SolveOutcome::without_solution(
                    SolveStatus::Infeasible,
                    start_time.elapsed(),
                );
            }
            Err(e) => {
                warn!("Solver stopped without a solution: {}", e);
                return SolveOutcome::without_solution(SolveStatus::Unknown, start_time.elapsed());
            }
        };

        let status = match solution.status() {
            SolutionStatus::Optimal => SolveStatus::Optimal,
            _ => SolveStatus::Feasible,
        };
        let values = vars
            .iter()
            .map(|v| solution.value(*v).round() as i64)
            .collect();
        let elapsed = start_time.elapsed();
        info!("Solver finished with {:?} in {:.2?}", status, elapsed);
        trace!("Solution read back for {} variables.", vars.len());

        SolveOutcome {
            status,
            values: Some(values),
            elapsed,
        }
    }
}

fn to_expression(expr: &LinearExpr, vars: &[Variable]) -> Expression {
    let linear: Expression = expr
        .terms()
        .iter()
        .map(|&(v, coef)| coef as f64 * Expression::from(vars[v.index()]))
        .sum();
    linear + expr.constant_term() as f64
}

fn to_constraint(c: &LinearConstraint, vars: &[Variable]) -> good_lp::Constraint {
    let lhs = to_expression(&c.expr, vars);
    let rhs = c.rhs as f64;
    match c.relation {
        Relation::Le => constraint!(lhs <= rhs),
        Relation::Eq => constraint!(lhs == rhs),
        Relation::Ge => constraint!(lhs >= rhs),
    }
}
