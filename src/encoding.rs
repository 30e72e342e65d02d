//! Reusable encodings of scheduling rules as linear constraints.
//!
//! Every conditional rule is reduced to one primitive, [`enforce_if`], which
//! relaxes a linear constraint by a big-M term per unmet condition. `M` is
//! derived from the variable domains so it is as tight as the model allows.

use crate::model::{LinearConstraint, LinearExpr, Literal, Model, Relation, VarId};

/// Exactly one of `vars` is true.
pub fn exactly_one(model: &mut Model, vars: &[VarId]) {
    model.add(LinearConstraint::eq(LinearExpr::sum(vars.iter().copied()), 1));
}

/// At most one of `vars` is true.
pub fn at_most_one(model: &mut Model, vars: &[VarId]) {
    if vars.len() > 1 {
        model.add(LinearConstraint::le(LinearExpr::sum(vars.iter().copied()), 1));
    }
}

/// Fixes an indicator to false.
pub fn forbid(model: &mut Model, var: VarId) {
    model.add(LinearConstraint::eq(LinearExpr::var(var), 0));
}

/// At least one literal holds.
pub fn add_clause(model: &mut Model, lits: &[Literal]) {
    let mut expr = LinearExpr::new();
    for &lit in lits {
        expr.add_literal(lit, 1);
    }
    model.add(LinearConstraint::ge(expr, 1));
}

/// Enforces `constraint` only when every literal in `conditions` holds.
///
/// With no conditions the constraint is added as is. A constraint that
/// already holds over the whole domain is dropped.
pub fn enforce_if(model: &mut Model, constraint: LinearConstraint, conditions: &[Literal]) {
    if conditions.is_empty() {
        model.add(constraint);
        return;
    }
    let LinearConstraint { expr, relation, rhs } = constraint;
    match relation {
        Relation::Le => enforce_le_if(model, expr, rhs, conditions),
        Relation::Ge => enforce_le_if(model, expr.negated(), -rhs, conditions),
        Relation::Eq => {
            enforce_le_if(model, expr.clone(), rhs, conditions);
            enforce_le_if(model, expr.negated(), -rhs, conditions);
        }
    }
}

// expr <= rhs + M * Σ(1 - lit)
fn enforce_le_if(model: &mut Model, expr: LinearExpr, rhs: i64, conditions: &[Literal]) {
    let (_, max) = model.expr_bounds(&expr);
    let big_m = max - rhs;
    if big_m <= 0 {
        return;
    }
    let mut relaxed = expr;
    for &lit in conditions {
        relaxed.add_literal(lit, big_m);
    }
    let k = conditions.len() as i64;
    model.add(LinearConstraint::le(relaxed, rhs + big_m * k));
}

/// `var == Σ value · indicator` over a set of indicators of which exactly one
/// holds, so each indicator pins `var` to its value.
///
/// One equality replaces a pair of big-M rows per indicator. The caller must
/// add the exactly-one constraint over the same indicators.
pub fn link_selection(model: &mut Model, var: VarId, choices: &[(VarId, i64)]) {
    let expr = LinearExpr::weighted(choices.iter().copied()).plus(var, -1);
    model.add(LinearConstraint::eq(expr, 0));
}

/// `aggregate ⇔ OR(children)`.
///
/// True aggregate needs a true child; false aggregate clears every child.
pub fn link_aggregate(model: &mut Model, aggregate: VarId, children: &[VarId]) {
    model.add(LinearConstraint::ge(
        LinearExpr::sum(children.iter().copied()).plus(aggregate, -1),
        0,
    ));
    for &child in children {
        model.add(LinearConstraint::le(
            LinearExpr::var(child).plus(aggregate, -1),
            0,
        ));
    }
}

/// `aggregate ⇒ Σ weight · var >= demand`, vacuous when `aggregate` is false.
pub fn cover_if(model: &mut Model, aggregate: VarId, weighted: &[(VarId, i64)], demand: i64) {
    enforce_if(
        model,
        LinearConstraint::ge(LinearExpr::weighted(weighted.iter().copied()), demand),
        &[Literal::pos(aggregate)],
    );
}

/// An interval `[start, start + duration)` that exists only when `presence` holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionalInterval {
    pub start: VarId,
    pub duration: i64,
    pub presence: Literal,
}

impl OptionalInterval {
    fn end(&self) -> LinearExpr {
        LinearExpr::var(self.start).plus_constant(self.duration)
    }
}

/// `first` ends at or before `second` starts.
fn precedes(first: &OptionalInterval, second: &OptionalInterval) -> LinearConstraint {
    LinearConstraint::le(first.end().plus(second.start, -1), 0)
}

/// Pairwise non-overlap of the intervals that are present.
///
/// Adds one ordering indicator per pair: true means `intervals[i]` runs first.
/// Returns `(i, j, ordering)` for every pair.
pub fn no_overlap(
    model: &mut Model,
    intervals: &[OptionalInterval],
    name: &str,
) -> Vec<(usize, usize, VarId)> {
    let mut orderings = Vec::new();
    for i in 0..intervals.len() {
        for j in (i + 1)..intervals.len() {
            let (a, b) = (&intervals[i], &intervals[j]);
            let order = model.new_bool(format!("{name}_ord_{i}_{j}"));
            enforce_if(
                model,
                precedes(a, b),
                &[a.presence, b.presence, Literal::pos(order)],
            );
            enforce_if(
                model,
                precedes(b, a),
                &[a.presence, b.presence, Literal::neg(order)],
            );
            orderings.push((i, j, order));
        }
    }
    orderings
}

/// When both intervals are present, one must finish before the other starts.
///
/// Returns the two ordering indicators `(a_first, b_first)`.
pub fn separate_if_both(
    model: &mut Model,
    a: &OptionalInterval,
    b: &OptionalInterval,
    name: &str,
) -> (VarId, VarId) {
    let a_first = model.new_bool(format!("{name}_a_first"));
    let b_first = model.new_bool(format!("{name}_b_first"));
    enforce_if(model, precedes(a, b), &[Literal::pos(a_first)]);
    enforce_if(model, precedes(b, a), &[Literal::pos(b_first)]);
    add_clause(
        model,
        &[
            !a.presence,
            !b.presence,
            Literal::pos(a_first),
            Literal::pos(b_first),
        ],
    );
    (a_first, b_first)
}

/// Indicator `ov` with `ov ⇒ a`, `ov ⇒ b` and `(a ∧ b) ⇒ ov`.
pub fn conjunction_indicator(model: &mut Model, a: Literal, b: Literal, name: String) -> VarId {
    let ov = model.new_bool(name);
    for lit in [a, b] {
        let mut expr = LinearExpr::var(ov);
        expr.add_literal(lit, -1);
        model.add(LinearConstraint::le(expr, 0));
    }
    add_clause(model, &[!a, !b, Literal::pos(ov)]);
    ov
}
