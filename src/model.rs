//! Solver-neutral integer linear model.
//!
//! The builder writes scheduling rules into a [`Model`]; a [`crate::solver::Solver`]
//! backend translates it for a concrete engine. Keeping the model owned and
//! inspectable lets a solved point be re-checked against every constraint.

use std::fmt;

/// Dense index of a decision variable inside a [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Binary,
    /// Inclusive bounds.
    Integer { lo: i64, hi: i64 },
}

impl Domain {
    pub fn bounds(self) -> (i64, i64) {
        match self {
            Domain::Binary => (0, 1),
            Domain::Integer { lo, hi } => (lo, hi),
        }
    }

    pub fn contains(self, value: i64) -> bool {
        let (lo, hi) = self.bounds();
        (lo..=hi).contains(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDef {
    pub name: String,
    pub domain: Domain,
}

/// A binary variable or its negation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal {
    var: VarId,
    negated: bool,
}

impl Literal {
    pub fn pos(var: VarId) -> Self {
        Self { var, negated: false }
    }

    pub fn neg(var: VarId) -> Self {
        Self { var, negated: true }
    }

    pub fn value(self, values: &[i64]) -> i64 {
        let v = values[self.var.0];
        if self.negated { 1 - v } else { v }
    }

    pub fn holds(self, values: &[i64]) -> bool {
        self.value(values) == 1
    }
}

impl std::ops::Not for Literal {
    type Output = Literal;

    fn not(self) -> Literal {
        Literal {
            var: self.var,
            negated: !self.negated,
        }
    }
}

impl From<VarId> for Literal {
    fn from(var: VarId) -> Self {
        Literal::pos(var)
    }
}

/// `Σ coef · var + constant` with integer coefficients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearExpr {
    terms: Vec<(VarId, i64)>,
    constant: i64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn var(var: VarId) -> Self {
        Self::new().plus(var, 1)
    }

    /// Unit-weight sum.
    pub fn sum<I: IntoIterator<Item = VarId>>(vars: I) -> Self {
        Self {
            terms: vars.into_iter().map(|v| (v, 1)).collect(),
            constant: 0,
        }
    }

    pub fn weighted<I: IntoIterator<Item = (VarId, i64)>>(terms: I) -> Self {
        Self {
            terms: terms.into_iter().collect(),
            constant: 0,
        }
    }

    pub fn plus(mut self, var: VarId, coef: i64) -> Self {
        self.add_term(var, coef);
        self
    }

    pub fn plus_constant(mut self, value: i64) -> Self {
        self.constant += value;
        self
    }

    pub fn add_term(&mut self, var: VarId, coef: i64) {
        if coef != 0 {
            self.terms.push((var, coef));
        }
    }

    /// Adds `coef · lit`, expanding a negated literal to `coef - coef · var`.
    pub fn add_literal(&mut self, lit: Literal, coef: i64) {
        if lit.negated {
            self.constant += coef;
            self.add_term(lit.var, -coef);
        } else {
            self.add_term(lit.var, coef);
        }
    }

    pub fn negated(mut self) -> Self {
        for (_, coef) in &mut self.terms {
            *coef = -*coef;
        }
        self.constant = -self.constant;
        self
    }

    pub fn terms(&self) -> &[(VarId, i64)] {
        &self.terms
    }

    pub fn constant_term(&self) -> i64 {
        self.constant
    }

    pub fn evaluate(&self, values: &[i64]) -> i64 {
        self.terms
            .iter()
            .map(|&(v, c)| c * values[v.0])
            .sum::<i64>()
            + self.constant
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Le,
    Eq,
    Ge,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Relation::Le => "<=",
            Relation::Eq => "==",
            Relation::Ge => ">=",
        })
    }
}

/// `expr REL rhs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearConstraint {
    pub expr: LinearExpr,
    pub relation: Relation,
    pub rhs: i64,
}

impl LinearConstraint {
    pub fn le(expr: LinearExpr, rhs: i64) -> Self {
        Self {
            expr,
            relation: Relation::Le,
            rhs,
        }
    }

    pub fn eq(expr: LinearExpr, rhs: i64) -> Self {
        Self {
            expr,
            relation: Relation::Eq,
            rhs,
        }
    }

    pub fn ge(expr: LinearExpr, rhs: i64) -> Self {
        Self {
            expr,
            relation: Relation::Ge,
            rhs,
        }
    }

    pub fn is_satisfied(&self, values: &[i64]) -> bool {
        let lhs = self.expr.evaluate(values);
        match self.relation {
            Relation::Le => lhs <= self.rhs,
            Relation::Eq => lhs == self.rhs,
            Relation::Ge => lhs >= self.rhs,
        }
    }
}

/// Variables, constraints and an optional minimised objective.
#[derive(Debug, Clone, Default)]
pub struct Model {
    vars: Vec<VarDef>,
    constraints: Vec<LinearConstraint>,
    objective: Option<LinearExpr>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_bool(&mut self, name: impl Into<String>) -> VarId {
        self.push_var(name.into(), Domain::Binary)
    }

    pub fn new_int(&mut self, name: impl Into<String>, lo: i64, hi: i64) -> VarId {
        debug_assert!(lo <= hi, "empty integer domain");
        self.push_var(name.into(), Domain::Integer { lo, hi })
    }

    fn push_var(&mut self, name: String, domain: Domain) -> VarId {
        self.vars.push(VarDef { name, domain });
        VarId(self.vars.len() - 1)
    }

    pub fn add(&mut self, constraint: LinearConstraint) {
        self.constraints.push(constraint);
    }

    pub fn minimise(&mut self, objective: LinearExpr) {
        self.objective = Some(objective);
    }

    pub fn objective(&self) -> Option<&LinearExpr> {
        self.objective.as_ref()
    }

    pub fn vars(&self) -> &[VarDef] {
        &self.vars
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn domain(&self, var: VarId) -> Domain {
        self.vars[var.0].domain
    }

    pub fn name(&self, var: VarId) -> &str {
        &self.vars[var.0].name
    }

    /// Smallest and largest value `expr` can take over the variable domains.
    pub fn expr_bounds(&self, expr: &LinearExpr) -> (i64, i64) {
        expr.terms.iter().fold(
            (expr.constant, expr.constant),
            |(min, max), &(v, c)| {
                let (lo, hi) = self.domain(v).bounds();
                let (a, b) = (c * lo, c * hi);
                (min + a.min(b), max + a.max(b))
            },
        )
    }

    /// Indices of constraints broken by `values`, plus a domain check.
    pub fn violated_constraints(&self, values: &[i64]) -> Vec<usize> {
        if values.len() != self.vars.len() {
            return (0..self.constraints.len()).collect();
        }
        self.constraints
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_satisfied(values))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn within_domains(&self, values: &[i64]) -> bool {
        values.len() == self.vars.len()
            && self
                .vars
                .iter()
                .zip(values)
                .all(|(def, &v)| def.domain.contains(v))
    }

    /// True when `values` is a feasible point of the model.
    pub fn evaluate(&self, values: &[i64]) -> bool {
        self.within_domains(values) && self.violated_constraints(values).is_empty()
    }

    pub fn objective_value(&self, values: &[i64]) -> Option<i64> {
        self.objective.as_ref().map(|o| o.evaluate(values))
    }

    /// Renders one constraint with variable names, for logging.
    pub fn describe(&self, index: usize) -> String {
        let c = &self.constraints[index];
        let mut out = String::new();
        for (i, &(v, coef)) in c.expr.terms.iter().enumerate() {
            if i > 0 {
                out.push_str(" + ");
            }
            out.push_str(&format!("{coef}*{}", self.name(v)));
        }
        if c.expr.constant != 0 || c.expr.terms.is_empty() {
            out.push_str(&format!(" + {}", c.expr.constant));
        }
        format!("{out} {} {}", c.relation, c.rhs)
    }
}
