//! Declarative linear model handed to a solver.
//!
//! The model is always a minimization. Variables are referenced by their
//! position in [`OptimizationModel::variables`].

use std::fmt;

use crate::models::{MealSlot, MenuOption, NutrientKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarDomain {
    Continuous,
    Binary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSide {
    Lower,
    Upper,
}

impl fmt::Display for BoundSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundSide::Lower => f.write_str("min"),
            BoundSide::Upper => f.write_str("max"),
        }
    }
}

/// What a variable decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionSubject {
    /// Quantity or inclusion of a catalog recipe.
    Recipe(usize),
    /// Selection of a recipe in one slot.
    Option(MenuOption),
    /// Violation of one side of a constraint in a relaxed model.
    Slack { constraint: usize, side: BoundSide },
}

impl DecisionSubject {
    /// Catalog position of the recipe behind this decision.
    pub fn recipe(&self) -> Option<usize> {
        match self {
            DecisionSubject::Recipe(r) => Some(*r),
            DecisionSubject::Option(o) => Some(o.recipe),
            DecisionSubject::Slack { .. } => None,
        }
    }

    pub fn slot(&self) -> Option<MealSlot> {
        match self {
            DecisionSubject::Option(o) => Some(o.slot),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub domain: VarDomain,
    pub lower: f64,
    pub upper: f64,
    pub subject: DecisionSubject,
}

impl Variable {
    pub fn continuous(name: String, subject: DecisionSubject) -> Self {
        Self {
            name,
            domain: VarDomain::Continuous,
            lower: 0.0,
            upper: f64::INFINITY,
            subject,
        }
    }

    pub fn binary(name: String, subject: DecisionSubject) -> Self {
        Self {
            name,
            domain: VarDomain::Binary,
            lower: 0.0,
            upper: 1.0,
            subject,
        }
    }
}

/// `Σ coef·x[var] + constant`. Terms are unique per variable and kept in
/// insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinearExpr {
    pub terms: Vec<(usize, f64)>,
    pub constant: f64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn constant(value: f64) -> Self {
        Self {
            terms: Vec::new(),
            constant: value,
        }
    }

    /// Add `coef·x[var]`, merging with an existing term. Zero coefficients
    /// are dropped.
    pub fn add_term(&mut self, var: usize, coef: f64) {
        if coef == 0.0 {
            return;
        }
        match self.terms.iter_mut().find(|(v, _)| *v == var) {
            Some(term) => term.1 += coef,
            None => self.terms.push((var, coef)),
        }
    }

    pub fn coefficient(&self, var: usize) -> f64 {
        self.terms
            .iter()
            .find(|(v, _)| *v == var)
            .map(|(_, c)| *c)
            .unwrap_or(0.0)
    }

    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    /// Value of the expression at `values`; missing variables count as 0.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(v, c)| c * values.get(v).copied().unwrap_or(0.0))
            .sum::<f64>()
            + self.constant
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Guideline band on one nutrient.
    Nutrient(NutrientKind),
    /// At most one selection in a slot.
    SlotCardinality(MealSlot),
    /// Cap on total slack in the second relaxation phase.
    TotalViolation,
}

/// `lower ≤ expr ≤ upper`; an infinite side is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub name: String,
    pub kind: ConstraintKind,
    pub expr: LinearExpr,
    pub lower: f64,
    pub upper: f64,
}

impl Constraint {
    pub fn has_lower(&self) -> bool {
        self.lower.is_finite()
    }

    pub fn has_upper(&self) -> bool {
        self.upper.is_finite()
    }

    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let v = self.expr.evaluate(values);
        v >= self.lower - tolerance && v <= self.upper + tolerance
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationModel {
    pub name: String,
    pub variables: Vec<Variable>,
    /// Minimized.
    pub objective: LinearExpr,
    pub constraints: Vec<Constraint>,
}

impl OptimizationModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            objective: LinearExpr::new(),
            constraints: Vec::new(),
        }
    }

    /// Append a variable and return its index.
    pub fn add_variable(&mut self, variable: Variable) -> usize {
        self.variables.push(variable);
        self.variables.len() - 1
    }

    pub fn add_constraint(&mut self, constraint: Constraint) -> usize {
        self.constraints.push(constraint);
        self.constraints.len() - 1
    }

    pub fn is_mip(&self) -> bool {
        self.variables.iter().any(|v| v.domain == VarDomain::Binary)
    }

    pub fn constraint_named(&self, name: &str) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    pub fn variable_named(&self, name: &str) -> Option<usize> {
        self.variables.iter().position(|v| v.name == name)
    }

    /// Same variables and objective, only the constraints at `keep`.
    pub fn with_constraints(&self, keep: &[usize]) -> Self {
        Self {
            name: self.name.clone(),
            variables: self.variables.clone(),
            objective: self.objective.clone(),
            constraints: keep
                .iter()
                .filter_map(|&i| self.constraints.get(i).cloned())
                .collect(),
        }
    }

    /// First coefficient, bound or constant that is NaN or infinite where a
    /// finite number is required.
    pub fn find_non_finite(&self) -> Option<String> {
        let bad_expr = |e: &LinearExpr| {
            !e.constant.is_finite() || e.terms.iter().any(|(_, c)| !c.is_finite())
        };
        if bad_expr(&self.objective) {
            return Some("objective".to_string());
        }
        for c in &self.constraints {
            if bad_expr(&c.expr) || c.lower.is_nan() || c.upper.is_nan() {
                return Some(format!("constraint {}", c.name));
            }
        }
        self.variables
            .iter()
            .find(|v| !v.lower.is_finite() || v.upper.is_nan())
            .map(|v| format!("variable {}", v.name))
    }
}

/// Restrict `raw` to the LP-format identifier alphabet.
pub fn sanitize_name(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
