//! Solver port.
//!
//! The planner only builds models; anything implementing [`Solver`] can
//! solve them. Infeasibility analysis is written once on top of
//! [`Solver::solve`], so every backend gets it.

mod infeasibility;
mod microlp;

pub use infeasibility::{RelaxMode, Relaxation, Slack};
pub use microlp::MicroLpSolver;

use std::fmt;

use crate::error::Result;
use crate::planner::OptimizationModel;

#[derive(Debug, Clone, PartialEq)]
pub enum SolveStatus {
    Optimal,
    Infeasible,
    Unbounded,
    /// Any other backend outcome, with its reason.
    Other(String),
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => f.write_str("OPTIMAL"),
            SolveStatus::Infeasible => f.write_str("INFEASIBLE"),
            SolveStatus::Unbounded => f.write_str("UNBOUNDED"),
            SolveStatus::Other(reason) => write!(f, "OTHER ({})", reason),
        }
    }
}

/// Outcome of one solve. Objective and values exist only when optimal.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    status: SolveStatus,
    objective: Option<f64>,
    values: Vec<f64>,
}

impl SolveResult {
    pub fn optimal(objective: f64, values: Vec<f64>) -> Self {
        Self {
            status: SolveStatus::Optimal,
            objective: Some(objective),
            values,
        }
    }

    pub fn without_solution(status: SolveStatus) -> Self {
        Self {
            status,
            objective: None,
            values: Vec::new(),
        }
    }

    pub fn status(&self) -> &SolveStatus {
        &self.status
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }

    pub fn is_infeasible(&self) -> bool {
        self.status == SolveStatus::Infeasible
    }

    pub fn objective(&self) -> Option<f64> {
        self.objective
    }

    /// One value per model variable; empty unless optimal.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn value(&self, var: usize) -> Option<f64> {
        self.values.get(var).copied()
    }
}

/// An LP/MIP backend.
///
/// Calls are synchronous and never retried. A backend error that is not a
/// solve outcome (the model cannot be handed over at all) is returned as
/// [`crate::error::MenuError::Solver`].
pub trait Solver {
    fn name(&self) -> &'static str;

    fn solve(&self, model: &OptimizationModel) -> Result<SolveResult>;

    /// Indices of an irreducible infeasible subset of `model.constraints`,
    /// or `None` when the model is not infeasible.
    fn infeasible_subset(&self, model: &OptimizationModel) -> Result<Option<Vec<usize>>> {
        infeasibility::deletion_filter(self, model)
    }

    /// Solve a copy of `model` where every finite constraint side may be
    /// violated at unit cost.
    fn relax(&self, model: &OptimizationModel, mode: RelaxMode) -> Result<Relaxation> {
        infeasibility::relax(self, model, mode)
    }
}
