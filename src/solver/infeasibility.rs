use log::{debug, info};

use super::{SolveResult, Solver};
use crate::error::Result;
use crate::planner::{
    BoundSide, Constraint, ConstraintKind, DecisionSubject, LinearExpr, OptimizationModel,
    Variable, SLACK_THRESHOLD, VIOLATION_TOLERANCE,
};

/// What the relaxed model optimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelaxMode {
    /// Minimize total violation only.
    #[default]
    ViolationOnly,
    /// Minimize total violation, then the original objective among the
    /// least-violating solutions.
    ThenObjective,
}

/// A constraint side the relaxed solution violates.
#[derive(Debug, Clone, PartialEq)]
pub struct Slack {
    pub constraint: usize,
    pub name: String,
    pub side: BoundSide,
    pub amount: f64,
}

#[derive(Debug, Clone)]
pub struct Relaxation {
    /// The relaxed model: original variables first, then one slack per
    /// finite constraint side.
    pub model: OptimizationModel,
    pub result: SolveResult,
    /// Minimal total violation, when the relaxed model solved.
    pub violation: Option<f64>,
    /// Original objective at the relaxed solution.
    pub objective: Option<f64>,
    pub slacks: Vec<Slack>,
    original_vars: usize,
}

impl Relaxation {
    pub fn is_solved(&self) -> bool {
        self.result.is_optimal()
    }

    /// Values of the original model's variables.
    pub fn original_values(&self) -> &[f64] {
        let values = self.result.values();
        &values[..self.original_vars.min(values.len())]
    }
}

/// Deletion filter: drop each constraint in turn and keep it dropped when
/// the rest is still infeasible. The constraints left form an irreducible
/// infeasible subset. A trial that ends in any status other than
/// infeasible keeps its constraint.
pub(crate) fn deletion_filter<S: Solver + ?Sized>(
    solver: &S,
    model: &OptimizationModel,
) -> Result<Option<Vec<usize>>> {
    if !solver.solve(model)?.is_infeasible() {
        return Ok(None);
    }

    let mut kept: Vec<usize> = (0..model.constraints.len()).collect();
    for candidate in 0..model.constraints.len() {
        let trial: Vec<usize> = kept.iter().copied().filter(|&i| i != candidate).collect();
        if solver.solve(&model.with_constraints(&trial))?.is_infeasible() {
            debug!(
                "Constraint {} not needed for infeasibility",
                model.constraints[candidate].name
            );
            kept = trial;
        }
    }

    info!(
        "Irreducible infeasible subset of '{}': {} of {} constraints",
        model.name,
        kept.len(),
        model.constraints.len()
    );
    Ok(Some(kept))
}

/// Copy of `model` with a non-negative slack on every finite constraint
/// side and the total slack as objective. Variable bounds are not relaxed.
pub(crate) fn relaxed_model(model: &OptimizationModel) -> OptimizationModel {
    let mut relaxed = OptimizationModel::new(format!("{}_relaxed", model.name));
    relaxed.variables = model.variables.clone();
    relaxed.constraints = model.constraints.clone();

    for (ci, c) in model.constraints.iter().enumerate() {
        for (side, present, coef) in [
            (BoundSide::Lower, c.has_lower(), 1.0),
            (BoundSide::Upper, c.has_upper(), -1.0),
        ] {
            if !present {
                continue;
            }
            let v = relaxed.add_variable(Variable::continuous(
                format!("slack_{}_{}", c.name, side),
                DecisionSubject::Slack { constraint: ci, side },
            ));
            relaxed.constraints[ci].expr.add_term(v, coef);
            relaxed.objective.add_term(v, 1.0);
        }
    }
    relaxed
}

pub(crate) fn relax<S: Solver + ?Sized>(
    solver: &S,
    model: &OptimizationModel,
    mode: RelaxMode,
) -> Result<Relaxation> {
    let original_vars = model.variables.len();
    let mut relaxed = relaxed_model(model);
    let first = solver.solve(&relaxed)?;

    let Some(violation) = first.objective().filter(|_| first.is_optimal()) else {
        return Ok(Relaxation {
            model: relaxed,
            result: first,
            violation: None,
            objective: None,
            slacks: Vec::new(),
            original_vars,
        });
    };

    let result = match mode {
        RelaxMode::ViolationOnly => first,
        RelaxMode::ThenObjective => {
            let mut total = LinearExpr::new();
            for v in original_vars..relaxed.variables.len() {
                total.add_term(v, 1.0);
            }
            relaxed.add_constraint(Constraint {
                name: "total_violation".to_string(),
                kind: ConstraintKind::TotalViolation,
                expr: total,
                lower: f64::NEG_INFINITY,
                upper: violation + VIOLATION_TOLERANCE * violation.abs().max(1.0),
            });
            relaxed.objective = model.objective.clone();
            solver.solve(&relaxed)?
        }
    };

    let slacks = collect_slacks(model, &relaxed, &result);
    let objective = result
        .is_optimal()
        .then(|| model.objective.evaluate(&result.values()[..original_vars]));

    info!(
        "Relaxed '{}': total violation {:.6}, {} violated sides",
        model.name,
        violation,
        slacks.len()
    );
    Ok(Relaxation {
        model: relaxed,
        result,
        violation: Some(violation),
        objective,
        slacks,
        original_vars,
    })
}

fn collect_slacks(
    model: &OptimizationModel,
    relaxed: &OptimizationModel,
    result: &SolveResult,
) -> Vec<Slack> {
    relaxed
        .variables
        .iter()
        .zip(result.values())
        .filter_map(|(var, &amount)| match var.subject {
            DecisionSubject::Slack { constraint, side } if amount > SLACK_THRESHOLD => Some(Slack {
                constraint,
                name: model.constraints[constraint].name.clone(),
                side,
                amount,
            }),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NutrientKind;
    use crate::planner::VarDomain;

    #[test]
    fn test_relaxed_model_adds_slack_per_finite_side() {
        let mut m = OptimizationModel::new("m");
        let x = m.add_variable(Variable::binary("x".into(), DecisionSubject::Recipe(0)));
        let mut e = LinearExpr::new();
        e.add_term(x, 10.0);
        m.add_constraint(Constraint {
            name: "energy".into(),
            kind: ConstraintKind::Nutrient(NutrientKind::Energy),
            expr: e.clone(),
            lower: 20.0,
            upper: 30.0,
        });
        m.add_constraint(Constraint {
            name: "sodium".into(),
            kind: ConstraintKind::Nutrient(NutrientKind::Sodium),
            expr: e,
            lower: f64::NEG_INFINITY,
            upper: 5.0,
        });

        let r = relaxed_model(&m);
        assert_eq!(r.variables.len(), 4);
        assert_eq!(r.variables[0].domain, VarDomain::Binary);
        let names: Vec<&str> = r.variables[1..].iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["slack_energy_min", "slack_energy_max", "slack_sodium_max"]);

        assert_eq!(r.constraints[0].expr.coefficient(1), 1.0);
        assert_eq!(r.constraints[0].expr.coefficient(2), -1.0);
        assert_eq!(r.constraints[1].expr.coefficient(3), -1.0);
        assert_eq!(r.objective.terms, vec![(1, 1.0), (2, 1.0), (3, 1.0)]);
        // original left untouched
        assert_eq!(m.variables.len(), 1);
    }
}
