use good_lp::solvers::microlp::microlp;
use good_lp::{
    constraint, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
    Variable as LpVariable,
};
use log::debug;

use super::{SolveResult, SolveStatus, Solver};
use crate::error::{MenuError, Result};
use crate::planner::{LinearExpr, OptimizationModel, VarDomain};

/// Pure-Rust LP/MIP backend through `good_lp`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpSolver;

impl MicroLpSolver {
    pub fn new() -> Self {
        Self
    }
}

fn to_expression(expr: &LinearExpr, vars: &[LpVariable]) -> Expression {
    let mut out = Expression::default();
    for &(i, coef) in &expr.terms {
        out += vars[i] * coef;
    }
    out
}

impl Solver for MicroLpSolver {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&self, model: &OptimizationModel) -> Result<SolveResult> {
        if let Some(what) = model.find_non_finite() {
            return Err(MenuError::Solver(format!(
                "model '{}' has a non-finite value in {}",
                model.name, what
            )));
        }

        // Term-free rows never reach the backend.
        for c in model.constraints.iter().filter(|c| c.expr.is_constant()) {
            if !c.is_satisfied(&[], 0.0) {
                debug!("Constraint {} has no terms and is violated", c.name);
                return Ok(SolveResult::without_solution(SolveStatus::Infeasible));
            }
        }
        if model.variables.is_empty() {
            return Ok(SolveResult::optimal(model.objective.constant, Vec::new()));
        }

        let mut problem = ProblemVariables::new();
        let vars: Vec<LpVariable> = model
            .variables
            .iter()
            .map(|v| {
                let mut def = variable();
                match v.domain {
                    VarDomain::Binary => def = def.binary(),
                    VarDomain::Continuous => {
                        if v.lower.is_finite() {
                            def = def.min(v.lower);
                        }
                        if v.upper.is_finite() {
                            def = def.max(v.upper);
                        }
                    }
                }
                problem.add(def)
            })
            .collect();

        let objective = to_expression(&model.objective, &vars);
        let mut lp = problem.minimise(objective).using(microlp);
        for c in model.constraints.iter().filter(|c| !c.expr.is_constant()) {
            let lhs = to_expression(&c.expr, &vars);
            if c.has_lower() {
                lp = lp.with(constraint::geq(lhs.clone(), c.lower - c.expr.constant));
            }
            if c.has_upper() {
                lp = lp.with(constraint::leq(lhs, c.upper - c.expr.constant));
            }
        }

        debug!(
            "Solving '{}' with {} variables and {} constraints",
            model.name,
            vars.len(),
            model.constraints.len()
        );
        match lp.solve() {
            Ok(solution) => {
                let values: Vec<f64> = vars.iter().map(|&v| solution.value(v)).collect();
                let objective = model.objective.evaluate(&values);
                Ok(SolveResult::optimal(objective, values))
            }
            Err(ResolutionError::Infeasible) => {
                Ok(SolveResult::without_solution(SolveStatus::Infeasible))
            }
            Err(ResolutionError::Unbounded) => {
                Ok(SolveResult::without_solution(SolveStatus::Unbounded))
            }
            Err(other) => Ok(SolveResult::without_solution(SolveStatus::Other(
                other.to_string(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NutrientKind;
    use crate::planner::{Constraint, ConstraintKind, DecisionSubject, Variable};
    use assert_float_eq::*;

    fn band(name: &str, expr: LinearExpr, lower: f64, upper: f64) -> Constraint {
        Constraint {
            name: name.into(),
            kind: ConstraintKind::Nutrient(NutrientKind::Energy),
            expr,
            lower,
            upper,
        }
    }

    #[test]
    fn test_continuous_minimum() {
        let mut m = OptimizationModel::new("lp");
        let x = m.add_variable(Variable::continuous("x".into(), DecisionSubject::Recipe(0)));
        let y = m.add_variable(Variable::continuous("y".into(), DecisionSubject::Recipe(1)));
        m.objective.add_term(x, 2.0);
        m.objective.add_term(y, 3.0);
        let mut e = LinearExpr::new();
        e.add_term(x, 1.0);
        e.add_term(y, 1.0);
        m.add_constraint(band("energy", e, 4.0, f64::INFINITY));

        let r = MicroLpSolver.solve(&m).unwrap();
        assert!(r.is_optimal());
        assert_float_absolute_eq!(r.objective().unwrap(), 8.0, 1e-6);
        assert_float_absolute_eq!(r.values()[0], 4.0, 1e-6);
    }

    #[test]
    fn test_term_free_violated_row_is_infeasible() {
        let mut m = OptimizationModel::new("empty");
        m.add_constraint(band("energy", LinearExpr::new(), 10.0, 20.0));
        let r = MicroLpSolver.solve(&m).unwrap();
        assert!(r.is_infeasible());
    }

    #[test]
    fn test_no_variables_returns_constant() {
        let mut m = OptimizationModel::new("const");
        m.objective = LinearExpr::constant(7.5);
        let r = MicroLpSolver.solve(&m).unwrap();
        assert!(r.is_optimal());
        assert_eq!(r.objective(), Some(7.5));
        assert!(r.values().is_empty());
    }

    #[test]
    fn test_non_finite_coefficient_is_an_error() {
        let mut m = OptimizationModel::new("nan");
        let x = m.add_variable(Variable::continuous("x".into(), DecisionSubject::Recipe(0)));
        m.objective.add_term(x, f64::NAN);
        assert!(matches!(MicroLpSolver.solve(&m), Err(MenuError::Solver(_))));
    }
}
