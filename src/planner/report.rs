use crate::catalog::RecipeCatalog;
use crate::models::{MealSlot, NutrientVector};
use crate::planner::constants::SELECTION_THRESHOLD;
use crate::planner::model::OptimizationModel;

/// One recipe the solution uses.
#[derive(Debug, Clone, PartialEq)]
pub struct Pick {
    pub variable: String,
    pub recipe: String,
    pub slot: Option<MealSlot>,
    /// Servings for continuous models, 1 for a binary selection.
    pub amount: f64,
    pub cost: f64,
}

/// A solved plan mapped back to recipes.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanReport {
    pub model: String,
    pub objective: f64,
    pub picks: Vec<Pick>,
    /// Σ nutrients × amount over the picks.
    pub nutrients: NutrientVector,
    /// Σ cost × amount over the picks.
    pub cost: f64,
}

impl PlanReport {
    /// Collect every recipe variable whose value exceeds
    /// [`SELECTION_THRESHOLD`]. Slack variables are ignored.
    pub fn new(
        model: &OptimizationModel,
        catalog: &RecipeCatalog,
        objective: f64,
        values: &[f64],
    ) -> Self {
        let mut picks = Vec::new();
        let mut nutrients = NutrientVector::zero();
        let mut cost = 0.0;

        for (var, &amount) in model.variables.iter().zip(values) {
            if amount <= SELECTION_THRESHOLD {
                continue;
            }
            let Some(recipe) = var.subject.recipe().and_then(|r| catalog.get(r)) else {
                continue;
            };
            for (kind, value) in recipe.nutrients.iter() {
                nutrients[kind] += value * amount;
            }
            cost += recipe.cost * amount;
            picks.push(Pick {
                variable: var.name.clone(),
                recipe: recipe.name.clone(),
                slot: var.subject.slot(),
                amount,
                cost: recipe.cost,
            });
        }

        Self {
            model: model.name.clone(),
            objective,
            picks,
            nutrients,
            cost,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }
}
