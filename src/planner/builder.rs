use std::collections::HashSet;

use clap::ValueEnum;
use log::debug;

use crate::catalog::RecipeCatalog;
use crate::error::Result;
use crate::models::{MealSlot, NutrientKind, Recipe};
use crate::planner::classifier::{classify, Menu};
use crate::planner::constants::{DECISION_PREFIX, SLOT_PREFIX};
use crate::planner::guidelines::{GuidelineTable, TargetIntakeTable};
use crate::planner::model::{
    sanitize_name, Constraint, ConstraintKind, DecisionSubject, LinearExpr, OptimizationModel,
    VarDomain, Variable,
};

/// What one decision variable stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    PerRecipe,
    PerMenuOption,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveKind {
    /// Total cost of the selection.
    Cost,
    /// `Σ_k (target[k] − achieved[k])`, unclamped.
    Deficit,
}

/// Knobs shared by every model variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub name: String,
    pub granularity: Granularity,
    pub domain: VarDomain,
    pub objective: ObjectiveKind,
    /// Guideline band constraint per nutrient.
    pub nutrient_bands: bool,
    /// At most one selection per meal slot.
    pub slot_cardinality: bool,
}

/// The four standard models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelVariant {
    /// Continuous quantity per recipe, minimum cost within the guideline.
    Lp,
    /// Whole recipes in or out, minimum cost within the guideline.
    Mip,
    /// One pick per slot at most, minimum cost within the guideline.
    Slots,
    /// One pick per slot at most, minimum total shortfall against targets.
    Deficit,
}

impl ModelVariant {
    pub fn config(self) -> ModelConfig {
        match self {
            ModelVariant::Lp => ModelConfig {
                name: "diet".to_string(),
                granularity: Granularity::PerRecipe,
                domain: VarDomain::Continuous,
                objective: ObjectiveKind::Cost,
                nutrient_bands: true,
                slot_cardinality: false,
            },
            ModelVariant::Mip => ModelConfig {
                name: "menu_selection".to_string(),
                granularity: Granularity::PerRecipe,
                domain: VarDomain::Binary,
                objective: ObjectiveKind::Cost,
                nutrient_bands: true,
                slot_cardinality: false,
            },
            ModelVariant::Slots => ModelConfig {
                name: "menu_slots".to_string(),
                granularity: Granularity::PerMenuOption,
                domain: VarDomain::Binary,
                objective: ObjectiveKind::Cost,
                nutrient_bands: true,
                slot_cardinality: true,
            },
            ModelVariant::Deficit => ModelConfig {
                name: "menu_deficit".to_string(),
                granularity: Granularity::PerMenuOption,
                domain: VarDomain::Binary,
                objective: ObjectiveKind::Deficit,
                nutrient_bands: false,
                slot_cardinality: true,
            },
        }
    }
}

/// Assembles models from a catalog. Never solves.
#[derive(Debug, Clone, Copy)]
pub struct ModelBuilder<'a> {
    catalog: &'a RecipeCatalog,
    guidelines: &'a GuidelineTable,
    targets: &'a TargetIntakeTable,
}

/// One variable before naming.
struct Decision<'a> {
    recipe: &'a Recipe,
    subject: DecisionSubject,
    slots: Vec<MealSlot>,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(
        catalog: &'a RecipeCatalog,
        guidelines: &'a GuidelineTable,
        targets: &'a TargetIntakeTable,
    ) -> Self {
        Self {
            catalog,
            guidelines,
            targets,
        }
    }

    pub fn build_variant(&self, variant: ModelVariant) -> Result<OptimizationModel> {
        self.build(&variant.config())
    }

    /// Build a model, classifying the catalog when the configuration needs
    /// slots.
    pub fn build(&self, config: &ModelConfig) -> Result<OptimizationModel> {
        let needs_menu =
            config.granularity == Granularity::PerMenuOption || config.slot_cardinality;
        if needs_menu {
            let menu = classify(self.catalog)?;
            self.build_from_menu(&menu, config)
        } else {
            Ok(self.assemble(self.recipe_decisions(None), config))
        }
    }

    /// Build a model from an already classified catalog.
    pub fn build_from_menu(&self, menu: &Menu, config: &ModelConfig) -> Result<OptimizationModel> {
        let decisions = match config.granularity {
            Granularity::PerRecipe => self.recipe_decisions(Some(menu)),
            Granularity::PerMenuOption => self.option_decisions(menu),
        };
        Ok(self.assemble(decisions, config))
    }

    fn recipe_decisions(&self, menu: Option<&Menu>) -> Vec<Decision<'a>> {
        self.catalog
            .iter()
            .enumerate()
            .map(|(i, recipe)| Decision {
                recipe,
                subject: DecisionSubject::Recipe(i),
                slots: menu
                    .map(|m| {
                        m.options()
                            .iter()
                            .filter(|o| o.recipe == i)
                            .map(|o| o.slot)
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect()
    }

    fn option_decisions(&self, menu: &Menu) -> Vec<Decision<'a>> {
        menu.options()
            .iter()
            .filter_map(|o| {
                self.catalog.get(o.recipe).map(|recipe| Decision {
                    recipe,
                    subject: DecisionSubject::Option(*o),
                    slots: vec![o.slot],
                })
            })
            .collect()
    }

    fn assemble(&self, decisions: Vec<Decision<'a>>, config: &ModelConfig) -> OptimizationModel {
        let mut model = OptimizationModel::new(config.name.clone());
        let mut taken = HashSet::new();

        for d in &decisions {
            let base = match d.subject {
                DecisionSubject::Option(o) => format!("{}_{}_{}", DECISION_PREFIX, d.recipe.name, o.slot),
                _ => format!("{}_{}", DECISION_PREFIX, d.recipe.name),
            };
            let name = unique_name(&mut taken, sanitize_name(&base));
            let variable = match config.domain {
                VarDomain::Continuous => Variable::continuous(name, d.subject),
                VarDomain::Binary => Variable::binary(name, d.subject),
            };
            model.add_variable(variable);
        }

        model.objective = match config.objective {
            ObjectiveKind::Cost => {
                let mut e = LinearExpr::new();
                for (v, d) in decisions.iter().enumerate() {
                    e.add_term(v, d.recipe.cost);
                }
                e
            }
            ObjectiveKind::Deficit => self.deficit_objective(&decisions),
        };

        if config.nutrient_bands {
            for (kind, bound) in self.guidelines.iter() {
                let mut expr = LinearExpr::new();
                for (v, d) in decisions.iter().enumerate() {
                    expr.add_term(v, d.recipe.nutrients[kind]);
                }
                model.add_constraint(Constraint {
                    name: kind.name().to_string(),
                    kind: ConstraintKind::Nutrient(kind),
                    expr,
                    lower: bound.min,
                    upper: bound.max,
                });
            }
        }

        if config.slot_cardinality {
            for slot in MealSlot::all() {
                let mut expr = LinearExpr::new();
                for (v, d) in decisions.iter().enumerate() {
                    if d.slots.contains(&slot) {
                        expr.add_term(v, 1.0);
                    }
                }
                model.add_constraint(Constraint {
                    name: format!("{}_{}", SLOT_PREFIX, slot),
                    kind: ConstraintKind::SlotCardinality(slot),
                    expr,
                    lower: f64::NEG_INFINITY,
                    upper: 1.0,
                });
            }
        }

        debug!(
            "Built model '{}': {} variables, {} constraints",
            model.name,
            model.variables.len(),
            model.constraints.len()
        );
        model
    }

    /// `Σ_k target[k] − Σ_v (Σ_k nutrients[v,k])·x[v]` over nutrients with
    /// a target. Surplus on one nutrient offsets shortfall on another.
    fn deficit_objective(&self, decisions: &[Decision<'_>]) -> LinearExpr {
        let targeted: Vec<NutrientKind> = self.targets.iter().map(|(k, _)| k).collect();
        let mut e = LinearExpr::constant(self.targets.total());
        for (v, d) in decisions.iter().enumerate() {
            let achieved: f64 = targeted.iter().map(|&k| d.recipe.nutrients[k]).sum();
            e.add_term(v, -achieved);
        }
        e
    }
}

fn unique_name(taken: &mut HashSet<String>, base: String) -> String {
    let mut name = base.clone();
    let mut n = 2;
    while taken.contains(&name) {
        name = format!("{}_{}", base, n);
        n += 1;
    }
    taken.insert(name.clone());
    name
}
