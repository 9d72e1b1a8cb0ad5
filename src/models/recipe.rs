use std::fmt;

use log::warn;
use serde::Serialize;

use crate::models::{Classification, CostTable, FoodItem, FoodTable, NutrientVector};

/// Round to `decimals` places, half away from zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// One ingredient row of a recipe source.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientLine {
    pub name: String,
    pub grams: f64,
}

/// A parsed recipe source, before any table lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeRecord {
    pub name: String,
    pub servings: u32,
    pub total_grams: f64,
    pub classification: Classification,
    pub ingredients: Vec<IngredientLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Composition,
    Cost,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Composition => f.write_str("composition"),
            TableKind::Cost => f.write_str("cost"),
        }
    }
}

/// An ingredient a recipe uses that a table does not list. It contributes
/// zero to that table's sum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingReference {
    pub recipe: String,
    pub ingredient: String,
    pub table: TableKind,
    /// Closest name the table does list, if any is similar.
    pub suggestion: Option<String>,
}

impl fmt::Display for MissingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: no {} entry for '{}'",
            self.recipe, self.table, self.ingredient
        )?;
        if let Some(s) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", s)?;
        }
        Ok(())
    }
}

/// A dish with its per-serving nutrients and cost.
#[derive(Debug, Clone, Serialize)]
pub struct Recipe {
    pub name: String,
    pub servings: u32,
    pub total_grams: f64,
    pub classification: Classification,
    /// Grams used per ingredient, in first-appearance order, unique names.
    pub ingredients: Vec<(String, f64)>,
    /// Per serving.
    pub nutrients: NutrientVector,
    /// Per serving, rounded to cents.
    pub cost: f64,
    pub diagnostics: Vec<MissingReference>,
}

impl Recipe {
    /// Resolve every ingredient against both tables.
    ///
    /// Never fails: an ingredient a table does not list adds nothing to that
    /// table's sum and produces one [`MissingReference`].
    pub fn new(record: RecipeRecord, foods: &FoodTable, costs: &CostTable) -> Self {
        let ingredients = merge_ingredient_lines(&record.name, record.ingredients);
        let servings = f64::from(record.servings);

        let mut nutrients = NutrientVector::zero();
        let mut diagnostics = Vec::new();
        let mut cost_terms: Vec<(&str, f64)> = Vec::with_capacity(ingredients.len());

        for (name, grams) in &ingredients {
            let item = FoodItem::resolve(name, foods, costs);

            match item.nutrients {
                Some(per_100g) => {
                    for (kind, value) in per_100g.iter() {
                        nutrients[kind] += value * grams / 100.0 / servings;
                    }
                }
                None => diagnostics.push(missing(
                    &record.name,
                    name,
                    TableKind::Composition,
                    foods.closest_name(name),
                )),
            }

            match item.cost {
                Some(entry) => cost_terms.push((name.as_str(), entry.cost_of(*grams) / servings)),
                None => diagnostics.push(missing(
                    &record.name,
                    name,
                    TableKind::Cost,
                    costs.closest_name(name),
                )),
            }
        }

        // Summed by name so the total does not depend on row order.
        cost_terms.sort_by(|a, b| a.0.cmp(b.0));
        let cost = round_to(cost_terms.iter().map(|(_, c)| c).sum(), 2);

        Self {
            name: record.name,
            servings: record.servings,
            total_grams: record.total_grams,
            classification: record.classification,
            ingredients,
            nutrients,
            cost,
            diagnostics,
        }
    }

    pub fn grams_of(&self, ingredient: &str) -> Option<f64> {
        self.ingredients
            .iter()
            .find(|(name, _)| name == ingredient)
            .map(|(_, grams)| *grams)
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "servings: {}", self.servings)?;
        writeln!(f)?;
        for (name, grams) in &self.ingredients {
            writeln!(f, "{}g ... {}", grams, name)?;
        }
        writeln!(f)?;
        writeln!(f, "grams: {}", self.total_grams)?;
        write!(f, "classification: {}", self.classification)
    }
}

fn missing(recipe: &str, ingredient: &str, table: TableKind, suggestion: Option<&str>) -> MissingReference {
    warn!("{}: ingredient '{}' not found in {} table", recipe, ingredient, table);
    MissingReference {
        recipe: recipe.to_string(),
        ingredient: ingredient.to_string(),
        table,
        suggestion: suggestion.map(str::to_string),
    }
}

/// Collapse repeated ingredient names: the later row's grams win, the first
/// row's position is kept.
fn merge_ingredient_lines(recipe: &str, lines: Vec<IngredientLine>) -> Vec<(String, f64)> {
    let mut merged: Vec<(String, f64)> = Vec::with_capacity(lines.len());
    for line in lines {
        match merged.iter_mut().find(|(name, _)| *name == line.name) {
            Some(existing) => {
                warn!(
                    "{}: ingredient '{}' listed twice, using {} g",
                    recipe, line.name, line.grams
                );
                existing.1 = line.grams;
            }
            None => merged.push((line.name, line.grams)),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CostEntry, NutrientKind};

    fn line(name: &str, grams: f64) -> IngredientLine {
        IngredientLine {
            name: name.to_string(),
            grams,
        }
    }

    fn record(servings: u32, ingredients: Vec<IngredientLine>) -> RecipeRecord {
        RecipeRecord {
            name: "omelette".to_string(),
            servings,
            total_grams: 120.0,
            classification: Classification::new(1, 0, 0),
            ingredients,
        }
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.154, 2), 0.15);
        assert_eq!(round_to(0.156, 2), 0.16);
        assert_eq!(round_to(2.0, 2), 2.0);
    }

    #[test]
    fn test_egg_energy_and_cost() {
        let mut foods = FoodTable::new();
        foods.insert(
            "egg",
            NutrientVector::from_pairs([(NutrientKind::Energy, 143.0)]),
        );
        let mut costs = CostTable::new();
        costs.insert("egg", CostEntry::new(0.30, 50.0));

        let recipe = Recipe::new(record(2, vec![line("egg", 50.0)]), &foods, &costs);

        assert_eq!(recipe.nutrients[NutrientKind::Energy], 35.75);
        assert_eq!(recipe.cost, 0.15);
        assert!(recipe.diagnostics.is_empty());
    }

    #[test]
    fn test_duplicate_ingredient_last_row_wins() {
        let recipe = Recipe::new(
            record(1, vec![line("egg", 50.0), line("milk", 30.0), line("egg", 70.0)]),
            &FoodTable::new(),
            &CostTable::new(),
        );
        assert_eq!(
            recipe.ingredients,
            vec![("egg".to_string(), 70.0), ("milk".to_string(), 30.0)]
        );
        assert_eq!(recipe.grams_of("egg"), Some(70.0));
    }

    #[test]
    fn test_missing_reference_carries_suggestion() {
        let mut foods = FoodTable::new();
        foods.insert("Huevo", NutrientVector::zero());
        let recipe = Recipe::new(record(1, vec![line("huevos", 50.0)]), &foods, &CostTable::new());

        let composition = recipe
            .diagnostics
            .iter()
            .find(|d| d.table == TableKind::Composition)
            .unwrap();
        assert_eq!(composition.suggestion.as_deref(), Some("Huevo"));
        assert!(composition.to_string().contains("did you mean 'Huevo'"));
    }

    #[test]
    fn test_display() {
        let recipe = Recipe::new(
            record(2, vec![line("egg", 50.0)]),
            &FoodTable::new(),
            &CostTable::new(),
        );
        let text = recipe.to_string();
        assert!(text.starts_with("omelette\nservings: 2\n"));
        assert!(text.contains("50g ... egg"));
        assert!(text.ends_with("classification: [1, 0, 0]"));
    }
}
