use std::collections::HashMap;
use std::path::Path;

use log::info;

use crate::error::{MenuError, Result};
use crate::models::{CostTable, FoodTable, MissingReference, NutrientVector, Recipe, RecipeRecord};
use crate::tables::load_recipe_record;

/// Ordered, name-unique collection of recipes.
#[derive(Debug, Clone, Default)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
    by_name: HashMap<String, usize>,
}

impl RecipeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from already constructed recipes.
    pub fn from_recipes(recipes: Vec<Recipe>) -> Result<Self> {
        let mut catalog = Self::new();
        for recipe in recipes {
            catalog.push(recipe)?;
        }
        Ok(catalog)
    }

    /// Construct every recipe against the tables.
    pub fn build<I>(records: I, foods: &FoodTable, costs: &CostTable) -> Result<Self>
    where
        I: IntoIterator<Item = RecipeRecord>,
    {
        let mut catalog = Self::new();
        for record in records {
            catalog.push(Recipe::new(record, foods, costs))?;
        }
        info!(
            "Built catalog of {} recipes ({} missing references)",
            catalog.len(),
            catalog.diagnostics().count()
        );
        Ok(catalog)
    }

    /// Read and construct the recipe at each path.
    ///
    /// Any unreadable source fails the whole load.
    pub fn load<P: AsRef<Path>>(paths: &[P], foods: &FoodTable, costs: &CostTable) -> Result<Self> {
        let records = paths
            .iter()
            .map(|p| load_recipe_record(p))
            .collect::<Result<Vec<_>>>()?;
        Self::build(records, foods, costs)
    }

    /// Append a recipe; names must be unique.
    pub fn push(&mut self, recipe: Recipe) -> Result<usize> {
        if self.by_name.contains_key(&recipe.name) {
            return Err(MenuError::DuplicateRecipe(recipe.name));
        }
        let index = self.recipes.len();
        self.by_name.insert(recipe.name.clone(), index);
        self.recipes.push(recipe);
        Ok(index)
    }

    pub fn get(&self, index: usize) -> Option<&Recipe> {
        self.recipes.get(index)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&Recipe> {
        self.position(name).map(|i| &self.recipes[i])
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recipe> {
        self.recipes.iter()
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Every missing-reference diagnostic, in recipe order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &MissingReference> {
        self.recipes.iter().flat_map(|r| r.diagnostics.iter())
    }

    /// Per-serving nutrients summed over the recipes at `indices`.
    /// Out-of-range indices are skipped.
    pub fn sum_nutrients(&self, indices: &[usize]) -> NutrientVector {
        indices
            .iter()
            .filter_map(|&i| self.recipes.get(i))
            .map(|r| &r.nutrients)
            .sum()
    }

    /// Per-serving nutrients summed over recipes named in `names`.
    pub fn total_nutrients<S: AsRef<str>>(&self, names: &[S]) -> Result<NutrientVector> {
        let indices = names
            .iter()
            .map(|n| {
                self.position(n.as_ref())
                    .ok_or_else(|| MenuError::UnknownRecipe(n.as_ref().to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self.sum_nutrients(&indices))
    }
}

impl<'a> IntoIterator for &'a RecipeCatalog {
    type Item = &'a Recipe;
    type IntoIter = std::slice::Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.recipes.iter()
    }
}
