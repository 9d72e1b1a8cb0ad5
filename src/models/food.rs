use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::models::NutrientVector;

/// Minimum Jaro-Winkler score for a key to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Price of one purchase unit and the grams that unit weighs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostEntry {
    pub unit_price: f64,
    pub reference_grams: f64,
}

impl CostEntry {
    pub fn new(unit_price: f64, reference_grams: f64) -> Self {
        Self {
            unit_price,
            reference_grams,
        }
    }

    /// Cost of `grams` of this ingredient.
    #[inline]
    pub fn cost_of(&self, grams: f64) -> f64 {
        self.unit_price * grams / self.reference_grams
    }
}

/// Ingredient-keyed table. Keys are exact ingredient names.
#[derive(Debug, Clone)]
pub struct Table<V> {
    rows: HashMap<String, V>,
}

/// Nutrients per 100 g, keyed by ingredient.
pub type FoodTable = Table<NutrientVector>;

/// Purchase cost, keyed by ingredient.
pub type CostTable = Table<CostEntry>;

impl<V> Default for Table<V> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
        }
    }
}

impl<V> Table<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: V) -> Option<V> {
        self.rows.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.rows.get(name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Closest key by case-insensitive Jaro-Winkler similarity.
    pub fn closest_name(&self, name: &str) -> Option<&str> {
        let wanted = name.to_lowercase();
        self.rows
            .keys()
            .map(|k| (k, jaro_winkler(&k.to_lowercase(), &wanted)))
            .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
            .max_by(|a, b| {
                a.1.partial_cmp(&b.1)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| b.0.cmp(a.0))
            })
            .map(|(k, _)| k.as_str())
    }
}

impl<V> FromIterator<(String, V)> for Table<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut table = Table::new();
        for (name, value) in iter {
            table.insert(name, value);
        }
        table
    }
}

/// An ingredient as seen by both tables. Either side may be missing.
#[derive(Debug, Clone, Copy)]
pub struct FoodItem<'a> {
    pub name: &'a str,
    pub nutrients: Option<&'a NutrientVector>,
    pub cost: Option<&'a CostEntry>,
}

impl<'a> FoodItem<'a> {
    pub fn resolve(name: &'a str, foods: &'a FoodTable, costs: &'a CostTable) -> Self {
        Self {
            name,
            nutrients: foods.get(name),
            cost: costs.get(name),
        }
    }
}
