pub mod food;
pub mod menu;
pub mod nutrient;
pub mod recipe;

pub use food::{CostEntry, CostTable, FoodItem, FoodTable, Table};
pub use menu::{Classification, MealSlot, MealType, MenuOption};
pub use nutrient::{NutrientKind, NutrientVector};
pub use recipe::{round_to, IngredientLine, MissingReference, Recipe, RecipeRecord, TableKind};
