use std::fs;
use std::path::{Path, PathBuf};

use assert_float_eq::*;
use tempfile::TempDir;

use menu_planner::models::{
    Classification, CostEntry, CostTable, FoodTable, IngredientLine, RecipeRecord, TableKind,
};
use menu_planner::tables::{load_cost_table, load_food_table};
use menu_planner::{MenuError, NutrientKind, NutrientVector, Recipe, RecipeCatalog};

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn record(name: &str, servings: u32, lines: &[(&str, f64)]) -> RecipeRecord {
    RecipeRecord {
        name: name.to_string(),
        servings,
        total_grams: 100.0,
        classification: Classification::new(1, 0, 0),
        ingredients: lines
            .iter()
            .map(|(n, g)| IngredientLine {
                name: n.to_string(),
                grams: *g,
            })
            .collect(),
    }
}

#[test]
fn test_recipe_files_end_to_end() {
    let dir = TempDir::new().unwrap();
    let composition = write(
        dir.path(),
        "composition.csv",
        "tabla,de,composicion\nid,nombre,agua,energia,proteina\n1,egg,75.0,143,12.6\n2,tortilla,45.0,218,5.7\n",
    );
    let costs = write(dir.path(), "costs.csv", "egg,0.30,50\ntortilla,1.20,100\n");
    let huevos = write(
        dir.path(),
        "huevos.csv",
        "porciones,2\ngramos,120\nclasificacion,1,0,0,x\nid,id,gramos,ingrediente\n1,1,50,egg\n",
    );
    let tacos = write(
        dir.path(),
        "tacos.csv",
        "porciones,1\ngramos,150\nclasificacion,0,2,1,x\nid,id,gramos,ingrediente\n1,1,50,egg\n2,2,100,tortilla\n",
    );

    let foods = load_food_table(&composition).unwrap();
    let costs = load_cost_table(&costs).unwrap();
    let catalog = RecipeCatalog::load(&[huevos, tacos], &foods, &costs).unwrap();

    assert_eq!(catalog.len(), 2);
    let huevos = catalog.by_name("huevos").unwrap();
    assert_eq!(huevos.servings, 2);
    assert_eq!(huevos.nutrients[NutrientKind::Energy], 35.75);
    assert_eq!(huevos.cost, 0.15);

    let tacos = catalog.by_name("tacos").unwrap();
    assert_float_absolute_eq!(tacos.nutrients[NutrientKind::Energy], 71.5 + 218.0, 1e-9);
    assert_float_absolute_eq!(tacos.nutrients[NutrientKind::Protein], 6.3 + 5.7, 1e-9);
    assert_eq!(tacos.cost, 1.5);
    assert_eq!(tacos.classification, Classification::new(0, 2, 1));
    assert_eq!(catalog.diagnostics().count(), 0);
}

#[test]
fn test_per_serving_formula() {
    let mut foods = FoodTable::new();
    foods.insert(
        "rice",
        NutrientVector::from_pairs([(NutrientKind::Energy, 360.0), (NutrientKind::Iron, 0.8)]),
    );
    foods.insert("beans", NutrientVector::from_pairs([(NutrientKind::Energy, 340.0)]));

    let recipe = Recipe::new(
        record("rice_and_beans", 4, &[("rice", 200.0), ("beans", 100.0)]),
        &foods,
        &CostTable::new(),
    );

    // Σ value·grams/100 / servings
    assert_float_absolute_eq!(
        recipe.nutrients[NutrientKind::Energy],
        (360.0 * 2.0 + 340.0) / 4.0,
        1e-9
    );
    assert_float_absolute_eq!(recipe.nutrients[NutrientKind::Iron], 0.4, 1e-12);
    assert_eq!(recipe.nutrients[NutrientKind::Water], 0.0);
}

#[test]
fn test_cost_is_independent_of_ingredient_order() {
    let mut costs = CostTable::new();
    costs.insert("a", CostEntry::new(0.1, 100.0));
    costs.insert("b", CostEntry::new(0.2, 100.0));
    costs.insert("c", CostEntry::new(0.7, 100.0));
    let foods = FoodTable::new();

    let forward = Recipe::new(
        record("x", 3, &[("a", 70.0), ("b", 110.0), ("c", 33.0)]),
        &foods,
        &costs,
    );
    let backward = Recipe::new(
        record("x", 3, &[("c", 33.0), ("b", 110.0), ("a", 70.0)]),
        &foods,
        &costs,
    );
    assert_eq!(forward.cost.to_bits(), backward.cost.to_bits());
}

#[test]
fn test_cost_rounds_to_cents() {
    let mut costs = CostTable::new();
    costs.insert("flour", CostEntry::new(1.0, 100.0));

    let recipe = Recipe::new(record("bread", 3, &[("flour", 100.0)]), &FoodTable::new(), &costs);
    assert_eq!(recipe.cost, 0.33);
}

#[test]
fn test_unknown_ingredients_yield_zeros_and_diagnostics() {
    let recipe = Recipe::new(
        record("mystery", 2, &[("x", 10.0), ("y", 20.0), ("z", 30.0)]),
        &FoodTable::new(),
        &CostTable::new(),
    );

    assert!(recipe.nutrients.is_zero());
    assert_eq!(recipe.cost, 0.0);
    assert_eq!(recipe.diagnostics.len(), 6);
    let cost_misses = recipe
        .diagnostics
        .iter()
        .filter(|d| d.table == TableKind::Cost)
        .count();
    assert_eq!(cost_misses, 3);
}

#[test]
fn test_subset_totals() {
    let mut foods = FoodTable::new();
    foods.insert("egg", NutrientVector::from_pairs([(NutrientKind::Energy, 100.0)]));
    let costs = CostTable::new();
    let catalog = RecipeCatalog::build(
        vec![
            record("one", 1, &[("egg", 100.0)]),
            record("two", 1, &[("egg", 200.0)]),
            record("three", 1, &[("egg", 300.0)]),
        ],
        &foods,
        &costs,
    )
    .unwrap();

    let totals = catalog.total_nutrients(&["one", "three"]).unwrap();
    assert_eq!(totals[NutrientKind::Energy], 400.0);

    assert!(catalog.total_nutrients::<&str>(&[]).unwrap().is_zero());
    assert!(matches!(
        catalog.total_nutrients(&["one", "four"]),
        Err(MenuError::UnknownRecipe(name)) if name == "four"
    ));
}

#[test]
fn test_duplicate_recipe_names_rejected() {
    let foods = FoodTable::new();
    let costs = CostTable::new();
    let result = RecipeCatalog::build(
        vec![record("soup", 1, &[]), record("soup", 2, &[])],
        &foods,
        &costs,
    );
    assert!(matches!(result, Err(MenuError::DuplicateRecipe(name)) if name == "soup"));
}

#[test]
fn test_unreadable_recipe_fails_whole_load() {
    let dir = TempDir::new().unwrap();
    let good = write(
        dir.path(),
        "good.csv",
        "p,1\ng,100\nc,1,0,0,x\nh\n1,1,10,egg\n",
    );
    let missing = dir.path().join("missing.csv");

    let result = RecipeCatalog::load(&[good, missing], &FoodTable::new(), &CostTable::new());
    assert!(matches!(result, Err(MenuError::Io(_))));
}
