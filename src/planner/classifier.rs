use std::collections::BTreeMap;

use log::debug;

use crate::catalog::RecipeCatalog;
use crate::error::Result;
use crate::models::{MealSlot, MenuOption};

/// Recipes partitioned into the 14 meal slots.
#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    /// Recipe order, then meal order within a recipe.
    options: Vec<MenuOption>,
    /// Every slot is present, possibly empty.
    by_slot: BTreeMap<MealSlot, Vec<usize>>,
}

impl Menu {
    pub fn options(&self) -> &[MenuOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Options bound to `slot`, in recipe order.
    pub fn in_slot(&self, slot: MealSlot) -> impl Iterator<Item = &MenuOption> {
        self.by_slot
            .get(&slot)
            .into_iter()
            .flatten()
            .map(|&i| &self.options[i])
    }

    /// `(slot, options)` for all 14 slots in label order.
    pub fn slots(&self) -> impl Iterator<Item = (MealSlot, Vec<&MenuOption>)> {
        self.by_slot
            .iter()
            .map(|(slot, idx)| (*slot, idx.iter().map(|&i| &self.options[i]).collect()))
    }
}

/// Emit one option per nonzero classification index of every recipe.
///
/// A recipe classified `(2, 0, 1)` becomes an option in `b2` and one in
/// `d1`. An index past the meal's slot count fails the whole menu.
pub fn classify(catalog: &RecipeCatalog) -> Result<Menu> {
    let mut options = Vec::new();
    let mut by_slot: BTreeMap<MealSlot, Vec<usize>> =
        MealSlot::all().map(|slot| (slot, Vec::new())).collect();

    for (recipe, r) in catalog.iter().enumerate() {
        for slot in r.classification.slots(&r.name)? {
            by_slot.entry(slot).or_default().push(options.len());
            options.push(MenuOption { recipe, slot });
        }
    }

    debug!(
        "Classified {} recipes into {} menu options",
        catalog.len(),
        options.len()
    );
    Ok(Menu { options, by_slot })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MenuError;
    use crate::models::{Classification, CostTable, FoodTable, MealType, RecipeRecord};

    fn catalog(classes: &[(&str, Classification)]) -> RecipeCatalog {
        let records = classes.iter().map(|(name, c)| RecipeRecord {
            name: name.to_string(),
            servings: 1,
            total_grams: 100.0,
            classification: *c,
            ingredients: Vec::new(),
        });
        RecipeCatalog::build(records, &FoodTable::new(), &CostTable::new()).unwrap()
    }

    fn slot(meal: MealType, position: u8) -> MealSlot {
        MealSlot::new(meal, position).unwrap()
    }

    #[test]
    fn test_option_counts() {
        let menu = classify(&catalog(&[
            ("agua", Classification::new(0, 0, 0)),
            ("molletes", Classification::new(1, 2, 0)),
        ]))
        .unwrap();

        assert_eq!(menu.len(), 2);
        assert_eq!(
            menu.options(),
            &[
                MenuOption {
                    recipe: 1,
                    slot: slot(MealType::Breakfast, 1)
                },
                MenuOption {
                    recipe: 1,
                    slot: slot(MealType::Lunch, 2)
                },
            ]
        );
    }

    #[test]
    fn test_every_slot_present() {
        let menu = classify(&catalog(&[("sopa", Classification::new(0, 1, 1))])).unwrap();
        assert_eq!(menu.slots().count(), MealSlot::COUNT);
        assert_eq!(menu.in_slot(slot(MealType::Lunch, 1)).count(), 1);
        assert_eq!(menu.in_slot(slot(MealType::Breakfast, 1)).count(), 0);
    }

    #[test]
    fn test_slot_keeps_recipe_order() {
        let menu = classify(&catalog(&[
            ("a", Classification::new(3, 0, 0)),
            ("b", Classification::new(3, 0, 0)),
            ("c", Classification::new(3, 0, 0)),
        ]))
        .unwrap();
        let recipes: Vec<usize> = menu
            .in_slot(slot(MealType::Breakfast, 3))
            .map(|o| o.recipe)
            .collect();
        assert_eq!(recipes, vec![0, 1, 2]);
    }

    #[test]
    fn test_invalid_index_fails() {
        let err = classify(&catalog(&[("cena", Classification::new(0, 6, 0))])).unwrap_err();
        assert!(matches!(
            err,
            MenuError::InvalidClassification { meal: "lunch", index: 6, .. }
        ));
    }
}
