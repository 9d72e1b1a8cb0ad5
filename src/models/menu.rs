use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MenuError, Result};

/// Meal of the day. Each has a fixed number of sub-slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    /// Number of sub-slots for this meal.
    pub fn slot_count(self) -> u8 {
        match self {
            MealType::Breakfast => 5,
            MealType::Lunch => 5,
            MealType::Dinner => 4,
        }
    }

    /// Single-letter prefix used in slot labels (`b`, `l`, `d`).
    pub fn prefix(self) -> char {
        match self {
            MealType::Breakfast => 'b',
            MealType::Lunch => 'l',
            MealType::Dinner => 'd',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }
}

/// One of the 14 fixed menu positions: breakfast 1-5, lunch 1-5, dinner 1-4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MealSlot {
    meal: MealType,
    position: u8,
}

impl MealSlot {
    pub const COUNT: usize = 14;

    /// Resolve a classification index to a slot. Index 0 and indices past the
    /// meal's slot count have no slot.
    pub fn new(meal: MealType, position: u8) -> Option<Self> {
        (1..=meal.slot_count())
            .contains(&position)
            .then_some(Self { meal, position })
    }

    /// All slots in label order: b1..b5, l1..l5, d1..d4.
    pub fn all() -> impl Iterator<Item = MealSlot> {
        MealType::ALL.into_iter().flat_map(|meal| {
            (1..=meal.slot_count()).map(move |position| MealSlot { meal, position })
        })
    }

    pub fn meal(&self) -> MealType {
        self.meal
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    /// Short label such as `b2` or `d4`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.meal.prefix(), self.position)
    }
}

/// Per-meal slot index of a recipe; 0 means the recipe is not served at
/// that meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Classification {
    pub breakfast: i64,
    pub lunch: i64,
    pub dinner: i64,
}

impl Classification {
    pub fn new(breakfast: i64, lunch: i64, dinner: i64) -> Self {
        Self {
            breakfast,
            lunch,
            dinner,
        }
    }

    pub fn index(&self, meal: MealType) -> i64 {
        match meal {
            MealType::Breakfast => self.breakfast,
            MealType::Lunch => self.lunch,
            MealType::Dinner => self.dinner,
        }
    }

    /// Slots the recipe belongs to, in meal order.
    ///
    /// Fails on the first nonzero index that does not name a slot,
    /// negative indices included.
    pub fn slots(&self, recipe: &str) -> Result<Vec<MealSlot>> {
        let mut slots = Vec::new();
        for meal in MealType::ALL {
            let index = self.index(meal);
            if index == 0 {
                continue;
            }
            let slot = u8::try_from(index)
                .ok()
                .and_then(|position| MealSlot::new(meal, position))
                .ok_or_else(|| MenuError::InvalidClassification {
                    recipe: recipe.to_string(),
                    meal: meal.name(),
                    index,
                })?;
            slots.push(slot);
        }
        Ok(slots)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.breakfast, self.lunch, self.dinner)
    }
}

/// A recipe offered in one slot. Recipes valid for several slots yield one
/// option per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuOption {
    /// Position of the recipe in its catalog.
    pub recipe: usize,
    pub slot: MealSlot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fourteen_slots_in_label_order() {
        let labels: Vec<String> = MealSlot::all().map(|s| s.label()).collect();
        assert_eq!(labels.len(), MealSlot::COUNT);
        assert_eq!(labels.first().map(String::as_str), Some("b1"));
        assert_eq!(labels[5], "l1");
        assert_eq!(labels.last().map(String::as_str), Some("d4"));
    }

    #[test]
    fn test_slot_bounds() {
        assert!(MealSlot::new(MealType::Breakfast, 0).is_none());
        assert!(MealSlot::new(MealType::Breakfast, 5).is_some());
        assert!(MealSlot::new(MealType::Lunch, 6).is_none());
        assert!(MealSlot::new(MealType::Dinner, 4).is_some());
        assert!(MealSlot::new(MealType::Dinner, 5).is_none());
    }

    #[test]
    fn test_classification_slots() {
        let slots = Classification::new(2, 0, 1).slots("soup").unwrap();
        let labels: Vec<String> = slots.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["b2", "d1"]);

        assert!(Classification::new(0, 0, 0).slots("soup").unwrap().is_empty());
    }

    #[test]
    fn test_out_of_range_classification() {
        let err = Classification::new(0, 0, 5).slots("soup").unwrap_err();
        match err {
            MenuError::InvalidClassification {
                recipe,
                meal,
                index,
            } => {
                assert_eq!(recipe, "soup");
                assert_eq!(meal, "dinner");
                assert_eq!(index, 5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_classification_rejected() {
        let err = Classification::new(-1, 0, 0).slots("soup").unwrap_err();
        assert!(matches!(
            err,
            MenuError::InvalidClassification { meal: "breakfast", index: -1, .. }
        ));
    }
}
