use crate::models::NutrientKind;

/// Variable values above this are reported as part of a plan.
pub const SELECTION_THRESHOLD: f64 = 1e-4;

/// Slack values above this are reported as violations.
pub const SLACK_THRESHOLD: f64 = 1e-6;

/// Relative tolerance when pinning the minimal violation in the second
/// relaxation phase.
pub const VIOLATION_TOLERANCE: f64 = 1e-7;

/// Prefix of every decision variable name.
pub const DECISION_PREFIX: &str = "buy";

/// Prefix of every slot-cardinality constraint name.
pub const SLOT_PREFIX: &str = "slot";

// ─────────────────────────────────────────────────────────────────────────────
// Built-in nutrition guideline: adult men, 25-65 years.
// Daily [min, max]; a missing lower side is 0, a missing upper side is +inf.
// ─────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_GUIDELINES: [(NutrientKind, f64, f64); NutrientKind::COUNT] = [
    (NutrientKind::Water, 0.0, f64::INFINITY),
    (NutrientKind::Energy, 1800.0, 2700.0),
    (NutrientKind::Protein, 46.0, 56.0),
    (NutrientKind::TotalFat, 28.0, 43.0),
    (NutrientKind::Carbohydrate, 0.0, f64::INFINITY),
    (NutrientKind::DietaryFiber, 18.0, 24.0),
    (NutrientKind::Ash, 0.0, f64::INFINITY),
    (NutrientKind::Calcium, 800.0, f64::INFINITY),
    (NutrientKind::Phosphorus, 800.0, f64::INFINITY),
    (NutrientKind::Iron, 15.0, f64::INFINITY),
    (NutrientKind::Thiamine, 1.5, f64::INFINITY),
    (NutrientKind::Riboflavin, 1.7, f64::INFINITY),
    (NutrientKind::Niacin, 20.0, f64::INFINITY),
    (NutrientKind::VitaminC, 60.0, f64::INFINITY),
    (NutrientKind::VitaminA, 1000.0, f64::INFINITY),
    (NutrientKind::MonounsaturatedFat, 0.0, f64::INFINITY),
    (NutrientKind::PolyunsaturatedFat, 0.0, f64::INFINITY),
    (NutrientKind::SaturatedFat, 0.0, f64::INFINITY),
    (NutrientKind::Cholesterol, 0.0, 300.0),
    (NutrientKind::Potassium, 2000.0, f64::INFINITY),
    (NutrientKind::Sodium, 0.0, 2500.0),
    (NutrientKind::Zinc, 15.0, f64::INFINITY),
    (NutrientKind::Magnesium, 350.0, f64::INFINITY),
    (NutrientKind::VitaminB6, 2.0, f64::INFINITY),
    (NutrientKind::VitaminB12, 2.0, f64::INFINITY),
    (NutrientKind::FolicAcid, 200.0, f64::INFINITY),
    (NutrientKind::Folate, 0.0, f64::INFINITY),
];

/// Built-in daily target intake for the deficit objective. Ash has no target.
pub const DEFAULT_TARGETS: [(NutrientKind, Option<f64>); NutrientKind::COUNT] = [
    (NutrientKind::Water, Some(3200.0)),
    (NutrientKind::Energy, Some(2250.0)),
    (NutrientKind::Protein, Some(53.0)),
    (NutrientKind::TotalFat, Some(60.0)),
    (NutrientKind::Carbohydrate, Some(300.0)),
    (NutrientKind::DietaryFiber, Some(31.0)),
    (NutrientKind::Ash, None),
    (NutrientKind::Calcium, Some(800.0)),
    (NutrientKind::Phosphorus, Some(800.0)),
    (NutrientKind::Iron, Some(15.0)),
    (NutrientKind::Thiamine, Some(1.5)),
    (NutrientKind::Riboflavin, Some(1.7)),
    (NutrientKind::Niacin, Some(20.0)),
    (NutrientKind::VitaminC, Some(60.0)),
    (NutrientKind::VitaminA, Some(1000.0)),
    (NutrientKind::MonounsaturatedFat, Some(20.0)),
    (NutrientKind::PolyunsaturatedFat, Some(10.0)),
    (NutrientKind::SaturatedFat, Some(10.0)),
    (NutrientKind::Cholesterol, Some(300.0)),
    (NutrientKind::Potassium, Some(2000.0)),
    (NutrientKind::Sodium, Some(2000.0)),
    (NutrientKind::Zinc, Some(15.0)),
    (NutrientKind::Magnesium, Some(350.0)),
    (NutrientKind::VitaminB6, Some(2.0)),
    (NutrientKind::VitaminB12, Some(2.0)),
    (NutrientKind::FolicAcid, Some(200.0)),
    (NutrientKind::Folate, Some(400.0)),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_follow_nutrient_order() {
        for (i, (kind, _, _)) in DEFAULT_GUIDELINES.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        for (i, (kind, _)) in DEFAULT_TARGETS.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_guideline_bands_are_ordered() {
        for (kind, min, max) in DEFAULT_GUIDELINES {
            assert!(min <= max, "{} has min above max", kind);
        }
    }
}
