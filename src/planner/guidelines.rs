use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::error::{MenuError, Result};
use crate::models::{NutrientKind, NutrientVector};
use crate::planner::constants::{DEFAULT_GUIDELINES, DEFAULT_TARGETS};

/// Daily `[min, max]` for one nutrient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutrientBound {
    pub min: f64,
    pub max: f64,
}

impl NutrientBound {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Nutrition guideline: one band per nutrient.
#[derive(Debug, Clone, PartialEq)]
pub struct GuidelineTable([NutrientBound; NutrientKind::COUNT]);

impl Default for GuidelineTable {
    fn default() -> Self {
        let mut bounds = [NutrientBound::new(0.0, f64::INFINITY); NutrientKind::COUNT];
        for (kind, min, max) in DEFAULT_GUIDELINES {
            bounds[kind.index()] = NutrientBound::new(min, max);
        }
        Self(bounds)
    }
}

impl GuidelineTable {
    pub fn get(&self, kind: NutrientKind) -> NutrientBound {
        self.0[kind.index()]
    }

    pub fn set(&mut self, kind: NutrientKind, bound: NutrientBound) {
        self.0[kind.index()] = bound;
    }

    pub fn iter(&self) -> impl Iterator<Item = (NutrientKind, NutrientBound)> + '_ {
        NutrientKind::ALL.iter().map(move |&k| (k, self.0[k.index()]))
    }

    /// Nutrients of `totals` that fall outside their band.
    pub fn violations(&self, totals: &NutrientVector) -> Vec<NutrientKind> {
        self.iter()
            .filter(|(kind, bound)| !bound.contains(totals[*kind]))
            .map(|(kind, _)| kind)
            .collect()
    }

    /// Built-in table with the bands listed in a JSON file replaced.
    ///
    /// ```json
    /// {"energy": {"min": 1800, "max": 2700}, "sodium": {"max": 2500}}
    /// ```
    ///
    /// An omitted `min` is 0, an omitted `max` is unbounded.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::from_json(&content, &path.display().to_string())
    }

    pub fn from_json(content: &str, origin: &str) -> Result<Self> {
        let overrides: BTreeMap<NutrientKind, BoundOverride> = serde_json::from_str(content)?;
        let mut table = Self::default();
        for (kind, o) in overrides {
            let bound = NutrientBound::new(o.min.unwrap_or(0.0), o.max.unwrap_or(f64::INFINITY));
            if bound.min.is_nan() || bound.max.is_nan() || bound.min > bound.max {
                return Err(MenuError::InvalidRecord {
                    origin: origin.to_string(),
                    reason: format!("{} has min {} above max {}", kind, bound.min, bound.max),
                });
            }
            debug!("{}: {} bounded to [{}, {}]", origin, kind, bound.min, bound.max);
            table.set(kind, bound);
        }
        Ok(table)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BoundOverride {
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
}

/// Daily target intake per nutrient. Nutrients without a target take no
/// part in the deficit objective.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetIntakeTable([Option<f64>; NutrientKind::COUNT]);

impl Default for TargetIntakeTable {
    fn default() -> Self {
        let mut targets = [None; NutrientKind::COUNT];
        for (kind, target) in DEFAULT_TARGETS {
            targets[kind.index()] = target;
        }
        Self(targets)
    }
}

impl TargetIntakeTable {
    pub fn get(&self, kind: NutrientKind) -> Option<f64> {
        self.0[kind.index()]
    }

    pub fn set(&mut self, kind: NutrientKind, target: Option<f64>) {
        self.0[kind.index()] = target;
    }

    /// Nutrients that have a target, in nutrient order.
    pub fn iter(&self) -> impl Iterator<Item = (NutrientKind, f64)> + '_ {
        NutrientKind::ALL
            .iter()
            .filter_map(move |&k| self.0[k.index()].map(|t| (k, t)))
    }

    /// Sum of all targets.
    pub fn total(&self) -> f64 {
        self.iter().map(|(_, t)| t).sum()
    }

    /// Built-in table with the targets listed in a JSON file replaced;
    /// `null` removes a nutrient's target.
    ///
    /// ```json
    /// {"energy": 2000.0, "ash": null}
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let overrides: BTreeMap<NutrientKind, Option<f64>> = serde_json::from_str(content)?;
        let mut table = Self::default();
        for (kind, target) in overrides {
            table.set(kind, target);
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_guidelines() {
        let table = GuidelineTable::default();
        assert_eq!(table.get(NutrientKind::Energy), NutrientBound::new(1800.0, 2700.0));
        assert_eq!(table.get(NutrientKind::Sodium), NutrientBound::new(0.0, 2500.0));
        assert_eq!(table.get(NutrientKind::Water).max, f64::INFINITY);
    }

    #[test]
    fn test_default_targets_skip_ash() {
        let table = TargetIntakeTable::default();
        assert_eq!(table.get(NutrientKind::Ash), None);
        assert_eq!(table.get(NutrientKind::Folate), Some(400.0));
        assert_eq!(table.iter().count(), NutrientKind::COUNT - 1);
    }

    #[test]
    fn test_guideline_overrides() {
        let table = GuidelineTable::from_json(
            r#"{"energy": {"min": 2000, "max": 2500}, "sodium": {"max": 1500}}"#,
            "guidelines.json",
        )
        .unwrap();
        assert_eq!(table.get(NutrientKind::Energy), NutrientBound::new(2000.0, 2500.0));
        assert_eq!(table.get(NutrientKind::Sodium), NutrientBound::new(0.0, 1500.0));
        // untouched
        assert_eq!(table.get(NutrientKind::Protein), NutrientBound::new(46.0, 56.0));
    }

    #[test]
    fn test_inverted_override_rejected() {
        let err = GuidelineTable::from_json(r#"{"energy": {"min": 3000, "max": 2500}}"#, "g.json")
            .unwrap_err();
        assert!(matches!(err, MenuError::InvalidRecord { .. }));
    }

    #[test]
    fn test_unknown_nutrient_rejected() {
        let err = GuidelineTable::from_json(r#"{"caffeine": {"max": 400}}"#, "g.json").unwrap_err();
        assert!(matches!(err, MenuError::Json(_)));
    }

    #[test]
    fn test_target_overrides() {
        let table = TargetIntakeTable::from_json(r#"{"energy": 2000.0, "folate": null}"#).unwrap();
        assert_eq!(table.get(NutrientKind::Energy), Some(2000.0));
        assert_eq!(table.get(NutrientKind::Folate), None);
    }

    #[test]
    fn test_violations() {
        let table = GuidelineTable::default();
        let totals = NutrientVector::from_pairs([(NutrientKind::Energy, 2000.0)]);
        let violated = table.violations(&totals);
        assert!(!violated.contains(&NutrientKind::Energy));
        assert!(violated.contains(&NutrientKind::Protein));
        assert!(!violated.contains(&NutrientKind::Water));
    }
}
