use std::fmt;
use std::ops::{AddAssign, Index, IndexMut};

use serde::{Deserialize, Serialize};

/// The fixed set of nutrients tracked by every table.
///
/// Declaration order is the column order of the composition source and the
/// index order of [`NutrientVector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientKind {
    Water,
    Energy,
    Protein,
    TotalFat,
    Carbohydrate,
    DietaryFiber,
    Ash,
    Calcium,
    Phosphorus,
    Iron,
    Thiamine,
    Riboflavin,
    Niacin,
    VitaminC,
    VitaminA,
    MonounsaturatedFat,
    PolyunsaturatedFat,
    SaturatedFat,
    Cholesterol,
    Potassium,
    Sodium,
    Zinc,
    Magnesium,
    VitaminB6,
    VitaminB12,
    FolicAcid,
    Folate,
}

impl NutrientKind {
    pub const COUNT: usize = 27;

    pub const ALL: [NutrientKind; Self::COUNT] = [
        NutrientKind::Water,
        NutrientKind::Energy,
        NutrientKind::Protein,
        NutrientKind::TotalFat,
        NutrientKind::Carbohydrate,
        NutrientKind::DietaryFiber,
        NutrientKind::Ash,
        NutrientKind::Calcium,
        NutrientKind::Phosphorus,
        NutrientKind::Iron,
        NutrientKind::Thiamine,
        NutrientKind::Riboflavin,
        NutrientKind::Niacin,
        NutrientKind::VitaminC,
        NutrientKind::VitaminA,
        NutrientKind::MonounsaturatedFat,
        NutrientKind::PolyunsaturatedFat,
        NutrientKind::SaturatedFat,
        NutrientKind::Cholesterol,
        NutrientKind::Potassium,
        NutrientKind::Sodium,
        NutrientKind::Zinc,
        NutrientKind::Magnesium,
        NutrientKind::VitaminB6,
        NutrientKind::VitaminB12,
        NutrientKind::FolicAcid,
        NutrientKind::Folate,
    ];

    /// Position in [`NutrientKind::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Snake-case identifier, identical to the serde name.
    pub fn name(self) -> &'static str {
        match self {
            NutrientKind::Water => "water",
            NutrientKind::Energy => "energy",
            NutrientKind::Protein => "protein",
            NutrientKind::TotalFat => "total_fat",
            NutrientKind::Carbohydrate => "carbohydrate",
            NutrientKind::DietaryFiber => "dietary_fiber",
            NutrientKind::Ash => "ash",
            NutrientKind::Calcium => "calcium",
            NutrientKind::Phosphorus => "phosphorus",
            NutrientKind::Iron => "iron",
            NutrientKind::Thiamine => "thiamine",
            NutrientKind::Riboflavin => "riboflavin",
            NutrientKind::Niacin => "niacin",
            NutrientKind::VitaminC => "vitamin_c",
            NutrientKind::VitaminA => "vitamin_a",
            NutrientKind::MonounsaturatedFat => "monounsaturated_fat",
            NutrientKind::PolyunsaturatedFat => "polyunsaturated_fat",
            NutrientKind::SaturatedFat => "saturated_fat",
            NutrientKind::Cholesterol => "cholesterol",
            NutrientKind::Potassium => "potassium",
            NutrientKind::Sodium => "sodium",
            NutrientKind::Zinc => "zinc",
            NutrientKind::Magnesium => "magnesium",
            NutrientKind::VitaminB6 => "vitamin_b6",
            NutrientKind::VitaminB12 => "vitamin_b12",
            NutrientKind::FolicAcid => "folic_acid",
            NutrientKind::Folate => "folate",
        }
    }
}

impl fmt::Display for NutrientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per [`NutrientKind`], per 100 g in the food tables and per
/// serving on a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NutrientVector([f64; NutrientKind::COUNT]);

impl NutrientVector {
    pub fn zero() -> Self {
        Self([0.0; NutrientKind::COUNT])
    }

    /// Build a vector from sparse `(kind, value)` pairs; unlisted kinds are 0.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (NutrientKind, f64)>,
    {
        let mut v = Self::zero();
        for (kind, value) in pairs {
            v[kind] = value;
        }
        v
    }

    pub fn iter(&self) -> impl Iterator<Item = (NutrientKind, f64)> + '_ {
        NutrientKind::ALL.iter().map(move |&k| (k, self.0[k.index()]))
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&v| v == 0.0)
    }
}

impl Index<NutrientKind> for NutrientVector {
    type Output = f64;

    fn index(&self, kind: NutrientKind) -> &f64 {
        &self.0[kind.index()]
    }
}

impl IndexMut<NutrientKind> for NutrientVector {
    fn index_mut(&mut self, kind: NutrientKind) -> &mut f64 {
        &mut self.0[kind.index()]
    }
}

impl AddAssign<&NutrientVector> for NutrientVector {
    fn add_assign(&mut self, other: &NutrientVector) {
        for (a, b) in self.0.iter_mut().zip(other.0.iter()) {
            *a += b;
        }
    }
}

impl<'a> std::iter::Sum<&'a NutrientVector> for NutrientVector {
    fn sum<I: Iterator<Item = &'a NutrientVector>>(iter: I) -> Self {
        iter.fold(NutrientVector::zero(), |mut acc, v| {
            acc += v;
            acc
        })
    }
}
