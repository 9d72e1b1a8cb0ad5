use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use super::{csv_reader, invalid, parse_number};
use crate::error::Result;
use crate::models::{Classification, IngredientLine, RecipeRecord};

const SERVINGS_ROW: usize = 0;
const GRAMS_ROW: usize = 1;
const CLASSIFICATION_ROW: usize = 2;
const FIRST_INGREDIENT_ROW: usize = 4;

const GRAMS_FIELD: usize = 2;
const INGREDIENT_FIELD: usize = 3;

/// Load a recipe source. The recipe is named after the file stem.
pub fn load_recipe_record<P: AsRef<Path>>(path: P) -> Result<RecipeRecord> {
    let path = path.as_ref();
    let origin = path.display().to_string();
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| invalid(&origin, "path has no file name"))?;
    let file = File::open(path)?;
    read_recipe_record(file, &name)
}

/// Read a recipe source:
///
/// ```text
/// label, servings
/// label, total grams
/// label, breakfast, lunch, dinner, <ignored>
/// header (ignored)
/// idx, idx, grams, ingredient     (one row per ingredient)
/// ```
pub fn read_recipe_record<R: Read>(reader: R, name: &str) -> Result<RecipeRecord> {
    let mut rdr = csv_reader(reader);
    let rows: Vec<StringRecord> = rdr.records().collect::<std::result::Result<_, _>>()?;

    if rows.len() < FIRST_INGREDIENT_ROW {
        return Err(invalid(
            name,
            format!("expected at least {} rows, found {}", FIRST_INGREDIENT_ROW, rows.len()),
        ));
    }

    let servings: u32 = parse_number(name, SERVINGS_ROW, 1, field(name, &rows, SERVINGS_ROW, 1)?)?;
    if servings == 0 {
        return Err(invalid(name, "servings must be positive"));
    }

    let total_grams: f64 = parse_number(name, GRAMS_ROW, 1, field(name, &rows, GRAMS_ROW, 1)?)?;
    if !(total_grams.is_finite() && total_grams > 0.0) {
        return Err(invalid(name, "total grams must be a positive number"));
    }

    let mut index = [0i64; 3];
    for (i, slot) in index.iter_mut().enumerate() {
        let f = i + 1;
        *slot = parse_number(name, CLASSIFICATION_ROW, f, field(name, &rows, CLASSIFICATION_ROW, f)?)?;
    }
    let classification = Classification::new(index[0], index[1], index[2]);

    let mut ingredients = Vec::with_capacity(rows.len() - FIRST_INGREDIENT_ROW);
    for row in FIRST_INGREDIENT_ROW..rows.len() {
        let grams: f64 = parse_number(name, row, GRAMS_FIELD, field(name, &rows, row, GRAMS_FIELD)?)?;
        let ingredient = field(name, &rows, row, INGREDIENT_FIELD)?;
        if !(grams.is_finite() && grams > 0.0) {
            return Err(invalid(
                name,
                format!("row {} uses non-positive or non-finite grams of '{}'", row + 1, ingredient),
            ));
        }
        ingredients.push(IngredientLine {
            name: ingredient.to_string(),
            grams,
        });
    }

    Ok(RecipeRecord {
        name: name.to_string(),
        servings,
        total_grams,
        classification,
        ingredients,
    })
}

fn field<'r>(name: &str, rows: &'r [StringRecord], row: usize, field: usize) -> Result<&'r str> {
    rows[row]
        .get(field)
        .ok_or_else(|| invalid(name, format!("row {} has no field {}", row + 1, field)))
}
