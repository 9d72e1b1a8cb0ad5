use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, warn};

use super::{csv_reader, invalid, parse_amount};
use crate::error::Result;
use crate::models::{FoodTable, NutrientKind, NutrientVector};

const HEADER_ROWS: usize = 2;
const NAME_FIELD: usize = 1;
const FIRST_NUTRIENT_FIELD: usize = 2;

/// Load a food composition table from a file.
pub fn load_food_table<P: AsRef<Path>>(path: P) -> Result<FoodTable> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read_food_table(file, &path.display().to_string())
}

/// Read a food composition table.
///
/// The first two rows are headers. Every other row is
/// `index, name, v0 .. v26` with values per 100 g in [`NutrientKind`]
/// order. Blank and absent values are 0. A duplicate name replaces the
/// earlier row.
pub fn read_food_table<R: Read>(reader: R, origin: &str) -> Result<FoodTable> {
    let mut rdr = csv_reader(reader);
    let mut table = FoodTable::new();

    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        if row < HEADER_ROWS {
            continue;
        }

        let name = record
            .get(NAME_FIELD)
            .ok_or_else(|| invalid(origin, format!("row {} has no ingredient name", row + 1)))?;

        let mut nutrients = NutrientVector::zero();
        for kind in NutrientKind::ALL {
            let field = FIRST_NUTRIENT_FIELD + kind.index();
            if let Some(text) = record.get(field) {
                nutrients[kind] = parse_amount(origin, row, field, text)?;
            }
        }

        if record.len() < FIRST_NUTRIENT_FIELD + NutrientKind::COUNT {
            debug!(
                "{}: row {} ('{}') has {} fields, missing nutrients set to 0",
                origin,
                row + 1,
                name,
                record.len()
            );
        }

        if table.insert(name, nutrients).is_some() {
            warn!("{}: duplicate ingredient '{}', keeping row {}", origin, name, row + 1);
        }
    }

    debug!("{}: loaded {} foods", origin, table.len());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MenuError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn header() -> String {
        let names: Vec<&str> = NutrientKind::ALL.iter().map(|k| k.name()).collect();
        format!("id,name,{}\n,,units\n", names.join(","))
    }

    fn row(index: usize, name: &str, values: &[&str]) -> String {
        let mut fields = vec![index.to_string(), name.to_string()];
        fields.extend(values.iter().map(|v| v.to_string()));
        while fields.len() < FIRST_NUTRIENT_FIELD + NutrientKind::COUNT {
            fields.push(String::new());
        }
        format!("{}\n", fields.join(","))
    }

    #[test]
    fn test_skips_headers_and_blank_is_zero() {
        let data = format!("{}{}", header(), row(1, "egg", &["76", "143", "12.6"]));
        let table = read_food_table(data.as_bytes(), "foods").unwrap();

        assert_eq!(table.len(), 1);
        let egg = table.get("egg").unwrap();
        assert_eq!(egg[NutrientKind::Water], 76.0);
        assert_eq!(egg[NutrientKind::Energy], 143.0);
        assert_eq!(egg[NutrientKind::Protein], 12.6);
        assert_eq!(egg[NutrientKind::Folate], 0.0);
    }

    #[test]
    fn test_non_numeric_field_is_malformed() {
        let data = format!("{}{}", header(), row(1, "egg", &["76", "lots"]));
        let err = read_food_table(data.as_bytes(), "foods").unwrap_err();
        assert!(matches!(
            err,
            MenuError::MalformedRecord { row: 3, field: 3, .. }
        ));
    }

    #[test]
    fn test_duplicate_name_last_row_wins() {
        // Same key loaded twice is most likely a data-entry error upstream;
        // the later row silently replaces the earlier one.
        let data = format!(
            "{}{}{}",
            header(),
            row(1, "egg", &["", "143"]),
            row(2, "egg", &["", "155"])
        );
        let table = read_food_table(data.as_bytes(), "foods").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("egg").unwrap()[NutrientKind::Energy], 155.0);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(header().as_bytes()).unwrap();
        file.write_all(row(1, "rice", &["12", "360"]).as_bytes()).unwrap();

        let table = load_food_table(file.path()).unwrap();
        assert_eq!(table.get("rice").unwrap()[NutrientKind::Energy], 360.0);
    }
}
