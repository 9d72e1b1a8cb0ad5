use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, warn};

use super::{csv_reader, invalid, parse_amount};
use crate::error::Result;
use crate::models::{CostEntry, CostTable};

/// Load a food cost table from a file.
pub fn load_cost_table<P: AsRef<Path>>(path: P) -> Result<CostTable> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read_cost_table(file, &path.display().to_string())
}

/// Read a food cost table.
///
/// No header. Every row is `name, unit_price, reference_grams`. Blank
/// numbers are 0, but the reference weight must end up positive. A
/// duplicate name replaces the earlier row.
pub fn read_cost_table<R: Read>(reader: R, origin: &str) -> Result<CostTable> {
    let mut rdr = csv_reader(reader);
    let mut table = CostTable::new();

    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        if record.len() < 3 {
            return Err(invalid(
                origin,
                format!("row {} needs name, price and grams, found {} fields", row + 1, record.len()),
            ));
        }

        let name = &record[0];
        let unit_price = parse_amount(origin, row, 1, &record[1])?;
        let reference_grams = parse_amount(origin, row, 2, &record[2])?;
        if reference_grams <= 0.0 {
            return Err(invalid(
                origin,
                format!("row {} ('{}') has non-positive reference grams", row + 1, name),
            ));
        }

        if table.insert(name, CostEntry::new(unit_price, reference_grams)).is_some() {
            warn!("{}: duplicate ingredient '{}', keeping row {}", origin, name, row + 1);
        }
    }

    debug!("{}: loaded {} costs", origin, table.len());
    Ok(table)
}
