//! Readers for the comma-separated food tables and recipe sources.
//!
//! Each reader has a path form and a `Read` form; `origin` names the source
//! in error messages.

mod composition;
mod cost;
mod recipe_source;

pub use composition::{load_food_table, read_food_table};
pub use cost::{load_cost_table, read_cost_table};
pub use recipe_source::{load_recipe_record, read_recipe_record};

use std::io::Read;

use crate::error::{MenuError, Result};

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// Parse a table field; blank counts as 0.
fn parse_amount(origin: &str, row: usize, field: usize, text: &str) -> Result<f64> {
    if text.is_empty() {
        return Ok(0.0);
    }
    parse_number(origin, row, field, text)
}

/// Parse a required numeric field; blank is malformed.
fn parse_number<T: std::str::FromStr>(origin: &str, row: usize, field: usize, text: &str) -> Result<T> {
    text.parse().map_err(|_| MenuError::MalformedRecord {
        origin: origin.to_string(),
        row: row + 1,
        field,
        value: text.to_string(),
    })
}

fn invalid(origin: &str, reason: impl Into<String>) -> MenuError {
    MenuError::InvalidRecord {
        origin: origin.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_blank_is_zero() {
        assert_eq!(parse_amount("t", 0, 2, "").unwrap(), 0.0);
        assert_eq!(parse_amount("t", 0, 2, "1.5").unwrap(), 1.5);
    }

    #[test]
    fn test_parse_number_reports_position() {
        let err = parse_number::<f64>("foods.csv", 4, 7, "n/a").unwrap_err();
        match err {
            MenuError::MalformedRecord {
                origin,
                row,
                field,
                value,
            } => {
                assert_eq!(origin, "foods.csv");
                assert_eq!(row, 5);
                assert_eq!(field, 7);
                assert_eq!(value, "n/a");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
