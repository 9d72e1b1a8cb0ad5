use std::fs;
use std::path::Path;

use log::info;

use crate::error::Result;
use crate::planner::model::{LinearExpr, OptimizationModel, VarDomain};

/// Write `model` to `path` in CPLEX LP format.
pub fn export_lp<P: AsRef<Path>>(model: &OptimizationModel, path: P) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, emit_lp(model))?;
    info!("Wrote model '{}' to {}", model.name, path.display());
    Ok(())
}

/// Render `model` in CPLEX LP format.
///
/// A constraint with both sides finite becomes a `_min` and a `_max` row.
/// The objective constant is written as a trailing numeric term; rows
/// without variables are written as comments.
pub fn emit_lp(model: &OptimizationModel) -> String {
    let mut out = String::new();
    out.push_str(&format!("\\ Model {}\n", model.name));
    out.push_str("Minimize\n obj: ");
    out.push_str(&fmt_lin(model, &model.objective));
    out.push('\n');

    out.push_str("Subject To\n");
    for c in &model.constraints {
        if c.expr.is_constant() {
            out.push_str(&format!("\\ {}: no terms\n", c.name));
            continue;
        }
        let lhs = lhs_terms(model, &c.expr);
        let rhs = |bound: f64| fmt_num(bound - c.expr.constant);
        match (c.has_lower(), c.has_upper()) {
            (true, true) if c.lower == c.upper => {
                out.push_str(&format!(" {}: {} = {}\n", c.name, lhs, rhs(c.lower)));
            }
            (true, true) => {
                out.push_str(&format!(" {}_min: {} >= {}\n", c.name, lhs, rhs(c.lower)));
                out.push_str(&format!(" {}_max: {} <= {}\n", c.name, lhs, rhs(c.upper)));
            }
            (true, false) => {
                out.push_str(&format!(" {}: {} >= {}\n", c.name, lhs, rhs(c.lower)));
            }
            (false, true) => {
                out.push_str(&format!(" {}: {} <= {}\n", c.name, lhs, rhs(c.upper)));
            }
            (false, false) => {
                out.push_str(&format!("\\ {}: free\n", c.name));
            }
        }
    }

    let continuous: Vec<_> = model
        .variables
        .iter()
        .filter(|v| v.domain == VarDomain::Continuous)
        .collect();
    if !continuous.is_empty() {
        out.push_str("Bounds\n");
        for v in continuous {
            if v.upper.is_finite() {
                out.push_str(&format!(" {} <= {} <= {}\n", fmt_num(v.lower), v.name, fmt_num(v.upper)));
            } else {
                out.push_str(&format!(" {} >= {}\n", v.name, fmt_num(v.lower)));
            }
        }
    }

    let binaries: Vec<&str> = model
        .variables
        .iter()
        .filter(|v| v.domain == VarDomain::Binary)
        .map(|v| v.name.as_str())
        .collect();
    if !binaries.is_empty() {
        out.push_str("Binary\n");
        for b in binaries {
            out.push_str(&format!(" {}\n", b));
        }
    }

    out.push_str("End\n");
    out
}

/// Terms per output line; LP readers cap line length.
const TERMS_PER_LINE: usize = 8;

fn fmt_num(v: f64) -> String {
    if v.abs() < 1e15 && (v - v.round()).abs() < 1e-9 {
        format!("{}", v.round() as i64)
    } else {
        format!("{}", v)
    }
}

fn fmt_coef(c: f64) -> String {
    if c >= 0.0 {
        format!("+{}", fmt_num(c))
    } else {
        format!("-{}", fmt_num(-c))
    }
}

fn wrap_terms(parts: &[String]) -> String {
    parts
        .chunks(TERMS_PER_LINE)
        .map(|line| line.join(" "))
        .collect::<Vec<_>>()
        .join("\n   ")
}

/// Variable terms only.
fn lhs_terms(model: &OptimizationModel, e: &LinearExpr) -> String {
    let parts: Vec<String> = e
        .terms
        .iter()
        .map(|&(v, c)| format!("{} {}", fmt_coef(c), model.variables[v].name))
        .collect();
    wrap_terms(&parts)
}

/// Variable terms plus constant.
fn fmt_lin(model: &OptimizationModel, e: &LinearExpr) -> String {
    let mut parts: Vec<String> = e
        .terms
        .iter()
        .map(|&(v, c)| format!("{} {}", fmt_coef(c), model.variables[v].name))
        .collect();
    if e.constant != 0.0 || parts.is_empty() {
        parts.push(fmt_coef(e.constant));
    }
    wrap_terms(&parts)
}
