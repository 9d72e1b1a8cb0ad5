use crate::catalog::RecipeCatalog;
use crate::models::{MissingReference, NutrientVector};
use crate::planner::{GuidelineTable, Menu, NutrientBound, OptimizationModel, PlanReport};
use crate::solver::{Relaxation, SolveResult};

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(str::len).max().unwrap_or(10)
}

fn format_bound(bound: NutrientBound) -> String {
    if bound.max.is_finite() {
        format!("[{}, {}]", bound.min, bound.max)
    } else {
        format!("[{}, inf)", bound.min)
    }
}

/// Per-serving cost and nutrients of every recipe.
pub fn display_catalog(catalog: &RecipeCatalog) {
    if catalog.is_empty() {
        println!("No recipes loaded.");
        return;
    }

    println!();
    println!("=== Recipes ({} loaded) ===", catalog.len());

    for recipe in catalog {
        println!();
        println!("{}", recipe);
        println!("cost per serving: {:.2}", recipe.cost);
        for (kind, value) in recipe.nutrients.iter() {
            println!("  {:<20} {:>10.3}", kind.name(), value);
        }
    }
    println!();
}

pub fn display_diagnostics<'a>(diagnostics: impl IntoIterator<Item = &'a MissingReference>) {
    let diagnostics: Vec<_> = diagnostics.into_iter().collect();
    if diagnostics.is_empty() {
        return;
    }

    println!("--- Missing references ({}) ---", diagnostics.len());
    for d in diagnostics {
        println!("  {}", d);
    }
    println!();
}

/// Nutrient totals of a recipe subset, checked against the guideline bands.
pub fn display_totals(names: &[String], totals: &NutrientVector, guidelines: &GuidelineTable) {
    println!();
    println!("=== Totals for {} ===", names.join(", "));
    println!();
    print_nutrient_table(totals, guidelines);
    println!();
}

fn print_nutrient_table(totals: &NutrientVector, guidelines: &GuidelineTable) {
    for (kind, value) in totals.iter() {
        let bound = guidelines.get(kind);
        let flag = if bound.contains(value) { "" } else { "  <- out of range" };
        println!(
            "  {:<20} {:>10.3}  {:<20}{}",
            kind.name(),
            value,
            format_bound(bound),
            flag
        );
    }
}

/// Classified menu: every slot with the recipes it offers.
pub fn display_menu(menu: &Menu, catalog: &RecipeCatalog) {
    println!();
    println!("=== Menu ({} options) ===", menu.len());
    println!();

    for (slot, options) in menu.slots() {
        let names: Vec<&str> = options
            .iter()
            .filter_map(|o| catalog.get(o.recipe))
            .map(|r| r.name.as_str())
            .collect();
        if names.is_empty() {
            println!("{:>3}: (none)", slot.label());
        } else {
            println!("{:>3}: {}", slot.label(), names.join(", "));
        }
    }
    println!();
}

pub fn display_model_summary(model: &OptimizationModel) {
    let kind = if model.is_mip() { "MIP" } else { "LP" };
    println!(
        "Model '{}' ({}): {} variables, {} constraints",
        model.name,
        kind,
        model.variables.len(),
        model.constraints.len()
    );
}

pub fn display_solve_status(model: &OptimizationModel, result: &SolveResult) {
    match result.objective() {
        Some(obj) => println!("{}: {} (objective {:.4})", model.name, result.status(), obj),
        None => println!("{}: {}", model.name, result.status()),
    }
}

/// Selected recipes and the nutrients they add up to.
pub fn display_plan(report: &PlanReport, guidelines: &GuidelineTable) {
    println!();
    println!("=== Plan: {} ===", report.model);
    println!();

    if report.is_empty() {
        println!("No recipe selected.");
    } else {
        let width = name_width(report.picks.iter().map(|p| p.recipe.as_str()));
        for (i, pick) in report.picks.iter().enumerate() {
            let slot = pick.slot.map(|s| format!(" [{}]", s)).unwrap_or_default();
            println!(
                "{:>3}. {:<width$} x {:>8.4} @ {:>8.2}{}",
                i + 1,
                pick.recipe,
                pick.amount,
                pick.cost,
                slot,
                width = width
            );
        }
    }

    println!();
    println!("--- Summary ---");
    println!("Objective: {:.4}", report.objective);
    println!("Total cost: {:.2}", report.cost);
    println!();
    print_nutrient_table(&report.nutrients, guidelines);
    println!();
}

pub fn display_iis(model: &OptimizationModel, subset: &[usize]) {
    println!();
    println!("=== Irreducible infeasible subset ({} constraints) ===", subset.len());
    for &i in subset {
        if let Some(c) = model.constraints.get(i) {
            println!("  {:<20} {}", c.name, format_bound(NutrientBound::new(c.lower, c.upper)));
        }
    }
    println!();
}

pub fn display_relaxation(relaxation: &Relaxation) {
    println!();
    println!("=== Feasibility relaxation ===");

    let Some(violation) = relaxation.violation else {
        println!("Relaxed model: {}", relaxation.result.status());
        println!();
        return;
    };

    println!("Total violation: {:.6}", violation);
    if let Some(obj) = relaxation.objective {
        println!("Original objective: {:.4}", obj);
    }
    for slack in &relaxation.slacks {
        println!("  {:<20} {} by {:.6}", slack.name, slack.side, slack.amount);
    }

    let values = relaxation.original_values();
    let picks: Vec<_> = relaxation
        .model
        .variables
        .iter()
        .zip(values)
        .filter(|(_, v)| **v > crate::planner::SELECTION_THRESHOLD)
        .collect();
    if !picks.is_empty() {
        println!("Relaxed selection:");
        for (var, value) in picks {
            println!("  {} = {:.4}", var.name, value);
        }
    }
    println!();
}
