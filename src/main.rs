use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;

use menu_planner::cli::{Cli, Command};
use menu_planner::error::Result;
use menu_planner::interface::{
    display_catalog, display_diagnostics, display_iis, display_menu, display_model_summary,
    display_plan, display_relaxation, display_solve_status, display_totals,
};
use menu_planner::models::{CostTable, FoodTable};
use menu_planner::planner::{classify, export_lp, PlanReport};
use menu_planner::solver::{RelaxMode, Solver};
use menu_planner::tables::{load_cost_table, load_food_table};
use menu_planner::{
    GuidelineTable, MicroLpSolver, ModelBuilder, ModelVariant, RecipeCatalog, TargetIntakeTable,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let ctx = Context::load(&cli)?;

    match cli.command {
        Command::Recipes(recipes) => cmd_recipes(&ctx, &recipes.files),
        Command::Totals { recipes, select } => cmd_totals(&ctx, &recipes.files, &select),
        Command::Menu(recipes) => cmd_menu(&ctx, &recipes.files),
        Command::Build {
            recipes,
            variant,
            export,
        } => cmd_build(&ctx, &recipes.files, variant, &export),
        Command::Solve {
            recipes,
            variant,
            export,
            iis,
            relax,
            then_objective,
        } => {
            let mode = if then_objective {
                RelaxMode::ThenObjective
            } else {
                RelaxMode::ViolationOnly
            };
            let relax = relax.then_some(mode);
            cmd_solve(&ctx, &recipes.files, variant, export.as_deref(), iis, relax)
        }
    }
}

/// Tables shared by every command.
struct Context {
    foods: FoodTable,
    costs: CostTable,
    guidelines: GuidelineTable,
    targets: TargetIntakeTable,
}

impl Context {
    fn load(cli: &Cli) -> Result<Self> {
        let foods = load_food_table(&cli.composition)?;
        let costs = load_cost_table(&cli.costs)?;
        let guidelines = match &cli.guidelines {
            Some(path) => GuidelineTable::load(path)?,
            None => GuidelineTable::default(),
        };
        let targets = match &cli.targets {
            Some(path) => TargetIntakeTable::load(path)?,
            None => TargetIntakeTable::default(),
        };
        info!("Loaded {} foods and {} prices", foods.len(), costs.len());
        Ok(Self {
            foods,
            costs,
            guidelines,
            targets,
        })
    }

    fn catalog(&self, files: &[PathBuf]) -> Result<RecipeCatalog> {
        RecipeCatalog::load(files, &self.foods, &self.costs)
    }

    fn builder<'a>(&'a self, catalog: &'a RecipeCatalog) -> ModelBuilder<'a> {
        ModelBuilder::new(catalog, &self.guidelines, &self.targets)
    }
}

fn cmd_recipes(ctx: &Context, files: &[PathBuf]) -> Result<()> {
    let catalog = ctx.catalog(files)?;
    display_catalog(&catalog);
    display_diagnostics(catalog.diagnostics());
    Ok(())
}

fn cmd_totals(ctx: &Context, files: &[PathBuf], select: &[String]) -> Result<()> {
    let catalog = ctx.catalog(files)?;
    let totals = catalog.total_nutrients(select)?;
    display_totals(select, &totals, &ctx.guidelines);
    Ok(())
}

fn cmd_menu(ctx: &Context, files: &[PathBuf]) -> Result<()> {
    let catalog = ctx.catalog(files)?;
    let menu = classify(&catalog)?;
    display_menu(&menu, &catalog);
    Ok(())
}

fn cmd_build(ctx: &Context, files: &[PathBuf], variant: ModelVariant, export: &Path) -> Result<()> {
    let catalog = ctx.catalog(files)?;
    let model = ctx.builder(&catalog).build_variant(variant)?;
    display_model_summary(&model);
    export_lp(&model, export)?;
    println!("Model written to {}", export.display());
    Ok(())
}

fn cmd_solve(
    ctx: &Context,
    files: &[PathBuf],
    variant: ModelVariant,
    export: Option<&Path>,
    iis: bool,
    relax: Option<RelaxMode>,
) -> Result<()> {
    let catalog = ctx.catalog(files)?;
    display_diagnostics(catalog.diagnostics());

    let model = ctx.builder(&catalog).build_variant(variant)?;
    display_model_summary(&model);
    if let Some(path) = export {
        export_lp(&model, path)?;
        println!("Model written to {}", path.display());
    }

    let solver = MicroLpSolver::new();
    let result = solver.solve(&model)?;
    display_solve_status(&model, &result);

    if let Some(objective) = result.objective() {
        let report = PlanReport::new(&model, &catalog, objective, result.values());
        display_plan(&report, &ctx.guidelines);
        return Ok(());
    }

    if !result.is_infeasible() {
        return Ok(());
    }
    if iis {
        match solver.infeasible_subset(&model)? {
            Some(subset) => display_iis(&model, &subset),
            None => println!("Model is not infeasible on re-solve; no subset computed."),
        }
    }
    if let Some(mode) = relax {
        let relaxation = solver.relax(&model, mode)?;
        display_relaxation(&relaxation);
    }
    if !iis && relax.is_none() {
        println!("Rerun with --iis or --relax to analyze the infeasibility.");
    }
    Ok(())
}
