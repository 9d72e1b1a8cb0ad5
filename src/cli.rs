use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::planner::ModelVariant;

/// Menu planner: builds diet and menu-selection models from recipe files.
#[derive(Parser, Debug)]
#[command(name = "menu_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Food composition table (CSV, two header rows).
    #[arg(long, global = true, default_value = "tabla_composicion_alimentos.csv")]
    pub composition: PathBuf,

    /// Food cost table (CSV: name, price, reference grams).
    #[arg(long, global = true, default_value = "tabla_costos_alimentos.csv")]
    pub costs: PathBuf,

    /// JSON file overriding nutrient guideline bands.
    #[arg(long, global = true)]
    pub guidelines: Option<PathBuf>,

    /// JSON file overriding target intakes.
    #[arg(long, global = true)]
    pub targets: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct RecipeFiles {
    /// Recipe files; the recipe name is the file stem.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print per-serving cost and nutrients of every recipe.
    Recipes(RecipeFiles),

    /// Nutrient totals of a subset of recipes.
    Totals {
        #[command(flatten)]
        recipes: RecipeFiles,

        /// Recipe names to sum.
        #[arg(long, num_args = 1.., required = true)]
        select: Vec<String>,
    },

    /// Print the classified menu.
    Menu(RecipeFiles),

    /// Build a model and export it without solving.
    Build {
        #[command(flatten)]
        recipes: RecipeFiles,

        #[arg(long, value_enum, default_value_t = ModelVariant::Lp)]
        variant: ModelVariant,

        /// LP file to write.
        #[arg(long)]
        export: PathBuf,
    },

    /// Build, solve and report.
    Solve {
        #[command(flatten)]
        recipes: RecipeFiles,

        #[arg(long, value_enum, default_value_t = ModelVariant::Lp)]
        variant: ModelVariant,

        /// Also write the model as an LP file.
        #[arg(long)]
        export: Option<PathBuf>,

        /// On infeasibility, compute an irreducible infeasible subset.
        #[arg(long)]
        iis: bool,

        /// On infeasibility, solve the feasibility relaxation.
        #[arg(long)]
        relax: bool,

        /// With --relax, minimize the original objective among the
        /// least-violating solutions.
        #[arg(long, requires = "relax")]
        then_objective: bool,
    },
}
