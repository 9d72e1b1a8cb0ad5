pub mod catalog;
pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;
pub mod solver;
pub mod tables;

pub use catalog::RecipeCatalog;
pub use error::{MenuError, Result};
pub use models::{MealSlot, MealType, NutrientKind, NutrientVector, Recipe};
pub use planner::{GuidelineTable, ModelBuilder, ModelVariant, OptimizationModel, TargetIntakeTable};
pub use solver::{MicroLpSolver, SolveResult, SolveStatus, Solver};
