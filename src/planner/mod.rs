pub mod builder;
pub mod classifier;
pub mod constants;
pub mod guidelines;
pub mod lp_format;
pub mod model;
pub mod report;

pub use builder::{Granularity, ModelBuilder, ModelConfig, ModelVariant, ObjectiveKind};
pub use classifier::{classify, Menu};
pub use constants::*;
pub use guidelines::{GuidelineTable, NutrientBound, TargetIntakeTable};
pub use lp_format::{emit_lp, export_lp};
pub use model::{
    BoundSide, Constraint, ConstraintKind, DecisionSubject, LinearExpr, OptimizationModel,
    VarDomain, Variable,
};
pub use report::{Pick, PlanReport};
