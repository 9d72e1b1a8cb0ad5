pub mod render;

pub use render::{
    display_catalog, display_diagnostics, display_iis, display_menu, display_model_summary,
    display_plan, display_relaxation, display_solve_status, display_totals,
};
