pub mod error;
pub mod expand;
pub mod export;
pub mod loader;
pub mod material;
pub mod optimize;
pub mod report;
pub mod solver;

pub use error::{CutPlanError, Result};
pub use expand::expand_cuts;
pub use export::export_plan_csv;
pub use loader::{load_materials_json, load_materials_toml, read_cuts_csv};
pub use material::{CutRequirement, Material};
pub use optimize::{optimize_material, optimize_materials};
pub use report::{MaterialResult, OptimizationResult, PieceReport, SkippedMaterial, render_text};
pub use solver::{Packing, pack_cuts};
