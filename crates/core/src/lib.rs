// Dependency model and cross-sheet inference

pub mod infer;
pub mod map;

pub use infer::{infer_dependencies, Inference, SheetFormulas};
pub use map::DependencyMap;
