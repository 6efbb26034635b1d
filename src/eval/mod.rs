//! Per-layer and per-frame evaluation of a canonical project.

mod evaluator;

pub use evaluator::{EvaluatedFrame, ResolvedProperties, evaluate, evaluate_frame};
