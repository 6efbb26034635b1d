//! Compatibility reporting for converted projects.

mod compat;

pub use compat::{LIMITED_FEATURES, generate};
