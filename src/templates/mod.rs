//! Replaceable content in imported templates.

mod placeholders;

pub use placeholders::{Placeholder, PlaceholderKind, detect_placeholders};
