//! The import entry point: bytes in, canonical project and report out.

pub mod options;
mod pipeline;

pub use options::ImportOptions;
pub use pipeline::{ImportOutcome, Importer, decode_input, import};
