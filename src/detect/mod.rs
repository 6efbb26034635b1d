//! Input classification by file extension and content markers.

mod detector;

pub use detector::{SourceFormat, detect};
