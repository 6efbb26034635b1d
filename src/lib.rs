//! Import professional video-editor project files into one canonical
//! timeline, and evaluate that timeline's animation at any instant.
//!
//! The pipeline is [`detect`] → [`formats::parse`] → [`formats::convert`] →
//! [`report::generate`], wrapped by [`Importer`]. The canonical types live in
//! [`model`]; [`evaluate`] and [`evaluate_frame`] interpret them over time.

#![forbid(unsafe_code)]

pub mod animation;
pub mod detect;
pub mod effects;
pub mod eval;
pub mod formats;
pub mod foundation;
pub mod import;
pub mod model;
pub mod report;
pub mod templates;

pub use detect::{SourceFormat, detect};
pub use eval::{EvaluatedFrame, ResolvedProperties, evaluate, evaluate_frame};
pub use formats::IntermediateTree;
pub use foundation::error::{ConversionWarning, SpliceError, SpliceResult};
pub use import::{ImportOptions, ImportOutcome, Importer, decode_input, import};
pub use model::{
    effect::{Effect, EffectKind},
    keyframe::{Easing, KeyValue, Keyframe},
    layer::{BlendMode, Layer, LayerKind, LayerProperties},
    project::{Project, Resolution},
    report::CompatibilityReport,
    transition::{Direction, Transition, TransitionKind},
};
pub use templates::{Placeholder, PlaceholderKind, detect_placeholders};
