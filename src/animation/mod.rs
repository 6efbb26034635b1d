//! Pure, time-indexed interpretation of the canonical model: easing curves,
//! keyframe sampling and transition windows.

pub mod ease;
pub mod keyframes;
pub mod transition;

pub use keyframes::{animated_properties, sample};
pub use transition::{ActiveTransition, Phase, TransitionModifier, resolve_transition};
