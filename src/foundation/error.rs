use crate::detect::SourceFormat;

/// Convenience result type used across splice.
pub type SpliceResult<T> = Result<T, SpliceError>;

/// Fatal failures of the import pipeline and of canonical-model edits.
///
/// Anything that still leaves a usable project behind is reported as a
/// [`ConversionWarning`] instead.
#[derive(thiserror::Error, Debug)]
pub enum SpliceError {
    /// The detector could not classify the input.
    #[error("unrecognized format: {0}")]
    UnrecognizedFormat(String),

    /// The document is too corrupt to yield an intermediate tree.
    #[error("parse error ({format}): {detail}")]
    Parse {
        /// Format the parser was run for.
        format: SourceFormat,
        /// Human-readable cause.
        detail: String,
    },

    /// The document parsed but holds no usable sequence/composition/timeline.
    #[error("no timeline found in {0} document")]
    NoTimelineFound(SourceFormat),

    /// Invalid canonical-model data or edit operation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SpliceError {
    /// Build a [`SpliceError::Parse`] value.
    pub fn parse(format: SourceFormat, detail: impl Into<String>) -> Self {
        Self::Parse {
            format,
            detail: detail.into(),
        }
    }

    /// Build a [`SpliceError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SpliceError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

/// Non-fatal irregularity found while converting a parsed document.
///
/// Warnings never abort an import; they are accumulated and rendered into
/// the import outcome.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConversionWarning {
    #[error("{total} {container}s found; converted '{chosen}' and discarded {discarded}")]
    MultipleTimelines {
        container: &'static str,
        total: usize,
        chosen: String,
        discarded: usize,
    },

    #[error("layer '{layer}': effect '{effect}' has no canonical equivalent")]
    UnmappedEffect { layer: String, effect: String },

    #[error("layer '{layer}': expression on '{property}' approximated as a static keyframe")]
    ExpressionApproximated { layer: String, property: String },

    #[error("layer '{layer}': expression on '{property}' dropped (not a literal value)")]
    ExpressionDropped { layer: String, property: String },

    #[error("clip '{name}' dropped: {reason}")]
    ClipDropped { name: String, reason: String },

    #[error("layer '{layer}': transition '{name}' dropped: {reason}")]
    TransitionDropped {
        layer: String,
        name: String,
        reason: String,
    },

    #[error("skipped malformed {context}: {detail}")]
    SkippedNode { context: String, detail: String },

    #[error("declared duration {declared:.3}s is shorter than content ({content:.3}s); extended")]
    DurationExtended { declared: f64, content: f64 },

    #[error("layer '{layer}': blend mode '{mode}' is not supported; using normal")]
    UnknownBlendMode { layer: String, mode: String },

    #[error("layer '{layer}': 3D transform collapsed to 2D")]
    DepthCollapsed { layer: String },
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
