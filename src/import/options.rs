use crate::model::keyframe::Easing;

/// Converter policy knobs. Every field has a default, so a partial JSON
/// document (or `{}`) is a valid configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Easing for synthesized transitions whose source names none.
    pub default_transition_easing: Easing,
    /// Lower bound for the converted project duration, in seconds.
    pub min_duration_secs: f64,
    /// Turn literal numeric expressions into static keyframes.
    pub approximate_expressions: bool,
    /// Keep unmapped native effects on their layer as disabled placeholders.
    pub keep_unmapped_effects: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            default_transition_easing: Easing::EaseInOut,
            min_duration_secs: 0.0,
            approximate_expressions: true,
            keep_unmapped_effects: true,
        }
    }
}

impl ImportOptions {
    pub fn from_json(s: &str) -> crate::SpliceResult<Self> {
        serde_json::from_str(s).map_err(|e| crate::SpliceError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/import/options.rs"]
mod tests;
