/// How a converted project's features survived the import.
///
/// Generated once per import and never changed afterwards.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompatibilityReport {
    /// Features carried over fully.
    pub supported_features: Vec<String>,
    /// `(feature, note)` pairs for features carried over with losses.
    pub limited_features: Vec<(String, String)>,
    /// Features dropped entirely.
    pub unsupported_features: Vec<String>,
    /// Free-text conversion notes.
    pub notes: Vec<String>,
}

impl CompatibilityReport {
    pub fn is_supported(&self, feature: &str) -> bool {
        self.supported_features.iter().any(|f| f == feature)
    }

    pub fn is_limited(&self, feature: &str) -> bool {
        self.limited_features.iter().any(|(f, _)| f == feature)
    }

    pub fn is_unsupported(&self, feature: &str) -> bool {
        self.unsupported_features.iter().any(|f| f == feature)
    }
}
