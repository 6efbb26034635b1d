use std::fmt;

use crate::foundation::error::{SpliceError, SpliceResult};

/// The five native project schemas splice can import.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    /// Attribute-heavy sequence markup (`<xmeml>` / `<PremiereData>`).
    MarkupSequence,
    /// JSON composition graph exported by a compositing tool's scripting layer.
    CompositionGraph,
    /// Rational-time XML timeline (`<fcpxml>`).
    XmlTimeline,
    /// JSON export of a motion-graphics bundle.
    MotionBundle,
    /// XML clip graph with media pool and timelines.
    ClipGraph,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 5] = [
        Self::MarkupSequence,
        Self::CompositionGraph,
        Self::XmlTimeline,
        Self::MotionBundle,
        Self::ClipGraph,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Self::MarkupSequence => "markup-sequence",
            Self::CompositionGraph => "composition-graph",
            Self::XmlTimeline => "xml-timeline",
            Self::MotionBundle => "motion-bundle",
            Self::ClipGraph => "clip-graph",
        }
    }

    /// Extensions that name this format unambiguously.
    fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::MarkupSequence => &["prproj", "xmeml"],
            Self::CompositionGraph => &["aep", "aet"],
            Self::XmlTimeline => &["fcpxml", "fcpxmld"],
            Self::MotionBundle => &["motn", "moti", "motr", "moef"],
            Self::ClipGraph => &["drp", "drt"],
        }
    }

    /// Content markers; every group must be fully present (any group matches).
    fn markers(self) -> &'static [&'static [&'static str]] {
        match self {
            Self::MarkupSequence => &[&["<xmeml"], &["<PremiereData"]],
            Self::CompositionGraph => &[&["\"typeName\"", "\"Composition\""]],
            Self::XmlTimeline => &[&["<fcpxml"]],
            Self::MotionBundle => &[&["\"projectName\"", "\"layers\""], &["\"behaviors\""]],
            Self::ClipGraph => &[&["<DaVinciResolveProject"], &["<mediaPool", "<timeline"]],
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// Sniffing order matters: XML roots are checked before JSON field names so
// an XML document that quotes JSON in a comment is still classified as XML.
const SNIFF_ORDER: [SourceFormat; 5] = [
    SourceFormat::XmlTimeline,
    SourceFormat::MarkupSequence,
    SourceFormat::ClipGraph,
    SourceFormat::CompositionGraph,
    SourceFormat::MotionBundle,
];

/// Classify `content` (named `filename`) as one of the known formats.
///
/// A known extension is the fast path: it decides whenever the content
/// carries that format's markers, or the markers of no format at all.
/// Content that positively identifies a different format overrides the
/// extension. Generic extensions (`.xml`, `.json`, none) fall back to
/// content sniffing. Never parses.
pub fn detect(filename: &str, content: &str) -> SpliceResult<SourceFormat> {
    let by_ext = extension_of(filename).and_then(|ext| {
        SourceFormat::ALL
            .into_iter()
            .find(|f| f.extensions().contains(&ext.as_str()))
    });
    if let Some(ext) = by_ext.filter(|f| has_markers(*f, content)) {
        tracing::debug!(filename, format = %ext, "detected format by extension");
        return Ok(ext);
    }

    let format = match (by_ext, sniff(content)) {
        (Some(ext), Some(sniffed)) => {
            tracing::debug!(
                filename,
                extension = %ext,
                content = %sniffed,
                "content markers override extension"
            );
            sniffed
        }
        (Some(ext), None) => ext,
        (None, Some(sniffed)) => sniffed,
        (None, None) => return Err(SpliceError::UnrecognizedFormat(filename.to_string())),
    };

    tracing::debug!(filename, format = %format, "detected format");
    Ok(format)
}

fn extension_of(filename: &str) -> Option<String> {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

fn has_markers(format: SourceFormat, content: &str) -> bool {
    format
        .markers()
        .iter()
        .any(|group| group.iter().all(|m| content.contains(m)))
}

fn sniff(content: &str) -> Option<SourceFormat> {
    SNIFF_ORDER.into_iter().find(|f| has_markers(*f, content))
}

#[cfg(test)]
#[path = "../../tests/unit/detect/detector.rs"]
mod tests;
