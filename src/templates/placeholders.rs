use std::sync::LazyLock;

use regex::Regex;

use crate::model::{
    layer::{Layer, LayerKind},
    project::Project,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaceholderKind {
    Text,
    Media,
}

/// A layer whose content is meant to be replaced by the user.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Placeholder {
    pub layer_id: String,
    pub layer_name: String,
    pub kind: PlaceholderKind,
    /// The placeholder text or the media indicator that matched.
    pub token: String,
}

const TEXT_PATTERNS: [&str; 4] = [
    r"(?i)\[[^\[\]]*TEXT[^\[\]]*\]",
    r"\{\{[^{}]*\}\}",
    r"<[^<>]+>",
    r"(?i)\bYOUR\b.*?\b(?:TITLE|TEXT|HEADLINE)\b",
];

const MEDIA_INDICATORS: [&str; 8] = [
    "placeholder",
    "sample",
    "template",
    "dummy",
    "default",
    "replace",
    "drop",
    "drag",
];

static TEXT_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    TEXT_PATTERNS
        .iter()
        .filter_map(|p| match Regex::new(p) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::error!(pattern = p, error = %e, "invalid placeholder pattern");
                None
            }
        })
        .collect()
});

/// Text layers holding placeholder copy and media layers whose source or
/// name marks them as stand-ins, in layer order.
pub fn detect_placeholders(project: &Project) -> Vec<Placeholder> {
    project
        .layers
        .iter()
        .flat_map(|layer| match layer.kind {
            LayerKind::Text => text_placeholders(layer),
            LayerKind::Image | LayerKind::Video => media_placeholder(layer).into_iter().collect(),
            LayerKind::Audio | LayerKind::Shape => Vec::new(),
        })
        .collect()
}

/// Every placeholder token in a text layer, in reading order. A match that
/// overlaps one found by an earlier pattern is skipped.
fn text_placeholders(layer: &Layer) -> Vec<Placeholder> {
    let Some(text) = layer.text.as_deref() else {
        return Vec::new();
    };
    let mut spans: Vec<(usize, usize)> = Vec::new();
    for re in TEXT_REGEXES.iter() {
        for m in re.find_iter(text) {
            if !spans.iter().any(|&(s, e)| m.start() < e && s < m.end()) {
                spans.push((m.start(), m.end()));
            }
        }
    }
    spans.sort_unstable();
    spans
        .into_iter()
        .map(|(s, e)| Placeholder {
            layer_id: layer.id.clone(),
            layer_name: layer.name.clone(),
            kind: PlaceholderKind::Text,
            token: text[s..e].to_string(),
        })
        .collect()
}

fn media_placeholder(layer: &Layer) -> Option<Placeholder> {
    let haystacks = [layer.source.as_deref(), Some(layer.name.as_str())];
    let indicator = haystacks.into_iter().flatten().find_map(|h| {
        let lowered = h.to_lowercase();
        MEDIA_INDICATORS
            .iter()
            .find(|ind| lowered.contains(**ind))
            .copied()
    })?;
    Some(Placeholder {
        layer_id: layer.id.clone(),
        layer_name: layer.name.clone(),
        kind: PlaceholderKind::Media,
        token: indicator.to_string(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/templates/placeholders.rs"]
mod tests;
