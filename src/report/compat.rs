use crate::{
    detect::SourceFormat,
    effects::mapper,
    formats::{self, IntermediateTree},
    model::{layer::LayerKind, project::Project, report::CompatibilityReport},
};

/// Losses that are structural to every conversion, reported on each import.
pub const LIMITED_FEATURES: [(&str, &str); 4] = [
    (
        "Complex effects",
        "third-party and complex native effects are mapped to canonical effects where possible and kept disabled otherwise",
    ),
    (
        "3D transforms",
        "3D layers, cameras and lights are collapsed to 2D",
    ),
    (
        "Expressions",
        "expression-driven properties are approximated as static keyframes where literal",
    ),
    (
        "Nested compositions",
        "nested compositions and compound clips are flattened",
    ),
];

const KIND_FEATURES: [(LayerKind, &str); 5] = [
    (LayerKind::Video, "Video layers"),
    (LayerKind::Image, "Image layers"),
    (LayerKind::Text, "Text layers"),
    (LayerKind::Audio, "Audio layers"),
    (LayerKind::Shape, "Shape layers"),
];

/// Classify how the features of `project` survived conversion from `tree`.
///
/// The three feature lists never share an entry and come out in a stable
/// order for the same input.
pub fn generate(
    project: &Project,
    format: SourceFormat,
    tree: &IntermediateTree,
) -> CompatibilityReport {
    let mut report = CompatibilityReport::default();

    for (kind, feature) in KIND_FEATURES {
        if project.layers.iter().any(|l| l.kind == kind) {
            report.supported_features.push(feature.to_string());
        }
    }
    let layers = &project.layers;
    if layers.iter().any(|l| !l.keyframes.is_empty()) {
        report.supported_features.push("Keyframe animation".to_string());
    }
    if layers
        .iter()
        .any(|l| l.transition_in.is_some() || l.transition_out.is_some())
    {
        report.supported_features.push("Transitions".to_string());
    }
    if layers.iter().any(|l| l.blend_mode.is_some()) {
        report.supported_features.push("Blend modes".to_string());
    }

    report.limited_features = LIMITED_FEATURES
        .iter()
        .map(|(f, note)| (f.to_string(), note.to_string()))
        .collect();

    for name in formats::effect_names(tree) {
        let feature = format!("Effect: {name}");
        let list = if mapper::lookup(name).is_some() {
            &mut report.supported_features
        } else {
            &mut report.unsupported_features
        };
        if !list.contains(&feature) {
            list.push(feature);
        }
    }

    report
        .notes
        .push(format!("converted from {format} ({} layers)", project.layers.len()));
    for note in formats::inspect(tree) {
        if !report.notes.contains(&note) {
            report.notes.push(note);
        }
    }

    tracing::debug!(
        format = %format,
        supported = report.supported_features.len(),
        unsupported = report.unsupported_features.len(),
        notes = report.notes.len(),
        "compatibility report"
    );
    report
}

#[cfg(test)]
#[path = "../../tests/unit/report/compat.rs"]
mod tests;
