use std::collections::BTreeMap;

use crate::{
    effects::{mapper, transitions::parse_transition_name},
    foundation::error::ConversionWarning,
    import::options::ImportOptions,
    model::{
        effect::Effect,
        keyframe::Easing,
        layer::{BlendMode, Layer},
        project::{Project, Resolution},
        transition::{Direction, Transition},
    },
};

/// A native effect as extracted by any parser.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct NativeEffect {
    pub name: String,
    pub enabled: bool,
    pub params: BTreeMap<String, f64>,
}

/// The result of converting one intermediate tree.
#[derive(Clone, Debug)]
pub struct Conversion {
    pub project: Project,
    pub warnings: Vec<ConversionWarning>,
}

/// Shared state threaded through one conversion.
#[derive(Debug)]
pub struct ConvertCtx<'a> {
    pub options: &'a ImportOptions,
    project_id: String,
    warnings: Vec<ConversionWarning>,
}

impl<'a> ConvertCtx<'a> {
    pub fn new(options: &'a ImportOptions, project_id: impl Into<String>) -> Self {
        Self {
            options,
            project_id: project_id.into(),
            warnings: Vec::new(),
        }
    }

    pub fn warn(&mut self, warning: ConversionWarning) {
        tracing::warn!(%warning, "conversion warning");
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }

    /// First of `items`, warning when more than one exists.
    pub fn select_first<'t, T>(
        &mut self,
        items: &'t [T],
        container: &'static str,
        name_of: impl Fn(&T) -> String,
    ) -> Option<&'t T> {
        let first = items.first()?;
        if let Some(warning) = multiple_timelines(items, container, name_of) {
            self.warn(warning);
        }
        Some(first)
    }

    /// Route native effects through the mapper. Unmapped effects are warned
    /// about and, if configured, kept as disabled placeholders.
    pub fn map_effects(&mut self, layer: &Layer, native: &[NativeEffect]) -> Vec<Effect> {
        let mut out = Vec::with_capacity(native.len());
        for fx in native {
            let mapped = match mapper::map_effect(&fx.name, &fx.params) {
                Some(mut effect) => {
                    effect.enabled = fx.enabled;
                    Some(effect)
                }
                None => {
                    self.warn(ConversionWarning::UnmappedEffect {
                        layer: layer.name.clone(),
                        effect: fx.name.clone(),
                    });
                    self.options
                        .keep_unmapped_effects
                        .then(|| mapper::unmapped_effect(&fx.name, &fx.params))
                }
            };
            if let Some(mut effect) = mapped {
                effect.id = format!("{}-fx{}", layer.id, out.len());
                out.push(effect);
            }
        }
        out
    }

    /// Build a transition when its type and duration are unambiguous;
    /// otherwise warn and return `None`.
    pub fn transition(
        &mut self,
        layer: &Layer,
        native_name: &str,
        duration_secs: f64,
        easing: Option<Easing>,
        direction: Option<Direction>,
    ) -> Option<Transition> {
        let dropped = |reason: &str| ConversionWarning::TransitionDropped {
            layer: layer.name.clone(),
            name: native_name.to_string(),
            reason: reason.to_string(),
        };

        let Some((kind, named_direction)) = parse_transition_name(native_name) else {
            self.warn(dropped("no canonical equivalent"));
            return None;
        };
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            self.warn(dropped("missing or non-positive duration"));
            return None;
        }

        Some(Transition {
            kind,
            duration: duration_secs,
            direction: direction.or(named_direction),
            easing: easing.unwrap_or(self.options.default_transition_easing),
        })
    }

    /// Resolve a native blend mode, warning on unknown spellings.
    pub fn blend_mode(&mut self, layer: &Layer, native: Option<&str>) -> Option<BlendMode> {
        let raw = native?;
        match BlendMode::from_native(raw) {
            Some(BlendMode::Normal) => None,
            Some(mode) => Some(mode),
            None => {
                self.warn(ConversionWarning::UnknownBlendMode {
                    layer: layer.name.clone(),
                    mode: raw.to_string(),
                });
                None
            }
        }
    }

    /// Assemble the project with each layer's keyframes in time order. The
    /// duration is the largest of the declared duration, the content end and
    /// the configured floor.
    pub fn finish(
        mut self,
        name: &str,
        resolution: Resolution,
        declared_duration: Option<f64>,
        layers: Vec<Layer>,
    ) -> Conversion {
        let mut project = Project::new(self.project_id.clone(), name, resolution);
        project.layers = layers;
        for layer in &mut project.layers {
            layer.sort_keyframes();
        }

        let content = project.content_end();
        let declared = declared_duration.filter(|d| d.is_finite() && *d > 0.0);
        if let Some(declared) = declared {
            if declared + 1e-9 < content {
                self.warn(ConversionWarning::DurationExtended { declared, content });
            }
        }
        project.duration = declared
            .unwrap_or(0.0)
            .max(content)
            .max(self.options.min_duration_secs);

        Conversion {
            project,
            warnings: self.warnings,
        }
    }
}

/// The warning for a document holding more than one top-level timeline.
pub(crate) fn multiple_timelines<T>(
    items: &[T],
    container: &'static str,
    name_of: impl Fn(&T) -> String,
) -> Option<ConversionWarning> {
    let first = items.first()?;
    (items.len() > 1).then(|| ConversionWarning::MultipleTimelines {
        container,
        total: items.len(),
        chosen: name_of(first),
        discarded: items.len() - 1,
    })
}

/// Canonical static properties must stay usable even when the source
/// carries garbage: non-finite values fall back to the schema default.
pub(crate) fn finite_or(v: Option<f64>, default: f64) -> f64 {
    v.filter(|v| v.is_finite()).unwrap_or(default)
}

/// Parse a literal numeric expression (`"42"`, `"[960, 540]"`, `"value * 1"`
/// is not literal). Returns the numeric components.
pub(crate) fn literal_expression(expr: &str) -> Option<Vec<f64>> {
    let s = expr.trim().trim_end_matches(';').trim();
    if s.is_empty() {
        return None;
    }
    if let Some(inner) = s.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        let parts: Option<Vec<f64>> = inner
            .split(',')
            .map(|p| p.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
            .collect();
        return parts.filter(|p| !p.is_empty());
    }
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| vec![v])
}

const STILL_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "psd", "exr", "webp", "heic", "svg", "tga",
];

/// Whether a media path names a still image.
pub(crate) fn is_still_image(path: &str) -> bool {
    path.rsplit_once('.')
        .map(|(_, ext)| STILL_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/formats/convert.rs"]
mod tests;
