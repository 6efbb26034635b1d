use std::collections::BTreeMap;

use kurbo::Affine;
use rayon::prelude::*;

use crate::{
    animation::{ActiveTransition, animated_properties, resolve_transition, sample},
    effects::mapper::clamp_params,
    model::{
        effect::Effect,
        keyframe::KeyValue,
        layer::{BlendMode, Layer, LayerProperties},
        project::Project,
    },
};

/// A layer's state at one instant on the project timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResolvedProperties {
    pub layer_id: String,
    pub track: u32,
    /// `start_time <= t < start_time + duration`.
    pub active: bool,
    /// Static bag with keyframed values applied.
    pub properties: LayerProperties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<ActiveTransition>,
    pub blend: BlendMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Keyframed properties outside the bag.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, KeyValue>,
    /// Enabled effects with parameters clamped into range.
    #[serde(default)]
    pub effects: Vec<Effect>,
}

impl ResolvedProperties {
    /// The property bag with the transition modifier folded in.
    pub fn composited(&self) -> LayerProperties {
        let mut p = self.properties;
        if let Some(active) = &self.transition {
            let m = active.modifier;
            p.opacity *= m.opacity;
            p.x += m.offset.x;
            p.y += m.offset.y;
            p.scale *= m.scale;
        }
        p.opacity = if p.opacity.is_finite() {
            p.opacity.clamp(0.0, 1.0)
        } else {
            1.0
        };
        p
    }

    /// Layer-to-canvas transform of the composited properties: anchor to
    /// origin, scale, rotate, then move to position.
    pub fn to_affine(&self) -> Affine {
        let p = self.composited();
        let anchor = (p.anchor_x.unwrap_or(0.0), p.anchor_y.unwrap_or(0.0));
        Affine::translate((p.x, p.y))
            * Affine::rotate(p.rotation.to_radians())
            * Affine::scale(p.scale)
            * Affine::translate((-anchor.0, -anchor.1))
    }
}

/// Evaluate `layer` at absolute project time `t`. Never fails and keeps no
/// state between calls.
pub fn evaluate(layer: &Layer, t: f64) -> ResolvedProperties {
    let local = t - layer.start_time;
    let mut properties = layer.properties;
    let mut extra = BTreeMap::new();
    let mut text = layer.text.clone();

    for name in animated_properties(&layer.keyframes) {
        let Some(value) = sample(&layer.keyframes, name, local) else {
            continue;
        };
        match value {
            // Non-finite samples hold the static value.
            KeyValue::Number(v) => {
                if v.is_finite() && !properties.set(name, v) {
                    extra.insert(name.to_string(), KeyValue::Number(v));
                }
            }
            KeyValue::Text(s) if name == "text" => text = Some(s),
            other => {
                extra.insert(name.to_string(), other);
            }
        }
    }

    ResolvedProperties {
        layer_id: layer.id.clone(),
        track: layer.track,
        active: layer.is_active_at(t),
        properties,
        transition: resolve_transition(layer, local),
        blend: layer.blend_mode.unwrap_or_default(),
        text,
        extra,
        effects: layer
            .effects
            .iter()
            .filter(|e| e.enabled)
            .map(clamp_params)
            .collect(),
    }
}

/// Every layer active at one instant, bottom to top.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EvaluatedFrame {
    pub time: f64,
    pub layers: Vec<ResolvedProperties>,
}

/// Evaluate all layers active at `t` in parallel, ordered by track, then
/// start time, then id.
#[tracing::instrument(skip(project), fields(project = %project.id))]
pub fn evaluate_frame(project: &Project, t: f64) -> EvaluatedFrame {
    let mut active: Vec<&Layer> = project
        .layers
        .iter()
        .filter(|l| l.is_active_at(t))
        .collect();
    active.sort_by(|a, b| {
        a.track
            .cmp(&b.track)
            .then(a.start_time.total_cmp(&b.start_time))
            .then_with(|| a.id.cmp(&b.id))
    });

    let layers = active.par_iter().map(|l| evaluate(l, t)).collect();
    EvaluatedFrame { time: t, layers }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
