//! Composition-graph projects exported to JSON by an editor script.
//!
//! Times are composition seconds; transform values keep the native units
//! (pixels, percent, degrees).

mod convert;
mod parse;

pub use convert::convert;
pub use parse::parse;

use std::collections::BTreeMap;

use crate::{formats::convert::multiple_timelines, foundation::error::ConversionWarning};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompositionDocument {
    pub version: Option<String>,
    pub compositions: Vec<Composition>,
    pub footage: Vec<FootageItem>,
    pub skipped: Vec<ConversionWarning>,
}

impl CompositionDocument {
    pub fn footage(&self, id: &str) -> Option<&FootageItem> {
        self.footage.iter().find(|f| f.id.as_deref() == Some(id))
    }

    pub fn is_composition(&self, id: &str) -> bool {
        self.compositions.iter().any(|c| c.id.as_deref() == Some(id))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FootageItem {
    pub id: Option<String>,
    pub name: String,
    pub path: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Composition {
    pub id: Option<String>,
    pub name: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub duration: Option<f64>,
    pub frame_rate: Option<f64>,
    pub layers: Vec<CompLayer>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompLayer {
    pub name: String,
    pub match_name: String,
    pub in_point: f64,
    pub out_point: Option<f64>,
    pub start_time: f64,
    pub source: Option<String>,
    pub three_d: bool,
    pub blending_mode: Option<String>,
    pub text: Option<String>,
    pub transform: Transform,
    pub effects: Vec<CompEffect>,
    pub masks: usize,
}

impl CompLayer {
    pub fn is_camera_or_light(&self) -> bool {
        let m = self.match_name.to_ascii_lowercase();
        m.contains("camera") || m.contains("light")
    }

    pub fn has_expressions(&self) -> bool {
        self.transform
            .iter()
            .any(|(_, p)| p.expression.is_some())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transform {
    pub position: Option<AnimatedProperty>,
    pub scale: Option<AnimatedProperty>,
    pub rotation: Option<AnimatedProperty>,
    pub opacity: Option<AnimatedProperty>,
    pub anchor_point: Option<AnimatedProperty>,
}

impl Transform {
    /// Present properties with their native names.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &AnimatedProperty)> {
        [
            ("position", &self.position),
            ("scale", &self.scale),
            ("rotation", &self.rotation),
            ("opacity", &self.opacity),
            ("anchorPoint", &self.anchor_point),
        ]
        .into_iter()
        .filter_map(|(name, p)| p.as_ref().map(|p| (name, p)))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimatedProperty {
    /// Scalar values are stored as a single component.
    pub value: Vec<f64>,
    pub keyframes: Vec<CompKeyframe>,
    pub expression: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompKeyframe {
    pub time: f64,
    pub value: Vec<f64>,
    pub easing: Option<String>,
    pub bezier: Option<[f64; 4]>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompEffect {
    pub match_name: Option<String>,
    pub name: Option<String>,
    pub enabled: bool,
    pub params: BTreeMap<String, f64>,
}

impl CompEffect {
    /// The identifier the effect table knows, preferring the internal match
    /// name over the localized display name.
    pub fn native_name(&self) -> &str {
        let known = |n: &&String| crate::effects::mapper::lookup(n).is_some();
        self.match_name
            .as_ref()
            .filter(known)
            .or_else(|| self.name.as_ref().filter(known))
            .or(self.name.as_ref())
            .or(self.match_name.as_ref())
            .map(String::as_str)
            .unwrap_or("Unknown Effect")
    }
}

pub fn inspect(doc: &CompositionDocument) -> Vec<String> {
    let mut notes: Vec<String> =
        multiple_timelines(&doc.compositions, "composition", |c| c.name.clone())
            .into_iter()
            .map(|w| w.to_string())
            .collect();

    if let Some(comp) = doc.compositions.first() {
        let count = |f: &dyn Fn(&CompLayer) -> bool| comp.layers.iter().filter(|l| f(l)).count();

        let masks: usize = comp.layers.iter().map(|l| l.masks).sum();
        if masks > 0 {
            notes.push(format!("{masks} mask(s) dropped; masks have no canonical equivalent"));
        }
        let depth = count(&|l| l.three_d);
        if depth > 0 {
            notes.push(format!("{depth} 3D layer(s) flattened to 2D"));
        }
        let expr = count(&|l| l.has_expressions());
        if expr > 0 {
            notes.push(format!("{expr} layer(s) carry expressions"));
        }
        let rigs = count(&|l| l.is_camera_or_light());
        if rigs > 0 {
            notes.push(format!("{rigs} camera/light layer(s) dropped"));
        }
        let nested = count(&|l| l.source.as_deref().is_some_and(|s| doc.is_composition(s)));
        if nested > 0 {
            notes.push(format!("{nested} nested composition layer(s) flattened"));
        }
    }
    notes.extend(doc.skipped.iter().map(ToString::to_string));
    notes
}

pub fn effect_names(doc: &CompositionDocument) -> Vec<&str> {
    doc.compositions
        .first()
        .into_iter()
        .flat_map(|c| &c.layers)
        .filter(|l| !l.is_camera_or_light())
        .flat_map(|l| &l.effects)
        .map(CompEffect::native_name)
        .collect()
}
