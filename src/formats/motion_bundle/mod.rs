//! Motion-graphics bundles exported to JSON. One project per document;
//! times are seconds.

mod convert;
mod parse;

pub use convert::convert;
pub use parse::parse;

use std::collections::BTreeMap;

use crate::{formats::convert::NativeEffect, foundation::error::ConversionWarning};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MotionDocument {
    pub version: Option<String>,
    pub name: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub frame_rate: Option<f64>,
    pub duration: Option<f64>,
    /// `None` when the document has no `layers` array at all.
    pub layers: Option<Vec<MotionLayer>>,
    pub skipped: Vec<ConversionWarning>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MotionLayer {
    pub name: String,
    pub kind: String,
    pub start_time: f64,
    pub duration: f64,
    pub opacity: f64,
    pub position: (f64, f64),
    pub scale: f64,
    pub rotation: f64,
    pub behaviors: Vec<Behavior>,
    pub particles: bool,
    pub text: Option<String>,
    pub source: Option<String>,
    pub blend_mode: Option<String>,
    pub filters: Vec<NativeEffect>,
    pub keyframes: Vec<MotionKeyframe>,
}

impl Default for MotionLayer {
    fn default() -> Self {
        Self {
            name: "Layer".to_string(),
            kind: "video".to_string(),
            start_time: 0.0,
            duration: 1.0,
            opacity: 1.0,
            position: (0.0, 0.0),
            scale: 1.0,
            rotation: 0.0,
            behaviors: Vec::new(),
            particles: false,
            text: None,
            source: None,
            blend_mode: None,
            filters: Vec::new(),
            keyframes: Vec::new(),
        }
    }
}

impl MotionLayer {
    /// Layer types that render procedurally and only convert approximately.
    pub fn is_procedural(&self) -> bool {
        self.particles
            || matches!(
                self.kind.to_ascii_lowercase().as_str(),
                "particle" | "particles" | "emitter" | "generator" | "replicator"
            )
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Behavior {
    pub name: String,
    pub params: BTreeMap<String, f64>,
}

impl Behavior {
    pub fn is_fade(&self) -> bool {
        let key: String = self
            .name
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        matches!(key.as_str(), "fadeinfadeout" | "fadeinout" | "fade")
    }

    pub fn param(&self, key: &str) -> Option<f64> {
        self.params
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| *v)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MotionKeyframe {
    pub property: String,
    pub time: f64,
    pub value: f64,
    pub easing: Option<String>,
}

pub fn inspect(doc: &MotionDocument) -> Vec<String> {
    let mut notes = Vec::new();
    let layers = doc.layers.as_deref().unwrap_or_default();

    let behaviors = layers
        .iter()
        .flat_map(|l| &l.behaviors)
        .filter(|b| !b.is_fade())
        .count();
    if behaviors > 0 {
        notes.push(format!(
            "{behaviors} behavior(s) have no canonical equivalent and were not applied"
        ));
    }
    let procedural = layers.iter().filter(|l| l.is_procedural()).count();
    if procedural > 0 {
        notes.push(format!(
            "{procedural} particle/generator layer(s) imported as static placeholders"
        ));
    }
    notes.extend(doc.skipped.iter().map(ToString::to_string));
    notes
}

pub fn effect_names(doc: &MotionDocument) -> Vec<&str> {
    doc.layers
        .as_deref()
        .unwrap_or_default()
        .iter()
        .flat_map(|l| &l.filters)
        .map(|f| f.name.as_str())
        .collect()
}
