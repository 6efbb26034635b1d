use serde_json::Value;

use super::{Behavior, MotionDocument, MotionKeyframe, MotionLayer};
use crate::{
    detect::SourceFormat,
    formats::{
        convert::NativeEffect,
        json::{field_array, field_number, field_str, number, numbers, parse_object, scalar_or_first},
    },
    foundation::error::{ConversionWarning, SpliceError, SpliceResult},
};

pub fn parse(content: &str) -> SpliceResult<MotionDocument> {
    let root =
        parse_object(content).map_err(|e| SpliceError::parse(SourceFormat::MotionBundle, e))?;

    let dim = |key: &str| {
        field_number(&root, key)
            .filter(|v| *v >= 1.0 && *v <= f64::from(u32::MAX))
            .map(|v| v.round() as u32)
    };

    let mut doc = MotionDocument {
        version: root.get("version").map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }),
        name: field_str(&root, "projectName")
            .unwrap_or("Untitled Motion Project")
            .to_string(),
        width: dim("width"),
        height: dim("height"),
        frame_rate: field_number(&root, "frameRate").filter(|v| *v > 0.0),
        duration: field_number(&root, "duration"),
        ..MotionDocument::default()
    };

    if let Some(Value::Array(items)) = root.get("layers") {
        let mut layers = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            if item.is_object() {
                layers.push(parse_layer(item));
            } else {
                doc.skipped.push(ConversionWarning::SkippedNode {
                    context: "layer".to_string(),
                    detail: format!("layers[{idx}] is not an object"),
                });
            }
        }
        doc.layers = Some(layers);
    }
    Ok(doc)
}

fn params_of(v: &Value) -> std::collections::BTreeMap<String, f64> {
    match v {
        Value::Object(map) => map
            .iter()
            .filter_map(|(k, v)| number(v).map(|n| (k.clone(), n)))
            .collect(),
        _ => Default::default(),
    }
}

fn parse_layer(v: &Value) -> MotionLayer {
    let defaults = MotionLayer::default();
    let position = v
        .get("position")
        .and_then(numbers)
        .map(|p| {
            (
                p.first().copied().unwrap_or(0.0),
                p.get(1).copied().unwrap_or(0.0),
            )
        })
        .unwrap_or(defaults.position);

    MotionLayer {
        name: field_str(v, "name").unwrap_or(&defaults.name).to_string(),
        kind: field_str(v, "type").unwrap_or(&defaults.kind).to_string(),
        start_time: field_number(v, "startTime").unwrap_or(defaults.start_time),
        duration: field_number(v, "duration").unwrap_or(defaults.duration),
        opacity: field_number(v, "opacity").unwrap_or(defaults.opacity),
        position,
        scale: v
            .get("scale")
            .and_then(scalar_or_first)
            .unwrap_or(defaults.scale),
        rotation: field_number(v, "rotation").unwrap_or(defaults.rotation),
        behaviors: field_array(v, "behaviors")
            .iter()
            .filter_map(|b| match b {
                Value::String(name) => Some(Behavior {
                    name: name.clone(),
                    ..Behavior::default()
                }),
                Value::Object(_) => Some(Behavior {
                    name: field_str(b, "name")
                        .or_else(|| field_str(b, "type"))
                        .unwrap_or("Behavior")
                        .to_string(),
                    params: b.get("params").map(params_of).unwrap_or_else(|| params_of(b)),
                }),
                _ => None,
            })
            .collect(),
        particles: v.get("particles").is_some_and(|p| !p.is_null()),
        text: field_str(v, "text").map(str::to_string),
        source: field_str(v, "source").map(str::to_string),
        blend_mode: field_str(v, "blendMode").map(str::to_string),
        filters: field_array(v, "filters")
            .iter()
            .filter_map(|f| {
                Some(NativeEffect {
                    name: field_str(f, "name")?.to_string(),
                    enabled: f.get("enabled").and_then(Value::as_bool).unwrap_or(true),
                    params: f.get("params").map(params_of).unwrap_or_default(),
                })
            })
            .collect(),
        keyframes: field_array(v, "keyframes")
            .iter()
            .filter_map(|k| {
                Some(MotionKeyframe {
                    property: field_str(k, "property")?.to_string(),
                    time: field_number(k, "time")?,
                    value: field_number(k, "value")?,
                    easing: field_str(k, "easing").map(str::to_string),
                })
            })
            .collect(),
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/formats/motion_bundle/parse.rs"]
mod tests;
