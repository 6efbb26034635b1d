use serde_json::Value;

use super::{
    AnimatedProperty, CompEffect, CompKeyframe, CompLayer, Composition, CompositionDocument,
    FootageItem, Transform,
};
use crate::{
    detect::SourceFormat,
    formats::json::{field_array, field_number, field_str, number, numbers, parse_object},
    foundation::error::{ConversionWarning, SpliceError, SpliceResult},
};

pub fn parse(content: &str) -> SpliceResult<CompositionDocument> {
    let root = parse_object(content)
        .map_err(|e| SpliceError::parse(SourceFormat::CompositionGraph, e))?;

    let mut doc = CompositionDocument {
        version: root.get("version").map(scalar_string),
        ..CompositionDocument::default()
    };

    for (idx, item) in field_array(&root, "items").iter().enumerate() {
        if !item.is_object() {
            doc.skipped.push(skipped("item", format!("items[{idx}] is not an object")));
            continue;
        }
        match field_str(item, "typeName") {
            Some("Composition") => {
                let comp = parse_composition(item, &mut doc.skipped);
                doc.compositions.push(comp);
            }
            Some("Footage") => doc.footage.push(FootageItem {
                id: item.get("id").map(scalar_string),
                name: field_str(item, "name").unwrap_or_default().to_string(),
                path: footage_path(item),
            }),
            _ => {}
        }
    }
    Ok(doc)
}

fn skipped(context: &str, detail: String) -> ConversionWarning {
    ConversionWarning::SkippedNode {
        context: context.to_string(),
        detail,
    }
}

/// Ids are written as numbers or strings.
fn scalar_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn footage_path(item: &Value) -> Option<String> {
    let file = item.get("file");
    file.and_then(|f| field_str(f, "fsName"))
        .or_else(|| file.and_then(Value::as_str))
        .or_else(|| field_str(item, "path"))
        .map(str::to_string)
}

fn dimension(obj: &Value, key: &str) -> Option<u32> {
    field_number(obj, key)
        .filter(|v| *v >= 1.0 && *v <= f64::from(u32::MAX))
        .map(|v| v.round() as u32)
}

fn parse_composition(item: &Value, skipped_nodes: &mut Vec<ConversionWarning>) -> Composition {
    let name = field_str(item, "name").unwrap_or("Untitled Composition").to_string();
    let mut layers = Vec::new();
    for (idx, layer) in field_array(item, "layers").iter().enumerate() {
        if !layer.is_object() {
            skipped_nodes.push(skipped(
                "layer",
                format!("'{name}' layers[{idx}] is not an object"),
            ));
            continue;
        }
        layers.push(parse_layer(layer));
    }

    Composition {
        id: item.get("id").map(scalar_string),
        width: dimension(item, "width"),
        height: dimension(item, "height"),
        duration: field_number(item, "duration"),
        frame_rate: field_number(item, "frameRate"),
        layers,
        name,
    }
}

fn parse_layer(layer: &Value) -> CompLayer {
    CompLayer {
        name: field_str(layer, "name").unwrap_or("Layer").to_string(),
        match_name: field_str(layer, "matchName").unwrap_or("AVLayer").to_string(),
        in_point: field_number(layer, "inPoint").unwrap_or(0.0),
        out_point: field_number(layer, "outPoint"),
        start_time: field_number(layer, "startTime").unwrap_or(0.0),
        source: layer
            .get("source")
            .filter(|v| !v.is_null())
            .map(|v| match v.get("id") {
                Some(id) => scalar_string(id),
                None => scalar_string(v),
            }),
        three_d: layer
            .get("threeDLayer")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        blending_mode: layer.get("blendingMode").and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }),
        text: layer_text(layer),
        transform: layer.get("transform").map(parse_transform).unwrap_or_default(),
        effects: field_array(layer, "effects")
            .iter()
            .filter(|e| e.is_object())
            .map(parse_effect)
            .collect(),
        masks: field_array(layer, "masks").len(),
    }
}

fn layer_text(layer: &Value) -> Option<String> {
    let text = layer.get("text")?;
    match text {
        Value::String(s) => Some(s.clone()),
        Value::Object(_) => field_str(text, "text")
            .or_else(|| field_str(text, "sourceText"))
            .map(str::to_string),
        _ => None,
    }
}

fn parse_transform(t: &Value) -> Transform {
    let prop = |key: &str| t.get(key).and_then(parse_property);
    Transform {
        position: prop("position"),
        scale: prop("scale"),
        rotation: prop("rotation"),
        opacity: prop("opacity"),
        anchor_point: prop("anchorPoint"),
    }
}

fn components(v: &Value) -> Option<Vec<f64>> {
    number(v)
        .map(|n| vec![n])
        .or_else(|| numbers(v).filter(|n| !n.is_empty()))
}

/// A transform property is either a bare value or
/// `{value, keyframes, expression}`.
fn parse_property(v: &Value) -> Option<AnimatedProperty> {
    if let Some(value) = components(v) {
        return Some(AnimatedProperty {
            value,
            ..AnimatedProperty::default()
        });
    }
    if !v.is_object() {
        return None;
    }

    let keyframes = field_array(v, "keyframes")
        .iter()
        .filter_map(|k| {
            let time = field_number(k, "time")?;
            let value = k.get("value").and_then(components)?;
            let bezier = k
                .get("bezier")
                .and_then(numbers)
                .and_then(|b| <[f64; 4]>::try_from(b.as_slice()).ok());
            Some(CompKeyframe {
                time,
                value,
                easing: field_str(k, "easing").map(str::to_string),
                bezier,
            })
        })
        .collect();

    Some(AnimatedProperty {
        value: v.get("value").and_then(components).unwrap_or_default(),
        keyframes,
        expression: field_str(v, "expression")
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string),
    })
}

fn parse_effect(e: &Value) -> CompEffect {
    let params = match e.get("parameters") {
        Some(Value::Object(map)) => map
            .iter()
            .filter_map(|(k, v)| number(v).map(|n| (k.clone(), n)))
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|p| {
                let key = field_str(p, "name").or_else(|| field_str(p, "matchName"))?;
                Some((key.to_string(), field_number(p, "value")?))
            })
            .collect(),
        _ => Default::default(),
    };

    CompEffect {
        match_name: field_str(e, "matchName").map(str::to_string),
        name: field_str(e, "name").map(str::to_string),
        enabled: e.get("enabled").and_then(Value::as_bool).unwrap_or(true),
        params,
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/formats/composition_graph/parse.rs"]
mod tests;
