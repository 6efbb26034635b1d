use super::{AnimatedProperty, CompLayer, Composition, CompositionDocument};
use crate::{
    detect::SourceFormat,
    formats::convert::{
        Conversion, ConvertCtx, NativeEffect, is_still_image, literal_expression,
    },
    foundation::error::{ConversionWarning, SpliceError, SpliceResult},
    model::{
        keyframe::{Easing, Keyframe},
        layer::{Layer, LayerKind, LayerProperties},
        project::Resolution,
    },
};

pub fn convert(doc: &CompositionDocument, mut ctx: ConvertCtx<'_>) -> SpliceResult<Conversion> {
    for w in &doc.skipped {
        ctx.warn(w.clone());
    }
    let comp = ctx
        .select_first(&doc.compositions, "composition", |c| c.name.clone())
        .ok_or(SpliceError::NoTimelineFound(SourceFormat::CompositionGraph))?;
    let resolution = Resolution::or_hd(comp.width, comp.height);
    tracing::debug!(
        composition = %comp.name,
        layers = comp.layers.len(),
        "converting composition graph"
    );

    let mut layers = Vec::with_capacity(comp.layers.len());
    for (idx, native) in comp.layers.iter().enumerate() {
        if native.is_camera_or_light() {
            ctx.warn(ConversionWarning::ClipDropped {
                name: native.name.clone(),
                reason: "camera and light layers have no canonical equivalent".to_string(),
            });
            continue;
        }
        if let Some(layer) = convert_layer(&mut ctx, doc, comp, native, idx, resolution) {
            layers.push(layer);
        }
    }

    // The first layer in a composition is the topmost; canonical tracks count
    // upwards from the bottom.
    let count = layers.len();
    for (rank, layer) in layers.iter_mut().enumerate() {
        layer.track = u32::try_from(count - 1 - rank).unwrap_or(u32::MAX);
    }

    Ok(ctx.finish(&comp.name, resolution, comp.duration, layers))
}

fn layer_kind(doc: &CompositionDocument, native: &CompLayer) -> LayerKind {
    let m = native.match_name.to_ascii_lowercase();
    if m.contains("text") {
        return LayerKind::Text;
    }
    if m.contains("shape") || m.contains("vector") {
        return LayerKind::Shape;
    }
    if m.contains("audio") {
        return LayerKind::Audio;
    }
    let still = native
        .source
        .as_deref()
        .and_then(|id| doc.footage(id))
        .and_then(|f| f.path.as_deref())
        .is_some_and(is_still_image);
    if still {
        LayerKind::Image
    } else {
        LayerKind::Video
    }
}

fn convert_layer(
    ctx: &mut ConvertCtx<'_>,
    doc: &CompositionDocument,
    comp: &Composition,
    native: &CompLayer,
    idx: usize,
    resolution: Resolution,
) -> Option<Layer> {
    let start = native.in_point.max(0.0);
    let end = native
        .out_point
        .or(comp.duration)
        .unwrap_or(start);
    if end <= start {
        ctx.warn(ConversionWarning::ClipDropped {
            name: native.name.clone(),
            reason: "out point is not after in point".to_string(),
        });
        return None;
    }

    let kind = layer_kind(doc, native);
    let mut layer = Layer::new(format!("layer{idx}"), kind, native.name.clone(), start, end - start);
    layer.properties = LayerProperties::full_frame(resolution.width, resolution.height);
    layer.source = native.source.as_ref().map(|id| {
        doc.footage(id)
            .and_then(|f| f.path.clone())
            .unwrap_or_else(|| id.clone())
    });
    layer.text = native.text.clone();

    if native.three_d {
        ctx.warn(ConversionWarning::DepthCollapsed {
            layer: native.name.clone(),
        });
    }

    for (prop_name, prop) in native.transform.iter() {
        apply_property(ctx, &mut layer, native.in_point, prop_name, prop);
    }

    let effects: Vec<NativeEffect> = native
        .effects
        .iter()
        .map(|e| NativeEffect {
            name: e.native_name().to_string(),
            enabled: e.enabled,
            params: e.params.clone(),
        })
        .collect();
    layer.effects = ctx.map_effects(&layer, &effects);
    layer.blend_mode = ctx.blend_mode(&layer, native.blending_mode.as_deref());
    Some(layer)
}

/// Canonical (property, component index, divisor) tracks for one native
/// transform property.
fn tracks_for(prop_name: &str) -> &'static [(&'static str, usize, f64)] {
    match prop_name {
        "position" => &[("x", 0, 1.0), ("y", 1, 1.0)],
        "anchorPoint" => &[("anchorX", 0, 1.0), ("anchorY", 1, 1.0)],
        "scale" => &[("scale", 0, 100.0)],
        "opacity" => &[("opacity", 0, 100.0)],
        "rotation" => &[("rotation", 0, 1.0)],
        _ => &[],
    }
}

fn apply_property(
    ctx: &mut ConvertCtx<'_>,
    layer: &mut Layer,
    in_point: f64,
    prop_name: &str,
    prop: &AnimatedProperty,
) {
    let tracks = tracks_for(prop_name);

    for &(canonical, component, divisor) in tracks {
        if let Some(v) = prop.value.get(component) {
            layer.properties.set(canonical, v / divisor);
        }
        for k in &prop.keyframes {
            let Some(v) = k.value.get(component) else {
                continue;
            };
            let easing = k
                .easing
                .as_deref()
                .map(|e| Easing::from_native(e, k.bezier))
                .unwrap_or_default();
            layer.keyframes.push(
                Keyframe::new(canonical, k.time - in_point, v / divisor).with_easing(easing),
            );
        }
    }

    let Some(expr) = prop.expression.as_deref() else {
        return;
    };
    let literal = ctx
        .options
        .approximate_expressions
        .then(|| literal_expression(expr))
        .flatten()
        .filter(|values| !tracks.is_empty() && values.len() >= tracks.len());
    let Some(values) = literal else {
        ctx.warn(ConversionWarning::ExpressionDropped {
            layer: layer.name.clone(),
            property: prop_name.to_string(),
        });
        return;
    };

    // A literal expression overrides the property's own animation.
    layer
        .keyframes
        .retain(|k| !tracks.iter().any(|(name, _, _)| k.property == *name));
    for &(canonical, component, divisor) in tracks {
        let v = values[component] / divisor;
        layer.properties.set(canonical, v);
        layer.keyframes.push(Keyframe::new(canonical, 0.0, v));
    }
    ctx.warn(ConversionWarning::ExpressionApproximated {
        layer: layer.name.clone(),
        property: prop_name.to_string(),
    });
}

#[cfg(test)]
#[path = "../../../tests/unit/formats/composition_graph/convert.rs"]
mod tests;
