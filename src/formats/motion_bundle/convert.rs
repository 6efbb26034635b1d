use super::{Behavior, MotionDocument, MotionLayer};
use crate::{
    detect::SourceFormat,
    formats::convert::{Conversion, ConvertCtx},
    foundation::{
        error::{ConversionWarning, SpliceError, SpliceResult},
        time::FrameRate,
    },
    model::{
        keyframe::{Easing, Keyframe},
        layer::{Layer, LayerKind, LayerProperties},
        project::Resolution,
    },
};

/// Fade length the behavior uses when the export names none.
const DEFAULT_FADE_FRAMES: f64 = 20.0;

pub fn convert(doc: &MotionDocument, mut ctx: ConvertCtx<'_>) -> SpliceResult<Conversion> {
    for w in &doc.skipped {
        ctx.warn(w.clone());
    }
    let native_layers = doc
        .layers
        .as_deref()
        .ok_or(SpliceError::NoTimelineFound(SourceFormat::MotionBundle))?;

    let resolution = Resolution::or_hd(doc.width, doc.height);
    let rate = doc
        .frame_rate
        .and_then(FrameRate::new)
        .unwrap_or_default();
    tracing::debug!(project = %doc.name, layers = native_layers.len(), "converting motion bundle");

    let mut layers = Vec::with_capacity(native_layers.len());
    for (idx, native) in native_layers.iter().enumerate() {
        if !native.duration.is_finite() || native.duration <= 0.0 {
            ctx.warn(ConversionWarning::ClipDropped {
                name: native.name.clone(),
                reason: "non-positive duration".to_string(),
            });
            continue;
        }
        let mut layer = convert_layer(&mut ctx, native, idx, resolution);
        layer.track = u32::try_from(idx).unwrap_or(u32::MAX);
        apply_fades(&mut ctx, &mut layer, &native.behaviors, rate);
        layers.push(layer);
    }

    Ok(ctx.finish(&doc.name, resolution, doc.duration, layers))
}

fn layer_kind(kind: &str) -> LayerKind {
    match kind.to_ascii_lowercase().as_str() {
        "image" | "still" => LayerKind::Image,
        "text" | "title" => LayerKind::Text,
        "shape" | "mask" => LayerKind::Shape,
        "audio" => LayerKind::Audio,
        _ => LayerKind::Video,
    }
}

fn convert_layer(
    ctx: &mut ConvertCtx<'_>,
    native: &MotionLayer,
    idx: usize,
    resolution: Resolution,
) -> Layer {
    let kind = layer_kind(&native.kind);
    let start = native.start_time.max(0.0);
    let mut layer = Layer::new(
        format!("layer{idx}"),
        kind,
        native.name.clone(),
        start,
        native.duration,
    );

    layer.properties = LayerProperties {
        x: native.position.0,
        y: native.position.1,
        opacity: native.opacity,
        scale: native.scale,
        rotation: native.rotation,
        ..LayerProperties::full_frame(resolution.width, resolution.height)
    };
    layer.text = native.text.clone();
    layer.source = native.source.clone();

    layer.keyframes = native
        .keyframes
        .iter()
        .map(|k| {
            let easing = k
                .easing
                .as_deref()
                .map(|e| Easing::from_native(e, None))
                .unwrap_or_default();
            Keyframe::new(k.property.clone(), k.time, k.value).with_easing(easing)
        })
        .collect();

    layer.effects = ctx.map_effects(&layer, &native.filters);
    layer.blend_mode = ctx.blend_mode(&layer, native.blend_mode.as_deref());
    layer
}

/// Fade length in seconds for one edge of a fade behavior. Keys ending in
/// `Frames` are frame counts; the others are seconds.
fn fade_secs(b: &Behavior, edge: &str, rate: FrameRate) -> f64 {
    let secs = [
        format!("fade{edge}"),
        format!("fade{edge}Time"),
        format!("fade{edge}Duration"),
    ]
    .iter()
    .find_map(|k| b.param(k));
    secs.or_else(|| b.param(&format!("fade{edge}Frames")).map(|f| rate.frames_to_secs(f)))
        .unwrap_or_else(|| rate.frames_to_secs(DEFAULT_FADE_FRAMES))
}

fn apply_fades(ctx: &mut ConvertCtx<'_>, layer: &mut Layer, behaviors: &[Behavior], rate: FrameRate) {
    let mut fades = behaviors.iter().filter(|b| b.is_fade());
    let Some(fade) = fades.next() else {
        return;
    };
    for extra in fades {
        ctx.warn(ConversionWarning::TransitionDropped {
            layer: layer.name.clone(),
            name: extra.name.clone(),
            reason: "edge already has a transition".to_string(),
        });
    }
    let fade_in = fade_secs(fade, "In", rate);
    let fade_out = fade_secs(fade, "Out", rate);
    if fade_in > 0.0 {
        layer.transition_in = ctx.transition(layer, "Fade", fade_in, None, None);
    }
    if fade_out > 0.0 {
        layer.transition_out = ctx.transition(layer, "Fade", fade_out, None, None);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/formats/motion_bundle/convert.rs"]
mod tests;
