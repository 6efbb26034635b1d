use std::collections::BTreeMap;

use super::{ClipItem, IntrinsicFilter, MarkupDocument, TrackKind, TransitionItem};
use crate::{
    detect::SourceFormat,
    formats::convert::{Conversion, ConvertCtx, NativeEffect, is_still_image},
    foundation::{
        error::{ConversionWarning, SpliceError, SpliceResult},
        time::FrameRate,
    },
    model::{
        keyframe::Keyframe,
        layer::{Layer, LayerKind, LayerProperties},
        project::Resolution,
    },
};

/// Half a frame; frame positions closer than this are the same edit point.
const EDIT_POINT_EPS: f64 = 0.5;

pub fn convert(doc: &MarkupDocument, mut ctx: ConvertCtx<'_>) -> SpliceResult<Conversion> {
    for w in &doc.skipped {
        ctx.warn(w.clone());
    }
    let seq = ctx
        .select_first(&doc.sequences, "sequence", |s| s.name.clone())
        .ok_or(SpliceError::NoTimelineFound(SourceFormat::MarkupSequence))?;

    let rate = seq.frame_rate();
    let resolution = Resolution::or_hd(seq.width, seq.height);
    tracing::debug!(
        sequence = %seq.name,
        fps = rate.fps(),
        tracks = seq.tracks.len(),
        clips = seq.clip_count(),
        "converting markup sequence"
    );

    let mut layers = Vec::with_capacity(seq.clip_count());
    for (track_idx, track) in seq.tracks.iter().enumerate() {
        // (layer index, start frame, end frame) of every clip kept on this track.
        let mut placed: Vec<(usize, f64, f64)> = Vec::new();
        let mut prev_end = 0.0;

        for (clip_idx, clip) in track.clips.iter().enumerate() {
            let Some((start, end)) = clip_range(clip, prev_end) else {
                ctx.warn(ConversionWarning::ClipDropped {
                    name: clip.name.clone(),
                    reason: "non-positive duration".to_string(),
                });
                continue;
            };
            prev_end = end;

            let kind = match track.kind {
                TrackKind::Audio => LayerKind::Audio,
                TrackKind::Video if clip.source.as_deref().is_some_and(is_still_image) => {
                    LayerKind::Image
                }
                TrackKind::Video => LayerKind::Video,
            };
            let mut layer = Layer::new(
                format!("track{track_idx}-clip{clip_idx}"),
                kind,
                clip.name.clone(),
                rate.frames_to_secs(start),
                rate.frames_to_secs(end - start),
            );
            layer.track = u32::try_from(track_idx).unwrap_or(u32::MAX);
            layer.source = clip.source.clone();
            if kind != LayerKind::Audio {
                layer.properties = LayerProperties::full_frame(resolution.width, resolution.height);
            }

            apply_clip(&mut ctx, &mut layer, clip, rate, resolution);
            placed.push((layers.len(), start, end));
            layers.push(layer);
        }

        for item in &track.transitions {
            attach_transition_item(&mut ctx, &mut layers, &placed, item, rate, track_idx);
        }
    }

    let declared = seq.duration.map(|d| rate.frames_to_secs(d));
    Ok(ctx.finish(&seq.name, resolution, declared, layers))
}

/// Start and end frame of a clip. Unset starts follow the previous clip on
/// the track; unset ends come from the in/out range.
fn clip_range(clip: &ClipItem, prev_end: f64) -> Option<(f64, f64)> {
    let media_len = match (clip.in_point, clip.out_point) {
        (Some(i), Some(o)) => Some(o - i),
        _ => None,
    };
    let start = clip
        .start
        .or_else(|| clip.end.zip(media_len).map(|(e, len)| e - len))
        .unwrap_or(prev_end)
        .max(0.0);
    let end = clip.end.or_else(|| media_len.map(|len| start + len))?;
    (end > start).then_some((start, end))
}

fn apply_clip(
    ctx: &mut ConvertCtx<'_>,
    layer: &mut Layer,
    clip: &ClipItem,
    rate: FrameRate,
    resolution: Resolution,
) {
    let in_point = clip.in_point.unwrap_or(0.0);
    let local = |when: f64| rate.frames_to_secs(when - in_point).max(0.0);
    let (w, h) = (f64::from(resolution.width), f64::from(resolution.height));

    let mut native_effects = Vec::new();
    for filter in &clip.filters {
        match IntrinsicFilter::of(&filter.name) {
            Some(IntrinsicFilter::Opacity) => {
                for p in filter.params.iter().filter(|p| p.is("opacity")) {
                    if let Some(v) = p.value {
                        layer.properties.opacity = v / 100.0;
                    }
                    for k in &p.keyframes {
                        layer
                            .keyframes
                            .push(Keyframe::new("opacity", local(k.when), k.value / 100.0));
                    }
                }
            }
            Some(IntrinsicFilter::Motion) => {
                for p in &filter.params {
                    if p.is("scale") {
                        if let Some(v) = p.value {
                            layer.properties.scale = v / 100.0;
                        }
                        for k in &p.keyframes {
                            layer
                                .keyframes
                                .push(Keyframe::new("scale", local(k.when), k.value / 100.0));
                        }
                    } else if p.is("rotation") {
                        if let Some(v) = p.value {
                            layer.properties.rotation = v;
                        }
                        for k in &p.keyframes {
                            layer
                                .keyframes
                                .push(Keyframe::new("rotation", local(k.when), k.value));
                        }
                    } else if p.is("center") {
                        // Center is a frame-relative offset from the middle.
                        if let Some(v) = p.value {
                            layer.properties.x = v * w;
                        }
                        if let Some(v) = p.value_y {
                            layer.properties.y = v * h;
                        }
                        for k in &p.keyframes {
                            let t = local(k.when);
                            layer.keyframes.push(Keyframe::new("x", t, k.value * w));
                            if let Some(vy) = k.value_y {
                                layer.keyframes.push(Keyframe::new("y", t, vy * h));
                            }
                        }
                    }
                }
            }
            None => native_effects.push(NativeEffect {
                name: filter.name.clone(),
                enabled: filter.enabled,
                params: filter
                    .params
                    .iter()
                    .filter_map(|p| p.value.map(|v| (p.name.clone(), v)))
                    .collect::<BTreeMap<_, _>>(),
            }),
        }
    }
    layer.effects = ctx.map_effects(layer, &native_effects);
    layer.blend_mode = ctx.blend_mode(layer, clip.composite_mode.as_deref());

    if let Some(tr) = &clip.transition_in {
        let secs = rate.frames_to_secs(tr.duration.unwrap_or(0.0));
        layer.transition_in = ctx.transition(layer, &tr.name, secs, None, None);
    }
    if let Some(tr) = &clip.transition_out {
        let secs = rate.frames_to_secs(tr.duration.unwrap_or(0.0));
        layer.transition_out = ctx.transition(layer, &tr.name, secs, None, None);
    }
}

/// Attach a track-level transition to the clip it is aligned with. Start
/// alignment belongs to the clip that begins at the item; end alignment to
/// the one that ends there; centered items go to the incoming clip, or to
/// the outgoing clip when nothing follows.
fn attach_transition_item(
    ctx: &mut ConvertCtx<'_>,
    layers: &mut [Layer],
    placed: &[(usize, f64, f64)],
    item: &TransitionItem,
    rate: FrameRate,
    track_idx: usize,
) {
    let dropped = |reason: &str| ConversionWarning::TransitionDropped {
        layer: format!("track {track_idx}"),
        name: item.name.clone(),
        reason: reason.to_string(),
    };
    let (Some(start), Some(end)) = (item.start, item.end) else {
        ctx.warn(dropped("missing start or end"));
        return;
    };

    let near = |a: f64, b: f64| (a - b).abs() < EDIT_POINT_EPS;
    let within = |f: f64| f + EDIT_POINT_EPS >= start && f <= end + EDIT_POINT_EPS;
    let incoming = || placed.iter().find(|(_, s, _)| within(*s)).map(|p| p.0);
    let outgoing = || placed.iter().find(|(_, _, e)| within(*e)).map(|p| p.0);

    let target = match item.alignment.as_deref() {
        Some("start" | "start-black") => placed
            .iter()
            .find(|(_, s, _)| near(*s, start))
            .map(|p| (p.0, true)),
        Some("end" | "end-black") => placed
            .iter()
            .find(|(_, _, e)| near(*e, end))
            .map(|p| (p.0, false)),
        _ => incoming()
            .map(|i| (i, true))
            .or_else(|| outgoing().map(|i| (i, false))),
    };
    let Some((idx, is_in)) = target else {
        ctx.warn(dropped("no adjacent clip"));
        return;
    };

    let layer = &layers[idx];
    let slot_taken = if is_in {
        layer.transition_in.is_some()
    } else {
        layer.transition_out.is_some()
    };
    if slot_taken {
        ctx.warn(ConversionWarning::TransitionDropped {
            layer: layer.name.clone(),
            name: item.name.clone(),
            reason: "edge already has a transition".to_string(),
        });
        return;
    }
    let transition = ctx.transition(layer, &item.name, rate.frames_to_secs(end - start), None, None);
    let layer = &mut layers[idx];
    if is_in {
        layer.transition_in = transition;
    } else {
        layer.transition_out = transition;
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/formats/markup_sequence/convert.rs"]
mod tests;
