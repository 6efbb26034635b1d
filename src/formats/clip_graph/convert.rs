use super::{ClipGraphDocument, Edge, TimelineClip, TrackKind};
use crate::{
    detect::SourceFormat,
    formats::convert::{Conversion, ConvertCtx, NativeEffect, finite_or, is_still_image},
    foundation::error::{ConversionWarning, SpliceError, SpliceResult},
    model::{
        layer::{Layer, LayerKind, LayerProperties},
        project::Resolution,
    },
};

pub fn convert(doc: &ClipGraphDocument, mut ctx: ConvertCtx<'_>) -> SpliceResult<Conversion> {
    for w in &doc.skipped {
        ctx.warn(w.clone());
    }
    let timeline = ctx
        .select_first(&doc.timelines, "timeline", |t| t.name.clone())
        .ok_or(SpliceError::NoTimelineFound(SourceFormat::ClipGraph))?;

    let resolution = Resolution::or_hd(timeline.width, timeline.height);
    tracing::debug!(
        timeline = %timeline.name,
        fps = timeline.frame_rate.unwrap_or_default(),
        tracks = timeline.tracks.len(),
        clips = timeline.clip_count(),
        media = doc.media.len(),
        "converting clip graph"
    );

    let mut layers = Vec::with_capacity(timeline.clip_count());
    for (track_idx, track) in timeline.tracks.iter().enumerate() {
        for (clip_idx, clip) in track.clips.iter().enumerate() {
            let media = clip.media_id.as_deref().and_then(|id| doc.media(id));
            let duration = clip
                .duration
                .filter(|d| *d > 0.0)
                .or_else(|| media.and_then(|m| m.duration));
            let Some(duration) = duration else {
                ctx.warn(ConversionWarning::ClipDropped {
                    name: clip.name.clone(),
                    reason: "no duration on the clip or its media".to_string(),
                });
                continue;
            };
            if clip.offset < 0.0 {
                ctx.warn(ConversionWarning::ClipDropped {
                    name: clip.name.clone(),
                    reason: "starts before the timeline".to_string(),
                });
                continue;
            }

            let path = media.and_then(|m| m.path.as_deref());
            let kind = match track.kind {
                TrackKind::Audio => LayerKind::Audio,
                TrackKind::Subtitle => LayerKind::Text,
                TrackKind::Video if path.is_some_and(is_still_image) => LayerKind::Image,
                TrackKind::Video if clip.text.is_some() => LayerKind::Text,
                TrackKind::Video => LayerKind::Video,
            };
            let mut layer = Layer::new(
                format!("track{track_idx}-clip{clip_idx}"),
                kind,
                clip.name.clone(),
                clip.offset,
                duration,
            );
            layer.track = u32::try_from(track_idx).unwrap_or(u32::MAX);
            layer.source = path.map(str::to_string);
            if kind != LayerKind::Audio {
                layer.properties = LayerProperties::full_frame(resolution.width, resolution.height);
            }
            apply_clip(&mut ctx, &mut layer, clip);
            layers.push(layer);
        }
    }

    Ok(ctx.finish(&timeline.name, resolution, timeline.duration, layers))
}

fn apply_clip(ctx: &mut ConvertCtx<'_>, layer: &mut Layer, clip: &TimelineClip) {
    layer.properties.opacity = finite_or(clip.opacity, 1.0);
    layer.text = clip.text.clone();

    let mut effects: Vec<NativeEffect> = clip.effects.clone();
    if let Some(grade) = clip.color_grade {
        effects.push(grade.to_native());
    }
    layer.effects = ctx.map_effects(layer, &effects);
    layer.blend_mode = ctx.blend_mode(layer, clip.composite_mode.as_deref());

    for tr in &clip.transitions {
        let slot = match tr.edge {
            Edge::In => &layer.transition_in,
            Edge::Out => &layer.transition_out,
        };
        if slot.is_some() {
            ctx.warn(ConversionWarning::TransitionDropped {
                layer: layer.name.clone(),
                name: tr.name.clone(),
                reason: "edge already has a transition".to_string(),
            });
            continue;
        }
        let converted = ctx.transition(layer, &tr.name, tr.duration.unwrap_or(0.0), None, None);
        match tr.edge {
            Edge::In => layer.transition_in = converted,
            Edge::Out => layer.transition_out = converted,
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/formats/clip_graph/convert.rs"]
mod tests;
