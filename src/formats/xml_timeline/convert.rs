use std::collections::BTreeSet;

use super::{ItemKind, Resources, SpineItem, TimelineDocument, filter_name};
use crate::{
    detect::SourceFormat,
    formats::convert::{Conversion, ConvertCtx, NativeEffect, is_still_image},
    foundation::{
        error::{ConversionWarning, SpliceError, SpliceResult},
        time::RationalTime,
    },
    model::{
        layer::{Layer, LayerKind, LayerProperties},
        project::Resolution,
    },
};

/// A clip with its absolute placement, before track ranks are known.
struct Placed<'a> {
    item: &'a SpineItem,
    /// Position in the primary storyline; `None` for connected clips.
    spine_index: Option<usize>,
    id: String,
    lane: i32,
    start: f64,
}

pub fn convert(doc: &TimelineDocument, mut ctx: ConvertCtx<'_>) -> SpliceResult<Conversion> {
    for w in &doc.skipped {
        ctx.warn(w.clone());
    }
    let project = ctx
        .select_first(&doc.projects, "project", |p| p.name.clone())
        .ok_or(SpliceError::NoTimelineFound(SourceFormat::XmlTimeline))?;

    let format = project
        .format
        .as_deref()
        .and_then(|f| doc.resources.format(f));
    let resolution = Resolution::or_hd(
        format.and_then(|f| f.width),
        format.and_then(|f| f.height),
    );
    tracing::debug!(
        project = %project.name,
        spine = project.spine.len(),
        "converting xml timeline"
    );

    let mut placed = Vec::new();
    for (idx, item) in project.spine.iter().enumerate() {
        if item.kind == ItemKind::Transition {
            continue;
        }
        let start = secs(item.offset);
        place(&mut ctx, &mut placed, item, Some(idx), format!("spine{idx}"), 0, start);
    }

    let lanes: BTreeSet<i32> = placed.iter().map(|p| p.lane).collect();
    let rank = |lane: i32| lanes.iter().position(|l| *l == lane).unwrap_or(0);

    let mut layers = Vec::with_capacity(placed.len());
    // Spine index -> layer index, for spine-level transitions.
    let mut primary: Vec<(usize, usize)> = Vec::new();
    for p in &placed {
        let Some(mut layer) = convert_item(&mut ctx, &doc.resources, p, resolution) else {
            continue;
        };
        layer.track = u32::try_from(rank(p.lane)).unwrap_or(u32::MAX);
        if let Some(spine_idx) = p.spine_index {
            primary.push((spine_idx, layers.len()));
        }
        layers.push(layer);
    }

    attach_spine_transitions(&mut ctx, &project.spine, &primary, &mut layers);

    let declared = project.duration.and_then(RationalTime::as_secs);
    Ok(ctx.finish(&project.name, resolution, declared, layers))
}

fn secs(t: Option<RationalTime>) -> f64 {
    t.map(RationalTime::secs_or_zero).unwrap_or(0.0)
}

/// Record `item` and, recursively, the clips connected to it. A connected
/// clip sits at `parent.offset + (child.offset - parent.start)`. Gaps only
/// anchor their connected clips.
fn place<'a>(
    ctx: &mut ConvertCtx<'_>,
    out: &mut Vec<Placed<'a>>,
    item: &'a SpineItem,
    spine_index: Option<usize>,
    id: String,
    lane: i32,
    start: f64,
) {
    let parent_start = secs(item.start);
    if item.kind.is_clip() {
        out.push(Placed {
            item,
            spine_index,
            id: id.clone(),
            lane,
            start,
        });
    }
    for (j, child) in item.connected.iter().enumerate() {
        let Some(child_lane) = child.lane.unwrap_or(1).checked_add(lane) else {
            ctx.warn(ConversionWarning::ClipDropped {
                name: child.name.clone(),
                reason: "lane out of range".to_string(),
            });
            continue;
        };
        let child_start = start + (secs(child.offset) - parent_start);
        let child_id = format!("{id}-lane{child_lane}-{j}");
        place(ctx, out, child, None, child_id, child_lane, child_start);
    }
}

fn layer_kind(resources: &Resources, item: &SpineItem) -> LayerKind {
    match item.kind {
        ItemKind::Title => LayerKind::Text,
        ItemKind::Audio => LayerKind::Audio,
        _ => {
            let asset = item.reference.as_deref().and_then(|r| resources.asset(r));
            match asset {
                Some(a) if !a.has_video && a.has_audio => LayerKind::Audio,
                Some(a) if a.src.as_deref().is_some_and(is_still_image) => LayerKind::Image,
                _ => LayerKind::Video,
            }
        }
    }
}

fn convert_item(
    ctx: &mut ConvertCtx<'_>,
    resources: &Resources,
    p: &Placed<'_>,
    resolution: Resolution,
) -> Option<Layer> {
    let item = p.item;
    let duration = secs(item.duration);
    if duration <= 0.0 || p.start < 0.0 {
        ctx.warn(ConversionWarning::ClipDropped {
            name: item.name.clone(),
            reason: if duration <= 0.0 {
                "missing or zero duration".to_string()
            } else {
                "starts before the timeline".to_string()
            },
        });
        return None;
    }

    let kind = layer_kind(resources, item);
    let mut layer = Layer::new(p.id.clone(), kind, item.name.clone(), p.start, duration);
    if kind != LayerKind::Audio {
        layer.properties = LayerProperties::full_frame(resolution.width, resolution.height);
    }
    layer.source = item
        .reference
        .as_deref()
        .and_then(|r| resources.asset(r))
        .and_then(|a| a.src.clone());
    layer.text = item.text.clone();

    if let Some(t) = item.transform {
        if let Some((x, y)) = t.position {
            layer.properties.x = x;
            layer.properties.y = y;
        }
        if let Some((sx, _)) = t.scale {
            layer.properties.scale = sx;
        }
        if let Some(r) = t.rotation {
            layer.properties.rotation = r;
        }
    }
    if let Some(amount) = item.blend_amount {
        layer.properties.opacity = amount;
    }

    let effects: Vec<NativeEffect> = item
        .filters
        .iter()
        .map(|f| NativeEffect {
            name: filter_name(resources, f).to_string(),
            enabled: f.enabled,
            params: f.params.clone(),
        })
        .collect();
    layer.effects = ctx.map_effects(&layer, &effects);
    layer.blend_mode = ctx.blend_mode(&layer, item.blend_mode.as_deref());

    for tr in &item.transitions {
        if layer.transition_in.is_some() {
            ctx.warn(ConversionWarning::TransitionDropped {
                layer: layer.name.clone(),
                name: tr.name.clone(),
                reason: "edge already has a transition".to_string(),
            });
            continue;
        }
        layer.transition_in = ctx.transition(&layer, &tr.name, secs(tr.duration), None, None);
    }
    Some(layer)
}

/// A spine transition belongs to the next clip as its transition-in, or to
/// the previous clip as its transition-out when nothing follows.
fn attach_spine_transitions(
    ctx: &mut ConvertCtx<'_>,
    spine: &[SpineItem],
    primary: &[(usize, usize)],
    layers: &mut [Layer],
) {
    for (idx, item) in spine.iter().enumerate() {
        if item.kind != ItemKind::Transition {
            continue;
        }
        let next = primary.iter().find(|(s, _)| *s > idx).map(|(_, l)| *l);
        let prev = primary.iter().rev().find(|(s, _)| *s < idx).map(|(_, l)| *l);

        let (layer_idx, is_in) = match (next, prev) {
            (Some(n), _) => (n, true),
            (None, Some(p)) => (p, false),
            (None, None) => {
                ctx.warn(ConversionWarning::TransitionDropped {
                    layer: "spine".to_string(),
                    name: item.name.clone(),
                    reason: "no adjacent clip".to_string(),
                });
                continue;
            }
        };

        let layer = &layers[layer_idx];
        let taken = if is_in {
            layer.transition_in.is_some()
        } else {
            layer.transition_out.is_some()
        };
        if taken {
            ctx.warn(ConversionWarning::TransitionDropped {
                layer: layer.name.clone(),
                name: item.name.clone(),
                reason: "edge already has a transition".to_string(),
            });
            continue;
        }
        let tr = ctx.transition(layer, &item.name, secs(item.duration), None, None);
        let layer = &mut layers[layer_idx];
        if is_in {
            layer.transition_in = tr;
        } else {
            layer.transition_out = tr;
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/formats/xml_timeline/convert.rs"]
mod tests;
