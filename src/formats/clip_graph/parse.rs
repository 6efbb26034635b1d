use super::{
    ClipGraphDocument, ClipTransition, ColorGrade, Edge, MediaClip, Timeline, TimelineClip,
    Track, TrackKind,
};
use crate::{
    detect::SourceFormat,
    formats::{
        convert::NativeEffect,
        xml::{XmlElement, parse_document},
    },
    foundation::{
        error::{ConversionWarning, SpliceError, SpliceResult},
        time::{parse_flag, parse_number},
    },
};

pub fn parse(content: &str) -> SpliceResult<ClipGraphDocument> {
    let root =
        parse_document(content).map_err(|e| SpliceError::parse(SourceFormat::ClipGraph, e))?;
    if !root.name.eq_ignore_ascii_case("project")
        && !root.name.eq_ignore_ascii_case("DaVinciResolveProject")
    {
        return Err(SpliceError::parse(
            SourceFormat::ClipGraph,
            format!("unexpected root element <{}>", root.name),
        ));
    }

    let mut doc = ClipGraphDocument {
        version: root.attr_any(&["version", "Version"]).map(str::to_string),
        ..ClipGraphDocument::default()
    };

    let mut pools = Vec::new();
    root.find_outermost("mediaPool", &mut pools);
    for clip in pools.iter().flat_map(|p| p.children_named("clip")) {
        match clip.attr_or_text("id") {
            Some(id) => doc.media.push(MediaClip {
                id: id.to_string(),
                name: clip.attr_or_text("name").unwrap_or(id).to_string(),
                duration: number(clip, "duration").filter(|d| *d > 0.0),
                width: dimension(clip, "width"),
                height: dimension(clip, "height"),
                path: clip.attr_or_text("path").map(str::to_string),
            }),
            None => doc.skipped.push(ConversionWarning::SkippedNode {
                context: "media pool clip".to_string(),
                detail: "missing id".to_string(),
            }),
        }
    }

    let mut timelines = Vec::new();
    root.find_outermost("timeline", &mut timelines);
    for el in timelines {
        let timeline = parse_timeline(el, &mut doc.skipped);
        doc.timelines.push(timeline);
    }
    Ok(doc)
}

fn number(el: &XmlElement, key: &str) -> Option<f64> {
    el.attr_or_text(key).and_then(parse_number)
}

fn dimension(el: &XmlElement, key: &str) -> Option<u32> {
    number(el, key)
        .filter(|v| *v >= 1.0 && *v <= f64::from(u32::MAX))
        .map(|v| v.round() as u32)
}

/// Tracks sit directly under the timeline or inside a `tracks` wrapper.
fn track_elements(el: &XmlElement) -> impl Iterator<Item = &XmlElement> {
    el.children_named("track")
        .chain(el.children_named("tracks").flat_map(|t| t.children_named("track")))
}

fn parse_timeline(el: &XmlElement, skipped: &mut Vec<ConversionWarning>) -> Timeline {
    let name = el
        .attr_or_text("name")
        .unwrap_or("Untitled Timeline")
        .to_string();
    let tracks = track_elements(el)
        .map(|track| Track {
            kind: TrackKind::from_native(track.attr_or_text("type").unwrap_or("video")),
            clips: track
                .children_named("clip")
                .filter_map(|c| parse_clip(c, &name, skipped))
                .collect(),
        })
        .collect();

    Timeline {
        width: dimension(el, "width"),
        height: dimension(el, "height"),
        frame_rate: number(el, "frameRate").filter(|v| *v > 0.0),
        duration: number(el, "duration").filter(|v| *v >= 0.0),
        name,
        tracks,
    }
}

fn parse_clip(
    el: &XmlElement,
    timeline: &str,
    skipped: &mut Vec<ConversionWarning>,
) -> Option<TimelineClip> {
    let name = el.attr_or_text("name").unwrap_or("Clip").to_string();
    let offset = match el.attr_or_text("offset") {
        None => 0.0,
        Some(raw) => match parse_number(raw) {
            Some(v) => v,
            None => {
                skipped.push(ConversionWarning::SkippedNode {
                    context: format!("clip in timeline '{timeline}'"),
                    detail: format!("'{name}' has unreadable offset '{raw}'"),
                });
                return None;
            }
        },
    };

    let mut clip = TimelineClip {
        name,
        offset,
        duration: number(el, "duration"),
        media_id: el.attr_or_text("mediaId").map(str::to_string),
        opacity: number(el, "opacity"),
        composite_mode: el.attr_or_text("compositeMode").map(str::to_string),
        text: el.attr_or_text("text").map(str::to_string),
        effects: Vec::new(),
        color_grade: None,
        transitions: Vec::new(),
        fusion: false,
    };

    for child in &el.children {
        match child.name.as_str() {
            "effect" => {
                let Some(name) = child.attr_or_text("name") else {
                    continue;
                };
                clip.effects.push(NativeEffect {
                    name: name.to_string(),
                    enabled: child.attr("enabled").and_then(parse_flag).unwrap_or(true),
                    params: child
                        .children_named("param")
                        .filter_map(|p| {
                            let key = p.attr("name")?;
                            let value = p
                                .attr("value")
                                .or_else(|| Some(p.text.trim()).filter(|t| !t.is_empty()))
                                .and_then(parse_number)?;
                            Some((key.to_string(), value))
                        })
                        .collect(),
                });
            }
            "colorGrade" => clip.color_grade = Some(parse_grade(child)),
            "transition" => clip.transitions.push(ClipTransition {
                edge: match child.attr_or_text("type") {
                    Some(t) if t.trim().eq_ignore_ascii_case("out") => Edge::Out,
                    _ => Edge::In,
                },
                name: child
                    .attr_or_text("name")
                    .unwrap_or("Cross Dissolve")
                    .to_string(),
                duration: number(child, "duration"),
            }),
            "fusion" | "fusionComp" => clip.fusion = true,
            _ => {}
        }
    }
    Some(clip)
}

fn parse_grade(el: &XmlElement) -> ColorGrade {
    let defaults = ColorGrade::default();
    let wheel = |name: &str, fallback: [f64; 3]| {
        let Some(w) = el.child(name) else {
            return fallback;
        };
        let mut rgb = fallback;
        for (slot, key) in rgb.iter_mut().zip(["r", "g", "b"]) {
            if let Some(v) = number(w, key) {
                *slot = v;
            }
        }
        rgb
    };
    ColorGrade {
        lift: wheel("lift", defaults.lift),
        gamma: wheel("gamma", defaults.gamma),
        gain: wheel("gain", defaults.gain),
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/formats/clip_graph/parse.rs"]
mod tests;
