use super::{
    ClipItem, ClipTransition, Filter, FilterParam, MarkupDocument, ParamKeyframe, Sequence, Track,
    TrackKind, TransitionItem,
};
use crate::{
    detect::SourceFormat,
    formats::xml::{XmlElement, parse_document},
    foundation::{
        error::{ConversionWarning, SpliceError, SpliceResult},
        time::{DEFAULT_FRAME_RATE, parse_flag, parse_number},
    },
};

pub fn parse(content: &str) -> SpliceResult<MarkupDocument> {
    let root = parse_document(content)
        .map_err(|e| SpliceError::parse(SourceFormat::MarkupSequence, e))?;
    if !root.name.eq_ignore_ascii_case("xmeml") && !root.name.eq_ignore_ascii_case("PremiereData")
    {
        return Err(SpliceError::parse(
            SourceFormat::MarkupSequence,
            format!("unexpected root element <{}>", root.name),
        ));
    }

    let mut doc = MarkupDocument {
        version: root.attr_any(&["version", "Version"]).map(str::to_string),
        ..MarkupDocument::default()
    };

    let mut found = Vec::new();
    root.find_outermost("sequence", &mut found);
    for el in found {
        let seq = parse_sequence(el, &mut doc.skipped);
        doc.sequences.push(seq);
    }
    Ok(doc)
}

/// Frame value; the format writes `-1` for "unset".
fn frames(el: &XmlElement, path: &str) -> Option<f64> {
    el.text_at(path)
        .and_then(parse_number)
        .filter(|v| *v >= 0.0)
}

fn parse_sequence(el: &XmlElement, skipped: &mut Vec<ConversionWarning>) -> Sequence {
    let name = el
        .text_at("name")
        .or_else(|| el.attr("name"))
        .unwrap_or("Untitled Sequence")
        .to_string();

    let timebase = el
        .text_at("rate/timebase")
        .and_then(parse_number)
        .filter(|v| *v > 0.0)
        .unwrap_or(DEFAULT_FRAME_RATE);
    let ntsc = el
        .text_at("rate/ntsc")
        .and_then(parse_flag)
        .unwrap_or(false);

    let format = el.path("media/video/format/samplecharacteristics");
    let dim = |key: &str| {
        format
            .and_then(|f| f.text_at(key))
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|v| *v > 0)
    };

    let mut tracks = Vec::new();
    for (group, kind) in [("video", TrackKind::Video), ("audio", TrackKind::Audio)] {
        let Some(media) = el.path("media").and_then(|m| m.child(group)) else {
            continue;
        };
        for track in media.children_named("track") {
            tracks.push(parse_track(track, kind, skipped));
        }
    }

    Sequence {
        name,
        timebase,
        ntsc,
        duration: frames(el, "duration"),
        width: dim("width"),
        height: dim("height"),
        tracks,
    }
}

fn parse_track(el: &XmlElement, kind: TrackKind, skipped: &mut Vec<ConversionWarning>) -> Track {
    let mut clips = Vec::new();
    let mut transitions = Vec::new();
    for child in &el.children {
        match child.name.to_ascii_lowercase().as_str() {
            "clipitem" => match parse_clip(child) {
                Some(clip) => clips.push(clip),
                None => skipped.push(ConversionWarning::SkippedNode {
                    context: "clipitem".to_string(),
                    detail: "no start, end or in/out range".to_string(),
                }),
            },
            "transitionitem" => transitions.push(TransitionItem {
                name: effect_name(child).unwrap_or("Cross Dissolve").to_string(),
                start: frames(child, "start"),
                end: frames(child, "end"),
                alignment: child.text_at("alignment").map(str::to_ascii_lowercase),
            }),
            _ => {}
        }
    }

    Track {
        kind,
        enabled: el
            .text_at("enabled")
            .and_then(parse_flag)
            .unwrap_or(true),
        clips,
        transitions,
    }
}

fn effect_name(el: &XmlElement) -> Option<&str> {
    el.text_at("effect/name").or_else(|| el.text_at("name"))
}

fn parse_clip(el: &XmlElement) -> Option<ClipItem> {
    let clip = ClipItem {
        name: el
            .text_at("name")
            .or_else(|| el.attr("name"))
            .unwrap_or("Untitled Clip")
            .to_string(),
        start: frames(el, "start"),
        end: frames(el, "end"),
        in_point: frames(el, "in"),
        out_point: frames(el, "out"),
        source: el
            .text_at("file/pathurl")
            .or_else(|| el.child("file").and_then(|f| f.attr("id")))
            .map(str::to_string),
        enabled: el
            .text_at("enabled")
            .and_then(parse_flag)
            .unwrap_or(true),
        composite_mode: el.text_at("compositemode").map(str::to_string),
        filters: el.children_named("filter").map(parse_filter).collect(),
        transition_in: el.child("transitionIn").map(clip_transition),
        transition_out: el.child("transitionOut").map(clip_transition),
    };

    let has_range = clip.start.is_some()
        || clip.end.is_some()
        || (clip.in_point.is_some() && clip.out_point.is_some());
    has_range.then_some(clip)
}

fn clip_transition(el: &XmlElement) -> ClipTransition {
    ClipTransition {
        name: effect_name(el).unwrap_or("Cross Dissolve").to_string(),
        duration: frames(el, "duration"),
    }
}

fn parse_filter(el: &XmlElement) -> Filter {
    let effect = el.child("effect");
    Filter {
        name: effect
            .and_then(|e| e.text_at("name"))
            .unwrap_or("Unknown Effect")
            .to_string(),
        enabled: el
            .text_at("enabled")
            .and_then(parse_flag)
            .unwrap_or(true),
        params: effect
            .map(|e| e.children_named("parameter").filter_map(parse_param).collect())
            .unwrap_or_default(),
    }
}

/// Scalar value, or a `horiz`/`vert` point.
fn param_value(el: &XmlElement) -> (Option<f64>, Option<f64>) {
    let Some(value) = el.child("value") else {
        return (None, None);
    };
    if value.child("horiz").is_some() || value.child("vert").is_some() {
        let h = value.text_at("horiz").and_then(parse_number);
        let v = value.text_at("vert").and_then(parse_number);
        return (h, v);
    }
    (parse_number(&value.text), None)
}

fn parse_param(el: &XmlElement) -> Option<FilterParam> {
    let id = el.text_at("parameterid").map(str::to_string);
    let name = el
        .text_at("name")
        .map(str::to_string)
        .or_else(|| id.clone())?;
    let (value, value_y) = param_value(el);

    let keyframes = el
        .children_named("keyframe")
        .filter_map(|k| {
            let when = k.text_at("when").and_then(parse_number)?;
            let (value, value_y) = param_value(k);
            Some(ParamKeyframe {
                when,
                value: value?,
                value_y,
            })
        })
        .collect();

    Some(FilterParam {
        id,
        name,
        value,
        value_y,
        keyframes,
    })
}

#[cfg(test)]
#[path = "../../../tests/unit/formats/markup_sequence/parse.rs"]
mod tests;
