use super::{
    AdjustTransform, AssetResource, EffectResource, FilterRef, FormatResource, ItemKind, Resources,
    SpineItem, TimelineDocument, TimelineProject,
};
use crate::{
    detect::SourceFormat,
    formats::xml::{XmlElement, parse_document},
    foundation::{
        error::{ConversionWarning, SpliceError, SpliceResult},
        time::{RationalTime, parse_flag, parse_number},
    },
};

pub fn parse(content: &str) -> SpliceResult<TimelineDocument> {
    let root =
        parse_document(content).map_err(|e| SpliceError::parse(SourceFormat::XmlTimeline, e))?;
    if !root.name.eq_ignore_ascii_case("fcpxml") {
        return Err(SpliceError::parse(
            SourceFormat::XmlTimeline,
            format!("unexpected root element <{}>", root.name),
        ));
    }

    let mut doc = TimelineDocument {
        version: root.attr("version").map(str::to_string),
        resources: root.child("resources").map(parse_resources).unwrap_or_default(),
        ..TimelineDocument::default()
    };

    let mut events = Vec::new();
    root.find_outermost("event", &mut events);
    if events.is_empty() {
        let mut projects = Vec::new();
        root.find_outermost("project", &mut projects);
        for p in projects {
            doc.projects.push(parse_project(p, None, &mut doc.skipped));
        }
    }
    for event in events {
        let event_name = event.attr("name");
        for p in event.children_named("project") {
            doc.projects.push(parse_project(p, event_name, &mut doc.skipped));
        }
    }
    Ok(doc)
}

fn rational(el: &XmlElement, key: &str) -> Option<RationalTime> {
    el.attr(key).and_then(RationalTime::parse)
}

fn dimension(el: &XmlElement, key: &str) -> Option<u32> {
    el.attr(key)
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| *v > 0)
}

fn parse_resources(el: &XmlElement) -> Resources {
    let mut res = Resources::default();
    for child in &el.children {
        let Some(id) = child.attr("id") else {
            continue;
        };
        match child.name.as_str() {
            "format" => res.formats.push(FormatResource {
                id: id.to_string(),
                frame_duration: rational(child, "frameDuration"),
                width: dimension(child, "width"),
                height: dimension(child, "height"),
            }),
            "asset" => res.assets.push(AssetResource {
                id: id.to_string(),
                name: child.attr("name").map(str::to_string),
                src: child
                    .attr("src")
                    .or_else(|| child.child("media-rep").and_then(|m| m.attr("src")))
                    .map(str::to_string),
                has_video: child.attr("hasVideo").and_then(parse_flag).unwrap_or(true),
                has_audio: child.attr("hasAudio").and_then(parse_flag).unwrap_or(false),
            }),
            "effect" => res.effects.push(EffectResource {
                id: id.to_string(),
                name: child.attr("name").unwrap_or(id).to_string(),
            }),
            _ => {}
        }
    }
    res
}

fn parse_project(
    el: &XmlElement,
    event: Option<&str>,
    skipped: &mut Vec<ConversionWarning>,
) -> TimelineProject {
    let sequence = el.child("sequence");
    let spine = sequence
        .and_then(|s| s.child("spine"))
        .map(|spine| parse_spine(spine, skipped))
        .unwrap_or_default();

    TimelineProject {
        event: event.map(str::to_string),
        name: el.attr("name").unwrap_or("Untitled Project").to_string(),
        format: sequence.and_then(|s| s.attr("format")).map(str::to_string),
        duration: sequence.and_then(|s| rational(s, "duration")),
        spine,
    }
}

fn parse_spine(el: &XmlElement, skipped: &mut Vec<ConversionWarning>) -> Vec<SpineItem> {
    let mut items = Vec::new();
    for child in &el.children {
        match ItemKind::from_element(&child.name) {
            Some(kind) => items.push(parse_item(child, kind, skipped)),
            None => skipped.push(ConversionWarning::SkippedNode {
                context: "spine element".to_string(),
                detail: format!("<{}> is not supported", child.name),
            }),
        }
    }
    items
}

/// `"x y"` pairs as written by `adjust-transform`.
fn pair(raw: &str) -> Option<(f64, f64)> {
    let mut it = raw.split_whitespace().map(parse_number);
    let x = it.next()??;
    let y = it.next().flatten().unwrap_or(x);
    Some((x, y))
}

fn parse_item(el: &XmlElement, kind: ItemKind, skipped: &mut Vec<ConversionWarning>) -> SpineItem {
    let mut item = SpineItem::new(
        kind,
        el.attr("name").unwrap_or(match kind {
            ItemKind::Transition => "Cross Dissolve",
            ItemKind::Title => "Title",
            _ => "Untitled Clip",
        }),
    );
    item.offset = rational(el, "offset");
    item.duration = rational(el, "duration");
    item.start = rational(el, "start");
    item.lane = el.attr("lane").and_then(|l| l.trim().parse::<i32>().ok());
    item.reference = el.attr("ref").map(str::to_string).or_else(|| {
        el.children
            .iter()
            .filter(|c| c.attr("lane").is_none())
            .filter(|c| matches!(c.name.as_str(), "video" | "audio" | "asset-clip"))
            .find_map(|c| c.attr("ref"))
            .map(str::to_string)
    });

    for child in &el.children {
        match child.name.as_str() {
            "filter-video" => item.filters.push(FilterRef {
                reference: child.attr("ref").map(str::to_string),
                name: child.attr("name").map(str::to_string),
                enabled: child.attr("enabled").and_then(parse_flag).unwrap_or(true),
                params: child
                    .children_named("param")
                    .filter_map(|p| {
                        let key = p.attr("name")?;
                        let value = p.attr("value").and_then(parse_number)?;
                        Some((key.to_string(), value))
                    })
                    .collect(),
            }),
            "adjust-transform" => {
                item.transform = Some(AdjustTransform {
                    position: child.attr("position").and_then(pair),
                    scale: child.attr("scale").and_then(pair),
                    rotation: child.attr("rotation").and_then(parse_number),
                });
            }
            "adjust-blend" => {
                item.blend_amount = child.attr("amount").and_then(parse_number);
                item.blend_mode = child.attr("mode").map(str::to_string);
            }
            "text" => {
                let text: Vec<&str> = child
                    .children_named("text-style")
                    .map(|s| s.text.trim())
                    .filter(|s| !s.is_empty())
                    .collect();
                let text = if text.is_empty() {
                    child.text.trim().to_string()
                } else {
                    text.join("")
                };
                if !text.is_empty() {
                    item.text = Some(text);
                }
            }
            "transition" => item
                .transitions
                .push(parse_item(child, ItemKind::Transition, skipped)),
            name => {
                if child.attr("lane").is_some() {
                    if let Some(kind) = ItemKind::from_element(name).filter(|k| k.is_clip()) {
                        item.connected.push(parse_item(child, kind, skipped));
                    }
                }
            }
        }
    }
    item
}

#[cfg(test)]
#[path = "../../../tests/unit/formats/xml_timeline/parse.rs"]
mod tests;
