//! XML-timeline libraries (`<fcpxml>`): shared resources plus one or more
//! projects, each holding a spine of clips. Times stay rational.

mod convert;
mod parse;

pub use convert::convert;
pub use parse::parse;

use std::collections::BTreeMap;

use crate::{
    formats::convert::multiple_timelines,
    foundation::{error::ConversionWarning, time::RationalTime},
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimelineDocument {
    pub version: Option<String>,
    pub resources: Resources,
    pub projects: Vec<TimelineProject>,
    pub skipped: Vec<ConversionWarning>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resources {
    pub formats: Vec<FormatResource>,
    pub assets: Vec<AssetResource>,
    pub effects: Vec<EffectResource>,
}

impl Resources {
    pub fn format(&self, id: &str) -> Option<&FormatResource> {
        self.formats.iter().find(|f| f.id == id)
    }

    pub fn asset(&self, id: &str) -> Option<&AssetResource> {
        self.assets.iter().find(|a| a.id == id)
    }

    pub fn effect(&self, id: &str) -> Option<&EffectResource> {
        self.effects.iter().find(|e| e.id == id)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormatResource {
    pub id: String,
    pub frame_duration: Option<RationalTime>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AssetResource {
    pub id: String,
    pub name: Option<String>,
    pub src: Option<String>,
    pub has_video: bool,
    pub has_audio: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectResource {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimelineProject {
    pub event: Option<String>,
    pub name: String,
    pub format: Option<String>,
    pub duration: Option<RationalTime>,
    pub spine: Vec<SpineItem>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    AssetClip,
    Clip,
    Video,
    Audio,
    Title,
    RefClip,
    Gap,
    Transition,
}

impl ItemKind {
    pub fn from_element(name: &str) -> Option<Self> {
        match name {
            "asset-clip" => Some(Self::AssetClip),
            "clip" | "sync-clip" => Some(Self::Clip),
            "video" => Some(Self::Video),
            "audio" => Some(Self::Audio),
            "title" => Some(Self::Title),
            "ref-clip" => Some(Self::RefClip),
            "gap" => Some(Self::Gap),
            "transition" => Some(Self::Transition),
            _ => None,
        }
    }

    /// Whether items of this kind become layers.
    pub fn is_clip(self) -> bool {
        !matches!(self, Self::Gap | Self::Transition)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpineItem {
    pub kind: ItemKind,
    pub name: String,
    pub offset: Option<RationalTime>,
    pub duration: Option<RationalTime>,
    pub start: Option<RationalTime>,
    pub lane: Option<i32>,
    pub reference: Option<String>,
    pub filters: Vec<FilterRef>,
    pub transform: Option<AdjustTransform>,
    pub blend_amount: Option<f64>,
    pub blend_mode: Option<String>,
    pub text: Option<String>,
    /// Child `transition` elements.
    pub transitions: Vec<SpineItem>,
    /// Children placed on a lane of their own.
    pub connected: Vec<SpineItem>,
}

impl SpineItem {
    pub fn new(kind: ItemKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            offset: None,
            duration: None,
            start: None,
            lane: None,
            reference: None,
            filters: Vec::new(),
            transform: None,
            blend_amount: None,
            blend_mode: None,
            text: None,
            transitions: Vec::new(),
            connected: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterRef {
    pub reference: Option<String>,
    pub name: Option<String>,
    pub enabled: bool,
    pub params: BTreeMap<String, f64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AdjustTransform {
    pub position: Option<(f64, f64)>,
    pub scale: Option<(f64, f64)>,
    pub rotation: Option<f64>,
}

fn all_items(project: &TimelineProject) -> impl Iterator<Item = &SpineItem> {
    project
        .spine
        .iter()
        .flat_map(|i| std::iter::once(i).chain(i.connected.iter()))
}

pub fn inspect(doc: &TimelineDocument) -> Vec<String> {
    let mut notes: Vec<String> = multiple_timelines(&doc.projects, "project", |p| p.name.clone())
        .into_iter()
        .map(|w| w.to_string())
        .collect();

    if let Some(project) = doc.projects.first() {
        let compound = all_items(project)
            .filter(|i| i.kind == ItemKind::RefClip)
            .count();
        if compound > 0 {
            notes.push(format!("{compound} compound clip(s) flattened to a single layer"));
        }
        let unresolved = all_items(project)
            .filter(|i| matches!(i.kind, ItemKind::AssetClip | ItemKind::Clip))
            .filter(|i| {
                i.reference
                    .as_deref()
                    .is_none_or(|r| doc.resources.asset(r).is_none())
            })
            .count();
        if unresolved > 0 {
            notes.push(format!("{unresolved} clip(s) reference no asset resource"));
        }
    }
    notes.extend(doc.skipped.iter().map(ToString::to_string));
    notes
}

/// Effect names of the converted project, resolved through the resources.
pub fn effect_names(doc: &TimelineDocument) -> Vec<&str> {
    doc.projects
        .first()
        .into_iter()
        .flat_map(all_items)
        .flat_map(|i| &i.filters)
        .map(|f| filter_name(&doc.resources, f))
        .collect()
}

pub(crate) fn filter_name<'a>(resources: &'a Resources, filter: &'a FilterRef) -> &'a str {
    filter
        .reference
        .as_deref()
        .and_then(|r| resources.effect(r))
        .map(|e| e.name.as_str())
        .or(filter.name.as_deref())
        .unwrap_or("Unknown Effect")
}
