//! Clip-graph projects: a media pool plus one or more track-based timelines
//! (`<project>` / `<DaVinciResolveProject>`). Times are seconds.

mod convert;
mod parse;

pub use convert::convert;
pub use parse::parse;

use crate::{
    formats::convert::{NativeEffect, multiple_timelines},
    foundation::error::ConversionWarning,
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClipGraphDocument {
    pub version: Option<String>,
    pub media: Vec<MediaClip>,
    pub timelines: Vec<Timeline>,
    pub skipped: Vec<ConversionWarning>,
}

impl ClipGraphDocument {
    pub fn media(&self, id: &str) -> Option<&MediaClip> {
        self.media.iter().find(|m| m.id == id)
    }
}

/// An entry of the media pool.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaClip {
    pub id: String,
    pub name: String,
    pub duration: Option<f64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub path: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    pub name: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub frame_rate: Option<f64>,
    pub duration: Option<f64>,
    pub tracks: Vec<Track>,
}

impl Timeline {
    pub fn clip_count(&self) -> usize {
        self.tracks.iter().map(|t| t.clips.len()).sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackKind {
    Video,
    Audio,
    Subtitle,
}

impl TrackKind {
    pub(crate) fn from_native(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "audio" => Self::Audio,
            "subtitle" | "text" | "title" => Self::Subtitle,
            _ => Self::Video,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub kind: TrackKind,
    pub clips: Vec<TimelineClip>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimelineClip {
    pub name: String,
    pub offset: f64,
    /// Falls back to the media-pool duration when absent.
    pub duration: Option<f64>,
    pub media_id: Option<String>,
    pub opacity: Option<f64>,
    pub composite_mode: Option<String>,
    pub text: Option<String>,
    pub effects: Vec<NativeEffect>,
    pub color_grade: Option<ColorGrade>,
    pub transitions: Vec<ClipTransition>,
    /// The clip carries an embedded node composition.
    pub fusion: bool,
}

/// Primary lift/gamma/gain wheels, each as r/g/b.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorGrade {
    pub lift: [f64; 3],
    pub gamma: [f64; 3],
    pub gain: [f64; 3],
}

impl Default for ColorGrade {
    fn default() -> Self {
        Self {
            lift: [0.0; 3],
            gamma: [1.0; 3],
            gain: [1.0; 3],
        }
    }
}

impl ColorGrade {
    /// The grade as a native "Color Wheels" effect.
    pub(crate) fn to_native(self) -> NativeEffect {
        let mut params = std::collections::BTreeMap::new();
        for (wheel, rgb) in [("lift", self.lift), ("gamma", self.gamma), ("gain", self.gain)] {
            for (channel, v) in ["r", "g", "b"].into_iter().zip(rgb) {
                params.insert(format!("{wheel}_{channel}"), v);
            }
        }
        NativeEffect {
            name: "Color Wheels".to_string(),
            enabled: true,
            params,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    In,
    Out,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClipTransition {
    pub edge: Edge,
    pub name: String,
    pub duration: Option<f64>,
}

pub fn inspect(doc: &ClipGraphDocument) -> Vec<String> {
    let mut notes: Vec<String> = multiple_timelines(&doc.timelines, "timeline", |t| t.name.clone())
        .into_iter()
        .map(|w| w.to_string())
        .collect();
    if let Some(timeline) = doc.timelines.first() {
        let clips = timeline.tracks.iter().flat_map(|t| &t.clips);
        let fusion = clips.clone().filter(|c| c.fusion).count();
        if fusion > 0 {
            notes.push(format!(
                "Fusion composition flattened on {fusion} clip(s); node graphs are not imported"
            ));
        }
        let missing = clips
            .filter(|c| c.media_id.as_deref().is_some_and(|id| doc.media(id).is_none()))
            .count();
        if missing > 0 {
            notes.push(format!(
                "{missing} clip(s) reference media missing from the media pool"
            ));
        }
    }
    notes.extend(doc.skipped.iter().map(ToString::to_string));
    notes
}

pub fn effect_names(doc: &ClipGraphDocument) -> Vec<&str> {
    let clips = doc.timelines.first().into_iter().flat_map(|t| &t.tracks).flat_map(|t| &t.clips);
    let mut names = Vec::new();
    for clip in clips {
        names.extend(clip.effects.iter().map(|e| e.name.as_str()));
        if clip.color_grade.is_some() {
            names.push("Color Wheels");
        }
    }
    names
}
