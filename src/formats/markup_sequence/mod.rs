//! Markup-sequence projects (`<xmeml>` interchange and `<PremiereData>`).
//!
//! All times in this tree are frame counts at the owning sequence's rate.

mod convert;
mod parse;

pub use convert::convert;
pub use parse::parse;

use crate::{
    formats::convert::multiple_timelines,
    foundation::{error::ConversionWarning, time::FrameRate},
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarkupDocument {
    pub version: Option<String>,
    pub sequences: Vec<Sequence>,
    /// Nodes the parser could not use.
    pub skipped: Vec<ConversionWarning>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sequence {
    pub name: String,
    pub timebase: f64,
    pub ntsc: bool,
    pub duration: Option<f64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub tracks: Vec<Track>,
}

impl Sequence {
    pub fn frame_rate(&self) -> FrameRate {
        FrameRate::from_timebase(self.timebase, self.ntsc).unwrap_or_default()
    }

    pub fn clip_count(&self) -> usize {
        self.tracks.iter().map(|t| t.clips.len()).sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackKind {
    Video,
    Audio,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub kind: TrackKind,
    pub enabled: bool,
    pub clips: Vec<ClipItem>,
    pub transitions: Vec<TransitionItem>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClipItem {
    pub name: String,
    /// `None` when the source writes a negative (unset) value.
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub in_point: Option<f64>,
    pub out_point: Option<f64>,
    pub source: Option<String>,
    pub enabled: bool,
    pub composite_mode: Option<String>,
    pub filters: Vec<Filter>,
    pub transition_in: Option<ClipTransition>,
    pub transition_out: Option<ClipTransition>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filter {
    pub name: String,
    pub enabled: bool,
    pub params: Vec<FilterParam>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterParam {
    pub id: Option<String>,
    pub name: String,
    /// Scalar value, or the horizontal component of a point value.
    pub value: Option<f64>,
    /// Vertical component of a point value (`<value><horiz/><vert/></value>`).
    pub value_y: Option<f64>,
    pub keyframes: Vec<ParamKeyframe>,
}

impl FilterParam {
    /// Whether this parameter answers to `key` by id or display name.
    pub fn is(&self, key: &str) -> bool {
        let norm = |s: &str| -> String {
            s.chars()
                .filter(char::is_ascii_alphanumeric)
                .map(|c| c.to_ascii_lowercase())
                .collect()
        };
        let key = norm(key);
        self.id.as_deref().is_some_and(|id| norm(id) == key) || norm(&self.name) == key
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamKeyframe {
    pub when: f64,
    pub value: f64,
    pub value_y: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClipTransition {
    pub name: String,
    pub duration: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransitionItem {
    pub name: String,
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub alignment: Option<String>,
}

/// Risk findings for the compatibility report.
pub fn inspect(doc: &MarkupDocument) -> Vec<String> {
    let mut notes: Vec<String> =
        multiple_timelines(&doc.sequences, "sequence", |s| s.name.clone())
            .into_iter()
            .map(|w| w.to_string())
            .collect();
    if let Some(seq) = doc.sequences.first() {
        let disabled = seq.tracks.iter().filter(|t| !t.enabled).count();
        if disabled > 0 {
            notes.push(format!(
                "{disabled} disabled track(s) were imported as regular layers"
            ));
        }
        let nested = seq
            .tracks
            .iter()
            .flat_map(|t| &t.clips)
            .filter(|c| c.source.is_none())
            .count();
        if nested > 0 {
            notes.push(format!(
                "{nested} clip(s) reference no media file (nested sequence or generator)"
            ));
        }
    }
    notes.extend(doc.skipped.iter().map(ToString::to_string));
    notes
}

/// Native effect names on the converted sequence. Motion and opacity
/// filters are clip properties, not effects.
pub fn effect_names(doc: &MarkupDocument) -> Vec<&str> {
    doc.sequences
        .first()
        .into_iter()
        .flat_map(|s| &s.tracks)
        .flat_map(|t| &t.clips)
        .flat_map(|c| &c.filters)
        .filter(|f| IntrinsicFilter::of(&f.name).is_none())
        .map(|f| f.name.as_str())
        .collect()
}

/// Filters that drive the clip's own transform instead of an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum IntrinsicFilter {
    Opacity,
    Motion,
}

impl IntrinsicFilter {
    pub(crate) fn of(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "opacity" => Some(Self::Opacity),
            "basic motion" | "motion" => Some(Self::Motion),
            _ => None,
        }
    }
}
