//! Per-format parsers and converters.
//!
//! Every native schema has its own intermediate tree; [`IntermediateTree`]
//! is the closed union the import pipeline dispatches over.

pub mod clip_graph;
pub mod composition_graph;
pub mod convert;
pub(crate) mod json;
pub mod markup_sequence;
pub mod motion_bundle;
pub(crate) mod xml;
pub mod xml_timeline;

use crate::{
    detect::SourceFormat,
    foundation::error::SpliceResult,
    import::options::ImportOptions,
};

pub use convert::{Conversion, ConvertCtx, NativeEffect};

/// A parsed document, still in its format's native units.
#[derive(Clone, Debug, PartialEq)]
pub enum IntermediateTree {
    MarkupSequence(markup_sequence::MarkupDocument),
    CompositionGraph(composition_graph::CompositionDocument),
    XmlTimeline(xml_timeline::TimelineDocument),
    MotionBundle(motion_bundle::MotionDocument),
    ClipGraph(clip_graph::ClipGraphDocument),
}

impl IntermediateTree {
    pub fn format(&self) -> SourceFormat {
        match self {
            Self::MarkupSequence(_) => SourceFormat::MarkupSequence,
            Self::CompositionGraph(_) => SourceFormat::CompositionGraph,
            Self::XmlTimeline(_) => SourceFormat::XmlTimeline,
            Self::MotionBundle(_) => SourceFormat::MotionBundle,
            Self::ClipGraph(_) => SourceFormat::ClipGraph,
        }
    }
}

/// Run the parser for `format`.
pub fn parse(format: SourceFormat, content: &str) -> SpliceResult<IntermediateTree> {
    tracing::debug!(format = %format, bytes = content.len(), "parsing");
    Ok(match format {
        SourceFormat::MarkupSequence => {
            IntermediateTree::MarkupSequence(markup_sequence::parse(content)?)
        }
        SourceFormat::CompositionGraph => {
            IntermediateTree::CompositionGraph(composition_graph::parse(content)?)
        }
        SourceFormat::XmlTimeline => IntermediateTree::XmlTimeline(xml_timeline::parse(content)?),
        SourceFormat::MotionBundle => {
            IntermediateTree::MotionBundle(motion_bundle::parse(content)?)
        }
        SourceFormat::ClipGraph => IntermediateTree::ClipGraph(clip_graph::parse(content)?),
    })
}

/// Run the converter matching the tree's format.
pub fn convert(
    tree: &IntermediateTree,
    options: &ImportOptions,
    project_id: &str,
) -> SpliceResult<Conversion> {
    let ctx = ConvertCtx::new(options, project_id);
    match tree {
        IntermediateTree::MarkupSequence(doc) => markup_sequence::convert(doc, ctx),
        IntermediateTree::CompositionGraph(doc) => composition_graph::convert(doc, ctx),
        IntermediateTree::XmlTimeline(doc) => xml_timeline::convert(doc, ctx),
        IntermediateTree::MotionBundle(doc) => motion_bundle::convert(doc, ctx),
        IntermediateTree::ClipGraph(doc) => clip_graph::convert(doc, ctx),
    }
}

/// Format-specific risk notes for the compatibility report.
pub fn inspect(tree: &IntermediateTree) -> Vec<String> {
    match tree {
        IntermediateTree::MarkupSequence(doc) => markup_sequence::inspect(doc),
        IntermediateTree::CompositionGraph(doc) => composition_graph::inspect(doc),
        IntermediateTree::XmlTimeline(doc) => xml_timeline::inspect(doc),
        IntermediateTree::MotionBundle(doc) => motion_bundle::inspect(doc),
        IntermediateTree::ClipGraph(doc) => clip_graph::inspect(doc),
    }
}

/// Native effect names on the timeline that gets converted.
pub fn effect_names(tree: &IntermediateTree) -> Vec<&str> {
    match tree {
        IntermediateTree::MarkupSequence(doc) => markup_sequence::effect_names(doc),
        IntermediateTree::CompositionGraph(doc) => composition_graph::effect_names(doc),
        IntermediateTree::XmlTimeline(doc) => xml_timeline::effect_names(doc),
        IntermediateTree::MotionBundle(doc) => motion_bundle::effect_names(doc),
        IntermediateTree::ClipGraph(doc) => clip_graph::effect_names(doc),
    }
}
