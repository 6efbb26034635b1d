use super::*;
use crate::{
    formats::xml_timeline::parse,
    import::options::ImportOptions,
    model::{effect::EffectKind, layer::BlendMode, transition::TransitionKind},
};

const FIXTURE: &str = include_str!("../../../fixtures/library.fcpxml");

fn run(content: &str) -> Conversion {
    let opts = ImportOptions::default();
    let doc = parse(content).unwrap();
    convert(&doc, ConvertCtx::new(&opts, "xml-timeline-test")).unwrap()
}

fn layer<'a>(c: &'a Conversion, name: &str) -> &'a Layer {
    c.project.layers.iter().find(|l| l.name == name).unwrap()
}

#[test]
fn clips_and_connected_clips_become_layers() {
    let out = run(FIXTURE);
    assert_eq!(out.project.name, "Cut A");
    assert_eq!(out.project.layers.len(), 5);
    assert_eq!(out.project.duration, 21.0);
    assert!(out.warnings.iter().any(|w| matches!(
        w,
        ConversionWarning::MultipleTimelines { discarded: 1, .. }
    )));
    out.project.validate().unwrap();
}

#[test]
fn connected_clips_are_placed_relative_to_parent_start() {
    let out = run(FIXTURE);
    let logo = layer(&out, "Logo Bug");
    assert_eq!(logo.start_time, 2.0);
    assert_eq!(logo.duration, 4.0);
    assert_eq!(logo.kind, LayerKind::Image);

    let score = layer(&out, "Score");
    assert_eq!(score.start_time, 0.0);
    assert_eq!(score.kind, LayerKind::Audio);

    assert_eq!(layer(&out, "Caption").start_time, 20.0);
}

#[test]
fn tracks_rank_the_lanes_present() {
    let out = run(FIXTURE);
    assert_eq!(layer(&out, "Score").track, 0);
    assert_eq!(layer(&out, "Interview").track, 1);
    assert_eq!(layer(&out, "Broll").track, 1);
    assert_eq!(layer(&out, "Logo Bug").track, 2);
    assert_eq!(layer(&out, "Caption").track, 2);
}

#[test]
fn adjustments_feed_the_property_bag() {
    let out = run(FIXTURE);
    let interview = layer(&out, "Interview");
    assert_eq!(interview.source.as_deref(), Some("file:///media/interview.mov"));
    assert_eq!(interview.properties.x, 10.0);
    assert_eq!(interview.properties.y, -5.0);
    assert_eq!(interview.properties.scale, 1.5);
    assert_eq!(interview.properties.rotation, 12.0);
    assert_eq!(interview.properties.opacity, 0.75);
    assert_eq!(interview.blend_mode, Some(BlendMode::Multiply));
    assert_eq!(interview.effects[0].kind, EffectKind::Blur);

    let caption = layer(&out, "Caption");
    assert_eq!(caption.kind, LayerKind::Text);
    assert_eq!(caption.text.as_deref(), Some("YOUR TEXT HERE"));
}

#[test]
fn spine_transitions_go_to_the_following_clip() {
    let out = run(FIXTURE);
    let broll = layer(&out, "Broll");
    let tr = broll.transition_in.as_ref().unwrap();
    assert_eq!(tr.kind, TransitionKind::CrossDissolve);
    assert_eq!(tr.duration, 2.0);
    assert!(layer(&out, "Interview").transition_in.is_none());
}

#[test]
fn trailing_spine_transitions_close_the_previous_clip() {
    let out = run(
        r#"<fcpxml><project name="P"><sequence><spine>
            <video name="Solid" offset="0s" duration="3s"/>
            <transition name="Fade To Black" offset="2s" duration="1s"/>
        </spine></sequence></project></fcpxml>"#,
    );
    let tr = out.project.layers[0].transition_out.as_ref().unwrap();
    assert_eq!(tr.kind, TransitionKind::DipToBlack);
}

#[test]
fn resolved_but_unmapped_filters_are_warned() {
    let out = run(FIXTURE);
    assert!(out.warnings.contains(&ConversionWarning::UnmappedEffect {
        layer: "Broll".to_string(),
        effect: "Bad TV".to_string(),
    }));
}

#[test]
fn clips_without_duration_are_dropped() {
    let out = run(
        r#"<fcpxml><project name="P"><sequence><spine>
            <asset-clip name="Broken" offset="0s"/>
            <asset-clip name="Fine" offset="0s" duration="3001/1000s"/>
        </spine></sequence></project></fcpxml>"#,
    );
    assert_eq!(out.project.layers.len(), 1);
    assert_eq!(out.project.layers[0].duration, 3.001);
}

#[test]
fn spine_transitions_on_an_occupied_edge_are_reported() {
    let out = run(
        r#"<fcpxml><project name="P"><sequence><spine>
            <video name="A" offset="0s" duration="3s"/>
            <transition name="Cross Dissolve" offset="2s" duration="1s"/>
            <video name="B" offset="3s" duration="3s">
                <transition name="Wipe" duration="1/2s"/>
            </video>
        </spine></sequence></project></fcpxml>"#,
    );
    let b = layer(&out, "B");
    assert_eq!(b.transition_in.as_ref().map(|t| t.kind), Some(TransitionKind::Wipe));
    assert!(out.warnings.contains(&ConversionWarning::TransitionDropped {
        layer: "B".to_string(),
        name: "Cross Dissolve".to_string(),
        reason: "edge already has a transition".to_string(),
    }));
}

#[test]
fn connected_lanes_past_the_integer_range_drop_the_clip() {
    let out = run(
        r#"<fcpxml><project name="P"><sequence><spine>
            <clip name="Base" offset="0s" duration="5s">
                <video name="High" lane="2147483647" offset="0s" duration="2s">
                    <video name="Higher" lane="1" offset="0s" duration="1s"/>
                </video>
            </clip>
        </spine></sequence></project></fcpxml>"#,
    );
    let names: Vec<&str> = out.project.layers.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Base", "High"]);
    assert!(out.warnings.contains(&ConversionWarning::ClipDropped {
        name: "Higher".to_string(),
        reason: "lane out of range".to_string(),
    }));
}
