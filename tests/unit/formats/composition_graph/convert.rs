use super::*;
use crate::{
    formats::composition_graph::parse,
    import::options::ImportOptions,
    model::{effect::EffectKind, layer::BlendMode},
};

const FIXTURE: &str = include_str!("../../../fixtures/compositions.json");

fn run_with(content: &str, opts: &ImportOptions) -> Conversion {
    let doc = parse(content).unwrap();
    convert(&doc, ConvertCtx::new(opts, "composition-graph-test")).unwrap()
}

fn run(content: &str) -> Conversion {
    run_with(content, &ImportOptions::default())
}

#[test]
fn only_the_first_composition_is_converted() {
    let out = run(FIXTURE);
    assert_eq!(out.project.name, "Main Comp");
    assert_eq!(out.project.resolution, Resolution { width: 1280, height: 720 });
    assert_eq!(out.project.duration, 8.0);

    let warning = out
        .warnings
        .iter()
        .find(|w| matches!(w, ConversionWarning::MultipleTimelines { .. }))
        .unwrap();
    assert!(warning.to_string().contains("discarded 2"));
}

#[test]
fn camera_layers_are_dropped_and_tracks_follow_stacking() {
    let out = run(FIXTURE);
    let names: Vec<&str> = out.project.layers.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Title", "Hero", "Background"]);
    let tracks: Vec<u32> = out.project.layers.iter().map(|l| l.track).collect();
    assert_eq!(tracks, vec![2, 1, 0]);
    assert!(out
        .warnings
        .iter()
        .any(|w| matches!(w, ConversionWarning::ClipDropped { name, .. } if name == "Camera 1")));
}

#[test]
fn layer_kinds_and_sources_resolve_through_footage() {
    let out = run(FIXTURE);
    let l = &out.project.layers;
    assert_eq!(l[0].kind, LayerKind::Text);
    assert_eq!(l[0].text.as_deref(), Some("YOUR TITLE HERE"));
    assert_eq!(l[1].kind, LayerKind::Video);
    assert_eq!(l[1].source.as_deref(), Some("/media/hero.mov"));
    assert_eq!(l[2].kind, LayerKind::Image);
}

#[test]
fn transform_values_are_normalized() {
    let out = run(FIXTURE);
    let title = &out.project.layers[0];
    assert_eq!(title.start_time, 1.0);
    assert_eq!(title.duration, 4.0);
    assert_eq!(title.properties.x, 640.0);
    assert_eq!(title.properties.opacity, 0.5);

    let hero = &out.project.layers[1];
    assert_eq!(hero.properties.scale, 0.8);
    assert_eq!(hero.properties.anchor_x, Some(960.0));
    assert_eq!(hero.blend_mode, Some(BlendMode::Screen));
    assert!(out.warnings.contains(&ConversionWarning::DepthCollapsed {
        layer: "Hero".to_string()
    }));
}

#[test]
fn position_keyframes_split_into_layer_relative_axes() {
    let out = run(FIXTURE);
    let title = &out.project.layers[0];
    let xs: Vec<(f64, f64)> = title
        .keyframes
        .iter()
        .filter(|k| k.property == "x")
        .map(|k| (k.time, k.value.as_number().unwrap()))
        .collect();
    assert_eq!(xs, vec![(0.0, 0.0), (2.0, 640.0)]);
    assert_eq!(title.keyframes[0].easing, Easing::EaseOut);
    assert_eq!(title.keyframes.iter().filter(|k| k.property == "y").count(), 2);
}

#[test]
fn literal_expressions_become_static_keyframes() {
    let out = run(FIXTURE);
    let bg = &out.project.layers[2];
    assert_eq!(bg.keyframes.len(), 1);
    assert_eq!(bg.keyframes[0].property, "opacity");
    assert_eq!(bg.keyframes[0].value.as_number(), Some(1.0));

    assert!(out.warnings.contains(&ConversionWarning::ExpressionApproximated {
        layer: "Background".to_string(),
        property: "opacity".to_string(),
    }));
    assert!(out.warnings.contains(&ConversionWarning::ExpressionDropped {
        layer: "Title".to_string(),
        property: "rotation".to_string(),
    }));
}

#[test]
fn expressions_are_all_dropped_when_approximation_is_off() {
    let opts = ImportOptions {
        approximate_expressions: false,
        ..ImportOptions::default()
    };
    let out = run_with(FIXTURE, &opts);
    assert!(out.project.layers[2].keyframes.is_empty());
    assert!(out.warnings.contains(&ConversionWarning::ExpressionDropped {
        layer: "Background".to_string(),
        property: "opacity".to_string(),
    }));
}

#[test]
fn effects_map_by_match_name() {
    let out = run(FIXTURE);
    let glow = &out.project.layers[0].effects[0];
    assert_eq!(glow.kind, EffectKind::Glow);
    assert_eq!(glow.params.get("radius"), Some(&25.0));
    assert_eq!(glow.params.get("threshold"), Some(&75.0));

    let particles = &out.project.layers[1].effects[0];
    assert_eq!(particles.kind, EffectKind::CustomUnmapped);
    assert_eq!(particles.name, "CC Particle World");
}

#[test]
fn documents_without_compositions_fail() {
    let doc = parse(r#"{"items":[{"typeName":"Folder"}]}"#).unwrap();
    let opts = ImportOptions::default();
    assert!(matches!(
        convert(&doc, ConvertCtx::new(&opts, "x")),
        Err(SpliceError::NoTimelineFound(SourceFormat::CompositionGraph))
    ));
}

#[test]
fn keyframes_are_stored_in_time_order() {
    let out = run(
        r#"{"items":[{"typeName":"Composition","name":"C","duration":5,"layers":[
            {"name":"L","matchName":"ADBE AV Layer","inPoint":0,"outPoint":5,
             "transform":{"opacity":{"value":100,"keyframes":[
                {"time":3,"value":0},{"time":1,"value":100},{"time":1,"value":50}]}}}
        ]}]}"#,
    );
    let keys: Vec<(f64, f64)> = out.project.layers[0]
        .keyframes
        .iter()
        .map(|k| (k.time, k.value.as_number().unwrap()))
        .collect();
    assert_eq!(keys, vec![(1.0, 1.0), (1.0, 0.5), (3.0, 0.0)]);
}
