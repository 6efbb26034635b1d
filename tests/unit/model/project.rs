use super::*;
use crate::model::{
    keyframe::Keyframe,
    layer::{BlendMode, LayerKind},
    transition::{Transition, TransitionKind},
};

fn basic_project() -> Project {
    let mut p = Project::new("p0", "demo", Resolution::HD);
    p.add_layer(Layer::new("a", LayerKind::Video, "A", 0.0, 4.0))
        .unwrap();
    p.add_layer(Layer::new("b", LayerKind::Text, "B", 2.0, 6.0))
        .unwrap();
    p
}

#[test]
fn add_layer_grows_duration() {
    let p = basic_project();
    assert_eq!(p.duration, 8.0);
    assert_eq!(p.content_end(), 8.0);
    p.validate().unwrap();
}

#[test]
fn add_layer_rejects_duplicate_id() {
    let mut p = basic_project();
    let err = p
        .add_layer(Layer::new("a", LayerKind::Audio, "dup", 0.0, 1.0))
        .unwrap_err();
    assert!(err.to_string().contains("already exists"));
    assert_eq!(p.layers.len(), 2);
}

#[test]
fn add_layer_rejects_zero_duration() {
    let mut p = basic_project();
    assert!(
        p.add_layer(Layer::new("z", LayerKind::Video, "Z", 0.0, 0.0))
            .is_err()
    );
}

#[test]
fn update_layer_is_atomic_on_failure() {
    let mut p = basic_project();
    let err = p.update_layer("a", |l| l.duration = -1.0);
    assert!(err.is_err());
    assert_eq!(p.layer("a").unwrap().duration, 4.0);

    let err = p.update_layer("a", |l| l.id = "b".to_string());
    assert!(err.is_err());
    assert!(p.layer("a").is_some());
}

#[test]
fn update_layer_extends_but_never_truncates() {
    let mut p = basic_project();
    p.update_layer("b", |l| l.duration = 20.0).unwrap();
    assert_eq!(p.duration, 22.0);
    p.update_layer("b", |l| l.duration = 1.0).unwrap();
    assert_eq!(p.duration, 22.0);
}

#[test]
fn update_layer_unknown_id_fails() {
    let mut p = basic_project();
    assert!(
        p.update_layer("nope", |l| l.blend_mode = Some(BlendMode::Screen))
            .is_err()
    );
}

#[test]
fn remove_layer_returns_owned_layer() {
    let mut p = basic_project();
    let removed = p.remove_layer("a").unwrap();
    assert_eq!(removed.name, "A");
    assert!(p.remove_layer("a").is_none());
    assert_eq!(p.layers.len(), 1);
}

#[test]
fn validate_rejects_short_duration_and_bad_transition() {
    let mut p = basic_project();
    p.duration = 1.0;
    assert!(p.validate().is_err());

    let mut p = basic_project();
    p.layers[0].transition_in = Some(Transition::new(TransitionKind::Fade, 0.0));
    assert!(p.validate().is_err());
}

#[test]
fn json_roundtrip_keeps_layers() {
    let p = basic_project();
    let s = serde_json::to_string_pretty(&p).unwrap();
    let de: Project = serde_json::from_str(&s).unwrap();
    assert_eq!(de, p);
}

#[test]
fn resolution_fallbacks() {
    assert_eq!(Resolution::or_hd(None, Some(720)).height, 720);
    assert_eq!(Resolution::or_hd(Some(0), None), Resolution::HD);
}

#[test]
fn edits_keep_keyframes_in_time_order() {
    let mut p = basic_project();
    let mut layer = Layer::new("c", LayerKind::Shape, "C", 0.0, 3.0);
    layer.keyframes = vec![
        Keyframe::new("opacity", 2.0, 1.0),
        Keyframe::new("x", 0.0, 5.0),
        Keyframe::new("opacity", 0.0, 0.0),
    ];
    p.add_layer(layer).unwrap();
    let order: Vec<(&str, f64)> = p
        .layer("c")
        .unwrap()
        .keyframes
        .iter()
        .map(|k| (k.property.as_str(), k.time))
        .collect();
    assert_eq!(order, vec![("x", 0.0), ("opacity", 0.0), ("opacity", 2.0)]);

    p.update_layer("c", |l| l.keyframes.push(Keyframe::new("x", 1.0, 9.0)))
        .unwrap();
    let times: Vec<f64> = p.layer("c").unwrap().keyframes.iter().map(|k| k.time).collect();
    assert_eq!(times, vec![0.0, 0.0, 1.0, 2.0]);
}
