use super::*;

const FIXTURE: &str = include_str!("../../../fixtures/compositions.json");

#[test]
fn splits_items_into_compositions_and_footage() {
    let doc = parse(FIXTURE).unwrap();
    assert_eq!(doc.version.as_deref(), Some("23.2"));
    assert_eq!(doc.compositions.len(), 3);
    assert_eq!(doc.footage.len(), 2);
    assert_eq!(
        doc.footage("2").and_then(|f| f.path.as_deref()),
        Some("/media/hero.mov")
    );
    assert!(doc.is_composition("11"));
    assert!(doc.skipped.is_empty());
}

#[test]
fn layer_fields_keep_native_units() {
    let doc = parse(FIXTURE).unwrap();
    let comp = &doc.compositions[0];
    assert_eq!(comp.name, "Main Comp");
    assert_eq!((comp.width, comp.height), (Some(1280), Some(720)));
    assert_eq!(comp.frame_rate, Some(24.0));

    let title = &comp.layers[0];
    assert_eq!(title.text.as_deref(), Some("YOUR TITLE HERE"));
    assert_eq!(title.in_point, 1.0);
    let pos = title.transform.position.as_ref().unwrap();
    assert_eq!(pos.value, vec![640.0, 360.0, 0.0]);
    assert_eq!(pos.keyframes.len(), 2);
    assert_eq!(pos.keyframes[0].easing.as_deref(), Some("easeOut"));
    assert_eq!(title.transform.opacity.as_ref().unwrap().value, vec![50.0]);
    assert!(title.has_expressions());

    let hero = &comp.layers[1];
    assert!(hero.three_d);
    assert_eq!(hero.source.as_deref(), Some("2"));
    assert_eq!(hero.masks, 1);
    assert_eq!(hero.blending_mode.as_deref(), Some("BlendingMode.SCREEN"));

    assert!(comp.layers[3].is_camera_or_light());
}

#[test]
fn effect_names_prefer_known_match_names() {
    let doc = parse(FIXTURE).unwrap();
    let glow = &doc.compositions[0].layers[0].effects[0];
    assert_eq!(glow.native_name(), "ADBE Glow2");
    assert_eq!(glow.params.get("radius"), Some(&25.0));

    let particles = &doc.compositions[0].layers[1].effects[0];
    assert_eq!(particles.native_name(), "CC Particle World");
}

#[test]
fn bare_values_and_array_parameters_are_accepted() {
    let doc = parse(
        r#"{"items":[{"typeName":"Composition","name":"C","layers":[
            {"name":"L","transform":{"rotation":45},
             "effects":[{"name":"Sharpen","parameters":[{"name":"amount","value":"30"}]}]},
            "garbage"
        ]}]}"#,
    )
    .unwrap();
    let layer = &doc.compositions[0].layers[0];
    assert_eq!(layer.match_name, "AVLayer");
    assert_eq!(layer.transform.rotation.as_ref().unwrap().value, vec![45.0]);
    assert_eq!(layer.effects[0].params.get("amount"), Some(&30.0));
    assert_eq!(doc.skipped.len(), 1);
}

#[test]
fn non_object_roots_fail() {
    assert!(matches!(
        parse("[1, 2]"),
        Err(SpliceError::Parse {
            format: SourceFormat::CompositionGraph,
            ..
        })
    ));
    assert!(parse("{ not json").is_err());
}
