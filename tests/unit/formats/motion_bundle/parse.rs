use super::*;

const FIXTURE: &str = include_str!("../../../fixtures/motion.json");

#[test]
fn project_header_is_read() {
    let doc = parse(FIXTURE).unwrap();
    assert_eq!(doc.version.as_deref(), Some("5.6"));
    assert_eq!(doc.name, "Promo Opener");
    assert_eq!((doc.width, doc.height), (Some(3840), Some(2160)));
    assert_eq!(doc.frame_rate, Some(25.0));
    assert_eq!(doc.duration, Some(6.0));
    assert_eq!(doc.layers.as_ref().map(Vec::len), Some(4));
}

#[test]
fn layer_fields_and_defaults() {
    let doc = parse(FIXTURE).unwrap();
    let layers = doc.layers.unwrap();

    let backdrop = &layers[0];
    assert_eq!(backdrop.opacity, 1.0);
    assert_eq!(backdrop.scale, 1.0);
    assert_eq!(backdrop.filters[0].params.get("blurriness"), Some(&4.0));

    let headline = &layers[1];
    assert_eq!(headline.position, (1920.0, 400.0));
    assert_eq!(headline.scale, 1.2);
    assert_eq!(headline.behaviors.len(), 2);
    assert!(headline.behaviors[0].is_fade());
    assert_eq!(headline.behaviors[0].param("fadeinframes"), Some(25.0));
    assert_eq!(headline.keyframes[1].easing.as_deref(), Some("easeIn"));

    assert!(layers[2].is_procedural());
    assert!(!headline.is_procedural());
}

#[test]
fn missing_layers_array_is_distinct_from_empty() {
    assert_eq!(parse(r#"{"projectName":"X"}"#).unwrap().layers, None);
    assert_eq!(parse(r#"{"layers":[]}"#).unwrap().layers, Some(Vec::new()));
    let doc = parse(r#"{"layers":[7, {"name":"ok"}]}"#).unwrap();
    assert_eq!(doc.layers.unwrap().len(), 1);
    assert_eq!(doc.skipped.len(), 1);
}

#[test]
fn invalid_json_is_a_parse_error() {
    assert!(matches!(
        parse("<plist/>"),
        Err(SpliceError::Parse {
            format: SourceFormat::MotionBundle,
            ..
        })
    ));
}
