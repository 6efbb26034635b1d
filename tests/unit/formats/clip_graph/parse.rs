use super::*;

const FIXTURE: &str = include_str!("../../../fixtures/timeline.drp");

#[test]
fn media_pool_and_timelines_are_read() {
    let doc = parse(FIXTURE).unwrap();
    assert_eq!(doc.version.as_deref(), Some("18.6"));
    assert_eq!(doc.media.len(), 3);
    assert_eq!(doc.media("m1").unwrap().width, Some(3840));
    assert_eq!(doc.media("m2").unwrap().duration, Some(4.0));
    assert_eq!(doc.timelines.len(), 2);
    assert_eq!(doc.timelines[0].name, "Edit v3");
    assert_eq!(doc.timelines[0].frame_rate, Some(24.0));
    assert_eq!(doc.timelines[1].tracks.len(), 0);
}

#[test]
fn media_without_id_and_bad_offsets_are_skipped() {
    let doc = parse(FIXTURE).unwrap();
    assert_eq!(doc.skipped.len(), 2);
    let overlay = &doc.timelines[0].tracks[1];
    assert_eq!(overlay.clips.len(), 1);
    assert_eq!(overlay.clips[0].name, "Name Tag");
}

#[test]
fn clip_children_are_collected() {
    let doc = parse(FIXTURE).unwrap();
    let tracks = &doc.timelines[0].tracks;
    assert_eq!(tracks[2].kind, TrackKind::Audio);

    let opening = &tracks[0].clips[0];
    let grade = opening.color_grade.unwrap();
    assert_eq!(grade.lift, [-0.05, 0.0, 0.02]);
    assert_eq!(grade.gamma, [1.1, 1.0, 1.0]);
    assert_eq!(grade.gain, [1.2, 1.1, 1.0]);
    assert_eq!(opening.transitions.len(), 2);
    assert_eq!(opening.transitions[1].edge, Edge::Out);
    assert_eq!(opening.transitions[1].duration, Some(0.5));

    let closing = &tracks[0].clips[1];
    assert_eq!(closing.duration, None);
    assert!(closing.fusion);
    assert_eq!(closing.effects[0].params.get("blurriness"), Some(&8.0));
    assert!(closing.effects[1].params.is_empty());
}

#[test]
fn wrong_root_is_a_parse_error() {
    let err = parse("<fcpxml version=\"1.10\"/>").unwrap_err();
    assert!(matches!(
        err,
        SpliceError::Parse {
            format: SourceFormat::ClipGraph,
            ..
        }
    ));
}

#[test]
fn partial_grade_keeps_neutral_defaults() {
    let doc = parse(
        r#"<project><timeline name="T"><track><clip name="c" duration="1">
           <colorGrade><gain r="2"/></colorGrade></clip></track></timeline></project>"#,
    )
    .unwrap();
    let grade = doc.timelines[0].tracks[0].clips[0].color_grade.unwrap();
    assert_eq!(grade.lift, [0.0; 3]);
    assert_eq!(grade.gain, [2.0, 1.0, 1.0]);
}
