use super::*;

const FIXTURE: &str = include_str!("../../../fixtures/library.fcpxml");

#[test]
fn resources_are_indexed_by_id() {
    let doc = parse(FIXTURE).unwrap();
    assert_eq!(doc.version.as_deref(), Some("1.10"));

    let format = doc.resources.format("r1").unwrap();
    assert_eq!(format.frame_duration, RationalTime::new(100, 2500));
    assert_eq!((format.width, format.height), (Some(1920), Some(1080)));

    let interview = doc.resources.asset("r2").unwrap();
    assert_eq!(interview.src.as_deref(), Some("file:///media/interview.mov"));
    let score = doc.resources.asset("r4").unwrap();
    assert!(!score.has_video && score.has_audio);
    assert_eq!(doc.resources.effect("r6").unwrap().name, "Gaussian Blur");
}

#[test]
fn projects_keep_their_event() {
    let doc = parse(FIXTURE).unwrap();
    assert_eq!(doc.projects.len(), 2);
    let p = &doc.projects[0];
    assert_eq!(p.event.as_deref(), Some("Day 1"));
    assert_eq!(p.name, "Cut A");
    assert_eq!(p.format.as_deref(), Some("r1"));
    assert_eq!(p.duration, RationalTime::new(20, 1));
}

#[test]
fn spine_items_keep_rational_times_and_children() {
    let doc = parse(FIXTURE).unwrap();
    let spine = &doc.projects[0].spine;
    let kinds: Vec<ItemKind> = spine.iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ItemKind::AssetClip,
            ItemKind::Transition,
            ItemKind::AssetClip,
            ItemKind::Gap
        ]
    );

    let interview = &spine[0];
    assert_eq!(interview.start, RationalTime::new(10, 1));
    assert_eq!(interview.connected.len(), 2);
    assert_eq!(interview.connected[1].lane, Some(-1));
    let t = interview.transform.unwrap();
    assert_eq!(t.position, Some((10.0, -5.0)));
    assert_eq!(t.rotation, Some(12.0));
    assert_eq!(interview.blend_amount, Some(0.75));
    assert_eq!(interview.filters[0].params.get("blurriness"), Some(&8.0));

    assert_eq!(spine[1].duration, RationalTime::new(2, 1));
    let caption = &spine[3].connected[0];
    assert_eq!(caption.kind, ItemKind::Title);
    assert_eq!(caption.text.as_deref(), Some("YOUR TEXT HERE"));
}

#[test]
fn unsupported_spine_elements_are_recorded() {
    let doc = parse(
        r#"<fcpxml version="1.9"><project name="P"><sequence><spine>
            <mc-clip name="Multicam" offset="0s" duration="5s"/>
            <video name="Solid" offset="0s" duration="3s"/>
        </spine></sequence></project></fcpxml>"#,
    )
    .unwrap();
    assert_eq!(doc.projects[0].spine.len(), 1);
    assert_eq!(doc.skipped.len(), 1);
    assert_eq!(doc.projects[0].event, None);
}

#[test]
fn other_roots_are_rejected() {
    assert!(matches!(
        parse("<xmeml/>"),
        Err(SpliceError::Parse {
            format: SourceFormat::XmlTimeline,
            ..
        })
    ));
}

#[test]
fn connected_children_do_not_lend_their_asset_to_the_parent() {
    let doc = parse(
        r#"<fcpxml><project name="P"><sequence><spine>
            <clip name="Base" offset="0s" duration="5s">
                <asset-clip ref="r9" lane="1" offset="0s" duration="2s"/>
                <video ref="r2" offset="0s" duration="5s"/>
            </clip>
        </spine></sequence></project></fcpxml>"#,
    )
    .unwrap();
    let base = &doc.projects[0].spine[0];
    assert_eq!(base.reference.as_deref(), Some("r2"));
    assert_eq!(base.connected[0].reference.as_deref(), Some("r9"));
}
