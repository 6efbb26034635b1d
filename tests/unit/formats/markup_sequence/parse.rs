use super::*;

const FIXTURE: &str = include_str!("../../../fixtures/sequence.xml");

#[test]
fn reads_sequence_header_and_tracks_in_source_order() {
    let doc = parse(FIXTURE).unwrap();
    assert_eq!(doc.version.as_deref(), Some("5"));
    assert_eq!(doc.sequences.len(), 1);

    let seq = &doc.sequences[0];
    assert_eq!(seq.name, "Main Edit");
    assert_eq!(seq.timebase, 30.0);
    assert!(!seq.ntsc);
    assert_eq!(seq.duration, Some(300.0));
    assert_eq!((seq.width, seq.height), (Some(1920), Some(1080)));

    let kinds: Vec<TrackKind> = seq.tracks.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![TrackKind::Video, TrackKind::Video, TrackKind::Audio]);
    assert_eq!(seq.clip_count(), 3);
}

#[test]
fn clip_fields_stay_in_frames() {
    let doc = parse(FIXTURE).unwrap();
    let clip = &doc.sequences[0].tracks[0].clips[0];
    assert_eq!(clip.name, "Intro");
    assert_eq!((clip.start, clip.end), (Some(0.0), Some(150.0)));
    assert_eq!(clip.source.as_deref(), Some("file://localhost/media/intro.mov"));

    let tr = clip.transition_in.as_ref().unwrap();
    assert_eq!(tr.name, "Cross Dissolve");
    assert_eq!(tr.duration, Some(30.0));

    assert_eq!(clip.filters.len(), 1);
    let param = &clip.filters[0].params[0];
    assert!(param.is("blurriness"));
    assert_eq!(param.value, Some(12.0));
}

#[test]
fn negative_frames_are_unset_and_defaults_apply() {
    let doc = parse(
        r#"<xmeml version="4"><sequence><media><video><track>
            <clipitem><name>A</name><start>-1</start><end>90</end><in>10</in><out>100</out></clipitem>
            <transitionitem><start>80</start><end>100</end><alignment>center</alignment></transitionitem>
        </track></video></media></sequence></xmeml>"#,
    )
    .unwrap();
    let seq = &doc.sequences[0];
    assert_eq!(seq.name, "Untitled Sequence");
    assert_eq!(seq.timebase, 30.0);
    assert_eq!(seq.width, None);

    let track = &seq.tracks[0];
    assert_eq!(track.clips[0].start, None);
    assert_eq!(track.clips[0].end, Some(90.0));
    assert_eq!(track.transitions[0].name, "Cross Dissolve");
    assert_eq!(track.transitions[0].alignment.as_deref(), Some("center"));
}

#[test]
fn point_values_and_keyframes_are_read() {
    let doc = parse(
        r#"<xmeml><sequence><rate><timebase>24</timebase><ntsc>TRUE</ntsc></rate>
        <media><video><track><clipitem><name>A</name><start>0</start><end>48</end>
          <filter><effect><name>Basic Motion</name>
            <parameter><parameterid>center</parameterid><name>Center</name>
              <value><horiz>0.25</horiz><vert>-0.1</vert></value>
              <keyframe><when>0</when><value><horiz>0</horiz><vert>0</vert></value></keyframe>
              <keyframe><when>24</when><value><horiz>0.5</horiz><vert>0.2</vert></value></keyframe>
            </parameter>
          </effect></filter>
        </clipitem></track></video></media></sequence></xmeml>"#,
    )
    .unwrap();
    let seq = &doc.sequences[0];
    assert!((seq.frame_rate().fps() - 23.976).abs() < 1e-3);

    let param = &seq.tracks[0].clips[0].filters[0].params[0];
    assert_eq!((param.value, param.value_y), (Some(0.25), Some(-0.1)));
    assert_eq!(param.keyframes.len(), 2);
    assert_eq!(param.keyframes[1].when, 24.0);
    assert_eq!(param.keyframes[1].value_y, Some(0.2));
}

#[test]
fn rangeless_clips_are_skipped_and_recorded() {
    let doc = parse(
        "<xmeml><sequence><media><video><track><clipitem><name>Ghost</name></clipitem></track></video></media></sequence></xmeml>",
    )
    .unwrap();
    assert!(doc.sequences[0].tracks[0].clips.is_empty());
    assert_eq!(doc.skipped.len(), 1);
}

#[test]
fn wrong_root_or_broken_markup_is_a_parse_error() {
    assert!(matches!(
        parse("<fcpxml/>"),
        Err(SpliceError::Parse {
            format: SourceFormat::MarkupSequence,
            ..
        })
    ));
    assert!(parse("<xmeml><sequence></xmeml>").is_err());
}
