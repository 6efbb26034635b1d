use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SpliceError::UnrecognizedFormat("a.bin".to_string())
            .to_string()
            .contains("unrecognized format:")
    );
    assert!(
        SpliceError::parse(SourceFormat::XmlTimeline, "x")
            .to_string()
            .contains("parse error (xml-timeline):")
    );
    assert!(
        SpliceError::NoTimelineFound(SourceFormat::CompositionGraph)
            .to_string()
            .contains("no timeline found in composition-graph")
    );
    assert!(
        SpliceError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SpliceError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SpliceError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn multiple_timelines_names_discarded_count() {
    let w = ConversionWarning::MultipleTimelines {
        container: "composition",
        total: 3,
        chosen: "Main".to_string(),
        discarded: 2,
    };
    assert_eq!(
        w.to_string(),
        "3 compositions found; converted 'Main' and discarded 2"
    );
}
