use super::*;
use crate::import::options::ImportOptions;

fn report_for(format: SourceFormat, content: &str) -> CompatibilityReport {
    let tree = formats::parse(format, content).unwrap();
    let conversion = formats::convert(&tree, &ImportOptions::default(), "report-test").unwrap();
    generate(&conversion.project, format, &tree)
}

fn sequence() -> CompatibilityReport {
    report_for(
        SourceFormat::MarkupSequence,
        include_str!("../../fixtures/sequence.xml"),
    )
}

#[test]
fn present_primitives_are_supported() {
    let report = sequence();
    assert!(report.is_supported("Video layers"));
    assert!(report.is_supported("Image layers"));
    assert!(report.is_supported("Audio layers"));
    assert!(!report.is_supported("Text layers"));
    assert!(report.is_supported("Transitions"));
    assert!(report.is_supported("Effect: Gaussian Blur"));
}

#[test]
fn unknown_effects_are_unsupported_not_fatal() {
    let report = sequence();
    assert!(report.is_unsupported("Effect: Turbulent Displace"));
    assert!(!report.is_supported("Effect: Turbulent Displace"));
}

#[test]
fn structural_losses_are_always_limited() {
    let report = sequence();
    assert_eq!(report.limited_features.len(), LIMITED_FEATURES.len());
    assert!(report.is_limited("3D transforms"));
    assert!(report.is_limited("Expressions"));
}

#[test]
fn feature_lists_do_not_overlap() {
    let report = report_for(
        SourceFormat::XmlTimeline,
        include_str!("../../fixtures/library.fcpxml"),
    );
    for f in &report.supported_features {
        assert!(!report.is_unsupported(f), "{f}");
        assert!(!report.is_limited(f), "{f}");
    }
    for f in &report.unsupported_features {
        assert!(!report.is_limited(f), "{f}");
    }
}

#[test]
fn discarded_compositions_are_noted() {
    let report = report_for(
        SourceFormat::CompositionGraph,
        include_str!("../../fixtures/compositions.json"),
    );
    assert!(
        report
            .notes
            .iter()
            .any(|n| n.contains("3 compositions found") && n.contains("discarded 2")),
        "{:?}",
        report.notes
    );
}

#[test]
fn generation_is_deterministic() {
    assert_eq!(sequence(), sequence());
}
