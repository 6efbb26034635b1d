use super::*;
use crate::foundation::error::SpliceError;

const SEQUENCE: &[u8] = include_bytes!("../../fixtures/sequence.xml");

#[test]
fn bom_is_stripped_and_invalid_bytes_replaced() {
    assert_eq!(decode_input(b"\xEF\xBB\xBF<xmeml/>"), "<xmeml/>");
    assert_eq!(decode_input(b"a\xFFb"), "a\u{FFFD}b");
}

#[test]
fn project_ids_are_deterministic() {
    let a = import("cut.xml", SEQUENCE).unwrap();
    let b = import("other-name.xml", SEQUENCE).unwrap();
    assert_eq!(a.project.id, b.project.id);
    assert!(a.project.id.starts_with("markup-sequence-"));
    assert_eq!(a, b);
}

#[test]
fn outcome_carries_format_report_and_warnings() {
    let out = import("cut.xml", SEQUENCE).unwrap();
    assert_eq!(out.format, SourceFormat::MarkupSequence);
    assert_eq!(out.project.layers.len(), 3);
    assert!(out.report.is_unsupported("Effect: Turbulent Displace"));
    assert!(out.warnings.iter().any(|w| w.contains("Turbulent Displace")));
}

#[test]
fn options_flow_into_conversion() {
    let options = ImportOptions {
        keep_unmapped_effects: false,
        min_duration_secs: 60.0,
        ..ImportOptions::default()
    };
    let out = Importer::new(options).import("cut.xml", SEQUENCE).unwrap();
    assert_eq!(out.project.duration, 60.0);
    assert!(out.project.layers[1].effects.is_empty());
}

#[test]
fn unrecognized_input_fails() {
    let err = import("notes.txt", b"hello").unwrap_err();
    assert!(matches!(err, SpliceError::UnrecognizedFormat(name) if name == "notes.txt"));
}

#[test]
fn structurally_broken_input_is_a_parse_error() {
    let err = import("cut.xml", b"<xmeml><sequence>").unwrap_err();
    assert!(matches!(
        err,
        SpliceError::Parse {
            format: SourceFormat::MarkupSequence,
            ..
        }
    ));
}
