use super::*;

#[test]
fn fnv_hash_is_stable_across_split_writes() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"splice");
    let mut b = Fnv1a64::new_default();
    b.write_bytes(b"spl");
    b.write_bytes(b"ice");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn stable_id_depends_only_on_content() {
    let a = stable_id("xml-timeline", b"<fcpxml/>");
    let b = stable_id("xml-timeline", b"<fcpxml/>");
    let c = stable_id("xml-timeline", b"<fcpxml />");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(a.starts_with("xml-timeline-"));
    assert_eq!(a.len(), "xml-timeline-".len() + 16);
}

#[test]
fn lerp_endpoints_and_midpoint() {
    assert_eq!(lerp(2.0, 4.0, 0.0), 2.0);
    assert_eq!(lerp(2.0, 4.0, 1.0), 4.0);
    assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
}
