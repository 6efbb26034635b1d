use super::*;
use crate::model::project::Resolution;

fn text(id: &str, content: &str) -> Layer {
    let mut l = Layer::new(id, LayerKind::Text, id, 0.0, 1.0);
    l.text = Some(content.to_string());
    l
}

fn media(id: &str, kind: LayerKind, source: Option<&str>) -> Layer {
    let mut l = Layer::new(id, kind, id, 0.0, 1.0);
    l.source = source.map(str::to_string);
    l
}

fn project(layers: Vec<Layer>) -> Project {
    let mut p = Project::new("p", "P", Resolution::HD);
    p.layers = layers;
    p
}

#[test]
fn text_patterns_are_recognized() {
    let p = project(vec![
        text("a", "[INSERT TEXT HERE]"),
        text("b", "Welcome {{ name }}!"),
        text("c", "<Company Name>"),
        text("d", "Your Awesome Title"),
        text("e", "Quarterly results"),
    ]);
    let found = detect_placeholders(&p);
    let tokens: Vec<&str> = found.iter().map(|f| f.token.as_str()).collect();
    assert_eq!(
        tokens,
        vec!["[INSERT TEXT HERE]", "{{ name }}", "<Company Name>", "Your Awesome Title"]
    );
    assert!(found.iter().all(|f| f.kind == PlaceholderKind::Text));
}

#[test]
fn media_indicators_in_source_or_name() {
    let mut named = media("Drop Logo Here", LayerKind::Image, None);
    named.name = "Drop Logo Here".to_string();
    let p = project(vec![
        media("v", LayerKind::Video, Some("/stock/Sample-Clip.mov")),
        media("i", LayerKind::Image, Some("/brand/logo.png")),
        named,
        media("s", LayerKind::Audio, Some("/placeholder.wav")),
    ]);
    let found = detect_placeholders(&p);
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].layer_id, "v");
    assert_eq!(found[0].token, "sample");
    assert_eq!(found[1].token, "drop");
    assert_eq!(found[1].kind, PlaceholderKind::Media);
}

#[test]
fn text_layers_without_content_are_ignored() {
    let p = project(vec![Layer::new("t", LayerKind::Text, "Title", 0.0, 1.0)]);
    assert!(detect_placeholders(&p).is_empty());
}

#[test]
fn every_token_in_a_text_layer_is_reported() {
    let p = project(vec![text("t", "[TITLE TEXT] by {{author}} on {{date}}")]);
    let found = detect_placeholders(&p);
    let tokens: Vec<&str> = found.iter().map(|f| f.token.as_str()).collect();
    assert_eq!(tokens, vec!["[TITLE TEXT]", "{{author}}", "{{date}}"]);
    assert!(found.iter().all(|f| f.layer_id == "t"));
}

#[test]
fn overlapping_matches_count_once() {
    let p = project(vec![text("t", "<YOUR HEADLINE>")]);
    let found = detect_placeholders(&p);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].token, "<YOUR HEADLINE>");
}
