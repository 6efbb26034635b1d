use crate::model::transition::{Direction, TransitionKind};

/// Resolve a native transition name (`"Cross Dissolve"`, `"Dip to Black"`,
/// `"wipe"`, ...) to a canonical kind, with a direction when the name
/// implies one (`"Slide Left"`, `"Push (Right)"`).
///
/// Returns `None` for names with no canonical equivalent.
pub fn parse_transition_name(name: &str) -> Option<(TransitionKind, Option<Direction>)> {
    let lowered = name.trim().to_ascii_lowercase();
    if lowered.is_empty() {
        return None;
    }

    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let direction = words.iter().find_map(|w| Direction::from_native(w));
    let key: String = words.concat();

    let kind = match key.as_str() {
        "crossdissolve" | "dissolve" | "additivedissolve" | "filmdissolve" => {
            TransitionKind::CrossDissolve
        }
        "crossfade" | "fade" | "fadeinfadeout" | "fadein" | "fadeout" => TransitionKind::Fade,
        "diptoblack" | "dipblack" | "fadetoblack" | "fadethroughblack" => {
            TransitionKind::DipToBlack
        }
        "zoom" | "crosszoom" | "zoomin" | "zoomout" => TransitionKind::Zoom,
        "blur" | "crossblur" | "gaussianblur" => TransitionKind::Blur,
        _ if key.starts_with("slide") => TransitionKind::Slide,
        _ if key.starts_with("push") => TransitionKind::Push,
        _ if key.starts_with("wipe") || key.ends_with("wipe") => TransitionKind::Wipe,
        _ => return None,
    };

    Some((kind, direction))
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transitions.rs"]
mod tests;
