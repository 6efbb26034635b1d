use super::*;

#[test]
fn common_names_resolve() {
    assert_eq!(
        parse_transition_name("Cross Dissolve"),
        Some((TransitionKind::CrossDissolve, None))
    );
    assert_eq!(
        parse_transition_name("Dip to Black"),
        Some((TransitionKind::DipToBlack, None))
    );
    assert_eq!(
        parse_transition_name("crossfade"),
        Some((TransitionKind::Fade, None))
    );
    assert_eq!(
        parse_transition_name("Zoom"),
        Some((TransitionKind::Zoom, None))
    );
}

#[test]
fn directional_names_carry_direction() {
    assert_eq!(
        parse_transition_name("Slide Left"),
        Some((TransitionKind::Slide, Some(Direction::Left)))
    );
    assert_eq!(
        parse_transition_name("Push (Down)"),
        Some((TransitionKind::Push, Some(Direction::Down)))
    );
    assert_eq!(
        parse_transition_name("Clock Wipe"),
        Some((TransitionKind::Wipe, None))
    );
}

#[test]
fn unknown_names_are_none() {
    assert_eq!(parse_transition_name("Page Peel"), None);
    assert_eq!(parse_transition_name("   "), None);
}
