use kurbo::Vec2;

use crate::model::{
    layer::Layer,
    transition::{Direction, Transition, TransitionKind},
};

/// Distance a slide or push travels, in canvas units.
pub const SLIDE_DISTANCE: f64 = 100.0;
/// Blur radius at the start of a blur transition.
pub const MAX_BLUR_RADIUS: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    In,
    Out,
}

/// What an active transition does to its layer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionModifier {
    /// Multiplies the layer opacity.
    pub opacity: f64,
    /// Added to the layer position.
    pub offset: Vec2,
    /// Multiplies the layer scale.
    pub scale: f64,
    pub blur_radius: f64,
    /// Visible fraction of a wipe along its direction.
    pub reveal: f64,
}

impl TransitionModifier {
    pub const IDENTITY: Self = Self {
        opacity: 1.0,
        offset: Vec2::ZERO,
        scale: 1.0,
        blur_radius: 0.0,
        reveal: 1.0,
    };
}

impl Default for TransitionModifier {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ActiveTransition {
    pub phase: Phase,
    pub kind: TransitionKind,
    /// Eased progress through the window.
    pub progress: f64,
    pub modifier: TransitionModifier,
}

/// The transition whose window contains layer-local time `local`.
///
/// The in window is `[0, d_in)` and the out window `[duration - d_out,
/// duration)`. When both contain `local` the out transition wins.
/// Transitions with a non-positive or non-finite duration never apply.
pub fn resolve_transition(layer: &Layer, local: f64) -> Option<ActiveTransition> {
    if !(local >= 0.0 && local < layer.duration) {
        return None;
    }
    let out = layer.transition_out.as_ref().and_then(|tr| {
        let start = layer.duration - tr.duration;
        window_progress(tr, local - start).map(|p| (Phase::Out, tr, p))
    });
    let active = out.or_else(|| {
        layer
            .transition_in
            .as_ref()
            .and_then(|tr| window_progress(tr, local).map(|p| (Phase::In, tr, p)))
    });

    active.map(|(phase, tr, progress)| {
        let progress = tr.easing.apply(progress);
        ActiveTransition {
            phase,
            kind: tr.kind,
            progress,
            modifier: modifier(tr, phase, progress),
        }
    })
}

/// Linear progress of `offset` seconds into the window of `tr`.
fn window_progress(tr: &Transition, offset: f64) -> Option<f64> {
    let d = tr.duration;
    if !d.is_finite() || d <= 0.0 || !(0.0..d).contains(&offset) {
        return None;
    }
    Some(offset / d)
}

/// Side the layer enters from and leaves towards.
fn entry_axis(direction: Option<Direction>) -> Vec2 {
    match direction.unwrap_or(Direction::Left) {
        Direction::Left => Vec2::new(1.0, 0.0),
        Direction::Right => Vec2::new(-1.0, 0.0),
        Direction::Up => Vec2::new(0.0, 1.0),
        Direction::Down => Vec2::new(0.0, -1.0),
    }
}

fn modifier(tr: &Transition, phase: Phase, p: f64) -> TransitionModifier {
    // Visibility: rises with progress on the way in, falls on the way out.
    let v = match phase {
        Phase::In => p,
        Phase::Out => 1.0 - p,
    };
    let id = TransitionModifier::IDENTITY;
    match tr.kind {
        TransitionKind::Fade | TransitionKind::CrossDissolve => TransitionModifier {
            opacity: v,
            ..id
        },
        TransitionKind::DipToBlack => TransitionModifier {
            opacity: v * v,
            ..id
        },
        TransitionKind::Zoom => TransitionModifier {
            opacity: v,
            scale: 0.5 + 0.5 * v,
            ..id
        },
        TransitionKind::Slide | TransitionKind::Push => {
            let axis = entry_axis(tr.direction);
            let offset = match phase {
                Phase::In => axis * (SLIDE_DISTANCE * (1.0 - p)),
                Phase::Out => axis * (SLIDE_DISTANCE * p),
            };
            TransitionModifier { offset, ..id }
        }
        TransitionKind::Wipe => TransitionModifier { reveal: v, ..id },
        TransitionKind::Blur => TransitionModifier {
            blur_radius: (1.0 - p) * MAX_BLUR_RADIUS,
            ..id
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/transition.rs"]
mod tests;
