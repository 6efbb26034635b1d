use crate::model::keyframe::Easing;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionKind {
    Fade,
    Slide,
    Wipe,
    Push,
    Zoom,
    Blur,
    DipToBlack,
    CrossDissolve,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn from_native(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" | "right_to_left" | "rtl" => Some(Self::Left),
            "right" | "r" | "left_to_right" | "ltr" => Some(Self::Right),
            "up" | "top" | "bottom_to_top" | "btt" => Some(Self::Up),
            "down" | "bottom" | "top_to_bottom" | "ttb" => Some(Self::Down),
            _ => None,
        }
    }
}

/// A transition attached to the head (in) or tail (out) of a layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transition {
    pub kind: TransitionKind,
    /// Seconds; > 0.
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub easing: Easing,
}

impl Transition {
    pub fn new(kind: TransitionKind, duration: f64) -> Self {
        Self {
            kind,
            duration,
            direction: None,
            easing: Easing::Linear,
        }
    }
}
