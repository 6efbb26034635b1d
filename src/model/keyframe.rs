use kurbo::Vec2;

/// Easing curve applied to the progress between two keyframes (or across a transition).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Cubic Bezier through (0,0), (x1,y1), (x2,y2), (1,1).
    Bezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Easing {
    /// Resolve a native easing name. `bezier` supplies control points for
    /// `"bezier"`; without them the curve falls back to linear.
    pub fn from_native(name: &str, bezier: Option<[f64; 4]>) -> Self {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "easein" | "in" => Self::EaseIn,
            "easeout" | "out" => Self::EaseOut,
            "easeinout" | "inout" | "ease" => Self::EaseInOut,
            "bezier" | "cubicbezier" => match bezier {
                Some([x1, y1, x2, y2]) => Self::Bezier { x1, y1, x2, y2 },
                None => Self::Linear,
            },
            _ => Self::Linear,
        }
    }
}

/// A keyframe value: numbers interpolate, everything else switches discretely.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum KeyValue {
    Number(f64),
    Vec2(Vec2),
    Text(String),
}

impl KeyValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vec2(&self) -> Option<Vec2> {
        match self {
            Self::Vec2(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for KeyValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<Vec2> for KeyValue {
    fn from(v: Vec2) -> Self {
        Self::Vec2(v)
    }
}

/// One keyframe of one property of one layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    /// Property name, e.g. `opacity`, `x`, `scale`.
    pub property: String,
    /// Layer-relative time in seconds.
    pub time: f64,
    pub value: KeyValue,
    /// Easing applied on the way *into* this keyframe.
    #[serde(default)]
    pub easing: Easing,
}

impl Keyframe {
    pub fn new(property: impl Into<String>, time: f64, value: impl Into<KeyValue>) -> Self {
        Self {
            property: property.into(),
            time,
            value: value.into(),
            easing: Easing::Linear,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}
