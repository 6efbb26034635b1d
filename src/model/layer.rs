use crate::model::{effect::Effect, keyframe::Keyframe, transition::Transition};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayerKind {
    Video,
    Image,
    Text,
    Audio,
    Shape,
}

impl LayerKind {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Image => "image",
            Self::Text => "text",
            Self::Audio => "audio",
            Self::Shape => "shape",
        }
    }
}

/// Static (un-animated) layer properties.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerProperties {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// 0..1
    pub opacity: f64,
    /// Degrees.
    pub rotation: f64,
    /// Uniform scale factor.
    pub scale: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_y: Option<f64>,
}

impl Default for LayerProperties {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            opacity: 1.0,
            rotation: 0.0,
            scale: 1.0,
            anchor_x: None,
            anchor_y: None,
        }
    }
}

impl LayerProperties {
    /// Full-frame properties for a canvas of `width`×`height`.
    pub fn full_frame(width: u32, height: u32) -> Self {
        Self {
            width: f64::from(width),
            height: f64::from(height),
            ..Self::default()
        }
    }

    /// Read a bag property by canonical name.
    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            "x" => Some(self.x),
            "y" => Some(self.y),
            "width" => Some(self.width),
            "height" => Some(self.height),
            "opacity" => Some(self.opacity),
            "rotation" => Some(self.rotation),
            "scale" => Some(self.scale),
            "anchorX" | "anchor_x" => self.anchor_x,
            "anchorY" | "anchor_y" => self.anchor_y,
            _ => None,
        }
    }

    /// Write a bag property by canonical name; returns `false` for names
    /// outside the bag.
    pub fn set(&mut self, name: &str, v: f64) -> bool {
        match name {
            "x" => self.x = v,
            "y" => self.y = v,
            "width" => self.width = v,
            "height" => self.height = v,
            "opacity" => self.opacity = v,
            "rotation" => self.rotation = v,
            "scale" => self.scale = v,
            "anchorX" | "anchor_x" => self.anchor_x = Some(v),
            "anchorY" | "anchor_y" => self.anchor_y = Some(v),
            _ => return false,
        }
        true
    }
}

/// The twelve canonical composite operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
}

impl BlendMode {
    pub const ALL: [BlendMode; 12] = [
        Self::Normal,
        Self::Multiply,
        Self::Screen,
        Self::Overlay,
        Self::Darken,
        Self::Lighten,
        Self::ColorDodge,
        Self::ColorBurn,
        Self::HardLight,
        Self::SoftLight,
        Self::Difference,
        Self::Exclusion,
    ];

    /// Resolve a native blend-mode spelling (`"BlendingMode.COLOR_DODGE"`,
    /// `"Hard Light"`, `"soft-light"`, ...).
    pub fn from_native(raw: &str) -> Option<Self> {
        let raw = raw.rsplit('.').next().unwrap_or(raw);
        let key: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "normal" | "sourceover" | "" => Some(Self::Normal),
            "multiply" => Some(Self::Multiply),
            "screen" => Some(Self::Screen),
            "overlay" => Some(Self::Overlay),
            "darken" => Some(Self::Darken),
            "lighten" => Some(Self::Lighten),
            "colordodge" => Some(Self::ColorDodge),
            "colorburn" => Some(Self::ColorBurn),
            "hardlight" => Some(Self::HardLight),
            "softlight" => Some(Self::SoftLight),
            "difference" => Some(Self::Difference),
            "exclusion" => Some(Self::Exclusion),
            _ => None,
        }
    }

    /// The backend composite primitive this mode maps onto.
    pub fn composite_op(self) -> &'static str {
        match self {
            Self::Normal => "source-over",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Overlay => "overlay",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
            Self::ColorDodge => "color-dodge",
            Self::ColorBurn => "color-burn",
            Self::HardLight => "hard-light",
            Self::SoftLight => "soft-light",
            Self::Difference => "difference",
            Self::Exclusion => "exclusion",
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Layer {
    /// Unique within the owning project.
    pub id: String,
    pub kind: LayerKind,
    pub name: String,
    /// Seconds on the project timeline; >= 0.
    pub start_time: f64,
    /// Seconds; > 0.
    pub duration: f64,
    /// Lower tracks render first.
    pub track: u32,
    pub properties: LayerProperties,
    /// Opaque media handle resolved by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub keyframes: Vec<Keyframe>,
    #[serde(default)]
    pub effects: Vec<Effect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_in: Option<Transition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_out: Option<Transition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blend_mode: Option<BlendMode>,
}

impl Layer {
    pub fn new(
        id: impl Into<String>,
        kind: LayerKind,
        name: impl Into<String>,
        start_time: f64,
        duration: f64,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            start_time,
            duration,
            track: 0,
            properties: LayerProperties::default(),
            source: None,
            text: None,
            keyframes: Vec::new(),
            effects: Vec::new(),
            transition_in: None,
            transition_out: None,
            blend_mode: None,
        }
    }

    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// `[start, end)` membership on the project timeline.
    pub fn is_active_at(&self, t: f64) -> bool {
        self.start_time <= t && t < self.end_time()
    }

    /// Order keyframes by time. The sort is stable, so keyframes sharing a
    /// time keep their source order within each property.
    pub fn sort_keyframes(&mut self) {
        self.keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
    }
}
