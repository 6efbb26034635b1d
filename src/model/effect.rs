use std::collections::BTreeMap;

/// Canonical effect kinds understood by the render collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectKind {
    Blur,
    BrightnessContrast,
    HueSaturation,
    Sharpen,
    Glow,
    ColorGrade,
    /// A native effect with no canonical equivalent, kept for re-export only.
    CustomUnmapped,
}

impl EffectKind {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Blur => "blur",
            Self::BrightnessContrast => "brightness-contrast",
            Self::HueSaturation => "hue-saturation",
            Self::Sharpen => "sharpen",
            Self::Glow => "glow",
            Self::ColorGrade => "color-grade",
            Self::CustomUnmapped => "custom-unmapped",
        }
    }
}

/// An effect instance on a layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Effect {
    pub id: String,
    pub kind: EffectKind,
    /// Native effect identifier this instance was mapped from.
    pub name: String,
    pub enabled: bool,
    /// Parameter values, unclamped; valid ranges come from the effect mapper.
    pub params: BTreeMap<String, f64>,
}
