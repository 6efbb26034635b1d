use std::collections::BTreeMap;

use crate::model::effect::{Effect, EffectKind};

/// Default and valid range of one canonical effect parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamSpec {
    pub key: &'static str,
    pub default: f64,
    pub min: f64,
    pub max: f64,
}

/// One logical effect and every native identifier that names it.
#[derive(Clone, Copy, Debug)]
pub struct EffectEntry {
    pub names: &'static [&'static str],
    pub kind: EffectKind,
    pub params: &'static [ParamSpec],
}

const fn p(key: &'static str, default: f64, min: f64, max: f64) -> ParamSpec {
    ParamSpec {
        key,
        default,
        min,
        max,
    }
}

const COLOR_GRADE: &[ParamSpec] = &[
    p("exposure", 0.0, -5.0, 5.0),
    p("contrast", 0.0, -100.0, 100.0),
    p("highlights", 0.0, -100.0, 100.0),
    p("shadows", 0.0, -100.0, 100.0),
    p("whites", 0.0, -100.0, 100.0),
    p("blacks", 0.0, -100.0, 100.0),
    p("saturation", 100.0, 0.0, 200.0),
    p("vibrance", 0.0, -100.0, 100.0),
];

const COLOR_WHEELS: &[ParamSpec] = &[
    p("lift_r", 0.0, -1.0, 1.0),
    p("lift_g", 0.0, -1.0, 1.0),
    p("lift_b", 0.0, -1.0, 1.0),
    p("gamma_r", 1.0, 0.1, 4.0),
    p("gamma_g", 1.0, 0.1, 4.0),
    p("gamma_b", 1.0, 0.1, 4.0),
    p("gain_r", 1.0, 0.0, 4.0),
    p("gain_g", 1.0, 0.0, 4.0),
    p("gain_b", 1.0, 0.0, 4.0),
];

const BLUR: &[ParamSpec] = &[p("blurriness", 0.0, 0.0, 100.0)];

const BRIGHTNESS_CONTRAST: &[ParamSpec] = &[
    p("brightness", 0.0, -100.0, 100.0),
    p("contrast", 0.0, -100.0, 100.0),
];

const HUE_SATURATION: &[ParamSpec] = &[
    p("hue", 0.0, -180.0, 180.0),
    p("saturation", 0.0, -100.0, 100.0),
    p("lightness", 0.0, -100.0, 100.0),
];

const SHARPEN: &[ParamSpec] = &[p("amount", 0.0, 0.0, 100.0)];

const GLOW: &[ParamSpec] = &[
    p("threshold", 75.0, 0.0, 100.0),
    p("radius", 10.0, 0.0, 100.0),
    p("intensity", 50.0, 0.0, 100.0),
];

/// Native effect identifiers across tools and tool versions.
static TABLE: &[EffectEntry] = &[
    EffectEntry {
        names: &["Lumetri Color", "ADBE Lumetri", "AE.ADBE Lumetri"],
        kind: EffectKind::ColorGrade,
        params: COLOR_GRADE,
    },
    EffectEntry {
        names: &["Primary Color Wheels", "Color Wheels", "Color Corrector"],
        kind: EffectKind::ColorGrade,
        params: COLOR_WHEELS,
    },
    EffectEntry {
        names: &[
            "Gaussian Blur",
            "ADBE Gaussian Blur 2",
            "ADBE Gaussian Blur",
            "Fast Blur",
            "ADBE Fast Blur",
            "Gaussian",
        ],
        kind: EffectKind::Blur,
        params: BLUR,
    },
    EffectEntry {
        names: &[
            "Brightness & Contrast",
            "ADBE Brightness & Contrast 2",
            "ADBE Brightness & Contrast",
            "Brightness and Contrast",
        ],
        kind: EffectKind::BrightnessContrast,
        params: BRIGHTNESS_CONTRAST,
    },
    EffectEntry {
        names: &["Hue/Saturation", "ADBE HUE SATURATION", "Hue Saturation"],
        kind: EffectKind::HueSaturation,
        params: HUE_SATURATION,
    },
    EffectEntry {
        names: &["Sharpen", "ADBE Sharpen"],
        kind: EffectKind::Sharpen,
        params: SHARPEN,
    },
    EffectEntry {
        names: &["Glow", "ADBE Glow2", "ADBE Glow", "Bloom"],
        kind: EffectKind::Glow,
        params: GLOW,
    },
];

/// Table entry for an exact native effect identifier.
pub fn lookup(native_name: &str) -> Option<&'static EffectEntry> {
    TABLE.iter().find(|e| e.names.contains(&native_name))
}

/// Every native identifier the table knows, in table order.
pub fn supported_effects() -> impl Iterator<Item = &'static str> {
    TABLE.iter().flat_map(|e| e.names.iter().copied())
}

/// Map a native effect onto its canonical equivalent.
///
/// Parameters missing from `native_params` get the table default; present
/// values pass through unclamped. Parameters the table does not define are
/// dropped. Unknown names return `None`.
pub fn map_effect(native_name: &str, native_params: &BTreeMap<String, f64>) -> Option<Effect> {
    let entry = lookup(native_name)?;

    let params = entry
        .params
        .iter()
        .map(|spec| {
            let value = native_params
                .iter()
                .find(|(k, _)| param_key_eq(k, spec.key))
                .map(|(_, v)| *v)
                .unwrap_or(spec.default);
            (spec.key.to_string(), value)
        })
        .collect();

    Some(Effect {
        id: entry.kind.tag().to_string(),
        kind: entry.kind,
        name: native_name.to_string(),
        enabled: true,
        params,
    })
}

/// Placeholder for a native effect without canonical equivalent.
///
/// It is disabled so renderers skip it; numeric parameters are kept for
/// re-export.
pub fn unmapped_effect(native_name: &str, native_params: &BTreeMap<String, f64>) -> Effect {
    Effect {
        id: EffectKind::CustomUnmapped.tag().to_string(),
        kind: EffectKind::CustomUnmapped,
        name: native_name.to_string(),
        enabled: false,
        params: native_params.clone(),
    }
}

/// Range of `key` for the entry `effect` was mapped from.
pub fn param_range(effect: &Effect, key: &str) -> Option<(f64, f64)> {
    let entry = lookup(&effect.name).filter(|e| e.kind == effect.kind)?;
    entry
        .params
        .iter()
        .find(|s| s.key == key)
        .map(|s| (s.min, s.max))
}

/// Copy of `effect` with every known parameter clamped into its range.
pub fn clamp_params(effect: &Effect) -> Effect {
    let mut out = effect.clone();
    for (key, value) in out.params.iter_mut() {
        if let Some((min, max)) = param_range(effect, key) {
            *value = value.clamp(min, max);
        }
    }
    out
}

fn param_key_eq(native: &str, canonical: &str) -> bool {
    let norm = |s: &str| -> String {
        s.chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect()
    };
    norm(native) == norm(canonical)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/mapper.rs"]
mod tests;
