//! Native timing units and their conversion to seconds.
//!
//! Parsers keep times in the unit the source format writes (frame counts,
//! rational `"num/den s"` strings, or seconds); converters turn them into
//! seconds with the helpers here.

/// Frame rate used when a document does not declare one.
pub const DEFAULT_FRAME_RATE: f64 = 30.0;

/// A positive, finite frames-per-second value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameRate(f64);

impl FrameRate {
    /// Returns `None` unless `fps` is finite and > 0.
    pub fn new(fps: f64) -> Option<Self> {
        (fps.is_finite() && fps > 0.0).then_some(Self(fps))
    }

    /// Integer timebase with the NTSC pull-down flag (`timebase * 1000/1001`).
    pub fn from_timebase(timebase: f64, ntsc: bool) -> Option<Self> {
        let fps = if ntsc {
            timebase * 1000.0 / 1001.0
        } else {
            timebase
        };
        Self::new(fps)
    }

    /// Frames per second.
    pub fn fps(self) -> f64 {
        self.0
    }

    pub fn frames_to_secs(self, frames: f64) -> f64 {
        frames / self.0
    }

    pub fn secs_to_frames(self, secs: f64) -> f64 {
        secs * self.0
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self(DEFAULT_FRAME_RATE)
    }
}

/// A rational time value as written by XML timeline documents (`"1001/30000s"`, `"5s"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RationalTime {
    pub num: i64,
    pub den: i64, // must be > 0
}

impl RationalTime {
    pub const ZERO: Self = Self { num: 0, den: 1 };

    pub fn new(num: i64, den: i64) -> Option<Self> {
        (den > 0).then_some(Self { num, den })
    }

    /// Parse `"num/den s"` or `"N s"` (whitespace and the trailing `s` optional).
    ///
    /// Decimal whole values (`"2.5s"`) are accepted and scaled to milliseconds.
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim();
        let s = s.strip_suffix('s').unwrap_or(s).trim();
        if s.is_empty() {
            return None;
        }

        if let Some((num, den)) = s.split_once('/') {
            let num = num.trim().parse::<i64>().ok()?;
            let den = den.trim().parse::<i64>().ok()?;
            return Self::new(num, den);
        }

        if let Ok(whole) = s.parse::<i64>() {
            return Some(Self { num: whole, den: 1 });
        }

        let secs = s.parse::<f64>().ok()?;
        if !secs.is_finite() {
            return None;
        }
        Some(Self {
            num: (secs * 1000.0).round() as i64,
            den: 1000,
        })
    }

    pub fn as_secs(self) -> Option<f64> {
        if self.den <= 0 {
            return None;
        }
        Some(self.num as f64 / self.den as f64)
    }

    /// Seconds, with an invalid denominator treated as zero.
    pub fn secs_or_zero(self) -> f64 {
        self.as_secs().unwrap_or(0.0)
    }
}

/// Lenient numeric parse used by the markup parsers (`"30"`, `" 1.5 "`).
pub fn parse_number(raw: &str) -> Option<f64> {
    let v = raw.trim().parse::<f64>().ok()?;
    v.is_finite().then_some(v)
}

/// Markup booleans: `TRUE`/`FALSE`, `1`/`0`, `yes`/`no`.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/time.rs"]
mod tests;
