use crate::model::keyframe::Easing;

const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 32;
const SOLVE_EPS: f64 = 1e-7;

impl Easing {
    /// Map linear progress in `[0, 1]` onto the curve. Input is clamped;
    /// non-finite input counts as 0.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Self::Bezier { x1, y1, x2, y2 } => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

/// One coordinate of the Bernstein cubic through 0, `p1`, `p2`, 1.
fn bernstein(p1: f64, p2: f64, s: f64) -> f64 {
    let u = 1.0 - s;
    3.0 * u * u * s * p1 + 3.0 * u * s * s * p2 + s * s * s
}

fn bernstein_slope(p1: f64, p2: f64, s: f64) -> f64 {
    let u = 1.0 - s;
    3.0 * u * u * p1 + 6.0 * u * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// `y` on the curve at the parameter whose `x` equals `t`. The x control
/// points are clamped to `[0, 1]` so x stays monotone and the solve is unique.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, t: f64) -> f64 {
    let finite = [x1, y1, x2, y2].iter().all(|v| v.is_finite());
    if !finite {
        return t;
    }
    let (x1, x2) = (x1.clamp(0.0, 1.0), x2.clamp(0.0, 1.0));

    let mut s = t;
    for _ in 0..NEWTON_ITERATIONS {
        let err = bernstein(x1, x2, s) - t;
        if err.abs() < SOLVE_EPS {
            return bernstein(y1, y2, s);
        }
        let slope = bernstein_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s = (s - err / slope).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = t;
    for _ in 0..BISECTION_ITERATIONS {
        let x = bernstein(x1, x2, s);
        if (x - t).abs() < SOLVE_EPS {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    bernstein(y1, y2, s)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
