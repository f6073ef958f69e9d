use crate::foundation::error::{ReelError, ReelResult};

/// Overshoot used by [`Ease::OutBack`] when none is configured.
pub const DEFAULT_BACK_OVERSHOOT: f64 = 1.5;

/// Named easing curves remapping normalized progress `[0, 1]`.
///
/// Input progress is clamped to `[0, 1]`. Output stays in `[0, 1]` for every curve except
/// [`Ease::OutBack`], which overshoots past 1 before settling.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    /// Cosine smoothstep.
    InOutSine,
    /// In-out mirror of the standard `ease` bezier `(0.42, 0, 1, 1)`.
    InOutEase,
    /// Pop-in curve: `1 + (s + 1)(p - 1)^3 + s(p - 1)^2`.
    OutBack { overshoot: f64 },
    /// CSS-style cubic bezier through `(0,0)`, `(x1,y1)`, `(x2,y2)`, `(1,1)`.
    Bezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Ease {
    pub fn out_back(overshoot: f64) -> Self {
        Self::OutBack { overshoot }
    }

    pub fn apply(self, t: f64) -> f64 {
        self.apply_unclamped(t.clamp(0.0, 1.0))
    }

    /// Evaluate the curve formula as-is, also outside `[0, 1]`. Used when a timeline extends
    /// past its edge breakpoints.
    pub fn apply_unclamped(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InOutSine => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,
            Self::InOutEase => {
                let ease = CubicBezier::new(0.42, 0.0, 1.0, 1.0);
                if t < 0.5 {
                    ease.solve(t * 2.0) / 2.0
                } else {
                    1.0 - ease.solve((1.0 - t) * 2.0) / 2.0
                }
            }
            Self::OutBack { overshoot } => {
                let q = t - 1.0;
                1.0 + (overshoot + 1.0) * q * q * q + overshoot * q * q
            }
            Self::Bezier { x1, y1, x2, y2 } => CubicBezier::new(x1, y1, x2, y2).solve(t),
        }
    }

    pub fn validate(self) -> ReelResult<()> {
        match self {
            Self::OutBack { overshoot } if !overshoot.is_finite() => Err(
                ReelError::invalid_timeline("OutBack overshoot must be finite"),
            ),
            Self::Bezier { x1, y1, x2, y2 } => {
                if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
                    return Err(ReelError::invalid_timeline(
                        "bezier control points must be finite",
                    ));
                }
                if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
                    return Err(ReelError::invalid_timeline(
                        "bezier x control points must be within [0, 1]",
                    ));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

const NEWTON_ITERATIONS: usize = 4;
const NEWTON_MIN_SLOPE: f64 = 0.001;
const SUBDIVISION_PRECISION: f64 = 0.000_000_1;
const SUBDIVISION_MAX_ITERATIONS: usize = 10;
const SPLINE_TABLE_SIZE: usize = 11;
const SAMPLE_STEP_SIZE: f64 = 1.0 / (SPLINE_TABLE_SIZE as f64 - 1.0);

/// Solves `y` for a given `x` on a unit cubic bezier: table lookup for a first guess, then
/// Newton-Raphson, falling back to bisection where the slope is too flat.
#[derive(Clone, Copy, Debug)]
struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn solve(self, x: f64) -> f64 {
        if self.x1 == self.y1 && self.x2 == self.y2 {
            return x;
        }
        if x == 0.0 || x == 1.0 {
            return x;
        }
        calc_bezier(self.t_for_x(x), self.y1, self.y2)
    }

    fn t_for_x(self, x: f64) -> f64 {
        let samples: [f64; SPLINE_TABLE_SIZE] =
            std::array::from_fn(|i| calc_bezier(i as f64 * SAMPLE_STEP_SIZE, self.x1, self.x2));

        let mut interval_start = 0.0;
        let mut current = 1;
        let last = SPLINE_TABLE_SIZE - 1;
        while current != last && samples[current] <= x {
            interval_start += SAMPLE_STEP_SIZE;
            current += 1;
        }
        current -= 1;

        let dist = (x - samples[current]) / (samples[current + 1] - samples[current]);
        let guess = interval_start + dist * SAMPLE_STEP_SIZE;

        let initial_slope = slope(guess, self.x1, self.x2);
        if initial_slope >= NEWTON_MIN_SLOPE {
            self.newton_raphson(x, guess)
        } else if initial_slope == 0.0 {
            guess
        } else {
            self.binary_subdivide(x, interval_start, interval_start + SAMPLE_STEP_SIZE)
        }
    }

    fn newton_raphson(self, x: f64, mut guess: f64) -> f64 {
        for _ in 0..NEWTON_ITERATIONS {
            let s = slope(guess, self.x1, self.x2);
            if s == 0.0 {
                return guess;
            }
            let current_x = calc_bezier(guess, self.x1, self.x2) - x;
            guess -= current_x / s;
        }
        guess
    }

    fn binary_subdivide(self, x: f64, mut a: f64, mut b: f64) -> f64 {
        let mut t = a + (b - a) / 2.0;
        for _ in 0..SUBDIVISION_MAX_ITERATIONS {
            t = a + (b - a) / 2.0;
            let current_x = calc_bezier(t, self.x1, self.x2) - x;
            if current_x.abs() <= SUBDIVISION_PRECISION {
                break;
            }
            if current_x > 0.0 {
                b = t;
            } else {
                a = t;
            }
        }
        t
    }
}

fn coeffs(a1: f64, a2: f64) -> (f64, f64, f64) {
    (1.0 - 3.0 * a2 + 3.0 * a1, 3.0 * a2 - 6.0 * a1, 3.0 * a1)
}

fn calc_bezier(t: f64, a1: f64, a2: f64) -> f64 {
    let (a, b, c) = coeffs(a1, a2);
    ((a * t + b) * t + c) * t
}

fn slope(t: f64, a1: f64, a2: f64) -> f64 {
    let (a, b, c) = coeffs(a1, a2);
    3.0 * a * t * t + 2.0 * b * t + c
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
