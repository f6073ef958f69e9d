use crate::{
    animation::ease::Ease,
    foundation::error::{ReelError, ReelResult},
};

/// Behaviour for frames outside a timeline's first/last breakpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Extrapolate {
    /// Hold the boundary value.
    #[default]
    Clamp,
    /// Continue the edge segment, evaluating its easing past `[0, 1]`.
    Extend,
    /// Return the input frame unchanged.
    Identity,
}

/// Sample a keyframe curve at `frame`.
///
/// `breakpoints` must be non-decreasing and pair 1:1 with `values` (at least two pairs).
/// Between `b[i]` and `b[i+1]` the normalized position is eased and then mapped linearly onto
/// `values[i]..values[i+1]`. A frame exactly on an inner breakpoint resolves to that
/// breakpoint's value.
pub fn interpolate(
    frame: f64,
    breakpoints: &[f64],
    values: &[f64],
    ease: Ease,
    extrapolate_left: Extrapolate,
    extrapolate_right: Extrapolate,
) -> ReelResult<f64> {
    validate_curve(breakpoints, values)?;
    ease.validate()?;
    if frame.is_nan() {
        return Err(ReelError::evaluation("cannot sample a timeline at NaN"));
    }
    Ok(sample_segment(
        frame,
        breakpoints,
        values,
        ease,
        extrapolate_left,
        extrapolate_right,
    ))
}

fn validate_curve(breakpoints: &[f64], values: &[f64]) -> ReelResult<()> {
    if breakpoints.len() != values.len() {
        return Err(ReelError::invalid_timeline(format!(
            "{} breakpoints but {} values",
            breakpoints.len(),
            values.len()
        )));
    }
    if breakpoints.len() < 2 {
        return Err(ReelError::invalid_timeline(
            "a timeline needs at least two breakpoints",
        ));
    }
    if !breakpoints.iter().chain(values).all(|v| v.is_finite()) {
        return Err(ReelError::invalid_timeline(
            "breakpoints and values must be finite",
        ));
    }
    if !breakpoints.windows(2).all(|w| w[0] <= w[1]) {
        return Err(ReelError::invalid_timeline(
            "breakpoints must be non-decreasing",
        ));
    }
    Ok(())
}

fn sample_segment(
    frame: f64,
    breakpoints: &[f64],
    values: &[f64],
    ease: Ease,
    extrapolate_left: Extrapolate,
    extrapolate_right: Extrapolate,
) -> f64 {
    let last = breakpoints.len() - 1;
    let seg = (1..last)
        .find(|&i| breakpoints[i] >= frame)
        .unwrap_or(last)
        - 1;

    let (b0, b1) = (breakpoints[seg], breakpoints[seg + 1]);
    let (v0, v1) = (values[seg], values[seg + 1]);

    if frame < b0 {
        match extrapolate_left {
            Extrapolate::Identity => return frame,
            Extrapolate::Clamp => return v0,
            Extrapolate::Extend => {}
        }
    }
    if frame > b1 {
        match extrapolate_right {
            Extrapolate::Identity => return frame,
            Extrapolate::Clamp => return v1,
            Extrapolate::Extend => {}
        }
    }

    if v0 == v1 {
        return v0;
    }
    let width = b1 - b0;
    if width == 0.0 {
        return if frame < b0 { v0 } else { v1 };
    }

    let p = (frame - b0) / width;
    v0 + ease.apply_unclamped(p) * (v1 - v0)
}

/// A named animation curve: breakpoints, values, easing and edge policy.
///
/// Timelines hold no per-frame state; the same frame always samples to the same value.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    pub breakpoints: Vec<f64>,
    pub values: Vec<f64>,
    pub ease: Ease,
    #[serde(default)]
    pub extrapolate_left: Extrapolate,
    #[serde(default)]
    pub extrapolate_right: Extrapolate,
}

impl Timeline {
    /// Build a clamped timeline, validating its shape up front.
    pub fn new(breakpoints: Vec<f64>, values: Vec<f64>, ease: Ease) -> ReelResult<Self> {
        let tl = Self {
            breakpoints,
            values,
            ease,
            extrapolate_left: Extrapolate::Clamp,
            extrapolate_right: Extrapolate::Clamp,
        };
        tl.validate()?;
        Ok(tl)
    }

    /// Two-point clamped ramp from `from` at `start` to `to` at `end`.
    pub fn ramp(start: f64, end: f64, from: f64, to: f64, ease: Ease) -> ReelResult<Self> {
        Self::new(vec![start, end], vec![from, to], ease)
    }

    pub fn with_extrapolation(mut self, left: Extrapolate, right: Extrapolate) -> Self {
        self.extrapolate_left = left;
        self.extrapolate_right = right;
        self
    }

    pub fn validate(&self) -> ReelResult<()> {
        validate_curve(&self.breakpoints, &self.values)?;
        self.ease.validate()
    }

    pub fn sample(&self, frame: f64) -> ReelResult<f64> {
        interpolate(
            frame,
            &self.breakpoints,
            &self.values,
            self.ease,
            self.extrapolate_left,
            self.extrapolate_right,
        )
    }

    /// First and last breakpoints.
    pub fn span(&self) -> (f64, f64) {
        let first = self.breakpoints.first().copied().unwrap_or(0.0);
        let last = self.breakpoints.last().copied().unwrap_or(first);
        (first, last)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
