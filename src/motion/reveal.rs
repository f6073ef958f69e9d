use crate::{
    animation::{ease::Ease, timeline::Timeline},
    foundation::error::ReelResult,
};

/// Decides how many leading bars are visible at a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealController {
    progress: Timeline,
    total_points: usize,
}

impl RevealController {
    pub fn new(reveal_duration_frames: f64, total_points: usize) -> ReelResult<Self> {
        Ok(Self {
            progress: Timeline::ramp(0.0, reveal_duration_frames, 0.0, 1.0, Ease::InOutCubic)?,
            total_points,
        })
    }

    /// Eased reveal progress in `[0, 1]`.
    pub fn progress(&self, frame: f64) -> ReelResult<f64> {
        self.progress.sample(frame)
    }

    /// Raw revealed count; zero at the very start.
    pub fn reveal_count(&self, frame: f64) -> ReelResult<usize> {
        let p = self.progress(frame)?;
        Ok(((p * self.total_points as f64).floor() as usize).min(self.total_points))
    }

    /// Revealed count with at least one candle always on screen.
    pub fn visible_count(&self, frame: f64) -> ReelResult<usize> {
        Ok(self.reveal_count(frame)?.max(1))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/reveal.rs"]
mod tests;
