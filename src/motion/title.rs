use crate::{
    animation::{ease::Ease, timeline::Timeline},
    foundation::error::ReelResult,
    geometry::scale::ScaleMapper,
    motion::config::MotionConfig,
    series::normalize::DataPoint,
};

/// Title overlay appearance for one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TitleState {
    pub opacity: f64,
    pub scale: f64,
    /// Canvas-space y the title block is vertically centred on.
    pub anchor_top: f64,
}

impl TitleState {
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

/// Fade-in / hold / fade-out opacity plus a pop-in scale for the symbol overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleAnimator {
    opacity: Timeline,
    scale: Timeline,
    anchor_top: f64,
}

impl TitleAnimator {
    pub fn new(fps: u32, motion: &MotionConfig, anchor_top: f64) -> ReelResult<Self> {
        let fps = f64::from(fps);
        let fade_in = motion.title_fade_in_secs * fps;
        let fade_out = motion.title_fade_out_secs * fps;
        let end = motion.title_secs * fps;
        let hold_end = end - fade_out;

        Ok(Self {
            opacity: Timeline::new(
                vec![0.0, fade_in, hold_end, end],
                vec![0.0, 1.0, 1.0, 0.0],
                Ease::InOutEase,
            )?,
            scale: Timeline::ramp(
                0.0,
                fade_in,
                motion.title_start_scale,
                1.0,
                Ease::out_back(motion.title_overshoot),
            )?,
            anchor_top,
        })
    }

    pub fn at(&self, frame: f64) -> ReelResult<TitleState> {
        Ok(TitleState {
            opacity: self.opacity.sample(frame)?,
            scale: self.scale.sample(frame)?,
            anchor_top: self.anchor_top,
        })
    }
}

/// Canvas-space y of the first candle's body midpoint, so the title lines up with where the
/// series starts whatever the chart height.
pub fn title_anchor(first: &DataPoint, mapper: &ScaleMapper) -> f64 {
    mapper.area().padding.top + mapper.y_scale(first.body_mid())
}

#[cfg(test)]
#[path = "../../tests/unit/motion/title.rs"]
mod tests;
