use crate::{
    animation::{ease::Ease, timeline::Timeline},
    foundation::core::Vec2,
    foundation::error::ReelResult,
    motion::config::CameraProfile,
};

/// Camera pose for one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CameraState {
    pub pan: Vec2,
    pub zoom: f64,
    /// Perspective rotation about the vertical axis, in degrees.
    pub rotation_y_deg: f64,
}

/// Pan, zoom and rotation curves over one scene of `duration` frames.
///
/// Pan and rotation span the whole scene; zoom settles at the midpoint and holds.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraAnimator {
    pan_x: Timeline,
    pan_y: Timeline,
    zoom: Timeline,
    rotation: Timeline,
}

impl CameraAnimator {
    pub fn new(profile: &CameraProfile, duration: f64) -> ReelResult<Self> {
        let p = profile;
        Ok(Self {
            pan_x: Timeline::ramp(0.0, duration, p.pan_from.x, p.pan_to.x, Ease::InOutCubic)?,
            pan_y: Timeline::ramp(0.0, duration, p.pan_from.y, p.pan_to.y, Ease::InOutCubic)?,
            zoom: Timeline::ramp(0.0, duration / 2.0, p.zoom_from, p.zoom_to, Ease::OutCubic)?,
            rotation: Timeline::ramp(
                0.0,
                duration,
                p.rotation_from_deg,
                p.rotation_to_deg,
                Ease::InOutCubic,
            )?,
        })
    }

    pub fn at(&self, frame: f64) -> ReelResult<CameraState> {
        Ok(CameraState {
            pan: Vec2::new(self.pan_x.sample(frame)?, self.pan_y.sample(frame)?),
            zoom: self.zoom.sample(frame)?,
            rotation_y_deg: self.rotation.sample(frame)?,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/camera.rs"]
mod tests;
