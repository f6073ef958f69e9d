use crate::{
    animation::ease::DEFAULT_BACK_OVERSHOOT,
    foundation::core::Vec2,
    foundation::error::{ReelError, ReelResult},
};

/// Start/end values of the three camera curves.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CameraProfile {
    pub pan_from: Vec2,
    pub pan_to: Vec2,
    /// Zoom at frame 0; reaches `zoom_to` at the scene midpoint.
    pub zoom_from: f64,
    pub zoom_to: f64,
    /// Rotation about the vertical axis, in degrees.
    pub rotation_from_deg: f64,
    pub rotation_to_deg: f64,
}

impl Default for CameraProfile {
    fn default() -> Self {
        Self {
            pan_from: Vec2::new(880.0, 200.491),
            pan_to: Vec2::new(-460.0, 0.0),
            zoom_from: 4.0,
            zoom_to: 1.0,
            rotation_from_deg: -20.0,
            rotation_to_deg: -40.0,
        }
    }
}

/// Playback timing for reveal, title and camera, expressed in seconds where it scales with fps.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub reveal_secs: f64,
    /// Total on-screen time of the title, fades included.
    pub title_secs: f64,
    pub title_fade_in_secs: f64,
    pub title_fade_out_secs: f64,
    pub title_start_scale: f64,
    pub title_overshoot: f64,
    pub camera: CameraProfile,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            reveal_secs: 5.0,
            title_secs: 2.0,
            title_fade_in_secs: 0.5,
            title_fade_out_secs: 0.5,
            title_start_scale: 0.8,
            title_overshoot: DEFAULT_BACK_OVERSHOOT,
            camera: CameraProfile::default(),
        }
    }
}

impl MotionConfig {
    pub fn validate(&self) -> ReelResult<()> {
        let secs = [
            self.reveal_secs,
            self.title_secs,
            self.title_fade_in_secs,
            self.title_fade_out_secs,
        ];
        if !secs.iter().all(|s| s.is_finite() && *s >= 0.0) {
            return Err(ReelError::validation(
                "motion durations must be finite and >= 0",
            ));
        }
        if self.title_fade_in_secs + self.title_fade_out_secs > self.title_secs {
            return Err(ReelError::validation(
                "title fades must fit inside title_secs",
            ));
        }
        let c = self.camera;
        let values = [
            self.title_start_scale,
            self.title_overshoot,
            c.pan_from.x,
            c.pan_from.y,
            c.pan_to.x,
            c.pan_to.y,
            c.zoom_from,
            c.zoom_to,
            c.rotation_from_deg,
            c.rotation_to_deg,
        ];
        if !values.iter().all(|v| v.is_finite()) {
            return Err(ReelError::validation("motion values must be finite"));
        }
        Ok(())
    }
}
