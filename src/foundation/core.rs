use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::{Line, Point, Rect, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    pub start: FrameIndex,
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    pub fn new(start: FrameIndex, end: FrameIndex) -> ReelResult<Self> {
        if start.0 > end.0 {
            return Err(ReelError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

/// Timing and frame-size contract supplied by the host for one scene.
///
/// Constant for the lifetime of a chart instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VideoConfig {
    pub fps: u32,
    pub width: u32,
    pub height: u32,
    pub duration_in_frames: u64,
}

impl VideoConfig {
    pub fn new(fps: u32, width: u32, height: u32, duration_in_frames: u64) -> ReelResult<Self> {
        let cfg = Self {
            fps,
            width,
            height,
            duration_in_frames,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> ReelResult<()> {
        if self.fps == 0 {
            return Err(ReelError::validation("VideoConfig fps must be > 0"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ReelError::validation(
                "VideoConfig width/height must be > 0",
            ));
        }
        if self.duration_in_frames == 0 {
            return Err(ReelError::validation(
                "VideoConfig duration_in_frames must be > 0",
            ));
        }
        Ok(())
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Convert playback seconds to a (possibly fractional) frame count.
    pub fn secs_to_frames(&self, secs: f64) -> f64 {
        secs * f64::from(self.fps)
    }

    pub fn duration_f64(&self) -> f64 {
        self.duration_in_frames as f64
    }

    /// Same contract with the scene length replaced, used when a chart plays inside a sequence
    /// window shorter than the whole video.
    pub fn with_duration(self, duration_in_frames: u64) -> ReelResult<Self> {
        Self::new(self.fps, self.width, self.height, duration_in_frames)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
