use std::collections::BTreeMap;

use crate::{
    foundation::core::VideoConfig,
    foundation::error::{ReelError, ReelResult},
    scene::{
        chart::ChartInstance,
        schedule::{SceneSchedule, ScheduleEntry, SlideEdge, slide_transition},
        sequence::Sequence,
    },
};

/// Timing for a left-to-right slideshow of charts.
///
/// Chart `k` starts at `k * step_frames` and plays `scene_frames`; while two charts overlap the
/// outgoing one slides to `exit_to_x` and the incoming one slides in from `enter_from_x`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SlideshowSpec {
    pub scene_frames: u64,
    pub step_frames: u64,
    pub slide_frames: u64,
    pub enter_from_x: f64,
    pub exit_to_x: f64,
}

impl SlideshowSpec {
    pub fn validate(&self) -> ReelResult<()> {
        if self.step_frames == 0 || self.step_frames > self.scene_frames {
            return Err(ReelError::validation(
                "slideshow step_frames must be in 1..=scene_frames",
            ));
        }
        if self.slide_frames > self.step_frames
            || self.step_frames + self.slide_frames > self.scene_frames
        {
            return Err(ReelError::validation(
                "slideshow slides must fit inside the overlap window",
            ));
        }
        if !self.enter_from_x.is_finite() || !self.exit_to_x.is_finite() {
            return Err(ReelError::validation("slideshow offsets must be finite"));
        }
        Ok(())
    }
}

/// Builder for [`Sequence`](crate::Sequence).
pub struct SequenceBuilder {
    video: VideoConfig,
    charts: BTreeMap<String, ChartInstance>,
    entries: Vec<ScheduleEntry>,
}

impl SequenceBuilder {
    pub fn new(video: VideoConfig) -> Self {
        Self {
            video,
            charts: BTreeMap::new(),
            entries: Vec::new(),
        }
    }

    /// Register a chart under a unique id.
    pub fn chart(mut self, id: impl Into<String>, chart: ChartInstance) -> ReelResult<Self> {
        let id = id.into();
        if self.charts.contains_key(&id) {
            return Err(ReelError::validation(format!("duplicate chart id '{id}'")));
        }
        self.charts.insert(id, chart);
        Ok(self)
    }

    pub fn entry(mut self, entry: ScheduleEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Append one slideshow entry per id. Z-order rises with position so incoming charts paint
    /// over outgoing ones.
    pub fn slideshow<I, S>(mut self, ids: I, timing: &SlideshowSpec) -> ReelResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        timing.validate()?;
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        let last = ids.len().saturating_sub(1);
        let slide = timing.slide_frames as f64;

        for (k, id) in ids.into_iter().enumerate() {
            let start = timing.step_frames * k as u64;
            let enter = (k > 0).then(|| SlideEdge {
                start_frame: start as f64,
                offscreen_x: timing.enter_from_x,
            });
            let exit = (k < last).then(|| SlideEdge {
                start_frame: (start + timing.step_frames) as f64,
                offscreen_x: timing.exit_to_x,
            });
            let entry = ScheduleEntry::new(id, start, timing.scene_frames)
                .z_order(k as i32 + 1)
                .offset_x(slide_transition(enter, exit, slide)?);
            self.entries.push(entry);
        }
        Ok(self)
    }

    /// Build and validate final [`Sequence`](crate::Sequence).
    pub fn build(self) -> ReelResult<Sequence> {
        let schedule = SceneSchedule::new(self.entries)?;
        Sequence::new(self.video, schedule, self.charts)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/dsl.rs"]
mod tests;
