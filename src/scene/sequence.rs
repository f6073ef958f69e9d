use std::collections::BTreeMap;

use crate::{
    foundation::core::{FrameIndex, VideoConfig},
    foundation::error::{ReelError, ReelResult},
    scene::{
        chart::{ChartInstance, VisualState},
        schedule::SceneSchedule,
    },
};

/// One chart layer of a sequence frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SequenceLayer {
    pub chart_id: String,
    pub entry_index: usize,
    pub z_order: i32,
    pub state: VisualState,
}

/// All layers visible at a global frame, in paint order.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SequenceFrame {
    pub frame: FrameIndex,
    pub layers: Vec<SequenceLayer>,
}

/// Charts arranged over a shared timeline.
///
/// Each schedule entry gets its own copy of the chart retimed to the entry's window, so camera
/// curves run over the slot length rather than the whole video.
#[derive(Clone, Debug)]
pub struct Sequence {
    video: VideoConfig,
    schedule: SceneSchedule,
    charts: BTreeMap<String, ChartInstance>,
    entry_charts: Vec<ChartInstance>,
}

impl Sequence {
    pub fn new(
        video: VideoConfig,
        schedule: SceneSchedule,
        charts: BTreeMap<String, ChartInstance>,
    ) -> ReelResult<Self> {
        video.validate()?;
        schedule.validate()?;

        let mut entry_charts = Vec::with_capacity(schedule.entries.len());
        for entry in &schedule.entries {
            let chart = charts.get(&entry.chart_id).ok_or_else(|| {
                ReelError::validation(format!(
                    "schedule references unknown chart '{}'",
                    entry.chart_id
                ))
            })?;
            if chart.video().canvas() != video.canvas() {
                return Err(ReelError::validation(format!(
                    "chart '{}' canvas does not match the sequence canvas",
                    entry.chart_id
                )));
            }
            if chart.video().fps != video.fps {
                return Err(ReelError::validation(format!(
                    "chart '{}' runs at {} fps but the sequence runs at {} fps",
                    entry.chart_id,
                    chart.video().fps,
                    video.fps
                )));
            }
            entry_charts.push(chart.with_duration(entry.duration_frames)?);
        }

        Ok(Self {
            video,
            schedule,
            charts,
            entry_charts,
        })
    }

    pub fn video(&self) -> &VideoConfig {
        &self.video
    }

    pub fn schedule(&self) -> &SceneSchedule {
        &self.schedule
    }

    pub fn chart(&self, id: &str) -> Option<&ChartInstance> {
        self.charts.get(id)
    }

    /// Chart instance as retimed for schedule entry `entry_index`.
    pub fn entry_chart(&self, entry_index: usize) -> Option<&ChartInstance> {
        self.entry_charts.get(entry_index)
    }

    /// Frames `[0, duration)` the host should request.
    pub fn duration(&self) -> FrameIndex {
        FrameIndex(self.video.duration_in_frames)
    }

    #[tracing::instrument(skip(self))]
    pub fn eval_frame(&self, frame: FrameIndex) -> ReelResult<SequenceFrame> {
        let active = self.schedule.active_at(frame)?;
        let mut layers = Vec::with_capacity(active.len());
        for a in active {
            let chart = self.entry_charts.get(a.entry_index).ok_or_else(|| {
                ReelError::evaluation(format!("no chart prepared for entry {}", a.entry_index))
            })?;
            let state = chart.eval_frame_with_transition(a.local_frame, a.transition)?;
            layers.push(SequenceLayer {
                chart_id: a.chart_id,
                entry_index: a.entry_index,
                z_order: a.z_order,
                state,
            });
        }
        Ok(SequenceFrame { frame, layers })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/sequence.rs"]
mod tests;
