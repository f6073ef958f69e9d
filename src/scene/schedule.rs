use crate::{
    animation::{ease::Ease, timeline::Timeline},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{ReelError, ReelResult},
    scene::chart::TransitionState,
};

/// One chart's slot on the sequence timeline.
///
/// Transition timelines are sampled in global frames, so each entry's slide is independent of
/// every other entry.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScheduleEntry {
    pub chart_id: String,
    pub start_frame: u64,
    pub duration_frames: u64,
    #[serde(default)]
    pub z_order: i32,
    #[serde(default)]
    pub offset_x: Option<Timeline>,
    #[serde(default)]
    pub opacity: Option<Timeline>,
}

impl ScheduleEntry {
    pub fn new(chart_id: impl Into<String>, start_frame: u64, duration_frames: u64) -> Self {
        Self {
            chart_id: chart_id.into(),
            start_frame,
            duration_frames,
            z_order: 0,
            offset_x: None,
            opacity: None,
        }
    }

    pub fn z_order(mut self, z: i32) -> Self {
        self.z_order = z;
        self
    }

    pub fn offset_x(mut self, timeline: Option<Timeline>) -> Self {
        self.offset_x = timeline;
        self
    }

    pub fn opacity(mut self, timeline: Option<Timeline>) -> Self {
        self.opacity = timeline;
        self
    }

    /// Active window `[start, start + duration)`.
    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(self.start_frame),
            end: FrameIndex(self.start_frame.saturating_add(self.duration_frames)),
        }
    }

    pub fn validate(&self) -> ReelResult<()> {
        if self.chart_id.trim().is_empty() {
            return Err(ReelError::validation("schedule entry chart_id must be non-empty"));
        }
        if self.duration_frames == 0 {
            return Err(ReelError::validation(format!(
                "schedule entry '{}' must last at least one frame",
                self.chart_id
            )));
        }
        if let Some(tl) = &self.offset_x {
            tl.validate()?;
        }
        if let Some(tl) = &self.opacity {
            tl.validate()?;
        }
        Ok(())
    }

    fn transition_at(&self, frame: FrameIndex) -> ReelResult<TransitionState> {
        let g = frame.as_f64();
        let offset_x = match &self.offset_x {
            Some(tl) => tl.sample(g)?,
            None => 0.0,
        };
        let opacity = match &self.opacity {
            Some(tl) => tl.sample(g)?.clamp(0.0, 1.0),
            None => 1.0,
        };
        Ok(TransitionState { offset_x, opacity })
    }
}

/// An entry resolved against a global frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ActiveEntry {
    pub chart_id: String,
    /// Position in the schedule's declared order.
    pub entry_index: usize,
    pub local_frame: FrameIndex,
    pub z_order: i32,
    pub transition: TransitionState,
}

/// Ordered chart slots making up a multi-chart sequence. Slots may overlap.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneSchedule {
    pub entries: Vec<ScheduleEntry>,
}

impl SceneSchedule {
    pub fn new(entries: Vec<ScheduleEntry>) -> ReelResult<Self> {
        let schedule = Self { entries };
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn validate(&self) -> ReelResult<()> {
        if self.entries.is_empty() {
            return Err(ReelError::validation("schedule must have at least one entry"));
        }
        self.entries.iter().try_for_each(ScheduleEntry::validate)
    }

    /// First frame after every entry has ended.
    pub fn end_frame(&self) -> FrameIndex {
        self.entries
            .iter()
            .map(|e| e.range().end)
            .max()
            .unwrap_or(FrameIndex(0))
    }

    /// Entries active at global frame `frame`, in paint order: ascending `z_order`, ties in
    /// declared order.
    pub fn active_at(&self, frame: FrameIndex) -> ReelResult<Vec<ActiveEntry>> {
        let mut active = Vec::new();
        for (entry_index, entry) in self.entries.iter().enumerate() {
            if !entry.range().contains(frame) {
                continue;
            }
            active.push(ActiveEntry {
                chart_id: entry.chart_id.clone(),
                entry_index,
                local_frame: FrameIndex(frame.0 - entry.start_frame),
                z_order: entry.z_order,
                transition: entry.transition_at(frame)?,
            });
        }
        active.sort_by_key(|a| (a.z_order, a.entry_index));
        Ok(active)
    }
}

/// Where a slide starts and the off-screen x it comes from or goes to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlideEdge {
    pub start_frame: f64,
    pub offscreen_x: f64,
}

/// Horizontal slide timeline: pan in from `enter.offscreen_x`, hold at 0, pan out to
/// `exit.offscreen_x`. Each slide lasts `slide_frames`. `None` when neither edge is given.
pub fn slide_transition(
    enter: Option<SlideEdge>,
    exit: Option<SlideEdge>,
    slide_frames: f64,
) -> ReelResult<Option<Timeline>> {
    let mut breakpoints = Vec::with_capacity(4);
    let mut values = Vec::with_capacity(4);
    if let Some(e) = enter {
        breakpoints.extend([e.start_frame, e.start_frame + slide_frames]);
        values.extend([e.offscreen_x, 0.0]);
    }
    if let Some(e) = exit {
        breakpoints.extend([e.start_frame, e.start_frame + slide_frames]);
        values.extend([0.0, e.offscreen_x]);
    }
    if breakpoints.is_empty() {
        return Ok(None);
    }
    Timeline::new(breakpoints, values, Ease::InOutEase).map(Some)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/schedule.rs"]
mod tests;
