use crate::{
    foundation::core::{FrameIndex, VideoConfig},
    foundation::error::ReelResult,
    geometry::{
        candles::{CandleGeometry, project_candles},
        layout::{ChartArea, ChartStyle},
        scale::ScaleMapper,
    },
    motion::{
        camera::{CameraAnimator, CameraState},
        config::MotionConfig,
        reveal::RevealController,
        title::{TitleAnimator, TitleState, title_anchor},
    },
    series::normalize::{DataPoint, RawSeries, SeriesStats, normalize},
};

/// Style and motion overrides for a chart instance.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    pub style: ChartStyle,
    pub motion: MotionConfig,
}

/// Slide/fade applied to a whole chart while it enters or leaves a sequence.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TransitionState {
    pub offset_x: f64,
    pub opacity: f64,
}

impl Default for TransitionState {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            opacity: 1.0,
        }
    }
}

/// Everything the host needs to draw one chart frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct VisualState {
    pub frame: FrameIndex,
    pub visible_candles: Vec<CandleGeometry>,
    pub camera: CameraState,
    /// Revealed candle count, never zero.
    pub reveal_count: usize,
    pub title: TitleState,
    pub transition: TransitionState,
}

/// One parameterized chart: a symbol, its series and the timing it plays with.
///
/// Series statistics and all curves are resolved at construction; evaluating a frame only reads
/// them, so one instance can serve any number of threads in any frame order.
#[derive(Clone, Debug)]
pub struct ChartInstance {
    symbol: String,
    description: String,
    points: Vec<DataPoint>,
    stats: SeriesStats,
    video: VideoConfig,
    options: ChartOptions,
    mapper: ScaleMapper,
    reveal: RevealController,
    camera: CameraAnimator,
    title: TitleAnimator,
}

impl ChartInstance {
    pub fn new(
        symbol: impl Into<String>,
        description: impl Into<String>,
        raw: &RawSeries,
        video: VideoConfig,
    ) -> ReelResult<Self> {
        Self::with_options(symbol, description, raw, video, ChartOptions::default())
    }

    pub fn with_options(
        symbol: impl Into<String>,
        description: impl Into<String>,
        raw: &RawSeries,
        video: VideoConfig,
        options: ChartOptions,
    ) -> ReelResult<Self> {
        video.validate()?;
        options.style.validate()?;
        options.motion.validate()?;

        let (points, stats) = normalize(raw)?;
        let area = ChartArea::new(video.canvas(), &options.style)?;
        let mapper = ScaleMapper::new(area, stats, points.len(), &options.style);
        let motion = &options.motion;

        let reveal =
            RevealController::new(video.secs_to_frames(motion.reveal_secs), points.len())?;
        let camera = CameraAnimator::new(&motion.camera, video.duration_f64())?;
        let title = TitleAnimator::new(video.fps, motion, title_anchor(&points[0], &mapper))?;

        Ok(Self {
            symbol: symbol.into(),
            description: description.into(),
            points,
            stats,
            video,
            options,
            mapper,
            reveal,
            camera,
            title,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn stats(&self) -> &SeriesStats {
        &self.stats
    }

    pub fn video(&self) -> &VideoConfig {
        &self.video
    }

    pub fn style(&self) -> &ChartStyle {
        &self.options.style
    }

    pub fn mapper(&self) -> &ScaleMapper {
        &self.mapper
    }

    /// Same series and options replayed over a different scene length.
    pub fn with_duration(&self, duration_in_frames: u64) -> ReelResult<Self> {
        let video = self.video.with_duration(duration_in_frames)?;
        Ok(Self {
            camera: CameraAnimator::new(&self.options.motion.camera, video.duration_f64())?,
            video,
            ..self.clone()
        })
    }

    /// Evaluate a standalone frame: no transition offset, full opacity.
    pub fn eval_frame(&self, frame: FrameIndex) -> ReelResult<VisualState> {
        self.eval_frame_with_transition(frame, TransitionState::default())
    }

    /// Frames past the scene end hold the final pose instead of failing.
    #[tracing::instrument(skip(self), fields(symbol = %self.symbol))]
    pub fn eval_frame_with_transition(
        &self,
        frame: FrameIndex,
        transition: TransitionState,
    ) -> ReelResult<VisualState> {
        let f = frame.as_f64();
        let reveal_count = self.reveal.visible_count(f)?;
        let visible_candles =
            project_candles(&self.points, reveal_count, &self.mapper, &self.options.style);

        Ok(VisualState {
            frame,
            visible_candles,
            camera: self.camera.at(f)?,
            reveal_count,
            title: self.title.at(f)?,
            transition,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/chart.rs"]
mod tests;
