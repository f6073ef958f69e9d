//! Candlereel turns OHLCV series into animated candlestick chart frames.
//!
//! Every frame is a pure function of its index: the engine never renders pixels itself, it
//! computes what a host rasterizer should draw.
//!
//! - Build a [`ChartInstance`] from a [`RawSeries`] and a [`VideoConfig`]
//! - Evaluate a [`VisualState`] for any frame, in any order, on any thread
//! - Arrange several charts on one timeline with [`SequenceBuilder`]
//! - Lower frames into [`DrawList`]s with [`compile_chart_frame`] or [`render_frames`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod compile;
pub(crate) mod geometry;
pub(crate) mod motion;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod series;

pub use crate::foundation::color::Rgba8;
pub use crate::foundation::core::{
    Canvas, FrameIndex, FrameRange, Line, Point, Rect, Vec2, VideoConfig,
};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::animation::ease::{DEFAULT_BACK_OVERSHOOT, Ease};
pub use crate::animation::timeline::{Extrapolate, Timeline, interpolate};
pub use crate::compile::draw::{
    ChartTransform, DrawList, DrawOp, SequenceDrawLayer, SequenceDrawList, compile_chart_frame,
    compile_sequence_frame,
};
pub use crate::compile::fingerprint::{
    FrameFingerprint, fingerprint_sequence_frame, fingerprint_state,
};
pub use crate::geometry::candles::{CandleGeometry, PriceLabel, project_candles};
pub use crate::geometry::layout::{ChartArea, ChartStyle, Padding};
pub use crate::geometry::scale::ScaleMapper;
pub use crate::motion::camera::{CameraAnimator, CameraState};
pub use crate::motion::config::{CameraProfile, MotionConfig};
pub use crate::motion::reveal::RevealController;
pub use crate::motion::title::{TitleAnimator, TitleState, title_anchor};
pub use crate::render::pipeline::{
    RenderStats, RenderThreading, evaluate_frames, render_frame, render_frames,
    render_frames_with_stats,
};
pub use crate::scene::chart::{ChartInstance, ChartOptions, TransitionState, VisualState};
pub use crate::scene::dsl::{SequenceBuilder, SlideshowSpec};
pub use crate::scene::schedule::{
    ActiveEntry, SceneSchedule, ScheduleEntry, SlideEdge, slide_transition,
};
pub use crate::scene::sequence::{Sequence, SequenceFrame, SequenceLayer};
pub use crate::series::normalize::{DataPoint, RawSeries, SeriesStats, normalize};
