use crate::{
    foundation::color::Rgba8,
    foundation::core::{Canvas, FrameIndex, Line, Point, Rect, Vec2},
    foundation::error::{ReelError, ReelResult},
    scene::{
        chart::{ChartInstance, TransitionState, VisualState},
        sequence::{Sequence, SequenceFrame},
    },
};

/// Gap between the symbol line and the description line of the title block.
const TITLE_LINE_GAP: f64 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Camera applied to everything a chart draws.
///
/// Points are panned, then scaled and rotated about `origin`, then projected with a perspective
/// of `perspective_px` whose vanishing point is also `origin`.
pub struct ChartTransform {
    /// Canvas centre; scale, rotation and perspective pivot here.
    pub origin: Point,
    /// Translation applied before scale and rotation.
    pub pan: Vec2,
    /// Uniform x/y scale.
    pub scale: f64,
    /// Rotation around the vertical axis through `origin`, in degrees.
    pub rotation_y_deg: f64,
    /// Viewer distance from the z = 0 plane.
    pub perspective_px: f64,
}

impl ChartTransform {
    /// Map a chart-space point to its on-screen position.
    pub fn project(&self, p: Point) -> Point {
        let local = p + self.pan - self.origin.to_vec2();
        let (sin, cos) = self.rotation_y_deg.to_radians().sin_cos();
        let x = self.scale * local.x * cos;
        let y = self.scale * local.y;
        // rotateY sends +x towards -z for positive angles; z is not affected by scale().
        let z = -local.x * sin;
        let w = if self.perspective_px > 0.0 {
            1.0 - z / self.perspective_px
        } else {
            1.0
        };
        Point::new(self.origin.x + x / w, self.origin.y + y / w)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Primitive emitted for one chart frame, in chart-space canvas pixels.
pub enum DrawOp {
    /// Stroked line segment (candle wick).
    Line {
        line: Line,
        color: Rgba8,
        stroke_width: f64,
    },
    /// Axis-aligned rectangle (candle body or volume bar).
    Rect {
        rect: Rect,
        fill: Rgba8,
        /// Outline drawn in the fill colour when set.
        stroke_width: Option<f64>,
        opacity: f64,
    },
    /// Single text run, left-aligned and vertically centred on `position`.
    Text {
        position: Point,
        text: String,
        color: Rgba8,
        font_size: f64,
        font_weight: u16,
    },
    /// Symbol and description stacked, right-aligned to `anchor.x` and vertically centred on
    /// `anchor.y`. `scale` pivots on the block centre.
    TitleBlock {
        anchor: Point,
        symbol: String,
        description: String,
        symbol_color: Rgba8,
        description_color: Rgba8,
        symbol_font_size: f64,
        description_font_size: f64,
        symbol_font_weight: u16,
        description_font_weight: u16,
        /// Extra spacing between symbol glyphs, in em.
        symbol_letter_spacing_em: f64,
        line_gap: f64,
        scale: f64,
        opacity: f64,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Everything a rasterizer needs to paint one chart frame.
///
/// `ops` are in paint order. Each op goes through `transform`, then the whole layer is shifted
/// by `transition.offset_x` and multiplied by `transition.opacity`.
pub struct DrawList {
    pub canvas: Canvas,
    pub background: Rgba8,
    pub transform: ChartTransform,
    pub transition: TransitionState,
    pub ops: Vec<DrawOp>,
}

impl DrawList {
    /// Final on-screen position of a chart-space point, transition included.
    pub fn to_screen(&self, p: Point) -> Point {
        self.transform.project(p) + Vec2::new(self.transition.offset_x, 0.0)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SequenceDrawLayer {
    pub chart_id: String,
    pub z_order: i32,
    pub draw: DrawList,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Draw lists for every layer visible at one sequence frame, bottom layer first.
pub struct SequenceDrawList {
    pub frame: FrameIndex,
    pub canvas: Canvas,
    pub background: Rgba8,
    pub layers: Vec<SequenceDrawLayer>,
}

/// Lower a chart's visual state into draw primitives.
///
/// Paint order: title block, then per candle wick, body and price label, then volume bars.
#[tracing::instrument(skip(chart, state), fields(symbol = %chart.symbol(), frame = state.frame.0))]
pub fn compile_chart_frame(chart: &ChartInstance, state: &VisualState) -> ReelResult<DrawList> {
    let style = chart.style();
    let area = chart.mapper().area();
    let canvas = chart.video().canvas();
    let origin = Vec2::new(area.padding.left, area.padding.top);
    let band_top = area.volume_band_top();

    let mut ops = Vec::with_capacity(state.visible_candles.len() * 3 + 2);

    if state.title.is_visible() {
        ops.push(DrawOp::TitleBlock {
            anchor: Point::new(area.padding.left, state.title.anchor_top),
            symbol: chart.symbol().to_owned(),
            description: chart.description().to_owned(),
            symbol_color: style.title_color,
            description_color: style.subtitle_color,
            symbol_font_size: style.title_font_size,
            description_font_size: style.subtitle_font_size,
            symbol_font_weight: style.title_font_weight,
            description_font_weight: style.subtitle_font_weight,
            symbol_letter_spacing_em: style.title_letter_spacing_em,
            line_gap: TITLE_LINE_GAP,
            scale: state.title.scale,
            opacity: state.title.opacity,
        });
    }

    for c in &state.visible_candles {
        let color = style.candle_color(c.is_bullish);
        let x = origin.x + c.x;
        ops.push(DrawOp::Line {
            line: Line::new((x, origin.y + c.wick_top), (x, origin.y + c.wick_bottom)),
            color,
            stroke_width: style.wick_stroke_width,
        });
        let left = origin.x + c.body_left();
        ops.push(DrawOp::Rect {
            rect: Rect::new(
                left,
                origin.y + c.body_top,
                left + c.body_width,
                origin.y + c.body_bottom,
            ),
            fill: color,
            stroke_width: Some(style.wick_stroke_width),
            opacity: 1.0,
        });
        if let Some(label) = &c.price_label {
            ops.push(DrawOp::Text {
                position: Point::new(origin.x + label.x, origin.y + label.y),
                text: label.text.clone(),
                color,
                font_size: style.price_label_font_size,
                font_weight: style.price_label_font_weight,
            });
        }
    }

    let band_bottom = band_top + area.volume_band_height;
    for c in &state.visible_candles {
        let left = origin.x + c.body_left();
        ops.push(DrawOp::Rect {
            rect: Rect::new(
                left,
                band_bottom - c.volume_bar_height,
                left + c.body_width,
                band_bottom,
            ),
            fill: style.candle_color(c.is_bullish),
            stroke_width: None,
            opacity: style.volume_opacity,
        });
    }

    Ok(DrawList {
        canvas,
        background: style.background,
        transform: ChartTransform {
            origin: Point::new(
                f64::from(canvas.width) / 2.0,
                f64::from(canvas.height) / 2.0,
            ),
            pan: state.camera.pan,
            scale: state.camera.zoom,
            rotation_y_deg: state.camera.rotation_y_deg,
            perspective_px: style.perspective_px,
        },
        transition: state.transition,
        ops,
    })
}

/// Lower every layer of a sequence frame, keeping paint order.
#[tracing::instrument(skip(seq, frame), fields(frame = frame.frame.0))]
pub fn compile_sequence_frame(
    seq: &Sequence,
    frame: &SequenceFrame,
) -> ReelResult<SequenceDrawList> {
    let mut layers = Vec::with_capacity(frame.layers.len());
    for layer in &frame.layers {
        let chart = seq.entry_chart(layer.entry_index).ok_or_else(|| {
            ReelError::evaluation(format!(
                "no chart prepared for entry {}",
                layer.entry_index
            ))
        })?;
        layers.push(SequenceDrawLayer {
            chart_id: layer.chart_id.clone(),
            z_order: layer.z_order,
            draw: compile_chart_frame(chart, &layer.state)?,
        });
    }

    let canvas = seq.video().canvas();
    let background = layers
        .first()
        .map(|l| l.draw.background)
        .unwrap_or(Rgba8::BACKGROUND);
    Ok(SequenceDrawList {
        frame: frame.frame,
        canvas,
        background,
        layers,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compile/draw.rs"]
mod tests;
