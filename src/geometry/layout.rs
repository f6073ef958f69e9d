use crate::foundation::{
    color::Rgba8,
    core::Canvas,
    error::{ReelError, ReelResult},
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            top: 60.0,
            right: 80.0,
            bottom: 120.0,
            left: 80.0,
        }
    }
}

/// Fixed visual constants shared with the host rasterizer.
///
/// Defaults reproduce the reference look; every field can be overridden from JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub padding: Padding,
    pub volume_band_height: f64,
    /// Vertical gap between the price area and the volume band.
    pub band_gap: f64,
    pub bullish: Rgba8,
    pub bearish: Rgba8,
    pub background: Rgba8,
    pub title_color: Rgba8,
    pub subtitle_color: Rgba8,
    pub title_font_size: f64,
    pub subtitle_font_size: f64,
    pub price_label_font_size: f64,
    /// CSS-style weights, `1..=1000`.
    pub title_font_weight: u16,
    pub subtitle_font_weight: u16,
    pub price_label_font_weight: u16,
    /// Extra spacing between symbol glyphs, in em.
    pub title_letter_spacing_em: f64,
    /// Horizontal distance from the candle centre to its price label.
    pub price_label_offset: f64,
    pub volume_opacity: f64,
    pub perspective_px: f64,
    /// Fraction of a candle slot filled by its body.
    pub body_width_ratio: f64,
    pub min_body_width: f64,
    pub min_body_height: f64,
    pub wick_stroke_width: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            padding: Padding::default(),
            volume_band_height: 100.0,
            band_gap: 20.0,
            bullish: Rgba8::BULLISH,
            bearish: Rgba8::BEARISH,
            background: Rgba8::BACKGROUND,
            title_color: Rgba8::TITLE,
            subtitle_color: Rgba8::SUBTITLE,
            title_font_size: 120.0,
            subtitle_font_size: 32.0,
            price_label_font_size: 18.0,
            title_font_weight: 700,
            subtitle_font_weight: 500,
            price_label_font_weight: 600,
            title_letter_spacing_em: 0.05,
            price_label_offset: 15.0,
            volume_opacity: 0.5,
            perspective_px: 2000.0,
            body_width_ratio: 0.6,
            min_body_width: 2.0,
            min_body_height: 1.0,
            wick_stroke_width: 1.0,
        }
    }
}

impl ChartStyle {
    pub fn validate(&self) -> ReelResult<()> {
        let p = self.padding;
        let sizes = [
            p.top,
            p.right,
            p.bottom,
            p.left,
            self.volume_band_height,
            self.band_gap,
            self.title_font_size,
            self.subtitle_font_size,
            self.price_label_font_size,
            self.perspective_px,
            self.min_body_width,
            self.min_body_height,
            self.wick_stroke_width,
        ];
        if !sizes.iter().all(|v| v.is_finite() && *v >= 0.0) {
            return Err(ReelError::validation(
                "chart style sizes must be finite and >= 0",
            ));
        }
        let weights = [
            self.title_font_weight,
            self.subtitle_font_weight,
            self.price_label_font_weight,
        ];
        if !weights.iter().all(|w| (1..=1000).contains(w)) {
            return Err(ReelError::validation("font weights must be in 1..=1000"));
        }
        if !self.title_letter_spacing_em.is_finite() {
            return Err(ReelError::validation(
                "title_letter_spacing_em must be finite",
            ));
        }
        if !self.price_label_offset.is_finite() {
            return Err(ReelError::validation(
                "price_label_offset must be finite",
            ));
        }
        if !(0.0..=1.0).contains(&self.volume_opacity) {
            return Err(ReelError::validation("volume_opacity must be in [0, 1]"));
        }
        if !(self.body_width_ratio > 0.0 && self.body_width_ratio <= 1.0) {
            return Err(ReelError::validation("body_width_ratio must be in (0, 1]"));
        }
        Ok(())
    }

    pub fn candle_color(&self, bullish: bool) -> Rgba8 {
        if bullish { self.bullish } else { self.bearish }
    }
}

/// Plot rectangle for one frame size.
///
/// Candle coordinates are local to the padded origin `(padding.left, padding.top)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ChartArea {
    pub padding: Padding,
    pub total_width: f64,
    pub total_height: f64,
    pub volume_band_height: f64,
    pub band_gap: f64,
}

impl ChartArea {
    pub fn new(canvas: Canvas, style: &ChartStyle) -> ReelResult<Self> {
        let area = Self {
            padding: style.padding,
            total_width: f64::from(canvas.width),
            total_height: f64::from(canvas.height),
            volume_band_height: style.volume_band_height,
            band_gap: style.band_gap,
        };
        if area.chart_width() <= 0.0 || area.price_area_height() <= 0.0 {
            return Err(ReelError::validation(format!(
                "canvas {}x{} leaves no room for the chart after padding",
                canvas.width, canvas.height
            )));
        }
        Ok(area)
    }

    pub fn chart_width(&self) -> f64 {
        self.total_width - self.padding.left - self.padding.right
    }

    /// Height between the padding edges, price area plus gap plus volume band.
    pub fn chart_height(&self) -> f64 {
        self.total_height - self.padding.top - self.padding.bottom
    }

    pub fn price_area_height(&self) -> f64 {
        self.chart_height() - self.volume_band_height - self.band_gap
    }

    /// Canvas-space top edge of the volume band.
    pub fn volume_band_top(&self) -> f64 {
        self.padding.top + self.price_area_height() + self.band_gap
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/layout.rs"]
mod tests;
