use crate::{
    geometry::{layout::ChartStyle, scale::ScaleMapper},
    series::normalize::DataPoint,
};

/// Text drawn next to the most recently revealed candle.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PriceLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Resolved glyph for one revealed bar, in chart-local pixels.
///
/// `body_bottom - body_top` is never below the style's minimum body height, so doji bars stay
/// visible. `volume_bar_height` is measured upwards from the bottom of the volume band.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CandleGeometry {
    pub index: usize,
    pub x: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub body_top: f64,
    pub body_bottom: f64,
    pub body_width: f64,
    pub is_bullish: bool,
    pub volume_bar_height: f64,
    pub price_label: Option<PriceLabel>,
}

impl CandleGeometry {
    pub fn body_height(&self) -> f64 {
        self.body_bottom - self.body_top
    }

    pub fn body_left(&self) -> f64 {
        self.x - self.body_width / 2.0
    }
}

/// Project the first `visible` points; only the last projected candle carries a price label.
pub fn project_candles(
    points: &[DataPoint],
    visible: usize,
    mapper: &ScaleMapper,
    style: &ChartStyle,
) -> Vec<CandleGeometry> {
    let visible = visible.min(points.len());
    points[..visible]
        .iter()
        .enumerate()
        .map(|(i, p)| project_single_candle(i, p, i + 1 == visible, mapper, style))
        .collect()
}

fn project_single_candle(
    index: usize,
    p: &DataPoint,
    labelled: bool,
    mapper: &ScaleMapper,
    style: &ChartStyle,
) -> CandleGeometry {
    let x = mapper.x_scale(index);
    let body_top = mapper.y_scale(p.open.max(p.close));
    let raw_bottom = mapper.y_scale(p.open.min(p.close));
    let body_bottom = if raw_bottom - body_top >= style.min_body_height {
        raw_bottom
    } else {
        body_top + style.min_body_height
    };

    let price_label = labelled.then(|| PriceLabel {
        x: x + style.price_label_offset,
        y: mapper.y_scale(p.close),
        text: format!("${}", to_fixed_2(p.close)),
    });

    CandleGeometry {
        index,
        x,
        wick_top: mapper.y_scale(p.high),
        wick_bottom: mapper.y_scale(p.low),
        body_top,
        body_bottom,
        body_width: mapper.body_width(),
        is_bullish: p.is_bullish(),
        volume_bar_height: mapper.volume_scale(p.volume),
        price_label,
    }
}

/// Two-decimal text matching the host's `toFixed(2)`: exact ties round away from zero and
/// negative zero prints unsigned.
pub(crate) fn to_fixed_2(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    // A hundredths tie needs an exact odd multiple of 1/8; anything else formats without one.
    let eighths = value.abs() * 8.0;
    let is_tie = eighths.fract() == 0.0 && eighths % 2.0 == 1.0 && eighths < 2f64.powi(50);
    if !is_tie {
        return format!("{value:.2}");
    }
    let cents = (value.abs() * 100.0).ceil() as u64;
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/candles.rs"]
mod tests;
