use crate::{
    geometry::layout::{ChartArea, ChartStyle},
    series::normalize::SeriesStats,
};

/// Maps bar indices, prices and volumes into chart-local pixels.
///
/// Built once per chart from whole-series statistics; outputs for a given index or price never
/// depend on how many bars are currently revealed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleMapper {
    area: ChartArea,
    stats: SeriesStats,
    total_points: usize,
    body_width: f64,
}

impl ScaleMapper {
    pub fn new(area: ChartArea, stats: SeriesStats, total_points: usize, style: &ChartStyle) -> Self {
        let slots = total_points.max(1) as f64;
        let body_width = style
            .min_body_width
            .max(area.chart_width() / slots * style.body_width_ratio);

        if stats.price_range == 0.0 {
            tracing::debug!(price = stats.min_price, "flat series, prices map to mid-line");
        }
        if stats.max_volume <= 0.0 {
            tracing::debug!("series has no volume, volume bars collapse to zero height");
        }

        Self {
            area,
            stats,
            total_points,
            body_width,
        }
    }

    pub fn area(&self) -> &ChartArea {
        &self.area
    }

    pub fn stats(&self) -> &SeriesStats {
        &self.stats
    }

    pub fn total_points(&self) -> usize {
        self.total_points
    }

    /// Spreads indices evenly so the last bar lands on the right edge.
    pub fn x_scale(&self, index: usize) -> f64 {
        let denom = self.total_points.saturating_sub(1).max(1) as f64;
        (index as f64 / denom) * self.area.chart_width()
    }

    /// Higher prices map to smaller y. A flat series maps everything to the mid-line.
    pub fn y_scale(&self, price: f64) -> f64 {
        let h = self.area.price_area_height();
        if self.stats.price_range == 0.0 {
            return h / 2.0;
        }
        h - ((price - self.stats.min_price) / self.stats.price_range) * h
    }

    pub fn volume_scale(&self, volume: f64) -> f64 {
        if self.stats.max_volume <= 0.0 {
            return 0.0;
        }
        (volume / self.stats.max_volume) * self.area.volume_band_height
    }

    pub fn body_width(&self) -> f64 {
        self.body_width
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/scale.rs"]
mod tests;
