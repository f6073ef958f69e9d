use crate::foundation::error::{ReelError, ReelResult};

/// Columnar OHLCV input, one entry per bar in each column.
///
/// Deserializes directly from the `{"t": [...], "o": [...], ...}` dataset shape.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawSeries {
    pub t: Vec<i64>,
    pub o: Vec<f64>,
    pub h: Vec<f64>,
    pub l: Vec<f64>,
    pub c: Vec<f64>,
    pub v: Vec<f64>,
}

impl RawSeries {
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}

/// One OHLCV bar in row form.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DataPoint {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl DataPoint {
    /// Equal open and close counts as bullish.
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }

    /// Midpoint of the candle body.
    pub fn body_mid(&self) -> f64 {
        (self.open + self.close) / 2.0
    }
}

/// Whole-series statistics used for scaling.
///
/// Always computed over every bar, never over the revealed prefix, so the coordinate mapping stays
/// fixed while candles appear.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SeriesStats {
    pub min_price: f64,
    pub max_price: f64,
    pub price_range: f64,
    pub max_volume: f64,
}

/// Convert columnar input into row-form points plus whole-series statistics.
///
/// Price bounds come from highs and lows only; opens and closes are assumed to sit inside them.
pub fn normalize(raw: &RawSeries) -> ReelResult<(Vec<DataPoint>, SeriesStats)> {
    let n = raw.t.len();
    let columns = [
        ("o", raw.o.len()),
        ("h", raw.h.len()),
        ("l", raw.l.len()),
        ("c", raw.c.len()),
        ("v", raw.v.len()),
    ];
    if let Some((name, len)) = columns.iter().find(|(_, len)| *len != n) {
        return Err(ReelError::validation(format!(
            "series column '{name}' has {len} entries, expected {n}"
        )));
    }
    if n == 0 {
        return Err(ReelError::EmptySeries);
    }

    let mut points = Vec::with_capacity(n);
    let mut min_price = f64::INFINITY;
    let mut max_price = f64::NEG_INFINITY;
    let mut max_volume = f64::NEG_INFINITY;

    for i in 0..n {
        let p = DataPoint {
            timestamp: raw.t[i],
            open: raw.o[i],
            high: raw.h[i],
            low: raw.l[i],
            close: raw.c[i],
            volume: raw.v[i],
        };
        if ![p.open, p.high, p.low, p.close, p.volume]
            .iter()
            .all(|x| x.is_finite())
        {
            return Err(ReelError::validation(format!(
                "series values at index {i} must be finite"
            )));
        }
        min_price = min_price.min(p.high).min(p.low);
        max_price = max_price.max(p.high).max(p.low);
        max_volume = max_volume.max(p.volume);
        points.push(p);
    }

    let stats = SeriesStats {
        min_price,
        max_price,
        price_range: max_price - min_price,
        max_volume,
    };
    tracing::debug!(
        points = n,
        min_price,
        max_price,
        max_volume,
        "normalized series"
    );
    Ok((points, stats))
}

#[cfg(test)]
#[path = "../../tests/unit/series/normalize.rs"]
mod tests;
