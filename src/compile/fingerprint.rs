use crate::{
    foundation::math::Fnv1a64,
    geometry::candles::CandleGeometry,
    scene::{
        chart::VisualState,
        sequence::{SequenceFrame, SequenceLayer},
    },
};

const LANE_SEED: u64 = 0x8b5a_d4a0_c7d8_e9f1;

/// Stable 128-bit digest of evaluated frame content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct FrameFingerprint {
    pub hi: u64,
    pub lo: u64,
}

/// Fingerprint one chart's visual state.
///
/// The frame index is not hashed, so a chart that has stopped moving produces the same
/// fingerprint on every later frame.
pub fn fingerprint_state(state: &VisualState) -> FrameFingerprint {
    let mut h = StableHasher::new();
    write_state(&mut h, state);
    h.finish()
}

/// Fingerprint every layer of a sequence frame, including which chart sits in which slot.
pub fn fingerprint_sequence_frame(frame: &SequenceFrame) -> FrameFingerprint {
    let mut h = StableHasher::new();
    h.write_u64(frame.layers.len() as u64);
    for layer in &frame.layers {
        write_layer(&mut h, layer);
    }
    h.finish()
}

struct StableHasher {
    hi: Fnv1a64,
    lo: Fnv1a64,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            hi: Fnv1a64::new_default(),
            lo: Fnv1a64::new(LANE_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.hi.write_bytes(b);
        self.lo.write_bytes(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.hi.write_u8(v);
        self.lo.write_u8(v);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u64(&mut self, v: u64) {
        self.hi.write_u64(v);
        self.lo.write_u64(v);
    }

    fn write_f64(&mut self, v: f64) {
        self.hi.write_f64(v);
        self.lo.write_f64(v);
    }

    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> FrameFingerprint {
        FrameFingerprint {
            hi: self.hi.finish(),
            lo: self.lo.finish(),
        }
    }
}

fn write_layer(h: &mut StableHasher, layer: &SequenceLayer) {
    h.write_str(&layer.chart_id);
    h.write_u64(layer.entry_index as u64);
    h.write_u64(layer.z_order as i64 as u64);
    write_state(h, &layer.state);
}

fn write_state(h: &mut StableHasher, s: &VisualState) {
    h.write_u64(s.reveal_count as u64);
    h.write_u64(s.visible_candles.len() as u64);
    for c in &s.visible_candles {
        write_candle(h, c);
    }

    h.write_f64(s.camera.pan.x);
    h.write_f64(s.camera.pan.y);
    h.write_f64(s.camera.zoom);
    h.write_f64(s.camera.rotation_y_deg);

    h.write_f64(s.title.opacity);
    h.write_f64(s.title.scale);
    h.write_f64(s.title.anchor_top);

    h.write_f64(s.transition.offset_x);
    h.write_f64(s.transition.opacity);
}

fn write_candle(h: &mut StableHasher, c: &CandleGeometry) {
    h.write_u64(c.index as u64);
    for v in [
        c.x,
        c.wick_top,
        c.wick_bottom,
        c.body_top,
        c.body_bottom,
        c.body_width,
        c.volume_bar_height,
    ] {
        h.write_f64(v);
    }
    h.write_bool(c.is_bullish);
    match &c.price_label {
        Some(label) => {
            h.write_u8(1);
            h.write_f64(label.x);
            h.write_f64(label.y);
            h.write_str(&label.text);
        }
        None => h.write_u8(0),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/fingerprint.rs"]
mod tests;
