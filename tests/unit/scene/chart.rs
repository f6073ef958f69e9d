use super::*;
use crate::foundation::error::ReelError;

fn four_bars() -> RawSeries {
    RawSeries {
        t: vec![1, 2, 3, 4],
        o: vec![10.0, 12.0, 9.0, 11.0],
        h: vec![13.0, 14.0, 10.0, 12.0],
        l: vec![9.0, 11.0, 8.0, 10.0],
        c: vec![12.0, 9.0, 11.0, 10.0],
        v: vec![100.0, 200.0, 50.0, 25.0],
    }
}

fn video() -> VideoConfig {
    VideoConfig::new(30, 1920, 1080, 210).unwrap()
}

fn chart() -> ChartInstance {
    ChartInstance::new("AAPL", "Apple Inc.", &four_bars(), video()).unwrap()
}

#[test]
fn two_revealed_candles_bullish_then_bearish() {
    // Reveal runs over 150 frames; the eased midpoint reveals exactly half of four bars.
    let state = chart().eval_frame(FrameIndex(75)).unwrap();
    assert_eq!(state.reveal_count, 2);
    assert_eq!(state.visible_candles.len(), 2);
    assert!(state.visible_candles[0].is_bullish);
    assert!(!state.visible_candles[1].is_bullish);
    assert!(state.visible_candles[1].price_label.is_some());
}

#[test]
fn evaluation_is_deterministic_in_any_order() {
    let c = chart();
    let forward: Vec<_> = (0..210).map(|f| c.eval_frame(FrameIndex(f)).unwrap()).collect();
    for f in (0..210).rev() {
        assert_eq!(c.eval_frame(FrameIndex(f)).unwrap(), forward[f as usize]);
    }
}

#[test]
fn full_reveal_by_scene_end() {
    let state = chart().eval_frame(FrameIndex(209)).unwrap();
    assert_eq!(state.reveal_count, 4);
    assert_eq!(state.camera.zoom, 1.0);
}

#[test]
fn candle_positions_do_not_move_as_bars_appear() {
    let c = chart();
    let early = c.eval_frame(FrameIndex(75)).unwrap();
    let late = c.eval_frame(FrameIndex(200)).unwrap();
    for (a, b) in early.visible_candles.iter().zip(&late.visible_candles) {
        assert_eq!(a.x, b.x);
        assert_eq!(a.wick_top, b.wick_top);
        assert_eq!(a.wick_bottom, b.wick_bottom);
        assert_eq!(a.body_top, b.body_top);
    }
}

#[test]
fn single_point_series_is_total() {
    let raw = RawSeries {
        t: vec![1],
        o: vec![5.0],
        h: vec![5.0],
        l: vec![5.0],
        c: vec![5.0],
        v: vec![0.0],
    };
    let c = ChartInstance::new("ONE", "Flat", &raw, video()).unwrap();
    for f in [0, 1, 100, 209] {
        let state = c.eval_frame(FrameIndex(f)).unwrap();
        assert_eq!(state.visible_candles.len(), 1);
        let candle = &state.visible_candles[0];
        assert_eq!(candle.x, 0.0);
        assert_eq!(candle.body_width, 1760.0 * 0.6);
        assert_eq!(candle.wick_top, 390.0);
        assert_eq!(candle.volume_bar_height, 0.0);
        assert!(candle.body_height() >= 1.0 - 1e-9);
    }
}

#[test]
fn empty_series_fails_construction() {
    let err = ChartInstance::new("NONE", "", &RawSeries::default(), video()).unwrap_err();
    assert!(matches!(err, ReelError::EmptySeries));
}

#[test]
fn transition_is_carried_through() {
    let state = chart()
        .eval_frame_with_transition(
            FrameIndex(10),
            TransitionState {
                offset_x: -320.0,
                opacity: 0.5,
            },
        )
        .unwrap();
    assert_eq!(state.transition.offset_x, -320.0);
    assert_eq!(state.transition.opacity, 0.5);
    assert_eq!(chart().eval_frame(FrameIndex(10)).unwrap().transition, TransitionState::default());
}

#[test]
fn frames_past_the_end_hold_final_pose() {
    let c = chart();
    let last = c.eval_frame(FrameIndex(210)).unwrap();
    let beyond = c.eval_frame(FrameIndex(5000)).unwrap();
    assert_eq!(last.camera, beyond.camera);
    assert_eq!(last.visible_candles, beyond.visible_candles);
}

#[test]
fn shorter_scene_retimes_camera_only() {
    let c = chart();
    let short = c.with_duration(100).unwrap();
    assert_eq!(short.eval_frame(FrameIndex(50)).unwrap().camera.zoom, 1.0);
    assert!(c.eval_frame(FrameIndex(50)).unwrap().camera.zoom > 1.0);
    assert_eq!(
        short.eval_frame(FrameIndex(75)).unwrap().reveal_count,
        c.eval_frame(FrameIndex(75)).unwrap().reveal_count
    );
}

#[test]
fn options_override_motion() {
    let options = ChartOptions {
        motion: MotionConfig {
            reveal_secs: 1.0,
            ..MotionConfig::default()
        },
        ..ChartOptions::default()
    };
    let c = ChartInstance::with_options("AAPL", "", &four_bars(), video(), options).unwrap();
    assert_eq!(c.eval_frame(FrameIndex(30)).unwrap().reveal_count, 4);
    assert_eq!(c.symbol(), "AAPL");
    assert_eq!(c.points().len(), 4);
}
