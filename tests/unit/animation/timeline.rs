use super::*;

fn clamp(frame: f64, bps: &[f64], vals: &[f64], ease: Ease) -> f64 {
    interpolate(
        frame,
        bps,
        vals,
        ease,
        Extrapolate::Clamp,
        Extrapolate::Clamp,
    )
    .unwrap()
}

#[test]
fn linear_midpoint() {
    assert_eq!(clamp(5.0, &[0.0, 10.0], &[0.0, 100.0], Ease::Linear), 50.0);
}

#[test]
fn clamps_before_and_after() {
    let bps = [0.0, 150.0];
    let vals = [880.0, -460.0];
    assert_eq!(clamp(-100.0, &bps, &vals, Ease::InOutCubic), 880.0);
    assert_eq!(clamp(150.0, &bps, &vals, Ease::InOutCubic), -460.0);
    assert_eq!(clamp(1e9, &bps, &vals, Ease::InOutCubic), -460.0);
    assert_eq!(clamp(f64::INFINITY, &bps, &vals, Ease::InOutCubic), -460.0);
    assert_eq!(clamp(f64::NEG_INFINITY, &bps, &vals, Ease::InOutCubic), 880.0);
}

#[test]
fn easing_is_applied_per_segment() {
    let bps = [0.0, 15.0, 45.0, 60.0];
    let vals = [0.0, 1.0, 1.0, 0.0];
    let ease = Ease::InOutCubic;
    assert_eq!(clamp(0.0, &bps, &vals, ease), 0.0);
    assert_eq!(clamp(15.0, &bps, &vals, ease), 1.0);
    assert_eq!(clamp(30.0, &bps, &vals, ease), 1.0);
    assert_eq!(clamp(45.0, &bps, &vals, ease), 1.0);
    assert_eq!(clamp(60.0, &bps, &vals, ease), 0.0);

    let quarter_in = clamp(3.75, &bps, &vals, ease);
    assert!((quarter_in - ease.apply(0.25)).abs() < 1e-12);
    let quarter_out = clamp(48.75, &bps, &vals, ease);
    assert!((quarter_out - (1.0 - ease.apply(0.25))).abs() < 1e-12);
}

#[test]
fn rejects_mismatched_or_short_curves() {
    let err = interpolate(
        0.0,
        &[0.0, 1.0, 2.0],
        &[0.0, 1.0],
        Ease::Linear,
        Extrapolate::Clamp,
        Extrapolate::Clamp,
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::InvalidTimeline(_)));

    assert!(matches!(
        Timeline::new(vec![0.0], vec![1.0], Ease::Linear),
        Err(ReelError::InvalidTimeline(_))
    ));
}

#[test]
fn rejects_decreasing_breakpoints_without_reordering() {
    let err = Timeline::new(vec![0.0, 10.0, 5.0], vec![0.0, 1.0, 2.0], Ease::Linear).unwrap_err();
    assert!(matches!(err, ReelError::InvalidTimeline(_)));
}

#[test]
fn accepts_repeated_breakpoints() {
    let tl = Timeline::new(vec![0.0, 10.0, 10.0, 20.0], vec![0.0, 1.0, 5.0, 6.0], Ease::Linear)
        .unwrap();
    assert_eq!(tl.sample(10.0).unwrap(), 1.0);
    assert_eq!(tl.sample(15.0).unwrap(), 5.5);

    let instant = Timeline::ramp(0.0, 0.0, 3.0, 7.0, Ease::Linear).unwrap();
    assert_eq!(instant.sample(-1.0).unwrap(), 3.0);
    assert_eq!(instant.sample(0.0).unwrap(), 7.0);
}

#[test]
fn nan_frame_is_an_error() {
    let tl = Timeline::ramp(0.0, 1.0, 0.0, 1.0, Ease::Linear).unwrap();
    assert!(matches!(tl.sample(f64::NAN), Err(ReelError::Evaluation(_))));
}

#[test]
fn extend_and_identity_extrapolation() {
    let tl = Timeline::ramp(0.0, 10.0, 0.0, 20.0, Ease::InOutCubic)
        .unwrap()
        .with_extrapolation(Extrapolate::Identity, Extrapolate::Extend);
    assert_eq!(tl.sample(-4.0).unwrap(), -4.0);
    assert_eq!(tl.sample(15.0).unwrap(), 30.0);
}

#[test]
fn extend_keeps_easing_past_the_edges() {
    let tl = Timeline::ramp(0.0, 10.0, 0.0, 1.0, Ease::OutCubic)
        .unwrap()
        .with_extrapolation(Extrapolate::Extend, Extrapolate::Extend);
    assert!((tl.sample(15.0).unwrap() - 1.125).abs() < 1e-12);
    assert!((tl.sample(-5.0).unwrap() + 2.375).abs() < 1e-12);
    // Inside the segment extension changes nothing.
    assert_eq!(tl.sample(5.0).unwrap(), Ease::OutCubic.apply(0.5));
}

#[test]
fn timeline_roundtrips_through_json_with_default_clamp() {
    let tl: Timeline = serde_json::from_value(serde_json::json!({
        "breakpoints": [150.0, 210.0],
        "values": [0.0, -1920.0],
        "ease": "InOutEase"
    }))
    .unwrap();
    assert_eq!(tl.extrapolate_left, Extrapolate::Clamp);
    assert_eq!(tl.span(), (150.0, 210.0));
    assert_eq!(tl.sample(0.0).unwrap(), 0.0);
    assert_eq!(tl.sample(500.0).unwrap(), -1920.0);
}
