use super::*;
use crate::{
    scene::schedule::ScheduleEntry,
    series::normalize::RawSeries,
};

fn video(duration: u64) -> VideoConfig {
    VideoConfig::new(30, 1920, 1080, duration).unwrap()
}

fn series(base: f64) -> RawSeries {
    RawSeries {
        t: (0..8).collect(),
        o: (0..8).map(|i| base + f64::from(i)).collect(),
        h: (0..8).map(|i| base + f64::from(i) + 2.0).collect(),
        l: (0..8).map(|i| base + f64::from(i) - 2.0).collect(),
        c: (0..8).map(|i| base + f64::from(i) + 0.5).collect(),
        v: (0..8).map(|i| 100.0 * f64::from(i + 1)).collect(),
    }
}

fn charts() -> BTreeMap<String, ChartInstance> {
    let mut charts = BTreeMap::new();
    for (id, base) in [("A", 10.0), ("B", 50.0)] {
        charts.insert(
            id.to_string(),
            ChartInstance::new(id, "", &series(base), video(360)).unwrap(),
        );
    }
    charts
}

fn two_scene_schedule() -> SceneSchedule {
    SceneSchedule::new(vec![
        ScheduleEntry::new("A", 0, 210).z_order(1),
        ScheduleEntry::new("B", 150, 210).z_order(2),
    ])
    .unwrap()
}

#[test]
fn layers_use_local_frames() {
    let seq = Sequence::new(video(360), two_scene_schedule(), charts()).unwrap();
    let frame = seq.eval_frame(FrameIndex(180)).unwrap();
    assert_eq!(frame.layers.len(), 2);
    assert_eq!(frame.layers[0].chart_id, "A");
    assert_eq!(frame.layers[0].state.frame, FrameIndex(180));
    assert_eq!(frame.layers[1].chart_id, "B");
    assert_eq!(frame.layers[1].state.frame, FrameIndex(30));
}

#[test]
fn entry_charts_are_retimed_to_their_window() {
    let seq = Sequence::new(video(360), two_scene_schedule(), charts()).unwrap();
    assert_eq!(seq.entry_chart(0).unwrap().video().duration_in_frames, 210);
    assert_eq!(seq.chart("A").unwrap().video().duration_in_frames, 360);
    // Zoom settles at the midpoint of the 210-frame slot, not of the 360-frame video.
    let layer = &seq.eval_frame(FrameIndex(105)).unwrap().layers[0];
    assert_eq!(layer.state.camera.zoom, 1.0);
}

#[test]
fn layer_matches_standalone_evaluation() {
    let seq = Sequence::new(video(360), two_scene_schedule(), charts()).unwrap();
    let standalone = seq
        .entry_chart(1)
        .unwrap()
        .eval_frame(FrameIndex(40))
        .unwrap();
    let layered = seq.eval_frame(FrameIndex(190)).unwrap().layers[1].state.clone();
    assert_eq!(layered, standalone);
}

#[test]
fn frames_outside_every_window_are_empty() {
    let seq = Sequence::new(video(360), two_scene_schedule(), charts()).unwrap();
    assert!(seq.eval_frame(FrameIndex(360)).unwrap().layers.is_empty());
    assert_eq!(seq.duration(), FrameIndex(360));
}

#[test]
fn unknown_chart_ids_are_rejected() {
    let schedule = SceneSchedule::new(vec![ScheduleEntry::new("Z", 0, 10)]).unwrap();
    let err = Sequence::new(video(360), schedule, charts()).unwrap_err();
    assert!(err.to_string().contains("unknown chart 'Z'"));
}

#[test]
fn mismatched_canvas_is_rejected() {
    let narrow = VideoConfig::new(30, 1280, 720, 360).unwrap();
    assert!(Sequence::new(narrow, two_scene_schedule(), charts()).is_err());
}

#[test]
fn mismatched_fps_is_rejected() {
    let fast = VideoConfig::new(60, 1920, 1080, 360).unwrap();
    let err = Sequence::new(fast, two_scene_schedule(), charts()).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
    assert!(err.to_string().contains("fps"));
}
