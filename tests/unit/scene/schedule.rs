use super::*;

const SCENE: u64 = 210;
const STEP: u64 = 150;
const SLIDE: f64 = 60.0;

fn edge(start_frame: f64, offscreen_x: f64) -> SlideEdge {
    SlideEdge {
        start_frame,
        offscreen_x,
    }
}

fn combined() -> SceneSchedule {
    let s = STEP as f64;
    let slides = [
        slide_transition(None, Some(edge(s, -1920.0)), SLIDE),
        slide_transition(
            Some(edge(s, 1776.0)),
            Some(edge(s * 2.0, -1920.0)),
            SLIDE,
        ),
        slide_transition(
            Some(edge(s * 2.0, 1776.0)),
            Some(edge(s * 3.0, -1920.0)),
            SLIDE,
        ),
        slide_transition(Some(edge(s * 3.0, 1557.496)), None, SLIDE),
    ];
    let entries = ["AAPL", "AMZN", "MSFT", "NVDA"]
        .into_iter()
        .zip(slides)
        .enumerate()
        .map(|(i, (id, slide))| {
            ScheduleEntry::new(id, STEP * i as u64, SCENE)
                .z_order(i as i32 + 1)
                .offset_x(slide.unwrap())
        })
        .collect();
    SceneSchedule::new(entries).unwrap()
}

#[test]
fn at_most_two_entries_overlap_during_transitions() {
    let schedule = combined();
    assert_eq!(schedule.end_frame(), FrameIndex(660));
    for g in 0..700u64 {
        let active = schedule.active_at(FrameIndex(g)).unwrap();
        let in_transition = (1..4).any(|k| (STEP * k..STEP * (k - 1) + SCENE).contains(&g));
        let expected = if g >= 660 {
            0
        } else if in_transition {
            2
        } else {
            1
        };
        assert_eq!(active.len(), expected, "global frame {g}");
    }
}

#[test]
fn local_frames_and_paint_order() {
    let active = combined().active_at(FrameIndex(180)).unwrap();
    assert_eq!(active.len(), 2);
    assert_eq!(active[0].chart_id, "AAPL");
    assert_eq!(active[0].local_frame, FrameIndex(180));
    assert_eq!(active[1].chart_id, "AMZN");
    assert_eq!(active[1].local_frame, FrameIndex(30));
    assert!(active[0].z_order < active[1].z_order);
}

#[test]
fn z_order_ties_resolve_by_declared_order() {
    let schedule = SceneSchedule::new(vec![
        ScheduleEntry::new("b", 0, 10).z_order(5),
        ScheduleEntry::new("a", 0, 10).z_order(5),
        ScheduleEntry::new("c", 0, 10).z_order(1),
    ])
    .unwrap();
    let ids: Vec<_> = schedule
        .active_at(FrameIndex(3))
        .unwrap()
        .into_iter()
        .map(|a| a.chart_id)
        .collect();
    assert_eq!(ids, ["c", "b", "a"]);
}

#[test]
fn slide_offsets_follow_global_frames() {
    let schedule = combined();
    let offset = |g: u64, id: &str| {
        schedule
            .active_at(FrameIndex(g))
            .unwrap()
            .into_iter()
            .find(|a| a.chart_id == id)
            .map(|a| a.transition.offset_x)
    };
    assert_eq!(offset(0, "AAPL"), Some(0.0));
    assert_eq!(offset(150, "AAPL"), Some(0.0));
    assert!(offset(180, "AAPL").unwrap() < 0.0);
    assert_eq!(offset(150, "AMZN"), Some(1776.0));
    assert_eq!(offset(250, "AMZN"), Some(0.0));
    assert_eq!(offset(450, "NVDA"), Some(1557.496));
    assert_eq!(offset(600, "NVDA"), Some(0.0));
}

#[test]
fn each_slide_is_independent() {
    let schedule = combined();
    let tl = schedule.entries[1].offset_x.as_ref().unwrap();
    assert_eq!(tl.breakpoints, vec![150.0, 210.0, 300.0, 360.0]);
    assert_eq!(tl.values, vec![1776.0, 0.0, 0.0, -1920.0]);
    let other = schedule.entries[2].offset_x.as_ref().unwrap();
    assert_eq!(other.sample(180.0).unwrap(), 1776.0);
}

#[test]
fn opacity_defaults_to_one_and_clamps() {
    let fade = Timeline::ramp(0.0, 10.0, 2.0, -1.0, Ease::Linear).unwrap();
    let schedule =
        SceneSchedule::new(vec![ScheduleEntry::new("a", 0, 20).opacity(Some(fade))]).unwrap();
    assert_eq!(schedule.active_at(FrameIndex(0)).unwrap()[0].transition.opacity, 1.0);
    assert_eq!(schedule.active_at(FrameIndex(10)).unwrap()[0].transition.opacity, 0.0);

    let plain = SceneSchedule::new(vec![ScheduleEntry::new("a", 0, 20)]).unwrap();
    assert_eq!(
        plain.active_at(FrameIndex(5)).unwrap()[0].transition,
        TransitionState::default()
    );
}

#[test]
fn invalid_entries_are_rejected() {
    assert!(SceneSchedule::new(vec![]).is_err());
    assert!(SceneSchedule::new(vec![ScheduleEntry::new("", 0, 10)]).is_err());
    assert!(SceneSchedule::new(vec![ScheduleEntry::new("a", 0, 0)]).is_err());
}

#[test]
fn overlapping_slides_are_invalid_timelines() {
    let err = slide_transition(Some(edge(100.0, 1.0)), Some(edge(120.0, -1.0)), 60.0).unwrap_err();
    assert!(matches!(err, ReelError::InvalidTimeline(_)));
    assert!(slide_transition(None, None, 60.0).unwrap().is_none());
}

#[test]
fn schedule_decodes_from_json() {
    let schedule: SceneSchedule = serde_json::from_value(serde_json::json!({
        "entries": [
            {"chart_id": "AAPL", "start_frame": 0, "duration_frames": 210},
            {
                "chart_id": "AMZN",
                "start_frame": 150,
                "duration_frames": 210,
                "z_order": 2,
                "offset_x": {"breakpoints": [150.0, 210.0], "values": [1776.0, 0.0], "ease": "InOutEase"}
            }
        ]
    }))
    .unwrap();
    assert!(schedule.validate().is_ok());
    assert_eq!(schedule.entries[0].z_order, 0);
    assert!(schedule.entries[1].offset_x.is_some());
}
