use candlereel::{
    ChartInstance, FrameIndex, RawSeries, ScheduleEntry, SequenceBuilder, VideoConfig,
    compile_chart_frame, render_frame,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let frame = match std::env::args().nth(1) {
        Some(arg) => FrameIndex(arg.parse()?),
        None => FrameIndex(90),
    };

    let raw = RawSeries::from_json_str(include_str!("data/sample_series.json"))?;
    let video = VideoConfig::new(30, 1920, 1080, 210)?;
    let chart = ChartInstance::new("AAPL", "Apple Inc.", &raw, video)?;

    let state = chart.eval_frame(frame)?;
    eprintln!(
        "frame {}: {} of {} candles, zoom {:.3}, title opacity {:.3}",
        frame.0,
        state.reveal_count,
        chart.points().len(),
        state.camera.zoom,
        state.title.opacity
    );
    let list = compile_chart_frame(&chart, &state)?;
    println!("{}", serde_json::to_string_pretty(&list)?);

    // The same chart as a one-entry sequence yields the same layer.
    let seq = SequenceBuilder::new(video)
        .chart("AAPL", chart)?
        .entry(ScheduleEntry::new("AAPL", 0, 210))
        .build()?;
    let layered = render_frame(&seq, frame)?;
    eprintln!("sequence layers at frame {}: {}", frame.0, layered.layers.len());

    Ok(())
}
