use std::collections::HashMap;

use rayon::prelude::*;

use crate::{
    compile::draw::{SequenceDrawList, compile_sequence_frame},
    compile::fingerprint::{FrameFingerprint, fingerprint_sequence_frame},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{ReelError, ReelResult},
    scene::sequence::{Sequence, SequenceFrame},
};

/// Evaluate and compile a single sequence frame.
///
/// Pipeline:
/// 1. [`Sequence::eval_frame`](crate::Sequence::eval_frame)
/// 2. [`compile_sequence_frame`](crate::compile_sequence_frame)
pub fn render_frame(seq: &Sequence, frame: FrameIndex) -> ReelResult<SequenceDrawList> {
    let evaluated = seq.eval_frame(frame)?;
    compile_sequence_frame(seq, &evaluated)
}

#[derive(Clone, Debug)]
/// Threading and chunking controls for multi-frame work.
pub struct RenderThreading {
    /// Spread frames over a rayon pool when `true`.
    pub parallel: bool,
    /// Frames per scheduling batch.
    pub chunk_size: usize,
    /// Explicit worker count; rayon picks one when `None`.
    pub threads: Option<usize>,
    /// Compile each distinct evaluated frame once and clone it for repeats.
    pub static_frame_elision: bool,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
            static_frame_elision: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Counters from a multi-frame run.
pub struct RenderStats {
    pub frames_total: u64,
    pub frames_compiled: u64,
    pub frames_elided: u64,
}

/// Evaluate `[range.start, range.end)` in frame order.
///
/// Evaluation is stateless, so parallel and sequential runs return identical frames.
#[tracing::instrument(skip(seq, threading), fields(start = range.start.0, end = range.end.0))]
pub fn evaluate_frames(
    seq: &Sequence,
    range: FrameRange,
    threading: &RenderThreading,
) -> ReelResult<Vec<SequenceFrame>> {
    if range.is_empty() {
        return Err(ReelError::validation("frame range must be non-empty"));
    }
    if !threading.parallel {
        return (range.start.0..range.end.0)
            .map(|f| seq.eval_frame(FrameIndex(f)))
            .collect();
    }

    let pool = build_thread_pool(threading.threads)?;
    let mut out = Vec::with_capacity(range.len_frames().min(4096) as usize);
    for chunk in chunks(range, threading.chunk_size)? {
        let frames = pool.install(|| {
            (chunk.start.0..chunk.end.0)
                .into_par_iter()
                .map(|f| seq.eval_frame(FrameIndex(f)))
                .collect::<ReelResult<Vec<_>>>()
        })?;
        out.extend(frames);
    }
    Ok(out)
}

/// Evaluate and compile a frame range, in frame order.
pub fn render_frames(
    seq: &Sequence,
    range: FrameRange,
    threading: &RenderThreading,
) -> ReelResult<Vec<SequenceDrawList>> {
    render_frames_with_stats(seq, range, threading).map(|(frames, _)| frames)
}

/// Evaluate and compile a frame range and report how much compilation was elided.
#[tracing::instrument(skip(seq, threading), fields(start = range.start.0, end = range.end.0))]
pub fn render_frames_with_stats(
    seq: &Sequence,
    range: FrameRange,
    threading: &RenderThreading,
) -> ReelResult<(Vec<SequenceDrawList>, RenderStats)> {
    if range.is_empty() {
        return Err(ReelError::validation("frame range must be non-empty"));
    }

    let pool = if threading.parallel {
        Some(build_thread_pool(threading.threads)?)
    } else {
        None
    };

    let mut out = Vec::with_capacity(range.len_frames().min(4096) as usize);
    let mut stats = RenderStats::default();
    for chunk in chunks(range, threading.chunk_size)? {
        let (mut lists, chunk_stats) = render_chunk(seq, chunk, threading, pool.as_ref())?;
        out.append(&mut lists);
        stats.frames_total += chunk_stats.frames_total;
        stats.frames_compiled += chunk_stats.frames_compiled;
        stats.frames_elided += chunk_stats.frames_elided;
    }

    tracing::debug!(
        frames_total = stats.frames_total,
        frames_compiled = stats.frames_compiled,
        frames_elided = stats.frames_elided,
        "rendered frame range"
    );
    Ok((out, stats))
}

fn render_chunk(
    seq: &Sequence,
    range: FrameRange,
    threading: &RenderThreading,
    pool: Option<&rayon::ThreadPool>,
) -> ReelResult<(Vec<SequenceDrawList>, RenderStats)> {
    let evaluated = match pool {
        Some(pool) => pool.install(|| {
            (range.start.0..range.end.0)
                .into_par_iter()
                .map(|f| seq.eval_frame(FrameIndex(f)))
                .collect::<ReelResult<Vec<_>>>()
        })?,
        None => (range.start.0..range.end.0)
            .map(|f| seq.eval_frame(FrameIndex(f)))
            .collect::<ReelResult<Vec<_>>>()?,
    };

    let mut unique_indices = Vec::<usize>::with_capacity(evaluated.len());
    let mut frame_to_unique = Vec::<usize>::with_capacity(evaluated.len());
    if threading.static_frame_elision {
        let mut first = HashMap::<FrameFingerprint, usize>::new();
        for (idx, frame) in evaluated.iter().enumerate() {
            let fingerprint = fingerprint_sequence_frame(frame);
            if let Some(existing) = first.get(&fingerprint).copied() {
                frame_to_unique.push(existing);
            } else {
                let slot = unique_indices.len();
                unique_indices.push(idx);
                first.insert(fingerprint, slot);
                frame_to_unique.push(slot);
            }
        }
    } else {
        unique_indices.extend(0..evaluated.len());
        frame_to_unique.extend(0..evaluated.len());
    }

    let compile_one = |idx: &usize| compile_sequence_frame(seq, &evaluated[*idx]);
    let unique = match pool {
        Some(pool) => pool.install(|| {
            unique_indices
                .par_iter()
                .map(compile_one)
                .collect::<ReelResult<Vec<_>>>()
        })?,
        None => unique_indices
            .iter()
            .map(compile_one)
            .collect::<ReelResult<Vec<_>>>()?,
    };

    let mut out = Vec::with_capacity(frame_to_unique.len());
    for (frame, &u) in evaluated.iter().zip(&frame_to_unique) {
        let mut list = unique
            .get(u)
            .ok_or_else(|| ReelError::evaluation("internal error: unique frame index out of range"))?
            .clone();
        list.frame = frame.frame;
        out.push(list);
    }

    let total = evaluated.len() as u64;
    let compiled = unique.len() as u64;
    Ok((
        out,
        RenderStats {
            frames_total: total,
            frames_compiled: compiled,
            frames_elided: total.saturating_sub(compiled),
        },
    ))
}

fn chunks(range: FrameRange, chunk_size: usize) -> ReelResult<Vec<FrameRange>> {
    let size = normalized_chunk_size(chunk_size);
    let mut out = Vec::new();
    let mut start = range.start.0;
    while start < range.end.0 {
        let end = (start + size).min(range.end.0);
        out.push(
            FrameRange::new(FrameIndex(start), FrameIndex(end))
                .map_err(|e| ReelError::evaluation(format!("invalid chunk range: {e}")))?,
        );
        start = end;
    }
    Ok(out)
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ReelError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
