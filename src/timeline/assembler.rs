use std::collections::HashMap;
use std::iter::FusedIterator;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;

use rayon::prelude::*;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{CutoutError, CutoutResult};
use crate::render::compositor::render_frame;
use crate::render::frame::FrameRGBA;
use crate::scene::animation::AnimationSpec;
use crate::timeline::cancel::CancelToken;

const MAX_REORDER_BUFFER_BYTES: u64 = 128 * 1024 * 1024;

/// Number of frames in a clip: `round(duration * fps)`.
pub fn frame_count(duration_secs: f64, fps: Fps) -> u64 {
    fps.secs_to_frames_round(duration_secs)
}

/// Sample time of frame `i`: `i / fps`.
pub fn sample_time(i: FrameIndex, fps: Fps) -> f64 {
    fps.frame_time_secs(i)
}

/// Composite every layer of `spec` at time `t` seconds.
pub fn render_frame_at(spec: &AnimationSpec<'_>, t: f64) -> FrameRGBA {
    render_frame(spec.layers(), t, spec.canvas())
}

/// Lazy, single-pass sequence of the clip's frames in presentation order.
pub struct Frames<'s, 'a> {
    spec: &'s AnimationSpec<'a>,
    next: u64,
    end: u64,
}

impl Iterator for Frames<'_, '_> {
    type Item = FrameRGBA;

    fn next(&mut self) -> Option<FrameRGBA> {
        if self.next >= self.end {
            return None;
        }
        let t = self.spec.sample_time(FrameIndex(self.next));
        self.next += 1;
        Some(render_frame_at(self.spec, t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.end - self.next) as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Frames<'_, '_> {}
impl FusedIterator for Frames<'_, '_> {}

pub fn frames<'s, 'a>(spec: &'s AnimationSpec<'a>) -> Frames<'s, 'a> {
    Frames {
        spec,
        next: 0,
        end: spec.frame_count(),
    }
}

/// Render the whole clip into memory.
pub fn render_all(spec: &AnimationSpec<'_>) -> Vec<FrameRGBA> {
    frames(spec).collect()
}

/// Options controlling [`render_to_sink`].
#[derive(Clone, Debug)]
pub struct RenderOpts {
    /// Render frames on a dedicated rayon pool.
    pub parallel: bool,
    /// Frames dispatched to the pool per batch.
    pub chunk_size: usize,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Bounded channel capacity between render workers and the encoder thread.
    pub channel_capacity: usize,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
            channel_capacity: 4,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// `round(duration * fps)`.
    pub frames_total: u64,
    /// Frames composited (may exceed `frames_pushed` after a cancel).
    pub frames_rendered: u64,
    /// Frames handed to the sink.
    pub frames_pushed: u64,
    pub cancelled: bool,
}

/// Render the clip and stream it into `sink`.
pub fn render_to_sink(
    spec: &AnimationSpec<'_>,
    opts: &RenderOpts,
    sink: &mut dyn FrameSink,
) -> CutoutResult<RenderStats> {
    render_to_sink_cancellable(spec, opts, sink, &CancelToken::new())
}

/// Render the clip and stream it into `sink`, stopping between frames once `cancel` fires.
///
/// The sink receives frames in strictly increasing index order. With `parallel` enabled,
/// out-of-order worker completions are reordered at the sink boundary through an index-keyed
/// buffer (bounded channel backpressure). After a cancel the sink's `end` is still called and
/// the returned stats have `cancelled` set.
#[tracing::instrument(skip_all, fields(frames = spec.frame_count(), parallel = opts.parallel))]
pub fn render_to_sink_cancellable(
    spec: &AnimationSpec<'_>,
    opts: &RenderOpts,
    sink: &mut dyn FrameSink,
    cancel: &CancelToken,
) -> CutoutResult<RenderStats> {
    let total = spec.frame_count();
    let canvas = spec.canvas();
    let cfg = SinkConfig {
        width: canvas.width,
        height: canvas.height,
        fps: spec.fps(),
        frame_count: total,
    };

    let cap = opts.channel_capacity.max(1);
    let bytes_per_frame = (canvas.rgba8_len() as u64).max(1);
    let max_chunk_by_mem = (MAX_REORDER_BUFFER_BYTES / bytes_per_frame).max(1);
    let chunk_size = normalized_chunk_size(opts.chunk_size).min(max_chunk_by_mem);

    let pool = if opts.parallel {
        Some(build_thread_pool(opts.threads)?)
    } else {
        None
    };

    let (frames_rendered, enc_res) = std::thread::scope(|scope| {
        let (tx, rx) = mpsc::sync_channel::<FrameMsg>(cap);
        let sink_ref: &mut dyn FrameSink = sink;

        // Encoder thread: enforce in-order delivery regardless of render completion order.
        let enc = scope.spawn(move || -> CutoutResult<u64> {
            sink_ref.begin(cfg).map_err(encoder_failure)?;

            let mut next = 0u64;
            let mut pending = HashMap::<u64, FrameRGBA>::new();
            while next < total && !cancel.is_cancelled() {
                if let Some(frame) = pending.remove(&next) {
                    sink_ref
                        .push_frame(FrameIndex(next), &frame)
                        .map_err(encoder_failure)?;
                    next += 1;
                    continue;
                }

                match rx.recv() {
                    Ok(msg) => {
                        pending.insert(msg.idx.0, msg.frame);
                    }
                    Err(_) if cancel.is_cancelled() => break,
                    Err(_) => {
                        return Err(CutoutError::Other(anyhow::anyhow!(
                            "render workers stopped before delivering frame {next}"
                        )));
                    }
                }
            }
            drop(rx);

            sink_ref.end().map_err(encoder_failure)?;
            Ok(next)
        });

        let rendered = match pool.as_ref() {
            Some(pool) => produce_parallel(spec, pool, chunk_size, total, &tx, cancel),
            None => produce_sequential(spec, total, &tx, cancel),
        };
        drop(tx);

        let enc_res = enc
            .join()
            .unwrap_or_else(|_| Err(CutoutError::encoder("encoder thread panicked")));
        (rendered, enc_res)
    });

    let frames_pushed = enc_res?;
    let stats = RenderStats {
        frames_total: total,
        frames_rendered,
        frames_pushed,
        cancelled: frames_pushed < total,
    };
    tracing::info!(
        frames_total = stats.frames_total,
        frames_rendered = stats.frames_rendered,
        frames_pushed = stats.frames_pushed,
        cancelled = stats.cancelled,
        "render finished"
    );
    Ok(stats)
}

#[derive(Debug)]
struct FrameMsg {
    idx: FrameIndex,
    frame: FrameRGBA,
}

/// Returns the number of frames rendered. Stops early on cancel or when the encoder thread
/// has gone away (its error is reported by the caller).
fn produce_sequential(
    spec: &AnimationSpec<'_>,
    total: u64,
    tx: &mpsc::SyncSender<FrameMsg>,
    cancel: &CancelToken,
) -> u64 {
    let mut rendered = 0u64;
    for f in 0..total {
        if cancel.is_cancelled() {
            break;
        }
        let idx = FrameIndex(f);
        let frame = render_frame_at(spec, spec.sample_time(idx));
        rendered += 1;
        if tx.send(FrameMsg { idx, frame }).is_err() {
            break;
        }
    }
    rendered
}

fn produce_parallel(
    spec: &AnimationSpec<'_>,
    pool: &rayon::ThreadPool,
    chunk_size: u64,
    total: u64,
    tx: &mpsc::SyncSender<FrameMsg>,
    cancel: &CancelToken,
) -> u64 {
    let rendered = AtomicU64::new(0);
    let mut chunk_start = 0u64;
    while chunk_start < total && !cancel.is_cancelled() {
        let chunk_end = (chunk_start + chunk_size).min(total);
        tracing::debug!(chunk_start, chunk_end, "dispatching chunk");

        let res = pool.install(|| {
            (chunk_start..chunk_end)
                .into_par_iter()
                .try_for_each_with(tx.clone(), |tx, f| -> Result<(), ()> {
                    if cancel.is_cancelled() {
                        return Err(());
                    }
                    let idx = FrameIndex(f);
                    let frame = render_frame_at(spec, spec.sample_time(idx));
                    rendered.fetch_add(1, Ordering::Relaxed);
                    tx.send(FrameMsg { idx, frame }).map_err(|_| ())
                })
        });
        if res.is_err() {
            break;
        }
        chunk_start = chunk_end;
    }
    rendered.load(Ordering::Relaxed)
}

fn encoder_failure(err: CutoutError) -> CutoutError {
    match err {
        err @ CutoutError::EncoderFailure(_) => err,
        other => CutoutError::encoder(other.to_string()),
    }
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

fn build_thread_pool(threads: Option<usize>) -> CutoutResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(CutoutError::invalid_spec(
            "render 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| CutoutError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/assembler.rs"]
mod tests;
