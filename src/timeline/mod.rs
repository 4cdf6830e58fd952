//! Frame sampling across the clip and ordered delivery to an encoder.

pub mod assembler;
pub mod cancel;

pub use assembler::{
    Frames, RenderOpts, RenderStats, frame_count, frames, render_all, render_frame_at,
    render_to_sink, render_to_sink_cancellable, sample_time,
};
pub use cancel::CancelToken;
