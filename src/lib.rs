//! Cutout is a layered cutout-animation compositor.
//!
//! A character is a stack of independently drawn body-part images. Each part sits at a
//! canvas-relative anchor and may carry periodic motion (sinusoidal offsets or swings about a
//! pivot). The crate composites the stack per frame and streams the frames to a sink:
//!
//! - Describe the parts with a [`PartCatalog`] and load their [`PartImage`]s
//! - Bind images and a [`RigConfig`] into a validated [`AnimationSpec`]
//! - Render single frames, iterate [`frames`], or stream into a [`FrameSink`] with
//!   [`render_to_sink`]
#![forbid(unsafe_code)]

mod foundation;

/// Part images and their decoding.
pub mod assets;
/// Body-part catalog: identifiers, z-order, required parts.
pub mod catalog;
/// Frame sinks: in-memory, PNG sequence, ffmpeg MP4.
pub mod encode;
pub mod layer;
/// Periodic motion functions and presets.
pub mod motion;
/// Per-frame compositing.
pub mod render;
/// Render requests and rig configuration.
pub mod scene;
/// Frame scheduling and delivery.
pub mod timeline;
pub mod transform;

pub use crate::foundation::core::{Affine, Canvas, Fps, FrameIndex, Point, Rect, RelPoint, Vec2};
pub use crate::foundation::error::{CutoutError, CutoutResult};

pub use crate::assets::PartImage;
pub use crate::assets::decode::{AlphaPolicy, decode_part_image, load_part_dir, load_part_image};
pub use crate::catalog::{CatalogEntry, PartCatalog};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::png::{PngSequenceSink, write_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::layer::{Layer, resolve_anchor};
pub use crate::motion::{MotionChannel, MotionProfile, Sinusoid, evaluate, evaluate_channel};
pub use crate::render::compositor::render_frame;
pub use crate::render::frame::FrameRGBA;
pub use crate::scene::animation::{AnimationSpec, InvalidImagePolicy, admit_part_images};
pub use crate::scene::rig::{PartRig, RigConfig};
pub use crate::timeline::{
    CancelToken, Frames, RenderOpts, RenderStats, frame_count, frames, render_all,
    render_frame_at, render_to_sink, render_to_sink_cancellable, sample_time,
};
pub use crate::transform::{LayerTransform, compute_transform};
