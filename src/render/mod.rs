//! CPU rasterization of layers into frames.

pub mod compositor;
pub mod frame;
pub(crate) mod sample;
