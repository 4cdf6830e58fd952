//! Part images at the input boundary.

use crate::foundation::core::Vec2;
use crate::foundation::error::{CutoutError, CutoutResult};
use crate::foundation::math::premultiply_rgba8_in_place;

pub mod decode;

/// An immutable, premultiplied RGBA8 part image.
///
/// Images are owned by the caller; layers and renders only borrow them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartImage {
    id: String,
    width: u32,
    height: u32,
    rgba8_premul: Vec<u8>,
}

impl PartImage {
    /// Build from straight (non-premultiplied) RGBA8 bytes.
    pub fn from_rgba8(
        id: impl Into<String>,
        width: u32,
        height: u32,
        mut rgba8: Vec<u8>,
    ) -> CutoutResult<Self> {
        let id = id.into();
        check_dims(&id, width, height, rgba8.len())?;
        premultiply_rgba8_in_place(&mut rgba8);
        Ok(Self {
            id,
            width,
            height,
            rgba8_premul: rgba8,
        })
    }

    /// Build from bytes that are already premultiplied.
    pub fn from_premul_rgba8(
        id: impl Into<String>,
        width: u32,
        height: u32,
        rgba8_premul: Vec<u8>,
    ) -> CutoutResult<Self> {
        let id = id.into();
        check_dims(&id, width, height, rgba8_premul.len())?;
        Ok(Self {
            id,
            width,
            height,
            rgba8_premul,
        })
    }

    /// A `width x height` image filled with one straight RGBA8 color.
    pub fn solid(
        id: impl Into<String>,
        width: u32,
        height: u32,
        rgba: [u8; 4],
    ) -> CutoutResult<Self> {
        let n = (width as usize).saturating_mul(height as usize);
        Self::from_rgba8(id, width, height, rgba.repeat(n))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(f64::from(self.width), f64::from(self.height))
    }

    /// Premultiplied RGBA8 bytes, row-major, tightly packed.
    pub fn data(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// Premultiplied pixel at `(x, y)`; transparent outside the image.
    pub fn pixel(&self, x: i64, y: i64) -> [u8; 4] {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return [0, 0, 0, 0];
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let p = &self.rgba8_premul[idx..idx + 4];
        [p[0], p[1], p[2], p[3]]
    }
}

fn check_dims(id: &str, width: u32, height: u32, len: usize) -> CutoutResult<()> {
    if width == 0 || height == 0 {
        return Err(CutoutError::invalid_image(
            id,
            format!("zero-area image ({width}x{height})"),
        ));
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| CutoutError::invalid_image(id, "image size overflows"))?;
    if len != expected {
        return Err(CutoutError::invalid_image(
            id,
            format!("expected {expected} rgba8 bytes for {width}x{height}, got {len}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/image.rs"]
mod tests;
