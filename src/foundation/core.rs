use crate::foundation::error::{CutoutError, CutoutResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Absolute 0-based frame index on the clip timeline.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> CutoutResult<Self> {
        let fps = Self { num, den };
        fps.validate()?;
        Ok(fps)
    }

    /// Integer frame rate (`den == 1`).
    pub fn whole(num: u32) -> CutoutResult<Self> {
        Self::new(num, 1)
    }

    pub fn validate(self) -> CutoutResult<()> {
        if self.den == 0 {
            return Err(CutoutError::invalid_spec("fps denominator must be > 0"));
        }
        if self.num == 0 {
            return Err(CutoutError::invalid_spec("fps must be > 0"));
        }
        Ok(())
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Presentation time of frame `i` in seconds (`i / fps`).
    pub fn frame_time_secs(self, i: FrameIndex) -> f64 {
        (i.0 as f64) * f64::from(self.den) / f64::from(self.num)
    }

    /// Frame count covering `secs`, rounded to the nearest whole frame.
    pub fn secs_to_frames_round(self, secs: f64) -> u64 {
        (secs * self.as_f64()).round().max(0.0) as u64
    }
}

impl std::fmt::Display for Fps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    pub fn size_f64(self) -> Vec2 {
        Vec2::new(f64::from(self.width), f64::from(self.height))
    }

    /// Byte length of a tightly packed RGBA8 buffer of this size.
    pub fn rgba8_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

/// A point expressed as fractions of some box, `(0, 0)` top-left and `(1, 1)` bottom-right.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RelPoint {
    pub x: f64,
    pub y: f64,
}

impl RelPoint {
    pub const CENTER: Self = Self { x: 0.5, y: 0.5 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Scale into absolute coordinates of a `size`-sized box.
    pub fn resolve(self, size: Vec2) -> Point {
        Point::new(size.x * self.x, size.y * self.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for RelPoint {
    fn default() -> Self {
        Self::CENTER
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
