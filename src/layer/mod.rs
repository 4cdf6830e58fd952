//! A part image bound to its catalog entry, placement and motion.
//!
//! Layers are independent: a layer never reads another layer's transform. Attachments such as
//! fingers following a hand are approximated by giving both layers matching motion parameters.

use crate::assets::PartImage;
use crate::catalog::CatalogEntry;
use crate::foundation::core::{Canvas, Point, RelPoint};
use crate::foundation::error::{CutoutError, CutoutResult};
use crate::motion::{MotionChannel, MotionProfile};

#[derive(Clone, Debug)]
pub struct Layer<'a> {
    pub entry: CatalogEntry,
    pub image: &'a PartImage,
    /// Canvas-relative attachment point; falls back to `entry.default_anchor`.
    pub anchor: Option<RelPoint>,
    /// Rotation pivot as a fraction of the part image; falls back to the image center.
    pub pivot: Option<RelPoint>,
    pub motion: Vec<MotionProfile>,
}

impl<'a> Layer<'a> {
    pub fn new(entry: CatalogEntry, image: &'a PartImage) -> Self {
        Self {
            entry,
            image,
            anchor: None,
            pivot: None,
            motion: Vec::new(),
        }
    }

    pub fn with_anchor(mut self, anchor: RelPoint) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn with_pivot(mut self, pivot: RelPoint) -> Self {
        self.pivot = Some(pivot);
        self
    }

    pub fn with_motion(mut self, profiles: impl IntoIterator<Item = MotionProfile>) -> Self {
        self.motion.extend(profiles);
        self
    }

    pub fn id(&self) -> &str {
        &self.entry.id
    }

    pub fn z_order(&self) -> i32 {
        self.entry.z_order
    }

    pub fn effective_anchor(&self) -> RelPoint {
        self.anchor.unwrap_or(self.entry.default_anchor)
    }

    pub fn effective_pivot(&self) -> RelPoint {
        self.pivot.unwrap_or(RelPoint::CENTER)
    }

    /// Pivot in the part image's own pixel space.
    pub fn pivot_px(&self) -> Point {
        self.effective_pivot().resolve(self.image.size())
    }

    pub fn has_motion_on(&self, channel: MotionChannel) -> bool {
        self.motion.iter().any(|p| p.channel() == Some(channel))
    }

    pub(crate) fn validate(&self) -> CutoutResult<()> {
        for p in &self.motion {
            p.validate()?;
        }
        for (what, rp) in [("anchor", self.anchor), ("pivot", self.pivot)] {
            if let Some(rp) = rp
                && !rp.is_finite()
            {
                return Err(CutoutError::invalid_spec(format!(
                    "layer '{}' has a non-finite {what}",
                    self.entry.id
                )));
            }
        }
        Ok(())
    }
}

/// Absolute canvas position of the layer's anchor: `canvas_size * anchor`.
pub fn resolve_anchor(layer: &Layer<'_>, canvas: Canvas) -> Point {
    layer.effective_anchor().resolve(canvas.size_f64())
}

#[cfg(test)]
#[path = "../../tests/unit/layer/layer.rs"]
mod tests;
