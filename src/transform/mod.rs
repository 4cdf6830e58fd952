//! Per-sample layer transforms.
//!
//! [`compute_transform`] is a pure function of `(layer, t, canvas)`: the same inputs always
//! produce the same transform, which is what lets frames render in parallel and out of order.

use crate::foundation::core::{Affine, Canvas, Point, Vec2};
use crate::layer::{Layer, resolve_anchor};
use crate::motion::{MotionChannel, evaluate_channel};

/// Placement of one layer at one time sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerTransform {
    /// Canvas position the layer pivot is moved to.
    pub position: Point,
    /// Counter-clockwise on screen.
    pub rotation_deg: f64,
}

impl LayerTransform {
    /// Map from part-image pixel space to canvas pixel space.
    ///
    /// Rotates about `pivot_px` (image space) and then moves the pivot to `position`. The
    /// canvas y axis points down, so a counter-clockwise screen rotation is a negative angle in
    /// kurbo's convention.
    pub fn to_affine(&self, pivot_px: Point) -> Affine {
        Affine::translate(self.position.to_vec2())
            * Affine::rotate(-self.rotation_deg.to_radians())
            * Affine::translate(-pivot_px.to_vec2())
    }
}

pub fn compute_transform(layer: &Layer<'_>, t: f64, canvas: Canvas) -> LayerTransform {
    let base = resolve_anchor(layer, canvas);
    let offset = Vec2::new(
        evaluate_channel(&layer.motion, MotionChannel::X, t),
        evaluate_channel(&layer.motion, MotionChannel::Y, t),
    );
    LayerTransform {
        position: base + offset,
        rotation_deg: evaluate_channel(&layer.motion, MotionChannel::Rotation, t),
    }
}

/// Full image-to-canvas affine for `layer` at time `t`.
pub fn layer_affine(layer: &Layer<'_>, t: f64, canvas: Canvas) -> Affine {
    compute_transform(layer, t, canvas).to_affine(layer.pivot_px())
}

#[cfg(test)]
#[path = "../../tests/unit/transform/transform.rs"]
mod tests;
