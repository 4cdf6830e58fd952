//! Layer rasterization and "over" compositing.

use crate::foundation::core::{Affine, Canvas, Point, Rect};
use crate::foundation::math::mul_div255_u8;
use crate::layer::Layer;
use crate::render::frame::FrameRGBA;
use crate::render::sample::sample_bicubic;
use crate::transform::layer_affine;

/// Composite every layer at time `t` onto a transparent canvas, back to front.
///
/// Layers are ordered by catalog z-order here, so the order of `layers` does not matter.
/// The caller must have checked that the canvas-defining base layer is present.
pub fn render_frame(layers: &[Layer<'_>], t: f64, canvas: Canvas) -> FrameRGBA {
    let mut frame = FrameRGBA::transparent(canvas);
    let mut order: Vec<&Layer<'_>> = layers.iter().collect();
    order.sort_by(|a, b| a.z_order().cmp(&b.z_order()).then_with(|| a.id().cmp(b.id())));

    for layer in order {
        let xf = layer_affine(layer, t, canvas);
        draw_layer(&mut frame, layer, xf);
    }
    frame
}

/// Draw one part image through `xf` (image space to canvas space) using premultiplied "over".
pub(crate) fn draw_layer(dst: &mut FrameRGBA, layer: &Layer<'_>, xf: Affine) {
    if let Some((dx, dy)) = integer_translation(xf) {
        blit_over(dst, layer, dx, dy);
        return;
    }

    let img = layer.image;
    let inv = xf.inverse();
    let src_rect = Rect::new(0.0, 0.0, f64::from(img.width()), f64::from(img.height()));
    // Bicubic support reaches up to two source pixels past the edge.
    let bbox = xf.transform_rect_bbox(src_rect).inflate(2.0, 2.0);

    let x0 = bbox.x0.floor().max(0.0) as u32;
    let y0 = bbox.y0.floor().max(0.0) as u32;
    let x1 = bbox.x1.ceil().min(f64::from(dst.width)).max(0.0) as u32;
    let y1 = bbox.y1.ceil().min(f64::from(dst.height)).max(0.0) as u32;

    let width = dst.width as usize;
    for y in y0..y1 {
        for x in x0..x1 {
            let p = inv * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let src = sample_bicubic(img, p.x - 0.5, p.y - 0.5);
            if src[3] == 0 {
                continue;
            }
            let idx = ((y as usize) * width + (x as usize)) * 4;
            let d = &mut dst.data[idx..idx + 4];
            let out = premul_over_px([d[0], d[1], d[2], d[3]], src);
            d.copy_from_slice(&out);
        }
    }
}

/// Pure whole-pixel translation, the common case for static parts.
fn integer_translation(xf: Affine) -> Option<(i64, i64)> {
    let [a, b, c, d, e, f] = xf.as_coeffs();
    if a != 1.0 || b != 0.0 || c != 0.0 || d != 1.0 {
        return None;
    }
    if e.fract() != 0.0 || f.fract() != 0.0 || !e.is_finite() || !f.is_finite() {
        return None;
    }
    // Far off-canvas offsets go through the bbox-clipped path instead.
    const LIMIT: f64 = i32::MAX as f64;
    if e.abs() >= LIMIT || f.abs() >= LIMIT {
        return None;
    }
    Some((e as i64, f as i64))
}

fn blit_over(dst: &mut FrameRGBA, layer: &Layer<'_>, dx: i64, dy: i64) {
    let img = layer.image;
    let (sw, sh) = (i64::from(img.width()), i64::from(img.height()));
    let (cw, ch) = (i64::from(dst.width), i64::from(dst.height));

    let x_start = dx.max(0);
    let x_end = dx.saturating_add(sw).min(cw);
    let y_start = dy.max(0);
    let y_end = dy.saturating_add(sh).min(ch);
    if x_start >= x_end || y_start >= y_end {
        return;
    }

    let src = img.data();
    for y in y_start..y_end {
        let sy = (y - dy) as usize;
        for x in x_start..x_end {
            let sx = (x - dx) as usize;
            let si = (sy * sw as usize + sx) * 4;
            let s = [src[si], src[si + 1], src[si + 2], src[si + 3]];
            if s[3] == 0 {
                continue;
            }
            let di = ((y as usize) * (cw as usize) + (x as usize)) * 4;
            let d = &mut dst.data[di..di + 4];
            let out = premul_over_px([d[0], d[1], d[2], d[3]], s);
            d.copy_from_slice(&out);
        }
    }
}

/// `out = src + dst * (1 - src_a)` on premultiplied RGBA8.
pub(crate) fn premul_over_px(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - sa;
    let mut out = [0u8; 4];
    out[3] = src[3].saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for c in 0..3 {
        out[c] = src[c].saturating_add(mul_div255_u8(u16::from(dst[c]), inv));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
