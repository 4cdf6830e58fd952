//! Bicubic (Catmull-Rom) resampling of premultiplied part images.

use crate::assets::PartImage;

/// Catmull-Rom kernel (`a = -0.5`).
fn cubic_weight(x: f64) -> f64 {
    let x = x.abs();
    if x <= 1.0 {
        (1.5 * x - 2.5) * x * x + 1.0
    } else if x < 2.0 {
        ((-0.5 * x + 2.5) * x - 4.0) * x + 2.0
    } else {
        0.0
    }
}

fn weights(frac: f64) -> [f64; 4] {
    [
        cubic_weight(frac + 1.0),
        cubic_weight(frac),
        cubic_weight(1.0 - frac),
        cubic_weight(2.0 - frac),
    ]
}

/// Sample `img` at continuous pixel coordinates `(u, v)`, where integer coordinates hit pixel
/// centers. Outside the image the source is transparent, which gives rotated cutouts a soft
/// edge instead of a jagged one.
pub(crate) fn sample_bicubic(img: &PartImage, u: f64, v: f64) -> [u8; 4] {
    let w = f64::from(img.width());
    let h = f64::from(img.height());
    if u <= -2.0 || v <= -2.0 || u >= w + 1.0 || v >= h + 1.0 {
        return [0, 0, 0, 0];
    }

    let x0 = u.floor();
    let y0 = v.floor();
    let wx = weights(u - x0);
    let wy = weights(v - y0);
    let (x0, y0) = (x0 as i64, y0 as i64);

    let mut acc = [0.0f64; 4];
    for (j, wyj) in wy.iter().enumerate() {
        if *wyj == 0.0 {
            continue;
        }
        let sy = y0 - 1 + j as i64;
        let mut row = [0.0f64; 4];
        for (i, wxi) in wx.iter().enumerate() {
            if *wxi == 0.0 {
                continue;
            }
            let px = img.pixel(x0 - 1 + i as i64, sy);
            for c in 0..4 {
                row[c] += f64::from(px[c]) * wxi;
            }
        }
        for c in 0..4 {
            acc[c] += row[c] * wyj;
        }
    }

    // Cubic overshoot can leave the premultiplied range; color never exceeds alpha.
    let a = acc[3].round().clamp(0.0, 255.0);
    [
        acc[0].round().clamp(0.0, a) as u8,
        acc[1].round().clamp(0.0, a) as u8,
        acc[2].round().clamp(0.0, a) as u8,
        a as u8,
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/render/sample.rs"]
mod tests;
