use super::*;

fn checker() -> PartImage {
    let mut data = Vec::new();
    for y in 0..4u32 {
        for x in 0..4u32 {
            if (x + y) % 2 == 0 {
                data.extend_from_slice(&[255, 255, 255, 255]);
            } else {
                data.extend_from_slice(&[0, 0, 0, 255]);
            }
        }
    }
    PartImage::from_premul_rgba8("checker", 4, 4, data).unwrap()
}

#[test]
fn kernel_partitions_unity() {
    for i in 0..=10 {
        let f = i as f64 / 10.0;
        let s: f64 = weights(f).iter().sum();
        assert!((s - 1.0).abs() < 1e-12);
    }
}

#[test]
fn integer_coordinates_reproduce_source_pixels() {
    let img = checker();
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(
                sample_bicubic(&img, x as f64, y as f64),
                img.pixel(x, y),
                "pixel {x},{y}"
            );
        }
    }
}

#[test]
fn far_outside_is_transparent() {
    let img = checker();
    assert_eq!(sample_bicubic(&img, -5.0, 1.0), [0, 0, 0, 0]);
    assert_eq!(sample_bicubic(&img, 1.0, 10.0), [0, 0, 0, 0]);
}

#[test]
fn edge_is_feathered_not_cut() {
    let img = PartImage::solid("block", 4, 4, [200, 100, 50, 255]).unwrap();
    let inside = sample_bicubic(&img, 1.5, 1.5);
    assert_eq!(inside, [200, 100, 50, 255]);

    let edge = sample_bicubic(&img, -0.5, 1.5);
    assert!(edge[3] > 0 && edge[3] < 255);
}

#[test]
fn output_stays_premultiplied() {
    let img = checker();
    for i in 0..16 {
        let u = -1.0 + i as f64 * 0.37;
        let px = sample_bicubic(&img, u, 1.3);
        assert!(px[0] <= px[3] && px[1] <= px[3] && px[2] <= px[3]);
    }
}
