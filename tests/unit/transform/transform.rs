use super::*;
use crate::assets::PartImage;
use crate::catalog::{LEFT_HAND, PartCatalog};
use crate::foundation::core::RelPoint;
use crate::motion::{MotionProfile, Sinusoid};

const CANVAS: Canvas = Canvas {
    width: 800,
    height: 1000,
};

fn near(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

#[test]
fn static_layer_sits_on_its_anchor() {
    let cat = PartCatalog::character();
    let img = PartImage::solid(LEFT_HAND, 40, 20, [0, 0, 0, 255]).unwrap();
    let layer = Layer::new(cat.lookup(LEFT_HAND).unwrap().clone(), &img);

    let tr = compute_transform(&layer, 3.3, CANVAS);
    assert!(near(tr.position, Point::new(440.0, 400.0)));
    assert_eq!(tr.rotation_deg, 0.0);
}

#[test]
fn left_arm_rotation_scenario() {
    let cat = PartCatalog::character();
    let img = PartImage::solid(LEFT_HAND, 40, 20, [0, 0, 0, 255]).unwrap();
    let layer = Layer::new(cat.lookup(LEFT_HAND).unwrap().clone(), &img).with_motion([
        MotionProfile::sine(MotionChannel::Rotation, 10.0, 1.0 / 5.0),
    ]);

    let rot = |t: f64| compute_transform(&layer, t, CANVAS).rotation_deg;
    assert!(rot(0.0).abs() < 0.01);
    assert!((rot(1.25) - 10.0).abs() < 0.01);
    assert!(rot(2.5).abs() < 0.01);
    assert!((rot(3.75) + 10.0).abs() < 0.01);
}

#[test]
fn rotation_is_periodic_in_one_over_f() {
    let cat = PartCatalog::character();
    let img = PartImage::solid(LEFT_HAND, 8, 8, [0, 0, 0, 255]).unwrap();
    let f = 0.8;
    let layer = Layer::new(cat.lookup(LEFT_HAND).unwrap().clone(), &img).with_motion([
        MotionProfile::Sinusoidal(Sinusoid::new(MotionChannel::Rotation, 25.0, f).with_phase(1.1)),
    ]);
    for i in 0..40 {
        let t = i as f64 * 0.37;
        let a = compute_transform(&layer, t, CANVAS).rotation_deg;
        let b = compute_transform(&layer, t + 1.0 / f, CANVAS).rotation_deg;
        assert!((a - b).abs() < 1e-6);
    }
}

#[test]
fn offsets_are_added_to_anchor() {
    let cat = PartCatalog::character();
    let img = PartImage::solid(LEFT_HAND, 8, 8, [0, 0, 0, 255]).unwrap();
    let layer = Layer::new(cat.lookup(LEFT_HAND).unwrap().clone(), &img)
        .with_anchor(RelPoint::new(0.5, 0.5))
        .with_motion([
            MotionProfile::Sinusoidal(Sinusoid::new(MotionChannel::X, 6.0, 0.0).with_phase(
                std::f64::consts::FRAC_PI_2,
            )),
            MotionProfile::Sinusoidal(Sinusoid::new(MotionChannel::Y, -4.0, 0.0).with_phase(
                std::f64::consts::FRAC_PI_2,
            )),
        ]);
    let tr = compute_transform(&layer, 0.0, CANVAS);
    assert!(near(tr.position, Point::new(406.0, 496.0)));
}

#[test]
fn transform_is_deterministic() {
    let cat = PartCatalog::character();
    let img = PartImage::solid(LEFT_HAND, 8, 8, [0, 0, 0, 255]).unwrap();
    let layer = Layer::new(cat.lookup(LEFT_HAND).unwrap().clone(), &img)
        .with_motion(crate::motion::presets::breathing_sway(3.0, 0.4));
    let a = compute_transform(&layer, 1.7, CANVAS);
    let _ = compute_transform(&layer, 0.2, CANVAS);
    let b = compute_transform(&layer, 1.7, CANVAS);
    assert_eq!(a, b);
}

#[test]
fn affine_maps_pivot_onto_position() {
    let tr = LayerTransform {
        position: Point::new(100.0, 50.0),
        rotation_deg: 37.0,
    };
    let pivot = Point::new(10.0, 4.0);
    assert!(near(tr.to_affine(pivot) * pivot, Point::new(100.0, 50.0)));
}

#[test]
fn positive_rotation_is_counter_clockwise_on_screen() {
    let tr = LayerTransform {
        position: Point::ZERO,
        rotation_deg: 90.0,
    };
    // A point to the right of the pivot ends up above it (smaller y on screen).
    let p = tr.to_affine(Point::ZERO) * Point::new(1.0, 0.0);
    assert!(near(p, Point::new(0.0, -1.0)));
}
