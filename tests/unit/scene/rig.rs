use super::*;
use crate::motion::{MotionChannel, evaluate_channel};

#[test]
fn character_default_waves_left_hand_over_clip() {
    let rig = RigConfig::character_default(5.0, Fps::whole(24).unwrap());
    let hand = rig.part(LEFT_HAND).unwrap();
    assert!(hand.anchor.is_none());
    assert_eq!(hand.pivot, Some(RelPoint::new(0.0, 0.0)));
    assert!((evaluate_channel(&hand.motion, MotionChannel::Rotation, 1.25) - 10.0).abs() < 0.01);
    rig.validate(&PartCatalog::character()).unwrap();
}

#[test]
fn json_round_trip_keeps_overrides() {
    let mut rig = RigConfig::character_default(4.0, Fps::whole(12).unwrap());
    rig.parts.insert(
        "hair".to_string(),
        PartRig {
            anchor: Some(RelPoint::new(0.5, 0.2)),
            pivot: Some(RelPoint::new(0.5, 0.0)),
            motion: crate::motion::presets::breathing_sway(2.0, 0.5),
        },
    );
    let text = rig.to_json_pretty().unwrap();
    assert_eq!(RigConfig::from_json_str(&text).unwrap(), rig);
}

#[test]
fn minimal_json_uses_defaults() {
    let rig = RigConfig::from_json_str(r#"{"duration_secs": 3, "fps": {"num": 10, "den": 1}}"#)
        .unwrap();
    assert_eq!(rig.invalid_image_policy, InvalidImagePolicy::Fail);
    assert!(rig.parts.is_empty());
}

#[test]
fn unknown_fields_are_config_errors() {
    let err = RigConfig::from_json_str(
        r#"{"duration_secs": 3, "fps": {"num": 10, "den": 1}, "speed": 2}"#,
    )
    .unwrap_err();
    assert!(matches!(err, CutoutError::Config(_)));
}

#[test]
fn validate_rejects_unknown_part_and_bad_timing() {
    let cat = PartCatalog::character();
    let mut rig = RigConfig::still(5.0, Fps::whole(24).unwrap());
    rig.parts.insert("tail".to_string(), PartRig::default());
    assert!(matches!(rig.validate(&cat), Err(CutoutError::InvalidSpec(msg)) if msg.contains("tail")));

    for d in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let rig = RigConfig::still(d, Fps::whole(24).unwrap());
        assert!(matches!(rig.validate(&cat), Err(CutoutError::InvalidSpec(_))));
    }

    let rig = RigConfig::still(5.0, Fps { num: 0, den: 1 });
    assert!(matches!(rig.validate(&cat), Err(CutoutError::InvalidSpec(_))));
}

#[test]
fn from_path_reports_missing_file() {
    let err = RigConfig::from_path(Path::new("/definitely/not/here/rig.json")).unwrap_err();
    assert!(err.to_string().contains("read rig file"));
}

#[test]
fn character_default_hand_corner_stays_on_shoulder() {
    use crate::foundation::core::{Canvas, Point};

    let cat = PartCatalog::character();
    let rig = RigConfig::character_default(5.0, Fps::whole(24).unwrap());
    let img = crate::assets::PartImage::solid(LEFT_HAND, 10, 30, [0, 0, 0, 255]).unwrap();
    let mut layer = crate::layer::Layer::new(cat.lookup(LEFT_HAND).unwrap().clone(), &img);
    layer.pivot = rig.part(LEFT_HAND).unwrap().pivot;
    layer.motion = rig.part(LEFT_HAND).unwrap().motion.clone();

    let canvas = Canvas {
        width: 200,
        height: 100,
    };
    for t in [0.0, 1.25, 3.0] {
        let corner = crate::transform::layer_affine(&layer, t, canvas) * Point::ORIGIN;
        assert!((corner.x - 110.0).abs() < 1e-9, "t={t}: {corner:?}");
        assert!((corner.y - 40.0).abs() < 1e-9, "t={t}: {corner:?}");
    }
}
