use std::f64::consts::PI;

use super::*;

const TOL: f64 = 1e-9;

#[test]
fn none_is_always_zero() {
    for t in [0.0, 0.5, 17.25, 1e6] {
        assert_eq!(evaluate(&MotionProfile::None, t), 0.0);
    }
}

#[test]
fn left_arm_wave_hits_quarter_period_extremes() {
    let p = MotionProfile::sine(MotionChannel::Rotation, 10.0, 1.0 / 5.0);
    assert!(evaluate(&p, 0.0).abs() < 0.01);
    assert!((evaluate(&p, 1.25) - 10.0).abs() < 0.01);
    assert!(evaluate(&p, 2.5).abs() < 0.01);
    assert!((evaluate(&p, 3.75) + 10.0).abs() < 0.01);
}

#[test]
fn sinusoid_is_periodic() {
    let f = 0.7;
    let p = MotionProfile::Sinusoidal(
        Sinusoid::new(MotionChannel::Rotation, 12.5, f).with_phase(0.3),
    );
    for i in 0..50 {
        let t = i as f64 * 0.173;
        assert!((evaluate(&p, t + 1.0 / f) - evaluate(&p, t)).abs() < 1e-6);
    }
}

#[test]
fn period_override_replaces_frequency() {
    let s = Sinusoid::new(MotionChannel::X, 3.0, 99.0).with_period(4.0);
    assert!((s.effective_frequency_hz() - 0.25).abs() < TOL);
    assert!((s.sample(1.0) - 3.0).abs() < TOL);
}

#[test]
fn phase_offsets_the_wave() {
    let p = MotionProfile::Sinusoidal(
        Sinusoid::new(MotionChannel::Y, 2.0, 1.0).with_phase(PI / 2.0),
    );
    assert!((evaluate(&p, 0.0) - 2.0).abs() < TOL);
    let opposite = p.phase_shifted(PI);
    assert!((evaluate(&opposite, 0.0) + 2.0).abs() < TOL);
}

#[test]
fn channel_sums_only_matching_profiles() {
    let profiles = [
        MotionProfile::Sinusoidal(Sinusoid::new(MotionChannel::X, 1.0, 0.0).with_phase(PI / 2.0)),
        MotionProfile::Sinusoidal(Sinusoid::new(MotionChannel::X, 2.0, 0.0).with_phase(PI / 2.0)),
        MotionProfile::Sinusoidal(Sinusoid::new(MotionChannel::Y, 5.0, 0.0).with_phase(PI / 2.0)),
        MotionProfile::None,
    ];
    assert!((evaluate_channel(&profiles, MotionChannel::X, 3.0) - 3.0).abs() < TOL);
    assert!((evaluate_channel(&profiles, MotionChannel::Y, 3.0) - 5.0).abs() < TOL);
    assert_eq!(evaluate_channel(&profiles, MotionChannel::Rotation, 3.0), 0.0);
}

#[test]
fn evaluation_order_does_not_matter() {
    let p = MotionProfile::sine(MotionChannel::Rotation, 8.0, 1.3);
    let forward: Vec<f64> = (0..20).map(|i| evaluate(&p, i as f64 / 24.0)).collect();
    let mut backward: Vec<f64> = (0..20).rev().map(|i| evaluate(&p, i as f64 / 24.0)).collect();
    backward.reverse();
    assert_eq!(forward, backward);
}

#[test]
fn validate_rejects_non_finite_and_bad_period() {
    assert!(MotionProfile::sine(MotionChannel::X, f64::NAN, 1.0).validate().is_err());
    assert!(MotionProfile::sine(MotionChannel::X, 1.0, -1.0).validate().is_err());
    assert!(
        MotionProfile::Sinusoidal(Sinusoid::new(MotionChannel::X, 1.0, 1.0).with_period(0.0))
            .validate()
            .is_err()
    );
    MotionProfile::None.validate().unwrap();
    MotionProfile::sine(MotionChannel::X, 1.0, 0.0).validate().unwrap();
}

#[test]
fn profile_json_shape() {
    let json = r#"{"kind":"sinusoidal","channel":"rotation","amplitude":10.0,"period_secs":5.0}"#;
    let p: MotionProfile = serde_json::from_str(json).unwrap();
    assert_eq!(
        p,
        MotionProfile::Sinusoidal(
            Sinusoid::new(MotionChannel::Rotation, 10.0, 0.0).with_period(5.0)
        )
    );
    let none: MotionProfile = serde_json::from_str(r#"{"kind":"none"}"#).unwrap();
    assert_eq!(none, MotionProfile::None);
}

#[test]
fn presets_wave_over_clip_matches_clip_duration() {
    let p = presets::wave_over_clip(10.0, 5.0);
    assert!((evaluate_channel(&p, MotionChannel::Rotation, 1.25) - 10.0).abs() < 0.01);
    assert!((evaluate_channel(&p, MotionChannel::Rotation, 3.75) + 10.0).abs() < 0.01);
}

#[test]
fn presets_gait_legs_counter_swing() {
    let left = presets::walking_gait(20.0, 2.0, 0.0);
    let right = presets::walking_gait(20.0, 2.0, PI);
    for i in 0..10 {
        let t = i as f64 * 0.11;
        let l = evaluate_channel(&left, MotionChannel::Rotation, t);
        let r = evaluate_channel(&right, MotionChannel::Rotation, t);
        assert!((l + r).abs() < 1e-9);
    }
}

#[test]
fn presets_sway_moves_both_axes() {
    let p = presets::breathing_sway(4.0, 0.5);
    assert!(evaluate_channel(&p, MotionChannel::Y, 0.5).abs() > 0.0);
    assert!(evaluate_channel(&p, MotionChannel::X, 0.5).abs() > 0.0);
    assert_eq!(evaluate_channel(&p, MotionChannel::Rotation, 0.5), 0.0);
    assert_eq!(presets::waving(15.0, 2.0).len(), 1);
    assert_eq!(presets::walking_bob(3.0, 2.0)[0].channel(), Some(MotionChannel::Y));
}
