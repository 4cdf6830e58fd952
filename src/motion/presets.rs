//! Ready-made periodic motions for cutout puppets.
//!
//! Each preset is just a list of [`MotionProfile`] values; nothing here is evaluated
//! differently from a hand-written profile.

use std::f64::consts::PI;

use super::{MotionChannel, MotionProfile, Sinusoid};

/// Gentle idle motion: a vertical bob at `frequency_hz` and a side-to-side drift at half that.
pub fn breathing_sway(amplitude_px: f64, frequency_hz: f64) -> Vec<MotionProfile> {
    vec![
        MotionProfile::sine(MotionChannel::Y, amplitude_px, frequency_hz),
        MotionProfile::sine(MotionChannel::X, amplitude_px * 0.5, frequency_hz * 0.5),
    ]
}

/// Limb swing for walking at `steps_per_sec`; one full swing spans two steps.
///
/// Pass `phase_rad = 0` for one leg and `PI` for the other (or the opposite arm).
pub fn walking_gait(stride_deg: f64, steps_per_sec: f64, phase_rad: f64) -> Vec<MotionProfile> {
    vec![MotionProfile::Sinusoidal(
        Sinusoid::new(MotionChannel::Rotation, stride_deg, steps_per_sec * 0.5)
            .with_phase(phase_rad),
    )]
}

/// Body bob that accompanies [`walking_gait`]: one dip per step.
pub fn walking_bob(amplitude_px: f64, steps_per_sec: f64) -> Vec<MotionProfile> {
    vec![MotionProfile::Sinusoidal(
        Sinusoid::new(MotionChannel::Y, amplitude_px, steps_per_sec).with_phase(PI / 2.0),
    )]
}

/// Hand wave: rotation oscillating `±amplitude_deg` at `frequency_hz`.
pub fn waving(amplitude_deg: f64, frequency_hz: f64) -> Vec<MotionProfile> {
    vec![MotionProfile::sine(
        MotionChannel::Rotation,
        amplitude_deg,
        frequency_hz,
    )]
}

/// One full wave over the whole clip: `amplitude_deg * sin(2πt / duration)`.
pub fn wave_over_clip(amplitude_deg: f64, duration_secs: f64) -> Vec<MotionProfile> {
    vec![MotionProfile::Sinusoidal(
        Sinusoid::new(MotionChannel::Rotation, amplitude_deg, 0.0).with_period(duration_secs),
    )]
}
