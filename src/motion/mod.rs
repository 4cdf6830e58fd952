//! Closed-form periodic motion.
//!
//! A [`MotionProfile`] is a plain value; [`evaluate`] is a pure function of `(profile, t)` with
//! no hidden state, so frames may sample it concurrently and out of order.

use std::f64::consts::TAU;

use crate::foundation::error::{CutoutError, CutoutResult};

pub mod presets;

/// Which component of a layer transform a profile drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionChannel {
    /// Horizontal offset in pixels.
    X,
    /// Vertical offset in pixels (positive is down).
    Y,
    /// Rotation in degrees (positive is counter-clockwise on screen).
    Rotation,
}

/// `amplitude * sin(2π * frequency * t + phase)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sinusoid {
    pub channel: MotionChannel,
    /// Pixels for `X`/`Y`, degrees for `Rotation`.
    pub amplitude: f64,
    #[serde(default)]
    pub frequency_hz: f64,
    #[serde(default)]
    pub phase_rad: f64,
    /// When set, replaces `frequency_hz` with `1 / period_secs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_secs: Option<f64>,
}

impl Sinusoid {
    pub fn new(channel: MotionChannel, amplitude: f64, frequency_hz: f64) -> Self {
        Self {
            channel,
            amplitude,
            frequency_hz,
            phase_rad: 0.0,
            period_secs: None,
        }
    }

    pub fn with_phase(mut self, phase_rad: f64) -> Self {
        self.phase_rad = phase_rad;
        self
    }

    pub fn with_period(mut self, period_secs: f64) -> Self {
        self.period_secs = Some(period_secs);
        self
    }

    pub fn effective_frequency_hz(&self) -> f64 {
        match self.period_secs {
            Some(p) => 1.0 / p,
            None => self.frequency_hz,
        }
    }

    pub fn sample(&self, t: f64) -> f64 {
        self.amplitude * (TAU * self.effective_frequency_hz() * t + self.phase_rad).sin()
    }
}

/// Motion attached to one layer channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MotionProfile {
    #[default]
    None,
    Sinusoidal(Sinusoid),
}

impl MotionProfile {
    pub fn sine(channel: MotionChannel, amplitude: f64, frequency_hz: f64) -> Self {
        Self::Sinusoidal(Sinusoid::new(channel, amplitude, frequency_hz))
    }

    pub fn channel(&self) -> Option<MotionChannel> {
        match self {
            Self::None => None,
            Self::Sinusoidal(s) => Some(s.channel),
        }
    }

    /// Same profile shifted by `delta_rad`; used to parameter-match dependent layers.
    pub fn phase_shifted(self, delta_rad: f64) -> Self {
        match self {
            Self::None => Self::None,
            Self::Sinusoidal(s) => Self::Sinusoidal(s.with_phase(s.phase_rad + delta_rad)),
        }
    }

    /// Reject parameters that would make [`evaluate`] non-finite.
    pub fn validate(&self) -> CutoutResult<()> {
        let Self::Sinusoidal(s) = self else {
            return Ok(());
        };
        if !s.amplitude.is_finite() || !s.frequency_hz.is_finite() || !s.phase_rad.is_finite() {
            return Err(CutoutError::invalid_spec(
                "sinusoidal motion parameters must be finite",
            ));
        }
        if s.frequency_hz < 0.0 {
            return Err(CutoutError::invalid_spec(
                "sinusoidal motion frequency must be >= 0",
            ));
        }
        if let Some(p) = s.period_secs
            && !(p.is_finite() && p > 0.0)
        {
            return Err(CutoutError::invalid_spec(
                "sinusoidal motion period override must be finite and > 0",
            ));
        }
        Ok(())
    }
}

/// Value of a single profile at time `t` seconds. `None` is always `0`.
pub fn evaluate(profile: &MotionProfile, t: f64) -> f64 {
    match profile {
        MotionProfile::None => 0.0,
        MotionProfile::Sinusoidal(s) => s.sample(t),
    }
}

/// Sum of every profile on `channel` at time `t`.
pub fn evaluate_channel(profiles: &[MotionProfile], channel: MotionChannel, t: f64) -> f64 {
    profiles
        .iter()
        .filter(|p| p.channel() == Some(channel))
        .map(|p| evaluate(p, t))
        .sum()
}

#[cfg(test)]
#[path = "../../tests/unit/motion/motion.rs"]
mod tests;
