use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context as _;

use crate::catalog::{LEFT_HAND, PartCatalog};
use crate::foundation::core::{Fps, RelPoint};
use crate::foundation::error::{CutoutError, CutoutResult};
use crate::motion::{MotionProfile, presets};
use crate::scene::animation::InvalidImagePolicy;

/// Per-part placement and motion overrides.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartRig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<RelPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot: Option<RelPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub motion: Vec<MotionProfile>,
}

/// JSON rig file: clip timing plus per-part overrides keyed by catalog id.
///
/// ```json
/// {
///   "duration_secs": 5.0,
///   "fps": { "num": 24, "den": 1 },
///   "parts": {
///     "left_hand": {
///       "pivot": { "x": 0.1, "y": 0.5 },
///       "motion": [
///         { "kind": "sinusoidal", "channel": "rotation", "amplitude": 10.0, "period_secs": 5.0 }
///       ]
///     }
///   }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RigConfig {
    pub duration_secs: f64,
    pub fps: Fps,
    #[serde(default)]
    pub invalid_image_policy: InvalidImagePolicy,
    #[serde(default)]
    pub parts: BTreeMap<String, PartRig>,
}

impl RigConfig {
    /// A rig with timing only; every part sits still on its default anchor.
    pub fn still(duration_secs: f64, fps: Fps) -> Self {
        Self {
            duration_secs,
            fps,
            invalid_image_policy: InvalidImagePolicy::default(),
            parts: BTreeMap::new(),
        }
    }

    /// The stock character rig: the left hand hangs from its top-left corner at the shoulder
    /// anchor and swings `±10°` about that corner once over the whole clip.
    pub fn character_default(duration_secs: f64, fps: Fps) -> Self {
        let mut rig = Self::still(duration_secs, fps);
        rig.parts.insert(
            LEFT_HAND.to_string(),
            PartRig {
                pivot: Some(RelPoint::new(0.0, 0.0)),
                motion: presets::wave_over_clip(10.0, duration_secs),
                ..PartRig::default()
            },
        );
        rig
    }

    pub fn part(&self, id: &str) -> Option<&PartRig> {
        self.parts.get(id)
    }

    pub fn from_json_str(s: &str) -> CutoutResult<Self> {
        serde_json::from_str(s).map_err(|e| CutoutError::config(format!("parse rig JSON: {e}")))
    }

    pub fn from_path(path: &Path) -> CutoutResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read rig file '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> CutoutResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CutoutError::config(format!("serialize rig JSON: {e}")))
    }

    /// Check timing and that every configured part exists in `catalog`.
    pub fn validate(&self, catalog: &PartCatalog) -> CutoutResult<()> {
        validate_timing(self.duration_secs, self.fps)?;
        for (id, part) in &self.parts {
            if !catalog.contains(id) {
                return Err(CutoutError::invalid_spec(format!(
                    "rig configures unknown part '{id}'"
                )));
            }
            for p in &part.motion {
                p.validate()?;
            }
        }
        Ok(())
    }
}

pub(crate) fn validate_timing(duration_secs: f64, fps: Fps) -> CutoutResult<()> {
    if !(duration_secs.is_finite() && duration_secs > 0.0) {
        return Err(CutoutError::invalid_spec(format!(
            "duration must be finite and > 0 (got {duration_secs})"
        )));
    }
    fps.validate()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/rig.rs"]
mod tests;
