use std::collections::{BTreeMap, BTreeSet};

use crate::assets::PartImage;
use crate::catalog::{CatalogEntry, PartCatalog};
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::{CutoutError, CutoutResult};
use crate::layer::Layer;
use crate::scene::rig::{RigConfig, validate_timing};

/// How an optional part with an unusable image is treated.
///
/// Required parts always fail the render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidImagePolicy {
    #[default]
    Fail,
    /// Drop the optional layer with a warning.
    DropOptional,
}

/// Sort per-part load results into usable images according to `policy`.
///
/// Only [`CutoutError::InvalidImageFormat`] is subject to the policy; any other error aborts.
pub fn admit_part_images(
    catalog: &PartCatalog,
    loaded: impl IntoIterator<Item = (String, CutoutResult<PartImage>)>,
    policy: InvalidImagePolicy,
) -> CutoutResult<BTreeMap<String, PartImage>> {
    let mut out = BTreeMap::new();
    for (id, res) in loaded {
        let entry = lookup_part(catalog, &id)?;
        match res {
            Ok(img) => {
                out.insert(id, img);
            }
            Err(err @ CutoutError::InvalidImageFormat { .. }) => {
                if entry.required || policy == InvalidImagePolicy::Fail {
                    return Err(err);
                }
                tracing::warn!(part = %id, error = %err, "dropping optional part with invalid image");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(out)
}

fn lookup_part<'c>(catalog: &'c PartCatalog, id: &str) -> CutoutResult<&'c CatalogEntry> {
    catalog
        .lookup(id)
        .ok_or_else(|| CutoutError::invalid_spec(format!("unknown part '{id}'")))
}

/// A validated, immutable render request.
///
/// Built once per render, consumed by one render pass. Layers are kept in ascending z-order;
/// the canvas is fixed by the base part's image size.
#[derive(Clone, Debug)]
pub struct AnimationSpec<'a> {
    layers: Vec<Layer<'a>>,
    canvas: Canvas,
    duration_secs: f64,
    fps: Fps,
}

impl<'a> AnimationSpec<'a> {
    /// Bind every supplied image to its catalog entry and apply the rig's overrides.
    ///
    /// Fails fast, before any frame work, with `InvalidSpec` for bad timing or unknown parts
    /// and `MissingRequiredPart` when a required image is absent.
    #[tracing::instrument(skip_all, fields(images = images.len(), parts = rig.parts.len()))]
    pub fn build(
        catalog: &PartCatalog,
        images: &'a BTreeMap<String, PartImage>,
        rig: &RigConfig,
    ) -> CutoutResult<Self> {
        rig.validate(catalog)?;
        if let Some(unknown) = images.keys().find(|id| !catalog.contains(id)) {
            return Err(CutoutError::invalid_spec(format!(
                "image supplied for unknown part '{unknown}'"
            )));
        }

        let mut layers = Vec::with_capacity(images.len());
        for entry in catalog.entries() {
            let Some(image) = images.get(&entry.id) else {
                continue;
            };
            let mut layer = Layer::new(entry.clone(), image);
            if let Some(part) = rig.part(&entry.id) {
                layer.anchor = part.anchor;
                layer.pivot = part.pivot;
                layer.motion = part.motion.clone();
            }
            layers.push(layer);
        }

        Self::from_layers(catalog, layers, rig.duration_secs, rig.fps)
    }

    /// Assemble from explicit layers, in any order.
    pub fn from_layers(
        catalog: &PartCatalog,
        layers: Vec<Layer<'a>>,
        duration_secs: f64,
        fps: Fps,
    ) -> CutoutResult<Self> {
        validate_timing(duration_secs, fps)?;

        let mut seen = BTreeSet::new();
        for layer in &layers {
            let entry = lookup_part(catalog, layer.id())?;
            if entry.z_order != layer.z_order() {
                return Err(CutoutError::invalid_spec(format!(
                    "layer '{}' has z-order {} but the catalog says {}",
                    layer.id(),
                    layer.z_order(),
                    entry.z_order
                )));
            }
            if !seen.insert(layer.id()) {
                return Err(CutoutError::invalid_spec(format!(
                    "part '{}' supplied more than once",
                    layer.id()
                )));
            }
            layer.validate()?;
        }
        catalog.check_required(|id| seen.contains(id))?;

        let base_id = catalog.base().id.as_str();
        let base = layers
            .iter()
            .find(|l| l.id() == base_id)
            .ok_or_else(|| CutoutError::missing_part(base_id))?;
        let canvas = Canvas {
            width: base.image.width(),
            height: base.image.height(),
        };

        let mut layers = layers;
        layers.sort_by_key(|l| l.z_order());

        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            layers = layers.len(),
            duration_secs,
            fps = %fps,
            "animation ready"
        );

        Ok(Self {
            layers,
            canvas,
            duration_secs,
            fps,
        })
    }

    /// Layers in ascending z-order.
    pub fn layers(&self) -> &[Layer<'a>] {
        &self.layers
    }

    pub fn layer(&self, id: &str) -> Option<&Layer<'a>> {
        self.layers.iter().find(|l| l.id() == id)
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// `round(duration * fps)`.
    pub fn frame_count(&self) -> u64 {
        self.fps.secs_to_frames_round(self.duration_secs)
    }

    /// Sample time of frame `i`: `i / fps`.
    pub fn sample_time(&self, i: FrameIndex) -> f64 {
        self.fps.frame_time_secs(i)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/animation.rs"]
mod tests;
