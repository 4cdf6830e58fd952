use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;

use crate::assets::PartImage;
use crate::catalog::PartCatalog;
use crate::foundation::error::{CutoutError, CutoutResult};
use crate::scene::animation::{InvalidImagePolicy, admit_part_images};

/// What to do with decoded images that carry no alpha channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphaPolicy {
    /// Reject with [`CutoutError::InvalidImageFormat`].
    #[default]
    Require,
    /// Normalize to RGBA with fully opaque alpha.
    Synthesize,
}

/// Decode an encoded image (PNG, WebP, ...) into a [`PartImage`].
pub fn decode_part_image(
    id: &str,
    bytes: &[u8],
    alpha: AlphaPolicy,
) -> CutoutResult<PartImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| CutoutError::invalid_image(id, format!("decode failed: {e}")))?;
    if !dyn_img.color().has_alpha() && alpha == AlphaPolicy::Require {
        return Err(CutoutError::invalid_image(
            id,
            format!("no alpha channel ({:?})", dyn_img.color()),
        ));
    }
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PartImage::from_rgba8(id, width, height, rgba.into_raw())
}

pub fn load_part_image(id: &str, path: &Path, alpha: AlphaPolicy) -> CutoutResult<PartImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read part image '{}'", path.display()))?;
    decode_part_image(id, &bytes, alpha)
}

/// Load `<dir>/<id>.png` for every catalog entry that has a file on disk.
///
/// Absent files are simply skipped; required-part checks happen when the animation is built.
/// Undecodable or alpha-less images go through `policy`.
pub fn load_part_dir(
    dir: &Path,
    catalog: &PartCatalog,
    alpha: AlphaPolicy,
    policy: InvalidImagePolicy,
) -> CutoutResult<BTreeMap<String, PartImage>> {
    let mut loaded = Vec::new();
    for entry in catalog.entries() {
        let path = dir.join(format!("{}.png", entry.id));
        if !path.is_file() {
            continue;
        }
        let res = load_part_image(&entry.id, &path, alpha);
        if let Ok(img) = &res {
            tracing::debug!(
                part = %entry.id,
                width = img.width(),
                height = img.height(),
                "loaded part image"
            );
        }
        loaded.push((entry.id.clone(), res));
    }
    admit_part_images(catalog, loaded, policy)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
