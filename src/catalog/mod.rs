//! Static registry of the part identifiers a character rig understands.
//!
//! Every entry carries a unique z-order rank (lower = farther back) and a default anchor on the
//! canvas. Exactly one entry is the base: it is required, sits at z 0 and defines the canvas
//! size for the whole clip.

use std::collections::{BTreeMap, BTreeSet};

use crate::foundation::core::RelPoint;
use crate::foundation::error::{CutoutError, CutoutResult};

/// Identifier of the base part in [`PartCatalog::character`].
pub const TORSO: &str = "torso";
pub const DRESS: &str = "dress";
pub const LEG: &str = "leg";
pub const LEFT_HAND: &str = "left_hand";
pub const HAIR: &str = "hair";
pub const EYES: &str = "eyes";
pub const RIGHT_HAND: &str = "right_hand";
pub const FINGERS: &str = "fingers";

/// One recognized part.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    /// Human-facing name shown by tooling.
    pub label: String,
    pub required: bool,
    pub z_order: i32,
    pub default_anchor: RelPoint,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>, z_order: i32) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            required: false,
            z_order,
            default_anchor: RelPoint::CENTER,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn anchor(mut self, anchor: RelPoint) -> Self {
        self.default_anchor = anchor;
        self
    }

    /// The canvas-defining entry: required at z 0.
    pub fn is_base(&self) -> bool {
        self.required && self.z_order == 0
    }
}

/// Validated, immutable lookup table of [`CatalogEntry`] values.
#[derive(Clone, Debug)]
pub struct PartCatalog {
    // Sorted by ascending z-order.
    entries: Vec<CatalogEntry>,
    by_id: BTreeMap<String, usize>,
    base: usize,
}

impl PartCatalog {
    /// Build a catalog, rejecting duplicate ids, duplicate z-orders and anything other than
    /// exactly one base entry.
    pub fn new(entries: impl IntoIterator<Item = CatalogEntry>) -> CutoutResult<Self> {
        let mut entries: Vec<CatalogEntry> = entries.into_iter().collect();
        entries.sort_by_key(|e| e.z_order);

        let mut z_seen = BTreeSet::new();
        let mut by_id = BTreeMap::new();
        for (i, e) in entries.iter().enumerate() {
            if e.id.is_empty() {
                return Err(CutoutError::invalid_spec("catalog entry id must be non-empty"));
            }
            if !e.default_anchor.is_finite() {
                return Err(CutoutError::invalid_spec(format!(
                    "catalog entry '{}' has a non-finite default anchor",
                    e.id
                )));
            }
            if !z_seen.insert(e.z_order) {
                return Err(CutoutError::invalid_spec(format!(
                    "duplicate z-order {} in catalog (entry '{}')",
                    e.z_order, e.id
                )));
            }
            if by_id.insert(e.id.clone(), i).is_some() {
                return Err(CutoutError::invalid_spec(format!(
                    "duplicate catalog id '{}'",
                    e.id
                )));
            }
        }

        let mut bases = entries.iter().enumerate().filter(|(_, e)| e.is_base());
        let base = match (bases.next(), bases.next()) {
            (Some((i, _)), None) => i,
            (None, _) => {
                return Err(CutoutError::invalid_spec(
                    "catalog must contain a required base entry at z-order 0",
                ));
            }
            (Some(_), Some(_)) => unreachable!("z-order uniqueness allows one entry at z 0"),
        };

        Ok(Self {
            entries,
            by_id,
            base,
        })
    }

    /// The eight-part character rig: torso (base), dress, leg, left hand, hair, eyes, right
    /// hand and fingers, back to front.
    pub fn character() -> Self {
        let entries = [
            CatalogEntry::new(TORSO, 0).label("Torso / base body").required(),
            CatalogEntry::new(DRESS, 1).label("Dress"),
            CatalogEntry::new(LEG, 2).label("Leg"),
            CatalogEntry::new(LEFT_HAND, 3)
                .label("Left hand")
                .anchor(RelPoint::new(0.55, 0.40)),
            CatalogEntry::new(HAIR, 4).label("Hair"),
            CatalogEntry::new(EYES, 5).label("Eyes"),
            CatalogEntry::new(RIGHT_HAND, 6).label("Right hand"),
            CatalogEntry::new(FINGERS, 7).label("Fingers"),
        ];
        match Self::new(entries) {
            Ok(c) => c,
            Err(e) => unreachable!("built-in character catalog is valid: {e}"),
        }
    }

    /// `None` when `id` is not a recognized part.
    pub fn lookup(&self, id: &str) -> Option<&CatalogEntry> {
        self.by_id.get(id).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn required_identifiers(&self) -> BTreeSet<&str> {
        self.entries
            .iter()
            .filter(|e| e.required)
            .map(|e| e.id.as_str())
            .collect()
    }

    pub fn base(&self) -> &CatalogEntry {
        &self.entries[self.base]
    }

    /// Entries in ascending z-order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Fail with [`CutoutError::MissingRequiredPart`] naming the first (back-most) required
    /// entry for which `has_image` is false.
    pub fn check_required(&self, has_image: impl Fn(&str) -> bool) -> CutoutResult<()> {
        match self
            .entries
            .iter()
            .find(|e| e.required && !has_image(&e.id))
        {
            Some(missing) => Err(CutoutError::missing_part(missing.id.clone())),
            None => Ok(()),
        }
    }
}

impl Default for PartCatalog {
    fn default() -> Self {
        Self::character()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/catalog.rs"]
mod tests;
