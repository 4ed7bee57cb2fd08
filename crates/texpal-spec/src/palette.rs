//! Palette document: a grid configuration plus an ordered sub-material list.
//!
//! Slot indices are list positions. Every edit that changes positions returns
//! a [`SlotRemap`] that must be applied to any mesh whose faces were assigned
//! to the old slots.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GridConfig;
use crate::error::SpecError;
use crate::material::SubMaterial;

/// Current palette document version.
pub const PALETTE_VERSION: u32 = 1;

/// Errors from editing a palette's sub-material list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteEditError {
    /// The grid has no free cell for another sub-material.
    #[error("palette is full: grid has {capacity} cell(s)")]
    CapacityExceeded { capacity: usize },

    /// The slot index does not name an existing sub-material.
    #[error("slot {index} out of range (palette has {len} sub-material(s))")]
    IndexOutOfRange { index: usize, len: usize },
}

/// What happened to one old slot after a list edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotChange {
    /// The slot still holds the same sub-material.
    Unchanged,
    /// The sub-material now lives at a different slot.
    Moved(usize),
    /// The sub-material was removed.
    Removed,
}

/// Mapping from old slot indices to their new location after an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRemap {
    targets: Vec<Option<usize>>,
}

impl SlotRemap {
    /// A remap that leaves every slot in place.
    pub fn identity(len: usize) -> Self {
        Self {
            targets: (0..len).map(Some).collect(),
        }
    }

    /// Builds a remap from explicit per-slot targets.
    pub fn from_targets(targets: Vec<Option<usize>>) -> Self {
        Self { targets }
    }

    /// Returns what happened to `old_slot`.
    ///
    /// Slots past the end of the old list were empty cells and stay unchanged.
    pub fn change(&self, old_slot: usize) -> SlotChange {
        match self.targets.get(old_slot) {
            None => SlotChange::Unchanged,
            Some(None) => SlotChange::Removed,
            Some(Some(new_slot)) if *new_slot == old_slot => SlotChange::Unchanged,
            Some(Some(new_slot)) => SlotChange::Moved(*new_slot),
        }
    }

    /// True when no slot moved or was removed.
    pub fn is_identity(&self) -> bool {
        self.targets
            .iter()
            .enumerate()
            .all(|(old, new)| *new == Some(old))
    }
}

/// A palette material: grid layout plus ordered sub-materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Palette {
    /// Document version.
    #[serde(default = "default_version")]
    pub palette_version: u32,
    /// Palette name, used as the base name for generated textures.
    pub name: String,
    /// Grid layout.
    #[serde(default)]
    pub grid: GridConfig,
    /// Sub-materials in slot order.
    #[serde(default)]
    pub sub_materials: Vec<SubMaterial>,
}

fn default_version() -> u32 {
    PALETTE_VERSION
}

impl Palette {
    /// Creates an empty palette.
    pub fn new(name: impl Into<String>, grid: GridConfig) -> Self {
        Self {
            palette_version: PALETTE_VERSION,
            name: name.into(),
            grid,
            sub_materials: Vec::new(),
        }
    }

    /// Parses a palette from JSON.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Converts to a JSON value (for canonical hashing).
    pub fn to_value(&self) -> Result<serde_json::Value, SpecError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Number of sub-materials.
    pub fn len(&self) -> usize {
        self.sub_materials.len()
    }

    /// True when there are no sub-materials.
    pub fn is_empty(&self) -> bool {
        self.sub_materials.is_empty()
    }

    /// Number of free cells left in the grid.
    pub fn free_slots(&self) -> usize {
        self.grid.capacity().saturating_sub(self.len())
    }

    /// Returns the sub-material at `slot`.
    pub fn get(&self, slot: usize) -> Option<&SubMaterial> {
        self.sub_materials.get(slot)
    }

    /// Appends a sub-material and returns its slot.
    pub fn add_sub_material(&mut self, material: SubMaterial) -> Result<usize, PaletteEditError> {
        let capacity = self.grid.capacity();
        if self.len() >= capacity {
            return Err(PaletteEditError::CapacityExceeded { capacity });
        }
        self.sub_materials.push(material);
        Ok(self.len() - 1)
    }

    /// Appends a default sub-material named "Mat N".
    pub fn add_default_sub_material(&mut self) -> Result<usize, PaletteEditError> {
        let name = format!("Mat {}", self.len());
        self.add_sub_material(SubMaterial::new(name))
    }

    /// Removes the sub-material at `slot`; later slots shift down by one.
    pub fn remove_sub_material(&mut self, slot: usize) -> Result<SlotRemap, PaletteEditError> {
        self.check_index(slot)?;
        let len = self.len();
        self.sub_materials.remove(slot);

        let targets = (0..len)
            .map(|old| match old.cmp(&slot) {
                std::cmp::Ordering::Less => Some(old),
                std::cmp::Ordering::Equal => None,
                std::cmp::Ordering::Greater => Some(old - 1),
            })
            .collect();
        Ok(SlotRemap::from_targets(targets))
    }

    /// Swaps the sub-material at `slot` with the one before it.
    ///
    /// Moving slot 0 up is a no-op.
    pub fn move_sub_material_up(&mut self, slot: usize) -> Result<SlotRemap, PaletteEditError> {
        self.check_index(slot)?;
        if slot == 0 {
            return Ok(SlotRemap::identity(self.len()));
        }
        Ok(self.swap(slot, slot - 1))
    }

    /// Swaps the sub-material at `slot` with the one after it.
    ///
    /// Moving the last slot down is a no-op.
    pub fn move_sub_material_down(&mut self, slot: usize) -> Result<SlotRemap, PaletteEditError> {
        self.check_index(slot)?;
        if slot + 1 >= self.len() {
            return Ok(SlotRemap::identity(self.len()));
        }
        Ok(self.swap(slot, slot + 1))
    }

    fn swap(&mut self, a: usize, b: usize) -> SlotRemap {
        self.sub_materials.swap(a, b);
        let mut targets: Vec<Option<usize>> = (0..self.len()).map(Some).collect();
        targets[a] = Some(b);
        targets[b] = Some(a);
        SlotRemap::from_targets(targets)
    }

    fn check_index(&self, slot: usize) -> Result<(), PaletteEditError> {
        if slot >= self.len() {
            return Err(PaletteEditError::IndexOutOfRange {
                index: slot,
                len: self.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn palette_with(names: &[&str]) -> Palette {
        let mut palette = Palette::new("test", GridConfig::default());
        for name in names {
            palette.add_sub_material(SubMaterial::new(*name)).unwrap();
        }
        palette
    }

    fn names(palette: &Palette) -> Vec<&str> {
        palette.sub_materials.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_add_default_names() {
        let mut palette = Palette::new("test", GridConfig::default());
        assert_eq!(palette.add_default_sub_material().unwrap(), 0);
        assert_eq!(palette.add_default_sub_material().unwrap(), 1);
        assert_eq!(names(&palette), vec!["Mat 0", "Mat 1"]);
    }

    #[test]
    fn test_add_rejects_when_full() {
        let mut palette = Palette::new("tiny", GridConfig::new(1, 2, 4));
        palette.add_default_sub_material().unwrap();
        palette.add_default_sub_material().unwrap();
        assert_eq!(palette.free_slots(), 0);
        assert_eq!(
            palette.add_default_sub_material(),
            Err(PaletteEditError::CapacityExceeded { capacity: 2 })
        );
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn test_remove_shifts_later_slots() {
        let mut palette = palette_with(&["a", "b", "c", "d"]);
        let remap = palette.remove_sub_material(1).unwrap();

        assert_eq!(names(&palette), vec!["a", "c", "d"]);
        assert_eq!(remap.change(0), SlotChange::Unchanged);
        assert_eq!(remap.change(1), SlotChange::Removed);
        assert_eq!(remap.change(2), SlotChange::Moved(1));
        assert_eq!(remap.change(3), SlotChange::Moved(2));
        assert_eq!(remap.change(9), SlotChange::Unchanged);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut palette = palette_with(&["a"]);
        assert_eq!(
            palette.remove_sub_material(3),
            Err(PaletteEditError::IndexOutOfRange { index: 3, len: 1 })
        );
    }

    #[test]
    fn test_move_up_and_down() {
        let mut palette = palette_with(&["a", "b", "c"]);

        let remap = palette.move_sub_material_up(2).unwrap();
        assert_eq!(names(&palette), vec!["a", "c", "b"]);
        assert_eq!(remap.change(2), SlotChange::Moved(1));
        assert_eq!(remap.change(1), SlotChange::Moved(2));
        assert_eq!(remap.change(0), SlotChange::Unchanged);

        let remap = palette.move_sub_material_down(0).unwrap();
        assert_eq!(names(&palette), vec!["c", "a", "b"]);
        assert_eq!(remap.change(0), SlotChange::Moved(1));
    }

    #[test]
    fn test_move_at_edges_is_identity() {
        let mut palette = palette_with(&["a", "b"]);
        assert!(palette.move_sub_material_up(0).unwrap().is_identity());
        assert!(palette.move_sub_material_down(1).unwrap().is_identity());
        assert_eq!(names(&palette), vec!["a", "b"]);
    }

    #[test]
    fn test_json_round_trip() {
        let palette = palette_with(&["grass", "stone"]);
        let json = palette.to_json_pretty().unwrap();
        let parsed = Palette::from_json(&json).unwrap();
        assert_eq!(palette, parsed);
    }

    #[test]
    fn test_minimal_json() {
        let palette = Palette::from_json(r#"{"name": "props"}"#).unwrap();
        assert_eq!(palette.palette_version, PALETTE_VERSION);
        assert_eq!(palette.grid, GridConfig::default());
        assert!(palette.is_empty());
    }
}
