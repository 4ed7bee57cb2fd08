//! Builds the three palette textures from an ordered sub-material list.

use tracing::debug;

use texpal_spec::{validate_grid, GridConfig, PaletteMap, SubMaterial};

use crate::buffer::TextureBuffer;
use crate::encode::{encode, CellPixels};
use crate::error::PaletteError;
use crate::grid::{cell_address, cell_pixel_rect};

/// The three generated maps, all `texture_width x texture_height`.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteTextureSet {
    pub albedo_alpha: TextureBuffer,
    pub metallic_roughness: TextureBuffer,
    pub emissive_power: TextureBuffer,
}

impl PaletteTextureSet {
    fn filled(width: u32, height: u32, pixels: &CellPixels) -> Self {
        Self {
            albedo_alpha: TextureBuffer::new(width, height, pixels.albedo_alpha),
            metallic_roughness: TextureBuffer::new(width, height, pixels.metallic_roughness),
            emissive_power: TextureBuffer::new(width, height, pixels.emissive_power),
        }
    }

    /// Buffer for one map.
    pub fn map(&self, map: PaletteMap) -> &TextureBuffer {
        match map {
            PaletteMap::AlbedoAlpha => &self.albedo_alpha,
            PaletteMap::MetallicRoughness => &self.metallic_roughness,
            PaletteMap::EmissivePower => &self.emissive_power,
        }
    }

    fn map_mut(&mut self, map: PaletteMap) -> &mut TextureBuffer {
        match map {
            PaletteMap::AlbedoAlpha => &mut self.albedo_alpha,
            PaletteMap::MetallicRoughness => &mut self.metallic_roughness,
            PaletteMap::EmissivePower => &mut self.emissive_power,
        }
    }

    /// Texture size as (width, height).
    pub fn size(&self) -> (u32, u32) {
        (self.albedo_alpha.width, self.albedo_alpha.height)
    }
}

/// Rejects an invalid grid with every validation message joined.
pub fn ensure_valid_grid(grid: &GridConfig) -> Result<(), PaletteError> {
    let result = validate_grid(grid);
    if result.is_ok() {
        return Ok(());
    }
    let messages: Vec<String> = result.errors.iter().map(|e| e.to_string()).collect();
    Err(PaletteError::InvalidConfig(messages.join("; ")))
}

/// Builds all three palette maps.
///
/// Every cell is written: occupied cells with their sub-material, the rest
/// with [`CellPixels::INERT`]. Fails before allocating anything when the
/// grid is invalid or the list does not fit, so callers never see a
/// partially filled set.
pub fn build_palette_textures(
    materials: &[SubMaterial],
    grid: &GridConfig,
) -> Result<PaletteTextureSet, PaletteError> {
    ensure_valid_grid(grid)?;

    let capacity = grid.capacity();
    if materials.len() > capacity {
        return Err(PaletteError::CapacityExceeded {
            count: materials.len(),
            capacity,
        });
    }

    let (width, height) = grid.texture_size();
    debug!(
        width,
        height,
        materials = materials.len(),
        capacity,
        "building palette textures"
    );

    let mut set = PaletteTextureSet::filled(width, height, &CellPixels::INERT);
    for (slot, material) in materials.iter().enumerate() {
        let rect = cell_pixel_rect(cell_address(slot, grid)?, grid);
        let pixels = encode(material, grid.max_emission);
        for map in PaletteMap::ALL {
            set.map_mut(map)
                .fill_rect(rect.x, rect.y, rect.width, rect.height, pixels.get(map));
        }
    }

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_cells_written_in_slot_order() {
        let grid = GridConfig::new(2, 2, 2);
        let materials = vec![
            SubMaterial::new("red").with_albedo(1.0, 0.0, 0.0),
            SubMaterial::new("green").with_albedo(0.0, 1.0, 0.0),
            SubMaterial::new("blue").with_albedo(0.0, 0.0, 1.0),
        ];
        let set = build_palette_textures(&materials, &grid).unwrap();
        let albedo = &set.albedo_alpha;
        assert_eq!(albedo.get(0, 0), Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(albedo.get(3, 1), Color::rgb(0.0, 1.0, 0.0));
        assert_eq!(albedo.get(1, 2), Color::rgb(0.0, 0.0, 1.0));
        assert_eq!(albedo.get(3, 3), CellPixels::INERT.albedo_alpha);
        assert_eq!(set.metallic_roughness.get(2, 2), CellPixels::INERT.metallic_roughness);
    }

    #[test]
    fn test_full_grid_has_no_inert_cells() {
        let grid = GridConfig::new(1, 2, 1);
        let materials = vec![SubMaterial::new("a"), SubMaterial::new("b")];
        let set = build_palette_textures(&materials, &grid).unwrap();
        assert!(set.albedo_alpha.data.iter().all(|c| *c == Color::white()));
    }

    #[test]
    fn test_capacity_checked_before_build() {
        let grid = GridConfig::new(1, 1, 4);
        let materials = vec![SubMaterial::new("a"), SubMaterial::new("b")];
        let err = build_palette_textures(&materials, &grid).unwrap_err();
        assert!(matches!(
            err,
            PaletteError::CapacityExceeded { count: 2, capacity: 1 }
        ));
    }

    #[test]
    fn test_invalid_grid_rejected() {
        let grid = GridConfig::new(0, 4, 4);
        let err = build_palette_textures(&[], &grid).unwrap_err();
        assert!(matches!(err, PaletteError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_palette_is_all_inert() {
        let set = build_palette_textures(&[], &GridConfig::default()).unwrap();
        assert_eq!(set.size(), (16, 16));
        assert!(set
            .emissive_power
            .data
            .iter()
            .all(|c| *c == CellPixels::INERT.emissive_power));
    }
}
