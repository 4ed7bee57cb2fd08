//! Grid configuration for palette textures.
//!
//! A palette is a uniform grid of square cells. Each sub-material occupies
//! exactly one cell, addressed in row-major order from slot 0.

use serde::{Deserialize, Serialize};

/// Largest supported row or column count.
pub const MAX_GRID_DIMENSION: u32 = 64;

/// Largest supported cell size in pixels.
pub const MAX_CELL_SIZE: u32 = 1024;

/// Largest supported texture edge in pixels.
pub const MAX_TEXTURE_DIMENSION: u32 = 4096;

/// Grid layout shared by the palette textures and UV space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    /// Number of cell columns in the texture.
    #[serde(default = "default_dimension")]
    pub num_columns: u32,
    /// Number of cell rows in the texture.
    #[serde(default = "default_dimension")]
    pub num_rows: u32,
    /// Edge length of one square cell, in pixels.
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,
    /// Emission strength stored as alpha 1.0 in the emissive map.
    #[serde(default = "default_max_emission")]
    pub max_emission: f64,
    /// Fraction of a cell left empty around a first-time UV assignment.
    #[serde(default)]
    pub uv_margin: f64,
}

fn default_dimension() -> u32 {
    4
}

fn default_cell_size() -> u32 {
    4
}

fn default_max_emission() -> f64 {
    1.0
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            num_columns: default_dimension(),
            num_rows: default_dimension(),
            cell_size: default_cell_size(),
            max_emission: default_max_emission(),
            uv_margin: 0.0,
        }
    }
}

impl GridConfig {
    /// Creates a grid with the given layout and default emission/margin.
    pub fn new(num_rows: u32, num_columns: u32, cell_size: u32) -> Self {
        Self {
            num_columns,
            num_rows,
            cell_size,
            ..Self::default()
        }
    }

    /// Sets the max emission strength.
    pub fn with_max_emission(mut self, max_emission: f64) -> Self {
        self.max_emission = max_emission;
        self
    }

    /// Sets the first-assignment UV margin.
    pub fn with_uv_margin(mut self, uv_margin: f64) -> Self {
        self.uv_margin = uv_margin;
        self
    }

    /// Number of cells, i.e. the maximum number of sub-materials.
    pub fn capacity(&self) -> usize {
        self.num_rows as usize * self.num_columns as usize
    }

    /// Texture width in pixels.
    pub fn texture_width(&self) -> u32 {
        self.num_columns * self.cell_size
    }

    /// Texture height in pixels.
    pub fn texture_height(&self) -> u32 {
        self.num_rows * self.cell_size
    }

    /// Texture size as (width, height).
    pub fn texture_size(&self) -> (u32, u32) {
        (self.texture_width(), self.texture_height())
    }
}
