//! Sidecar metadata describing a built palette texture set.
//!
//! The metadata documents the channel layout of each map and the emission
//! reconstruction contract, since neither survives export in the PNGs alone.

use serde::{Deserialize, Serialize};

use crate::config::GridConfig;

/// Formula a consuming shader must use to rebuild emission strength.
pub const EMISSION_CONTRACT: &str = "strength = emissive.a * max_emission";

/// The three generated palette maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteMap {
    /// RGB albedo, A opacity.
    AlbedoAlpha,
    /// RG metallic, BA roughness.
    MetallicRoughness,
    /// RGB emission color, A normalized emission strength.
    EmissivePower,
}

impl PaletteMap {
    /// All maps in output order.
    pub const ALL: [PaletteMap; 3] = [
        PaletteMap::AlbedoAlpha,
        PaletteMap::MetallicRoughness,
        PaletteMap::EmissivePower,
    ];

    /// File name suffix for this map.
    pub fn suffix(&self) -> &'static str {
        match self {
            PaletteMap::AlbedoAlpha => "albedo",
            PaletteMap::MetallicRoughness => "metallic",
            PaletteMap::EmissivePower => "emissive",
        }
    }

    /// Meaning of the R, G, B and A channels.
    pub fn channels(&self) -> [&'static str; 4] {
        match self {
            PaletteMap::AlbedoAlpha => ["albedo.r", "albedo.g", "albedo.b", "alpha"],
            PaletteMap::MetallicRoughness => ["metallic", "metallic", "roughness", "roughness"],
            PaletteMap::EmissivePower => [
                "emissive.r",
                "emissive.g",
                "emissive.b",
                "emission_strength / max_emission",
            ],
        }
    }
}

impl std::fmt::Display for PaletteMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

/// Which texture edge grid row 0 and v = 0 sit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalOrigin {
    /// Row 0 is the bottom scanline of the encoded image.
    Bottom,
    /// Row 0 is the top scanline of the encoded image.
    Top,
}

/// Channel layout of one emitted map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLayout {
    /// Which map.
    pub map: PaletteMap,
    /// File name relative to the metadata file.
    pub file: String,
    /// Channel meanings (R, G, B, A).
    pub channels: Vec<String>,
    /// BLAKE3 hash of the encoded PNG.
    pub hash: String,
}

/// Emission reconstruction contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionContract {
    /// Strength represented by emissive alpha 1.0.
    pub max_emission: f64,
    /// Reconstruction formula.
    pub formula: String,
}

impl EmissionContract {
    /// Contract for the given max emission.
    pub fn new(max_emission: f64) -> Self {
        Self {
            max_emission,
            formula: EMISSION_CONTRACT.to_string(),
        }
    }
}

/// Placement of one occupied cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    /// Sub-material slot.
    pub slot: usize,
    /// Sub-material name.
    pub name: String,
    /// Grid row.
    pub row: u32,
    /// Grid column.
    pub column: u32,
    /// Pixel rect as [x, y, width, height], y measured from the origin edge.
    pub pixel_rect: [u32; 4],
    /// Left edge U coordinate (0-1).
    pub u_min: f64,
    /// Origin-side V coordinate (0-1).
    pub v_min: f64,
    /// Right edge U coordinate (0-1).
    pub u_max: f64,
    /// Far-side V coordinate (0-1).
    pub v_max: f64,
}

/// Metadata written next to the palette textures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteMetadata {
    /// Palette name.
    pub palette: String,
    /// Texture width in pixels.
    pub texture_width: u32,
    /// Texture height in pixels.
    pub texture_height: u32,
    /// Grid the textures were built with.
    pub grid: GridConfig,
    /// Where grid row 0 sits in the encoded image.
    pub vertical_origin: VerticalOrigin,
    /// Emission reconstruction contract.
    pub emission: EmissionContract,
    /// Emitted maps.
    pub maps: Vec<MapLayout>,
    /// Occupied cells in slot order.
    pub cells: Vec<CellRecord>,
}
