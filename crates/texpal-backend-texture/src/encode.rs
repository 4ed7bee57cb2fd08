//! Per-cell channel encoding.
//!
//! Each sub-material becomes one flat color per map:
//!
//! | Map                | R          | G          | B          | A                              |
//! |--------------------|------------|------------|------------|--------------------------------|
//! | albedo_alpha       | albedo.r   | albedo.g   | albedo.b   | alpha                          |
//! | metallic_roughness | metallic   | metallic   | roughness  | roughness                      |
//! | emissive_power     | emissive.r | emissive.g | emissive.b | strength / max_emission, [0,1] |

use texpal_spec::{PaletteMap, SubMaterial};

use crate::color::Color;

/// The three colors written into one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPixels {
    pub albedo_alpha: Color,
    pub metallic_roughness: Color,
    pub emissive_power: Color,
}

impl CellPixels {
    /// Fill for cells with no sub-material: black opaque albedo, dielectric
    /// fully rough surface, no emission.
    pub const INERT: CellPixels = CellPixels {
        albedo_alpha: Color::rgba(0.0, 0.0, 0.0, 1.0),
        metallic_roughness: Color::rgba(0.0, 0.0, 1.0, 1.0),
        emissive_power: Color::rgba(0.0, 0.0, 0.0, 1.0),
    };

    /// Color for one map.
    pub fn get(&self, map: PaletteMap) -> Color {
        match map {
            PaletteMap::AlbedoAlpha => self.albedo_alpha,
            PaletteMap::MetallicRoughness => self.metallic_roughness,
            PaletteMap::EmissivePower => self.emissive_power,
        }
    }
}

/// Normalized emission power stored in the emissive alpha channel.
///
/// Strengths above `max_emission` saturate at 1.0; shaders reconstruct
/// `strength = alpha * max_emission`.
pub fn emission_alpha(strength: f64, max_emission: f64) -> f64 {
    if max_emission <= 0.0 {
        return if strength > 0.0 { 1.0 } else { 0.0 };
    }
    (strength / max_emission).clamp(0.0, 1.0)
}

/// Encodes one sub-material into its three cell colors.
pub fn encode(material: &SubMaterial, max_emission: f64) -> CellPixels {
    let [r, g, b, a] = material.albedo;
    let m = material.metallic;
    let rough = material.roughness;
    let [er, eg, eb] = material.emissive;

    CellPixels {
        albedo_alpha: Color::rgba(r, g, b, a),
        metallic_roughness: Color::rgba(m, m, rough, rough),
        emissive_power: Color::rgba(
            er,
            eg,
            eb,
            emission_alpha(material.emission_strength, max_emission),
        ),
    }
}
