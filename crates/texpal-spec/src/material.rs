//! Sub-material parameter records.

use serde::{Deserialize, Serialize};

/// One logical material packed into a single palette cell.
///
/// The slot index is not stored: it is the record's position in the owning
/// [`Palette`](crate::palette::Palette).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubMaterial {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Base color as [r, g, b, a]; alpha is opacity.
    #[serde(default = "default_albedo")]
    pub albedo: [f64; 4],
    /// Metallic PBR parameter (0-1).
    #[serde(default)]
    pub metallic: f64,
    /// Roughness PBR parameter (0-1).
    #[serde(default = "default_roughness")]
    pub roughness: f64,
    /// Emission color as [r, g, b].
    #[serde(default)]
    pub emissive: [f64; 3],
    /// Emission strength (>= 0, unbounded).
    #[serde(default = "default_emission_strength")]
    pub emission_strength: f64,
}

fn default_albedo() -> [f64; 4] {
    [1.0, 1.0, 1.0, 1.0]
}

fn default_roughness() -> f64 {
    0.5
}

fn default_emission_strength() -> f64 {
    1.0
}

impl Default for SubMaterial {
    fn default() -> Self {
        Self {
            name: String::new(),
            albedo: default_albedo(),
            metallic: 0.0,
            roughness: default_roughness(),
            emissive: [0.0; 3],
            emission_strength: default_emission_strength(),
        }
    }
}

impl SubMaterial {
    /// Creates a sub-material with default parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the RGB albedo, keeping the current alpha.
    pub fn with_albedo(mut self, r: f64, g: f64, b: f64) -> Self {
        self.albedo = [r, g, b, self.albedo[3]];
        self
    }

    /// Sets the alpha (opacity).
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.albedo[3] = alpha;
        self
    }

    /// Sets the metallic parameter.
    pub fn with_metallic(mut self, metallic: f64) -> Self {
        self.metallic = metallic;
        self
    }

    /// Sets the roughness parameter.
    pub fn with_roughness(mut self, roughness: f64) -> Self {
        self.roughness = roughness;
        self
    }

    /// Sets emission color and strength.
    pub fn with_emission(mut self, color: [f64; 3], strength: f64) -> Self {
        self.emissive = color;
        self.emission_strength = strength;
        self
    }

    /// Returns true if this material emits any light.
    pub fn is_emissive(&self) -> bool {
        self.emission_strength > 0.0 && self.emissive.iter().any(|&c| c > 0.0)
    }
}
