//! Texpal Palette Texture Backend
//!
//! Turns an ordered list of sub-materials into three deterministic PBR
//! palette maps plus a metadata sidecar.
//!
//! # Maps
//!
//! - **albedo_alpha**: RGB albedo, A opacity
//! - **metallic_roughness**: RG metallic, BA roughness
//! - **emissive_power**: RGB emission color, A `strength / max_emission`
//!
//! Sub-material slot `i` fills grid cell `(i / num_columns, i % num_columns)`.
//! Row 0 is the bottom of the texture, matching v = 0 in UV space.
//!
//! # Example
//!
//! ```
//! use texpal_backend_texture::builder::build_palette_textures;
//! use texpal_backend_texture::grid::{cell_address, cell_pixel_rect};
//! use texpal_spec::{GridConfig, SubMaterial};
//!
//! let grid = GridConfig::new(2, 2, 64).with_max_emission(2.0);
//! let materials = vec![
//!     SubMaterial::new("a"),
//!     SubMaterial::new("b"),
//!     SubMaterial::new("c"),
//!     SubMaterial::new("lamp").with_emission([1.0, 1.0, 1.0], 1.0),
//! ];
//!
//! let set = build_palette_textures(&materials, &grid).unwrap();
//! let rect = cell_pixel_rect(cell_address(3, &grid).unwrap(), &grid);
//! assert_eq!(rect.to_array(), [64, 64, 64, 64]);
//! assert_eq!(set.emissive_power.get(100, 100).a, 0.5);
//! ```

pub mod buffer;
pub mod builder;
pub mod color;
pub mod encode;
pub mod error;
pub mod grid;
pub mod output;
pub mod png;

pub use buffer::TextureBuffer;
pub use builder::{build_palette_textures, ensure_valid_grid, PaletteTextureSet};
pub use color::Color;
pub use encode::{encode, CellPixels};
pub use error::PaletteError;
pub use grid::{cell_address, cell_from_uv, cell_pixel_rect, cell_uv_rect, CellAddress, UvRect};
pub use output::{encode_palette, save_palette_output, PaletteOutput, SavedPalette};
