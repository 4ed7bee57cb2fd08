//! Texpal Palette Documents
//!
//! This crate provides the serializable documents shared by the texpal
//! backends and CLI, plus their validation and hashing.
//!
//! # Overview
//!
//! - **Palette**: a [`GridConfig`] plus an ordered list of [`SubMaterial`]s.
//!   A sub-material's slot is its list position; slot `i` occupies grid cell
//!   `(i / num_columns, i % num_columns)`.
//! - **EditMesh**: the subset of a host mesh the palette engine touches:
//!   per-face material slot and selection, the active UV layer, and the
//!   per-face "normalized" flag.
//! - **PaletteMetadata**: the sidecar written next to built textures.
//!
//! # Example
//!
//! ```
//! use texpal_spec::{GridConfig, Palette, SubMaterial};
//! use texpal_spec::validation::validate_palette;
//!
//! let mut palette = Palette::new("props", GridConfig::new(2, 2, 64).with_max_emission(2.0));
//! palette.add_sub_material(SubMaterial::new("paint").with_albedo(0.8, 0.1, 0.1)).unwrap();
//! palette
//!     .add_sub_material(SubMaterial::new("lamp").with_emission([1.0, 0.9, 0.6], 1.0))
//!     .unwrap();
//!
//! assert!(validate_palette(&palette).is_ok());
//! assert_eq!(palette.free_slots(), 2);
//! ```

pub mod config;
pub mod error;
pub mod hash;
pub mod material;
pub mod mesh;
pub mod metadata;
pub mod palette;
pub mod report;
pub mod validation;

pub use config::{GridConfig, MAX_CELL_SIZE, MAX_GRID_DIMENSION, MAX_TEXTURE_DIMENSION};
pub use error::{
    BackendError, ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use hash::{blake3_hash, canonical_palette_hash};
pub use material::SubMaterial;
pub use mesh::{EditMesh, FaceUv, MeshFace, Uv, UvLayer};
pub use metadata::{
    CellRecord, EmissionContract, MapLayout, PaletteMap, PaletteMetadata, VerticalOrigin,
    EMISSION_CONTRACT,
};
pub use palette::{Palette, PaletteEditError, SlotChange, SlotRemap, PALETTE_VERSION};
pub use report::{OutputKind, OutputResult, Report, ReportBuilder, ReportError, ReportWarning};
pub use validation::{validate_grid, validate_mesh, validate_palette};
