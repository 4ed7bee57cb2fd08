//! Error type for the UV backend.

use thiserror::Error;

use texpal_backend_texture::PaletteError;
use texpal_spec::BackendError;

/// Errors from UV assignment, selection and combining.
#[derive(Debug, Error)]
pub enum UvError {
    /// The mesh was never unwrapped.
    #[error("mesh '{mesh}' has no UV layer; unwrap it first")]
    NoUvLayer { mesh: String },

    /// A slot index past the end of the grid.
    #[error("slot {index} is out of range for a grid of {capacity} cell(s)")]
    IndexOutOfRange { index: usize, capacity: usize },

    /// More materials than grid cells.
    #[error("{count} material(s) exceed the grid capacity of {capacity} cell(s)")]
    CapacityExceeded { count: usize, capacity: usize },

    /// A face index past the end of the mesh.
    #[error("face {face} is out of range for a mesh with {face_count} face(s)")]
    FaceOutOfRange { face: usize, face_count: usize },

    /// A face references a material slot the mesh does not have.
    #[error("face {face} uses material slot {slot} but mesh '{mesh}' has {materials} material(s)")]
    InvalidMaterialSlot {
        mesh: String,
        face: usize,
        slot: usize,
        materials: usize,
    },

    /// The UV layer does not line up with the mesh faces or holds bad values.
    #[error("malformed UV layer: {0}")]
    MalformedUvLayer(String),

    #[error(transparent)]
    Texture(#[from] PaletteError),
}

impl BackendError for UvError {
    fn code(&self) -> &'static str {
        match self {
            UvError::NoUvLayer { .. } => "UV_001",
            UvError::IndexOutOfRange { .. } => "UV_002",
            UvError::CapacityExceeded { .. } => "UV_003",
            UvError::FaceOutOfRange { .. } => "UV_004",
            UvError::InvalidMaterialSlot { .. } => "UV_005",
            UvError::MalformedUvLayer(_) => "UV_006",
            UvError::Texture(e) => e.code(),
        }
    }

    fn category(&self) -> &'static str {
        match self {
            UvError::Texture(e) => e.category(),
            UvError::CapacityExceeded { .. } | UvError::IndexOutOfRange { .. } => "palette",
            _ => "mesh",
        }
    }
}
