//! Texpal UV Backend
//!
//! Places mesh faces into palette grid cells and finds them again.
//!
//! - [`assign_faces`] / [`assign_selected`]: scale never-placed faces into a
//!   cell, or translate already placed faces from their cell to another.
//! - [`select_faces`] / [`select_cell`]: faces whose UV centroid lies in a cell.
//! - [`remap_mesh_slots`]: follow sub-material removals and reorders.
//! - [`combine_meshes`]: merge several meshes' materials into one palette.
//!
//! Host meshes are reached through the [`UvMesh`] trait.
//!
//! # Example
//!
//! ```
//! use texpal_backend_uv::{assign_faces, select_faces};
//! use texpal_spec::{EditMesh, GridConfig};
//!
//! let grid = GridConfig::new(2, 2, 64);
//! let mut mesh = EditMesh::new("crate");
//! let face = mesh.push_face(0, vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
//!
//! assign_faces(&mut mesh, &[face], 2, &grid).unwrap();
//! assert_eq!(select_faces(&mesh, 2, &grid).unwrap(), vec![face]);
//! ```

pub mod combine;
pub mod error;
pub mod mapper;
pub mod mesh;
pub mod remap;
pub mod selector;

pub use combine::{combine_meshes, CombineResult, CombinedMaterial};
pub use error::UvError;
pub use mapper::{assign_faces, assign_selected, AssignOutcome};
pub use mesh::{require_uv_layer, UvMesh};
pub use remap::{remap_mesh_slots, FaceMove, RemapOutcome};
pub use selector::{apply_selection, face_slot, select_cell, select_faces};
