//! Finds the faces that occupy a palette cell.
//!
//! A face belongs to the cell containing the centroid of its UVs, so a face
//! straddling a boundary belongs to exactly one cell.

use tracing::debug;

use texpal_backend_texture::ensure_valid_grid;
use texpal_backend_texture::grid::slot_from_uv;
use texpal_spec::mesh::centroid;
use texpal_spec::GridConfig;

use crate::error::UvError;
use crate::mapper::target_rect;
use crate::mesh::{require_uv_layer, UvMesh};

/// Slot whose cell holds a face, or `None` for a face without UVs.
pub fn face_slot<M: UvMesh + ?Sized>(mesh: &M, face: usize, grid: &GridConfig) -> Option<usize> {
    mesh.face_uvs(face)
        .and_then(centroid)
        .and_then(|c| slot_from_uv(c, grid))
}

/// Faces whose UV centroid lies in the cell of `slot`, ascending.
pub fn select_faces<M: UvMesh + ?Sized>(
    mesh: &M,
    slot: usize,
    grid: &GridConfig,
) -> Result<Vec<usize>, UvError> {
    ensure_valid_grid(grid)?;
    require_uv_layer(mesh)?;
    target_rect(slot, grid)?;

    let faces: Vec<usize> = (0..mesh.face_count())
        .filter(|&face| face_slot(mesh, face, grid) == Some(slot))
        .collect();
    debug!(slot, faces = faces.len(), "selected faces by cell");
    Ok(faces)
}

/// Makes `faces` the mesh selection, deselecting every other face.
pub fn apply_selection<M: UvMesh + ?Sized>(mesh: &mut M, faces: &[usize]) {
    for face in 0..mesh.face_count() {
        mesh.set_selected(face, false);
    }
    for &face in faces {
        mesh.set_selected(face, true);
    }
}

/// Selects exactly the faces in the cell of `slot` and returns them.
pub fn select_cell<M: UvMesh + ?Sized>(
    mesh: &mut M,
    slot: usize,
    grid: &GridConfig,
) -> Result<Vec<usize>, UvError> {
    let faces = select_faces(mesh, slot, grid)?;
    apply_selection(mesh, &faces);
    Ok(faces)
}
