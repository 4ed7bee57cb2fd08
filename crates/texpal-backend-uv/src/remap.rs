//! Keeps placed faces in step with sub-material list edits.
//!
//! Removing or reordering sub-materials changes which slot owns which cell.
//! Every normalized face sitting in a cell whose slot moved is translated to
//! the slot's new cell. Faces whose slot was removed have nowhere to go; they
//! stay where they are and are reported.

use tracing::{debug, warn};

use texpal_backend_texture::ensure_valid_grid;
use texpal_spec::{GridConfig, SlotChange, SlotRemap};

use crate::error::UvError;
use crate::mapper::target_rect;
use crate::mesh::UvMesh;
use crate::selector::face_slot;

/// A face moved from one slot's cell to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceMove {
    pub face: usize,
    pub from: usize,
    pub to: usize,
}

/// What a remap pass did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemapOutcome {
    pub moved: Vec<FaceMove>,
    /// Faces left in the cell of a removed sub-material.
    pub orphaned: Vec<usize>,
}

/// Applies a slot remap to every normalized face of the mesh.
///
/// Meshes without a UV layer have nothing placed and are left alone.
pub fn remap_mesh_slots<M: UvMesh + ?Sized>(
    mesh: &mut M,
    remap: &SlotRemap,
    grid: &GridConfig,
) -> Result<RemapOutcome, UvError> {
    let mut outcome = RemapOutcome::default();
    if remap.is_identity() || mesh.uv_face_count().is_none() {
        return Ok(outcome);
    }
    ensure_valid_grid(grid)?;

    let mut plan = Vec::new();
    for face in 0..mesh.face_count() {
        if !mesh.is_normalized(face) {
            continue;
        }
        let Some(from) = face_slot(mesh, face, grid) else {
            continue;
        };
        match remap.change(from) {
            SlotChange::Unchanged => {}
            SlotChange::Moved(to) => {
                let delta = {
                    let old = target_rect(from, grid)?;
                    let new = target_rect(to, grid)?;
                    [new.u_min - old.u_min, new.v_min - old.v_min]
                };
                plan.push((FaceMove { face, from, to }, delta));
            }
            SlotChange::Removed => outcome.orphaned.push(face),
        }
    }

    for (face_move, delta) in &plan {
        if let Some(uvs) = mesh.face_uvs_mut(face_move.face) {
            for uv in uvs.iter_mut() {
                uv[0] += delta[0];
                uv[1] += delta[1];
            }
        }
    }
    outcome.moved = plan.into_iter().map(|(m, _)| m).collect();

    if !outcome.orphaned.is_empty() {
        warn!(
            mesh = mesh.name(),
            faces = outcome.orphaned.len(),
            "faces left in the cell of a removed sub-material"
        );
    }
    debug!(moved = outcome.moved.len(), "remapped face slots");
    Ok(outcome)
}
