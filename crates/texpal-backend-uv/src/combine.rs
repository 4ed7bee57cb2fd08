//! Merges the materials of several meshes into one shared palette.
//!
//! The whole operation works on copies: capacity, UV layers and material
//! slots are checked first, then the copies are re-laid out and the palette
//! textures built. The caller commits the returned meshes only on success.

use std::collections::BTreeMap;

use tracing::{debug, info_span, warn};

use texpal_backend_texture::{build_palette_textures, ensure_valid_grid, PaletteTextureSet};
use texpal_spec::{EditMesh, GridConfig, Palette};

use crate::error::UvError;
use crate::mapper::assign_faces;
use crate::mesh::{require_uv_layer, UvMesh};

/// The shared palette plus where every source material and face ended up.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedMaterial {
    pub palette: Palette,
    /// `(mesh index, original material slot) -> palette slot`.
    pub slot_remap: BTreeMap<(usize, usize), usize>,
    /// `(mesh index, face index) -> palette slot`.
    pub face_slots: BTreeMap<(usize, usize), usize>,
}

/// Result of [`combine_meshes`].
#[derive(Debug, Clone)]
pub struct CombineResult {
    pub combined: CombinedMaterial,
    /// All input meshes in input order; processed ones are rewritten.
    pub meshes: Vec<EditMesh>,
    /// Indices of processed meshes.
    pub processed: Vec<usize>,
    /// Indices of meshes skipped because they already use a palette or
    /// have no materials.
    pub skipped: Vec<usize>,
    pub textures: PaletteTextureSet,
}

fn check_mesh(mesh: &EditMesh) -> Result<(), UvError> {
    if !mesh.faces.is_empty() {
        require_uv_layer(mesh)?;
    }
    for (face, f) in mesh.faces.iter().enumerate() {
        if f.material_slot >= mesh.materials.len() {
            return Err(UvError::InvalidMaterialSlot {
                mesh: mesh.name.clone(),
                face,
                slot: f.material_slot,
                materials: mesh.materials.len(),
            });
        }
    }
    Ok(())
}

/// Combines `meshes` into a palette named `palette_name`.
///
/// Meshes that already use a palette are skipped, so running combine again
/// over its own output changes nothing. Each remaining mesh contributes its
/// materials in slot order. Afterwards every face of a processed mesh uses
/// material slot 0 (the shared palette material) and selects its
/// sub-material through its UVs.
pub fn combine_meshes(
    meshes: &[EditMesh],
    grid: &GridConfig,
    palette_name: &str,
) -> Result<CombineResult, UvError> {
    let _span = info_span!("combine", palette = palette_name).entered();
    ensure_valid_grid(grid)?;

    let mut processed = Vec::new();
    let mut skipped = Vec::new();
    for (index, mesh) in meshes.iter().enumerate() {
        if mesh.has_palette_assignment() {
            debug!(mesh = %mesh.name, "already uses a palette; skipping");
            skipped.push(index);
        } else if mesh.materials.is_empty() {
            warn!(mesh = %mesh.name, "mesh has no materials; skipping");
            skipped.push(index);
        } else {
            processed.push(index);
        }
    }

    let count: usize = processed.iter().map(|&i| meshes[i].materials.len()).sum();
    let capacity = grid.capacity();
    if count > capacity {
        return Err(UvError::CapacityExceeded { count, capacity });
    }
    for &index in &processed {
        check_mesh(&meshes[index])?;
    }

    let mut palette = Palette::new(palette_name, *grid);
    let mut slot_remap = BTreeMap::new();
    for &index in &processed {
        for (original, material) in meshes[index].materials.iter().enumerate() {
            slot_remap.insert((index, original), palette.sub_materials.len());
            palette.sub_materials.push(material.clone());
        }
    }

    let mut out = meshes.to_vec();
    let mut face_slots = BTreeMap::new();
    for &index in &processed {
        let mesh = &mut out[index];

        let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (face, f) in mesh.faces.iter().enumerate() {
            let slot = slot_remap[&(index, f.material_slot)];
            groups.entry(slot).or_default().push(face);
            face_slots.insert((index, face), slot);
        }

        // UVs of a mesh that never used a palette are not cell-placed yet.
        for face in 0..mesh.face_count() {
            mesh.set_normalized(face, false);
        }
        for (slot, faces) in &groups {
            assign_faces(mesh, faces, *slot, grid)?;
        }

        for f in &mut mesh.faces {
            f.material_slot = 0;
        }
        mesh.materials.clear();
        mesh.palette = Some(palette_name.to_string());
        debug!(mesh = %mesh.name, faces = mesh.faces.len(), "re-laid out mesh");
    }

    let textures = build_palette_textures(&palette.sub_materials, grid)?;

    Ok(CombineResult {
        combined: CombinedMaterial {
            palette,
            slot_remap,
            face_slots,
        },
        meshes: out,
        processed,
        skipped,
        textures,
    })
}
