//! The mesh contract the palette engine needs from its host.
//!
//! A host editor exposes per-face UVs, the per-face normalized flag and the
//! selection state through [`UvMesh`]. [`EditMesh`] implements it for the
//! JSON mesh documents used by the CLI.

use texpal_spec::{EditMesh, Uv};

use crate::error::UvError;

/// Per-face access to a host mesh's active UV layer and selection.
pub trait UvMesh {
    /// Mesh name, for error messages.
    fn name(&self) -> &str;

    /// Number of faces.
    fn face_count(&self) -> usize;

    /// Number of faces in the active UV layer, or `None` without one.
    fn uv_face_count(&self) -> Option<usize>;

    /// UV coordinates of one face, in corner order.
    fn face_uvs(&self, face: usize) -> Option<&[Uv]>;

    /// Mutable UV coordinates of one face.
    fn face_uvs_mut(&mut self, face: usize) -> Option<&mut [Uv]>;

    /// Whether the face's UVs were already scaled into a single cell.
    fn is_normalized(&self, face: usize) -> bool;

    fn set_normalized(&mut self, face: usize, normalized: bool);

    fn is_selected(&self, face: usize) -> bool;

    fn set_selected(&mut self, face: usize, selected: bool);

    /// Indices of selected faces, ascending.
    fn selected_faces(&self) -> Vec<usize> {
        (0..self.face_count())
            .filter(|&f| self.is_selected(f))
            .collect()
    }
}

/// Fails unless the mesh has a UV layer with one entry per face.
pub fn require_uv_layer<M: UvMesh + ?Sized>(mesh: &M) -> Result<(), UvError> {
    match mesh.uv_face_count() {
        None => Err(UvError::NoUvLayer {
            mesh: mesh.name().to_string(),
        }),
        Some(n) if n != mesh.face_count() => Err(UvError::MalformedUvLayer(format!(
            "mesh '{}' has {} face(s) but its UV layer has {}",
            mesh.name(),
            mesh.face_count(),
            n
        ))),
        Some(_) => Ok(()),
    }
}

impl UvMesh for EditMesh {
    fn name(&self) -> &str {
        &self.name
    }

    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn uv_face_count(&self) -> Option<usize> {
        self.uv_layer.as_ref().map(|layer| layer.faces.len())
    }

    fn face_uvs(&self, face: usize) -> Option<&[Uv]> {
        self.uv_layer
            .as_ref()
            .and_then(|layer| layer.faces.get(face))
            .map(|f| f.uvs.as_slice())
    }

    fn face_uvs_mut(&mut self, face: usize) -> Option<&mut [Uv]> {
        self.uv_layer
            .as_mut()
            .and_then(|layer| layer.faces.get_mut(face))
            .map(|f| f.uvs.as_mut_slice())
    }

    fn is_normalized(&self, face: usize) -> bool {
        self.uv_layer
            .as_ref()
            .and_then(|layer| layer.faces.get(face))
            .is_some_and(|f| f.normalized)
    }

    fn set_normalized(&mut self, face: usize, normalized: bool) {
        if let Some(f) = self
            .uv_layer
            .as_mut()
            .and_then(|layer| layer.faces.get_mut(face))
        {
            f.normalized = normalized;
        }
    }

    fn is_selected(&self, face: usize) -> bool {
        self.faces.get(face).is_some_and(|f| f.selected)
    }

    fn set_selected(&mut self, face: usize, selected: bool) {
        if let Some(f) = self.faces.get_mut(face) {
            f.selected = selected;
        }
    }
}
