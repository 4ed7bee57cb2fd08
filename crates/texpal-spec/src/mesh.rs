//! Mesh documents exchanged with the host editor.
//!
//! The host owns faces, materials and UVs. This document carries only what the
//! palette engine reads and writes: per-face material slot and selection, the
//! active UV layer, and the per-face "normalized" flag.

use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::material::SubMaterial;

/// A 2D UV coordinate as [u, v].
pub type Uv = [f64; 2];

/// UV state of one face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceUv {
    /// One UV coordinate per face corner (loop), in winding order.
    pub uvs: Vec<Uv>,
    /// True once these UVs have been scaled into a single palette cell.
    #[serde(default)]
    pub normalized: bool,
}

impl FaceUv {
    /// Creates face UVs that have not been placed in a cell yet.
    pub fn new(uvs: Vec<Uv>) -> Self {
        Self {
            uvs,
            normalized: false,
        }
    }

    /// Mean of this face's UV coordinates, or `None` for a face without UVs.
    pub fn centroid(&self) -> Option<Uv> {
        centroid(&self.uvs)
    }
}

/// Mean of a set of UV coordinates, or `None` when there are none.
pub fn centroid(uvs: &[Uv]) -> Option<Uv> {
    if uvs.is_empty() {
        return None;
    }
    let n = uvs.len() as f64;
    let (su, sv) = uvs
        .iter()
        .fold((0.0, 0.0), |(su, sv), uv| (su + uv[0], sv + uv[1]));
    Some([su / n, sv / n])
}

/// The active UV layer of a mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UvLayer {
    /// Layer name.
    #[serde(default = "default_layer_name")]
    pub name: String,
    /// Per-face UV state, parallel to [`EditMesh::faces`].
    pub faces: Vec<FaceUv>,
}

fn default_layer_name() -> String {
    "UVMap".to_string()
}

impl UvLayer {
    /// Creates a layer from per-face UVs.
    pub fn new(faces: Vec<FaceUv>) -> Self {
        Self {
            name: default_layer_name(),
            faces,
        }
    }
}

/// Per-face mesh state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshFace {
    /// Index into [`EditMesh::materials`].
    #[serde(default)]
    pub material_slot: usize,
    /// Whether the face is selected in the editor.
    #[serde(default)]
    pub selected: bool,
}

/// A mesh as seen by the palette engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditMesh {
    /// Mesh (object) name.
    pub name: String,
    /// The mesh's own material slots.
    #[serde(default)]
    pub materials: Vec<SubMaterial>,
    /// Faces.
    #[serde(default)]
    pub faces: Vec<MeshFace>,
    /// Active UV layer; `None` when the mesh was never unwrapped.
    #[serde(default)]
    pub uv_layer: Option<UvLayer>,
    /// Name of the palette this mesh's UVs are laid out for, once it uses a
    /// grid-based assignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<String>,
}

impl EditMesh {
    /// Creates an empty mesh.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            materials: Vec::new(),
            faces: Vec::new(),
            uv_layer: None,
            palette: None,
        }
    }

    /// Parses a mesh from JSON.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// True when the mesh already uses a grid-based palette assignment.
    pub fn has_palette_assignment(&self) -> bool {
        self.palette.is_some()
    }

    /// Indices of currently selected faces, ascending.
    pub fn selected_faces(&self) -> Vec<usize> {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.selected)
            .map(|(i, _)| i)
            .collect()
    }

    /// Appends a face with its UVs.
    ///
    /// Creates the UV layer on first use.
    pub fn push_face(&mut self, material_slot: usize, uvs: Vec<Uv>) -> usize {
        self.faces.push(MeshFace {
            material_slot,
            selected: false,
        });
        self.uv_layer
            .get_or_insert_with(|| UvLayer::new(Vec::new()))
            .faces
            .push(FaceUv::new(uvs));
        self.faces.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centroid() {
        let face = FaceUv::new(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        assert_eq!(face.centroid(), Some([0.5, 0.5]));
        assert_eq!(FaceUv::new(vec![]).centroid(), None);
    }

    #[test]
    fn test_push_face_creates_layer() {
        let mut mesh = EditMesh::new("cube");
        assert!(mesh.uv_layer.is_none());
        mesh.push_face(0, vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
        mesh.push_face(1, vec![[0.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.uv_layer.as_ref().unwrap().faces.len(), 2);
    }

    #[test]
    fn test_selected_faces() {
        let mut mesh = EditMesh::new("quad");
        for _ in 0..4 {
            mesh.push_face(0, vec![[0.0, 0.0]]);
        }
        mesh.faces[1].selected = true;
        mesh.faces[3].selected = true;
        assert_eq!(mesh.selected_faces(), vec![1, 3]);
    }

    #[test]
    fn test_json_without_uv_layer() {
        let mesh = EditMesh::from_json(
            r#"{"name": "raw", "faces": [{"material_slot": 0}, {"material_slot": 0}]}"#,
        )
        .unwrap();
        assert_eq!(mesh.face_count(), 2);
        assert!(mesh.uv_layer.is_none());
        assert!(!mesh.has_palette_assignment());
    }
}
