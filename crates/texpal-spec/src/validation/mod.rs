//! Palette and mesh document validation.
//!
//! Validation collects every problem it finds instead of stopping at the first
//! one, so a single `validate` run reports all errors with JSON paths.

pub mod common;

use std::collections::HashSet;

use crate::config::{GridConfig, MAX_CELL_SIZE, MAX_GRID_DIMENSION, MAX_TEXTURE_DIMENSION};
use crate::error::{
    ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
use crate::material::SubMaterial;
use crate::mesh::EditMesh;
use crate::palette::Palette;

use common::{validate_count, validate_non_negative, validate_positive, validate_unit_interval};

/// Validates a grid configuration.
pub fn validate_grid(grid: &GridConfig) -> ValidationResult {
    let mut result = ValidationResult::success();

    for (name, value) in [("num_rows", grid.num_rows), ("num_columns", grid.num_columns)] {
        if let Err(e) = validate_count(name, value, 1, MAX_GRID_DIMENSION) {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidGridDimensions,
                e.message,
                format!("grid.{}", name),
            ));
        }
    }

    if let Err(e) = validate_count("cell_size", grid.cell_size, 1, MAX_CELL_SIZE) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidCellSize,
            e.message,
            "grid.cell_size",
        ));
    }

    let (width, height) = (
        grid.num_columns as u64 * grid.cell_size as u64,
        grid.num_rows as u64 * grid.cell_size as u64,
    );
    if result.is_ok()
        && (width > MAX_TEXTURE_DIMENSION as u64 || height > MAX_TEXTURE_DIMENSION as u64)
    {
        result.add_error(ValidationError::with_path(
            ErrorCode::TextureTooLarge,
            format!(
                "texture would be {}x{}, max is {}x{}",
                width, height, MAX_TEXTURE_DIMENSION, MAX_TEXTURE_DIMENSION
            ),
            "grid",
        ));
    }

    if let Err(e) = validate_positive("max_emission", grid.max_emission) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidMaxEmission,
            e.message,
            "grid.max_emission",
        ));
    }

    if !grid.uv_margin.is_finite() || !(0.0..1.0).contains(&grid.uv_margin) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidUvMargin,
            format!("uv_margin must be in [0, 1), got {}", grid.uv_margin),
            "grid.uv_margin",
        ));
    }

    result
}

/// Validates one sub-material's parameters.
pub fn validate_sub_material(
    slot: usize,
    material: &SubMaterial,
    grid: &GridConfig,
    result: &mut ValidationResult,
) {
    let base = format!("sub_materials[{}]", slot);

    for (i, c) in material.albedo.iter().enumerate() {
        if let Err(e) = validate_unit_interval(&format!("albedo[{}]", i), *c) {
            result.add_error(ValidationError::with_path(
                ErrorCode::ColorOutOfRange,
                e.message,
                format!("{}.albedo[{}]", base, i),
            ));
        }
    }

    for (i, c) in material.emissive.iter().enumerate() {
        if let Err(e) = validate_unit_interval(&format!("emissive[{}]", i), *c) {
            result.add_error(ValidationError::with_path(
                ErrorCode::ColorOutOfRange,
                e.message,
                format!("{}.emissive[{}]", base, i),
            ));
        }
    }

    for (name, value) in [("metallic", material.metallic), ("roughness", material.roughness)] {
        if let Err(e) = validate_unit_interval(name, value) {
            result.add_error(ValidationError::with_path(
                ErrorCode::ParameterOutOfRange,
                e.message,
                format!("{}.{}", base, name),
            ));
        }
    }

    match validate_non_negative("emission_strength", material.emission_strength) {
        Err(e) => result.add_error(ValidationError::with_path(
            ErrorCode::InvalidEmissionStrength,
            e.message,
            format!("{}.emission_strength", base),
        )),
        Ok(()) => {
            if grid.max_emission > 0.0
                && material.is_emissive()
                && material.emission_strength > grid.max_emission
            {
                result.add_warning(ValidationWarning::with_path(
                    WarningCode::EmissionClamped,
                    format!(
                        "emission_strength {} exceeds max_emission {} and will be clamped",
                        material.emission_strength, grid.max_emission
                    ),
                    format!("{}.emission_strength", base),
                ));
            }
        }
    }
}

/// Validates a palette document: grid, capacity and every sub-material.
pub fn validate_palette(palette: &Palette) -> ValidationResult {
    let mut result = validate_grid(&palette.grid);

    let capacity = palette.grid.capacity();
    if palette.len() > capacity {
        result.add_error(ValidationError::with_path(
            ErrorCode::CapacityExceeded,
            format!(
                "palette has {} sub-material(s) but the grid only has {} cell(s)",
                palette.len(),
                capacity
            ),
            "sub_materials",
        ));
    }

    if palette.is_empty() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::EmptyPalette,
            "palette has no sub-materials; every cell will be inert",
            "sub_materials",
        ));
    }

    let mut seen = HashSet::new();
    for (slot, material) in palette.sub_materials.iter().enumerate() {
        validate_sub_material(slot, material, &palette.grid, &mut result);
        if !material.name.is_empty() && !seen.insert(material.name.as_str()) {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::DuplicateSubMaterialName,
                format!("sub-material name '{}' is used more than once", material.name),
                format!("sub_materials[{}].name", slot),
            ));
        }
    }

    result
}

/// Validates a mesh document's internal consistency.
pub fn validate_mesh(mesh: &EditMesh) -> ValidationResult {
    let mut result = ValidationResult::success();

    if !mesh.materials.is_empty() {
        for (i, face) in mesh.faces.iter().enumerate() {
            if face.material_slot >= mesh.materials.len() {
                result.add_error(ValidationError::with_path(
                    ErrorCode::MaterialSlotOutOfRange,
                    format!(
                        "face uses material slot {} but mesh has {} material(s)",
                        face.material_slot,
                        mesh.materials.len()
                    ),
                    format!("faces[{}].material_slot", i),
                ));
            }
        }
    }

    let Some(layer) = &mesh.uv_layer else {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::MissingUvLayer,
            format!("mesh '{}' has no UV layer; unwrap it before assigning", mesh.name),
            "uv_layer",
        ));
        return result;
    };

    if layer.faces.len() != mesh.faces.len() {
        result.add_error(ValidationError::with_path(
            ErrorCode::UvLayerFaceMismatch,
            format!(
                "UV layer has {} face(s) but mesh has {}",
                layer.faces.len(),
                mesh.faces.len()
            ),
            "uv_layer.faces",
        ));
    }

    for (i, face) in layer.faces.iter().enumerate() {
        if face.uvs.is_empty() {
            result.add_error(ValidationError::with_path(
                ErrorCode::EmptyFaceUvs,
                "face has no UV coordinates",
                format!("uv_layer.faces[{}].uvs", i),
            ));
        }
        if face.uvs.iter().flatten().any(|c| !c.is_finite()) {
            result.add_error(ValidationError::with_path(
                ErrorCode::NonFiniteUv,
                "face has a non-finite UV coordinate",
                format!("uv_layer.faces[{}].uvs", i),
            ));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{FaceUv, UvLayer};

    fn codes(result: &ValidationResult) -> Vec<ErrorCode> {
        result.errors.iter().map(|e| e.code).collect()
    }

    #[test]
    fn test_default_grid_is_valid() {
        assert!(validate_grid(&GridConfig::default()).is_ok());
    }

    #[test]
    fn test_grid_errors_collected() {
        let grid = GridConfig {
            num_columns: 0,
            num_rows: 65,
            cell_size: 0,
            max_emission: 0.0,
            uv_margin: 1.0,
        };
        let result = validate_grid(&grid);
        assert_eq!(
            codes(&result),
            vec![
                ErrorCode::InvalidGridDimensions,
                ErrorCode::InvalidGridDimensions,
                ErrorCode::InvalidCellSize,
                ErrorCode::InvalidMaxEmission,
                ErrorCode::InvalidUvMargin,
            ]
        );
    }

    #[test]
    fn test_texture_too_large() {
        let result = validate_grid(&GridConfig::new(8, 8, 1024));
        assert_eq!(codes(&result), vec![ErrorCode::TextureTooLarge]);
        assert!(validate_grid(&GridConfig::new(4, 4, 1024)).is_ok());
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut palette = Palette::new("p", GridConfig::new(1, 1, 4));
        palette.sub_materials.push(SubMaterial::new("a"));
        palette.sub_materials.push(SubMaterial::new("b"));
        let result = validate_palette(&palette);
        assert_eq!(codes(&result), vec![ErrorCode::CapacityExceeded]);
    }

    #[test]
    fn test_sub_material_ranges() {
        let mut palette = Palette::new("p", GridConfig::default());
        palette.sub_materials.push(SubMaterial {
            name: "bad".into(),
            albedo: [1.2, 0.0, 0.0, 1.0],
            metallic: -0.5,
            roughness: 0.5,
            emissive: [0.0; 3],
            emission_strength: -1.0,
        });
        let result = validate_palette(&palette);
        assert_eq!(
            codes(&result),
            vec![
                ErrorCode::ColorOutOfRange,
                ErrorCode::ParameterOutOfRange,
                ErrorCode::InvalidEmissionStrength,
            ]
        );
        assert_eq!(
            result.errors[1].path.as_deref(),
            Some("sub_materials[0].metallic")
        );
    }

    #[test]
    fn test_emission_clamp_warning() {
        let mut palette = Palette::new("p", GridConfig::default().with_max_emission(2.0));
        palette
            .add_sub_material(SubMaterial::new("lamp").with_emission([1.0, 1.0, 1.0], 8.0))
            .unwrap();
        let result = validate_palette(&palette);
        assert!(result.is_ok());
        assert_eq!(result.warnings[0].code, WarningCode::EmissionClamped);
    }

    #[test]
    fn test_duplicate_names_warn() {
        let mut palette = Palette::new("p", GridConfig::default());
        palette.add_sub_material(SubMaterial::new("x")).unwrap();
        palette.add_sub_material(SubMaterial::new("x")).unwrap();
        let result = validate_palette(&palette);
        assert!(result.is_ok());
        assert_eq!(result.warnings[0].code, WarningCode::DuplicateSubMaterialName);
    }

    #[test]
    fn test_mesh_without_uv_layer_warns() {
        let mut mesh = EditMesh::new("raw");
        mesh.faces.push(crate::mesh::MeshFace {
            material_slot: 0,
            selected: false,
        });
        let result = validate_mesh(&mesh);
        assert!(result.is_ok());
        assert_eq!(result.warnings[0].code, WarningCode::MissingUvLayer);
    }

    #[test]
    fn test_mesh_layer_mismatch_and_bad_uvs() {
        let mut mesh = EditMesh::new("broken");
        mesh.push_face(0, vec![[0.0, f64::NAN]]);
        mesh.push_face(0, vec![]);
        mesh.uv_layer = Some(UvLayer::new(vec![
            FaceUv::new(vec![[0.0, f64::NAN]]),
        ]));
        let result = validate_mesh(&mesh);
        assert_eq!(
            codes(&result),
            vec![ErrorCode::UvLayerFaceMismatch, ErrorCode::NonFiniteUv]
        );
    }

    #[test]
    fn test_material_slot_out_of_range() {
        let mut mesh = EditMesh::new("m");
        mesh.materials.push(SubMaterial::new("only"));
        mesh.push_face(1, vec![[0.0, 0.0]]);
        let result = validate_mesh(&mesh);
        assert_eq!(codes(&result), vec![ErrorCode::MaterialSlotOutOfRange]);
    }
}
