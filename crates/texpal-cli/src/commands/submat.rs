//! Sub-material list editing.
//!
//! Removing or reordering sub-materials changes which cell each slot owns,
//! so the placed faces of every given mesh are moved along with the edit.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use tracing::debug;

use texpal_backend_uv::remap_mesh_slots;
use texpal_spec::{EditMesh, Palette, PaletteEditError, SlotRemap, SubMaterial};

use super::json_output::{error_codes, warning_codes, CommandOutput, JsonWarning};
use super::reporting;
use crate::input::{load_mesh, load_palette, save_mesh, save_palette};

/// A slot-changing edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotEdit {
    Remove,
    MoveUp,
    MoveDown,
}

impl SlotEdit {
    fn name(&self) -> &'static str {
        match self {
            SlotEdit::Remove => "remove",
            SlotEdit::MoveUp => "move-up",
            SlotEdit::MoveDown => "move-down",
        }
    }

    fn apply(&self, palette: &mut Palette, slot: usize) -> Result<SlotRemap, PaletteEditError> {
        match self {
            SlotEdit::Remove => palette.remove_sub_material(slot),
            SlotEdit::MoveUp => palette.move_sub_material_up(slot),
            SlotEdit::MoveDown => palette.move_sub_material_down(slot),
        }
    }
}

/// Appends a sub-material to the palette.
pub fn run_add(palette_path: &str, name: Option<&str>, json_output: bool) -> Result<ExitCode> {
    let mut palette = load_palette(Path::new(palette_path))?;

    let added = match name {
        Some(name) => palette.add_sub_material(SubMaterial::new(name)),
        None => palette.add_default_sub_material(),
    };
    let slot = match added {
        Ok(slot) => slot,
        Err(e) => {
            return reporting::fail_message(
                "submat",
                error_codes::PALETTE_FULL,
                &e.to_string(),
                json_output,
            )
        }
    };
    save_palette(Path::new(palette_path), &palette)?;

    let material = palette.get(slot).map(|m| m.name.as_str()).unwrap_or_default();
    if json_output {
        CommandOutput::success(
            "submat",
            json!({
                "action": "add",
                "slot": slot,
                "name": material,
                "free_slots": palette.free_slots(),
            }),
        )
        .print()?;
    } else {
        println!(
            "{} Added '{}' at slot {} ({} free)",
            "SUCCESS".green().bold(),
            material,
            slot,
            palette.free_slots()
        );
    }
    Ok(ExitCode::SUCCESS)
}

/// Removes or reorders a sub-material and moves mesh faces to match.
///
/// Every mesh is loaded and remapped in memory before anything is written,
/// so a bad mesh file leaves the palette and the other meshes untouched.
pub fn run_edit(
    edit: SlotEdit,
    palette_path: &str,
    slot: usize,
    mesh_paths: &[String],
    json_output: bool,
) -> Result<ExitCode> {
    let mut palette = load_palette(Path::new(palette_path))?;
    let mut meshes = mesh_paths
        .iter()
        .map(|p| load_mesh(Path::new(p)))
        .collect::<Result<Vec<EditMesh>>>()?;

    let remap = match edit.apply(&mut palette, slot) {
        Ok(remap) => remap,
        Err(e) => {
            return reporting::fail_message(
                "submat",
                error_codes::SLOT_OUT_OF_RANGE,
                &e.to_string(),
                json_output,
            )
        }
    };

    let mut warnings = Vec::new();
    let mut mesh_results = Vec::new();
    for (path, mesh) in mesh_paths.iter().zip(meshes.iter_mut()) {
        if mesh.palette.as_deref() != Some(palette.name.as_str()) {
            debug!(mesh = %mesh.name, "mesh does not use this palette; leaving it alone");
            continue;
        }
        let outcome = match remap_mesh_slots(mesh, &remap, &palette.grid) {
            Ok(outcome) => outcome,
            Err(e) => return reporting::fail_backend("submat", &e, json_output),
        };
        if !outcome.orphaned.is_empty() {
            warnings.push(JsonWarning::new(
                warning_codes::ORPHANED_FACES,
                format!(
                    "{} face(s) of mesh '{}' are left in the cell of the removed sub-material",
                    outcome.orphaned.len(),
                    mesh.name
                ),
            ));
        }
        mesh_results.push((path, outcome));
    }

    save_palette(Path::new(palette_path), &palette)?;
    for (path, mesh) in mesh_paths.iter().zip(&meshes) {
        if mesh_results.iter().any(|(p, _)| *p == path) {
            save_mesh(Path::new(path), mesh)?;
        }
    }

    if json_output {
        let meshes_json: Vec<_> = mesh_results
            .iter()
            .map(|(path, outcome)| {
                json!({
                    "path": path,
                    "moved": outcome.moved.len(),
                    "orphaned": outcome.orphaned,
                })
            })
            .collect();
        CommandOutput::success(
            "submat",
            json!({
                "action": edit.name(),
                "slot": slot,
                "sub_materials": palette.len(),
                "meshes": meshes_json,
            }),
        )
        .with_warnings(warnings)
        .print()?;
    } else {
        for (path, outcome) in &mesh_results {
            println!(
                "  {} {}: {} face(s) moved",
                "+".green(),
                path,
                outcome.moved.len()
            );
        }
        for warning in &warnings {
            println!("  {} {}", "!".yellow(), warning.message);
        }
        println!(
            "\n{} {} slot {} ({} sub-material(s) remain)",
            "SUCCESS".green().bold(),
            edit.name(),
            slot,
            palette.len()
        );
    }
    Ok(ExitCode::SUCCESS)
}
