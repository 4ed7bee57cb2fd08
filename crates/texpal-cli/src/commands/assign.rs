//! Assign command implementation
//!
//! Moves mesh faces into the UV cell of one sub-material and writes the mesh
//! back.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use texpal_backend_uv::{assign_faces, assign_selected};

use super::json_output::{warning_codes, CommandOutput, JsonWarning};
use super::reporting;
use crate::input::{load_mesh, load_palette, save_mesh};

/// Run the assign command
///
/// # Arguments
/// * `palette_path` - Path to the palette JSON file
/// * `mesh_path` - Path to the mesh JSON file
/// * `slot` - Target sub-material slot
/// * `faces` - Faces to assign, or `None` for the mesh's selection
/// * `output` - Where to write the mesh (default: overwrite `mesh_path`)
/// * `json_output` - Whether to output machine-readable JSON diagnostics
pub fn run(
    palette_path: &str,
    mesh_path: &str,
    slot: usize,
    faces: Option<&[usize]>,
    output: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    if !json_output {
        println!(
            "{} {} -> slot {}",
            "Assigning:".cyan().bold(),
            mesh_path,
            slot
        );
    }

    let palette = load_palette(Path::new(palette_path))?;
    let mut mesh = load_mesh(Path::new(mesh_path))?;
    if let Some(code) = reporting::check_slot("assign", &palette, slot, json_output)? {
        return Ok(code);
    }

    let result = match faces {
        Some(faces) => assign_faces(&mut mesh, faces, slot, &palette.grid),
        None => assign_selected(&mut mesh, slot, &palette.grid),
    };
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => return reporting::fail_backend("assign", &e, json_output),
    };

    if outcome.is_empty() && faces.is_none() {
        let message = format!("No selected faces found in mesh '{}'", mesh.name);
        if json_output {
            CommandOutput::success("assign", json!({ "mesh": mesh.name, "slot": slot, "moved": 0 }))
                .with_warnings(vec![JsonWarning::new(
                    warning_codes::NO_SELECTED_FACES,
                    message,
                )])
                .print()?;
        } else {
            println!("{} {}", "WARNING".yellow().bold(), message);
        }
        return Ok(ExitCode::SUCCESS);
    }

    if mesh.palette.is_none() {
        mesh.palette = Some(palette.name.clone());
    }
    let out_path = output.unwrap_or(mesh_path);
    save_mesh(Path::new(out_path), &mesh)?;

    let material = palette.get(slot).map(|m| m.name.as_str()).unwrap_or_default();
    if json_output {
        CommandOutput::success(
            "assign",
            json!({
                "mesh": mesh.name,
                "slot": slot,
                "sub_material": material,
                "normalized": outcome.normalized,
                "translated": outcome.translated,
                "skipped": outcome.skipped,
                "scale": outcome.scale,
                "output_path": out_path,
            }),
        )
        .print()?;
    } else {
        if !outcome.skipped.is_empty() {
            println!(
                "  {} {} face(s) have no UVs and were left alone",
                "!".yellow(),
                outcome.skipped.len()
            );
        }
        println!(
            "\n{} Moved {} face(s) into '{}' ({} first-time, {} translated)",
            "SUCCESS".green().bold(),
            outcome.moved_count(),
            material,
            outcome.normalized.len(),
            outcome.translated.len()
        );
        println!("{} {}", "Wrote:".dimmed(), out_path);
    }

    Ok(ExitCode::SUCCESS)
}
