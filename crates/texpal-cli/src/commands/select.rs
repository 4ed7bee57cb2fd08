//! Select command implementation

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use texpal_backend_uv::select_cell;

use super::json_output::CommandOutput;
use super::reporting;
use crate::input::{load_mesh, load_palette, save_mesh};

/// Run the select command
///
/// Replaces the mesh selection with the faces whose UVs sit in the cell of
/// `slot`, then writes the mesh to `output` (or back to `mesh_path`).
pub fn run(
    palette_path: &str,
    mesh_path: &str,
    slot: usize,
    output: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    let palette = load_palette(Path::new(palette_path))?;
    let mut mesh = load_mesh(Path::new(mesh_path))?;
    if let Some(code) = reporting::check_slot("select", &palette, slot, json_output)? {
        return Ok(code);
    }

    let faces = match select_cell(&mut mesh, slot, &palette.grid) {
        Ok(faces) => faces,
        Err(e) => return reporting::fail_backend("select", &e, json_output),
    };

    let out_path = output.unwrap_or(mesh_path);
    save_mesh(Path::new(out_path), &mesh)?;

    if json_output {
        CommandOutput::success(
            "select",
            json!({
                "mesh": mesh.name,
                "slot": slot,
                "faces": faces,
                "output_path": out_path,
            }),
        )
        .print()?;
    } else {
        println!(
            "{} Selected {} face(s) of '{}' in slot {}",
            "SUCCESS".green().bold(),
            faces.len(),
            mesh.name,
            slot
        );
    }

    Ok(ExitCode::SUCCESS)
}
