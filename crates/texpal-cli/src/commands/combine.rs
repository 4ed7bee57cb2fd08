//! Combine command implementation
//!
//! Merges the materials of several mesh documents into one new palette, then
//! writes the palette, its textures and the re-laid-out meshes.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;

use texpal_backend_texture::output::{encode_texture_set, map_file_name, metadata_file_name};
use texpal_backend_texture::png::PngConfig;
use texpal_backend_texture::save_palette_output;
use texpal_backend_uv::combine_meshes;
use texpal_spec::{EditMesh, GridConfig, OutputKind, OutputResult, PaletteMap, ReportWarning};

use super::json_output::{error_codes, warning_codes, CommandOutput, JsonWarning};
use super::reporting;
use crate::input::{load_mesh, save_mesh, save_palette};

fn skipped_message(mesh: &EditMesh) -> String {
    if mesh.has_palette_assignment() {
        format!("mesh '{}' already uses a palette and was skipped", mesh.name)
    } else {
        format!("mesh '{}' has no materials and was skipped", mesh.name)
    }
}

/// Where each processed mesh is written: its input file name inside `out_dir`.
fn mesh_output_paths(
    mesh_paths: &[String],
    processed: &[usize],
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    processed
        .iter()
        .map(|&index| {
            let file_name = Path::new(&mesh_paths[index])
                .file_name()
                .with_context(|| format!("Mesh path has no file name: {}", mesh_paths[index]))?;
            Ok(out_dir.join(file_name))
        })
        .collect()
}

/// Files the palette side of a combine writes into `out_dir`.
fn palette_output_paths(out_dir: &Path, name: &str) -> Vec<PathBuf> {
    let mut paths = vec![
        out_dir.join(format!("{}.json", name)),
        out_dir.join(metadata_file_name(name)),
        reporting::report_path(out_dir, name),
    ];
    paths.extend(PaletteMap::ALL.iter().map(|&m| out_dir.join(map_file_name(name, m))));
    paths
}

/// First mesh output that collides with another output.
fn first_collision<'a>(mesh_outputs: &'a [PathBuf], reserved: &[PathBuf]) -> Option<&'a Path> {
    let mut seen: BTreeSet<&Path> = reserved.iter().map(PathBuf::as_path).collect();
    mesh_outputs
        .iter()
        .map(PathBuf::as_path)
        .find(|path| !seen.insert(*path))
}

/// Run the combine command
///
/// # Arguments
/// * `mesh_paths` - Mesh JSON files, in the order their materials are added
/// * `name` - Name of the new palette
/// * `grid` - Grid layout of the new palette
/// * `out_dir` - Directory receiving `<name>.json`, the textures and the meshes
/// * `json_output` - Whether to output machine-readable JSON diagnostics
pub fn run(
    mesh_paths: &[String],
    name: &str,
    grid: GridConfig,
    out_dir: &str,
    json_output: bool,
) -> Result<ExitCode> {
    let start = Instant::now();
    if !json_output {
        println!(
            "{} {} mesh(es) into '{}'",
            "Combining:".cyan().bold(),
            mesh_paths.len(),
            name
        );
    }

    let meshes = mesh_paths
        .iter()
        .map(|p| load_mesh(Path::new(p)))
        .collect::<Result<Vec<EditMesh>>>()?;

    let result = match combine_meshes(&meshes, &grid, name) {
        Ok(result) => result,
        Err(e) => return reporting::fail_backend("combine", &e, json_output),
    };
    let palette = &result.combined.palette;

    let out_dir = PathBuf::from(out_dir);
    let mesh_targets = mesh_output_paths(mesh_paths, &result.processed, &out_dir)?;
    if let Some(path) = first_collision(&mesh_targets, &palette_output_paths(&out_dir, name)) {
        let message = format!(
            "more than one output would be written to {}; give the meshes distinct file names",
            path.display()
        );
        return reporting::fail_message(
            "combine",
            error_codes::DUPLICATE_OUTPUT,
            &message,
            json_output,
        );
    }

    let saved = encode_texture_set(
        &result.textures,
        name,
        &palette.sub_materials,
        &palette.grid,
        name,
        &PngConfig::default(),
    )
    .and_then(|output| {
        let saved = save_palette_output(&output, &out_dir)?;
        Ok((output, saved))
    });
    let (output, saved) = match saved {
        Ok(pair) => pair,
        Err(e) => return reporting::fail_backend("combine", &e, json_output),
    };

    let palette_path = out_dir.join(format!("{}.json", name));
    save_palette(&palette_path, palette)?;

    let mut builder = reporting::report_builder("combine", palette).output(OutputResult::new(
        OutputKind::Palette,
        &palette_path,
        reporting::file_hash(&palette_path)?,
    ));
    for map in &output.maps {
        let path = saved
            .maps
            .get(&map.map)
            .cloned()
            .unwrap_or_else(|| out_dir.join(&map.file_name));
        builder = builder.output(OutputResult::new(OutputKind::Texture, path, &map.hash));
    }
    builder = builder.output(OutputResult::new(
        OutputKind::Metadata,
        &saved.metadata,
        reporting::file_hash(&saved.metadata)?,
    ));

    let mut mesh_outputs = Vec::new();
    for (&index, path) in result.processed.iter().zip(mesh_targets) {
        save_mesh(&path, &result.meshes[index])?;
        builder = builder.output(OutputResult::new(
            OutputKind::Mesh,
            &path,
            reporting::file_hash(&path)?,
        ));
        mesh_outputs.push(path);
    }
    for &index in &result.skipped {
        builder = builder.warning(ReportWarning::new(
            warning_codes::SKIPPED_MESH,
            skipped_message(&meshes[index]),
        ));
    }

    let duration_ms = start.elapsed().as_millis() as u64;
    let report = builder.duration_ms(duration_ms).build();
    let report_path = reporting::report_path(&out_dir, name);
    reporting::write_report(&report, &report_path)?;

    let skipped: Vec<&str> = result
        .skipped
        .iter()
        .map(|&i| mesh_paths[i].as_str())
        .collect();
    let skipped_warnings: Vec<JsonWarning> = result
        .skipped
        .iter()
        .map(|&i| JsonWarning::new(warning_codes::SKIPPED_MESH, skipped_message(&meshes[i])))
        .collect();
    if json_output {
        let slot_remap: Vec<_> = result
            .combined
            .slot_remap
            .iter()
            .map(|(&(mesh, original), &slot)| {
                json!({ "mesh": mesh_paths[mesh], "material_slot": original, "slot": slot })
            })
            .collect();
        CommandOutput::success(
            "combine",
            json!({
                "palette": name,
                "palette_path": palette_path,
                "sub_materials": palette.len(),
                "slot_remap": slot_remap,
                "meshes": mesh_outputs,
                "skipped": skipped,
                "report_path": report_path,
            }),
        )
        .with_warnings(skipped_warnings)
        .print()?;
    } else {
        for path in &skipped {
            println!("  {} skipped {}", "!".yellow(), path);
        }
        for path in &mesh_outputs {
            println!("  {} {}", "+".green(), path.display());
        }
        println!("  {} {}", "+".green(), palette_path.display());
        println!(
            "\n{} Combined {} material(s) from {} mesh(es) ({}ms)",
            "SUCCESS".green().bold(),
            palette.len(),
            result.processed.len(),
            duration_ms
        );
    }

    Ok(ExitCode::SUCCESS)
}

