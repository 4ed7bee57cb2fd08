//! Build command implementation
//!
//! Validates a palette, builds its three textures and the metadata sidecar,
//! and writes a report with every output's hash.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use texpal_backend_texture::{encode_palette, save_palette_output};
use texpal_spec::{validate_palette, BackendError, OutputKind, OutputResult, ReportError};

use super::json_output::CommandOutput;
use super::reporting;
use crate::input::{load_palette, parent_dir};

/// Run the build command
///
/// # Arguments
/// * `palette_path` - Path to the palette JSON file
/// * `out_dir` - Output directory (default: the palette file's directory)
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 on success, 1 if the palette is invalid or the build failed
pub fn run(palette_path: &str, out_dir: Option<&str>, json_output: bool) -> Result<ExitCode> {
    let start = Instant::now();
    if !json_output {
        println!("{} {}", "Building:".cyan().bold(), palette_path);
    }

    let palette = load_palette(Path::new(palette_path))?;
    let out_dir = out_dir
        .map(PathBuf::from)
        .unwrap_or_else(|| parent_dir(Path::new(palette_path)));
    let report_path = reporting::report_path(&out_dir, &palette.name);

    let validation = validate_palette(&palette);
    let builder = reporting::report_builder("build", &palette)
        .validation(&validation.errors, &validation.warnings);
    if !validation.is_ok() {
        let report = builder
            .duration_ms(start.elapsed().as_millis() as u64)
            .build();
        reporting::write_report(&report, &report_path)?;
        return reporting::fail_validation("build", &validation, json_output);
    }

    let saved = encode_palette(&palette).and_then(|output| {
        let saved = save_palette_output(&output, &out_dir)?;
        Ok((output, saved))
    });
    let (output, saved) = match saved {
        Ok(pair) => pair,
        Err(e) => {
            let report = builder
                .error(ReportError::new(e.code(), e.message()))
                .duration_ms(start.elapsed().as_millis() as u64)
                .build();
            reporting::write_report(&report, &report_path)?;
            return reporting::fail_backend("build", &e, json_output);
        }
    };

    let metadata_hash = reporting::file_hash(&saved.metadata)?;
    let mut builder = builder;
    let mut textures = Vec::new();
    for map in &output.maps {
        let path = saved
            .maps
            .get(&map.map)
            .cloned()
            .unwrap_or_else(|| out_dir.join(&map.file_name));
        builder = builder.output(OutputResult::new(OutputKind::Texture, &path, &map.hash));
        textures.push((map.map, path, map.hash.clone()));
    }
    builder = builder.output(OutputResult::new(
        OutputKind::Metadata,
        &saved.metadata,
        &metadata_hash,
    ));

    let duration_ms = start.elapsed().as_millis() as u64;
    let report = builder.duration_ms(duration_ms).build();
    reporting::write_report(&report, &report_path)?;

    let (width, height) = palette.grid.texture_size();
    if json_output {
        let maps: BTreeMap<String, serde_json::Value> = textures
            .iter()
            .map(|(map, path, hash)| (map.suffix().to_string(), json!({ "path": path, "hash": hash })))
            .collect();
        CommandOutput::success(
            "build",
            json!({
                "palette": palette.name,
                "texture_width": width,
                "texture_height": height,
                "sub_materials": palette.len(),
                "maps": maps,
                "metadata_path": saved.metadata,
                "report_path": report_path,
                "palette_hash": report.palette_hash,
            }),
        )
        .with_warnings(reporting::validation_warnings_json(&validation))
        .print()?;
    } else {
        reporting::print_validation_results(&validation);
        for (map, path, hash) in &textures {
            println!(
                "  {} {:<9} {} {}",
                "+".green(),
                map.suffix(),
                path.display(),
                hash[..16].dimmed()
            );
        }
        println!("  {} metadata  {}", "+".green(), saved.metadata.display());
        println!("{} {}", "Report:".dimmed(), report_path.display());
        println!(
            "\n{} Built {} sub-material(s) into {}x{} textures ({}ms)",
            "SUCCESS".green().bold(),
            palette.len(),
            width,
            height,
            duration_ms
        );
    }

    Ok(ExitCode::SUCCESS)
}
