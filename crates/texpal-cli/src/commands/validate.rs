//! Validate command implementation
//!
//! Validates a palette document, and optionally mesh documents, and writes a
//! report next to the palette.

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use texpal_spec::{validate_mesh, validate_palette, ValidationResult};

use super::json_output::{CommandOutput, JsonError};
use super::reporting;
use crate::input::{load_mesh, load_palette, parent_dir};

/// Prefixes every error and warning path with the mesh file it came from.
fn scope_to_file(mut result: ValidationResult, file: &str) -> ValidationResult {
    for err in &mut result.errors {
        err.path = Some(match err.path.take() {
            Some(p) => format!("{}#{}", file, p),
            None => file.to_string(),
        });
    }
    for warn in &mut result.warnings {
        warn.path = Some(match warn.path.take() {
            Some(p) => format!("{}#{}", file, p),
            None => file.to_string(),
        });
    }
    result
}

/// Run the validate command
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(palette_path: &str, mesh_paths: &[String], json_output: bool) -> Result<ExitCode> {
    let start = Instant::now();
    if !json_output {
        println!("{} {}", "Validating:".cyan().bold(), palette_path);
    }

    let palette = load_palette(Path::new(palette_path))?;
    let mut result = validate_palette(&palette);
    for mesh_path in mesh_paths {
        let mesh = load_mesh(Path::new(mesh_path))?;
        result.merge(scope_to_file(validate_mesh(&mesh), mesh_path));
    }

    let duration_ms = start.elapsed().as_millis() as u64;
    let report = reporting::report_builder("validate", &palette)
        .validation(&result.errors, &result.warnings)
        .duration_ms(duration_ms)
        .build();
    let report_path = reporting::report_path(&parent_dir(Path::new(palette_path)), &palette.name);
    reporting::write_report(&report, &report_path)?;

    if json_output {
        let output = if result.is_ok() {
            CommandOutput::success(
                "validate",
                json!({
                    "palette": palette.name,
                    "sub_materials": palette.len(),
                    "capacity": palette.grid.capacity(),
                    "meshes": mesh_paths.len(),
                    "report_path": report_path,
                }),
            )
        } else {
            CommandOutput::failure(
                "validate",
                result.errors.iter().map(JsonError::from_validation).collect(),
            )
        };
        output
            .with_warnings(reporting::validation_warnings_json(&result))
            .print()?;
    } else {
        reporting::print_validation_results(&result);
        println!("{} {}", "Report:".dimmed(), report_path.display());
        if result.is_ok() {
            println!(
                "\n{} Palette is valid ({}ms)",
                "SUCCESS".green().bold(),
                duration_ms
            );
        } else {
            println!(
                "\n{} Palette has {} error(s) ({}ms)",
                "FAILED".red().bold(),
                result.errors.len(),
                duration_ms
            );
        }
    }

    Ok(if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
