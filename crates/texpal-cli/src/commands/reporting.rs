use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;

use texpal_spec::{BackendError, Palette, Report, ReportBuilder, ValidationResult};

use super::json_output::{CommandOutput, JsonError, JsonWarning};
use super::json_output::error_codes;

pub(crate) fn tool_version() -> String {
    format!("texpal-cli v{}", env!("CARGO_PKG_VERSION"))
}

pub(crate) fn report_builder(operation: &str, palette: &Palette) -> ReportBuilder {
    let palette_hash =
        texpal_spec::canonical_palette_hash(palette).unwrap_or_else(|_| "unknown".to_string());
    ReportBuilder::new(operation, palette_hash, tool_version())
}

pub(crate) fn report_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.report.json", name))
}

pub(crate) fn write_report(report: &Report, path: &Path) -> Result<()> {
    let json = report.to_json_pretty().context("Failed to serialize report")?;
    crate::input::write_document(path, &json)
        .with_context(|| format!("Failed to write report to: {}", path.display()))
}

pub(crate) fn print_validation_results(result: &ValidationResult) {
    if !result.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for err in &result.errors {
            let path = err
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!("  {} [{}]{}: {}", "x".red(), err.code, path.dimmed(), err.message);
        }
    }
    if !result.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for warn in &result.warnings {
            let path = warn
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!("  {} [{}]{}: {}", "!".yellow(), warn.code, path.dimmed(), warn.message);
        }
    }
}

pub(crate) fn validation_warnings_json(result: &ValidationResult) -> Vec<JsonWarning> {
    result.warnings.iter().map(JsonWarning::from_validation).collect()
}

/// Reports a document that failed validation and returns exit code 1.
pub(crate) fn fail_validation(
    command: &str,
    result: &ValidationResult,
    json: bool,
) -> Result<ExitCode> {
    if json {
        CommandOutput::failure(
            command,
            result.errors.iter().map(JsonError::from_validation).collect(),
        )
        .with_warnings(validation_warnings_json(result))
        .print()?;
    } else {
        print_validation_results(result);
        println!(
            "\n{} {} error(s)",
            "FAILED".red().bold(),
            result.errors.len()
        );
    }
    Ok(ExitCode::from(1))
}

/// Reports a library error and returns exit code 1.
pub(crate) fn fail_backend(command: &str, err: &dyn BackendError, json: bool) -> Result<ExitCode> {
    if json {
        CommandOutput::failure(command, vec![JsonError::from_backend(err)]).print()?;
        return Ok(ExitCode::from(1));
    }
    fail_message(command, err.code(), &err.message(), json)
}

/// Reports a CLI-level error and returns exit code 1.
pub(crate) fn fail_message(command: &str, code: &str, message: &str, json: bool) -> Result<ExitCode> {
    if json {
        CommandOutput::failure(command, vec![JsonError::new(code, message)]).print()?;
    } else {
        println!("{} [{}] {}", "FAILED".red().bold(), code, message);
    }
    Ok(ExitCode::from(1))
}

/// Fails unless `slot` names an existing sub-material.
pub(crate) fn check_slot(command: &str, palette: &Palette, slot: usize, json: bool) -> Result<Option<ExitCode>> {
    if slot < palette.len() {
        return Ok(None);
    }
    let message = format!(
        "slot {} has no sub-material (palette '{}' has {})",
        slot,
        palette.name,
        palette.len()
    );
    fail_message(command, error_codes::SLOT_OUT_OF_RANGE, &message, json).map(Some)
}

pub(crate) fn file_hash(path: &Path) -> Result<String> {
    let data = fs::read(path).with_context(|| format!("Failed to read: {}", path.display()))?;
    Ok(texpal_spec::blake3_hash(&data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use texpal_spec::{GridConfig, OutputKind, OutputResult};

    #[test]
    fn test_report_path_sibling_file() {
        let path = report_path(Path::new("out"), "props");
        assert_eq!(path, Path::new("out").join("props.report.json"));
    }

    #[test]
    fn test_write_report_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("p.report.json");
        let palette = Palette::new("p", GridConfig::default());
        let report = report_builder("build", &palette)
            .output(OutputResult::new(OutputKind::Texture, "p_albedo.png", "abc"))
            .build();

        write_report(&report, &path).unwrap();

        let parsed: Report = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, report);
        assert_eq!(parsed.tool_version, tool_version());
    }

    #[test]
    fn test_check_slot() {
        let mut palette = Palette::new("p", GridConfig::default());
        palette.add_default_sub_material().unwrap();
        assert!(check_slot("assign", &palette, 0, true).unwrap().is_none());
        assert!(check_slot("assign", &palette, 1, true).unwrap().is_some());
    }
}
