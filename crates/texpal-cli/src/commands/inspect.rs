//! Inspect command implementation
//!
//! Prints the grid capacity, texture size and the cell of every slot.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use texpal_backend_texture::grid::{cell_address, cell_pixel_rect, cell_uv_rect};
use texpal_spec::{validate_grid, Palette};

use super::json_output::CommandOutput;
use super::reporting;
use crate::input::load_palette;

struct SlotRow {
    slot: usize,
    name: String,
    row: u32,
    column: u32,
    pixels: [u32; 4],
    uv: [f64; 4],
}

fn slot_rows(palette: &Palette) -> Vec<SlotRow> {
    palette
        .sub_materials
        .iter()
        .enumerate()
        .filter_map(|(slot, material)| {
            let address = cell_address(slot, &palette.grid).ok()?;
            let uv = cell_uv_rect(address, &palette.grid);
            Some(SlotRow {
                slot,
                name: material.name.clone(),
                row: address.row,
                column: address.column,
                pixels: cell_pixel_rect(address, &palette.grid).to_array(),
                uv: [uv.u_min, uv.v_min, uv.u_max, uv.v_max],
            })
        })
        .collect()
}

/// Run the inspect command
pub fn run(palette_path: &str, json_output: bool) -> Result<ExitCode> {
    let palette = load_palette(Path::new(palette_path))?;
    let grid_result = validate_grid(&palette.grid);
    if !grid_result.is_ok() {
        return reporting::fail_validation("inspect", &grid_result, json_output);
    }

    let grid = &palette.grid;
    let (width, height) = grid.texture_size();
    let rows = slot_rows(&palette);

    if json_output {
        let slots: Vec<_> = rows
            .iter()
            .map(|r| {
                json!({
                    "slot": r.slot,
                    "name": r.name,
                    "row": r.row,
                    "column": r.column,
                    "pixel_rect": r.pixels,
                    "uv_rect": r.uv,
                })
            })
            .collect();
        CommandOutput::success(
            "inspect",
            json!({
                "palette": palette.name,
                "capacity": grid.capacity(),
                "sub_materials": palette.len(),
                "free_slots": palette.free_slots(),
                "texture_width": width,
                "texture_height": height,
                "cell_size": grid.cell_size,
                "max_emission": grid.max_emission,
                "uv_margin": grid.uv_margin,
                "slots": slots,
            }),
        )
        .print()?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Palette:".cyan().bold(), palette.name);
    println!(
        "  grid        {} rows x {} columns, {}px cells",
        grid.num_rows, grid.num_columns, grid.cell_size
    );
    println!("  texture     {}x{}", width, height);
    println!(
        "  slots       {} used / {} ({} free)",
        palette.len(),
        grid.capacity(),
        palette.free_slots()
    );
    println!("  emission    alpha 1.0 = {}", grid.max_emission);
    if !rows.is_empty() {
        println!();
        for r in &rows {
            println!(
                "  {:>3}  {:<20} cell ({}, {})  px {:?}  uv [{:.4}, {:.4}, {:.4}, {:.4}]",
                r.slot,
                r.name,
                r.row,
                r.column,
                r.pixels,
                r.uv[0],
                r.uv[1],
                r.uv[2],
                r.uv[3]
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}
