//! Encoding a built texture set to PNG and saving it with its metadata.
//!
//! Saving stages every file next to its destination and only renames once
//! all of them were written, so a failed save leaves earlier outputs intact.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use texpal_spec::{
    CellRecord, EmissionContract, GridConfig, MapLayout, Palette, PaletteMap, PaletteMetadata,
    SubMaterial,
};

use crate::builder::{build_palette_textures, PaletteTextureSet};
use crate::error::PaletteError;
use crate::grid::{cell_address, cell_pixel_rect, cell_uv_rect, VERTICAL_ORIGIN};
use crate::png::{write_rgba_to_vec_with_hash, PngConfig};

/// One encoded map.
#[derive(Debug, Clone)]
pub struct EncodedMap {
    pub map: PaletteMap,
    /// File name, `{base}_{suffix}.png`.
    pub file_name: String,
    pub png_data: Vec<u8>,
    /// BLAKE3 hash of `png_data`.
    pub hash: String,
}

/// Encoded maps plus the metadata describing them.
#[derive(Debug, Clone)]
pub struct PaletteOutput {
    pub maps: Vec<EncodedMap>,
    pub metadata: PaletteMetadata,
    /// File name of the metadata sidecar.
    pub metadata_file_name: String,
}

/// Paths written by [`save_palette_output`].
#[derive(Debug, Clone)]
pub struct SavedPalette {
    pub maps: BTreeMap<PaletteMap, PathBuf>,
    pub metadata: PathBuf,
}

/// File name of one map for a base name.
pub fn map_file_name(base_name: &str, map: PaletteMap) -> String {
    format!("{}_{}.png", base_name, map.suffix())
}

/// File name of the metadata sidecar for a base name.
pub fn metadata_file_name(base_name: &str) -> String {
    format!("{}.palette.json", base_name)
}

/// Describes the cells and maps of a built palette.
pub fn palette_metadata(
    palette_name: &str,
    materials: &[SubMaterial],
    grid: &GridConfig,
    maps: &[EncodedMap],
) -> Result<PaletteMetadata, PaletteError> {
    let mut cells = Vec::with_capacity(materials.len());
    for (slot, material) in materials.iter().enumerate() {
        let address = cell_address(slot, grid)?;
        let uv = cell_uv_rect(address, grid);
        cells.push(CellRecord {
            slot,
            name: material.name.clone(),
            row: address.row,
            column: address.column,
            pixel_rect: cell_pixel_rect(address, grid).to_array(),
            u_min: uv.u_min,
            v_min: uv.v_min,
            u_max: uv.u_max,
            v_max: uv.v_max,
        });
    }

    Ok(PaletteMetadata {
        palette: palette_name.to_string(),
        texture_width: grid.texture_width(),
        texture_height: grid.texture_height(),
        grid: *grid,
        vertical_origin: VERTICAL_ORIGIN,
        emission: EmissionContract::new(grid.max_emission),
        maps: maps
            .iter()
            .map(|m| MapLayout {
                map: m.map,
                file: m.file_name.clone(),
                channels: m.map.channels().iter().map(|c| c.to_string()).collect(),
                hash: m.hash.clone(),
            })
            .collect(),
        cells,
    })
}

/// Encodes an already built texture set.
pub fn encode_texture_set(
    set: &PaletteTextureSet,
    palette_name: &str,
    materials: &[SubMaterial],
    grid: &GridConfig,
    base_name: &str,
    config: &PngConfig,
) -> Result<PaletteOutput, PaletteError> {
    let mut maps = Vec::with_capacity(PaletteMap::ALL.len());
    for map in PaletteMap::ALL {
        let (png_data, hash) = write_rgba_to_vec_with_hash(set.map(map), config)?;
        debug!(map = %map, bytes = png_data.len(), hash = %hash, "encoded palette map");
        maps.push(EncodedMap {
            map,
            file_name: map_file_name(base_name, map),
            png_data,
            hash,
        });
    }

    let metadata = palette_metadata(palette_name, materials, grid, &maps)?;
    Ok(PaletteOutput {
        maps,
        metadata,
        metadata_file_name: metadata_file_name(base_name),
    })
}

/// Builds and encodes a palette document, using its name as the base name.
pub fn encode_palette(palette: &Palette) -> Result<PaletteOutput, PaletteError> {
    let set = build_palette_textures(&palette.sub_materials, &palette.grid)?;
    encode_texture_set(
        &set,
        &palette.name,
        &palette.sub_materials,
        &palette.grid,
        &palette.name,
        &PngConfig::default(),
    )
}

fn staging_path(dir: &Path, file_name: &str) -> PathBuf {
    dir.join(format!(".{}.tmp", file_name))
}

fn write_staged(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(data)?;
    file.sync_all()
}

fn discard_staged(staged: &[(PathBuf, PathBuf)]) {
    for (tmp, _) in staged {
        if let Err(e) = fs::remove_file(tmp) {
            warn!(path = %tmp.display(), error = %e, "failed to remove staged file");
        }
    }
}

/// Writes the maps and metadata sidecar into `dir`.
///
/// Existing files are replaced only after every new file has been staged.
/// If a rename fails, the staged files left over are removed and the error
/// lists the outputs that were already replaced.
pub fn save_palette_output(
    output: &PaletteOutput,
    dir: &Path,
) -> Result<SavedPalette, PaletteError> {
    fs::create_dir_all(dir)?;

    let metadata_json = serde_json::to_string_pretty(&output.metadata)?;
    let mut files: Vec<(&str, &[u8])> = output
        .maps
        .iter()
        .map(|m| (m.file_name.as_str(), m.png_data.as_slice()))
        .collect();
    files.push((output.metadata_file_name.as_str(), metadata_json.as_bytes()));

    let mut staged = Vec::with_capacity(files.len());
    for (file_name, data) in files {
        let tmp = staging_path(dir, file_name);
        if let Err(e) = write_staged(&tmp, data) {
            let _ = fs::remove_file(&tmp);
            discard_staged(&staged);
            return Err(e.into());
        }
        staged.push((tmp, dir.join(file_name)));
    }

    let mut replaced = Vec::with_capacity(staged.len());
    for (i, (tmp, dest)) in staged.iter().enumerate() {
        if let Err(source) = fs::rename(tmp, dest) {
            discard_staged(&staged[i..]);
            if replaced.is_empty() {
                return Err(source.into());
            }
            warn!(
                dest = %dest.display(),
                replaced = replaced.len(),
                "rename failed after replacing earlier outputs"
            );
            return Err(PaletteError::PartialReplace { replaced, source });
        }
        replaced.push(dest.clone());
    }

    let maps = output
        .maps
        .iter()
        .map(|m| (m.map, dir.join(&m.file_name)))
        .collect();
    let metadata = dir.join(&output.metadata_file_name);
    debug!(dir = %dir.display(), "saved palette textures");

    Ok(SavedPalette { maps, metadata })
}
