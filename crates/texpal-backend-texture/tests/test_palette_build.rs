//! End-to-end palette build tests: build, encode, save, rebuild.

use std::fs;

use texpal_backend_texture::grid::{cell_address, cell_pixel_rect};
use texpal_backend_texture::output::{encode_texture_set, map_file_name};
use texpal_backend_texture::png::PngConfig;
use texpal_backend_texture::{
    build_palette_textures, encode_palette, save_palette_output, CellPixels, Color, PaletteError,
};
use texpal_spec::{GridConfig, Palette, PaletteMap, PaletteMetadata, SubMaterial, VerticalOrigin};

fn emission_palette() -> Palette {
    let mut palette = Palette::new("glow", GridConfig::new(2, 2, 64).with_max_emission(2.0));
    for name in ["a", "b", "c"] {
        palette.add_sub_material(SubMaterial::new(name)).unwrap();
    }
    palette
        .add_sub_material(SubMaterial::new("lamp").with_emission([1.0, 0.8, 0.2], 1.0))
        .unwrap();
    palette
}

#[test]
fn test_emission_cell_lands_top_right() {
    let palette = emission_palette();
    let set = build_palette_textures(&palette.sub_materials, &palette.grid).unwrap();

    let address = cell_address(3, &palette.grid).unwrap();
    assert_eq!((address.row, address.column), (1, 1));
    assert_eq!(cell_pixel_rect(address, &palette.grid).to_array(), [64, 64, 64, 64]);

    let px = set.emissive_power.get(64, 64);
    assert_eq!(px, Color::rgba(1.0, 0.8, 0.2, 0.5));
    assert_eq!(px.to_rgba8()[3], 128);
    assert_eq!(set.emissive_power.get(127, 127), px);
    assert_ne!(set.emissive_power.get(63, 63), px);
}

#[test]
fn test_rebuild_is_byte_identical() {
    let palette = emission_palette();
    let first = encode_palette(&palette).unwrap();
    let second = encode_palette(&palette).unwrap();
    for (a, b) in first.maps.iter().zip(&second.maps) {
        assert_eq!(a.png_data, b.png_data);
        assert_eq!(a.hash, b.hash);
    }
    assert_eq!(first.metadata, second.metadata);
}

#[test]
fn test_partially_filled_grid_uses_inert_cells() {
    let mut palette = Palette::new("sparse", GridConfig::default());
    palette
        .add_sub_material(SubMaterial::new("rust").with_metallic(1.0))
        .unwrap();
    let set = build_palette_textures(&palette.sub_materials, &palette.grid).unwrap();

    assert_eq!(set.metallic_roughness.get(0, 0), Color::rgba(1.0, 1.0, 0.5, 0.5));
    for slot in 1..palette.grid.capacity() {
        let rect = cell_pixel_rect(cell_address(slot, &palette.grid).unwrap(), &palette.grid);
        for map in PaletteMap::ALL {
            assert_eq!(set.map(map).get(rect.x, rect.y), CellPixels::INERT.get(map));
        }
    }
}

#[test]
fn test_save_writes_maps_and_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let output = encode_palette(&emission_palette()).unwrap();
    let saved = save_palette_output(&output, dir.path()).unwrap();

    for map in PaletteMap::ALL {
        let path = &saved.maps[&map];
        assert_eq!(path, &dir.path().join(map_file_name("glow", map)));
        assert!(path.exists());
    }

    let json = fs::read_to_string(&saved.metadata).unwrap();
    let meta: PaletteMetadata = serde_json::from_str(&json).unwrap();
    assert_eq!(meta.vertical_origin, VerticalOrigin::Bottom);
    assert_eq!(meta.cells.len(), 4);
    assert_eq!(meta.emission.max_emission, 2.0);

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_failed_rename_reports_replaced_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join(map_file_name("glow", PaletteMap::MetallicRoughness));
    fs::create_dir(&blocker).unwrap();
    fs::write(blocker.join("keep"), b"x").unwrap();

    let output = encode_palette(&emission_palette()).unwrap();
    let err = save_palette_output(&output, dir.path()).unwrap_err();
    match err {
        PaletteError::PartialReplace { replaced, .. } => {
            let albedo = dir.path().join(map_file_name("glow", PaletteMap::AlbedoAlpha));
            assert_eq!(replaced, vec![albedo]);
        }
        other => panic!("unexpected error: {}", other),
    }

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
    assert!(!dir.path().join("glow.palette.json").exists());
    assert!(blocker.join("keep").exists());
}

#[test]
fn test_over_capacity_build_leaves_saved_files_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let mut palette = emission_palette();
    let output = encode_palette(&palette).unwrap();
    let saved = save_palette_output(&output, dir.path()).unwrap();
    let before: Vec<Vec<u8>> = PaletteMap::ALL
        .iter()
        .map(|m| fs::read(&saved.maps[m]).unwrap())
        .collect();

    // Bypass the edit guard to simulate a hand-edited document.
    palette.sub_materials.push(SubMaterial::new("extra"));
    let err = encode_palette(&palette).unwrap_err();
    assert!(matches!(
        err,
        PaletteError::CapacityExceeded { count: 5, capacity: 4 }
    ));

    let after: Vec<Vec<u8>> = PaletteMap::ALL
        .iter()
        .map(|m| fs::read(&saved.maps[m]).unwrap())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_png_rows_are_top_down() {
    let grid = GridConfig::new(2, 1, 1);
    let materials = vec![
        SubMaterial::new("bottom").with_albedo(1.0, 0.0, 0.0),
        SubMaterial::new("top").with_albedo(0.0, 0.0, 1.0),
    ];
    let set = build_palette_textures(&materials, &grid).unwrap();
    let output =
        encode_texture_set(&set, "rows", &materials, &grid, "rows", &PngConfig::default()).unwrap();

    let decoder = png::Decoder::new(std::io::Cursor::new(output.maps[0].png_data.clone()));
    let mut reader = decoder.read_info().unwrap();
    let mut pixels = vec![0; reader.output_buffer_size()];
    reader.next_frame(&mut pixels).unwrap();
    assert_eq!(&pixels[0..4], &[0, 0, 255, 255]);
    assert_eq!(&pixels[4..8], &[255, 0, 0, 255]);
}
