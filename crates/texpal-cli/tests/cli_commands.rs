//! End-to-end tests for the CLI commands, run against files in a temp dir.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tempfile::TempDir;

use texpal_backend_uv::face_slot;
use texpal_cli::commands::{assign, build, combine, inspect, select, submat, validate};
use texpal_cli::input::{load_mesh, load_palette, save_mesh, save_palette};
use texpal_spec::{EditMesh, GridConfig, Palette, Report, SubMaterial};

fn is_success(code: ExitCode) -> bool {
    format!("{:?}", code) == format!("{:?}", ExitCode::SUCCESS)
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

fn write_palette(dir: &Path, materials: &[&str]) -> PathBuf {
    let mut palette = Palette::new("props", GridConfig::new(2, 2, 4).with_max_emission(2.0));
    for name in materials {
        palette.add_sub_material(SubMaterial::new(*name)).unwrap();
    }
    let path = dir.join("props.json");
    save_palette(&path, &palette).unwrap();
    path
}

fn write_mesh(dir: &Path, name: &str, mesh: &EditMesh) -> PathBuf {
    let path = dir.join(format!("{}.json", name));
    save_mesh(&path, mesh).unwrap();
    path
}

fn triangle_mesh(name: &str) -> EditMesh {
    let mut mesh = EditMesh::new(name);
    mesh.push_face(0, vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]);
    mesh.push_face(0, vec![[0.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
    mesh
}

fn read_report(path: &Path) -> Report {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_build_writes_maps_metadata_and_report() {
    let tmp = TempDir::new().unwrap();
    let palette = write_palette(tmp.path(), &["paint", "steel"]);
    let out = tmp.path().join("out");

    let code = build::run(&path_str(&palette), Some(&path_str(&out)), true).unwrap();
    assert!(is_success(code));

    for file in [
        "props_albedo.png",
        "props_metallic.png",
        "props_emissive.png",
        "props.palette.json",
    ] {
        assert!(out.join(file).exists(), "missing {}", file);
    }
    let report = read_report(&out.join("props.report.json"));
    assert!(report.ok);
    assert_eq!(report.operation, "build");
    assert_eq!(report.outputs.len(), 4);
}

#[test]
fn test_rebuild_is_byte_identical() {
    let tmp = TempDir::new().unwrap();
    let palette = write_palette(tmp.path(), &["paint"]);
    let out = path_str(&tmp.path().join("out"));

    build::run(&path_str(&palette), Some(&out), true).unwrap();
    let first = fs::read(Path::new(&out).join("props_albedo.png")).unwrap();
    build::run(&path_str(&palette), Some(&out), true).unwrap();
    let second = fs::read(Path::new(&out).join("props_albedo.png")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_build_rejects_over_capacity_palette() {
    let tmp = TempDir::new().unwrap();
    let mut palette = Palette::new("full", GridConfig::new(1, 1, 4));
    palette.sub_materials.push(SubMaterial::new("a"));
    palette.sub_materials.push(SubMaterial::new("b"));
    let path = tmp.path().join("full.json");
    save_palette(&path, &palette).unwrap();

    let code = build::run(&path_str(&path), None, true).unwrap();
    assert!(!is_success(code));
    assert!(!tmp.path().join("full_albedo.png").exists());

    let report = read_report(&tmp.path().join("full.report.json"));
    assert!(!report.ok);
    assert_eq!(report.errors[0].code, "E010");
}

#[test]
fn test_validate_reports_mesh_errors() {
    let tmp = TempDir::new().unwrap();
    let palette = write_palette(tmp.path(), &["paint"]);
    let mut mesh = triangle_mesh("broken");
    mesh.materials.push(SubMaterial::new("only"));
    mesh.faces[1].material_slot = 3;
    let mesh_path = write_mesh(tmp.path(), "broken", &mesh);

    let code = validate::run(&path_str(&palette), &[path_str(&mesh_path)], true).unwrap();
    assert!(!is_success(code));

    let report = read_report(&tmp.path().join("props.report.json"));
    assert!(!report.ok);
    assert!(report.errors[0]
        .path
        .as_deref()
        .unwrap()
        .ends_with("broken.json#faces[1].material_slot"));
}

#[test]
fn test_assign_then_select() {
    let tmp = TempDir::new().unwrap();
    let palette_path = write_palette(tmp.path(), &["paint", "steel", "glass"]);
    let mesh_path = write_mesh(tmp.path(), "crate", &triangle_mesh("crate"));

    let code = assign::run(
        &path_str(&palette_path),
        &path_str(&mesh_path),
        1,
        Some(&[0, 1]),
        None,
        true,
    )
    .unwrap();
    assert!(is_success(code));

    let palette = load_palette(&palette_path).unwrap();
    let mesh = load_mesh(&mesh_path).unwrap();
    assert_eq!(mesh.palette.as_deref(), Some("props"));
    assert_eq!(face_slot(&mesh, 0, &palette.grid), Some(1));
    assert_eq!(face_slot(&mesh, 1, &palette.grid), Some(1));

    let selected = tmp.path().join("selected.json");
    let code = select::run(
        &path_str(&palette_path),
        &path_str(&mesh_path),
        1,
        Some(&path_str(&selected)),
        true,
    )
    .unwrap();
    assert!(is_success(code));
    assert_eq!(load_mesh(&selected).unwrap().selected_faces(), vec![0, 1]);
}

#[test]
fn test_assign_without_selection_leaves_mesh_untouched() {
    let tmp = TempDir::new().unwrap();
    let palette_path = write_palette(tmp.path(), &["paint"]);
    let mesh_path = write_mesh(tmp.path(), "crate", &triangle_mesh("crate"));
    let before = fs::read_to_string(&mesh_path).unwrap();

    let code = assign::run(&path_str(&palette_path), &path_str(&mesh_path), 0, None, None, true)
        .unwrap();

    assert!(is_success(code));
    assert_eq!(fs::read_to_string(&mesh_path).unwrap(), before);
}

#[test]
fn test_assign_to_empty_slot_fails() {
    let tmp = TempDir::new().unwrap();
    let palette_path = write_palette(tmp.path(), &["paint"]);
    let mesh_path = write_mesh(tmp.path(), "crate", &triangle_mesh("crate"));
    let before = fs::read_to_string(&mesh_path).unwrap();

    let code = assign::run(
        &path_str(&palette_path),
        &path_str(&mesh_path),
        2,
        Some(&[0]),
        None,
        true,
    )
    .unwrap();

    assert!(!is_success(code));
    assert_eq!(fs::read_to_string(&mesh_path).unwrap(), before);
}

#[test]
fn test_missing_palette_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.json");
    assert!(inspect::run(&path_str(&missing), true).is_err());
}

#[test]
fn test_combine_writes_palette_and_meshes() {
    let tmp = TempDir::new().unwrap();
    let mut a = triangle_mesh("a");
    a.materials = vec![SubMaterial::new("a0"), SubMaterial::new("a1")];
    a.faces[1].material_slot = 1;
    let mut b = triangle_mesh("b");
    b.materials = vec![SubMaterial::new("b0")];
    let paths = vec![
        path_str(&write_mesh(tmp.path(), "a", &a)),
        path_str(&write_mesh(tmp.path(), "b", &b)),
    ];
    let out = tmp.path().join("out");

    let code = combine::run(&paths, "shared", GridConfig::new(2, 2, 4), &path_str(&out), true)
        .unwrap();
    assert!(is_success(code));

    let palette = load_palette(&out.join("shared.json")).unwrap();
    let names: Vec<&str> = palette.sub_materials.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["a0", "a1", "b0"]);

    let a = load_mesh(&out.join("a.json")).unwrap();
    assert!(a.materials.is_empty());
    assert_eq!(a.palette.as_deref(), Some("shared"));
    assert!(a.faces.iter().all(|f| f.material_slot == 0));
    assert_eq!(face_slot(&a, 0, &palette.grid), Some(0));
    assert_eq!(face_slot(&a, 1, &palette.grid), Some(1));

    let b = load_mesh(&out.join("b.json")).unwrap();
    assert_eq!(face_slot(&b, 0, &palette.grid), Some(2));
    assert!(out.join("shared_albedo.png").exists());
    assert!(read_report(&out.join("shared.report.json")).ok);

    // Combining the combined meshes again skips both.
    let again = tmp.path().join("again");
    let rerun = vec![path_str(&out.join("a.json")), path_str(&out.join("b.json"))];
    combine::run(&rerun, "shared", GridConfig::new(2, 2, 4), &path_str(&again), true).unwrap();
    assert!(!again.join("a.json").exists());
    assert!(!again.join("b.json").exists());
}

#[test]
fn test_combine_over_capacity_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let mut a = triangle_mesh("a");
    a.materials = vec![SubMaterial::new("a0"), SubMaterial::new("a1")];
    let paths = vec![path_str(&write_mesh(tmp.path(), "a", &a))];
    let out = tmp.path().join("out");

    let code =
        combine::run(&paths, "tiny", GridConfig::new(1, 1, 4), &path_str(&out), true).unwrap();

    assert!(!is_success(code));
    assert!(!out.join("tiny.json").exists());
}

#[test]
fn test_combine_rejects_meshes_with_the_same_file_name() {
    let tmp = TempDir::new().unwrap();
    let mut paths = Vec::new();
    for dir in ["a", "b"] {
        let dir = tmp.path().join(dir);
        fs::create_dir(&dir).unwrap();
        let mut mesh = triangle_mesh(dir.file_name().unwrap().to_str().unwrap());
        mesh.materials = vec![SubMaterial::new("m")];
        paths.push(path_str(&write_mesh(&dir, "mesh", &mesh)));
    }
    let out = tmp.path().join("out");

    let code = combine::run(&paths, "shared", GridConfig::new(2, 2, 4), &path_str(&out), true)
        .unwrap();

    assert!(!is_success(code));
    assert!(!out.exists());
}

#[test]
fn test_combine_rejects_mesh_named_like_the_palette() {
    let tmp = TempDir::new().unwrap();
    let mut mesh = triangle_mesh("shared");
    mesh.materials = vec![SubMaterial::new("m")];
    let paths = vec![path_str(&write_mesh(tmp.path(), "shared", &mesh))];
    let out = tmp.path().join("out");

    let code = combine::run(&paths, "shared", GridConfig::new(2, 2, 4), &path_str(&out), true)
        .unwrap();

    assert!(!is_success(code));
    assert!(!out.join("shared_albedo.png").exists());
}

#[test]
fn test_submat_remove_moves_placed_faces() {
    let tmp = TempDir::new().unwrap();
    let palette_path = write_palette(tmp.path(), &["paint", "steel", "glass"]);
    let mesh_path = write_mesh(tmp.path(), "crate", &triangle_mesh("crate"));
    assign::run(
        &path_str(&palette_path),
        &path_str(&mesh_path),
        2,
        Some(&[0]),
        None,
        true,
    )
    .unwrap();

    let code = submat::run_edit(
        submat::SlotEdit::Remove,
        &path_str(&palette_path),
        1,
        &[path_str(&mesh_path)],
        true,
    )
    .unwrap();
    assert!(is_success(code));

    let palette = load_palette(&palette_path).unwrap();
    assert_eq!(palette.len(), 2);
    assert_eq!(palette.sub_materials[1].name, "glass");
    let mesh = load_mesh(&mesh_path).unwrap();
    assert_eq!(face_slot(&mesh, 0, &palette.grid), Some(1));
}

#[test]
fn test_submat_move_down_swaps_faces() {
    let tmp = TempDir::new().unwrap();
    let palette_path = write_palette(tmp.path(), &["paint", "steel"]);
    let mesh_path = write_mesh(tmp.path(), "crate", &triangle_mesh("crate"));
    let palette = path_str(&palette_path);
    let mesh = path_str(&mesh_path);
    assign::run(&palette, &mesh, 0, Some(&[0]), None, true).unwrap();
    assign::run(&palette, &mesh, 1, Some(&[1]), None, true).unwrap();

    submat::run_edit(submat::SlotEdit::MoveDown, &palette, 0, &[mesh.clone()], true).unwrap();

    let grid = load_palette(&palette_path).unwrap().grid;
    let mesh = load_mesh(&mesh_path).unwrap();
    assert_eq!(face_slot(&mesh, 0, &grid), Some(1));
    assert_eq!(face_slot(&mesh, 1, &grid), Some(0));
}

#[test]
fn test_submat_add_until_full() {
    let tmp = TempDir::new().unwrap();
    let palette_path = write_palette(tmp.path(), &["a", "b", "c"]);
    let palette = path_str(&palette_path);

    assert!(is_success(submat::run_add(&palette, Some("d"), true).unwrap()));
    assert!(!is_success(submat::run_add(&palette, None, true).unwrap()));
    assert_eq!(load_palette(&palette_path).unwrap().len(), 4);
}

#[test]
fn test_inspect_succeeds_on_valid_palette() {
    let tmp = TempDir::new().unwrap();
    let palette_path = write_palette(tmp.path(), &["paint"]);
    assert!(is_success(inspect::run(&path_str(&palette_path), false).unwrap()));
}
