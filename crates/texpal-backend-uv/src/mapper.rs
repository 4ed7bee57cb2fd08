//! Moves face UVs into (or between) palette grid cells.
//!
//! Faces that were never placed are treated as one group: the bounding box
//! of all their UVs is scaled uniformly into the target cell, keeping the
//! relative layout of the group. Faces that are already normalized keep
//! their size and are only translated from their current cell to the target.

use std::collections::BTreeSet;

use tracing::debug;

use texpal_backend_texture::ensure_valid_grid;
use texpal_backend_texture::grid::{cell_from_uv, cell_uv_rect, slot_uv_rect, UvRect};
use texpal_spec::mesh::centroid;
use texpal_spec::{GridConfig, Uv};

use crate::error::UvError;
use crate::mesh::{require_uv_layer, UvMesh};

/// Extents at or below this are treated as zero.
const DEGENERATE_EXTENT: f64 = 1e-12;

/// Fraction of a cell kept clear along an interior max edge, which
/// `cell_from_uv` assigns to the neighbouring cell.
const MAX_EDGE_GUARD: f64 = 1e-6;

/// What an assignment did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignOutcome {
    /// Slot the faces were assigned to.
    pub target_slot: usize,
    /// Faces scaled into the cell for the first time.
    pub normalized: Vec<usize>,
    /// Already normalized faces translated into the cell.
    pub translated: Vec<usize>,
    /// Faces without UV coordinates, left untouched.
    pub skipped: Vec<usize>,
    /// Uniform scale applied to the first-time group, if it had any extent.
    pub scale: Option<f64>,
}

impl AssignOutcome {
    fn empty(target_slot: usize) -> Self {
        Self {
            target_slot,
            ..Self::default()
        }
    }

    /// Number of faces whose UVs changed.
    pub fn moved_count(&self) -> usize {
        self.normalized.len() + self.translated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moved_count() == 0 && self.skipped.is_empty()
    }
}

/// UV rect of `slot`, or `IndexOutOfRange`.
pub fn target_rect(slot: usize, grid: &GridConfig) -> Result<UvRect, UvError> {
    slot_uv_rect(slot, grid).map_err(|_| UvError::IndexOutOfRange {
        index: slot,
        capacity: grid.capacity(),
    })
}

/// Rect that fitted UVs are clamped to. Max edges shared with another cell
/// are pulled in; the grid's outer edges already resolve to the last cell.
fn clamp_rect(inner: UvRect, target: UvRect) -> UvRect {
    let guard = |inner_max: f64, target_max: f64, size: f64, inner_min: f64| {
        if target_max < 1.0 {
            inner_max.min(target_max - size * MAX_EDGE_GUARD).max(inner_min)
        } else {
            inner_max
        }
    };
    UvRect {
        u_max: guard(inner.u_max, target.u_max, target.width(), inner.u_min),
        v_max: guard(inner.v_max, target.v_max, target.height(), inner.v_min),
        ..inner
    }
}

/// Axis-aligned bounds of a UV set as (min, max).
fn bounds<'a>(uvs: impl Iterator<Item = &'a Uv>) -> Option<(Uv, Uv)> {
    uvs.fold(None, |acc, uv| match acc {
        None => Some((*uv, *uv)),
        Some((min, max)) => Some((
            [min[0].min(uv[0]), min[1].min(uv[1])],
            [max[0].max(uv[0]), max[1].max(uv[1])],
        )),
    })
}

/// Uniform transform fitting a bounding box into `rect`.
#[derive(Debug, Clone, Copy)]
struct FitTransform {
    min: Uv,
    scale: Option<f64>,
    degenerate: [bool; 2],
    rect: UvRect,
    bound: UvRect,
}

impl FitTransform {
    fn new(min: Uv, max: Uv, rect: UvRect, bound: UvRect) -> Self {
        let extent = [max[0] - min[0], max[1] - min[1]];
        let degenerate = [extent[0] <= DEGENERATE_EXTENT, extent[1] <= DEGENERATE_EXTENT];
        let candidates = [
            (!degenerate[0]).then(|| rect.width() / extent[0]),
            (!degenerate[1]).then(|| rect.height() / extent[1]),
        ];
        let scale = candidates.into_iter().flatten().reduce(f64::min);
        Self {
            min,
            scale,
            degenerate,
            rect,
            bound,
        }
    }

    fn apply(&self, uv: Uv) -> Uv {
        let center = self.rect.center();
        let origin = [self.rect.u_min, self.rect.v_min];
        let mut out = [0.0; 2];
        for axis in 0..2 {
            out[axis] = match (self.degenerate[axis], self.scale) {
                (false, Some(s)) => origin[axis] + (uv[axis] - self.min[axis]) * s,
                _ => center[axis],
            };
        }
        self.bound.clamp(out)
    }
}

fn check_faces<M: UvMesh + ?Sized>(
    mesh: &M,
    faces: &[usize],
) -> Result<BTreeSet<usize>, UvError> {
    let face_count = mesh.face_count();
    let mut unique = BTreeSet::new();
    for &face in faces {
        if face >= face_count {
            return Err(UvError::FaceOutOfRange { face, face_count });
        }
        let uvs = mesh.face_uvs(face).unwrap_or_default();
        if uvs.iter().flatten().any(|c| !c.is_finite()) {
            return Err(UvError::MalformedUvLayer(format!(
                "face {} of mesh '{}' has a non-finite UV coordinate",
                face,
                mesh.name()
            )));
        }
        unique.insert(face);
    }
    Ok(unique)
}

/// Assigns `faces` to the cell of `target_slot`.
///
/// All checks run before any UV is written, so an error leaves the mesh
/// untouched.
pub fn assign_faces<M: UvMesh + ?Sized>(
    mesh: &mut M,
    faces: &[usize],
    target_slot: usize,
    grid: &GridConfig,
) -> Result<AssignOutcome, UvError> {
    ensure_valid_grid(grid)?;
    require_uv_layer(mesh)?;
    let target = target_rect(target_slot, grid)?;
    let faces = check_faces(mesh, faces)?;

    let mut outcome = AssignOutcome::empty(target_slot);
    let mut fresh = Vec::new();
    for face in faces {
        let has_uvs = mesh.face_uvs(face).is_some_and(|uvs| !uvs.is_empty());
        if !has_uvs {
            outcome.skipped.push(face);
        } else if mesh.is_normalized(face) {
            outcome.translated.push(face);
        } else {
            fresh.push(face);
        }
    }

    let view: &M = &*mesh;
    let fit = bounds(
        fresh
            .iter()
            .flat_map(|&f| view.face_uvs(f).unwrap_or_default().iter()),
    )
    .map(|(min, max)| {
        let inner = target.inset(grid.uv_margin);
        FitTransform::new(min, max, inner, clamp_rect(inner, target))
    });

    if let Some(fit) = fit {
        debug!(
            slot = target_slot,
            faces = fresh.len(),
            scale = ?fit.scale,
            "first-time UV assignment"
        );
        outcome.scale = fit.scale;
        for &face in &fresh {
            if let Some(uvs) = mesh.face_uvs_mut(face) {
                for uv in uvs.iter_mut() {
                    *uv = fit.apply(*uv);
                }
            }
            mesh.set_normalized(face, true);
        }
        outcome.normalized = fresh;
    }

    for &face in &outcome.translated {
        let Some(current) = mesh
            .face_uvs(face)
            .and_then(centroid)
            .and_then(|c| cell_from_uv(c, grid))
            .map(|address| cell_uv_rect(address, grid))
        else {
            continue;
        };
        let delta = [target.u_min - current.u_min, target.v_min - current.v_min];
        if let Some(uvs) = mesh.face_uvs_mut(face) {
            for uv in uvs.iter_mut() {
                uv[0] += delta[0];
                uv[1] += delta[1];
            }
        }
    }
    if !outcome.translated.is_empty() {
        debug!(
            slot = target_slot,
            faces = outcome.translated.len(),
            "UV reassignment"
        );
    }

    Ok(outcome)
}

/// Assigns the mesh's selected faces to `target_slot`.
///
/// With nothing selected this returns an empty outcome; callers decide
/// whether that deserves a warning.
pub fn assign_selected<M: UvMesh + ?Sized>(
    mesh: &mut M,
    target_slot: usize,
    grid: &GridConfig,
) -> Result<AssignOutcome, UvError> {
    ensure_valid_grid(grid)?;
    require_uv_layer(mesh)?;
    target_rect(target_slot, grid)?;
    let selected = mesh.selected_faces();
    if selected.is_empty() {
        debug!(mesh = mesh.name(), "no selected faces to assign");
        return Ok(AssignOutcome::empty(target_slot));
    }
    assign_faces(mesh, &selected, target_slot, grid)
}
