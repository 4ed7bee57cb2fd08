//! Palette grid geometry.
//!
//! Slot `i` lives at row `i / num_columns`, column `i % num_columns`. Row 0
//! and v = 0 both sit on the bottom edge of the texture, so a cell's pixel
//! rect and UV rect describe the same region without any flipping.

use texpal_spec::{GridConfig, Uv, VerticalOrigin};

use crate::error::PaletteError;

/// Where row 0 of the grid sits in encoded images.
pub const VERTICAL_ORIGIN: VerticalOrigin = VerticalOrigin::Bottom;

/// UV values closer than this to a cell boundary snap onto it.
const BOUNDARY_EPSILON: f64 = 1e-9;

/// Row and column of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    pub row: u32,
    pub column: u32,
}

/// Pixel rectangle of one cell, `y` measured from the bottom scanline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// As `[x, y, width, height]`.
    pub fn to_array(&self) -> [u32; 4] {
        [self.x, self.y, self.width, self.height]
    }
}

/// Normalized UV rectangle of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    pub u_min: f64,
    pub v_min: f64,
    pub u_max: f64,
    pub v_max: f64,
}

impl UvRect {
    pub fn width(&self) -> f64 {
        self.u_max - self.u_min
    }

    pub fn height(&self) -> f64 {
        self.v_max - self.v_min
    }

    pub fn center(&self) -> Uv {
        [
            (self.u_min + self.u_max) * 0.5,
            (self.v_min + self.v_max) * 0.5,
        ]
    }

    /// Shrinks the rect by `fraction` of its size, split evenly between both sides.
    pub fn inset(&self, fraction: f64) -> UvRect {
        let du = self.width() * fraction * 0.5;
        let dv = self.height() * fraction * 0.5;
        UvRect {
            u_min: self.u_min + du,
            v_min: self.v_min + dv,
            u_max: self.u_max - du,
            v_max: self.v_max - dv,
        }
    }

    /// Clamps `uv` into the rect.
    pub fn clamp(&self, uv: Uv) -> Uv {
        [
            uv[0].clamp(self.u_min, self.u_max),
            uv[1].clamp(self.v_min, self.v_max),
        ]
    }
}

/// Maps a slot index to its cell.
pub fn cell_address(slot: usize, grid: &GridConfig) -> Result<CellAddress, PaletteError> {
    let capacity = grid.capacity();
    if slot >= capacity {
        return Err(PaletteError::IndexOutOfRange {
            index: slot,
            capacity,
        });
    }
    let columns = grid.num_columns as usize;
    Ok(CellAddress {
        row: (slot / columns) as u32,
        column: (slot % columns) as u32,
    })
}

/// Maps a cell back to its slot index.
pub fn slot_index(address: CellAddress, grid: &GridConfig) -> usize {
    address.row as usize * grid.num_columns as usize + address.column as usize
}

/// Pixel rectangle covered by a cell.
pub fn cell_pixel_rect(address: CellAddress, grid: &GridConfig) -> PixelRect {
    PixelRect {
        x: address.column * grid.cell_size,
        y: address.row * grid.cell_size,
        width: grid.cell_size,
        height: grid.cell_size,
    }
}

/// UV rectangle covered by a cell.
pub fn cell_uv_rect(address: CellAddress, grid: &GridConfig) -> UvRect {
    let columns = grid.num_columns as f64;
    let rows = grid.num_rows as f64;
    UvRect {
        u_min: address.column as f64 / columns,
        v_min: address.row as f64 / rows,
        u_max: (address.column + 1) as f64 / columns,
        v_max: (address.row + 1) as f64 / rows,
    }
}

/// UV rectangle of the cell holding `slot`.
pub fn slot_uv_rect(slot: usize, grid: &GridConfig) -> Result<UvRect, PaletteError> {
    Ok(cell_uv_rect(cell_address(slot, grid)?, grid))
}

fn axis_cell(t: f64, cells: u32) -> u32 {
    let scaled = t * cells as f64;
    let nearest = scaled.round();
    let index = if (scaled - nearest).abs() < BOUNDARY_EPSILON {
        nearest
    } else {
        scaled.floor()
    };
    // NaN saturates to 0 in the cast.
    index.clamp(0.0, (cells - 1) as f64) as u32
}

/// Cell containing a UV point.
///
/// Points outside [0, 1] are clamped to the nearest edge cell, and points on
/// a shared boundary belong to the cell above/right of it. Returns `None`
/// only for a grid with no cells.
pub fn cell_from_uv(uv: Uv, grid: &GridConfig) -> Option<CellAddress> {
    if grid.num_columns == 0 || grid.num_rows == 0 {
        return None;
    }
    Some(CellAddress {
        row: axis_cell(uv[1], grid.num_rows),
        column: axis_cell(uv[0], grid.num_columns),
    })
}

/// Slot whose cell contains a UV point.
pub fn slot_from_uv(uv: Uv, grid: &GridConfig) -> Option<usize> {
    cell_from_uv(uv, grid).map(|address| slot_index(address, grid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_addressing() {
        let grid = GridConfig::new(2, 3, 8);
        assert_eq!(cell_address(0, &grid).unwrap(), CellAddress { row: 0, column: 0 });
        assert_eq!(cell_address(2, &grid).unwrap(), CellAddress { row: 0, column: 2 });
        assert_eq!(cell_address(4, &grid).unwrap(), CellAddress { row: 1, column: 1 });
        assert!(matches!(
            cell_address(6, &grid),
            Err(PaletteError::IndexOutOfRange { index: 6, capacity: 6 })
        ));
    }

    #[test]
    fn test_pixel_and_uv_rects_agree() {
        let grid = GridConfig::new(2, 2, 64);
        let address = cell_address(3, &grid).unwrap();
        assert_eq!(cell_pixel_rect(address, &grid).to_array(), [64, 64, 64, 64]);
        let rect = cell_uv_rect(address, &grid);
        assert_eq!(rect.u_min, 0.5);
        assert_eq!(rect.v_min, 0.5);
        assert_eq!(rect.u_max, 1.0);
        assert_eq!(rect.v_max, 1.0);
        assert_eq!(rect.center(), [0.75, 0.75]);
    }

    #[test]
    fn test_center_round_trips_every_slot() {
        let grid = GridConfig::new(3, 5, 4);
        for slot in 0..grid.capacity() {
            let center = slot_uv_rect(slot, &grid).unwrap().center();
            assert_eq!(slot_from_uv(center, &grid), Some(slot));
        }
    }

    #[test]
    fn test_boundaries_and_out_of_range() {
        let grid = GridConfig::new(4, 4, 4);
        assert_eq!(cell_from_uv([0.25, 0.0], &grid), Some(CellAddress { row: 0, column: 1 }));
        assert_eq!(
            cell_from_uv([0.25 - 1e-12, 0.5], &grid),
            Some(CellAddress { row: 2, column: 1 })
        );
        assert_eq!(cell_from_uv([1.0, 1.0], &grid), Some(CellAddress { row: 3, column: 3 }));
        assert_eq!(cell_from_uv([-0.5, 1.7], &grid), Some(CellAddress { row: 3, column: 0 }));
    }

    #[test]
    fn test_empty_grid_has_no_cells() {
        let grid = GridConfig::new(0, 4, 4);
        assert_eq!(cell_from_uv([0.5, 0.5], &grid), None);
    }

    #[test]
    fn test_inset_and_clamp() {
        let rect = UvRect {
            u_min: 0.0,
            v_min: 0.0,
            u_max: 0.5,
            v_max: 0.5,
        };
        let inner = rect.inset(0.2);
        assert!((inner.u_min - 0.05).abs() < 1e-12);
        assert!((inner.u_max - 0.45).abs() < 1e-12);
        assert_eq!(rect.clamp([0.7, -0.1]), [0.5, 0.0]);
    }
}
