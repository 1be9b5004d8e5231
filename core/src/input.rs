// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pointer-to-cell mapping

use crate::geometry::Geometry;
use crate::render::Point;
use crate::CellIndex;

/// Convert a viewport-space pointer position to the board cell under it
///
/// Returns `None` when the pointer lies outside the surface.
pub fn map_pointer(pointer: Point, geometry: &Geometry, board_size: usize) -> Option<CellIndex> {
    let n = board_size as f32;
    let local_x = pointer.x - geometry.offset_left;
    let local_y = pointer.y - geometry.offset_top;

    let col = (local_x / geometry.width * n).floor();
    let row = (local_y / geometry.height * n).floor();

    // also rejects NaN
    if !(col >= 0.0 && row >= 0.0) {
        return None;
    }

    let cell = CellIndex::new(row as usize, col as usize);
    cell.is_valid(board_size).then_some(cell)
}

/// Center of a cell in surface-local pixels
pub fn cell_center(cell: CellIndex, geometry: &Geometry, board_size: usize) -> Point {
    let n = board_size as f32;
    let cell_width = geometry.width / n;
    let cell_height = geometry.height / n;
    Point::new(
        cell.col as f32 * cell_width + cell_width / 2.0,
        cell.row as f32 * cell_height + cell_height / 2.0,
    )
}

/// Center of a cell in viewport coordinates, i.e. where a click would land
pub fn cell_center_in_viewport(cell: CellIndex, geometry: &Geometry, board_size: usize) -> Point {
    let local = cell_center(cell, geometry, board_size);
    Point::new(local.x + geometry.offset_left, local.y + geometry.offset_top)
}
