use serde::{Deserialize, Serialize};

use crate::foundation::core::Rect;

/// Grid shape as columns by rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDims {
    /// Columns.
    pub cols: u32,
    /// Rows.
    pub rows: u32,
}

impl GridDims {
    /// Number of cells.
    pub fn cells(self) -> u32 {
        self.cols * self.rows
    }
}

/// Grid shape for `n` items on a vertical canvas.
pub fn grid_dims(n: usize) -> GridDims {
    let (cols, rows) = match n {
        0 | 1 => (1, 1),
        2 => (1, 2),
        3 | 4 => (2, 2),
        5 | 6 => (2, 3),
        7..=9 => (3, 3),
        _ => {
            let cols = (n as f64).sqrt().ceil() as usize;
            (cols, n.div_ceil(cols))
        }
    };
    GridDims {
        cols: u32::try_from(cols).unwrap_or(u32::MAX),
        rows: u32::try_from(rows).unwrap_or(u32::MAX),
    }
}

/// Cell rectangles for `n` items inside `area`, filled row by row.
pub fn grid_cells(n: usize, area: Rect) -> Vec<Rect> {
    if n == 0 {
        return Vec::new();
    }
    let dims = grid_dims(n);
    let w = area.width() / f64::from(dims.cols);
    let h = area.height() / f64::from(dims.rows);
    (0..n)
        .map(|i| {
            let col = (i % dims.cols as usize) as f64;
            let row = (i / dims.cols as usize) as f64;
            let x0 = area.x0 + col * w;
            let y0 = area.y0 + row * h;
            Rect::new(x0, y0, x0 + w, y0 + h)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/memes/grid.rs"]
mod tests;
