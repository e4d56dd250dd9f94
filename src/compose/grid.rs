use crate::foundation::{
    core::CellSize,
    error::{CollageError, CollageResult},
};

/// Geometry of a row-major collage grid.
///
/// The grid is `side` cells wide with `side = ceil(sqrt(count))`. Only the rows that
/// hold at least one image are kept, so the height is `side` rows or, when the last
/// row would be empty, `side - 1` rows. No more than one row can ever be dropped since
/// `(side - 1)^2 < count`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSpec {
    pub cell: CellSize,
    pub count: u32,
    /// Cells per row; also the row count of the untrimmed square.
    pub side: u32,
    /// Rows actually holding images.
    pub rows: u32,
}

impl GridSpec {
    pub fn new(count: usize, cell: CellSize) -> CollageResult<Self> {
        if count == 0 {
            return Err(CollageError::empty_result("no images to place on the grid"));
        }
        let count = u32::try_from(count)
            .map_err(|_| CollageError::config(format!("too many images for one grid: {count}")))?;
        let side = ceil_sqrt(count);
        if side.checked_mul(cell.px()).is_none() {
            return Err(CollageError::config("collage canvas too large"));
        }

        Ok(Self {
            cell,
            count,
            side,
            rows: count.div_ceil(side),
        })
    }

    /// Edge of the untrimmed square canvas, `side * cell`.
    pub fn dim(&self) -> u32 {
        self.side * self.cell.px()
    }

    pub fn width(&self) -> u32 {
        self.dim()
    }

    pub fn height(&self) -> u32 {
        self.rows * self.cell.px()
    }

    /// `true` when one fully empty trailing row was cut from the square.
    pub fn is_trimmed(&self) -> bool {
        self.rows < self.side
    }

    /// `(column, row)` of the `index`-th image.
    pub fn cell_of(&self, index: u32) -> (u32, u32) {
        (index % self.side, index / self.side)
    }

    /// Top-left pixel of the `index`-th image.
    pub fn origin_of(&self, index: u32) -> (u32, u32) {
        let (col, row) = self.cell_of(index);
        (col * self.cell.px(), row * self.cell.px())
    }
}

/// Smallest `s` with `s * s >= n`.
pub fn ceil_sqrt(n: u32) -> u32 {
    let n = u64::from(n);
    let r = n.isqrt();
    let s = if r * r < n { r + 1 } else { r };
    s as u32
}
