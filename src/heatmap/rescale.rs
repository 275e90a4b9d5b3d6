use super::grid::{CountGrid, SENTINEL};

/// Grid-wide count range, computed once per response grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMax {
    pub min: i64,
    pub max: i64,
}

impl MinMax {
    /// True when no positive counts exist (all-sentinel or all-zero grid)
    /// or when the grid is flat. Rescaling such a span yields 0.
    pub fn is_degenerate(&self) -> bool {
        self.max <= self.min
    }
}

/// Scans every cell of the grid. Sentinel (no-data) and zero cells are
/// excluded from the minimum; `max` starts at the sentinel so an empty grid
/// comes back degenerate instead of producing a bogus span.
pub fn grid_min_max(grid: &CountGrid) -> MinMax {
    let mut max = SENTINEL;
    let mut min = i64::MAX;
    for row in 0..grid.rows {
        for col in 0..grid.columns {
            let v = grid.count(row, col);
            if v > max {
                max = v;
            }
            if v < min && v > 0 {
                min = v;
            }
        }
    }
    MinMax { min, max }
}

/// Maps a raw count into a `[0, 1]` render weight.
///
/// The sentinel passes through unchanged so the renderer can tell "no data"
/// apart from zero intensity; zero counts and flat grids map to 0.
pub fn rescale(value: i64, min_max: MinMax) -> f64 {
    if value == SENTINEL {
        return -1.0;
    }

    if value == 0 {
        return 0.0;
    }

    if min_max.is_degenerate() {
        return 0.0;
    }

    (value - min_max.min) as f64 / (min_max.max - min_max.min) as f64
}
