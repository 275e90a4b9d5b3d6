use super::grid::CountGrid;
use super::rescale::{grid_min_max, rescale};
use crate::geometry::projection::reproject;
use serde::Serialize;

/// One populated grid cell, reprojected to the render CRS with its raw
/// match count and normalized render weight.
#[derive(Debug, Clone, Serialize)]
pub struct WeightedSample {
    pub x: f64,
    pub y: f64,
    pub raw_count: i64,
    pub weight: f64,
}

/// Converts a response grid into weighted cell-center points for the
/// rendering sink.
///
/// Row 0 of the grid is the northernmost row, so the row index is inverted
/// while latitude climbs; cells with no data or a zero count emit nothing.
/// A grid without counts yields an empty Vec, which is a valid "no heatmap"
/// outcome rather than an error.
pub fn to_samples(grid: &CountGrid, target_epsg: i32) -> anyhow::Result<Vec<WeightedSample>> {
    if !grid.has_counts() || grid.rows == 0 || grid.columns == 0 {
        return Ok(Vec::new());
    }

    let from_epsg = grid.epsg_code()?;
    let min_max = grid_min_max(grid);
    let extent = grid.extent();
    let sx = extent.width() / grid.columns as f64;
    let sy = extent.height() / grid.rows as f64;

    let mut samples = Vec::new();
    for i in 0..grid.rows {
        for j in 0..grid.columns {
            let raw = grid.count(grid.rows - 1 - i, j);
            if raw <= 0 {
                continue;
            }

            // cell centers, half a cell in from the lower-left corner
            let lat = extent.miny + i as f64 * sy + 0.5 * sy;
            let lon = extent.minx + j as f64 * sx + 0.5 * sx;
            let (x, y) = reproject(lon, lat, from_epsg, target_epsg)?;

            samples.push(WeightedSample {
                x,
                y,
                raw_count: raw,
                weight: rescale(raw, min_max),
            });
        }
    }

    Ok(samples)
}
