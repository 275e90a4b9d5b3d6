use crate::geometry::extent::GeoExtent;
use anyhow::Context;
use serde::Deserialize;

/// Marker for "no data" cells, distinct from a true zero count.
pub const SENTINEL: i64 = -1;

fn default_projection() -> String {
    "EPSG:4326".to_string()
}

/// One search response's heatmap facet: a rectangular grid of match counts
/// over a bounding extent. Whole rows and single cells may be null on the
/// wire when the server has no documents there.
#[derive(Debug, Clone, Deserialize)]
pub struct CountGrid {
    #[serde(rename = "gridLevel", default)]
    pub grid_level: Option<u32>,
    pub rows: usize,
    pub columns: usize,
    #[serde(rename = "minX")]
    pub minx: f64,
    #[serde(rename = "minY")]
    pub miny: f64,
    #[serde(rename = "maxX")]
    pub maxx: f64,
    #[serde(rename = "maxY")]
    pub maxy: f64,
    #[serde(default = "default_projection")]
    pub projection: String,
    #[serde(rename = "counts_ints2D", default)]
    pub counts_ints2d: Option<Vec<Option<Vec<Option<i64>>>>>,
}

impl CountGrid {
    pub fn extent(&self) -> GeoExtent {
        GeoExtent::new(self.minx, self.miny, self.maxx, self.maxy)
    }

    pub fn has_counts(&self) -> bool {
        self.counts_ints2d.is_some()
    }

    /// Count at `(row, col)`, with row 0 the northernmost row. Null rows,
    /// null cells and indices past the data present all read as [`SENTINEL`].
    pub fn count(&self, row: usize, col: usize) -> i64 {
        self.counts_ints2d
            .as_ref()
            .and_then(|rows| rows.get(row))
            .and_then(|r| r.as_ref())
            .and_then(|r| r.get(col))
            .and_then(|c| *c)
            .unwrap_or(SENTINEL)
    }

    /// Numeric EPSG code of the grid's declared CRS, e.g. 4326 for
    /// `"EPSG:4326"`.
    pub fn epsg_code(&self) -> anyhow::Result<i32> {
        self.projection
            .strip_prefix("EPSG:")
            .unwrap_or(&self.projection)
            .parse::<i32>()
            .with_context(|| format!("unrecognized grid projection '{}'", self.projection))
    }
}
