use serde::{Deserialize, Serialize};

/// The one true EPSG:4326 world extent `[-180, -90, 180, 90]`.
pub const WORLD: GeoExtent = GeoExtent {
    minx: -180.0,
    miny: -90.0,
    maxx: 180.0,
    maxy: 90.0,
};

/// Axis-aligned geographic bounding box in degrees (lon/lat).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoExtent {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl From<(f64, f64, f64, f64)> for GeoExtent {
    fn from(extent: (f64, f64, f64, f64)) -> Self {
        GeoExtent {
            minx: extent.0, // minx
            miny: extent.1, // miny
            maxx: extent.2, // maxx
            maxy: extent.3, // maxy
        }
    }
}

impl GeoExtent {
    pub fn new(minx: f64, miny: f64, maxx: f64, maxy: f64) -> Self {
        GeoExtent {
            minx,
            miny,
            maxx,
            maxy,
        }
    }

    pub fn width(&self) -> f64 {
        self.maxx - self.minx
    }

    pub fn height(&self) -> f64 {
        self.maxy - self.miny
    }

    /// False when the min/max pairs are inverted on either axis, e.g. the
    /// inner box produced by [`GeoExtent::inner_box`] with a ratio below 0.5.
    pub fn is_valid(&self) -> bool {
        self.minx <= self.maxx && self.miny <= self.maxy
    }

    /// Normalizes an `EPSG:4326` extent which may stem from multiple worlds
    /// so that the returned extent always lies within the bounds of the one
    /// true world extent `[-180, -90, 180, 90]`.
    ///
    /// A box that is already inside the valid single world is returned
    /// unchanged. Width and height are clamped to one world span first, so a
    /// single out-of-range side is corrected by at most one wrap:
    ///
    /// ```
    /// use heatgrid::geometry::extent::GeoExtent;
    ///
    /// // valid extent in, returned as-is:
    /// let e = GeoExtent::new(-160.0, -70.0, 150.0, 70.0);
    /// assert_eq!(e.normalize(), e);
    ///
    /// // shifted one degree westwards, returns one-true world:
    /// let e = GeoExtent::new(-181.0, -90.0, 179.0, 90.0);
    /// assert_eq!(e.normalize(), GeoExtent::new(-180.0, -90.0, 180.0, 90.0));
    ///
    /// // multiple worlds, returns one-true world:
    /// let e = GeoExtent::new(-360.0, -90.0, 180.0, 90.0);
    /// assert_eq!(e.normalize(), GeoExtent::new(-180.0, -90.0, 180.0, 90.0));
    /// ```
    ///
    /// Precondition: min/max must not be swapped on either axis; such input
    /// is the caller's bug and the output is unspecified.
    pub fn normalize(&self) -> GeoExtent {
        let mut minx = self.minx;
        let mut miny = self.miny;
        let mut maxx = self.maxx;
        let mut maxy = self.maxy;
        let width = (maxx - minx).min(360.0);
        let height = (maxy - miny).min(180.0);

        if outside_lon_range(minx) {
            minx = clamp_lon(minx);
            maxx = minx + width;
        } else if outside_lon_range(maxx) {
            maxx = clamp_lon(maxx);
            minx = maxx - width;
        }

        if outside_lat_range(miny) {
            miny = clamp_lat(miny);
            maxy = miny + height;
        } else if outside_lat_range(maxy) {
            maxy = clamp_lat(maxy);
            miny = maxy - height;
        }

        GeoExtent {
            minx,
            miny,
            maxx,
            maxy,
        }
    }

    /// Shrinks this box towards its interior, keeping `ratio` of the span
    /// between each inner edge and the opposite outer edge:
    /// `inner_min = min + (1 - ratio) * d`, `inner_max = min + ratio * d`.
    ///
    /// With `ratio < 0.5` the result is inverted (`minx > maxx`); callers
    /// must check [`GeoExtent::is_valid`] if the ratio is not under their
    /// control.
    pub fn inner_box(&self, ratio: f64) -> GeoExtent {
        let dx = self.width();
        let dy = self.height();
        GeoExtent {
            minx: self.minx + (1.0 - ratio) * dx,
            miny: self.miny + (1.0 - ratio) * dy,
            maxx: self.minx + ratio * dx,
            maxy: self.miny + ratio * dy,
        }
    }
}

fn outside_lon_range(lon: f64) -> bool {
    lon < -180.0 || lon > 180.0
}

fn outside_lat_range(lat: f64) -> bool {
    lat < -90.0 || lat > 90.0
}

fn clamp_lon(lon: f64) -> f64 {
    lon.clamp(-180.0, 180.0)
}

fn clamp_lat(lat: f64) -> f64 {
    lat.clamp(-90.0, 90.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_keeps_world_extent_untouched() {
        assert_eq!(WORLD.normalize(), WORLD);
    }

    #[test]
    fn normalize_keeps_valid_extent_untouched() {
        let e = GeoExtent::new(-160.0, -70.0, 150.0, 70.0);
        assert_eq!(e.normalize(), e);
    }

    #[test]
    fn normalize_corrects_one_degree_west_shift() {
        let e = GeoExtent::new(-181.0, -90.0, 179.0, 90.0);
        assert_eq!(e.normalize(), WORLD);
    }

    #[test]
    fn normalize_corrects_one_degree_east_shift() {
        let e = GeoExtent::new(-179.0, -90.0, 181.0, 90.0);
        assert_eq!(e.normalize(), WORLD);
    }

    #[test]
    fn normalize_corrects_full_world_shift() {
        let e = GeoExtent::new(-720.0, -90.0, -360.0, 90.0);
        assert_eq!(e.normalize(), WORLD);
    }

    #[test]
    fn normalize_collapses_multiple_worlds() {
        let e = GeoExtent::new(-360.0, -90.0, 180.0, 90.0);
        assert_eq!(e.normalize(), WORLD);
    }

    #[test]
    fn normalize_corrects_south_shift() {
        let e = GeoExtent::new(-180.0, -91.0, 180.0, 89.0);
        assert_eq!(e.normalize(), WORLD);
    }

    #[test]
    fn normalize_corrects_both_axes_oversized() {
        let e = GeoExtent::new(-360.0, -180.0, 180.0, 90.0);
        assert_eq!(e.normalize(), WORLD);
    }

    #[test]
    fn normalize_is_idempotent() {
        let cases = [
            GeoExtent::new(-181.0, -90.0, 179.0, 90.0),
            GeoExtent::new(-360.0, -90.0, 180.0, 90.0),
            GeoExtent::new(-160.0, -70.0, 150.0, 70.0),
            GeoExtent::new(123.4, -45.6, 543.2, 91.0),
            WORLD,
        ];
        for e in cases {
            let once = e.normalize();
            assert_eq!(once.normalize(), once, "not idempotent for {:?}", e);
        }
    }

    #[test]
    fn normalize_output_is_within_world_bounds() {
        let cases = [
            GeoExtent::new(-1000.0, -500.0, 1000.0, 500.0),
            GeoExtent::new(-181.0, -91.0, -180.5, -90.5),
            GeoExtent::new(179.0, -45.0, 361.0, 45.0),
        ];
        for e in cases {
            let n = e.normalize();
            assert!(n.minx >= -180.0 && n.minx <= n.maxx && n.maxx <= 180.0, "lon out of range for {:?} -> {:?}", e, n);
            assert!(n.miny >= -90.0 && n.miny <= n.maxy && n.maxy <= 90.0, "lat out of range for {:?} -> {:?}", e, n);
        }
    }

    #[test]
    fn normalize_preserves_width_of_shifted_box() {
        // 20 degrees wide, shifted one world west
        let e = GeoExtent::new(-370.0, 10.0, -350.0, 30.0);
        let n = e.normalize();
        assert_eq!(n.width(), 20.0);
        assert_eq!(n, GeoExtent::new(-180.0, 10.0, -160.0, 30.0));
    }

    #[test]
    fn inner_box_at_ratio_090() {
        let outer = GeoExtent::new(0.0, 0.0, 10.0, 10.0);
        let inner = outer.inner_box(0.9);
        assert!((inner.minx - 1.0).abs() < 1e-12);
        assert!((inner.maxx - 9.0).abs() < 1e-12);
        assert!((inner.miny - 1.0).abs() < 1e-12);
        assert!((inner.maxy - 9.0).abs() < 1e-12);
        assert!(inner.is_valid());
    }

    #[test]
    fn inner_box_at_ratio_half_collapses_to_center() {
        let outer = GeoExtent::new(-10.0, -10.0, 10.0, 10.0);
        let inner = outer.inner_box(0.5);
        assert_eq!(inner.minx, inner.maxx);
        assert_eq!(inner.miny, inner.maxy);
        assert_eq!(inner.minx, 0.0);
    }

    #[test]
    fn inner_box_below_half_ratio_inverts() {
        let outer = GeoExtent::new(0.0, 0.0, 10.0, 10.0);
        let inner = outer.inner_box(0.3);
        assert!(!inner.is_valid());
    }

    #[test]
    fn extent_from_tuple() {
        let e = GeoExtent::from((-1.0, -2.0, 3.0, 4.0));
        assert_eq!(e, GeoExtent::new(-1.0, -2.0, 3.0, 4.0));
    }
}
