use crate::geometry::extent::{GeoExtent, WORLD};

/// The two canonical boxes a query is built from, plus the inner
/// density-focus box derived from the query extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialFilters {
    /// Normalized viewport, the region the heatmap facet is requested for.
    pub heatmap_extent: GeoExtent,
    /// Normalized user-adjustable box, the primary `q.geo` filter.
    pub query_extent: GeoExtent,
    /// Inner box of the query extent, sent as the secondary facet filter.
    pub density_focus: GeoExtent,
}

/// Reconciles the current viewport and the user's adjustable query box into
/// the filter set for one search cycle.
///
/// Returns `None` when no adjustable box exists; the caller must abort the
/// search and tell the user rather than fall back to a full-world query.
/// At zoom levels of 1 and below the viewport spans several world copies,
/// so it is replaced by the world extent before normalizing.
pub fn build_filters(
    viewport_wgs84: GeoExtent,
    adjustable_box_wgs84: Option<GeoExtent>,
    zoom: f64,
    ratio_inner_bbox: f64,
) -> Option<SpatialFilters> {
    let adjustable_box = adjustable_box_wgs84?;

    let viewport = if zoom <= 1.0 { WORLD } else { viewport_wgs84 };
    let query_extent = adjustable_box.normalize();

    Some(SpatialFilters {
        heatmap_extent: viewport.normalize(),
        query_extent,
        density_focus: query_extent.inner_box(ratio_inner_bbox),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: GeoExtent = GeoExtent {
        minx: -30.0,
        miny: -20.0,
        maxx: 30.0,
        maxy: 20.0,
    };

    #[test]
    fn missing_adjustable_box_fails_closed() {
        assert!(build_filters(VIEWPORT, None, 5.0, 0.9).is_none());
    }

    #[test]
    fn low_zoom_overrides_viewport_with_world() {
        let filters = build_filters(VIEWPORT, Some(VIEWPORT), 1.0, 0.9).unwrap();
        assert_eq!(filters.heatmap_extent, WORLD);
        // the query box is the user's selection, never overridden
        assert_eq!(filters.query_extent, VIEWPORT);
    }

    #[test]
    fn normal_zoom_keeps_viewport() {
        let filters = build_filters(VIEWPORT, Some(VIEWPORT), 2.0, 0.9).unwrap();
        assert_eq!(filters.heatmap_extent, VIEWPORT);
    }

    #[test]
    fn wrapped_boxes_are_normalized() {
        let wrapped = GeoExtent::new(-360.0, -90.0, 180.0, 90.0);
        let filters = build_filters(wrapped, Some(wrapped), 3.0, 0.9).unwrap();
        assert_eq!(filters.heatmap_extent, WORLD);
        assert_eq!(filters.query_extent, WORLD);
    }

    #[test]
    fn density_focus_nests_inside_query_extent() {
        let query = GeoExtent::new(0.0, 0.0, 10.0, 10.0);
        let filters = build_filters(VIEWPORT, Some(query), 4.0, 0.9).unwrap();
        let inner = filters.density_focus;
        assert!(inner.is_valid());
        assert!(inner.minx > query.minx && inner.maxx < query.maxx);
        assert!(inner.miny > query.miny && inner.maxy < query.maxy);
    }
}
