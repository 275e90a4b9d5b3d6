pub mod config;
pub mod geometry;
pub mod heatmap;
pub mod search;

pub use config::Config;
pub use geometry::extent::GeoExtent;
pub use heatmap::grid::CountGrid;
pub use heatmap::samples::{WeightedSample, to_samples};
pub use search::client::{HttpSearchBackend, SearchBackend};
pub use search::criteria::SearchCriteria;
pub use search::filter::{SpatialFilters, build_filters};
