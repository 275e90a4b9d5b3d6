use crate::search::criteria::DateStamp;
use anyhow::{Context, bail};
use serde::Deserialize;
use std::path::Path;

/// Application configuration, loaded once from JSON and validated before
/// any search runs. Every recognized field is typed here; unknown fields
/// in the file are rejected.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// Search endpoint returning the heatmap facet.
    pub search_base_url: String,
    /// Export endpoint returning matching documents as CSV.
    pub export_base_url: String,
    /// Soft maximum for the heatmap grid size (`a.hm.limit`).
    pub heatmap_facet_limit: u32,
    /// Maximum documents per CSV export (`d.docs.limit`).
    pub csv_docs_limit: u32,
    /// Span fraction for the inner density-focus box, in (0, 1].
    pub ratio_inner_bbox: f64,
    /// Default date window applied when the caller gives none.
    pub min_date: DateStamp,
    pub max_date: DateStamp,
    /// CRS the weighted samples are reprojected into for rendering.
    pub target_epsg: i32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            search_base_url: "http://localhost:8080/tweets/search".to_string(),
            export_base_url: "http://localhost:8080/tweets/export".to_string(),
            heatmap_facet_limit: 100,
            csv_docs_limit: 1000,
            ratio_inner_bbox: 0.9,
            min_date: DateStamp {
                year: 2000,
                month: 1,
                day: 1,
            },
            max_date: DateStamp {
                year: 2016,
                month: 12,
                day: 31,
            },
            target_epsg: 3857,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config {:?}", path))?;
        let config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("could not parse config {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if !(self.ratio_inner_bbox > 0.0 && self.ratio_inner_bbox <= 1.0) {
            bail!(
                "ratioInnerBbox must be in (0, 1], got {}",
                self.ratio_inner_bbox
            );
        }
        if self.ratio_inner_bbox < 0.5 {
            bail!(
                "ratioInnerBbox below 0.5 produces an inverted inner box, got {}",
                self.ratio_inner_bbox
            );
        }
        if self.min_date > self.max_date {
            bail!(
                "minDate {} is after maxDate {}",
                self.min_date,
                self.max_date
            );
        }
        if self.heatmap_facet_limit == 0 {
            bail!("heatmapFacetLimit must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(body: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("appConfig.json");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn defaults_pass_validation() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn loads_partial_config_over_defaults() {
        let (_dir, path) = write_config(
            r#"{
                "searchBaseUrl": "https://example.org/search",
                "heatmapFacetLimit": 50,
                "ratioInnerBbox": 0.8
            }"#,
        );
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.search_base_url, "https://example.org/search");
        assert_eq!(config.heatmap_facet_limit, 50);
        assert_eq!(config.ratio_inner_bbox, 0.8);
        // untouched defaults
        assert_eq!(config.csv_docs_limit, 1000);
        assert_eq!(config.target_epsg, 3857);
    }

    #[test]
    fn rejects_out_of_range_ratio() {
        let (_dir, path) = write_config(r#"{ "ratioInnerBbox": 1.5 }"#);
        assert!(Config::from_file(&path).is_err());

        let (_dir, path) = write_config(r#"{ "ratioInnerBbox": 0.3 }"#);
        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn rejects_inverted_date_window() {
        let (_dir, path) = write_config(
            r#"{ "minDate": "2017-01-01", "maxDate": "2016-01-01" }"#,
        );
        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn rejects_unknown_fields() {
        let (_dir, path) = write_config(r#"{ "tileSize": 256 }"#);
        assert!(Config::from_file(&path).is_err());
    }
}
