use crate::config::Config;
use crate::heatmap::grid::CountGrid;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Body of a search response. The heatmap facet is optional: a query with
/// no spatial matches simply omits it.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "a.hm")]
    pub heatmap: Option<CountGrid>,
    #[serde(rename = "a.matchDocs", default)]
    pub match_docs: u64,
}

#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, params: &[(String, String)]) -> anyhow::Result<SearchResponse>;
    async fn export_csv(&self, params: &[(String, String)]) -> anyhow::Result<String>;
}

/// HTTP GET transport against the search API's search and export endpoints.
pub struct HttpSearchBackend {
    client: reqwest::Client,
    search_url: String,
    export_url: String,
}

impl HttpSearchBackend {
    pub fn new(config: &Config) -> Self {
        HttpSearchBackend {
            client: reqwest::Client::new(),
            search_url: config.search_base_url.clone(),
            export_url: config.export_base_url.clone(),
        }
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn search(&self, params: &[(String, String)]) -> anyhow::Result<SearchResponse> {
        debug!(url = %self.search_url, ?params, "search request");
        let response = self
            .client
            .get(&self.search_url)
            .query(params)
            .send()
            .await
            .with_context(|| format!("search request to {} failed", self.search_url))?
            .error_for_status()
            .context("search request rejected")?;

        response
            .json::<SearchResponse>()
            .await
            .context("could not parse search response")
    }

    async fn export_csv(&self, params: &[(String, String)]) -> anyhow::Result<String> {
        debug!(url = %self.export_url, ?params, "export request");
        let response = self
            .client
            .get(&self.export_url)
            .query(params)
            .send()
            .await
            .with_context(|| format!("export request to {} failed", self.export_url))?
            .error_for_status()
            .context("export request rejected")?;

        response.text().await.context("could not read export body")
    }
}

/// Writes the exported CSV to disk and returns the number of data records
/// it contains.
pub async fn save_export(csv_text: &str, path: &Path) -> anyhow::Result<usize> {
    tokio::fs::write(path, csv_text)
        .await
        .with_context(|| format!("could not write export to {:?}", path))?;

    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    Ok(reader.records().filter_map(Result::ok).count())
}
