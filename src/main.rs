use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use heatgrid::search::client::save_export;
use heatgrid::search::criteria::{DateStamp, export_params, search_params};
use heatgrid::{
    Config, GeoExtent, HttpSearchBackend, SearchBackend, SearchCriteria, build_filters, to_samples,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Heatmap grid client for Solr-style spatial search APIs"
)]
struct Args {
    /// Path to an appConfig.json; built-in defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct QueryArgs {
    /// Search keyword; empty matches everything
    #[arg(long, default_value = "")]
    keyword: String,

    /// Viewport bounding box: minLon,minLat,maxLon,maxLat
    #[arg(long)]
    viewport: String,

    /// User-adjusted query region: minLon,minLat,maxLon,maxLat
    #[arg(long)]
    query_bbox: Option<String>,

    /// Map zoom level; 1 and below requests the whole world
    #[arg(long, default_value_t = 4.0)]
    zoom: f64,

    /// Start of the date window (YYYY-MM-DD)
    #[arg(long)]
    from: Option<DateStamp>,

    /// End of the date window (YYYY-MM-DD)
    #[arg(long)]
    to: Option<DateStamp>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a search and emit the weighted heatmap samples as JSON
    Search {
        #[command(flatten)]
        query: QueryArgs,

        /// Write samples to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Export matching documents as CSV
    Export {
        #[command(flatten)]
        query: QueryArgs,

        /// Output CSV path
        #[arg(long, default_value = "export.csv")]
        out: PathBuf,
    },
}

fn parse_bbox(s: &str) -> anyhow::Result<GeoExtent> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .with_context(|| format!("invalid bbox '{}', expected minLon,minLat,maxLon,maxLat", s))?;
    if parts.len() != 4 {
        bail!("invalid bbox '{}', expected four comma-separated values", s);
    }
    let extent = GeoExtent::new(parts[0], parts[1], parts[2], parts[3]);
    if !extent.is_valid() {
        bail!("bbox '{}' has swapped min/max bounds", s);
    }
    Ok(extent)
}

fn resolve_query(
    query: &QueryArgs,
    config: &Config,
) -> anyhow::Result<(SearchCriteria, heatgrid::SpatialFilters)> {
    let criteria = SearchCriteria {
        keyword: query.keyword.clone(),
        min_date: query.from.unwrap_or(config.min_date),
        max_date: query.to.unwrap_or(config.max_date),
    };
    if criteria.min_date > criteria.max_date {
        bail!(
            "date window is inverted: {} is after {}",
            criteria.min_date,
            criteria.max_date
        );
    }

    let viewport = parse_bbox(&query.viewport)?;
    let adjustable_box = query
        .query_bbox
        .as_deref()
        .map(parse_bbox)
        .transpose()?;

    let filters = build_filters(viewport, adjustable_box, query.zoom, config.ratio_inner_bbox)
        .context("no query region selected; pass --query-bbox")?;
    Ok((criteria, filters))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let backend = HttpSearchBackend::new(&config);

    match args.command {
        Command::Search { query, out } => {
            let (criteria, filters) = resolve_query(&query, &config)?;
            let params = search_params(&criteria, &filters, config.heatmap_facet_limit);

            let response = backend.search(&params).await?;
            if response.match_docs < 1 {
                println!("No results found");
            } else {
                println!("{} matching documents", response.match_docs);
            }

            let samples = match &response.heatmap {
                Some(grid) => to_samples(grid, config.target_epsg)?,
                None => Vec::new(),
            };
            info!(samples = samples.len(), "heatmap samples ready");

            let body = serde_json::to_string_pretty(&samples)?;
            match out {
                Some(path) => std::fs::write(&path, body)
                    .with_context(|| format!("could not write samples to {:?}", path))?,
                None => println!("{}", body),
            }
        }
        Command::Export { query, out } => {
            let (criteria, filters) = resolve_query(&query, &config)?;
            let params = export_params(&criteria, &filters, config.csv_docs_limit);

            let csv_text = backend.export_csv(&params).await?;
            let records = save_export(&csv_text, &out).await?;
            println!("Saved {} records to {:?}", records, out);
        }
    }

    Ok(())
}
