use super::filter::SpatialFilters;
use crate::geometry::extent::GeoExtent;
use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar date rendered as `YYYY-MM-DD`, the format the search API's
/// `q.time` parameter expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateStamp {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateStamp {
    pub fn new(year: i32, month: u32, day: u32) -> anyhow::Result<Self> {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            bail!("invalid date {}-{}-{}", year, month, day);
        }
        Ok(DateStamp { year, month, day })
    }
}

impl fmt::Display for DateStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for DateStamp {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let mut parts = s.splitn(3, '-');
        let year = parts
            .next()
            .and_then(|p| p.parse().ok())
            .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", s))?;
        let month = parts
            .next()
            .and_then(|p| p.parse().ok())
            .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", s))?;
        let day = parts
            .next()
            .and_then(|p| p.parse().ok())
            .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", s))?;
        DateStamp::new(year, month, day)
    }
}

impl TryFrom<String> for DateStamp {
    type Error = anyhow::Error;

    fn try_from(s: String) -> anyhow::Result<Self> {
        s.parse()
    }
}

impl From<DateStamp> for String {
    fn from(d: DateStamp) -> String {
        d.to_string()
    }
}

/// What the user is asking for: keyword plus date window. An explicit value
/// passed into each call, recomputed per interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria {
    pub keyword: String,
    pub min_date: DateStamp,
    pub max_date: DateStamp,
}

impl SearchCriteria {
    /// An empty keyword searches everything.
    pub fn keyword_or_wildcard(&self) -> &str {
        if self.keyword.is_empty() {
            "*"
        } else {
            &self.keyword
        }
    }
}

fn range_param(e: &GeoExtent) -> String {
    format!("[{},{} TO {},{}]", e.minx, e.miny, e.maxx, e.maxy)
}

/// Wire parameters for a heatmap search request: `q.text`, `q.time`,
/// `q.geo`, the inner density-focus filter `a.hm.filter` and the facet
/// soft limit `a.hm.limit`.
pub fn search_params(
    criteria: &SearchCriteria,
    filters: &SpatialFilters,
    heatmap_facet_limit: u32,
) -> Vec<(String, String)> {
    let mut params = base_params(criteria, filters);
    params.push(("a.hm.limit".to_string(), heatmap_facet_limit.to_string()));
    params
}

/// Wire parameters for a CSV export request: the same query, capped by
/// `d.docs.limit` instead of faceted.
pub fn export_params(
    criteria: &SearchCriteria,
    filters: &SpatialFilters,
    csv_docs_limit: u32,
) -> Vec<(String, String)> {
    let mut params = base_params(criteria, filters);
    params.push(("d.docs.limit".to_string(), csv_docs_limit.to_string()));
    params
}

fn base_params(criteria: &SearchCriteria, filters: &SpatialFilters) -> Vec<(String, String)> {
    vec![
        (
            "q.text".to_string(),
            criteria.keyword_or_wildcard().to_string(),
        ),
        (
            "q.time".to_string(),
            format!("[{} TO {}]", criteria.min_date, criteria.max_date),
        ),
        ("q.geo".to_string(), range_param(&filters.query_extent)),
        (
            "a.hm.filter".to_string(),
            range_param(&filters.density_focus),
        ),
    ]
}
