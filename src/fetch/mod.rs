// src/fetch/mod.rs

use anyhow::{Context, Result};
use futures::future::join_all;
use reqwest::Client;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::{fs, task};
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::schema::Source;
use crate::table::{parse_table, Table};

/// Where a CSV resource lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    File(PathBuf),
    Remote(Url),
}

impl Location {
    /// `http(s)://` strings are remote; anything else is a filesystem path.
    pub fn parse(s: &str) -> Result<Self> {
        if s.starts_with("http://") || s.starts_with("https://") {
            let url = Url::parse(s).with_context(|| format!("parsing URL {s}"))?;
            Ok(Location::Remote(url))
        } else {
            Ok(Location::File(PathBuf::from(s)))
        }
    }

    /// Resolve `rel` against this location. A file base that is not a
    /// directory resolves against its parent.
    pub fn join(&self, rel: &str) -> Result<Self> {
        match self {
            Location::Remote(base) => {
                let url = base
                    .join(rel)
                    .with_context(|| format!("joining {rel} onto {base}"))?;
                Ok(Location::Remote(url))
            }
            Location::File(base) => {
                let rel = Path::new(rel);
                if rel.is_absolute() {
                    return Ok(Location::File(rel.to_path_buf()));
                }
                let dir = if base.is_dir() || base.as_os_str().is_empty() {
                    base.as_path()
                } else {
                    base.parent().unwrap_or(Path::new("."))
                };
                Ok(Location::File(dir.join(rel)))
            }
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::File(p) => write!(f, "{}", p.display()),
            Location::Remote(u) => write!(f, "{u}"),
        }
    }
}

async fn get_text(client: &Client, url: &Url) -> Result<String> {
    debug!(url = %url, "GET");
    client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {url}"))?
        .error_for_status()
        .with_context(|| format!("bad status from {url}"))?
        .text()
        .await
        .with_context(|| format!("reading body from {url}"))
}

/// Read the whole resource as text.
#[instrument(level = "debug", skip(client), fields(location = %location))]
pub async fn fetch_text(client: &Client, location: &Location) -> Result<String> {
    match location {
        Location::Remote(url) => get_text(client, url).await,
        Location::File(path) => fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display())),
    }
}

/// Fetch and parse one resource.
pub async fn fetch_table(client: &Client, location: &Location) -> Result<Table> {
    let text = fetch_text(client, location).await?;
    let table = parse_table(&text);
    info!(location = %location, records = table.len(), "fetched table");
    Ok(table)
}

/// Fetch every source concurrently, one task each. Failures are kept per
/// source so the caller can carry on with the rest.
pub async fn fetch_tables(
    client: &Client,
    sources: Vec<(Source, Location)>,
) -> HashMap<Source, Result<Table>> {
    let handles: Vec<_> = sources
        .into_iter()
        .map(|(source, location)| {
            let client = client.clone();
            let handle = task::spawn(async move { fetch_table(&client, &location).await });
            (source, handle)
        })
        .collect();

    let (names, handles): (Vec<Source>, Vec<_>) = handles.into_iter().unzip();
    let mut out = HashMap::with_capacity(names.len());
    for (source, joined) in names.into_iter().zip(join_all(handles).await) {
        let result = joined
            .with_context(|| format!("fetch task for {source} panicked"))
            .and_then(|r| r);
        if let Err(e) = &result {
            error!(source = %source, error = %format!("{e:#}"), "fetch failed");
        }
        out.insert(source, result);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_location() {
        assert!(matches!(
            Location::parse("https://example.org/data/").unwrap(),
            Location::Remote(_)
        ));
        assert_eq!(
            Location::parse("CSV_info/a.csv").unwrap(),
            Location::File(PathBuf::from("CSV_info/a.csv"))
        );
    }

    #[test]
    fn test_join_remote() {
        let base = Location::parse("https://example.org/site/").unwrap();
        assert_eq!(
            base.join("CSV_info/Carousel.csv").unwrap().to_string(),
            "https://example.org/site/CSV_info/Carousel.csv"
        );
    }

    #[test]
    fn test_join_file_base() {
        let tmp = tempdir().unwrap();
        let dir = Location::File(tmp.path().to_path_buf());
        assert_eq!(
            dir.join("a.csv").unwrap(),
            Location::File(tmp.path().join("a.csv"))
        );

        let file = Location::File(tmp.path().join("index.html"));
        assert_eq!(
            file.join("b.csv").unwrap(),
            Location::File(tmp.path().join("b.csv"))
        );
    }

    #[tokio::test]
    async fn test_fetch_tables_keeps_failures_separate() {
        let tmp = tempdir().unwrap();
        let good = tmp.path().join("carousel.csv");
        stdfs::write(&good, "Image,Image Title,Title\none.jpg,One,Hello\n").unwrap();

        let client = Client::new();
        let results = fetch_tables(
            &client,
            vec![
                (Source::Carousel, Location::File(good)),
                (Source::Events, Location::File(tmp.path().join("missing.csv"))),
            ],
        )
        .await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[&Source::Carousel].as_ref().unwrap().len(), 1);
        let err = results[&Source::Events].as_ref().unwrap_err();
        assert!(format!("{err:#}").contains("missing.csv"));
    }
}
