// src/site/mod.rs

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, warn};

use crate::config::SiteConfig;
use crate::fetch::{fetch_table, fetch_tables, Location};
use crate::model::count_valid;
use crate::render::{render, Container, RenderContext};
use crate::schema::Source;

pub mod splice;

pub use splice::splice;

/// Outcome of a build. Failed sections were logged and left untouched.
#[derive(Debug, Default, Serialize)]
pub struct BuildReport {
    pub rendered: Vec<Container>,
    pub failed: Vec<Container>,
    pub pages: Vec<PathBuf>,
}

/// Per-source result of `check`.
#[derive(Debug, Serialize)]
pub struct SourceReport {
    pub source: Source,
    pub location: String,
    pub records: usize,
    pub valid: usize,
    pub error: Option<String>,
}

impl SourceReport {
    pub fn skipped(&self) -> usize {
        self.records.saturating_sub(self.valid)
    }
}

fn source_location(config: &SiteConfig, source: Source) -> Result<Location> {
    Location::parse(&config.base)?.join(config.sources.path(source))
}

fn sources_for(config: &SiteConfig, containers: &[Container]) -> Result<Vec<(Source, Location)>> {
    let mut out: Vec<(Source, Location)> = Vec::new();
    for c in containers {
        let source = c.source();
        if out.iter().all(|(s, _)| *s != source) {
            out.push((source, source_location(config, source)?));
        }
    }
    Ok(out)
}

/// Fetch every source the pages need, render every container, and splice
/// the fragments into the configured pages.
pub async fn build(config: &SiteConfig, client: &Client) -> Result<BuildReport> {
    let containers = config.containers();
    let tables = fetch_tables(client, sources_for(config, &containers)?).await;

    let ctx = RenderContext {
        today: config.today(),
        assets: &config.assets,
    };
    let mut report = BuildReport::default();
    let mut fragments: HashMap<Container, String> = HashMap::new();
    for container in containers {
        match tables.get(&container.source()) {
            Some(Ok(table)) => match render(container, table, &ctx) {
                Ok(html) => {
                    fragments.insert(container, html);
                    report.rendered.push(container);
                }
                Err(e) => {
                    error!(container = %container, error = %e, "render failed");
                    report.failed.push(container);
                }
            },
            _ => {
                warn!(container = %container, source = %container.source(), "source unavailable; section skipped");
                report.failed.push(container);
            }
        }
    }

    for page in &config.pages {
        let mut html = fs::read_to_string(&page.template)
            .await
            .with_context(|| format!("reading template {}", page.template.display()))?;
        for container in &page.containers {
            let Some(fragment) = fragments.get(container) else {
                continue;
            };
            match splice(&html, container.id(), fragment) {
                Ok(spliced) => html = spliced,
                Err(e) => error!(page = %page.template.display(), container = %container, error = %e, "splice failed"),
            }
        }

        let output = page.output_path();
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(output, html)
            .await
            .with_context(|| format!("writing {}", output.display()))?;
        info!(page = %output.display(), "wrote page");
        report.pages.push(output.to_path_buf());
    }

    info!(
        rendered = report.rendered.len(),
        failed = report.failed.len(),
        pages = report.pages.len(),
        "build finished"
    );
    Ok(report)
}

/// Fetch one container's source and render just that fragment.
pub async fn render_one(config: &SiteConfig, client: &Client, container: Container) -> Result<String> {
    let location = source_location(config, container.source())?;
    let table = fetch_table(client, &location).await?;
    let ctx = RenderContext {
        today: config.today(),
        assets: &config.assets,
    };
    render(container, &table, &ctx).with_context(|| format!("rendering {container}"))
}

/// Fetch and validate every source.
pub async fn check(config: &SiteConfig, client: &Client) -> Result<Vec<SourceReport>> {
    let mut sources = Vec::with_capacity(Source::ALL.len());
    for source in Source::ALL {
        sources.push((source, source_location(config, source)?));
    }
    let locations: HashMap<Source, String> =
        sources.iter().map(|(s, l)| (*s, l.to_string())).collect();
    let mut tables = fetch_tables(client, sources).await;

    let mut out = Vec::with_capacity(Source::ALL.len());
    for source in Source::ALL {
        let location = locations.get(&source).cloned().unwrap_or_default();
        let report = match tables.remove(&source) {
            Some(Ok(table)) => match count_valid(source, &table) {
                Ok(valid) => SourceReport {
                    source,
                    location,
                    records: table.len(),
                    valid,
                    error: None,
                },
                Err(e) => SourceReport {
                    source,
                    location,
                    records: table.len(),
                    valid: 0,
                    error: Some(e.to_string()),
                },
            },
            Some(Err(e)) => SourceReport {
                source,
                location,
                records: 0,
                valid: 0,
                error: Some(format!("{e:#}")),
            },
            None => SourceReport {
                source,
                location,
                records: 0,
                valid: 0,
                error: Some("not fetched".into()),
            },
        };
        out.push(report);
    }
    Ok(out)
}
