//! CLI command implementations

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use incgraph_core::IncludeGraph;
use incgraph_indexer::{Settings, WalkSummary, Walker};
use incgraph_server::{IncGraphServer, ServerConfig};

pub fn load_settings(config: Option<&Path>) -> anyhow::Result<Settings> {
    match config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("cannot load settings from {}", path.display())),
        None => Ok(Settings::default()),
    }
}

/// Validate settings, then walk every root into a fresh graph.
fn build_graph(settings: &Settings) -> anyhow::Result<(IncludeGraph, WalkSummary)> {
    settings.validate().context("invalid configuration")?;

    let working_dir = std::env::current_dir().context("cannot determine working directory")?;
    let walker = Walker::new(settings.scan_options(&working_dir))?;
    let mut graph = IncludeGraph::new(settings.graph_options()?);

    tracing::info!(
        "Scanning {} root(s) for {}",
        settings.scan.roots.len(),
        settings.scan.patterns.join(" ")
    );
    let summary = walker.walk(&mut graph)?;
    Ok((graph, summary))
}

pub async fn serve(
    settings: Settings,
    host: String,
    port: u16,
    open: bool,
    write: Option<PathBuf>,
) -> anyhow::Result<()> {
    let (graph, _) = build_graph(&settings)?;
    let document = graph.to_document();

    if let Some(path) = write {
        document.write_to(&path)?;
        tracing::info!("Graph written to {}", path.display());
    }

    let config = ServerConfig { host, port };
    let url = config.page_url();
    let server = IncGraphServer::new(document, config);

    if open {
        // Let the listener bind first
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(300)).await;
            if let Err(e) = open::that(&url) {
                tracing::warn!("Cannot open browser at {}: {}", url, e);
            }
        });
    }

    server.start().await
}

pub fn export(settings: Settings, output: Option<PathBuf>) -> anyhow::Result<()> {
    let (graph, _) = build_graph(&settings)?;
    let document = graph.to_document();

    match output {
        Some(path) => {
            document.write_to(&path)?;
            tracing::info!("Graph written to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", document.to_json()?)?;
        }
    }
    Ok(())
}

pub fn index(settings: Settings) -> anyhow::Result<()> {
    let (graph, summary) = build_graph(&settings)?;

    println!("{}", graph);
    println!("files scanned:       {}", summary.files_scanned);
    println!("files failed:        {}", summary.files_failed);
    println!("directories skipped: {}", summary.directories_skipped);
    println!("includes:            {}", summary.includes);
    println!("unresolved:          {}", summary.unresolved);
    Ok(())
}
