// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::time::Instant;

use anyhow::{bail, Context as _};
use serde::Serialize;
use the_conduit::config::{load_and_validate_config, SearcherBuilder};
use the_conduit::context::Context;
use tracing_subscriber::EnvFilter;

/// What the binary prints, one JSON document per run
#[derive(Serialize)]
struct Report<'a> {
    query: &'a str,
    engines: usize,
    timeout_ms: u128,
    elapsed_ms: u128,
    results: &'a [String],
    error: Option<String>,
}

/// argv[0], or the binary name when the platform passes an empty argv
fn program_name(args: &[String]) -> &str {
    args.first().map_or("conduit", String::as_str)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        let program = program_name(&args);
        eprintln!("Usage: {} <config.yaml> [query]", program);
        eprintln!("Example: {} configs/scatter-gather.yaml \"rust pipelines\"", program);
        bail!("expected a config file and an optional query");
    }

    let config_file = &args[1];
    let config = load_and_validate_config(config_file)
        .with_context(|| format!("loading {}", config_file))?;
    let query = args.get(2).map(String::as_str).unwrap_or_else(|| config.query());

    let searcher = SearcherBuilder::from_config(&config);
    let started = Instant::now();
    let summary = searcher.search(&Context::background(), query).await?;

    let report = Report {
        query,
        engines: searcher.engine_count(),
        timeout_ms: config.timeout().as_millis(),
        elapsed_ms: started.elapsed().as_millis(),
        results: &summary.results,
        error: summary.error.as_ref().map(ToString::to_string),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    // Exit non-zero when an engine failed, after the partial results are out
    summary.into_result()?;
    Ok(())
}
