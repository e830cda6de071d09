//! `entity-lookup`: classify terms and run one-off searches against an
//! entity registry endpoint.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;

use entity_lookup::{
    EntityLookup, HttpSearchBackend, LookupConfig, LookupError, PaginationMode, SearchOutcome,
    classify, validate,
};

#[derive(Parser, Debug)]
#[command(name = "entity-lookup")]
#[command(about = "Search a business register by ABN, ACN or entity name")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show how a term would be classified and validated
    Classify {
        term: String,
    },
    /// Run one search and print the requested page
    Search {
        term: String,

        /// Search endpoint URL (http or https)
        #[arg(long)]
        endpoint: String,

        /// 1-based page to print
        #[arg(long, default_value_t = 1)]
        page: usize,

        #[arg(long)]
        page_size: Option<usize>,

        /// Ask the endpoint for one page at a time
        #[arg(long)]
        server_side: bool,

        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Select this row id and print it instead of the page
        #[arg(long)]
        select: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match Cli::parse().command {
        Command::Classify { term } => classify_term(&term),
        Command::Search {
            term,
            endpoint,
            page,
            page_size,
            server_side,
            config,
            select,
        } => {
            let config = load_config(config, page_size, server_side)?;
            run_search(config, &endpoint, &term, page, select.as_deref()).await
        }
    }
}

fn classify_term(term: &str) -> Result<()> {
    let kind = classify(term);
    let verdict = validate(term, kind, &LookupConfig::default().validation_rules());
    let message = verdict.as_ref().err().map(ToString::to_string);

    let report = json!({
        "term": term,
        "kind": kind,
        "searchType": kind.search_type(),
        "placeholder": kind.placeholder(),
        "searchButton": kind.search_button_label(),
        "valid": verdict.is_ok(),
        "message": message,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn load_config(
    path: Option<PathBuf>,
    page_size: Option<usize>,
    server_side: bool,
) -> Result<LookupConfig> {
    let base = match path {
        Some(path) => {
            let document = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            LookupConfig::from_json(&document)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        }
        None => LookupConfig::default(),
    };

    let mut builder = base.into_builder();
    if let Some(page_size) = page_size {
        builder = builder.page_size(page_size);
    }
    if server_side {
        builder = builder.pagination_mode(PaginationMode::ServerSide);
    }

    builder.build().context("Invalid lookup configuration")
}

async fn run_search(
    config: LookupConfig,
    endpoint: &str,
    term: &str,
    page: usize,
    select: Option<&str>,
) -> Result<()> {
    let backend = match config.request_timeout() {
        Some(timeout) => HttpSearchBackend::with_timeout(endpoint, timeout),
        None => HttpSearchBackend::new(endpoint),
    }
    .context("Failed to create search backend")?;

    let lookup = EntityLookup::new(config, backend);
    let events = tokio::spawn(log_events(lookup.subscribe()));

    lookup.input(term)?;
    let outcome = match lookup.search().await {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::debug!(error = %err, "Search failed");
            bail!("{}", err.user_message());
        }
    };

    let output = match (outcome, select) {
        (SearchOutcome::NoResults, _) => json!({
            "message": lookup.no_results_message(),
        }),
        (_, Some(row_id)) => {
            let row = lookup.select(row_id).map_err(|e| match e {
                LookupError::NotFound(id) => anyhow::anyhow!("No result with id '{id}'"),
                other => anyhow::Error::new(other),
            })?;
            json!({
                "selected": row,
                "formattedIdentifier": row.formatted_identifier(),
            })
        }
        _ => {
            let current = if page > 1 {
                lookup.go_to_page(page).await?
            } else {
                lookup.current_page()
            };
            let state = lookup.state();
            json!({
                "page": current,
                "totalPages": current.total_pages(),
                "showPagination": state.show_pagination(),
                "pageNumbers": state.paginator().page_numbers(),
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    events.abort();
    Ok(())
}

async fn log_events(mut receiver: tokio::sync::broadcast::Receiver<entity_lookup::LookupEvent>) {
    while let Ok(event) = receiver.recv().await {
        match serde_json::to_string(&event) {
            Ok(payload) => tracing::debug!(event = event.event_name(), %payload, "Lookup event"),
            Err(err) => tracing::warn!(error = %err, "Failed to serialize lookup event"),
        }
    }
}
