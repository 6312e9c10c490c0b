//! SKG CLI - Command-line interface
//!
//! Usage:
//!   skg run [QUERY] [--limit N] [--focus NODE] [--dump [PATH]]
//!           [--graph-dir DIR] [--config FILE]

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use skg_core::AppConfig;
use skg_extractor::{HeuristicPipeline, KnowledgeExtractor};
use skg_pipeline::{report, Pipeline};
use skg_scrape::PageScraper;
use skg_search::GoogleSearchClient;
use tracing::info;

#[derive(Parser)]
#[command(name = "skg")]
#[command(about = "Search-driven knowledge graph builder")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the web and build a knowledge graph from the results
    Run {
        /// Search query (the configured fallback is used when omitted)
        query: Option<String>,

        /// Number of search results to request
        #[arg(long)]
        limit: Option<usize>,

        /// Node whose neighborhood is rendered for each page
        #[arg(long)]
        focus: Option<String>,

        /// Write the collected pages to a text dump (default: output.txt)
        #[arg(long)]
        dump: Option<Option<PathBuf>>,

        /// Directory for DOT graph files
        #[arg(long)]
        graph_dir: Option<PathBuf>,

        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            query,
            limit,
            focus,
            dump,
            graph_dir,
            config,
        } => {
            let mut config = match config {
                Some(path) => AppConfig::from_file(path)?.with_env_override()?,
                None => AppConfig::from_env()?,
            };

            if let Some(limit) = limit {
                config.search.num_results = limit;
            }
            if let Some(focus) = focus {
                config.graph.focus_node = focus;
            }
            if let Some(dir) = graph_dir {
                config.graph.output_dir = dir;
            }

            init_tracing(&config);

            let search = GoogleSearchClient::new(&config.search);
            let fetcher = PageScraper::new(&config.fetch)?;
            let extractor = KnowledgeExtractor::new(Arc::new(HeuristicPipeline::new()));

            let dump_path = dump.map(|path| path.unwrap_or_else(|| config.pipeline.dump_path.clone()));

            let pipeline =
                Pipeline::new(Arc::new(search), Arc::new(fetcher), extractor, config);
            let output = pipeline.run(query.as_deref().unwrap_or("")).await?;

            if let Some(path) = dump_path {
                report::write_dump(&output.pages, &path)?;
                info!("Wrote text dump to {}", path.display());
            }
        }
    }

    Ok(())
}

/// Initialize the tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise the configured level applies.
fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
