//! SKG Pipeline - Run orchestration
//!
//! Drives one end-to-end run: resolve the query, search, then fetch and
//! process each result URL strictly in order. Fetch failures skip the URL;
//! search failures and a missing focus node abort the run.
//!
//! All collaborators are passed in explicitly, so tests can substitute
//! mock-backed implementations of the search and fetch traits.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use skg_core::{
    AppConfig, Entity, PageFetcher, PageRecord, Relationship, Result, SearchProvider, SkgError,
};
use skg_extractor::KnowledgeExtractor;
use skg_graph::{EntityGraph, RelationGraph};
use tracing::info;

pub mod report;

// ============================================================================
// Run Output
// ============================================================================

/// Everything a completed run accumulated
#[derive(Debug)]
pub struct RunOutput {
    /// Successfully fetched pages, in result order
    pub pages: Vec<PageRecord>,

    /// Union of every page's entity set
    pub entities: HashSet<Entity>,

    /// Global relationship sequence (cross-page duplicates recur)
    pub relationships: Vec<Relationship>,
}

// ============================================================================
// Pipeline
// ============================================================================

/// Orchestrates search, fetch, extraction, and reporting for one run
pub struct Pipeline {
    search: Arc<dyn SearchProvider>,
    fetcher: Arc<dyn PageFetcher>,
    extractor: KnowledgeExtractor,
    config: AppConfig,
}

impl Pipeline {
    /// Create a pipeline from its collaborators
    pub fn new(
        search: Arc<dyn SearchProvider>,
        fetcher: Arc<dyn PageFetcher>,
        extractor: KnowledgeExtractor,
        config: AppConfig,
    ) -> Self {
        Self {
            search,
            fetcher,
            extractor,
            config,
        }
    }

    /// Run the full pipeline for a query
    ///
    /// An empty query falls back to the configured default. URLs are
    /// processed one at a time; a URL whose fetch fails is skipped (the
    /// fetcher has already logged the reason). After the loop the result
    /// table goes to stdout and the entity graph DOT file is written.
    pub async fn run(&self, query: &str) -> Result<RunOutput> {
        let query = if query.trim().is_empty() {
            self.config.pipeline.fallback_query.as_str()
        } else {
            query
        };

        info!("Searching with {}: {}", self.search.name(), query);
        let urls = self.search.search(query).await?;

        std::fs::create_dir_all(&self.config.graph.output_dir)?;

        let mut pages: Vec<PageRecord> = Vec::new();
        let mut entities: HashSet<Entity> = HashSet::new();
        let mut relationships: Vec<Relationship> = Vec::new();

        for (position, url) in urls.iter().enumerate() {
            info!("Processing {}/{}: {}", position + 1, urls.len(), url);

            let Ok(page) = self.fetcher.fetch(url).await else {
                continue;
            };

            let extraction = self.extractor.extract(&page.text)?;

            entities.extend(extraction.entities);
            relationships.extend(extraction.relationships.iter().cloned());

            self.write_neighborhood(&extraction.relationships, position + 1)?;
            pages.push(page);
        }

        println!("{}", report::render_table(&pages));

        let entity_graph = EntityGraph::build(&entities, &relationships);
        let entity_path = self.graph_path("entity_graph.dot");
        entity_graph
            .write_dot(&entity_path)
            .map_err(|e| SkgError::GraphError(e.to_string()))?;

        info!(
            "Run complete: {} pages, {} entities, {} relationships",
            pages.len(),
            entities.len(),
            relationships.len()
        );

        Ok(RunOutput {
            pages,
            entities,
            relationships,
        })
    }

    /// Render the focus-node neighborhood of one page's relation graph
    ///
    /// The relation graph takes every endpoint unconditionally; the focus
    /// node must appear in it or the run aborts.
    fn write_neighborhood(&self, relationships: &[Relationship], position: usize) -> Result<()> {
        let graph = RelationGraph::from_relationships(relationships);
        let neighborhood = graph
            .neighborhood(&self.config.graph.focus_node)
            .map_err(|e| SkgError::GraphError(e.to_string()))?;

        let path = self.graph_path(&format!("page_{position}_neighborhood.dot"));
        neighborhood
            .write_dot(&path)
            .map_err(|e| SkgError::GraphError(e.to_string()))
    }

    fn graph_path(&self, file_name: &str) -> PathBuf {
        self.config.graph.output_dir.join(file_name)
    }
}
