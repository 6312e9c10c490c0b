//! SKG Core - Domain models, traits, and shared types
//!
//! This crate defines the core abstractions used throughout the SKG system:
//! - Page and search-result models
//! - Entity and relationship types accumulated during a run
//! - Common error types
//! - Shared traits for the search and fetch collaborators
//! - Configuration management

pub mod config;

pub use config::{
    AppConfig, ConfigError, FetchConfig, GraphConfig, LoggingConfig, PipelineConfig, SearchConfig,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for SKG operations
#[derive(Error, Debug)]
pub enum SkgError {
    #[error("Search error: {0}")]
    SearchError(String),

    #[error("Scrape error: {0}")]
    ScrapeError(String),

    #[error("Graph error: {0}")]
    GraphError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SkgError>;

// ============================================================================
// Page Models
// ============================================================================

/// A successfully scraped page
///
/// Created by the fetcher for every URL whose response carried a `<title>`
/// element; discarded after the run except for the optional text dump.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    /// Source URL the page was fetched from
    pub url: String,

    /// Text of the first `<title>` element
    pub title: String,

    /// Text of every `<p>` element, joined by newlines
    pub text: String,
}

impl PageRecord {
    /// Create a new page record
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            text: text.into(),
        }
    }
}

// ============================================================================
// Knowledge Model
// ============================================================================

/// Entity labels produced by the linguistic pipeline
///
/// Rendered with the conventional NER tag strings (`ORG`, `PERSON`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityLabel {
    Org,
    Person,
    Gpe,
    Product,
    Date,
    Money,
    Percent,
    Cardinal,
}

impl EntityLabel {
    /// Get the conventional tag string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Org => "ORG",
            Self::Person => "PERSON",
            Self::Gpe => "GPE",
            Self::Product => "PRODUCT",
            Self::Date => "DATE",
            Self::Money => "MONEY",
            Self::Percent => "PERCENT",
            Self::Cardinal => "CARDINAL",
        }
    }
}

impl std::fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A (surface text, label) pair tagged by the linguistic pipeline
///
/// Set semantics: two mentions with the same text and label are one entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

impl Entity {
    /// Create a new entity
    pub fn new(text: impl Into<String>, label: EntityLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.text, self.label)
    }
}

/// A coarse (subject token, governing token) pair
///
/// Derived from shallow dependency-role heuristics, not a validated
/// semantic relation. Deduplicated within one page's extraction only;
/// the global sequence may repeat pairs across pages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
    pub subject: String,
    pub head: String,
}

impl Relationship {
    /// Create a new relationship pair
    pub fn new(subject: impl Into<String>, head: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            head: head.into(),
        }
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} -> {})", self.subject, self.head)
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Trait for web search providers
///
/// Returns the ordered result URLs for a query. Transport failures and
/// non-success responses are errors; the caller decides whether they are
/// fatal (the default pipeline treats them as run-aborting).
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Search the web and return result URLs in ranking order
    async fn search(&self, query: &str) -> Result<Vec<String>>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}

/// Trait for page fetchers
///
/// Implementations convert every fetch/parse failure into an error value
/// (and log the skip reason themselves) rather than panicking.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a URL and extract its title and paragraph text
    async fn fetch(&self, url: &str) -> Result<PageRecord>;
}

// ============================================================================
// Tests
// ============================================================================
