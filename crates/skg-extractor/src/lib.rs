//! SKG Extractor - Entity and relationship extraction
//!
//! Turns raw page text into a per-page entity set and an ordered,
//! locally-deduplicated relationship sequence.
//!
//! The linguistic analysis itself (named-entity spans, per-token
//! dependency roles and heads) is delegated to a [`LinguisticPipeline`]
//! implementation; [`HeuristicPipeline`] is the shipped rule-based one.

use std::collections::HashSet;
use std::sync::Arc;

use skg_core::{Entity, EntityLabel, Relationship, Result};
use tracing::debug;

pub mod ner;
pub mod tagger;

pub use ner::EntityRecognizer;
pub use tagger::HeuristicPipeline;

// ============================================================================
// Annotation Types
// ============================================================================

/// Shallow dependency roles assigned to tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepRole {
    /// Main verb of the sentence
    Root,
    /// Nominal subject
    Nsubj,
    /// Direct object
    Dobj,
    /// Attribute (nominal after a copula)
    Attr,
    /// Preposition
    Prep,
    /// Object of a preposition
    Pobj,
    /// Anything else
    Other,
}

/// A token with its dependency role and syntactic head
#[derive(Debug, Clone)]
pub struct Token {
    /// Surface text (punctuation stripped)
    pub text: String,
    /// Dependency role
    pub role: DepRole,
    /// Index of the head token in the annotation's token list
    pub head: usize,
}

/// A recognized named-entity span
#[derive(Debug, Clone)]
pub struct EntitySpan {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
    pub confidence: f32,
}

/// Full annotation of one text
#[derive(Debug, Clone, Default)]
pub struct Annotation {
    pub entities: Vec<EntitySpan>,
    pub tokens: Vec<Token>,
}

/// Trait for linguistic pipelines
///
/// The seam behind which a pretrained model would sit; SKG only consumes
/// entity spans and token roles/heads, never the model internals.
pub trait LinguisticPipeline: Send + Sync {
    fn annotate(&self, text: &str) -> Result<Annotation>;
}

// ============================================================================
// Knowledge Extraction
// ============================================================================

/// Entities and relationships extracted from one page
#[derive(Debug, Clone, Default)]
pub struct PageExtraction {
    /// Deduplicated (text, label) pairs
    pub entities: HashSet<Entity>,

    /// Ordered (subject, head) pairs, deduplicated within this page only
    pub relationships: Vec<Relationship>,
}

/// Derives entities and shallow relationships from page text
pub struct KnowledgeExtractor {
    pipeline: Arc<dyn LinguisticPipeline>,
}

impl KnowledgeExtractor {
    /// Create an extractor around an explicitly passed pipeline
    pub fn new(pipeline: Arc<dyn LinguisticPipeline>) -> Self {
        Self { pipeline }
    }

    /// Extract the entity set and relationship sequence for one page
    ///
    /// Relationship pairs are kept when the token's role is one of
    /// {nsubj, dobj, attr} and its head's role is {root, prep}, skipping
    /// pairs already produced earlier in this same call. Empty text yields
    /// empty outputs.
    pub fn extract(&self, text: &str) -> Result<PageExtraction> {
        let annotation = self.pipeline.annotate(text)?;

        let mut entities = HashSet::new();
        for span in annotation.entities {
            entities.insert(Entity::new(span.text, span.label));
        }

        let mut relationships: Vec<Relationship> = Vec::new();
        for token in &annotation.tokens {
            if !matches!(token.role, DepRole::Nsubj | DepRole::Dobj | DepRole::Attr) {
                continue;
            }
            let Some(head) = annotation.tokens.get(token.head) else {
                continue;
            };
            if matches!(head.role, DepRole::Root | DepRole::Prep) {
                let relationship = Relationship::new(&token.text, &head.text);
                if !relationships.contains(&relationship) {
                    relationships.push(relationship);
                }
            }
        }

        debug!("Extracted entities: {:?}", entities);
        debug!("Extracted relationships: {:?}", relationships);

        Ok(PageExtraction {
            entities,
            relationships,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> KnowledgeExtractor {
        KnowledgeExtractor::new(Arc::new(HeuristicPipeline::new()))
    }

    #[test]
    fn test_entities_deduplicate_across_mentions() {
        let text = "Altera builds chips. Intel bought Altera.";
        let extraction = extractor().extract(text).unwrap();

        let expected: HashSet<Entity> = [
            Entity::new("Altera", EntityLabel::Org),
            Entity::new("Intel", EntityLabel::Org),
        ]
        .into_iter()
        .collect();

        // Two mentions of Altera collapse into one entry
        assert_eq!(extraction.entities, expected);
    }

    #[test]
    fn test_subject_and_object_relationships() {
        let text = "Altera builds chips. Intel bought Altera.";
        let extraction = extractor().extract(text).unwrap();

        assert_eq!(
            extraction.relationships,
            vec![
                Relationship::new("Altera", "builds"),
                Relationship::new("chips", "builds"),
                Relationship::new("Intel", "bought"),
                Relationship::new("Altera", "bought"),
            ]
        );
    }

    #[test]
    fn test_relationships_deduplicate_within_one_call() {
        let text = "Altera builds chips. Altera builds boards.";
        let extraction = extractor().extract(text).unwrap();

        let altera_builds = extraction
            .relationships
            .iter()
            .filter(|r| r.subject == "Altera" && r.head == "builds")
            .count();
        assert_eq!(altera_builds, 1);
    }

    #[test]
    fn test_duplicates_recur_across_calls() {
        let text = "Altera builds chips.";
        let first = extractor().extract(text).unwrap();
        let second = extractor().extract(text).unwrap();

        // Global accumulation is the caller's concern; each call restarts
        // its own dedup set.
        let mut all = first.relationships;
        all.extend(second.relationships);
        let altera_builds = all
            .iter()
            .filter(|r| r.subject == "Altera" && r.head == "builds")
            .count();
        assert_eq!(altera_builds, 2);
    }

    #[test]
    fn test_copula_yields_attribute_relationship() {
        let text = "Altera is a company.";
        let extraction = extractor().extract(text).unwrap();

        assert!(extraction
            .relationships
            .contains(&Relationship::new("Altera", "is")));
        assert!(extraction
            .relationships
            .contains(&Relationship::new("company", "is")));
    }

    #[test]
    fn test_empty_text_yields_empty_outputs() {
        let extraction = extractor().extract("").unwrap();
        assert!(extraction.entities.is_empty());
        assert!(extraction.relationships.is_empty());
    }
}
