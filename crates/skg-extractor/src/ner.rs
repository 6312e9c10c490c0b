//! Named-entity recognition
//!
//! Rule-based stand-in for a pretrained NER model: regex patterns for
//! date/money/percent/cardinal spans, a dictionary of known organizations,
//! places, and products, and a capitalized-span fallback. Overlapping
//! matches are resolved by confidence, then position.

use regex::Regex;
use skg_core::EntityLabel;

use crate::EntitySpan;

/// Rule-based entity recognizer
pub struct EntityRecognizer {
    /// (pattern, label, confidence), checked over the whole text
    patterns: Vec<(Regex, EntityLabel, f32)>,
}

impl EntityRecognizer {
    /// Create a recognizer with the default pattern and dictionary rules
    pub fn new() -> Self {
        let mut ner = Self {
            patterns: Vec::new(),
        };

        ner.init_patterns();
        ner.init_dictionary();
        ner
    }

    /// Numeric and temporal span patterns
    fn init_patterns(&mut self) {
        self.add_pattern(
            r"\b(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2}(?:,\s*\d{4})?\b",
            EntityLabel::Date,
            0.9,
        );
        self.add_pattern(r"\b(?:19|20)\d{2}\b", EntityLabel::Date, 0.85);

        self.add_pattern(
            r"\$\d+(?:,\d{3})*(?:\.\d+)?(?:\s?(?:million|billion|trillion))?",
            EntityLabel::Money,
            0.9,
        );

        self.add_pattern(r"\b\d+(?:\.\d+)?%", EntityLabel::Percent, 0.9);

        // Bare numbers; loses overlaps against the patterns above
        self.add_pattern(r"\b\d+(?:,\d{3})*\b", EntityLabel::Cardinal, 0.5);

        // Multiword capitalized spans default to organizations
        self.add_pattern(
            r"\b[A-Z][a-zA-Z]+(?:\s+[A-Z][a-zA-Z]+)+\b",
            EntityLabel::Org,
            0.6,
        );
    }

    /// Dictionary of known surface forms
    fn init_dictionary(&mut self) {
        self.add_terms(
            EntityLabel::Org,
            0.95,
            &[
                "Altera",
                "Intel",
                "Nvidia",
                "AMD",
                "Arm",
                "Qualcomm",
                "Broadcom",
                "TSMC",
                "Samsung",
                "Google",
                "Microsoft",
                "Apple",
                "Amazon",
                "IBM",
                "Oracle",
                "Cisco",
                "OpenAI",
                "Meta",
            ],
        );

        self.add_terms(
            EntityLabel::Gpe,
            0.95,
            &[
                "United States",
                "China",
                "Taiwan",
                "Japan",
                "South Korea",
                "Germany",
                "California",
                "Texas",
                "San Jose",
            ],
        );

        self.add_terms(
            EntityLabel::Product,
            0.9,
            &["Stratix", "Agilex", "Arria", "Cyclone", "Xeon", "CUDA"],
        );
    }

    /// Add a regex pattern
    fn add_pattern(&mut self, pattern: &str, label: EntityLabel, confidence: f32) {
        if let Ok(regex) = Regex::new(pattern) {
            self.patterns.push((regex, label, confidence));
        }
    }

    /// Add dictionary terms as word-bounded patterns
    fn add_terms(&mut self, label: EntityLabel, confidence: f32, terms: &[&str]) {
        for term in terms {
            self.add_pattern(&format!(r"\b{}\b", regex::escape(term)), label, confidence);
        }
    }

    /// Recognize entity spans in a text
    pub fn recognize(&self, text: &str) -> Vec<EntitySpan> {
        let mut spans = Vec::new();

        for (regex, label, confidence) in &self.patterns {
            for mat in regex.find_iter(text) {
                spans.push(EntitySpan {
                    text: mat.as_str().to_string(),
                    label: *label,
                    start: mat.start(),
                    end: mat.end(),
                    confidence: *confidence,
                });
            }
        }

        Self::deduplicate(spans)
    }

    /// Remove overlapping spans, keeping highest confidence
    fn deduplicate(mut spans: Vec<EntitySpan>) -> Vec<EntitySpan> {
        spans.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.start.cmp(&b.start))
        });

        let mut result: Vec<EntitySpan> = Vec::new();
        for span in spans {
            let overlaps = result
                .iter()
                .any(|kept| span.start < kept.end && kept.start < span.end);
            if !overlaps {
                result.push(span);
            }
        }

        result.sort_by_key(|s| s.start);
        result
    }
}

impl Default for EntityRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dictionary_orgs() {
        let ner = EntityRecognizer::new();
        let spans = ner.recognize("Intel bought Altera.");

        let texts: Vec<(&str, EntityLabel)> = spans
            .iter()
            .map(|s| (s.text.as_str(), s.label))
            .collect();
        assert_eq!(
            texts,
            vec![("Intel", EntityLabel::Org), ("Altera", EntityLabel::Org)]
        );
    }

    #[test]
    fn test_date_beats_cardinal() {
        let ner = EntityRecognizer::new();
        let spans = ner.recognize("The deal closed in 2015.");

        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "2015");
        assert_eq!(spans[0].label, EntityLabel::Date);
    }

    #[test]
    fn test_money_and_percent() {
        let ner = EntityRecognizer::new();
        let spans = ner.recognize("Intel paid $16.7 billion, a 56% premium.");

        assert!(spans
            .iter()
            .any(|s| s.text == "$16.7 billion" && s.label == EntityLabel::Money));
        assert!(spans
            .iter()
            .any(|s| s.text == "56%" && s.label == EntityLabel::Percent));
    }

    #[test]
    fn test_month_day_year_date() {
        let ner = EntityRecognizer::new();
        let spans = ner.recognize("Announced on June 1, 2015 by the board.");

        assert!(spans
            .iter()
            .any(|s| s.text == "June 1, 2015" && s.label == EntityLabel::Date));
    }

    #[test]
    fn test_capitalized_span_fallback() {
        let ner = EntityRecognizer::new();
        let spans = ner.recognize("engineers at Lattice Semiconductor responded");

        assert!(spans
            .iter()
            .any(|s| s.text == "Lattice Semiconductor" && s.label == EntityLabel::Org));
    }

    #[test]
    fn test_dictionary_wins_overlap() {
        let ner = EntityRecognizer::new();
        // "Altera Corporation" matches the fallback; the dictionary entry
        // for "Altera" has higher confidence and wins the overlap.
        let spans = ner.recognize("shares of Altera Corporation rose");

        assert!(spans.iter().any(|s| s.text == "Altera"));
        assert!(!spans.iter().any(|s| s.text == "Altera Corporation"));
    }

    #[test]
    fn test_plain_cardinal() {
        let ner = EntityRecognizer::new();
        let spans = ner.recognize("shipping 40 products");

        assert!(spans
            .iter()
            .any(|s| s.text == "40" && s.label == EntityLabel::Cardinal));
    }
}
