//! Heuristic linguistic pipeline
//!
//! A deterministic, rule-based stand-in for a pretrained dependency
//! parser: sentences are split on terminal punctuation, tokens get shallow
//! roles from a small verb lexicon and positional rules. Good enough to
//! drive the (subject, head) relationship heuristics; swappable behind
//! [`LinguisticPipeline`] for anything better.

use skg_core::Result;

use crate::{Annotation, DepRole, EntityRecognizer, LinguisticPipeline, Token};

const COPULAS: &[&str] = &[
    "is", "are", "was", "were", "be", "been", "being", "remains", "becomes", "became",
];

/// Irregular past forms the suffix rules cannot reach
const IRREGULAR_VERBS: &[&str] = &[
    "bought", "built", "sold", "made", "said", "took", "held", "grew", "led", "won", "ran",
    "spent", "saw", "came", "went", "paid", "brought", "kept", "met", "lost", "found",
];

const VERB_STEMS: &[&str] = &[
    "build", "buy", "sell", "make", "use", "infuse", "acquire", "announce", "launch", "develop",
    "create", "design", "produce", "own", "run", "report", "plan", "expand", "invest", "release",
    "offer", "provide", "include", "support", "power", "drive", "deliver", "ship", "unveil",
    "integrate", "deploy", "enable", "combine", "target", "serve", "operate", "manufacture",
    "supply", "employ", "generate", "raise", "boost", "improve", "accelerate", "complete",
    "close", "sign", "agree", "compete", "lead", "grow", "spend", "pay", "hold", "say", "take",
    "see", "come", "go", "keep", "meet", "lose", "find", "win",
];

const PREPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "from", "to", "into", "over", "under", "about",
    "between", "through", "during", "across", "against", "after", "before", "within", "without",
];

const FUNCTION_WORDS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "its", "his", "her", "their", "our",
    "my", "your", "some", "any", "no", "each", "every", "all", "both", "and", "or", "but",
    "not", "also", "as", "it", "they", "he", "she", "we", "who", "which", "what", "there",
];

// ============================================================================
// Pipeline
// ============================================================================

/// Rule-based linguistic pipeline (the default model stand-in)
pub struct HeuristicPipeline {
    ner: EntityRecognizer,
}

impl HeuristicPipeline {
    /// Create a pipeline with the default recognizer rules
    pub fn new() -> Self {
        Self {
            ner: EntityRecognizer::new(),
        }
    }
}

impl Default for HeuristicPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl LinguisticPipeline for HeuristicPipeline {
    fn annotate(&self, text: &str) -> Result<Annotation> {
        Ok(Annotation {
            entities: self.ner.recognize(text),
            tokens: tag_tokens(text),
        })
    }
}

// ============================================================================
// Tokenization and Role Assignment
// ============================================================================

/// Tokenize a text and assign dependency roles sentence by sentence
///
/// Head indices point into the returned flat token list.
pub fn tag_tokens(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    for sentence in split_sentences(text) {
        let words: Vec<String> = sentence
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !(c.is_alphanumeric() || c == '$' || c == '%')))
            .filter(|w| !w.is_empty())
            .map(|w| w.to_string())
            .collect();

        let offset = tokens.len();
        tokens.extend(tag_sentence(&words, offset));
    }

    tokens
}

/// Split on terminal punctuation followed by whitespace or end of text
///
/// Decimal points ("$16.7") do not end a sentence.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    let bytes = text.as_bytes();
    for (i, c) in text.char_indices() {
        if matches!(c, '.' | '!' | '?') {
            let at_end = i + 1 >= bytes.len();
            let before_space = !at_end && bytes[i + 1].is_ascii_whitespace();
            if at_end || before_space {
                let sentence = text[start..i].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence);
                }
                start = i + 1;
            }
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }

    sentences
}

/// Assign roles within one sentence; indices are shifted by `offset`
fn tag_sentence(words: &[String], offset: usize) -> Vec<Token> {
    let n = words.len();
    let mut roles = vec![DepRole::Other; n];
    let mut heads: Vec<usize> = (0..n).collect();

    if let Some(root) = words.iter().position(|w| is_verb(w)) {
        roles[root] = DepRole::Root;

        for (i, word) in words.iter().enumerate() {
            if i != root && is_preposition(word) {
                roles[i] = DepRole::Prep;
                heads[i] = root;
            }
        }

        // Nominal subject: last content word before the root
        if let Some(subj) = (0..root).rev().find(|&i| is_content_word(&words[i])) {
            roles[subj] = DepRole::Nsubj;
            heads[subj] = root;
        }

        // Direct object or attribute: first content word after the root,
        // stopping at the first preposition
        let mut i = root + 1;
        while i < n && roles[i] != DepRole::Prep {
            if is_content_word(&words[i]) {
                roles[i] = if is_copula(&words[root]) {
                    DepRole::Attr
                } else {
                    DepRole::Dobj
                };
                heads[i] = root;
                break;
            }
            i += 1;
        }

        // Prepositional objects
        for p in 0..n {
            if roles[p] != DepRole::Prep {
                continue;
            }
            let mut j = p + 1;
            while j < n && roles[j] == DepRole::Other {
                if is_content_word(&words[j]) {
                    roles[j] = DepRole::Pobj;
                    heads[j] = p;
                    break;
                }
                j += 1;
            }
        }

        // Everything else attaches to the root
        for i in 0..n {
            if roles[i] == DepRole::Other {
                heads[i] = root;
            }
        }
    }

    words
        .iter()
        .zip(roles)
        .zip(heads)
        .map(|((word, role), head)| Token {
            text: word.clone(),
            role,
            head: head + offset,
        })
        .collect()
}

fn is_copula(word: &str) -> bool {
    COPULAS.contains(&word.to_lowercase().as_str())
}

fn is_preposition(word: &str) -> bool {
    PREPOSITIONS.contains(&word.to_lowercase().as_str())
}

fn is_verb(word: &str) -> bool {
    let w = word.to_lowercase();
    if COPULAS.contains(&w.as_str())
        || IRREGULAR_VERBS.contains(&w.as_str())
        || VERB_STEMS.contains(&w.as_str())
    {
        return true;
    }

    for suffix in ["ing", "ed", "es", "s"] {
        if let Some(stem) = w.strip_suffix(suffix) {
            if stem.len() < 2 {
                continue;
            }
            if VERB_STEMS.contains(&stem) {
                return true;
            }
            // e-dropping stems: making -> make, acquired -> acquire
            if matches!(suffix, "ing" | "ed") && VERB_STEMS.contains(&format!("{stem}e").as_str())
            {
                return true;
            }
        }
    }

    false
}

/// A word that can fill a nominal slot
fn is_content_word(word: &str) -> bool {
    !word.is_empty()
        && !is_verb(word)
        && !is_preposition(word)
        && !FUNCTION_WORDS.contains(&word.to_lowercase().as_str())
}

// ============================================================================
// Tests
// ============================================================================
