//! Rule-based lexical analysis of free-text profile descriptions.
//!
//! Keywords and topics come from lowercase substring matches against the
//! fixed domain vocabulary; sentiment is a strict-majority vote over two
//! small lexicons. The confidence figure is a bounded placeholder drawn from
//! an injected random source so tests can pin it down with a seed.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::vocabulary::{NEGATIVE_LEXICON, POSITIVE_LEXICON, TOPIC_VOCABULARY};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// Output of analyzing one description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextAnalysis {
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub topics: BTreeSet<String>,
    pub sentiment: Sentiment,
    pub confidence: f64,
}

impl TextAnalysis {
    /// Analysis of absent or empty text: nothing detected, neutral.
    pub fn empty() -> Self {
        Self {
            keywords: Vec::new(),
            topics: BTreeSet::new(),
            sentiment: Sentiment::Neutral,
            confidence: 0.0,
        }
    }
}

/// Analyzes free text. Empty input yields [`TextAnalysis::empty`] and never
/// fails.
pub fn analyze_text(text: &str, rng: &mut impl Rng) -> TextAnalysis {
    if text.trim().is_empty() {
        return TextAnalysis::empty();
    }
    let lowered = text.to_lowercase();

    let mut keywords = Vec::new();
    let mut topics = BTreeSet::new();
    for (topic, phrases) in TOPIC_VOCABULARY {
        for phrase in *phrases {
            if lowered.contains(phrase) {
                keywords.push((*phrase).to_string());
                topics.insert((*topic).to_string());
            }
        }
    }

    let positive = POSITIVE_LEXICON
        .iter()
        .filter(|word| lowered.contains(*word))
        .count();
    let negative = NEGATIVE_LEXICON
        .iter()
        .filter(|word| lowered.contains(*word))
        .count();
    let sentiment = if positive > negative {
        Sentiment::Positive
    } else if negative > positive {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    };

    TextAnalysis {
        keywords,
        topics,
        sentiment,
        confidence: rng.gen_range(0.75..0.95),
    }
}
