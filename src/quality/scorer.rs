/*!
 * Weighted quality scoring for back-translated sentences.
 *
 * Combines three independent signals into one score:
 * - Semantic: cross-lingual embedding similarity (60%)
 * - Length: character-count ratio between back-translation and source (20%)
 * - Keyword: preservation of numeric tokens (20%)
 *
 * Scores below 0.5 additionally get a categorical failure label from an
 * ordered rule cascade; the first matching rule wins.
 */

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::EmbeddingError;
use crate::quality::embedding::EmbeddingComparator;

/// Weight of the semantic similarity signal
const SEMANTIC_WEIGHT: f64 = 0.6;
/// Weight of the length-ratio signal
const LENGTH_WEIGHT: f64 = 0.2;
/// Weight of the keyword-preservation signal
const KEYWORD_WEIGHT: f64 = 0.2;

/// Scores below this threshold get a failure label
const FAILURE_THRESHOLD: f64 = 0.5;

/// Maximal digit runs, treated as numeric tokens
static NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Categorical label explaining why a translation scored low
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureType {
    /// Source or back-translation was empty
    EmptyText,
    /// Meaning was lost in the round trip
    SevereSemanticMismatch,
    /// Output length diverged badly, likely truncation or hallucination
    LengthMismatchHallucination,
    /// Numeric tokens from the source were dropped or altered
    NumberMismatch,
    /// Low overall score without a single dominant cause
    GeneralLowQuality,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::EmptyText => write!(f, "empty_text"),
            FailureType::SevereSemanticMismatch => write!(f, "severe_semantic_mismatch"),
            FailureType::LengthMismatchHallucination => write!(f, "length_mismatch_hallucination"),
            FailureType::NumberMismatch => write!(f, "number_mismatch"),
            FailureType::GeneralLowQuality => write!(f, "general_low_quality"),
        }
    }
}

impl std::str::FromStr for FailureType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "empty_text" => Ok(FailureType::EmptyText),
            "severe_semantic_mismatch" => Ok(FailureType::SevereSemanticMismatch),
            "length_mismatch_hallucination" => Ok(FailureType::LengthMismatchHallucination),
            "number_mismatch" => Ok(FailureType::NumberMismatch),
            "general_low_quality" => Ok(FailureType::GeneralLowQuality),
            _ => Err(anyhow::anyhow!("Invalid failure type: {}", s)),
        }
    }
}

/// Quality metrics for one scored sentence
///
/// `final_score` is always the fixed weighted combination of the three
/// sub-scores; it is never supplied independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    /// Embedding similarity in [0, 1]
    pub semantic_score: f64,
    /// Length-ratio score in [0, 1]
    pub length_score: f64,
    /// Numeric-token preservation in [0, 1]
    pub keyword_score: f64,
    /// Weighted combination, rounded to 4 decimal places
    pub final_score: f64,
    /// Failure label; None whenever `final_score >= 0.5`
    pub failure_type: Option<FailureType>,
}

impl QualityMetrics {
    /// Metrics for an empty source or back-translation
    fn empty_text() -> Self {
        Self {
            semantic_score: 0.0,
            length_score: 0.0,
            keyword_score: 0.0,
            final_score: 0.0,
            failure_type: Some(FailureType::EmptyText),
        }
    }
}

/// Sub-scores fed to the failure cascade
struct SubScores {
    semantic: f64,
    length: f64,
    keyword: f64,
}

fn semantic_too_low(s: &SubScores) -> bool {
    s.semantic < 0.4
}

fn length_too_low(s: &SubScores) -> bool {
    s.length < 0.3
}

fn keyword_too_low(s: &SubScores) -> bool {
    s.keyword < 0.5
}

fn always(_: &SubScores) -> bool {
    true
}

/// Ordered failure rules, evaluated top-down; first match wins.
/// The order is part of the contract, not an implementation detail.
const FAILURE_RULES: &[(fn(&SubScores) -> bool, FailureType)] = &[
    (semantic_too_low, FailureType::SevereSemanticMismatch),
    (length_too_low, FailureType::LengthMismatchHallucination),
    (keyword_too_low, FailureType::NumberMismatch),
    (always, FailureType::GeneralLowQuality),
];

fn classify(scores: &SubScores) -> FailureType {
    FAILURE_RULES
        .iter()
        .find(|(predicate, _)| predicate(scores))
        .map(|(_, label)| *label)
        .expect("cascade ends with a catch-all rule")
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Extract the set of maximal digit runs from a text
fn numeric_tokens(text: &str) -> HashSet<String> {
    NUMBER_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Quality scorer over a shared embedding comparator
pub struct QualityScorer {
    comparator: Arc<EmbeddingComparator>,
}

impl QualityScorer {
    /// Create a scorer over the given comparator
    pub fn new(comparator: Arc<EmbeddingComparator>) -> Self {
        Self { comparator }
    }

    /// Identifier of the embedding model backing the semantic score
    pub fn model_id(&self) -> &str {
        self.comparator.model_id()
    }

    /// Score one (source, back-translation) pair
    ///
    /// Empty input short-circuits without touching the embedding
    /// backend; only a backend failure (catastrophic for the batch)
    /// surfaces as an error.
    pub async fn score(
        &self,
        source_text: &str,
        back_translated_text: &str,
    ) -> Result<QualityMetrics, EmbeddingError> {
        if source_text.is_empty() || back_translated_text.is_empty() {
            return Ok(QualityMetrics::empty_text());
        }

        // 1. Semantic similarity, clipped to [0, 1] by the comparator
        let semantic_score = self
            .comparator
            .similarity(source_text, back_translated_text)
            .await? as f64;

        // 2. Length ratio: 1.0 at parity, linear symmetric penalty
        let len_source = source_text.chars().count() as f64;
        let len_back = back_translated_text.chars().count() as f64;
        let ratio = len_back / len_source;
        let length_score = (1.0 - (1.0 - ratio).abs()).max(0.0);

        // 3. Numeric tokens preserved from the source
        let source_numbers = numeric_tokens(source_text);
        let keyword_score = if source_numbers.is_empty() {
            1.0
        } else {
            let back_numbers = numeric_tokens(back_translated_text);
            source_numbers.intersection(&back_numbers).count() as f64 / source_numbers.len() as f64
        };

        let final_score = round4(
            SEMANTIC_WEIGHT * semantic_score
                + LENGTH_WEIGHT * length_score
                + KEYWORD_WEIGHT * keyword_score,
        );

        let failure_type = if final_score < FAILURE_THRESHOLD {
            Some(classify(&SubScores {
                semantic: semantic_score,
                length: length_score,
                keyword: keyword_score,
            }))
        } else {
            None
        };

        Ok(QualityMetrics {
            semantic_score: round4(semantic_score),
            length_score: round4(length_score),
            keyword_score: round4(keyword_score),
            final_score,
            failure_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::embedding::HashEmbeddingBackend;

    fn scorer() -> QualityScorer {
        let backend = Arc::new(HashEmbeddingBackend::new(384));
        QualityScorer::new(Arc::new(EmbeddingComparator::new(backend)))
    }

    #[tokio::test]
    async fn test_score_identicalTexts_shouldBePerfect() {
        let metrics = scorer()
            .score("There are 5 apples", "There are 5 apples")
            .await
            .unwrap();

        assert_eq!(metrics.semantic_score, 1.0);
        assert_eq!(metrics.length_score, 1.0);
        assert_eq!(metrics.keyword_score, 1.0);
        assert_eq!(metrics.final_score, 1.0);
        assert_eq!(metrics.failure_type, None);
    }

    #[tokio::test]
    async fn test_score_emptySource_shouldShortCircuit() {
        let metrics = scorer().score("", "anything").await.unwrap();
        assert_eq!(metrics.final_score, 0.0);
        assert_eq!(metrics.semantic_score, 0.0);
        assert_eq!(metrics.failure_type, Some(FailureType::EmptyText));
    }

    #[tokio::test]
    async fn test_score_emptyBackTranslation_shouldShortCircuit() {
        let metrics = scorer().score("anything", "").await.unwrap();
        assert_eq!(metrics.final_score, 0.0);
        assert_eq!(metrics.failure_type, Some(FailureType::EmptyText));
    }

    #[tokio::test]
    async fn test_score_droppedNumber_shouldHalveKeywordScore() {
        // Number 10 dropped: 1 of 2 numeric tokens preserved
        let metrics = scorer()
            .score("There are 5 apples and 10 oranges", "There are 5 apples")
            .await
            .unwrap();

        assert_eq!(metrics.keyword_score, 0.5);
    }

    #[tokio::test]
    async fn test_score_noNumbersInSource_shouldScoreKeywordVacuouslyPerfect() {
        let metrics = scorer()
            .score("no numbers here at all", "역시 숫자가 없다")
            .await
            .unwrap();

        assert_eq!(metrics.keyword_score, 1.0);
    }

    #[tokio::test]
    async fn test_score_lengthRatio_shouldPenalizeLinearly() {
        // 20 chars source, 5 chars back: ratio 0.25, score 0.25
        let metrics = scorer()
            .score("aaaaaaaaaaaaaaaaaaaa", "aaaaa")
            .await
            .unwrap();

        assert_eq!(metrics.length_score, 0.25);
    }

    #[test]
    fn test_classify_lowSemantic_shouldWinOverLaterRules() {
        // All three signals are low; rule order decides
        let label = classify(&SubScores { semantic: 0.3, length: 0.1, keyword: 0.0 });
        assert_eq!(label, FailureType::SevereSemanticMismatch);
    }

    #[test]
    fn test_classify_lowLength_shouldFireSecond() {
        let label = classify(&SubScores { semantic: 0.45, length: 0.2, keyword: 0.0 });
        assert_eq!(label, FailureType::LengthMismatchHallucination);
    }

    #[test]
    fn test_classify_lowKeyword_shouldFireThird() {
        let label = classify(&SubScores { semantic: 0.45, length: 0.8, keyword: 0.4 });
        assert_eq!(label, FailureType::NumberMismatch);
    }

    #[test]
    fn test_classify_noDominantCause_shouldFallThrough() {
        let label = classify(&SubScores { semantic: 0.45, length: 0.8, keyword: 0.9 });
        assert_eq!(label, FailureType::GeneralLowQuality);
    }

    #[test]
    fn test_numericTokens_shouldExtractMaximalDigitRuns() {
        let tokens = numeric_tokens("room 42, floor 7, year 2024");
        assert_eq!(tokens.len(), 3);
        assert!(tokens.contains("42"));
        assert!(tokens.contains("7"));
        assert!(tokens.contains("2024"));
    }

    #[test]
    fn test_round4_shouldRoundHalfUp() {
        assert_eq!(round4(0.123_45), 0.1235);
        assert_eq!(round4(0.123_44), 0.1234);
    }

    #[test]
    fn test_failureType_displayAndParse_shouldRoundTrip() {
        for label in [
            FailureType::EmptyText,
            FailureType::SevereSemanticMismatch,
            FailureType::LengthMismatchHallucination,
            FailureType::NumberMismatch,
            FailureType::GeneralLowQuality,
        ] {
            let parsed: FailureType = label.to_string().parse().unwrap();
            assert_eq!(parsed, label);
        }
    }
}
