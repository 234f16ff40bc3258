//! On-task scoring, grounded on
//! `llm_guardian.monitoring.quality_monitor.OffTaskDetector`: extract
//! lowercase keywords longer than 3 characters from both prompt and
//! response (after dropping stop words), then score by keyword overlap.

use regex::Regex;
use std::collections::HashSet;

use crate::error::QualityError;

const STOP_WORDS: &[&str] = &[
    "the", "and", "that", "this", "with", "from", "have", "which", "what", "your", "about",
    "there", "their", "would", "could", "should", "into", "also", "been", "being", "were",
];

pub struct OffTaskDetector {
    word_pattern: Regex,
    stop_words: HashSet<&'static str>,
}

impl OffTaskDetector {
    pub fn new() -> Result<Self, QualityError> {
        Ok(Self {
            word_pattern: Regex::new(r"\b[a-z]+\b")?,
            stop_words: STOP_WORDS.iter().copied().collect(),
        })
    }

    fn keywords(&self, text: &str) -> HashSet<String> {
        let lower = text.to_lowercase();
        self.word_pattern
            .find_iter(&lower)
            .map(|m| m.as_str().to_string())
            .filter(|w| w.len() > 3 && !self.stop_words.contains(w.as_str()))
            .collect()
    }

    /// Returns an off-task score in `0.0..=1.0`: 0 means fully on-task.
    pub fn score(&self, prompt: &str, response: &str) -> f64 {
        let prompt_keywords = self.keywords(prompt);
        if prompt_keywords.is_empty() {
            return 0.0;
        }
        let response_keywords = self.keywords(response);
        let overlap = prompt_keywords.intersection(&response_keywords).count();
        let overlap_ratio = overlap as f64 / prompt_keywords.len() as f64;
        (1.0 - overlap_ratio).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_task_response_scores_low() {
        let detector = OffTaskDetector::new().unwrap();
        let score = detector.score(
            "Explain the benefits of solar panels for home energy",
            "Solar panels reduce home energy costs and provide renewable power.",
        );
        assert!(score < 0.6);
    }

    #[test]
    fn unrelated_response_scores_high() {
        let detector = OffTaskDetector::new().unwrap();
        let score = detector.score(
            "Explain the benefits of solar panels for home energy",
            "My favorite pizza topping is pepperoni with extra cheese.",
        );
        assert!(score > 0.8);
    }
}
