//! Hallucination scoring, grounded on
//! `llm_guardian.monitoring.quality_monitor.HallucinationDetector`: a
//! pattern-match score and a length-plausibility score, combined
//! `0.7 * pattern_score + 0.3 * length_score`.

use regex::Regex;

use crate::error::QualityError;

pub struct HallucinationDetector {
    patterns: Vec<Regex>,
}

impl HallucinationDetector {
    pub fn new() -> Result<Self, QualityError> {
        let patterns = [
            r"(?i)according to my (internal )?database",
            r"(?i)i have access to real-?time data",
            r"(?i)as i (recall|remember) from (earlier|before)",
            r"(?i)in my personal experience",
            r"(?i)i (personally )?witnessed",
            r"(?i)the exact (number|figure) is \d+(\.\d+)?%?",
            r"(?i)i (can )?confirm(ed)? this is (100% )?(true|accurate|correct)",
            r"(?i)trust me,? (this is|it's) (definitely|certainly) (true|accurate)",
        ];
        let patterns = patterns.iter().map(|p| Regex::new(p)).collect::<Result<_, _>>()?;
        Ok(Self { patterns })
    }

    fn pattern_score(&self, text: &str) -> f64 {
        let matches = self.patterns.iter().filter(|p| p.is_match(text)).count();
        (matches as f64 / self.patterns.len() as f64).min(1.0)
    }

    /// Extremely short or extremely long responses relative to the prompt
    /// are weaker signal for plausibility than mid-length ones.
    fn length_score(&self, prompt: &str, response: &str) -> f64 {
        if response.trim().is_empty() {
            return 1.0;
        }
        let ratio = response.len() as f64 / prompt.len().max(1) as f64;
        if ratio < 0.1 {
            0.6
        } else if ratio > 50.0 {
            0.5
        } else {
            0.0
        }
    }

    pub fn score(&self, prompt: &str, response: &str) -> f64 {
        let pattern = self.pattern_score(response);
        let length = self.length_score(prompt, response);
        (0.7 * pattern + 0.3 * length).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_overconfident_phrasing() {
        let detector = HallucinationDetector::new().unwrap();
        let score = detector.score(
            "What's the population of Mars?",
            "I can confirm this is 100% true: the exact number is 0.",
        );
        assert!(score > 0.5);
    }

    #[test]
    fn scores_plain_response_low() {
        let detector = HallucinationDetector::new().unwrap();
        let score = detector.score(
            "Summarize the plot of Hamlet.",
            "Hamlet learns his uncle murdered his father and seeks revenge.",
        );
        assert!(score < 0.3);
    }
}
