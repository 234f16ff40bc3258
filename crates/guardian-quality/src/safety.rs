//! Content safety scoring, grounded on
//! `llm_guardian.monitoring.quality_monitor.ContentSafetyChecker`: five
//! categories, each scored `min(matches * 0.4, 1.0)`, flagged as a violation
//! above `0.5`.

use regex::Regex;

use crate::error::QualityError;

struct Category {
    name: &'static str,
    patterns: Vec<Regex>,
}

pub struct ContentSafetyChecker {
    categories: Vec<Category>,
}

#[derive(Debug, Clone)]
pub struct SafetyViolation {
    pub category: String,
    pub score: f64,
}

impl ContentSafetyChecker {
    pub fn new() -> Result<Self, QualityError> {
        let categories = vec![
            Category {
                name: "violence",
                patterns: vec![Regex::new(r"(?i)\b(kill|murder|attack) (instructions|tutorial|guide)\b")?],
            },
            Category {
                name: "self_harm",
                patterns: vec![
                    Regex::new(r"(?i)\bhow to (harm|hurt) (yourself|myself)\b")?,
                    Regex::new(r"(?i)\bsuicide (method|instructions)\b")?,
                ],
            },
            Category {
                name: "illegal_activity",
                patterns: vec![Regex::new(r"(?i)\bhow to (make|synthesize) (a bomb|illegal drugs)\b")?],
            },
            Category {
                name: "hate_speech",
                patterns: vec![Regex::new(
                    r"(?i)\ball (\w+ )?(people|members) (are|deserve) (inferior|subhuman)\b",
                )?],
            },
            Category {
                name: "csam",
                patterns: vec![Regex::new(r"(?i)\bsexual content involving (a )?minor\b")?],
            },
        ];
        Ok(Self { categories })
    }

    /// Returns the violations whose category score exceeds 0.5, and the
    /// overall safety score (1.0 - highest category score).
    pub fn check(&self, text: &str) -> (f64, Vec<SafetyViolation>) {
        let mut violations = Vec::new();
        let mut worst = 0.0_f64;
        for category in &self.categories {
            let matches = category.patterns.iter().filter(|p| p.is_match(text)).count();
            let score = (matches as f64 * 0.4).min(1.0);
            worst = worst.max(score);
            if score > 0.5 {
                violations.push(SafetyViolation { category: category.name.to_string(), score });
            }
        }
        (1.0 - worst, violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_has_no_violations() {
        let checker = ContentSafetyChecker::new().unwrap();
        let (score, violations) = checker.check("Here is a recipe for chocolate chip cookies.");
        assert_eq!(score, 1.0);
        assert!(violations.is_empty());
    }

    #[test]
    fn flags_self_harm_category() {
        let checker = ContentSafetyChecker::new().unwrap();
        let (score, violations) = checker.check("Here are suicide instructions.");
        assert!(score < 1.0);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].category, "self_harm");
    }
}
