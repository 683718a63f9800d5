//! Deterministic lexicon scorer behind the predict endpoint: summed term
//! weights saturate into a single anxiety score clamped to [0, 1].

use std::collections::HashMap;

/// Term weights. A lone mild term stays in the low band; a couple of strong
/// terms saturate toward 1.0.
const LEXICON: &[(&str, f64)] = &[
    ("afraid", 0.45),
    ("anxiety", 0.55),
    ("anxious", 0.55),
    ("breathless", 0.40),
    ("dread", 0.55),
    ("fear", 0.40),
    ("insomnia", 0.35),
    ("nervous", 0.40),
    ("overwhelmed", 0.50),
    ("panic", 0.70),
    ("panicking", 0.70),
    ("racing", 0.30),
    ("restless", 0.35),
    ("scared", 0.45),
    ("shaking", 0.40),
    ("sleepless", 0.35),
    ("stress", 0.40),
    ("stressed", 0.45),
    ("tense", 0.35),
    ("terrified", 0.60),
    ("terror", 0.60),
    ("uneasy", 0.35),
    ("worried", 0.40),
    ("worry", 0.40),
];

pub struct AnxietyScorer {
    weights: HashMap<&'static str, f64>,
}

impl AnxietyScorer {
    pub fn new() -> Self {
        Self {
            weights: LEXICON.iter().copied().collect(),
        }
    }

    /// Scores `text` into [0.0, 1.0]. Empty or neutral text scores 0.0; the
    /// summed weights of matched terms saturate exponentially.
    pub fn score(&self, text: &str) -> f64 {
        let mut total = 0.0;
        for token in tokens(text) {
            if let Some(weight) = self.weights.get(token.as_str()) {
                total += weight;
            }
        }
        if total == 0.0 {
            return 0.0;
        }
        (1.0 - (-total).exp()).clamp(0.0, 1.0)
    }
}

impl Default for AnxietyScorer {
    fn default() -> Self {
        Self::new()
    }
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_text_scores_zero() {
        let scorer = AnxietyScorer::new();
        assert_eq!(scorer.score("I feel okay today"), 0.0);
    }

    #[test]
    fn empty_text_scores_zero() {
        let scorer = AnxietyScorer::new();
        assert_eq!(scorer.score(""), 0.0);
    }

    #[test]
    fn strong_terms_reach_the_high_band() {
        let scorer = AnxietyScorer::new();
        let score = scorer.score("panic and terrified all night");
        assert!(score > 0.7, "got {score}");
    }

    #[test]
    fn more_anxious_terms_score_higher() {
        let scorer = AnxietyScorer::new();
        let mild = scorer.score("a bit worried");
        let severe = scorer.score("worried, panicking, full of dread");
        assert!(mild > 0.0);
        assert!(severe > mild);
    }

    #[test]
    fn score_never_leaves_the_unit_interval() {
        let scorer = AnxietyScorer::new();
        let text = "panic ".repeat(100);
        let score = scorer.score(&text);
        assert!((0.0..=1.0).contains(&score), "got {score}");
        assert!(score > 0.99);
    }

    #[test]
    fn matching_ignores_case_and_punctuation() {
        let scorer = AnxietyScorer::new();
        assert_eq!(scorer.score("PANIC! Anxious."), scorer.score("panic anxious"));
    }
}
