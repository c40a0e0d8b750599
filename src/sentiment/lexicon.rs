//! Lexicon-based polarity model
//!
//! Scores text the way the classic pattern lexicons do: every known word
//! carries a polarity in [-1, 1] and a subjectivity in [0, 1], intensity
//! words scale the polarity of what follows, and negators flip and dampen
//! it. A text's polarity and subjectivity are the means over matched words.

use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy)]
struct WordScore {
    polarity: f64,
    subjectivity: f64,
}

pub struct Lexicon {
    entries: HashMap<&'static str, WordScore>,
    boosters: HashMap<&'static str, f64>,
    negators: HashSet<&'static str>,
}

impl Lexicon {
    pub fn new() -> Self {
        let mut lexicon = Self {
            entries: HashMap::new(),
            boosters: HashMap::new(),
            negators: HashSet::new(),
        };
        lexicon.init_entries();
        lexicon
    }

    fn init_entries(&mut self) {
        // (word, polarity, subjectivity)
        let positive_words: &[(&str, f64, f64)] = &[
            ("good", 0.7, 0.6),
            ("great", 0.8, 0.75),
            ("excellent", 1.0, 1.0),
            ("amazing", 0.6, 0.9),
            ("awesome", 1.0, 1.0),
            ("wonderful", 1.0, 1.0),
            ("fantastic", 0.5, 0.9),
            ("best", 1.0, 0.3),
            ("better", 0.5, 0.5),
            ("love", 0.5, 0.6),
            ("happy", 0.8, 1.0),
            ("beautiful", 0.85, 1.0),
            ("impressive", 1.0, 1.0),
            ("exciting", 0.45, 0.8),
            ("promising", 0.6, 0.8),
            ("optimistic", 0.5, 0.75),
            ("innovative", 0.5, 0.7),
            ("breakthrough", 0.6, 0.5),
            ("strong", 0.45, 0.65),
            ("success", 0.65, 0.6),
            ("successful", 0.75, 0.95),
            ("win", 0.6, 0.5),
            ("growth", 0.4, 0.4),
            ("improved", 0.5, 0.6),
            ("improvement", 0.45, 0.5),
            ("popular", 0.4, 0.6),
            ("reliable", 0.4, 0.5),
            ("valuable", 0.5, 0.6),
            ("useful", 0.3, 0.3),
            ("easy", 0.4, 0.8),
            ("safe", 0.5, 0.5),
        ];

        let negative_words: &[(&str, f64, f64)] = &[
            ("bad", -0.7, 0.65),
            ("terrible", -1.0, 1.0),
            ("awful", -1.0, 1.0),
            ("horrible", -1.0, 1.0),
            ("worst", -1.0, 1.0),
            ("worse", -0.5, 0.6),
            ("hate", -0.8, 0.9),
            ("poor", -0.4, 0.6),
            ("disappointed", -0.75, 0.75),
            ("disappointing", -0.6, 0.7),
            ("broken", -0.4, 0.5),
            ("fail", -0.5, 0.5),
            ("failure", -0.6, 0.6),
            ("failed", -0.5, 0.5),
            ("crisis", -0.6, 0.7),
            ("scandal", -0.6, 0.7),
            ("fraud", -0.8, 0.8),
            ("decline", -0.4, 0.4),
            ("crash", -0.7, 0.6),
            ("risky", -0.5, 0.6),
            ("threat", -0.5, 0.6),
            ("concern", -0.3, 0.5),
            ("concerning", -0.4, 0.6),
            ("fear", -0.6, 0.7),
            ("weak", -0.4, 0.6),
            ("slow", -0.3, 0.4),
            ("problem", -0.4, 0.5),
            ("problems", -0.4, 0.5),
            ("lawsuit", -0.3, 0.4),
            ("ban", -0.4, 0.4),
            ("layoffs", -0.5, 0.5),
            ("dangerous", -0.6, 0.7),
            ("controversial", -0.4, 0.7),
            ("controversy", -0.4, 0.6),
            ("wrong", -0.5, 0.5),
            ("worried", -0.5, 0.7),
            ("ugly", -0.7, 0.8),
        ];

        for &(word, polarity, subjectivity) in positive_words.iter().chain(negative_words.iter()) {
            self.entries.insert(
                word,
                WordScore {
                    polarity,
                    subjectivity,
                },
            );
        }

        let boosters: &[(&str, f64)] = &[
            ("very", 1.3),
            ("really", 1.3),
            ("extremely", 1.5),
            ("absolutely", 1.4),
            ("incredibly", 1.4),
            ("highly", 1.3),
            ("totally", 1.3),
            ("truly", 1.3),
            ("so", 1.2),
        ];

        for &(word, factor) in boosters {
            self.boosters.insert(word, factor);
        }

        let negators = [
            "not", "no", "never", "none", "neither", "nothing", "isn't", "aren't", "wasn't",
            "weren't", "doesn't", "don't", "didn't", "hasn't", "haven't", "won't", "wouldn't",
            "can't", "cannot", "couldn't", "shouldn't",
        ];

        for word in negators {
            self.negators.insert(word);
        }
    }

    /// Score a text, returning `(polarity, subjectivity)`
    ///
    /// Texts with no recognized words score `(0.0, 0.0)`.
    pub fn assess(&self, text: &str) -> (f64, f64) {
        let lower = text.to_lowercase();
        let tokens: Vec<&str> = lower.split_whitespace().collect();

        let mut polarities = Vec::new();
        let mut subjectivities = Vec::new();

        for (i, raw) in tokens.iter().enumerate() {
            let token = clean_token(raw);
            if let Some(entry) = self.entries.get(token.as_str()) {
                polarities.push(self.apply_modifiers(&tokens, i, entry.polarity));
                subjectivities.push(entry.subjectivity);
            }
        }

        if polarities.is_empty() {
            return (0.0, 0.0);
        }

        let n = polarities.len() as f64;
        let polarity = (polarities.iter().sum::<f64>() / n).clamp(-1.0, 1.0);
        let subjectivity = (subjectivities.iter().sum::<f64>() / n).clamp(0.0, 1.0);
        (polarity, subjectivity)
    }

    /// Apply boosters and negators found up to 3 tokens back
    fn apply_modifiers(&self, tokens: &[&str], index: usize, mut polarity: f64) -> f64 {
        let start = index.saturating_sub(3);

        for raw in &tokens[start..index] {
            let prev = clean_token(raw);

            if let Some(&factor) = self.boosters.get(prev.as_str()) {
                polarity *= factor;
            }

            if self.negators.contains(prev.as_str()) {
                polarity *= -0.5;
            }
        }

        polarity.clamp(-1.0, 1.0)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

fn clean_token(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '\'' || *c == '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_polarity() {
        let lexicon = Lexicon::new();
        let (polarity, subjectivity) = lexicon.assess("This is a great product");
        assert!(polarity > 0.0);
        assert!(subjectivity > 0.0);
    }

    #[test]
    fn test_negative_polarity() {
        let lexicon = Lexicon::new();
        let (polarity, _) = lexicon.assess("A terrible failure");
        assert!(polarity < -0.5);
    }

    #[test]
    fn test_no_matches() {
        let lexicon = Lexicon::new();
        assert_eq!(lexicon.assess("The quarterly report was published"), (0.0, 0.0));
    }

    #[test]
    fn test_booster_amplifies() {
        let lexicon = Lexicon::new();
        let (plain, _) = lexicon.assess("good");
        let (boosted, _) = lexicon.assess("extremely good");
        assert!(boosted > plain);
    }

    #[test]
    fn test_negation_flips_and_dampens() {
        let lexicon = Lexicon::new();
        let (plain, _) = lexicon.assess("good");
        let (negated, _) = lexicon.assess("not good");
        assert!(plain > 0.0);
        assert!((negated - plain * -0.5).abs() < 1e-9);
    }

    #[test]
    fn test_punctuation_stripped() {
        let lexicon = Lexicon::new();
        let (polarity, _) = lexicon.assess("Great!!!");
        assert!(polarity > 0.0);
    }

    #[test]
    fn test_clamped_range() {
        let lexicon = Lexicon::new();
        let (polarity, subjectivity) =
            lexicon.assess("extremely awesome excellent wonderful impressive");
        assert!(polarity <= 1.0);
        assert!(subjectivity <= 1.0);
    }
}
