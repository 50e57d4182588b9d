use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::QuizError;

/// Generation strictness level. Controls the candidate-vocabulary frequency
/// threshold, the true/false negation probability, and how close in length a
/// distractor must be to the word it stands in for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Minimum number of occurrences a word needs before it can be blanked.
    pub fn frequency_threshold(self) -> usize {
        match self {
            Difficulty::Hard => 2,
            _ => 1,
        }
    }

    /// Maximum length difference between a distractor and the correct word.
    pub fn distractor_length_tolerance(self) -> usize {
        match self {
            Difficulty::Easy => 4,
            _ => 2,
        }
    }

    /// Probability that a true/false statement gets negated.
    pub fn false_probability(self) -> f64 {
        match self {
            Difficulty::Easy => 0.40,
            Difficulty::Medium => 0.55,
            Difficulty::Hard => 0.65,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Difficulty {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(QuizError::ValidationError(format!(
                "unknown difficulty '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("Medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!(" HARD ".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn difficulty_round_trips_through_display() {
        for level in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let parsed: Difficulty = level.to_string().parse().unwrap();
            assert_eq!(parsed, level);
        }
    }

    #[test]
    fn hard_tier_is_strictest() {
        assert_eq!(Difficulty::Hard.frequency_threshold(), 2);
        assert_eq!(Difficulty::Medium.frequency_threshold(), 1);
        assert_eq!(Difficulty::Easy.distractor_length_tolerance(), 4);
        assert_eq!(Difficulty::Hard.distractor_length_tolerance(), 2);
        assert!(
            Difficulty::Hard.false_probability() > Difficulty::Easy.false_probability()
        );
    }
}
