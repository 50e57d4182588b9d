use std::env;

use crate::models::domain::Difficulty;

/// Runtime defaults for the quiz generator, read from the environment with
/// sensible fallbacks. Generation itself takes explicit arguments; these
/// only seed the binary's defaults and bound its input size.
#[derive(Clone, Debug)]
pub struct Config {
    pub default_mcq_count: usize,
    pub default_tf_count: usize,
    pub default_difficulty: Difficulty,
    /// Source text is truncated to this many characters before generation.
    pub max_source_chars: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            default_mcq_count: env::var("QUIZGEN_MCQ_COUNT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
            default_tf_count: env::var("QUIZGEN_TF_COUNT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
            default_difficulty: env::var("QUIZGEN_DIFFICULTY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(Difficulty::Medium),
            max_source_chars: env::var("QUIZGEN_MAX_SOURCE_CHARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2_000_000),
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            default_mcq_count: 5,
            default_tf_count: 5,
            default_difficulty: Difficulty::Medium,
            max_source_chars: 10_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_has_workable_defaults() {
        let config = Config::from_env();

        assert!(config.default_mcq_count + config.default_tf_count > 0);
        assert!(config.max_source_chars > 0);
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert_eq!(config.default_mcq_count, 5);
        assert_eq!(config.default_tf_count, 5);
        assert_eq!(config.default_difficulty, Difficulty::Medium);
    }
}
