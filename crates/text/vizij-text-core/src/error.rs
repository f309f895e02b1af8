use thiserror::Error;

/// Errors raised while configuring a text animation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("phrase list is empty; at least one phrase is required")]
    EmptyPhrases,
    #[error("count-up target must be a finite number")]
    NonFiniteTarget,
    #[error("config parse error: {0}")]
    Parse(String),
}
