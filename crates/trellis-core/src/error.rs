use thiserror::Error;

/// Failure to build a commit-time text filter.
#[derive(Debug, Error)]
pub enum TextFilterError {
    #[error("invalid filter pattern: {0}")]
    Pattern(#[from] regex::Error),
}
