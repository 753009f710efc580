// Errors raised by the lazily compiled pattern sets
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum RegexError {
    #[error("Regex compilation failed for pattern '{pattern}' (name: {name}): {source}")]
    CompilationFailed {
        pattern: String,
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("Regex index out of bounds: {index} >= {max}")]
    IndexOutOfBounds { index: usize, max: usize },

    #[error("Regex pattern not found: {name}")]
    PatternNotFound { name: String },
}
