//! Prompt template error types

use thiserror::Error;

/// Errors that can occur while compiling or rendering a prompt template
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    /// The source does not parse, or it invokes a helper nobody registered
    #[error("Compile error: {0}")]
    Compile(String),

    /// Execution failed: missing field, bad helper arguments, unserializable data
    #[error("Render error: {0}")]
    Render(String),
}

impl PromptError {
    /// Check if this error came from compiling the template source
    pub fn is_compile(&self) -> bool {
        matches!(self, PromptError::Compile(_))
    }

    /// Check if this error came from executing a compiled template
    pub fn is_render(&self) -> bool {
        matches!(self, PromptError::Render(_))
    }

    /// The diagnostic text without the category prefix
    pub fn message(&self) -> &str {
        match self {
            PromptError::Compile(msg) | PromptError::Render(msg) => msg,
        }
    }
}

/// Result alias for prompt template operations
pub type PromptResult<T> = Result<T, PromptError>;
