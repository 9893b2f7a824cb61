use std::fmt;

use thiserror::Error;

/// Failure raised by a user-supplied hook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HookError {
    pub message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for HookError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for HookError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Which hook of a prompt was being evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    When,
    Default,
    Choices,
    Validate,
    Filter,
    Transform,
}

impl HookKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HookKind::When => "when",
            HookKind::Default => "default",
            HookKind::Choices => "choices",
            HookKind::Validate => "validate",
            HookKind::Filter => "filter",
            HookKind::Transform => "transform",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{hook} hook of prompt '{prompt}' failed: {source}")]
    Hook {
        prompt: String,
        hook: HookKind,
        #[source]
        source: HookError,
    },
    #[error("prompt '{0}' is already registered")]
    DuplicatePrompt(String),
    #[error("invalid prompt path '{0}'")]
    InvalidPath(String),
}

/// Errors raised while loading declarative prompt definitions.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("failed to read definition: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse definition: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("prompt '{prompt}' has an invalid pattern: {source}")]
    Pattern {
        prompt: String,
        #[source]
        source: regex::Error,
    },
    #[error("failed to register prompts: {0}")]
    Engine(#[from] EngineError),
}
