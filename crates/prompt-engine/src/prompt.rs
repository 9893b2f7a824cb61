use serde::Serialize;

use crate::spec::prompt::{PromptSpec, PromptType};

/// Error attached to a prompt by its most recent validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptError {
    pub message: String,
}

impl PromptError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Selectable option exposed to consumers; `value` is the JSON-encoded,
/// transformed choice value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choice {
    pub value: String,
    pub name: Option<String>,
    pub checked: bool,
    pub disabled: bool,
}

/// Live state of one registered prompt.
#[derive(Debug, Clone, Serialize)]
pub struct Prompt {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PromptType,
    pub visible: bool,
    /// Always `true`; not derived from any hook.
    pub enabled: bool,
    pub name: Option<String>,
    pub message: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub choices: Option<Vec<Choice>>,
    /// JSON encoding of the transformed effective answer.
    pub value: Option<String>,
    pub value_changed: bool,
    pub error: Option<PromptError>,
    #[serde(skip)]
    pub raw: PromptSpec,
}

impl Prompt {
    pub fn from_spec(spec: PromptSpec) -> Self {
        Self {
            id: spec.name.clone(),
            kind: spec.kind,
            visible: true,
            enabled: true,
            name: spec.short.clone(),
            message: spec.message.clone(),
            description: spec.description.clone(),
            link: spec.link.clone(),
            choices: None,
            value: None,
            value_changed: false,
            error: None,
            raw: spec,
        }
    }
}
