use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::answers::AnswerStore;
use crate::spec::hook::{Hook, HookResult, Validation, Validator, ValueMapper};

/// Prompt kinds understood by the engine.
///
/// Only `confirm` and `checkbox` influence derivation (default computation);
/// the rest are carried through for consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PromptType {
    #[default]
    Input,
    Number,
    Confirm,
    List,
    Rawlist,
    Expand,
    Checkbox,
    Password,
    Editor,
}

/// One entry of a prompt's choice list, as produced by a `choices` hook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChoiceSpec {
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub disabled: bool,
}

impl ChoiceSpec {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            name: None,
            checked: false,
            disabled: false,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// Definition of a prompt handed to [`PromptEngine::register`].
///
/// [`PromptEngine::register`]: crate::engine::PromptEngine::register
#[derive(Debug, Clone, Default)]
pub struct PromptSpec {
    /// Dot-separated answer path; becomes the prompt id.
    pub name: String,
    pub kind: PromptType,
    pub message: Option<String>,
    /// Short display name.
    pub short: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    /// Pre-set value; takes precedence over every default source.
    pub value: Option<Value>,
    pub when: Option<Hook<bool>>,
    pub default: Option<Hook<Value>>,
    pub validate: Option<Validator>,
    pub filter: Option<ValueMapper>,
    pub transform: Option<ValueMapper>,
    pub choices: Option<Hook<Vec<ChoiceSpec>>>,
}

impl PromptSpec {
    pub fn new(name: impl Into<String>, kind: PromptType) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn short(mut self, short: impl Into<String>) -> Self {
        self.short = Some(short.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn when(mut self, when: bool) -> Self {
        self.when = Some(Hook::Constant(when));
        self
    }

    pub fn when_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&AnswerStore) -> bool + Send + Sync + 'static,
    {
        self.when = Some(Hook::computed(move |answers| Ok(f(answers))));
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(Hook::Constant(value.into()));
        self
    }

    pub fn default_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&AnswerStore) -> HookResult<Value> + Send + Sync + 'static,
    {
        self.default = Some(Hook::computed(f));
        self
    }

    pub fn validate<F, R>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &AnswerStore) -> R + Send + Sync + 'static,
        R: Into<Validation>,
    {
        self.validate = Some(Validator::check(f));
        self
    }

    pub fn filter(mut self, mapper: ValueMapper) -> Self {
        self.filter = Some(mapper);
        self
    }

    pub fn transform(mut self, mapper: ValueMapper) -> Self {
        self.transform = Some(mapper);
        self
    }

    pub fn choices(mut self, choices: Vec<ChoiceSpec>) -> Self {
        self.choices = Some(Hook::Constant(choices));
        self
    }

    pub fn choices_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&AnswerStore) -> HookResult<Vec<ChoiceSpec>> + Send + Sync + 'static,
    {
        self.choices = Some(Hook::computed(f));
        self
    }
}
