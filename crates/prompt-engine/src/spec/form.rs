use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::engine::PromptEngine;
use crate::error::{DefinitionError, HookError};
use crate::expr::Expr;
use crate::spec::hook::{Hook, ValueMapper};
use crate::spec::prompt::{ChoiceSpec, PromptSpec, PromptType};
use crate::validate;

/// Validation rules for a declarative prompt.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Constraint {
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_len: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_len: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Replaces the rule-specific error text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Built-in value mappers usable as `filter` or `transform` steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValueFilter {
    Trim,
    Lowercase,
    Uppercase,
    /// Parses a string into a JSON number; fails on anything else.
    Number,
}

impl ValueFilter {
    pub fn apply(self, value: Value) -> Result<Value, HookError> {
        match (self, value) {
            (ValueFilter::Trim, Value::String(text)) => Ok(Value::String(text.trim().to_string())),
            (ValueFilter::Lowercase, Value::String(text)) => Ok(Value::String(text.to_lowercase())),
            (ValueFilter::Uppercase, Value::String(text)) => Ok(Value::String(text.to_uppercase())),
            (ValueFilter::Number, Value::String(text)) => parse_number(text.trim())
                .map(Value::Number)
                .ok_or_else(|| HookError::new(format!("'{text}' is not a number"))),
            (ValueFilter::Number, value @ Value::Number(_)) => Ok(value),
            (ValueFilter::Number, other) => {
                Err(HookError::new(format!("{other} is not a number")))
            }
            (_, other) => Ok(other),
        }
    }
}

fn parse_number(text: &str) -> Option<Number> {
    if let Ok(integer) = text.parse::<i64>() {
        return Some(Number::from(integer));
    }
    if let Ok(unsigned) = text.parse::<u64>() {
        return Some(Number::from(unsigned));
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}

fn mapper(steps: Vec<ValueFilter>) -> Option<ValueMapper> {
    if steps.is_empty() {
        return None;
    }
    Some(ValueMapper::new(move |value| {
        steps.iter().try_fold(value, |value, step| step.apply(value))
    }))
}

/// `when` condition: a fixed flag or an expression over the answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum WhenCondition {
    Flag(bool),
    Expr(Expr),
}

/// Data-file form of a [`PromptSpec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PromptDefinition {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: PromptType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<WhenCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Answer path whose current value becomes this prompt's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<ChoiceSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate: Option<Constraint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<ValueFilter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<ValueFilter>,
}

impl PromptDefinition {
    pub fn into_spec(self) -> Result<PromptSpec, DefinitionError> {
        let validate = self
            .validate
            .as_ref()
            .map(|constraint| validate::compile(&self.name, constraint))
            .transpose()?;

        let when = self.when.map(|condition| match condition {
            WhenCondition::Flag(flag) => Hook::Constant(flag),
            WhenCondition::Expr(expr) => Hook::computed(move |answers| Ok(expr.evaluate(answers))),
        });

        // A constant default wins over `default_from`; the source answer
        // falls back to `null` when it is absent.
        let default = match (self.default, self.default_from) {
            (Some(value), _) => Some(Hook::Constant(value)),
            (None, Some(path)) => Some(Hook::computed(move |answers| {
                Ok(answers.get(&path).unwrap_or(Value::Null))
            })),
            (None, None) => None,
        };

        Ok(PromptSpec {
            name: self.name,
            kind: self.kind,
            message: self.message,
            short: self.short,
            description: self.description,
            link: self.link,
            value: self.value,
            when,
            default,
            validate,
            filter: mapper(self.filter),
            transform: mapper(self.transform),
            choices: self.choices.map(Hook::Constant),
        })
    }
}

/// Top-level declarative prompt file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormDefinition {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Registered in this order; dependent prompts come after their sources.
    pub prompts: Vec<PromptDefinition>,
}

impl FormDefinition {
    pub fn from_json_str(json: &str) -> Result<Self, DefinitionError> {
        serde_json::from_str(json).map_err(DefinitionError::Parse)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DefinitionError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn json_schema() -> Value {
        serde_json::to_value(schemars::schema_for!(FormDefinition)).unwrap_or(Value::Null)
    }

    /// Builds an engine with every prompt registered in file order.
    pub fn into_engine(self) -> Result<PromptEngine, DefinitionError> {
        let specs = self
            .prompts
            .into_iter()
            .map(PromptDefinition::into_spec)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PromptEngine::from_specs(specs)?)
    }
}
