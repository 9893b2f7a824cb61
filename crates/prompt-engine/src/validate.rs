use regex::Regex;
use serde_json::Value;

use crate::error::DefinitionError;
use crate::spec::form::Constraint;
use crate::spec::hook::{Validation, Validator};

/// Compiles a declarative constraint into a `validate` hook.
pub fn compile(prompt: &str, constraint: &Constraint) -> Result<Validator, DefinitionError> {
    let pattern = constraint
        .pattern
        .as_deref()
        .map(Regex::new)
        .transpose()
        .map_err(|source| DefinitionError::Pattern {
            prompt: prompt.to_string(),
            source,
        })?;
    let constraint = constraint.clone();
    Ok(Validator::check(move |value, _answers| {
        match check(&constraint, pattern.as_ref(), value) {
            Some(rule_message) => Validation::Message(
                constraint
                    .message
                    .clone()
                    .unwrap_or_else(|| rule_message.to_string()),
            ),
            None => Validation::Valid,
        }
    }))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn check(constraint: &Constraint, pattern: Option<&Regex>, value: &Value) -> Option<&'static str> {
    if constraint.required && is_blank(value) {
        return Some("value is required");
    }

    if let Some(regex) = pattern
        && let Some(text) = value.as_str()
        && !regex.is_match(text)
    {
        return Some("value does not match pattern");
    }

    if let Some(min_len) = constraint.min_len
        && let Some(text) = value.as_str()
        && text.chars().count() < min_len
    {
        return Some("string shorter than min length");
    }

    if let Some(max_len) = constraint.max_len
        && let Some(text) = value.as_str()
        && text.chars().count() > max_len
    {
        return Some("string longer than max length");
    }

    if let Some(min) = constraint.min
        && let Some(number) = value.as_f64()
        && number < min
    {
        return Some("value below minimum");
    }

    if let Some(max) = constraint.max
        && let Some(number) = value.as_f64()
        && number > max
    {
        return Some("value above maximum");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::AnswerStore;
    use serde_json::json;

    fn run(constraint: Constraint, value: Value) -> Validation {
        compile("p", &constraint)
            .expect("compile")
            .call(&value, &AnswerStore::new())
            .expect("validate")
    }

    #[test]
    fn required_rejects_blank_strings() {
        let constraint = Constraint {
            required: true,
            ..Default::default()
        };
        assert_eq!(
            run(constraint.clone(), json!("  ")),
            Validation::Message("value is required".into())
        );
        assert_eq!(run(constraint, json!("x")), Validation::Valid);
    }

    #[test]
    fn custom_message_overrides_rule_text() {
        let constraint = Constraint {
            pattern: Some("^[a-z-]+$".into()),
            message: Some("Use lowercase letters and dashes".into()),
            ..Default::default()
        };
        assert_eq!(
            run(constraint, json!("My App")),
            Validation::Message("Use lowercase letters and dashes".into())
        );
    }

    #[test]
    fn numeric_bounds() {
        let constraint = Constraint {
            min: Some(1.0),
            max: Some(65535.0),
            ..Default::default()
        };
        assert_eq!(
            run(constraint.clone(), json!(0)),
            Validation::Message("value below minimum".into())
        );
        assert_eq!(run(constraint, json!(8080)), Validation::Valid);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let constraint = Constraint {
            pattern: Some("(".into()),
            ..Default::default()
        };
        assert!(matches!(
            compile("name", &constraint),
            Err(DefinitionError::Pattern { prompt, .. }) if prompt == "name"
        ));
    }
}
