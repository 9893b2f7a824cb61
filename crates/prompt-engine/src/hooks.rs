//! Uniform evaluation of prompt hooks against the current answers.

use serde_json::Value;

use crate::answers::AnswerStore;
use crate::error::{EngineError, HookError, HookKind};
use crate::prompt::{Choice, PromptError};
use crate::spec::hook::Validation;
use crate::spec::prompt::{ChoiceSpec, PromptSpec, PromptType};

pub const INVALID_INPUT: &str = "Invalid input";

fn failed(spec: &PromptSpec, hook: HookKind) -> impl FnOnce(HookError) -> EngineError + '_ {
    move |source| EngineError::Hook {
        prompt: spec.name.clone(),
        hook,
        source,
    }
}

/// JSON truthiness: `false`, `null`, `0`, and `""` are falsy.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Visibility from the `when` hook; prompts without one are visible.
pub fn visible(spec: &PromptSpec, answers: &AnswerStore) -> Result<bool, EngineError> {
    match &spec.when {
        Some(hook) => hook.resolve(answers).map_err(failed(spec, HookKind::When)),
        None => Ok(true),
    }
}

fn raw_choices(
    spec: &PromptSpec,
    answers: &AnswerStore,
) -> Result<Option<Vec<ChoiceSpec>>, EngineError> {
    spec.choices
        .as_ref()
        .map(|hook| hook.resolve(answers).map_err(failed(spec, HookKind::Choices)))
        .transpose()
}

/// Choice list exposed on the prompt, values transformed and JSON-encoded.
pub fn choices(
    spec: &PromptSpec,
    answers: &AnswerStore,
) -> Result<Option<Vec<Choice>>, EngineError> {
    let Some(items) = raw_choices(spec, answers)? else {
        return Ok(None);
    };
    items
        .into_iter()
        .map(|item| -> Result<Choice, EngineError> {
            Ok(Choice {
                value: display_value(spec, item.value)?,
                name: item.name,
                checked: item.checked,
                disabled: item.disabled,
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Default value: pre-set `value`, then the `default` hook, then the
/// type-specific fallback (`checkbox` from the encoded values of its checked
/// choices, `confirm` false).
pub fn default_value(
    spec: &PromptSpec,
    answers: &AnswerStore,
) -> Result<Option<Value>, EngineError> {
    if let Some(value) = &spec.value {
        return Ok(Some(value.clone()));
    }
    if let Some(hook) = &spec.default {
        return hook
            .resolve(answers)
            .map(Some)
            .map_err(failed(spec, HookKind::Default));
    }
    match spec.kind {
        PromptType::Checkbox => Ok(choices(spec, answers)?.map(|items| {
            Value::Array(
                items
                    .into_iter()
                    .filter(|item| item.checked)
                    .map(|item| Value::String(item.value))
                    .collect(),
            )
        })),
        PromptType::Confirm => Ok(Some(Value::Bool(false))),
        _ => Ok(None),
    }
}

/// Runs the `validate` hook and maps its outcome to the prompt error slot.
pub fn validate(
    spec: &PromptSpec,
    value: &Value,
    answers: &AnswerStore,
) -> Result<Option<PromptError>, EngineError> {
    let Some(validator) = &spec.validate else {
        return Ok(None);
    };
    let outcome = validator
        .call(value, answers)
        .map_err(failed(spec, HookKind::Validate))?;
    Ok(match outcome {
        Validation::Valid => None,
        Validation::Message(message) => Some(PromptError::new(message)),
        Validation::Invalid => Some(PromptError::new(INVALID_INPUT)),
    })
}

/// Value written to the answer store.
pub fn filtered(spec: &PromptSpec, value: Value) -> Result<Value, EngineError> {
    match &spec.filter {
        Some(filter) => filter.call(value).map_err(failed(spec, HookKind::Filter)),
        None => Ok(value),
    }
}

/// JSON encoding of the transformed value, as shown on the prompt.
pub fn display_value(spec: &PromptSpec, value: Value) -> Result<String, EngineError> {
    let value = match &spec.transform {
        Some(transform) => transform
            .call(value)
            .map_err(failed(spec, HookKind::Transform))?,
        None => value,
    };
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::hook::{Hook, ValueMapper};
    use serde_json::json;

    #[test]
    fn truthiness_matches_json_semantics() {
        assert!(!truthy(&json!(null)));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("")));
        assert!(truthy(&json!("no")));
        assert!(truthy(&json!([])));
        assert!(truthy(&json!({})));
    }

    #[test]
    fn confirm_defaults_to_false_without_explicit_default() {
        let answers = AnswerStore::new();
        let spec = PromptSpec::new("lint", PromptType::Confirm);
        assert_eq!(default_value(&spec, &answers).unwrap(), Some(json!(false)));
        let spec = spec.default_value(true);
        assert_eq!(default_value(&spec, &answers).unwrap(), Some(json!(true)));
    }

    #[test]
    fn checkbox_default_comes_from_checked_choices() {
        let spec = PromptSpec::new("features", PromptType::Checkbox).choices(vec![
            ChoiceSpec::new("babel").checked(true),
            ChoiceSpec::new("router"),
            ChoiceSpec::new("vuex").checked(true),
        ]);
        let value = default_value(&spec, &AnswerStore::new()).unwrap();
        assert_eq!(value, Some(json!(["\"babel\"", "\"vuex\""])));
    }

    #[test]
    fn checkbox_default_uses_transformed_choice_values() {
        let spec = PromptSpec::new("features", PromptType::Checkbox)
            .choices(vec![
                ChoiceSpec::new("babel").checked(true),
                ChoiceSpec::new("router"),
            ])
            .transform(ValueMapper::map(|value| json!(format!("T:{value}"))));
        let answers = AnswerStore::new();

        let exposed = choices(&spec, &answers).unwrap().unwrap();
        assert_eq!(exposed[0].value, "\"T:\\\"babel\\\"\"");
        let value = default_value(&spec, &answers).unwrap();
        assert_eq!(value, Some(json!([exposed[0].value.clone()])));
    }

    #[test]
    fn preset_value_wins_over_default() {
        let spec = PromptSpec::new("name", PromptType::Input)
            .default_value("app")
            .value("preset");
        let value = default_value(&spec, &AnswerStore::new()).unwrap();
        assert_eq!(value, Some(json!("preset")));
    }

    #[test]
    fn choices_are_transformed_and_encoded() {
        let spec = PromptSpec::new("pm", PromptType::List)
            .choices(vec![ChoiceSpec::new("npm").named("NPM")])
            .transform(ValueMapper::map(|value| {
                json!(value.as_str().unwrap_or_default().to_uppercase())
            }));
        let choices = choices(&spec, &AnswerStore::new()).unwrap().unwrap();
        assert_eq!(choices[0].value, "\"NPM\"");
        assert_eq!(choices[0].name.as_deref(), Some("NPM"));
    }

    #[test]
    fn non_message_failure_uses_generic_error() {
        let spec = PromptSpec::new("port", PromptType::Number).validate(|v, _| v.is_u64());
        let error = validate(&spec, &json!("x"), &AnswerStore::new()).unwrap();
        assert_eq!(error, Some(PromptError::new(INVALID_INPUT)));
        assert_eq!(validate(&spec, &json!(80), &AnswerStore::new()).unwrap(), None);
    }

    #[test]
    fn hook_failure_names_prompt_and_hook() {
        let mut spec = PromptSpec::new("broken", PromptType::Input);
        spec.when = Some(Hook::computed(|_| Err(HookError::new("boom"))));
        let err = visible(&spec, &AnswerStore::new()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Hook { ref prompt, hook: HookKind::When, .. } if prompt == "broken"
        ));
        assert_eq!(err.to_string(), "when hook of prompt 'broken' failed: boom");
    }
}
