use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::answers::AnswerStore;
use crate::error::HookError;

pub type HookResult<T> = Result<T, HookError>;

type ComputeFn<T> = dyn Fn(&AnswerStore) -> HookResult<T> + Send + Sync;
type ValidateFn = dyn Fn(&Value, &AnswerStore) -> HookResult<Validation> + Send + Sync;
type MapFn = dyn Fn(Value) -> HookResult<Value> + Send + Sync;

/// A prompt hook: either a fixed value or a function of the current answers.
pub enum Hook<T> {
    Constant(T),
    Computed(Arc<ComputeFn<T>>),
}

impl<T> Hook<T> {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&AnswerStore) -> HookResult<T> + Send + Sync + 'static,
    {
        Hook::Computed(Arc::new(f))
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, Hook::Computed(_))
    }
}

impl<T: Clone> Hook<T> {
    /// Resolves the hook against the current answers.
    pub fn resolve(&self, answers: &AnswerStore) -> HookResult<T> {
        match self {
            Hook::Constant(value) => Ok(value.clone()),
            Hook::Computed(f) => f(answers),
        }
    }
}

impl<T: Clone> Clone for Hook<T> {
    fn clone(&self) -> Self {
        match self {
            Hook::Constant(value) => Hook::Constant(value.clone()),
            Hook::Computed(f) => Hook::Computed(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Hook<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hook::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Hook::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl<T> From<T> for Hook<T> {
    fn from(value: T) -> Self {
        Hook::Constant(value)
    }
}

/// Outcome of a `validate` hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    /// Invalid with a user-facing message.
    Message(String),
    /// Invalid without a message; reported as "Invalid input".
    Invalid,
}

impl From<bool> for Validation {
    fn from(valid: bool) -> Self {
        if valid {
            Validation::Valid
        } else {
            Validation::Invalid
        }
    }
}

impl From<&str> for Validation {
    fn from(message: &str) -> Self {
        Validation::Message(message.to_string())
    }
}

impl From<String> for Validation {
    fn from(message: String) -> Self {
        Validation::Message(message)
    }
}

impl From<Result<(), String>> for Validation {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Validation::Valid,
            Err(message) => Validation::Message(message),
        }
    }
}

/// `validate` hook: candidate value plus current answers.
#[derive(Clone)]
pub struct Validator(Arc<ValidateFn>);

impl Validator {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &AnswerStore) -> HookResult<Validation> + Send + Sync + 'static,
    {
        Validator(Arc::new(f))
    }

    /// Wraps an infallible check whose result converts into a [`Validation`].
    pub fn check<F, R>(f: F) -> Self
    where
        F: Fn(&Value, &AnswerStore) -> R + Send + Sync + 'static,
        R: Into<Validation>,
    {
        Validator::new(move |value, answers| Ok(f(value, answers).into()))
    }

    pub fn call(&self, value: &Value, answers: &AnswerStore) -> HookResult<Validation> {
        (self.0)(value, answers)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

/// `filter` / `transform` hook mapping one value to another.
#[derive(Clone)]
pub struct ValueMapper(Arc<MapFn>);

impl ValueMapper {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Value) -> HookResult<Value> + Send + Sync + 'static,
    {
        ValueMapper(Arc::new(f))
    }

    pub fn map<F>(f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        ValueMapper::new(move |value| Ok(f(value)))
    }

    pub fn call(&self, value: Value) -> HookResult<Value> {
        (self.0)(value)
    }
}

impl fmt::Debug for ValueMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueMapper(..)")
    }
}
