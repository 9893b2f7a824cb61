#![allow(missing_docs)]

pub mod answers;
pub mod engine;
pub mod error;
pub mod expr;
pub mod hooks;
pub mod prompt;
pub mod registry;
pub mod spec;
pub mod validate;

pub use answers::{AnswerNode, AnswerStore};
pub use engine::PromptEngine;
pub use error::{DefinitionError, EngineError, HookError, HookKind};
pub use expr::Expr;
pub use prompt::{Choice, Prompt, PromptError};
pub use registry::PromptRegistry;
pub use spec::{
    ChoiceSpec, Constraint, FormDefinition, Hook, HookResult, PromptDefinition, PromptSpec,
    PromptType, Validation, Validator, ValueFilter, ValueMapper, WhenCondition,
};
