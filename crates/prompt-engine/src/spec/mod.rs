pub mod form;
pub mod hook;
pub mod prompt;

pub use form::{Constraint, FormDefinition, PromptDefinition, ValueFilter, WhenCondition};
pub use hook::{Hook, HookResult, Validation, Validator, ValueMapper};
pub use prompt::{ChoiceSpec, PromptSpec, PromptType};
