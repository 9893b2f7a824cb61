use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::answers::AnswerStore;
use crate::error::EngineError;
use crate::hooks;
use crate::prompt::Prompt;
use crate::registry::PromptRegistry;
use crate::spec::prompt::PromptSpec;

/// One prompt session: the ordered prompt list plus the answer tree it
/// reads from and writes to.
///
/// Every mutation funnels into [`PromptEngine::recompute`], which walks the
/// prompts in registration order. A prompt's hooks therefore observe the
/// already-derived answers of the prompts registered before it, so dependent
/// prompts must be registered after the prompts they depend on.
#[derive(Debug, Clone, Default)]
pub struct PromptEngine {
    registry: PromptRegistry,
    answers: AnswerStore,
}

impl PromptEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every spec in order.
    pub fn from_specs<I>(specs: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = PromptSpec>,
    {
        let mut engine = Self::new();
        for spec in specs {
            engine.register(spec)?;
        }
        Ok(engine)
    }

    pub fn register(&mut self, spec: PromptSpec) -> Result<(), EngineError> {
        self.registry.register(spec)
    }

    /// Drops the prompt with `id`. Its stored answer is left untouched.
    pub fn unregister(&mut self, id: &str) {
        self.registry.unregister(id);
    }

    /// Clears prompts and answers together.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.answers.clear();
    }

    /// Prompts in registration order.
    pub fn prompts(&self) -> &[Prompt] {
        self.registry.all()
    }

    pub fn prompt(&self, id: &str) -> Option<&Prompt> {
        self.registry.find(id)
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    /// Direct access to the live answer tree. Changes made here are not
    /// derived until the next [`recompute`](Self::recompute).
    pub fn answers_mut(&mut self) -> &mut AnswerStore {
        &mut self.answers
    }

    /// Replaces the answer tree and derives every prompt from it.
    pub fn set_answers(&mut self, answers: impl Into<AnswerStore>) -> Result<(), EngineError> {
        self.answers = answers.into();
        self.recompute()
    }

    /// Applies several answer changes before a single derivation pass.
    pub fn mutate_answers<F>(&mut self, f: F) -> Result<(), EngineError>
    where
        F: FnOnce(&mut AnswerStore),
    {
        f(&mut self.answers);
        self.recompute()
    }

    /// Initial derivation once all prompts are registered.
    pub fn start(&mut self) -> Result<(), EngineError> {
        self.recompute()
    }

    /// Re-derives visibility, choices and values for every prompt, in order.
    ///
    /// A failing hook aborts the pass; prompts processed before it keep
    /// their new state.
    pub fn recompute(&mut self) -> Result<(), EngineError> {
        debug!(prompts = self.registry.len(), "deriving prompts");
        for prompt in self.registry.iter_mut() {
            derive(prompt, &mut self.answers)?;
        }
        Ok(())
    }

    /// Records an explicit answer for `id`, then re-derives all prompts.
    ///
    /// Returns `Ok(None)` when no prompt has that id; nothing is changed in
    /// that case. Validation failures are stored on the prompt, not returned.
    pub fn set_value(&mut self, id: &str, value: Value) -> Result<Option<&Prompt>, EngineError> {
        let Some(prompt) = self.registry.find_mut(id) else {
            warn!(prompt = id, "cannot set value: prompt not found");
            return Ok(None);
        };

        prompt.error = hooks::validate(&prompt.raw, &value, &self.answers)?;
        prompt.value = Some(hooks::display_value(&prompt.raw, value.clone())?);
        let stored = hooks::filtered(&prompt.raw, value)?;
        prompt.value_changed = true;
        self.answers.set(id, stored);

        self.recompute()?;
        Ok(self.registry.find(id))
    }
}

fn derive(prompt: &mut Prompt, answers: &mut AnswerStore) -> Result<(), EngineError> {
    let was_visible = prompt.visible;
    prompt.visible = hooks::visible(&prompt.raw, answers)?;
    prompt.choices = hooks::choices(&prompt.raw, answers)?;

    if was_visible && !prompt.visible {
        debug!(prompt = %prompt.id, "prompt hidden, dropping its answer");
        answers.remove(&prompt.id);
        prompt.value_changed = false;
    } else if prompt.visible && !prompt.value_changed {
        let effective = match answers.get(&prompt.id) {
            Some(answer) => Some(answer),
            None => hooks::default_value(&prompt.raw, answers)?,
        };
        trace!(prompt = %prompt.id, value = ?effective, "resolved effective value");
        match effective {
            Some(value) => {
                prompt.value = Some(hooks::display_value(&prompt.raw, value.clone())?);
                let stored = hooks::filtered(&prompt.raw, value)?;
                answers.set(&prompt.id, stored);
            }
            None => prompt.value = None,
        }
    }
    Ok(())
}
