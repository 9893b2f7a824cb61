use crate::error::EngineError;
use crate::prompt::Prompt;
use crate::spec::prompt::PromptSpec;

/// Insertion-ordered prompt collection. Order is the derivation order.
#[derive(Debug, Clone, Default)]
pub struct PromptRegistry {
    prompts: Vec<Prompt>,
}

impl PromptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a prompt built from `spec`.
    pub fn register(&mut self, spec: PromptSpec) -> Result<(), EngineError> {
        if !is_valid_path(&spec.name) {
            return Err(EngineError::InvalidPath(spec.name));
        }
        if self.find(&spec.name).is_some() {
            return Err(EngineError::DuplicatePrompt(spec.name));
        }
        self.prompts.push(Prompt::from_spec(spec));
        Ok(())
    }

    /// Removes the prompt with `id`, returning it when present.
    pub fn unregister(&mut self, id: &str) -> Option<Prompt> {
        let index = self.prompts.iter().position(|prompt| prompt.id == id)?;
        Some(self.prompts.remove(index))
    }

    pub fn clear(&mut self) {
        self.prompts.clear();
    }

    pub fn find(&self, id: &str) -> Option<&Prompt> {
        self.prompts.iter().find(|prompt| prompt.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Prompt> {
        self.prompts.iter_mut().find(|prompt| prompt.id == id)
    }

    pub fn all(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Prompt> {
        self.prompts.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}

fn is_valid_path(path: &str) -> bool {
    !path.is_empty() && path.split('.').all(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::prompt::PromptType;

    #[test]
    fn keeps_insertion_order() {
        let mut registry = PromptRegistry::new();
        for id in ["b", "a", "c.d"] {
            registry
                .register(PromptSpec::new(id, PromptType::Input))
                .expect("register");
        }
        let ids: Vec<_> = registry.all().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c.d"]);
    }

    #[test]
    fn rejects_duplicates_and_bad_paths() {
        let mut registry = PromptRegistry::new();
        registry
            .register(PromptSpec::new("name", PromptType::Input))
            .expect("register");
        assert!(matches!(
            registry.register(PromptSpec::new("name", PromptType::List)),
            Err(EngineError::DuplicatePrompt(id)) if id == "name"
        ));
        assert!(matches!(
            registry.register(PromptSpec::new("a..b", PromptType::Input)),
            Err(EngineError::InvalidPath(_))
        ));
        assert!(matches!(
            registry.register(PromptSpec::new("", PromptType::Input)),
            Err(EngineError::InvalidPath(_))
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn new_prompt_starts_with_initial_state() {
        let mut registry = PromptRegistry::new();
        registry
            .register(
                PromptSpec::new("project-name", PromptType::Input)
                    .message("Project name")
                    .short("Name"),
            )
            .expect("register");
        let prompt = registry.find("project-name").expect("prompt");
        assert!(prompt.visible);
        assert!(prompt.enabled);
        assert!(!prompt.value_changed);
        assert_eq!(prompt.value, None);
        assert_eq!(prompt.choices, None);
        assert_eq!(prompt.error, None);
        assert_eq!(prompt.name.as_deref(), Some("Name"));
        assert_eq!(prompt.description, None);
    }

    #[test]
    fn unregister_missing_is_noop() {
        let mut registry = PromptRegistry::new();
        registry
            .register(PromptSpec::new("a", PromptType::Input))
            .expect("register");
        assert!(registry.unregister("missing").is_none());
        assert!(registry.unregister("a").is_some());
        assert!(registry.is_empty());
    }
}
