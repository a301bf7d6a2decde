//! Bindable action declarations
//!
//! Feature modules declare each rebindable operation once as a
//! [`BindableAction`] and register it with the manager.

use serde::{Deserialize, Serialize};

use crate::bind::Bind;
use crate::category::Category;

/// Globally unique action identifier, e.g. "editor.move-left"
pub type ActionId = String;

/// Auto-repeat settings for a held bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatOptions {
    pub enabled: bool,
    /// Milliseconds between repeats
    pub rate: u64,
    /// Milliseconds before the first repeat
    pub delay: u64,
}

impl Default for RepeatOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            rate: 300,
            delay: 500,
        }
    }
}

/// A user-facing operation that binds can be assigned to
#[derive(Debug, Clone, PartialEq)]
pub struct BindableAction {
    id: ActionId,
    name: String,
    description: String,
    owner: Option<String>,
    defaults: Vec<Bind>,
    category: Category,
    repeatable: bool,
}

impl BindableAction {
    /// Create an action with no defaults, no category, and repeat allowed
    pub fn new(id: impl Into<ActionId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            owner: None,
            defaults: Vec::new(),
            category: Category::default(),
            repeatable: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Default binds, applied when nothing was persisted for the action
    pub fn with_defaults(mut self, defaults: impl IntoIterator<Item = Bind>) -> Self {
        self.defaults = defaults.into_iter().collect();
        self
    }

    pub fn with_category(mut self, category: impl Into<Category>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_repeatable(mut self, repeatable: bool) -> Self {
        self.repeatable = repeatable;
        self
    }

    /// Name of the module that declared the action
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name; falls back to the id when empty
    pub fn name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn defaults(&self) -> &[Bind] {
        &self.defaults
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind::{KeyCode, Modifiers};

    #[test]
    fn test_name_falls_back_to_id() {
        let action = BindableAction::new("editor.undo", "");
        assert_eq!(action.name(), "editor.undo");

        let action = BindableAction::new("editor.undo", "Undo");
        assert_eq!(action.name(), "Undo");
    }

    #[test]
    fn test_builder() {
        let bind = Bind::keyboard(KeyCode::Char('z'), Modifiers::CONTROL).unwrap();
        let action = BindableAction::new("editor.undo", "Undo")
            .with_description("Undo the last change")
            .with_defaults([bind])
            .with_category(Category::EDITOR_MODIFY)
            .with_repeatable(false)
            .with_owner("editor");

        assert_eq!(action.description(), "Undo the last change");
        assert_eq!(action.defaults(), &[bind]);
        assert_eq!(action.category().as_str(), "Editor/Modify");
        assert!(!action.is_repeatable());
        assert_eq!(action.owner(), Some("editor"));
    }

    #[test]
    fn test_repeat_defaults() {
        let opts = RepeatOptions::default();
        assert!(opts.enabled);
        assert_eq!(opts.rate, 300);
        assert_eq!(opts.delay, 500);
    }
}
