//! Hierarchical action categories
//!
//! A category is a `/`-delimited path such as `"Editor/Modify"`. The manager
//! keeps categories in a flat list in which every subcategory follows its
//! parent, see [`crate::manager::BindManager::add_category`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// A `/`-delimited category path
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub const PLAY: &'static str = "Play";
    pub const EDITOR: &'static str = "Editor";
    pub const GLOBAL: &'static str = "Global";
    pub const EDITOR_UI: &'static str = "Editor/UI";
    pub const EDITOR_MODIFY: &'static str = "Editor/Modify";
    pub const EDITOR_MOVE: &'static str = "Editor/Move";

    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Path segments, e.g. `["Editor", "Modify"]`
    pub fn path(&self) -> Vec<&str> {
        self.0.split('/').collect()
    }

    /// The path with its last segment stripped, None if top-level
    pub fn parent(&self) -> Option<Category> {
        self.0
            .rfind('/')
            .map(|idx| Category(self.0[..idx].to_string()))
    }

    /// True if this category is `parent` or nested anywhere below it.
    ///
    /// Matches whole segments: "Editor/Move" is under "Editor", "Editors" is not.
    pub fn has_parent(&self, parent: &Category) -> bool {
        if parent.0.is_empty() {
            return true;
        }
        match self.0.strip_prefix(parent.0.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Category {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl From<String> for Category {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
