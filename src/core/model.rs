//! Menu data model
//!
//! `MenuCache` is the on-disk shape: category name to `[icon, programs]`,
//! program name to `[icon, command]`. An absent icon is stored as `""` so the
//! file stays compatible with caches written by earlier releases.
//!
//! `MenuTree` is the sorted, toolkit-neutral view handed to presenters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single launchable program: `[icon, command]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program(pub String, pub String);

impl Program {
    pub fn new(icon: impl Into<String>, command: impl Into<String>) -> Self {
        Self(icon.into(), command.into())
    }

    pub fn icon(&self) -> Option<&str> {
        non_empty(&self.0)
    }

    pub fn command(&self) -> &str {
        &self.1
    }
}

/// A category: `[icon, {program name: Program}]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category(pub String, pub BTreeMap<String, Program>);

impl Category {
    pub fn new(icon: impl Into<String>) -> Self {
        Self(icon.into(), BTreeMap::new())
    }

    pub fn icon(&self) -> Option<&str> {
        non_empty(&self.0)
    }

    pub fn programs(&self) -> &BTreeMap<String, Program> {
        &self.1
    }

    /// Add a program; a duplicate name replaces the earlier entry
    pub fn insert(&mut self, name: impl Into<String>, program: Program) {
        self.1.insert(name.into(), program);
    }
}

/// The cached menu, keyed by category name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuCache {
    categories: BTreeMap<String, Category>,
}

impl MenuCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a category; a duplicate name replaces the earlier entry
    pub fn insert(&mut self, name: impl Into<String>, category: Category) {
        self.categories.insert(name.into(), category);
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&String, &Category)> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of programs across all categories
    pub fn program_count(&self) -> usize {
        self.categories.values().map(|c| c.programs().len()).sum()
    }
}

/// A leaf of the menu tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub command: String,
}

/// A submenu of the menu tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuCategory {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub entries: Vec<MenuEntry>,
}

/// Two-level menu, both levels sorted by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MenuTree {
    pub categories: Vec<MenuCategory>,
}

impl MenuTree {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_serializes_as_nested_arrays() {
        let mut internet = Category::new("");
        internet.insert("Browser", Program::new("", "firefox %U"));
        let mut cache = MenuCache::new();
        cache.insert("Internet", internet);

        let json = serde_json::to_string(&cache).unwrap();
        assert_eq!(json, r#"{"Internet":["",{"Browser":["","firefox %U"]}]}"#);
    }

    #[test]
    fn test_cache_deserializes_legacy_file() {
        let json = r#"{"Games": ["/icons/games.png", {"Chess": ["", "gnome-chess"]}]}"#;
        let cache: MenuCache = serde_json::from_str(json).unwrap();

        let games = cache.get("Games").unwrap();
        assert_eq!(games.icon(), Some("/icons/games.png"));
        let chess = &games.programs()["Chess"];
        assert_eq!(chess.icon(), None);
        assert_eq!(chess.command(), "gnome-chess");
    }

    #[test]
    fn test_duplicate_names_last_write_wins() {
        let mut cat = Category::new("");
        cat.insert("Editor", Program::new("", "vim"));
        cat.insert("Editor", Program::new("", "emacs"));
        assert_eq!(cat.programs().len(), 1);
        assert_eq!(cat.programs()["Editor"].command(), "emacs");

        let mut cache = MenuCache::new();
        cache.insert("Office", Category::new("a.png"));
        cache.insert("Office", Category::new("b.png"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("Office").unwrap().icon(), Some("b.png"));
    }

    #[test]
    fn test_program_count() {
        let mut a = Category::new("");
        a.insert("x", Program::new("", "x"));
        a.insert("y", Program::new("", "y"));
        let mut b = Category::new("");
        b.insert("z", Program::new("", "z"));

        let mut cache = MenuCache::new();
        cache.insert("A", a);
        cache.insert("B", b);
        assert_eq!(cache.program_count(), 3);
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        let json = r#"{"Games": {"Chess": "gnome-chess"}}"#;
        assert!(serde_json::from_str::<MenuCache>(json).is_err());
    }
}
