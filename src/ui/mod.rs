//! UI module - Menu presentation
//!
//! The menu is built as a plain [`MenuTree`] and handed to a [`Presenter`],
//! which blocks until the user picks an entry or cancels. The selection is
//! the return value of [`Presenter::present`].

use anyhow::Result;
use clap::ValueEnum;

use crate::core::model::{MenuCache, MenuCategory, MenuEntry, MenuTree};

#[cfg(feature = "gtk")]
pub mod gtk;
pub mod term;

/// A way of showing the menu and collecting one choice
pub trait Presenter {
    /// Show `tree`; `Some(command)` on selection, `None` on cancel
    fn present(&mut self, tree: &MenuTree) -> Result<Option<String>>;
}

/// Available presenters
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresenterKind {
    /// GTK popup menu at the pointer
    Gtk,
    /// Numbered prompts on the terminal
    Term,
}

impl Default for PresenterKind {
    fn default() -> Self {
        if cfg!(feature = "gtk") {
            PresenterKind::Gtk
        } else {
            PresenterKind::Term
        }
    }
}

/// Build the sorted two-level menu from the cache
pub fn build(cache: &MenuCache) -> MenuTree {
    let mut categories: Vec<MenuCategory> = cache
        .categories()
        .map(|(name, category)| {
            let mut entries: Vec<MenuEntry> = category
                .programs()
                .iter()
                .map(|(name, program)| MenuEntry {
                    name: name.clone(),
                    icon: program.icon().map(str::to_string),
                    command: program.command().to_string(),
                })
                .collect();
            entries.sort_by(|a, b| a.name.cmp(&b.name));

            MenuCategory {
                name: name.clone(),
                icon: category.icon().map(str::to_string),
                entries,
            }
        })
        .collect();
    categories.sort_by(|a, b| a.name.cmp(&b.name));

    MenuTree { categories }
}

/// Render the tree as indented text (`--list`)
pub fn render_text(tree: &MenuTree) -> String {
    let mut out = String::new();
    for category in &tree.categories {
        out.push_str(&category.name);
        out.push('\n');
        for entry in &category.entries {
            out.push_str(&format!("  {}\t{}\n", entry.name, entry.command));
        }
    }
    out
}

/// Create the presenter for `kind`
pub fn presenter(kind: PresenterKind, icon_size: i32) -> Result<Box<dyn Presenter>> {
    match kind {
        #[cfg(feature = "gtk")]
        PresenterKind::Gtk => Ok(Box::new(gtk::GtkPresenter::new(icon_size))),
        #[cfg(not(feature = "gtk"))]
        PresenterKind::Gtk => {
            let _ = icon_size;
            anyhow::bail!(
                "pappymenu was built without GTK support; rebuild with the default features or use --presenter term"
            )
        }
        PresenterKind::Term => Ok(Box::new(term::TerminalPresenter::stdio())),
    }
}
