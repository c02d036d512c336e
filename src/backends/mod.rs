//! Backends module - External tool integrations and process handoff
//!
//! Provides:
//! - openbox: Parser for the openbox3-pipe menu XML
//! - xdg_menu: xdg_menu integration
//! - launch: Command tokenizing and exec

use anyhow::Result;

use crate::core::model::MenuCache;

pub mod launch;
pub mod openbox;
pub mod xdg_menu;

/// Anything that can build a fresh menu
pub trait MenuSource {
    fn generate(&self) -> Result<MenuCache>;
}
