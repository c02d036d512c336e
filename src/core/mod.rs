//! Core module - Menu data model, errors and cache location
//!
//! This module provides:
//! - The cached menu model (MenuCache) and the sorted MenuTree
//! - Typed errors for the failures callers react to
//! - Cache path resolution

pub mod error;
pub mod model;
pub mod paths;
