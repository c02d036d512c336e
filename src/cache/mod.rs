//! Cache module - Manages the on-disk menu cache
//!
//! Provides:
//! - Loading and atomically saving the JSON menu cache
//! - Regeneration on demand or on a cache miss

pub mod store;
