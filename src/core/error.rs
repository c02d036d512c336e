//! Error taxonomy
//!
//! Typed failures that callers need to tell apart. Everything else travels as
//! `anyhow::Error` with context attached.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PappyError {
    /// The external menu generator is not installed
    #[error("Please install {tool} for pappymenu to work!")]
    ToolNotFound { tool: String },

    /// The external menu generator ran but reported failure
    #[error("{tool} exited with {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    /// The generator output is not the expected XML
    #[error("failed to parse menu XML at byte {position}: {message}")]
    Parse { position: u64, message: String },

    /// No cache file yet
    #[error("menu cache not found at {}", path.display())]
    NotFound { path: PathBuf },

    /// The cache file exists but does not hold a menu
    #[error("menu cache at {} is corrupt ({message}); run with -r to regenerate it", path.display())]
    CorruptCache { path: PathBuf, message: String },

    /// The selected command cannot be turned into an argv
    #[error("invalid command {command:?}: {reason}")]
    InvalidCommand { command: String, reason: String },

    /// Reading or writing the cache file failed
    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Replacing the process image failed
    #[error("failed to execute {program}: {source}")]
    Exec {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl PappyError {
    pub fn parse(position: u64, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }

    pub fn io(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn invalid_command(command: &str, reason: impl Into<String>) -> Self {
        Self::InvalidCommand {
            command: command.to_string(),
            reason: reason.into(),
        }
    }
}

/// True if `err` (anywhere in its chain) is a missing cache file
pub fn is_cache_miss(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<PappyError>(),
            Some(PappyError::NotFound { .. })
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_tool_not_found_message() {
        let err = PappyError::ToolNotFound {
            tool: "xdg_menu".to_string(),
        };
        assert_eq!(err.to_string(), "Please install xdg_menu for pappymenu to work!");
    }

    #[test]
    fn test_io_error_names_path_and_keeps_source() {
        let err = PappyError::io(
            "failed to read cache file",
            Path::new("/tmp/menu-cache"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(
            err.to_string(),
            "failed to read cache file /tmp/menu-cache: denied"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_is_cache_miss_through_context() {
        let err: anyhow::Result<()> = Err(PappyError::NotFound {
            path: PathBuf::from("/tmp/menu-cache"),
        })
        .context("loading menu");
        assert!(is_cache_miss(&err.unwrap_err()));

        let other = anyhow::Error::from(PappyError::parse(3, "bad"));
        assert!(!is_cache_miss(&other));
    }
}
