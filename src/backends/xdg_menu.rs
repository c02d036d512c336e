//! xdg_menu integration
//!
//! Calls `xdg_menu --format openbox3-pipe` and parses its stdout into a
//! MenuCache.

use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::process::Command;
use tracing::debug;

use crate::backends::openbox::parse_menu_xml;
use crate::backends::MenuSource;
use crate::core::error::PappyError;
use crate::core::model::MenuCache;

/// Default menu generator
pub const DEFAULT_MENU_TOOL: &str = "xdg_menu";

/// Output format requested from the generator
pub const MENU_FORMAT: &str = "openbox3-pipe";

/// Menu source backed by the external xdg_menu tool
#[derive(Debug, Clone)]
pub struct XdgMenu {
    tool: String,
}

impl XdgMenu {
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Run the tool and return its raw stdout
    pub fn run_tool(&self) -> Result<String> {
        debug!(tool = %self.tool, format = MENU_FORMAT, "running menu generator");

        let output = match Command::new(&self.tool)
            .arg("--format")
            .arg(MENU_FORMAT)
            .output()
        {
            Ok(output) => output,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(PappyError::ToolNotFound {
                    tool: self.tool.clone(),
                }
                .into());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to run {}", self.tool));
            }
        };

        if !output.status.success() {
            return Err(PappyError::ToolFailed {
                tool: self.tool.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl MenuSource for XdgMenu {
    fn generate(&self) -> Result<MenuCache> {
        let xml = self.run_tool()?;
        let cache = parse_menu_xml(&xml)
            .with_context(|| format!("{} produced unreadable output", self.tool))?;
        debug!(
            categories = cache.len(),
            programs = cache.program_count(),
            "parsed menu"
        );
        Ok(cache)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_is_tool_not_found() {
        let source = XdgMenu::new("/nonexistent/pappymenu-test/xdg_menu");
        let err = source.generate().unwrap_err();
        match err.downcast_ref::<PappyError>() {
            Some(PappyError::ToolNotFound { tool }) => {
                assert_eq!(tool, "/nonexistent/pappymenu-test/xdg_menu")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    mod with_script {
        use super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use std::path::{Path, PathBuf};
        use tempfile::tempdir;

        fn write_script(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("xdg_menu");
            fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[test]
        fn test_generate_parses_stdout() {
            let temp = tempdir().unwrap();
            let script = write_script(
                temp.path(),
                r#"[ "$1" = "--format" ] && [ "$2" = "openbox3-pipe" ] || exit 3
echo '<openbox_pipe_menu><menu label="Internet"><item label="Browser">firefox %U</item></menu></openbox_pipe_menu>'"#,
            );

            let cache = XdgMenu::new(script.to_string_lossy()).generate().unwrap();
            let browser = &cache.get("Internet").unwrap().programs()["Browser"];
            assert_eq!(browser.command(), "firefox %U");
        }

        #[test]
        fn test_nonzero_exit_is_tool_failed() {
            let temp = tempdir().unwrap();
            let script = write_script(temp.path(), "echo boom >&2; exit 2");

            let err = XdgMenu::new(script.to_string_lossy()).generate().unwrap_err();
            match err.downcast_ref::<PappyError>() {
                Some(PappyError::ToolFailed { stderr, .. }) => assert_eq!(stderr, "boom"),
                other => panic!("unexpected error: {:?}", other),
            }
        }

        #[test]
        fn test_garbage_output_is_parse_error() {
            let temp = tempdir().unwrap();
            let script = write_script(temp.path(), "echo '<openbox_pipe_menu><menu'");

            let err = XdgMenu::new(script.to_string_lossy()).generate().unwrap_err();
            assert!(matches!(
                err.downcast_ref::<PappyError>(),
                Some(PappyError::Parse { .. })
            ));
        }
    }
}
