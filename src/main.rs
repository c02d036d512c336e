//! pappymenu - a graphical application launcher
//!
//! pappymenu:
//! - Reads installed applications through xdg_menu
//! - Caches the categorized menu as JSON in the user cache dir
//! - Pops the menu up at the pointer and execs the selected program

use anyhow::Result;
use tracing_subscriber::EnvFilter;

mod backends;
mod cache;
mod cli;
mod core;
mod ui;

use crate::core::error::PappyError;

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    // Check for unsupported platforms
    #[cfg(windows)]
    {
        eprintln!("Error: Windows is not supported.");
        std::process::exit(1);
    }

    let cli = cli::parse();
    init_logging(cli.debug);

    match cli::run(cli) {
        Ok(()) => Ok(()),
        Err(err) => match err.downcast_ref::<PappyError>() {
            Some(missing @ PappyError::ToolNotFound { .. }) => {
                eprintln!("{}", missing);
                std::process::exit(1);
            }
            _ => Err(err),
        },
    }
}
