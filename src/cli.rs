//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches, Parser};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::backends::launch;
use crate::backends::xdg_menu::{XdgMenu, DEFAULT_MENU_TOOL};
use crate::cache::store;
use crate::core::paths::{resolve_cache_path, CACHE_FILE};
use crate::ui::{self, PresenterKind};

/// pappymenu - a graphical application launcher.
#[derive(Parser, Debug)]
#[command(name = "pappymenu")]
#[command(
    about,
    disable_version_flag = true,
    override_usage = "pappymenu [-h | -v | -r] [OPTIONS]"
)]
pub struct Cli {
    /// Show the version.
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Regenerate the menu cache.
    #[arg(
        short = 'r',
        long = "regenerate",
        long_help = "Regenerate the menu cache by running xdg_menu again.\n\n\
This is done automatically when the cache does not exist yet."
    )]
    pub regenerate: bool,

    /// Use this cache file instead of the default location.
    #[arg(
        long,
        env = "PAPPYMENU_CACHE",
        value_name = "PATH",
        long_help = "Read and write the menu cache at PATH instead of\n\
$XDG_CACHE_HOME/pappymenu/menu-cache."
    )]
    pub cache_file: Option<PathBuf>,

    /// Menu generator to run.
    #[arg(
        long,
        env = "PAPPYMENU_MENU_TOOL",
        default_value = DEFAULT_MENU_TOOL,
        value_name = "CMD",
        long_help = "Menu generator to run on a cache miss or with -r. It is called as\n\
`CMD --format openbox3-pipe` and must print an openbox pipe menu."
    )]
    pub menu_tool: String,

    /// How to show the menu (gtk/term).
    #[arg(
        long,
        value_enum,
        default_value_t = PresenterKind::default(),
        value_name = "KIND",
        long_help = "How to show the menu.\n\n\
- gtk: popup menu at the mouse pointer (default when built with GTK)\n\
- term: numbered prompts on the terminal"
    )]
    pub presenter: PresenterKind,

    /// Icon size in pixels for the GTK menu.
    #[arg(
        long,
        default_value_t = 16,
        value_parser = clap::value_parser!(i32).range(8..=256),
        value_name = "PX"
    )]
    pub icon_size: i32,

    /// Print the chosen command instead of executing it.
    #[arg(
        long,
        long_help = "Print the selected command as a JSON argv array on stdout instead of\n\
replacing the process with it."
    )]
    pub dry_run: bool,

    /// Print the menu and exit.
    #[arg(short, long)]
    pub list: bool,

    /// With --list, print JSON instead of text.
    #[arg(long, requires = "list")]
    pub json: bool,

    /// Disable colored output (when applicable).
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging on stderr.
    #[arg(
        long,
        long_help = "Enable debug logging on stderr. RUST_LOG takes precedence when set."
    )]
    pub debug: bool,
}

/// Description shown by -h and --help
pub fn help_text(cache_path: &Path) -> String {
    format!(
        r#"pappymenu is an application launcher that (compared to dmenu &c) provides a
graphical list of installed applications. pappymenu uses xdg_menu under the hood
to generate the menu entries. Calling pappymenu without arguments will provide
the menu at the mouse pointer location. Select a program to start it, press
<Esc> to cancel.

The menu is cached at {}. This is done automatically when the cache
doesn't yet exist; use -r after installing or removing applications."#,
        cache_path.display()
    )
}

/// Cache path shown in the help, honoring PAPPYMENU_CACHE like the parser does
fn help_cache_path() -> PathBuf {
    let override_path = std::env::var_os("PAPPYMENU_CACHE").map(PathBuf::from);
    resolve_cache_path(override_path.as_deref())
        .unwrap_or_else(|_| PathBuf::from("$XDG_CACHE_HOME/pappymenu").join(CACHE_FILE))
}

/// Parse the process arguments; -h prints the help with the resolved cache path
pub fn parse() -> Cli {
    let matches = Cli::command()
        .about(help_text(&help_cache_path()))
        .get_matches();
    Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit())
}

/// Version banner for -v
pub fn version_text() -> String {
    format!(
        "{} version {}.\n(c) by {}.\n{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS"),
        env!("CARGO_PKG_REPOSITORY")
    )
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.version {
        println!("{}", version_text());
        return Ok(());
    }

    if cli.no_color {
        colored::control::set_override(false);
    }

    let cache_path = resolve_cache_path(cli.cache_file.as_deref())?;
    let source = XdgMenu::new(cli.menu_tool);
    debug!(cache = %cache_path.display(), tool = source.tool(), "configuration");

    if cli.regenerate {
        println!("Regenerating menu cache...");
        store::regenerate(&cache_path, &source)?;
        println!("Cache saved.");
        return Ok(());
    }

    let cache = store::load_or_regenerate(&cache_path, &source)?;
    let tree = ui::build(&cache);

    if cli.list {
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&tree)?);
        } else {
            print!("{}", ui::render_text(&tree));
        }
        return Ok(());
    }

    let mut presenter = ui::presenter(cli.presenter, cli.icon_size)?;
    let Some(command) = presenter.present(&tree)? else {
        info!("menu cancelled");
        return Ok(());
    };
    info!(command = %command, "menu selection");

    if cli.dry_run {
        let invocation = launch::prepare(&command)?;
        println!("{}", serde_json::to_string(&invocation.argv())?);
        return Ok(());
    }

    launch::run(&command)
}
