//! CLI frontend for the Lobby portfolio game.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use lobby_game::GameConfig;

#[derive(Parser)]
#[command(
    name = "lobby",
    about = "Lobby: a retro point-and-click portfolio, driven from the terminal",
    version,
    propagate_version = true
)]
struct Cli {
    /// Game configuration file (JSON); defaults are used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log component activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Have the conversation, choosing replies by number or id
    Talk {
        /// Node to start at
        #[arg(short, long, default_value = "intro")]
        node: String,

        /// Print each line at once instead of typing it out
        #[arg(short, long)]
        instant: bool,

        /// Typing speed in characters per second
        #[arg(long)]
        cps: Option<f64>,
    },

    /// Open the portfolio terminal
    Terminal,

    /// Trace the character walking across the lobby
    Walk {
        /// Destination as `x,y` in scene coordinates
        #[arg(short, long)]
        to: Option<String>,

        /// Walk to the object bound to this action and open it
        #[arg(short, long)]
        action: Option<String>,

        /// Starting point as `x,y`
        #[arg(short, long)]
        from: Option<String>,

        /// Speed policy: fixed or bounded
        #[arg(short, long, default_value = "fixed")]
        policy: String,

        /// Print every n-th frame
        #[arg(short, long, default_value = "10")]
        every: usize,
    },

    /// Show a section the way the terminal screen renders it
    Screen {
        /// Section name (skills, experience, projects, about, contact, resume)
        section: String,

        /// 1-based page to show
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Show every page
        #[arg(short, long)]
        all: bool,
    },

    /// Validate the configuration and dialog content
    Check {
        /// Dialog tree file (JSON) to check instead of the built-in one
        #[arg(short, long)]
        dialog: Option<PathBuf>,
    },

    /// List the dialog tree
    Tree {
        /// Print the tree as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands, config: GameConfig) -> Result<(), String> {
    match command {
        Commands::Talk { node, instant, cps } => commands::talk::run(config, &node, instant, cps),
        Commands::Terminal => commands::terminal::run(config),
        Commands::Walk {
            to,
            action,
            from,
            policy,
            every,
        } => commands::walk::run(
            config,
            to.as_deref(),
            action.as_deref(),
            from.as_deref(),
            &policy,
            every,
        ),
        Commands::Screen { section, page, all } => commands::screen::run(&section, page, all),
        Commands::Check { dialog } => commands::check::run(&config, dialog.as_deref()),
        Commands::Tree { json } => commands::tree::run(json),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result =
        commands::load_config(cli.config.as_deref()).and_then(|config| run(cli.command, config));

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
