//! The command table and canned outputs.

use lobby_core::ActionKind;
use rand::Rng;

use crate::profile::Profile;

/// What a command does when run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    /// Print the command listing.
    ShowHelp,
    /// Open a content section.
    OpenSection(ActionKind),
    /// Start the conversation at a node.
    OpenDialog(&'static str),
    /// Hand the resume to the host.
    DownloadResume,
    /// Wipe the scrollback.
    Clear,
    /// Print the section listing.
    ListSections,
    /// `cd <section>`.
    Navigate,
    /// Print visitor info.
    Whoami,
    /// Close the terminal.
    Close,
    /// Print the sudo joke.
    SudoJoke,
    /// Print the matrix rain.
    Matrix,
}

/// One entry of the command table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    /// What the visitor types.
    pub name: &'static str,
    /// One-line description for `help`.
    pub description: &'static str,
    /// What running it does.
    pub action: CommandAction,
    /// Left out of `help` and suggestions.
    pub hidden: bool,
}

const fn visible(name: &'static str, description: &'static str, action: CommandAction) -> CommandSpec {
    CommandSpec {
        name,
        description,
        action,
        hidden: false,
    }
}

const fn hidden(name: &'static str, description: &'static str, action: CommandAction) -> CommandSpec {
    CommandSpec {
        name,
        description,
        action,
        hidden: true,
    }
}

/// Every command, in `help` order.
pub const COMMANDS: &[CommandSpec] = &[
    visible("help", "Show available commands", CommandAction::ShowHelp),
    visible("about", "About me", CommandAction::OpenSection(ActionKind::About)),
    visible(
        "experience",
        "Work experience",
        CommandAction::OpenSection(ActionKind::Experience),
    ),
    visible("projects", "View projects", CommandAction::OpenSection(ActionKind::Projects)),
    visible("skills", "Technical skills", CommandAction::OpenSection(ActionKind::Skills)),
    visible("contact", "Contact info", CommandAction::OpenSection(ActionKind::Contact)),
    visible("talk", "Chat with Daniele", CommandAction::OpenDialog("welcome")),
    hidden("chat", "Chat with Daniele", CommandAction::OpenDialog("welcome")),
    visible("resume", "Download resume", CommandAction::DownloadResume),
    visible("clear", "Clear terminal", CommandAction::Clear),
    visible("ls", "List sections", CommandAction::ListSections),
    visible("cd", "Navigate to section", CommandAction::Navigate),
    visible("whoami", "Show user info", CommandAction::Whoami),
    visible("exit", "Close terminal", CommandAction::Close),
    hidden("sudo", "Admin access", CommandAction::SudoJoke),
    hidden("matrix", "Enter the matrix", CommandAction::Matrix),
];

/// Find a command by exact (case-insensitive) name.
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    let name = name.to_lowercase();
    COMMANDS.iter().find(|c| c.name == name)
}

/// Commands shown by `help`.
pub fn visible_commands() -> impl Iterator<Item = &'static CommandSpec> {
    COMMANDS.iter().filter(|c| !c.hidden)
}

/// The `help` listing.
pub fn help_text() -> String {
    let mut lines = vec![String::new(), "Available commands:".to_string(), String::new()];
    for cmd in visible_commands() {
        lines.push(format!("  {:<12}- {}", cmd.name, cmd.description));
    }
    lines.push(String::new());
    lines.push("Tip: Use arrow keys to navigate command history".to_string());
    lines.push(String::new());
    lines.join("\n")
}

/// The `ls` listing.
pub fn sections_text() -> String {
    [
        "",
        "Available sections:",
        "  about/      - About me",
        "  experience/ - Work experience",
        "  projects/   - Project showcase",
        "  skills/     - Technical skills",
        "  contact/    - Contact information",
        "",
        "Use 'cd <section>' or type the section name directly.",
        "",
    ]
    .join("\n")
}

/// The `whoami` card.
pub fn whoami_text(profile: &Profile) -> String {
    format!(
        "\nvisitor@{}-portfolio\n{}\nRole: Curious Explorer\nPermissions: read, explore, interact\nSession: guest\nStatus: Welcome! Feel free to look around.\n",
        profile.handle(),
        "-".repeat(24),
    )
}

/// The `sudo` reply.
pub const SUDO_JOKE: &str = "\n[sudo] password for visitor: \n\
Sorry, user visitor is not in the sudoers file.\n\
This incident will be reported... just kidding! \u{1F604}\n\
\n\
Try 'help' to see what you can do.\n";

const MATRIX_GLYPHS: &[char] = &[
    '0', '1', 'ア', 'イ', 'ウ', 'エ', 'オ', 'カ', 'キ', 'ク', 'ケ', 'コ', 'サ', 'シ', 'ス', 'セ', 'ソ',
];

/// Rows of random glyphs.
pub const MATRIX_ROWS: usize = 8;

/// Glyphs per row.
pub const MATRIX_COLUMNS: usize = 40;

/// The `matrix` rain, drawn from `rng`.
pub fn matrix_text<R: Rng>(rng: &mut R) -> String {
    let mut lines: Vec<String> = (0..MATRIX_ROWS)
        .map(|_| {
            (0..MATRIX_COLUMNS)
                .map(|_| MATRIX_GLYPHS[rng.random_range(0..MATRIX_GLYPHS.len())])
                .collect()
        })
        .collect();
    lines.push(String::new());
    lines.push("Wake up, Neo...".to_string());
    lines.push("The Matrix has you...".to_string());
    lines.push(String::new());
    lines.join("\n")
}
