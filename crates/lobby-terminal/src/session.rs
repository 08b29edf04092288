use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use lobby_core::ActionKind;

use crate::commands::{self, CommandAction, lookup};
use crate::parser::{ParsedLine, parse_line, suggest_command};
use crate::profile::Profile;

/// Settings for a terminal session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Seed for the `matrix` rain.
    pub seed: u64,
    /// Most history entries kept; older ones are dropped.
    pub history_limit: usize,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            history_limit: 100,
        }
    }
}

impl TerminalConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the history limit.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }
}

/// Something the host must do in response to a submitted line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEffect {
    /// Append text to the scrollback.
    Print(String),
    /// Wipe the scrollback.
    Clear,
    /// Open a content section.
    OpenSection(ActionKind),
    /// Start the conversation at a node.
    OpenDialog(String),
    /// Offer the resume at this location.
    DownloadResume(String),
    /// Close the terminal.
    Close,
}

/// An interactive terminal: command dispatch plus line history.
#[derive(Debug)]
pub struct TerminalSession {
    profile: Profile,
    config: TerminalConfig,
    history: Vec<String>,
    cursor: Option<usize>,
    rng: StdRng,
}

impl TerminalSession {
    /// Create a session showing `profile`.
    pub fn new(profile: Profile, config: TerminalConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            profile,
            config,
            history: Vec::new(),
            cursor: None,
            rng,
        }
    }

    /// The profile being shown.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// The shell prompt.
    pub fn prompt(&self) -> String {
        format!("visitor@{}:~$", self.profile.handle())
    }

    /// Lines printed when the terminal opens.
    pub fn banner(&self) -> String {
        format!(
            "{} PORTFOLIO TERMINAL\nType 'help' for available commands.\n",
            self.profile.name.to_uppercase()
        )
    }

    /// Submitted lines, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Run one line.
    pub fn submit(&mut self, input: &str) -> Vec<TerminalEffect> {
        let Some(line) = parse_line(input) else {
            return Vec::new();
        };
        self.record(input.trim());

        let Some(spec) = lookup(&line.command) else {
            warn!(command = %line.command, "unknown terminal command");
            return self.not_found(&line.command);
        };
        debug!(command = spec.name, "terminal command");

        match spec.action {
            CommandAction::ShowHelp => vec![TerminalEffect::Print(commands::help_text())],
            CommandAction::OpenSection(kind) => vec![TerminalEffect::OpenSection(kind)],
            CommandAction::OpenDialog(node) => vec![TerminalEffect::OpenDialog(node.to_string())],
            CommandAction::DownloadResume => vec![
                TerminalEffect::Print(format!("Downloading {}...", self.profile.resume_url)),
                TerminalEffect::DownloadResume(self.profile.resume_url.clone()),
            ],
            CommandAction::Clear => vec![TerminalEffect::Clear],
            CommandAction::ListSections => vec![TerminalEffect::Print(commands::sections_text())],
            CommandAction::Navigate => self.navigate(&line),
            CommandAction::Whoami => {
                vec![TerminalEffect::Print(commands::whoami_text(&self.profile))]
            }
            CommandAction::Close => vec![TerminalEffect::Close],
            CommandAction::SudoJoke => vec![TerminalEffect::Print(commands::SUDO_JOKE.to_string())],
            CommandAction::Matrix => {
                vec![TerminalEffect::Print(commands::matrix_text(&mut self.rng))]
            }
        }
    }

    /// Step back through history. Stops at the oldest entry.
    pub fn history_up(&mut self) -> Option<&str> {
        if self.history.is_empty() {
            return None;
        }
        let index = match self.cursor {
            None => self.history.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.cursor = Some(index);
        self.history.get(index).map(String::as_str)
    }

    /// Step forward through history. Past the newest entry the line is blank (`None`).
    pub fn history_down(&mut self) -> Option<&str> {
        let next = self.cursor? + 1;
        if next < self.history.len() {
            self.cursor = Some(next);
            self.history.get(next).map(String::as_str)
        } else {
            self.cursor = None;
            None
        }
    }

    fn record(&mut self, line: &str) {
        self.cursor = None;
        self.history.push(line.to_string());
        if self.history.len() > self.config.history_limit {
            let excess = self.history.len() - self.config.history_limit;
            self.history.drain(..excess);
        }
    }

    fn navigate(&self, line: &ParsedLine) -> Vec<TerminalEffect> {
        let target = match line.first_arg() {
            None | Some("..") | Some("~") | Some("/") => return Vec::new(),
            Some(arg) => arg.trim_end_matches('/'),
        };
        match ActionKind::parse(target).filter(ActionKind::is_section) {
            Some(kind) => vec![TerminalEffect::OpenSection(kind)],
            None => vec![TerminalEffect::Print(format!(
                "cd: no such section: {target}"
            ))],
        }
    }

    fn not_found(&self, command: &str) -> Vec<TerminalEffect> {
        let mut out = vec![TerminalEffect::Print(format!("command not found: {command}"))];
        match suggest_command(command) {
            Some(hint) => out.push(TerminalEffect::Print(format!("Did you mean '{hint}'?"))),
            None => out.push(TerminalEffect::Print(
                "Type 'help' for available commands.".to_string(),
            )),
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> TerminalSession {
        TerminalSession::new(Profile::default(), TerminalConfig::default())
    }

    fn printed(effects: &[TerminalEffect]) -> String {
        effects
            .iter()
            .filter_map(|e| match e {
                TerminalEffect::Print(text) => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn blank_line_does_nothing() {
        let mut term = session();
        assert!(term.submit("   ").is_empty());
        assert!(term.history().is_empty());
    }

    #[test]
    fn section_commands_open_sections() {
        let mut term = session();
        assert_eq!(
            term.submit("skills"),
            vec![TerminalEffect::OpenSection(ActionKind::Skills)]
        );
        assert_eq!(
            term.submit("  ABOUT "),
            vec![TerminalEffect::OpenSection(ActionKind::About)]
        );
    }

    #[test]
    fn talk_and_chat_open_the_dialog() {
        let mut term = session();
        let expected = vec![TerminalEffect::OpenDialog("welcome".into())];
        assert_eq!(term.submit("talk"), expected);
        assert_eq!(term.submit("chat"), expected);
    }

    #[test]
    fn resume_downloads() {
        let mut term = session();
        let effects = term.submit("resume");
        assert!(effects.contains(&TerminalEffect::DownloadResume("/resume.pdf".into())));
    }

    #[test]
    fn cd_navigation() {
        let mut term = session();
        assert_eq!(
            term.submit("cd experience/"),
            vec![TerminalEffect::OpenSection(ActionKind::Experience)]
        );
        assert!(term.submit("cd ..").is_empty());
        assert!(term.submit("cd ~").is_empty());
        assert!(term.submit("cd").is_empty());
        assert_eq!(printed(&term.submit("cd games")), "cd: no such section: games");
        assert_eq!(printed(&term.submit("cd talk")), "cd: no such section: talk");
    }

    #[test]
    fn unknown_command_suggests() {
        let mut term = session();
        let out = printed(&term.submit("hlep"));
        assert!(out.starts_with("command not found: hlep"));
        assert!(out.contains("Did you mean 'help'?"));

        let out = printed(&term.submit("xyzzy"));
        assert!(out.contains("Type 'help'"));
    }

    #[test]
    fn simple_outputs() {
        let mut term = session();
        assert!(printed(&term.submit("help")).contains("Available commands:"));
        assert!(printed(&term.submit("ls")).contains("experience/"));
        assert!(printed(&term.submit("whoami")).contains("Role: Curious Explorer"));
        assert!(printed(&term.submit("sudo rm -rf /")).contains("not in the sudoers file"));
        assert!(printed(&term.submit("matrix")).contains("The Matrix has you..."));
        assert_eq!(term.submit("clear"), vec![TerminalEffect::Clear]);
        assert_eq!(term.submit("exit"), vec![TerminalEffect::Close]);
    }

    #[test]
    fn matrix_depends_on_seed() {
        let mut a = TerminalSession::new(Profile::default(), TerminalConfig::default().with_seed(1));
        let mut b = TerminalSession::new(Profile::default(), TerminalConfig::default().with_seed(1));
        assert_eq!(a.submit("matrix"), b.submit("matrix"));
    }

    #[test]
    fn history_navigation() {
        let mut term = session();
        assert_eq!(term.history_up(), None);
        term.submit("help");
        term.submit("ls");
        term.submit("whoami");

        assert_eq!(term.history_up(), Some("whoami"));
        assert_eq!(term.history_up(), Some("ls"));
        assert_eq!(term.history_up(), Some("help"));
        assert_eq!(term.history_up(), Some("help"));
        assert_eq!(term.history_down(), Some("ls"));
        assert_eq!(term.history_down(), Some("whoami"));
        assert_eq!(term.history_down(), None);
        assert_eq!(term.history_down(), None);

        // Submitting resets the cursor.
        term.history_up();
        term.submit("skills");
        assert_eq!(term.history_up(), Some("skills"));
    }

    #[test]
    fn history_is_bounded() {
        let mut term = TerminalSession::new(
            Profile::default(),
            TerminalConfig::default().with_history_limit(2),
        );
        term.submit("help");
        term.submit("ls");
        term.submit("whoami");
        assert_eq!(term.history(), ["ls".to_string(), "whoami".to_string()]);
    }

    #[test]
    fn unknown_commands_are_recorded_too() {
        let mut term = session();
        term.submit("nope");
        assert_eq!(term.history_up(), Some("nope"));
    }

    #[test]
    fn prompt_and_banner() {
        let term = session();
        assert_eq!(term.prompt(), "visitor@daniele-tortora:~$");
        assert!(term.banner().starts_with("DANIELE TORTORA"));
    }
}
