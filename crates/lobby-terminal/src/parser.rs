//! Input line parsing and command suggestions.

use strsim::jaro_winkler;

use crate::commands::visible_commands;

/// Minimum similarity for a "did you mean" suggestion.
const FUZZY_THRESHOLD: f64 = 0.8;

/// A submitted line split into command and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// The command word, lowercased.
    pub command: String,
    /// Remaining words, as typed.
    pub args: Vec<String>,
}

impl ParsedLine {
    /// First argument, if any.
    pub fn first_arg(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

/// Split a line on whitespace. Blank lines yield `None`.
pub fn parse_line(input: &str) -> Option<ParsedLine> {
    let mut words = input.split_whitespace();
    let command = words.next()?.to_lowercase();
    Some(ParsedLine {
        command,
        args: words.map(str::to_string).collect(),
    })
}

/// The visible command closest to a mistyped one, if any is close enough.
pub fn suggest_command(input: &str) -> Option<&'static str> {
    let input = input.to_lowercase();
    visible_commands()
        .map(|cmd| (cmd.name, jaro_winkler(&input, cmd.name)))
        .filter(|(_, score)| *score >= FUZZY_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_parse_to_nothing() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   \t "), None);
    }

    #[test]
    fn command_is_lowercased_args_are_not() {
        let line = parse_line("  CD  Skills/ extra").unwrap();
        assert_eq!(line.command, "cd");
        assert_eq!(line.args, vec!["Skills/", "extra"]);
        assert_eq!(line.first_arg(), Some("Skills/"));
    }

    #[test]
    fn suggests_close_commands() {
        assert_eq!(suggest_command("hlep"), Some("help"));
        assert_eq!(suggest_command("skils"), Some("skills"));
        assert_eq!(suggest_command("CONTCT"), Some("contact"));
    }

    #[test]
    fn no_suggestion_for_gibberish() {
        assert_eq!(suggest_command("xyzzy"), None);
    }

    #[test]
    fn hidden_commands_are_never_suggested() {
        assert_ne!(suggest_command("matrx"), Some("matrix"));
        assert_ne!(suggest_command("sudoo"), Some("sudo"));
    }
}
