pub mod check;
pub mod screen;
pub mod talk;
pub mod terminal;
pub mod tree;
pub mod walk;

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::thread;

use colored::Colorize;

use lobby_core::{ManualScheduler, Position};
use lobby_dialog::ChoiceOutcome;
use lobby_game::{GameConfig, GameSession};

/// Load the config file, or fall back to defaults.
pub fn load_config(path: Option<&Path>) -> Result<GameConfig, String> {
    match path {
        Some(path) => GameConfig::load(path)
            .map_err(|e| format!("cannot load config '{}': {e}", path.display())),
        None => Ok(GameConfig::default()),
    }
}

fn new_session(config: GameConfig) -> Result<GameSession, String> {
    GameSession::new(config, ManualScheduler::new()).map_err(|e| e.to_string())
}

/// Parse `x,y` into a scene position.
fn parse_point(s: &str) -> Result<Position, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected 'x,y', got '{s}'"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|_| format!("'{}' is not a number", v.trim()))
    };
    Ok(Position::new(coord(x)?, coord(y)?))
}

fn read_line(reader: &mut impl BufRead, line: &mut String) -> Result<bool, String> {
    io::stdout().flush().map_err(|e| e.to_string())?;
    line.clear();
    let read = reader.read_line(line).map_err(|e| e.to_string())?;
    Ok(read > 0)
}

/// Print the current line, typed out in real time unless `instant`.
fn present(game: &mut GameSession, instant: bool) -> Result<(), String> {
    let Some(speaker) = game.dialog().current_node().map(|n| n.speaker.clone()) else {
        return Ok(());
    };
    println!();
    print!("  {} ", format!("{speaker}:").bold());

    if instant {
        game.skip_typewriter();
        println!("{}", game.typewriter().displayed());
        return Ok(());
    }

    let interval = game.typewriter().config().interval();
    let mut shown = 0;
    while game.typewriter().is_running() {
        thread::sleep(interval);
        game.step();
        let fresh: String = game.typewriter().displayed().chars().skip(shown).collect();
        shown += fresh.chars().count();
        print!("{fresh}");
        io::stdout().flush().map_err(|e| e.to_string())?;
    }
    println!();
    Ok(())
}

/// Run the open conversation until it closes or input ends.
fn converse(
    game: &mut GameSession,
    reader: &mut impl BufRead,
    instant: bool,
) -> Result<(), String> {
    let mut line = String::new();
    present(game, instant)?;
    while game.dialog().is_open() {
        let dialog = game.dialog();
        let node_id = dialog.current_node_id().unwrap_or_default();
        let options: Vec<(String, String, bool)> = dialog
            .current_node()
            .map(|node| {
                node.options
                    .iter()
                    .map(|o| {
                        let asked = dialog.memory().has_chosen(node_id, &o.id);
                        (o.id.clone(), o.label.clone(), asked)
                    })
                    .collect()
            })
            .unwrap_or_default();
        println!();
        for (i, (_, label, asked)) in options.iter().enumerate() {
            let number = format!("[{}]", i + 1).cyan();
            if *asked {
                println!("  {number} {}", format!("{label} (asked)").dimmed());
            } else {
                println!("  {number} {label}");
            }
        }

        print!("> ");
        if !read_line(reader, &mut line)? {
            game.close_dialog();
            break;
        }
        let input = line.trim();
        if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
            game.close_dialog();
            break;
        }

        let id = match input.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => options[n - 1].0.clone(),
            _ => input.to_string(),
        };
        match game.choose_option(&id).map_err(|e| e.to_string())? {
            ChoiceOutcome::Moved(_) => present(game, instant)?,
            ChoiceOutcome::Closed => {}
            ChoiceOutcome::Ignored => {
                println!("  {}", format!("no reply '{input}' here").yellow());
            }
        }
    }
    println!("  {}", "(conversation closed)".dimmed());
    Ok(())
}
