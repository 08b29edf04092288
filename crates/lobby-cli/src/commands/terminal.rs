//! Line-based front end for the portfolio terminal.

use std::io::{self, BufRead};

use colored::Colorize;

use lobby_game::{GameConfig, GameSession};
use lobby_terminal::TerminalEffect;

pub fn run(config: GameConfig) -> Result<(), String> {
    let mut game = super::new_session(config)?;
    game.open_terminal();
    println!("{}", game.terminal().banner().green());

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        if game.screen().is_some() {
            print!("{} ", "[n]ext [p]rev [q]uit:".dimmed());
            if !super::read_line(&mut reader, &mut line)? {
                break;
            }
            page_screen(&mut game, line.trim());
            continue;
        }

        print!("{} ", game.terminal().prompt().green().bold());
        if !super::read_line(&mut reader, &mut line)? {
            break;
        }

        let effects = game.submit_terminal(&line);
        if apply(&mut game, &effects, &mut reader)? {
            break;
        }
    }

    Ok(())
}

/// Print what the effects call for. Returns `true` when the terminal closed.
fn apply(
    game: &mut GameSession,
    effects: &[TerminalEffect],
    reader: &mut impl BufRead,
) -> Result<bool, String> {
    for effect in effects {
        match effect {
            TerminalEffect::Print(text) => println!("{text}"),
            TerminalEffect::Clear => print!("\x1b[2J\x1b[H"),
            TerminalEffect::OpenSection(_) => show_screen(game),
            TerminalEffect::DownloadResume(url) => {
                println!("{} {url}", "Resume:".bold());
            }
            TerminalEffect::OpenDialog(_) => {
                super::converse(game, reader, true)?;
                game.open_terminal();
            }
            TerminalEffect::Close => {
                println!("Goodbye!");
                return Ok(true);
            }
        }
    }
    Ok(false)
}

fn page_screen(game: &mut GameSession, input: &str) {
    match input {
        "n" | "" => {
            if game.screen_next() {
                show_screen(game);
            } else {
                println!("{}", "(last page)".dimmed());
            }
        }
        "p" => {
            if game.screen_prev() {
                show_screen(game);
            } else {
                println!("{}", "(first page)".dimmed());
            }
        }
        _ => game.close_screen(),
    }
}

fn show_screen(game: &GameSession) {
    if let Some(viewer) = game.screen() {
        println!("{}", viewer.render());
    }
}
