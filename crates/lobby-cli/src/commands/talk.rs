use std::io;

use colored::Colorize;

use lobby_game::GameConfig;

pub fn run(
    mut config: GameConfig,
    node: &str,
    instant: bool,
    cps: Option<f64>,
) -> Result<(), String> {
    if let Some(cps) = cps {
        config.typewriter = config.typewriter.with_chars_per_second(cps);
    }
    let mut game = super::new_session(config)?;
    game.open_dialog(node).map_err(|e| e.to_string())?;

    println!(
        "  {} {}",
        "Conversation".bold(),
        "(pick a reply by number or id, 'q' to leave)".dimmed()
    );

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    super::converse(&mut game, &mut reader, instant)
}
