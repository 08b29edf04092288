//! Frame-by-frame trace of a walk across the lobby.

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use lobby_core::{ActionKind, Scheduler};
use lobby_game::{GameConfig, GameSession};
use lobby_motion::SpeedPolicy;

/// Upper bound on simulated frames, in case a target is never reached.
const MAX_FRAMES: usize = 10_000;

/// Travel time cap used by `--policy bounded`.
const BOUNDED_TRAVEL_SECS: f64 = 2.0;

pub fn run(
    mut config: GameConfig,
    to: Option<&str>,
    action: Option<&str>,
    from: Option<&str>,
    policy: &str,
    every: usize,
) -> Result<(), String> {
    if let Some(from) = from {
        config.motion.start = super::parse_point(from)?;
    }
    config.motion.speed = match policy {
        "fixed" => match config.motion.speed {
            fixed @ SpeedPolicy::Fixed { .. } => fixed,
            SpeedPolicy::Bounded { .. } => SpeedPolicy::default(),
        },
        "bounded" => SpeedPolicy::Bounded {
            base: config.motion.speed.base(),
            max_travel_secs: BOUNDED_TRAVEL_SECS,
        },
        other => return Err(format!("unknown speed policy '{other}' (use fixed or bounded)")),
    };

    let mut game = super::new_session(config)?;
    let start = game.movement().position();

    match (to, action) {
        (Some(_), Some(_)) => return Err("use either --to or --action, not both".into()),
        (None, None) => return Err("nowhere to go: pass --to x,y or --action <name>".into()),
        (Some(to), None) => {
            game.click_scene(super::parse_point(to)?);
        }
        (None, Some(name)) => {
            let kind =
                ActionKind::parse(name).ok_or_else(|| format!("unknown action '{name}'"))?;
            if kind == ActionKind::Talk {
                return Err("'talk' opens the conversation; there is nothing to walk to".into());
            }
            game.trigger_action(kind).map_err(|e| e.to_string())?;
        }
    }

    let target = game.movement().state().target_position;
    println!(
        "  {} from {start} to {}",
        "Walk".bold(),
        target.map_or_else(|| "(nowhere)".to_string(), |t| t.to_string())
    );

    let table = trace(&mut game, every.max(1));
    println!("{table}");

    let elapsed = game.scheduler().now();
    println!(
        "  Stopped at {} after {} ms",
        game.movement().position(),
        elapsed.as_millis()
    );
    if let Some(kind) = game.ui().modal {
        println!("  {} {kind}", "Opened:".green().bold());
    }
    Ok(())
}

fn trace(game: &mut GameSession, every: usize) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Frame", "t (ms)", "x", "y", "Facing", "Anim", "Scale", "z"]);

    let mut frame = 0;
    while frame < MAX_FRAMES && game.step() {
        frame += 1;
        let last = !game.movement().is_running();
        if frame % every != 0 && !last {
            continue;
        }
        let state = game.movement().state();
        let depth = game.movement().depth();
        table.add_row(vec![
            frame.to_string(),
            game.scheduler().now().as_millis().to_string(),
            format!("{:.1}", state.current_position.x),
            format!("{:.1}", state.current_position.y),
            format!("{:?}", state.facing),
            format!("{:?}", state.anim),
            format!("{:.3}", depth.scale),
            depth.z_index.to_string(),
        ]);
    }
    table
}
