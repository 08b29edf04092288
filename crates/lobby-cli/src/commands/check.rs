use std::path::Path;

use colored::Colorize;

use lobby_dialog::{DialogGraph, EASTER_EGG_NODE, ENTRY_NODES, portfolio_tree};
use lobby_game::GameConfig;

pub fn run(config: &GameConfig, dialog: Option<&Path>) -> Result<(), String> {
    config.validate().map_err(|e| format!("invalid config: {e}"))?;

    let graph = match dialog {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read '{}': {e}", path.display()))?;
            serde_json::from_str::<DialogGraph>(&json)
                .map_err(|e| format!("cannot parse '{}': {e}", path.display()))?
        }
        None => portfolio_tree(),
    };

    // The easter egg is optional; the other entries are required.
    let entries: Vec<&str> = ENTRY_NODES
        .into_iter()
        .filter(|entry| *entry != EASTER_EGG_NODE || graph.contains(entry))
        .collect();
    let issues = graph.issues(&entries);
    for issue in &issues {
        if issue.is_error {
            eprintln!("  {}", issue.to_string().red());
        } else {
            eprintln!("  {}", issue.to_string().yellow());
        }
    }

    let errors = issues.iter().filter(|i| i.is_error).count();
    if errors > 0 {
        return Err(format!(
            "dialog check failed with {errors} error{}",
            if errors == 1 { "" } else { "s" }
        ));
    }

    println!("  All checks passed.");
    println!(
        "  {} objects, {} dialog nodes, {} replies",
        config.scene.objects.len(),
        graph.len(),
        graph.option_count()
    );
    Ok(())
}
