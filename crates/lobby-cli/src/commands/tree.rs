use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use lobby_dialog::{OptionTarget, portfolio_tree};

pub fn run(json: bool) -> Result<(), String> {
    let graph = portfolio_tree();

    if json {
        println!("{}", graph.to_json_pretty().map_err(|e| e.to_string())?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Node", "Replies", "Leads to"]);

    for (id, node) in graph.iter() {
        let replies: Vec<&str> = node.options.iter().map(|o| o.id.as_str()).collect();
        let targets: Vec<&str> = node
            .options
            .iter()
            .map(|o| match &o.next_node {
                OptionTarget::Goto(next) => next.as_str(),
                OptionTarget::Close => "(close)",
            })
            .collect();
        table.add_row(vec![id.to_string(), replies.join(", "), targets.join(", ")]);
    }

    println!("  {}", "Dialog Tree".bold().underline());
    println!("{table}");
    println!(
        "  {} nodes, {} replies",
        graph.len(),
        graph.option_count()
    );
    Ok(())
}
