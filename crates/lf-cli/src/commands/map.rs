//! The demo world's locations and exits as a table.

use comfy_table::{ContentArrangement, Table};
use lf_engine::demo;
use miette::{IntoDiagnostic, Result};

pub fn run() -> Result<()> {
    let world = demo::world::build().into_diagnostic()?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Location", "Key", "Exits", "Notes"]);

    for location in world.locations() {
        let mut exits = Vec::new();
        for (dir, exit) in &location.exits {
            let target = world.location(exit.target).into_diagnostic()?;
            let mut entry = format!("{dir} -> {}", target.name);
            if exit.guard.is_some() {
                entry.push_str(" (guarded)");
            }
            if let Some(limit) = exit.weight_limit {
                entry.push_str(&format!(" (max weight {limit})"));
            }
            exits.push(entry);
        }

        let mut notes = Vec::new();
        if location.dark {
            notes.push("dark".to_string());
        }
        if let Some(sub) = location.sublocation {
            notes.push(format!("contains {}", world.location(sub).into_diagnostic()?.name));
        }
        let exits = if exits.is_empty() {
            "-".to_string()
        } else {
            exits.join("\n")
        };

        table.add_row(vec![
            location.name.clone(),
            location.key.clone(),
            exits,
            notes.join(", "),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} locations, {} items", world.locations().count(), world.item_count());
    Ok(())
}
