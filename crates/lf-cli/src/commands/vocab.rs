//! The fixed vocabulary as tables.

use comfy_table::{ContentArrangement, Table};
use lf_core::Direction;
use lf_engine::parser::lexicon;
use miette::Result;

/// Spellings that `Direction::parse` understands besides the full name.
const SPELLINGS: &[&str] = &[
    "n", "ne", "e", "se", "s", "sw", "w", "nw", "u", "d", "north-east", "north east", "south-east",
    "south east", "south-west", "south west", "north-west", "north west", "fore", "aft", "port",
    "starboard", "climb", "enter", "inside", "exit", "outside", "leave",
];

pub fn run() -> Result<()> {
    let mut verbs = Table::new();
    verbs.set_content_arrangement(ContentArrangement::Dynamic);
    verbs.set_header(vec!["Verb", "Synonyms"]);
    for (verb, synonyms) in lexicon::VERBS {
        let others: Vec<&str> = synonyms.iter().copied().filter(|s| s != verb).collect();
        verbs.add_row(vec![verb.to_string(), others.join(", ")]);
    }
    println!("{verbs}");
    println!();

    let mut directions = Table::new();
    directions.set_content_arrangement(ContentArrangement::Dynamic);
    directions.set_header(vec!["Direction", "Also"]);
    for dir in Direction::ALL {
        let also: Vec<&str> = SPELLINGS
            .iter()
            .copied()
            .filter(|s| Direction::parse(s) == Some(dir))
            .collect();
        directions.add_row(vec![dir.name().to_string(), also.join(", ")]);
    }
    println!("{directions}");
    println!();
    println!("  A leading {} is ignored before a direction.", lexicon::MOTION.join("/"));
    Ok(())
}
