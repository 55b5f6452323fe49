//! Category relation matrix.
//! Loads the bundled rules and prints a markdown table of how every pair of
//! declared categories relates, followed by the conflict groups.
//!
//! Usage: cargo run -p grimoire-rules --example category_matrix > matrix.md

use grimoire_core::rule::Relation;
use grimoire_rules::defaults;

fn symbol(relation: Relation) -> &'static str {
    match relation {
        Relation::Conflicts => "✗",
        Relation::Weak => "~",
        Relation::Compatible => "✓",
        Relation::Neutral => "·",
    }
}

fn main() {
    let table = match defaults::default_rule_table() {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Failed to load rules: {}", e);
            std::process::exit(1);
        }
    };

    let categories: Vec<_> = table.entries().map(|(id, _)| id.clone()).collect();

    print!("| |");
    for c in &categories {
        print!(" {} |", c);
    }
    println!();
    print!("|---|");
    for _ in &categories {
        print!("---|");
    }
    println!();

    for a in &categories {
        print!("| **{}** |", a);
        for b in &categories {
            if a == b {
                print!(" |");
            } else {
                print!(" {} |", symbol(table.relation(a, b)));
            }
        }
        println!();
    }

    println!("\n## Conflict groups\n");
    for group in table.groups() {
        println!("- `{}` ({}): {}", group.name, group.reason, group.items.join(", "));
    }
}
