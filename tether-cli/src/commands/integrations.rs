//! Catalog listing command

use colored::Colorize;

use crate::catalog;

/// Print the installable integrations.
pub fn run() {
    println!();
    println!("  Integrations available to install");
    println!();
    for (name, entry) in catalog::all() {
        let providers: Vec<String> = entry.providers.iter().map(|p| p.to_string()).collect();
        println!(
            "  {} {} [{}]",
            format!("{name:<16}").cyan().bold(),
            entry.description,
            providers.join(", ").dimmed()
        );
    }
    println!();
}
