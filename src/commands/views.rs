//! Lists the views a collection can be queried through.

use crate::config::{RankKind, ViewSpec};
use crate::views;
use anyhow::Result;
use colored::*;

pub fn list_views() -> Result<()> {
    let config = crate::config::load_config();
    let catalog = views::catalog(&config);

    println!("{}", "Available views".bold().blue());
    println!("{}", "===============".blue());
    for (name, spec) in &catalog {
        println!(
            "  {} {:<38} {}",
            format!("{name:<14}").bold(),
            describe_rank(spec),
            describe_search(spec)
        );
    }
    Ok(())
}

fn describe_rank(spec: &ViewSpec) -> String {
    match spec.rank {
        RankKind::Engagement => format!(
            "engagement (likes x{}, comments x{})",
            spec.likes_weight, spec.comments_weight
        ),
        RankKind::Recency => "recency".to_string(),
        RankKind::None => "unranked".to_string(),
    }
}

fn describe_search(spec: &ViewSpec) -> String {
    if spec.search_fields.is_empty() {
        "-".to_string()
    } else {
        format!("searches {}", spec.search_fields.join(", "))
    }
}
