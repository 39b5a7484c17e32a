//! # Statistics subcommand
//!
//! `cnr stats` prints the backend's risk-level distribution for the
//! current selections, then the locally derived gender split of the
//! fetched page. When the backend sends no distribution the clusters are
//! derived locally instead, so the command always has something to show.

use anyhow::Result;
use clap::Args;

use cnr_core::RiskLevelStat;

use crate::build_controller;
use crate::pensions::SelectionArgs;

/// Arguments for `cnr stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Execute `cnr stats`.
pub async fn run_stats(args: &StatsArgs) -> Result<u8> {
    let filter = args.selection.to_filter()?;

    let mut controller = build_controller()?;
    controller.set_filter(filter).await?;

    let view = controller.derived();
    let server = controller.server_stats();
    if server.is_empty() {
        println!("Risque (derived from current page):");
        print_clusters(&view.clusters);
    } else {
        println!("Risque:");
        print_clusters(server);
    }

    println!();
    println!("Répartition par sexe (current page):");
    for (label, count) in view.gender.labeled() {
        println!("  {label:<6} {count:>8}");
    }
    Ok(0)
}

fn print_clusters(clusters: &[RiskLevelStat]) {
    if clusters.is_empty() {
        println!("  (no records)");
        return;
    }
    for stat in clusters {
        println!(
            "  {:<13} {:>8}  {:>5.1}%",
            stat.level.to_string(),
            stat.count,
            stat.percentage
        );
    }
}
