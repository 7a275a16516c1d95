use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

mod cohorts;
mod conflicts;
mod events;
mod models;
mod report;
mod stats;

use models::{Gender, Metric, MetricReading, MetricValue, RankResult};

#[derive(Parser)]
#[command(name = "daymark-analytics")]
#[command(about = "Percentile rankings and schedule conflict detection for Daymark", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank a metric value against its synthetic cohort
    Rank {
        #[arg(long)]
        metric: Metric,
        #[arg(long)]
        value: f64,
        #[arg(long)]
        age: u32,
        #[arg(long)]
        gender: Gender,
        #[arg(long)]
        json: bool,
    },
    /// Sample a cohort's distribution curve as JSON plot data
    Curve {
        #[arg(long)]
        metric: Metric,
        #[arg(long)]
        age: u32,
        #[arg(long)]
        gender: Gender,
        #[arg(long, default_value_t = 60)]
        points: usize,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Detect time and travel conflicts in an events CSV
    Conflicts {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown report covering rankings and conflicts
    Report {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        age: u32,
        #[arg(long)]
        gender: Gender,
        #[arg(long)]
        profile: Option<PathBuf>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Write demo event and profile fixtures
    Seed {
        #[arg(long, default_value = "events.csv")]
        events: PathBuf,
        #[arg(long, default_value = "profile.csv")]
        profile: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank {
            metric,
            value,
            age,
            gender,
            json,
        } => {
            let cohort = cohorts::lookup(metric, age, gender);
            let reading = MetricReading {
                value: MetricValue::from_raw(value),
                higher_is_better: metric.higher_is_better(),
            };
            let result = stats::rank_or_unset(&reading, &cohort)
                .context("cohort parameters are malformed")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                match result {
                    RankResult::Ranked {
                        z_score,
                        percentile,
                        label,
                    } => println!(
                        "{} {} -> {:.1}th percentile, {} (z {:.2})",
                        metric.label(),
                        value,
                        percentile * 100.0,
                        label,
                        z_score
                    ),
                    RankResult::Unset => println!("{}: not set", metric.label()),
                }
            }
        }
        Commands::Curve {
            metric,
            age,
            gender,
            points,
            out,
        } => {
            let cohort = cohorts::lookup(metric, age, gender);
            let samples = stats::sample_curve(&cohort, points)
                .context("cohort parameters are malformed")?;
            let payload = serde_json::to_string_pretty(&samples)?;

            match out {
                Some(path) => {
                    std::fs::write(&path, payload)?;
                    println!("Wrote {} samples to {}.", samples.len(), path.display());
                }
                None => println!("{payload}"),
            }
        }
        Commands::Conflicts { csv, json } => {
            let events = events::load_events(&csv)?;
            let conflicts = conflicts::detect_conflicts(&events);
            let overall = conflicts::overall_severity(&conflicts);

            if json {
                let payload = serde_json::json!({
                    "overall_severity": overall,
                    "conflicts": conflicts,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else if conflicts.is_empty() {
                println!("No conflicts across {} events.", events.len());
            } else {
                println!(
                    "{} conflicts across {} events (overall severity: {}):",
                    conflicts.len(),
                    events.len(),
                    report::severity_banner(overall)
                );
                for conflict in &conflicts {
                    println!("- {}", conflict.description);
                }
            }
        }
        Commands::Report {
            csv,
            age,
            gender,
            profile,
            out,
        } => {
            let events = events::load_events(&csv)?;
            let profile = match profile {
                Some(path) => events::load_profile(&path)?,
                None => Vec::new(),
            };
            let conflicts = conflicts::detect_conflicts(&events);
            let report = report::build_report(age, gender, &profile, &events, &conflicts)
                .context("cohort parameters are malformed")?;
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
        Commands::Seed { events, profile } => {
            events::write_seed_events(&events)?;
            events::write_seed_profile(&profile)?;
            println!(
                "Fixtures written to {} and {}.",
                events.display(),
                profile.display()
            );
        }
    }

    Ok(())
}
