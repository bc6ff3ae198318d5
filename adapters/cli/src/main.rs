#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Cavern Skirmish battles from map files.

mod config;
mod logging;
mod report;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use skirmish_rendering::render_layout;
use skirmish_scenario::Scenario;
use skirmish_system_combat::{minimum_flawless_elf_power, CombatEngine};
use skirmish_world::query;
use tracing::info;

use crate::{config::RuleOverrides, report::Report};

/// Simulates a battle between elves and goblins on a cavern map.
#[derive(Debug, Parser)]
#[command(name = "skirmish", version)]
struct Args {
    /// Map file drawn with `#`, `.`, `E` and `G`.
    map: PathBuf,
    /// TOML file with combat rules.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Attack power of every elf.
    #[arg(long, value_name = "N")]
    elf_attack: Option<u32>,
    /// Attack power of every goblin.
    #[arg(long, value_name = "N")]
    goblin_attack: Option<u32>,
    /// Health every unit starts with.
    #[arg(long, value_name = "N")]
    initial_health: Option<u32>,
    /// Free the cell of a fallen unit at once instead of at the end of the round.
    #[arg(long)]
    clear_corpses: bool,
    /// Print the final cavern layout above the summary.
    #[arg(long)]
    show_final: bool,
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Search for the lowest elf attack power that wins without elf losses.
    #[arg(long)]
    search_elf_power: bool,
}

impl Args {
    fn overrides(&self) -> RuleOverrides {
        RuleOverrides {
            initial_health: self.initial_health,
            elf_attack: self.elf_attack,
            goblin_attack: self.goblin_attack,
            clear_corpses: self.clear_corpses,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Entry point for the Cavern Skirmish command-line interface.
fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();

    let report = run(&args)?;
    let rendered = match args.format {
        Format::Text => report.to_text(),
        Format::Json => report.to_json()?,
    };
    print!("{rendered}");
    Ok(())
}

fn run(args: &Args) -> Result<Report> {
    let text = fs::read_to_string(&args.map)
        .with_context(|| format!("failed to read map at {}", args.map.display()))?;
    let scenario = Scenario::parse(&text)
        .with_context(|| format!("failed to parse map at {}", args.map.display()))?;
    let rules = args.overrides().apply(config::load(args.config.as_deref())?);
    info!(?rules, map = %args.map.display(), "starting");

    if args.search_elf_power {
        let victory = minimum_flawless_elf_power(scenario.grid(), scenario.placements(), rules)
            .context("elf power search failed")?;
        return Ok(Report::search(rules, victory));
    }

    let mut engine = CombatEngine::new(
        scenario
            .build_world(rules)
            .context("map cannot host a battle")?,
    );
    let outcome = engine.run().context("combat did not finish")?;
    let final_layout = args.show_final.then(|| {
        let world = engine.world();
        render_layout(query::grid(world), &query::unit_view(world))
    });

    Ok(Report::combat(rules, outcome, final_layout))
}
