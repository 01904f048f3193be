//! Read-only checkpoint inspector (small, grounded in the teacher's
//! `analyze`/`convert` bins): loads the persisted cumulative-regret and
//! cumulative-strategy tables (spec §6.3) and prints summary statistics, or
//! the average strategy at one information-set key. Never writes.

use clap::Parser;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Parser)]
struct Args {
    /// directory holding cumulative_regrets.json / cumulative_strategies.json
    #[arg(long, default_value = ".")]
    data: PathBuf,

    /// print the average strategy at this exact information-set key (spec
    /// §4.7) instead of the summary
    #[arg(long)]
    key: Option<String>,
}

#[derive(Deserialize)]
struct Tables {
    regrets: HashMap<String, HashMap<String, f32>>,
    strategies: HashMap<String, HashMap<String, f32>>,
}

fn load(data: &PathBuf) -> anyhow::Result<Tables> {
    let regrets = std::fs::read_to_string(data.join("cumulative_regrets.json"))?;
    let strategies = std::fs::read_to_string(data.join("cumulative_strategies.json"))?;
    Ok(Tables {
        regrets: serde_json::from_str(&regrets)?,
        strategies: serde_json::from_str(&strategies)?,
    })
}

fn main() -> anyhow::Result<()> {
    handsolver::init();
    let args = Args::parse();
    let tables = load(&args.data)?;

    match args.key {
        Some(key) => {
            let Some(cumulative) = tables.strategies.get(&key) else {
                anyhow::bail!("no cumulative strategy recorded for key {key:?}");
            };
            let total: f32 = cumulative.values().sum();
            println!("information set: {key}");
            let mut actions: Vec<_> = cumulative.iter().collect();
            actions.sort_by(|a, b| a.0.cmp(b.0));
            for (action, sum) in actions {
                let prob = if total > 0.0 { sum / total } else { 0.0 };
                println!("  {action:<6} avg_strategy={prob:.4} (cumulative={sum:.2})");
            }
        }
        None => {
            let regret_entries: usize = tables.regrets.values().map(|m| m.len()).sum();
            let strategy_entries: usize = tables.strategies.values().map(|m| m.len()).sum();
            println!("information sets with regrets:    {}", tables.regrets.len());
            println!("information sets with strategies: {}", tables.strategies.len());
            println!("total (infoset, action) regret entries:    {regret_entries}");
            println!("total (infoset, action) strategy entries:  {strategy_entries}");
        }
    }
    Ok(())
}
