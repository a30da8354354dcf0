use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use perkmandelc::game::{Difficulty, GameConfig};
use perkmandelc::modes::HumanMode;
use perkmandelc::persist::SaveStore;

#[derive(Parser)]
#[command(name = "perkmandelc")]
#[command(version, about = "Grid-based train arcade game")]
struct Cli {
    /// Add the rival AI train
    #[arg(long)]
    multiplayer: bool,

    /// Fog-of-war difficulty
    #[arg(long, value_enum, default_value = "medium")]
    difficulty: Difficulty,

    /// Cells per side of the world grid
    #[arg(long, default_value = "40", value_parser = clap::value_parser!(i32).range(20..=200))]
    cells: i32,

    /// Save file for high score and tutorial progress
    #[arg(long)]
    save_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = GameConfig {
        difficulty: cli.difficulty,
        ..GameConfig::new(cli.cells)
    };

    let store = SaveStore::new(cli.save_file.unwrap_or_else(SaveStore::default_path));

    let mut mode = HumanMode::new(config, cli.multiplayer, store);
    mode.run().await?;

    Ok(())
}
