//! # Delve Main Entry Point
//!
//! Thin demo over the generator library: runs the pipeline once and prints
//! chamber, door, and passage descriptions, or a JSON dump of the dungeon.

use clap::Parser;
use delve::{DelveResult, Generator, SeededRoller};
use log::info;

/// Command line arguments for the delve demo.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "A tabletop-style procedural dungeon generator")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of chambers to generate
    #[arg(short, long, default_value_t = delve::config::DEFAULT_CHAMBER_COUNT)]
    chambers: usize,

    /// Dump the generated dungeon as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> DelveResult<()> {
    env_logger::init();
    let args = Args::parse();

    info!("Starting delve v{}", delve::VERSION);

    let mut roller = match args.seed {
        Some(seed) => SeededRoller::new(seed),
        None => SeededRoller::from_entropy(),
    };

    let mut generator = Generator::new();
    generator.generate(args.chambers, &mut roller)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(generator.dungeon())?);
        return Ok(());
    }

    for (number, chamber) in generator.dungeon().chambers().iter().enumerate() {
        println!("===== Chamber {} =====", number + 1);
        print!("{}", chamber.description());
        for (slot, &door_id) in chamber.doors().iter().enumerate() {
            println!("--- Door {} ---", slot + 1);
            if let Some(door) = generator.dungeon().door(door_id) {
                print!("{}", door.description());
            }
        }
        println!();
    }

    for (number, passage) in generator.dungeon().passages().iter().enumerate() {
        println!("===== Passage {} =====", number + 1);
        print!("{}", passage.description());
        println!();
    }

    print!("{}", generator.linked_doors_report());
    Ok(())
}
