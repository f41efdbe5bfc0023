//! Headless match runner
//!
//! Usage: selfplay <black> <white> [games] [--parallel] [--size N] [--export DIR]
//! where <black>/<white> are presets: random, greedy, minimax_d1 .. minimax_d10.

use othello_ai::selfplay::{run_selfplay, SelfPlayConfig, StrategySpec};
use simple_logger::SimpleLogger;
use std::env;
use std::path::PathBuf;

fn usage() -> ! {
    eprintln!(
        "Usage: selfplay <black> <white> [games] [--parallel] [--size N] [--export DIR]\n\
         presets: random, greedy, minimax_d1 .. minimax_d10"
    );
    std::process::exit(1);
}

fn parse_spec(name: &str) -> StrategySpec {
    StrategySpec::preset(name).unwrap_or_else(|| {
        eprintln!("Unknown strategy: {}", name);
        usage()
    })
}

fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .env()
        .init()?;

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 2 {
        usage();
    }

    let mut config = SelfPlayConfig {
        black: parse_spec(&args[0]),
        white: parse_spec(&args[1]),
        ..SelfPlayConfig::default()
    };

    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--parallel" => config.parallel = true,
            "--size" => {
                config.board_size = rest
                    .next()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or_else(|| usage())
            }
            "--export" => {
                config.export_dir = Some(PathBuf::from(rest.next().unwrap_or_else(|| usage())))
            }
            n => config.num_games = n.parse().unwrap_or_else(|_| usage()),
        }
    }

    println!(
        "{}: {}\n{}: {}",
        config.black.label(),
        config.black.description(),
        config.white.label(),
        config.white.description()
    );

    let stats = run_selfplay(config)?;
    println!("\n=== Results ===\n{}", stats.summary());
    if let Some(path) = &stats.export_file {
        println!("Results written to {}", path.display());
    }
    Ok(())
}
