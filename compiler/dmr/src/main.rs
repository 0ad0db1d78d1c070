//! DM runtime CLI
//!
//! Loads compiled object trees and instantiates objects from them.

mod commands;
mod config;

use commands::{new_object, print_tree};
use config::DmrConfig;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the log subscriber. Only active when `RUST_LOG` is set, e.g.
/// `RUST_LOG=dm_runtime=debug`.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_indent_lines(true),
                )
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "tree" => {
            let config = parse_config(&args[2..], "dmr tree <compiled.json> [--resources <dir>]");
            print_tree(&config);
        }
        "new" => {
            let config = parse_config(
                &args[2..],
                "dmr new <compiled.json> <path> [--resources <dir>]",
            );
            new_object(&config);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("dmr {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn parse_config(args: &[String], usage: &str) -> DmrConfig {
    match DmrConfig::parse(args) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("Usage: {usage}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("DM runtime object tree inspector");
    println!();
    println!("Usage: dmr <command> [options]");
    println!();
    println!("Commands:");
    println!("  tree <compiled.json>          List every type with its declared parent and procs");
    println!("  new <compiled.json> <path>    Instantiate a type and show its variables");
    println!("  help                          Show this help message");
    println!("  version                       Show version information");
    println!();
    println!("Options:");
    println!("  --resources <dir>   Resource root (default: the compiled file's directory)");
    println!();
    println!("Logging:");
    println!("  RUST_LOG=dm_runtime=debug     Show load and hook attachment");
    println!("  RUST_LOG=dm_runtime=trace     Also show every loaded entry");
    println!();
    println!("Examples:");
    println!("  dmr tree build/world.json");
    println!("  dmr new build/world.json /mob/player --resources assets");
}
