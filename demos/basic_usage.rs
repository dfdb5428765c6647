//! Basic usage example for SnapConfig
//!
//! Reads a few variables from the file given as the first argument
//! (`config.txt` by default). Run with `RUST_LOG=snapconfig=debug` to see
//! what the reader logs.

use snapconfig::Config;
use std::time::Duration;

fn main() {
    env_logger::init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "config.txt".to_string());
    let mut config = Config::open(&path);

    if !config.is_loaded() {
        if let Some(error) = config.last_error() {
            eprintln!("could not load '{}': {}", path, error);
        }
        std::process::exit(1);
    }

    config.set_default("language", "unknown");
    config.set_default("time_to_sleep", 1);

    println!("Config language: {}", config.get("language"));
    println!("This line is not stripped: {:?}", config.get("not_stripped"));
    println!("Multiline: {}", config.get("multiline"));

    let average = config.get_float("average_computation_time");
    if let Some(error) = config.last_error() {
        eprintln!("average_computation_time: {}", error);
    }
    println!("Average computation time (no context): {}", average);

    let sleep_seconds = config.get_int("time_to_sleep").max(0) as u64;
    println!("Now sleeping for {} seconds", sleep_seconds);
    std::thread::sleep(Duration::from_secs(sleep_seconds));
}
