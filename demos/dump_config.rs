//! Parse a config file and print it back, flattened paths first.
//!
//! ```text
//! RUST_LOG=debug cargo run --example dump_config -- server.conf
//! ```

use std::process::ExitCode;

use nestconf::{Config, flatten, parse_config};

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: dump_config <file>");
        return ExitCode::FAILURE;
    };

    let mut config = Config::new();
    if let Err(err) = parse_config(&path, &mut config) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    for (key, values) in flatten(config.root()) {
        println!("{key} = {values:?}");
    }
    println!();
    print!("{config}");
    ExitCode::SUCCESS
}
