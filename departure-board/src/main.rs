use std::io::{self, BufRead, Write};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use departure_board::config::{BoardConfig, DEFAULT_LOG_FILTER};
use departure_board::shell::{self, Reply, ShellError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout is only the board
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    let config = BoardConfig::from_env()?;
    let mut registry = config.build_registry()?;
    info!(
        departures = registry.len(),
        clock = %registry.current_time(),
        seed = ?config.seed_path,
        "Departure board ready"
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("Departure board. Clock is {}.", registry.current_time());
    println!("Type `help` for commands.");

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // End of input
            break;
        }

        match shell::run_line(&mut registry, &line) {
            Ok(Reply::Text(text)) if text.is_empty() => {}
            Ok(Reply::Text(text)) => println!("{text}"),
            Ok(Reply::Quit) => break,
            Err(ShellError::Cli(e)) => {
                warn!(input = line.trim(), kind = ?e.kind(), "Command not understood");
                println!("{}", e.to_string().trim_end());
            }
            Err(e) => {
                warn!(input = line.trim(), error = %e, "Command rejected");
                println!("Error: {e}");
            }
        }
    }

    println!("Goodbye.");
    Ok(())
}
