mod chart;
mod config;
mod models;
mod run;
mod session;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::load()?;
    if let Err(e) = config::init_logging(&config) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    match args.len() {
        1 => run::as_tui(),
        2.. => run::as_cli(&args),
        _ => {
            eprintln!("Usage: allocatui [command]");
            Ok(())
        }
    }
}
