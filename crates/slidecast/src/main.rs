mod app;
mod autoplay;
mod captions;
mod cli;
mod commands;
mod config;
mod deck;
mod fetch;
mod nav;
mod playback;
mod session;
mod theme;
mod watch;

use clap::Parser;
use colored::Colorize;

fn main() {
    let cli = cli::Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(err) = cli.run() {
        eprintln!("{} {err:#}", "Error:".red().bold());
        std::process::exit(1);
    }
}
