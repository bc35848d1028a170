use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    match Config::load() {
        Ok(config) => {
            println!("{}", format!("# {}", Config::path()?.display()).bold());
            print!("{}", serde_yaml::to_string(&config)?);
        }
        Err(err) => {
            println!("{}", err.to_string().yellow());
            println!();
            println!("Settable keys:");
            println!("  defaults.theme       light | dark");
            println!("  defaults.cadence_ms  autoplay interval in milliseconds");
            println!("  defaults.autoplay    true | false");
            println!("  defaults.windowed    true | false");
            println!("  service.url          generation service endpoint");
            println!("  service.voice        narration voice identifier");
        }
    }
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!("{} {key} = {value}", "Updated".green().bold());
    println!("  {}", path.display());
    Ok(())
}
