use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::config::Config;
use crate::fetch;

/// Run the fetch command: ask the generation service for a deck and write
/// the markdown and caption files next to each other.
pub fn run(
    identifier: &str,
    output_dir: &Path,
    voice: Option<&str>,
    url: Option<&str>,
    quiet: bool,
) -> Result<()> {
    let config = Config::load_or_default();
    let service = config.service.as_ref();

    let url = url
        .map(str::to_string)
        .or_else(|| service.and_then(|s| s.url.clone()))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No service URL configured.\n\
                 \n\
                 Add to ~/.config/slidecast/config.yaml:\n\
                 \n\
                 service:\n\
                 \x20 url: \"http://localhost:8787/generate\"\n\
                 \n\
                 or pass --url."
            )
        })?;
    let voice = voice
        .map(str::to_string)
        .or_else(|| service.and_then(|s| s.voice.clone()));

    if !quiet {
        println!("Fetching {} from {url}...", identifier.bold());
    }

    let payload = fetch::fetch_deck(&url, identifier, voice.as_deref())?;

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let deck_path = output_dir.join(format!("{identifier}.md"));
    let captions_path = output_dir.join(format!("{identifier}.vtt"));
    std::fs::write(&deck_path, &payload.slides)
        .with_context(|| format!("Failed to write {}", deck_path.display()))?;
    std::fs::write(&captions_path, &payload.captions)
        .with_context(|| format!("Failed to write {}", captions_path.display()))?;

    if !quiet {
        println!(
            "{}",
            format!(
                "Saved {} and {}",
                deck_path.display(),
                captions_path.display()
            )
            .green()
        );
        println!("Play it with: slidecast {}", deck_path.display());
    }
    Ok(())
}
