use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::time::Duration;

use crate::captions::{CueTrack, vtt};
use crate::deck::{DeckSource, SlideGraph};

/// Run the check command: parse the deck and captions, report what was
/// found, and fail on anything that would keep the player from starting.
pub fn run(file: &Path, captions: Option<&Path>, quiet: bool) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let source = DeckSource::parse(&content);
    let graph = SlideGraph::build(&source.bodies);

    if graph.is_empty() {
        anyhow::bail!("No slides found in {}", file.display());
    }

    if !quiet {
        println!("{} {}", "Deck:".bold(), file.display());
        if let Some(title) = &source.meta.title {
            println!("  title: {title}");
        }
        let keys: Vec<&str> = graph.nodes().map(|n| n.key.as_str()).collect();
        println!("  {} slide(s): {}", graph.len(), keys.join(", "));
    }

    match load_track(file, captions)? {
        Some(track) => {
            if !quiet {
                println!(
                    "  {} cue(s), {} of narration",
                    track.len(),
                    fmt_duration(track.length())
                );
            }
            if track.is_empty() && !quiet {
                println!("{}", "  caption track has no cues".yellow());
            }
            let overlapping = track
                .cues()
                .windows(2)
                .filter(|pair| pair[1].start < pair[0].end)
                .count();
            if overlapping > 0 && !quiet {
                println!(
                    "{}",
                    format!("  {overlapping} overlapping cue pair(s)").yellow()
                );
            }
        }
        None => {
            if !quiet {
                println!("{}", "  no caption track found".yellow());
            }
        }
    }

    if !quiet {
        println!("{}", "Deck OK.".green().bold());
    }
    Ok(())
}

/// An explicit captions path must be readable; the `.vtt` sidecar may be
/// absent.
fn load_track(file: &Path, captions: Option<&Path>) -> Result<Option<CueTrack>> {
    match captions {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read captions from {}", path.display()))?;
            Ok(Some(CueTrack::new(vtt::parse(&text))))
        }
        None => match std::fs::read_to_string(file.with_extension("vtt")) {
            Ok(text) => Ok(Some(CueTrack::new(vtt::parse(&text)))),
            Err(_) => Ok(None),
        },
    }
}

fn fmt_duration(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}m{:02}s", secs / 60, secs % 60)
}
