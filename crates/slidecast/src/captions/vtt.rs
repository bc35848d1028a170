use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

use super::Cue;

/// Timing line of a cue block: `HH:MM:SS.mmm --> HH:MM:SS.mmm`, hours
/// optional, `,` accepted as the millisecond separator. Cue settings after
/// the second timestamp are ignored.
static TIMING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(\d+):)?(\d{1,2}):(\d{2})[.,](\d{3})\s*-->\s*(?:(\d+):)?(\d{1,2}):(\d{2})[.,](\d{3})",
    )
    .expect("timing line pattern")
});

/// Parse a caption track document into cues.
///
/// Forgiving by design: the `WEBVTT` header block, `NOTE`/`STYLE` blocks,
/// and any block without a valid timing line are skipped, and an input with
/// no parseable cues yields an empty list. Numeric cue identifiers before
/// the timing line are allowed; text runs until the end of the block.
pub fn parse(input: &str) -> Vec<Cue> {
    let input = input.replace("\r\n", "\n");
    input.split("\n\n").filter_map(parse_block).collect()
}

fn parse_block(block: &str) -> Option<Cue> {
    let mut lines = block.lines();
    let caps = lines.by_ref().find_map(|line| TIMING.captures(line.trim()))?;

    let start = timestamp(&caps, 1)?;
    let end = timestamp(&caps, 5)?;
    let text = lines
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    Some(Cue { start, end, text })
}

/// Read one timestamp from four consecutive capture groups starting at
/// `base` (hours group may be absent).
fn timestamp(caps: &regex::Captures<'_>, base: usize) -> Option<Duration> {
    let field = |i: usize| caps.get(base + i).and_then(|m| m.as_str().parse::<u64>().ok());
    let hours = field(0).unwrap_or(0);
    let minutes = field(1)?;
    let seconds = field(2)?;
    let millis = field(3)?;
    Some(Duration::from_millis(
        ((hours * 60 + minutes) * 60 + seconds) * 1000 + millis,
    ))
}
