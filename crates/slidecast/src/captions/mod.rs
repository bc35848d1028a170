use std::time::Duration;

pub mod vtt;

/// A single timed caption: the interval `[start, end)` and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    pub start: Duration,
    pub end: Duration,
    pub text: String,
}

impl Cue {
    pub fn duration(&self) -> Duration {
        self.end.saturating_sub(self.start)
    }
}

/// An immutable caption track, ordered by ascending start time.
///
/// Replaced wholesale when a new track loads; never edited in place.
#[derive(Debug, Clone, Default)]
pub struct CueTrack {
    cues: Vec<Cue>,
}

impl CueTrack {
    /// Build a track from cues, normalizing to ascending start order.
    pub fn new(mut cues: Vec<Cue>) -> Self {
        cues.sort_by_key(|c| c.start);
        Self { cues }
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// End of the last cue; the effective track length.
    pub fn length(&self) -> Duration {
        self.cues.last().map(|c| c.end).unwrap_or(Duration::ZERO)
    }

    /// Index of the cue whose interval contains `t`, or `None` when `t`
    /// falls in a gap, before the first cue, or past the last.
    ///
    /// Intervals are half-open on the right: `t` equal to a cue's end
    /// selects the next cue, not that one. A zero-duration cue matches
    /// exactly at its instant, so the later cue wins a shared boundary.
    pub fn index_at(&self, t: Duration) -> Option<usize> {
        let after = self.cues.partition_point(|c| c.start <= t);
        let i = after.checked_sub(1)?;
        let cue = &self.cues[i];
        if t < cue.end || (cue.start == cue.end && t == cue.start) {
            Some(i)
        } else {
            None
        }
    }

    /// The cue containing `t`, if any.
    pub fn cue_at(&self, t: Duration) -> Option<&Cue> {
        self.index_at(t).map(|i| &self.cues[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cue(start_ms: u64, end_ms: u64, text: &str) -> Cue {
        Cue {
            start: Duration::from_millis(start_ms),
            end: Duration::from_millis(end_ms),
            text: text.to_string(),
        }
    }

    /// Three cues with a zero-length one at t=2s and a gap from 2s to 3s.
    fn track() -> CueTrack {
        CueTrack::new(vec![
            cue(0, 2000, "a"),
            cue(2000, 2000, "b"),
            cue(3000, 5000, "c"),
        ])
    }

    fn text_at(track: &CueTrack, ms: u64) -> Option<&str> {
        track
            .cue_at(Duration::from_millis(ms))
            .map(|c| c.text.as_str())
    }

    #[test]
    fn test_hit_at_interval_start() {
        assert_eq!(text_at(&track(), 0), Some("a"));
    }

    #[test]
    fn test_hit_inside_interval() {
        assert_eq!(text_at(&track(), 1900), Some("a"));
    }

    #[test]
    fn test_zero_length_cue_matches_at_its_instant() {
        // t=2000 is both a's end and b's start; the later cue wins.
        assert_eq!(text_at(&track(), 2000), Some("b"));
    }

    #[test]
    fn test_gap_returns_none() {
        // b ends at 2000 (zero length), c starts at 3000.
        assert_eq!(text_at(&track(), 2500), None);
    }

    #[test]
    fn test_hit_after_gap() {
        assert_eq!(text_at(&track(), 3000), Some("c"));
    }

    #[test]
    fn test_past_last_cue_returns_none() {
        assert_eq!(text_at(&track(), 6000), None);
    }

    #[test]
    fn test_end_boundary_selects_next_cue() {
        // Adjacent cues share t=1000; it belongs to the second.
        let track = CueTrack::new(vec![cue(0, 1000, "x"), cue(1000, 2000, "y")]);
        assert_eq!(text_at(&track, 1000), Some("y"));
    }

    #[test]
    fn test_before_first_cue_returns_none() {
        let track = CueTrack::new(vec![cue(1000, 2000, "x")]);
        assert_eq!(text_at(&track, 0), None);
    }

    #[test]
    fn test_empty_track_returns_none() {
        let track = CueTrack::default();
        assert_eq!(track.index_at(Duration::from_secs(1)), None);
        assert!(track.is_empty());
    }

    #[test]
    fn test_duration_is_end_minus_start() {
        assert_eq!(cue(3000, 5000, "c").duration(), Duration::from_secs(2));
        assert_eq!(cue(2000, 2000, "b").duration(), Duration::ZERO);
    }

    #[test]
    fn test_length_is_last_cue_end() {
        assert_eq!(track().length(), Duration::from_secs(5));
        assert_eq!(CueTrack::default().length(), Duration::ZERO);
    }

    #[test]
    fn test_unsorted_input_is_normalized() {
        let track = CueTrack::new(vec![cue(3000, 5000, "c"), cue(0, 2000, "a")]);
        assert_eq!(track.cues()[0].text, "a");
        assert_eq!(text_at(&track, 4000), Some("c"));
    }
}
