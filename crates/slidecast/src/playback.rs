use std::time::{Duration, Instant};

/// Playback transport for the narration track: the viewer's stand-in for
/// an audio element. Position advances with wall-clock time while playing
/// and clamps at the track length; the caption lookup reads it every
/// frame.
#[derive(Debug, Clone, Default)]
pub struct Transport {
    length: Duration,
    base: Duration,
    playing_since: Option<Instant>,
}

impl Transport {
    pub fn new(length: Duration) -> Transport {
        Transport {
            length,
            base: Duration::ZERO,
            playing_since: None,
        }
    }

    pub fn length(&self) -> Duration {
        self.length
    }

    pub fn is_playing(&self) -> bool {
        self.playing_since.is_some()
    }

    /// Current playback position, clamped to the track length.
    pub fn position(&self, now: Instant) -> Duration {
        let elapsed = self
            .playing_since
            .map(|since| now.saturating_duration_since(since))
            .unwrap_or(Duration::ZERO);
        (self.base + elapsed).min(self.length)
    }

    /// Start playing. Restarts from the top when the track already ran
    /// out; a repeated play keeps the running clock.
    pub fn play(&mut self, now: Instant) {
        if self.playing_since.is_none() {
            if self.base >= self.length {
                self.base = Duration::ZERO;
            }
            self.playing_since = Some(now);
        }
    }

    pub fn pause(&mut self, now: Instant) {
        if let Some(since) = self.playing_since.take() {
            self.base = (self.base + now.saturating_duration_since(since)).min(self.length);
        }
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.is_playing() {
            self.pause(now);
        } else {
            self.play(now);
        }
    }

    pub fn seek(&mut self, to: Duration, now: Instant) {
        self.base = to.min(self.length);
        if self.playing_since.is_some() {
            self.playing_since = Some(now);
        }
    }

    /// True once the position has reached the end of a non-empty track.
    pub fn finished(&self, now: Instant) -> bool {
        self.length > Duration::ZERO && self.position(now) >= self.length
    }
}
