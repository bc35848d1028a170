use std::time::{Duration, Instant};

use crate::autoplay::Autoplay;
use crate::captions::{Cue, CueTrack};
use crate::deck::SlideGraph;
use crate::nav::{CenterOn, Intent, Navigator};
use crate::playback::Transport;

/// The caption to show for one playback instant.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveCaption<'a> {
    pub cue: &'a Cue,
    /// Time left until the cue's end at the queried position.
    pub remaining: Duration,
}

/// One loaded deck-and-track with all live presentation state: the graph,
/// the caption track, the navigator, the autoplay driver, and the playback
/// transport. The viewer submits intents and reads; nothing else mutates.
///
/// Graph and track are only ever replaced wholesale, through the reload
/// token pair below, so every intent and every tick resolves against the
/// state live at that moment rather than a snapshot.
#[derive(Debug)]
pub struct Session {
    graph: SlideGraph,
    track: CueTrack,
    navigator: Navigator,
    autoplay: Autoplay,
    transport: Transport,
    generation: u64,
}

impl Session {
    pub fn new(graph: SlideGraph, track: CueTrack, cadence: Duration) -> Session {
        let navigator = Navigator::new(&graph);
        let transport = Transport::new(track.length());
        Session {
            graph,
            track,
            navigator,
            autoplay: Autoplay::new(cadence),
            transport,
            generation: 0,
        }
    }

    pub fn graph(&self) -> &SlideGraph {
        &self.graph
    }

    pub fn track(&self) -> &CueTrack {
        &self.track
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut Transport {
        &mut self.transport
    }

    /// The effective current slide key (stale keys resolve to the start).
    pub fn current_key(&self) -> Option<&str> {
        self.navigator.current_key(&self.graph)
    }

    /// Submit one navigation intent against the live graph.
    pub fn submit(&mut self, intent: Intent) -> Option<CenterOn> {
        self.navigator.submit(intent, &self.graph)
    }

    pub fn autoplay_on(&self) -> bool {
        self.autoplay.is_on()
    }

    pub fn set_autoplay(&mut self, on: bool, now: Instant) {
        self.autoplay.set_on(on, now);
    }

    pub fn toggle_autoplay(&mut self, now: Instant) -> bool {
        self.autoplay.toggle(now)
    }

    pub fn autoplay_time_to_next(&self, now: Instant) -> Option<Duration> {
        self.autoplay.time_to_next(now)
    }

    /// Deliver a due autoplay tick as an advance intent. The graph and the
    /// current key are read here, at firing time, never captured when the
    /// driver was toggled on.
    pub fn tick_if_due(&mut self, now: Instant) -> Option<CenterOn> {
        if self.autoplay.poll(now) {
            self.submit(Intent::Advance)
        } else {
            None
        }
    }

    /// The caption under the current playback position, with its remaining
    /// screen time.
    pub fn active_caption(&self, now: Instant) -> Option<ActiveCaption<'_>> {
        let position = self.transport.position(now);
        let cue = self.track.cue_at(position)?;
        Some(ActiveCaption {
            cue,
            remaining: cue.end.saturating_sub(position),
        })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a reload; the returned token must accompany the finished
    /// result. Issuing a newer token supersedes every older one.
    pub fn begin_reload(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Install a finished reload. A result whose token is no longer the
    /// latest lost the race and is dropped. Returns whether it applied.
    ///
    /// The navigator keeps its stored key: if the new graph still has it
    /// the position carries over, otherwise it normalizes to the new start
    /// key on the next read. Autoplay keeps running; the transport restarts
    /// paused since the narration was regenerated with the deck.
    pub fn apply_reload(&mut self, token: u64, graph: SlideGraph, track: CueTrack) -> bool {
        if token != self.generation {
            return false;
        }
        self.transport = Transport::new(track.length());
        self.graph = graph;
        self.track = track;
        true
    }
}
