use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, channel};
use std::time::Duration;

use anyhow::{Context, Result};
use notify_debouncer_mini::notify::{RecommendedWatcher, RecursiveMode, Watcher as _};
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};

const DEBOUNCE: Duration = Duration::from_millis(250);

/// Watches the deck file and its caption sidecar for edits.
///
/// Editors usually save by replacing the file, so the parent directories are
/// watched and events are matched by file name.
pub struct DeckWatcher {
    // Dropping the debouncer stops the watch.
    _debouncer: Debouncer<RecommendedWatcher>,
    rx: Receiver<DebounceEventResult>,
    names: Vec<OsString>,
}

impl DeckWatcher {
    pub fn new(paths: &[PathBuf]) -> Result<DeckWatcher> {
        let (tx, rx) = channel();
        let mut debouncer =
            new_debouncer(DEBOUNCE, tx).context("Failed to start the file watcher")?;

        let mut names = Vec::new();
        let mut watched = Vec::new();
        for path in paths {
            let Some(name) = path.file_name() else {
                continue;
            };
            names.push(name.to_os_string());

            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
            if !watched.contains(&dir) {
                debouncer
                    .watcher()
                    .watch(Path::new(&dir), RecursiveMode::NonRecursive)
                    .with_context(|| format!("Failed to watch {}", dir.display()))?;
                watched.push(dir);
            }
        }

        Ok(DeckWatcher {
            _debouncer: debouncer,
            rx,
            names,
        })
    }

    /// Drains pending events; true when a watched file changed since the
    /// last call.
    pub fn take_change(&self) -> bool {
        let mut changed = false;
        while let Ok(result) = self.rx.try_recv() {
            let Ok(events) = result else {
                continue;
            };
            changed |= events.iter().any(|event| {
                event
                    .path
                    .file_name()
                    .is_some_and(|name| self.names.iter().any(|watched| watched == name))
            });
        }
        changed
    }
}
