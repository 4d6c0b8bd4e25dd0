// src/watch/watcher.rs

use std::path::{Path, PathBuf};

use notify::event::ModifyKind;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::watch::gate::DeliverySwitch;
use crate::watch::patterns::FilePattern;

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive for
/// as long as needed. Dropping this handle will stop file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Content writes count; creates, removes, renames and access do not.
pub fn is_write_event(kind: &EventKind) -> bool {
    match kind {
        EventKind::Modify(ModifyKind::Name(_)) => false,
        EventKind::Modify(_) => true,
        _ => false,
    }
}

/// Watch `dir` (not recursively) for writes to files matching `pattern`.
///
/// Matching paths are sent on the returned channel. Events that arrive while
/// `switch` is disabled are dropped inside the notify callback.
pub fn spawn_watcher(
    dir: &Path,
    pattern: FilePattern,
    switch: DeliverySwitch,
) -> Result<(WatcherHandle, mpsc::UnboundedReceiver<PathBuf>)> {
    let (tx, rx) = mpsc::unbounded_channel::<PathBuf>();

    // Called synchronously on notify's thread for every raw event.
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if !switch.is_enabled() {
                    debug!(?event, "watch delivery disabled; dropping event");
                    return;
                }
                if !is_write_event(&event.kind) {
                    return;
                }
                for path in event.paths {
                    if !pattern.matches_path(&path) {
                        continue;
                    }
                    if tx.send(path).is_err() {
                        debug!("change receiver closed; dropping event");
                        return;
                    }
                }
            }
            Err(err) => warn!(error = %err, "file watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(dir, RecursiveMode::NonRecursive)?;

    info!(dir = %dir.display(), "watching for changes");

    Ok((WatcherHandle { _inner: watcher }, rx))
}
