use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Component, Path};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{trace, warn};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Entries below `.git` whose changes can alter the change set.
const GIT_METADATA: [&str; 5] = ["index", "HEAD", "refs", "FETCH_HEAD", "ORIG_HEAD"];

/// Recursive watch over a working tree, reduced to "something relevant
/// changed" notifications.
pub struct ChangeWatcher {
    // Dropping the watcher stops the notifications.
    _watcher: RecommendedWatcher,
    bursts: Debouncer,
}

/// Collapses a stream of change notifications into quiet-period bursts.
pub struct Debouncer {
    events: UnboundedReceiver<()>,
    debounce: Duration,
}

impl Debouncer {
    pub fn new(events: UnboundedReceiver<()>, debounce: Duration) -> Self {
        Self { events, debounce }
    }

    /// Wait for the next burst of changes and return once it has been quiet
    /// for the debounce interval. `None` when the sender has shut down.
    pub async fn next_burst(&mut self) -> Option<()> {
        self.events.recv().await?;

        loop {
            match tokio::time::timeout(self.debounce, self.events.recv()).await {
                Ok(Some(())) => continue,
                Ok(None) => return None,
                Err(_) => return Some(()),
            }
        }
    }
}

impl ChangeWatcher {
    pub fn new(root: &Path, debounce: Duration) -> notify::Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let watched_root = root.to_path_buf();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) if is_relevant_event(&watched_root, &event) => {
                    trace!(paths = ?event.paths, "relevant change");
                    let _ = tx.send(());
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "file watcher error"),
            },
            Config::default(),
        )?;
        watcher.watch(root, RecursiveMode::Recursive)?;

        Ok(Self {
            _watcher: watcher,
            bursts: Debouncer::new(rx, debounce),
        })
    }

    pub async fn next_burst(&mut self) -> Option<()> {
        self.bursts.next_burst().await
    }
}

fn is_relevant_event(root: &Path, event: &Event) -> bool {
    if matches!(event.kind, EventKind::Access(_)) {
        return false;
    }

    event.paths.iter().any(|path| is_relevant_path(root, path))
}

/// Working-tree files always count; inside `.git` only the index, HEAD,
/// refs and the fetch/merge heads do.
pub fn is_relevant_path(root: &Path, path: &Path) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut components = relative.components().filter_map(|component| match component {
        Component::Normal(name) => Some(name),
        _ => None,
    });

    match components.next() {
        Some(first) if first == ".git" => components
            .next()
            .is_some_and(|entry| GIT_METADATA.iter().any(|name| entry == *name)),
        Some(_) => true,
        None => false,
    }
}
