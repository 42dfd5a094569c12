use std::sync::{Arc, Mutex, PoisonError, RwLock};

use shared::domain::NodeRecord;
use tokio::{sync::broadcast, task::JoinHandle};
use tracing::{debug, error, info, warn};

use crate::{
    format::{sort_nodes, DisplayZone},
    render::render_table,
    ClusterSource, FetchError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    NodesReplaced { count: usize },
    FetchFailed { reason: String },
}

struct ViewState {
    nodes: Arc<Vec<NodeRecord>>,
    mounted: bool,
    // Bumped on every mount and unmount so a stale fetch cannot write.
    generation: u64,
}

pub struct NodeListView {
    source: Arc<dyn ClusterSource>,
    zone: DisplayZone,
    state: RwLock<ViewState>,
    fetch_task: Mutex<Option<JoinHandle<()>>>,
    events: broadcast::Sender<ViewEvent>,
}

impl NodeListView {
    pub fn new(source: Arc<dyn ClusterSource>) -> Arc<Self> {
        Self::with_display_zone(source, DisplayZone::default())
    }

    pub fn with_display_zone(source: Arc<dyn ClusterSource>, zone: DisplayZone) -> Arc<Self> {
        let (events, _) = broadcast::channel(16);
        Arc::new(Self {
            source,
            zone,
            state: RwLock::new(ViewState {
                nodes: Arc::new(Vec::new()),
                mounted: false,
                generation: 0,
            }),
            fetch_task: Mutex::new(None),
            events,
        })
    }

    /// Returns `false` without fetching when already mounted.
    pub fn mount(self: &Arc<Self>) -> bool {
        let generation = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            if state.mounted {
                debug!("node list already mounted; skipping fetch");
                return false;
            }
            state.mounted = true;
            state.generation += 1;
            state.generation
        };

        let view = Arc::clone(self);
        let task = tokio::spawn(async move {
            let result = view.source.nodes().await;
            view.complete_fetch(generation, result);
        });
        *self.fetch_task.lock().unwrap_or_else(PoisonError::into_inner) = Some(task);
        true
    }

    pub async fn settle(&self) {
        let task = self
            .fetch_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                if e.is_panic() {
                    error!(error = %e, "node list fetch task panicked");
                }
            }
        }
    }

    /// Cancels an in-flight fetch and discards the collection.
    pub fn unmount(&self) {
        if let Some(task) = self
            .fetch_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            task.abort();
        }

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.mounted = false;
        state.generation += 1;
        state.nodes = Arc::new(Vec::new());
    }

    pub fn is_mounted(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .mounted
    }

    pub async fn load(&self) {
        match self.source.nodes().await {
            Ok(nodes) => self.handle_fetch_success(nodes),
            Err(e) => self.handle_fetch_failure(&e),
        }
    }

    pub fn handle_fetch_success(&self, mut nodes: Vec<NodeRecord>) {
        sort_nodes(&mut nodes);
        self.replace(Arc::new(nodes));
    }

    pub fn handle_fetch_failure(&self, error: &FetchError) {
        error!(%error, "failed to fetch cluster nodes");
        let _ = self.events.send(ViewEvent::FetchFailed {
            reason: error.to_string(),
        });
    }

    pub fn current(&self) -> Arc<Vec<NodeRecord>> {
        Arc::clone(
            &self
                .state
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .nodes,
        )
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.events.subscribe()
    }

    pub fn render(&self) -> String {
        render_table(&self.current(), self.zone)
    }

    fn complete_fetch(&self, generation: u64, result: Result<Vec<NodeRecord>, FetchError>) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.generation != generation {
            warn!(generation, "dropping fetch outcome for a stale mount");
            return;
        }
        match result {
            Ok(mut nodes) => {
                sort_nodes(&mut nodes);
                let count = nodes.len();
                state.nodes = Arc::new(nodes);
                drop(state);
                self.notify_replaced(count);
            }
            Err(e) => {
                drop(state);
                self.handle_fetch_failure(&e);
            }
        }
    }

    fn replace(&self, nodes: Arc<Vec<NodeRecord>>) {
        let count = nodes.len();
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .nodes = nodes;
        self.notify_replaced(count);
    }

    fn notify_replaced(&self, count: usize) {
        info!(count, "node list updated");
        let _ = self.events.send(ViewEvent::NodesReplaced { count });
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
