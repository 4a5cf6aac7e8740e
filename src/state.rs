use std::sync::Arc;
use std::time::Instant;

use tokio::sync::broadcast;

use crate::services::persistence::PersistenceGateway;
use crate::services::study::StudyService;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    gateway: Arc<PersistenceGateway>,
    study: Arc<StudyService>,
    shutdown_tx: broadcast::Sender<()>,
    started_at: Instant,
}

impl AppState {
    pub fn new(
        gateway: Arc<PersistenceGateway>,
        study: Arc<StudyService>,
        shutdown_tx: broadcast::Sender<()>,
    ) -> Self {
        Self {
            gateway,
            study,
            shutdown_tx,
            started_at: Instant::now(),
        }
    }

    pub fn store(&self) -> &Store {
        self.gateway.store()
    }

    pub fn gateway(&self) -> &PersistenceGateway {
        &self.gateway
    }

    pub fn study(&self) -> &StudyService {
        &self.study
    }

    pub fn shutdown_rx(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
