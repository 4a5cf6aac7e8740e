use std::sync::Arc;

use axum::Router;
use tempfile::TempDir;
use tokio::sync::broadcast;

use wordquiz_backend::config::Config;
use wordquiz_backend::routes::build_router;
use wordquiz_backend::services::persistence::PersistenceGateway;
use wordquiz_backend::services::study::StudyService;
use wordquiz_backend::state::AppState;
use wordquiz_backend::store::Store;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub config: Config,
    pub shutdown_tx: broadcast::Sender<()>,
    _temp_dir: TempDir,
}

impl TestApp {
    /// Waits until every queued write has reached sled.
    pub async fn flush(&self) {
        self.state.gateway().flush().await;
    }
}

async fn spawn(seed_default_words: bool) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let sled_path = temp_dir.path().join("wordquiz-test.sled");

    // Built directly so parallel tests never race on set_var.
    let config = Config {
        host: std::net::IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
        port: 3000,
        log_level: "info".to_string(),
        enable_file_logs: false,
        log_dir: "./logs".to_string(),
        sled_path: sled_path.to_string_lossy().to_string(),
        cors_origin: "http://localhost:5173".to_string(),
        seed_default_words,
    };

    let store = Arc::new(Store::open(&config.sled_path).expect("open store"));
    store.run_migrations().expect("run migrations");

    let (shutdown_tx, _) = broadcast::channel::<()>(8);
    let (gateway, _writer) = PersistenceGateway::start(store);
    let gateway = Arc::new(gateway);
    let study = Arc::new(StudyService::start(gateway.clone(), seed_default_words).await);

    let state = AppState::new(gateway, study, shutdown_tx.clone());
    let app = build_router(state.clone());

    TestApp {
        app,
        state,
        config,
        shutdown_tx,
        _temp_dir: temp_dir,
    }
}

/// App over an empty store.
pub async fn spawn_test_app() -> TestApp {
    spawn(false).await
}

/// App whose store starts with the default words.
pub async fn spawn_seeded_app() -> TestApp {
    spawn(true).await
}
