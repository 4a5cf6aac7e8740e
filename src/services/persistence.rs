//! Durable side of the study state.
//!
//! Writes go through one queue drained by a single task, so snapshots land
//! in the order they were submitted. A failed write is logged and dropped;
//! the caller's in-memory state stays authoritative until the next write
//! succeeds. Readers observe the stored collections through watch streams.
//!
//! The writer has its own stop signal, owned by [`WriterHandle`], so it keeps
//! accepting writes until the HTTP server has finished every request.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;

use crate::store::Store;
use crate::study::progress::UserProgress;
use crate::study::word::WordEntry;

enum WriteCommand {
    SetWords(Vec<WordEntry>),
    SaveProgress(UserProgress),
    Seed(Vec<WordEntry>),
    ClearWords,
    ClearProgress,
    Flush(oneshot::Sender<()>),
}

impl WriteCommand {
    fn name(&self) -> &'static str {
        match self {
            Self::SetWords(_) => "set_words",
            Self::SaveProgress(_) => "save_progress",
            Self::Seed(_) => "seed",
            Self::ClearWords => "clear_words",
            Self::ClearProgress => "clear_progress",
            Self::Flush(_) => "flush",
        }
    }
}

pub struct PersistenceGateway {
    store: Arc<Store>,
    queue: mpsc::UnboundedSender<WriteCommand>,
    words_rx: watch::Receiver<Vec<WordEntry>>,
    progress_rx: watch::Receiver<UserProgress>,
}

impl PersistenceGateway {
    /// Spawns the writer task. It exits after draining the queue once
    /// [`WriterHandle::shutdown`] is called or every gateway is dropped.
    pub fn start(store: Arc<Store>) -> (Self, WriterHandle) {
        let (words_tx, words_rx) = watch::channel(read_words(&store));
        let (progress_tx, progress_rx) = watch::channel(read_progress(&store));
        let (queue, commands) = mpsc::unbounded_channel();

        let writer = Writer {
            store: store.clone(),
            words_tx,
            progress_tx,
        };
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(writer.run(commands, shutdown_rx));

        (
            Self {
                store,
                queue,
                words_rx,
                progress_rx,
            },
            WriterHandle { shutdown_tx, task },
        )
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Last successfully stored word list.
    pub fn stored_words(&self) -> Vec<WordEntry> {
        self.words_rx.borrow().clone()
    }

    /// Last successfully stored progress snapshot.
    pub fn stored_progress(&self) -> UserProgress {
        self.progress_rx.borrow().clone()
    }

    /// Yields the stored list now and again after every successful write.
    pub fn words_stream(&self) -> WatchStream<Vec<WordEntry>> {
        WatchStream::new(self.words_rx.clone())
    }

    pub fn progress_stream(&self) -> WatchStream<UserProgress> {
        WatchStream::new(self.progress_rx.clone())
    }

    pub fn set_words(&self, words: Vec<WordEntry>) {
        self.submit(WriteCommand::SetWords(words));
    }

    pub fn save_progress(&self, progress: UserProgress) {
        self.submit(WriteCommand::SaveProgress(progress));
    }

    pub fn ensure_seeded(&self, defaults: Vec<WordEntry>) {
        self.submit(WriteCommand::Seed(defaults));
    }

    pub fn clear_words(&self) {
        self.submit(WriteCommand::ClearWords);
    }

    pub fn clear_progress(&self) {
        self.submit(WriteCommand::ClearProgress);
    }

    /// Resolves once every write submitted before this call has been handled.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        self.submit(WriteCommand::Flush(done_tx));
        let _ = done_rx.await;
    }

    fn submit(&self, command: WriteCommand) {
        let name = command.name();
        if self.queue.send(command).is_err() {
            tracing::warn!(command = name, "Write queue closed, dropping write");
        }
    }
}

/// Stops the writer. Dropping it without calling [`WriterHandle::shutdown`]
/// leaves the writer running until every gateway is gone.
pub struct WriterHandle {
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl WriterHandle {
    /// Stores everything queued so far, flushes sled and waits for the task.
    /// Writes submitted afterwards are dropped.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Persistence writer panicked");
        }
    }
}

fn read_words(store: &Store) -> Vec<WordEntry> {
    store.load_words().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to read stored words, using empty list");
        Vec::new()
    })
}

fn read_progress(store: &Store) -> UserProgress {
    store.load_progress().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to read stored progress, using defaults");
        UserProgress::default()
    })
}

struct Writer {
    store: Arc<Store>,
    words_tx: watch::Sender<Vec<WordEntry>>,
    progress_tx: watch::Sender<UserProgress>,
}

impl Writer {
    async fn run(
        self,
        mut commands: mpsc::UnboundedReceiver<WriteCommand>,
        mut shutdown_rx: oneshot::Receiver<()>,
    ) {
        tracing::info!("Persistence writer started");
        let mut detached = false;
        loop {
            tokio::select! {
                biased;
                command = commands.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },
                signal = &mut shutdown_rx, if !detached => {
                    if signal.is_err() {
                        // Handle dropped: run until the gateways are gone.
                        detached = true;
                        continue;
                    }
                    commands.close();
                    while let Some(command) = commands.recv().await {
                        self.handle(command);
                    }
                    break;
                }
            }
        }

        if let Err(e) = self.store.flush() {
            tracing::error!(error = %e, "Failed to flush store on writer exit");
        }
        tracing::info!("Persistence writer stopped");
    }

    fn handle(&self, command: WriteCommand) {
        let name = command.name();
        let result = match command {
            WriteCommand::SetWords(words) => self.store.set_words(&words).map(|_| true),
            WriteCommand::Seed(defaults) => self.store.ensure_seeded(&defaults),
            WriteCommand::ClearWords => self.store.clear_words().map(|_| true),
            WriteCommand::SaveProgress(progress) => {
                let result = self.store.save_progress(&progress);
                if result.is_ok() {
                    self.progress_tx.send_replace(progress);
                }
                return log_failure(name, result);
            }
            WriteCommand::ClearProgress => {
                let result = self.store.clear_progress();
                if result.is_ok() {
                    self.progress_tx.send_replace(UserProgress::default());
                }
                return log_failure(name, result);
            }
            WriteCommand::Flush(done) => {
                let _ = done.send(());
                return;
            }
        };

        match result {
            Ok(true) => {
                self.words_tx.send_replace(read_words(&self.store));
            }
            Ok(false) => tracing::debug!(command = name, "Store already populated, nothing written"),
            Err(e) => tracing::warn!(command = name, error = %e, "Write failed, stored words are stale"),
        }
    }
}

fn log_failure(command: &'static str, result: Result<(), crate::store::StoreError>) {
    if let Err(e) = result {
        tracing::warn!(command, error = %e, "Write failed, stored progress is stale");
    }
}
