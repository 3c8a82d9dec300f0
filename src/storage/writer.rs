use crate::{domain::Board, storage::Storage};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

enum Message {
    Save(Board),
    Flush(oneshot::Sender<()>),
}

/// Fire-and-forget snapshot persistence.
///
/// Snapshots are queued without blocking and written by a single background
/// task, so they reach storage in submission order. Save failures are logged
/// and otherwise ignored.
pub struct SnapshotWriter {
    sender: mpsc::UnboundedSender<Message>,
}

impl SnapshotWriter {
    /// Spawns the writer task. Must be called inside a Tokio runtime.
    pub fn spawn(storage: Arc<dyn Storage>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(run(storage, receiver));
        Self { sender }
    }

    /// Queues a snapshot for saving
    pub fn submit(&self, board: Board) {
        if self.sender.send(Message::Save(board)).is_err() {
            warn!("snapshot writer has stopped, board state is only kept in memory");
        }
    }

    /// Waits until every snapshot submitted before this call has been handed
    /// to storage
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        if self.sender.send(Message::Flush(done)).is_ok() {
            let _ = wait.await;
        }
    }
}

async fn run(storage: Arc<dyn Storage>, mut receiver: mpsc::UnboundedReceiver<Message>) {
    while let Some(message) = receiver.recv().await {
        match message {
            Message::Save(board) => match storage.save_board(&board).await {
                Ok(()) => debug!(cards = board.cards.len(), "board state saved"),
                Err(err) => warn!(error = %err, "could not save board state locally"),
            },
            Message::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!("snapshot writer stopped");
}
