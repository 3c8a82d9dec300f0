use crate::{
    domain::Board,
    error::{KanbanError, Result},
    storage::Storage,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// In-memory storage for hosts without durable storage.
///
/// It can be marked unavailable, after which every call fails the way a
/// disabled or full browser store does.
#[derive(Default)]
pub struct MemoryStorage {
    snapshot: Mutex<Option<Board>>,
    saves: AtomicUsize,
    unavailable: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts out holding `board`
    pub fn with_board(board: Board) -> Self {
        Self {
            snapshot: Mutex::new(Some(board)),
            ..Self::default()
        }
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Copy of the last saved snapshot
    pub async fn snapshot(&self) -> Option<Board> {
        self.snapshot.lock().await.clone()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(KanbanError::StorageError(
                "storage is unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn load_board(&self) -> Result<Option<Board>> {
        self.check_available()?;
        Ok(self.snapshot.lock().await.clone())
    }

    async fn save_board(&self, board: &Board) -> Result<()> {
        self.check_available()?;
        *self.snapshot.lock().await = Some(board.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
