use crate::{domain::Board, error::Result};
use async_trait::async_trait;

#[cfg(feature = "file-storage")]
pub mod file_storage;
pub mod memory;
pub mod writer;

#[cfg(feature = "file-storage")]
pub use file_storage::FileStorage;
pub use memory::MemoryStorage;
pub use writer::SnapshotWriter;

/// Storage trait for persisting the board snapshot
///
/// The whole board lives under one well-known key; there is no per-card
/// storage.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Loads the stored snapshot, or `None` if nothing was saved yet
    async fn load_board(&self) -> Result<Option<Board>>;

    /// Replaces the stored snapshot
    async fn save_board(&self, board: &Board) -> Result<()>;
}
