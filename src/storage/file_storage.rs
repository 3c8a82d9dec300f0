use crate::{domain::Board, error::Result, storage::Storage};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// File-based storage: the snapshot is one JSON file under the project root
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const KANBAN_DIR: &'static str = ".kanban";
    const STATE_FILE: &'static str = "state.json";

    /// Creates a new FileStorage instance for the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::KANBAN_DIR),
        }
    }

    pub fn state_file(&self) -> PathBuf {
        self.root_path.join(Self::STATE_FILE)
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn load_board(&self) -> Result<Option<Board>> {
        let state_file = self.state_file();

        if !state_file.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&state_file).await?;
        let board: Board = serde_json::from_str(&contents)?;

        Ok(Some(board))
    }

    async fn save_board(&self, board: &Board) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        let json = serde_json::to_string_pretty(board)?;
        fs::write(self.state_file(), json).await?;

        debug!(path = %self.state_file().display(), cards = board.cards.len(), "saved board");
        Ok(())
    }
}
