//! The live board and the operations the UI drives it with.
//!
//! Every operation runs to completion synchronously and then queues the full
//! snapshot for saving. Operations given unknown ids fail without touching the
//! board; a failed save is logged and never reported back.

use crate::{
    domain::{
        reorder, seed_board, Board, Card, CardId, ColumnId, DragResult, EntityId, SeedConfig,
    },
    error::{KanbanError, Result},
    storage::{SnapshotWriter, Storage},
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Owner of the board. All mutation goes through here.
pub struct BoardState {
    board: Board,
    // `None` when the stored board could not be read; nothing is saved then.
    writer: Option<SnapshotWriter>,
}

impl BoardState {
    /// Loads the stored board, or seeds and saves a new one.
    ///
    /// A stored board that breaks the board invariants is repaired, each
    /// repair is logged, and the repaired board is saved. If loading fails
    /// the seed is used in memory only: the stored board is left as it is and
    /// no snapshot is saved for the rest of the session. Must be called
    /// inside a Tokio runtime.
    pub async fn open(storage: Arc<dyn Storage>, seed: &SeedConfig) -> Self {
        match storage.load_board().await {
            Ok(Some(mut board)) => {
                let repairs = board.sanitize();
                for repair in &repairs {
                    warn!(%repair, "repaired stored board");
                }
                let state = Self::from_board(board, storage);
                if !repairs.is_empty() {
                    state.persist();
                }
                state
            }
            Ok(None) => {
                let board = seed_board(seed, &mut rand::rng());
                let state = Self::from_board(board, storage);
                state.persist();
                state
            }
            Err(err) => {
                warn!(
                    error = %err,
                    "could not load board state, keeping changes in memory only"
                );
                Self {
                    board: seed_board(seed, &mut rand::rng()),
                    writer: None,
                }
            }
        }
    }

    /// Wraps an existing board. Must be called inside a Tokio runtime.
    pub fn from_board(board: Board, storage: Arc<dyn Storage>) -> Self {
        Self {
            board,
            writer: Some(SnapshotWriter::spawn(storage)),
        }
    }

    /// Whether changes are being saved to storage
    pub fn is_persistent(&self) -> bool {
        self.writer.is_some()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Waits for every queued snapshot to reach storage
    pub async fn flush(&self) {
        if let Some(writer) = &self.writer {
            writer.flush().await;
        }
    }

    /// Applies a finished drag.
    ///
    /// A cancelled drag is a no-op and saves nothing. Otherwise the source
    /// slot must hold the dragged card and the destination column must exist.
    pub fn move_card(&mut self, drag: &DragResult) -> Result<()> {
        let Some(destination) = &drag.destination else {
            debug!(card = %drag.dragged_id, "drag cancelled");
            return Ok(());
        };

        if !self.board.has_column(&destination.container_id) {
            return Err(KanbanError::ColumnNotFound(
                destination.container_id.to_string(),
            ));
        }

        let source = &drag.source;
        match self.board.cards_in(&source.container_id).nth(source.index) {
            None => {
                return Err(KanbanError::MalformedIndex {
                    container: source.container_id.to_string(),
                    index: source.index,
                })
            }
            Some(card) if card.id != drag.dragged_id => {
                return Err(KanbanError::CardNotFound(drag.dragged_id.to_string()))
            }
            Some(_) => {}
        }

        self.board.cards = reorder(
            &self.board.cards,
            source.index,
            &source.container_id,
            destination.index,
            &destination.container_id,
            &drag.dragged_id,
        );
        self.commit();
        Ok(())
    }

    /// Toggles which card or column is being edited: selecting the current
    /// selection clears it.
    pub fn set_editing(&mut self, id: impl Into<EntityId>) -> Result<()> {
        let id = id.into();
        if self.board.is_editing(&id) {
            self.board.currently_editing = None;
        } else {
            if !self.board.has_entity(&id) {
                return Err(KanbanError::EntityNotFound(id.to_string()));
            }
            self.board.currently_editing = Some(id);
        }
        self.commit();
        Ok(())
    }

    /// Toggles which column shows the add-card form
    pub fn set_adding(&mut self, column_id: &ColumnId) -> Result<()> {
        if self.board.is_adding(column_id) {
            self.board.currently_adding = None;
        } else {
            if !self.board.has_column(column_id) {
                return Err(KanbanError::ColumnNotFound(column_id.to_string()));
            }
            self.board.currently_adding = Some(column_id.clone());
        }
        self.commit();
        Ok(())
    }

    pub fn edit_card_text(&mut self, id: &CardId, text: impl Into<String>) -> Result<()> {
        let position = self
            .board
            .cards
            .iter()
            .position(|card| &card.id == id)
            .ok_or_else(|| KanbanError::CardNotFound(id.to_string()))?;

        self.board.cards[position] = self.board.cards[position].with_text(text);
        self.commit();
        Ok(())
    }

    /// Appends a new card to the end of `column_id` and closes the add form
    pub fn add_card(&mut self, column_id: &ColumnId, text: impl Into<String>) -> Result<CardId> {
        if !self.board.has_column(column_id) {
            return Err(KanbanError::ColumnNotFound(column_id.to_string()));
        }

        let mut id = CardId::generate();
        while self.board.has_entity(&EntityId::from(&id)) {
            id = CardId::generate();
        }

        self.board
            .cards
            .push(Card::with_id(id.clone(), text, column_id.clone()));
        self.board.currently_adding = None;
        self.commit();
        Ok(id)
    }

    /// Renames a column and ends any edit in progress
    pub fn rename_column(&mut self, column_id: &ColumnId, title: impl Into<String>) -> Result<()> {
        let column = self
            .board
            .columns
            .iter_mut()
            .find(|column| &column.id == column_id)
            .ok_or_else(|| KanbanError::ColumnNotFound(column_id.to_string()))?;

        column.title = title.into();
        self.board.currently_editing = None;
        self.commit();
        Ok(())
    }

    fn commit(&self) {
        debug_assert!(
            self.board.validate().is_ok(),
            "board invariants broken: {:?}",
            self.board.validate()
        );
        self.persist();
    }

    fn persist(&self) {
        if let Some(writer) = &self.writer {
            writer.submit(self.board.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Column, DragLocation},
        storage::MemoryStorage,
    };

    fn sample() -> Board {
        let col1 = Column::with_id(ColumnId::from("col1"), "icebox");
        let col2 = Column::with_id(ColumnId::from("col2"), "backlog");
        let cards = vec![
            Card::with_id(CardId::from("a"), "A", col1.id.clone()),
            Card::with_id(CardId::from("b"), "B", col1.id.clone()),
            Card::with_id(CardId::from("c"), "C", col2.id.clone()),
        ];
        Board::new(vec![col1, col2], cards)
    }

    fn state_with(board: Board) -> (BoardState, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        (BoardState::from_board(board, storage.clone()), storage)
    }

    fn drag(id: &str, from: (&str, usize), to: Option<(&str, usize)>) -> DragResult {
        DragResult::new(
            CardId::from(id),
            DragLocation::new(ColumnId::from(from.0), from.1),
            to.map(|(col, index)| DragLocation::new(ColumnId::from(col), index)),
        )
    }

    fn layout(board: &Board) -> Vec<(&str, &str)> {
        board
            .cards
            .iter()
            .map(|c| (c.id.as_str(), c.belongs_to.as_str()))
            .collect()
    }

    #[tokio::test]
    async fn test_move_card_across_columns() {
        let (mut state, storage) = state_with(sample());

        state
            .move_card(&drag("a", ("col1", 0), Some(("col2", 1))))
            .unwrap();
        state.flush().await;

        assert_eq!(
            layout(state.board()),
            vec![("b", "col1"), ("c", "col2"), ("a", "col2")]
        );
        assert_eq!(storage.save_count(), 1);
        assert_eq!(storage.snapshot().await.as_ref(), Some(state.board()));
    }

    #[tokio::test]
    async fn test_cancelled_drag_changes_nothing() {
        let (mut state, storage) = state_with(sample());
        let before = state.board().clone();

        state.move_card(&drag("a", ("col1", 0), None)).unwrap();
        state.flush().await;

        assert_eq!(state.board(), &before);
        assert_eq!(storage.save_count(), 0);
    }

    #[tokio::test]
    async fn test_move_to_unknown_column_is_rejected() {
        let (mut state, storage) = state_with(sample());
        let before = state.board().clone();

        let result = state.move_card(&drag("a", ("col1", 0), Some(("nowhere", 0))));
        state.flush().await;

        assert!(matches!(result, Err(KanbanError::ColumnNotFound(_))));
        assert_eq!(state.board(), &before);
        assert_eq!(storage.save_count(), 0);
    }

    #[tokio::test]
    async fn test_move_from_empty_slot_is_rejected() {
        let (mut state, storage) = state_with(sample());

        let result = state.move_card(&drag("a", ("col1", 5), Some(("col2", 0))));
        state.flush().await;

        assert!(matches!(result, Err(KanbanError::MalformedIndex { index: 5, .. })));
        assert_eq!(state.board(), &sample());
        assert_eq!(storage.save_count(), 0);
    }

    #[tokio::test]
    async fn test_move_with_mismatched_card_is_rejected() {
        let (mut state, _storage) = state_with(sample());

        let result = state.move_card(&drag("b", ("col1", 0), Some(("col2", 0))));
        assert!(matches!(result, Err(KanbanError::CardNotFound(_))));
        assert_eq!(state.board(), &sample());
    }

    #[tokio::test]
    async fn test_set_editing_toggles() {
        let (mut state, storage) = state_with(sample());
        let card = CardId::from("a");

        state.set_editing(&card).unwrap();
        assert!(state.board().is_editing(&EntityId::from(&card)));

        state.set_editing(&card).unwrap();
        assert!(state.board().currently_editing.is_none());

        state.set_editing(&ColumnId::from("col2")).unwrap();
        state.set_editing(&card).unwrap();
        assert!(state.board().is_editing(&EntityId::from(&card)));

        state.flush().await;
        assert_eq!(storage.save_count(), 4);
    }

    #[tokio::test]
    async fn test_set_editing_unknown_entity() {
        let (mut state, _storage) = state_with(sample());

        let result = state.set_editing(EntityId::from("ghost"));
        assert!(matches!(result, Err(KanbanError::EntityNotFound(_))));
        assert!(state.board().currently_editing.is_none());
    }

    #[tokio::test]
    async fn test_set_adding_toggles() {
        let (mut state, _storage) = state_with(sample());
        let col1 = ColumnId::from("col1");
        let col2 = ColumnId::from("col2");

        state.set_adding(&col1).unwrap();
        assert!(state.board().is_adding(&col1));

        state.set_adding(&col2).unwrap();
        assert!(state.board().is_adding(&col2));

        state.set_adding(&col2).unwrap();
        assert!(state.board().currently_adding.is_none());

        assert!(state.set_adding(&ColumnId::from("ghost")).is_err());
    }

    #[tokio::test]
    async fn test_add_then_edit_card() {
        let (mut state, _storage) = state_with(sample());
        let col1 = ColumnId::from("col1");
        let existing: Vec<CardId> = state.board().cards.iter().map(|c| c.id.clone()).collect();

        state.set_adding(&col1).unwrap();
        let id = state.add_card(&col1, "hello").unwrap();
        assert!(state.board().currently_adding.is_none());
        assert!(!existing.contains(&id));

        state.edit_card_text(&id, "world").unwrap();

        let card = state.board().card(&id).unwrap();
        assert_eq!(card.text, "world");
        assert_eq!(card.belongs_to, col1);
        assert_eq!(state.board().cards.last().unwrap().id, id);
    }

    #[tokio::test]
    async fn test_add_card_to_unknown_column() {
        let (mut state, storage) = state_with(sample());

        let result = state.add_card(&ColumnId::from("ghost"), "text");
        state.flush().await;

        assert!(matches!(result, Err(KanbanError::ColumnNotFound(_))));
        assert_eq!(state.board().cards.len(), 3);
        assert_eq!(storage.save_count(), 0);
    }

    #[tokio::test]
    async fn test_edit_unknown_card() {
        let (mut state, _storage) = state_with(sample());

        let result = state.edit_card_text(&CardId::from("ghost"), "text");
        assert!(matches!(result, Err(KanbanError::CardNotFound(_))));
    }

    #[tokio::test]
    async fn test_rename_column_clears_editing() {
        let (mut state, _storage) = state_with(sample());
        let col2 = ColumnId::from("col2");

        state.set_editing(&col2).unwrap();
        state.rename_column(&col2, "doing").unwrap();

        assert_eq!(state.board().column(&col2).unwrap().title, "doing");
        assert!(state.board().currently_editing.is_none());
    }

    #[tokio::test]
    async fn test_failed_save_keeps_in_memory_state() {
        let (mut state, storage) = state_with(sample());
        storage.set_unavailable(true);

        let id = state.add_card(&ColumnId::from("col2"), "offline").unwrap();
        state.flush().await;

        assert_eq!(storage.save_count(), 0);
        assert_eq!(state.board().card(&id).unwrap().text, "offline");
    }

    #[tokio::test]
    async fn test_open_seeds_and_saves_when_empty() {
        let storage = Arc::new(MemoryStorage::new());
        let state = BoardState::open(storage.clone(), &SeedConfig::default()).await;
        state.flush().await;

        assert_eq!(state.board().columns.len(), 4);
        assert_eq!(state.board().cards.len(), 10);
        assert_eq!(storage.save_count(), 1);
        assert_eq!(storage.snapshot().await.as_ref(), Some(state.board()));
    }

    #[tokio::test]
    async fn test_open_uses_stored_board() {
        let storage = Arc::new(MemoryStorage::with_board(sample()));
        let state = BoardState::open(storage.clone(), &SeedConfig::default()).await;
        state.flush().await;

        assert_eq!(state.board(), &sample());
        assert_eq!(storage.save_count(), 0);
    }

    #[tokio::test]
    async fn test_open_repairs_stored_board() {
        let mut board = sample();
        board.cards[2].belongs_to = ColumnId::from("deleted");
        let storage = Arc::new(MemoryStorage::with_board(board));

        let state = BoardState::open(storage.clone(), &SeedConfig::default()).await;
        state.flush().await;

        assert!(state.board().validate().is_ok());
        assert_eq!(state.board().cards[2].belongs_to.as_str(), "col1");
        assert_eq!(storage.save_count(), 1);
        assert_eq!(storage.snapshot().await.as_ref(), Some(state.board()));
    }

    #[tokio::test]
    async fn test_open_falls_back_to_seed_when_storage_fails() {
        let storage = Arc::new(MemoryStorage::with_board(sample()));
        storage.set_unavailable(true);

        let mut state = BoardState::open(storage.clone(), &SeedConfig::default()).await;

        assert_eq!(state.board().columns.len(), 4);
        assert!(state.board().validate().is_ok());
        assert!(!state.is_persistent());

        storage.set_unavailable(false);
        let column = state.board().columns[0].id.clone();
        state.add_card(&column, "in memory").unwrap();
        state.flush().await;

        assert_eq!(storage.save_count(), 0);
        assert_eq!(storage.snapshot().await, Some(sample()));
    }

    #[cfg(feature = "file-storage")]
    #[tokio::test]
    async fn test_unreadable_snapshot_is_left_on_disk() {
        use crate::storage::FileStorage;
        use tempfile::TempDir;

        let temp_dir = TempDir::new().unwrap();
        let storage = Arc::new(FileStorage::new(temp_dir.path()));
        let stored = r#"{"columns":[{"id":"k1","title":"icebox"}],"cards":[{"id":"aa111","text":null,"belongsTo":"k1"}]}"#;
        std::fs::create_dir_all(storage.state_file().parent().unwrap()).unwrap();
        std::fs::write(storage.state_file(), stored).unwrap();

        let mut state = BoardState::open(storage.clone(), &SeedConfig::default()).await;
        let column = state.board().columns[0].id.clone();
        state.add_card(&column, "new").unwrap();
        state.rename_column(&column, "renamed").unwrap();
        state.flush().await;

        assert_eq!(state.board().cards.len(), 11);
        assert_eq!(std::fs::read_to_string(storage.state_file()).unwrap(), stored);
    }
}
