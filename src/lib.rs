//! # Kanban Core
//!
//! Board model and card reordering for a local-first kanban board.
//!
//! Cards live in one flat, ordered list and name their column through
//! `belongs_to`. A column's contents are the cards that point at it, in flat
//! order. Drag results arrive as per-column relative indices, so every move
//! goes through [`domain::reorder`] to translate them into flat positions.
//!
//! [`BoardState`] owns the board, applies edits, and hands every snapshot to a
//! [`Storage`] backend without waiting for the write.

pub mod domain;
pub mod error;
pub mod state;
pub mod storage;

// Re-export commonly used types
pub use domain::{
    board::{Board, Column, ColumnId},
    card::{Card, CardId, EntityId},
    drag::{DragLocation, DragResult},
    reorder::{absolute_index, relative_position, reorder, Placed},
    seed::{seed_board, SeedConfig},
};
pub use error::{KanbanError, Result};
pub use state::BoardState;
pub use storage::Storage;
