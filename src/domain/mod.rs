pub mod board;
pub mod card;
pub mod drag;
pub mod reorder;
pub mod seed;

pub use board::{Board, Column, ColumnId};
pub use card::{Card, CardId, EntityId};
pub use drag::{DragLocation, DragResult};
pub use reorder::{absolute_index, relative_position, reorder, Placed};
pub use seed::{seed_board, SeedConfig};
