use crate::domain::{board::ColumnId, card::CardId};
use serde::{Deserialize, Serialize};

/// One end of a drag: a column and a position among that column's cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragLocation {
    #[serde(rename = "droppableId")]
    pub container_id: ColumnId,
    pub index: usize,
}

impl DragLocation {
    pub fn new(container_id: ColumnId, index: usize) -> Self {
        Self {
            container_id,
            index,
        }
    }
}

/// Outcome of a finished drag gesture.
///
/// `destination` is `None` when the drop was cancelled or landed outside any
/// column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragResult {
    #[serde(rename = "draggableId")]
    pub dragged_id: CardId,
    pub source: DragLocation,
    #[serde(default)]
    pub destination: Option<DragLocation>,
}

impl DragResult {
    pub fn new(dragged_id: CardId, source: DragLocation, destination: Option<DragLocation>) -> Self {
        Self {
            dragged_id,
            source,
            destination,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.destination.is_none()
    }
}
