use thiserror::Error;

pub type Result<T> = std::result::Result<T, KanbanError>;

#[derive(Debug, Error)]
pub enum KanbanError {
    #[error("No card at index {index} of column {container}")]
    MalformedIndex { container: String, index: usize },

    #[error("Card {card} belongs to unknown column {container}")]
    UnknownContainer { card: String, container: String },

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("No card or column with id {0}")]
    EntityNotFound(String),

    #[error("Selection refers to a missing card or column: {0}")]
    DanglingSelection(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
