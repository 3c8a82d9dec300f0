use crate::domain::{board::ColumnId, reorder::Placed};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique, immutable identifier for a card
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Generates a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CardId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Id of whatever is being edited: a card's text or a column's title.
///
/// Card and column ids share one namespace, so a bare string is enough to
/// tell them apart on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<CardId> for EntityId {
    fn from(id: CardId) -> Self {
        Self(id.0)
    }
}

impl From<&CardId> for EntityId {
    fn from(id: &CardId) -> Self {
        Self(id.0.clone())
    }
}

impl From<ColumnId> for EntityId {
    fn from(id: ColumnId) -> Self {
        Self(id.as_str().to_string())
    }
}

impl From<&ColumnId> for EntityId {
    fn from(id: &ColumnId) -> Self {
        Self(id.as_str().to_string())
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A card on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub text: String,
    pub belongs_to: ColumnId,
}

impl Card {
    /// Creates a card with a freshly generated id
    pub fn new(text: impl Into<String>, belongs_to: ColumnId) -> Self {
        Self::with_id(CardId::generate(), text, belongs_to)
    }

    pub fn with_id(id: CardId, text: impl Into<String>, belongs_to: ColumnId) -> Self {
        Self {
            id,
            text: text.into(),
            belongs_to,
        }
    }

    /// Returns a copy carrying new text; id and column are kept
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            id: self.id.clone(),
            text: text.into(),
            belongs_to: self.belongs_to.clone(),
        }
    }
}

impl Placed for Card {
    type Id = CardId;
    type Container = ColumnId;

    fn id(&self) -> &CardId {
        &self.id
    }

    fn container(&self) -> &ColumnId {
        &self.belongs_to
    }

    fn set_container(&mut self, container: ColumnId) {
        self.belongs_to = container;
    }
}
