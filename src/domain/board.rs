use crate::{
    domain::card::{Card, CardId, EntityId},
    error::{KanbanError, Result},
};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};
use uuid::Uuid;

/// Unique, immutable identifier for a column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    /// Generates a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ColumnId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A column of the board. Its cards are the ones whose `belongs_to` is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
}

impl Column {
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(ColumnId::generate(), title)
    }

    pub fn with_id(id: ColumnId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// Kanban board snapshot
///
/// `cards` is the flat collection: each column's order is the order of its
/// cards in this list. The serialized shape is the one persisted under the
/// board's single storage key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(rename = "currentlyEditing", default)]
    pub currently_editing: Option<EntityId>,
    #[serde(rename = "currentlyAdding", default)]
    pub currently_adding: Option<ColumnId>,
}

impl Board {
    pub fn new(columns: Vec<Column>, cards: Vec<Card>) -> Self {
        Self {
            cards,
            columns,
            currently_editing: None,
            currently_adding: None,
        }
    }

    /// Cards of one column, in column order
    pub fn cards_in<'a>(&'a self, column: &'a ColumnId) -> impl Iterator<Item = &'a Card> + 'a {
        self.cards.iter().filter(move |card| &card.belongs_to == column)
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|card| &card.id == id)
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| &column.id == id)
    }

    pub fn has_column(&self, id: &ColumnId) -> bool {
        self.column(id).is_some()
    }

    /// Checks whether `id` names a live card or column
    pub fn has_entity(&self, id: &EntityId) -> bool {
        self.cards.iter().any(|card| card.id.as_str() == id.as_str())
            || self.columns.iter().any(|column| column.id.as_str() == id.as_str())
    }

    pub fn is_editing(&self, id: &EntityId) -> bool {
        self.currently_editing.as_ref() == Some(id)
    }

    pub fn is_adding(&self, column: &ColumnId) -> bool {
        self.currently_adding.as_ref() == Some(column)
    }

    /// Checks every board invariant, returning the first violation
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for column in &self.columns {
            if !ids.insert(column.id.as_str()) {
                return Err(KanbanError::DuplicateId(column.id.to_string()));
            }
        }
        for card in &self.cards {
            if !ids.insert(card.id.as_str()) {
                return Err(KanbanError::DuplicateId(card.id.to_string()));
            }
        }

        if let Some(card) = self.cards.iter().find(|card| !self.has_column(&card.belongs_to)) {
            return Err(KanbanError::UnknownContainer {
                card: card.id.to_string(),
                container: card.belongs_to.to_string(),
            });
        }

        if let Some(editing) = &self.currently_editing {
            if !self.has_entity(editing) {
                return Err(KanbanError::DanglingSelection(editing.to_string()));
            }
        }
        if let Some(adding) = &self.currently_adding {
            if !self.has_column(adding) {
                return Err(KanbanError::DanglingSelection(adding.to_string()));
            }
        }

        Ok(())
    }

    /// Repairs a snapshot that breaks the board invariants.
    ///
    /// - Later duplicates of a column or card id are dropped.
    /// - Cards pointing at a missing column move to the first column, or are
    ///   dropped when the board has no columns.
    /// - Selections pointing at missing entities are cleared.
    ///
    /// Returns one error per repair made; an empty list means the board was
    /// already valid.
    pub fn sanitize(&mut self) -> Vec<KanbanError> {
        let mut repairs = Vec::new();
        let mut seen = HashSet::new();

        self.columns.retain(|column| {
            let fresh = seen.insert(column.id.as_str().to_string());
            if !fresh {
                repairs.push(KanbanError::DuplicateId(column.id.to_string()));
            }
            fresh
        });
        self.cards.retain(|card| {
            let fresh = seen.insert(card.id.as_str().to_string());
            if !fresh {
                repairs.push(KanbanError::DuplicateId(card.id.to_string()));
            }
            fresh
        });

        let columns: HashSet<ColumnId> = self.columns.iter().map(|c| c.id.clone()).collect();
        let fallback = self.columns.first().map(|c| c.id.clone());
        self.cards.retain_mut(|card| {
            if columns.contains(&card.belongs_to) {
                return true;
            }
            repairs.push(KanbanError::UnknownContainer {
                card: card.id.to_string(),
                container: card.belongs_to.to_string(),
            });
            match &fallback {
                Some(column) => {
                    card.belongs_to = column.clone();
                    true
                }
                None => false,
            }
        });

        if let Some(editing) = self.currently_editing.take() {
            if self.has_entity(&editing) {
                self.currently_editing = Some(editing);
            } else {
                repairs.push(KanbanError::DanglingSelection(editing.to_string()));
            }
        }
        if let Some(adding) = self.currently_adding.take() {
            if columns.contains(&adding) {
                self.currently_adding = Some(adding);
            } else {
                repairs.push(KanbanError::DanglingSelection(adding.to_string()));
            }
        }

        repairs
    }
}
