use crate::domain::{
    board::{Board, Column},
    card::Card,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Settings for the board generated on first run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub column_titles: Vec<String>,
    pub sample_texts: Vec<String>,
    pub card_count: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            column_titles: ["icebox", "backlog", "current", "completed"]
                .into_iter()
                .map(String::from)
                .collect(),
            sample_texts: [
                "webpack",
                "higher order components",
                "redux",
                "mobx",
                "rxjs",
                "compound components",
                "container components",
                "child components",
                "redux sagas",
                "react-router",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            card_count: 10,
        }
    }
}

/// Builds a fresh board: one column per configured title and `card_count`
/// cards, each with a random sample text in a random column.
///
/// A config without columns yields a board without cards. Empty
/// `sample_texts` yields cards with empty text.
pub fn seed_board<R: Rng + ?Sized>(config: &SeedConfig, rng: &mut R) -> Board {
    let columns: Vec<Column> = config.column_titles.iter().map(Column::new).collect();

    let cards = if columns.is_empty() {
        Vec::new()
    } else {
        (0..config.card_count)
            .map(|_| {
                let text = if config.sample_texts.is_empty() {
                    String::new()
                } else {
                    config.sample_texts[rng.random_range(0..config.sample_texts.len())].clone()
                };
                let column = &columns[rng.random_range(0..columns.len())];
                Card::new(text, column.id.clone())
            })
            .collect()
    };

    info!(
        columns = columns.len(),
        cards = cards.len(),
        "seeded new board"
    );
    Board::new(columns, cards)
}
