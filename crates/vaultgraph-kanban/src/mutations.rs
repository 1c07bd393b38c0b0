//! In-memory board edits: add, move, and toggle cards

use crate::lookup::find_card;
use serde::{Deserialize, Serialize};
use vaultgraph_core::prelude::*;
use vaultgraph_parser::card_metadata::parse_due_date;
use vaultgraph_parser::parse_card_metadata;

/// Where a card lands in a column's root list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardPosition {
    Start,
    #[default]
    End,
}

impl std::str::FromStr for CardPosition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" | "top" => Ok(Self::Start),
            "end" | "bottom" => Ok(Self::End),
            other => Err(Error::validation_error(format!(
                "Unknown position '{}': expected 'start' or 'end'",
                other
            ))),
        }
    }
}

fn insert_root(cards: &mut Vec<KanbanCard>, card: KanbanCard, position: CardPosition) -> usize {
    match position {
        CardPosition::Start => {
            cards.insert(0, card);
            0
        }
        CardPosition::End => {
            cards.push(card);
            cards.len() - 1
        }
    }
}

/// A card to add to a column
#[derive(Debug, Clone, Default)]
pub struct NewCard {
    pub text: String,
    pub status: CardStatus,
    /// `YYYY-MM-DD`
    pub due_date: Option<String>,
    pub position: CardPosition,
}

impl NewCard {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn status(mut self, status: CardStatus) -> Self {
        self.status = status;
        self
    }

    pub fn due_date(mut self, due: impl Into<String>) -> Self {
        self.due_date = Some(due.into());
        self
    }

    pub fn position(mut self, position: CardPosition) -> Self {
        self.position = position;
        self
    }
}

/// Add a root card to `column`.
///
/// Tags and wikilinks are read from the text. An explicit due date wins over
/// one written inline; a malformed explicit date is rejected.
pub fn add_card(board: &mut KanbanBoard, column: &str, new_card: NewCard) -> Result<CardLocation> {
    let column_idx = board
        .column_index(column)
        .ok_or_else(|| Error::column_not_found(column))?;

    let due_date = match new_card.due_date.as_deref() {
        Some(raw) => Some(parse_due_date(raw).ok_or_else(|| {
            Error::validation_error(format!("Invalid due date '{}': expected YYYY-MM-DD", raw))
        })?),
        None => None,
    };

    let meta = parse_card_metadata(&new_card.text);
    let mut card = KanbanCard::new(meta.text, new_card.status)?;
    card.due_date = due_date.or(meta.due_date);
    card.tags = meta.tags;
    card.wikilinks = meta.wikilinks;

    let cards = &mut board.columns[column_idx].cards;
    let index = insert_root(cards, card, new_card.position);
    log::debug!("Added card to column {} at {}", column, index);

    Ok(CardLocation::new(column_idx, vec![index]))
}

/// Result of a successful move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub location: CardLocation,
    pub had_subtasks: bool,
}

/// Move the first card matching `text` in `from` to the root of `to`.
///
/// The card keeps its subtasks and becomes a root card (`indent_level` 0)
/// in the destination, even when it was a subtask before.
pub fn move_card(
    board: &mut KanbanBoard,
    text: &str,
    from: &str,
    to: &str,
    position: CardPosition,
) -> Result<MoveOutcome> {
    if board.column_index(from).is_none() {
        return Err(Error::column_not_found(from));
    }
    let to_idx = board
        .column_index(to)
        .ok_or_else(|| Error::column_not_found(to))?;

    let location = find_card(board, text, Some(from))
        .map(|found| found.location)
        .ok_or_else(|| Error::not_found(format!("Card not found: {}", text)))?;

    let mut card = board
        .remove_card(&location)
        .ok_or_else(|| Error::not_found(format!("Card not found: {}", text)))?;
    card.indent_level = 0;
    let had_subtasks = !card.subtasks.is_empty();

    let index = insert_root(&mut board.columns[to_idx].cards, card, position);
    log::debug!("Moved card '{}' from {} to {}", text, from, to);

    Ok(MoveOutcome {
        location: CardLocation::new(to_idx, vec![index]),
        had_subtasks,
    })
}

/// Flip the status of the first card matching `text`, returning the new status
pub fn toggle_card(board: &mut KanbanBoard, text: &str, column: Option<&str>) -> Result<CardStatus> {
    if let Some(name) = column
        && board.column_index(name).is_none()
    {
        return Err(Error::column_not_found(name));
    }

    let location = find_card(board, text, column)
        .map(|found| found.location)
        .ok_or_else(|| Error::not_found(format!("Card not found: {}", text)))?;
    let card = board
        .card_at_mut(&location)
        .ok_or_else(|| Error::not_found(format!("Card not found: {}", text)))?;

    card.status = card.status.toggled();
    Ok(card.status)
}
