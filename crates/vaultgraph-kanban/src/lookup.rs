//! Card lookup by exact text

use vaultgraph_core::{CardLocation, KanbanBoard, KanbanCard, KanbanColumn};

/// A card found on a board, borrowed from it
#[derive(Debug, Clone)]
pub struct CardMatch<'a> {
    pub location: CardLocation,
    pub column: &'a KanbanColumn,
    pub card: &'a KanbanCard,
    /// `None` for root cards
    pub parent: Option<&'a KanbanCard>,
}

/// Find the first card whose text equals `text` exactly.
///
/// No trimming or case folding is applied to the query.
/// Columns are searched in board order and cards depth-first, so a subtask
/// matches before its parent's later siblings. `column` limits the search to
/// one column; an unknown column name finds nothing.
pub fn find_card<'a>(
    board: &'a KanbanBoard,
    text: &str,
    column: Option<&str>,
) -> Option<CardMatch<'a>> {
    board
        .columns
        .iter()
        .enumerate()
        .filter(|(_, col)| column.is_none_or(|name| col.name == name))
        .find_map(|(column_idx, col)| {
            let mut path = Vec::new();
            let (card, parent) = search(&col.cards, None, text, &mut path)?;
            Some(CardMatch {
                location: CardLocation::new(column_idx, path),
                column: col,
                card,
                parent,
            })
        })
}

/// Location of the first matching card, for callers that go on to mutate
pub fn locate_card(board: &KanbanBoard, text: &str, column: Option<&str>) -> Option<CardLocation> {
    find_card(board, text, column).map(|found| found.location)
}

fn search<'a>(
    cards: &'a [KanbanCard],
    parent: Option<&'a KanbanCard>,
    text: &str,
    path: &mut Vec<usize>,
) -> Option<(&'a KanbanCard, Option<&'a KanbanCard>)> {
    for (idx, card) in cards.iter().enumerate() {
        path.push(idx);
        if card.text == text {
            return Some((card, parent));
        }
        if let Some(found) = search(&card.subtasks, Some(card), text, path) {
            return Some(found);
        }
        path.pop();
    }
    None
}
