//! Completion statistics, counted over every nesting level

use serde::{Deserialize, Serialize};
use vaultgraph_core::{KanbanBoard, KanbanColumn, round_to};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    pub column_name: String,
    pub total_cards: usize,
    pub completed_cards: usize,
    pub incomplete_cards: usize,
    /// Percentage, one decimal place
    pub completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardStatistics {
    pub file_path: String,
    pub total_cards: usize,
    pub total_completed: usize,
    pub total_incomplete: usize,
    pub overall_completion_rate: f64,
    pub column_count: usize,
    pub columns: Vec<ColumnStatistics>,
}

fn completion_rate(completed: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        round_to(completed as f64 / total as f64 * 100.0, 1)
    }
}

impl From<&KanbanColumn> for ColumnStatistics {
    fn from(column: &KanbanColumn) -> Self {
        let total = column.total_cards();
        let completed = column.completed_cards();
        Self {
            column_name: column.name.clone(),
            total_cards: total,
            completed_cards: completed,
            incomplete_cards: total - completed,
            completion_rate: completion_rate(completed, total),
        }
    }
}

/// Card counts and completion rates for a board
pub fn board_statistics(board: &KanbanBoard) -> BoardStatistics {
    let columns: Vec<ColumnStatistics> = board.columns.iter().map(Into::into).collect();
    let total_cards = board.total_cards();
    let total_completed: usize = columns.iter().map(|c| c.completed_cards).sum();

    BoardStatistics {
        file_path: board.file_path.clone(),
        total_cards,
        total_completed,
        total_incomplete: total_cards - total_completed,
        overall_completion_rate: completion_rate(total_completed, total_cards),
        column_count: columns.len(),
        columns,
    }
}
