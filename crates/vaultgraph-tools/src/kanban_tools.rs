//! Kanban board tools: read a board file, edit it in memory, write it back

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::instrument;
use vaultgraph_core::prelude::*;
use vaultgraph_kanban::{
    BoardStatistics, CardPosition, NewCard, add_card, board_statistics, move_card,
    parse_board, serialize_board, toggle_card,
};
use vaultgraph_vault::VaultManager;

/// Kanban tools context
pub struct KanbanTools {
    pub manager: Arc<VaultManager>,
}

/// Column summary for JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    /// Root cards only
    pub card_count: usize,
    pub line_number: usize,
    pub cards: Vec<KanbanCard>,
}

/// Parsed board for JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardInfo {
    pub file_path: String,
    pub total_cards: usize,
    /// Frontmatter settings
    pub settings: serde_json::Map<String, serde_json::Value>,
    pub columns: Vec<ColumnInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCardResult {
    /// Whether the board file was written
    pub success: bool,
    pub column: String,
    pub card_text: String,
    pub total_cards: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveCardResult {
    pub success: bool,
    pub card_text: String,
    pub from_column: String,
    pub to_column: String,
    pub had_subtasks: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleCardResult {
    pub success: bool,
    pub card_text: String,
    pub new_status: CardStatus,
}

impl KanbanTools {
    /// Create new Kanban tools
    pub fn new(manager: Arc<VaultManager>) -> Self {
        Self { manager }
    }

    /// Read and parse a board file
    pub async fn load_board(&self, path: &str) -> Result<KanbanBoard> {
        let content = self.manager.read_file(Path::new(path)).await?;
        parse_board(&content, path)
    }

    fn ensure_writable(&self) -> Result<()> {
        if self.manager.is_read_only() {
            return Err(Error::config_error(format!(
                "Vault '{}' is read-only; Kanban boards cannot be modified",
                self.manager.vault_name()
            )));
        }
        Ok(())
    }

    /// Serialize and write a board, reporting failure instead of raising it
    async fn save_board(&self, board: &KanbanBoard) -> bool {
        let content = serialize_board(board);
        match self
            .manager
            .write_file(Path::new(&board.file_path), &content)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to write board {}: {}", board.file_path, e);
                false
            }
        }
    }

    /// Board structure with columns, nested cards, and settings
    #[instrument(skip(self), name = "kanban_parse_board")]
    pub async fn parse_kanban_board(&self, path: &str) -> Result<BoardInfo> {
        let board = self.load_board(path).await?;

        let settings = match serde_json::to_value(&board.settings) {
            Ok(serde_json::Value::Object(map)) => map,
            Ok(_) => serde_json::Map::new(),
            Err(e) => {
                log::warn!("Board settings of {} are not JSON-compatible: {}", path, e);
                serde_json::Map::new()
            }
        };

        Ok(BoardInfo {
            file_path: board.file_path.clone(),
            total_cards: board.total_cards(),
            settings,
            columns: board
                .columns
                .into_iter()
                .map(|column| ColumnInfo {
                    name: column.name,
                    card_count: column.cards.len(),
                    line_number: column.line_number,
                    cards: column.cards,
                })
                .collect(),
        })
    }

    /// Add a card to a column and write the board back
    #[instrument(skip(self, new_card), fields(card = %new_card.text), name = "kanban_add_card")]
    pub async fn add_kanban_card(
        &self,
        path: &str,
        column: &str,
        new_card: NewCard,
    ) -> Result<AddCardResult> {
        self.ensure_writable()?;
        let mut board = self.load_board(path).await?;

        let location = add_card(&mut board, column, new_card)?;
        let card_text = board
            .card_at(&location)
            .map(|card| card.text.clone())
            .unwrap_or_default();
        let success = self.save_board(&board).await;

        Ok(AddCardResult {
            success,
            column: column.to_string(),
            card_text,
            total_cards: board.total_cards(),
        })
    }

    /// Move a card between columns and write the board back
    #[instrument(skip(self), name = "kanban_move_card")]
    pub async fn move_kanban_card(
        &self,
        path: &str,
        card_text: &str,
        from_column: &str,
        to_column: &str,
        position: CardPosition,
    ) -> Result<MoveCardResult> {
        self.ensure_writable()?;
        let mut board = self.load_board(path).await?;

        let outcome = move_card(&mut board, card_text, from_column, to_column, position)?;
        let success = self.save_board(&board).await;

        Ok(MoveCardResult {
            success,
            card_text: card_text.to_string(),
            from_column: from_column.to_string(),
            to_column: to_column.to_string(),
            had_subtasks: outcome.had_subtasks,
        })
    }

    /// Flip a card's completion status and write the board back
    #[instrument(skip(self), name = "kanban_toggle_card")]
    pub async fn toggle_kanban_card(
        &self,
        path: &str,
        card_text: &str,
        column: Option<&str>,
    ) -> Result<ToggleCardResult> {
        self.ensure_writable()?;
        let mut board = self.load_board(path).await?;

        let new_status = toggle_card(&mut board, card_text, column)?;
        let success = self.save_board(&board).await;

        Ok(ToggleCardResult {
            success,
            card_text: card_text.to_string(),
            new_status,
        })
    }

    /// Card counts and completion rates
    pub async fn get_kanban_statistics(&self, path: &str) -> Result<BoardStatistics> {
        let board = self.load_board(path).await?;
        Ok(board_statistics(&board))
    }
}
